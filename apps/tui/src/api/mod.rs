// Athlete service boundary: request shapes, the HTTP client and its errors

pub mod client;
pub mod error;

pub use client::{AthleteQuery, AthleteSource, HttpAthleteService, QueryMode};
pub use error::FetchError;
