// App module for host_city_explorer
// Ties the flight scheduler, selection state and query controller together

pub mod flight;
pub mod input;
pub mod presentation;
pub mod query;
pub mod selection;
pub mod state;

pub use input::{handle_input, handle_mouse};
pub use state::{App, PanelFocus};
