pub mod globe;
pub mod panel;
pub mod popup;
