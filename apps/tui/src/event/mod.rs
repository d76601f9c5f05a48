// Event module for host_city_explorer
// Interactive loop and the one-shot headless run

mod loop_handler;

pub use loop_handler::{run, run_headless};
