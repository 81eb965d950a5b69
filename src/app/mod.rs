pub mod bootstrap;
pub mod controller;
pub mod state;

pub use bootstrap::{run_browser, run_chart, run_rows, run_symbols};
pub use controller::AppController;
