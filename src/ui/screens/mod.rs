pub mod browse;

pub use browse::{draw_browser, handle_key, BrowserInput};
