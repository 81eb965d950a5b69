pub mod components;
pub mod screens;
pub mod styles;

pub use components::TerminalGuard;
pub use screens::{draw_browser, handle_key, BrowserInput};
