pub mod chart;
pub mod table;
pub mod terminal;
pub mod utils;

pub use chart::render_detail_panel;
pub use table::quote_table;
pub use terminal::TerminalGuard;
