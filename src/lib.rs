pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod fetch;
pub mod report;
pub mod series;
pub mod ui;

pub use error::{AppError, FetchFailure, Result};
pub use fetch::DailyFetcher;
pub use series::{
    to_chart_series, to_rows, ChartSeries, DailyBar, QuoteRow, TickerSymbol, TimeSeries,
};
