use std::io::Write;

use crate::app::controller::AppController;
use crate::config::Config;
use crate::error::Result;
use crate::fetch::DailyFetcher;
use crate::report::{self, OutputFormat};
use crate::series::{to_chart_series, to_rows, TickerSymbol};

/// Interactive browser over the configured symbols.
pub async fn run_browser(config: &Config) -> Result<()> {
    let controller = AppController::new(config, DailyFetcher::new(config))?;
    controller.run().await
}

/// Print every daily row for `symbol`. "No data" is reported on stderr, not as an error.
pub async fn run_rows<W: Write>(
    config: &Config,
    fetcher: &DailyFetcher,
    symbol: &TickerSymbol,
    format: OutputFormat,
    out: &mut W,
) -> Result<()> {
    let Some(series) = fetcher.fetch(symbol).await else {
        eprintln!("No data for {symbol}.");
        return Ok(());
    };
    let rows = to_rows(symbol, Some(&series));
    if rows.is_empty() {
        eprintln!("No daily bars for {symbol}.");
    }
    if format == OutputFormat::Table {
        if let Some(label) = config.symbol_label(symbol.as_str()) {
            writeln!(out, "{label} ({symbol})")?;
        }
    }
    report::write_rows(out, &rows, format)
}

/// Print the most recent `limit` closes for `symbol`, oldest first.
pub async fn run_chart<W: Write>(
    fetcher: &DailyFetcher,
    symbol: &TickerSymbol,
    limit: usize,
    format: OutputFormat,
    out: &mut W,
) -> Result<()> {
    let Some(series) = fetcher.fetch(symbol).await else {
        eprintln!("No data for {symbol}.");
        return Ok(());
    };
    let chart = to_chart_series(Some(&series), limit);
    if chart.is_empty() {
        eprintln!("No closing prices for {symbol}.");
    }
    report::write_chart(out, symbol, &chart, format)
}

pub fn run_symbols<W: Write>(config: &Config, out: &mut W) -> Result<()> {
    report::write_symbols(out, &config.symbols)
}
