use anyhow::{Context, Result};
use clap::Parser;

use daily_ticker::app;
use daily_ticker::cli::{Cli, Commands};
use daily_ticker::config::{self, Overrides};
use daily_ticker::{DailyFetcher, TickerSymbol};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();
    init_logging(cli.is_interactive());

    let overrides = Overrides {
        api_key: cli.api_key.clone(),
        endpoint: cli.endpoint.clone(),
    };
    let config = if cli.needs_api_key() {
        config::load_from_env(&overrides)
    } else {
        config::load_settings_from_env(&overrides)
    }
    .context("Failed to load configuration")?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        None | Some(Commands::Browse) => {
            drop(out);
            app::run_browser(&config).await?;
        }
        Some(Commands::Rows { symbol, format }) => {
            let symbol = TickerSymbol::new(&symbol)?;
            let fetcher = DailyFetcher::new(&config);
            app::run_rows(&config, &fetcher, &symbol, format, &mut out).await?;
        }
        Some(Commands::Chart {
            symbol,
            limit,
            format,
        }) => {
            let symbol = TickerSymbol::new(&symbol)?;
            let fetcher = DailyFetcher::new(&config);
            let limit = limit.unwrap_or(config.chart_limit);
            app::run_chart(&fetcher, &symbol, limit, format, &mut out).await?;
        }
        Some(Commands::Symbols) => {
            app::run_symbols(&config, &mut out)?;
        }
    }

    Ok(())
}

/// Log lines would tear the alternate screen, so the browser stays quiet unless RUST_LOG asks.
fn init_logging(interactive: bool) {
    let default_filter = if interactive { "off" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}
