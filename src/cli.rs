use clap::{Parser, Subcommand};

use crate::report::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "daily-ticker")]
#[command(about = "Browse daily stock prices from Alpha Vantage in the terminal")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// API key; defaults to $ALPHAVANTAGE_API_KEY
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// Query endpoint; defaults to $ALPHAVANTAGE_ENDPOINT or the public Alpha Vantage URL
    #[arg(long, global = true)]
    pub endpoint: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Pick a symbol, list its daily prices, and chart recent closes
    Browse,

    /// Print every daily bar for a symbol, most recent first
    Rows {
        /// Ticker symbol (e.g. AAPL)
        symbol: String,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Print the most recent closing prices for a symbol, oldest first
    Chart {
        /// Ticker symbol (e.g. AAPL)
        symbol: String,

        /// Number of trading days; defaults to the configured chart limit
        #[arg(short, long, value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..))]
        limit: Option<usize>,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// List the symbols offered by the picker
    Symbols,
}

impl Cli {
    pub fn is_interactive(&self) -> bool {
        matches!(self.command, None | Some(Commands::Browse))
    }

    /// Listing the picker choices is the only command that never calls upstream.
    pub fn needs_api_key(&self) -> bool {
        !matches!(self.command, Some(Commands::Symbols))
    }
}
