use crate::series::DEFAULT_CHART_LIMIT;

pub mod loader;
pub mod validator;

pub use loader::{
    load_from_env, load_from_lookup, load_settings_from_env, load_settings_from_lookup, Overrides,
};

pub const DEFAULT_ENDPOINT: &str = "https://www.alphavantage.co/query";

/// Entry offered by the symbol picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolChoice {
    pub code: String,
    pub label: String,
}

impl SymbolChoice {
    pub fn new(code: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub endpoint: String,
    pub api_key: String,
    pub chart_limit: usize,
    pub symbols: Vec<SymbolChoice>,
}

impl Config {
    /// Defaults for everything except the access key, which must be supplied at start-up.
    pub fn builtin() -> Self {
        Config {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: String::new(),
            chart_limit: DEFAULT_CHART_LIMIT,
            symbols: default_symbols(),
        }
    }

    pub fn symbol_label(&self, code: &str) -> Option<&str> {
        self.symbols
            .iter()
            .find(|choice| choice.code.eq_ignore_ascii_case(code))
            .map(|choice| choice.label.as_str())
    }
}

fn default_symbols() -> Vec<SymbolChoice> {
    vec![
        SymbolChoice::new("AAPL", "Apple"),
        SymbolChoice::new("MSFT", "Microsoft"),
        SymbolChoice::new("AMZN", "Amazon"),
        SymbolChoice::new("TSLA", "Tesla"),
        SymbolChoice::new("FB", "Facebook"),
    ]
}
