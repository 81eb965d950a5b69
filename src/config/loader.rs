use crate::error::{AppError, Context, Result};

use super::{validator, Config, SymbolChoice};

pub const API_KEY_VAR: &str = "ALPHAVANTAGE_API_KEY";
pub const ENDPOINT_VAR: &str = "ALPHAVANTAGE_ENDPOINT";
pub const CHART_LIMIT_VAR: &str = "DAILY_TICKER_CHART_LIMIT";
pub const SYMBOLS_VAR: &str = "DAILY_TICKER_SYMBOLS";

/// Values given on the command line; they win over the environment.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub api_key: Option<String>,
    pub endpoint: Option<String>,
}

/// Load configuration from the process environment (after `.env` has been applied).
pub fn load_from_env(overrides: &Overrides) -> Result<Config> {
    load_from_lookup(|name| std::env::var(name).ok(), overrides)
}

/// Build and validate a [`Config`] from an arbitrary variable lookup.
pub fn load_from_lookup<F>(lookup: F, overrides: &Overrides) -> Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    let config = read_settings(lookup, overrides)?;

    if config.api_key.is_empty() {
        return Err(AppError::message(format!(
            "No API key configured; set {API_KEY_VAR} (or pass --api-key)"
        )));
    }

    validator::validate_config(&config)?;
    Ok(config)
}

/// Load everything but insist on nothing about the key; used by commands that never call upstream.
pub fn load_settings_from_env(overrides: &Overrides) -> Result<Config> {
    load_settings_from_lookup(|name| std::env::var(name).ok(), overrides)
}

pub fn load_settings_from_lookup<F>(lookup: F, overrides: &Overrides) -> Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    let config = read_settings(lookup, overrides)?;
    validator::validate_settings(&config)?;
    Ok(config)
}

fn read_settings<F>(lookup: F, overrides: &Overrides) -> Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = Config::builtin();
    let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

    if let Some(key) = overrides.api_key.clone().or_else(|| var(API_KEY_VAR)) {
        config.api_key = key.trim().to_string();
    }

    if let Some(endpoint) = overrides.endpoint.clone().or_else(|| var(ENDPOINT_VAR)) {
        config.endpoint = endpoint.trim().to_string();
    }

    if let Some(raw) = var(CHART_LIMIT_VAR) {
        config.chart_limit = raw
            .trim()
            .parse::<usize>()
            .with_context(|| format!("{CHART_LIMIT_VAR} must be a whole number, got `{raw}`"))?;
    }

    if let Some(raw) = var(SYMBOLS_VAR) {
        config.symbols = parse_symbol_list(&raw)?;
    }

    Ok(config)
}

/// Parse `CODE:Label,CODE:Label`; a bare `CODE` uses the code as its label.
pub fn parse_symbol_list(raw: &str) -> Result<Vec<SymbolChoice>> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let (code, label) = match entry.split_once(':') {
                Some((code, label)) => (code.trim(), label.trim()),
                None => (entry, entry),
            };
            if code.is_empty() {
                return Err(AppError::message(format!(
                    "{SYMBOLS_VAR} entry `{entry}` has no symbol"
                )));
            }
            let label = if label.is_empty() { code } else { label };
            Ok(SymbolChoice::new(code.to_uppercase(), label))
        })
        .collect()
}
