use std::collections::HashSet;

use crate::error::{AppError, Result};

use super::Config;

/// Validate a loaded configuration and surface every problem at once.
pub fn validate_config(config: &Config) -> Result<()> {
    collect_issues(config, true)
}

/// Same checks as [`validate_config`] minus the access key, for commands that stay offline.
pub fn validate_settings(config: &Config) -> Result<()> {
    collect_issues(config, false)
}

fn collect_issues(config: &Config, require_key: bool) -> Result<()> {
    let mut issues = Vec::new();

    validate_endpoint(&config.endpoint, &mut issues);
    validate_limits(config, &mut issues);
    validate_symbols(config, &mut issues);

    if require_key && config.api_key.trim().is_empty() {
        issues.push("api key must not be empty".to_string());
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(AppError::message(format!(
            "configuration invalid:\n  - {}",
            issues.join("\n  - ")
        )))
    }
}

fn validate_endpoint(endpoint: &str, issues: &mut Vec<String>) {
    let trimmed = endpoint.trim();
    if trimmed.is_empty() {
        issues.push("endpoint must not be empty".to_string());
    } else if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        issues.push(format!("endpoint `{trimmed}` must be an http(s) URL"));
    }
}

fn validate_limits(config: &Config, issues: &mut Vec<String>) {
    if config.chart_limit == 0 {
        issues.push("chart limit must be at least 1".to_string());
    }
}

fn validate_symbols(config: &Config, issues: &mut Vec<String>) {
    if config.symbols.is_empty() {
        issues.push("symbol list must contain at least one entry".to_string());
        return;
    }

    let mut seen = HashSet::new();
    for choice in &config.symbols {
        if choice.code.trim().is_empty() {
            issues.push(format!("symbol `{}` has an empty code", choice.label));
        } else if !seen.insert(choice.code.to_uppercase()) {
            issues.push(format!("symbol `{}` is listed more than once", choice.code));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SymbolChoice;

    fn valid() -> Config {
        Config {
            api_key: "key".to_string(),
            ..Config::builtin()
        }
    }

    #[test]
    fn accepts_builtin_with_key() {
        assert!(validate_config(&valid()).is_ok());
    }

    #[test]
    fn reports_every_issue() {
        let config = Config {
            endpoint: "ftp://quotes".to_string(),
            api_key: " ".to_string(),
            chart_limit: 0,
            symbols: vec![SymbolChoice::new("AAPL", "Apple"), SymbolChoice::new("aapl", "Again")],
        };

        let message = validate_config(&config).unwrap_err().to_string();
        assert!(message.contains("http(s)"));
        assert!(message.contains("chart limit"));
        assert!(message.contains("more than once"));
        assert!(message.contains("api key"));
    }

    #[test]
    fn settings_check_ignores_missing_key() {
        let config = Config::builtin();
        assert!(validate_config(&config).is_err());
        assert!(validate_settings(&config).is_ok());

        let zero_limit = Config {
            chart_limit: 0,
            ..Config::builtin()
        };
        assert!(validate_settings(&zero_limit).is_err());
    }

    #[test]
    fn rejects_empty_symbol_list() {
        let config = Config {
            symbols: Vec::new(),
            ..valid()
        };
        assert!(validate_config(&config).is_err());
    }
}
