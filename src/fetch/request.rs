use crate::series::TickerSymbol;

use super::transport::HttpRequest;

pub const DAILY_FUNCTION: &str = "TIME_SERIES_DAILY";

/// Endpoint and credential shared by every daily series request.
#[derive(Clone)]
pub struct QueryTemplate {
    pub endpoint: String,
    api_key: String,
}

impl QueryTemplate {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        }
    }

    /// The fixed `function` / `symbol` / `apikey` query for one symbol.
    pub fn daily_series(&self, symbol: &TickerSymbol) -> HttpRequest {
        HttpRequest::get(self.endpoint.as_str())
            .with_query("function", DAILY_FUNCTION)
            .with_query("symbol", symbol.as_str())
            .with_query("apikey", self.api_key.as_str())
    }
}

impl std::fmt::Debug for QueryTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryTemplate")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn daily_series_query_shape() {
        let template = QueryTemplate::new("https://www.alphavantage.co/query", "k3y");
        let request = template.daily_series(&TickerSymbol::new("AAPL").unwrap());

        assert_eq!(request.url, "https://www.alphavantage.co/query");
        assert_eq!(
            request.query,
            vec![
                ("function".to_string(), "TIME_SERIES_DAILY".to_string()),
                ("symbol".to_string(), "AAPL".to_string()),
                ("apikey".to_string(), "k3y".to_string()),
            ]
        );
    }

    #[test]
    fn debug_output_hides_the_key() {
        let template = QueryTemplate::new("https://example.com", "super-secret");
        let rendered = format!("{template:?}");
        assert!(!rendered.contains("super-secret"));
    }
}
