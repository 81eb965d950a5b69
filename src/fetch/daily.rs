use std::sync::Arc;

use crate::config::Config;
use crate::error::FetchFailure;
use crate::series::{TickerSymbol, TimeSeries};

use super::decode::decode_daily_series;
use super::request::QueryTemplate;
use super::transport::{HttpClient, ReqwestHttpClient};

/// Issues one daily-series request per call. No retries, no caching.
#[derive(Clone)]
pub struct DailyFetcher {
    template: QueryTemplate,
    client: Arc<dyn HttpClient>,
}

impl DailyFetcher {
    pub fn new(config: &Config) -> Self {
        Self::with_client(config, Arc::new(ReqwestHttpClient::new()))
    }

    pub fn with_client(config: &Config, client: Arc<dyn HttpClient>) -> Self {
        Self {
            template: QueryTemplate::new(config.endpoint.as_str(), config.api_key.as_str()),
            client,
        }
    }

    /// Fetch the daily series, reporting any failure as `None`.
    pub async fn fetch(&self, symbol: &TickerSymbol) -> Option<TimeSeries> {
        match self.try_fetch(symbol).await {
            Ok(series) => Some(series),
            Err(failure) => {
                log::warn!(
                    "No data for {}: {} (retryable: {})",
                    symbol,
                    failure,
                    failure.is_retryable()
                );
                None
            }
        }
    }

    /// Fetch the daily series and say why when there is none.
    pub async fn try_fetch(&self, symbol: &TickerSymbol) -> Result<TimeSeries, FetchFailure> {
        let request = self.template.daily_series(symbol);
        log::debug!("Requesting daily series for {} from {}", symbol, request.url);

        let response = self
            .client
            .execute(request)
            .await
            .map_err(|err| FetchFailure::Transport(err.to_string()))?;

        if !response.is_success() {
            return Err(FetchFailure::Status(response.status));
        }

        let series = decode_daily_series(&response.body)?;
        log::debug!("Received {} daily bars for {}", series.len(), symbol);
        Ok(series)
    }
}
