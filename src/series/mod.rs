use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::{AppError, Result};

pub mod normalize;

pub use normalize::{to_chart_series, to_rows, ChartSeries, QuoteRow, DEFAULT_CHART_LIMIT};

/// Date format used by the daily series keys and chart labels.
pub const TRADING_DATE_FMT: &str = "%Y-%m-%d";

/// Identifier of a tradable instrument, e.g. `AAPL`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TickerSymbol(String);

impl TickerSymbol {
    pub fn new(raw: impl AsRef<str>) -> Result<Self> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(AppError::message("Ticker symbol cannot be empty"));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TickerSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for TickerSymbol {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

/// One trading day as delivered upstream. Prices and volume stay text until a view needs numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyBar {
    pub date: String,
    pub open: String,
    pub high: String,
    pub low: String,
    pub close: String,
    pub volume: String,
}

impl DailyBar {
    pub fn trading_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.date.trim(), TRADING_DATE_FMT).ok()
    }

    pub fn close_price(&self) -> Option<f64> {
        parse_price(&self.close)
    }
}

pub fn parse_price(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|price| price.is_finite())
}

/// Daily bars for a single symbol, in the order the upstream document listed them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimeSeries {
    bars: Vec<DailyBar>,
}

impl TimeSeries {
    pub fn new(bars: Vec<DailyBar>) -> Self {
        Self { bars }
    }

    pub fn bars(&self) -> &[DailyBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }
}

impl FromIterator<DailyBar> for TimeSeries {
    fn from_iter<I: IntoIterator<Item = DailyBar>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
