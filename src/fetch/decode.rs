use std::fmt;

use serde::de::{IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

use crate::error::FetchFailure;
use crate::series::{DailyBar, TimeSeries};

pub const SERIES_KEY: &str = "Time Series (Daily)";

/// Top-level document returned by `TIME_SERIES_DAILY`.
///
/// Alpha Vantage answers problems with HTTP 200 and a single explanatory key,
/// so those keys are captured alongside the series.
#[derive(Debug, Deserialize)]
struct DailyPayload {
    #[serde(rename = "Meta Data", default)]
    _meta: Option<IgnoredAny>,
    #[serde(rename = "Time Series (Daily)", default)]
    series: Option<OrderedBars>,
    #[serde(rename = "Error Message", default)]
    error_message: Option<String>,
    #[serde(rename = "Note", default)]
    note: Option<String>,
    #[serde(rename = "Information", default)]
    information: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawBar {
    #[serde(rename = "1. open")]
    open: String,
    #[serde(rename = "2. high")]
    high: String,
    #[serde(rename = "3. low")]
    low: String,
    #[serde(rename = "4. close")]
    close: String,
    #[serde(rename = "5. volume")]
    volume: String,
}

/// Date-keyed bars kept in document order.
#[derive(Debug)]
struct OrderedBars(Vec<DailyBar>);

impl<'de> Deserialize<'de> for OrderedBars {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct BarsVisitor;

        impl<'de> Visitor<'de> for BarsVisitor {
            type Value = OrderedBars;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of trading dates to daily bars")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut bars = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((date, raw)) = map.next_entry::<String, RawBar>()? {
                    bars.push(DailyBar {
                        date,
                        open: raw.open,
                        high: raw.high,
                        low: raw.low,
                        close: raw.close,
                        volume: raw.volume,
                    });
                }
                Ok(OrderedBars(bars))
            }
        }

        deserializer.deserialize_map(BarsVisitor)
    }
}

/// Decode a response body into a [`TimeSeries`], classifying every way it can fail.
pub fn decode_daily_series(body: &str) -> Result<TimeSeries, FetchFailure> {
    let payload: DailyPayload = serde_json::from_str(body)
        .map_err(|err| FetchFailure::Malformed(format!("invalid daily series JSON: {err}")))?;

    if let Some(bars) = payload.series {
        return Ok(TimeSeries::new(bars.0));
    }

    if let Some(message) = payload.error_message {
        return Err(FetchFailure::InvalidSymbol(message));
    }

    if let Some(message) = payload.note.or(payload.information) {
        return Err(FetchFailure::RateLimited(message));
    }

    Err(FetchFailure::Malformed(format!(
        "response has no `{SERIES_KEY}` block"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "Meta Data": {
            "1. Information": "Daily Prices (open, high, low, close) and Volumes",
            "2. Symbol": "IBM",
            "3. Last Refreshed": "2024-01-03",
            "4. Output Size": "Compact",
            "5. Time Zone": "US/Eastern"
        },
        "Time Series (Daily)": {
            "2024-01-03": {
                "1. open": "161.0000",
                "2. high": "161.7300",
                "3. low": "160.0800",
                "4. close": "160.1000",
                "5. volume": "4086133"
            },
            "2024-01-02": {
                "1. open": "162.8300",
                "2. high": "163.2900",
                "3. low": "160.5000",
                "4. close": "161.5000",
                "5. volume": "3825045"
            }
        }
    }"#;

    #[test]
    fn keeps_entries_in_document_order() {
        let series = decode_daily_series(SAMPLE).unwrap();

        assert_eq!(series.len(), 2);
        assert_eq!(series.bars()[0].date, "2024-01-03");
        assert_eq!(series.bars()[1].date, "2024-01-02");
        assert_eq!(series.bars()[0].close, "160.1000");
        assert_eq!(series.bars()[1].volume, "3825045");
    }

    #[test]
    fn empty_block_is_an_empty_series() {
        let series = decode_daily_series(r#"{"Meta Data": {}, "Time Series (Daily)": {}}"#).unwrap();
        assert!(series.is_empty());
    }

    #[test]
    fn classifies_error_documents() {
        let invalid = decode_daily_series(
            r#"{"Error Message": "Invalid API call. Please retry or visit the documentation."}"#,
        );
        assert!(matches!(invalid, Err(FetchFailure::InvalidSymbol(_))));

        let note = decode_daily_series(
            r#"{"Note": "Thank you for using Alpha Vantage! Our standard API call frequency is 5 calls per minute."}"#,
        );
        assert!(matches!(note, Err(FetchFailure::RateLimited(_))));

        let info = decode_daily_series(r#"{"Information": "The demo API key is for demo purposes only."}"#);
        assert!(matches!(info, Err(FetchFailure::RateLimited(_))));
    }

    #[test]
    fn missing_block_or_bad_json_is_malformed() {
        assert!(matches!(
            decode_daily_series(r#"{"Meta Data": {}}"#),
            Err(FetchFailure::Malformed(_))
        ));
        assert!(matches!(
            decode_daily_series("<html>Bad Gateway</html>"),
            Err(FetchFailure::Malformed(_))
        ));
        assert!(matches!(
            decode_daily_series(r#"{"Time Series (Daily)": {"2024-01-02": {"4. close": "1"}}}"#),
            Err(FetchFailure::Malformed(_))
        ));
        assert!(matches!(
            decode_daily_series(r#"{"Time Series (Daily)": []}"#),
            Err(FetchFailure::Malformed(_))
        ));
    }
}
