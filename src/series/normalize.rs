use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::Serialize;

use super::{DailyBar, TickerSymbol, TimeSeries};

/// Number of closing prices shown on the detail chart.
pub const DEFAULT_CHART_LIMIT: usize = 10;

/// A daily bar tagged with the symbol it was fetched for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuoteRow {
    pub symbol: TickerSymbol,
    pub date: String,
    pub open: String,
    pub high: String,
    pub low: String,
    pub close: String,
    pub volume: String,
}

impl QuoteRow {
    fn from_bar(symbol: &TickerSymbol, bar: &DailyBar) -> Self {
        Self {
            symbol: symbol.clone(),
            date: bar.date.clone(),
            open: bar.open.clone(),
            high: bar.high.clone(),
            low: bar.low.clone(),
            close: bar.close.clone(),
            volume: bar.volume.clone(),
        }
    }
}

/// Closing prices in ascending date order with their date labels.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub prices: Vec<f64>,
}

impl ChartSeries {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn points(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.prices.iter().copied())
    }

    /// Lowest and highest price, if any.
    pub fn bounds(&self) -> Option<(f64, f64)> {
        self.prices.iter().fold(None, |acc, &price| match acc {
            None => Some((price, price)),
            Some((lo, hi)) => Some((lo.min(price), hi.max(price))),
        })
    }
}

/// Map every bar to a display row, most recent trading date first.
///
/// Undated entries keep their relative source order and sort after dated ones.
pub fn to_rows(symbol: &TickerSymbol, series: Option<&TimeSeries>) -> Vec<QuoteRow> {
    let Some(series) = series else {
        return Vec::new();
    };

    let mut keyed: Vec<(Option<NaiveDate>, &DailyBar)> = series
        .bars()
        .iter()
        .map(|bar| (bar.trading_date(), bar))
        .collect();
    keyed.sort_by(|(a, _), (b, _)| newest_first(*a, *b));

    keyed
        .into_iter()
        .map(|(_, bar)| QuoteRow::from_bar(symbol, bar))
        .collect()
}

/// Select the `limit` most recent closes and return them oldest first.
///
/// Bars without a parseable date or close cannot be plotted and are skipped.
pub fn to_chart_series(series: Option<&TimeSeries>, limit: usize) -> ChartSeries {
    let Some(series) = series else {
        return ChartSeries::default();
    };
    if limit == 0 {
        return ChartSeries::default();
    }

    let mut points: Vec<(NaiveDate, &str, f64)> = series
        .bars()
        .iter()
        .filter_map(|bar| {
            let date = bar.trading_date()?;
            let close = bar.close_price()?;
            Some((date, bar.date.as_str(), close))
        })
        .collect();

    if points.len() < series.len() {
        log::debug!(
            "Skipped {} bars without a usable date or close",
            series.len() - points.len()
        );
    }

    points.sort_by(|a, b| a.0.cmp(&b.0));
    let start = points.len().saturating_sub(limit);

    let mut chart = ChartSeries {
        labels: Vec::with_capacity(points.len() - start),
        prices: Vec::with_capacity(points.len() - start),
    };
    for (_, label, close) in &points[start..] {
        chart.labels.push((*label).to_string());
        chart.prices.push(*close);
    }
    chart
}

fn newest_first(a: Option<NaiveDate>, b: Option<NaiveDate>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(date: &str, close: &str) -> DailyBar {
        DailyBar {
            date: date.to_string(),
            open: "1.0000".to_string(),
            high: "2.0000".to_string(),
            low: "0.5000".to_string(),
            close: close.to_string(),
            volume: "1000".to_string(),
        }
    }

    fn symbol() -> TickerSymbol {
        TickerSymbol::new("AAPL").unwrap()
    }

    fn month_of_bars(days: u32) -> TimeSeries {
        (1..=days)
            .rev()
            .map(|day| bar(&format!("2024-01-{day:02}"), &format!("{}.50", 100 + day)))
            .collect()
    }

    #[test]
    fn rows_of_absent_or_empty_series_are_empty() {
        assert!(to_rows(&symbol(), None).is_empty());
        assert!(to_rows(&symbol(), Some(&TimeSeries::default())).is_empty());
    }

    #[test]
    fn one_row_per_bar_with_symbol_attached() {
        let series = month_of_bars(7);
        let rows = to_rows(&symbol(), Some(&series));

        assert_eq!(rows.len(), 7);
        assert!(rows.iter().all(|row| row.symbol.as_str() == "AAPL"));
        assert_eq!(rows[0].close, "107.50");
        assert_eq!(rows[0].volume, "1000");
    }

    #[test]
    fn rows_are_sorted_newest_first_whatever_the_source_order() {
        let series = TimeSeries::new(vec![
            bar("2024-01-02", "99.00"),
            bar("not-a-date", "1.00"),
            bar("2024-01-03", "100.00"),
            bar("2024-01-01", "98.00"),
        ]);
        let dates: Vec<String> = to_rows(&symbol(), Some(&series))
            .into_iter()
            .map(|row| row.date)
            .collect();

        assert_eq!(
            dates,
            vec!["2024-01-03", "2024-01-02", "2024-01-01", "not-a-date"]
        );
    }

    #[test]
    fn chart_keeps_the_most_recent_window_in_ascending_order() {
        let series = month_of_bars(15);
        let chart = to_chart_series(Some(&series), DEFAULT_CHART_LIMIT);

        assert_eq!(chart.len(), 10);
        assert_eq!(chart.prices.len(), chart.labels.len());
        assert_eq!(chart.labels.first().map(String::as_str), Some("2024-01-06"));
        assert_eq!(chart.labels.last().map(String::as_str), Some("2024-01-15"));
        assert!(chart.prices.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn chart_of_short_series_returns_every_point() {
        let series = month_of_bars(4);
        let chart = to_chart_series(Some(&series), DEFAULT_CHART_LIMIT);

        assert_eq!(chart.len(), 4);
        assert!(chart.labels.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn chart_ignores_source_order() {
        let series = TimeSeries::new(vec![
            bar("2024-01-02", "99.00"),
            bar("2024-01-01", "98.00"),
            bar("2024-01-03", "100.00"),
        ]);
        let chart = to_chart_series(Some(&series), 2);

        assert_eq!(chart.labels, vec!["2024-01-02", "2024-01-03"]);
        assert!((chart.prices[0] - 99.0).abs() < 1e-6);
        assert!((chart.prices[1] - 100.0).abs() < 1e-6);
    }

    #[test]
    fn chart_skips_unplottable_bars() {
        let series = TimeSeries::new(vec![
            bar("2024-01-03", "bad"),
            bar("2024-01-02", "99.00"),
            bar("someday", "98.00"),
        ]);
        let chart = to_chart_series(Some(&series), DEFAULT_CHART_LIMIT);

        assert_eq!(chart.labels, vec!["2024-01-02"]);
    }

    #[test]
    fn empty_inputs_and_zero_limit_give_empty_chart() {
        assert!(to_chart_series(None, DEFAULT_CHART_LIMIT).is_empty());
        assert!(to_chart_series(Some(&TimeSeries::default()), DEFAULT_CHART_LIMIT).is_empty());
        assert!(to_chart_series(Some(&month_of_bars(3)), 0).is_empty());
    }

    #[test]
    fn bounds_cover_all_prices() {
        let chart = to_chart_series(Some(&month_of_bars(5)), DEFAULT_CHART_LIMIT);
        let (lo, hi) = chart.bounds().unwrap();

        assert!((lo - 101.5).abs() < 1e-6);
        assert!((hi - 105.5).abs() < 1e-6);
        assert!(ChartSeries::default().bounds().is_none());
    }
}
