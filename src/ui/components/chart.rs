use ratatui::{
    prelude::*,
    symbols::Marker,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
};

use crate::app::state::ChartView;
use crate::series::{ChartSeries, TickerSymbol};
use crate::ui::styles::ACCENT;

/// Labels printed under the x axis; the rest are implied by the line.
const MAX_X_LABELS: usize = 5;

pub fn render_detail_panel(f: &mut Frame<'_>, area: Rect, symbol: &TickerSymbol, view: &ChartView) {
    match view {
        ChartView::Ready(series) => render_price_chart(f, area, symbol, series),
        ChartView::Loading => render_message(f, area, symbol, "Loading..."),
        ChartView::NoData => render_message(f, area, symbol, "No price data available."),
    }
}

fn render_message(f: &mut Frame<'_>, area: Rect, symbol: &TickerSymbol, message: &str) {
    f.render_widget(
        Paragraph::new(message.to_string())
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!("Price Changes for {symbol}")),
            ),
        area,
    );
}

/// Line chart of closing prices, x = position in the window, y = price.
pub fn render_price_chart(f: &mut Frame<'_>, area: Rect, symbol: &TickerSymbol, series: &ChartSeries) {
    let points = chart_points(series);
    let (y_min, y_max) = padded_bounds(series);
    let x_max = (points.len().saturating_sub(1)).max(1) as f64;

    let dataset = Dataset::default()
        .name(format!("{symbol} close"))
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(ACCENT))
        .data(&points);

    let x_labels = x_axis_labels(series)
        .into_iter()
        .map(Span::from)
        .collect::<Vec<_>>();
    let y_labels = vec![
        Span::from(format!("${y_min:.2}")),
        Span::from(format!("${:.2}", (y_min + y_max) / 2.0)),
        Span::from(format!("${y_max:.2}")),
    ];

    let chart = Chart::new(vec![dataset])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Price Changes for {symbol}")),
        )
        .x_axis(
            Axis::default()
                .title("Date")
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, x_max])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .title("Close")
                .style(Style::default().fg(Color::Gray))
                .bounds([y_min, y_max])
                .labels(y_labels),
        );

    f.render_widget(chart, area);
}

pub fn chart_points(series: &ChartSeries) -> Vec<(f64, f64)> {
    series
        .prices
        .iter()
        .enumerate()
        .map(|(idx, price)| (idx as f64, *price))
        .collect()
}

/// Price range with a small margin so a flat line is not drawn on the border.
pub fn padded_bounds(series: &ChartSeries) -> (f64, f64) {
    let Some((lo, hi)) = series.bounds() else {
        return (0.0, 1.0);
    };
    let span = hi - lo;
    let pad = if span.abs() < 1e-9 {
        (lo.abs() * 0.05).max(0.5)
    } else {
        span * 0.05
    };
    (lo - pad, hi + pad)
}

/// Evenly spaced date labels, always including the first and last point.
pub fn x_axis_labels(series: &ChartSeries) -> Vec<String> {
    let len = series.labels.len();
    if len <= MAX_X_LABELS {
        return series.labels.clone();
    }

    let last = len - 1;
    let step = last as f64 / (MAX_X_LABELS - 1) as f64;
    let mut indices: Vec<usize> = (0..MAX_X_LABELS)
        .map(|i| ((i as f64 * step).round() as usize).min(last))
        .collect();
    indices.dedup();

    indices
        .into_iter()
        .map(|idx| series.labels[idx].clone())
        .collect()
}
