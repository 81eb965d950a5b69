use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Row, Table},
};

use ratatui::prelude::Stylize;

use crate::series::QuoteRow;

const QUOTE_HEADERS: [&str; 7] = ["Date", "Symbol", "Open", "High", "Low", "Close", "Volume"];

pub fn build_table<'a>(
    rows: Vec<Row<'a>>,
    header: Row<'a>,
    widths: Vec<Constraint>,
    title: impl Into<String>,
) -> Table<'a> {
    Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title.into()))
        .column_spacing(2)
}

pub fn highlight_row<'a>(row: Row<'a>) -> Row<'a> {
    row.reversed()
}

/// Daily rows as a table, one line per trading date, with `selected` highlighted.
pub fn quote_table<'a>(rows: &'a [QuoteRow], selected: usize, title: impl Into<String>) -> Table<'a> {
    let header = Row::new(QUOTE_HEADERS.to_vec()).bold();
    let body = rows
        .iter()
        .enumerate()
        .map(|(idx, quote)| {
            let row = Row::new(vec![
                quote.date.as_str(),
                quote.symbol.as_str(),
                quote.open.as_str(),
                quote.high.as_str(),
                quote.low.as_str(),
                quote.close.as_str(),
                quote.volume.as_str(),
            ]);
            if idx == selected {
                highlight_row(row)
            } else {
                row
            }
        })
        .collect();

    build_table(
        body,
        header,
        vec![
            Constraint::Length(10),
            Constraint::Length(6),
            Constraint::Length(10),
            Constraint::Length(10),
            Constraint::Length(10),
            Constraint::Length(10),
            Constraint::Min(10),
        ],
        title,
    )
}
