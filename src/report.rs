use std::io::Write;

use unicode_width::UnicodeWidthStr;

use crate::config::SymbolChoice;
use crate::error::Result;
use crate::series::{ChartSeries, QuoteRow, TickerSymbol};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Table,
    Csv,
    Json,
}

pub fn write_rows<W: Write>(out: &mut W, rows: &[QuoteRow], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => {
            let header = ["Date", "Symbol", "Open", "High", "Low", "Close", "Volume"];
            let body: Vec<Vec<&str>> = rows
                .iter()
                .map(|row| {
                    vec![
                        row.date.as_str(),
                        row.symbol.as_str(),
                        row.open.as_str(),
                        row.high.as_str(),
                        row.low.as_str(),
                        row.close.as_str(),
                        row.volume.as_str(),
                    ]
                })
                .collect();
            write_text_table(out, &header, &body)?;
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(&mut *out);
            for row in rows {
                writer.serialize(row)?;
            }
            writer.flush()?;
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, rows)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

pub fn write_chart<W: Write>(
    out: &mut W,
    symbol: &TickerSymbol,
    chart: &ChartSeries,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Table => {
            writeln!(out, "Price Changes for {symbol}")?;
            let prices: Vec<String> = chart.prices.iter().map(|p| format!("{p:.2}")).collect();
            let body: Vec<Vec<&str>> = chart
                .labels
                .iter()
                .zip(prices.iter())
                .map(|(label, price)| vec![label.as_str(), price.as_str()])
                .collect();
            write_text_table(out, &["Date", "Close"], &body)?;
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(&mut *out);
            writer.write_record(["date", "close"])?;
            for (label, price) in chart.points() {
                writer.write_record([label.to_string(), price.to_string()])?;
            }
            writer.flush()?;
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, chart)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

pub fn write_symbols<W: Write>(out: &mut W, choices: &[SymbolChoice]) -> Result<()> {
    let body: Vec<Vec<&str>> = choices
        .iter()
        .map(|choice| vec![choice.code.as_str(), choice.label.as_str()])
        .collect();
    write_text_table(out, &["Symbol", "Name"], &body)
}

/// Left-aligned columns padded to the widest cell, two spaces apart.
fn write_text_table<W: Write>(out: &mut W, header: &[&str], body: &[Vec<&str>]) -> Result<()> {
    let mut widths: Vec<usize> = header.iter().map(|h| UnicodeWidthStr::width(*h)).collect();
    for row in body {
        for (idx, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(idx) {
                *width = (*width).max(UnicodeWidthStr::width(*cell));
            }
        }
    }

    write_text_line(out, header, &widths)?;
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let rule_refs: Vec<&str> = rule.iter().map(String::as_str).collect();
    write_text_line(out, &rule_refs, &widths)?;
    for row in body {
        write_text_line(out, row, &widths)?;
    }
    Ok(())
}

fn write_text_line<W: Write>(out: &mut W, cells: &[&str], widths: &[usize]) -> Result<()> {
    let mut line = String::new();
    for (idx, cell) in cells.iter().enumerate() {
        if idx > 0 {
            line.push_str("  ");
        }
        line.push_str(cell);
        let width = widths.get(idx).copied().unwrap_or(0);
        let pad = width.saturating_sub(UnicodeWidthStr::width(*cell));
        if idx + 1 < cells.len() {
            line.push_str(&" ".repeat(pad));
        }
    }
    writeln!(out, "{line}")?;
    Ok(())
}
