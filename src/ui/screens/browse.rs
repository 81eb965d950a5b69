use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{prelude::*, widgets::*};

use crate::app::state::{BrowserState, FetchCommand, Screen};
use crate::error::Result;
use crate::ui::components::{
    quote_table, render_detail_panel,
    utils::{centered_box, split_vertical},
};
use crate::ui::styles::{accent_span, secondary_line, selection_style};

/// What the controller should do after a key press.
#[derive(Debug, PartialEq, Eq)]
pub enum BrowserInput {
    Quit,
    Fetch(FetchCommand),
    Redraw,
}

pub fn handle_key(state: &mut BrowserState, key: KeyEvent) -> Result<BrowserInput> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Ok(BrowserInput::Quit);
    }

    if matches!(state.screen(), Screen::Details(_)) {
        if matches!(
            key.code,
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Left | KeyCode::Char('q')
        ) {
            state.close_details();
        }
        return Ok(BrowserInput::Redraw);
    }

    if state.picker_open() {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => state.picker_up(),
            KeyCode::Down | KeyCode::Char('j') => state.picker_down(),
            KeyCode::Enter => {
                if let Some(command) = state.confirm_picker()? {
                    return Ok(BrowserInput::Fetch(command));
                }
            }
            KeyCode::Esc | KeyCode::Char('s') => state.toggle_picker(),
            _ => {}
        }
        return Ok(BrowserInput::Redraw);
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return Ok(BrowserInput::Quit),
        KeyCode::Char('s') | KeyCode::Tab => state.toggle_picker(),
        KeyCode::Char('r') => return Ok(BrowserInput::Fetch(state.refresh()?)),
        KeyCode::Up | KeyCode::Char('k') => state.row_up(),
        KeyCode::Down | KeyCode::Char('j') => state.row_down(),
        KeyCode::Enter => {
            if let Some(command) = state.open_details() {
                return Ok(BrowserInput::Fetch(command));
            }
        }
        _ => {}
    }
    Ok(BrowserInput::Redraw)
}

pub fn draw_browser(f: &mut Frame<'_>, state: &BrowserState) {
    let size = f.size();
    let areas = split_vertical(
        size,
        &[
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
        ],
    );

    draw_symbol_bar(f, areas[0], state);

    match state.screen() {
        Screen::List => {
            draw_rows(f, areas[1], state);
            f.render_widget(
                Paragraph::new(secondary_line(
                    "s pick symbol • r refresh • ↑/↓ move • Enter chart • q quit",
                )),
                areas[2],
            );
            if state.picker_open() {
                draw_picker(f, size, state);
            }
        }
        Screen::Details(detail) => {
            render_detail_panel(f, areas[1], &detail.symbol, &detail.chart);
            f.render_widget(
                Paragraph::new(secondary_line("Esc back to list • Ctrl+C quit")),
                areas[2],
            );
        }
    }
}

fn draw_symbol_bar(f: &mut Frame<'_>, area: Rect, state: &BrowserState) {
    let choice = state.selected_choice();
    let mut spans = vec![
        Span::raw("Symbol: "),
        accent_span(format!("{} ({})", choice.label, choice.code)),
        Span::raw(" ▾"),
    ];
    if state.is_loading() {
        spans.push(Span::raw("   "));
        spans.push(Span::from("loading…").italic());
    }
    f.render_widget(
        Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL)),
        area,
    );
}

fn draw_rows(f: &mut Frame<'_>, area: Rect, state: &BrowserState) {
    let title = format!("Daily prices — {}", state.selected_choice().code);

    if state.is_loading() && state.rows().is_empty() {
        f.render_widget(
            Paragraph::new("Fetching daily prices…")
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).title(title)),
            area,
        );
        return;
    }

    if state.rows().is_empty() {
        let message = state.status().unwrap_or("Nothing to show.").to_string();
        f.render_widget(
            Paragraph::new(message)
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).title(title)),
            area,
        );
        return;
    }

    let visible = usize::from(area.height.saturating_sub(3)).max(1);
    let offset = state.row_cursor().saturating_sub(visible - 1);
    let window = &state.rows()[offset..];
    let table = quote_table(window, state.row_cursor() - offset, title);
    f.render_widget(table, area);
}

fn draw_picker(f: &mut Frame<'_>, size: Rect, state: &BrowserState) {
    let height = state.choices().len() as u16 + 2;
    let area = centered_box(36, height, size);

    let items: Vec<ListItem> = state
        .choices()
        .iter()
        .enumerate()
        .map(|(idx, choice)| {
            let item = ListItem::new(format!("{:<6} {}", choice.code, choice.label));
            if idx == state.picker_cursor() {
                item.style(selection_style().add_modifier(Modifier::REVERSED))
            } else {
                item
            }
        })
        .collect();

    f.render_widget(Clear, area);
    f.render_widget(
        List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Pick a symbol (Enter)"),
        ),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::{FetchOutcome, FetchPurpose};
    use crate::config::Config;
    use crate::series::{DailyBar, TimeSeries};
    use ratatui::backend::TestBackend;

    fn state() -> BrowserState {
        let config = Config {
            api_key: "k".into(),
            ..Config::builtin()
        };
        BrowserState::new(&config).unwrap()
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn loaded_state() -> BrowserState {
        let mut state = state();
        let cmd = state.refresh().unwrap();
        let series: TimeSeries = ["2024-01-03", "2024-01-02"]
            .iter()
            .map(|date| DailyBar {
                date: date.to_string(),
                open: "1.00".into(),
                high: "1.00".into(),
                low: "1.00".into(),
                close: "1.00".into(),
                volume: "5".into(),
            })
            .collect();
        state.apply(FetchOutcome {
            ticket: cmd.ticket,
            purpose: cmd.purpose,
            symbol: cmd.symbol,
            series: Some(series),
        });
        state
    }

    #[test]
    fn refresh_key_requests_rows() {
        let mut state = state();
        match handle_key(&mut state, press(KeyCode::Char('r'))).unwrap() {
            BrowserInput::Fetch(cmd) => assert_eq!(cmd.purpose, FetchPurpose::Rows),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn picker_flow_fetches_new_symbol() {
        let mut state = state();
        handle_key(&mut state, press(KeyCode::Char('s'))).unwrap();
        assert!(state.picker_open());
        handle_key(&mut state, press(KeyCode::Down)).unwrap();
        handle_key(&mut state, press(KeyCode::Down)).unwrap();

        match handle_key(&mut state, press(KeyCode::Enter)).unwrap() {
            BrowserInput::Fetch(cmd) => assert_eq!(cmd.symbol.as_str(), "AMZN"),
            other => panic!("unexpected {other:?}"),
        }
        assert!(!state.picker_open());
    }

    #[test]
    fn enter_opens_chart_and_escape_returns() {
        let mut state = loaded_state();
        match handle_key(&mut state, press(KeyCode::Enter)).unwrap() {
            BrowserInput::Fetch(cmd) => assert_eq!(cmd.purpose, FetchPurpose::Chart),
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(state.screen(), Screen::Details(_)));

        assert_eq!(
            handle_key(&mut state, press(KeyCode::Esc)).unwrap(),
            BrowserInput::Redraw
        );
        assert_eq!(state.screen(), &Screen::List);
    }

    #[test]
    fn q_quits_from_list_but_not_from_details() {
        let mut state = loaded_state();
        handle_key(&mut state, press(KeyCode::Enter)).unwrap();
        assert_eq!(
            handle_key(&mut state, press(KeyCode::Char('q'))).unwrap(),
            BrowserInput::Redraw
        );
        assert_eq!(
            handle_key(&mut state, press(KeyCode::Char('q'))).unwrap(),
            BrowserInput::Quit
        );
    }

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn switching_symbol_shows_fetching_instead_of_old_rows() {
        let mut state = loaded_state();
        handle_key(&mut state, press(KeyCode::Char('s'))).unwrap();
        handle_key(&mut state, press(KeyCode::Down)).unwrap();
        handle_key(&mut state, press(KeyCode::Enter)).unwrap();

        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        terminal.draw(|f| draw_browser(f, &state)).unwrap();
        let text = screen_text(&terminal);
        assert!(text.contains("Fetching daily prices"));
        assert!(!text.contains("2024-01-03"));

        assert_eq!(
            handle_key(&mut state, press(KeyCode::Enter)).unwrap(),
            BrowserInput::Redraw
        );
        assert_eq!(state.screen(), &Screen::List);
    }

    #[test]
    fn renders_ready_detail_panel() {
        let mut state = loaded_state();
        let cmd = match handle_key(&mut state, press(KeyCode::Enter)).unwrap() {
            BrowserInput::Fetch(cmd) => cmd,
            other => panic!("unexpected {other:?}"),
        };
        let series: TimeSeries = [("2024-01-02", "98.00"), ("2024-01-03", "99.50")]
            .iter()
            .map(|(date, close)| DailyBar {
                date: date.to_string(),
                open: "1.00".into(),
                high: "1.00".into(),
                low: "1.00".into(),
                close: close.to_string(),
                volume: "5".into(),
            })
            .collect();

        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|f| draw_browser(f, &state)).unwrap();
        assert!(screen_text(&terminal).contains("Loading..."));

        assert!(state.apply(FetchOutcome {
            ticket: cmd.ticket,
            purpose: cmd.purpose,
            symbol: cmd.symbol,
            series: Some(series),
        }));
        terminal.draw(|f| draw_browser(f, &state)).unwrap();
        let text = screen_text(&terminal);
        assert!(text.contains("Price Changes for AAPL"));
        assert!(!text.contains("Loading..."));
    }

    #[test]
    fn renders_rows_and_picker_without_panicking() {
        let mut state = loaded_state();
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();

        terminal.draw(|f| draw_browser(f, &state)).unwrap();
        let text = screen_text(&terminal);
        assert!(text.contains("2024-01-03"));
        assert!(text.contains("AAPL"));

        state.toggle_picker();
        terminal.draw(|f| draw_browser(f, &state)).unwrap();
    }
}
