use crate::config::{Config, SymbolChoice};
use crate::error::{AppError, Result};
use crate::series::{to_chart_series, to_rows, ChartSeries, QuoteRow, TickerSymbol, TimeSeries};

/// Tag carried by an in-flight request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket(u64);

/// Hands out increasing tickets; only the most recent one is accepted back.
#[derive(Debug, Default)]
pub struct RequestTracker {
    latest: u64,
}

impl RequestTracker {
    pub fn issue(&mut self) -> RequestTicket {
        self.latest += 1;
        RequestTicket(self.latest)
    }

    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        ticket.0 == self.latest
    }

    /// Make every outstanding ticket stale without issuing a new one.
    pub fn invalidate(&mut self) {
        self.latest += 1;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchPurpose {
    Rows,
    Chart,
}

/// Work the controller must perform on behalf of the state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchCommand {
    pub ticket: RequestTicket,
    pub purpose: FetchPurpose,
    pub symbol: TickerSymbol,
}

/// Completed request delivered back to the state.
#[derive(Debug)]
pub struct FetchOutcome {
    pub ticket: RequestTicket,
    pub purpose: FetchPurpose,
    pub symbol: TickerSymbol,
    pub series: Option<TimeSeries>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartView {
    Loading,
    Ready(ChartSeries),
    NoData,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetailState {
    pub symbol: TickerSymbol,
    pub chart: ChartView,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    List,
    Details(DetailState),
}

/// Everything the interactive browser shows, independent of the terminal.
pub struct BrowserState {
    choices: Vec<SymbolChoice>,
    selected: usize,
    picker_open: bool,
    picker_cursor: usize,
    rows: Vec<QuoteRow>,
    row_cursor: usize,
    loading: bool,
    status: Option<String>,
    screen: Screen,
    chart_limit: usize,
    list_requests: RequestTracker,
    detail_requests: RequestTracker,
}

impl BrowserState {
    pub fn new(config: &Config) -> Result<Self> {
        if config.symbols.is_empty() {
            return Err(AppError::message("No symbols configured for the picker."));
        }
        Ok(Self {
            choices: config.symbols.clone(),
            selected: 0,
            picker_open: false,
            picker_cursor: 0,
            rows: Vec::new(),
            row_cursor: 0,
            loading: false,
            status: None,
            screen: Screen::List,
            chart_limit: config.chart_limit,
            list_requests: RequestTracker::default(),
            detail_requests: RequestTracker::default(),
        })
    }

    pub fn choices(&self) -> &[SymbolChoice] {
        &self.choices
    }

    pub fn selected_choice(&self) -> &SymbolChoice {
        &self.choices[self.selected]
    }

    pub fn picker_open(&self) -> bool {
        self.picker_open
    }

    pub fn picker_cursor(&self) -> usize {
        self.picker_cursor
    }

    pub fn rows(&self) -> &[QuoteRow] {
        &self.rows
    }

    pub fn row_cursor(&self) -> usize {
        self.row_cursor
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Request rows for the currently selected symbol.
    pub fn refresh(&mut self) -> Result<FetchCommand> {
        let symbol = TickerSymbol::new(&self.selected_choice().code)?;
        self.loading = true;
        self.status = None;
        Ok(FetchCommand {
            ticket: self.list_requests.issue(),
            purpose: FetchPurpose::Rows,
            symbol,
        })
    }

    pub fn toggle_picker(&mut self) {
        self.picker_open = !self.picker_open;
        if self.picker_open {
            self.picker_cursor = self.selected;
        }
    }

    pub fn picker_up(&mut self) {
        self.picker_cursor = if self.picker_cursor == 0 {
            self.choices.len() - 1
        } else {
            self.picker_cursor - 1
        };
    }

    pub fn picker_down(&mut self) {
        self.picker_cursor = (self.picker_cursor + 1) % self.choices.len();
    }

    /// Close the picker; a changed selection starts a new rows request.
    pub fn confirm_picker(&mut self) -> Result<Option<FetchCommand>> {
        self.picker_open = false;
        if self.picker_cursor == self.selected {
            return Ok(None);
        }
        self.selected = self.picker_cursor;
        self.rows.clear();
        self.row_cursor = 0;
        self.refresh().map(Some)
    }

    pub fn row_up(&mut self) {
        self.row_cursor = self.row_cursor.saturating_sub(1);
    }

    pub fn row_down(&mut self) {
        if self.row_cursor + 1 < self.rows.len() {
            self.row_cursor += 1;
        }
    }

    /// Open the chart for the highlighted row's symbol.
    pub fn open_details(&mut self) -> Option<FetchCommand> {
        let symbol = self.rows.get(self.row_cursor)?.symbol.clone();
        self.screen = Screen::Details(DetailState {
            symbol: symbol.clone(),
            chart: ChartView::Loading,
        });
        Some(FetchCommand {
            ticket: self.detail_requests.issue(),
            purpose: FetchPurpose::Chart,
            symbol,
        })
    }

    pub fn close_details(&mut self) {
        self.detail_requests.invalidate();
        self.screen = Screen::List;
    }

    /// Apply a finished request. Returns `false` when the outcome was stale and dropped.
    pub fn apply(&mut self, outcome: FetchOutcome) -> bool {
        match outcome.purpose {
            FetchPurpose::Rows => {
                if !self.list_requests.is_current(outcome.ticket) {
                    log::debug!("Dropping stale rows response for {}", outcome.symbol);
                    return false;
                }
                self.loading = false;
                self.rows = to_rows(&outcome.symbol, outcome.series.as_ref());
                self.row_cursor = 0;
                self.status = if outcome.series.is_none() {
                    Some(format!("No data for {}", outcome.symbol))
                } else if self.rows.is_empty() {
                    Some(format!("No daily bars for {}", outcome.symbol))
                } else {
                    None
                };
                true
            }
            FetchPurpose::Chart => {
                if !self.detail_requests.is_current(outcome.ticket) {
                    log::debug!("Dropping stale chart response for {}", outcome.symbol);
                    return false;
                }
                let chart = to_chart_series(outcome.series.as_ref(), self.chart_limit);
                let Screen::Details(detail) = &mut self.screen else {
                    return false;
                };
                detail.chart = if chart.is_empty() {
                    ChartView::NoData
                } else {
                    ChartView::Ready(chart)
                };
                true
            }
        }
    }
}
