use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use tokio::sync::mpsc::{self, UnboundedSender};

use crate::app::state::{BrowserState, FetchCommand, FetchOutcome};
use crate::config::Config;
use crate::error::Result;
use crate::fetch::DailyFetcher;
use crate::ui::{draw_browser, handle_key, BrowserInput, TerminalGuard};

const INPUT_POLL: Duration = Duration::from_millis(100);

/// Drives the interactive browser: terminal events in, fetch tasks out.
pub struct AppController {
    fetcher: DailyFetcher,
    state: BrowserState,
}

impl AppController {
    pub fn new(config: &Config, fetcher: DailyFetcher) -> Result<Self> {
        Ok(Self {
            fetcher,
            state: BrowserState::new(config)?,
        })
    }

    pub async fn run(mut self) -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<FetchOutcome>();
        let mut guard = TerminalGuard::new()?;

        let initial = self.state.refresh()?;
        spawn_fetch(&self.fetcher, initial, &tx);

        loop {
            while let Ok(outcome) = rx.try_recv() {
                self.state.apply(outcome);
            }

            let state = &self.state;
            guard.terminal_mut().draw(|f| draw_browser(f, state))?;

            if !event::poll(INPUT_POLL)? {
                continue;
            }
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }

            match handle_key(&mut self.state, key)? {
                BrowserInput::Quit => break,
                BrowserInput::Fetch(command) => spawn_fetch(&self.fetcher, command, &tx),
                BrowserInput::Redraw => {}
            }
        }

        guard.restore()?;
        Ok(())
    }
}

/// Run one fetch on the runtime and post its outcome, tagged with the command's ticket.
fn spawn_fetch(fetcher: &DailyFetcher, command: FetchCommand, tx: &UnboundedSender<FetchOutcome>) {
    let fetcher = fetcher.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let series = fetcher.fetch(&command.symbol).await;
        let _ = tx.send(FetchOutcome {
            ticket: command.ticket,
            purpose: command.purpose,
            symbol: command.symbol,
            series,
        });
    });
}
