use crossterm::{execute, terminal, ExecutableCommand};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::error::Result;

pub type TuiTerminal = Terminal<CrosstermBackend<std::io::Stdout>>;

/// Keeps raw mode and the alternate screen active for as long as the browser runs.
pub struct TerminalGuard {
    terminal: TuiTerminal,
    restored: bool,
}

impl TerminalGuard {
    pub fn new() -> Result<Self> {
        terminal::enable_raw_mode()?;
        let mut stdout = std::io::stdout();
        execute!(stdout, terminal::EnterAlternateScreen)?;
        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        terminal.hide_cursor()?;
        terminal.clear()?;
        Ok(Self {
            terminal,
            restored: false,
        })
    }

    pub fn terminal_mut(&mut self) -> &mut TuiTerminal {
        &mut self.terminal
    }

    /// Idempotent; also runs on drop so a panic or early return leaves a usable shell.
    pub fn restore(&mut self) -> Result<()> {
        let tui = &mut self.terminal;
        run_once(&mut self.restored, || {
            tui.show_cursor()?;
            tui.backend_mut()
                .execute(terminal::LeaveAlternateScreen)?;
            terminal::disable_raw_mode()?;
            Ok(())
        })
    }
}

/// Runs `steps` until it succeeds once; a failed attempt leaves `done` unset so it is retried.
fn run_once<F>(done: &mut bool, steps: F) -> Result<()>
where
    F: FnOnce() -> Result<()>,
{
    if !*done {
        steps()?;
        *done = true;
    }
    Ok(())
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}
