pub mod animation;
pub mod event;
pub mod screens;
pub mod widgets;

use std::io::{self, Stdout};
use std::ops::{Deref, DerefMut};

use ratatui::backend::CrosstermBackend;
use ratatui::crossterm::cursor::Show;
use ratatui::crossterm::execute;
use ratatui::crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::Terminal;

pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// A terminal in raw mode on the alternate screen. Restores the terminal
/// when dropped, including when a ride ends with an error.
pub struct TuiSession {
    terminal: Tui,
}

impl TuiSession {
    /// Enables raw mode, enters the alternate screen, and installs a panic
    /// hook that restores the terminal before the default handler runs.
    pub fn enter() -> io::Result<Self> {
        // Install the hook first so a panic never leaves the terminal broken.
        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let _ = restore();
            original_hook(info);
        }));

        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        terminal.hide_cursor()?;
        Ok(Self { terminal })
    }
}

impl Deref for TuiSession {
    type Target = Tui;

    fn deref(&self) -> &Tui {
        &self.terminal
    }
}

impl DerefMut for TuiSession {
    fn deref_mut(&mut self) -> &mut Tui {
        &mut self.terminal
    }
}

impl Drop for TuiSession {
    fn drop(&mut self) {
        if let Err(e) = restore() {
            tracing::warn!(error = %e, "Failed to restore terminal");
        }
    }
}

/// Restore the terminal to its normal state.
pub fn restore() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, Show)?;
    Ok(())
}
