use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

mod chart;
mod theme;

pub use chart::{LossCurve, draw};

/// Restores the terminal when dropped, even if drawing fails halfway.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

/// Whether a key closes the plot.
fn is_quit(code: KeyCode) -> bool {
    matches!(code, KeyCode::Char('q') | KeyCode::Esc)
}

/// Shows the loss curve on the alternate screen until `q` or `Esc` is pressed.
///
/// # Errors
/// Returns an error if terminal setup or rendering fails.
pub fn show_loss_curve(curve: &LossCurve) -> Result<()> {
    let _guard = TerminalGuard::enter()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    loop {
        terminal.draw(|f| draw(f, curve))?;

        if event::poll(Duration::from_millis(120))? {
            if let Event::Key(k) = event::read()? {
                if k.kind == KeyEventKind::Press && is_quit(k.code) {
                    break;
                }
            }
        }
    }

    terminal.show_cursor()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quits_on_q_and_esc_only() {
        assert!(is_quit(KeyCode::Char('q')));
        assert!(is_quit(KeyCode::Esc));
        assert!(!is_quit(KeyCode::Char('x')));
        assert!(!is_quit(KeyCode::Enter));
    }
}
