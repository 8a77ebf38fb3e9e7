//! Scoped terminal state for the selector.
//!
//! Raw mode and the alternate screen are acquired together and restored on
//! drop, so the caller's terminal is recovered on every exit path: normal
//! completion, cancellation, errors, and panics.

use std::io;

use anyhow::{Context, Result};
use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};

/// Guard holding the terminal in raw mode on the alternate screen.
pub struct TerminalGuard {
    _private: (),
}

impl TerminalGuard {
    /// Enable raw mode and switch to the alternate screen.
    pub fn acquire() -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode - are you in a terminal?")?;

        if let Err(err) = execute!(io::stdout(), EnterAlternateScreen, Hide) {
            // Half-acquired: raw mode is on but the screen switch failed.
            let _ = disable_raw_mode();
            return Err(err).context("Failed to setup terminal");
        }

        Ok(Self { _private: () })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        // Restore errors are ignored; there is nowhere left to report them.
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, Show);
    }
}
