//! Terminal state signals and screen setup.
//!
//! [`TerminalSize`] holds the root signals of the render pipeline: when the
//! terminal is resized, the frame derived re-runs. [`TerminalGuard`] puts the
//! terminal into fullscreen raw mode and restores it on drop.

use std::io::{self, stdout};

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{
    Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
    enable_raw_mode,
};
use spark_signals::{Signal, signal};

use crate::state::input::{disable_mouse, enable_mouse};

/// Fallback when the size cannot be queried.
pub const FALLBACK_SIZE: (u16, u16) = (80, 24);

// =============================================================================
// Terminal Size Signals
// =============================================================================

/// Terminal dimensions in cells.
#[derive(Clone)]
pub struct TerminalSize {
    cols: Signal<u16>,
    rows: Signal<u16>,
}

impl TerminalSize {
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            cols: signal(cols),
            rows: signal(rows),
        }
    }

    /// Query the actual terminal size.
    pub fn detect() -> Self {
        let (cols, rows) = crossterm::terminal::size().unwrap_or(FALLBACK_SIZE);
        Self::new(cols, rows)
    }

    pub fn get(&self) -> (u16, u16) {
        (self.cols.get(), self.rows.get())
    }

    /// Set the terminal size (called on resize events).
    pub fn set(&self, cols: u16, rows: u16) {
        self.cols.set(cols);
        self.rows.set(rows);
    }

    pub fn cols_signal(&self) -> Signal<u16> {
        self.cols.clone()
    }

    pub fn rows_signal(&self) -> Signal<u16> {
        self.rows.clone()
    }
}

// =============================================================================
// Fullscreen Guard
// =============================================================================

/// Raw mode + alternate screen + mouse capture, undone on drop.
pub struct TerminalGuard {
    active: bool,
}

impl TerminalGuard {
    pub fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        execute!(stdout(), EnterAlternateScreen, Hide, Clear(ClearType::All))?;
        enable_mouse()?;
        tracing::debug!("entered fullscreen");
        Ok(Self { active: true })
    }

    /// Restore the terminal. Safe to call more than once.
    pub fn restore(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;

        disable_mouse()?;
        execute!(stdout(), Show, LeaveAlternateScreen)?;
        disable_raw_mode()?;
        tracing::debug!("left fullscreen");
        Ok(())
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        // Best effort
        let _ = self.restore();
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_size() {
        let size = TerminalSize::new(80, 24);
        size.set(120, 40);
        assert_eq!(size.get(), (120, 40));
    }

    #[test]
    fn test_signals_shared() {
        let size = TerminalSize::new(80, 24);
        let cols = size.cols_signal();

        size.clone().set(100, 30);
        assert_eq!(cols.get(), 100);
    }
}
