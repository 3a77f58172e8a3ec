//! Raw-mode terminal session. The terminal is restored when the session is
//! dropped, including on early returns and panics that unwind.

use std::io::{self, BufWriter, Stdout, Write};

use anyhow::{Context, Result};
use crossterm::{
    cursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    style::ResetColor,
    terminal::{self, Clear, ClearType, DisableLineWrap, EnableLineWrap, EnterAlternateScreen, LeaveAlternateScreen},
};
use tracing::warn;

/// Size reported when the terminal cannot be queried.
pub const FALLBACK_SIZE: (u16, u16) = (80, 24);

/// Framebuffer dimensions for a terminal of `cols` x `rows`. The bottom row
/// is left free so printing the last line never scrolls the screen.
#[must_use]
pub fn frame_dimensions(cols: u16, rows: u16) -> (usize, usize) {
    (usize::from(cols).max(1), usize::from(rows.saturating_sub(1)).max(1))
}

pub struct TerminalSession {
    out: BufWriter<Stdout>,
}

impl TerminalSession {
    /// Switch to raw mode and the alternate screen with mouse reporting.
    ///
    /// # Errors
    ///
    /// Fails if the terminal rejects any of the mode changes. Whatever was
    /// already enabled is rolled back.
    pub fn enter() -> Result<Self> {
        terminal::enable_raw_mode().context("failed to enable raw mode")?;
        let mut session = Self {
            out: BufWriter::new(io::stdout()),
        };
        execute!(
            session.out,
            EnterAlternateScreen,
            EnableMouseCapture,
            DisableLineWrap,
            cursor::Hide,
            Clear(ClearType::All)
        )
        .context("failed to prepare terminal screen")?;
        Ok(session)
    }

    /// Current framebuffer dimensions, see [`frame_dimensions`].
    #[must_use]
    pub fn frame_size(&self) -> (usize, usize) {
        let (cols, rows) = terminal::size().unwrap_or_else(|err| {
            warn!(%err, "Terminal size query failed, assuming 80x24");
            FALLBACK_SIZE
        });
        frame_dimensions(cols, rows)
    }

    pub fn out(&mut self) -> &mut impl Write {
        &mut self.out
    }

    /// Blank the screen, used after a resize leaves stale cells behind.
    ///
    /// # Errors
    ///
    /// Propagates terminal write failures.
    pub fn clear(&mut self) -> Result<()> {
        execute!(self.out, Clear(ClearType::All)).context("failed to clear terminal")
    }

    /// # Errors
    ///
    /// Propagates terminal write failures.
    pub fn flush(&mut self) -> Result<()> {
        self.out.flush().context("failed to flush frame to terminal")
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let restored = execute!(
            self.out,
            ResetColor,
            cursor::Show,
            EnableLineWrap,
            DisableMouseCapture,
            LeaveAlternateScreen
        );
        let raw_mode = terminal::disable_raw_mode();
        if let Err(err) = restored.and(raw_mode) {
            warn!(%err, "Failed to restore terminal");
        }
    }
}
