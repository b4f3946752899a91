//! Terminal Session: Raw mode, cursor and mouse reporting for the renderer.
//!
//! Entering a session puts the terminal into the state the renderer needs;
//! restoring it undoes every step. Restoration runs on drop, so a session
//! that goes out of scope (including during unwinding) never leaves the
//! user's shell in raw mode with a hidden cursor.

use super::OutputBuffer;
use crate::error::{Error, Result};
use crossterm::terminal;
use std::io::{self, Write};
use tracing::{debug, info, warn};

/// Which terminal modes a session turns on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionModes {
    /// Enable SGR mouse reporting.
    pub mouse: bool,
    /// Switch to the alternate screen.
    pub alternate_screen: bool,
}

impl Default for SessionModes {
    fn default() -> Self {
        Self {
            mouse: true,
            alternate_screen: false,
        }
    }
}

impl SessionModes {
    /// Escape sequences written when the session starts.
    pub fn enter_sequence(self) -> OutputBuffer {
        let mut out = OutputBuffer::with_capacity(64);
        if self.alternate_screen {
            out.enter_alternate_screen();
        }
        out.cursor_hide();
        out.clear_screen();
        if self.mouse {
            out.enable_mouse();
        }
        out
    }

    /// Escape sequences written when the session is restored.
    pub fn restore_sequence(self) -> OutputBuffer {
        let mut out = OutputBuffer::with_capacity(64);
        if self.mouse {
            out.disable_mouse();
        }
        out.reset_attrs();
        out.cursor_show();
        out.clear_screen();
        if self.alternate_screen {
            out.leave_alternate_screen();
        }
        out
    }
}

/// An active terminal session.
#[derive(Debug)]
pub struct TerminalSession {
    modes: SessionModes,
    /// Whether raw mode was turned on by us.
    raw: bool,
    active: bool,
}

impl TerminalSession {
    /// Enter raw mode and write the setup sequences to stdout.
    ///
    /// If writing the sequences fails, dropping the half-built session
    /// turns raw mode back off.
    pub fn enter(modes: SessionModes) -> Result<Self> {
        terminal::enable_raw_mode()
            .map_err(|e| Error::Terminal(format!("cannot enable raw mode: {e}")))?;
        let session = Self {
            modes,
            raw: true,
            active: true,
        };
        let mut stdout = io::stdout();
        modes.enter_sequence().flush_to(&mut stdout)?;
        info!(mouse = modes.mouse, alternate_screen = modes.alternate_screen, "terminal session entered");
        Ok(session)
    }

    /// Query the terminal size as (columns, rows).
    pub fn size() -> Result<(u16, u16)> {
        Ok(terminal::size()?)
    }

    /// The modes this session enabled.
    pub const fn modes(&self) -> SessionModes {
        self.modes
    }

    /// Check if the session still owns the terminal.
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Undo every setup step. Calling this again is a no-op.
    pub fn restore(&mut self) -> Result<()> {
        self.restore_to(&mut io::stdout())
    }

    /// Restore, writing the sequences to `out`.
    ///
    /// Raw mode is turned off even when the write fails; the write error is
    /// returned afterwards.
    fn restore_to<W: Write>(&mut self, out: &mut W) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;

        let written = self.modes.restore_sequence().flush_to(out);
        if let Err(e) = &written {
            debug!(error = %e, "writing restore sequence failed");
        }
        if self.raw {
            self.raw = false;
            terminal::disable_raw_mode()?;
        }
        info!("terminal session restored");
        written.map_err(Error::from)
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            warn!(error = %e, "failed to restore terminal");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Accepts bytes but fails every flush.
    #[derive(Default)]
    struct BrokenFlush(Vec<u8>);

    impl Write for BrokenFlush {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }
    }

    #[test]
    fn test_restore_reports_flush_failure_once() {
        let mut session = TerminalSession {
            modes: SessionModes::default(),
            raw: false,
            active: true,
        };
        let mut out = BrokenFlush::default();

        assert!(matches!(session.restore_to(&mut out), Err(Error::Io(_))));
        assert!(!session.is_active());
        assert!(String::from_utf8_lossy(&out.0).contains("\x1b[?25h"));

        out.0.clear();
        assert!(session.restore_to(&mut out).is_ok());
        assert!(out.0.is_empty());
    }

    #[test]
    fn test_enter_sequence() {
        let out = SessionModes::default().enter_sequence();
        assert_eq!(
            out.as_bytes(),
            b"\x1b[?25l\x1b[2J\x1b[H\x1b[?1000h\x1b[?1002h\x1b[?1015h\x1b[?1006h"
        );
    }

    #[test]
    fn test_restore_undoes_every_mode() {
        let modes = SessionModes {
            mouse: true,
            alternate_screen: true,
        };
        let enter = modes.enter_sequence();
        let restore = modes.restore_sequence();
        let restore = String::from_utf8_lossy(restore.as_bytes());

        assert!(String::from_utf8_lossy(enter.as_bytes()).starts_with("\x1b[?1049h"));
        for mode in ["?1000l", "?1002l", "?1015l", "?1006l", "?25h"] {
            assert!(restore.contains(mode), "missing {mode}");
        }
        assert!(restore.ends_with("\x1b[?1049l"));
    }

    #[test]
    fn test_no_mouse_sequences_when_disabled() {
        let modes = SessionModes {
            mouse: false,
            alternate_screen: false,
        };
        assert!(!String::from_utf8_lossy(modes.restore_sequence().as_bytes()).contains("?1000"));
    }
}
