//! `OutputBuffer`: Single-syscall output buffer for ANSI sequences.

use std::io::Write;

/// Pre-allocated buffer for building ANSI escape sequences.
///
/// All output is accumulated here, then flushed in a single `write()` syscall
/// to prevent terminal flickering.
#[derive(Debug, Clone)]
pub struct OutputBuffer {
    data: Vec<u8>,
}

impl OutputBuffer {
    /// Create a new output buffer with the given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    /// Create a buffer sized for a typical terminal (4KB).
    pub fn new() -> Self {
        Self::with_capacity(4096)
    }

    /// Clear the buffer for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Get the buffer contents.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Get the buffer length.
    #[inline]
    pub const fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if buffer is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Write raw bytes.
    #[inline]
    pub fn write_raw(&mut self, bytes: &[u8]) {
        self.data.extend_from_slice(bytes);
    }

    /// Write a string.
    #[inline]
    pub fn write_str(&mut self, s: &str) {
        self.data.extend_from_slice(s.as_bytes());
    }

    /// Write a single character as UTF-8.
    #[inline]
    pub fn write_char(&mut self, ch: char) {
        let mut utf8 = [0u8; 4];
        self.data
            .extend_from_slice(ch.encode_utf8(&mut utf8).as_bytes());
    }

    /// Move cursor to (x, y), 0-indexed.
    ///
    /// Uses the most compact representation:
    /// - `\x1b[H` for home
    /// - `\x1b[{row}H` for column 1
    /// - `\x1b[{row};{col}H` otherwise
    #[inline]
    pub fn cursor_move(&mut self, x: u16, y: u16) {
        let row = u32::from(y) + 1;
        let col = u32::from(x) + 1;
        if row == 1 && col == 1 {
            self.data.extend_from_slice(b"\x1b[H");
        } else if col == 1 {
            let _ = write!(self.data, "\x1b[{row}H");
        } else {
            let _ = write!(self.data, "\x1b[{row};{col}H");
        }
    }

    /// Hide cursor.
    #[inline]
    pub fn cursor_hide(&mut self) {
        self.data.extend_from_slice(b"\x1b[?25l");
    }

    /// Show cursor.
    #[inline]
    pub fn cursor_show(&mut self) {
        self.data.extend_from_slice(b"\x1b[?25h");
    }

    /// Emit one SGR sequence built from `;`-separated parameters.
    ///
    /// `params` appends the parameter bytes; nothing is written if it adds none.
    pub fn sgr(&mut self, params: impl FnOnce(&mut Vec<u8>)) {
        let start = self.data.len();
        self.data.extend_from_slice(b"\x1b[");
        let body = self.data.len();
        params(&mut self.data);
        if self.data.len() == body {
            self.data.truncate(start);
        } else {
            self.data.push(b'm');
        }
    }

    /// Reset all attributes.
    #[inline]
    pub fn reset_attrs(&mut self) {
        self.data.extend_from_slice(b"\x1b[0m");
    }

    /// Clear the entire screen and move the cursor home.
    #[inline]
    pub fn clear_screen(&mut self) {
        self.data.extend_from_slice(b"\x1b[2J\x1b[H");
    }

    /// Enable mouse reporting: clicks, drags and SGR extended coordinates.
    #[inline]
    pub fn enable_mouse(&mut self) {
        self.data
            .extend_from_slice(b"\x1b[?1000h\x1b[?1002h\x1b[?1015h\x1b[?1006h");
    }

    /// Disable every mouse reporting mode enabled by [`Self::enable_mouse`].
    #[inline]
    pub fn disable_mouse(&mut self) {
        self.data
            .extend_from_slice(b"\x1b[?1000l\x1b[?1002l\x1b[?1015l\x1b[?1006l");
    }

    /// Switch to the alternate screen.
    #[inline]
    pub fn enter_alternate_screen(&mut self) {
        self.data.extend_from_slice(b"\x1b[?1049h");
    }

    /// Return to the main screen.
    #[inline]
    pub fn leave_alternate_screen(&mut self) {
        self.data.extend_from_slice(b"\x1b[?1049l");
    }

    /// Flush to a writer in a single syscall.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    pub fn flush_to<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_all(&self.data)?;
        writer.flush()
    }
}

impl Default for OutputBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_move_compact_forms() {
        let mut out = OutputBuffer::new();
        out.cursor_move(0, 0);
        assert_eq!(out.as_bytes(), b"\x1b[H");

        out.clear();
        out.cursor_move(0, 5);
        assert_eq!(out.as_bytes(), b"\x1b[6H");

        out.clear();
        out.cursor_move(10, 5);
        assert_eq!(out.as_bytes(), b"\x1b[6;11H");
    }

    #[test]
    fn test_empty_sgr_writes_nothing() {
        let mut out = OutputBuffer::new();
        out.sgr(|_| {});
        assert!(out.is_empty());

        out.sgr(|p| p.extend_from_slice(b"1;32"));
        assert_eq!(out.as_bytes(), b"\x1b[1;32m");
    }

    #[test]
    fn test_flush_to_single_write() {
        let mut out = OutputBuffer::new();
        out.write_str("hi");
        out.write_char('日');
        let mut sink = Vec::new();
        out.flush_to(&mut sink).unwrap();
        assert_eq!(sink, "hi日".as_bytes());
    }
}
