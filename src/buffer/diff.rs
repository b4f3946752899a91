//! Flush: Generate minimal ANSI sequences for dirty cells.
//!
//! This module implements the anti-flicker logic:
//! 1. Walk the buffer in row-major order, skipping clean cells
//! 2. Optimize cursor movements (skip if adjacent)
//! 3. Track style state to avoid redundant SGR sequences
//! 4. Record what was written so the next frame diffs against it
//!
//! All output is accumulated in a single buffer and written with one syscall.

use super::{CellBuffer, CellStyle, Modifiers};
use crate::terminal::OutputBuffer;
use unicode_width::UnicodeWidthChar;

/// Statistics about a flush.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlushStats {
    /// Number of cells written to the terminal.
    pub cells_written: usize,
    /// Number of cursor move sequences emitted.
    pub cursor_moves: usize,
    /// Number of SGR sequences emitted (resets included).
    pub style_changes: usize,
    /// Bytes appended to the output buffer.
    pub bytes: usize,
}

/// Terminal state as seen by the flush pass.
///
/// The style starts at terminal defaults because every flush ends with a
/// reset; the cursor position starts unknown.
#[derive(Debug, Clone, Copy)]
struct FlushState {
    cursor: Option<(u16, u16)>,
    style: CellStyle,
}

impl FlushState {
    const fn new() -> Self {
        Self {
            cursor: None,
            style: CellStyle::DEFAULT,
        }
    }

    /// Move the cursor to (x, y) unless it is already there.
    fn move_to(&mut self, out: &mut OutputBuffer, x: u16, y: u16, stats: &mut FlushStats) {
        if self.cursor != Some((x, y)) {
            out.cursor_move(x, y);
            stats.cursor_moves += 1;
        }
    }

    /// Emit the smallest SGR transition from the current style to `next`.
    ///
    /// Turning a modifier off has no portable per-attribute code across
    /// terminals, so it costs a full reset followed by re-emitting `next`.
    fn transition(&mut self, out: &mut OutputBuffer, next: CellStyle, stats: &mut FlushStats) {
        if self.style == next {
            return;
        }
        let removed = self.style.modifiers.difference(next.modifiers);
        if !removed.is_empty() {
            out.reset_attrs();
            stats.style_changes += 1;
            self.style = CellStyle::DEFAULT;
        }

        let current = self.style;
        let before = out.len();
        out.sgr(|params| {
            let sep = |params: &mut Vec<u8>| {
                if !params.ends_with(b"[") {
                    params.push(b';');
                }
            };
            if current.fg != next.fg {
                sep(params);
                next.fg.write_fg_params(params);
            }
            if current.bg != next.bg {
                sep(params);
                next.bg.write_bg_params(params);
            }
            for (flag, code) in [
                (Modifiers::BOLD, b'1'),
                (Modifiers::DIM, b'2'),
                (Modifiers::ITALIC, b'3'),
                (Modifiers::UNDERLINE, b'4'),
            ] {
                if next.modifiers.contains(flag) && !current.modifiers.contains(flag) {
                    sep(params);
                    params.push(code);
                }
            }
        });
        if out.len() != before {
            stats.style_changes += 1;
        }
        self.style = next;
    }
}

impl CellBuffer {
    /// Write every dirty cell to `out` and mark the buffer clean.
    ///
    /// Only cells that differ from what the terminal shows are emitted. Each
    /// is preceded by a cursor move (omitted when the cursor is already there)
    /// and the minimal style transition from the previously written cell.
    /// Output ends with an attribute reset when anything was written.
    pub fn flush(&mut self, out: &mut OutputBuffer) -> FlushStats {
        let start = out.len();
        let mut stats = FlushStats::default();
        let mut state = FlushState::new();
        let (cells, emitted, width) = self.split_for_flush();
        if width == 0 {
            return stats;
        }

        for (idx, cell) in cells.iter_mut().enumerate() {
            if !cell.is_dirty() {
                continue;
            }
            cell.set_dirty(false);
            emitted[idx] = *cell;
            // The wide glyph to the left already covers this column.
            if cell.is_wide_continuation() {
                continue;
            }

            #[allow(clippy::cast_possible_truncation)]
            let (x, y) = ((idx % width as usize) as u16, (idx / width as usize) as u16);
            state.move_to(out, x, y, &mut stats);
            state.transition(out, cell.style(), &mut stats);
            out.write_char(cell.ch());
            stats.cells_written += 1;

            #[allow(clippy::cast_possible_truncation)]
            let advance = cell.ch().width().unwrap_or(1).max(1) as u16;
            state.cursor = Some((x.saturating_add(advance), y));
        }

        if stats.cells_written > 0 {
            out.reset_attrs();
            stats.style_changes += 1;
        }
        stats.bytes = out.len() - start;
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Color;
    use crate::widget::Surface;

    fn flushed(width: u16, height: u16) -> CellBuffer {
        let mut buffer = CellBuffer::new(width, height);
        let mut out = OutputBuffer::new();
        buffer.flush(&mut out);
        buffer
    }

    fn flush_string(buffer: &mut CellBuffer) -> (String, FlushStats) {
        let mut out = OutputBuffer::new();
        let stats = buffer.flush(&mut out);
        (String::from_utf8_lossy(out.as_bytes()).into_owned(), stats)
    }

    #[test]
    fn test_initial_flush_paints_everything() {
        let mut buffer = CellBuffer::new(4, 2);
        let (_, stats) = flush_string(&mut buffer);
        assert_eq!(stats.cells_written, 8);
        assert_eq!(stats.cursor_moves, 2);
        assert_eq!(buffer.dirty_count(), 0);
    }

    #[test]
    fn test_clean_buffer_writes_nothing() {
        let mut buffer = flushed(10, 5);
        let (output, stats) = flush_string(&mut buffer);
        assert!(output.is_empty());
        assert_eq!(stats, FlushStats::default());
    }

    #[test]
    fn test_single_cell_change() {
        let mut buffer = flushed(10, 5);
        buffer.set_cell(5, 2, 'X', CellStyle::DEFAULT);

        let (output, stats) = flush_string(&mut buffer);
        assert_eq!(stats.cells_written, 1);
        assert_eq!(output, "\x1b[3;6HX\x1b[0m");
    }

    #[test]
    fn test_adjacent_cells_share_cursor_move() {
        let mut buffer = flushed(10, 5);
        buffer.draw_text(0, 0, "ABC", CellStyle::DEFAULT);
        buffer.set_cell(7, 0, 'D', CellStyle::DEFAULT);

        let (output, stats) = flush_string(&mut buffer);
        assert_eq!(stats.cells_written, 4);
        assert_eq!(stats.cursor_moves, 2);
        assert_eq!(output, "\x1b[HABC\x1b[1;8HD\x1b[0m");
    }

    #[test]
    fn test_style_emitted_once_for_run() {
        let mut buffer = flushed(10, 1);
        let style = CellStyle::new(Color::GREEN, Color::Default, Modifiers::BOLD);
        buffer.draw_text(0, 0, "ok", style);

        let (output, stats) = flush_string(&mut buffer);
        assert_eq!(output, "\x1b[H\x1b[32;1mok\x1b[0m");
        // One transition plus the trailing reset.
        assert_eq!(stats.style_changes, 2);
    }

    #[test]
    fn test_removed_modifier_resets() {
        let mut buffer = flushed(10, 1);
        let bold = CellStyle::new(Color::WHITE, Color::Default, Modifiers::BOLD);
        let plain = CellStyle::new(Color::WHITE, Color::Default, Modifiers::empty());
        buffer.set_cell(0, 0, 'a', bold);
        buffer.set_cell(1, 0, 'b', plain);

        let (output, _) = flush_string(&mut buffer);
        assert_eq!(output, "\x1b[H\x1b[37;1ma\x1b[0m\x1b[37mb\x1b[0m");
    }

    #[test]
    fn test_only_changed_color_reemitted() {
        let mut buffer = flushed(10, 1);
        let a = CellStyle::new(Color::WHITE, Color::BLACK, Modifiers::empty());
        let b = CellStyle::new(Color::GREEN, Color::BLACK, Modifiers::empty());
        buffer.set_cell(0, 0, 'a', a);
        buffer.set_cell(1, 0, 'b', b);

        let (output, _) = flush_string(&mut buffer);
        assert_eq!(output, "\x1b[H\x1b[37;40ma\x1b[32mb\x1b[0m");
    }

    #[test]
    fn test_wide_char_advances_two_columns() {
        let mut buffer = flushed(10, 1);
        buffer.draw_text(0, 0, "日x", CellStyle::DEFAULT);

        let (output, stats) = flush_string(&mut buffer);
        assert_eq!(stats.cells_written, 2);
        assert_eq!(stats.cursor_moves, 1);
        assert_eq!(output, "\x1b[H日x\x1b[0m");
    }

    #[test]
    fn test_diff_minimality_after_text_change() {
        let mut buffer = flushed(20, 2);
        buffer.begin_frame();
        buffer.draw_text(0, 0, "hello world", CellStyle::DEFAULT);
        flush_string(&mut buffer);

        buffer.begin_frame();
        buffer.draw_text(0, 0, "hello there", CellStyle::DEFAULT);
        assert_eq!(buffer.dirty_count(), 5);

        let (_, stats) = flush_string(&mut buffer);
        assert_eq!(stats.cells_written, 5);
        assert_eq!(stats.cursor_moves, 1);
    }
}
