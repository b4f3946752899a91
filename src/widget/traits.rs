//! Drawing surface trait.
//!
//! Components paint through [`Surface`] rather than a concrete buffer, so the
//! tree can be rendered into the terminal's [`CellBuffer`](crate::CellBuffer)
//! or into anything else that accepts cells (tests use a recording surface).

use crate::buffer::CellStyle;
use crate::layout::Rect;

/// Something components can paint cells onto.
///
/// Writes outside the surface are silently dropped.
pub trait Surface {
    /// Write one character at (x, y).
    ///
    /// Returns `true` if the cell changed.
    fn set_cell(&mut self, x: i32, y: i32, ch: char, style: CellStyle) -> bool;

    /// Write `text` starting at (x, y), clipped at the surface edges.
    ///
    /// Returns the number of columns the text advanced.
    fn draw_text(&mut self, x: i32, y: i32, text: &str, style: CellStyle) -> u16;

    /// Fill `rect` with `ch`.
    fn fill(&mut self, rect: Rect, ch: char, style: CellStyle) {
        for y in rect.y..rect.bottom() {
            for x in rect.x..rect.right() {
                self.set_cell(x, y, ch, style);
            }
        }
    }
}
