//! Box borders: line-drawing glyph sets and perimeter painting.

use super::traits::Surface;
use crate::buffer::CellStyle;
use crate::layout::Rect;
use std::convert::Infallible;
use std::str::FromStr;

/// Line style of a box border.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BorderStyle {
    /// `┌─┐ │ └─┘`
    #[default]
    Single,
    /// `╔═╗ ║ ╚═╝`
    Double,
}

impl FromStr for BorderStyle {
    type Err = Infallible;

    /// Anything other than `"double"` is a single-line border.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(if s == "double" { Self::Double } else { Self::Single })
    }
}

/// The six glyphs of a border.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorderGlyphs {
    /// Top-left corner.
    pub top_left: char,
    /// Top-right corner.
    pub top_right: char,
    /// Bottom-left corner.
    pub bottom_left: char,
    /// Bottom-right corner.
    pub bottom_right: char,
    /// Top and bottom edges.
    pub horizontal: char,
    /// Left and right edges.
    pub vertical: char,
}

impl BorderStyle {
    /// Glyph set for this style.
    pub const fn glyphs(self) -> BorderGlyphs {
        match self {
            Self::Single => BorderGlyphs {
                top_left: '┌',
                top_right: '┐',
                bottom_left: '└',
                bottom_right: '┘',
                horizontal: '─',
                vertical: '│',
            },
            Self::Double => BorderGlyphs {
                top_left: '╔',
                top_right: '╗',
                bottom_left: '╚',
                bottom_right: '╝',
                horizontal: '═',
                vertical: '║',
            },
        }
    }

    /// Paint the perimeter of `rect` and nothing else.
    pub fn paint(self, surface: &mut impl Surface, rect: Rect, style: CellStyle) {
        if rect.is_empty() {
            return;
        }
        let g = self.glyphs();
        let (left, top) = (rect.x, rect.y);
        let (right, bottom) = (rect.right() - 1, rect.bottom() - 1);

        for x in left + 1..right {
            surface.set_cell(x, top, g.horizontal, style);
            surface.set_cell(x, bottom, g.horizontal, style);
        }
        for y in top + 1..bottom {
            surface.set_cell(left, y, g.vertical, style);
            surface.set_cell(right, y, g.vertical, style);
        }
        surface.set_cell(left, top, g.top_left, style);
        surface.set_cell(right, top, g.top_right, style);
        surface.set_cell(left, bottom, g.bottom_left, style);
        surface.set_cell(right, bottom, g.bottom_right, style);
    }
}
