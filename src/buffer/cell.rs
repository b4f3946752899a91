//! Cell: The atomic unit of terminal display.
//!
//! A cell holds one display character plus the style it is painted with.
//! Dirty tracking lives in [`CellFlags`] so the flush pass can skip clean
//! cells without comparing styles again.

use crate::style::Color;
use bitflags::bitflags;

bitflags! {
    /// Text style modifiers.
    ///
    /// These can be combined using bitwise OR.
    ///
    /// # Example
    /// ```
    /// use cellflex::Modifiers;
    /// let style = Modifiers::BOLD | Modifiers::ITALIC;
    /// ```
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        /// Bold text
        const BOLD = 0b0000_0001;
        /// Dim/faint text
        const DIM = 0b0000_0010;
        /// Italic text
        const ITALIC = 0b0000_0100;
        /// Underlined text
        const UNDERLINE = 0b0000_1000;
    }
}

impl std::fmt::Debug for Modifiers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        bitflags::parser::to_writer(self, f)
    }
}

bitflags! {
    /// Cell-level flags for special states.
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CellFlags: u8 {
        /// Cell differs from what the terminal currently shows
        const DIRTY = 0b0000_0001;
        /// This cell is covered by the right half of a wide character
        const WIDE_CONTINUATION = 0b0000_0010;
    }
}

impl std::fmt::Debug for CellFlags {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        bitflags::parser::to_writer(self, f)
    }
}

/// The visual attributes of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CellStyle {
    /// Foreground color.
    pub fg: Color,
    /// Background color.
    pub bg: Color,
    /// Text modifiers.
    pub modifiers: Modifiers,
}

impl CellStyle {
    /// Terminal defaults: no colors, no modifiers.
    pub const DEFAULT: Self = Self {
        fg: Color::Default,
        bg: Color::Default,
        modifiers: Modifiers::empty(),
    };

    /// Create a cell style.
    #[inline]
    pub const fn new(fg: Color, bg: Color, modifiers: Modifiers) -> Self {
        Self { fg, bg, modifiers }
    }

    /// A style that only sets the background.
    #[inline]
    pub const fn background(bg: Color) -> Self {
        Self::new(Color::Default, bg, Modifiers::empty())
    }

    /// Set the foreground color (builder pattern).
    #[inline]
    #[must_use]
    pub const fn with_fg(mut self, fg: Color) -> Self {
        self.fg = fg;
        self
    }

    /// Set the background color (builder pattern).
    #[inline]
    #[must_use]
    pub const fn with_bg(mut self, bg: Color) -> Self {
        self.bg = bg;
        self
    }

    /// Set the modifiers (builder pattern).
    #[inline]
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// A single terminal cell.
///
/// Equality compares content only (character, style and continuation state);
/// the dirty bit is bookkeeping and never makes two cells differ.
#[derive(Clone, Copy)]
pub struct Cell {
    /// The character displayed in this cell.
    ch: char,
    /// Colors and modifiers.
    style: CellStyle,
    /// Cell flags (dirty, continuation).
    flags: CellFlags,
}

impl Default for Cell {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Cell {
    /// An empty cell (space with terminal defaults).
    pub const EMPTY: Self = Self {
        ch: ' ',
        style: CellStyle::DEFAULT,
        flags: CellFlags::empty(),
    };

    /// Create a new cell with the given character and default style.
    #[inline]
    pub const fn new(ch: char) -> Self {
        Self {
            ch,
            style: CellStyle::DEFAULT,
            flags: CellFlags::empty(),
        }
    }

    /// Create a wide-character continuation cell.
    ///
    /// This is placed after a wide CJK character that takes 2 columns.
    #[inline]
    pub const fn wide_continuation(style: CellStyle) -> Self {
        Self {
            ch: ' ',
            style,
            flags: CellFlags::WIDE_CONTINUATION,
        }
    }

    /// Set the style (builder pattern).
    #[inline]
    #[must_use]
    pub const fn with_style(mut self, style: CellStyle) -> Self {
        self.style = style;
        self
    }

    /// Get the character.
    #[inline]
    pub const fn ch(&self) -> char {
        self.ch
    }

    /// Get the style.
    #[inline]
    pub const fn style(&self) -> CellStyle {
        self.style
    }

    /// Get the flags.
    #[inline]
    pub const fn flags(&self) -> CellFlags {
        self.flags
    }

    /// Check if the cell must be re-emitted on the next flush.
    #[inline]
    pub const fn is_dirty(&self) -> bool {
        self.flags.contains(CellFlags::DIRTY)
    }

    /// Check if this is a wide-character continuation.
    #[inline]
    pub const fn is_wide_continuation(&self) -> bool {
        self.flags.contains(CellFlags::WIDE_CONTINUATION)
    }

    /// Set or clear the dirty flag.
    #[inline]
    pub fn set_dirty(&mut self, dirty: bool) {
        self.flags.set(CellFlags::DIRTY, dirty);
    }

    /// Check whether two cells display the same thing.
    #[inline]
    pub fn same_content(&self, other: &Self) -> bool {
        self.ch == other.ch
            && self.style == other.style
            && self.is_wide_continuation() == other.is_wide_continuation()
    }
}

impl PartialEq for Cell {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.same_content(other)
    }
}

impl Eq for Cell {}

impl std::fmt::Debug for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cell")
            .field("ch", &self.ch)
            .field("fg", &self.style.fg)
            .field("bg", &self.style.bg)
            .field("modifiers", &self.style.modifiers)
            .field("flags", &self.flags)
            .finish()
    }
}
