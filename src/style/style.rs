//! Style: Component styling merged over defaults.
//!
//! Components carry a sparse [`StyleOverrides`]; painting resolves it over
//! [`Style::default`] with last-write-wins semantics per key.

use super::color::Color;
use crate::buffer::{CellStyle, Modifiers};
use std::str::FromStr;

/// Horizontal alignment of component content within its bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextAlign {
    /// Flush left.
    #[default]
    Left,
    /// Centered (extra column goes to the right).
    Center,
    /// Flush right.
    Right,
}

impl TextAlign {
    /// Column offset of content `content_width` wide inside `width` columns.
    pub const fn offset(self, width: u16, content_width: u16) -> u16 {
        let free = width.saturating_sub(content_width);
        match self {
            Self::Left => 0,
            Self::Center => free / 2,
            Self::Right => free,
        }
    }
}

impl FromStr for TextAlign {
    type Err = std::convert::Infallible;

    /// Unknown values fall back to `Left`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "center" => Self::Center,
            "right" => Self::Right,
            _ => Self::Left,
        })
    }
}

/// A fully resolved style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    /// Text color.
    pub color: Color,
    /// Background color (`Color::Default` means transparent: no fill).
    pub background: Color,
    /// Bold weight.
    pub bold: bool,
    /// Italic.
    pub italic: bool,
    /// Underline.
    pub underline: bool,
    /// Dim/faint.
    pub dim: bool,
    /// Content alignment.
    pub text_align: TextAlign,
    /// Input placeholder color.
    pub placeholder_color: Color,
    /// Input cursor glyph color.
    pub cursor_color: Option<Color>,
    /// Input cursor background.
    pub cursor_background: Option<Color>,
    /// Progress bar filled-portion color.
    pub fill_color: Color,
    /// Progress bar label color.
    pub label_color: Color,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            background: Color::Default,
            bold: false,
            italic: false,
            underline: false,
            dim: false,
            text_align: TextAlign::Left,
            placeholder_color: Color::GRAY,
            cursor_color: None,
            cursor_background: None,
            fill_color: Color::GREEN,
            label_color: Color::WHITE,
        }
    }
}

impl Style {
    /// Resolve `overrides` on top of this style.
    #[must_use]
    pub fn apply(mut self, overrides: &StyleOverrides) -> Self {
        if let Some(color) = overrides.color {
            self.color = color;
        }
        if let Some(background) = overrides.background {
            self.background = background;
        }
        if let Some(bold) = overrides.bold {
            self.bold = bold;
        }
        if let Some(italic) = overrides.italic {
            self.italic = italic;
        }
        if let Some(underline) = overrides.underline {
            self.underline = underline;
        }
        if let Some(dim) = overrides.dim {
            self.dim = dim;
        }
        if let Some(align) = overrides.text_align {
            self.text_align = align;
        }
        if let Some(color) = overrides.placeholder_color {
            self.placeholder_color = color;
        }
        if overrides.cursor_color.is_some() {
            self.cursor_color = overrides.cursor_color;
        }
        if overrides.cursor_background.is_some() {
            self.cursor_background = overrides.cursor_background;
        }
        if let Some(color) = overrides.fill_color {
            self.fill_color = color;
        }
        if let Some(color) = overrides.label_color {
            self.label_color = color;
        }
        self
    }

    /// Whether painting should fill the component's bounds.
    pub const fn has_background(&self) -> bool {
        !self.background.is_default()
    }

    /// Text modifiers implied by this style.
    pub fn modifiers(&self) -> Modifiers {
        let mut mods = Modifiers::empty();
        mods.set(Modifiers::BOLD, self.bold);
        mods.set(Modifiers::ITALIC, self.italic);
        mods.set(Modifiers::UNDERLINE, self.underline);
        mods.set(Modifiers::DIM, self.dim);
        mods
    }

    /// The per-cell style used for text painted with this style.
    pub fn cell_style(&self) -> CellStyle {
        CellStyle::new(self.color, self.background, self.modifiers())
    }
}

/// Sparse style overrides; `None` keeps the underlying value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StyleOverrides {
    /// Text color.
    pub color: Option<Color>,
    /// Background color.
    pub background: Option<Color>,
    /// Bold weight.
    pub bold: Option<bool>,
    /// Italic.
    pub italic: Option<bool>,
    /// Underline.
    pub underline: Option<bool>,
    /// Dim/faint.
    pub dim: Option<bool>,
    /// Content alignment.
    pub text_align: Option<TextAlign>,
    /// Input placeholder color.
    pub placeholder_color: Option<Color>,
    /// Input cursor glyph color.
    pub cursor_color: Option<Color>,
    /// Input cursor background.
    pub cursor_background: Option<Color>,
    /// Progress bar filled-portion color.
    pub fill_color: Option<Color>,
    /// Progress bar label color.
    pub label_color: Option<Color>,
}

impl StyleOverrides {
    /// Empty overrides.
    pub const fn new() -> Self {
        Self {
            color: None,
            background: None,
            bold: None,
            italic: None,
            underline: None,
            dim: None,
            text_align: None,
            placeholder_color: None,
            cursor_color: None,
            cursor_background: None,
            fill_color: None,
            label_color: None,
        }
    }

    /// Set the text color (builder pattern).
    #[must_use]
    pub const fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Set the background color (builder pattern).
    #[must_use]
    pub const fn background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    /// Set the text color from a name or hex string (builder pattern).
    ///
    /// An unparseable string is logged and leaves the color unset.
    #[must_use]
    pub fn color_str(mut self, color: &str) -> Self {
        if let Some(color) = Color::parse_or_warn(color) {
            self.color = Some(color);
        }
        self
    }

    /// Set the background color from a name or hex string (builder pattern).
    #[must_use]
    pub fn background_str(mut self, color: &str) -> Self {
        if let Some(color) = Color::parse_or_warn(color) {
            self.background = Some(color);
        }
        self
    }

    /// Set bold (builder pattern).
    #[must_use]
    pub const fn bold(mut self, bold: bool) -> Self {
        self.bold = Some(bold);
        self
    }

    /// Set italic (builder pattern).
    #[must_use]
    pub const fn italic(mut self, italic: bool) -> Self {
        self.italic = Some(italic);
        self
    }

    /// Set underline (builder pattern).
    #[must_use]
    pub const fn underline(mut self, underline: bool) -> Self {
        self.underline = Some(underline);
        self
    }

    /// Set dim (builder pattern).
    #[must_use]
    pub const fn dim(mut self, dim: bool) -> Self {
        self.dim = Some(dim);
        self
    }

    /// Set alignment (builder pattern).
    #[must_use]
    pub const fn text_align(mut self, align: TextAlign) -> Self {
        self.text_align = Some(align);
        self
    }

    /// Set the placeholder color (builder pattern).
    #[must_use]
    pub const fn placeholder_color(mut self, color: Color) -> Self {
        self.placeholder_color = Some(color);
        self
    }

    /// Set the cursor colors (builder pattern).
    #[must_use]
    pub const fn cursor(mut self, color: Color, background: Color) -> Self {
        self.cursor_color = Some(color);
        self.cursor_background = Some(background);
        self
    }

    /// Set the progress fill color (builder pattern).
    #[must_use]
    pub const fn fill_color(mut self, color: Color) -> Self {
        self.fill_color = Some(color);
        self
    }

    /// Set the progress label color (builder pattern).
    #[must_use]
    pub const fn label_color(mut self, color: Color) -> Self {
        self.label_color = Some(color);
        self
    }

    /// Merge `other` over `self`, last write wins per key.
    pub fn merge(&mut self, other: &Self) {
        macro_rules! take {
            ($($field:ident),*) => {
                $(if other.$field.is_some() {
                    self.$field = other.$field;
                })*
            };
        }
        take!(
            color,
            background,
            bold,
            italic,
            underline,
            dim,
            text_align,
            placeholder_color,
            cursor_color,
            cursor_background,
            fill_color,
            label_color
        );
    }

    /// `self` merged with `other`, leaving `self` untouched.
    #[must_use]
    pub fn merged(mut self, other: &Self) -> Self {
        self.merge(other);
        self
    }
}
