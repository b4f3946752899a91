//! Color: Named and hex colors resolved to terminal SGR codes.
//!
//! Named colors map to the fixed 16-color escape codes. Hex colors are
//! approximated on the 256-color palette:
//!
//! ```text
//! R == G == B   →  grayscale ramp   232..=255
//! otherwise     →  6×6×6 color cube 16 + 36r + 6g + b   (r, g, b ∈ 0..=5)
//! ```

use crate::error::Error;
use std::fmt;
use std::io::Write;
use std::str::FromStr;
use tracing::warn;

/// The sixteen named terminal colors (plus `Gray`, which is bright black).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedColor {
    /// Black.
    Black,
    /// Red.
    Red,
    /// Green.
    Green,
    /// Yellow.
    Yellow,
    /// Blue.
    Blue,
    /// Magenta.
    Magenta,
    /// Cyan.
    Cyan,
    /// White.
    White,
    /// Gray (bright black).
    Gray,
    /// Bright red.
    BrightRed,
    /// Bright green.
    BrightGreen,
    /// Bright yellow.
    BrightYellow,
    /// Bright blue.
    BrightBlue,
    /// Bright magenta.
    BrightMagenta,
    /// Bright cyan.
    BrightCyan,
    /// Bright white.
    BrightWhite,
}

impl NamedColor {
    /// Foreground SGR code for this color.
    pub const fn fg_code(self) -> u8 {
        match self {
            Self::Black => 30,
            Self::Red => 31,
            Self::Green => 32,
            Self::Yellow => 33,
            Self::Blue => 34,
            Self::Magenta => 35,
            Self::Cyan => 36,
            Self::White => 37,
            Self::Gray => 90,
            Self::BrightRed => 91,
            Self::BrightGreen => 92,
            Self::BrightYellow => 93,
            Self::BrightBlue => 94,
            Self::BrightMagenta => 95,
            Self::BrightCyan => 96,
            Self::BrightWhite => 97,
        }
    }

    /// Background SGR code for this color.
    pub const fn bg_code(self) -> u8 {
        self.fg_code() + 10
    }

    fn from_name(name: &str) -> Option<Self> {
        let lower = name.to_ascii_lowercase();
        Some(match lower.as_str() {
            "black" => Self::Black,
            "red" => Self::Red,
            "green" => Self::Green,
            "yellow" => Self::Yellow,
            "blue" => Self::Blue,
            "magenta" => Self::Magenta,
            "cyan" => Self::Cyan,
            "white" => Self::White,
            "gray" | "grey" => Self::Gray,
            "brightred" | "bright-red" => Self::BrightRed,
            "brightgreen" | "bright-green" => Self::BrightGreen,
            "brightyellow" | "bright-yellow" => Self::BrightYellow,
            "brightblue" | "bright-blue" => Self::BrightBlue,
            "brightmagenta" | "bright-magenta" => Self::BrightMagenta,
            "brightcyan" | "bright-cyan" => Self::BrightCyan,
            "brightwhite" | "bright-white" => Self::BrightWhite,
            _ => return None,
        })
    }
}

/// A terminal color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Color {
    /// Terminal default (also used for "transparent").
    #[default]
    Default,
    /// One of the named 16 colors.
    Named(NamedColor),
    /// A 24-bit color, emitted as its 256-color approximation.
    Hex {
        /// Red channel.
        r: u8,
        /// Green channel.
        g: u8,
        /// Blue channel.
        b: u8,
    },
    /// A raw 256-color palette index.
    Indexed(u8),
}

impl Color {
    /// Black.
    pub const BLACK: Self = Self::Named(NamedColor::Black);
    /// White.
    pub const WHITE: Self = Self::Named(NamedColor::White);
    /// Gray.
    pub const GRAY: Self = Self::Named(NamedColor::Gray);
    /// Green.
    pub const GREEN: Self = Self::Named(NamedColor::Green);

    /// Create a hex color from its channels.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::Hex { r, g, b }
    }

    /// Whether this color leaves the terminal default in place.
    #[inline]
    pub const fn is_default(&self) -> bool {
        matches!(self, Self::Default)
    }

    /// Parse a color name or hex string.
    ///
    /// Accepts named colors (case-insensitive, `brightGreen` style), `#rgb`,
    /// `#rrggbb`, and `transparent`/`default`.
    pub fn parse(s: &str) -> Result<Self, Error> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("transparent") || trimmed.eq_ignore_ascii_case("default") {
            return Ok(Self::Default);
        }
        if let Some(hex) = trimmed.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(|| Error::UnknownColor(s.to_string()));
        }
        NamedColor::from_name(trimmed)
            .map(Self::Named)
            .ok_or_else(|| Error::UnknownColor(s.to_string()))
    }

    /// Parse a color string from user styling, logging strings that name no
    /// color.
    pub fn parse_or_warn(s: &str) -> Option<Self> {
        match Self::parse(s) {
            Ok(color) => Some(color),
            Err(e) => {
                warn!(error = %e, "ignoring color");
                None
            }
        }
    }

    /// The 256-color palette index used for a hex color.
    pub fn ansi256(r: u8, g: u8, b: u8) -> u8 {
        if r == g && g == b {
            232 + scale(r, 23)
        } else {
            16 + 36 * scale(r, 5) + 6 * scale(g, 5) + scale(b, 5)
        }
    }

    /// Append the foreground SGR parameters for this color (without `ESC[`/`m`).
    pub fn write_fg_params(&self, out: &mut Vec<u8>) {
        let _ = match *self {
            Self::Default => write!(out, "39"),
            Self::Named(named) => write!(out, "{}", named.fg_code()),
            Self::Hex { r, g, b } => write!(out, "38;5;{}", Self::ansi256(r, g, b)),
            Self::Indexed(idx) => write!(out, "38;5;{idx}"),
        };
    }

    /// Append the background SGR parameters for this color (without `ESC[`/`m`).
    pub fn write_bg_params(&self, out: &mut Vec<u8>) {
        let _ = match *self {
            Self::Default => write!(out, "49"),
            Self::Named(named) => write!(out, "{}", named.bg_code()),
            Self::Hex { r, g, b } => write!(out, "48;5;{}", Self::ansi256(r, g, b)),
            Self::Indexed(idx) => write!(out, "48;5;{idx}"),
        };
    }
}

/// Round `v / 255 * max` to the nearest integer.
#[inline]
#[allow(clippy::cast_possible_truncation)]
const fn scale(v: u8, max: u16) -> u8 {
    ((v as u16 * max + 127) / 255) as u8
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        3 => {
            let mut channels = [0u8; 3];
            for (slot, digit) in channels.iter_mut().zip(hex.chars()) {
                let v = u8::try_from(digit.to_digit(16)?).ok()?;
                *slot = v * 17;
            }
            Some(Color::rgb(channels[0], channels[1], channels[2]))
        }
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some(Color::rgb(r, g, b))
        }
        _ => None,
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<NamedColor> for Color {
    fn from(named: NamedColor) -> Self {
        Self::Named(named)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => write!(f, "default"),
            Self::Named(named) => write!(f, "{named:?}"),
            Self::Hex { r, g, b } => write!(f, "#{r:02x}{g:02x}{b:02x}"),
            Self::Indexed(idx) => write!(f, "indexed({idx})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fg(color: Color) -> String {
        let mut out = Vec::new();
        color.write_fg_params(&mut out);
        String::from_utf8(out).unwrap()
    }

    fn bg(color: Color) -> String {
        let mut out = Vec::new();
        color.write_bg_params(&mut out);
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_named_codes() {
        assert_eq!(fg(Color::parse("red").unwrap()), "31");
        assert_eq!(bg(Color::parse("red").unwrap()), "41");
        assert_eq!(fg(Color::parse("gray").unwrap()), "90");
        assert_eq!(bg(Color::parse("gray").unwrap()), "100");
        assert_eq!(fg(Color::parse("brightCyan").unwrap()), "96");
    }

    #[test]
    fn test_grayscale_ramp() {
        assert_eq!(Color::ansi256(0, 0, 0), 232);
        assert_eq!(Color::ansi256(255, 255, 255), 255);
        assert_eq!(Color::ansi256(0x33, 0x33, 0x33), 232 + 5);
    }

    #[test]
    fn test_color_cube() {
        assert_eq!(Color::ansi256(255, 0, 0), 16 + 36 * 5);
        assert_eq!(Color::ansi256(0, 255, 0), 16 + 6 * 5);
        assert_eq!(Color::ansi256(0, 0, 255), 16 + 5);
        assert_eq!(fg(Color::parse("#ff0000").unwrap()), "38;5;196");
        assert_eq!(bg(Color::parse("#ff0000").unwrap()), "48;5;196");
    }

    #[test]
    fn test_short_hex() {
        assert_eq!(Color::parse("#333").unwrap(), Color::rgb(0x33, 0x33, 0x33));
        assert_eq!(Color::parse("#f0a").unwrap(), Color::rgb(0xff, 0x00, 0xaa));
    }

    #[test]
    fn test_transparent_and_unknown() {
        assert_eq!(Color::parse("transparent").unwrap(), Color::Default);
        assert!(matches!(Color::parse("mauve"), Err(Error::UnknownColor(_))));
        assert!(Color::parse("#12345").is_err());
        assert!(Color::parse("#zzzzzz").is_err());
    }

    #[test]
    fn test_default_params() {
        assert_eq!(fg(Color::Default), "39");
        assert_eq!(bg(Color::Default), "49");
        assert_eq!(fg(Color::Indexed(42)), "38;5;42");
    }
}
