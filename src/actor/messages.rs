//! Message types for input routing.
//!
//! These enums define the protocol between the input sources (the crossterm
//! thread or a host feeding raw bytes) and the event loop.

use crate::error::Error;
use std::str::FromStr;

/// Key codes for keyboard input.
///
/// This is a simplified subset of crossterm's `KeyCode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A printable character.
    Char(char),
    /// Function key (F1-F12).
    F(u8),
    /// Backspace key.
    Backspace,
    /// Enter/Return key.
    Enter,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// Home key.
    Home,
    /// End key.
    End,
    /// Page Up.
    PageUp,
    /// Page Down.
    PageDown,
    /// Tab key.
    Tab,
    /// Backtab (Shift+Tab).
    BackTab,
    /// Delete key.
    Delete,
    /// Insert key.
    Insert,
    /// Escape key.
    Esc,
}

impl FromStr for KeyCode {
    type Err = Error;

    /// Parse a DOM-style key name (`"ArrowLeft"`, `"Home"`, `"a"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Ok(Self::Char(c));
        }
        Ok(match s {
            "ArrowLeft" => Self::Left,
            "ArrowRight" => Self::Right,
            "ArrowUp" => Self::Up,
            "ArrowDown" => Self::Down,
            "Home" => Self::Home,
            "End" => Self::End,
            "PageUp" => Self::PageUp,
            "PageDown" => Self::PageDown,
            "Backspace" => Self::Backspace,
            "Delete" => Self::Delete,
            "Insert" => Self::Insert,
            "Enter" => Self::Enter,
            "Tab" => Self::Tab,
            "Escape" => Self::Esc,
            _ => {
                let n = s
                    .strip_prefix('F')
                    .and_then(|n| n.parse::<u8>().ok())
                    .filter(|n| (1..=12).contains(n))
                    .ok_or_else(|| Error::UnknownKey(s.to_string()))?;
                Self::F(n)
            }
        })
    }
}

/// Key modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct KeyModifiers {
    /// Shift key held.
    pub shift: bool,
    /// Control key held.
    pub control: bool,
    /// Alt/Option key held.
    pub alt: bool,
    /// Super/Command/Windows key held.
    pub super_key: bool,
}

impl KeyModifiers {
    /// No modifiers.
    pub const NONE: Self = Self {
        shift: false,
        control: false,
        alt: false,
        super_key: false,
    };

    /// Control only.
    pub const CONTROL: Self = Self {
        shift: false,
        control: true,
        alt: false,
        super_key: false,
    };

    /// Check if any modifier is active.
    pub const fn any(&self) -> bool {
        self.shift || self.control || self.alt || self.super_key
    }
}

/// A key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    /// The key code.
    pub code: KeyCode,
    /// Modifiers held during keypress.
    pub modifiers: KeyModifiers,
}

impl KeyEvent {
    /// A key press without modifiers.
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::NONE,
        }
    }

    /// Set the modifiers (builder pattern).
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: KeyModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Check for Ctrl+`c` (case-insensitive).
    pub fn is_ctrl(&self, c: char) -> bool {
        self.modifiers.control
            && matches!(self.code, KeyCode::Char(k) if k.eq_ignore_ascii_case(&c))
    }
}

/// Mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MouseButton {
    /// Left mouse button.
    #[default]
    Left,
    /// Middle mouse button.
    Middle,
    /// Right mouse button.
    Right,
    /// No button (motion without a held button).
    None,
}

/// What happened to the mouse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseKind {
    /// Button pressed.
    Down,
    /// Button released.
    Up,
    /// Pointer moved (with or without a held button).
    Move,
    /// Wheel scrolled up.
    ScrollUp,
    /// Wheel scrolled down.
    ScrollDown,
}

/// Mouse event details. Coordinates are 0-based cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MouseEvent {
    /// X coordinate (column).
    pub x: u16,
    /// Y coordinate (row).
    pub y: u16,
    /// What happened.
    pub kind: MouseKind,
    /// Mouse button involved.
    pub button: MouseButton,
    /// Shift held.
    pub shift: bool,
    /// Meta/Alt held.
    pub meta: bool,
    /// Control held.
    pub ctrl: bool,
}

impl MouseEvent {
    /// A left-button event without modifiers.
    pub const fn new(kind: MouseKind, x: u16, y: u16) -> Self {
        Self {
            x,
            y,
            kind,
            button: MouseButton::Left,
            shift: false,
            meta: false,
            ctrl: false,
        }
    }
}

/// Events delivered to the event loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// A key was pressed.
    Key(KeyEvent),

    /// A mouse button, motion or wheel event.
    Mouse(MouseEvent),

    /// Terminal was resized.
    Resize {
        /// New width in columns.
        width: u16,
        /// New height in rows.
        height: u16,
    },

    /// Paste event (bracketed paste).
    Paste(String),

    /// Input source encountered an error.
    Error(String),

    /// Input source is shutting down.
    Shutdown,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dom_key_names() {
        assert_eq!("ArrowLeft".parse::<KeyCode>().unwrap(), KeyCode::Left);
        assert_eq!("Home".parse::<KeyCode>().unwrap(), KeyCode::Home);
        assert_eq!("x".parse::<KeyCode>().unwrap(), KeyCode::Char('x'));
        assert_eq!("é".parse::<KeyCode>().unwrap(), KeyCode::Char('é'));
        assert_eq!("F5".parse::<KeyCode>().unwrap(), KeyCode::F(5));
        assert!("F13".parse::<KeyCode>().is_err());
        assert!("Hyper".parse::<KeyCode>().is_err());
    }

    #[test]
    fn test_is_ctrl() {
        let event = KeyEvent::new(KeyCode::Char('C')).with_modifiers(KeyModifiers::CONTROL);
        assert!(event.is_ctrl('c'));
        assert!(!KeyEvent::new(KeyCode::Char('c')).is_ctrl('c'));
    }
}
