//! Text Input: Single-line editable value with a cursor.
//!
//! The cursor is a grapheme index into the value, so multi-codepoint
//! characters are edited as one unit. It always stays within `0..=len`.

use crate::actor::{KeyCode, KeyEvent};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Editing state of an Input component.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputState {
    /// Current value.
    value: String,
    /// Cursor position in graphemes.
    cursor: usize,
    /// Whether keystrokes are accepted.
    focused: bool,
    /// Hint shown while empty and unfocused.
    placeholder: String,
}

impl InputState {
    /// Create an input holding `value` with the cursor at its end.
    pub fn new(value: impl Into<String>, placeholder: impl Into<String>, focused: bool) -> Self {
        let value = value.into();
        let cursor = value.graphemes(true).count();
        Self {
            value,
            cursor,
            focused,
            placeholder: placeholder.into(),
        }
    }

    /// The current value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Cursor position in graphemes.
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Whether the input is focused.
    pub const fn is_focused(&self) -> bool {
        self.focused
    }

    /// The placeholder text.
    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Number of graphemes in the value.
    pub fn len(&self) -> usize {
        self.value.graphemes(true).count()
    }

    /// Check if the value is empty.
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Replace the value and move the cursor to its end.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.len();
    }

    /// Replace the placeholder.
    pub fn set_placeholder(&mut self, placeholder: impl Into<String>) {
        self.placeholder = placeholder.into();
    }

    /// Focus or unfocus. Focusing moves the cursor to the end of the value.
    pub fn set_focus(&mut self, focused: bool) {
        self.focused = focused;
        if focused {
            self.cursor = self.len();
        }
    }

    /// Clear the value.
    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Take the value out, leaving the input empty.
    pub fn take_value(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.value)
    }

    /// Display column of the cursor relative to the start of the value.
    pub fn cursor_column(&self) -> usize {
        self.value[..self.byte_offset(self.cursor)].width()
    }

    /// Byte offset of grapheme `index` (the value length past the end).
    fn byte_offset(&self, index: usize) -> usize {
        self.value
            .grapheme_indices(true)
            .nth(index)
            .map_or(self.value.len(), |(i, _)| i)
    }

    /// Apply a key press.
    ///
    /// Returns `true` if the key was consumed. Unfocused inputs consume
    /// nothing, and neither do keys that are not editing keys (Enter, Tab,
    /// Escape, ...).
    pub fn handle_key(&mut self, event: &KeyEvent) -> bool {
        if !self.focused {
            return false;
        }
        match event.code {
            KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Right => self.cursor = (self.cursor + 1).min(self.len()),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.len(),
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    let start = self.byte_offset(self.cursor - 1);
                    let end = self.byte_offset(self.cursor);
                    self.value.replace_range(start..end, "");
                    self.cursor -= 1;
                }
            }
            KeyCode::Delete => {
                if self.cursor < self.len() {
                    let start = self.byte_offset(self.cursor);
                    let end = self.byte_offset(self.cursor + 1);
                    self.value.replace_range(start..end, "");
                }
            }
            KeyCode::Char(c) if !c.is_control() && !event.modifiers.control => {
                let at = self.byte_offset(self.cursor);
                self.value.insert(at, c);
                // A combining mark joins the previous grapheme instead of adding one.
                self.cursor = self.value[..at + c.len_utf8()].graphemes(true).count();
            }
            _ => return false,
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::KeyModifiers;

    fn press(input: &mut InputState, name: &str) -> bool {
        let code: KeyCode = name.parse().unwrap();
        input.handle_key(&KeyEvent::new(code))
    }

    #[test]
    fn test_unfocused_consumes_nothing() {
        let mut input = InputState::new("abc", "", false);
        assert!(!press(&mut input, "x"));
        assert_eq!(input.value(), "abc");
    }

    #[test]
    fn test_cursor_never_underflows() {
        let mut input = InputState::new("abc", "", true);
        press(&mut input, "Home");
        assert_eq!(input.cursor(), 0);
        assert!(press(&mut input, "ArrowLeft"));
        assert_eq!(input.cursor(), 0);
        press(&mut input, "Backspace");
        assert_eq!(input.value(), "abc");
    }

    #[test]
    fn test_cursor_stays_in_bounds() {
        let mut input = InputState::new("abc", "", true);
        let keys = [
            "ArrowRight", "ArrowRight", "Delete", "ArrowLeft", "Backspace", "End",
            "ArrowRight", "Delete", "Home", "Delete", "Delete", "Delete", "Delete",
            "ArrowLeft", "Backspace",
        ];
        for key in keys {
            press(&mut input, key);
            assert!(input.cursor() <= input.len(), "after {key}");
        }
        assert!(input.is_empty());
        assert_eq!(input.cursor(), 0);
    }

    #[test]
    fn test_insert_at_cursor() {
        let mut input = InputState::new("ac", "", true);
        press(&mut input, "ArrowLeft");
        press(&mut input, "b");
        assert_eq!(input.value(), "abc");
        assert_eq!(input.cursor(), 2);
    }

    #[test]
    fn test_backspace_and_delete_splice() {
        let mut input = InputState::new("hello", "", true);
        press(&mut input, "ArrowLeft");
        press(&mut input, "Backspace");
        assert_eq!(input.value(), "helo");
        press(&mut input, "Delete");
        assert_eq!(input.value(), "hel");
        assert_eq!(input.cursor(), 3);
    }

    #[test]
    fn test_grapheme_aware_editing() {
        let mut input = InputState::new("e\u{301}x", "", true);
        assert_eq!(input.len(), 2);
        press(&mut input, "ArrowLeft");
        press(&mut input, "Backspace");
        assert_eq!(input.value(), "x");
        assert_eq!(input.cursor(), 0);
    }

    #[test]
    fn test_wide_cursor_column() {
        let input = InputState::new("日本", "", true);
        assert_eq!(input.cursor_column(), 4);
    }

    #[test]
    fn test_non_editing_keys_not_consumed() {
        let mut input = InputState::new("", "", true);
        assert!(!press(&mut input, "Escape"));
        assert!(!press(&mut input, "Enter"));
        let ctrl_a = KeyEvent::new(KeyCode::Char('a')).with_modifiers(KeyModifiers::CONTROL);
        assert!(!input.handle_key(&ctrl_a));
    }

    #[test]
    fn test_focus_moves_cursor_to_end() {
        let mut input = InputState::new("abc", "", true);
        press(&mut input, "Home");
        input.set_focus(false);
        input.set_focus(true);
        assert_eq!(input.cursor(), 3);
    }

    #[test]
    fn test_take_value() {
        let mut input = InputState::new("submit me", "", true);
        assert_eq!(input.take_value(), "submit me");
        assert!(input.is_empty());
        assert_eq!(input.cursor(), 0);
    }
}
