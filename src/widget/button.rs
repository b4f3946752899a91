//! Button: Hover and press tracking with a click callback.

use crate::actor::{MouseEvent, MouseKind};
use crate::layout::Rect;
use crate::style::{Color, StyleOverrides, TextAlign};

/// Callback invoked when a button is clicked.
pub type ClickHandler = Box<dyn FnMut()>;

/// Interaction state of a Button component.
#[derive(Default)]
pub struct ButtonState {
    hover: bool,
    active: bool,
    on_click: Option<ClickHandler>,
}

impl ButtonState {
    /// Create an idle button.
    pub fn new(on_click: Option<ClickHandler>) -> Self {
        Self {
            hover: false,
            active: false,
            on_click,
        }
    }

    /// Whether the pointer is over the button.
    pub const fn is_hovered(&self) -> bool {
        self.hover
    }

    /// Whether the button is pressed.
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Replace the click callback.
    pub fn set_on_click(&mut self, on_click: impl FnMut() + 'static) {
        self.on_click = Some(Box::new(on_click));
    }

    /// Apply a mouse event against the button's absolute `bounds`.
    ///
    /// Hover follows the pointer. A press inside the bounds activates the
    /// button; the release clears it and fires the callback only when it
    /// happens inside the bounds. Returns `true` if any state changed.
    pub fn handle_mouse(&mut self, bounds: Rect, event: &MouseEvent) -> bool {
        let over = bounds.contains(i32::from(event.x), i32::from(event.y));
        let mut changed = false;

        if over != self.hover {
            self.hover = over;
            changed = true;
        }

        match event.kind {
            MouseKind::Down if over => {
                self.active = true;
                changed = true;
            }
            MouseKind::Up if self.active => {
                self.active = false;
                if over {
                    if let Some(on_click) = self.on_click.as_mut() {
                        on_click();
                    }
                }
                changed = true;
            }
            _ => {}
        }
        changed
    }

    /// State-dependent styling, applied over the component's own overrides.
    pub fn state_style(&self) -> StyleOverrides {
        let background = if self.active {
            Color::rgb(0x22, 0x22, 0x22)
        } else if self.hover {
            Color::rgb(0x55, 0x55, 0x55)
        } else {
            Color::rgb(0x33, 0x33, 0x33)
        };
        StyleOverrides::new()
            .background(background)
            .color(Color::WHITE)
            .text_align(TextAlign::Center)
            .bold(true)
    }
}

impl std::fmt::Debug for ButtonState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ButtonState")
            .field("hover", &self.hover)
            .field("active", &self.active)
            .field("on_click", &self.on_click.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    const BOUNDS: Rect = Rect::new(5, 2, 10, 1);

    fn counting_button() -> (ButtonState, Rc<Cell<u32>>) {
        let clicks = Rc::new(Cell::new(0));
        let counter = clicks.clone();
        let mut button = ButtonState::new(None);
        button.set_on_click(move || counter.set(counter.get() + 1));
        (button, clicks)
    }

    #[test]
    fn test_press_and_release_inside_clicks_once() {
        let (mut button, clicks) = counting_button();

        assert!(button.handle_mouse(BOUNDS, &MouseEvent::new(MouseKind::Down, 7, 2)));
        assert!(button.is_active());
        assert_eq!(clicks.get(), 0);

        assert!(button.handle_mouse(BOUNDS, &MouseEvent::new(MouseKind::Up, 7, 2)));
        assert!(!button.is_active());
        assert_eq!(clicks.get(), 1);
    }

    #[test]
    fn test_release_outside_cancels() {
        let (mut button, clicks) = counting_button();
        button.handle_mouse(BOUNDS, &MouseEvent::new(MouseKind::Down, 7, 2));

        assert!(button.handle_mouse(BOUNDS, &MouseEvent::new(MouseKind::Up, 30, 2)));
        assert!(!button.is_active());
        assert!(!button.is_hovered());
        assert_eq!(clicks.get(), 0);
    }

    #[test]
    fn test_hover_enter_and_leave() {
        let mut button = ButtonState::new(None);
        assert!(button.handle_mouse(BOUNDS, &MouseEvent::new(MouseKind::Move, 5, 2)));
        assert!(button.is_hovered());
        assert!(!button.handle_mouse(BOUNDS, &MouseEvent::new(MouseKind::Move, 6, 2)));
        assert!(button.handle_mouse(BOUNDS, &MouseEvent::new(MouseKind::Move, 15, 2)));
        assert!(!button.is_hovered());
    }

    #[test]
    fn test_release_without_press_ignored() {
        let (mut button, clicks) = counting_button();
        button.handle_mouse(BOUNDS, &MouseEvent::new(MouseKind::Move, 7, 2));
        assert!(!button.handle_mouse(BOUNDS, &MouseEvent::new(MouseKind::Up, 7, 2)));
        assert_eq!(clicks.get(), 0);
    }

    #[test]
    fn test_state_style_backgrounds() {
        let mut button = ButtonState::new(None);
        assert_eq!(button.state_style().background, Some(Color::rgb(0x33, 0x33, 0x33)));
        button.handle_mouse(BOUNDS, &MouseEvent::new(MouseKind::Move, 7, 2));
        assert_eq!(button.state_style().background, Some(Color::rgb(0x55, 0x55, 0x55)));
        button.handle_mouse(BOUNDS, &MouseEvent::new(MouseKind::Down, 7, 2));
        assert_eq!(button.state_style().background, Some(Color::rgb(0x22, 0x22, 0x22)));
    }
}
