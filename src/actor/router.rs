//! Input Router: Deliver input events to components.
//!
//! Keys go to focused Inputs, mouse events go to Buttons, Ctrl+C and Ctrl+D
//! ask the event loop to exit. Resizes are handed back to the caller, which
//! owns the cell buffer.

use super::messages::{InputEvent, KeyCode, KeyEvent};
use crate::widget::ComponentTree;
use tracing::{debug, warn};

/// What routing an event did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteOutcome {
    /// The user asked to quit, or the input source shut down.
    Exit,
    /// A component consumed the event; its state may have changed.
    Consumed,
    /// The terminal was resized; the renderer must rebuild its buffer.
    Resize {
        /// New width in columns.
        width: u16,
        /// New height in rows.
        height: u16,
    },
    /// Nothing handled the event.
    Ignored,
}

impl RouteOutcome {
    /// Whether the event may have changed what is on screen.
    pub const fn needs_render(self) -> bool {
        matches!(self, Self::Consumed | Self::Resize { .. })
    }
}

/// Routes [`InputEvent`]s into a [`ComponentTree`].
#[derive(Debug, Clone, Copy)]
pub struct InputRouter {
    /// Whether Ctrl+C / Ctrl+D request an exit.
    exit_on_interrupt: bool,
}

impl InputRouter {
    /// A router where Ctrl+C and Ctrl+D request an exit.
    pub const fn new() -> Self {
        Self {
            exit_on_interrupt: true,
        }
    }

    /// Disable or enable the Ctrl+C / Ctrl+D exit keys (builder pattern).
    #[must_use]
    pub const fn with_exit_keys(mut self, enabled: bool) -> Self {
        self.exit_on_interrupt = enabled;
        self
    }

    /// Check if a key press is an exit request.
    pub fn is_exit_key(&self, key: &KeyEvent) -> bool {
        self.exit_on_interrupt && (key.is_ctrl('c') || key.is_ctrl('d'))
    }

    /// Route one event.
    pub fn route(&self, tree: &mut ComponentTree, event: &InputEvent) -> RouteOutcome {
        match event {
            InputEvent::Key(key) if self.is_exit_key(key) => RouteOutcome::Exit,
            InputEvent::Key(key) => consumed(tree.handle_keyboard(key)),
            InputEvent::Mouse(mouse) => consumed(tree.handle_mouse(mouse)),
            InputEvent::Resize { width, height } => {
                debug!(width, height, "terminal resized");
                RouteOutcome::Resize {
                    width: *width,
                    height: *height,
                }
            }
            InputEvent::Paste(text) => {
                let mut any = false;
                for ch in text.chars().filter(|c| !c.is_control()) {
                    any |= tree.handle_keyboard(&KeyEvent::new(KeyCode::Char(ch)));
                }
                consumed(any)
            }
            InputEvent::Error(message) => {
                warn!(%message, "input source error");
                RouteOutcome::Ignored
            }
            InputEvent::Shutdown => RouteOutcome::Exit,
        }
    }
}

impl Default for InputRouter {
    fn default() -> Self {
        Self::new()
    }
}

const fn consumed(handled: bool) -> RouteOutcome {
    if handled {
        RouteOutcome::Consumed
    } else {
        RouteOutcome::Ignored
    }
}
