//! Input Actor: Dedicated thread for polling terminal events.
//!
//! This actor runs in its own thread and uses crossterm's event polling
//! to capture keyboard, mouse, and resize events without blocking the
//! event loop. Everything after the channel is single-threaded.

use super::messages::{InputEvent, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseKind};
use crossbeam_channel::Sender;
use crossterm::event::{self, Event, KeyEventKind};
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::debug;

/// Input actor that polls terminal events.
#[derive(Debug)]
pub struct InputActor {
    /// Handle to the input thread.
    handle: Option<JoinHandle<()>>,
    /// Flag to signal shutdown.
    shutdown: Arc<AtomicBool>,
}

impl InputActor {
    /// Spawn the input actor thread.
    ///
    /// # Arguments
    ///
    /// * `sender` - Channel to send input events to the event loop.
    /// * `poll_timeout` - How long to wait for events before checking shutdown.
    pub fn spawn(sender: Sender<InputEvent>, poll_timeout: Duration) -> io::Result<Self> {
        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_clone = shutdown.clone();

        let handle = thread::Builder::new()
            .name("cellflex-input".to_string())
            .spawn(move || {
                Self::run_loop(&sender, &shutdown_clone, poll_timeout);
            })?;

        Ok(Self {
            handle: Some(handle),
            shutdown,
        })
    }

    /// Signal the input thread to shutdown.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }

    /// Wait for the input thread to finish.
    pub fn join(mut self) {
        self.shutdown();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    /// Main input polling loop.
    fn run_loop(sender: &Sender<InputEvent>, shutdown: &AtomicBool, poll_timeout: Duration) {
        loop {
            if shutdown.load(Ordering::Relaxed) {
                let _ = sender.send(InputEvent::Shutdown);
                break;
            }

            match event::poll(poll_timeout) {
                Ok(true) => match event::read() {
                    Ok(event) => {
                        if let Some(input_event) = convert_event(event) {
                            if sender.send(input_event).is_err() {
                                // Receiver dropped, exit
                                break;
                            }
                        }
                    }
                    Err(e) => {
                        let _ = sender.send(InputEvent::Error(e.to_string()));
                    }
                },
                Ok(false) => {}
                Err(e) => {
                    let _ = sender.send(InputEvent::Error(e.to_string()));
                }
            }
        }
        debug!("input thread exiting");
    }
}

impl Drop for InputActor {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Convert a crossterm event to an [`InputEvent`].
///
/// Key releases/repeats, focus changes and unsupported keys map to `None`.
pub fn convert_event(event: Event) -> Option<InputEvent> {
    match event {
        Event::Key(key_event) => {
            if key_event.kind != KeyEventKind::Press {
                return None;
            }
            let code = convert_key_code(key_event.code)?;
            let modifiers = convert_modifiers(key_event.modifiers);
            Some(InputEvent::Key(KeyEvent { code, modifiers }))
        }
        Event::Mouse(mouse_event) => convert_mouse_event(mouse_event).map(InputEvent::Mouse),
        Event::Resize(width, height) => Some(InputEvent::Resize { width, height }),
        Event::Paste(text) => Some(InputEvent::Paste(text)),
        Event::FocusGained | Event::FocusLost => None,
    }
}

fn convert_key_code(code: event::KeyCode) -> Option<KeyCode> {
    Some(match code {
        event::KeyCode::Char(c) => KeyCode::Char(c),
        event::KeyCode::F(n) => KeyCode::F(n),
        event::KeyCode::Backspace => KeyCode::Backspace,
        event::KeyCode::Enter => KeyCode::Enter,
        event::KeyCode::Left => KeyCode::Left,
        event::KeyCode::Right => KeyCode::Right,
        event::KeyCode::Up => KeyCode::Up,
        event::KeyCode::Down => KeyCode::Down,
        event::KeyCode::Home => KeyCode::Home,
        event::KeyCode::End => KeyCode::End,
        event::KeyCode::PageUp => KeyCode::PageUp,
        event::KeyCode::PageDown => KeyCode::PageDown,
        event::KeyCode::Tab => KeyCode::Tab,
        event::KeyCode::BackTab => KeyCode::BackTab,
        event::KeyCode::Delete => KeyCode::Delete,
        event::KeyCode::Insert => KeyCode::Insert,
        event::KeyCode::Esc => KeyCode::Esc,
        _ => return None,
    })
}

fn convert_modifiers(mods: event::KeyModifiers) -> KeyModifiers {
    KeyModifiers {
        shift: mods.contains(event::KeyModifiers::SHIFT),
        control: mods.contains(event::KeyModifiers::CONTROL),
        alt: mods.contains(event::KeyModifiers::ALT),
        super_key: mods.contains(event::KeyModifiers::SUPER),
    }
}

fn convert_mouse_event(mouse: event::MouseEvent) -> Option<MouseEvent> {
    let (kind, button) = match mouse.kind {
        event::MouseEventKind::Down(button) => (MouseKind::Down, convert_mouse_button(button)),
        event::MouseEventKind::Up(button) => (MouseKind::Up, convert_mouse_button(button)),
        event::MouseEventKind::Drag(button) => (MouseKind::Move, convert_mouse_button(button)),
        event::MouseEventKind::Moved => (MouseKind::Move, MouseButton::None),
        event::MouseEventKind::ScrollUp => (MouseKind::ScrollUp, MouseButton::None),
        event::MouseEventKind::ScrollDown => (MouseKind::ScrollDown, MouseButton::None),
        _ => return None,
    };
    Some(MouseEvent {
        x: mouse.column,
        y: mouse.row,
        kind,
        button,
        shift: mouse.modifiers.contains(event::KeyModifiers::SHIFT),
        meta: mouse.modifiers.contains(event::KeyModifiers::ALT),
        ctrl: mouse.modifiers.contains(event::KeyModifiers::CONTROL),
    })
}

const fn convert_mouse_button(button: event::MouseButton) -> MouseButton {
    match button {
        event::MouseButton::Left => MouseButton::Left,
        event::MouseButton::Right => MouseButton::Right,
        event::MouseButton::Middle => MouseButton::Middle,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_key_press_only() {
        let press = event::KeyEvent::new(event::KeyCode::Left, event::KeyModifiers::CONTROL);
        assert_eq!(
            convert_event(Event::Key(press)),
            Some(InputEvent::Key(
                KeyEvent::new(KeyCode::Left).with_modifiers(KeyModifiers::CONTROL)
            ))
        );

        let mut release = press;
        release.kind = KeyEventKind::Release;
        assert_eq!(convert_event(Event::Key(release)), None);
    }

    #[test]
    fn test_convert_mouse() {
        let down = event::MouseEvent {
            kind: event::MouseEventKind::Down(event::MouseButton::Left),
            column: 7,
            row: 2,
            modifiers: event::KeyModifiers::SHIFT,
        };
        let Some(InputEvent::Mouse(mouse)) = convert_event(Event::Mouse(down)) else {
            panic!("expected a mouse event");
        };
        assert_eq!((mouse.x, mouse.y, mouse.kind), (7, 2, MouseKind::Down));
        assert!(mouse.shift && !mouse.ctrl);
    }

    #[test]
    fn test_focus_events_ignored() {
        assert_eq!(convert_event(Event::FocusGained), None);
        assert_eq!(convert_event(Event::Resize(80, 24)), Some(InputEvent::Resize { width: 80, height: 24 }));
    }
}
