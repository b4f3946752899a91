//! Raw Input Decoder: Terminal bytes to input events.
//!
//! Used when the host hands us raw stdin bytes instead of letting the
//! crossterm thread read them. Understands SGR mouse reports
//! (`ESC [ < b ; x ; y M|m`), CSI/SS3 cursor keys, the common `~` keys,
//! control characters and UTF-8 text. Anything malformed is dropped.

use super::messages::{InputEvent, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseKind};
use tracing::trace;

const ESC: u8 = 0x1b;

/// Decode a chunk of raw terminal input.
///
/// Sequences split across chunks are not reassembled; an escape sequence cut
/// off at the end of `bytes` is dropped.
pub fn decode(bytes: &[u8]) -> Vec<InputEvent> {
    let mut events = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let rest = &bytes[i..];
        let (consumed, event) = match rest[0] {
            ESC => decode_escape(rest),
            b'\r' | b'\n' => (1, Some(key(KeyCode::Enter))),
            0x7f | 0x08 => (1, Some(key(KeyCode::Backspace))),
            b'\t' => (1, Some(key(KeyCode::Tab))),
            b @ 0x01..=0x1a => {
                let letter = char::from(b'a' + b - 1);
                (1, Some(key(KeyCode::Char(letter)).with_modifiers(KeyModifiers::CONTROL)))
            }
            b if b < 0x20 => {
                trace!(byte = b, "dropping control byte");
                (1, None)
            }
            _ => decode_utf8(rest),
        };
        events.extend(event.map(|k| match k {
            Decoded::Key(k) => InputEvent::Key(k),
            Decoded::Mouse(m) => InputEvent::Mouse(m),
        }));
        i += consumed.max(1);
    }
    events
}

/// Decode a single SGR mouse report body: the bytes between `ESC [ <` and
/// the final `M` (press) or `m` (release).
///
/// Returns `None` for anything that is not three decimal fields.
pub fn decode_sgr_mouse(params: &[u8], release: bool) -> Option<MouseEvent> {
    let params = std::str::from_utf8(params).ok()?;
    let mut fields = params.split(';').map(str::parse::<u16>);
    let (Some(Ok(code)), Some(Ok(x)), Some(Ok(y)), None) =
        (fields.next(), fields.next(), fields.next(), fields.next())
    else {
        return None;
    };

    let button = match code & 3 {
        0 => MouseButton::Left,
        1 => MouseButton::Middle,
        2 => MouseButton::Right,
        _ => MouseButton::None,
    };
    let (kind, button) = if code & 64 != 0 {
        let kind = if code & 1 == 0 {
            MouseKind::ScrollUp
        } else {
            MouseKind::ScrollDown
        };
        (kind, MouseButton::None)
    } else if code & 32 != 0 {
        (MouseKind::Move, button)
    } else if release {
        (MouseKind::Up, button)
    } else {
        (MouseKind::Down, button)
    };

    Some(MouseEvent {
        x: x.saturating_sub(1),
        y: y.saturating_sub(1),
        kind,
        button,
        shift: code & 4 != 0,
        meta: code & 8 != 0,
        ctrl: code & 16 != 0,
    })
}

#[derive(Clone, Copy)]
enum Decoded {
    Key(KeyEvent),
    Mouse(MouseEvent),
}

impl Decoded {
    #[must_use]
    const fn with_modifiers(self, modifiers: KeyModifiers) -> Self {
        match self {
            Self::Key(k) => Self::Key(k.with_modifiers(modifiers)),
            Self::Mouse(_) => self,
        }
    }
}

const fn key(code: KeyCode) -> Decoded {
    Decoded::Key(KeyEvent::new(code))
}

fn decode_utf8(bytes: &[u8]) -> (usize, Option<Decoded>) {
    let len = match bytes[0] {
        0x00..=0x7f => 1,
        0xc0..=0xdf => 2,
        0xe0..=0xef => 3,
        0xf0..=0xf7 => 4,
        b => {
            trace!(byte = b, "dropping invalid utf-8 lead byte");
            return (1, None);
        }
    };
    let Some(ch) = bytes
        .get(..len)
        .and_then(|s| std::str::from_utf8(s).ok())
        .and_then(|s| s.chars().next())
    else {
        trace!("dropping truncated utf-8 sequence");
        return (1, None);
    };
    (len, Some(key(KeyCode::Char(ch))))
}

fn decode_escape(seq: &[u8]) -> (usize, Option<Decoded>) {
    match seq.get(1) {
        None => (1, Some(key(KeyCode::Esc))),
        Some(b'[') => decode_csi(seq),
        Some(b'O') => match seq.get(2) {
            Some(&b) => (3, ss3_key(b).map(key)),
            None => {
                trace!("dropping truncated ss3 sequence");
                (2, None)
            }
        },
        Some(&b) if (0x20..0x7f).contains(&b) => {
            let alt = KeyModifiers {
                alt: true,
                ..KeyModifiers::NONE
            };
            (2, Some(key(KeyCode::Char(char::from(b))).with_modifiers(alt)))
        }
        Some(_) => (1, Some(key(KeyCode::Esc))),
    }
}

/// `seq` starts with `ESC [`.
fn decode_csi(seq: &[u8]) -> (usize, Option<Decoded>) {
    let body = &seq[2..];

    if body.first() == Some(&b'<') {
        // Parameters are digits and `;` only; any other byte ends the report.
        let Some(end) = body[1..]
            .iter()
            .position(|&b| !(b.is_ascii_digit() || b == b';'))
            .map(|p| p + 1)
        else {
            trace!(len = seq.len(), "dropping unterminated sgr mouse sequence");
            return (seq.len(), None);
        };
        if !matches!(body[end], b'M' | b'm') {
            // Keep the byte that cut the report short; it starts the next event.
            trace!("dropping truncated sgr mouse sequence");
            return (2 + end, None);
        }
        let consumed = 2 + end + 1;
        let event = decode_sgr_mouse(&body[1..end], body[end] == b'm');
        if event.is_none() {
            trace!("dropping malformed sgr mouse sequence");
        }
        return (consumed, event.map(Decoded::Mouse));
    }

    let Some(end) = body.iter().position(|b| (0x40..=0x7e).contains(b)) else {
        trace!(len = seq.len(), "dropping unterminated csi sequence");
        return (seq.len(), None);
    };
    let consumed = 2 + end + 1;
    let params = std::str::from_utf8(&body[..end]).unwrap_or("");
    let mut fields = params.split(';');
    let first = fields.next().and_then(|f| f.parse::<u16>().ok());
    let modifiers = fields
        .next()
        .and_then(|f| f.parse::<u16>().ok())
        .map_or(KeyModifiers::NONE, xterm_modifiers);

    let code = match body[end] {
        b'~' => match first {
            Some(1 | 7) => Some(KeyCode::Home),
            Some(2) => Some(KeyCode::Insert),
            Some(3) => Some(KeyCode::Delete),
            Some(4 | 8) => Some(KeyCode::End),
            Some(5) => Some(KeyCode::PageUp),
            Some(6) => Some(KeyCode::PageDown),
            _ => None,
        },
        b'Z' => Some(KeyCode::BackTab),
        b => ss3_key(b),
    };
    match code {
        Some(code) => (consumed, Some(key(code).with_modifiers(modifiers))),
        None => {
            trace!(params, "dropping unknown csi sequence");
            (consumed, None)
        }
    }
}

fn ss3_key(b: u8) -> Option<KeyCode> {
    Some(match b {
        b'A' => KeyCode::Up,
        b'B' => KeyCode::Down,
        b'C' => KeyCode::Right,
        b'D' => KeyCode::Left,
        b'H' => KeyCode::Home,
        b'F' => KeyCode::End,
        b'P'..=b'S' => KeyCode::F(b - b'P' + 1),
        _ => return None,
    })
}

/// xterm encodes modifiers as `1 + bits` (shift 1, alt 2, ctrl 4, meta 8).
const fn xterm_modifiers(param: u16) -> KeyModifiers {
    let bits = param.saturating_sub(1);
    KeyModifiers {
        shift: bits & 1 != 0,
        alt: bits & 2 != 0,
        control: bits & 4 != 0,
        super_key: bits & 8 != 0,
    }
}
