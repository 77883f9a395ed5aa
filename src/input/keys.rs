//! Decoding raw terminal input into keys
//!
//! A single read from stdin may hold several keys (fast typing, pasted
//! text) or one multi-byte escape sequence.

/// A decoded keypress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    /// Escape-prefixed character, lowercased
    Alt(char),
    /// Control character, as its lowercase letter
    Ctrl(char),
    Enter,
    Tab,
    BackTab,
    Backspace,
    Delete,
    Esc,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    Unknown,
}

const ESC: u8 = 0x1b;

/// Decode a chunk of input bytes
pub fn decode_keys(bytes: &[u8]) -> Vec<Key> {
    let mut keys = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let (key, used) = match bytes[i] {
            ESC => decode_escape(&bytes[i..]),
            b'\r' if bytes.get(i + 1) == Some(&b'\n') => (Key::Enter, 2),
            b'\r' | b'\n' => (Key::Enter, 1),
            b'\t' => (Key::Tab, 1),
            0x7f | 0x08 => (Key::Backspace, 1),
            b @ 0x01..=0x1a => (Key::Ctrl((b - 1 + b'a') as char), 1),
            0x00 | 0x1c..=0x1f => (Key::Unknown, 1),
            _ => decode_char(&bytes[i..]),
        };
        if key != Key::Unknown {
            keys.push(key);
        }
        i += used.max(1);
    }

    keys
}

/// Decode one UTF-8 character
fn decode_char(bytes: &[u8]) -> (Key, usize) {
    let width = match bytes[0] {
        0x00..=0x7f => 1,
        0xc0..=0xdf => 2,
        0xe0..=0xef => 3,
        0xf0..=0xf7 => 4,
        _ => return (Key::Unknown, 1),
    };

    match bytes
        .get(..width)
        .and_then(|b| std::str::from_utf8(b).ok())
        .and_then(|s| s.chars().next())
    {
        Some(c) => (Key::Char(c), width),
        None => (Key::Unknown, 1),
    }
}

/// Decode a sequence starting with ESC
fn decode_escape(bytes: &[u8]) -> (Key, usize) {
    match bytes.get(1) {
        None | Some(&ESC) => (Key::Esc, 1),
        Some(&b'[') => decode_csi(bytes),
        Some(&b'O') if bytes.len() >= 3 => {
            let key = match bytes[2] {
                b'A' => Key::Up,
                b'B' => Key::Down,
                b'C' => Key::Right,
                b'D' => Key::Left,
                b'H' => Key::Home,
                b'F' => Key::End,
                _ => Key::Unknown,
            };
            (key, 3)
        }
        Some(&b) if b < 0x20 || b == 0x7f => (Key::Esc, 1),
        Some(_) => match decode_char(&bytes[1..]) {
            (Key::Char(c), used) => (Key::Alt(c.to_ascii_lowercase()), used + 1),
            _ => (Key::Esc, 1),
        },
    }
}

/// Decode a CSI sequence: ESC [ params final
fn decode_csi(bytes: &[u8]) -> (Key, usize) {
    let Some(offset) = bytes[2..].iter().position(|b| (0x40..=0x7e).contains(b)) else {
        return (Key::Unknown, bytes.len());
    };
    let end = 2 + offset;
    let params = &bytes[2..end];

    let key = match bytes[end] {
        b'A' => Key::Up,
        b'B' => Key::Down,
        b'C' => Key::Right,
        b'D' => Key::Left,
        b'H' => Key::Home,
        b'F' => Key::End,
        b'Z' => Key::BackTab,
        b'~' => match params.split(|&b| b == b';').next() {
            Some(b"1") | Some(b"7") => Key::Home,
            Some(b"4") | Some(b"8") => Key::End,
            Some(b"3") => Key::Delete,
            Some(b"5") => Key::PageUp,
            Some(b"6") => Key::PageDown,
            _ => Key::Unknown,
        },
        _ => Key::Unknown,
    };

    (key, end + 1)
}
