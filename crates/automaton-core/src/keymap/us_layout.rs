//! US-QWERTY character → virtual key resolution.
//!
//! Maps each character to the key that produces it on an unshifted US
//! keyboard.  Upper- and lower-case letters resolve to the same key: the
//! resolver reports *which key*, not *which modifiers*, so typing `'A'`
//! presses the A key without Shift.  Callers that want capitals pass a
//! Shift [`ModifierSet`](crate::ModifierSet) to the typist.
//!
//! Shifted punctuation (`!`, `@`, `{` …) has no unshifted key and resolves
//! to `None`.

use super::{KeyCode, KeyResolver};

/// Resolver for the US-QWERTY layout.
#[derive(Debug, Clone, Copy, Default)]
pub struct UsLayoutResolver;

impl UsLayoutResolver {
    pub fn new() -> Self {
        Self
    }
}

impl KeyResolver for UsLayoutResolver {
    fn resolve(&self, c: char) -> Option<KeyCode> {
        char_to_vk(c)
    }
}

/// Table lookup behind [`UsLayoutResolver`].
pub fn char_to_vk(c: char) -> Option<KeyCode> {
    if c.is_ascii_alphabetic() {
        // VK_A..VK_Z match ASCII 'A'..'Z'.
        return Some(KeyCode(c.to_ascii_uppercase() as u8));
    }
    if c.is_ascii_digit() {
        // VK_0..VK_9 match ASCII '0'..'9'.
        return Some(KeyCode(c as u8));
    }
    let code = match c {
        ' ' => KeyCode::SPACE,
        '\n' | '\r' => KeyCode::ENTER,
        '\t' => KeyCode::TAB,
        '\u{8}' => KeyCode::BACKSPACE,
        '\u{1b}' => KeyCode::ESCAPE,
        '\u{7f}' => KeyCode::DELETE,
        ';' => KeyCode(0xBA),
        '=' => KeyCode(0xBB),
        ',' => KeyCode(0xBC),
        '-' => KeyCode(0xBD),
        '.' => KeyCode(0xBE),
        '/' => KeyCode(0xBF),
        '`' => KeyCode(0xC0),
        '[' => KeyCode(0xDB),
        '\\' => KeyCode(0xDC),
        ']' => KeyCode(0xDD),
        '\'' => KeyCode(0xDE),
        _ => return None,
    };
    Some(code)
}
