//! Virtual key codes and character resolution.
//!
//! Key codes follow the Windows virtual-key numbering (`VK_*` in
//! `winuser.h`).  Input sinks on other platforms translate from this
//! numbering at the injection boundary, the same way a platform listener
//! translates native codes into it before reporting a key press.

pub mod us_layout;
pub mod vk;

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use us_layout::UsLayoutResolver;

/// A platform virtual key code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct KeyCode(pub u8);

impl KeyCode {
    pub const BACKSPACE: KeyCode = KeyCode(0x08);
    pub const TAB: KeyCode = KeyCode(0x09);
    pub const ENTER: KeyCode = KeyCode(0x0D);
    pub const SHIFT: KeyCode = KeyCode(0x10);
    pub const CONTROL: KeyCode = KeyCode(0x11);
    pub const ALT: KeyCode = KeyCode(0x12);
    pub const PAUSE: KeyCode = KeyCode(0x13);
    pub const CAPS_LOCK: KeyCode = KeyCode(0x14);
    pub const ESCAPE: KeyCode = KeyCode(0x1B);
    pub const SPACE: KeyCode = KeyCode(0x20);
    pub const PAGE_UP: KeyCode = KeyCode(0x21);
    pub const PAGE_DOWN: KeyCode = KeyCode(0x22);
    pub const END: KeyCode = KeyCode(0x23);
    pub const HOME: KeyCode = KeyCode(0x24);
    pub const LEFT: KeyCode = KeyCode(0x25);
    pub const UP: KeyCode = KeyCode(0x26);
    pub const RIGHT: KeyCode = KeyCode(0x27);
    pub const DOWN: KeyCode = KeyCode(0x28);
    pub const PRINT_SCREEN: KeyCode = KeyCode(0x2C);
    pub const INSERT: KeyCode = KeyCode(0x2D);
    pub const DELETE: KeyCode = KeyCode(0x2E);

    pub const DIGIT0: KeyCode = KeyCode(0x30);
    pub const DIGIT1: KeyCode = KeyCode(0x31);
    pub const DIGIT2: KeyCode = KeyCode(0x32);
    pub const DIGIT3: KeyCode = KeyCode(0x33);
    pub const DIGIT4: KeyCode = KeyCode(0x34);
    pub const DIGIT5: KeyCode = KeyCode(0x35);
    pub const DIGIT6: KeyCode = KeyCode(0x36);
    pub const DIGIT7: KeyCode = KeyCode(0x37);
    pub const DIGIT8: KeyCode = KeyCode(0x38);
    pub const DIGIT9: KeyCode = KeyCode(0x39);

    pub const A: KeyCode = KeyCode(0x41);
    pub const B: KeyCode = KeyCode(0x42);
    pub const C: KeyCode = KeyCode(0x43);
    pub const D: KeyCode = KeyCode(0x44);
    pub const E: KeyCode = KeyCode(0x45);
    pub const F: KeyCode = KeyCode(0x46);
    pub const G: KeyCode = KeyCode(0x47);
    pub const H: KeyCode = KeyCode(0x48);
    pub const I: KeyCode = KeyCode(0x49);
    pub const J: KeyCode = KeyCode(0x4A);
    pub const K: KeyCode = KeyCode(0x4B);
    pub const L: KeyCode = KeyCode(0x4C);
    pub const M: KeyCode = KeyCode(0x4D);
    pub const N: KeyCode = KeyCode(0x4E);
    pub const O: KeyCode = KeyCode(0x4F);
    pub const P: KeyCode = KeyCode(0x50);
    pub const Q: KeyCode = KeyCode(0x51);
    pub const R: KeyCode = KeyCode(0x52);
    pub const S: KeyCode = KeyCode(0x53);
    pub const T: KeyCode = KeyCode(0x54);
    pub const U: KeyCode = KeyCode(0x55);
    pub const V: KeyCode = KeyCode(0x56);
    pub const W: KeyCode = KeyCode(0x57);
    pub const X: KeyCode = KeyCode(0x58);
    pub const Y: KeyCode = KeyCode(0x59);
    pub const Z: KeyCode = KeyCode(0x5A);

    pub const F1: KeyCode = KeyCode(0x70);
    pub const F2: KeyCode = KeyCode(0x71);
    pub const F3: KeyCode = KeyCode(0x72);
    pub const F4: KeyCode = KeyCode(0x73);
    pub const F5: KeyCode = KeyCode(0x74);
    pub const F6: KeyCode = KeyCode(0x75);
    pub const F7: KeyCode = KeyCode(0x76);
    pub const F8: KeyCode = KeyCode(0x77);
    pub const F9: KeyCode = KeyCode(0x78);
    pub const F10: KeyCode = KeyCode(0x79);
    pub const F11: KeyCode = KeyCode(0x7A);
    pub const F12: KeyCode = KeyCode(0x7B);

    pub const NUM_LOCK: KeyCode = KeyCode(0x90);
    pub const SCROLL_LOCK: KeyCode = KeyCode(0x91);
    /// `VK_RMENU`; the key held for AltGr.
    pub const RIGHT_ALT: KeyCode = KeyCode(0xA5);

    /// Returns `true` if this code names an injectable keyboard key.
    ///
    /// Unassigned codes and the mouse-button codes (0x01–0x06) are invalid.
    pub fn is_valid(self) -> bool {
        vk::name(self).is_some()
    }

    /// Human-readable key name, or `None` for an invalid code.
    pub fn name(self) -> Option<&'static str> {
        vk::name(self)
    }

    /// Looks a key up by its name, ignoring ASCII case.
    pub fn from_name(name: &str) -> Option<KeyCode> {
        vk::valid_codes().find(|code| {
            code.name()
                .is_some_and(|candidate| candidate.eq_ignore_ascii_case(name))
        })
    }
}

/// Error returned when a string does not name a valid key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("not a valid key: {0:?}")]
pub struct ParseKeyCodeError(pub String);

/// Accepts a key name (`"Enter"`, `"f5"`), a hex code (`"0x0D"`) or a
/// decimal code (`"13"`).
impl FromStr for KeyCode {
    type Err = ParseKeyCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let numeric = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            Some(hex) => u8::from_str_radix(hex, 16).ok(),
            None => s.parse::<u8>().ok(),
        };
        numeric
            .map(KeyCode)
            .filter(|code| code.is_valid())
            .or_else(|| KeyCode::from_name(s))
            .ok_or_else(|| ParseKeyCodeError(s.to_string()))
    }
}

impl std::fmt::Display for KeyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{name}"),
            None => write!(f, "VK(0x{:02X})", self.0),
        }
    }
}

/// Resolves a character to the key that types it.
///
/// Implementations return `None` when the character has no key on the
/// active layout; callers treat that exactly like an invalid key code.
pub trait KeyResolver: Send + Sync {
    fn resolve(&self, c: char) -> Option<KeyCode>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_constants_are_valid() {
        for code in [KeyCode::A, KeyCode::K, KeyCode::Z] {
            assert!(code.is_valid(), "{code:?} must be valid");
        }
    }

    #[test]
    fn test_mouse_button_codes_are_invalid() {
        for raw in 0x01..=0x06u8 {
            assert!(!KeyCode(raw).is_valid(), "0x{raw:02X} is a mouse code");
        }
    }

    #[test]
    fn test_parse_accepts_names_hex_and_decimal() {
        assert_eq!("enter".parse::<KeyCode>(), Ok(KeyCode::ENTER));
        assert_eq!("F5".parse::<KeyCode>(), Ok(KeyCode::F5));
        assert_eq!("0x41".parse::<KeyCode>(), Ok(KeyCode::A));
        assert_eq!("13".parse::<KeyCode>(), Ok(KeyCode::ENTER));
    }

    #[test]
    fn test_parse_rejects_invalid_codes_and_unknown_names() {
        assert!("0x01".parse::<KeyCode>().is_err());
        assert!("0xFF".parse::<KeyCode>().is_err());
        assert!("NotAKey".parse::<KeyCode>().is_err());
    }

    #[test]
    fn test_display_uses_name_or_hex() {
        assert_eq!(KeyCode::ENTER.to_string(), "Enter");
        assert_eq!(KeyCode(0xFF).to_string(), "VK(0xFF)");
    }
}
