//! Windows virtual-key name table.
//!
//! Reference: Windows Virtual-Key Codes (winuser.h).
//!
//! # How this table works
//!
//! `VK_NAMES` is a compile-time array of 256 entries indexed by VK code.
//! Position 0x41 holds `Some("A")` because `VK_A` is 0x41.  Codes that are
//! unassigned, reserved, or belong to mouse buttons hold `None`; those are
//! the codes an input sink rejects as invalid.
//!
//! Indexing is an O(1) lookup.  Every injected keystroke is validated
//! against this table.

use super::KeyCode;

/// Returns the name of `code`, or `None` if it is not a keyboard key.
pub fn name(code: KeyCode) -> Option<&'static str> {
    VK_NAMES[code.0 as usize]
}

/// Iterates every valid key code in ascending order.
pub fn valid_codes() -> impl Iterator<Item = KeyCode> {
    (0u8..=255)
        .map(KeyCode)
        .filter(|code| VK_NAMES[code.0 as usize].is_some())
}

const LETTERS: [&str; 26] = [
    "A", "B", "C", "D", "E", "F", "G", "H", "I", "J", "K", "L", "M", "N", "O", "P", "Q", "R",
    "S", "T", "U", "V", "W", "X", "Y", "Z",
];

const DIGITS: [&str; 10] = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];

const NUMPAD_DIGITS: [&str; 10] = [
    "Numpad0", "Numpad1", "Numpad2", "Numpad3", "Numpad4", "Numpad5", "Numpad6", "Numpad7",
    "Numpad8", "Numpad9",
];

const FUNCTION_KEYS: [&str; 24] = [
    "F1", "F2", "F3", "F4", "F5", "F6", "F7", "F8", "F9", "F10", "F11", "F12", "F13", "F14",
    "F15", "F16", "F17", "F18", "F19", "F20", "F21", "F22", "F23", "F24",
];

/// Complete VK → name table indexed by VK code (0x00–0xFF).
const VK_NAMES: [Option<&str>; 256] = {
    let mut t: [Option<&str>; 256] = [None; 256];

    // ── Editing and control keys ─────────────────────────────────────────────
    t[0x08] = Some("Backspace");
    t[0x09] = Some("Tab");
    t[0x0C] = Some("Clear");
    t[0x0D] = Some("Enter");
    t[0x10] = Some("Shift");
    t[0x11] = Some("Control");
    t[0x12] = Some("Alt");
    t[0x13] = Some("Pause");
    t[0x14] = Some("CapsLock");
    t[0x1B] = Some("Escape");
    t[0x20] = Some("Space");

    // ── Navigation ───────────────────────────────────────────────────────────
    t[0x21] = Some("PageUp");
    t[0x22] = Some("PageDown");
    t[0x23] = Some("End");
    t[0x24] = Some("Home");
    t[0x25] = Some("ArrowLeft");
    t[0x26] = Some("ArrowUp");
    t[0x27] = Some("ArrowRight");
    t[0x28] = Some("ArrowDown");
    t[0x2C] = Some("PrintScreen");
    t[0x2D] = Some("Insert");
    t[0x2E] = Some("Delete");

    // ── Digits (0x30–0x39) and letters (0x41–0x5A) ──────────────────────────
    let mut i = 0;
    while i < DIGITS.len() {
        t[0x30 + i] = Some(DIGITS[i]);
        i += 1;
    }
    let mut i = 0;
    while i < LETTERS.len() {
        t[0x41 + i] = Some(LETTERS[i]);
        i += 1;
    }

    // ── System keys ──────────────────────────────────────────────────────────
    t[0x5B] = Some("MetaLeft");
    t[0x5C] = Some("MetaRight");
    t[0x5D] = Some("ContextMenu");

    // ── Numpad (0x60–0x6F) ───────────────────────────────────────────────────
    let mut i = 0;
    while i < NUMPAD_DIGITS.len() {
        t[0x60 + i] = Some(NUMPAD_DIGITS[i]);
        i += 1;
    }
    t[0x6A] = Some("NumpadMultiply");
    t[0x6B] = Some("NumpadAdd");
    t[0x6C] = Some("NumpadSeparator");
    t[0x6D] = Some("NumpadSubtract");
    t[0x6E] = Some("NumpadDecimal");
    t[0x6F] = Some("NumpadDivide");

    // ── Function keys (0x70–0x87) ────────────────────────────────────────────
    let mut i = 0;
    while i < FUNCTION_KEYS.len() {
        t[0x70 + i] = Some(FUNCTION_KEYS[i]);
        i += 1;
    }

    // ── Locks and sided modifiers ────────────────────────────────────────────
    t[0x90] = Some("NumLock");
    t[0x91] = Some("ScrollLock");
    t[0xA0] = Some("ShiftLeft");
    t[0xA1] = Some("ShiftRight");
    t[0xA2] = Some("ControlLeft");
    t[0xA3] = Some("ControlRight");
    t[0xA4] = Some("AltLeft");
    t[0xA5] = Some("AltRight");

    // ── US-layout punctuation (OEM keys) ─────────────────────────────────────
    t[0xBA] = Some("Semicolon");
    t[0xBB] = Some("Equal");
    t[0xBC] = Some("Comma");
    t[0xBD] = Some("Minus");
    t[0xBE] = Some("Period");
    t[0xBF] = Some("Slash");
    t[0xC0] = Some("Backquote");
    t[0xDB] = Some("BracketLeft");
    t[0xDC] = Some("Backslash");
    t[0xDD] = Some("BracketRight");
    t[0xDE] = Some("Quote");

    t
};
