//! Modifier keys and the platform modifier mask.
//!
//! A [`ModifierSet`] is the caller-facing description of "which modifiers are
//! held" for a keystroke or a hotkey.  It is an immutable value: once built it
//! never changes, so it can be copied freely between threads.
//!
//! The platform side speaks in [`ModifierMask`] bitfields.  Listeners report
//! the mask observed with each key press, and hotkey bindings are keyed by the
//! mask of their `ModifierSet`.  The left and right variants of Ctrl, Shift and
//! Meta have separate bits in a raw mask; [`ModifierMask::canonical`] folds
//! them together so that "Ctrl" matches either physical Ctrl key.  Right Alt
//! keeps its own bit because it is AltGr.

use serde::{Deserialize, Serialize};

use crate::keymap::KeyCode;

/// Bitfield of held modifier keys as reported by the platform.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModifierMask(pub u8);

impl ModifierMask {
    pub const LEFT_CTRL: ModifierMask = ModifierMask(1 << 0);
    pub const RIGHT_CTRL: ModifierMask = ModifierMask(1 << 1);
    pub const LEFT_SHIFT: ModifierMask = ModifierMask(1 << 2);
    pub const RIGHT_SHIFT: ModifierMask = ModifierMask(1 << 3);
    pub const LEFT_ALT: ModifierMask = ModifierMask(1 << 4);
    /// Right Alt doubles as AltGr on international layouts.
    pub const RIGHT_ALT: ModifierMask = ModifierMask(1 << 5);
    pub const LEFT_META: ModifierMask = ModifierMask(1 << 6);
    pub const RIGHT_META: ModifierMask = ModifierMask(1 << 7);

    /// The mask with no modifiers held.
    pub const NONE: ModifierMask = ModifierMask(0);

    /// Returns `true` if no modifier bit is set.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if any bit of `other` is set in `self`.
    pub fn intersects(self, other: ModifierMask) -> bool {
        self.0 & other.0 != 0
    }

    /// Folds left/right Ctrl, Shift and Meta onto their left bits.
    ///
    /// Alt and AltGr stay distinct.  Meta survives canonicalisation, which is
    /// what keeps a Ctrl+K binding from firing on Ctrl+Win+K.
    pub fn canonical(self) -> ModifierMask {
        let mut out = ModifierMask(self.0 & (Self::LEFT_ALT | Self::RIGHT_ALT).0);
        if self.intersects(Self::LEFT_CTRL | Self::RIGHT_CTRL) {
            out |= Self::LEFT_CTRL;
        }
        if self.intersects(Self::LEFT_SHIFT | Self::RIGHT_SHIFT) {
            out |= Self::LEFT_SHIFT;
        }
        if self.intersects(Self::LEFT_META | Self::RIGHT_META) {
            out |= Self::LEFT_META;
        }
        out
    }
}

impl std::ops::BitOr for ModifierMask {
    type Output = ModifierMask;

    fn bitor(self, rhs: ModifierMask) -> ModifierMask {
        ModifierMask(self.0 | rhs.0)
    }
}

impl std::ops::BitOrAssign for ModifierMask {
    fn bitor_assign(&mut self, rhs: ModifierMask) {
        self.0 |= rhs.0;
    }
}

/// A modifier key that can be held around a keystroke or required by a hotkey.
///
/// Declaration order is significant: [`ModifierSet::iter`] yields modifiers in
/// this order, and the typist presses and releases them in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Modifier {
    Ctrl,
    Shift,
    Alt,
    AltGr,
}

impl Modifier {
    /// Every modifier, in declaration order.
    pub const ALL: [Modifier; 4] = [
        Modifier::Ctrl,
        Modifier::Shift,
        Modifier::Alt,
        Modifier::AltGr,
    ];

    /// The key pressed to hold this modifier while typing.
    pub fn key_code(self) -> KeyCode {
        match self {
            Modifier::Ctrl => KeyCode::CONTROL,
            Modifier::Shift => KeyCode::SHIFT,
            Modifier::Alt => KeyCode::ALT,
            Modifier::AltGr => KeyCode::RIGHT_ALT,
        }
    }

    /// This modifier's bit in a canonical [`ModifierMask`].
    pub fn mask_bit(self) -> ModifierMask {
        match self {
            Modifier::Ctrl => ModifierMask::LEFT_CTRL,
            Modifier::Shift => ModifierMask::LEFT_SHIFT,
            Modifier::Alt => ModifierMask::LEFT_ALT,
            Modifier::AltGr => ModifierMask::RIGHT_ALT,
        }
    }
}

/// An immutable set of held modifiers.
///
/// Membership is total: any modifier not given at construction is not held.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ModifierSet {
    mask: ModifierMask,
}

impl ModifierSet {
    /// Builds a set holding exactly the given modifiers.  Duplicates and
    /// argument order do not matter.
    pub fn new(modifiers: &[Modifier]) -> Self {
        let mask = modifiers
            .iter()
            .fold(ModifierMask::NONE, |acc, m| acc | m.mask_bit());
        Self { mask }
    }

    /// The set with no modifiers held.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Rebuilds a set from an observed platform mask.
    ///
    /// Either Ctrl or Shift bit counts as held; Meta and unknown bits are
    /// dropped because no [`Modifier`] represents them.
    pub fn from_mask(mask: ModifierMask) -> Self {
        let canonical = mask.canonical();
        let mask = Modifier::ALL
            .iter()
            .filter(|m| canonical.intersects(m.mask_bit()))
            .fold(ModifierMask::NONE, |acc, m| acc | m.mask_bit());
        Self { mask }
    }

    /// Returns `true` if `modifier` is held in this set.
    pub fn held(&self, modifier: Modifier) -> bool {
        self.mask.intersects(modifier.mask_bit())
    }

    /// Returns `true` if no modifier is held.
    pub fn is_empty(&self) -> bool {
        self.mask.is_empty()
    }

    /// ORs together the platform bit of every held modifier.
    pub fn to_platform_mask(&self) -> ModifierMask {
        self.mask
    }

    /// Held modifiers in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = Modifier> + '_ {
        Modifier::ALL.into_iter().filter(move |m| self.held(*m))
    }
}

impl From<&[Modifier]> for ModifierSet {
    fn from(modifiers: &[Modifier]) -> Self {
        ModifierSet::new(modifiers)
    }
}

impl<const N: usize> From<[Modifier; N]> for ModifierSet {
    fn from(modifiers: [Modifier; N]) -> Self {
        ModifierSet::new(&modifiers)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
