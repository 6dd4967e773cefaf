//! Mouse button kinds for clicks.

use serde::{Deserialize, Serialize};

/// The button pressed and released by a click.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClickType {
    Left,
    Right,
    Middle,
}

impl ClickType {
    pub const LEFT_MASK: u32 = 1 << 0;
    pub const RIGHT_MASK: u32 = 1 << 1;
    pub const MIDDLE_MASK: u32 = 1 << 2;

    /// Platform button mask passed to the input sink.
    pub fn button_mask(self) -> u32 {
        match self {
            ClickType::Left => Self::LEFT_MASK,
            ClickType::Right => Self::RIGHT_MASK,
            ClickType::Middle => Self::MIDDLE_MASK,
        }
    }

    /// Inverse of [`button_mask`](Self::button_mask).  Returns `None` unless
    /// exactly one known button bit is set.
    pub fn from_button_mask(mask: u32) -> Option<ClickType> {
        match mask {
            Self::LEFT_MASK => Some(ClickType::Left),
            Self::RIGHT_MASK => Some(ClickType::Right),
            Self::MIDDLE_MASK => Some(ClickType::Middle),
            _ => None,
        }
    }
}
