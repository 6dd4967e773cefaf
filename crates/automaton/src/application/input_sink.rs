//! The input sink seam: where synthetic pointer and keyboard events leave
//! the process.
//!
//! The motion engine, the typist and the click operation all inject through
//! an [`InputSink`] trait object.  Platform implementations live in the
//! infrastructure layer.  The sink is optional everywhere it is consumed: a
//! headless or sandboxed session simply has no sink, and every operation
//! that needs one reports `false` instead of failing loudly.
//!
//! # Sharing
//!
//! One sink is shared (`Arc<dyn InputSink>`) by every component.  It does no
//! serialisation of its own; two callers injecting at once interleave and
//! the last write wins.

use automaton_core::KeyCode;
use thiserror::Error;

/// Error type for input injection.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("platform error: {0}")]
    Platform(String),
    #[error("invalid key code: {0}")]
    InvalidKeyCode(KeyCode),
    #[error("invalid button mask: {0:#x}")]
    InvalidButton(u32),
    #[error("input sink not initialized")]
    NotInitialized,
}

/// Platform-agnostic input injection.
pub trait InputSink: Send + Sync {
    /// Moves the pointer to an absolute screen position.
    fn move_cursor(&self, x: i32, y: i32) -> Result<(), SinkError>;

    /// Presses the mouse button(s) named by `button_mask`.
    fn press_button(&self, button_mask: u32) -> Result<(), SinkError>;

    /// Releases the mouse button(s) named by `button_mask`.
    fn release_button(&self, button_mask: u32) -> Result<(), SinkError>;

    /// Presses a key.  Fails with [`SinkError::InvalidKeyCode`] for codes the
    /// platform cannot inject.
    fn press_key(&self, code: KeyCode) -> Result<(), SinkError>;

    /// Releases a key.
    fn release_key(&self, code: KeyCode) -> Result<(), SinkError>;

    /// Current pointer position in absolute screen coordinates.
    fn cursor_position(&self) -> Result<(i32, i32), SinkError>;
}
