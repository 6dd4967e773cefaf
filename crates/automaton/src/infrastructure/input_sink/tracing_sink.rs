//! Dry-run input sink that logs instead of injecting.
//!
//! Used by the command-line driver so a script can be rehearsed without
//! taking over the desktop.  Run with `RUST_LOG=automaton=debug` to see every
//! event; pointer moves are logged at `trace` because animations emit one
//! per millisecond.

use std::sync::{Mutex, PoisonError};

use automaton_core::{ClickType, KeyCode};
use tracing::{debug, trace};

use crate::application::input_sink::{InputSink, SinkError};

/// Logs each injection and tracks a virtual pointer.
#[derive(Debug, Default)]
pub struct TracingInputSink {
    cursor: Mutex<(i32, i32)>,
}

impl TracingInputSink {
    pub fn new(start: (i32, i32)) -> Self {
        Self {
            cursor: Mutex::new(start),
        }
    }
}

fn button_name(button_mask: u32) -> Result<ClickType, SinkError> {
    ClickType::from_button_mask(button_mask).ok_or(SinkError::InvalidButton(button_mask))
}

impl InputSink for TracingInputSink {
    fn move_cursor(&self, x: i32, y: i32) -> Result<(), SinkError> {
        trace!(x, y, "move cursor");
        *self.cursor.lock().unwrap_or_else(PoisonError::into_inner) = (x, y);
        Ok(())
    }

    fn press_button(&self, button_mask: u32) -> Result<(), SinkError> {
        let button = button_name(button_mask)?;
        debug!(?button, "button down");
        Ok(())
    }

    fn release_button(&self, button_mask: u32) -> Result<(), SinkError> {
        let button = button_name(button_mask)?;
        debug!(?button, "button up");
        Ok(())
    }

    fn press_key(&self, code: KeyCode) -> Result<(), SinkError> {
        if !code.is_valid() {
            return Err(SinkError::InvalidKeyCode(code));
        }
        debug!("key down {code}");
        Ok(())
    }

    fn release_key(&self, code: KeyCode) -> Result<(), SinkError> {
        if !code.is_valid() {
            return Err(SinkError::InvalidKeyCode(code));
        }
        debug!("key up {code}");
        Ok(())
    }

    fn cursor_position(&self) -> Result<(i32, i32), SinkError> {
        Ok(*self.cursor.lock().unwrap_or_else(PoisonError::into_inner))
    }
}
