//! In-memory input sink that records every injected event.
//!
//! Events land in a single ordered log, so a test can check interleaving
//! (modifier down, key down, key up, modifier up) and not just counts.
//! Moves update the tracked pointer, which is what
//! [`cursor_position`](InputSink::cursor_position) reports.
//!
//! # `failing`
//!
//! A sink built with [`RecordingInputSink::failing`] rejects every call with
//! [`SinkError::Platform`] and records nothing.

use std::sync::{Mutex, PoisonError};

use automaton_core::{ClickType, KeyCode};

use crate::application::input_sink::{InputSink, SinkError};

/// One injected event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InjectedEvent {
    MoveCursor { x: i32, y: i32 },
    PressButton(u32),
    ReleaseButton(u32),
    PressKey(KeyCode),
    ReleaseKey(KeyCode),
}

/// Records injections instead of performing them.
#[derive(Debug, Default)]
pub struct RecordingInputSink {
    events: Mutex<Vec<InjectedEvent>>,
    cursor: Mutex<(i32, i32)>,
    should_fail: bool,
}

impl RecordingInputSink {
    /// Creates a sink with the pointer at the origin.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cursor_at(x: i32, y: i32) -> Self {
        Self {
            cursor: Mutex::new((x, y)),
            ..Self::default()
        }
    }

    /// Creates a sink whose every call fails.
    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::default()
        }
    }

    /// Snapshot of every event recorded so far, oldest first.
    pub fn events(&self) -> Vec<InjectedEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Every pointer position injected so far, oldest first.
    pub fn moves(&self) -> Vec<(i32, i32)> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                InjectedEvent::MoveCursor { x, y } => Some((x, y)),
                _ => None,
            })
            .collect()
    }

    /// Keys that were pressed, in press order.
    pub fn pressed_keys(&self) -> Vec<KeyCode> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                InjectedEvent::PressKey(code) => Some(code),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    fn record(&self, event: InjectedEvent) -> Result<(), SinkError> {
        if self.should_fail {
            return Err(SinkError::Platform("recording sink set to fail".into()));
        }
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
        Ok(())
    }
}

fn check_key(code: KeyCode) -> Result<(), SinkError> {
    if code.is_valid() {
        Ok(())
    } else {
        Err(SinkError::InvalidKeyCode(code))
    }
}

fn check_button(button_mask: u32) -> Result<(), SinkError> {
    match ClickType::from_button_mask(button_mask) {
        Some(_) => Ok(()),
        None => Err(SinkError::InvalidButton(button_mask)),
    }
}

impl InputSink for RecordingInputSink {
    fn move_cursor(&self, x: i32, y: i32) -> Result<(), SinkError> {
        self.record(InjectedEvent::MoveCursor { x, y })?;
        *self.cursor.lock().unwrap_or_else(PoisonError::into_inner) = (x, y);
        Ok(())
    }

    fn press_button(&self, button_mask: u32) -> Result<(), SinkError> {
        check_button(button_mask)?;
        self.record(InjectedEvent::PressButton(button_mask))
    }

    fn release_button(&self, button_mask: u32) -> Result<(), SinkError> {
        check_button(button_mask)?;
        self.record(InjectedEvent::ReleaseButton(button_mask))
    }

    fn press_key(&self, code: KeyCode) -> Result<(), SinkError> {
        check_key(code)?;
        self.record(InjectedEvent::PressKey(code))
    }

    fn release_key(&self, code: KeyCode) -> Result<(), SinkError> {
        check_key(code)?;
        self.record(InjectedEvent::ReleaseKey(code))
    }

    fn cursor_position(&self) -> Result<(i32, i32), SinkError> {
        if self.should_fail {
            return Err(SinkError::Platform("recording sink set to fail".into()));
        }
        Ok(*self.cursor.lock().unwrap_or_else(PoisonError::into_inner))
    }
}
