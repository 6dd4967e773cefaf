//! The [`Automaton`] façade.
//!
//! One value owns every capability: the optional input sink, the key
//! resolver, the hotkey registry with its optional listener, and the screen
//! metrics sampled at construction.  Each operation delegates to the
//! matching application component and reports success as a `bool` (or a
//! failure count for strings); nothing here returns an error.
//!
//! Dropping an `Automaton` closes it.

use std::sync::Arc;

use automaton_core::{ClickType, KeyCode, KeyResolver, ModifierSet, MotionSettings, ScreenMetrics};
use tracing::{debug, info, warn};

use crate::application::hotkeys::{GlobalKeyListener, HotkeyRegistry};
use crate::application::input_sink::InputSink;
use crate::application::move_pointer::{MotionEngine, MoveHandle};
use crate::application::type_keys::KeyTypist;

/// Mouse and keyboard automation over optional platform capabilities.
pub struct Automaton {
    sink: Option<Arc<dyn InputSink>>,
    engine: MotionEngine,
    typist: KeyTypist,
    hotkeys: HotkeyRegistry,
}

impl Automaton {
    /// Builds the façade.  A `None` capability is not an error: operations
    /// that need it report `false`.
    pub fn new(
        sink: Option<Arc<dyn InputSink>>,
        listener: Option<Arc<dyn GlobalKeyListener>>,
        resolver: Arc<dyn KeyResolver>,
        metrics: ScreenMetrics,
        settings: MotionSettings,
    ) -> Self {
        if sink.is_none() {
            warn!("no input sink available; pointer and keyboard operations will fail");
        }
        if listener.is_none() {
            warn!("no global key listener available; hotkeys will fail");
        }
        info!(
            width = metrics.width(),
            height = metrics.height(),
            "automaton ready"
        );

        Self {
            engine: MotionEngine::new(sink.clone(), metrics, settings),
            typist: KeyTypist::new(sink.clone(), resolver),
            hotkeys: HotkeyRegistry::new(listener),
            sink,
        }
    }

    // ── Pointer ───────────────────────────────────────────────────────────────

    /// Moves the pointer to `(x, y)` at `speed` screen diagonals per second.
    /// A non-positive speed jumps instantly.
    pub fn move_to(&self, x: i32, y: i32, speed: f64) -> MoveHandle {
        self.engine.move_to(x, y, speed)
    }

    /// Presses and releases `button` at the current pointer position.
    pub fn click(&self, button: ClickType) -> bool {
        let Some(sink) = &self.sink else {
            debug!(?button, "click skipped: no input sink available");
            return false;
        };
        let mask = button.button_mask();
        if let Err(e) = sink.press_button(mask) {
            warn!(?button, "button press failed: {e}");
            return false;
        }
        if let Err(e) = sink.release_button(mask) {
            warn!(?button, "button release failed: {e}");
            return false;
        }
        true
    }

    /// Current pointer position, if a sink is available and can report it.
    pub fn mouse_location(&self) -> Option<(i32, i32)> {
        let sink = self.sink.as_ref()?;
        match sink.cursor_position() {
            Ok(pos) => Some(pos),
            Err(e) => {
                debug!("pointer position unavailable: {e}");
                None
            }
        }
    }

    // ── Keyboard ──────────────────────────────────────────────────────────────

    pub fn type_virtual_key(&self, code: KeyCode) -> bool {
        self.typist.type_virtual_key(code)
    }

    pub fn type_char(&self, c: char) -> bool {
        self.typist.type_char(c)
    }

    pub fn type_char_with(&self, c: char, modifiers: &ModifierSet) -> bool {
        self.typist.type_char_with(c, modifiers)
    }

    /// Types `s` and returns the number of characters that failed.
    pub fn type_string(&self, s: &str) -> usize {
        self.typist.type_string(s)
    }

    // ── Hotkeys ───────────────────────────────────────────────────────────────

    /// Binds `callback` to `code` with `modifiers` held.  The callback runs on
    /// the listener's dispatch thread.
    pub fn register_hotkey<F>(&self, code: KeyCode, modifiers: &ModifierSet, callback: F) -> bool
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.hotkeys.register(code, modifiers, callback)
    }

    /// Binds `callback` to `code` pressed with no modifiers held.
    pub fn register_plain_hotkey<F>(&self, code: KeyCode, callback: F) -> bool
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.hotkeys.register_plain(code, callback)
    }

    pub fn unregister_hotkey(&self, code: KeyCode, modifiers: &ModifierSet) -> bool {
        self.hotkeys.unregister(code, modifiers)
    }

    pub fn unregister_plain_hotkey(&self, code: KeyCode) -> bool {
        self.hotkeys.unregister_plain(code)
    }

    pub fn hotkeys(&self) -> &HotkeyRegistry {
        &self.hotkeys
    }

    // ── Screen ────────────────────────────────────────────────────────────────

    pub fn width(&self) -> u32 {
        self.engine.metrics().width()
    }

    pub fn height(&self) -> u32 {
        self.engine.metrics().height()
    }

    pub fn diagonal(&self) -> f64 {
        self.engine.metrics().diagonal()
    }

    // ── Teardown ──────────────────────────────────────────────────────────────

    /// Drops all hotkey bindings and releases the listener.  Idempotent.
    pub fn close(&self) {
        self.hotkeys.close();
    }
}

impl Drop for Automaton {
    fn drop(&mut self) {
        self.close();
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::input_sink::{InjectedEvent, RecordingInputSink};
    use automaton_core::UsLayoutResolver;

    fn automaton_with(sink: Arc<RecordingInputSink>) -> Automaton {
        Automaton::new(
            Some(sink as Arc<dyn InputSink>),
            None,
            Arc::new(UsLayoutResolver::new()),
            ScreenMetrics::new(1920, 1080),
            MotionSettings::default(),
        )
    }

    fn headless() -> Automaton {
        Automaton::new(
            None,
            None,
            Arc::new(UsLayoutResolver::new()),
            ScreenMetrics::new(1920, 1080),
            MotionSettings::default(),
        )
    }

    #[test]
    fn test_click_presses_then_releases_button() {
        // Arrange
        let sink = Arc::new(RecordingInputSink::new());
        let automaton = automaton_with(Arc::clone(&sink));

        // Act
        let ok = automaton.click(ClickType::Right);

        // Assert
        assert!(ok);
        assert_eq!(
            sink.events(),
            vec![
                InjectedEvent::PressButton(ClickType::RIGHT_MASK),
                InjectedEvent::ReleaseButton(ClickType::RIGHT_MASK),
            ]
        );
    }

    #[test]
    fn test_headless_automaton_reports_false() {
        let automaton = headless();
        assert!(!automaton.click(ClickType::Left));
        assert!(!automaton.move_to(10, 10, 0.0).join());
        assert!(!automaton.type_char('a'));
        assert!(!automaton.register_plain_hotkey(KeyCode::F1, || {}));
        assert_eq!(automaton.mouse_location(), None);
    }

    #[test]
    fn test_metrics_queries() {
        let automaton = headless();
        assert_eq!(automaton.width(), 1920);
        assert_eq!(automaton.height(), 1080);
        assert!((automaton.diagonal() - 2202.907).abs() < 1e-3);
    }

    #[test]
    fn test_mouse_location_reads_sink() {
        let sink = Arc::new(RecordingInputSink::with_cursor_at(42, 7));
        let automaton = automaton_with(sink);
        assert_eq!(automaton.mouse_location(), Some((42, 7)));
    }

    #[test]
    fn test_close_is_idempotent() {
        let automaton = headless();
        automaton.close();
        automaton.close();
        assert!(automaton.hotkeys().is_closed());
    }
}
