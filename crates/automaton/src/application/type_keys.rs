//! KeyTypist: keystrokes, characters, modifier wrapping, and strings.
//!
//! Characters are turned into keys by a [`KeyResolver`] and struck through
//! the shared [`InputSink`].  Failures are local: an unmapped character or a
//! key the sink rejects makes that one operation report `false`, and
//! [`KeyTypist::type_string`] keeps going and counts the failures.
//!
//! # Modifier wrapping
//!
//! [`KeyTypist::type_char_with`] presses every held modifier in declaration
//! order (Ctrl, Shift, Alt, AltGr), types the character, then releases the
//! same modifiers in the same order.  Only the character's own keystroke
//! decides the result; a modifier the sink refuses is logged and ignored.

use std::sync::Arc;

use automaton_core::{KeyCode, KeyResolver, ModifierSet};
use tracing::{debug, warn};

use super::input_sink::InputSink;

/// Types keys and text through an optional input sink.
pub struct KeyTypist {
    sink: Option<Arc<dyn InputSink>>,
    resolver: Arc<dyn KeyResolver>,
}

impl KeyTypist {
    pub fn new(sink: Option<Arc<dyn InputSink>>, resolver: Arc<dyn KeyResolver>) -> Self {
        Self { sink, resolver }
    }

    /// Presses and releases `code`.
    ///
    /// Returns `false` if there is no sink or the sink rejects the key.
    pub fn type_virtual_key(&self, code: KeyCode) -> bool {
        let Some(sink) = &self.sink else {
            debug!("type_virtual_key({code}) skipped: no input sink available");
            return false;
        };
        strike(sink.as_ref(), code)
    }

    /// Types one character by resolving it to a key first.
    ///
    /// An unmapped character returns `false` without touching the sink.
    pub fn type_char(&self, c: char) -> bool {
        match self.resolver.resolve(c) {
            Some(code) => self.type_virtual_key(code),
            None => {
                debug!(?c, "no key mapping for character");
                false
            }
        }
    }

    /// Types one character with `modifiers` held around it.
    pub fn type_char_with(&self, c: char, modifiers: &ModifierSet) -> bool {
        let Some(sink) = &self.sink else {
            debug!(?c, "type_char_with skipped: no input sink available");
            return false;
        };

        for modifier in modifiers.iter() {
            if let Err(e) = sink.press_key(modifier.key_code()) {
                warn!("failed to press modifier {modifier:?}: {e}");
            }
        }

        let typed = self.type_char(c);

        for modifier in modifiers.iter() {
            if let Err(e) = sink.release_key(modifier.key_code()) {
                warn!("failed to release modifier {modifier:?}: {e}");
            }
        }

        typed
    }

    /// Types `s` left to right and returns how many characters failed.
    ///
    /// Best effort: a failing character does not stop the rest.
    pub fn type_string(&self, s: &str) -> usize {
        let mut failed = 0;
        for c in s.chars() {
            if !self.type_char(c) {
                failed += 1;
            }
        }
        if failed > 0 {
            debug!(failed, total = s.chars().count(), "string typed with failures");
        }
        failed
    }
}

fn strike(sink: &dyn InputSink, code: KeyCode) -> bool {
    if let Err(e) = sink.press_key(code) {
        debug!("key press {code} rejected: {e}");
        return false;
    }
    if let Err(e) = sink.release_key(code) {
        debug!("key release {code} rejected: {e}");
        return false;
    }
    true
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::input_sink::SinkError;
    use automaton_core::{Modifier, UsLayoutResolver};
    use mockall::predicate::eq;
    use mockall::Sequence;

    mockall::mock! {
        Sink {}

        impl InputSink for Sink {
            fn move_cursor(&self, x: i32, y: i32) -> Result<(), SinkError>;
            fn press_button(&self, button_mask: u32) -> Result<(), SinkError>;
            fn release_button(&self, button_mask: u32) -> Result<(), SinkError>;
            fn press_key(&self, code: KeyCode) -> Result<(), SinkError>;
            fn release_key(&self, code: KeyCode) -> Result<(), SinkError>;
            fn cursor_position(&self) -> Result<(i32, i32), SinkError>;
        }
    }

    /// Resolves only `'a'`; everything else is unmapped.
    struct OnlyA;

    impl KeyResolver for OnlyA {
        fn resolve(&self, c: char) -> Option<KeyCode> {
            (c == 'a').then_some(KeyCode::A)
        }
    }

    fn typist(sink: MockSink) -> KeyTypist {
        KeyTypist::new(
            Some(Arc::new(sink) as Arc<dyn InputSink>),
            Arc::new(UsLayoutResolver::new()),
        )
    }

    fn expect_press(sink: &mut MockSink, seq: &mut Sequence, code: KeyCode) {
        sink.expect_press_key()
            .with(eq(code))
            .times(1)
            .in_sequence(seq)
            .returning(|_| Ok(()));
    }

    fn expect_release(sink: &mut MockSink, seq: &mut Sequence, code: KeyCode) {
        sink.expect_release_key()
            .with(eq(code))
            .times(1)
            .in_sequence(seq)
            .returning(|_| Ok(()));
    }

    // ── type_virtual_key ──────────────────────────────────────────────────────

    #[test]
    fn test_type_virtual_key_presses_then_releases() {
        // Arrange
        let mut sink = MockSink::new();
        let mut seq = Sequence::new();
        expect_press(&mut sink, &mut seq, KeyCode::ENTER);
        expect_release(&mut sink, &mut seq, KeyCode::ENTER);

        // Act / Assert
        assert!(typist(sink).type_virtual_key(KeyCode::ENTER));
    }

    #[test]
    fn test_type_virtual_key_reports_rejected_code_as_false() {
        // Arrange
        let mut sink = MockSink::new();
        sink.expect_press_key()
            .returning(|code| Err(SinkError::InvalidKeyCode(code)));
        sink.expect_release_key().never();

        // Act / Assert
        assert!(!typist(sink).type_virtual_key(KeyCode(0x00)));
    }

    #[test]
    fn test_no_sink_reports_false_everywhere() {
        let typist = KeyTypist::new(None, Arc::new(UsLayoutResolver::new()));
        assert!(!typist.type_virtual_key(KeyCode::A));
        assert!(!typist.type_char('a'));
        assert!(!typist.type_char_with('a', &ModifierSet::new(&[Modifier::Shift])));
        assert_eq!(typist.type_string("abc"), 3);
    }

    // ── type_char / type_char_with ────────────────────────────────────────────

    #[test]
    fn test_unmapped_char_does_not_touch_the_sink() {
        // Arrange: no expectations, so any sink call panics
        let sink = MockSink::new();

        // Act / Assert
        assert!(!typist(sink).type_char('€'));
    }

    #[test]
    fn test_modifiers_wrap_keystroke_in_declaration_order() {
        // Arrange: Shift and Ctrl given out of order
        let mut sink = MockSink::new();
        let mut seq = Sequence::new();
        expect_press(&mut sink, &mut seq, KeyCode::CONTROL);
        expect_press(&mut sink, &mut seq, KeyCode::SHIFT);
        expect_press(&mut sink, &mut seq, KeyCode::K);
        expect_release(&mut sink, &mut seq, KeyCode::K);
        expect_release(&mut sink, &mut seq, KeyCode::CONTROL);
        expect_release(&mut sink, &mut seq, KeyCode::SHIFT);
        let modifiers = ModifierSet::new(&[Modifier::Shift, Modifier::Ctrl]);

        // Act / Assert
        assert!(typist(sink).type_char_with('k', &modifiers));
    }

    #[test]
    fn test_modifier_failure_does_not_change_result() {
        // Arrange: the AltGr key is refused, the character succeeds
        let mut sink = MockSink::new();
        sink.expect_press_key().returning(|code| {
            if code == KeyCode::RIGHT_ALT {
                Err(SinkError::Platform("refused".to_string()))
            } else {
                Ok(())
            }
        });
        sink.expect_release_key().returning(|_| Ok(()));
        let modifiers = ModifierSet::new(&[Modifier::AltGr]);

        // Act / Assert
        assert!(typist(sink).type_char_with('e', &modifiers));
    }

    #[test]
    fn test_modifiers_are_released_even_when_char_is_unmapped() {
        // Arrange
        let mut sink = MockSink::new();
        let mut seq = Sequence::new();
        expect_press(&mut sink, &mut seq, KeyCode::SHIFT);
        expect_release(&mut sink, &mut seq, KeyCode::SHIFT);

        // Act
        let ok = typist(sink).type_char_with('!', &ModifierSet::new(&[Modifier::Shift]));

        // Assert
        assert!(!ok);
    }

    // ── type_string ───────────────────────────────────────────────────────────

    #[test]
    fn test_empty_string_types_nothing() {
        let sink = MockSink::new();
        assert_eq!(typist(sink).type_string(""), 0);
    }

    #[test]
    fn test_string_counts_failures_and_keeps_going() {
        // Arrange: 'a' maps, 'b' does not; 'a' must still be struck
        let mut sink = MockSink::new();
        let mut seq = Sequence::new();
        expect_press(&mut sink, &mut seq, KeyCode::A);
        expect_release(&mut sink, &mut seq, KeyCode::A);
        let typist = KeyTypist::new(Some(Arc::new(sink) as Arc<dyn InputSink>), Arc::new(OnlyA));

        // Act
        let failed = typist.type_string("ab");

        // Assert
        assert_eq!(failed, 1);
    }

    #[test]
    fn test_failure_early_in_string_does_not_abort() {
        // Arrange: 'b' fails first, then 'a' is typed
        let mut sink = MockSink::new();
        let mut seq = Sequence::new();
        expect_press(&mut sink, &mut seq, KeyCode::A);
        expect_release(&mut sink, &mut seq, KeyCode::A);
        let typist = KeyTypist::new(Some(Arc::new(sink) as Arc<dyn InputSink>), Arc::new(OnlyA));

        // Act / Assert
        assert_eq!(typist.type_string("ba"), 1);
    }
}
