//! Channel-fed global key listener with a dedicated dispatch thread.
//!
//! ```text
//! producer ──KeyPress──► mpsc ──► "automaton-hotkeys" thread ──► callback
//! ```
//!
//! The dispatch thread folds the reported modifier mask to its canonical
//! form and fires the binding registered for exactly that `(code, mask)`
//! pair, if any.  A panicking callback is logged and does not take the
//! thread down.

use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};

use automaton_core::{KeyCode, ModifierMask, ModifierSet};
use tracing::{debug, info, warn};

use crate::application::hotkeys::{GlobalKeyListener, HotkeyCallback, ListenerError};

/// A key going down while `modifier_mask` is held.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub code: KeyCode,
    pub modifier_mask: ModifierMask,
}

impl KeyPress {
    /// The held modifiers as a [`ModifierSet`].  Meta has no member in the
    /// set, so matching still goes through the canonical mask.
    pub fn modifiers(&self) -> ModifierSet {
        ModifierSet::from_mask(self.modifier_mask)
    }
}

enum DispatchMessage {
    Press(KeyPress),
    Shutdown,
}

type Bindings = Arc<Mutex<HashMap<(KeyCode, ModifierMask), HotkeyCallback>>>;

/// Producer handle for posting key presses to a [`ChannelKeyListener`].
#[derive(Clone)]
pub struct KeyEventFeed {
    sender: Sender<DispatchMessage>,
}

impl KeyEventFeed {
    /// Posts a key press.  Returns `false` once the listener has stopped.
    pub fn press(&self, code: KeyCode, modifier_mask: ModifierMask) -> bool {
        self.sender
            .send(DispatchMessage::Press(KeyPress {
                code,
                modifier_mask,
            }))
            .is_ok()
    }
}

/// Global key listener driven by an in-process channel.
pub struct ChannelKeyListener {
    bindings: Bindings,
    sender: Mutex<Option<Sender<DispatchMessage>>>,
    worker: Mutex<Option<JoinHandle<()>>>,
    running: Arc<AtomicBool>,
}

impl ChannelKeyListener {
    /// Spawns the dispatch thread.
    ///
    /// # Errors
    ///
    /// [`ListenerError::Unavailable`] if the thread cannot be spawned.
    pub fn start() -> Result<Self, ListenerError> {
        let (tx, rx) = mpsc::channel();
        let bindings: Bindings = Arc::new(Mutex::new(HashMap::new()));
        let running = Arc::new(AtomicBool::new(true));

        let worker_bindings = Arc::clone(&bindings);
        let worker_running = Arc::clone(&running);
        let worker = thread::Builder::new()
            .name("automaton-hotkeys".to_string())
            .spawn(move || {
                dispatch_loop(rx, worker_bindings);
                worker_running.store(false, Ordering::SeqCst);
            })
            .map_err(|e| ListenerError::Unavailable(e.to_string()))?;

        info!("hotkey dispatch thread started");
        Ok(Self {
            bindings,
            sender: Mutex::new(Some(tx)),
            worker: Mutex::new(Some(worker)),
            running,
        })
    }

    /// Returns a producer handle for this listener.
    ///
    /// # Errors
    ///
    /// [`ListenerError::AlreadyStopped`] after [`stop`](GlobalKeyListener::stop).
    pub fn feed(&self) -> Result<KeyEventFeed, ListenerError> {
        self.sender
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|sender| KeyEventFeed {
                sender: sender.clone(),
            })
            .ok_or(ListenerError::AlreadyStopped)
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Number of live bindings.
    pub fn binding_count(&self) -> usize {
        self.bindings
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

fn dispatch_loop(rx: Receiver<DispatchMessage>, bindings: Bindings) {
    while let Ok(message) = rx.recv() {
        let press = match message {
            DispatchMessage::Press(press) => press,
            DispatchMessage::Shutdown => break,
        };

        let key = (press.code, press.modifier_mask.canonical());
        // Clone out so a callback may (un)register without deadlocking.
        let callback = bindings
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
            .cloned();

        let Some(callback) = callback else {
            continue;
        };
        debug!(held = ?press.modifiers(), "hotkey {} mask={:#04x} fired", key.0, key.1 .0);
        if catch_unwind(AssertUnwindSafe(|| callback())).is_err() {
            warn!("hotkey callback for {} panicked", key.0);
        }
    }
    debug!("hotkey dispatch loop exited");
}

impl GlobalKeyListener for ChannelKeyListener {
    fn register(
        &self,
        code: KeyCode,
        mask: ModifierMask,
        callback: HotkeyCallback,
    ) -> Result<(), ListenerError> {
        if !self.is_running() {
            return Err(ListenerError::AlreadyStopped);
        }
        self.bindings
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert((code, mask.canonical()), callback);
        Ok(())
    }

    fn unregister(&self, code: KeyCode, mask: ModifierMask) -> Result<(), ListenerError> {
        self.bindings
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&(code, mask.canonical()));
        Ok(())
    }

    fn reset(&self) {
        self.bindings
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    fn stop(&self) {
        let sender = self
            .sender
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(sender) = sender {
            // Feeds may still hold senders; the explicit message ends the loop.
            let _ = sender.send(DispatchMessage::Shutdown);
        }

        let worker = self
            .worker
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(worker) = worker {
            // A callback stopping its own listener cannot join itself.
            if worker.thread().id() == thread::current().id() {
                return;
            }
            if worker.join().is_err() {
                warn!("hotkey dispatch thread panicked");
            }
            info!("hotkey dispatch thread stopped");
        }
    }
}

impl Drop for ChannelKeyListener {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc::RecvTimeoutError;
    use std::time::Duration;

    const WAIT: Duration = Duration::from_millis(500);
    const QUIET: Duration = Duration::from_millis(100);

    /// Callback that reports each call on a channel.
    fn signal() -> (Receiver<()>, HotkeyCallback) {
        let (tx, rx) = mpsc::channel();
        let tx = Mutex::new(tx);
        let cb: HotkeyCallback = Arc::new(move || {
            let _ = tx.lock().unwrap().send(());
        });
        (rx, cb)
    }

    #[test]
    fn test_plain_binding_fires_only_without_modifiers() {
        // Arrange
        let listener = ChannelKeyListener::start().unwrap();
        let (fired, cb) = signal();
        listener.register(KeyCode::K, ModifierMask::NONE, cb).unwrap();
        let feed = listener.feed().unwrap();

        // Act: Shift+K first, then plain K
        assert!(feed.press(KeyCode::K, ModifierMask::LEFT_SHIFT));
        assert!(feed.press(KeyCode::K, ModifierMask::NONE));

        // Assert: exactly one call
        assert!(fired.recv_timeout(WAIT).is_ok());
        assert_eq!(fired.recv_timeout(QUIET), Err(RecvTimeoutError::Timeout));
    }

    #[test]
    fn test_meta_blocks_plain_binding() {
        // Arrange
        let listener = ChannelKeyListener::start().unwrap();
        let (fired, cb) = signal();
        listener.register(KeyCode::K, ModifierMask::NONE, cb).unwrap();
        let feed = listener.feed().unwrap();

        // Act: RightCtrl+K and Meta+K, then plain K
        feed.press(KeyCode::K, ModifierMask::RIGHT_CTRL);
        feed.press(KeyCode::K, ModifierMask::LEFT_META);
        feed.press(KeyCode::K, ModifierMask::NONE);
        listener.stop();

        // Assert: stop joins the dispatch thread, so every press was handled
        assert_eq!(fired.try_iter().count(), 1);
    }

    #[test]
    fn test_key_press_reports_held_modifiers() {
        use automaton_core::Modifier;

        let press = KeyPress {
            code: KeyCode::K,
            modifier_mask: ModifierMask::RIGHT_CTRL | ModifierMask::RIGHT_META,
        };

        let held: Vec<Modifier> = press.modifiers().iter().collect();
        assert_eq!(held, vec![Modifier::Ctrl]);
    }

    #[test]
    fn test_right_side_modifier_matches_left_binding() {
        // Arrange
        let listener = ChannelKeyListener::start().unwrap();
        let (fired, cb) = signal();
        listener
            .register(KeyCode::S, ModifierMask::LEFT_CTRL, cb)
            .unwrap();

        // Act
        listener
            .feed()
            .unwrap()
            .press(KeyCode::S, ModifierMask::RIGHT_CTRL);

        // Assert
        assert!(fired.recv_timeout(WAIT).is_ok());
    }

    #[test]
    fn test_altgr_does_not_match_alt() {
        let listener = ChannelKeyListener::start().unwrap();
        let (fired, cb) = signal();
        listener.register(KeyCode::E, ModifierMask::LEFT_ALT, cb).unwrap();

        listener
            .feed()
            .unwrap()
            .press(KeyCode::E, ModifierMask::RIGHT_ALT);

        assert_eq!(fired.recv_timeout(QUIET), Err(RecvTimeoutError::Timeout));
    }

    #[test]
    fn test_unregister_and_reset_remove_bindings() {
        // Arrange
        let listener = ChannelKeyListener::start().unwrap();
        let (_, cb) = signal();
        listener.register(KeyCode::A, ModifierMask::NONE, Arc::clone(&cb)).unwrap();
        listener.register(KeyCode::B, ModifierMask::NONE, cb).unwrap();

        // Act / Assert
        listener.unregister(KeyCode::A, ModifierMask::NONE).unwrap();
        assert_eq!(listener.binding_count(), 1);
        listener.reset();
        assert_eq!(listener.binding_count(), 0);
    }

    #[test]
    fn test_panicking_callback_does_not_stop_dispatch() {
        // Arrange
        let listener = ChannelKeyListener::start().unwrap();
        listener
            .register(KeyCode::F1, ModifierMask::NONE, Arc::new(|| panic!("boom")))
            .unwrap();
        let (fired, cb) = signal();
        listener.register(KeyCode::F2, ModifierMask::NONE, cb).unwrap();
        let feed = listener.feed().unwrap();

        // Act
        feed.press(KeyCode::F1, ModifierMask::NONE);
        feed.press(KeyCode::F2, ModifierMask::NONE);

        // Assert
        assert!(fired.recv_timeout(WAIT).is_ok());
        assert!(listener.is_running());
    }

    #[test]
    fn test_stop_joins_thread_and_closes_feeds() {
        // Arrange
        let listener = ChannelKeyListener::start().unwrap();
        let feed = listener.feed().unwrap();

        // Act
        listener.stop();
        listener.stop();

        // Assert
        assert!(!listener.is_running());
        assert!(!feed.press(KeyCode::A, ModifierMask::NONE));
        assert!(matches!(listener.feed(), Err(ListenerError::AlreadyStopped)));
        assert!(matches!(
            listener.register(KeyCode::A, ModifierMask::NONE, Arc::new(|| {})),
            Err(ListenerError::AlreadyStopped)
        ));
    }
}
