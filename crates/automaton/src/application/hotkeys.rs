//! HotkeyRegistry: (key code, modifier set) → callback bindings.
//!
//! The registry sits on top of an optional [`GlobalKeyListener`].  It keeps
//! its own record of which pairs are bound so that re-registering a pair
//! replaces the old callback, and so that [`HotkeyRegistry::close`] can tear
//! the listener down exactly once.
//!
//! # Matching
//!
//! Pairs are handed to the listener as a canonical [`ModifierMask`].  The
//! listener fires a binding only when the held modifiers match that mask
//! exactly, so a binding made with the empty set fires only while no
//! modifier is held.
//!
//! # Threading
//!
//! Callbacks run on the listener's dispatch thread, never on the thread that
//! registered them.  They must be `Send + Sync`.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use automaton_core::{KeyCode, ModifierMask, ModifierSet};
use thiserror::Error;
use tracing::{debug, info, warn};

/// A hotkey action.
pub type HotkeyCallback = Arc<dyn Fn() + Send + Sync + 'static>;

/// Error type for global key listeners.
#[derive(Debug, Error)]
pub enum ListenerError {
    #[error("key listener unavailable: {0}")]
    Unavailable(String),
    #[error("key listener already stopped")]
    AlreadyStopped,
    #[error("platform error: {0}")]
    Platform(String),
}

/// Source of system-wide key presses that can invoke bound callbacks.
pub trait GlobalKeyListener: Send + Sync {
    /// Binds `callback` to `code` pressed with exactly `mask` held.
    fn register(
        &self,
        code: KeyCode,
        mask: ModifierMask,
        callback: HotkeyCallback,
    ) -> Result<(), ListenerError>;

    /// Removes the binding for the pair.  Missing bindings are not an error.
    fn unregister(&self, code: KeyCode, mask: ModifierMask) -> Result<(), ListenerError>;

    /// Drops every binding.
    fn reset(&self);

    /// Stops dispatching and releases the listener's resources.
    fn stop(&self);
}

/// Hotkey bindings over an optional global listener.
pub struct HotkeyRegistry {
    listener: Option<Arc<dyn GlobalKeyListener>>,
    bindings: Mutex<HashSet<(KeyCode, ModifierMask)>>,
    closed: AtomicBool,
}

impl HotkeyRegistry {
    pub fn new(listener: Option<Arc<dyn GlobalKeyListener>>) -> Self {
        Self {
            listener,
            bindings: Mutex::new(HashSet::new()),
            closed: AtomicBool::new(false),
        }
    }

    /// Binds `callback` to `code` pressed with `modifiers` held.
    ///
    /// An existing binding for the same pair is replaced.  Returns `false`
    /// when no listener is available, the registry is closed, or the listener
    /// refuses the binding.
    pub fn register<F>(&self, code: KeyCode, modifiers: &ModifierSet, callback: F) -> bool
    where
        F: Fn() + Send + Sync + 'static,
    {
        let Some(listener) = self.active_listener() else {
            debug!("register({code}) skipped: no key listener available");
            return false;
        };
        let mask = modifiers.to_platform_mask();

        let mut bindings = self.bindings.lock().unwrap_or_else(PoisonError::into_inner);
        // close() may have cleared the table while we waited for the lock.
        if self.is_closed() {
            return false;
        }
        if bindings.contains(&(code, mask)) {
            debug!("replacing hotkey {code} mask={:#04x}", mask.0);
            if let Err(e) = listener.unregister(code, mask) {
                warn!("failed to drop previous hotkey {code}: {e}");
                return false;
            }
            bindings.remove(&(code, mask));
        }

        match listener.register(code, mask, Arc::new(callback)) {
            Ok(()) => {
                bindings.insert((code, mask));
                info!("registered hotkey {code} mask={:#04x}", mask.0);
                true
            }
            Err(e) => {
                warn!("failed to register hotkey {code}: {e}");
                false
            }
        }
    }

    /// [`register`](Self::register) with no modifiers held.
    pub fn register_plain<F>(&self, code: KeyCode, callback: F) -> bool
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.register(code, &ModifierSet::empty(), callback)
    }

    /// Removes the binding for the pair.  Removing a pair that was never
    /// bound succeeds.
    pub fn unregister(&self, code: KeyCode, modifiers: &ModifierSet) -> bool {
        let Some(listener) = self.active_listener() else {
            debug!("unregister({code}) skipped: no key listener available");
            return false;
        };
        let mask = modifiers.to_platform_mask();

        let mut bindings = self.bindings.lock().unwrap_or_else(PoisonError::into_inner);
        if self.is_closed() {
            return false;
        }
        match listener.unregister(code, mask) {
            Ok(()) => {
                if bindings.remove(&(code, mask)) {
                    info!("unregistered hotkey {code} mask={:#04x}", mask.0);
                }
                true
            }
            Err(e) => {
                warn!("failed to unregister hotkey {code}: {e}");
                false
            }
        }
    }

    /// [`unregister`](Self::unregister) with no modifiers held.
    pub fn unregister_plain(&self, code: KeyCode) -> bool {
        self.unregister(code, &ModifierSet::empty())
    }

    /// Clears every binding and releases the listener.  Only the first call
    /// does any work.
    pub fn close(&self) {
        let first = !self.closed.swap(true, Ordering::SeqCst);
        self.bindings
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();

        if !first {
            return;
        }
        if let Some(listener) = &self.listener {
            listener.reset();
            listener.stop();
            info!("hotkey listener released");
        }
    }

    /// Number of live bindings.
    pub fn len(&self) -> usize {
        self.bindings
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    fn active_listener(&self) -> Option<&Arc<dyn GlobalKeyListener>> {
        if self.is_closed() {
            return None;
        }
        self.listener.as_ref()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
