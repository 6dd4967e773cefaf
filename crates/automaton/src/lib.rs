//! automaton library entry point.
//!
//! Desktop automation over injectable capabilities:
//!
//! 1. Speed-controlled, straight-line pointer motion that runs on a worker
//!    thread and reports completion through a [`MoveHandle`].
//! 2. Keystrokes, characters with held modifiers, and best-effort strings.
//! 3. Global hotkeys bound to `(key, modifiers)` pairs.
//!
//! Platform access sits behind traits ([`InputSink`], [`GlobalKeyListener`],
//! [`KeyResolver`](automaton_core::KeyResolver)).  Each capability is
//! optional; an operation that needs a missing one reports `false`.
//!
//! ```ignore
//! let sink = Arc::new(TracingInputSink::default());
//! let automaton = Automaton::new(
//!     Some(sink),
//!     None,
//!     Arc::new(UsLayoutResolver::new()),
//!     ScreenMetrics::new(1920, 1080),
//!     MotionSettings::default(),
//! );
//! assert!(automaton.move_to(500, 300, 0.5).join());
//! automaton.type_string("hello");
//! ```

/// Application layer: the automation operations.
pub mod application;

/// The façade that owns every capability.
pub mod automaton;

/// Infrastructure layer: bundled capabilities and configuration storage.
pub mod infrastructure;

pub use application::hotkeys::{GlobalKeyListener, HotkeyCallback, HotkeyRegistry, ListenerError};
pub use application::input_sink::{InputSink, SinkError};
pub use application::move_pointer::{MotionEngine, MoveHandle};
pub use application::type_keys::KeyTypist;
pub use automaton::Automaton;
