//! Application layer: the automation operations.
//!
//! Everything here depends on capability traits ([`input_sink::InputSink`],
//! [`hotkeys::GlobalKeyListener`], [`automaton_core::KeyResolver`]) rather
//! than on an OS API.  Concrete capabilities live in `infrastructure`.
//!
//! # Sub-modules
//!
//! - **`input_sink`**   – The injection seam and its error type.
//! - **`move_pointer`** – Straight-line, speed-controlled pointer motion on a
//!   worker thread, observed through a [`move_pointer::MoveHandle`].
//! - **`type_keys`**    – Keystrokes, characters with held modifiers, and
//!   best-effort strings.
//! - **`hotkeys`**      – Global hotkey bindings with exactly-once teardown.

pub mod hotkeys;
pub mod input_sink;
pub mod move_pointer;
pub mod type_keys;
