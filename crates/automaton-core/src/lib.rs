//! # automaton-core
//!
//! Platform-independent building blocks for Automaton: modifier sets and
//! their platform masks, the virtual key code table with a character
//! resolver, and the pure math behind interpolated pointer motion.
//!
//! This crate has zero dependencies on OS APIs or threads.  The `automaton`
//! crate layers the motion engine, the keystroke typist and the hotkey
//! registry on top of it.
//!
//! # Architecture overview (for beginners)
//!
//! - **`modifiers`** – Which modifier keys (Ctrl, Shift, Alt, AltGr) are held,
//!   expressed as an immutable [`ModifierSet`] and encoded on the platform side
//!   as a [`ModifierMask`] bitfield.
//!
//! - **`keymap`** – Virtual key codes ([`KeyCode`]) using the Windows
//!   virtual-key numbering, a validity/name table, and the
//!   [`KeyResolver`] seam that turns a character into the key that types it.
//!
//! - **`domain`** – Screen metrics (width, height, cached diagonal), mouse
//!   button kinds, and the trajectory planner that converts a speed in
//!   "screen diagonals per second" into a timed linear path.

pub mod domain;
pub mod keymap;
pub mod modifiers;

pub use domain::button::ClickType;
pub use domain::motion::{plan_motion, MotionPlan, MotionSettings, ScreenMetrics, Trajectory};
pub use keymap::{KeyCode, KeyResolver, ParseKeyCodeError, UsLayoutResolver};
pub use modifiers::{Modifier, ModifierMask, ModifierSet};
