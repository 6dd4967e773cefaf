//! Bundled [`GlobalKeyListener`](crate::application::hotkeys::GlobalKeyListener)
//! implementations.
//!
//! OS keyboard hooks must return quickly, so a platform backend never runs
//! user callbacks itself.  It posts each key press into a channel and a
//! dispatch thread does the matching and calling.  [`ChannelKeyListener`] is
//! that dispatch half; anything that can produce [`KeyPress`] values (a hook,
//! a test, a script) feeds it through a [`KeyEventFeed`].

pub mod channel;

pub use channel::{ChannelKeyListener, KeyEventFeed, KeyPress};
