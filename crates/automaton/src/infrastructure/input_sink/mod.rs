//! Bundled [`InputSink`](crate::application::input_sink::InputSink)
//! implementations.
//!
//! Neither sink touches the OS:
//!
//! - **`recording`** – Keeps every injected event in order so tests can
//!   assert exactly what was sent.  Validates keys and buttons the way a
//!   platform sink would.
//! - **`tracing_sink`** – Dry-run sink for the command-line driver.  Logs each
//!   injection and tracks a virtual pointer.

pub mod recording;
pub mod tracing_sink;

pub use recording::{InjectedEvent, RecordingInputSink};
pub use tracing_sink::TracingInputSink;
