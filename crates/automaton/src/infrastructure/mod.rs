//! Infrastructure layer: capability implementations and storage.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `automaton_core`, but MUST NOT be imported by either of them.
//!
//! # Sub-modules
//!
//! - **`input_sink`**   – Recording and dry-run (`tracing`) input sinks.
//! - **`key_listener`** – Channel-fed global key listener with a dispatch
//!   thread.
//! - **`screen_info`**  – Monitor enumeration and primary-screen metrics.
//! - **`storage`**      – TOML configuration file.

pub mod input_sink;
pub mod key_listener;
pub mod screen_info;
pub mod storage;
