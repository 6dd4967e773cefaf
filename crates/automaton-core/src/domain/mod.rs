//! Domain types with no OS dependencies.
//!
//! - **`button`** – Mouse button kinds and their platform button masks.
//! - **`motion`** – Screen metrics and the trajectory planner used by the
//!   motion engine.

pub mod button;
pub mod motion;
