//! Screen / monitor enumeration and the metrics the motion engine uses.
//!
//! Speeds are relative to the screen diagonal, so the façade needs the
//! primary monitor's size once at construction.  Enumeration goes through
//! [`PlatformScreenEnumerator`]; when it fails or reports nothing, the
//! configured fallback size is used instead.
//!
//! A [`MockScreenEnumerator`] is always compiled so tests on any platform can
//! use it without a physical display.

use automaton_core::ScreenMetrics;
use thiserror::Error;
use tracing::{debug, warn};

/// Error type for screen enumeration operations.
#[derive(Debug, Error)]
pub enum ScreenInfoError {
    #[error("platform API error while enumerating monitors: {0}")]
    PlatformError(String),
}

/// One connected monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonitorInfo {
    pub monitor_id: u32,
    pub width: u32,
    pub height: u32,
    pub x_offset: i32,
    pub y_offset: i32,
    pub is_primary: bool,
}

/// Enumerates the monitors on the current platform.
pub trait PlatformScreenEnumerator: Send + Sync {
    /// Returns the connected monitors.  The primary monitor, when there is
    /// one, comes first.
    ///
    /// # Errors
    ///
    /// Returns [`ScreenInfoError::PlatformError`] if the OS query fails.
    fn enumerate_monitors(&self) -> Result<Vec<MonitorInfo>, ScreenInfoError>;
}

/// Metrics for the primary monitor, or `fallback` if none can be found.
pub fn primary_screen_metrics(
    enumerator: &dyn PlatformScreenEnumerator,
    fallback: ScreenMetrics,
) -> ScreenMetrics {
    let monitors = match enumerator.enumerate_monitors() {
        Ok(monitors) => monitors,
        Err(e) => {
            warn!(
                "screen enumeration failed ({e}); using fallback {}x{}",
                fallback.width(),
                fallback.height()
            );
            return fallback;
        }
    };

    let primary = monitors
        .iter()
        .find(|m| m.is_primary)
        .or_else(|| monitors.first());

    match primary {
        Some(m) => {
            debug!(width = m.width, height = m.height, "primary monitor");
            ScreenMetrics::new(m.width, m.height)
        }
        None => {
            warn!(
                "no monitors reported; using fallback {}x{}",
                fallback.width(),
                fallback.height()
            );
            fallback
        }
    }
}

// ── Mock implementation (always compiled for tests) ───────────────────────────

/// A screen enumerator that returns a fixed list of monitors.
pub struct MockScreenEnumerator {
    pub monitors: Vec<MonitorInfo>,
    pub should_fail: bool,
}

impl MockScreenEnumerator {
    /// A single 1920×1080 primary monitor.
    pub fn single_1080p() -> Self {
        Self {
            monitors: vec![MonitorInfo {
                monitor_id: 0,
                width: 1920,
                height: 1080,
                x_offset: 0,
                y_offset: 0,
                is_primary: true,
            }],
            should_fail: false,
        }
    }

    /// Two 2560×1440 monitors side by side, primary on the left.
    pub fn dual_1440p() -> Self {
        Self {
            monitors: vec![
                MonitorInfo {
                    monitor_id: 0,
                    width: 2560,
                    height: 1440,
                    x_offset: 0,
                    y_offset: 0,
                    is_primary: true,
                },
                MonitorInfo {
                    monitor_id: 1,
                    width: 2560,
                    height: 1440,
                    x_offset: 2560,
                    y_offset: 0,
                    is_primary: false,
                },
            ],
            should_fail: false,
        }
    }

    /// An enumerator whose query always fails.
    pub fn failing() -> Self {
        Self {
            monitors: Vec::new(),
            should_fail: true,
        }
    }
}

impl PlatformScreenEnumerator for MockScreenEnumerator {
    fn enumerate_monitors(&self) -> Result<Vec<MonitorInfo>, ScreenInfoError> {
        if self.should_fail {
            return Err(ScreenInfoError::PlatformError("mock failure".into()));
        }
        Ok(self.monitors.clone())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
