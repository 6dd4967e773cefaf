//! Pointer trajectory planning.
//!
//! Speeds are expressed in *screen diagonals per second* so that a script
//! behaves the same on a laptop panel and on a 4K monitor: at speed `1.0`
//! the pointer crosses the full screen diagonal in one second.
//!
//! # From speed to duration
//!
//! ```text
//! pixels_per_ms = speed * diagonal / 1000
//! duration_ms   = distance(start, target) / pixels_per_ms
//! ```
//!
//! A move whose duration is shorter than [`MotionSettings::min_animated_duration_ms`]
//! is planned as a single jump: an animation that short would be
//! indistinguishable from a jump on screen.
//!
//! # Sampling
//!
//! An animated move is a straight line sampled by elapsed time.  The
//! progress fraction `elapsed_ms / duration_ms` selects the point on the
//! line; coordinates are rounded to the nearest pixel.

use std::time::Duration;

use tracing::trace;

/// Screen dimensions with the diagonal computed once at construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenMetrics {
    width: u32,
    height: u32,
    diagonal: f64,
}

impl ScreenMetrics {
    pub fn new(width: u32, height: u32) -> Self {
        let (w, h) = (f64::from(width), f64::from(height));
        Self {
            width,
            height,
            diagonal: (w * w + h * h).sqrt(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Length of the screen diagonal in pixels, `√(width² + height²)`.
    pub fn diagonal(&self) -> f64 {
        self.diagonal
    }
}

/// Tunables for animated moves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionSettings {
    /// Pause between two interpolated pointer moves.
    pub tick_interval: Duration,
    /// Moves planned shorter than this many milliseconds are a single jump.
    pub min_animated_duration_ms: f64,
}

impl Default for MotionSettings {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(1),
            min_animated_duration_ms: 2.0,
        }
    }
}

/// A timed straight-line path from `start` to `target`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trajectory {
    start: (i32, i32),
    target: (i32, i32),
    duration_ms: f64,
}

impl Trajectory {
    pub fn start(&self) -> (i32, i32) {
        self.start
    }

    pub fn target(&self) -> (i32, i32) {
        self.target
    }

    pub fn duration_ms(&self) -> f64 {
        self.duration_ms
    }

    /// Progress fraction after `elapsed` time.  Exceeds `1.0` once the planned
    /// duration has passed.
    pub fn progress(&self, elapsed: Duration) -> f64 {
        elapsed.as_secs_f64() * 1000.0 / self.duration_ms
    }

    /// Linearly interpolated point at `progress`, rounded to whole pixels.
    pub fn position_at(&self, progress: f64) -> (i32, i32) {
        let lerp = |from: i32, to: i32| -> i32 {
            let from = f64::from(from);
            (from + (f64::from(to) - from) * progress).round() as i32
        };
        (
            lerp(self.start.0, self.target.0),
            lerp(self.start.1, self.target.1),
        )
    }
}

/// The outcome of planning one pointer move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MotionPlan {
    /// Inject a single move to the target.
    Jump { target: (i32, i32) },
    /// Animate along the trajectory, then land exactly on its target.
    Animated(Trajectory),
}

/// Plans a move from `start` to `target` at `speed` diagonals per second.
///
/// Non-positive or NaN speeds, zero-length moves, and durations below the
/// animation threshold all plan a [`MotionPlan::Jump`].  So does a
/// degenerate screen whose diagonal is zero, since no finite duration exists.
pub fn plan_motion(
    start: (i32, i32),
    target: (i32, i32),
    speed: f64,
    metrics: &ScreenMetrics,
    settings: &MotionSettings,
) -> MotionPlan {
    if speed.is_nan() || speed <= 0.0 {
        return MotionPlan::Jump { target };
    }

    let pixels_per_ms = speed * metrics.diagonal() / 1000.0;
    let dx = f64::from(target.0) - f64::from(start.0);
    let dy = f64::from(target.1) - f64::from(start.1);
    let distance = (dx * dx + dy * dy).sqrt();
    let duration_ms = distance / pixels_per_ms;

    trace!(?start, ?target, speed, distance, duration_ms, "planned pointer move");

    if !duration_ms.is_finite() || duration_ms < settings.min_animated_duration_ms {
        return MotionPlan::Jump { target };
    }

    MotionPlan::Animated(Trajectory {
        start,
        target,
        duration_ms,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn hd() -> ScreenMetrics {
        ScreenMetrics::new(1920, 1080)
    }

    #[test]
    fn test_screen_metrics_diagonal_is_pythagorean() {
        let metrics = ScreenMetrics::new(3, 4);
        assert_eq!(metrics.diagonal(), 5.0);
        assert_eq!(metrics.width(), 3);
        assert_eq!(metrics.height(), 4);
    }

    #[test]
    fn test_non_positive_speed_plans_jump() {
        for speed in [0.0, -1.0, f64::NAN] {
            let plan = plan_motion((0, 0), (500, 500), speed, &hd(), &MotionSettings::default());
            assert_eq!(plan, MotionPlan::Jump { target: (500, 500) });
        }
    }

    #[test]
    fn test_zero_distance_plans_jump() {
        let plan = plan_motion((10, 10), (10, 10), 0.5, &hd(), &MotionSettings::default());
        assert_eq!(plan, MotionPlan::Jump { target: (10, 10) });
    }

    #[test]
    fn test_sub_threshold_duration_plans_jump() {
        // Arrange: diagonal 5000 px; 1000 diagonals/s = 5000 px/ms, so a
        // 5000 px move takes 1 ms, below the 2 ms threshold.
        let metrics = ScreenMetrics::new(3000, 4000);

        // Act
        let plan = plan_motion((0, 0), (3000, 4000), 1000.0, &metrics, &MotionSettings::default());

        // Assert
        assert_eq!(plan, MotionPlan::Jump { target: (3000, 4000) });
    }

    #[test]
    fn test_duration_follows_speed_in_diagonals_per_second() {
        // Arrange: diagonal 5000 px, speed 1 diag/s = 5 px/ms, distance 5000 px
        let metrics = ScreenMetrics::new(3000, 4000);

        // Act
        let plan = plan_motion((0, 0), (3000, 4000), 1.0, &metrics, &MotionSettings::default());

        // Assert
        match plan {
            MotionPlan::Animated(t) => assert!((t.duration_ms() - 1000.0).abs() < 1e-9),
            other => panic!("expected animated plan, got {other:?}"),
        }
    }

    #[test]
    fn test_degenerate_screen_plans_jump() {
        let metrics = ScreenMetrics::new(0, 0);
        let plan = plan_motion((0, 0), (10, 0), 1.0, &metrics, &MotionSettings::default());
        assert_eq!(plan, MotionPlan::Jump { target: (10, 0) });
    }

    #[test]
    fn test_position_at_endpoints_and_midpoint() {
        let t = Trajectory {
            start: (100, 200),
            target: (300, 100),
            duration_ms: 50.0,
        };
        assert_eq!(t.position_at(0.0), (100, 200));
        assert_eq!(t.position_at(0.5), (200, 150));
        assert_eq!(t.position_at(1.0), (300, 100));
    }

    #[test]
    fn test_position_at_rounds_to_nearest_pixel() {
        let t = Trajectory {
            start: (0, 0),
            target: (3, 0),
            duration_ms: 10.0,
        };
        // 3 * 0.5 = 1.5 → rounds away from zero to 2
        assert_eq!(t.position_at(0.5), (2, 0));
        // 3 * 0.1 = 0.3 → 0
        assert_eq!(t.position_at(0.1), (0, 0));
    }

    #[test]
    fn test_progress_exceeds_one_after_duration() {
        let t = Trajectory {
            start: (0, 0),
            target: (10, 0),
            duration_ms: 20.0,
        };
        assert!((t.progress(Duration::from_millis(10)) - 0.5).abs() < 1e-9);
        assert!(t.progress(Duration::from_millis(21)) > 1.0);
    }
}
