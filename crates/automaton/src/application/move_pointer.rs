//! MotionEngine: time-based interpolated pointer movement.
//!
//! [`MotionEngine::move_to`] plans a straight-line move with
//! [`plan_motion`] and either injects a single jump or hands the trajectory
//! to a dedicated worker thread that animates it.  The caller is never
//! blocked; completion is observed through the returned [`MoveHandle`].
//!
//! # Sampling point
//!
//! The start of an animated move is the pointer position read from the sink
//! *once*, when `move_to` is called.  It is never re-sampled, so a test that
//! places the pointer before calling `move_to` fully determines the path.
//!
//! # Animation loop
//!
//! ```text
//! started = now
//! loop:
//!     progress = elapsed / duration
//!     if progress > 1: break
//!     move_cursor(lerp(start, target, progress))
//!     sleep(tick)
//! move_cursor(target)          // always lands exactly on the target
//! ```
//!
//! # Concurrency hazards
//!
//! The engine does not serialise moves.  Starting a second move before the
//! first handle completes makes both workers inject concurrently, and the
//! pointer ends wherever the last write lands.  Callers that need a
//! deterministic path join each handle before the next `move_to`.  There is
//! no cancellation: once started, an animated move runs to completion even if
//! its handle is dropped.

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use automaton_core::{plan_motion, MotionPlan, MotionSettings, ScreenMetrics, Trajectory};
use tracing::{debug, warn};

use super::input_sink::InputSink;

/// Completion handle for one `move_to` call.
///
/// Resolves to `true` when the move was injected and `false` when it could
/// not be (no sink, sink error, or a worker that could not be started).
#[must_use = "an animated move keeps running; join or wait on the handle to observe its result"]
pub struct MoveHandle {
    state: MoveState,
}

enum MoveState {
    Ready(bool),
    Running(JoinHandle<bool>),
}

impl MoveHandle {
    fn ready(result: bool) -> Self {
        Self {
            state: MoveState::Ready(result),
        }
    }

    fn running(handle: JoinHandle<bool>) -> Self {
        Self {
            state: MoveState::Running(handle),
        }
    }

    /// Returns `true` once the result is available without blocking.
    pub fn is_finished(&self) -> bool {
        match &self.state {
            MoveState::Ready(_) => true,
            MoveState::Running(handle) => handle.is_finished(),
        }
    }

    /// Blocks the calling thread until the move completes.
    ///
    /// A worker that panicked resolves to `false`.
    pub fn join(self) -> bool {
        match self.state {
            MoveState::Ready(result) => result,
            MoveState::Running(handle) => handle.join().unwrap_or(false),
        }
    }

    /// Awaits the move from async code without blocking the runtime's
    /// worker threads.
    pub async fn wait(self) -> bool {
        match self.state {
            MoveState::Ready(result) => result,
            MoveState::Running(handle) => {
                tokio::task::spawn_blocking(move || handle.join().unwrap_or(false))
                    .await
                    .unwrap_or(false)
            }
        }
    }
}

/// Plans and executes pointer moves against an optional input sink.
pub struct MotionEngine {
    sink: Option<Arc<dyn InputSink>>,
    metrics: ScreenMetrics,
    settings: MotionSettings,
}

impl MotionEngine {
    /// Creates an engine.  `metrics` is captured once and never refreshed.
    pub fn new(
        sink: Option<Arc<dyn InputSink>>,
        metrics: ScreenMetrics,
        settings: MotionSettings,
    ) -> Self {
        Self {
            sink,
            metrics,
            settings,
        }
    }

    pub fn metrics(&self) -> &ScreenMetrics {
        &self.metrics
    }

    /// Moves the pointer to `(x, y)` at `speed` screen diagonals per second.
    ///
    /// A speed `<= 0` moves instantly.  Returns immediately; animated moves
    /// continue on a worker thread.
    pub fn move_to(&self, x: i32, y: i32, speed: f64) -> MoveHandle {
        let Some(sink) = &self.sink else {
            warn!("move_to({x}, {y}) skipped: no input sink available");
            return MoveHandle::ready(false);
        };
        let target = (x, y);

        if speed.is_nan() || speed <= 0.0 {
            return MoveHandle::ready(jump(sink.as_ref(), target));
        }

        let start = match sink.cursor_position() {
            Ok(pos) => pos,
            Err(e) => {
                warn!("move_to({x}, {y}) aborted: cannot read pointer position: {e}");
                return MoveHandle::ready(false);
            }
        };

        match plan_motion(start, target, speed, &self.metrics, &self.settings) {
            MotionPlan::Jump { target } => MoveHandle::ready(jump(sink.as_ref(), target)),
            MotionPlan::Animated(trajectory) => {
                debug!(
                    ?start,
                    ?target,
                    duration_ms = trajectory.duration_ms(),
                    "starting animated move"
                );
                spawn_animation(Arc::clone(sink), trajectory, self.settings.tick_interval)
            }
        }
    }
}

fn jump(sink: &dyn InputSink, (x, y): (i32, i32)) -> bool {
    match sink.move_cursor(x, y) {
        Ok(()) => true,
        Err(e) => {
            warn!("pointer move to ({x}, {y}) rejected: {e}");
            false
        }
    }
}

fn spawn_animation(sink: Arc<dyn InputSink>, trajectory: Trajectory, tick: Duration) -> MoveHandle {
    let spawned = thread::Builder::new()
        .name("automaton-motion".to_string())
        .spawn(move || animate(sink.as_ref(), &trajectory, tick));

    match spawned {
        Ok(handle) => MoveHandle::running(handle),
        Err(e) => {
            warn!("failed to spawn motion worker: {e}");
            MoveHandle::ready(false)
        }
    }
}

fn animate(sink: &dyn InputSink, trajectory: &Trajectory, tick: Duration) -> bool {
    let started = Instant::now();
    let mut ok = true;

    loop {
        let progress = trajectory.progress(started.elapsed());
        if progress > 1.0 {
            break;
        }
        let (x, y) = trajectory.position_at(progress);
        if let Err(e) = sink.move_cursor(x, y) {
            warn!("animated move interrupted at ({x}, {y}): {e}");
            ok = false;
            break;
        }
        thread::sleep(tick);
    }

    // Sampling granularity can stop short of (or past) the target.
    let landed = jump(sink, trajectory.target());
    debug!(target = ?trajectory.target(), landed, "animated move finished");
    ok && landed
}

// ── Tests ─────────────────────────────────────────────────────────────────────
