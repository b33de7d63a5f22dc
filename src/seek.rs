//! Drag-to-seek: pointer-to-time mapping, optimistic progress override and
//! the post-seek cooldown.
//!
//! While a drag is active the [`SeekController`] writes candidate positions
//! straight into the session as an optimistic override; the poller skips its
//! ticks for the whole gesture, so the bar never tears between local and
//! polled values. On release the final candidate is sent to the engine and a
//! short cooldown keeps the poller away until the engine's own position
//! reporting has caught up with the seek.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::engine::Engine;
use crate::session::{DragState, Progress, SessionHandle, SessionStatus};

/// Horizontal geometry of the progress-bar region, captured at gesture time.
#[derive(Copy, Clone, Debug)]
pub struct BarGeometry {
    /// Left edge of the bar, in the same coordinate space as pointer x.
    pub x: f64,
    /// Width of the bar; non-positive widths map everything to 0.
    pub width: f64,
}

/// Map a pointer x position to a candidate seek time.
///
/// The single source of truth for the conversion: used identically for the
/// drag preview and for the final seek on release. Clamps to `[0, duration]`
/// outside the bar and is monotonic non-decreasing inside it.
pub fn position_to_time(pointer_x: f64, bar: BarGeometry, duration: u64) -> u64 {
    if bar.width <= 0.0 || pointer_x <= bar.x {
        return 0;
    }
    if pointer_x >= bar.x + bar.width {
        return duration;
    }
    ((pointer_x - bar.x) / bar.width * duration as f64).floor() as u64
}

/// Converts pointer-drag gestures into progress overrides and seek commands.
pub struct SeekController {
    session: SessionHandle,
    engine: Arc<dyn Engine>,
    /// Length of the post-seek suppression window. The engine refreshes its
    /// reported position on its own cadence (~50 ms), so the first polls
    /// after a seek could still read the stale pre-seek position.
    cooldown: Duration,
}

impl SeekController {
    pub fn new(session: SessionHandle, engine: Arc<dyn Engine>, cooldown: Duration) -> Self {
        Self {
            session,
            engine,
            cooldown,
        }
    }

    /// Pointer-down over the bar: start the gesture and show the candidate
    /// position immediately.
    pub fn drag_start(&self, pointer_x: f64, bar: BarGeometry) {
        let Ok(mut s) = self.session.lock() else {
            return;
        };
        let duration = s.progress.duration;
        let candidate = position_to_time(pointer_x, bar, duration);
        s.drag = Some(DragState { candidate });
        s.progress = Progress::from_parts(candidate, duration);
    }

    /// Pointer-move during the gesture: recompute and show the candidate.
    /// Ignored when no drag is active.
    pub fn drag_move(&self, pointer_x: f64, bar: BarGeometry) {
        let Ok(mut s) = self.session.lock() else {
            return;
        };
        if s.drag.is_none() {
            return;
        }
        let duration = s.progress.duration;
        let candidate = position_to_time(pointer_x, bar, duration);
        s.drag = Some(DragState { candidate });
        s.progress = Progress::from_parts(candidate, duration);
    }

    /// Pointer-up: issue the seek, resume if the track had already ended,
    /// and arm the cooldown. The drag flag is cleared regardless of outcome.
    pub fn drag_end(&self, pointer_x: f64, bar: BarGeometry) {
        let Ok(mut s) = self.session.lock() else {
            return;
        };
        if s.drag.take().is_none() {
            return;
        }

        let duration = s.progress.duration;
        let target = position_to_time(pointer_x, bar, duration);

        if let Err(e) = self.engine.seek_to(Duration::from_secs(target)) {
            warn!(seconds = target, error = %e, "seek request failed");
        }

        // A user who dragged away from the very end of a finished (paused)
        // track expects playback to continue, not stay paused.
        if s.end_of_track && s.status != SessionStatus::Running {
            if let Err(e) = self.engine.resume() {
                debug!(error = %e, "resume after end-of-track seek failed");
            }
            s.status = SessionStatus::Running;
        }

        s.progress = Progress::from_parts(target, duration);
        s.cooldown_until = Some(Instant::now() + self.cooldown);
    }
}

#[cfg(test)]
mod tests;
