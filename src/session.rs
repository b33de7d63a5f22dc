//! Shared session state: the progress triple, coarse playback status and the
//! transient flags that coordinate the poller with drag-to-seek input.
//!
//! A single [`Session`] lives behind a [`SessionHandle`] and is passed to
//! every component at construction. Each field has exactly one writer:
//!
//! - `progress`: the poller (polled truth) and the seek controller
//!   (optimistic override while dragging / right after a seek),
//! - `status`: the navigator and the seek controller,
//! - `end_of_track`: the poller; cleared when a new track starts,
//! - `drag` / `cooldown_until`: the seek controller.
//!
//! Readers (a presentation layer) get eventually-consistent snapshots; no
//! multi-field atomicity is promised across separate reads.

use std::sync::{Arc, Mutex};
use std::time::Instant;

/// Coarse playback status of the session.
///
/// `Stopped` is the initial state and the state the navigator degrades to on
/// an empty playlist. The poller's auto-advance fires only from `Stopped`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SessionStatus {
    Running,
    Paused,
    Stopped,
}

impl Default for SessionStatus {
    fn default() -> Self {
        Self::Stopped
    }
}

/// The `(percent, elapsed, duration)` triple consumed by a presentation
/// layer. `percent` is derived, never stored independently.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Progress {
    /// 0..100; 0 when the duration is unknown. May reach or pass 100 for the
    /// one sample in which end-of-track is detected.
    pub percent: f64,
    /// Elapsed playback time in whole seconds.
    pub elapsed: u64,
    /// Track duration in whole seconds; 0 when unknown.
    pub duration: u64,
}

impl Progress {
    /// Build a progress triple from an elapsed/duration pair.
    ///
    /// A zero duration yields `percent = 0.0`; the division is never
    /// performed against it.
    pub fn from_parts(elapsed: u64, duration: u64) -> Self {
        let percent = if duration > 0 {
            elapsed as f64 / duration as f64 * 100.0
        } else {
            0.0
        };
        Self {
            percent,
            elapsed,
            duration,
        }
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self {
            percent: 0.0,
            elapsed: 0,
            duration: 0,
        }
    }
}

/// Transient per-gesture state; exists only while a drag is active.
#[derive(Copy, Clone, Debug)]
pub struct DragState {
    /// Last candidate seek time computed from the pointer position.
    pub candidate: u64,
}

/// Mutable session state shared across the controller components.
#[derive(Debug, Default)]
pub struct Session {
    pub progress: Progress,
    pub status: SessionStatus,
    /// True once the poller observed `elapsed >= duration` for the current
    /// track; decides whether a later seek should also resume playback.
    pub end_of_track: bool,
    /// Set while a drag gesture is active; the poller skips its tick then.
    pub drag: Option<DragState>,
    /// Single-shot suppression deadline armed after a seek. While in the
    /// future, polled positions are ignored so a stale pre-seek position
    /// from the engine cannot snap the bar backward.
    pub cooldown_until: Option<Instant>,
}

impl Session {
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// True when the poller must skip the current tick entirely.
    ///
    /// An expired cooldown is disarmed here, which makes the flag
    /// single-shot without a dedicated timer thread. Callers hold the
    /// session lock, so the check is atomic with whatever follows it in the
    /// same tick.
    pub fn poll_suppressed(&mut self, now: Instant) -> bool {
        if let Some(deadline) = self.cooldown_until {
            if now >= deadline {
                self.cooldown_until = None;
            }
        }
        self.drag.is_some() || self.cooldown_until.is_some()
    }

    /// Reset per-track state when the navigator starts a new track.
    pub(crate) fn begin_track(&mut self) {
        self.status = SessionStatus::Running;
        self.end_of_track = false;
        self.progress = Progress::default();
    }
}

pub type SessionHandle = Arc<Mutex<Session>>;

/// Create a fresh session handle in the initial `Stopped` state.
pub fn new_session() -> SessionHandle {
    Arc::new(Mutex::new(Session::default()))
}
