//! Playback engine boundary.
//!
//! The controller core only ever talks to an [`Engine`]: a thin
//! request/response surface over whatever actually decodes and outputs
//! audio. All operations are fire-and-observe; none is expected to block the
//! caller, and their effects are picked up by the poller on a later tick.
//!
//! [`RodioEngine`] is the production implementation: commands go over an
//! mpsc channel to a dedicated audio thread, position/state come back
//! through a shared info handle.

mod player;
mod sink;
mod thread;
mod types;

#[cfg(test)]
pub(crate) mod fake;

pub use player::RodioEngine;

use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// No track is loaded; position queries have nothing to report.
    #[error("no track loaded")]
    NoTrack,
    /// The engine thread has shut down or its state is unreachable.
    #[error("engine is not running")]
    Disconnected,
    #[error("failed to open {path:?}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode {path:?}")]
    Decode {
        path: PathBuf,
        #[source]
        source: rodio::decoder::DecoderError,
    },
}

/// Request/response contract consumed by the controller core.
///
/// Command-style operations (`play`, `pause`, `resume`, `stop`, `seek_to`)
/// return `Ok` once the request is accepted, not once it has taken effect.
/// Query failures are transient: callers absorb them and retry naturally on
/// the next tick.
pub trait Engine: Send + Sync {
    /// Begin playback of `path`, resetting engine-side elapsed time to 0.
    fn play(&self, path: &Path) -> Result<(), EngineError>;

    fn pause(&self) -> Result<(), EngineError>;

    fn resume(&self) -> Result<(), EngineError>;

    fn stop(&self) -> Result<(), EngineError>;

    /// Jump the playback position to `time` from the start of the track.
    fn seek_to(&self, time: Duration) -> Result<(), EngineError>;

    fn is_paused(&self) -> Result<bool, EngineError>;

    /// Current `(elapsed, duration)` in whole seconds.
    fn progress(&self) -> Result<(u64, u64), EngineError>;
}
