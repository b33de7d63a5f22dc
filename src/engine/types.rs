//! Small types shared between the engine facade and its audio thread.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug)]
pub(super) enum EngineCmd {
    /// Load and start playing the given file.
    Play(PathBuf),
    Pause,
    Resume,
    Stop,
    /// Jump to an absolute position from the start of the track.
    SeekTo(Duration),
    /// Shut the audio thread down.
    Quit,
}

/// Engine-side playback state published for the controller to poll.
#[derive(Debug, Clone)]
pub(super) struct EngineInfo {
    /// Whether a track is currently loaded in the sink.
    pub loaded: bool,
    pub paused: bool,
    pub elapsed: Duration,
    /// Duration probed from the file's tags; zero when unknown.
    pub duration: Duration,
}

impl Default for EngineInfo {
    fn default() -> Self {
        Self {
            loaded: false,
            paused: true,
            elapsed: Duration::ZERO,
            duration: Duration::ZERO,
        }
    }
}

pub(super) type InfoHandle = Arc<Mutex<EngineInfo>>;
