//! Scripted in-memory engine used by the unit tests.

use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use super::{Engine, EngineError};

#[derive(Debug, Default)]
pub(crate) struct FakeState {
    pub loaded: bool,
    pub paused: bool,
    pub elapsed: u64,
    pub duration: u64,
    pub fail_progress: bool,

    pub played: Vec<PathBuf>,
    pub seeks: Vec<u64>,
    pub pauses: u32,
    pub resumes: u32,
    pub stops: u32,
}

/// An [`Engine`] whose reported position is set by the test and whose
/// received commands are recorded for assertions.
#[derive(Debug, Default)]
pub(crate) struct FakeEngine {
    pub state: Mutex<FakeState>,
}

impl FakeEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// An engine currently reporting the given position.
    pub fn with_progress(elapsed: u64, duration: u64) -> Self {
        let fake = Self::new();
        fake.set_progress(elapsed, duration);
        fake
    }

    pub fn set_progress(&self, elapsed: u64, duration: u64) {
        let mut st = self.state.lock().unwrap();
        st.loaded = true;
        st.elapsed = elapsed;
        st.duration = duration;
    }

    pub fn set_paused(&self, paused: bool) {
        self.state.lock().unwrap().paused = paused;
    }

    pub fn fail_progress(&self, fail: bool) {
        self.state.lock().unwrap().fail_progress = fail;
    }

    pub fn played(&self) -> Vec<PathBuf> {
        self.state.lock().unwrap().played.clone()
    }

    pub fn seeks(&self) -> Vec<u64> {
        self.state.lock().unwrap().seeks.clone()
    }

    pub fn counts(&self) -> (u32, u32, u32) {
        let st = self.state.lock().unwrap();
        (st.pauses, st.resumes, st.stops)
    }
}

impl Engine for FakeEngine {
    fn play(&self, path: &Path) -> Result<(), EngineError> {
        let mut st = self.state.lock().unwrap();
        st.played.push(path.to_path_buf());
        st.loaded = true;
        st.paused = false;
        st.elapsed = 0;
        Ok(())
    }

    fn pause(&self) -> Result<(), EngineError> {
        let mut st = self.state.lock().unwrap();
        st.pauses += 1;
        st.paused = true;
        Ok(())
    }

    fn resume(&self) -> Result<(), EngineError> {
        let mut st = self.state.lock().unwrap();
        st.resumes += 1;
        st.paused = false;
        Ok(())
    }

    fn stop(&self) -> Result<(), EngineError> {
        let mut st = self.state.lock().unwrap();
        st.stops += 1;
        st.loaded = false;
        st.paused = true;
        st.elapsed = 0;
        st.duration = 0;
        Ok(())
    }

    fn seek_to(&self, time: Duration) -> Result<(), EngineError> {
        let mut st = self.state.lock().unwrap();
        st.seeks.push(time.as_secs());
        st.elapsed = time.as_secs();
        Ok(())
    }

    fn is_paused(&self) -> Result<bool, EngineError> {
        Ok(self.state.lock().unwrap().paused)
    }

    fn progress(&self) -> Result<(u64, u64), EngineError> {
        let st = self.state.lock().unwrap();
        if st.fail_progress {
            return Err(EngineError::Disconnected);
        }
        if !st.loaded {
            return Err(EngineError::NoTrack);
        }
        Ok((st.elapsed, st.duration))
    }
}
