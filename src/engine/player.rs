//! The rodio-backed [`Engine`] implementation.

use std::path::Path;
use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

use super::thread::spawn_engine_thread;
use super::types::{EngineCmd, EngineInfo, InfoHandle};
use super::{Engine, EngineError};

/// Production engine: a dedicated audio thread driven over a command
/// channel, publishing position/state through a shared info handle.
pub struct RodioEngine {
    tx: Sender<EngineCmd>,
    info: InfoHandle,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl RodioEngine {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel::<EngineCmd>();
        let info: InfoHandle = Arc::new(Mutex::new(EngineInfo::default()));

        let handle = spawn_engine_thread(rx, info.clone());

        Self {
            tx,
            info,
            join: Mutex::new(Some(handle)),
        }
    }

    /// Ask the audio thread to shut down and wait for it to finish.
    pub fn quit(&self) {
        let _ = self.tx.send(EngineCmd::Quit);
        if let Ok(mut j) = self.join.lock() {
            if let Some(h) = j.take() {
                let _ = h.join();
            }
        }
    }

    fn send(&self, cmd: EngineCmd) -> Result<(), EngineError> {
        self.tx.send(cmd).map_err(|_| EngineError::Disconnected)
    }
}

impl Default for RodioEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for RodioEngine {
    fn drop(&mut self) {
        self.quit();
    }
}

impl Engine for RodioEngine {
    fn play(&self, path: &Path) -> Result<(), EngineError> {
        self.send(EngineCmd::Play(path.to_path_buf()))
    }

    fn pause(&self) -> Result<(), EngineError> {
        self.send(EngineCmd::Pause)
    }

    fn resume(&self) -> Result<(), EngineError> {
        self.send(EngineCmd::Resume)
    }

    fn stop(&self) -> Result<(), EngineError> {
        self.send(EngineCmd::Stop)
    }

    fn seek_to(&self, time: Duration) -> Result<(), EngineError> {
        self.send(EngineCmd::SeekTo(time))
    }

    fn is_paused(&self) -> Result<bool, EngineError> {
        let info = self.info.lock().map_err(|_| EngineError::Disconnected)?;
        Ok(info.paused)
    }

    fn progress(&self) -> Result<(u64, u64), EngineError> {
        let info = self.info.lock().map_err(|_| EngineError::Disconnected)?;
        if !info.loaded {
            return Err(EngineError::NoTrack);
        }
        Ok((info.elapsed.as_secs(), info.duration.as_secs()))
    }
}
