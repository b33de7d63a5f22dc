//! Facade wiring the session, engine, navigator, seek controller and poller.
//!
//! [`PlayerController`] is what an embedding presentation layer holds: it
//! forwards gesture and navigation input into the right component and
//! exposes read-only snapshots of the shared session state.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use crate::config::Settings;
use crate::engine::Engine;
use crate::playlist::{Navigator, Track};
use crate::poller::Poller;
use crate::seek::{BarGeometry, SeekController};
use crate::session::{self, Progress, SessionHandle, SessionStatus};

pub struct PlayerController {
    session: SessionHandle,
    navigator: Arc<Navigator>,
    seek: SeekController,
    poller: Poller,
}

impl PlayerController {
    /// Wire up a controller around `engine` and start the poll loop.
    pub fn new(engine: Arc<dyn Engine>, settings: &Settings) -> Self {
        let session = session::new_session();
        let navigator = Arc::new(Navigator::new(
            session.clone(),
            engine.clone(),
            settings.playback.restart_threshold_secs,
        ));
        let seek = SeekController::new(
            session.clone(),
            engine.clone(),
            Duration::from_millis(settings.seek.cooldown_ms),
        );
        let poller = Poller::spawn(
            engine,
            session.clone(),
            navigator.clone(),
            Duration::from_millis(settings.poller.interval_ms),
        );

        Self {
            session,
            navigator,
            seek,
            poller,
        }
    }

    // --- read API for the presentation layer -------------------------------
    //
    // Snapshots are eventually consistent; two consecutive reads may observe
    // different poller ticks.

    pub fn progress(&self) -> Progress {
        self.session
            .lock()
            .map(|s| s.progress)
            .unwrap_or_default()
    }

    pub fn status(&self) -> SessionStatus {
        self.session
            .lock()
            .map(|s| s.status)
            .unwrap_or_default()
    }

    pub fn current_index(&self) -> usize {
        self.navigator.current_index()
    }

    pub fn track_count(&self) -> usize {
        self.navigator.len()
    }

    pub fn tracks(&self) -> Vec<Track> {
        self.navigator.tracks()
    }

    // --- navigation commands ----------------------------------------------

    pub fn next(&self) {
        self.navigator.next();
    }

    pub fn previous(&self) {
        self.navigator.previous();
    }

    pub fn toggle_pause(&self) {
        self.navigator.toggle_pause();
    }

    pub fn import<I, P>(&self, paths: I) -> usize
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        self.navigator.import(paths)
    }

    pub fn import_dir(&self, dir: &Path, settings: &crate::config::LibrarySettings) -> usize {
        self.navigator.import_dir(dir, settings)
    }

    // --- drag gestures ------------------------------------------------------

    pub fn drag_start(&self, pointer_x: f64, bar: BarGeometry) {
        self.seek.drag_start(pointer_x, bar);
    }

    pub fn drag_move(&self, pointer_x: f64, bar: BarGeometry) {
        self.seek.drag_move(pointer_x, bar);
    }

    pub fn drag_end(&self, pointer_x: f64, bar: BarGeometry) {
        self.seek.drag_end(pointer_x, bar);
    }

    /// Stop the poll loop. Also runs on drop; in-flight engine requests are
    /// discarded, not awaited.
    pub fn shutdown(&self) {
        self.poller.stop();
    }
}

impl Drop for PlayerController {
    fn drop(&mut self) {
        self.poller.stop();
    }
}
