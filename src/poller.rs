//! Progress Poller: periodic reconciliation of the engine's reported
//! position into the session.
//!
//! A dedicated thread waits on a command channel with `recv_timeout`; every
//! timeout is one tick. Within a tick the suppression check (drag active or
//! seek cooldown armed) and the progress publish happen under one session
//! lock, so a flag flipped by a drag event can never interleave with a
//! polled update from the same tick.

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Instant;

use tracing::trace;

use crate::engine::Engine;
use crate::playlist::Navigator;
use crate::session::{Progress, SessionHandle, SessionStatus};

#[derive(Debug)]
enum PollerCmd {
    Quit,
}

/// Handle to the running poller thread.
pub struct Poller {
    tx: Sender<PollerCmd>,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl Poller {
    /// Spawn the poll loop ticking every `interval` until [`Poller::stop`].
    pub fn spawn(
        engine: Arc<dyn Engine>,
        session: SessionHandle,
        navigator: Arc<Navigator>,
        interval: std::time::Duration,
    ) -> Self {
        let (tx, rx) = mpsc::channel::<PollerCmd>();
        let handle = thread::spawn(move || run(rx, engine, session, navigator, interval));

        Self {
            tx,
            join: Mutex::new(Some(handle)),
        }
    }

    /// Stop the poll loop and wait for the thread to finish. Idempotent.
    pub fn stop(&self) {
        let _ = self.tx.send(PollerCmd::Quit);
        if let Ok(mut j) = self.join.lock() {
            if let Some(h) = j.take() {
                let _ = h.join();
            }
        }
    }
}

fn run(
    rx: Receiver<PollerCmd>,
    engine: Arc<dyn Engine>,
    session: SessionHandle,
    navigator: Arc<Navigator>,
    interval: std::time::Duration,
) {
    loop {
        match rx.recv_timeout(interval) {
            Ok(PollerCmd::Quit) | Err(RecvTimeoutError::Disconnected) => break,
            Err(RecvTimeoutError::Timeout) => {
                tick(engine.as_ref(), &session, &navigator);
            }
        }
    }
}

/// One poll tick: reconcile engine position into the session, then run the
/// auto-advance check.
pub(crate) fn tick(engine: &dyn Engine, session: &SessionHandle, navigator: &Navigator) {
    let status = {
        let Ok(mut s) = session.lock() else {
            return;
        };

        if !s.poll_suppressed(Instant::now()) {
            match engine.progress() {
                Ok((elapsed, duration)) => {
                    if duration > 0 && elapsed >= duration {
                        // The one sample where elapsed may equal or pass the
                        // duration: flag it and park the engine.
                        s.end_of_track = true;
                        if let Err(e) = engine.pause() {
                            trace!(error = %e, "pause at end of track failed");
                        }
                        s.status = SessionStatus::Paused;
                        s.progress = Progress::from_parts(elapsed, duration);
                    } else {
                        s.end_of_track = false;
                        s.progress = Progress::from_parts(elapsed, duration);
                    }
                }
                // Transient query failure: keep the last sample, the next
                // tick retries naturally.
                Err(e) => trace!(error = %e, "progress query failed; skipping update"),
            }
        }

        s.status
    };

    // Sole trigger for automatic track advancement. End-of-track above moves
    // the session to Paused, never Stopped, so a finished track deliberately
    // stays put until the user acts.
    if status == SessionStatus::Stopped {
        navigator.next();
    }
}
