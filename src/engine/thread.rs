//! The rodio audio thread behind [`RodioEngine`](super::RodioEngine).
//!
//! One dedicated thread owns the output stream and the current sink and
//! consumes commands with `recv_timeout`. A secondary ticker thread advances
//! the published elapsed time every 50 ms while playback is active; that
//! cadence is the one the controller's post-seek cooldown is tuned against.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::thread;
use std::thread::JoinHandle;
use std::time::Duration;

use lofty::prelude::AudioFile;
use rodio::{OutputStreamBuilder, Sink};
use tracing::warn;

use super::sink::create_sink_at;
use super::types::{EngineCmd, InfoHandle};

const TICK: Duration = Duration::from_millis(50);

pub(super) fn spawn_engine_thread(rx: Receiver<EngineCmd>, info: InfoHandle) -> JoinHandle<()> {
    thread::spawn(move || {
        let mut stream = match OutputStreamBuilder::open_default_stream() {
            Ok(s) => s,
            Err(e) => {
                warn!(error = %e, "no audio output device; engine thread exiting");
                return;
            }
        };
        // rodio logs to stderr when OutputStream is dropped. That's useful in
        // debugging, but noisy for an embedding application.
        stream.log_on_drop(false);

        let mut sink: Option<Sink> = None;
        let mut current: Option<PathBuf> = None;
        let mut paused = true;

        // Ticker thread advancing the published elapsed time while playing.
        // It holds only a weak handle, so it winds down once the engine and
        // this thread have dropped theirs.
        let info_for_ticker = Arc::downgrade(&info);
        thread::spawn(move || {
            loop {
                thread::sleep(TICK);
                let Some(info) = info_for_ticker.upgrade() else {
                    break;
                };
                let Ok(mut info) = info.lock() else {
                    break;
                };
                if info.loaded && !info.paused {
                    info.elapsed += TICK;
                }
            }
        });

        loop {
            match rx.recv_timeout(Duration::from_millis(200)) {
                Ok(cmd) => match cmd {
                    EngineCmd::Play(path) => {
                        if let Some(s) = sink.as_ref() {
                            s.stop();
                        }
                        match create_sink_at(&stream, &path, Duration::ZERO) {
                            Ok(new_sink) => {
                                let duration = probe_duration(&path);
                                new_sink.play();
                                sink = Some(new_sink);
                                current = Some(path);
                                paused = false;
                                if let Ok(mut i) = info.lock() {
                                    i.loaded = true;
                                    i.paused = false;
                                    i.elapsed = Duration::ZERO;
                                    i.duration = duration;
                                }
                            }
                            Err(e) => {
                                warn!(path = %path.display(), error = %e, "failed to start playback");
                            }
                        }
                    }

                    EngineCmd::Pause => {
                        if let Some(ref s) = sink {
                            if !paused {
                                s.pause();
                                paused = true;
                                if let Ok(mut i) = info.lock() {
                                    i.paused = true;
                                }
                            }
                        }
                    }

                    EngineCmd::Resume => {
                        if let Some(ref s) = sink {
                            if paused {
                                s.play();
                                paused = false;
                                if let Ok(mut i) = info.lock() {
                                    i.paused = false;
                                }
                            }
                        }
                    }

                    EngineCmd::Stop => {
                        if let Some(s) = sink.as_ref() {
                            s.stop();
                        }
                        sink = None;
                        current = None;
                        paused = true;
                        if let Ok(mut i) = info.lock() {
                            i.loaded = false;
                            i.paused = true;
                            i.elapsed = Duration::ZERO;
                            i.duration = Duration::ZERO;
                        }
                    }

                    EngineCmd::SeekTo(target) => {
                        // Rebuild the sink skipped to the target position;
                        // `skip_duration` works for the common formats.
                        let Some(path) = current.clone() else {
                            continue;
                        };
                        if sink.is_none() {
                            continue;
                        }

                        if let Some(s) = sink.as_ref() {
                            s.stop();
                        }

                        match create_sink_at(&stream, &path, target) {
                            Ok(new_sink) => {
                                if paused {
                                    new_sink.pause();
                                } else {
                                    new_sink.play();
                                }
                                sink = Some(new_sink);
                                if let Ok(mut i) = info.lock() {
                                    i.elapsed = target;
                                }
                            }
                            Err(e) => {
                                warn!(path = %path.display(), error = %e, "seek failed; stopping");
                                sink = None;
                                current = None;
                                paused = true;
                                if let Ok(mut i) = info.lock() {
                                    i.loaded = false;
                                    i.paused = true;
                                }
                            }
                        }
                    }

                    EngineCmd::Quit => {
                        if let Some(ref s) = sink {
                            s.stop();
                        }
                        if let Ok(mut i) = info.lock() {
                            i.loaded = false;
                            i.paused = true;
                        }
                        break;
                    }
                },
                // No command: nothing to do, the ticker owns elapsed time.
                Err(RecvTimeoutError::Timeout) => continue,
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    })
}

/// Probe the track duration from its tags; zero when unknown.
fn probe_duration(path: &Path) -> Duration {
    lofty::read_from_path(path)
        .map(|tagged| tagged.properties().duration())
        .unwrap_or(Duration::ZERO)
}
