//! Playlist ownership and next/previous selection policy.
//!
//! The [`Navigator`] exclusively owns the ordered track list and the current
//! index. Tracks are referenced by index, never by pointer, so a future
//! reorder/remove stays a pure index operation. The list only grows, by
//! appending imported paths.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use lofty::prelude::TaggedFileExt;
use lofty::tag::ItemKey;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::LibrarySettings;
use crate::engine::Engine;
use crate::session::{SessionHandle, SessionStatus};

/// A single playlist entry. Immutable once added.
#[derive(Debug, Clone)]
pub struct Track {
    pub path: PathBuf,
    pub title: String,
    pub artist: Option<String>,
    pub display: String,
}

impl Track {
    /// Build a track from a file path, reading title/artist tags when the
    /// file is readable and falling back to the file stem otherwise.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();

        let mut title = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("UNKNOWN")
            .to_string();
        let mut artist: Option<String> = None;

        if let Ok(tagged) = lofty::read_from_path(&path) {
            if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
                if let Some(v) = tag.get_string(&ItemKey::TrackTitle) {
                    if !v.trim().is_empty() {
                        title = v.to_string();
                    }
                }
                if let Some(v) = tag.get_string(&ItemKey::TrackArtist) {
                    let v = v.trim();
                    if !v.is_empty() {
                        artist = Some(v.to_string());
                    }
                }
            }
        }

        let display = make_display(&title, artist.as_deref());

        Self {
            path,
            title,
            artist,
            display,
        }
    }
}

fn make_display(title: &str, artist: Option<&str>) -> String {
    match artist {
        Some(a) if !a.trim().is_empty() => format!("{} - {}", a.trim(), title),
        _ => title.to_string(),
    }
}

fn is_audio_file(path: &Path, settings: &LibrarySettings) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            settings
                .extensions
                .iter()
                .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
                .any(|e| !e.is_empty() && e == ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

#[derive(Debug, Default)]
struct PlaylistState {
    tracks: Vec<Track>,
    current: usize,
}

/// Owns the playlist and decides which track plays next.
pub struct Navigator {
    state: Mutex<PlaylistState>,
    session: SessionHandle,
    engine: Arc<dyn Engine>,
    /// "Previous" within the first N seconds of a track steps back; after
    /// that it restarts the current track from the top.
    restart_threshold_secs: u64,
}

impl Navigator {
    pub fn new(
        session: SessionHandle,
        engine: Arc<dyn Engine>,
        restart_threshold_secs: u64,
    ) -> Self {
        Self {
            state: Mutex::new(PlaylistState::default()),
            session,
            engine,
            restart_threshold_secs,
        }
    }

    /// Append one track per path to the end of the playlist.
    ///
    /// Neither the current index nor playback is touched; returns the number
    /// of tracks added.
    pub fn import<I, P>(&self, paths: I) -> usize
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let Ok(mut st) = self.state.lock() else {
            return 0;
        };
        let before = st.tracks.len();
        for path in paths {
            st.tracks.push(Track::from_path(path.as_ref()));
        }
        let added = st.tracks.len() - before;
        debug!(added, total = st.tracks.len(), "imported tracks");
        added
    }

    /// Walk `dir` and append every audio file matching the library settings.
    ///
    /// The scanned batch is sorted by display name before appending so the
    /// appended order is deterministic; existing entries are untouched.
    pub fn import_dir(&self, dir: &Path, settings: &LibrarySettings) -> usize {
        let mut found: Vec<Track> = Vec::new();

        let mut walker = WalkDir::new(dir).follow_links(settings.follow_links);

        // Non-recursive = only the root directory.
        let depth_cap = if settings.recursive {
            settings.max_depth
        } else {
            Some(1)
        };
        if let Some(d) = depth_cap {
            walker = walker.max_depth(d);
        }

        for entry in walker
            .into_iter()
            .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
            .filter_map(Result::ok)
        {
            let path = entry.path();
            if path.is_file()
                && (settings.include_hidden || !is_hidden(path))
                && is_audio_file(path, settings)
            {
                found.push(Track::from_path(path));
            }
        }

        found.sort_by(|a, b| a.display.to_lowercase().cmp(&b.display.to_lowercase()));

        let Ok(mut st) = self.state.lock() else {
            return 0;
        };
        let added = found.len();
        st.tracks.extend(found);
        debug!(added, total = st.tracks.len(), dir = %dir.display(), "imported directory");
        added
    }

    /// Advance to the next track, wrapping from the last back to the first.
    pub fn next(&self) {
        let Ok(mut st) = self.state.lock() else {
            return;
        };
        if st.tracks.is_empty() {
            self.stop_and_reset(&mut st);
            return;
        }

        let idx = (st.current + 1) % st.tracks.len();
        self.play_at(&mut st, idx);
    }

    /// Go to the previous track, or restart the current one when more than
    /// the restart threshold has elapsed.
    pub fn previous(&self) {
        let Ok(mut st) = self.state.lock() else {
            return;
        };
        if st.tracks.is_empty() {
            self.stop_and_reset(&mut st);
            return;
        }

        let elapsed = self
            .session
            .lock()
            .map(|s| s.progress.elapsed)
            .unwrap_or(0);

        let idx = if elapsed >= self.restart_threshold_secs {
            st.current
        } else if st.current > 0 {
            st.current - 1
        } else {
            st.tracks.len() - 1
        };
        self.play_at(&mut st, idx);
    }

    /// Resume when the engine reports paused, pause otherwise. A no-op on an
    /// empty playlist.
    pub fn toggle_pause(&self) {
        {
            let Ok(st) = self.state.lock() else {
                return;
            };
            if st.tracks.is_empty() {
                return;
            }
        }

        match self.engine.is_paused() {
            Ok(true) => {
                if let Err(e) = self.engine.resume() {
                    warn!(error = %e, "resume failed");
                }
                if let Ok(mut s) = self.session.lock() {
                    s.status = SessionStatus::Running;
                }
            }
            Ok(false) => {
                if let Err(e) = self.engine.pause() {
                    warn!(error = %e, "pause failed");
                }
                if let Ok(mut s) = self.session.lock() {
                    s.status = SessionStatus::Paused;
                }
            }
            Err(e) => {
                debug!(error = %e, "paused-state query failed; ignoring toggle");
            }
        }
    }

    pub fn current_index(&self) -> usize {
        self.state.lock().map(|st| st.current).unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.state.lock().map(|st| st.tracks.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of the current playlist.
    pub fn tracks(&self) -> Vec<Track> {
        self.state.lock().map(|st| st.tracks.clone()).unwrap_or_default()
    }

    fn play_at(&self, st: &mut PlaylistState, idx: usize) {
        let track = &st.tracks[idx];
        // Fire-and-observe: a failed request is logged, state still moves so
        // the poller reconciles against whatever the engine ends up doing.
        if let Err(e) = self.engine.play(&track.path) {
            warn!(path = %track.path.display(), error = %e, "play request failed");
        }
        st.current = idx;
        if let Ok(mut s) = self.session.lock() {
            s.begin_track();
        }
    }

    fn stop_and_reset(&self, st: &mut PlaylistState) {
        if let Err(e) = self.engine.stop() {
            debug!(error = %e, "stop request failed");
        }
        st.current = 0;
    }
}
