use serde::Deserialize;

/// Top-level settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/adagio/config.toml` or
/// `~/.config/adagio/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `ADAGIO__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub poller: PollerSettings,
    pub seek: SeekSettings,
    pub playback: PlaybackSettings,
    pub library: LibrarySettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            poller: PollerSettings::default(),
            seek: SeekSettings::default(),
            playback: PlaybackSettings::default(),
            library: LibrarySettings::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PollerSettings {
    /// Poll cadence in milliseconds. One tick per interval; keep it below
    /// ~20 ms so a progress bar animates at frame rate.
    pub interval_ms: u64,
}

impl Default for PollerSettings {
    fn default() -> Self {
        Self { interval_ms: 15 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SeekSettings {
    /// Length of the post-seek suppression window (milliseconds). Must
    /// outlast the engine's own position refresh cadence (~50 ms) or the
    /// bar can snap back to a stale pre-seek position.
    pub cooldown_ms: u64,
}

impl Default for SeekSettings {
    fn default() -> Self {
        Self { cooldown_ms: 100 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// "Previous" restarts the current track once this many seconds have
    /// elapsed, instead of moving back.
    pub restart_threshold_secs: u64,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            restart_threshold_secs: 3,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// File extensions to treat as audio (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Whether to follow symlinks during directory import.
    pub follow_links: bool,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
    /// Whether to recurse into subdirectories.
    pub recursive: bool,
    /// Optional cap on directory recursion depth.
    pub max_depth: Option<usize>,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            extensions: vec!["mp3".into(), "flac".into(), "wav".into(), "ogg".into()],
            follow_links: true,
            include_hidden: true,
            recursive: true,
            max_depth: None,
        }
    }
}
