//! adagio: playback-progress synchronization and playlist navigation for a
//! single-track-at-a-time audio player.
//!
//! The crate sits between a playback engine (anything implementing
//! [`engine::Engine`]; a rodio-backed one is provided) and a presentation
//! layer, which it knows nothing about. It owns the part that is easy to get
//! wrong: a continuously running progress poller racing against user
//! drag-to-seek input and against the engine's own position-update cadence.
//!
//! Components:
//! - [`session`]: the shared session state (progress triple, coarse status,
//!   drag/cooldown flags) handed to every component.
//! - [`poller`]: reconciles the engine's reported position into the session
//!   on a fixed cadence, unless a drag or post-seek cooldown suppresses it.
//! - [`seek`]: converts progress-bar pointer gestures into seek commands and
//!   optimistic progress overrides.
//! - [`playlist`]: owns the track list and the next/previous selection
//!   policy, including the restart-instead-of-previous time heuristic.
//! - [`controller`]: a facade wiring all of the above for an embedding UI.

pub mod config;
pub mod controller;
pub mod engine;
pub mod playlist;
pub mod poller;
pub mod seek;
pub mod session;

pub use controller::PlayerController;
pub use engine::{Engine, EngineError, RodioEngine};
pub use playlist::{Navigator, Track};
pub use poller::Poller;
pub use seek::{BarGeometry, SeekController, position_to_time};
pub use session::{Progress, Session, SessionHandle, SessionStatus};
