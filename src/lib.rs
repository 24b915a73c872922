//! Chrono-Bird - a side-scroller across 10,000 levels of history
//!
//! Core modules:
//! - `sim`: Deterministic simulation (level config, hazards, physics, collisions)
//! - `campaign`: Level progression between sessions (checkpoints, next level)
//! - `progress`: Highest level reached and checkpoint arithmetic
//! - `persistence`: Storage backends for progress
//! - `platform`: Browser/native platform abstraction
//! - `tuning`: Host-supplied gameplay constants

pub mod campaign;
pub mod persistence;
pub mod platform;
pub mod progress;
pub mod sim;
pub mod tuning;

pub use campaign::{Campaign, Screen};
pub use progress::Progress;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Viewport dimensions (pixels)
    pub const GAME_WIDTH: f64 = 800.0;
    pub const GAME_HEIGHT: f64 = 600.0;

    /// Bird is a square of this size, pinned at a fixed x
    pub const BIRD_SIZE: f64 = 36.0;
    pub const BIRD_X_POSITION: f64 = 150.0;

    /// Downward acceleration per tick
    pub const GRAVITY: f64 = 0.5;
    /// Flap sets velocity to this (negative = upward)
    pub const FLAP_STRENGTH: f64 = -8.0;

    pub const OBSTACLE_WIDTH: f64 = 80.0;
    /// Visible width of a laser beam (collision uses the full obstacle width)
    pub const LASER_BEAM_WIDTH: f64 = 4.0;

    /// Progress is checkpointed every N levels
    pub const CHECKPOINT_INTERVAL: u32 = 10;

    /// "Get Ready!" pause before physics start (seconds of wall time)
    pub const START_DELAY_SECS: f64 = 1.0;

    /// Highest supported level
    pub const MAX_LEVEL: u32 = 10_000;

    /// Nominal frame duration used by headless runners (60 Hz)
    pub const FRAME_DT: f64 = 1.0 / 60.0;
}
