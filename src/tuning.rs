//! Host-supplied gameplay constants
//!
//! The simulation never derives these; the host hands a `Tuning` to every
//! session. Defaults match [`crate::consts`]. Missing JSON fields fall back
//! to their defaults, so a tuning file only needs the values it changes.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::persistence::StorageError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Viewport ===
    pub viewport_width: f64,
    pub viewport_height: f64,

    // === Bird ===
    pub bird_size: f64,
    /// Fixed horizontal position of the bird's left edge
    pub bird_x: f64,
    /// Downward acceleration per tick (before hazard modulation)
    pub gravity: f64,
    /// Velocity a flap sets (negative = upward)
    pub flap_strength: f64,

    // === Obstacles ===
    pub obstacle_width: f64,
    pub laser_beam_width: f64,

    // === Flow ===
    /// Levels per checkpoint
    pub checkpoint_interval: u32,
    /// Wall-time pause before the first physics tick
    pub start_delay_secs: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            viewport_width: GAME_WIDTH,
            viewport_height: GAME_HEIGHT,

            bird_size: BIRD_SIZE,
            bird_x: BIRD_X_POSITION,
            gravity: GRAVITY,
            flap_strength: FLAP_STRENGTH,

            obstacle_width: OBSTACLE_WIDTH,
            laser_beam_width: LASER_BEAM_WIDTH,

            checkpoint_interval: CHECKPOINT_INTERVAL,
            start_delay_secs: START_DELAY_SECS,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) tuning document
    pub fn from_json(json: &str) -> Result<Self, StorageError> {
        let tuning: Self = serde_json::from_str(json)?;
        Ok(tuning.sanitized())
    }

    /// Load a tuning file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// A zero checkpoint interval would divide by zero in checkpoint math
    fn sanitized(mut self) -> Self {
        if self.checkpoint_interval == 0 {
            log::warn!("checkpoint_interval of 0 is invalid, using 1");
            self.checkpoint_interval = 1;
        }
        self
    }
}
