//! Highest level reached and checkpoint arithmetic

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub highest_level: u32,
}

impl Default for Progress {
    fn default() -> Self {
        Self { highest_level: 1 }
    }
}

impl Progress {
    pub fn new(highest_level: u32) -> Self {
        Self { highest_level }
    }

    /// Stored level 0 means nothing useful was saved
    pub fn sanitized(self) -> Self {
        Self {
            highest_level: self.highest_level.max(1),
        }
    }

    /// Record that `level` has been unlocked. Returns true if this raised
    /// the highest level (and so needs saving).
    pub fn unlock(&mut self, level: u32) -> bool {
        if level > self.highest_level {
            self.highest_level = level;
            true
        } else {
            false
        }
    }
}

/// First level of the checkpoint block containing `level`.
///
/// With an interval of 10: levels 1-10 retry from 1, 11-20 from 11, ...
pub fn checkpoint_for(level: u32, interval: u32) -> u32 {
    let interval = interval.max(1);
    (level.saturating_sub(1) / interval) * interval + 1
}

/// Clearing this level completes a checkpoint block
pub fn is_checkpoint_level(level: u32, interval: u32) -> bool {
    level % interval.max(1) == 0
}
