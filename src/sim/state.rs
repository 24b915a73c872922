//! Session state and render snapshots
//!
//! All mutable state of one level attempt lives in `SessionState`. Nothing
//! outside the session holds references into it; renderers get owned
//! `RenderState` copies.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::bird::Bird;
use super::hazard::HazardEngine;
use super::level::LevelConfig;
use super::obstacle::{Obstacle, ObstacleField, ObstacleSprite};
use crate::tuning::Tuning;

/// How a level ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Outcome {
    GameOver,
    LevelComplete,
}

/// Current phase of a level session
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum SessionPhase {
    /// "Get Ready!" pause; physics and flaps are ignored until it runs out
    AwaitingStart { remaining_secs: f64 },
    /// Active gameplay
    Running,
    /// Terminal; the simulation is frozen
    Ended(Outcome),
    /// Discarded by the host before it ended; terminal, fires no events
    Cancelled,
}

impl SessionPhase {
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionPhase::Ended(_) | SessionPhase::Cancelled)
    }
}

/// Complete state of one level attempt (deterministic for a given seed)
#[derive(Debug, Clone)]
pub struct SessionState {
    pub config: LevelConfig,
    pub tuning: Tuning,
    pub hazards: HazardEngine,
    /// Seed the obstacle layout was drawn from
    pub seed: u64,
    pub phase: SessionPhase,
    pub bird: Bird,
    pub field: ObstacleField,
    /// Obstacles passed so far
    pub score: u32,
    /// Running ticks since the level started; frozen while awaiting start
    pub tick_count: u64,
}

impl SessionState {
    /// Create a session with the bird centred and the obstacle row spawned
    pub fn new(config: LevelConfig, tuning: Tuning, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut field = ObstacleField::new();
        field.spawn(&config, &tuning, &mut rng);

        Self {
            hazards: HazardEngine::for_level(&config),
            bird: Bird::spawn(&tuning),
            phase: SessionPhase::AwaitingStart {
                remaining_secs: tuning.start_delay_secs,
            },
            config,
            tuning,
            seed,
            field,
            score: 0,
            tick_count: 0,
        }
    }

    /// Owned snapshot for renderers and hosts
    pub fn snapshot(&self) -> RenderState {
        RenderState {
            level: self.config.level,
            era: self.config.era.name,
            phase: self.phase,
            bird: self.bird,
            bird_tilt: self.bird.tilt_degrees(),
            obstacles: self.field.obstacles.clone(),
            sprites: self
                .field
                .iter()
                .map(|o| o.sprite(self.config.gap_size, &self.tuning))
                .collect(),
            seed: self.seed,
            gap_size: self.config.gap_size,
            score: self.score,
            obstacle_count: self.config.obstacle_count,
            tick_count: self.tick_count,
            gravity_shifted: self.hazards.gravity_shifted(self.tick_count),
        }
    }
}

/// What a renderer needs to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderState {
    pub level: u32,
    pub era: &'static str,
    pub phase: SessionPhase,
    pub bird: Bird,
    /// Degrees, nose-up negative
    pub bird_tilt: f64,
    pub obstacles: Vec<Obstacle>,
    /// Opacity and laser beam per obstacle, same order as `obstacles`
    pub sprites: Vec<ObstacleSprite>,
    /// Replaying this seed reproduces the layout
    pub seed: u64,
    pub gap_size: f64,
    pub score: u32,
    pub obstacle_count: u32,
    pub tick_count: u64,
    /// Light-gravity phase of the shifting-gravity hazard
    pub gravity_shifted: bool,
}

impl RenderState {
    /// "Get Ready!" overlay visible
    pub fn awaiting_start(&self) -> bool {
        matches!(self.phase, SessionPhase::AwaitingStart { .. })
    }

    /// First obstacle whose right edge is still at or ahead of the bird
    pub fn next_obstacle(&self, tuning: &Tuning) -> Option<&Obstacle> {
        self.obstacles
            .iter()
            .find(|o| o.right_edge(tuning) >= tuning.bird_x)
    }
}
