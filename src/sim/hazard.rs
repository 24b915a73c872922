//! Era hazards as pure functions of the tick counter
//!
//! Every hazard is periodic in the session's tick count. Nothing here keeps
//! state between ticks: the same tick always produces the same mutation.

use serde::Serialize;

use super::level::{HazardType, LevelConfig};
use super::obstacle::Obstacle;

/// Gravity alternates every this many ticks
pub const GRAVITY_SHIFT_PERIOD: u64 = 120;
pub const HEAVY_GRAVITY_FACTOR: f64 = 1.4;
pub const LIGHT_GRAVITY_FACTOR: f64 = 0.6;

/// Piston gap offset amplitude (px) and angular rate (radians/tick)
pub const PISTON_AMPLITUDE: f64 = 2.0;
pub const PISTON_RATE: f64 = 0.05;

/// Obstacles glitch out for the last 19 ticks of every 100
pub const GLITCH_CYCLE: u64 = 100;
pub const GLITCH_THRESHOLD: u64 = 80;

/// Lasers are on for 60 ticks, off for 60 ticks
pub const LASER_HALF_PERIOD: u64 = 60;

/// Which half of the gravity cycle a tick falls in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GravityPhase {
    Heavy,
    Light,
}

#[inline]
pub fn gravity_phase(tick: u64) -> GravityPhase {
    if (tick / GRAVITY_SHIFT_PERIOD) % 2 == 0 {
        GravityPhase::Heavy
    } else {
        GravityPhase::Light
    }
}

/// Vertical gap offset for a piston obstacle, relative to its spawn position
#[inline]
pub fn piston_offset(tick: u64, obstacle_id: u32) -> f64 {
    (tick as f64 * PISTON_RATE + obstacle_id as f64).sin() * PISTON_AMPLITUDE
}

#[inline]
pub fn glitch_active(tick: u64) -> bool {
    tick % GLITCH_CYCLE > GLITCH_THRESHOLD
}

#[inline]
pub fn laser_on(tick: u64) -> bool {
    (tick / LASER_HALF_PERIOD) % 2 == 0
}

/// The active hazard set of one level, flattened for per-tick lookups
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HazardEngine {
    pub pistons: bool,
    pub glitching: bool,
    pub lasers: bool,
    pub shifting_gravity: bool,
}

impl HazardEngine {
    pub fn new(hazards: &[HazardType]) -> Self {
        let mut engine = Self::default();
        for hazard in hazards {
            match hazard {
                HazardType::MovingPistons => engine.pistons = true,
                HazardType::Glitching => engine.glitching = true,
                HazardType::LaserGrids => engine.lasers = true,
                HazardType::ShiftingGravity => engine.shifting_gravity = true,
            }
        }
        engine
    }

    pub fn for_level(config: &LevelConfig) -> Self {
        Self::new(&config.hazards)
    }

    /// Gravity for this tick, scaled by the shifting-gravity phase if active
    pub fn gravity_for(&self, tick: u64, base_gravity: f64) -> f64 {
        if !self.shifting_gravity {
            return base_gravity;
        }
        match gravity_phase(tick) {
            GravityPhase::Heavy => base_gravity * HEAVY_GRAVITY_FACTOR,
            GravityPhase::Light => base_gravity * LIGHT_GRAVITY_FACTOR,
        }
    }

    /// True while gravity is in its light phase (renderers tint the scene)
    pub fn gravity_shifted(&self, tick: u64) -> bool {
        self.shifting_gravity && gravity_phase(tick) == GravityPhase::Light
    }

    /// Recompute an obstacle's hazard-driven fields for this tick
    pub fn apply(&self, obstacle: &mut Obstacle, tick: u64) {
        if self.pistons {
            obstacle.gap_y = obstacle.base_gap_y + piston_offset(tick, obstacle.id);
        }

        if self.glitching {
            let glitched = glitch_active(tick);
            obstacle.glitching = glitched;
            obstacle.tangible = !glitched;
        }

        obstacle.laser_on = self.lasers && laser_on(tick);
    }
}
