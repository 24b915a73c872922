//! The player's bird: vertical position and velocity only
//!
//! Horizontal position is fixed by the host (`Tuning::bird_x`); the world
//! scrolls past instead.

use serde::Serialize;

use super::collision::Rect;
use crate::tuning::Tuning;

/// Maximum nose-up / nose-down tilt for rendering (degrees)
const MAX_TILT_UP: f64 = -45.0;
const MAX_TILT_DOWN: f64 = 90.0;
const TILT_PER_VELOCITY: f64 = 6.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bird {
    /// Top edge, px from the top of the viewport
    pub y: f64,
    /// px/tick, positive = downward
    pub velocity: f64,
}

impl Bird {
    /// A bird centred vertically with no velocity
    pub fn spawn(tuning: &Tuning) -> Self {
        Self {
            y: tuning.viewport_height / 2.0,
            velocity: 0.0,
        }
    }

    /// Replace velocity with the flap impulse, whatever it was before
    #[inline]
    pub fn flap(&mut self, strength: f64) {
        self.velocity = strength;
    }

    /// One tick of semi-implicit Euler: velocity first, then position
    #[inline]
    pub fn integrate(&mut self, gravity: f64) {
        self.velocity += gravity;
        self.y += self.velocity;
    }

    pub fn rect(&self, tuning: &Tuning) -> Rect {
        Rect::new(tuning.bird_x, self.y, tuning.bird_size, tuning.bird_size)
    }

    /// Above the ceiling or through the floor
    pub fn out_of_bounds(&self, tuning: &Tuning) -> bool {
        self.y < 0.0 || self.y + tuning.bird_size > tuning.viewport_height
    }

    /// Rendering tilt in degrees, nose-up negative
    pub fn tilt_degrees(&self) -> f64 {
        (self.velocity * TILT_PER_VELOCITY).clamp(MAX_TILT_UP, MAX_TILT_DOWN)
    }
}
