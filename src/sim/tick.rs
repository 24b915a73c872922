//! One simulation step per rendered frame
//!
//! Order within a running tick is fixed: gravity, bird, obstacles (with
//! hazards), scoring, bounds, collisions, completion.

use serde::Serialize;

use super::collision::{self, Hit};
use super::state::{Outcome, SessionPhase, SessionState};

/// Result of a tick from the host's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TickStatus {
    Continue,
    GameOver,
    LevelComplete,
    /// The host discarded the session
    Cancelled,
}

impl TickStatus {
    /// Whether the host should request another frame
    #[inline]
    pub fn frame(&self) -> Frame {
        match self {
            TickStatus::Continue => Frame::Continue,
            _ => Frame::Stop,
        }
    }
}

impl From<Outcome> for TickStatus {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::GameOver => TickStatus::GameOver,
            Outcome::LevelComplete => TickStatus::LevelComplete,
        }
    }
}

/// Frame scheduling decision after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Frame {
    /// Re-arm for the next frame
    Continue,
    /// Stop requesting frames
    Stop,
}

/// Why a running tick ended the level
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum EndReason {
    OutOfBounds { y: f64 },
    Collision(Hit),
    Cleared,
}

/// Advance the session by one frame.
///
/// `dt` is wall time since the previous frame in seconds. It only drains
/// the start delay; physics advance one fixed step per running frame.
/// A non-finite or negative `dt` counts as zero.
pub fn tick(state: &mut SessionState, dt: f64) -> TickStatus {
    let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
    match state.phase {
        SessionPhase::Cancelled => return TickStatus::Cancelled,
        SessionPhase::Ended(outcome) => return outcome.into(),
        SessionPhase::AwaitingStart { remaining_secs } => {
            let remaining_secs = remaining_secs - dt;
            state.phase = if remaining_secs <= 0.0 {
                log::debug!("Level {} running", state.config.level);
                SessionPhase::Running
            } else {
                SessionPhase::AwaitingStart { remaining_secs }
            };
            return TickStatus::Continue;
        }
        SessionPhase::Running => {}
    }

    match step(state) {
        Some((outcome, reason)) => {
            log::info!(
                "Level {} ended: {:?} ({:?}) at tick {}, score {}/{}",
                state.config.level,
                outcome,
                reason,
                state.tick_count,
                state.score,
                state.config.obstacle_count
            );
            state.phase = SessionPhase::Ended(outcome);
            outcome.into()
        }
        None => TickStatus::Continue,
    }
}

/// The running-phase body of a tick
fn step(state: &mut SessionState) -> Option<(Outcome, EndReason)> {
    state.tick_count += 1;
    let t = state.tick_count;

    let gravity = state.hazards.gravity_for(t, state.tuning.gravity);
    state.bird.integrate(gravity);

    let passed = state
        .field
        .advance(t, &state.config, &state.hazards, &state.tuning);
    state.score += passed;

    if state.bird.out_of_bounds(&state.tuning) {
        return Some((Outcome::GameOver, EndReason::OutOfBounds { y: state.bird.y }));
    }

    let bird_rect = state.bird.rect(&state.tuning);
    if let Some(hit) = collision::first_hit(
        &bird_rect,
        state.field.iter(),
        state.config.gap_size,
        &state.tuning,
    ) {
        return Some((Outcome::GameOver, EndReason::Collision(hit)));
    }

    if state.score >= state.config.obstacle_count {
        return Some((Outcome::LevelComplete, EndReason::Cleared));
    }

    None
}
