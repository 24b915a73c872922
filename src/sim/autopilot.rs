//! Idle/demo mode - a simple bot that plays the game
//!
//! Flaps whenever the bird is falling below the middle of the next gap.
//! Good enough for smoke tests and attract screens, not for high levels.

use super::state::RenderState;
use crate::tuning::Tuning;

/// Aim this far above the gap centre so a flap's rise stays inside the gap
const AIM_BIAS: f64 = 10.0;

pub fn should_flap(render: &RenderState, tuning: &Tuning) -> bool {
    if render.awaiting_start() {
        return false;
    }

    let target = match render.next_obstacle(tuning) {
        Some(obstacle) => obstacle.gap_y + render.gap_size / 2.0 + AIM_BIAS,
        None => tuning.viewport_height / 2.0,
    };

    let bird_center = render.bird.y + tuning.bird_size / 2.0;
    bird_center > target && render.bird.velocity >= 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::level::resolve_level_config;
    use crate::sim::session::{Session, run_until_stopped};
    use crate::sim::tick::TickStatus;

    #[test]
    fn test_autopilot_outlives_free_fall() {
        let mut session = Session::detached(resolve_level_config(1), Tuning::default(), 2024);
        session.start_now();
        let tuning = session.tuning().clone();
        let summary = run_until_stopped(&mut session, 1.0 / 60.0, 200, |r| should_flap(r, &tuning));
        // Free fall dies at tick 33; the bot should still be flying
        assert_eq!(summary.last.status, TickStatus::Continue);
        assert_eq!(summary.frames, 200);
    }

    #[test]
    fn test_no_flap_during_start_pause() {
        let session = Session::detached(resolve_level_config(1), Tuning::default(), 1);
        let mut render = session.render_state();
        render.bird.y = 550.0;
        assert!(!should_flap(&render, session.tuning()));
    }
}
