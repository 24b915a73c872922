//! Host-facing handle for one level attempt
//!
//! The host builds a `Session` from a level config, forwards flaps with
//! [`Session::on_flap`], and calls [`Session::tick`] once per frame until it
//! answers [`Frame::Stop`].

use serde::Serialize;

use super::level::LevelConfig;
use super::state::{Outcome, RenderState, SessionPhase, SessionState};
use super::tick::{Frame, TickStatus, tick};
use crate::tuning::Tuning;

/// Terminal event sinks supplied by the host. Each fires at most once per
/// session, on the tick the session ends.
pub trait SessionEvents {
    fn on_game_over(&mut self, _level: u32) {}
    fn on_level_complete(&mut self, _level: u32) {}
}

/// Event sink that ignores everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoEvents;

impl SessionEvents for NoEvents {}

/// Everything a host needs after a tick
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickResult {
    pub status: TickStatus,
    pub frame: Frame,
    pub render: RenderState,
}

pub struct Session<E: SessionEvents = NoEvents> {
    state: SessionState,
    events: E,
}

impl Session<NoEvents> {
    /// Session without event sinks; hosts poll `TickResult::status` instead
    pub fn detached(config: LevelConfig, tuning: Tuning, seed: u64) -> Self {
        Self::new(config, tuning, seed, NoEvents)
    }
}

impl<E: SessionEvents> Session<E> {
    pub fn new(config: LevelConfig, tuning: Tuning, seed: u64, events: E) -> Self {
        log::info!(
            "Level {} ({}) starting: speed {:.3}, gap {:.2}, {} obstacles, hazards {:?}, seed {}",
            config.level,
            config.era.name,
            config.speed,
            config.gap_size,
            config.obstacle_count,
            config.hazards,
            seed
        );
        Self {
            state: SessionState::new(config, tuning, seed),
            events,
        }
    }

    /// Flap input. Ignored during the start pause and after the session ends.
    pub fn on_flap(&mut self) {
        if self.state.phase == SessionPhase::Running {
            self.state.bird.flap(self.state.tuning.flap_strength);
        }
    }

    /// Skip the remaining start pause
    pub fn start_now(&mut self) {
        if let SessionPhase::AwaitingStart { .. } = self.state.phase {
            self.state.phase = SessionPhase::Running;
        }
    }

    /// Advance one frame; `dt` is wall time since the last frame in seconds
    pub fn tick(&mut self, dt: f64) -> TickResult {
        let was_terminal = self.state.phase.is_terminal();
        let status = tick(&mut self.state, dt);

        if !was_terminal {
            if let SessionPhase::Ended(outcome) = self.state.phase {
                let level = self.state.config.level;
                match outcome {
                    Outcome::GameOver => self.events.on_game_over(level),
                    Outcome::LevelComplete => self.events.on_level_complete(level),
                }
            }
        }

        TickResult {
            status,
            frame: status.frame(),
            render: self.state.snapshot(),
        }
    }

    /// Discard the session. No events fire and every later tick stops.
    pub fn cancel(&mut self) {
        if !self.state.phase.is_terminal() {
            log::info!("Level {} cancelled at tick {}", self.state.config.level, self.state.tick_count);
            self.state.phase = SessionPhase::Cancelled;
        }
    }

    pub fn render_state(&self) -> RenderState {
        self.state.snapshot()
    }

    pub fn phase(&self) -> SessionPhase {
        self.state.phase
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn tick_count(&self) -> u64 {
        self.state.tick_count
    }

    pub fn config(&self) -> &LevelConfig {
        &self.state.config
    }

    pub fn tuning(&self) -> &Tuning {
        &self.state.tuning
    }

    pub fn events(&self) -> &E {
        &self.events
    }

    /// Direct state access for tests and tools
    #[doc(hidden)]
    pub fn state_mut(&mut self) -> &mut SessionState {
        &mut self.state
    }
}

/// Summary of a driven run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoopSummary {
    /// Frames ticked (including the start pause)
    pub frames: u32,
    pub last: TickResult,
}

/// Drive a session frame by frame until it stops or `max_frames` runs out.
///
/// Before each frame `input` sees the latest render state and decides
/// whether to flap.
pub fn run_until_stopped<E, F>(
    session: &mut Session<E>,
    dt: f64,
    max_frames: u32,
    mut input: F,
) -> LoopSummary
where
    E: SessionEvents,
    F: FnMut(&RenderState) -> bool,
{
    let mut render = session.render_state();
    let mut frames = 0;

    loop {
        if input(&render) {
            session.on_flap();
        }
        let result = session.tick(dt);
        frames += 1;

        if result.frame == Frame::Stop || frames >= max_frames {
            return LoopSummary {
                frames,
                last: result,
            };
        }
        render = result.render;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::level::resolve_level_config;

    #[derive(Default)]
    struct Recorder {
        game_overs: Vec<u32>,
        completions: Vec<u32>,
    }

    impl SessionEvents for Recorder {
        fn on_game_over(&mut self, level: u32) {
            self.game_overs.push(level);
        }
        fn on_level_complete(&mut self, level: u32) {
            self.completions.push(level);
        }
    }

    fn session(level: u32) -> Session<Recorder> {
        Session::new(resolve_level_config(level), Tuning::default(), 7, Recorder::default())
    }

    #[test]
    fn test_flap_ignored_while_awaiting_start() {
        let mut s = session(1);
        s.on_flap();
        assert_eq!(s.render_state().bird.velocity, 0.0);

        s.start_now();
        s.on_flap();
        assert_eq!(s.render_state().bird.velocity, -8.0);
    }

    #[test]
    fn test_game_over_fires_once() {
        let mut s = session(1);
        s.start_now();
        let summary = run_until_stopped(&mut s, 1.0 / 60.0, 1000, |_| false);
        assert_eq!(summary.last.status, TickStatus::GameOver);
        assert_eq!(summary.last.frame, Frame::Stop);

        // Host ticking past the end changes nothing
        s.tick(1.0 / 60.0);
        s.tick(1.0 / 60.0);
        assert_eq!(s.events().game_overs, vec![1]);
        assert!(s.events().completions.is_empty());
    }

    #[test]
    fn test_level_complete_fires_once() {
        let mut s = session(1);
        s.start_now();
        let state = s.state_mut();
        state.score = state.config.obstacle_count - 1;
        state.field.obstacles = vec![crate::sim::obstacle::Obstacle::new(0, 150.0, 250.0)];

        let result = s.tick(1.0 / 60.0);
        assert_eq!(result.status, TickStatus::LevelComplete);
        s.tick(1.0 / 60.0);
        assert_eq!(s.events().completions, vec![1]);
        assert!(s.events().game_overs.is_empty());
    }

    #[test]
    fn test_cancel_stops_without_events() {
        let mut s = session(1);
        s.start_now();
        s.tick(1.0 / 60.0);
        s.cancel();
        let result = s.tick(1.0 / 60.0);
        assert_eq!(result.status, TickStatus::Cancelled);
        assert_eq!(result.frame, Frame::Stop);
        assert!(s.events().game_overs.is_empty());
        assert!(s.events().completions.is_empty());
    }

    #[test]
    fn test_cancel_after_end_keeps_outcome() {
        let mut s = session(1);
        s.start_now();
        run_until_stopped(&mut s, 1.0 / 60.0, 1000, |_| false);
        s.cancel();
        assert_eq!(s.phase(), SessionPhase::Ended(Outcome::GameOver));
    }

    #[test]
    fn test_max_frames_bounds_the_loop() {
        let mut s = session(1);
        let summary = run_until_stopped(&mut s, 0.001, 10, |_| false);
        assert_eq!(summary.frames, 10);
        assert_eq!(summary.last.frame, Frame::Continue);
        assert!(summary.last.render.awaiting_start());
    }
}
