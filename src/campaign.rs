//! Level progression around individual sessions
//!
//! The campaign decides which level to play next, tracks the highest level
//! reached, and persists it. Storage failures are logged and otherwise
//! ignored; they never block a transition.

use serde::Serialize;

use crate::persistence::ProgressStore;
use crate::progress::{Progress, checkpoint_for, is_checkpoint_level};
use crate::sim::{LevelConfig, Outcome, Session, SessionEvents, resolve_level_config};
use crate::tuning::Tuning;

/// Which screen the host should show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Screen {
    MainMenu,
    Playing,
    GameOver,
    LevelComplete,
}

pub struct Campaign {
    tuning: Tuning,
    store: Box<dyn ProgressStore>,
    progress: Progress,
    current_level: u32,
    screen: Screen,
}

impl Campaign {
    /// Load saved progress and open on the main menu at the highest level
    pub fn new(tuning: Tuning, store: impl ProgressStore + 'static) -> Self {
        let progress = match store.load() {
            Ok(Some(progress)) => {
                log::info!("Loaded progress: highest level {}", progress.highest_level);
                progress.sanitized()
            }
            Ok(None) => {
                log::info!("No saved progress, starting fresh");
                Progress::default()
            }
            Err(e) => {
                log::error!("Failed to load progress: {e}");
                Progress::default()
            }
        };

        Self {
            tuning,
            store: Box::new(store),
            current_level: progress.highest_level,
            progress,
            screen: Screen::MainMenu,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn current_level(&self) -> u32 {
        self.current_level
    }

    pub fn highest_level(&self) -> u32 {
        self.progress.highest_level
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Main menu shows "continue" instead of "start" once past level 1
    pub fn can_continue(&self) -> bool {
        self.progress.highest_level > 1
    }

    pub fn level_config(&self) -> LevelConfig {
        resolve_level_config(self.current_level)
    }

    /// Level a retry after game over restarts from
    pub fn checkpoint(&self) -> u32 {
        checkpoint_for(self.current_level, self.tuning.checkpoint_interval)
    }

    /// The level just cleared closes a checkpoint block
    pub fn reached_checkpoint(&self) -> bool {
        is_checkpoint_level(self.current_level, self.tuning.checkpoint_interval)
    }

    /// Start (or continue) from the highest level reached
    pub fn start(&mut self) -> u32 {
        self.current_level = self.progress.highest_level;
        self.play()
    }

    /// After a game over, restart from the current checkpoint
    pub fn retry_from_checkpoint(&mut self) -> u32 {
        self.current_level = self.checkpoint();
        self.play()
    }

    /// After clearing a level, enter the next one
    pub fn next_level(&mut self) -> u32 {
        self.current_level += 1;
        self.play()
    }

    /// Build the session for the current level
    pub fn session<E: SessionEvents>(&self, seed: u64, events: E) -> Session<E> {
        Session::new(self.level_config(), self.tuning.clone(), seed, events)
    }

    /// Apply a session's outcome
    pub fn finish(&mut self, outcome: Outcome) {
        if self.screen != Screen::Playing {
            log::warn!("Ignoring {outcome:?}: no level in progress ({:?})", self.screen);
            return;
        }

        match outcome {
            Outcome::GameOver => {
                log::info!(
                    "Lost in level {}; checkpoint is level {}",
                    self.current_level,
                    self.checkpoint()
                );
                self.screen = Screen::GameOver;
            }
            Outcome::LevelComplete => {
                log::info!("Cleared level {}", self.current_level);
                self.screen = Screen::LevelComplete;
                if self.progress.unlock(self.current_level + 1) {
                    self.persist();
                }
            }
        }
    }

    fn play(&mut self) -> u32 {
        self.screen = Screen::Playing;
        log::info!("Entering level {}", self.current_level);
        self.current_level
    }

    fn persist(&mut self) {
        match self.store.save(&self.progress) {
            Ok(()) => log::debug!("Highest level now {}", self.progress.highest_level),
            Err(e) => log::error!("Failed to save progress: {e}"),
        }
    }
}
