//! JS-facing bindings
//!
//! The page owns rendering, input and `requestAnimationFrame`; it calls into
//! `WebGame` once per frame and stops re-arming when `tick` says so.

use wasm_bindgen::prelude::*;

use crate::campaign::{Campaign, Screen};
use crate::persistence::LocalStorageStore;
use crate::sim::{Frame, NoEvents, Outcome, Session, TickStatus};
use crate::tuning::Tuning;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Chrono-Bird (web) starting...");
}

#[wasm_bindgen]
pub struct WebGame {
    campaign: Campaign,
    session: Option<Session<NoEvents>>,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebGame {
        WebGame {
            campaign: Campaign::new(Tuning::default(), LocalStorageStore),
            session: None,
        }
    }

    /// "start", "retry" or "next"; returns the level entered
    pub fn enter(&mut self, action: &str) -> u32 {
        if let Some(session) = self.session.as_mut() {
            session.cancel();
        }
        let level = match action {
            "retry" => self.campaign.retry_from_checkpoint(),
            "next" => self.campaign.next_level(),
            _ => self.campaign.start(),
        };
        self.session = Some(self.campaign.session(super::clock_seed(), NoEvents));
        level
    }

    /// Any flap input: key, touch or pointer
    pub fn flap(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.on_flap();
        }
    }

    /// Advance one frame (`dt_ms` since the last one). Returns the render
    /// state as JSON, or an empty string once the page should stop ticking.
    pub fn tick(&mut self, dt_ms: f64) -> String {
        let Some(session) = self.session.as_mut() else {
            return String::new();
        };
        let result = session.tick(dt_ms / 1000.0);

        match result.status {
            TickStatus::GameOver => self.campaign.finish(Outcome::GameOver),
            TickStatus::LevelComplete => self.campaign.finish(Outcome::LevelComplete),
            TickStatus::Continue | TickStatus::Cancelled => {}
        }
        if result.frame == Frame::Stop {
            self.session = None;
        }

        serde_json::to_string(&result).unwrap_or_default()
    }

    /// Player navigated away mid-level
    pub fn abandon(&mut self) {
        if let Some(mut session) = self.session.take() {
            session.cancel();
        }
    }

    pub fn screen(&self) -> String {
        match self.campaign.screen() {
            Screen::MainMenu => "main_menu",
            Screen::Playing => "playing",
            Screen::GameOver => "game_over",
            Screen::LevelComplete => "level_complete",
        }
        .to_string()
    }

    pub fn current_level(&self) -> u32 {
        self.campaign.current_level()
    }

    pub fn highest_level(&self) -> u32 {
        self.campaign.highest_level()
    }

    pub fn checkpoint(&self) -> u32 {
        self.campaign.checkpoint()
    }

    pub fn reached_checkpoint(&self) -> bool {
        self.campaign.reached_checkpoint()
    }
}

impl Default for WebGame {
    fn default() -> Self {
        Self::new()
    }
}
