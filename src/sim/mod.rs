//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per running frame
//! - Seeded RNG only
//! - Stable iteration order (by obstacle ID)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod bird;
pub mod collision;
pub mod hazard;
pub mod level;
pub mod obstacle;
pub mod session;
pub mod state;
pub mod tick;

pub use bird::Bird;
pub use collision::{Hit, HitPart, Rect, bird_obstacle_collision, first_hit};
pub use hazard::{GravityPhase, HazardEngine};
pub use level::{ERAS, Era, EraTheme, HazardType, LevelConfig, active_hazards, era_for_level, resolve_level_config};
pub use obstacle::{Obstacle, ObstacleField, ObstacleSprite};
pub use session::{LoopSummary, NoEvents, Session, SessionEvents, TickResult, run_until_stopped};
pub use state::{Outcome, RenderState, SessionPhase, SessionState};
pub use tick::{EndReason, Frame, TickStatus, tick};
