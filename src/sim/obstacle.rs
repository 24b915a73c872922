//! Obstacles and the scrolling field that owns them

use rand::Rng;
use serde::Serialize;

use super::collision::Rect;
use super::hazard::HazardEngine;
use super::level::LevelConfig;
use crate::tuning::Tuning;

/// Gap centers keep this far from the top and bottom of the viewport
pub const GAP_MARGIN: f64 = 100.0;

/// One obstacle: a top segment and a bottom segment around a gap
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Obstacle {
    /// Stable within a level (spawn index)
    pub id: u32,
    /// Left edge
    pub x: f64,
    /// Top edge of the gap this tick
    pub gap_y: f64,
    /// Gap top at spawn; piston motion is an offset from here
    pub base_gap_y: f64,
    /// Participates in top/bottom collision
    pub tangible: bool,
    /// Rendering flag for the glitch effect
    pub glitching: bool,
    /// Piston direction rolled at spawn; not used by collision
    pub moving_up: bool,
    pub laser_on: bool,
}

impl Obstacle {
    pub fn new(id: u32, x: f64, gap_y: f64) -> Self {
        Self {
            id,
            x,
            gap_y,
            base_gap_y: gap_y,
            tangible: true,
            glitching: false,
            moving_up: false,
            laser_on: false,
        }
    }

    pub fn top_rect(&self, tuning: &Tuning) -> Rect {
        Rect::new(self.x, 0.0, tuning.obstacle_width, self.gap_y)
    }

    /// Extends a full viewport height below the gap, past the floor
    pub fn bottom_rect(&self, gap_size: f64, tuning: &Tuning) -> Rect {
        Rect::new(
            self.x,
            self.gap_y + gap_size,
            tuning.obstacle_width,
            tuning.viewport_height,
        )
    }

    /// Collision area of the laser: the whole gap, not the drawn beam.
    /// A bird anywhere in a lit gap is hit; see `laser_beam_rect` for drawing.
    pub fn laser_rect(&self, gap_size: f64, tuning: &Tuning) -> Rect {
        Rect::new(self.x, self.gap_y, tuning.obstacle_width, gap_size)
    }

    /// Visible beam, a thin strip centred in the gap
    pub fn laser_beam_rect(&self, gap_size: f64, tuning: &Tuning) -> Rect {
        Rect::new(
            self.x + tuning.obstacle_width / 2.0 - tuning.laser_beam_width / 2.0,
            self.gap_y,
            tuning.laser_beam_width,
            gap_size,
        )
    }

    /// Render opacity: faded while intangible
    pub fn opacity(&self) -> f32 {
        if self.tangible { 1.0 } else { 0.3 }
    }

    /// Drawing hints for this obstacle; the beam only while the laser is lit
    pub fn sprite(&self, gap_size: f64, tuning: &Tuning) -> ObstacleSprite {
        ObstacleSprite {
            id: self.id,
            opacity: self.opacity(),
            laser_beam: self
                .laser_on
                .then(|| self.laser_beam_rect(gap_size, tuning)),
        }
    }

    #[inline]
    pub fn right_edge(&self, tuning: &Tuning) -> f64 {
        self.x + tuning.obstacle_width
    }
}

/// Per-obstacle values a renderer needs beyond the obstacle itself
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ObstacleSprite {
    pub id: u32,
    pub opacity: f32,
    pub laser_beam: Option<Rect>,
}

/// An obstacle is passed on the tick its left edge crosses the bird's x
#[inline]
pub fn passed(previous_x: f64, x: f64, bird_x: f64) -> bool {
    previous_x >= bird_x && x < bird_x
}

/// The set of live obstacles, ordered by id
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ObstacleField {
    pub obstacles: Vec<Obstacle>,
}

impl ObstacleField {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the field with a fresh row of obstacles for the level.
    ///
    /// Obstacle `i` starts at `viewport_width + i * spacing` with a gap top
    /// drawn uniformly from `[100, viewport_height - gap_size - 100]`.
    pub fn spawn<R: Rng>(&mut self, config: &LevelConfig, tuning: &Tuning, rng: &mut R) {
        let min_gap_y = GAP_MARGIN;
        let max_gap_y = tuning.viewport_height - config.gap_size - GAP_MARGIN;

        self.obstacles = (0..config.obstacle_count)
            .map(|i| {
                // Viewport too short for the gap: pin to the top margin
                let gap_y = if max_gap_y > min_gap_y {
                    rng.random_range(min_gap_y..=max_gap_y)
                } else {
                    min_gap_y
                };
                let mut obstacle = Obstacle::new(
                    i,
                    tuning.viewport_width + i as f64 * config.obstacle_spacing,
                    gap_y,
                );
                obstacle.moving_up = rng.random_bool(0.5);
                obstacle
            })
            .collect();

        log::debug!(
            "Spawned {} obstacles for level {} (gap {:.1}, spacing {:.1})",
            self.obstacles.len(),
            config.level,
            config.gap_size,
            config.obstacle_spacing
        );
    }

    /// Scroll every obstacle, apply hazards, prune what has left the screen.
    ///
    /// Returns how many obstacles crossed the bird's x this tick.
    pub fn advance(
        &mut self,
        tick: u64,
        config: &LevelConfig,
        hazards: &HazardEngine,
        tuning: &Tuning,
    ) -> u32 {
        let mut passed_count = 0;

        for obstacle in &mut self.obstacles {
            let previous_x = obstacle.x;
            obstacle.x -= config.speed;
            hazards.apply(obstacle, tick);

            if passed(previous_x, obstacle.x, tuning.bird_x) {
                passed_count += 1;
            }
        }

        self.obstacles.retain(|o| o.right_edge(tuning) >= 0.0);

        passed_count
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::level::resolve_level_config;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn spawned(level: u32, seed: u64) -> (ObstacleField, LevelConfig) {
        let config = resolve_level_config(level);
        let mut field = ObstacleField::new();
        field.spawn(&config, &Tuning::default(), &mut Pcg32::seed_from_u64(seed));
        (field, config)
    }

    #[test]
    fn test_sprite_beam_and_opacity() {
        let tuning = Tuning::default();
        let mut obstacle = Obstacle::new(3, 200.0, 150.0);
        let sprite = obstacle.sprite(180.0, &tuning);
        assert_eq!(sprite.id, 3);
        assert_eq!(sprite.opacity, 1.0);
        assert_eq!(sprite.laser_beam, None);

        obstacle.laser_on = true;
        obstacle.tangible = false;
        let sprite = obstacle.sprite(180.0, &tuning);
        assert_eq!(sprite.opacity, 0.3);
        let beam = sprite.laser_beam.unwrap();
        // Centred: 200 + 80/2 - 4/2
        assert_eq!(beam, Rect::new(238.0, 150.0, 4.0, 180.0));
    }

    #[test]
    fn test_spawn_layout() {
        let (field, config) = spawned(1, 42);
        assert_eq!(field.len(), 10);
        for (i, o) in field.iter().enumerate() {
            assert_eq!(o.id, i as u32);
            assert!((o.x - (800.0 + i as f64 * config.obstacle_spacing)).abs() < 1e-9);
            assert!(o.gap_y >= 100.0);
            assert!(o.gap_y <= 600.0 - config.gap_size - 100.0);
            assert_eq!(o.gap_y, o.base_gap_y);
            assert!(o.tangible);
            assert!(!o.glitching);
            assert!(!o.laser_on);
        }
    }

    #[test]
    fn test_spawn_is_deterministic_per_seed() {
        let (a, _) = spawned(500, 7);
        let (b, _) = spawned(500, 7);
        let (c, _) = spawned(500, 8);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_spawn_replaces_field() {
        let (mut field, config) = spawned(1, 1);
        field.obstacles.push(Obstacle::new(99, 0.0, 0.0));
        field.spawn(&config, &Tuning::default(), &mut Pcg32::seed_from_u64(1));
        assert_eq!(field.len(), 10);
    }

    #[test]
    fn test_advance_scrolls_by_speed() {
        let (mut field, config) = spawned(1, 3);
        let before: Vec<f64> = field.iter().map(|o| o.x).collect();
        field.advance(1, &config, &HazardEngine::default(), &Tuning::default());
        for (o, x) in field.iter().zip(before) {
            assert!((o.x - (x - config.speed)).abs() < 1e-9);
        }
    }

    #[test]
    fn test_passed_edge() {
        assert!(passed(150.0, 147.0, 150.0));
        assert!(passed(152.0, 149.0, 150.0));
        assert!(!passed(149.0, 146.0, 150.0));
        assert!(!passed(155.0, 150.0, 150.0));
    }

    #[test]
    fn test_advance_counts_every_pass() {
        let config = resolve_level_config(1);
        let tuning = Tuning::default();
        let mut field = ObstacleField {
            obstacles: vec![
                Obstacle::new(0, 151.0, 200.0),
                Obstacle::new(1, 152.0, 200.0),
                Obstacle::new(2, 400.0, 200.0),
            ],
        };
        let passed = field.advance(1, &config, &HazardEngine::default(), &tuning);
        assert_eq!(passed, 2);
        // Already behind the bird: not counted again
        let passed = field.advance(2, &config, &HazardEngine::default(), &tuning);
        assert_eq!(passed, 0);
    }

    #[test]
    fn test_offscreen_obstacle_pruned_same_call() {
        let config = resolve_level_config(1);
        let tuning = Tuning::default();
        let mut field = ObstacleField {
            obstacles: vec![
                // After scrolling 3.002: right edge at -0.002
                Obstacle::new(0, -77.0, 200.0),
                // After scrolling: right edge at +1.998, stays
                Obstacle::new(1, -75.0, 200.0),
            ],
        };
        field.advance(1, &config, &HazardEngine::default(), &tuning);
        assert_eq!(field.len(), 1);
        assert_eq!(field.obstacles[0].id, 1);
    }
}
