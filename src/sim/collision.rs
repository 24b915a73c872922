//! Collision detection between the bird and obstacles
//!
//! Everything is an axis-aligned rectangle. Touching edges do not collide:
//! all four comparisons are strict.

use glam::DVec2;
use serde::Serialize;

use super::obstacle::Obstacle;
use crate::tuning::Tuning;

/// Axis-aligned rectangle, y grows downward
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    /// Top-left corner
    pub min: DVec2,
    pub size: DVec2,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            min: DVec2::new(x, y),
            size: DVec2::new(width, height),
        }
    }

    #[inline]
    pub fn max(&self) -> DVec2 {
        self.min + self.size
    }

    /// Strict overlap on both axes
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        let (a_min, a_max) = (self.min, self.max());
        let (b_min, b_max) = (other.min, other.max());
        a_min.x < b_max.x && a_max.x > b_min.x && a_min.y < b_max.y && a_max.y > b_min.y
    }
}

/// Which part of an obstacle the bird hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HitPart {
    Top,
    Bottom,
    Laser,
}

/// First collision found in a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Hit {
    pub obstacle_id: u32,
    pub part: HitPart,
}

/// Test the bird against one obstacle.
///
/// Top and bottom segments only count while the obstacle is tangible; the
/// laser counts whenever it is on, glitched or not.
pub fn bird_obstacle_collision(
    bird: &Rect,
    obstacle: &Obstacle,
    gap_size: f64,
    tuning: &Tuning,
) -> Option<HitPart> {
    if obstacle.tangible {
        if bird.overlaps(&obstacle.top_rect(tuning)) {
            return Some(HitPart::Top);
        }
        if bird.overlaps(&obstacle.bottom_rect(gap_size, tuning)) {
            return Some(HitPart::Bottom);
        }
    }

    if obstacle.laser_on && bird.overlaps(&obstacle.laser_rect(gap_size, tuning)) {
        return Some(HitPart::Laser);
    }

    None
}

/// Test the bird against the whole field, stopping at the first hit
pub fn first_hit<'a>(
    bird: &Rect,
    obstacles: impl IntoIterator<Item = &'a Obstacle>,
    gap_size: f64,
    tuning: &Tuning,
) -> Option<Hit> {
    obstacles.into_iter().find_map(|obstacle| {
        bird_obstacle_collision(bird, obstacle, gap_size, tuning).map(|part| Hit {
            obstacle_id: obstacle.id,
            part,
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const GAP: f64 = 150.0;

    fn bird_at(y: f64) -> Rect {
        Rect::new(150.0, y, 36.0, 36.0)
    }

    #[test]
    fn test_rect_overlap_strict() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.overlaps(&Rect::new(5.0, 5.0, 10.0, 10.0)));
        // Shared edges are not collisions
        assert!(!a.overlaps(&Rect::new(10.0, 0.0, 10.0, 10.0)));
        assert!(!a.overlaps(&Rect::new(0.0, 10.0, 10.0, 10.0)));
        assert!(!a.overlaps(&Rect::new(-10.0, 0.0, 10.0, 10.0)));
        assert!(!a.overlaps(&Rect::new(0.0, -10.0, 10.0, 10.0)));
    }

    #[test]
    fn test_bird_inside_gap_is_safe() {
        let tuning = Tuning::default();
        let obstacle = Obstacle::new(0, 140.0, 200.0);
        // Gap spans 200..350, bird spans 250..286
        assert_eq!(bird_obstacle_collision(&bird_at(250.0), &obstacle, GAP, &tuning), None);
        // Exactly flush with both gap edges
        assert_eq!(bird_obstacle_collision(&bird_at(200.0), &obstacle, GAP, &tuning), None);
        assert_eq!(bird_obstacle_collision(&bird_at(314.0), &obstacle, GAP, &tuning), None);
    }

    #[test]
    fn test_bird_hits_top_and_bottom() {
        let tuning = Tuning::default();
        let obstacle = Obstacle::new(0, 140.0, 200.0);
        assert_eq!(
            bird_obstacle_collision(&bird_at(190.0), &obstacle, GAP, &tuning),
            Some(HitPart::Top)
        );
        assert_eq!(
            bird_obstacle_collision(&bird_at(320.0), &obstacle, GAP, &tuning),
            Some(HitPart::Bottom)
        );
    }

    #[test]
    fn test_intangible_obstacle_is_passable() {
        let tuning = Tuning::default();
        let mut obstacle = Obstacle::new(0, 140.0, 200.0);
        obstacle.tangible = false;
        assert_eq!(bird_obstacle_collision(&bird_at(10.0), &obstacle, GAP, &tuning), None);
    }

    #[test]
    fn test_laser_ignores_tangibility() {
        let tuning = Tuning::default();
        let mut obstacle = Obstacle::new(0, 140.0, 200.0);
        obstacle.tangible = false;
        obstacle.laser_on = true;
        assert_eq!(
            bird_obstacle_collision(&bird_at(250.0), &obstacle, GAP, &tuning),
            Some(HitPart::Laser)
        );
    }

    #[test]
    fn test_no_horizontal_overlap_no_hit() {
        let tuning = Tuning::default();
        // Obstacle's left edge flush with bird's right edge
        let obstacle = Obstacle::new(0, 186.0, 200.0);
        assert_eq!(bird_obstacle_collision(&bird_at(10.0), &obstacle, GAP, &tuning), None);
    }

    #[test]
    fn test_first_hit_short_circuits() {
        let tuning = Tuning::default();
        let obstacles = [
            Obstacle::new(0, 500.0, 200.0),
            Obstacle::new(1, 140.0, 200.0),
            Obstacle::new(2, 150.0, 200.0),
        ];
        let hit = first_hit(&bird_at(10.0), &obstacles, GAP, &tuning);
        assert_eq!(
            hit,
            Some(Hit {
                obstacle_id: 1,
                part: HitPart::Top
            })
        );
    }
}
