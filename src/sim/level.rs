//! Level-to-difficulty mapping
//!
//! Every level resolves to an era (theme + hazard) and a set of difficulty
//! numbers. The formulas are fixed; changing them changes every level.

use serde::{Deserialize, Serialize};

use crate::consts::MAX_LEVEL;

/// Hazard mechanics introduced by the eras
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HazardType {
    /// Obstacle gaps bob up and down
    MovingPistons,
    /// Obstacles periodically become intangible
    Glitching,
    /// A laser spans the gap half of the time
    LaserGrids,
    /// Gravity alternates between heavy and light
    ShiftingGravity,
}

/// Opaque presentation tags for an era. The simulation never reads these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EraTheme {
    pub background: &'static str,
    pub bird: &'static str,
    pub obstacle: &'static str,
    pub laser: Option<&'static str>,
    pub glitch: Option<&'static str>,
}

/// A themed band of levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Era {
    pub name: &'static str,
    /// First level of the era (inclusive)
    pub start_level: u32,
    /// Last level of the era (inclusive)
    pub end_level: u32,
    pub theme: EraTheme,
    pub hazard: Option<HazardType>,
}

impl Era {
    #[inline]
    pub fn contains(&self, level: u32) -> bool {
        level >= self.start_level && level <= self.end_level
    }
}

/// All eras, in ascending, contiguous level order
pub static ERAS: [Era; 5] = [
    Era {
        name: "Prehistoric Peril",
        start_level: 1,
        end_level: 1000,
        theme: EraTheme {
            background: "from-sky-300 to-emerald-400",
            bird: "bg-yellow-400 border-yellow-600",
            obstacle: "bg-green-600 border-green-800",
            laser: None,
            glitch: None,
        },
        hazard: None,
    },
    Era {
        name: "Industrial Revolution",
        start_level: 1001,
        end_level: 2000,
        theme: EraTheme {
            background: "from-slate-500 to-slate-700",
            bird: "bg-gray-300 border-gray-500",
            obstacle: "bg-orange-900 border-stone-950",
            laser: None,
            glitch: None,
        },
        hazard: Some(HazardType::MovingPistons),
    },
    Era {
        name: "The Digital Age",
        start_level: 2001,
        end_level: 3000,
        theme: EraTheme {
            background: "from-black to-blue-900",
            bird: "bg-cyan-300 border-cyan-500",
            obstacle: "bg-indigo-700 border-indigo-900",
            laser: None,
            glitch: Some("bg-fuchsia-500"),
        },
        hazard: Some(HazardType::Glitching),
    },
    Era {
        name: "Cyberpunk Future",
        start_level: 3001,
        end_level: 4000,
        theme: EraTheme {
            background: "from-purple-900 to-black",
            bird: "bg-pink-400 border-pink-600",
            obstacle: "bg-gray-800 border-gray-950",
            laser: Some("bg-red-500"),
            glitch: None,
        },
        hazard: Some(HazardType::LaserGrids),
    },
    Era {
        name: "Cosmic Void",
        start_level: 4001,
        end_level: MAX_LEVEL,
        theme: EraTheme {
            background: "from-indigo-900 to-black",
            bird: "bg-white border-gray-300",
            obstacle: "bg-purple-500 border-purple-700",
            laser: None,
            glitch: None,
        },
        hazard: Some(HazardType::ShiftingGravity),
    },
];

/// Difficulty scaling bases
const BASE_SPEED: f64 = 3.0;
const MAX_SPEED_BONUS: f64 = 5.0;
const BASE_GAP: f64 = 200.0;
const MIN_GAP: f64 = 110.0;
const BASE_SPACING: f64 = 400.0;
const MIN_SPACING: f64 = 300.0;
const BASE_OBSTACLE_COUNT: u32 = 10;
const LEVELS_PER_EXTRA_OBSTACLE: u32 = 50;

/// Everything the simulation needs to know about one level
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LevelConfig {
    pub level: u32,
    pub era: Era,
    /// Horizontal scroll per tick (px)
    pub speed: f64,
    /// Vertical size of each obstacle's gap (px)
    pub gap_size: f64,
    /// Horizontal distance between consecutive obstacles (px)
    pub obstacle_spacing: f64,
    /// Obstacles to clear to finish the level
    pub obstacle_count: u32,
    /// Active hazards, in era order
    pub hazards: Vec<HazardType>,
}

impl LevelConfig {
    #[inline]
    pub fn has_hazard(&self, hazard: HazardType) -> bool {
        self.hazards.contains(&hazard)
    }
}

/// Find the era a level belongs to, falling back to the last era
pub fn era_for_level(level: u32) -> &'static Era {
    ERAS.iter()
        .find(|era| era.contains(level))
        .unwrap_or(&ERAS[ERAS.len() - 1])
}

/// Hazards of every era that has started by `level`.
///
/// This is cumulative: a Digital Age level still has Industrial Revolution
/// pistons. Kept as-is; later eras stack earlier mechanics.
pub fn active_hazards(level: u32) -> Vec<HazardType> {
    ERAS.iter()
        .filter(|era| level >= era.start_level)
        .filter_map(|era| era.hazard)
        .collect()
}

/// Resolve the full configuration for a level.
///
/// Pure: the same level always yields the same config. Level 0 and levels
/// past [`MAX_LEVEL`] are not rejected; they resolve through the same
/// formulas and the last-era fallback.
pub fn resolve_level_config(level: u32) -> LevelConfig {
    let l = level as f64;

    let speed = BASE_SPEED + MAX_SPEED_BONUS.min(l * 0.002);
    let gap_size = MIN_GAP.max(BASE_GAP - l * 0.02);
    let obstacle_spacing = MIN_SPACING.max(BASE_SPACING - l * 0.01);
    let obstacle_count = BASE_OBSTACLE_COUNT + level / LEVELS_PER_EXTRA_OBSTACLE;

    LevelConfig {
        level,
        era: *era_for_level(level),
        speed,
        gap_size,
        obstacle_spacing,
        obstacle_count,
        hazards: active_hazards(level),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_era_ranges() {
        let expected = [
            (1, 1000, "Prehistoric Peril"),
            (1001, 2000, "Industrial Revolution"),
            (2001, 3000, "The Digital Age"),
            (3001, 4000, "Cyberpunk Future"),
            (4001, 10_000, "Cosmic Void"),
        ];
        for (start, end, name) in expected {
            for level in [start, (start + end) / 2, end] {
                assert_eq!(resolve_level_config(level).era.name, name, "level {level}");
            }
        }
    }

    #[test]
    fn test_eras_are_contiguous() {
        assert_eq!(ERAS[0].start_level, 1);
        for pair in ERAS.windows(2) {
            assert_eq!(pair[0].end_level + 1, pair[1].start_level);
        }
        assert_eq!(ERAS[ERAS.len() - 1].end_level, MAX_LEVEL);
    }

    #[test]
    fn test_out_of_range_falls_back_to_last_era() {
        assert_eq!(era_for_level(0).name, "Cosmic Void");
        assert_eq!(era_for_level(MAX_LEVEL + 1).name, "Cosmic Void");
        // Level 0 has no started eras, so no hazards either
        assert!(active_hazards(0).is_empty());
    }

    #[test]
    fn test_obstacle_count_examples() {
        assert_eq!(resolve_level_config(1).obstacle_count, 10);
        assert_eq!(resolve_level_config(49).obstacle_count, 10);
        assert_eq!(resolve_level_config(50).obstacle_count, 11);
        assert_eq!(resolve_level_config(1000).obstacle_count, 30);
    }

    #[test]
    fn test_level_one_values() {
        let config = resolve_level_config(1);
        assert!((config.speed - 3.002).abs() < 1e-9);
        assert!((config.gap_size - 199.98).abs() < 1e-9);
        assert!((config.obstacle_spacing - 399.99).abs() < 1e-9);
        assert!(config.hazards.is_empty());
    }

    #[test]
    fn test_speed_caps_at_eight() {
        assert_eq!(resolve_level_config(2500).speed, 8.0);
        assert_eq!(resolve_level_config(7000).speed, 8.0);
        assert!(resolve_level_config(2499).speed < 8.0);
    }

    #[test]
    fn test_gap_and_spacing_floors() {
        assert_eq!(resolve_level_config(4500).gap_size, 110.0);
        assert_eq!(resolve_level_config(10_000).gap_size, 110.0);
        assert_eq!(resolve_level_config(10_000).obstacle_spacing, 300.0);
    }

    #[test]
    fn test_hazards_are_cumulative() {
        let config = resolve_level_config(2000);
        assert_eq!(config.era.name, "Industrial Revolution");
        assert_eq!(config.hazards, vec![HazardType::MovingPistons]);

        // Digital Age level still carries the Industrial Revolution pistons
        let config = resolve_level_config(2001);
        assert_eq!(config.era.name, "The Digital Age");
        assert!(config.has_hazard(HazardType::MovingPistons));
        assert!(config.has_hazard(HazardType::Glitching));

        let config = resolve_level_config(5000);
        assert_eq!(
            config.hazards,
            vec![
                HazardType::MovingPistons,
                HazardType::Glitching,
                HazardType::LaserGrids,
                HazardType::ShiftingGravity,
            ]
        );
    }

    #[test]
    fn test_resolve_is_pure() {
        assert_eq!(resolve_level_config(3333), resolve_level_config(3333));
    }

    proptest! {
        #[test]
        fn prop_difficulty_is_monotonic(level in 1u32..MAX_LEVEL) {
            let a = resolve_level_config(level);
            let b = resolve_level_config(level + 1);
            prop_assert!(b.obstacle_count >= a.obstacle_count);
            prop_assert!(b.speed >= a.speed);
            prop_assert!(b.gap_size <= a.gap_size);
            prop_assert!(b.obstacle_spacing <= a.obstacle_spacing);
        }

        #[test]
        fn prop_bounds_hold(level in 1u32..=MAX_LEVEL) {
            let config = resolve_level_config(level);
            prop_assert!(config.speed <= 8.0);
            prop_assert!(config.gap_size >= 110.0);
            prop_assert!(config.obstacle_spacing >= 300.0);
            prop_assert!(config.era.contains(level));
        }

        #[test]
        fn prop_exactly_one_era_matches(level in 1u32..=MAX_LEVEL) {
            prop_assert_eq!(ERAS.iter().filter(|e| e.contains(level)).count(), 1);
        }
    }
}
