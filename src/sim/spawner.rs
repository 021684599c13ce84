//! Falling obstacle spawning
//!
//! Spawn rate and fall speed climb with the floor reached. Most obstacles are
//! aimed near the player so standing still is never safe.

use rand::Rng;

use super::collision::Rect;
use super::state::{Obstacle, ObstacleKind};
use crate::consts::{OBSTACLE_SIZE, SPAWN_ABOVE_SCREEN, SPAWN_EDGE_MARGIN, SPAWN_TARGET_SPREAD};
use crate::tuning::Tuning;

/// Parameters for one new obstacle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObstacleSpec {
    pub x: f32,
    pub y: f32,
    pub speed: f32,
    pub kind: ObstacleKind,
    /// Whether the x position was aimed at the player
    pub targeted: bool,
}

impl ObstacleSpec {
    pub fn into_obstacle(self) -> Obstacle {
        Obstacle {
            rect: Rect::new(self.x, self.y, OBSTACLE_SIZE, OBSTACLE_SIZE),
            speed: self.speed,
            rotation: 0.0,
            kind: self.kind,
        }
    }
}

/// Per-tick spawn chance on `floor`, capped below 1
pub fn spawn_probability(tuning: &Tuning, floor: u32) -> f32 {
    (tuning.spawn_base_chance + floor as f32 * tuning.spawn_chance_per_floor).clamp(0.0, 0.999)
}

/// Roll the per-tick spawn trial
pub fn should_spawn<R: Rng>(tuning: &Tuning, floor: u32, rng: &mut R) -> bool {
    rng.random::<f32>() < spawn_probability(tuning, floor)
}

/// Choose kind, position and speed for a new obstacle
///
/// `visible_top` is the world y of the top screen edge; obstacles start
/// `SPAWN_ABOVE_SCREEN` above it.
pub fn spawn_parameters<R: Rng>(
    tuning: &Tuning,
    floor: u32,
    player_x: f32,
    visible_top: f32,
    rng: &mut R,
) -> ObstacleSpec {
    let kind = ObstacleKind::ALL[rng.random_range(0..ObstacleKind::ALL.len())];
    let y = visible_top - SPAWN_ABOVE_SCREEN;

    let left = tuning.tower_left();
    let right = tuning.tower_right();

    let targeted = rng.random::<f32>() < tuning.spawn_target_chance;
    let raw_x = if targeted {
        player_x + (rng.random::<f32>() * 2.0 - 1.0) * SPAWN_TARGET_SPREAD
    } else {
        left + rng.random::<f32>() * (tuning.tower_width - SPAWN_EDGE_MARGIN).max(0.0)
    };

    let mut x = raw_x;
    if x < left {
        x = left;
    }
    if x + OBSTACLE_SIZE > right {
        x = right - OBSTACLE_SIZE;
    }

    let speed = tuning.fall_speed_base
        + rng.random::<f32>() * tuning.fall_speed_random
        + floor as f32 * tuning.fall_speed_per_floor;

    ObstacleSpec {
        x,
        y,
        speed,
        kind,
        targeted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_probability_grows_with_floor() {
        let t = Tuning::default();
        assert!((spawn_probability(&t, 0) - 0.03).abs() < 1e-6);
        assert!((spawn_probability(&t, 10) - 0.06).abs() < 1e-6);
        assert!(spawn_probability(&t, 16) > spawn_probability(&t, 15));
        assert!(spawn_probability(&t, 10_000) < 1.0);
    }

    #[test]
    fn test_spawn_rate_roughly_matches() {
        let t = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let trials = 20_000;
        let hits = (0..trials).filter(|_| should_spawn(&t, 0, &mut rng)).count();
        let rate = hits as f32 / trials as f32;
        assert!((rate - 0.03).abs() < 0.01, "rate {rate}");
    }

    #[test]
    fn test_spawn_within_tower_and_above_screen() {
        let t = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(42);
        for i in 0..2000 {
            let player_x = 150.0 + (i % 500) as f32;
            let spec = spawn_parameters(&t, 5, player_x, -800.0, &mut rng);
            assert!(spec.x >= 200.0);
            assert!(spec.x + OBSTACLE_SIZE <= 600.0);
            assert_eq!(spec.y, -900.0);
            assert!(spec.speed >= 5.0 + 1.0 - 1e-4);
            assert!(spec.speed < 9.0 + 1.0 + 1e-4);
        }
    }

    #[test]
    fn test_targeted_spawns_near_player() {
        let t = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(9);
        let mut targeted = 0;
        for _ in 0..1000 {
            let spec = spawn_parameters(&t, 0, 400.0, 0.0, &mut rng);
            if spec.targeted {
                targeted += 1;
                assert!((spec.x - 400.0).abs() <= SPAWN_TARGET_SPREAD + 1e-3);
            }
        }
        // ~70% aimed at the player
        assert!((600..800).contains(&targeted), "targeted {targeted}");
    }

    #[test]
    fn test_untargeted_spawns_clear_right_edge() {
        let t = Tuning {
            spawn_target_chance: 0.0,
            ..Tuning::default()
        };
        let mut rng = Pcg32::seed_from_u64(17);
        for _ in 0..1000 {
            let spec = spawn_parameters(&t, 0, 400.0, 0.0, &mut rng);
            assert!(!spec.targeted);
            assert!(spec.x >= t.tower_left());
            assert!(spec.x + SPAWN_EDGE_MARGIN <= t.tower_right() + 1e-3);
        }
    }

    #[test]
    fn test_all_kinds_appear() {
        let t = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(5);
        let kinds: Vec<_> = (0..100)
            .map(|_| spawn_parameters(&t, 0, 400.0, 0.0, &mut rng).kind)
            .collect();
        for kind in ObstacleKind::ALL {
            assert!(kinds.contains(&kind));
        }
    }

    #[test]
    fn test_into_obstacle() {
        let spec = ObstacleSpec {
            x: 300.0,
            y: -100.0,
            speed: 6.0,
            kind: ObstacleKind::Beaker,
            targeted: false,
        };
        let obs = spec.into_obstacle();
        assert_eq!(obs.rect, Rect::new(300.0, -100.0, 30.0, 30.0));
        assert_eq!(obs.rotation, 0.0);
    }
}
