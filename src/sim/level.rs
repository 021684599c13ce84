//! Tower layout generation
//!
//! One wide ground slab plus, for every floor, a left and right ledge with a
//! random gap between them that the player jumps through.

use rand::Rng;

use super::collision::Rect;
use super::state::Platform;
use crate::consts::{GAP_MARGIN, GROUND_HEIGHT, GROUND_WIDTH, GROUND_X, LEDGE_THICKNESS};
use crate::tuning::Tuning;

/// Build a fresh level: the ground at floor 0 and two ledges per floor.
pub fn generate_level<R: Rng>(tuning: &Tuning, rng: &mut R) -> Vec<Platform> {
    let floors = tuning.total_floors;
    let mut platforms = Vec::with_capacity(1 + 2 * floors as usize);

    platforms.push(Platform {
        rect: Rect::new(GROUND_X, 0.0, GROUND_WIDTH, GROUND_HEIGHT),
        floor: 0,
    });

    let left = tuning.tower_left();
    let right = tuning.tower_right();
    let span = (tuning.tower_width - GAP_MARGIN).max(0.0);

    for floor in 1..=floors {
        let y = -(floor as f32) * tuning.floor_height;
        let gap_x = gap_position(left, right, span, tuning.gap_width, rng);
        let gap_end = gap_x + tuning.gap_width;

        platforms.push(Platform {
            rect: Rect::new(left, y, gap_x - left, LEDGE_THICKNESS),
            floor,
        });
        platforms.push(Platform {
            rect: Rect::new(gap_end, y, right - gap_end, LEDGE_THICKNESS),
            floor,
        });
    }

    log::debug!("Generated level with {} platforms", platforms.len());
    platforms
}

/// Left edge of a floor's gap, kept so the whole gap fits inside the tower
fn gap_position<R: Rng>(left: f32, right: f32, span: f32, gap_width: f32, rng: &mut R) -> f32 {
    let x = left + rng.random::<f32>() * span;
    x.clamp(left, (right - gap_width).max(left))
}

/// The gap (start, end) on `floor`, if the level has that floor
pub fn gap_on_floor(platforms: &[Platform], floor: u32) -> Option<(f32, f32)> {
    let mut ledges = platforms.iter().filter(|p| p.floor == floor && floor > 0);
    let a = ledges.next()?;
    let b = ledges.next()?;
    let (l, r) = if a.rect.x <= b.rect.x { (a, b) } else { (b, a) };
    Some((l.rect.right(), r.rect.left()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_covers_every_floor() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(7);
        let level = generate_level(&tuning, &mut rng);

        assert_eq!(level.len(), 1 + 2 * 16);
        assert!(level[0].is_ground());
        for floor in 0..=16 {
            assert!(level.iter().any(|p| p.floor == floor), "missing floor {floor}");
        }
    }

    #[test]
    fn test_ledges_stay_in_tower() {
        let tuning = Tuning::default();
        for seed in 0..50 {
            let mut rng = Pcg32::seed_from_u64(seed);
            let level = generate_level(&tuning, &mut rng);
            for p in level.iter().filter(|p| !p.is_ground()) {
                assert!(p.rect.left() >= 200.0 - 1e-3);
                assert!(p.rect.right() <= 600.0 + 1e-3);
                assert!(p.rect.width >= 0.0);
                assert_eq!(p.rect.y, -(p.floor as f32) * 120.0);
                assert_eq!(p.rect.height, LEDGE_THICKNESS);
            }
            for floor in 1..=16 {
                let (start, end) = gap_on_floor(&level, floor).unwrap();
                assert!((end - start - 90.0).abs() < 1e-3);
                assert!(start >= 200.0 && end <= 600.0);
            }
        }
    }

    #[test]
    fn test_regeneration_changes_gaps() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(11);
        let first = generate_level(&tuning, &mut rng);
        let second = generate_level(&tuning, &mut rng);
        assert_eq!(first.len(), second.len());
        assert_ne!(first, second);
    }

    #[test]
    fn test_ground_gap_lookup() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let level = generate_level(&tuning, &mut rng);
        assert!(gap_on_floor(&level, 0).is_none());
        assert!(gap_on_floor(&level, 17).is_none());
    }
}
