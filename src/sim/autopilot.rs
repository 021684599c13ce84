//! Built-in climber
//!
//! A stateless controller that reads the current state and produces the
//! input a careful player would hold this tick. Ledges are one-way, so the
//! climb is a straight jump from a spot where the feet stay on the current
//! ledge and the landing is on the ledge above (not its gap). Between
//! jumps it steers, dodges and otherwise keeps its hands off the keys.

use super::input::TickInput;
use super::level::gap_on_floor;
use super::state::{GamePhase, GameState, Obstacle, Player};
use crate::consts::EDGE_INSET;

/// Extra clearance kept from ledge edges
const EDGE_MARGIN: f32 = 3.0;
/// Slack accepted around a safe interval when deciding to jump
const JUMP_TOLERANCE: f32 = 3.0;
/// How far above the head a falling obstacle counts as a threat
const THREAT_HEIGHT: f32 = 160.0;
/// Horizontal padding around the hitbox for threat detection
const THREAT_PADDING: f32 = 10.0;

/// Choose this tick's input for `state`
pub fn autopilot(state: &GameState) -> TickInput {
    match state.phase {
        GamePhase::Start => {
            return TickInput {
                jump: true,
                ..Default::default()
            };
        }
        GamePhase::Playing => {}
        GamePhase::Victory | GamePhase::GameOver => return TickInput::default(),
    }

    let player = &state.player;
    if !player.grounded {
        return TickInput::default();
    }

    if player.is_vulnerable() {
        if let Some(threat) = incoming_threat(player, &state.obstacles) {
            return dodge(state, threat);
        }
    }

    let tuning = &state.tuning;
    let floor = standing_floor(player, tuning.floor_height);
    let Some(above) = gap_on_floor(&state.platforms, floor + 1) else {
        // Nothing left overhead
        return TickInput {
            jump: true,
            ..Default::default()
        };
    };

    let width = player.width;
    let low = tuning.tower_left();
    let high = tuning.tower_right() - width;

    // Positions reachable without walking off the current ledge
    let segment = match gap_on_floor(&state.platforms, floor) {
        Some((start, end)) if player.center_x() < (start + end) / 2.0 => {
            (low, start - EDGE_INSET - EDGE_MARGIN)
        }
        Some((_, end)) => (end + EDGE_INSET + EDGE_MARGIN - width, high),
        None => (low, high),
    };

    let mut spots = landing_spots(segment, above, width);
    if spots.is_empty() {
        // Cornered on a narrow ledge; try anywhere under the next one
        spots = landing_spots((low, high), above, width);
    }

    let coast = coast_factor(tuning.friction);
    let step = tuning.move_speed * (1.0 + coast);
    let rest = player.pos.x + player.vel.x * coast;

    let cost = |spot: (f32, f32)| approach_cost(spot, player.pos.x, rest, step);
    let Some(&(lo, hi)) = spots.iter().min_by(|a, b| cost(**a).total_cmp(&cost(**b))) else {
        return TickInput::default();
    };
    let (lo, hi) = (lo - JUMP_TOLERANCE, hi + JUMP_TOLERANCE);
    let inside = |x: f32| (lo..=hi).contains(&x);

    if inside(rest) {
        return TickInput {
            jump: true,
            ..Default::default()
        };
    }
    if inside(player.pos.x - step) {
        return steer(-1.0);
    }
    if inside(player.pos.x + step) {
        return steer(1.0);
    }

    // Overshoot by one step so a single reversal settles inside
    let target = (lo + hi) / 2.0;
    let heading_right = player.vel.x > 0.5 || (player.vel.x.abs() <= 0.5 && target >= player.pos.x);
    let waypoint = if heading_right { target + step } else { target - step };
    steer(waypoint - player.pos.x)
}

/// Floor whose ledge the feet rest on (0 is the ground)
fn standing_floor(player: &Player, floor_height: f32) -> u32 {
    let level = -player.bottom() / floor_height + 1e-3;
    if level <= 0.0 { 0 } else { level as u32 }
}

/// Distance the body keeps sliding per unit of velocity once keys are released
fn coast_factor(friction: f32) -> f32 {
    let f = friction.clamp(0.0, 0.99);
    f / (1.0 - f)
}

/// Split `segment` around the gap overhead into spots where a straight jump
/// lands on a ledge
fn landing_spots(segment: (f32, f32), gap: (f32, f32), width: f32) -> Vec<(f32, f32)> {
    let (start, end) = gap;
    let left_of_gap = start - EDGE_INSET - EDGE_MARGIN;
    let right_of_gap = end + EDGE_INSET + EDGE_MARGIN - width;

    [
        (segment.0, segment.1.min(left_of_gap)),
        (segment.0.max(right_of_gap), segment.1),
    ]
    .into_iter()
    .filter(|(lo, hi)| hi >= lo)
    .collect()
}

/// Prefer spots reachable by holding one direction
fn approach_cost(spot: (f32, f32), x: f32, rest: f32, step: f32) -> f32 {
    let (lo, hi) = (spot.0 - JUMP_TOLERANCE, spot.1 + JUMP_TOLERANCE);
    if (lo..=hi).contains(&rest) {
        return 0.0;
    }
    if hi >= x + step || lo <= x - step {
        (rest - lo).abs().min((rest - hi).abs())
    } else {
        1000.0 + (x - lo).abs().min((x - hi).abs())
    }
}

/// Nearest obstacle about to land on the player's head
fn incoming_threat<'a>(player: &Player, obstacles: &'a [Obstacle]) -> Option<&'a Obstacle> {
    let left = player.pos.x - THREAT_PADDING;
    let right = player.pos.x + player.width + THREAT_PADDING;
    let top = player.pos.y;

    obstacles
        .iter()
        .filter(|obs| obs.rect.right() > left && obs.rect.left() < right)
        .filter(|obs| obs.rect.bottom() <= top && top - obs.rect.bottom() < THREAT_HEIGHT)
        .max_by(|a, b| a.rect.bottom().total_cmp(&b.rect.bottom()))
}

/// Step out from under `threat`, away from the closer wall if needed
fn dodge(state: &GameState, threat: &Obstacle) -> TickInput {
    let player = &state.player;
    let mut dir = player.center_x() - threat.rect.center().x;
    if dir == 0.0 {
        dir = 1.0;
    }
    let room = if dir < 0.0 {
        player.pos.x - state.tuning.tower_left()
    } else {
        state.tuning.tower_right() - (player.pos.x + player.width)
    };
    if room < state.tuning.move_speed {
        dir = -dir;
    }
    steer(dir)
}

fn steer(dir: f32) -> TickInput {
    TickInput {
        left: dir < 0.0,
        right: dir > 0.0,
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{OBSTACLE_SIZE, SIM_DT};
    use crate::sim::collision::Rect;
    use crate::sim::state::ObstacleKind;
    use crate::sim::tick::{start_run, tick};
    use crate::tuning::Tuning;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn quiet_tuning() -> Tuning {
        Tuning {
            spawn_base_chance: 0.0,
            spawn_chance_per_floor: 0.0,
            ..Tuning::default()
        }
    }

    #[test]
    fn test_presses_start() {
        let state = GameState::new(Tuning::default());
        assert!(autopilot(&state).jump);
    }

    #[test]
    fn test_idle_after_game_over() {
        let mut state = GameState::new(Tuning::default());
        state.phase = GamePhase::GameOver;
        assert_eq!(autopilot(&state), TickInput::default());
    }

    #[test]
    fn test_hands_off_in_the_air() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut state = GameState::new(quiet_tuning());
        start_run(&mut state, &mut rng);
        state.player.grounded = false;
        assert_eq!(autopilot(&state), TickInput::default());
    }

    #[test]
    fn test_standing_floor() {
        let tuning = Tuning::default();
        let mut player = Player::spawn(&tuning);
        assert_eq!(standing_floor(&player, 120.0), 0);
        player.pos.y = -240.0 - player.height;
        assert_eq!(standing_floor(&player, 120.0), 2);
        player.pos.y = -300.0 - player.height;
        assert_eq!(standing_floor(&player, 120.0), 2);
    }

    #[test]
    fn test_landing_spots_avoid_gap() {
        let spots = landing_spots((200.0, 560.0), (300.0, 390.0), 40.0);
        assert_eq!(spots.len(), 2);
        assert!(spots[0].1 < 300.0 - EDGE_INSET);
        assert!(spots[1].0 + 40.0 > 390.0 + EDGE_INSET);

        // Gap flush against the wall leaves one side
        let spots = landing_spots((200.0, 560.0), (200.0, 290.0), 40.0);
        assert_eq!(spots.len(), 1);
    }

    #[test]
    fn test_dodges_falling_obstacle() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut state = GameState::new(quiet_tuning());
        start_run(&mut state, &mut rng);
        let p = &state.player;
        state.obstacles.push(Obstacle {
            rect: Rect::new(p.pos.x + 15.0, p.pos.y - 80.0, OBSTACLE_SIZE, OBSTACLE_SIZE),
            speed: 6.0,
            rotation: 0.0,
            kind: ObstacleKind::Book,
        });
        let input = autopilot(&state);
        // Obstacle sits right of center, so step left
        assert!(input.left && !input.right && !input.jump);
    }

    #[test]
    fn test_climbs_quiet_tower() {
        for seed in 0..4 {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut state = GameState::new(quiet_tuning());
            for _ in 0..20_000 {
                let input = autopilot(&state);
                tick(&mut state, &mut rng, &input, SIM_DT);
                if state.phase.is_terminal() {
                    break;
                }
            }
            assert_eq!(state.phase, GamePhase::Victory, "seed {seed} stalled on floor {}", state.floor);
            assert_eq!(state.player.lives, 3);
        }
    }
}
