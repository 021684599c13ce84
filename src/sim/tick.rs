//! Per-frame simulation tick
//!
//! One call advances the tower by one fixed step. Physics constants are per
//! tick; `dt` only feeds the run clock.

use glam::Vec2;
use rand::Rng;

use super::collision::lands_on;
use super::input::TickInput;
use super::level::generate_level;
use super::spawner::{should_spawn, spawn_parameters};
use super::state::{GamePhase, GameState, Particle, Player, SoundCue};
use crate::consts::*;

/// Reset everything for a fresh run and enter `Playing`.
pub fn start_run<R: Rng>(state: &mut GameState, rng: &mut R) {
    state.platforms = generate_level(&state.tuning, rng);
    state.obstacles.clear();
    state.particles.clear();
    state.player = Player::spawn(&state.tuning);
    state.camera = Default::default();
    state.shake = Default::default();
    state.floor = 0;
    state.score = 0;
    state.time_elapsed = 0.0;
    state.time_ticks = 0;
    state.phase = GamePhase::Playing;
    log::info!("Run started: {} platforms", state.platforms.len());
}

/// Advance the game state by one tick
pub fn tick<R: Rng>(state: &mut GameState, rng: &mut R, input: &TickInput, dt: f32) {
    state.cues.clear();

    match state.phase {
        GamePhase::Start => {
            if input.jump || input.confirm {
                start_run(state, rng);
            }
            return;
        }
        GamePhase::Victory | GamePhase::GameOver => {
            if input.confirm {
                start_run(state, rng);
            }
            return;
        }
        GamePhase::Playing => {}
    }

    state.time_ticks += 1;
    state.time_elapsed += dt;

    update_status(&mut state.player);
    apply_controls(state, input);
    integrate(&mut state.player, &state.tuning);
    contain(&mut state.player, &state.tuning);
    resolve_platforms(state);

    let player_y = state.player.pos.y;
    state.camera.follow(player_y, state.tuning.canvas_height);

    spawn_obstacles(state, rng);
    update_obstacles(state, rng);
    check_terminal(state);
    update_effects(state);
}

/// Stun countdown, then invincibility countdown
fn update_status(player: &mut Player) {
    if player.stun.is_active() {
        if player.stun.tick() {
            // Full window starts now; it begins counting next tick
            player.invincibility.arm();
        }
    } else {
        player.invincibility.tick();
    }
}

/// Horizontal steering, friction and jumping
fn apply_controls(state: &mut GameState, input: &TickInput) {
    let t = &state.tuning;
    let player = &mut state.player;

    if player.is_stunned() {
        player.vel.x *= t.friction;
        return;
    }

    if input.left {
        player.vel.x = -t.move_speed;
        player.facing_right = false;
    } else if input.right {
        player.vel.x = t.move_speed;
        player.facing_right = true;
    } else {
        player.vel.x *= t.friction;
    }

    if input.jump && player.grounded {
        player.vel.y = t.jump_force;
        player.grounded = false;
        player.jumping = true;
        state.cues.push(SoundCue::Jump);
    }
}

/// Gravity then explicit Euler step
fn integrate(player: &mut Player, tuning: &crate::Tuning) {
    player.vel.y += tuning.gravity;
    player.pos += player.vel;
}

/// Confine to the tower once the feet leave the ground band, to the screen
/// while standing or hopping near the ground
fn contain(player: &mut Player, tuning: &crate::Tuning) {
    let (min_x, max_x) = if player.bottom() < CLIMB_THRESHOLD_Y {
        (tuning.tower_left(), tuning.tower_right())
    } else {
        (0.0, tuning.canvas_width)
    };

    if player.pos.x < min_x {
        player.pos.x = min_x;
    }
    if player.pos.x + player.width > max_x {
        player.pos.x = max_x - player.width;
    }
}

/// One-way platform landings
fn resolve_platforms(state: &mut GameState) {
    let player = &mut state.player;
    player.grounded = false;

    // Ledges never overlap, so at most one normally triggers
    let mut landed_floor = None;
    for platform in &state.platforms {
        if lands_on(&player.rect(), player.vel.y, &platform.rect) {
            player.pos.y = platform.rect.top() - player.height;
            player.vel.y = 0.0;
            player.grounded = true;
            player.jumping = false;
            landed_floor = Some(platform.floor);
        }
    }

    if let Some(floor) = landed_floor {
        state.reach_floor(floor);
    }
}

fn spawn_obstacles<R: Rng>(state: &mut GameState, rng: &mut R) {
    if !should_spawn(&state.tuning, state.floor, rng) {
        return;
    }
    let spec = spawn_parameters(
        &state.tuning,
        state.floor,
        state.player.pos.x,
        state.camera.visible_top(),
        rng,
    );
    state.obstacles.push(spec.into_obstacle());
}

/// Fall, spin, hit test and cleanup
fn update_obstacles<R: Rng>(state: &mut GameState, rng: &mut R) {
    let mut hit_at = None;
    let despawn_y = state.player.pos.y + state.tuning.canvas_height + DESPAWN_MARGIN;

    let player = &state.player;
    state.obstacles.retain_mut(|obs| {
        obs.rect.y += obs.speed;
        obs.rotation += OBSTACLE_SPIN;

        // One hit per tick; the stun it causes shields the rest
        if hit_at.is_none() && player.is_vulnerable() && player.rect().overlaps(&obs.rect) {
            hit_at = Some(Vec2::new(obs.rect.x, obs.rect.y));
            return false;
        }
        obs.rect.y <= despawn_y
    });

    if let Some(at) = hit_at {
        take_hit(state, at, rng);
    }
}

/// Apply an obstacle strike at `at`
fn take_hit<R: Rng>(state: &mut GameState, at: Vec2, rng: &mut R) {
    let player = &mut state.player;
    player.lives = player.lives.saturating_sub(1);
    player.stun.arm();
    player.vel.y = 0.0;
    log::debug!("Hit! {} lives left", player.lives);

    state.shake.trigger(HIT_SHAKE);
    state.cues.push(SoundCue::Hit);

    for _ in 0..HIT_PARTICLES {
        let vel = Vec2::new(rng.random::<f32>() - 0.5, rng.random::<f32>() - 0.5) * PARTICLE_SPEED;
        state.particles.push(Particle {
            pos: at,
            vel,
            life: PARTICLE_LIFE,
            color: DEBRIS_COLOR,
        });
    }
}

/// Game over takes priority over victory
fn check_terminal(state: &mut GameState) {
    if state.phase != GamePhase::Playing {
        return;
    }

    if state.player.lives == 0 {
        state.phase = GamePhase::GameOver;
        log::info!("Game over on floor {}", state.floor);
    } else if state.player.pos.y <= state.tuning.victory_y() {
        state.phase = GamePhase::Victory;
        state.score += state.player.lives as u64 * SCORE_PER_LIFE;
        state.cues.push(SoundCue::Win);
        log::info!("Victory in {:.2}s", state.time_elapsed);
    }
}

/// Particles and screen shake
fn update_effects(state: &mut GameState) {
    let gravity = state.tuning.gravity;
    state.particles.retain_mut(|p| {
        p.pos.x += p.vel.x;
        p.pos.y += p.vel.y + gravity;
        p.life = p.life.saturating_sub(1);
        p.life > 0
    });

    state.shake.decay(SHAKE_DECAY, SHAKE_SNAP);
}
