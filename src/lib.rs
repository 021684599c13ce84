//! Tower Climb - A single-screen tower climbing arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, spawning, game state)
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences (audio, effects)
//! - `ui`: HUD and overlay text
//! - `renderer`: Canvas 2D drawing (colors shared with native)
//! - `audio`: Web Audio sound cues (wasm only)

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use settings::Settings;
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
///
/// World units are canvas pixels. Y grows downward, so climbing means
/// decreasing Y; the ground surface sits at y = 0. Speeds and accelerations
/// are per simulation tick (one tick per animation frame).
pub mod consts {
    /// Nominal frame time used by hosts without a real clock
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Physics
    pub const GRAVITY: f32 = 0.6;
    pub const FRICTION: f32 = 0.8;
    pub const MOVE_SPEED: f32 = 6.0;
    pub const JUMP_FORCE: f32 = -16.0;

    /// Status effects (ticks)
    pub const STUN_DURATION: u32 = 60;
    pub const INVINCIBILITY_DURATION: u32 = 120;

    /// Viewport
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;

    /// Tower layout
    pub const TOWER_WIDTH: f32 = 400.0;
    pub const FLOOR_HEIGHT: f32 = 120.0; // Distance between floors
    pub const TOTAL_FLOORS: u32 = 16;
    pub const LEDGE_THICKNESS: f32 = 20.0;
    pub const GAP_WIDTH: f32 = 90.0;
    /// Gap left edge is drawn from [0, TOWER_WIDTH - GAP_MARGIN)
    pub const GAP_MARGIN: f32 = 120.0;

    /// Ground spans far past the viewport on both sides
    pub const GROUND_X: f32 = -2000.0;
    pub const GROUND_WIDTH: f32 = 4000.0;
    pub const GROUND_HEIGHT: f32 = 100.0;

    /// Player
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 60.0;
    pub const HEAD_RADIUS: f32 = 25.0; // Big head mode
    pub const STARTING_LIVES: u8 = 3;

    /// Above this height (y below it) the player is confined to the tower
    pub const CLIMB_THRESHOLD_Y: f32 = -50.0;
    /// Horizontal inset on both platform edges before a landing counts
    pub const EDGE_INSET: f32 = 5.0;
    /// How far the previous bottom may sit below a platform top and still land
    pub const LANDING_TOLERANCE: f32 = 15.0;
    /// Victory triggers this far below the top of the tower
    pub const VICTORY_MARGIN: f32 = 100.0;

    /// Obstacles
    pub const OBSTACLE_SIZE: f32 = 30.0;
    pub const SPAWN_BASE_CHANCE: f32 = 0.03;
    pub const SPAWN_CHANCE_PER_FLOOR: f32 = 0.003;
    /// Chance an obstacle is aimed at the player instead of placed at random
    pub const SPAWN_TARGET_CHANCE: f32 = 0.7;
    pub const SPAWN_TARGET_SPREAD: f32 = 60.0;
    /// Obstacles appear this far above the visible top edge
    pub const SPAWN_ABOVE_SCREEN: f32 = 100.0;
    pub const FALL_SPEED_BASE: f32 = 5.0;
    pub const FALL_SPEED_RANDOM: f32 = 4.0;
    pub const FALL_SPEED_PER_FLOOR: f32 = 0.2;
    pub const OBSTACLE_SPIN: f32 = 0.1;
    /// Untargeted obstacles keep this far clear of the tower's right edge
    pub const SPAWN_EDGE_MARGIN: f32 = 40.0;
    /// Obstacles a screen height plus this far below the player's top are discarded
    pub const DESPAWN_MARGIN: f32 = 200.0;

    /// Hit feedback
    pub const HIT_SHAKE: f32 = 20.0;
    pub const SHAKE_DECAY: f32 = 0.9;
    pub const SHAKE_SNAP: f32 = 0.5;
    pub const HIT_PARTICLES: usize = 8;
    pub const PARTICLE_LIFE: u32 = 30;
    pub const PARTICLE_SPEED: f32 = 10.0;
    /// Hit debris (the palette's alert red)
    pub const DEBRIS_COLOR: u32 = 0xe31b23;

    /// Camera keeps the player at this fraction of the viewport height
    pub const CAMERA_ANCHOR: f32 = 0.6;
    pub const CAMERA_SMOOTHING: f32 = 0.1;

    /// Score
    pub const SCORE_PER_FLOOR: u64 = 100;
    pub const SCORE_PER_LIFE: u64 = 500;
}

/// Left edge of the tower in world coordinates
#[inline]
pub fn tower_left(canvas_width: f32, tower_width: f32) -> f32 {
    (canvas_width - tower_width) / 2.0
}

/// Right edge of the tower in world coordinates
#[inline]
pub fn tower_right(canvas_width: f32, tower_width: f32) -> f32 {
    (canvas_width + tower_width) / 2.0
}

/// Total climbable height (the top ledge sits at `-tower_height`)
#[inline]
pub fn tower_height(total_floors: u32, floor_height: f32) -> f32 {
    total_floors as f32 * floor_height
}

#[cfg(test)]
mod tests {
    use super::consts::*;
    use super::*;

    #[test]
    fn test_tower_bounds_centered() {
        assert_eq!(tower_left(CANVAS_WIDTH, TOWER_WIDTH), 200.0);
        assert_eq!(tower_right(CANVAS_WIDTH, TOWER_WIDTH), 600.0);
        assert_eq!(tower_height(TOTAL_FLOORS, FLOOR_HEIGHT), 1920.0);
    }
}
