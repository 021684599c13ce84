//! Game state and core simulation types
//!
//! Everything the presentation layer draws lives here; only `tick` and
//! `start_run` mutate it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::camera::Camera;
use super::collision::Rect;
use super::timer::{Countdown, Shake};
use crate::tuning::Tuning;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for a start input
    Start,
    /// Active gameplay
    Playing,
    /// Reached the top of the tower
    Victory,
    /// Ran out of lives
    GameOver,
}

impl GamePhase {
    /// Victory and game over wait for a restart
    pub fn is_terminal(&self) -> bool {
        matches!(self, GamePhase::Victory | GamePhase::GameOver)
    }
}

/// Discrete audio cues raised during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundCue {
    Jump,
    Hit,
    Win,
}

/// Falling obstacle variants (cosmetic only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    Book,
    Beaker,
    Ornament,
}

impl ObstacleKind {
    pub const ALL: [ObstacleKind; 3] = [ObstacleKind::Book, ObstacleKind::Beaker, ObstacleKind::Ornament];
}

/// The climber
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner of the hitbox
    pub pos: Vec2,
    pub vel: Vec2,
    pub width: f32,
    pub height: f32,
    pub grounded: bool,
    pub jumping: bool,
    pub facing_right: bool,
    /// Input lockout after a hit
    pub stun: Countdown,
    /// Damage immunity after the stun wears off
    pub invincibility: Countdown,
    pub lives: u8,
}

impl Player {
    /// Idle player shown before the first run
    pub fn idle(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(tuning.canvas_width / 2.0, -50.0),
            vel: Vec2::ZERO,
            width: tuning.player_width,
            height: tuning.player_height,
            grounded: false,
            jumping: false,
            facing_right: true,
            stun: Countdown::new(tuning.stun_duration),
            invincibility: Countdown::new(tuning.invincibility_duration),
            lives: tuning.starting_lives,
        }
    }

    /// Player standing on the ground at the start of a run
    pub fn spawn(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(tuning.canvas_width / 2.0, -tuning.player_height),
            grounded: true,
            ..Self::idle(tuning)
        }
    }

    #[inline]
    pub fn is_stunned(&self) -> bool {
        self.stun.is_active()
    }

    #[inline]
    pub fn is_invincible(&self) -> bool {
        self.invincibility.is_active()
    }

    /// Hits land only when neither stunned nor invincible
    #[inline]
    pub fn is_vulnerable(&self) -> bool {
        !self.is_stunned() && !self.is_invincible()
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos(self.pos, self.width, self.height)
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.height
    }

    /// Horizontal center of the hitbox
    #[inline]
    pub fn center_x(&self) -> f32 {
        self.pos.x + self.width / 2.0
    }
}

/// A static ledge (floor 0 is the ground)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub rect: Rect,
    pub floor: u32,
}

impl Platform {
    #[inline]
    pub fn is_ground(&self) -> bool {
        self.floor == 0
    }
}

/// A falling hazard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub rect: Rect,
    /// Fall distance per tick
    pub speed: f32,
    /// Accumulated spin (radians, cosmetic)
    pub rotation: f32,
    pub kind: ObstacleKind,
}

/// Hit debris (cosmetic, but driven by collisions)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Ticks left to live
    pub life: u32,
    /// 0xRRGGBB
    pub color: u32,
}

/// Complete simulation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub phase: GamePhase,
    /// Highest floor landed on this run
    pub floor: u32,
    /// Seconds spent playing this run (frozen at victory)
    pub time_elapsed: f32,
    pub score: u64,
    /// Simulation ticks this run
    pub time_ticks: u64,
    pub player: Player,
    pub platforms: Vec<Platform>,
    pub obstacles: Vec<Obstacle>,
    pub particles: Vec<Particle>,
    pub camera: Camera,
    pub shake: Shake,
    /// Cues raised by the latest tick
    pub cues: Vec<SoundCue>,
    pub tuning: Tuning,
}

impl GameState {
    /// Title-screen state; no level until the first run starts
    pub fn new(tuning: Tuning) -> Self {
        Self {
            phase: GamePhase::Start,
            floor: 0,
            time_elapsed: 0.0,
            score: 0,
            time_ticks: 0,
            player: Player::idle(&tuning),
            platforms: Vec::new(),
            obstacles: Vec::new(),
            particles: Vec::new(),
            camera: Camera::default(),
            shake: Shake::default(),
            cues: Vec::new(),
            tuning,
        }
    }

    /// Record a landing on `floor`. Floors only ever increase.
    pub fn reach_floor(&mut self, floor: u32) {
        if floor > self.floor {
            self.floor = floor;
            self.score = floor as u64 * crate::consts::SCORE_PER_FLOOR;
            log::debug!("Reached floor {}/{}", floor, self.tuning.total_floors);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_player_on_ground() {
        let tuning = Tuning::default();
        let p = Player::spawn(&tuning);
        assert_eq!(p.pos, Vec2::new(400.0, -60.0));
        assert_eq!(p.bottom(), 0.0);
        assert!(p.grounded);
        assert_eq!(p.lives, 3);
        assert!(p.is_vulnerable());
        assert_eq!(p.stun.duration(), 60);
        assert_eq!(p.invincibility.duration(), 120);
    }

    #[test]
    fn test_reach_floor_is_monotonic() {
        let mut state = GameState::new(Tuning::default());
        state.reach_floor(3);
        assert_eq!(state.floor, 3);
        assert_eq!(state.score, 300);
        state.reach_floor(1);
        assert_eq!(state.floor, 3);
        assert_eq!(state.score, 300);
    }

    #[test]
    fn test_terminal_phases() {
        assert!(GamePhase::Victory.is_terminal());
        assert!(GamePhase::GameOver.is_terminal());
        assert!(!GamePhase::Start.is_terminal());
        assert!(!GamePhase::Playing.is_terminal());
    }
}
