//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per tick; `dt` only feeds the run clock
//! - Seeded RNG only
//! - Stable iteration order (insertion order of platforms and obstacles)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod camera;
pub mod collision;
pub mod input;
pub mod level;
pub mod spawner;
pub mod state;
pub mod tick;
pub mod timer;

use rand::SeedableRng;
use rand_pcg::Pcg32;

pub use autopilot::autopilot;
pub use camera::Camera;
pub use collision::{Rect, lands_on};
pub use input::{Action, KeySet, TickInput, action_for_key};
pub use level::{gap_on_floor, generate_level};
pub use spawner::{ObstacleSpec, spawn_parameters, spawn_probability};
pub use state::{GamePhase, GameState, Obstacle, ObstacleKind, Particle, Platform, Player, SoundCue};
pub use tick::{start_run, tick};
pub use timer::{Countdown, Shake};

use crate::tuning::Tuning;

/// Read-only view of everything the presentation layer needs after a tick
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub phase: GamePhase,
    pub floor: u32,
    pub total_floors: u32,
    pub time_elapsed: f32,
    pub score: u64,
    pub lives: u8,
    pub player: &'a Player,
    pub platforms: &'a [Platform],
    pub obstacles: &'a [Obstacle],
    pub particles: &'a [Particle],
    pub camera_offset: f32,
    pub shake: f32,
    /// Sound cues raised by the latest tick
    pub cues: &'a [SoundCue],
}

impl<'a> Snapshot<'a> {
    fn of(state: &'a GameState) -> Self {
        Self {
            phase: state.phase,
            floor: state.floor,
            total_floors: state.tuning.total_floors,
            time_elapsed: state.time_elapsed,
            score: state.score,
            lives: state.player.lives,
            player: &state.player,
            platforms: &state.platforms,
            obstacles: &state.obstacles,
            particles: &state.particles,
            camera_offset: state.camera.offset,
            shake: state.shake.magnitude(),
            cues: &state.cues,
        }
    }
}

/// Owns the game state and its random source
///
/// The host feeds one `TickInput` per frame and draws the returned snapshot.
#[derive(Debug, Clone)]
pub struct Simulation {
    state: GameState,
    rng: Pcg32,
    seed: u64,
}

impl Simulation {
    /// New simulation on the title screen with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        log::info!("Simulation created with seed {seed}");
        Self {
            state: GameState::new(tuning),
            rng: Pcg32::seed_from_u64(seed),
            seed,
        }
    }

    /// Advance one frame
    pub fn tick(&mut self, input: &TickInput, dt: f32) -> Snapshot<'_> {
        tick(&mut self.state, &mut self.rng, input, dt);
        Snapshot::of(&self.state)
    }

    /// Start a fresh run immediately with a newly generated level
    pub fn reset(&mut self) -> Snapshot<'_> {
        start_run(&mut self.state, &mut self.rng);
        Snapshot::of(&self.state)
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot::of(&self.state)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct access for hosts and tests staging a scenario
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    /// Input the built-in climber would give for the current state
    pub fn autopilot_input(&self) -> TickInput {
        autopilot(&self.state)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}
