//! Data-driven game balance
//!
//! Every gameplay number the simulation reads lives here. `Tuning::default()`
//! reproduces the compile-time values in [`crate::consts`]; a JSON file may
//! override any subset of fields.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Environment variable naming an alternate tuning file
pub const TUNING_PATH_VAR: &str = "TOWER_CLIMB_TUNING";
/// Tuning file read when the environment variable is unset
pub const DEFAULT_TUNING_PATH: &str = "config/tuning.json";

#[derive(Debug, Clone, PartialEq)]
pub enum TuningError {
    /// JSON could not be parsed into a `Tuning`
    Parse(String),
    /// A field parsed but its value is unusable
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

impl std::fmt::Display for TuningError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "tuning parse error: {e}"),
            Self::Invalid { field, reason } => write!(f, "invalid tuning `{field}`: {reason}"),
        }
    }
}

impl std::error::Error for TuningError {}

/// Gameplay parameters for one simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub gravity: f32,
    pub friction: f32,
    pub move_speed: f32,
    pub jump_force: f32,
    pub stun_duration: u32,
    pub invincibility_duration: u32,
    pub canvas_width: f32,
    pub canvas_height: f32,
    pub tower_width: f32,
    pub floor_height: f32,
    pub total_floors: u32,
    pub gap_width: f32,
    pub player_width: f32,
    pub player_height: f32,
    pub starting_lives: u8,
    pub spawn_base_chance: f32,
    pub spawn_chance_per_floor: f32,
    pub spawn_target_chance: f32,
    pub fall_speed_base: f32,
    pub fall_speed_random: f32,
    pub fall_speed_per_floor: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            friction: FRICTION,
            move_speed: MOVE_SPEED,
            jump_force: JUMP_FORCE,
            stun_duration: STUN_DURATION,
            invincibility_duration: INVINCIBILITY_DURATION,
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            tower_width: TOWER_WIDTH,
            floor_height: FLOOR_HEIGHT,
            total_floors: TOTAL_FLOORS,
            gap_width: GAP_WIDTH,
            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            starting_lives: STARTING_LIVES,
            spawn_base_chance: SPAWN_BASE_CHANCE,
            spawn_chance_per_floor: SPAWN_CHANCE_PER_FLOOR,
            spawn_target_chance: SPAWN_TARGET_CHANCE,
            fall_speed_base: FALL_SPEED_BASE,
            fall_speed_random: FALL_SPEED_RANDOM,
            fall_speed_per_floor: FALL_SPEED_PER_FLOOR,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning document. Missing fields keep defaults.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning =
            serde_json::from_str(json).map_err(|e| TuningError::Parse(e.to_string()))?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values that would break level generation or physics
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("canvas_width", self.canvas_width),
            ("canvas_height", self.canvas_height),
            ("tower_width", self.tower_width),
            ("floor_height", self.floor_height),
            ("gap_width", self.gap_width),
            ("player_width", self.player_width),
            ("player_height", self.player_height),
            ("move_speed", self.move_speed),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(TuningError::Invalid {
                    field,
                    reason: "must be a positive number",
                });
            }
        }

        let unit = [
            ("friction", self.friction),
            ("spawn_base_chance", self.spawn_base_chance),
            ("spawn_chance_per_floor", self.spawn_chance_per_floor),
            ("spawn_target_chance", self.spawn_target_chance),
        ];
        for (field, value) in unit {
            if !(0.0..=1.0).contains(&value) {
                return Err(TuningError::Invalid {
                    field,
                    reason: "must be within [0, 1]",
                });
            }
        }

        if self.tower_width > self.canvas_width {
            return Err(TuningError::Invalid {
                field: "tower_width",
                reason: "must fit inside the canvas",
            });
        }
        if self.gap_width + self.player_width >= self.tower_width {
            return Err(TuningError::Invalid {
                field: "gap_width",
                reason: "gap and player must fit inside the tower",
            });
        }
        if self.total_floors == 0 {
            return Err(TuningError::Invalid {
                field: "total_floors",
                reason: "tower needs at least one floor",
            });
        }
        if self.starting_lives == 0 {
            return Err(TuningError::Invalid {
                field: "starting_lives",
                reason: "must start with at least one life",
            });
        }
        if self.stun_duration == 0 {
            return Err(TuningError::Invalid {
                field: "stun_duration",
                reason: "a hit must stun for at least one tick",
            });
        }
        if self.invincibility_duration == 0 {
            return Err(TuningError::Invalid {
                field: "invincibility_duration",
                reason: "must last at least one tick",
            });
        }
        if !(self.fall_speed_base.is_finite() && self.fall_speed_base > 0.0) {
            return Err(TuningError::Invalid {
                field: "fall_speed_base",
                reason: "obstacles must fall",
            });
        }
        let non_negative = [
            ("fall_speed_random", self.fall_speed_random),
            ("fall_speed_per_floor", self.fall_speed_per_floor),
        ];
        for (field, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(TuningError::Invalid {
                    field,
                    reason: "must not be negative",
                });
            }
        }
        if !(self.jump_force < 0.0 && self.gravity > 0.0) {
            return Err(TuningError::Invalid {
                field: "jump_force",
                reason: "jump must point up (negative) against positive gravity",
            });
        }
        Ok(())
    }

    /// Load tuning from disk, falling back to defaults if the file is missing
    /// or unusable.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let path =
            std::env::var(TUNING_PATH_VAR).unwrap_or_else(|_| DEFAULT_TUNING_PATH.to_string());
        match std::fs::read_to_string(&path) {
            Ok(content) => match Self::from_json(&content) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {path}");
                    tuning
                }
                Err(e) => {
                    log::warn!("Failed to load {path}: {e}, using defaults");
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// Browser builds ship with the compiled-in balance
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        Self::default()
    }

    /// Left edge of the tower
    #[inline]
    pub fn tower_left(&self) -> f32 {
        crate::tower_left(self.canvas_width, self.tower_width)
    }

    /// Right edge of the tower
    #[inline]
    pub fn tower_right(&self) -> f32 {
        crate::tower_right(self.canvas_width, self.tower_width)
    }

    /// Height of the top ledge above the ground
    #[inline]
    pub fn tower_height(&self) -> f32 {
        crate::tower_height(self.total_floors, self.floor_height)
    }

    /// Player y at or above which the run is won
    #[inline]
    pub fn victory_y(&self) -> f32 {
        -(self.tower_height() - VICTORY_MARGIN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_consts() {
        let t = Tuning::default();
        assert_eq!(t.gravity, GRAVITY);
        assert_eq!(t.total_floors, TOTAL_FLOORS);
        assert_eq!(t.tower_left(), 200.0);
        assert_eq!(t.victory_y(), -1820.0);
        assert!(t.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let t = Tuning::from_json(r#"{ "gravity": 0.8, "total_floors": 4 }"#).unwrap();
        assert_eq!(t.gravity, 0.8);
        assert_eq!(t.total_floors, 4);
        assert_eq!(t.move_speed, MOVE_SPEED);
    }

    #[test]
    fn test_shipped_config_is_default_balance() {
        let t = Tuning::from_json(include_str!("../config/tuning.json")).unwrap();
        assert_eq!(t, Tuning::default());
    }

    #[test]
    fn test_parse_error() {
        let err = Tuning::from_json("{ not json").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
        assert!(err.to_string().starts_with("tuning parse error"));
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = Tuning::from_json(r#"{ "friction": 1.5 }"#).unwrap_err();
        assert_eq!(
            err,
            TuningError::Invalid {
                field: "friction",
                reason: "must be within [0, 1]"
            }
        );

        let err = Tuning::from_json(r#"{ "gap_width": 380.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "gap_width", .. }));

        let err = Tuning::from_json(r#"{ "jump_force": 16.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "jump_force", .. }));

        let err = Tuning::from_json(r#"{ "total_floors": 0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "total_floors", .. }));
    }

    #[test]
    fn test_rejects_timers_that_never_run() {
        let err = Tuning::from_json(r#"{ "stun_duration": 0, "spawn_base_chance": 1.0 }"#)
            .unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "stun_duration", .. }));

        let err = Tuning::from_json(r#"{ "invincibility_duration": 0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "invincibility_duration", .. }));
    }

    #[test]
    fn test_rejects_obstacles_that_rise() {
        let err = Tuning::from_json(r#"{ "fall_speed_base": -20.0, "fall_speed_random": 0.0 }"#)
            .unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "fall_speed_base", .. }));

        let err = Tuning::from_json(r#"{ "fall_speed_base": 0.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "fall_speed_base", .. }));

        let err = Tuning::from_json(r#"{ "fall_speed_random": -1.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "fall_speed_random", .. }));

        let err = Tuning::from_json(r#"{ "fall_speed_per_floor": -0.5 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "fall_speed_per_floor", .. }));
    }
}
