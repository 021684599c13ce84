//! HUD and overlay text
//!
//! Pure formatting so the canvas layer only positions strings.

use crate::sim::GamePhase;

pub const GAME_TITLE: &str = "Henderson's Climb";

/// Run clock with two decimals, e.g. `12.34s`
pub fn format_time(seconds: f32) -> String {
    format!("{:.2}s", seconds.max(0.0))
}

pub fn lives_label(lives: u8) -> String {
    format!("x {lives}")
}

pub fn floor_label(floor: u32, total_floors: u32) -> String {
    format!("Floor: {floor} / {total_floors}")
}

pub fn score_label(score: u64) -> String {
    format!("Score: {score}")
}

/// Full-screen message shown outside active play
#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    pub title: &'static str,
    pub subtitle: String,
    /// Headline stat (floor reached, final time)
    pub detail: Option<String>,
    pub prompt: &'static str,
}

/// Overlay for `phase`, if one is shown
pub fn overlay_for(phase: GamePhase, floor: u32, time_elapsed: f32, score: u64) -> Option<Overlay> {
    match phase {
        GamePhase::Playing => None,
        GamePhase::Start => Some(Overlay {
            title: GAME_TITLE,
            subtitle: "Help Dr. Henderson scale the tower! Avoid the falling lab equipment.".to_string(),
            detail: Some("Arrows/WASD to move & jump".to_string()),
            prompt: "Press Space or click to start climbing",
        }),
        GamePhase::GameOver => Some(Overlay {
            title: "OUCH!",
            subtitle: "Dr. Henderson got bonked!".to_string(),
            detail: Some(format!("Reached Floor: {floor}")),
            prompt: "Press Enter or click to try again",
        }),
        GamePhase::Victory => Some(Overlay {
            title: "VICTORY!",
            subtitle: format!("The wreath is placed! {}", score_label(score)),
            detail: Some(format!("Final Time {}", format_time(time_elapsed))),
            prompt: "Press Enter or click to climb again",
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_format() {
        assert_eq!(format_time(0.0), "0.00s");
        assert_eq!(format_time(12.345), "12.35s");
        assert_eq!(format_time(-1.0), "0.00s");
    }

    #[test]
    fn test_labels() {
        assert_eq!(lives_label(3), "x 3");
        assert_eq!(floor_label(4, 16), "Floor: 4 / 16");
        assert_eq!(score_label(1500), "Score: 1500");
    }

    #[test]
    fn test_overlays_per_phase() {
        assert!(overlay_for(GamePhase::Playing, 3, 1.0, 300).is_none());

        let start = overlay_for(GamePhase::Start, 0, 0.0, 0).unwrap();
        assert_eq!(start.title, GAME_TITLE);

        let over = overlay_for(GamePhase::GameOver, 7, 20.0, 700).unwrap();
        assert_eq!(over.detail.as_deref(), Some("Reached Floor: 7"));

        let won = overlay_for(GamePhase::Victory, 16, 42.5, 3100).unwrap();
        assert_eq!(won.detail.as_deref(), Some("Final Time 42.50s"));
        assert!(won.subtitle.contains("3100"));
    }
}
