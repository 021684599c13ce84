//! Input sampling
//!
//! Key events arrive whenever the host delivers them; they only update the
//! pressed set. The simulation reads that set once at the start of each tick.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Logical game actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Jump,
    /// Start or restart a run
    Confirm,
}

/// Map a physical key (`KeyboardEvent.code`) to an action
pub fn action_for_key(code: &str) -> Option<Action> {
    match code {
        "ArrowLeft" | "KeyA" => Some(Action::MoveLeft),
        "ArrowRight" | "KeyD" => Some(Action::MoveRight),
        "Space" | "ArrowUp" | "KeyW" => Some(Action::Jump),
        "Enter" | "NumpadEnter" => Some(Action::Confirm),
        _ => None,
    }
}

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    /// Start/restart request (Enter or a click on the canvas)
    pub confirm: bool,
}

/// Persistent set of held keys
#[derive(Debug, Clone, Default)]
pub struct KeySet {
    pressed: HashSet<String>,
    /// Confirm presses since the last sample (clicks have no key-up)
    confirm_latched: bool,
}

impl KeySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press. Returns the mapped action, if any, so the host can
    /// suppress the browser default for game keys.
    pub fn key_down(&mut self, code: &str) -> Option<Action> {
        let action = action_for_key(code);
        // Auto-repeat re-sends held keys; only a fresh press confirms
        let fresh = self.pressed.insert(code.to_string());
        if fresh && action == Some(Action::Confirm) {
            self.confirm_latched = true;
        }
        action
    }

    pub fn key_up(&mut self, code: &str) {
        self.pressed.remove(code);
    }

    /// One-shot confirm from a non-key source (button, click)
    pub fn press_confirm(&mut self) {
        self.confirm_latched = true;
    }

    /// Forget everything (e.g. when the window loses focus)
    pub fn release_all(&mut self) {
        self.pressed.clear();
        self.confirm_latched = false;
    }

    pub fn is_held(&self, action: Action) -> bool {
        self.pressed
            .iter()
            .any(|code| action_for_key(code) == Some(action))
    }

    /// Snapshot the held keys for this tick and consume one-shot presses
    pub fn sample(&mut self) -> TickInput {
        let input = TickInput {
            left: self.is_held(Action::MoveLeft),
            right: self.is_held(Action::MoveRight),
            jump: self.is_held(Action::Jump),
            confirm: self.confirm_latched,
        };
        self.confirm_latched = false;
        input
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(action_for_key("KeyA"), Some(Action::MoveLeft));
        assert_eq!(action_for_key("ArrowRight"), Some(Action::MoveRight));
        assert_eq!(action_for_key("Space"), Some(Action::Jump));
        assert_eq!(action_for_key("KeyW"), Some(Action::Jump));
        assert_eq!(action_for_key("Enter"), Some(Action::Confirm));
        assert_eq!(action_for_key("KeyQ"), None);
    }

    #[test]
    fn test_held_keys_persist_across_samples() {
        let mut keys = KeySet::new();
        keys.key_down("ArrowLeft");
        assert!(keys.sample().left);
        assert!(keys.sample().left);
        keys.key_up("ArrowLeft");
        assert!(!keys.sample().left);
    }

    #[test]
    fn test_alias_keys_release_independently() {
        let mut keys = KeySet::new();
        keys.key_down("KeyW");
        keys.key_down("Space");
        keys.key_up("KeyW");
        assert!(keys.sample().jump);
        keys.key_up("Space");
        assert!(!keys.sample().jump);
    }

    #[test]
    fn test_click_confirm_is_one_shot() {
        let mut keys = KeySet::new();
        keys.press_confirm();
        assert!(keys.sample().confirm);
        assert!(!keys.sample().confirm);
    }

    #[test]
    fn test_tap_between_ticks_still_confirms() {
        let mut keys = KeySet::new();
        keys.key_down("Enter");
        keys.key_up("Enter");
        assert!(keys.sample().confirm);
        assert!(!keys.sample().confirm);
    }

    #[test]
    fn test_held_enter_confirms_once() {
        let mut keys = KeySet::new();
        keys.key_down("Enter");
        assert!(keys.sample().confirm);
        // Held through the end of a run, then auto-repeating
        assert!(!keys.sample().confirm);
        keys.key_down("Enter");
        assert!(!keys.sample().confirm);
        keys.key_up("Enter");
        keys.key_down("Enter");
        assert!(keys.sample().confirm);
    }

    #[test]
    fn test_release_all() {
        let mut keys = KeySet::new();
        keys.key_down("KeyD");
        keys.press_confirm();
        keys.release_all();
        assert_eq!(keys.sample(), TickInput::default());
    }
}
