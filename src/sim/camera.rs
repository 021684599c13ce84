//! Vertical camera follow
//!
//! The camera is a single downward translation applied to the world: as the
//! player climbs (y decreasing) the offset grows so the tower scrolls down.

use serde::{Deserialize, Serialize};

use crate::consts::{CAMERA_ANCHOR, CAMERA_SMOOTHING};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Camera {
    /// World-to-screen vertical translation
    pub offset: f32,
}

impl Camera {
    /// Offset that puts `player_y` at the anchor fraction of the viewport
    pub fn target_for(player_y: f32, viewport_height: f32) -> f32 {
        viewport_height * CAMERA_ANCHOR - player_y
    }

    /// Ease toward the target, covering a fixed fraction of the distance
    pub fn follow(&mut self, player_y: f32, viewport_height: f32) {
        let target = Self::target_for(player_y, viewport_height);
        self.offset += (target - self.offset) * CAMERA_SMOOTHING;
    }

    /// World y of the top edge of the screen
    #[inline]
    pub fn visible_top(&self) -> f32 {
        -self.offset
    }

    /// Convert a world y to a screen y
    #[inline]
    pub fn to_screen(&self, world_y: f32) -> f32 {
        world_y + self.offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_follow_moves_ten_percent() {
        let mut cam = Camera::default();
        // Target = 360 - (-60) = 420
        cam.follow(-60.0, 600.0);
        assert!((cam.offset - 42.0).abs() < 1e-4);
        cam.follow(-60.0, 600.0);
        assert!((cam.offset - 79.8).abs() < 1e-3);
    }

    #[test]
    fn test_converges_without_overshoot() {
        let mut cam = Camera::default();
        let target = Camera::target_for(-1000.0, 600.0);
        let mut last = cam.offset;
        for _ in 0..200 {
            cam.follow(-1000.0, 600.0);
            assert!(cam.offset >= last && cam.offset <= target);
            last = cam.offset;
        }
        assert!((cam.offset - target).abs() < 0.01);
    }

    #[test]
    fn test_anchor_on_screen() {
        let mut cam = Camera::default();
        cam.offset = Camera::target_for(-500.0, 600.0);
        assert!((cam.to_screen(-500.0) - 360.0).abs() < 1e-4);
        assert_eq!(cam.visible_top(), -cam.offset);
    }
}
