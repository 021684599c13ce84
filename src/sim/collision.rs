//! Axis-aligned collision tests
//!
//! Everything in the tower is a rectangle: player hitbox, ledges, falling
//! obstacles. Platforms are one-way: they only catch a body that arrives
//! from above.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{EDGE_INSET, LANDING_TOLERANCE};

/// Axis-aligned rectangle anchored at its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle with top-left corner at `pos`
    pub fn from_pos(pos: Vec2, width: f32, height: f32) -> Self {
        Self::new(pos.x, pos.y, width, height)
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Strict overlap (touching edges do not count)
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}

/// One-way landing test against a platform's top surface
///
/// `body` is the post-move hitbox and `vel_y` the velocity that moved it this
/// tick, so the pre-move bottom is `body.bottom() - vel_y`. A landing needs:
/// horizontal overlap with `EDGE_INSET` shaved off both platform edges, a
/// body that is not rising, a pre-move bottom at or above the top (within
/// `LANDING_TOLERANCE`), and a post-move bottom at or past the top.
///
/// The pre-move position is reconstructed from velocity, not tracked, so any
/// position change outside of integration (clamping, snapping) is invisible
/// to this test.
pub fn lands_on(body: &Rect, vel_y: f32, platform: &Rect) -> bool {
    let top = platform.top();
    let bottom = body.bottom();
    let prev_bottom = bottom - vel_y;

    body.right() > platform.left() + EDGE_INSET
        && body.left() < platform.right() - EDGE_INSET
        && vel_y >= 0.0
        && prev_bottom <= top + LANDING_TOLERANCE
        && bottom >= top
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ledge() -> Rect {
        Rect::new(200.0, -120.0, 150.0, 20.0)
    }

    #[test]
    fn test_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.overlaps(&Rect::new(5.0, 5.0, 10.0, 10.0)));
        // Shared edge is not an overlap
        assert!(!a.overlaps(&Rect::new(10.0, 0.0, 10.0, 10.0)));
        assert!(!a.overlaps(&Rect::new(0.0, 20.0, 10.0, 10.0)));
    }

    #[test]
    fn test_lands_when_falling_through_top() {
        // Bottom moved from -125 to -117 this tick
        let body = Rect::new(250.0, -177.0, 40.0, 60.0);
        assert!(lands_on(&body, 8.0, &ledge()));
    }

    #[test]
    fn test_no_landing_while_rising() {
        let body = Rect::new(250.0, -177.0, 40.0, 60.0);
        assert!(!lands_on(&body, -8.0, &ledge()));
    }

    #[test]
    fn test_no_landing_from_below() {
        // Slightly inside the ledge is still within tolerance
        let shallow = Rect::new(250.0, -170.0, 40.0, 60.0);
        assert!(lands_on(&shallow, 2.0, &ledge()));
        // Deeper than the tolerance (jumped up through it, now sinking)
        let deep = Rect::new(250.0, -150.0, 40.0, 60.0);
        assert!(!lands_on(&deep, 2.0, &ledge()));
    }

    #[test]
    fn test_edge_inset() {
        // Only 4 units over the left edge - inside the inset
        let body = Rect::new(164.0, -177.0, 40.0, 60.0);
        assert!(!lands_on(&body, 8.0, &ledge()));
        // 6 units over - lands
        let body = Rect::new(166.0, -177.0, 40.0, 60.0);
        assert!(lands_on(&body, 8.0, &ledge()));
    }

    #[test]
    fn test_fast_fall_uses_previous_position() {
        // Bottom went from -130 to -90 in one tick: passed the top, still caught
        let body = Rect::new(250.0, -150.0, 40.0, 60.0);
        assert!(lands_on(&body, 40.0, &ledge()));
    }
}
