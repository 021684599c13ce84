//! Tick-driven timers for status effects and screen shake

use serde::{Deserialize, Serialize};

/// Counts down whole ticks from a fixed duration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdown {
    duration: u32,
    remaining: u32,
}

impl Countdown {
    /// An idle countdown that arms to `duration` ticks
    pub fn new(duration: u32) -> Self {
        Self {
            duration,
            remaining: 0,
        }
    }

    /// Restart from the full duration
    pub fn arm(&mut self) {
        self.remaining = self.duration;
    }

    /// Stop immediately without reporting expiry
    pub fn clear(&mut self) {
        self.remaining = 0;
    }

    /// Advance one tick. Returns true on the tick the countdown reaches zero.
    pub fn tick(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        self.remaining == 0
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.remaining > 0
    }

    #[inline]
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    #[inline]
    pub fn duration(&self) -> u32 {
        self.duration
    }
}

/// Screen shake magnitude with multiplicative decay
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Shake {
    magnitude: f32,
}

impl Shake {
    /// Set the shake to `magnitude` (hits do not stack)
    pub fn trigger(&mut self, magnitude: f32) {
        self.magnitude = magnitude;
    }

    /// Decay by `factor`, snapping to zero below `snap`
    pub fn decay(&mut self, factor: f32, snap: f32) {
        if self.magnitude > 0.0 {
            self.magnitude *= factor;
        }
        if self.magnitude < snap {
            self.magnitude = 0.0;
        }
    }

    #[inline]
    pub fn magnitude(&self) -> f32 {
        self.magnitude
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.magnitude > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_countdown_expires_once() {
        let mut c = Countdown::new(3);
        assert!(!c.is_active());
        assert!(!c.tick());

        c.arm();
        assert_eq!(c.remaining(), 3);
        assert!(!c.tick());
        assert!(!c.tick());
        assert!(c.tick());
        assert!(!c.is_active());
        // Already expired - no second report
        assert!(!c.tick());
    }

    #[test]
    fn test_countdown_rearm_and_clear() {
        let mut c = Countdown::new(5);
        c.arm();
        c.tick();
        c.arm();
        assert_eq!(c.remaining(), 5);
        c.clear();
        assert!(!c.is_active());
        assert_eq!(c.duration(), 5);
    }

    #[test]
    fn test_shake_decays_and_snaps() {
        let mut s = Shake::default();
        s.trigger(20.0);
        s.decay(0.9, 0.5);
        assert!((s.magnitude() - 18.0).abs() < 1e-4);

        let mut ticks = 1;
        while s.is_active() {
            s.decay(0.9, 0.5);
            ticks += 1;
        }
        assert_eq!(s.magnitude(), 0.0);
        // 20 * 0.9^n < 0.5 first holds at n = 36
        assert_eq!(ticks, 36);
    }
}
