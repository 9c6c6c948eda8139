//! Hold-to-charge jump power
//!
//! Hold time maps linearly to jump distance, clamped to the tuning's bounds.
//! The same hold drives the visual squash of the player sprite.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Pointer hold in progress
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Charge {
    pub is_charging: bool,
    /// Host clock (ms) when the hold began
    pub start_time: f64,
}

impl Charge {
    pub fn begin(&mut self, now: f64) {
        self.is_charging = true;
        self.start_time = now;
    }

    /// End the hold and return its length in seconds
    pub fn release(&mut self, now: f64) -> f32 {
        let held = self.held_secs(now);
        *self = Charge::default();
        held
    }

    /// Seconds held so far (0 if not charging)
    pub fn held_secs(&self, now: f64) -> f32 {
        if !self.is_charging {
            return 0.0;
        }
        (((now - self.start_time) / 1000.0) as f32).max(0.0)
    }
}

/// Jump distance for a hold of `hold_secs`
pub fn jump_distance(hold_secs: f32, tuning: &Tuning) -> f32 {
    (hold_secs * tuning.speed_scale).clamp(tuning.min_distance, tuning.max_distance)
}

/// Launch velocity for a jump distance: forward at `distance`, upward at a fixed ratio
pub fn launch_velocity(distance: f32, tuning: &Tuning) -> Vec2 {
    Vec2::new(distance, -distance * tuning.vertical_ratio)
}

/// Next squash factor for one tick
pub fn update_squash(squash: f32, charge: &Charge, now: f64, tuning: &Tuning) -> f32 {
    if charge.is_charging {
        (1.0 - charge.held_secs(now) * tuning.squash_rate).max(tuning.squash_min)
    } else {
        squash + (1.0 - squash) * tuning.squash_recovery
    }
}
