//! Follow camera with exponential smoothing

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// World-space camera (top-left of the view)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub pos: Vec2,
    pub target: Vec2,
}

impl Camera {
    /// Ease toward the player, keeping it a third of the way into the view.
    ///
    /// The camera never scrolls left of (or above, with vertical follow) the
    /// world origin.
    pub fn follow(&mut self, player: Vec2, view: Vec2, smoothing: f32, follow_y: bool) {
        self.target.x = player.x - view.x / 3.0;
        self.pos.x += (self.target.x - self.pos.x) * smoothing;
        self.pos.x = self.pos.x.max(0.0);

        if follow_y {
            self.target.y = player.y - view.y / 2.0;
            self.pos.y += (self.target.y - self.pos.y) * smoothing;
            self.pos.y = self.pos.y.max(0.0);
        }
    }
}
