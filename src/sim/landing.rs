//! Landing detection and scoring
//!
//! The player is an axis-aligned box of half-extent `size` around its
//! position. A platform catches the player when the boxes overlap horizontally
//! and the player's bottom edge lies inside the platform's top band.

use glam::Vec2;

use super::platform::{Platform, PlatformWindow};

/// Points for a landing within the accuracy tolerance of the center
pub const PERFECT_POINTS: u32 = 2;
/// Points for any other scoring landing
pub const LANDING_POINTS: u32 = 1;

/// Outcome of a landing check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Landing {
    /// Window slot that caught the player
    pub slot: usize,
    pub platform: Platform,
    /// Points awarded (0 for the home platform or the current slot)
    pub points: u32,
}

impl Landing {
    /// Whether this landing scores and moves the window forward
    pub fn advances(&self) -> bool {
        self.points > 0
    }
}

/// Whether a player box at `pos` rests on `platform` this tick
pub fn touches(pos: Vec2, size: f32, platform: &Platform, thickness: f32) -> bool {
    let bottom = pos.y + size;
    pos.x + size > platform.x
        && pos.x - size < platform.right()
        && bottom >= platform.y
        && bottom < platform.y + thickness
}

/// Points for landing at `x` on `platform`
pub fn landing_points(x: f32, platform: &Platform, tolerance: f32) -> u32 {
    let tolerance = platform.width * tolerance;
    if (x - platform.center_x()).abs() <= tolerance {
        PERFECT_POINTS
    } else {
        LANDING_POINTS
    }
}

/// Find the first window platform the player touches, in window order
pub fn resolve(
    pos: Vec2,
    size: f32,
    window: &PlatformWindow,
    thickness: f32,
    tolerance: f32,
) -> Option<Landing> {
    window
        .platforms()
        .iter()
        .enumerate()
        .find(|(_, platform)| touches(pos, size, platform, thickness))
        .map(|(slot, platform)| {
            let scores = slot == PlatformWindow::TARGET && !platform.is_home;
            Landing {
                slot,
                platform: *platform,
                points: if scores {
                    landing_points(pos.x, platform, tolerance)
                } else {
                    0
                },
            }
        })
}

/// Player y when resting on `platform`
#[inline]
pub fn rest_y(platform: &Platform, size: f32) -> f32 {
    platform.y - size
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::platform::{PlatformStream, home_platform};
    use crate::tuning::Tuning;

    fn strip(x: f32, width: f32) -> Platform {
        Platform {
            x,
            y: 320.0,
            width,
            is_home: false,
        }
    }

    #[test]
    fn test_accuracy_boundary_is_perfect() {
        let p = strip(400.0, 100.0);
        assert_eq!(landing_points(450.0, &p, 0.2), PERFECT_POINTS);
        assert_eq!(landing_points(470.0, &p, 0.2), PERFECT_POINTS);
        assert_eq!(landing_points(430.0, &p, 0.2), PERFECT_POINTS);
        assert_eq!(landing_points(470.5, &p, 0.2), LANDING_POINTS);
        assert_eq!(landing_points(405.0, &p, 0.2), LANDING_POINTS);
    }

    #[test]
    fn test_vertical_band_half_open() {
        let p = strip(400.0, 100.0);
        // bottom = y + 20
        assert!(touches(Vec2::new(450.0, 300.0), 20.0, &p, 10.0));
        assert!(touches(Vec2::new(450.0, 309.9), 20.0, &p, 10.0));
        assert!(!touches(Vec2::new(450.0, 310.0), 20.0, &p, 10.0));
        assert!(!touches(Vec2::new(450.0, 299.9), 20.0, &p, 10.0));
    }

    #[test]
    fn test_horizontal_overlap_open() {
        let p = strip(400.0, 100.0);
        // Edges touching exactly do not count
        assert!(!touches(Vec2::new(380.0, 305.0), 20.0, &p, 10.0));
        assert!(touches(Vec2::new(380.5, 305.0), 20.0, &p, 10.0));
        assert!(!touches(Vec2::new(520.0, 305.0), 20.0, &p, 10.0));
        assert!(touches(Vec2::new(519.5, 305.0), 20.0, &p, 10.0));
    }

    #[test]
    fn test_home_platform_never_scores() {
        let tuning = Tuning::default();
        let mut stream = PlatformStream::new(1, &tuning);
        let window = PlatformWindow::new(home_platform(&tuning), &mut stream);

        let landing = resolve(Vec2::new(150.0, 301.0), 20.0, &window, 10.0, 0.2).unwrap();
        assert_eq!(landing.slot, PlatformWindow::CURRENT);
        assert_eq!(landing.points, 0);
        assert!(!landing.advances());
    }

    #[test]
    fn test_target_landing_scores() {
        let tuning = Tuning::default();
        let mut stream = PlatformStream::new(1, &tuning);
        let window = PlatformWindow::new(home_platform(&tuning), &mut stream);
        let target = *window.target();

        let landing = resolve(
            Vec2::new(target.center_x(), 301.0),
            20.0,
            &window,
            10.0,
            0.2,
        )
        .unwrap();
        assert_eq!(landing.slot, PlatformWindow::TARGET);
        assert_eq!(landing.points, PERFECT_POINTS);
        assert!(landing.advances());
    }

    #[test]
    fn test_current_slot_after_advance_does_not_score() {
        let tuning = Tuning::default();
        let mut stream = PlatformStream::new(5, &tuning);
        let mut window = PlatformWindow::new(home_platform(&tuning), &mut stream);
        window.advance(&mut stream);
        let current = *window.current();
        assert!(!current.is_home);

        let landing = resolve(
            Vec2::new(current.center_x(), 301.0),
            20.0,
            &window,
            10.0,
            0.2,
        )
        .unwrap();
        assert_eq!(landing.slot, PlatformWindow::CURRENT);
        assert_eq!(landing.points, 0);
    }

    #[test]
    fn test_miss_in_gap() {
        let tuning = Tuning::default();
        let mut stream = PlatformStream::new(9, &tuning);
        let window = PlatformWindow::new(home_platform(&tuning), &mut stream);
        // Just right of the home platform, well short of any target
        let x = window.current().right() + 21.0;
        assert!(x + 20.0 < window.target().x);
        assert!(resolve(Vec2::new(x, 305.0), 20.0, &window, 10.0, 0.2).is_none());
    }
}
