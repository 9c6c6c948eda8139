//! Platform generation and the two-slot landing window
//!
//! Platforms are flat strips on a shared ground line. The stream places each
//! new platform a random gap to the right of the previous platform's left edge.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::tuning::{PlatformWidth, Tuning};

/// A platform strip (immutable once created)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    /// Left edge in world space
    pub x: f32,
    /// Top surface
    pub y: f32,
    pub width: f32,
    /// The session's starting platform, which never scores
    pub is_home: bool,
}

impl Platform {
    /// Horizontal center of the top surface
    #[inline]
    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }
}

/// Seeded platform generator
#[derive(Debug, Clone)]
pub struct PlatformStream {
    rng: Pcg32,
    gap_min: f32,
    gap_max: f32,
    width: PlatformWidth,
    ground_y: f32,
}

impl PlatformStream {
    pub fn new(seed: u64, tuning: &Tuning) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            gap_min: tuning.gap_min,
            gap_max: tuning.gap_max,
            width: tuning.platform_width,
            ground_y: tuning.ground_y,
        }
    }

    /// Generate the platform following one whose left edge is at `last_x`
    pub fn next(&mut self, last_x: f32) -> Platform {
        let width = match self.width {
            PlatformWidth::Fixed { width } => width,
            PlatformWidth::Random { min, max } => self.rng.random_range(min..=max).round(),
        };
        let gap = self.rng.random_range(self.gap_min..=self.gap_max);

        Platform {
            x: (last_x + gap).round(),
            y: self.ground_y,
            width,
            is_home: false,
        }
    }
}

/// The two live platforms: the one the player stands on and the one to reach
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlatformWindow {
    slots: [Platform; 2],
}

impl PlatformWindow {
    /// Slot index of the platform the player departs from
    pub const CURRENT: usize = 0;
    /// Slot index of the platform to land on
    pub const TARGET: usize = 1;

    /// Start a window at `home`, with a freshly generated target
    pub fn new(home: Platform, stream: &mut PlatformStream) -> Self {
        let target = stream.next(home.x);
        Self {
            slots: [home, target],
        }
    }

    pub fn current(&self) -> &Platform {
        &self.slots[Self::CURRENT]
    }

    pub fn target(&self) -> &Platform {
        &self.slots[Self::TARGET]
    }

    /// Both platforms in window order
    pub fn platforms(&self) -> &[Platform; 2] {
        &self.slots
    }

    /// The target becomes current and a new target is generated from its left edge
    pub fn advance(&mut self, stream: &mut PlatformStream) {
        let landed = self.slots[Self::TARGET];
        self.slots = [landed, stream.next(landed.x)];
    }
}

/// The home platform for a tuning
pub fn home_platform(tuning: &Tuning) -> Platform {
    Platform {
        x: tuning.home_x,
        y: tuning.ground_y,
        width: tuning.home_width,
        is_home: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_initial_window() {
        let tuning = Tuning::default();
        let mut stream = PlatformStream::new(7, &tuning);
        let window = PlatformWindow::new(home_platform(&tuning), &mut stream);

        let home = window.current();
        assert!(home.is_home);
        assert_eq!((home.x, home.y, home.width), (100.0, 320.0, 100.0));
        assert!(!window.target().is_home);
        assert!(window.target().x > home.x);
    }

    #[test]
    fn test_advance_shifts_target_to_current() {
        let tuning = Tuning::default();
        let mut stream = PlatformStream::new(11, &tuning);
        let mut window = PlatformWindow::new(home_platform(&tuning), &mut stream);

        for _ in 0..20 {
            let old_target = *window.target();
            window.advance(&mut stream);
            assert_eq!(*window.current(), old_target);
            assert_eq!(window.platforms().len(), 2);
            assert!(window.target().x > window.current().x);
        }
        assert!(!window.current().is_home);
    }

    #[test]
    fn test_fixed_width_mode() {
        let tuning = Tuning {
            platform_width: PlatformWidth::Fixed { width: 100.0 },
            ..Default::default()
        };
        let mut stream = PlatformStream::new(3, &tuning);
        for i in 0..50 {
            assert_eq!(stream.next(i as f32 * 200.0).width, 100.0);
        }
    }

    #[test]
    fn test_same_seed_same_stream() {
        let tuning = Tuning::default();
        let mut a = PlatformStream::new(42, &tuning);
        let mut b = PlatformStream::new(42, &tuning);
        let mut x = 100.0;
        for _ in 0..10 {
            let pa = a.next(x);
            let pb = b.next(x);
            assert_eq!(pa, pb);
            x = pa.x;
        }
    }

    proptest! {
        #[test]
        fn prop_gap_and_width_in_range(seed in any::<u64>(), last_x in 0u32..100_000) {
            let tuning = Tuning::default();
            let mut stream = PlatformStream::new(seed, &tuning);
            let last_x = last_x as f32;
            let platform = stream.next(last_x);

            let gap = platform.x - last_x;
            prop_assert!((150.0..=300.0).contains(&gap), "gap {}", gap);
            prop_assert!((50.0..=120.0).contains(&platform.width), "width {}", platform.width);
            prop_assert_eq!(platform.width, platform.width.round());
            prop_assert_eq!(platform.y, 320.0);
        }
    }
}
