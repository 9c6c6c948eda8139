//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Logical ticks only, driven by the host
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod camera;
pub mod charge;
pub mod landing;
pub mod platform;
pub mod projectile;
pub mod state;
pub mod tick;

pub use autopilot::{Plan, plan_hold};
pub use camera::Camera;
pub use charge::{Charge, jump_distance, launch_velocity};
pub use landing::{LANDING_POINTS, Landing, PERFECT_POINTS, landing_points};
pub use platform::{Platform, PlatformStream, PlatformWindow};
pub use state::{AudioCue, GameEvent, GamePhase, GameSession, Player, Snapshot};
pub use tick::{pointer_down, pointer_up, restart, tick};
