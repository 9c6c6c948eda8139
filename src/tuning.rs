//! Data-driven game balance
//!
//! Every physics and generation constant the simulation reads lives in
//! [`Tuning`]. The defaults are the canonical values; hosts may load a JSON
//! override and must validate it before starting a session.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by an invalid tuning
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("{name}: min ({min}) must not exceed max ({max})")]
    InvalidRange { name: &'static str, min: f32, max: f32 },
    #[error("{name} must be positive, got {value}")]
    NotPositive { name: &'static str, value: f32 },
    #[error("{name} must not be negative, got {value}")]
    Negative { name: &'static str, value: f32 },
    #[error("gap_min ({gap_min}) is smaller than the widest platform ({width}), platforms would overlap")]
    OverlappingPlatforms { gap_min: f32, width: f32 },
    #[error("{name} must be within (0, 1], got {value}")]
    OutOfUnitRange { name: &'static str, value: f32 },
    #[error("failed to parse tuning: {0}")]
    Parse(#[from] serde_json::Error),
}

/// How platform widths are chosen
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum PlatformWidth {
    /// Every platform has the same width
    Fixed { width: f32 },
    /// Uniform draw in `[min, max]`, rounded to the nearest unit
    Random { min: f32, max: f32 },
}

impl PlatformWidth {
    /// Largest width this mode can produce
    pub fn max_width(&self) -> f32 {
        match *self {
            PlatformWidth::Fixed { width } => width,
            PlatformWidth::Random { max, .. } => max,
        }
    }
}

impl Default for PlatformWidth {
    fn default() -> Self {
        PlatformWidth::Random {
            min: 50.0,
            max: 120.0,
        }
    }
}

/// Simulation tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Projectile ===
    /// Added to vertical velocity every tick
    pub gravity: f32,
    /// Velocity scale applied to position every tick
    pub dt: f32,

    // === Platforms ===
    pub gap_min: f32,
    pub gap_max: f32,
    pub platform_width: PlatformWidth,
    pub platform_thickness: f32,
    /// Ground line every platform sits on
    pub ground_y: f32,
    pub home_x: f32,
    pub home_width: f32,

    // === Player / launch ===
    /// Half-extent of the player box
    pub player_size: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Jump distance per second of hold
    pub speed_scale: f32,
    /// Upward launch velocity as a fraction of the jump distance
    pub vertical_ratio: f32,

    // === Squash (visual only) ===
    /// Squash lost per second of charge
    pub squash_rate: f32,
    pub squash_min: f32,
    /// Fraction of the remaining squash recovered per tick
    pub squash_recovery: f32,

    // === Scoring ===
    /// Fraction of the platform width that counts as a perfect landing
    pub accuracy_tolerance: f32,

    // === Camera ===
    pub camera_smoothing: f32,
    pub camera_follow_y: bool,
    pub view_width: f32,
    /// Also the fall-through line: below this the run is over
    pub view_height: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 1.5,
            dt: 0.05,

            gap_min: 150.0,
            gap_max: 300.0,
            platform_width: PlatformWidth::default(),
            platform_thickness: 10.0,
            ground_y: 320.0,
            home_x: 100.0,
            home_width: 100.0,

            player_size: 20.0,
            min_distance: 1.0,
            max_distance: 100.0,
            speed_scale: 200.0,
            vertical_ratio: 0.4,

            squash_rate: 0.3,
            squash_min: 0.7,
            squash_recovery: 0.2,

            accuracy_tolerance: 0.2,

            camera_smoothing: 0.1,
            camera_follow_y: false,
            view_width: 600.0,
            view_height: 400.0,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Check every range and sign constraint the simulation relies on
    pub fn validate(&self) -> Result<(), TuningError> {
        range("gap", self.gap_min, self.gap_max)?;
        range("distance", self.min_distance, self.max_distance)?;
        match self.platform_width {
            PlatformWidth::Fixed { width } => positive("platform_width", width)?,
            PlatformWidth::Random { min, max } => {
                positive("platform_width.min", min)?;
                range("platform_width", min, max)?;
            }
        }

        // Gaps run left edge to left edge, so the widest platform must fit
        let widest = self.platform_width.max_width().max(self.home_width);
        if self.gap_min.is_nan() || self.gap_min < widest {
            return Err(TuningError::OverlappingPlatforms {
                gap_min: self.gap_min,
                width: widest,
            });
        }

        positive("dt", self.dt)?;
        positive("gravity", self.gravity)?;
        positive("platform_thickness", self.platform_thickness)?;
        positive("home_width", self.home_width)?;
        positive("player_size", self.player_size)?;
        positive("speed_scale", self.speed_scale)?;
        positive("view_width", self.view_width)?;
        positive("view_height", self.view_height)?;

        non_negative("squash_rate", self.squash_rate)?;
        unit("camera_smoothing", self.camera_smoothing)?;
        unit("squash_min", self.squash_min)?;
        unit("squash_recovery", self.squash_recovery)?;
        unit("accuracy_tolerance", self.accuracy_tolerance)?;
        Ok(())
    }
}

fn range(name: &'static str, min: f32, max: f32) -> Result<(), TuningError> {
    // NaN fails the comparison and is rejected too
    if min <= max {
        Ok(())
    } else {
        Err(TuningError::InvalidRange { name, min, max })
    }
}

fn positive(name: &'static str, value: f32) -> Result<(), TuningError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(TuningError::NotPositive { name, value })
    }
}

fn non_negative(name: &'static str, value: f32) -> Result<(), TuningError> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(TuningError::Negative { name, value })
    }
}

fn unit(name: &'static str, value: f32) -> Result<(), TuningError> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(TuningError::OutOfUnitRange { name, value })
    }
}
