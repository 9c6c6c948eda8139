//! Sea Jump - hold to charge, release to leap between platforms over the sea
//!
//! Core modules:
//! - `sim`: Deterministic simulation (charge, flight, landing, camera, session)
//! - `tuning`: Data-driven game balance
//! - `settings`: Presentation preferences
//! - `renderer`: WebGPU rendering pipeline
//! - `audio`: Procedural Web Audio sound (browser only)

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::Settings;
pub use sim::{GameSession, Snapshot};
pub use tuning::{Tuning, TuningError};

/// Host loop constants
pub mod consts {
    /// Logical simulation ticks per second
    pub const TICK_HZ: f32 = 60.0;
    /// Wall time covered by one logical tick (seconds)
    pub const TICK_DT: f32 = 1.0 / TICK_HZ;
    /// Maximum ticks per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;
}
