//! Robo Dash - A side-scrolling robot runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, scrolling, collisions, game state)
//! - `tuning`: Data-driven game balance
//! - `hud`: Score/shots/message text for the host UI
//! - `error`: Startup configuration errors

pub mod error;
pub mod hud;
pub mod sim;
pub mod tuning;

pub use error::ConfigError;
pub use hud::Hud;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Jumps available between terrain contacts
    pub const MAX_JUMPS: u8 = 3;
    /// Shots the robot starts a run with
    pub const STARTING_AMMO: u32 = 3;

    /// Distance above the terrain top that still counts as standing on it
    pub const GROUND_EPSILON: f32 = 1.0e-3;

    /// Default run seed for the headless runner
    pub const DEFAULT_SEED: u64 = 0x0b0d_a5e0;
}
