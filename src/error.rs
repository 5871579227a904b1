//! Startup configuration errors
//!
//! Everything here is fatal at initialization. Once a `GameState` exists the
//! per-tick code has no failure path.

use thiserror::Error;

use crate::sim::Category;

/// Invalid tuning detected while building a session
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("viewport must have positive half-height and aspect (got {half_height}, {aspect})")]
    InvalidViewport { half_height: f32, aspect: f32 },

    #[error("{category:?} spawn interval must be positive (got {interval})")]
    NonPositiveInterval { category: Category, interval: f32 },

    #[error("{category:?} spawn interval {interval} is shorter than one tick ({min})")]
    IntervalTooShort {
        category: Category,
        interval: f32,
        min: f32,
    },

    #[error("{category:?} spawn range is empty: min y {min_y} > max y {max_y}")]
    DegenerateSpawnRange {
        category: Category,
        min_y: f32,
        max_y: f32,
    },

    #[error("{category:?} does not fit on screen: clamp region {min_x}..{max_x} x {min_y}..{max_y}")]
    DegenerateClampRegion {
        category: Category,
        min_x: f32,
        max_x: f32,
        min_y: f32,
        max_y: f32,
    },

    #[error("{category:?} size must be positive (got {width} x {height})")]
    InvalidSize {
        category: Category,
        width: f32,
        height: f32,
    },

    #[error("{name} must not be negative (got {value})")]
    NegativeValue { name: &'static str, value: f32 },

    #[error("player needs at least one jump")]
    NoJumps,

    #[error("jump impulse {impulse} cannot lift the robot off the ground (needs more than {min})")]
    JumpTooWeak { impulse: f32, min: f32 },

    #[error("failed to read tuning file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse tuning: {0}")]
    Parse(#[from] serde_json::Error),
}
