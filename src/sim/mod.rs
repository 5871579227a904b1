//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod bounds;
pub mod collision;
pub mod idle;
pub mod physics;
pub mod player;
pub mod projectile;
pub mod scroll;
pub mod spawn;
pub mod state;
pub mod tick;

pub use bounds::{ClampRegion, Viewport, WorldBounds};
pub use collision::{Contact, ContactKind, detect_overlaps};
pub use spawn::{SpawnController, SpawnTimer, spawn_y_range};
pub use state::{
    Category, Entity, EntityId, GameEvent, GamePhase, GameState, Player, Terrain, World,
};
pub use tick::{TickInput, tick};
