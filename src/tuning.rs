//! Data-driven game balance
//!
//! Every number the simulation reads lives here so a run can be retuned from a
//! JSON file without touching code. Defaults match the shipped game.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{MAX_JUMPS, SIM_DT, STARTING_AMMO};
use crate::error::ConfigError;
use crate::sim::{Category, ClampRegion, Viewport, spawn_y_range};

/// Platform the robot runs on
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainTuning {
    /// World Y of the platform's top surface
    pub top_y: f32,
    /// Visible width of the scrolling platform quad
    pub width: f32,
    /// Texture scroll speed (platform widths per second)
    pub scroll_speed: f32,
}

impl Default for TerrainTuning {
    fn default() -> Self {
        Self {
            top_y: -3.0,
            width: 2.0 * 5.0 * 16.0 / 9.0,
            scroll_speed: 0.1,
        }
    }
}

/// The robot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    /// Bounding box size (world units)
    pub size: Vec2,
    /// Horizontal speed at full axis deflection
    pub speed: f32,
    /// Upward velocity added per jump
    pub jump_impulse: f32,
    /// Jumps available between terrain contacts
    pub max_jumps: u8,
    /// Shots at the start of a run
    pub starting_ammo: u32,
    /// Spawn X (Y is placed on the terrain)
    pub start_x: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            size: Vec2::new(1.0, 1.0),
            speed: 5.0,
            // 300 units of force over one 50 Hz physics step on a unit mass
            jump_impulse: 6.0,
            max_jumps: MAX_JUMPS,
            starting_ammo: STARTING_AMMO,
            start_x: -5.0,
        }
    }
}

/// A periodically spawned category (hazards, charges)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnTuning {
    /// Seconds between spawns
    pub interval: f32,
    /// Bounding box size (world units)
    pub size: Vec2,
    /// Upper bound of the random leftward drift speed (0 = scroll only)
    pub max_speed: f32,
}

impl SpawnTuning {
    pub fn hazard() -> Self {
        Self {
            interval: 2.0,
            size: Vec2::new(1.0, 1.0),
            max_speed: 1.0,
        }
    }

    pub fn power_up() -> Self {
        Self {
            interval: 3.0,
            size: Vec2::new(0.6, 0.6),
            max_speed: 0.0,
        }
    }
}

/// Laser shots
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileTuning {
    pub size: Vec2,
    pub speed: f32,
}

impl Default for ProjectileTuning {
    fn default() -> Self {
        Self {
            size: Vec2::new(0.6, 0.2),
            speed: 20.0,
        }
    }
}

/// Complete balance sheet for a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub viewport: Viewport,
    pub terrain: TerrainTuning,
    pub player: PlayerTuning,
    pub hazard: SpawnTuning,
    pub power_up: SpawnTuning,
    pub projectile: ProjectileTuning,
    /// Downward acceleration on the robot (units/s²)
    pub gravity: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            terrain: TerrainTuning::default(),
            player: PlayerTuning::default(),
            hazard: SpawnTuning::hazard(),
            power_up: SpawnTuning::power_up(),
            projectile: ProjectileTuning::default(),
            gravity: 9.81,
        }
    }
}

impl Tuning {
    /// Parse and validate tuning from JSON (missing fields take defaults)
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Spawn settings for a spawnable category
    pub fn spawn_for(&self, category: Category) -> Option<&SpawnTuning> {
        match category {
            Category::Hazard => Some(&self.hazard),
            Category::PowerUp => Some(&self.power_up),
            _ => None,
        }
    }

    /// Bounding box size of an entity template
    pub fn size_of(&self, category: Category) -> Vec2 {
        match category {
            Category::Player => self.player.size,
            Category::Hazard => self.hazard.size,
            Category::PowerUp => self.power_up.size,
            Category::Projectile => self.projectile.size,
            Category::Terrain => Vec2::new(self.terrain.width, 0.0),
        }
    }

    /// Reject configurations the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let vp = self.viewport;
        if !(vp.half_height > 0.0 && vp.aspect > 0.0) {
            return Err(ConfigError::InvalidViewport {
                half_height: vp.half_height,
                aspect: vp.aspect,
            });
        }

        for (name, value) in [
            ("gravity", self.gravity),
            ("player speed", self.player.speed),
            ("jump impulse", self.player.jump_impulse),
            ("projectile speed", self.projectile.speed),
            ("hazard max speed", self.hazard.max_speed),
            ("power-up max speed", self.power_up.max_speed),
            ("terrain width", self.terrain.width),
            ("terrain scroll speed", self.terrain.scroll_speed),
        ] {
            if value < 0.0 || value.is_nan() {
                return Err(ConfigError::NegativeValue { name, value });
            }
        }

        if self.player.max_jumps == 0 {
            return Err(ConfigError::NoJumps);
        }

        // One tick of gravity must not cancel the whole impulse, or the robot
        // never leaves the platform and never lands to get its jumps back
        let min_impulse = self.gravity * SIM_DT;
        if !(self.player.jump_impulse > min_impulse) {
            return Err(ConfigError::JumpTooWeak {
                impulse: self.player.jump_impulse,
                min: min_impulse,
            });
        }

        for category in [
            Category::Player,
            Category::Hazard,
            Category::PowerUp,
            Category::Projectile,
        ] {
            let size = self.size_of(category);
            if !(size.x > 0.0 && size.y > 0.0) {
                return Err(ConfigError::InvalidSize {
                    category,
                    width: size.x,
                    height: size.y,
                });
            }
        }

        let bounds = vp.world_bounds();
        let region = ClampRegion::new(&bounds, self.player.size / 2.0);
        if region.is_degenerate() {
            return Err(ConfigError::DegenerateClampRegion {
                category: Category::Player,
                min_x: region.min_x,
                max_x: region.max_x,
                min_y: region.min_y,
                max_y: region.max_y,
            });
        }

        for category in [Category::Hazard, Category::PowerUp] {
            let Some(spawn) = self.spawn_for(category) else {
                continue;
            };
            if !(spawn.interval > 0.0) {
                return Err(ConfigError::NonPositiveInterval {
                    category,
                    interval: spawn.interval,
                });
            }
            if spawn.interval < SIM_DT {
                return Err(ConfigError::IntervalTooShort {
                    category,
                    interval: spawn.interval,
                    min: SIM_DT,
                });
            }
            let (min_y, max_y) = spawn_y_range(&bounds, self.terrain.top_y, spawn.size.y / 2.0);
            if min_y > max_y {
                return Err(ConfigError::DegenerateSpawnRange {
                    category,
                    min_y,
                    max_y,
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tuning_is_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_from_json_fills_defaults() {
        let tuning = Tuning::from_json(r#"{ "gravity": 12.0, "hazard": { "interval": 1.5, "size": [1.0, 1.0], "max_speed": 2.0 } }"#)
            .expect("valid tuning");
        assert_eq!(tuning.gravity, 12.0);
        assert_eq!(tuning.hazard.interval, 1.5);
        assert_eq!(tuning.power_up, SpawnTuning::power_up());
        assert_eq!(tuning.player, PlayerTuning::default());
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(matches!(
            Tuning::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_rejects_non_positive_interval() {
        let mut tuning = Tuning::default();
        tuning.power_up.interval = 0.0;
        assert!(matches!(
            tuning.validate(),
            Err(ConfigError::NonPositiveInterval {
                category: Category::PowerUp,
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_interval_shorter_than_a_tick() {
        let mut tuning = Tuning::default();
        tuning.hazard.interval = 1.0e-30;
        assert!(matches!(
            tuning.validate(),
            Err(ConfigError::IntervalTooShort {
                category: Category::Hazard,
                ..
            })
        ));

        tuning.hazard.interval = SIM_DT;
        assert!(tuning.validate().is_ok());
    }

    #[test]
    fn test_rejects_jump_that_cannot_leave_the_ground() {
        let mut tuning = Tuning::default();
        tuning.player.jump_impulse = 0.0;
        assert!(matches!(
            tuning.validate(),
            Err(ConfigError::JumpTooWeak { .. })
        ));

        tuning.player.jump_impulse = tuning.gravity * SIM_DT;
        assert!(matches!(
            tuning.validate(),
            Err(ConfigError::JumpTooWeak { .. })
        ));
    }

    #[test]
    fn test_rejects_terrain_filling_screen() {
        let mut tuning = Tuning::default();
        tuning.terrain.top_y = tuning.viewport.half_height;
        assert!(matches!(
            tuning.validate(),
            Err(ConfigError::DegenerateSpawnRange {
                category: Category::Hazard,
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_oversized_player() {
        let mut tuning = Tuning::default();
        tuning.player.size = Vec2::new(1.0, tuning.viewport.half_height * 3.0);
        assert!(matches!(
            tuning.validate(),
            Err(ConfigError::DegenerateClampRegion { .. })
        ));
    }

    #[test]
    fn test_rejects_bad_viewport_and_negatives() {
        let mut tuning = Tuning::default();
        tuning.viewport.aspect = 0.0;
        assert!(matches!(
            tuning.validate(),
            Err(ConfigError::InvalidViewport { .. })
        ));

        let mut tuning = Tuning::default();
        tuning.hazard.max_speed = -1.0;
        assert!(matches!(
            tuning.validate(),
            Err(ConfigError::NegativeValue { .. })
        ));

        let mut tuning = Tuning::default();
        tuning.player.max_jumps = 0;
        assert!(matches!(tuning.validate(), Err(ConfigError::NoJumps)));
    }
}
