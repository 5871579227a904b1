//! Game state and core simulation types
//!
//! `GameState` is the single owner of everything the simulation mutates:
//! entity registries, spawn timers, score and the game-over flag.

use glam::{Vec2, Vec3};
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::bounds::{ClampRegion, Viewport, WorldBounds};
use super::idle::AutopilotMemory;
use super::spawn::SpawnController;
use crate::error::ConfigError;
use crate::hud::Hud;
use crate::tuning::Tuning;

/// Stable entity handle (never reused within a session)
pub type EntityId = u32;

/// What an entity is, which decides who may move or destroy it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Player,
    Hazard,
    Projectile,
    PowerUp,
    Terrain,
}

impl Category {
    /// Categories moved by the background scroll, in update order
    pub const WORLD_RELATIVE: [Category; 3] =
        [Category::PowerUp, Category::Projectile, Category::Hazard];

    pub fn is_world_relative(self) -> bool {
        Self::WORLD_RELATIVE.contains(&self)
    }
}

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Playing,
    /// Terminal for the session
    GameOver,
}

/// A simulated entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub category: Category,
    pub pos: Vec3,
    /// Half of the bounding box size
    pub half_extent: Vec2,
    pub vel: Vec2,
    /// False once destroyed; removed from its registry at end of tick
    pub alive: bool,
}

impl Entity {
    pub fn new(id: EntityId, category: Category, pos: Vec3, half_extent: Vec2) -> Self {
        Self {
            id,
            category,
            pos,
            half_extent,
            vel: Vec2::ZERO,
            alive: true,
        }
    }

    /// Bottom edge Y
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y - self.half_extent.y
    }
}

/// The robot and its per-run resources
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub body: Entity,
    /// Jumps left before the next terrain contact
    pub jumps_remaining: u8,
    /// Shots left
    pub ammo: u32,
    /// Standing on the terrain (contact-begin detection)
    pub grounded: bool,
    /// Region the robot's center is kept inside
    pub clamp: ClampRegion,
}

impl Player {
    /// Pull the robot back inside its clamp region. Bumping the top kills
    /// leftover upward velocity so the robot doesn't stick to the ceiling.
    pub fn keep_in_clamp(&mut self) {
        let before = self.body.pos;
        self.body.pos = self.clamp.clamp(before);
        if self.body.pos.y < before.y {
            self.body.vel.y = 0.0;
        }
    }
}

/// The scrolling platform
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Terrain {
    pub id: EntityId,
    pub top_y: f32,
    pub width: f32,
    pub scroll_speed: f32,
}

/// Things that happened during a tick, for UI/audio collaborators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Spawned { id: EntityId, category: Category },
    Culled { id: EntityId, category: Category },
    Jumped { jumps_remaining: u8 },
    Landed,
    ShotFired { id: EntityId, ammo: u32 },
    PowerUpCollected { ammo: u32 },
    HazardDestroyed { score: u64 },
    GameOver { score: u64 },
}

/// Per-category entity registries
#[derive(Debug, Clone)]
pub struct World {
    pub player: Player,
    pub terrain: Terrain,
    /// Sorted by id (spawn order)
    pub hazards: Vec<Entity>,
    pub power_ups: Vec<Entity>,
    pub projectiles: Vec<Entity>,
    bounds: WorldBounds,
    next_id: EntityId,
}

impl World {
    pub fn new(tuning: &Tuning) -> Self {
        let bounds = tuning.viewport.world_bounds();
        let half = tuning.player.size / 2.0;
        let start = Vec3::new(tuning.player.start_x, tuning.terrain.top_y + half.y, 0.0);
        let clamp = ClampRegion::new(&bounds, half);

        let mut body = Entity::new(1, Category::Player, start, half);
        body.pos = clamp.clamp(body.pos);

        Self {
            player: Player {
                body,
                jumps_remaining: tuning.player.max_jumps,
                ammo: tuning.player.starting_ammo,
                grounded: false,
                clamp,
            },
            terrain: Terrain {
                id: 2,
                top_y: tuning.terrain.top_y,
                width: tuning.terrain.width,
                scroll_speed: tuning.terrain.scroll_speed,
            },
            hazards: Vec::new(),
            power_ups: Vec::new(),
            projectiles: Vec::new(),
            bounds,
            next_id: 3,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Visible world rectangle
    pub fn bounds(&self) -> &WorldBounds {
        &self.bounds
    }

    /// Registry holding a world-relative category
    pub fn registry(&self, category: Category) -> Option<&Vec<Entity>> {
        match category {
            Category::Hazard => Some(&self.hazards),
            Category::PowerUp => Some(&self.power_ups),
            Category::Projectile => Some(&self.projectiles),
            Category::Player | Category::Terrain => None,
        }
    }

    pub fn registry_mut(&mut self, category: Category) -> Option<&mut Vec<Entity>> {
        match category {
            Category::Hazard => Some(&mut self.hazards),
            Category::PowerUp => Some(&mut self.power_ups),
            Category::Projectile => Some(&mut self.projectiles),
            Category::Player | Category::Terrain => None,
        }
    }

    /// Create a world-relative entity. Player and terrain are fixed and
    /// cannot be spawned.
    pub fn spawn(&mut self, category: Category, pos: Vec3, half_extent: Vec2) -> Option<EntityId> {
        if !category.is_world_relative() {
            return None;
        }
        let id = self.next_entity_id();
        let registry = self.registry_mut(category)?;
        registry.push(Entity::new(id, category, pos, half_extent));
        Some(id)
    }

    /// Live entity by handle
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        if self.player.body.id == id {
            return Some(&self.player.body);
        }
        Category::WORLD_RELATIVE
            .iter()
            .filter_map(|c| self.registry(*c))
            .flat_map(|r| r.iter())
            .find(|e| e.id == id && e.alive)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        if self.player.body.id == id {
            return Some(&mut self.player.body);
        }
        self.hazards
            .iter_mut()
            .chain(self.power_ups.iter_mut())
            .chain(self.projectiles.iter_mut())
            .find(|e| e.id == id && e.alive)
    }

    /// Category of a live handle (terrain included)
    pub fn category_of(&self, id: EntityId) -> Option<Category> {
        if self.terrain.id == id {
            return Some(Category::Terrain);
        }
        self.get(id).map(|e| e.category)
    }

    pub fn is_alive(&self, id: EntityId) -> bool {
        self.category_of(id).is_some()
    }

    /// Mark an entity destroyed. Returns false if it was already gone or is
    /// not destroyable (player, terrain). Removal happens in [`World::flush`].
    pub fn destroy(&mut self, id: EntityId) -> bool {
        if id == self.player.body.id {
            return false;
        }
        match self.get_mut(id) {
            Some(entity) => {
                entity.alive = false;
                true
            }
            None => false,
        }
    }

    /// Destroy every hazard, projectile and power-up; returns how many
    pub fn destroy_all_world_relative(&mut self) -> usize {
        let mut count = 0;
        for entity in self
            .hazards
            .iter_mut()
            .chain(self.power_ups.iter_mut())
            .chain(self.projectiles.iter_mut())
            .filter(|e| e.alive)
        {
            entity.alive = false;
            count += 1;
        }
        count
    }

    /// Drop destroyed entities from the registries
    pub fn flush(&mut self) {
        self.hazards.retain(|e| e.alive);
        self.power_ups.retain(|e| e.alive);
        self.projectiles.retain(|e| e.alive);
    }

    /// Live world-relative entities
    pub fn active_count(&self) -> usize {
        self.hazards
            .iter()
            .chain(self.power_ups.iter())
            .chain(self.projectiles.iter())
            .filter(|e| e.alive)
            .count()
    }

    pub(crate) fn set_bounds(&mut self, bounds: WorldBounds) {
        self.bounds = bounds;
        let player = &mut self.player;
        player.clamp = ClampRegion::new(&bounds, player.body.half_extent);
        player.body.pos = player.clamp.clamp(player.body.pos);
    }
}

/// Complete game state (deterministic for a given seed and tuning)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Balance in effect for this run
    pub tuning: Tuning,
    /// Entity registries
    pub world: World,
    /// Hazard / power-up timers
    pub spawner: SpawnController,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Simulated seconds since start
    pub elapsed: f64,
    pub(crate) rng: Pcg32,
    pub(crate) autopilot: AutopilotMemory,
    score: u64,
    phase: GamePhase,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Start a run. Fails if the tuning cannot produce a playable screen.
    pub fn new(tuning: Tuning, seed: u64) -> Result<Self, ConfigError> {
        tuning.validate()?;

        let mut rng = Pcg32::seed_from_u64(seed);
        let spawner = SpawnController::new(&tuning, &mut rng);
        let world = World::new(&tuning);

        log::info!(
            "Run started with seed {} (hazard every {}s, charge every {}s)",
            seed,
            tuning.hazard.interval,
            tuning.power_up.interval
        );

        Ok(Self {
            seed,
            tuning,
            world,
            spawner,
            time_ticks: 0,
            elapsed: 0.0,
            rng,
            autopilot: AutopilotMemory::default(),
            score: 0,
            phase: GamePhase::Playing,
            events: Vec::new(),
        })
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Add one point. Allowed even on the tick the run ends.
    pub fn increase_score(&mut self) {
        self.score += 1;
        log::debug!("Score: {}", self.score);
    }

    /// End the run. The first call stops all spawning for good and clears
    /// every hazard, shot and charge; later calls do nothing.
    pub fn game_over(&mut self) {
        if self.is_game_over() {
            return;
        }
        self.phase = GamePhase::GameOver;
        self.spawner.cancel();
        let purged = self.world.destroy_all_world_relative();
        self.emit(GameEvent::GameOver { score: self.score });
        log::info!(
            "Game over at {:.2}s: score {} ({} entities cleared)",
            self.elapsed,
            self.score,
            purged
        );
    }

    /// Host reported a new camera size. Rejected if it would make the
    /// current tuning unplayable.
    pub fn set_viewport(&mut self, viewport: Viewport) -> Result<(), ConfigError> {
        let mut tuning = self.tuning.clone();
        tuning.viewport = viewport;
        tuning.validate()?;
        self.tuning = tuning;
        self.world.set_bounds(viewport.world_bounds());
        log::debug!(
            "Viewport changed: half extent {:?}",
            viewport.half_extent()
        );
        Ok(())
    }

    /// Score/shots/message text
    pub fn hud(&self) -> Hud {
        Hud::from_state(self)
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
