//! Periodic hazard and charge spawning
//!
//! Each spawnable category runs its own repeating timer on the simulation
//! clock. A fired timer places a new entity just past the right edge of the
//! screen, somewhere between the platform top and the screen top.

use glam::{Vec2, Vec3};
use rand::Rng;
use rand_pcg::Pcg32;

use super::bounds::WorldBounds;
use super::state::{Category, EntityId, GameEvent, GameState};
use crate::tuning::Tuning;

/// Repeating simulation-time timer for one category
#[derive(Debug, Clone)]
pub struct SpawnTimer {
    pub category: Category,
    /// Seconds between fires
    pub interval: f32,
    /// Clock time of the next fire
    pub next_fire: f64,
}

impl SpawnTimer {
    pub fn new(category: Category, interval: f32, initial_delay: f32) -> Self {
        Self {
            category,
            interval,
            next_fire: initial_delay as f64,
        }
    }

    /// First fire after a random delay in `[0, interval)`
    pub fn with_random_phase(category: Category, interval: f32, rng: &mut Pcg32) -> Self {
        let delay = rng.random::<f32>() * interval;
        Self::new(category, interval, delay)
    }

    /// Fire times due at or before `now`, advancing the schedule past them
    fn due(&mut self, now: f64) -> Vec<f64> {
        let mut fired = Vec::new();
        while self.next_fire <= now {
            fired.push(self.next_fire);
            self.next_fire += self.interval as f64;
        }
        fired
    }
}

/// All spawn timers plus the clock that drives them
#[derive(Debug, Clone)]
pub struct SpawnController {
    timers: Vec<SpawnTimer>,
    clock: f64,
    cancelled: bool,
}

impl SpawnController {
    /// Timers for hazards and charges with independent random phases
    pub fn new(tuning: &Tuning, rng: &mut Pcg32) -> Self {
        let timers = vec![
            SpawnTimer::with_random_phase(Category::PowerUp, tuning.power_up.interval, rng),
            SpawnTimer::with_random_phase(Category::Hazard, tuning.hazard.interval, rng),
        ];
        Self::with_timers(timers)
    }

    pub fn with_timers(timers: Vec<SpawnTimer>) -> Self {
        Self {
            timers,
            clock: 0.0,
            cancelled: false,
        }
    }

    pub fn timers(&self) -> &[SpawnTimer] {
        &self.timers
    }

    pub fn clock(&self) -> f64 {
        self.clock
    }

    /// Advance the clock by `dt` and return every category whose timer fired,
    /// in fire-time order. Returns nothing once cancelled.
    pub fn advance(&mut self, dt: f32) -> Vec<Category> {
        if self.cancelled {
            return Vec::new();
        }
        self.clock += dt as f64;

        let now = self.clock;
        let mut fired: Vec<(f64, Category)> = self
            .timers
            .iter_mut()
            .flat_map(|t| {
                let category = t.category;
                t.due(now).into_iter().map(move |at| (at, category))
            })
            .collect();
        // Stable: timers firing at the same instant keep declaration order
        fired.sort_by(|a, b| a.0.total_cmp(&b.0));
        fired.into_iter().map(|(_, c)| c).collect()
    }

    /// Stop all timers for the rest of the session
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }
}

/// Vertical band a spawned entity's center may occupy: fully above the
/// terrain and fully below the screen top. `min > max` means the terrain
/// leaves no room (a tuning error).
pub fn spawn_y_range(bounds: &WorldBounds, terrain_top_y: f32, half_height: f32) -> (f32, f32) {
    (terrain_top_y + half_height, bounds.max_y - half_height)
}

/// Spawn point just off the right edge at a random height in the band
pub fn spawn_position(
    rng: &mut Pcg32,
    bounds: &WorldBounds,
    terrain_top_y: f32,
    half_extent: Vec2,
) -> Option<Vec3> {
    let (min_y, max_y) = spawn_y_range(bounds, terrain_top_y, half_extent.y);
    if min_y > max_y {
        return None;
    }
    let x = bounds.max_x + half_extent.x;
    let y = rng.random_range(min_y..=max_y);
    Some(Vec3::new(x, y, 0.0))
}

/// Create one entity of `category` off-screen. Hazards also get a random
/// leftward drift so they don't move in lockstep with the scroll.
pub fn spawn(state: &mut GameState, category: Category) -> Option<EntityId> {
    let template = *state.tuning.spawn_for(category)?;
    let half_extent = template.size / 2.0;
    let bounds = *state.world.bounds();

    let Some(pos) = spawn_position(&mut state.rng, &bounds, state.world.terrain.top_y, half_extent)
    else {
        log::warn!("No room to spawn {:?} above the terrain", category);
        return None;
    };

    let id = state.world.spawn(category, pos, half_extent)?;
    if category == Category::Hazard {
        let speed = state.rng.random::<f32>() * template.max_speed;
        if let Some(entity) = state.world.get_mut(id) {
            entity.vel = Vec2::new(-speed, 0.0);
        }
    }

    log::debug!("Spawned {:?} #{} at ({:.2}, {:.2})", category, id, pos.x, pos.y);
    state.emit(GameEvent::Spawned { id, category });
    Some(id)
}

/// Advance spawn timers and create whatever fired this tick
pub fn update(state: &mut GameState, dt: f32) {
    if state.is_game_over() {
        return;
    }
    for category in state.spawner.advance(dt) {
        spawn(state, category);
    }
}
