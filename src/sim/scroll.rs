//! Background scroll synchronization
//!
//! The platform texture scrolls left; everything that lives "in the world"
//! (hazards, charges, shots) must slide with it or it would appear to float.

use super::state::{Category, EntityId, GameEvent, GameState, Terrain};

/// Horizontal distance the platform scrolls during `dt`
#[inline]
pub fn scroll_displacement(terrain: &Terrain, dt: f32) -> f32 {
    terrain.width * dt * terrain.scroll_speed
}

/// Shift every world-relative entity left by this tick's scroll and destroy
/// the ones that have fully left through the trailing edge.
pub fn update(state: &mut GameState, dt: f32) {
    let dx = scroll_displacement(&state.world.terrain, dt);
    let trailing_edge = state.world.bounds().min_x;

    // Destroy after the pass, never mid-iteration
    let mut culled: Vec<(EntityId, Category)> = Vec::new();

    for category in Category::WORLD_RELATIVE {
        let Some(registry) = state.world.registry_mut(category) else {
            continue;
        };
        for entity in registry.iter_mut().filter(|e| e.alive) {
            entity.pos.x -= dx;
            if entity.pos.x < trailing_edge - entity.half_extent.x {
                culled.push((entity.id, category));
            }
        }
    }

    for (id, category) in culled {
        if state.world.destroy(id) {
            log::trace!("Culled {:?} #{} off the trailing edge", category, id);
            state.emit(GameEvent::Culled { id, category });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;
    use glam::{Vec2, Vec3};

    fn state() -> GameState {
        let mut tuning = Tuning::default();
        tuning.viewport.aspect = 1.6; // half width 8
        tuning.terrain.width = 16.0;
        tuning.terrain.scroll_speed = 0.5;
        GameState::new(tuning, 11).expect("valid")
    }

    #[test]
    fn test_displacement_formula() {
        let state = state();
        // 16 wide * 0.1 s * 0.5 /s
        assert!((scroll_displacement(&state.world.terrain, 0.1) - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_moves_world_relative_but_not_player() {
        let mut state = state();
        let hazard = state
            .world
            .spawn(Category::Hazard, Vec3::new(2.0, 0.0, 0.0), Vec2::splat(0.5))
            .expect("spawn");
        let charge = state
            .world
            .spawn(Category::PowerUp, Vec3::new(3.0, 1.0, 0.0), Vec2::splat(0.3))
            .expect("spawn");
        let shot = state
            .world
            .spawn(Category::Projectile, Vec3::new(-1.0, 1.0, 0.0), Vec2::splat(0.1))
            .expect("spawn");
        let player_before = state.world.player.body.pos;

        update(&mut state, 0.1);

        assert!((state.world.get(hazard).expect("alive").pos.x - 1.2).abs() < 1e-5);
        assert!((state.world.get(charge).expect("alive").pos.x - 2.2).abs() < 1e-5);
        assert!((state.world.get(shot).expect("alive").pos.x + 1.8).abs() < 1e-5);
        assert_eq!(state.world.player.body.pos, player_before);
    }

    #[test]
    fn test_culls_in_the_tick_it_crosses() {
        let mut state = state();
        // Threshold is -8 - 0.5 = -8.5; one step moves 0.8
        let id = state
            .world
            .spawn(Category::Hazard, Vec3::new(-7.8, 0.0, 0.0), Vec2::splat(0.5))
            .expect("spawn");

        update(&mut state, 0.1); // -8.6, past the threshold
        assert!(!state.world.is_alive(id));
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::Culled {
                id,
                category: Category::Hazard
            }]
        );
    }

    #[test]
    fn test_partially_visible_entity_survives() {
        let mut state = state();
        let id = state
            .world
            .spawn(Category::PowerUp, Vec3::new(-7.5, 0.0, 0.0), Vec2::splat(0.5))
            .expect("spawn");

        update(&mut state, 0.1); // -8.3, still overlapping the screen
        assert!(state.world.is_alive(id));
    }
}
