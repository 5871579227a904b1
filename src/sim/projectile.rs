//! Laser shots
//!
//! Shots fly right at a constant speed, vanish past the leading edge, and
//! take a hazard with them on contact.

use glam::{Vec2, Vec3};

use super::state::{Category, EntityId, GameEvent, GameState};

/// Create a shot at `origin` moving right at the tuned laser speed
pub fn fire(state: &mut GameState, origin: Vec3) -> Option<EntityId> {
    let half_extent = state.tuning.projectile.size / 2.0;
    let id = state.world.spawn(Category::Projectile, origin, half_extent)?;
    if let Some(shot) = state.world.get_mut(id) {
        shot.vel = Vec2::new(state.tuning.projectile.speed, 0.0);
    }
    Some(id)
}

/// Destroy shots that have fully passed the right edge of the screen
pub fn update(state: &mut GameState) {
    let leading_edge = state.world.bounds().max_x;
    let gone: Vec<EntityId> = state
        .world
        .projectiles
        .iter()
        .filter(|p| p.alive && p.pos.x > leading_edge + p.half_extent.x)
        .map(|p| p.id)
        .collect();

    for id in gone {
        if state.world.destroy(id) {
            state.emit(GameEvent::Culled {
                id,
                category: Category::Projectile,
            });
        }
    }
}

/// A shot touched a hazard: both go, one point scored. Returns false (and
/// changes nothing) if either was already destroyed.
pub fn on_hazard_contact(state: &mut GameState, shot: EntityId, hazard: EntityId) -> bool {
    let pair_alive = state.world.category_of(shot) == Some(Category::Projectile)
        && state.world.category_of(hazard) == Some(Category::Hazard);
    if !pair_alive {
        log::trace!("Ignoring stale shot contact #{} -> #{}", shot, hazard);
        return false;
    }

    state.world.destroy(shot);
    state.world.destroy(hazard);
    state.increase_score();
    state.emit(GameEvent::HazardDestroyed {
        score: state.score(),
    });
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    fn state() -> GameState {
        let mut tuning = Tuning::default();
        tuning.viewport.aspect = 1.6;
        GameState::new(tuning, 5).expect("valid")
    }

    #[test]
    fn test_fire_sets_rightward_velocity() {
        let mut state = state();
        let id = fire(&mut state, Vec3::new(1.0, 2.0, 0.0)).expect("fired");
        let shot = state.world.get(id).expect("alive");
        assert_eq!(shot.category, Category::Projectile);
        assert_eq!(shot.pos, Vec3::new(1.0, 2.0, 0.0));
        assert_eq!(shot.vel, Vec2::new(state.tuning.projectile.speed, 0.0));
    }

    #[test]
    fn test_leading_edge_cull() {
        let mut state = state();
        let inside = fire(&mut state, Vec3::new(8.2, 0.0, 0.0)).expect("fired"); // half width 0.3
        let outside = fire(&mut state, Vec3::new(8.4, 0.0, 0.0)).expect("fired");
        update(&mut state);
        assert!(state.world.is_alive(inside));
        assert!(!state.world.is_alive(outside));
    }

    #[test]
    fn test_hit_scores_once() {
        let mut state = state();
        let shot = fire(&mut state, Vec3::ZERO).expect("fired");
        let hazard = state
            .world
            .spawn(Category::Hazard, Vec3::ZERO, Vec2::splat(0.5))
            .expect("spawn");

        assert!(on_hazard_contact(&mut state, shot, hazard));
        assert!(!on_hazard_contact(&mut state, shot, hazard));
        assert!(!state.world.is_alive(shot));
        assert!(!state.world.is_alive(hazard));
        assert_eq!(state.score(), 1);
    }

    #[test]
    fn test_stale_hazard_leaves_shot_alive() {
        let mut state = state();
        let shot = fire(&mut state, Vec3::ZERO).expect("fired");
        let hazard = state
            .world
            .spawn(Category::Hazard, Vec3::ZERO, Vec2::splat(0.5))
            .expect("spawn");
        state.world.destroy(hazard);

        assert!(!on_hazard_contact(&mut state, shot, hazard));
        assert!(state.world.is_alive(shot));
        assert_eq!(state.score(), 0);
    }
}
