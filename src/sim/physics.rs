//! Minimal rigid-body step
//!
//! Stands in for the host engine's 2D physics when running headless:
//! velocity integration, gravity on the robot, and the robot resting on the
//! platform. Produces a terrain contact when the robot lands.

use glam::Vec2;

use super::collision::{Contact, ContactKind};
use super::state::{Category, Entity, GameState};
use crate::consts::GROUND_EPSILON;

/// Instantaneous velocity change (impulses are in velocity units)
#[inline]
pub fn apply_impulse(body: &mut Entity, impulse: Vec2) {
    body.vel += impulse;
}

/// Integrate all bodies over `dt`. Returns contact-begin events for the
/// robot touching down on the platform.
pub fn integrate(state: &mut GameState, dt: f32) -> Vec<Contact> {
    let mut contacts = Vec::new();
    let gravity = state.tuning.gravity;
    let terrain = state.world.terrain;

    let player = &mut state.world.player;
    let body = &mut player.body;
    body.vel.y -= gravity * dt;
    body.pos.x += body.vel.x * dt;
    body.pos.y += body.vel.y * dt;

    let rest_y = terrain.top_y + body.half_extent.y;
    if body.pos.y <= rest_y {
        body.pos.y = rest_y;
        if body.vel.y < 0.0 {
            body.vel.y = 0.0;
        }
    }

    let touching = body.bottom() <= terrain.top_y + GROUND_EPSILON;
    if touching && !player.grounded {
        contacts.push(Contact {
            subject: body.id,
            other: terrain.id,
            other_category: Category::Terrain,
            kind: ContactKind::Collision,
        });
    }
    player.grounded = touching;
    // The controller stops running at game over but the body keeps falling
    player.keep_in_clamp();

    for body in state
        .world
        .hazards
        .iter_mut()
        .chain(state.world.projectiles.iter_mut())
        .filter(|e| e.alive)
    {
        body.pos.x += body.vel.x * dt;
        body.pos.y += body.vel.y * dt;
    }

    contacts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;
    use glam::Vec3;

    fn state() -> GameState {
        GameState::new(Tuning::default(), 21).expect("valid")
    }

    #[test]
    fn test_first_step_on_terrain_is_a_landing() {
        let mut state = state();
        let contacts = integrate(&mut state, 1.0 / 60.0);
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].other_category, Category::Terrain);
        assert!(state.world.player.grounded);

        // Resting contact is not a new begin
        assert!(integrate(&mut state, 1.0 / 60.0).is_empty());
        assert_eq!(state.world.player.body.vel.y, 0.0);
    }

    #[test]
    fn test_jump_leaves_ground_then_lands_again() {
        let mut state = state();
        integrate(&mut state, 1.0 / 60.0);

        apply_impulse(&mut state.world.player.body, Vec2::new(0.0, 6.0));
        assert!(integrate(&mut state, 1.0 / 60.0).is_empty());
        assert!(!state.world.player.grounded);

        let mut landings = 0;
        for _ in 0..120 {
            landings += integrate(&mut state, 1.0 / 60.0).len();
        }
        assert_eq!(landings, 1);
        assert!(state.world.player.grounded);
    }

    #[test]
    fn test_robot_body_stops_at_clamp_top() {
        let mut state = state();
        state.world.player.body.vel = Vec2::new(0.0, 100.0);
        integrate(&mut state, 0.5);

        let player = &state.world.player;
        assert_eq!(player.body.pos.y, player.clamp.max_y);
        assert_eq!(player.body.vel.y, 0.0);
    }

    #[test]
    fn test_hazards_and_shots_move_with_velocity_without_gravity() {
        let mut state = state();
        let hazard = state
            .world
            .spawn(Category::Hazard, Vec3::new(5.0, 1.0, 0.0), Vec2::splat(0.5))
            .expect("spawn");
        let charge = state
            .world
            .spawn(Category::PowerUp, Vec3::new(4.0, 1.0, 0.0), Vec2::splat(0.3))
            .expect("spawn");
        if let Some(h) = state.world.get_mut(hazard) {
            h.vel = Vec2::new(-1.0, 0.0);
        }

        integrate(&mut state, 0.5);

        let h = state.world.get(hazard).expect("alive");
        assert_eq!(h.pos, Vec3::new(4.5, 1.0, 0.0));
        assert_eq!(state.world.get(charge).expect("alive").pos.x, 4.0);
    }
}
