//! The robot: running, jumping, shooting and what it touches

use glam::Vec2;

use super::collision::{Contact, ContactKind};
use super::physics::apply_impulse;
use super::projectile;
use super::state::{Category, GameEvent, GameState};
use super::tick::TickInput;

/// Per-tick robot control. Does nothing once the run is over.
pub fn update(state: &mut GameState, input: &TickInput, dt: f32) {
    if state.is_game_over() {
        return;
    }

    // Jump (limited until the robot touches the platform again)
    if input.jump && state.world.player.jumps_remaining > 0 {
        let impulse = Vec2::new(0.0, state.tuning.player.jump_impulse);
        let player = &mut state.world.player;
        apply_impulse(&mut player.body, impulse);
        player.jumps_remaining -= 1;
        let jumps_remaining = player.jumps_remaining;
        state.emit(GameEvent::Jumped { jumps_remaining });
    }

    // Fire
    if input.fire && state.world.player.ammo > 0 {
        let origin = state.world.player.body.pos;
        if let Some(id) = projectile::fire(state, origin) {
            state.world.player.ammo -= 1;
            let ammo = state.world.player.ammo;
            log::debug!("Shot #{} fired, {} left", id, ammo);
            state.emit(GameEvent::ShotFired { id, ammo });
        }
    }

    // Run
    let axis = input.move_axis.clamp(-1.0, 1.0);
    let player = &mut state.world.player;
    player.body.pos.x += axis * state.tuning.player.speed * dt;

    player.keep_in_clamp();
}

/// Route a contact reported to the robot
pub fn on_contact(state: &mut GameState, contact: &Contact) {
    // Route on what the entity actually is, not what the reporter claims
    let Some(category) = state.world.category_of(contact.other) else {
        log::trace!("Ignoring robot contact with gone entity #{}", contact.other);
        return;
    };
    if category != contact.other_category {
        log::trace!(
            "Robot contact #{} reported as {:?} but is {:?}",
            contact.other,
            contact.other_category,
            category
        );
    }

    match (contact.kind, category) {
        (ContactKind::Trigger, Category::PowerUp) => collect_power_up(state, contact),
        (ContactKind::Trigger, Category::Hazard) => state.game_over(),
        (_, Category::Terrain) => land(state),
        _ => {}
    }
}

fn collect_power_up(state: &mut GameState, contact: &Contact) {
    if !state.world.destroy(contact.other) {
        return;
    }
    state.world.player.ammo += 1;
    let ammo = state.world.player.ammo;
    log::debug!("Charge collected, {} shots", ammo);
    state.emit(GameEvent::PowerUpCollected { ammo });
}

fn land(state: &mut GameState) {
    state.world.player.jumps_remaining = state.tuning.player.max_jumps;
    state.emit(GameEvent::Landed);
}
