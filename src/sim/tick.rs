//! Simulation tick
//!
//! Core game loop that advances the run by one step.

use super::collision::{Contact, detect_overlaps, dispatch_order};
use super::state::{Category, GameState};
use super::{idle, physics, player, projectile, scroll, spawn};

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Jump pressed this tick (edge)
    pub jump: bool,
    /// Fire pressed this tick (edge)
    pub fire: bool,
    /// Horizontal axis, -1 (left) to 1 (right)
    pub move_axis: f32,
    /// Idle/demo mode - autopilot plays the game
    pub idle_mode: bool,
    /// Contacts reported by an external physics host, dispatched alongside
    /// the built-in overlap checks
    pub contacts: Vec<Contact>,
}

/// Advance the game state by one timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    let mut input = input.clone();
    if input.idle_mode {
        let auto = idle::autopilot(state);
        input.jump = auto.jump;
        input.fire = auto.fire;
        input.move_axis = auto.move_axis;
    }
    let input = &input;

    spawn::update(state, dt);

    // Landing resolves before input so a jump on the landing tick is not refunded
    for contact in physics::integrate(state, dt) {
        dispatch(state, &contact);
    }
    player::update(state, input, dt);

    scroll::update(state, dt);
    projectile::update(state);

    let mut contacts = input.contacts.clone();
    contacts.extend(detect_overlaps(&state.world));
    dispatch_order(&state.world, &mut contacts);
    for contact in &contacts {
        dispatch(state, contact);
    }

    state.world.flush();
    state.time_ticks += 1;
    state.elapsed += dt as f64;
}

/// Route one contact to the controller that owns its subject
fn dispatch(state: &mut GameState, contact: &Contact) {
    match state.world.category_of(contact.subject) {
        Some(Category::Player) => player::on_contact(state, contact),
        Some(Category::Projectile) if contact.other_category == Category::Hazard => {
            projectile::on_hazard_contact(state, contact.subject, contact.other);
        }
        Some(_) => {}
        None => log::trace!("Ignoring contact for gone entity #{}", contact.subject),
    }
}
