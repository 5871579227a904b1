//! Contact events and bounding-box overlap detection
//!
//! A host engine normally reports trigger/collision contacts; headless runs
//! get them from `detect_overlaps`. Either way they are routed the same way.

use serde::{Deserialize, Serialize};

use super::state::{Category, Entity, EntityId, World};

/// Trigger overlaps vs. solid physical contact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContactKind {
    Trigger,
    Collision,
}

/// A contact-begin reported to `subject` about `other`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub subject: EntityId,
    pub other: EntityId,
    pub other_category: Category,
    pub kind: ContactKind,
}

impl Contact {
    pub fn trigger(subject: EntityId, other: &Entity) -> Self {
        Self {
            subject,
            other: other.id,
            other_category: other.category,
            kind: ContactKind::Trigger,
        }
    }
}

/// Axis-aligned box overlap in the XY plane (touching edges don't count)
#[inline]
pub fn overlaps(a: &Entity, b: &Entity) -> bool {
    (a.pos.x - b.pos.x).abs() < a.half_extent.x + b.half_extent.x
        && (a.pos.y - b.pos.y).abs() < a.half_extent.y + b.half_extent.y
}

/// All trigger overlaps between live entities: shots vs. hazards, then the
/// robot vs. hazards, then the robot vs. charges.
pub fn detect_overlaps(world: &World) -> Vec<Contact> {
    let mut contacts = Vec::new();
    let live = |e: &&Entity| e.alive;

    for shot in world.projectiles.iter().filter(live) {
        for hazard in world.hazards.iter().filter(live) {
            if overlaps(shot, hazard) {
                contacts.push(Contact::trigger(shot.id, hazard));
            }
        }
    }

    let robot = &world.player.body;
    for hazard in world.hazards.iter().filter(live) {
        if overlaps(robot, hazard) {
            contacts.push(Contact::trigger(robot.id, hazard));
        }
    }
    for charge in world.power_ups.iter().filter(live) {
        if overlaps(robot, charge) {
            contacts.push(Contact::trigger(robot.id, charge));
        }
    }

    contacts
}

/// Order contacts for dispatch: shot contacts resolve before robot contacts,
/// so a hazard shot down on the same tick it reaches the robot scores instead
/// of ending the run. Otherwise arrival order is kept.
pub fn dispatch_order(world: &World, contacts: &mut [Contact]) {
    contacts.sort_by_key(|c| match world.category_of(c.subject) {
        Some(Category::Projectile) => 0,
        Some(Category::Player) => 1,
        _ => 2,
    });
}
