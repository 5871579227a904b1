//! Idle/demo mode autopilot
//!
//! Plays the game from state alone: shoots hazards lined up ahead, jumps
//! over the ones it can't shoot, and wanders toward charges.

use super::state::{Entity, GameState};

/// How far ahead (world units) a hazard counts as an immediate threat
const JUMP_LOOKAHEAD: f32 = 2.5;
/// How far ahead the robot is willing to take a shot
const FIRE_RANGE: f32 = 9.0;
/// Distance from the target x treated as "arrived"
const STEER_DEADZONE: f32 = 0.2;

/// Edge-trigger memory so held buttons register as separate presses
#[derive(Debug, Clone, Default)]
pub struct AutopilotMemory {
    jumped_last_tick: bool,
    fired_last_tick: bool,
}

/// What the autopilot wants to do this tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AutopilotInput {
    pub jump: bool,
    pub fire: bool,
    pub move_axis: f32,
}

/// Decide this tick's input for the robot
pub fn autopilot(state: &mut GameState) -> AutopilotInput {
    if state.is_game_over() {
        state.autopilot = AutopilotMemory::default();
        return AutopilotInput::default();
    }

    let player = &state.world.player;
    let robot = &player.body;

    let ahead = |h: &&Entity| h.alive && h.pos.x + h.half_extent.x > robot.pos.x - robot.half_extent.x;
    let nearest_threat = state
        .world
        .hazards
        .iter()
        .filter(ahead)
        .filter(|h| (h.pos.y - robot.pos.y).abs() < h.half_extent.y + robot.half_extent.y)
        .min_by(|a, b| a.pos.x.total_cmp(&b.pos.x));

    let mut fire = false;
    let mut jump = false;
    if let Some(hazard) = nearest_threat {
        let distance = hazard.pos.x - robot.pos.x;
        // A shot spawns at the robot's center and flies level
        let lined_up = (hazard.pos.y - robot.pos.y).abs() < hazard.half_extent.y;
        if player.ammo > 0 && lined_up && distance > 0.0 && distance < FIRE_RANGE {
            fire = true;
        } else if distance < JUMP_LOOKAHEAD && player.jumps_remaining > 0 && robot.vel.y <= 0.0 {
            jump = true;
        }
    }

    let target_x = state
        .world
        .power_ups
        .iter()
        .filter(|c| c.alive)
        .min_by(|a, b| {
            (a.pos.x - robot.pos.x)
                .abs()
                .total_cmp(&(b.pos.x - robot.pos.x).abs())
        })
        .map(|c| c.pos.x)
        .unwrap_or(state.tuning.player.start_x);
    let target_x = target_x.clamp(player.clamp.min_x, player.clamp.max_x);
    let offset = target_x - robot.pos.x;
    let move_axis = if offset.abs() < STEER_DEADZONE {
        0.0
    } else {
        offset.clamp(-1.0, 1.0)
    };

    // Release for a tick after each press so every press is an edge
    let memory = &mut state.autopilot;
    let jump = jump && !memory.jumped_last_tick;
    let fire = fire && !memory.fired_last_tick;
    memory.jumped_last_tick = jump;
    memory.fired_last_tick = fire;

    AutopilotInput {
        jump,
        fire,
        move_axis,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::state::Category;
    use crate::sim::tick::{TickInput, tick};
    use crate::tuning::Tuning;
    use glam::{Vec2, Vec3};

    fn state() -> GameState {
        GameState::new(Tuning::default(), 4242).expect("valid")
    }

    #[test]
    fn test_fires_at_lined_up_hazard() {
        let mut state = state();
        let robot = state.world.player.body.pos;
        state
            .world
            .spawn(Category::Hazard, robot + Vec3::new(5.0, 0.0, 0.0), Vec2::splat(0.5))
            .expect("spawn");
        let input = autopilot(&mut state);
        assert!(input.fire);
        assert!(!input.jump);

        // Held fire is released on the following tick
        assert!(!autopilot(&mut state).fire);
        assert!(autopilot(&mut state).fire);
    }

    #[test]
    fn test_jumps_when_out_of_ammo() {
        let mut state = state();
        state.world.player.ammo = 0;
        let robot = state.world.player.body.pos;
        state
            .world
            .spawn(Category::Hazard, robot + Vec3::new(1.5, 0.2, 0.0), Vec2::splat(0.5))
            .expect("spawn");
        let input = autopilot(&mut state);
        assert!(input.jump);
        assert!(!input.fire);
    }

    #[test]
    fn test_steers_toward_charge() {
        let mut state = state();
        let robot = state.world.player.body.pos;
        state
            .world
            .spawn(Category::PowerUp, robot + Vec3::new(3.0, 2.0, 0.0), Vec2::splat(0.3))
            .expect("spawn");
        assert_eq!(autopilot(&mut state).move_axis, 1.0);
    }

    #[test]
    fn test_idle_run_stays_in_bounds() {
        let mut state = state();
        let idle = TickInput {
            idle_mode: true,
            ..Default::default()
        };
        for _ in 0..6000 {
            tick(&mut state, &idle, SIM_DT);
            let player = &state.world.player;
            assert!(player.clamp.contains(player.body.pos));
            if state.is_game_over() {
                break;
            }
        }
    }
}
