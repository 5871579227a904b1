//! HUD text
//!
//! Read-only view of the run for the host's text widgets.

use serde::{Deserialize, Serialize};

use crate::sim::GameState;

/// Message shown once the run has ended
pub const GAME_OVER_MESSAGE: &str = "Game Over; good run!";

/// Strings for the score, shots and status labels
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hud {
    pub score: String,
    pub shots: String,
    pub message: String,
}

impl Hud {
    pub fn from_state(state: &GameState) -> Self {
        let message = if state.is_game_over() {
            GAME_OVER_MESSAGE.to_string()
        } else {
            String::new()
        };
        Self {
            score: format!("Score: {}", state.score()),
            shots: format!("Shots: {}", state.world.player.ammo),
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    #[test]
    fn test_hud_tracks_state() {
        let mut state = GameState::new(Tuning::default(), 1).expect("valid");
        let hud = state.hud();
        assert_eq!(hud.score, "Score: 0");
        assert_eq!(hud.shots, "Shots: 3");
        assert!(hud.message.is_empty());

        state.increase_score();
        state.game_over();
        let hud = state.hud();
        assert_eq!(hud.score, "Score: 1");
        assert_eq!(hud.message, GAME_OVER_MESSAGE);
    }
}
