//! Player commands sent from the input layer to the simulation.
//!
//! Commands are validated and queued for processing at the next tick
//! boundary. Invalid or out-of-turn commands are policy no-ops, never
//! errors: the input layer does not need to know the turn state.

use serde::{Deserialize, Serialize};

use crate::enums::TerrainPreset;

/// All possible player actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// Start (or restart) a round. `preset: None` generates random terrain.
    StartMatch {
        players_per_team: usize,
        preset: Option<TerrainPreset>,
    },

    /// Move the current tank horizontally. Rejected if it would exceed
    /// the turn's movement budget; clamped to world bounds.
    Move { dx: f64 },

    /// Adjust the current barrel elevation, clamped into [0, 180].
    AdjustAngle { delta: f64 },

    /// Hold the fire control: power starts oscillating 0..=100.
    StartCharging,

    /// Release the fire control: fires at the current power
    /// (no-op at power 0).
    StopCharging,

    /// Forfeit the rest of the turn.
    SkipTurn,

    /// Leave a completed match.
    ReturnToMenu,
}
