//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// The two sides of the duel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    #[default]
    Red,
    Blue,
}

impl Team {
    pub fn opponent(&self) -> Team {
        match self {
            Team::Red => Team::Blue,
            Team::Blue => Team::Red,
        }
    }
}

/// Which way a tank's hull is pointing. Cosmetic plus barrel mirroring.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

/// Top-level match state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    /// No round in progress.
    #[default]
    Menu,
    /// Round running, turn machine live.
    Active,
    /// A team has been eliminated; turn progression halted.
    Complete,
}

/// Where the current player is inside their turn.
///
/// Aiming → Charging (fire control held) → Locked (shot in flight and
/// during the post-explosion delay) → Aiming (next player).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnPhase {
    #[default]
    Aiming,
    Charging,
    Locked,
}

/// Named terrain profiles, resampled from control points at round start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TerrainPreset {
    Flat,
    Hills,
    Mountain,
    Valley,
}
