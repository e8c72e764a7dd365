//! Events emitted by the simulation for audio and UI feedback.
//!
//! Fire-and-forget: a frontend that drops one loses a sound cue,
//! nothing else. Nothing here feeds back into the simulation.

use serde::{Deserialize, Serialize};

use crate::enums::Team;

/// Audio/notification events for the frontend sound system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AudioEvent {
    /// A projectile left the barrel.
    ShotFired { team: Team },
    /// A detonation resolved (damaging or not).
    Impact { x: f64, y: f64 },
    /// A tank's health reached zero.
    TankDestroyed { name: String },
    /// Control passed to the next player.
    TurnChanged { player: String },
    /// A team was eliminated. `winner: None` means mutual destruction.
    MatchOver { winner: Option<Team> },
}
