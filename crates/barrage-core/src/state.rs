//! Game state snapshot — the complete visible state sent to the frontend each tick.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::AudioEvent;
use crate::types::{Position, SimTime};

/// Complete game state broadcast to the frontend after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: MatchPhase,
    pub turn: TurnView,
    /// Set once the match is Complete. `None` while live, and also on
    /// the (rare) mutual-destruction ending.
    pub winner: Option<Team>,
    /// Terrain polyline, one point per height-field sample.
    pub terrain: Vec<Position>,
    pub tanks: Vec<TankView>,
    pub obstacles: Vec<ObstacleView>,
    pub projectiles: Vec<ProjectileView>,
    pub explosions: Vec<ExplosionView>,
    pub audio_events: Vec<AudioEvent>,
}

/// Whose turn it is and what they are doing with it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TurnView {
    pub current_index: usize,
    pub player_name: String,
    pub team: Team,
    pub phase: TurnPhase,
    pub angle_deg: f64,
    pub power: f64,
    /// Per-tick horizontal acceleration currently applied to projectiles.
    pub wind: f64,
    pub movement_remaining: f64,
    /// Seconds left before the turn is forfeited. 0 while a shot is in
    /// flight (the countdown is suspended) or when timeouts are disabled.
    pub time_remaining_secs: f64,
    pub turn_count: u32,
}

/// A tank on the field. Dead tanks stay visible as wrecks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TankView {
    pub name: String,
    pub team: Team,
    pub color: String,
    pub position: Position,
    pub health: i32,
    pub max_health: i32,
    pub angle_deg: f64,
    pub facing: Facing,
    pub alive: bool,
    pub is_current: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstacleView {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub destructible: bool,
    pub health: i32,
    pub platform: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub position: Position,
    /// Recent positions, oldest first.
    pub trail: Vec<Position>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplosionView {
    pub position: Position,
    pub radius: f64,
    /// Remaining life as a fraction of the full lifetime (for fade-out).
    pub life_frac: f64,
}
