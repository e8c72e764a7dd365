//! Engine configuration: seed plus the full gameplay rule set.
//!
//! Every gameplay-visible number is a named `RuleSet` field so hosts and
//! tests can override it; the defaults come from `barrage_core::constants`.

use serde::{Deserialize, Serialize};

use barrage_core::constants::*;

/// Configuration for constructing a `GameEngine`.
#[derive(Debug, Clone)]
pub struct MatchConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    pub rules: RuleSet,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            rules: RuleSet::default(),
        }
    }
}

/// The complete tunable rule set for a match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleSet {
    // --- World ---
    pub world_width: f64,
    pub world_height: f64,

    // --- Physics (per-tick accelerations) ---
    pub gravity: f64,
    /// Wind is redrawn uniformly from ±wind_max.
    pub wind_max: f64,
    /// Turns between wind redraws.
    pub wind_change_turns: u32,
    /// Detonation skin distance above the surface.
    pub terrain_skin: f64,

    // --- Firing ---
    pub power_step: f64,
    pub charge_period_ticks: u64,
    /// Launch speed at power 100.
    pub power_scale: f64,
    pub barrel_length: f64,

    // --- Damage ---
    pub base_damage: f64,
    pub damage_radius: f64,
    pub obstacle_damage: i32,
    pub obstacle_damage_radius: f64,
    pub obstacle_direct_hit_bonus: i32,
    pub tank_hit_radius: f64,

    // --- Craters ---
    pub crater_radius: f64,
    pub crater_strength: f64,

    // --- Movement ---
    pub move_budget: f64,
    pub edge_margin: f64,

    // --- Sequencing ---
    pub turn_advance_delay_ticks: u64,
    /// A turn that has not fired by this deadline is forfeited.
    /// 0 disables the timeout.
    pub turn_timeout_ticks: u64,

    // --- Round setup scatter (0 disables) ---
    pub max_platforms: u32,
    pub max_ground_obstacles: u32,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,
            gravity: GRAVITY,
            wind_max: WIND_MAX,
            wind_change_turns: WIND_CHANGE_TURNS,
            terrain_skin: TERRAIN_SKIN,
            power_step: POWER_STEP,
            charge_period_ticks: CHARGE_PERIOD_TICKS,
            power_scale: POWER_SCALE,
            barrel_length: BARREL_LENGTH,
            base_damage: BASE_DAMAGE,
            damage_radius: DAMAGE_RADIUS,
            obstacle_damage: OBSTACLE_DAMAGE,
            obstacle_damage_radius: OBSTACLE_DAMAGE_RADIUS,
            obstacle_direct_hit_bonus: OBSTACLE_DIRECT_HIT_BONUS,
            tank_hit_radius: TANK_HIT_RADIUS,
            crater_radius: CRATER_RADIUS,
            crater_strength: CRATER_STRENGTH,
            move_budget: MOVE_BUDGET,
            edge_margin: EDGE_MARGIN,
            turn_advance_delay_ticks: TURN_ADVANCE_DELAY_TICKS,
            turn_timeout_ticks: TURN_TIMEOUT_TICKS,
            max_platforms: MAX_PLATFORMS,
            max_ground_obstacles: MAX_GROUND_OBSTACLES,
        }
    }
}
