//! Simulation constants and tuning parameters.
//!
//! These are the default values behind `RuleSet` in barrage-sim.
//! Treat them as tuning, not contract: anything gameplay-visible can be
//! overridden per match.

/// Simulation tick rate (Hz). Integration is per-tick, not per-second:
/// gravity/wind below are accelerations in world units per tick².
pub const TICK_RATE: u32 = 60;

// --- World bounds ---

/// World width in pixels.
pub const WORLD_WIDTH: f64 = 1100.0;

/// World height in pixels.
pub const WORLD_HEIGHT: f64 = 600.0;

// --- Terrain ---

/// Number of height-field samples across the world (fixed spacing).
pub const TERRAIN_SAMPLES: usize = 101;

/// Hard band terrain heights are clamped into after any mutation.
/// Must admit every preset control point.
pub const TERRAIN_MIN_Y: f64 = 200.0;
pub const TERRAIN_MAX_Y: f64 = 590.0;

/// Base ground level for random generation.
pub const BASE_TERRAIN_LEVEL: f64 = WORLD_HEIGHT - 60.0;

/// Band the random walk is confined to (tighter than the hard band so
/// tanks always spawn with headroom).
pub const WALK_MIN_Y: f64 = WORLD_HEIGHT - 120.0;
pub const WALK_MAX_Y: f64 = WORLD_HEIGHT - 40.0;

/// Peak-to-peak amplitude of one random-walk step.
pub const TERRAIN_ROUGHNESS: f64 = 20.0;

/// Number of neighbor-averaging smoothing passes.
pub const SMOOTHING_PASSES: u32 = 2;

// --- Tanks ---

pub const TANK_WIDTH: f64 = 40.0;
pub const TANK_BODY_HEIGHT: f64 = 20.0;

/// Tank center sits this far above the surface.
pub const TANK_VERTICAL_OFFSET: f64 = 15.0;

/// Barrel pivot sits this far above the tank center.
pub const TURRET_OFFSET: f64 = 5.0;

pub const BARREL_LENGTH: f64 = 25.0;

/// Projectiles within this distance of a living tank center detonate.
pub const TANK_HIT_RADIUS: f64 = 25.0;

pub const MAX_HEALTH: i32 = 100;

/// Per-turn horizontal movement allowance (sum of |dx| applied).
pub const MOVE_BUDGET: f64 = 150.0;

/// Tanks cannot drive closer than this to the world edge.
pub const EDGE_MARGIN: f64 = 25.0;

// --- Physics ---

/// Downward acceleration per tick (y grows downward).
pub const GRAVITY: f64 = 0.2;

/// Wind is drawn uniformly from ±WIND_MAX (units per tick², horizontal).
pub const WIND_MAX: f64 = 0.05;

/// Turns between wind redraws.
pub const WIND_CHANGE_TURNS: u32 = 4;

/// Projectile detonates when within this skin distance of the surface.
pub const TERRAIN_SKIN: f64 = 3.0;

/// Maximum projectile trail length (cosmetic).
pub const TRAIL_MAX_POINTS: usize = 8;

// --- Firing ---

/// Power oscillation step per charge period.
pub const POWER_STEP: f64 = 2.0;

/// Ticks between power oscillation steps while charging.
pub const CHARGE_PERIOD_TICKS: u64 = 2;

pub const POWER_MAX: f64 = 100.0;

/// Launch speed at full power (units per tick).
pub const POWER_SCALE: f64 = 16.0;

// --- Damage ---

/// Splash radius around a detonation that damages tanks.
pub const DAMAGE_RADIUS: f64 = 50.0;

/// Damage to a tank at distance 0 from the detonation.
pub const BASE_DAMAGE: f64 = 45.0;

/// Radius within which destructible obstacles take splash damage.
pub const OBSTACLE_DAMAGE_RADIUS: f64 = 50.0;

/// Health decrement for an obstacle inside the splash radius.
pub const OBSTACLE_DAMAGE: i32 = 30;

/// Extra damage to an obstacle the projectile detonated inside of.
pub const OBSTACLE_DIRECT_HIT_BONUS: i32 = 20;

pub const OBSTACLE_MAX_HEALTH: i32 = 100;

// --- Craters ---

pub const CRATER_RADIUS: f64 = 40.0;

/// Depth of the crater at its center (cosine falloff to the rim).
pub const CRATER_STRENGTH: f64 = 18.0;

// --- Explosion visuals ---

pub const EXPLOSION_MAX_RADIUS: f64 = 50.0;
pub const EXPLOSION_GROWTH_PER_TICK: f64 = 3.0;
pub const EXPLOSION_LIFE_TICKS: u32 = 30;

// --- Turn sequencing ---

/// Delay between a detonation resolving and the turn advancing,
/// so a view layer can play the explosion (~0.8s at 60Hz).
pub const TURN_ADVANCE_DELAY_TICKS: u64 = 48;

/// A turn that has not fired by this deadline is forfeited
/// automatically (20s at 60Hz).
pub const TURN_TIMEOUT_TICKS: u64 = 1200;

// --- Match setup ---

/// Default obstacle scatter at round start.
pub const MAX_PLATFORMS: u32 = 3;
pub const MAX_GROUND_OBSTACLES: u32 = 2;

/// Horizontal gap between tanks of the same team.
pub const TANK_ROW_SPACING: f64 = 60.0;

/// First tank of each team spawns this far from its world edge.
pub const TANK_ROW_INSET: f64 = 80.0;
