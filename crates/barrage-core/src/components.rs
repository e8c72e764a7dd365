//! ECS components for hecs entities.
//!
//! Components are plain data structs with no game logic.
//! Logic lives in systems, not components.

use serde::{Deserialize, Serialize};

use crate::enums::{Facing, Team};
use crate::types::Position;

/// Marks an entity as a tank.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Tank;

/// Marks an entity as an obstacle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Obstacle;

/// Marks an entity as a projectile and carries its warhead rating.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Projectile {
    /// Damage at distance 0 from the detonation.
    pub damage: f64,
}

/// Identity of a tank.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TankInfo {
    pub name: String,
    pub team: Team,
    /// Display color (hex string, passed through to the renderer).
    pub color: String,
}

/// Aim state of a tank's barrel.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Barrel {
    /// Elevation in degrees, 0 = right horizon, 90 = straight up,
    /// 180 = left horizon.
    pub angle_deg: f64,
    pub facing: Facing,
}

/// Hit points. `current` never leaves [0, MAX_HEALTH]; 0 = dead.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Health {
    pub current: i32,
}

impl Health {
    pub fn full() -> Self {
        Self {
            current: crate::constants::MAX_HEALTH,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0
    }

    /// Apply damage, clamping at 0.
    pub fn apply_damage(&mut self, amount: i32) {
        self.current = (self.current - amount.max(0)).max(0);
    }
}

/// Per-turn movement accounting for a tank.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Mobility {
    /// Sum of absolute horizontal deltas applied this turn.
    pub used: f64,
}

/// Axis-aligned obstacle body. Platforms override terrain height
/// over their x-span; destructible bodies despawn at health <= 0.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ObstacleBody {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub destructible: bool,
    pub health: i32,
    pub platform: bool,
}

impl ObstacleBody {
    /// Whether a point lies inside the rect.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
    }

    /// Whether an x coordinate falls within the horizontal span.
    pub fn spans_x(&self, x: f64) -> bool {
        x >= self.x && x <= self.x + self.width
    }

    pub fn center(&self) -> Position {
        Position::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Recent projectile positions for trail rendering (oldest first).
/// Cosmetic only — never consulted by physics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Trail {
    pub points: Vec<Position>,
}

impl Trail {
    /// Append a point, dropping the oldest past the cap.
    pub fn push(&mut self, point: Position, cap: usize) {
        self.points.push(point);
        if self.points.len() > cap {
            self.points.remove(0);
        }
    }
}

/// Expanding explosion visual. Radius grows to `max_radius`,
/// `life` counts down to despawn.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ExplosionEffect {
    pub radius: f64,
    pub max_radius: f64,
    pub growth: f64,
    pub life: u32,
    pub max_life: u32,
}
