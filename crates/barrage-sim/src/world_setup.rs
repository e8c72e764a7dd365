//! Entity spawn factories for setting up a round.
//!
//! Creates the tank rows for both teams and the random obstacle scatter.

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use barrage_core::components::*;
use barrage_core::constants::{
    OBSTACLE_MAX_HEALTH, TANK_ROW_INSET, TANK_ROW_SPACING, TANK_VERTICAL_OFFSET,
};
use barrage_core::enums::{Facing, Team};
use barrage_core::types::Position;
use barrage_terrain::HeightField;

use crate::config::RuleSet;
use crate::turn::PlayerSlot;

const RED_COLORS: [&str; 3] = ["#e74c3c", "#c0392b", "#d35400"];
const BLUE_COLORS: [&str; 3] = ["#3498db", "#2980b9", "#1abc9c"];

/// Spawn both tank rows and return the turn roster, alternating
/// Red/Blue so the teams trade shots.
pub fn spawn_tanks(
    world: &mut World,
    terrain: &HeightField,
    players_per_team: usize,
) -> Vec<PlayerSlot> {
    let width = terrain.width();
    let mut roster = Vec::with_capacity(players_per_team * 2);

    for i in 0..players_per_team {
        let red = spawn_tank(
            world,
            terrain,
            TANK_ROW_INSET + i as f64 * TANK_ROW_SPACING,
            Team::Red,
            format!("Red {}", i + 1),
            RED_COLORS[i % RED_COLORS.len()],
        );
        roster.push(PlayerSlot {
            entity: red,
            team: Team::Red,
        });

        let blue = spawn_tank(
            world,
            terrain,
            width - TANK_ROW_INSET - i as f64 * TANK_ROW_SPACING,
            Team::Blue,
            format!("Blue {}", i + 1),
            BLUE_COLORS[i % BLUE_COLORS.len()],
        );
        roster.push(PlayerSlot {
            entity: blue,
            team: Team::Blue,
        });
    }

    roster
}

/// Spawn one tank resting on the terrain at `x`.
pub fn spawn_tank(
    world: &mut World,
    terrain: &HeightField,
    x: f64,
    team: Team,
    name: String,
    color: &str,
) -> hecs::Entity {
    // Teams start aimed at each other.
    let (angle_deg, facing) = match team {
        Team::Red => (45.0, Facing::Right),
        Team::Blue => (135.0, Facing::Left),
    };

    world.spawn((
        Tank,
        TankInfo {
            name,
            team,
            color: color.to_string(),
        },
        Position::new(x, terrain.height_at(x) - TANK_VERTICAL_OFFSET),
        Barrel { angle_deg, facing },
        Health::full(),
        Mobility::default(),
    ))
}

/// Scatter floating platforms and ground obstacles across the middle of
/// the field. Counts of 0 in the rules disable each kind (used by
/// deterministic tests).
pub fn scatter_obstacles(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    terrain: &HeightField,
    rules: &RuleSet,
) {
    let w = rules.world_width;
    let h = rules.world_height;

    if rules.max_platforms > 0 {
        let lo = rules.max_platforms.min(2);
        let count = rng.gen_range(lo..=rules.max_platforms);
        for _ in 0..count {
            let width = rng.gen_range(60.0..140.0);
            let x = rng.gen_range(w * 0.2..w * 0.8 - width);
            let y = rng.gen_range(h * 0.2..h * 0.6);
            world.spawn((
                Obstacle,
                ObstacleBody {
                    x,
                    y,
                    width,
                    height: 15.0,
                    destructible: true,
                    health: OBSTACLE_MAX_HEALTH,
                    platform: true,
                },
            ));
        }
    }

    if rules.max_ground_obstacles > 0 {
        let count = rng.gen_range(1..=rules.max_ground_obstacles);
        for _ in 0..count {
            let width = rng.gen_range(40.0..70.0);
            let height = rng.gen_range(30.0..70.0);
            let x = rng.gen_range(w * 0.3..w * 0.7 - width);
            // Rooted in the ground under its left edge.
            let y = terrain.height_at(x) - height;
            world.spawn((
                Obstacle,
                ObstacleBody {
                    x,
                    y,
                    width,
                    height,
                    destructible: rng.gen_bool(0.7),
                    health: OBSTACLE_MAX_HEALTH,
                    platform: false,
                },
            ));
        }
    }
}
