//! Projectile flight system — integration and first-match collision.
//!
//! Each tick, every projectile appends to its trail, integrates under
//! gravity and wind, and is checked against (in priority order): world
//! bounds, the surface, obstacle rects, and living tanks. Bounds come
//! first so the terrain is never interpolated outside its domain;
//! terrain comes before bodies so a grazing shot that is already in the
//! ground explodes there instead of passing through.

use hecs::{Entity, World};

use barrage_core::components::*;
use barrage_core::constants::TRAIL_MAX_POINTS;
use barrage_core::types::{Position, Velocity};
use barrage_terrain::HeightField;

use crate::config::RuleSet;
use crate::systems::surface;

/// A projectile that finished its flight this tick.
#[derive(Debug, Clone)]
pub struct Detonation {
    pub position: Position,
    /// Damage at distance 0 (from the projectile's warhead).
    pub damage: f64,
    /// False for out-of-world fizzles: no splash, no crater,
    /// but the turn still ends.
    pub damaging: bool,
    /// The obstacle the projectile detonated inside of, if any.
    pub direct_hit: Option<Entity>,
}

/// Advance all projectiles one tick. Spent projectiles are pushed onto
/// `despawn_buffer` and reported as `Detonation`s.
pub fn run(
    world: &mut World,
    terrain: &HeightField,
    rules: &RuleSet,
    wind: f64,
    despawn_buffer: &mut Vec<Entity>,
) -> Vec<Detonation> {
    // Snapshot the static colliders first so the projectile query can
    // borrow the world mutably without conflicts.
    let platforms = surface::collect_platforms(world);
    let obstacles: Vec<(Entity, ObstacleBody)> = world
        .query::<(&Obstacle, &ObstacleBody)>()
        .iter()
        .map(|(e, (_, body))| (e, *body))
        .collect();
    let tanks: Vec<Position> = world
        .query::<(&Tank, &Position, &Health)>()
        .iter()
        .filter(|(_, (_, _, health))| health.is_alive())
        .map(|(_, (_, pos, _))| *pos)
        .collect();

    let mut detonations = Vec::new();

    for (entity, (projectile, pos, vel, trail)) in
        world.query_mut::<(&Projectile, &mut Position, &mut Velocity, &mut Trail)>()
    {
        trail.push(*pos, TRAIL_MAX_POINTS);

        pos.x += vel.x;
        pos.y += vel.y;
        vel.y += rules.gravity;
        vel.x += wind;

        let outcome = collide(pos, &platforms, &obstacles, &tanks, terrain, rules);
        if let Some((damaging, direct_hit)) = outcome {
            detonations.push(Detonation {
                position: *pos,
                damage: projectile.damage,
                damaging,
                direct_hit,
            });
            despawn_buffer.push(entity);
        }
    }

    detonations
}

/// First-match collision check. Returns `(damaging, direct_hit)`.
fn collide(
    pos: &Position,
    platforms: &[ObstacleBody],
    obstacles: &[(Entity, ObstacleBody)],
    tanks: &[Position],
    terrain: &HeightField,
    rules: &RuleSet,
) -> Option<(bool, Option<Entity>)> {
    // (a) Out of world: fizzle. Flying above the top is allowed.
    if pos.x < 0.0 || pos.x > rules.world_width || pos.y > rules.world_height {
        return Some((false, None));
    }

    // (b) Surface (platforms override terrain).
    if pos.y >= surface::height_at(platforms, terrain, pos.x) - rules.terrain_skin {
        return Some((true, None));
    }

    // (c) Inside an obstacle rect.
    for (entity, body) in obstacles {
        if body.contains(pos.x, pos.y) {
            return Some((true, Some(*entity)));
        }
    }

    // (d) Within hit radius of a living tank.
    for tank_pos in tanks {
        if pos.distance_to(tank_pos) < rules.tank_hit_radius {
            return Some((true, None));
        }
    }

    None
}
