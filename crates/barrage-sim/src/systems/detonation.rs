//! Detonation resolver — splash damage, obstacle attrition, craters.
//!
//! For each damaging detonation: tanks take linearly decaying splash
//! damage, destructible obstacles near the blast lose a fixed decrement,
//! the terrain is deformed, and every surviving tank is resettled onto
//! the new surface. Non-damaging (out-of-world) detonations skip all of
//! that — the caller still ends the turn either way.

use hecs::{Entity, World};

use barrage_core::components::*;
use barrage_core::constants::{
    EXPLOSION_GROWTH_PER_TICK, EXPLOSION_LIFE_TICKS, EXPLOSION_MAX_RADIUS,
};
use barrage_core::events::AudioEvent;
use barrage_core::types::Position;
use barrage_terrain::HeightField;

use crate::config::RuleSet;
use crate::systems::flight::Detonation;
use crate::systems::surface;

/// Resolve one detonation against the world.
pub fn resolve(
    world: &mut World,
    terrain: &mut HeightField,
    rules: &RuleSet,
    det: &Detonation,
    audio_events: &mut Vec<AudioEvent>,
    despawn_buffer: &mut Vec<Entity>,
) {
    if det.damaging {
        splash_tanks(world, rules, det, audio_events);
        splash_obstacles(world, rules, det, despawn_buffer);
        terrain.deform(det.position.x, rules.crater_radius, rules.crater_strength);
        surface::settle_tanks(world, terrain);
    }

    spawn_effect(world, det.position);
    audio_events.push(AudioEvent::Impact {
        x: det.position.x,
        y: det.position.y,
    });
}

/// Radius-based splash to living tanks: `damage * (1 - dist/radius)`,
/// floored at 0, integer-rounded, health clamped at 0.
fn splash_tanks(
    world: &mut World,
    rules: &RuleSet,
    det: &Detonation,
    audio_events: &mut Vec<AudioEvent>,
) {
    for (_entity, (_tank, info, pos, health)) in
        world.query_mut::<(&Tank, &TankInfo, &Position, &mut Health)>()
    {
        if !health.is_alive() {
            continue;
        }
        let dist = pos.distance_to(&det.position);
        if dist < rules.damage_radius {
            let amount = (det.damage * (1.0 - dist / rules.damage_radius)).max(0.0) as i32;
            health.apply_damage(amount);
            if !health.is_alive() {
                audio_events.push(AudioEvent::TankDestroyed {
                    name: info.name.clone(),
                });
            }
        }
    }
}

/// Fixed decrement to destructible obstacles near the blast, plus the
/// direct-hit bonus for the obstacle the shot buried itself in.
/// Obstacles at zero health are queued for despawn.
fn splash_obstacles(
    world: &mut World,
    rules: &RuleSet,
    det: &Detonation,
    despawn_buffer: &mut Vec<Entity>,
) {
    for (entity, (_obstacle, body)) in world.query_mut::<(&Obstacle, &mut ObstacleBody)>() {
        if !body.destructible {
            continue;
        }
        let mut hit = 0;
        if body.center().distance_to(&det.position) < rules.obstacle_damage_radius {
            hit += rules.obstacle_damage;
        }
        if det.direct_hit == Some(entity) {
            hit += rules.obstacle_direct_hit_bonus;
        }
        if hit > 0 {
            body.health -= hit;
            if body.health <= 0 {
                despawn_buffer.push(entity);
            }
        }
    }
}

/// Spawn the expanding explosion visual.
fn spawn_effect(world: &mut World, position: Position) {
    world.spawn((
        position,
        ExplosionEffect {
            radius: 0.0,
            max_radius: EXPLOSION_MAX_RADIUS,
            growth: EXPLOSION_GROWTH_PER_TICK,
            life: EXPLOSION_LIFE_TICKS,
            max_life: EXPLOSION_LIFE_TICKS,
        },
    ));
}
