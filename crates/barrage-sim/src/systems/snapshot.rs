//! Snapshot builder — flattens the world into a GameStateSnapshot.
//!
//! Pure read: nothing here mutates simulation state except draining the
//! audio-event buffer the engine hands over.

use hecs::World;

use barrage_core::components::*;
use barrage_core::constants::MAX_HEALTH;
use barrage_core::enums::{MatchPhase, Team};
use barrage_core::events::AudioEvent;
use barrage_core::state::*;
use barrage_core::types::{Position, SimTime};
use barrage_terrain::HeightField;

use crate::config::RuleSet;
use crate::turn::{PlayerSlot, TurnState};

/// Build the complete per-tick snapshot.
#[allow(clippy::too_many_arguments)]
pub fn build_snapshot(
    world: &World,
    terrain: &HeightField,
    time: &SimTime,
    phase: MatchPhase,
    turn: &TurnState,
    roster: &[PlayerSlot],
    rules: &RuleSet,
    time_remaining_secs: f64,
    winner: Option<Team>,
    audio_events: Vec<AudioEvent>,
) -> GameStateSnapshot {
    GameStateSnapshot {
        time: *time,
        phase,
        turn: build_turn_view(world, turn, roster, rules, time_remaining_secs),
        winner,
        terrain: terrain.points(),
        tanks: build_tank_views(world, turn, roster),
        obstacles: build_obstacle_views(world),
        projectiles: build_projectile_views(world),
        explosions: build_explosion_views(world),
        audio_events,
    }
}

fn build_turn_view(
    world: &World,
    turn: &TurnState,
    roster: &[PlayerSlot],
    rules: &RuleSet,
    time_remaining_secs: f64,
) -> TurnView {
    let mut view = TurnView {
        current_index: turn.current,
        phase: turn.phase,
        power: turn.power,
        wind: turn.wind,
        time_remaining_secs,
        turn_count: turn.turn_count,
        ..TurnView::default()
    };

    if let Some(slot) = roster.get(turn.current) {
        if let Ok(info) = world.get::<&TankInfo>(slot.entity) {
            view.player_name = info.name.clone();
            view.team = info.team;
        }
        if let Ok(barrel) = world.get::<&Barrel>(slot.entity) {
            view.angle_deg = barrel.angle_deg;
        }
        if let Ok(mobility) = world.get::<&Mobility>(slot.entity) {
            view.movement_remaining = (rules.move_budget - mobility.used).max(0.0);
        }
    }

    view
}

/// Tank views in roster order, so the frontend's seat list is stable.
fn build_tank_views(world: &World, turn: &TurnState, roster: &[PlayerSlot]) -> Vec<TankView> {
    let mut views = Vec::with_capacity(roster.len());
    for (index, slot) in roster.iter().enumerate() {
        let mut query = match world.query_one::<(&TankInfo, &Position, &Barrel, &Health)>(slot.entity)
        {
            Ok(q) => q,
            Err(_) => continue,
        };
        if let Some((info, pos, barrel, health)) = query.get() {
            views.push(TankView {
                name: info.name.clone(),
                team: info.team,
                color: info.color.clone(),
                position: *pos,
                health: health.current,
                max_health: MAX_HEALTH,
                angle_deg: barrel.angle_deg,
                facing: barrel.facing,
                alive: health.is_alive(),
                is_current: index == turn.current,
            });
        }
    }
    views
}

fn build_obstacle_views(world: &World) -> Vec<ObstacleView> {
    world
        .query::<(&Obstacle, &ObstacleBody)>()
        .iter()
        .map(|(_, (_, body))| ObstacleView {
            x: body.x,
            y: body.y,
            width: body.width,
            height: body.height,
            destructible: body.destructible,
            health: body.health,
            platform: body.platform,
        })
        .collect()
}

fn build_projectile_views(world: &World) -> Vec<ProjectileView> {
    world
        .query::<(&Projectile, &Position, &Trail)>()
        .iter()
        .map(|(_, (_, pos, trail))| ProjectileView {
            position: *pos,
            trail: trail.points.clone(),
        })
        .collect()
}

fn build_explosion_views(world: &World) -> Vec<ExplosionView> {
    world
        .query::<(&Position, &ExplosionEffect)>()
        .iter()
        .map(|(_, (pos, effect))| ExplosionView {
            position: *pos,
            radius: effect.radius,
            life_frac: effect.life as f64 / effect.max_life as f64,
        })
        .collect()
}
