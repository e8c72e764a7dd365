//! Surface queries: terrain height with platform override.
//!
//! Platforms act as raised ground over their x-span, so they are checked
//! before the height-field interpolation. Tanks rest on the surface and
//! must be resettled whenever it changes under them.

use hecs::World;

use barrage_core::components::{Health, Obstacle, ObstacleBody, Tank};
use barrage_core::constants::TANK_VERTICAL_OFFSET;
use barrage_core::types::Position;
use barrage_terrain::HeightField;

/// Collect the platform rects currently in the world.
pub fn collect_platforms(world: &World) -> Vec<ObstacleBody> {
    world
        .query::<(&Obstacle, &ObstacleBody)>()
        .iter()
        .filter(|(_, (_, body))| body.platform)
        .map(|(_, (_, body))| *body)
        .collect()
}

/// Ground height at `x`: the topmost platform spanning `x` wins,
/// otherwise the interpolated terrain height.
pub fn height_at(platforms: &[ObstacleBody], terrain: &HeightField, x: f64) -> f64 {
    let mut best: Option<f64> = None;
    for body in platforms {
        if body.spans_x(x) {
            best = Some(match best {
                // Smaller y = higher surface.
                Some(y) => y.min(body.y),
                None => body.y,
            });
        }
    }
    best.unwrap_or_else(|| terrain.height_at(x))
}

/// Recompute every living tank's resting y from the current surface.
/// A tank is never left floating over a fresh crater or buried under
/// raised ground.
pub fn settle_tanks(world: &mut World, terrain: &HeightField) {
    let platforms = collect_platforms(world);
    for (_entity, (_tank, pos, health)) in world.query_mut::<(&Tank, &mut Position, &Health)>() {
        if health.is_alive() {
            pos.y = height_at(&platforms, terrain, pos.x) - TANK_VERTICAL_OFFSET;
        }
    }
}
