//! Cleanup system: drains the despawn buffer.
//!
//! Spent projectiles, expired explosion effects, and destroyed obstacles
//! all funnel through one buffer so systems never despawn mid-query.

use hecs::{Entity, World};

/// Despawn everything queued this tick.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
