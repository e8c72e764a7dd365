//! Explosion visual lifecycle: grow to the cap, count down, despawn.

use hecs::{Entity, World};

use barrage_core::components::ExplosionEffect;

/// Advance all explosion effects one tick; expired ones are queued
/// for despawn.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    for (entity, effect) in world.query_mut::<&mut ExplosionEffect>() {
        effect.radius = (effect.radius + effect.growth).min(effect.max_radius);
        effect.life = effect.life.saturating_sub(1);
        if effect.life == 0 {
            despawn_buffer.push(entity);
        }
    }
}
