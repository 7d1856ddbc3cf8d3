//! Cleanup system: removes dead enemies and consumed projectiles.
//!
//! Uses a pre-allocated buffer to avoid per-frame allocation. Despawning is
//! a guarded no-op for entities that are already gone.

use hecs::{Entity, World};

use hordefall_core::components::{BehaviorProfile, Enemy, Projectile};
use hordefall_core::enums::BehaviorState;

use crate::scheduler::ActionScheduler;

/// Remove entities whose frame is over: Dead enemies and spent projectiles.
pub fn run(world: &mut World, scheduler: &mut ActionScheduler, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    for (entity, (_, profile)) in world.query_mut::<(&Enemy, &BehaviorProfile)>() {
        if profile.state == BehaviorState::Dead {
            despawn_buffer.push(entity);
        }
    }

    for (entity, projectile) in world.query_mut::<&Projectile>() {
        if projectile.spent || projectile.life_secs <= 0.0 {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        scheduler.cancel_owned(entity);
        let _ = world.despawn(entity);
    }
}
