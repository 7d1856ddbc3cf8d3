//! Combat resolution — damage application, knockback, and the
//! projectile-vs-entity / barrier / ground collision pass.
//!
//! Runs after all enemy AI and movement for the frame, so a projectile can
//! kill an enemy the same frame it moved, but each projectile resolves
//! against at most one enemy, first match in iteration order.

use glam::DVec3;
use hecs::World;

use hordefall_core::components::{
    BehaviorProfile, DamageFlash, Enemy, Health, Projectile, PushForce,
};
use hordefall_core::config::ArchetypeConfig;
use hordefall_core::constants::{DAMAGE_FLASH_SECS, GROUND_Y};
use hordefall_core::enums::{BehaviorState, EnemyKind};
use hordefall_core::events::{EffectEvent, ParticleBurst};
use hordefall_core::types::{Barrier, Position};

use crate::scheduler::{ActionKind, ActionScheduler};

/// A death produced this frame, reported upward to the horde director.
#[derive(Debug, Clone, Copy)]
pub struct DeathRecord {
    pub entity: hecs::Entity,
    pub kind: EnemyKind,
    pub position: Position,
}

/// Apply damage (and optional knockback) to an enemy.
///
/// Clamps hp to [0, max_hp]. Damage always alerts: a Wandering enemy is
/// forced into Chasing. A supplied knockback direction is horizontally
/// projected, scaled by the archetype's knockback resistance, and added to
/// the push force, stunning the enemy. Reaching 0 hp transitions to Dead in
/// the same call, cancels the entity's deferred actions, and records the
/// death for the director. Re-entry on an already-dead enemy is a no-op.
#[allow(clippy::too_many_arguments)]
pub fn take_damage(
    world: &mut World,
    scheduler: &mut ActionScheduler,
    events: &mut Vec<EffectEvent>,
    deaths: &mut Vec<DeathRecord>,
    entity: hecs::Entity,
    amount: i32,
    knockback_dir: Option<DVec3>,
    knockback_force: f64,
    now_secs: f64,
) {
    let Ok(config) = world.get::<&ArchetypeConfig>(entity).map(|c| *c) else {
        // Stale handle — the enemy is already gone.
        return;
    };

    {
        let Ok(profile) = world.get::<&BehaviorProfile>(entity) else {
            return;
        };
        if profile.state == BehaviorState::Dead {
            return;
        }
    }

    let died = {
        let Ok(mut health) = world.get::<&mut Health>(entity) else {
            return;
        };
        health.hp = (health.hp - amount).clamp(0, health.max_hp);
        health.hp == 0
    };

    if let Ok(mut flash) = world.get::<&mut DamageFlash>(entity) {
        flash.flashing = true;
    }
    scheduler.schedule(
        now_secs,
        DAMAGE_FLASH_SECS,
        Some(entity),
        ActionKind::ClearDamageFlash,
    );

    let position = world
        .get::<&Position>(entity)
        .map(|p| *p)
        .unwrap_or_default();

    if died {
        if let Ok(mut profile) = world.get::<&mut BehaviorProfile>(entity) {
            profile.enter(BehaviorState::Dead, now_secs);
        }
        // A disposed enemy must never execute a deferred action.
        scheduler.cancel_owned(entity);
        events.push(EffectEvent::EnemyDeath {
            position,
            kind: config.kind,
            burst: ParticleBurst {
                count: 24,
                speed: 3.0,
                decay: 0.9,
            },
        });
        deaths.push(DeathRecord {
            entity,
            kind: config.kind,
            position,
        });
        return;
    }

    if let Ok(mut profile) = world.get::<&mut BehaviorProfile>(entity) {
        if profile.state == BehaviorState::Wandering {
            // Damage always alerts.
            profile.enter(BehaviorState::Chasing, now_secs);
        }
    }

    if let Some(dir) = knockback_dir {
        // Horizontal projection; zero-length directions apply no force.
        let horizontal = DVec3::new(dir.x, 0.0, dir.z).normalize_or_zero();
        if horizontal != DVec3::ZERO {
            let impulse = horizontal * knockback_force * config.knockback_resistance;
            if let Ok(mut push) = world.get::<&mut PushForce>(entity) {
                push.x += impulse.x;
                push.z += impulse.z;
            }
            if let Ok(mut profile) = world.get::<&mut BehaviorProfile>(entity) {
                profile.enter(BehaviorState::Stunned, now_secs);
            }
        }
    }
}

/// First live enemy the projectile sphere overlaps, with the resolved
/// knockback direction (projectile toward enemy). Skips Dead enemies. The
/// hit requires both the horizontal overlap and the projectile height to
/// lie within the enemy's scaled height band.
pub fn check_hit(
    world: &World,
    projectile_position: &Position,
    projectile_radius: f64,
) -> Option<(hecs::Entity, DVec3)> {
    for (entity, (_, pos, profile, config)) in world
        .query::<(&Enemy, &Position, &BehaviorProfile, &ArchetypeConfig)>()
        .iter()
    {
        if profile.state == BehaviorState::Dead {
            continue;
        }
        let horizontal = projectile_position.horizontal_range_to(pos);
        if horizontal >= config.collision_radius() + projectile_radius {
            continue;
        }
        let height_offset = projectile_position.y - pos.y;
        if height_offset < 0.0 || height_offset > config.height() {
            continue;
        }
        // Knockback pushes from the projectile toward the enemy; coincident
        // centers resolve to no force rather than NaN.
        let dir = DVec3::new(
            pos.x - projectile_position.x,
            0.0,
            pos.z - projectile_position.z,
        )
        .normalize_or_zero();
        return Some((entity, dir));
    }
    None
}

/// Resolve every in-flight projectile against expiry, the ground, the
/// barrier list, and the live enemies — in that order per projectile.
pub fn run(
    world: &mut World,
    scheduler: &mut ActionScheduler,
    events: &mut Vec<EffectEvent>,
    deaths: &mut Vec<DeathRecord>,
    barriers: &[Barrier],
    now_secs: f64,
) {
    let projectiles: Vec<hecs::Entity> = world
        .query::<&Projectile>()
        .iter()
        .filter(|(_, p)| !p.spent)
        .map(|(entity, _)| entity)
        .collect();

    for entity in projectiles {
        resolve_projectile(world, scheduler, events, deaths, barriers, entity, now_secs);
    }
}

/// Resolve a single projectile. Returns the struck enemy, if any. The
/// projectile is consumed on any collision or on expiry; at most one enemy
/// is struck.
pub fn resolve_projectile(
    world: &mut World,
    scheduler: &mut ActionScheduler,
    events: &mut Vec<EffectEvent>,
    deaths: &mut Vec<DeathRecord>,
    barriers: &[Barrier],
    entity: hecs::Entity,
    now_secs: f64,
) -> Option<hecs::Entity> {
    let (position, projectile) = {
        let Ok(pos) = world.get::<&Position>(entity).map(|p| *p) else {
            return None;
        };
        let Ok(projectile) = world.get::<&Projectile>(entity).map(|p| *p) else {
            return None;
        };
        (pos, projectile)
    };
    if projectile.spent {
        return None;
    }

    // Life expiry consumes silently.
    if projectile.life_secs <= 0.0 {
        mark_spent(world, entity);
        return None;
    }

    // Ground impact: area-effect hook for the presentation layer.
    if position.y <= GROUND_Y {
        mark_spent(world, entity);
        events.push(EffectEvent::GroundImpact {
            position,
            kind: projectile.kind,
        });
        return None;
    }

    // Barriers absorb projectiles without taking damage. A missing barrier
    // list simply skips the check.
    if barriers
        .iter()
        .any(|b| b.intersects_sphere(&position, projectile.radius))
    {
        mark_spent(world, entity);
        return None;
    }

    let (struck, dir) = match check_hit(world, &position, projectile.radius) {
        Some(hit) => hit,
        None => return None,
    };

    mark_spent(world, entity);
    take_damage(
        world,
        scheduler,
        events,
        deaths,
        struck,
        projectile.damage,
        Some(dir),
        projectile.knockback_force,
        now_secs,
    );
    events.push(EffectEvent::ProjectileHit {
        position,
        kind: projectile.kind,
        burst: ParticleBurst {
            count: 12,
            speed: 4.0,
            decay: 0.85,
        },
    });
    Some(struck)
}

fn mark_spent(world: &mut World, entity: hecs::Entity) {
    if let Ok(mut projectile) = world.get::<&mut Projectile>(entity) {
        projectile.spent = true;
    }
}
