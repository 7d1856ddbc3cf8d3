//! Entity spawn factories.
//!
//! Builds enemy and projectile entities with their full component bundles,
//! and picks spawn geometry (edge ring for waves, clone rings for boss
//! summons).

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use hordefall_core::components::{
    BehaviorProfile, BossSummoner, DamageFlash, Enemy, Health, Projectile, PushForce,
};
use hordefall_core::config::{ArchetypeConfig, SpellSpec};
use hordefall_core::constants::*;
use hordefall_core::enums::{EnemyKind, SpellKind};
use hordefall_core::types::{Position, Velocity};

use hordefall_enemy_ai::wander::clamp_to_arena;

/// Spawn a single enemy of the given archetype at `position`.
///
/// Normal enemies get a per-spawn speed jitter within a band; every other
/// archetype is deterministic in (kind, level).
pub fn spawn_enemy(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    position: Position,
    kind: EnemyKind,
    level: u32,
    now_secs: f64,
) -> hecs::Entity {
    let mut config = ArchetypeConfig::resolve(kind, level);
    if kind == EnemyKind::Normal {
        config.move_speed *= rng.gen_range(0.8..1.2);
    }

    let position = clamp_to_arena(Position::new(position.x, GROUND_Y, position.z));

    let entity = world.spawn((
        Enemy,
        position,
        Velocity::default(),
        Health::new(config.max_hp),
        BehaviorProfile::new(now_secs),
        PushForce::default(),
        DamageFlash::default(),
        config,
    ));

    if kind == EnemyKind::Boss {
        // Bosses carry the summon countdown from birth.
        let _ = world.insert_one(
            entity,
            BossSummoner {
                next_summon_secs: BOSS_SUMMON_INTERVAL_SECS,
            },
        );
    }

    entity
}

/// Spawn a projectile for a cast spell. `direction` must already be
/// normalized; `intensity` must already be clamped.
pub fn spawn_projectile(
    world: &mut World,
    origin: Position,
    direction: Velocity,
    intensity: f64,
    kind: SpellKind,
) -> hecs::Entity {
    let spec = SpellSpec::for_kind(kind);
    let velocity = Velocity::new(
        direction.x * spec.speed,
        direction.y * spec.speed,
        direction.z * spec.speed,
    );

    world.spawn((
        origin,
        velocity,
        Projectile {
            kind,
            radius: spec.radius * intensity,
            damage: spec.damage,
            knockback_force: spec.knockback_force,
            life_secs: spec.life_secs,
            intensity,
            spent: false,
        },
    ))
}

/// Pick a wave spawn position: random angle on a ring band near the arena
/// edge.
pub fn wave_spawn_position(rng: &mut ChaCha8Rng) -> Position {
    let angle: f64 = rng.gen_range(0.0..std::f64::consts::TAU);
    let radius: f64 = rng.gen_range(
        ARENA_HALF_EXTENT * SPAWN_RING_MIN_FRACTION..ARENA_HALF_EXTENT * SPAWN_RING_MAX_FRACTION,
    );
    clamp_to_arena(Position::new(
        radius * angle.cos(),
        GROUND_Y,
        radius * angle.sin(),
    ))
}

/// Positions for a clone-summon batch: an even ring around the boss,
/// clamped to arena bounds.
pub fn summon_ring_positions(center: Position, count: u32) -> Vec<Position> {
    (0..count)
        .map(|i| {
            let angle = std::f64::consts::TAU * i as f64 / count as f64;
            clamp_to_arena(Position::new(
                center.x + SUMMON_RING_RADIUS * angle.cos(),
                GROUND_Y,
                center.z + SUMMON_RING_RADIUS * angle.sin(),
            ))
        })
        .collect()
}
