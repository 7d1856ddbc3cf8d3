//! Snapshot system: queries the world and builds a complete ArenaSnapshot.
//!
//! Read-only — it never modifies the world.

use hecs::World;

use hordefall_core::components::{
    BehaviorProfile, DamageFlash, Enemy, Health, Projectile,
};
use hordefall_core::config::ArchetypeConfig;
use hordefall_core::events::EffectEvent;
use hordefall_core::state::{ArenaSnapshot, EnemyView, PlayerView, ProjectileView, WaveView};
use hordefall_core::types::{Position, SimTime, Velocity};

use crate::engine::PlayerState;
use crate::horde::HordeState;

/// Build the frame's snapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    horde: &HordeState,
    player: &PlayerState,
    events: Vec<EffectEvent>,
) -> ArenaSnapshot {
    let enemies = build_enemies(world);
    let boss_fraction = boss_hp_fraction(world, horde);

    ArenaSnapshot {
        time: *time,
        phase: horde.phase,
        level: horde.level,
        progress: horde.progress(boss_fraction),
        projectiles: build_projectiles(world),
        player: PlayerView {
            position: player.position,
            hp: player.hp,
            max_hp: player.max_hp,
        },
        wave: WaveView {
            total_in_wave: horde.total_in_wave,
            spawned_count: horde.spawned_count,
            killed_count: horde.killed_count,
            pending_spawns: horde.pending_spawns,
            live_count: enemies.len() as u32,
            boss_alive: boss_fraction.is_some(),
        },
        enemies,
        events,
    }
}

/// Boss health fraction, if the boss handle is live. A stale handle (boss
/// already despawned) reads as no boss.
fn boss_hp_fraction(world: &World, horde: &HordeState) -> Option<f64> {
    let boss = horde.boss?;
    let health = world.get::<&Health>(boss).ok()?;
    Some(health.fraction())
}

fn build_enemies(world: &World) -> Vec<EnemyView> {
    world
        .query::<(
            &Enemy,
            &Position,
            &Velocity,
            &Health,
            &BehaviorProfile,
            &ArchetypeConfig,
            &DamageFlash,
        )>()
        .iter()
        .map(
            |(_, (_, pos, vel, health, profile, config, flash))| EnemyView {
                position: *pos,
                velocity: *vel,
                kind: config.kind,
                state: profile.state,
                hp: health.hp,
                max_hp: health.max_hp,
                scale: config.scale,
                flashing: flash.flashing,
            },
        )
        .collect()
}

fn build_projectiles(world: &World) -> Vec<ProjectileView> {
    world
        .query::<(&Position, &Projectile)>()
        .iter()
        .filter(|(_, (_, projectile))| !projectile.spent)
        .map(|(_, (pos, projectile))| ProjectileView {
            position: *pos,
            kind: projectile.kind,
            radius: projectile.radius,
            intensity: projectile.intensity,
        })
        .collect()
}
