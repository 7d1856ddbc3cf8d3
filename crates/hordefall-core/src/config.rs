//! Archetype and spell configuration records.
//!
//! Every recognized enemy archetype has a fixed parameter set resolved once
//! at spawn time — no ad hoc field merging. The same applies to spells.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::{EnemyKind, SpellKind};

/// Immutable per-archetype configuration, resolved at spawn time and
/// attached to the entity for its whole life.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ArchetypeConfig {
    pub kind: EnemyKind,
    /// Starting (and maximum) hit points.
    pub max_hp: i32,
    /// Movement speed while chasing (m/s).
    pub move_speed: f64,
    /// Movement speed while patrolling (m/s).
    pub patrol_speed: f64,
    /// Damage dealt to the player per attack.
    pub contact_damage: i32,
    /// Visual/collision scale multiplier.
    pub scale: f64,
    /// Horizontal distance at which the player is spotted (meters).
    pub detection_radius: f64,
    /// Horizontal distance at which attacks connect (meters).
    pub attack_range: f64,
    /// Multiplier applied to incoming knockback force. Bosses resist far
    /// more than normal enemies.
    pub knockback_resistance: f64,
    /// Seconds between attacks.
    pub attack_cooldown_secs: f64,
}

impl ArchetypeConfig {
    /// Resolve the configuration for an archetype at a given wave level.
    ///
    /// Normal enemies get an additional per-spawn speed jitter applied by
    /// the spawner; everything here is deterministic in (kind, level).
    pub fn resolve(kind: EnemyKind, level: u32) -> Self {
        let level_i = level as i32;
        match kind {
            EnemyKind::Normal => Self {
                kind,
                max_hp: NORMAL_BASE_HP + NORMAL_HP_PER_LEVEL * level_i,
                move_speed: 3.0,
                patrol_speed: 1.2,
                contact_damage: 5,
                scale: 1.0,
                detection_radius: 10.0,
                attack_range: 1.4,
                knockback_resistance: 1.0,
                attack_cooldown_secs: 1.2,
            },
            EnemyKind::MiniBoss => Self {
                kind,
                max_hp: MINI_BOSS_BASE_HP + MINI_BOSS_HP_PER_LEVEL * level_i,
                move_speed: 2.4,
                patrol_speed: 1.0,
                contact_damage: 12,
                scale: 1.5,
                detection_radius: 12.0,
                attack_range: 1.8,
                knockback_resistance: 0.5,
                attack_cooldown_secs: 1.5,
            },
            EnemyKind::Boss => Self {
                kind,
                max_hp: BOSS_BASE_HP + BOSS_HP_PER_LEVEL * level_i,
                move_speed: 1.8,
                patrol_speed: 0.9,
                contact_damage: 20,
                scale: 2.5,
                detection_radius: 14.0,
                attack_range: 2.6,
                knockback_resistance: 0.1,
                attack_cooldown_secs: 2.0,
            },
            EnemyKind::Clone => Self {
                kind,
                max_hp: CLONE_HP,
                move_speed: 4.2,
                patrol_speed: 2.0,
                contact_damage: 3,
                scale: 0.7,
                detection_radius: 16.0,
                attack_range: 1.1,
                knockback_resistance: 1.2,
                attack_cooldown_secs: 0.9,
            },
        }
    }

    /// Collision radius in world units (base radius scaled).
    pub fn collision_radius(&self) -> f64 {
        ENEMY_BASE_COLLISION_RADIUS * self.scale
    }

    /// Height of the projectile hit band above the entity base.
    pub fn height(&self) -> f64 {
        ENEMY_BASE_HEIGHT * self.scale
    }
}

/// Fixed parameters for a spell kind.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SpellSpec {
    pub speed: f64,
    pub radius: f64,
    pub damage: i32,
    pub knockback_force: f64,
    pub life_secs: f64,
}

impl SpellSpec {
    pub fn for_kind(kind: SpellKind) -> Self {
        match kind {
            SpellKind::Fireball => Self {
                speed: FIREBALL_SPEED,
                radius: FIREBALL_RADIUS,
                damage: FIREBALL_DAMAGE,
                knockback_force: FIREBALL_KNOCKBACK,
                life_secs: FIREBALL_LIFE_SECS,
            },
            SpellKind::IceShard => Self {
                speed: ICE_SHARD_SPEED,
                radius: ICE_SHARD_RADIUS,
                damage: ICE_SHARD_DAMAGE,
                knockback_force: ICE_SHARD_KNOCKBACK,
                life_secs: ICE_SHARD_LIFE_SECS,
            },
        }
    }
}
