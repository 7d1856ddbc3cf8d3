//! Effect events emitted by the simulation for the particle, audio, and HUD
//! layers. Fire-and-forget: the core never waits for or depends on their
//! completion.

use serde::{Deserialize, Serialize};

use crate::enums::{EnemyKind, HordePhase, SpellKind};
use crate::types::Position;

/// Lightweight particle parameter set forwarded with positional effects.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ParticleBurst {
    pub count: u32,
    pub speed: f64,
    pub decay: f64,
}

/// Events for the frontend effect systems.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EffectEvent {
    /// A spawn has been requested; the entity materializes after the
    /// telegraph delay.
    SpawnTelegraph { position: Position, kind: EnemyKind },
    /// An enemy materialized. The scene layer attaches its visual proxy on
    /// this event; `EnemyDeath` is the matching detach.
    EnemySpawned { position: Position, kind: EnemyKind },
    /// An enemy died.
    EnemyDeath {
        position: Position,
        kind: EnemyKind,
        burst: ParticleBurst,
    },
    /// A projectile struck an enemy.
    ProjectileHit {
        position: Position,
        kind: SpellKind,
        burst: ParticleBurst,
    },
    /// A projectile hit the ground (area-effect hook).
    GroundImpact { position: Position, kind: SpellKind },
    /// The boss summoned a batch of clones.
    BossSummon {
        position: Position,
        count: u32,
        burst: ParticleBurst,
    },
    /// Integer countdown tick (4, 3, 2, 1) before a wave starts. Never
    /// duplicated for the same value.
    CountdownTick { value: u32 },
    /// Wave title display trigger.
    WaveAnnounce { level: u32, boss_level: bool },
    /// The horde director changed phase.
    PhaseChanged { phase: HordePhase },
    /// An enemy attack connected with the player.
    PlayerHit { damage: i32, hp_remaining: i32 },
}
