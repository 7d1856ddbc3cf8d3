//! Arena snapshot — the complete visible state produced each frame.
//!
//! The presentation layer reads these; it never touches the live world.

use serde::{Deserialize, Serialize};

use crate::enums::{BehaviorState, EnemyKind, HordePhase, SpellKind};
use crate::events::EffectEvent;
use crate::types::{Position, SimTime, Velocity};

/// Complete simulation state emitted after each update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArenaSnapshot {
    pub time: SimTime,
    pub phase: HordePhase,
    pub level: u32,
    /// Boss health fraction while a boss is alive, otherwise the fraction
    /// of the wave still standing.
    pub progress: f64,
    pub enemies: Vec<EnemyView>,
    pub projectiles: Vec<ProjectileView>,
    pub player: PlayerView,
    pub wave: WaveView,
    pub events: Vec<EffectEvent>,
}

/// One live enemy as seen by the presentation layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyView {
    pub position: Position,
    pub velocity: Velocity,
    pub kind: EnemyKind,
    pub state: BehaviorState,
    pub hp: i32,
    pub max_hp: i32,
    pub scale: f64,
    pub flashing: bool,
}

/// One in-flight projectile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub position: Position,
    pub kind: SpellKind,
    pub radius: f64,
    pub intensity: f64,
}

/// Player status mirror.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerView {
    pub position: Position,
    pub hp: i32,
    pub max_hp: i32,
}

/// Wave accounting for HUD progress bars.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WaveView {
    pub total_in_wave: u32,
    pub spawned_count: u32,
    pub killed_count: u32,
    pub pending_spawns: u32,
    pub live_count: u32,
    pub boss_alive: bool,
}
