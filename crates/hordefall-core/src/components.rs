//! ECS components for hecs entities.
//!
//! Components are plain data structs with no behavior beyond small
//! accessors. Game logic lives in systems, not components.

use serde::{Deserialize, Serialize};

use crate::enums::{BehaviorState, SpellKind};
use crate::types::Position;

// `config::ArchetypeConfig` is attached directly as a component; it needs no
// wrapper here.

/// Marks an entity as an enemy.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Enemy;

/// Hit points. `hp` is clamped to [0, max_hp]; 0 is terminal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Health {
    pub hp: i32,
    pub max_hp: i32,
}

impl Health {
    pub fn new(max_hp: i32) -> Self {
        Self { hp: max_hp, max_hp }
    }

    pub fn fraction(&self) -> f64 {
        if self.max_hp <= 0 {
            return 0.0;
        }
        self.hp as f64 / self.max_hp as f64
    }
}

/// Per-enemy behavior bookkeeping driven by the FSM and AI system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BehaviorProfile {
    pub state: BehaviorState,
    /// Elapsed-seconds timestamp at which the current state began.
    pub state_since_secs: f64,
    /// Current patrol destination while Wandering.
    pub patrol_target: Option<Position>,
    /// While Wandering, an idle pause holds the enemy in place until this
    /// elapsed-seconds timestamp.
    pub idle_until_secs: f64,
    /// Seconds remaining until the next attack may land.
    pub attack_cooldown_secs: f64,
    /// Forward lunge offset currently applied to the position, undone by a
    /// deferred action shortly after the attack.
    pub lunge_offset: Option<Position>,
}

impl BehaviorProfile {
    pub fn new(now_secs: f64) -> Self {
        Self {
            state: BehaviorState::Wandering,
            state_since_secs: now_secs,
            patrol_target: None,
            idle_until_secs: 0.0,
            attack_cooldown_secs: 0.0,
            lunge_offset: None,
        }
    }

    /// Transition to a new state, recording when it began.
    pub fn enter(&mut self, state: BehaviorState, now_secs: f64) {
        self.state = state;
        self.state_since_secs = now_secs;
    }
}

/// Knockback impulse applied on damage, decaying toward zero each frame.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PushForce {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl PushForce {
    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}

/// Boss-only: countdown to the next clone-summon batch.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BossSummoner {
    pub next_summon_secs: f64,
}

/// Visual damage-flash flag exposed to the presentation layer. Set on
/// damage, cleared by a deferred action that is cancelled on disposal.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct DamageFlash {
    pub flashing: bool,
}

/// An in-flight spell projectile.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Projectile {
    pub kind: SpellKind,
    /// Collision radius, already scaled by the cast intensity.
    pub radius: f64,
    pub damage: i32,
    pub knockback_force: f64,
    /// Seconds of flight remaining before the projectile expires.
    pub life_secs: f64,
    /// Clamped cast intensity, forwarded to the presentation layer.
    pub intensity: f64,
    /// Consumed projectiles are despawned by cleanup at frame end.
    pub spent: bool,
}
