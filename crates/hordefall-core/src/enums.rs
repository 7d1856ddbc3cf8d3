//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Enemy archetype category. Closed set — every recognized archetype has a
/// fixed parameter record resolved at spawn time (see `config`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Rank-and-file enemy, spawned in bulk every wave.
    #[default]
    Normal,
    /// Stronger enemy spawned in batches on even-numbered levels.
    MiniBoss,
    /// Unique high-HP enemy spawned alone every 5th level. Summons clones.
    Boss,
    /// Weak, fast minion summoned by a live boss. Does not count toward
    /// wave completion.
    Clone,
}

/// Enemy behavior state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BehaviorState {
    /// Patrolling random points, occasionally idling.
    #[default]
    Wandering,
    /// Player spotted — closing distance.
    Chasing,
    /// In range — striking on cooldown.
    Attacking,
    /// Knocked back; recovers once the push force decays.
    Stunned,
    /// Terminal. No further behavior is processed.
    Dead,
}

/// Horde progression phase (top-level wave state machine).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HordePhase {
    /// Breather between waves.
    #[default]
    Rest,
    /// Wave title displayed.
    Announce,
    /// Integer countdown ticking toward the wave start.
    Countdown,
    /// Enemies spawning and fighting.
    Wave,
    /// Wave cleared; level increments on expiry.
    Victory,
}

/// Player-castable spell kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpellKind {
    /// Direct-hit projectile with strong knockback.
    #[default]
    Fireball,
    /// Faster, lighter projectile with a chill payload.
    IceShard,
}
