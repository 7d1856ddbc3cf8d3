//! Horde director state — the wave progression data model.
//!
//! Stored on `ArenaEngine`, NOT as ECS entities. Phase-transition logic
//! lives in `systems::horde_director`; this module holds the counters and
//! the pure sizing/selection rules.

use hordefall_core::constants::*;
use hordefall_core::enums::{EnemyKind, HordePhase};

/// The single, session-long wave state machine record.
#[derive(Debug, Clone)]
pub struct HordeState {
    /// Wave counter, starting at 1. Resets only on a full reset.
    pub level: u32,
    pub phase: HordePhase,
    /// Seconds remaining in the current phase (unused during Wave).
    pub phase_remaining_secs: f64,
    pub total_in_wave: u32,
    pub spawned_count: u32,
    pub killed_count: u32,
    pub pending_spawns: u32,
    /// Population cap enforced during spawning.
    pub max_active_entities: u32,
    /// Non-owning handle to the current boss, cleared on its death.
    pub boss: Option<hecs::Entity>,
    /// Last countdown integer emitted, so ticks are never duplicated.
    pub last_countdown_tick: Option<u32>,
}

impl HordeState {
    pub fn new(max_active_entities: u32) -> Self {
        Self {
            level: 1,
            phase: HordePhase::Rest,
            phase_remaining_secs: REST_DURATION_SECS,
            total_in_wave: 0,
            spawned_count: 0,
            killed_count: 0,
            pending_spawns: 0,
            max_active_entities,
            boss: None,
            last_countdown_tick: None,
        }
    }

    /// Whether the given level spawns a lone boss.
    pub fn is_boss_level(level: u32) -> bool {
        level % BOSS_LEVEL_INTERVAL == 0
    }

    /// How many enemies the given level spawns.
    pub fn wave_size(level: u32) -> u32 {
        if Self::is_boss_level(level) {
            1
        } else {
            WAVE_BASE_SIZE + WAVE_SIZE_PER_LEVEL * level
        }
    }

    /// Archetype for the `index`-th spawn of the given level.
    ///
    /// Boss levels spawn the boss; even levels front-load `level / 2`
    /// mini-bosses; odd levels are all normals.
    pub fn archetype_for_index(level: u32, index: u32) -> EnemyKind {
        if Self::is_boss_level(level) {
            EnemyKind::Boss
        } else if level % 2 == 0 && index < level / 2 {
            EnemyKind::MiniBoss
        } else {
            EnemyKind::Normal
        }
    }

    /// Prepare counters for the upcoming wave at the current level.
    pub fn begin_level(&mut self) {
        self.total_in_wave = Self::wave_size(self.level);
        self.spawned_count = 0;
        self.killed_count = 0;
        self.pending_spawns = 0;
        self.boss = None;
    }

    /// Whether the director may currently issue or materialize spawns.
    pub fn spawn_eligible(&self) -> bool {
        self.phase == HordePhase::Wave
    }

    /// Wave progress for the HUD: boss health fraction while a boss is
    /// alive, otherwise the fraction of the wave still standing. Outside a
    /// wave (no enemies budgeted) this is 1.0.
    pub fn progress(&self, boss_hp_fraction: Option<f64>) -> f64 {
        if let Some(fraction) = boss_hp_fraction {
            return fraction;
        }
        if self.total_in_wave == 0 {
            return 1.0;
        }
        (self.total_in_wave - self.killed_count.min(self.total_in_wave)) as f64
            / self.total_in_wave as f64
    }

    /// Reset to the exact initial state, keeping the configured cap.
    pub fn reset(&mut self) {
        let max_active = self.max_active_entities;
        *self = Self::new(max_active);
    }
}
