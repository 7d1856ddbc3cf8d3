//! Deferred-action scheduler.
//!
//! Every delay in the simulation (spawn telegraph, damage-flash clear,
//! attack-lunge reset) is an entry in this list, keyed to the same
//! elapsed-seconds clock that drives the systems. Entries carry an
//! optional owner entity; disposing the owner cancels its entries, so a
//! disposed entity never executes a deferred action.

use hordefall_core::enums::EnemyKind;
use hordefall_core::types::Position;

/// What a deferred action does when it fires.
#[derive(Debug, Clone)]
pub enum ActionKind {
    /// Materialize a telegraphed wave spawn, if the director is still in a
    /// spawn-eligible phase.
    MaterializeSpawn { position: Position, kind: EnemyKind },
    /// Clear the damage-flash flag on the owner.
    ClearDamageFlash,
    /// Undo the owner's attack-lunge offset.
    EndLunge,
}

/// One scheduled action.
#[derive(Debug, Clone)]
pub struct DeferredAction {
    /// Elapsed-seconds timestamp at which the action fires.
    pub fire_at_secs: f64,
    /// Owning entity; cancellation key. Spawn telegraphs have no owner
    /// (they are cancelled wholesale on reset or wave interruption).
    pub owner: Option<hecs::Entity>,
    pub kind: ActionKind,
}

/// The scheduler: a plain list drained in insertion order each frame.
#[derive(Debug, Default)]
pub struct ActionScheduler {
    actions: Vec<DeferredAction>,
}

impl ActionScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule an action `delay_secs` from `now_secs`.
    pub fn schedule(
        &mut self,
        now_secs: f64,
        delay_secs: f64,
        owner: Option<hecs::Entity>,
        kind: ActionKind,
    ) {
        self.actions.push(DeferredAction {
            fire_at_secs: now_secs + delay_secs,
            owner,
            kind,
        });
    }

    /// Remove every action owned by `entity`. Called on disposal.
    pub fn cancel_owned(&mut self, entity: hecs::Entity) {
        self.actions.retain(|a| a.owner != Some(entity));
    }

    /// Remove every action. Called on full reset.
    pub fn clear(&mut self) {
        self.actions.clear();
    }

    /// Pull all actions due at or before `now_secs`, preserving insertion
    /// order.
    pub fn drain_due(&mut self, now_secs: f64) -> Vec<DeferredAction> {
        let mut due = Vec::new();
        let mut remaining = Vec::with_capacity(self.actions.len());
        for action in self.actions.drain(..) {
            if action.fire_at_secs <= now_secs {
                due.push(action);
            } else {
                remaining.push(action);
            }
        }
        self.actions = remaining;
        due
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}
