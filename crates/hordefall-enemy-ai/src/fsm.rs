//! Enemy behavior finite state machine.
//!
//! Pure functions that compute state transitions for enemy entities based
//! on their situation. Damage-driven transitions (entering Stunned on
//! knockback, entering Dead at zero hp) happen in the combat path, not
//! here; this machine handles everything distance- and decay-driven.

use hordefall_core::constants::{ATTACK_RELEASE_FACTOR, CHASE_GIVE_UP_FACTOR, STUN_EXIT_THRESHOLD};
use hordefall_core::enums::BehaviorState;

/// Input to the behavior FSM for a single enemy.
pub struct EnemyContext {
    pub state: BehaviorState,
    /// Horizontal distance from the enemy to the player (meters).
    pub distance_to_player: f64,
    /// Archetype detection radius (meters).
    pub detection_radius: f64,
    /// Archetype attack range (meters).
    pub attack_range: f64,
    /// Current residual knockback magnitude.
    pub push_magnitude: f64,
}

/// Output from the behavior FSM.
pub struct EnemyUpdate {
    pub new_state: BehaviorState,
    pub state_changed: bool,
}

/// Evaluate the FSM for one enemy.
pub fn evaluate(ctx: &EnemyContext) -> EnemyUpdate {
    let hold = EnemyUpdate {
        new_state: ctx.state,
        state_changed: false,
    };
    let transition = |state| EnemyUpdate {
        new_state: state,
        state_changed: true,
    };

    match ctx.state {
        // Terminal — no further behavior.
        BehaviorState::Dead => hold,

        BehaviorState::Wandering => {
            if ctx.distance_to_player < ctx.detection_radius {
                transition(BehaviorState::Chasing)
            } else {
                hold
            }
        }

        BehaviorState::Chasing => {
            if ctx.distance_to_player <= ctx.attack_range {
                transition(BehaviorState::Attacking)
            } else if ctx.distance_to_player > ctx.detection_radius * CHASE_GIVE_UP_FACTOR {
                // Player lost.
                transition(BehaviorState::Wandering)
            } else {
                hold
            }
        }

        BehaviorState::Attacking => {
            if ctx.distance_to_player > ctx.attack_range * ATTACK_RELEASE_FACTOR {
                transition(BehaviorState::Chasing)
            } else {
                hold
            }
        }

        BehaviorState::Stunned => {
            if ctx.push_magnitude < STUN_EXIT_THRESHOLD {
                // Knockback has decayed; the enemy comes up angry.
                transition(BehaviorState::Chasing)
            } else {
                hold
            }
        }
    }
}
