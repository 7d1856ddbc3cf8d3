//! Wander planning: patrol point selection and idle pauses.
//!
//! These helpers own the randomness of the Wandering state so the FSM
//! itself stays deterministic.

use rand::Rng;

use hordefall_core::constants::{
    ARENA_HALF_EXTENT, IDLE_PAUSE_MAX_SECS, IDLE_PAUSE_MIN_SECS, IDLE_PAUSE_PROBABILITY,
};
use hordefall_core::types::Position;

/// The wander plan for an enemy that has arrived at (or lost) its patrol
/// point.
pub enum WanderPlan {
    /// Head to a new patrol point.
    MoveTo(Position),
    /// Stand still until the given duration elapses.
    IdleFor(f64),
}

/// Roll the next wander plan: usually a fresh patrol point inside the
/// arena, occasionally an idle pause.
pub fn next_plan<R: Rng>(rng: &mut R) -> WanderPlan {
    if rng.gen_bool(IDLE_PAUSE_PROBABILITY) {
        WanderPlan::IdleFor(rng.gen_range(IDLE_PAUSE_MIN_SECS..IDLE_PAUSE_MAX_SECS))
    } else {
        WanderPlan::MoveTo(random_patrol_point(rng))
    }
}

/// Pick a uniform random point on the arena floor.
pub fn random_patrol_point<R: Rng>(rng: &mut R) -> Position {
    Position::new(
        rng.gen_range(-ARENA_HALF_EXTENT..ARENA_HALF_EXTENT),
        0.0,
        rng.gen_range(-ARENA_HALF_EXTENT..ARENA_HALF_EXTENT),
    )
}

/// Clamp a point to the arena floor bounds (used for summon rings near the
/// walls).
pub fn clamp_to_arena(position: Position) -> Position {
    Position::new(
        position.x.clamp(-ARENA_HALF_EXTENT, ARENA_HALF_EXTENT),
        position.y,
        position.z.clamp(-ARENA_HALF_EXTENT, ARENA_HALF_EXTENT),
    )
}
