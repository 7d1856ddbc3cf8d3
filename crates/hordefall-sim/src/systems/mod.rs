//! Systems that operate on the simulation world each frame.
//!
//! Systems are functions over `&mut World` plus the engine-owned state they
//! need. They do not own state — all state lives in components or on the
//! engine. Frame order is fixed by `ArenaEngine::update`: all enemy
//! AI/physics completes before the projectile-collision pass.

pub mod cleanup;
pub mod combat;
pub mod enemy_ai;
pub mod horde_director;
pub mod movement;
pub mod separation;
pub mod snapshot;
