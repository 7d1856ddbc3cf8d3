//! Simulation engine for HORDEFALL.
//!
//! Owns the hecs ECS world, runs the combat systems once per frame, and
//! produces ArenaSnapshots for the presentation layer.

pub mod engine;
pub mod horde;
pub mod scheduler;
pub mod systems;
pub mod world_setup;

pub use engine::ArenaEngine;
pub use hordefall_core as core;

#[cfg(test)]
mod tests;
