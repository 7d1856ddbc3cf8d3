//! Separation pass — local anti-clumping force between nearby enemies.
//!
//! For each live enemy, sums a repulsion vector away from every other live
//! enemy within the separation radius, normalized and weighted by the force
//! multiplier and elapsed time. Purely additive to the frame's movement:
//! it never sets state or triggers transitions.

use glam::DVec3;
use hecs::World;

use hordefall_core::components::{BehaviorProfile, Enemy};
use hordefall_core::constants::{SEPARATION_FORCE, SEPARATION_RADIUS};
use hordefall_core::enums::BehaviorState;
use hordefall_core::types::Position;

/// Apply the separation pass for this frame.
///
/// The enemy population is capped at a few dozen, so the all-pairs sweep is
/// cheap; no spatial index needed.
pub fn run(world: &mut World, dt: f64) {
    // Snapshot live enemy positions first; displacements apply afterward so
    // the pass is order-independent.
    let snapshot: Vec<(hecs::Entity, DVec3)> = world
        .query::<(&Enemy, &Position, &BehaviorProfile)>()
        .iter()
        .filter(|(_, (_, _, profile))| profile.state != BehaviorState::Dead)
        .map(|(entity, (_, pos, _))| (entity, pos.to_vec()))
        .collect();

    if snapshot.len() < 2 {
        return;
    }

    let mut displacements: Vec<DVec3> = vec![DVec3::ZERO; snapshot.len()];

    for i in 0..snapshot.len() {
        for j in 0..snapshot.len() {
            if i == j {
                continue;
            }
            let away = snapshot[i].1 - snapshot[j].1;
            let dist = away.length();
            if dist >= SEPARATION_RADIUS {
                continue;
            }
            // Coincident neighbors contribute no force (zero-length guard).
            let dir = away.normalize_or_zero();
            displacements[i] += dir * SEPARATION_FORCE * dt;
        }
    }

    for ((entity, _), displacement) in snapshot.iter().zip(displacements.iter()) {
        if displacement.length_squared() == 0.0 {
            continue;
        }
        if let Ok(mut pos) = world.get::<&mut Position>(*entity) {
            pos.x += displacement.x;
            pos.z += displacement.z;
        }
    }
}
