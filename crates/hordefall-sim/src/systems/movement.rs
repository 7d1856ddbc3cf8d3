//! Movement integration for enemies and projectiles.
//!
//! Enemies integrate knockback first: while the residual push force is
//! strong, voluntary movement is suppressed and the force decays by a
//! friction factor each frame. Otherwise the enemy steps toward its goal
//! (patrol point or player) at its archetype speed. Enemy height stays
//! pinned to the ground. Projectiles integrate position and burn life.

use glam::DVec3;
use hecs::World;

use hordefall_core::components::{BehaviorProfile, Enemy, Projectile, PushForce};
use hordefall_core::config::ArchetypeConfig;
use hordefall_core::constants::{
    GROUND_Y, PUSH_EPSILON, PUSH_FRICTION, PUSH_SUPPRESS_THRESHOLD,
};
use hordefall_core::enums::BehaviorState;
use hordefall_core::types::{Position, Velocity};

/// Integrate all enemy movement for one frame.
pub fn run_enemies(world: &mut World, player_position: Position, now_secs: f64, dt: f64) {
    for (_entity, (_, pos, vel, profile, push, config)) in world.query_mut::<(
        &Enemy,
        &mut Position,
        &mut Velocity,
        &mut BehaviorProfile,
        &mut PushForce,
        &ArchetypeConfig,
    )>() {
        if profile.state == BehaviorState::Dead {
            *vel = Velocity::default();
            continue;
        }

        // Knockback integration and exponential-style decay.
        let push_magnitude = push.magnitude();
        if push_magnitude > PUSH_EPSILON {
            pos.x += push.x * dt;
            pos.z += push.z * dt;
            let decay = (1.0 - PUSH_FRICTION * dt).max(0.0);
            push.x *= decay;
            push.y *= decay;
            push.z *= decay;
        } else if push_magnitude > 0.0 {
            *push = PushForce::default();
        }

        // Strong push suppresses voluntary movement.
        let suppressed = push_magnitude > PUSH_SUPPRESS_THRESHOLD;

        let goal: Option<(Position, f64)> = if suppressed {
            None
        } else {
            match profile.state {
                BehaviorState::Wandering => {
                    if now_secs < profile.idle_until_secs {
                        None
                    } else {
                        profile
                            .patrol_target
                            .map(|target| (target, config.patrol_speed))
                    }
                }
                BehaviorState::Chasing => Some((player_position, config.move_speed)),
                // Attacking holds position; the lunge is a scheduled offset.
                // Stunned stands until the push decays.
                _ => None,
            }
        };

        *vel = match goal {
            Some((target, speed)) => {
                let to_target = DVec3::new(target.x - pos.x, 0.0, target.z - pos.z);
                let dir = to_target.normalize_or_zero();
                Velocity::from_vec(dir * speed)
            }
            None => Velocity::default(),
        };

        pos.x += vel.x * dt;
        pos.z += vel.z * dt;
        pos.y = GROUND_Y;
    }
}

/// Integrate projectile flight and burn remaining life.
pub fn run_projectiles(world: &mut World, dt: f64) {
    for (_entity, (pos, vel, projectile)) in
        world.query_mut::<(&mut Position, &Velocity, &mut Projectile)>()
    {
        if projectile.spent {
            continue;
        }
        pos.x += vel.x * dt;
        pos.y += vel.y * dt;
        pos.z += vel.z * dt;
        projectile.life_secs -= dt;
    }
}
