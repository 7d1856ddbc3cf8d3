//! Enemy AI system — drives each enemy's behavior state machine.
//!
//! Calls the FSM from hordefall-enemy-ai to compute distance-driven
//! transitions, then performs the per-state work: wander planning, attack
//! cooldowns and lunges, and player damage.

use glam::DVec3;
use hecs::World;
use rand_chacha::ChaCha8Rng;

use hordefall_core::components::{BehaviorProfile, Enemy, PushForce};
use hordefall_core::config::ArchetypeConfig;
use hordefall_core::constants::{ATTACK_LUNGE_SECS, LUNGE_DISTANCE, PATROL_ARRIVE_RADIUS};
use hordefall_core::enums::BehaviorState;
use hordefall_core::events::EffectEvent;
use hordefall_core::types::Position;

use hordefall_enemy_ai::fsm::{evaluate, EnemyContext};
use hordefall_enemy_ai::wander::{next_plan, WanderPlan};

use crate::engine::PlayerState;
use crate::scheduler::{ActionKind, ActionScheduler};

/// Run the enemy AI for one frame.
#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    scheduler: &mut ActionScheduler,
    events: &mut Vec<EffectEvent>,
    player: &mut PlayerState,
    now_secs: f64,
    dt: f64,
) {
    let player_position = player.position;

    for (entity, (_, pos, profile, push, config)) in world.query_mut::<(
        &Enemy,
        &mut Position,
        &mut BehaviorProfile,
        &PushForce,
        &ArchetypeConfig,
    )>() {
        if profile.state == BehaviorState::Dead {
            continue;
        }

        let distance = pos.horizontal_range_to(&player_position);

        let update = evaluate(&EnemyContext {
            state: profile.state,
            distance_to_player: distance,
            detection_radius: config.detection_radius,
            attack_range: config.attack_range,
            push_magnitude: push.magnitude(),
        });
        if update.state_changed {
            profile.enter(update.new_state, now_secs);
            if update.new_state == BehaviorState::Wandering {
                // Re-plan from scratch after losing the player.
                profile.patrol_target = None;
                profile.idle_until_secs = 0.0;
            }
        }

        match profile.state {
            BehaviorState::Wandering => {
                if now_secs < profile.idle_until_secs {
                    continue;
                }
                let arrived = profile
                    .patrol_target
                    .map(|t| pos.horizontal_range_to(&t) < PATROL_ARRIVE_RADIUS)
                    .unwrap_or(true);
                if arrived {
                    match next_plan(rng) {
                        WanderPlan::MoveTo(target) => profile.patrol_target = Some(target),
                        WanderPlan::IdleFor(secs) => {
                            profile.patrol_target = None;
                            profile.idle_until_secs = now_secs + secs;
                        }
                    }
                }
            }
            BehaviorState::Attacking => {
                profile.attack_cooldown_secs -= dt;
                if profile.attack_cooldown_secs > 0.0 {
                    continue;
                }
                profile.attack_cooldown_secs = config.attack_cooldown_secs;

                player.take_damage(config.contact_damage);
                events.push(EffectEvent::PlayerHit {
                    damage: config.contact_damage,
                    hp_remaining: player.hp,
                });

                // Brief forward lunge, undone by a deferred action. Never
                // stacked: a second attack inside the lunge window keeps
                // the first offset.
                if profile.lunge_offset.is_none() {
                    let toward = DVec3::new(
                        player_position.x - pos.x,
                        0.0,
                        player_position.z - pos.z,
                    )
                    .normalize_or_zero();
                    if toward != DVec3::ZERO {
                        let offset =
                            Position::new(toward.x * LUNGE_DISTANCE, 0.0, toward.z * LUNGE_DISTANCE);
                        pos.x += offset.x;
                        pos.z += offset.z;
                        profile.lunge_offset = Some(offset);
                        scheduler.schedule(
                            now_secs,
                            ATTACK_LUNGE_SECS,
                            Some(entity),
                            ActionKind::EndLunge,
                        );
                    }
                }
            }
            _ => {}
        }
    }
}
