//! Horde director system — the top-level wave state machine.
//!
//! Advances the phase timer, emits countdown ticks, throttles spawns
//! against the population cap, services boss clone-summons, and accounts
//! for deaths reported by the combat pass.

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use hordefall_core::components::{BehaviorProfile, BossSummoner, Enemy, Health};
use hordefall_core::config::ArchetypeConfig;
use hordefall_core::constants::*;
use hordefall_core::enums::{BehaviorState, EnemyKind, HordePhase};
use hordefall_core::events::{EffectEvent, ParticleBurst};
use hordefall_core::types::Position;

use crate::horde::HordeState;
use crate::scheduler::{ActionKind, ActionScheduler};
use crate::systems::combat::{self, DeathRecord};
use crate::world_setup;

/// Count of live (non-Dead) enemies, clones included — the population the
/// spawn cap is enforced against.
pub fn live_count(world: &World) -> u32 {
    world
        .query::<(&Enemy, &BehaviorProfile)>()
        .iter()
        .filter(|(_, (_, profile))| profile.state != BehaviorState::Dead)
        .count() as u32
}

/// Advance the director one frame.
pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    horde: &mut HordeState,
    scheduler: &mut ActionScheduler,
    events: &mut Vec<EffectEvent>,
    now_secs: f64,
    dt: f64,
) {
    match horde.phase {
        HordePhase::Rest => {
            horde.phase_remaining_secs -= dt;
            if horde.phase_remaining_secs <= 0.0 {
                horde.begin_level();
                enter_phase(horde, HordePhase::Announce, ANNOUNCE_DURATION_SECS, events);
                events.push(EffectEvent::WaveAnnounce {
                    level: horde.level,
                    boss_level: HordeState::is_boss_level(horde.level),
                });
            }
        }
        HordePhase::Announce => {
            horde.phase_remaining_secs -= dt;
            if horde.phase_remaining_secs <= 0.0 {
                enter_phase(horde, HordePhase::Countdown, COUNTDOWN_DURATION_SECS, events);
                horde.last_countdown_tick = None;
            }
        }
        HordePhase::Countdown => {
            horde.phase_remaining_secs -= dt;
            if horde.phase_remaining_secs <= 0.0 {
                enter_phase(horde, HordePhase::Wave, 0.0, events);
            } else {
                // Emit each integer exactly once as the countdown crosses it.
                let value = horde.phase_remaining_secs.ceil() as u32;
                if value >= 1 && horde.last_countdown_tick != Some(value) {
                    horde.last_countdown_tick = Some(value);
                    events.push(EffectEvent::CountdownTick { value });
                }
            }
        }
        HordePhase::Wave => {
            throttle_spawns(world, rng, horde, scheduler, events, now_secs);
            service_boss_summons(world, rng, horde, events, now_secs, dt);
        }
        HordePhase::Victory => {
            horde.phase_remaining_secs -= dt;
            if horde.phase_remaining_secs <= 0.0 {
                horde.level += 1;
                enter_phase(horde, HordePhase::Rest, REST_DURATION_SECS, events);
            }
        }
    }
}

fn enter_phase(
    horde: &mut HordeState,
    phase: HordePhase,
    duration_secs: f64,
    events: &mut Vec<EffectEvent>,
) {
    horde.phase = phase;
    horde.phase_remaining_secs = duration_secs;
    events.push(EffectEvent::PhaseChanged { phase });
}

/// Issue at most one telegraphed spawn request per eligible frame. Requests
/// beyond the population cap are silently skipped and retried next frame.
fn throttle_spawns(
    world: &World,
    rng: &mut ChaCha8Rng,
    horde: &mut HordeState,
    scheduler: &mut ActionScheduler,
    events: &mut Vec<EffectEvent>,
    now_secs: f64,
) {
    if horde.spawned_count >= horde.total_in_wave {
        return;
    }
    if live_count(world) + horde.pending_spawns >= horde.max_active_entities {
        return;
    }

    let kind = HordeState::archetype_for_index(horde.level, horde.spawned_count);
    let position = world_setup::wave_spawn_position(rng);

    horde.spawned_count += 1;
    horde.pending_spawns += 1;
    events.push(EffectEvent::SpawnTelegraph { position, kind });
    scheduler.schedule(
        now_secs,
        SPAWN_TELEGRAPH_SECS,
        None,
        ActionKind::MaterializeSpawn { position, kind },
    );
}

/// Tick every live boss's summon countdown; on expiry, spawn a batch of
/// clones in a ring around the boss, clamped to arena bounds and the
/// population cap.
fn service_boss_summons(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    horde: &mut HordeState,
    events: &mut Vec<EffectEvent>,
    now_secs: f64,
    dt: f64,
) {
    let mut due: Vec<(hecs::Entity, Position)> = Vec::new();

    for (entity, (summoner, pos, profile)) in world
        .query_mut::<(&mut BossSummoner, &Position, &BehaviorProfile)>()
    {
        if profile.state == BehaviorState::Dead {
            continue;
        }
        summoner.next_summon_secs -= dt;
        if summoner.next_summon_secs <= 0.0 {
            summoner.next_summon_secs = BOSS_SUMMON_INTERVAL_SECS;
            due.push((entity, *pos));
        }
    }

    for (_boss, center) in due {
        let requested = rng.gen_range(SUMMON_MIN_CLONES..=SUMMON_MAX_CLONES);
        let mut spawned = 0u32;
        for position in world_setup::summon_ring_positions(center, requested) {
            if live_count(world) + horde.pending_spawns >= horde.max_active_entities {
                break;
            }
            world_setup::spawn_enemy(world, rng, position, EnemyKind::Clone, horde.level, now_secs);
            events.push(EffectEvent::EnemySpawned {
                position,
                kind: EnemyKind::Clone,
            });
            spawned += 1;
        }
        if spawned > 0 {
            events.push(EffectEvent::BossSummon {
                position: center,
                count: spawned,
                burst: ParticleBurst {
                    count: 16,
                    speed: 2.5,
                    decay: 0.8,
                },
            });
        }
    }
}

/// Account for the frame's deaths.
///
/// A boss death clears the boss handle and force-kills every live clone in
/// the same update (direct-to-zero, no knockback); clone deaths never count
/// toward wave completion. Non-clone deaths during the Wave phase advance
/// the kill counter, and wave completion triggers Victory exactly once even
/// when several kills land in one frame.
pub fn handle_deaths(
    world: &mut World,
    horde: &mut HordeState,
    scheduler: &mut ActionScheduler,
    events: &mut Vec<EffectEvent>,
    mut deaths: Vec<DeathRecord>,
    now_secs: f64,
) {
    let mut index = 0;
    while index < deaths.len() {
        let death = deaths[index];
        index += 1;

        if horde.boss == Some(death.entity) {
            horde.boss = None;

            // Cascade: the boss takes its summons with it.
            let clones: Vec<(hecs::Entity, i32)> = world
                .query::<(&Enemy, &BehaviorProfile, &Health, &ArchetypeConfig)>()
                .iter()
                .filter(|(_, (_, profile, _, config))| {
                    profile.state != BehaviorState::Dead && config.kind == EnemyKind::Clone
                })
                .map(|(entity, (_, _, health, _))| (entity, health.hp))
                .collect();
            for (clone, hp) in clones {
                combat::take_damage(
                    world, scheduler, events, &mut deaths, clone, hp, None, 0.0, now_secs,
                );
            }
        }

        if death.kind != EnemyKind::Clone && horde.phase == HordePhase::Wave {
            horde.killed_count = (horde.killed_count + 1).min(horde.total_in_wave);
            if horde.killed_count >= horde.total_in_wave {
                enter_phase(horde, HordePhase::Victory, VICTORY_DURATION_SECS, events);
            }
        }
    }
}
