//! Tests for the arena engine: horde progression, spawning, combat
//! resolution, knockback, and reset semantics.

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use hordefall_core::commands::ArenaCommand;
use hordefall_core::components::{BehaviorProfile, DamageFlash, Health, Projectile, PushForce};
use hordefall_core::config::ArchetypeConfig;
use hordefall_core::constants::*;
use hordefall_core::enums::*;
use hordefall_core::events::EffectEvent;
use hordefall_core::state::ArenaSnapshot;
use hordefall_core::types::{Barrier, Position, Velocity};

use crate::engine::{ArenaConfig, ArenaEngine};
use crate::horde::HordeState;
use crate::scheduler::{ActionKind, ActionScheduler};
use crate::systems::combat::{self, DeathRecord};
use crate::systems::horde_director;
use crate::systems::{movement, separation};
use crate::world_setup;

const DT: f64 = 0.1;

fn run_frames(engine: &mut ArenaEngine, frames: u32) -> ArenaSnapshot {
    let mut snapshot = ArenaSnapshot::default();
    for _ in 0..frames {
        snapshot = engine.update(DT);
    }
    snapshot
}

/// Advance until the engine reaches `phase`, collecting events along the
/// way. Panics if the phase is not reached within `max_frames`.
fn run_until_phase(
    engine: &mut ArenaEngine,
    phase: HordePhase,
    max_frames: u32,
) -> Vec<EffectEvent> {
    let mut events = Vec::new();
    for _ in 0..max_frames {
        let snapshot = engine.update(DT);
        events.extend(snapshot.events.iter().cloned());
        if snapshot.phase == phase {
            return events;
        }
    }
    panic!("engine did not reach {phase:?} within {max_frames} frames");
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let mut engine_a = ArenaEngine::new(ArenaConfig {
        seed: 12345,
        ..Default::default()
    });
    let mut engine_b = ArenaEngine::new(ArenaConfig {
        seed: 12345,
        ..Default::default()
    });

    for _ in 0..400 {
        let snap_a = engine_a.update(DT);
        let snap_b = engine_b.update(DT);

        let json_a = serde_json::to_string(&snap_a).unwrap();
        let json_b = serde_json::to_string(&snap_b).unwrap();
        assert_eq!(json_a, json_b, "snapshots diverged with same seed");
    }
}

#[test]
fn test_determinism_different_seeds() {
    let mut engine_a = ArenaEngine::new(ArenaConfig {
        seed: 111,
        ..Default::default()
    });
    let mut engine_b = ArenaEngine::new(ArenaConfig {
        seed: 222,
        ..Default::default()
    });

    // Identical until the first wave spawns roll random positions, then
    // divergent.
    let mut diverged = false;
    for _ in 0..400 {
        let snap_a = engine_a.update(DT);
        let snap_b = engine_b.update(DT);
        let json_a = serde_json::to_string(&snap_a).unwrap();
        let json_b = serde_json::to_string(&snap_b).unwrap();
        if json_a != json_b {
            diverged = true;
            break;
        }
    }
    assert!(diverged, "different seeds should produce divergent output");
}

// ---- Horde phase machine ----

#[test]
fn test_initial_state() {
    let mut engine = ArenaEngine::new(ArenaConfig::default());
    let snapshot = engine.update(DT);

    assert_eq!(snapshot.phase, HordePhase::Rest);
    assert_eq!(snapshot.level, 1);
    assert!(snapshot.enemies.is_empty());
    assert!(snapshot.projectiles.is_empty());
    assert!((snapshot.progress - 1.0).abs() < 1e-12);
    assert_eq!(snapshot.player.hp, PLAYER_MAX_HP);
}

#[test]
fn test_phase_cycle_reaches_wave() {
    let mut engine = ArenaEngine::new(ArenaConfig::default());

    let events = run_until_phase(&mut engine, HordePhase::Wave, 200);

    // The cycle passed through Announce and Countdown.
    assert!(events.iter().any(|e| matches!(
        e,
        EffectEvent::PhaseChanged {
            phase: HordePhase::Announce
        }
    )));
    assert!(events.iter().any(|e| matches!(
        e,
        EffectEvent::PhaseChanged {
            phase: HordePhase::Countdown
        }
    )));
    assert!(events.iter().any(|e| matches!(
        e,
        EffectEvent::WaveAnnounce {
            level: 1,
            boss_level: false
        }
    )));
}

#[test]
fn test_countdown_ticks_emitted_once_each() {
    let mut engine = ArenaEngine::new(ArenaConfig::default());

    let events = run_until_phase(&mut engine, HordePhase::Wave, 200);

    let ticks: Vec<u32> = events
        .iter()
        .filter_map(|e| match e {
            EffectEvent::CountdownTick { value } => Some(*value),
            _ => None,
        })
        .collect();

    assert_eq!(ticks, vec![4, 3, 2, 1], "each integer exactly once, in order");
}

#[test]
fn test_wave_sizing_level_one() {
    let mut engine = ArenaEngine::new(ArenaConfig::default());
    run_until_phase(&mut engine, HordePhase::Wave, 200);

    // Level 1: 5 + 2*1 = 7.
    assert_eq!(engine.horde().total_in_wave, 7);
}

#[test]
fn test_wave_sizing_boss_level() {
    let mut engine = ArenaEngine::new(ArenaConfig::default());
    engine.horde_mut().level = 5;
    run_until_phase(&mut engine, HordePhase::Wave, 200);

    assert_eq!(engine.horde().total_in_wave, 1);

    // Let the telegraphed boss materialize.
    run_frames(&mut engine, 20);
    let boss = engine.horde().boss.expect("boss handle should be set");
    let health = engine.world().get::<&Health>(boss).unwrap();
    assert_eq!(health.max_hp, 650, "boss hp at level 5 = 400 + 50*5");
}

#[test]
fn test_even_level_front_loads_mini_bosses() {
    let mut engine = ArenaEngine::new(ArenaConfig::default());
    engine.horde_mut().level = 4;
    run_until_phase(&mut engine, HordePhase::Wave, 200);

    // Level 4: 5 + 2*4 = 13 total, first floor(4/2) = 2 are mini-bosses.
    assert_eq!(engine.horde().total_in_wave, 13);

    // Run long enough for several spawns to materialize.
    run_frames(&mut engine, 40);
    let mini_bosses: Vec<i32> = {
        let world = engine.world();
        let mut q = world.query::<(&ArchetypeConfig, &Health)>();
        q.iter()
            .filter(|(_, (config, _))| config.kind == EnemyKind::MiniBoss)
            .map(|(_, (_, health))| health.max_hp)
            .collect()
    };
    assert_eq!(mini_bosses.len(), 2);
    assert!(
        mini_bosses.iter().all(|&hp| hp == 180),
        "mini-boss hp at level 4 = 120 + 15*4"
    );
}

#[test]
fn test_spawn_counters_respect_limits() {
    let mut engine = ArenaEngine::new(ArenaConfig {
        max_active_entities: 4,
        ..Default::default()
    });
    run_until_phase(&mut engine, HordePhase::Wave, 200);

    for _ in 0..300 {
        let snapshot = engine.update(DT);
        let horde = engine.horde();
        assert!(horde.spawned_count <= horde.total_in_wave);
        assert!(
            snapshot.wave.live_count + horde.pending_spawns <= 4,
            "live + pending must never exceed the cap"
        );
    }
}

#[test]
fn test_victory_increments_level() {
    let mut engine = ArenaEngine::new(ArenaConfig::default());
    run_until_phase(&mut engine, HordePhase::Wave, 200);
    run_frames(&mut engine, 20);

    // Kill every live enemy and every one that still materializes.
    for _ in 0..200 {
        for entity in engine.active_enemies() {
            engine.damage_enemy(entity, 10_000);
        }
        let snapshot = engine.update(DT);
        if snapshot.phase == HordePhase::Victory {
            break;
        }
    }
    assert_eq!(engine.current_phase(), HordePhase::Victory);

    run_until_phase(&mut engine, HordePhase::Rest, 100);
    assert_eq!(engine.current_level(), 2, "level increments after Victory");
}

// ---- Damage, knockback, death ----

fn test_world_with_enemy(kind: EnemyKind, level: u32) -> (World, hecs::Entity) {
    let mut world = World::new();
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let entity = world_setup::spawn_enemy(
        &mut world,
        &mut rng,
        Position::new(0.0, 0.0, 0.0),
        kind,
        level,
        0.0,
    );
    (world, entity)
}

#[test]
fn test_overkill_damage_clamps_to_zero_and_dies() {
    let (mut world, entity) = test_world_with_enemy(EnemyKind::Normal, 1);
    {
        let mut health = world.get::<&mut Health>(entity).unwrap();
        health.hp = 10;
    }

    let mut scheduler = ActionScheduler::new();
    let mut events = Vec::new();
    let mut deaths: Vec<DeathRecord> = Vec::new();

    combat::take_damage(
        &mut world,
        &mut scheduler,
        &mut events,
        &mut deaths,
        entity,
        25,
        Some(glam::DVec3::X),
        2.0,
        0.0,
    );

    let health = world.get::<&Health>(entity).unwrap();
    assert_eq!(health.hp, 0, "hp clamps to zero, never negative");
    let profile = world.get::<&BehaviorProfile>(entity).unwrap();
    assert_eq!(profile.state, BehaviorState::Dead);
    assert_eq!(deaths.len(), 1, "exactly one death notification");
    assert!(
        scheduler.is_empty(),
        "death cancels the entity's deferred actions"
    );
}

#[test]
fn test_second_kill_is_a_no_op() {
    let (mut world, entity) = test_world_with_enemy(EnemyKind::Normal, 1);

    let mut scheduler = ActionScheduler::new();
    let mut events = Vec::new();
    let mut deaths: Vec<DeathRecord> = Vec::new();

    combat::take_damage(
        &mut world, &mut scheduler, &mut events, &mut deaths, entity, 10_000, None, 0.0, 0.0,
    );
    combat::take_damage(
        &mut world, &mut scheduler, &mut events, &mut deaths, entity, 10_000, None, 0.0, 0.0,
    );

    assert_eq!(deaths.len(), 1, "a dead enemy takes no further damage");
}

#[test]
fn test_damage_alerts_wandering_enemy() {
    let (mut world, entity) = test_world_with_enemy(EnemyKind::Normal, 1);

    let mut scheduler = ActionScheduler::new();
    let mut events = Vec::new();
    let mut deaths = Vec::new();

    combat::take_damage(
        &mut world, &mut scheduler, &mut events, &mut deaths, entity, 1, None, 0.0, 0.0,
    );

    let profile = world.get::<&BehaviorProfile>(entity).unwrap();
    assert_eq!(
        profile.state,
        BehaviorState::Chasing,
        "damage without knockback still alerts"
    );
}

#[test]
fn test_knockback_stuns_and_projects_horizontally() {
    let (mut world, entity) = test_world_with_enemy(EnemyKind::Normal, 1);

    let mut scheduler = ActionScheduler::new();
    let mut events = Vec::new();
    let mut deaths = Vec::new();

    // Direction with a vertical component; the push must stay on the plane.
    combat::take_damage(
        &mut world,
        &mut scheduler,
        &mut events,
        &mut deaths,
        entity,
        1,
        Some(glam::DVec3::new(1.0, 5.0, 0.0)),
        2.0,
        0.0,
    );

    let profile = world.get::<&BehaviorProfile>(entity).unwrap();
    assert_eq!(profile.state, BehaviorState::Stunned);
    let push = world.get::<&PushForce>(entity).unwrap();
    assert_eq!(push.y, 0.0, "vertical component zeroed");
    assert!(push.x > 0.0);
    assert!((push.magnitude() - 2.0).abs() < 1e-9, "normal resistance is 1.0");
}

#[test]
fn test_zero_length_knockback_applies_no_force() {
    let (mut world, entity) = test_world_with_enemy(EnemyKind::Normal, 1);

    let mut scheduler = ActionScheduler::new();
    let mut events = Vec::new();
    let mut deaths = Vec::new();

    combat::take_damage(
        &mut world,
        &mut scheduler,
        &mut events,
        &mut deaths,
        entity,
        1,
        Some(glam::DVec3::ZERO),
        2.0,
        0.0,
    );

    let push = world.get::<&PushForce>(entity).unwrap();
    assert_eq!(push.magnitude(), 0.0, "degenerate direction means no force");
    let profile = world.get::<&BehaviorProfile>(entity).unwrap();
    assert_ne!(profile.state, BehaviorState::Stunned);
}

#[test]
fn test_boss_resists_knockback() {
    let (mut world, entity) = test_world_with_enemy(EnemyKind::Boss, 5);

    let mut scheduler = ActionScheduler::new();
    let mut events = Vec::new();
    let mut deaths = Vec::new();

    combat::take_damage(
        &mut world,
        &mut scheduler,
        &mut events,
        &mut deaths,
        entity,
        1,
        Some(glam::DVec3::X),
        2.0,
        0.0,
    );

    let push = world.get::<&PushForce>(entity).unwrap();
    assert!(
        (push.magnitude() - 0.2).abs() < 1e-9,
        "boss resistance scales 2.0 down to 0.2"
    );
}

#[test]
fn test_push_force_decays_monotonically() {
    let (mut world, entity) = test_world_with_enemy(EnemyKind::Normal, 1);

    let mut scheduler = ActionScheduler::new();
    let mut events = Vec::new();
    let mut deaths = Vec::new();

    combat::take_damage(
        &mut world,
        &mut scheduler,
        &mut events,
        &mut deaths,
        entity,
        1,
        Some(glam::DVec3::X),
        4.0,
        0.0,
    );

    let mut last = world.get::<&PushForce>(entity).unwrap().magnitude();
    assert!(last > 0.0);

    for frame in 1..60 {
        movement::run_enemies(
            &mut world,
            Position::new(100.0, 0.0, 100.0),
            frame as f64 * DT,
            DT,
        );
        let magnitude = world.get::<&PushForce>(entity).unwrap().magnitude();
        assert!(
            magnitude <= last,
            "push magnitude must never increase without new damage"
        );
        last = magnitude;
    }
    assert!(last < 1e-6, "push decays to zero");
}

// ---- Projectile collision ----

#[test]
fn test_projectile_strikes_once_and_is_consumed() {
    let (mut world, enemy) = test_world_with_enemy(EnemyKind::MiniBoss, 1);

    // Overlapping the enemy within its height band.
    let projectile = world_setup::spawn_projectile(
        &mut world,
        Position::new(0.5, 1.0, 0.0),
        Velocity::new(1.0, 0.0, 0.0),
        1.0,
        SpellKind::Fireball,
    );

    let mut scheduler = ActionScheduler::new();
    let mut events = Vec::new();
    let mut deaths = Vec::new();

    combat::run(
        &mut world, &mut scheduler, &mut events, &mut deaths, &[], 0.0,
    );

    assert!(world.get::<&Projectile>(projectile).unwrap().spent);
    let health = world.get::<&Health>(enemy).unwrap();
    assert_eq!(health.hp, health.max_hp - 25);
    drop(health);
    assert!(events
        .iter()
        .any(|e| matches!(e, EffectEvent::ProjectileHit { .. })));

    // A consumed projectile cannot strike again.
    combat::run(
        &mut world, &mut scheduler, &mut events, &mut deaths, &[], 0.0,
    );
    let health = world.get::<&Health>(enemy).unwrap();
    assert_eq!(health.hp, health.max_hp - 25, "no double hit");
}

#[test]
fn test_projectile_hits_first_match_only() {
    let mut world = World::new();
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let first = world_setup::spawn_enemy(
        &mut world,
        &mut rng,
        Position::new(0.0, 0.0, 0.0),
        EnemyKind::MiniBoss,
        1,
        0.0,
    );
    let second = world_setup::spawn_enemy(
        &mut world,
        &mut rng,
        Position::new(0.3, 0.0, 0.0),
        EnemyKind::MiniBoss,
        1,
        0.0,
    );

    world_setup::spawn_projectile(
        &mut world,
        Position::new(0.2, 1.0, 0.0),
        Velocity::new(1.0, 0.0, 0.0),
        1.0,
        SpellKind::Fireball,
    );

    let mut scheduler = ActionScheduler::new();
    let mut events = Vec::new();
    let mut deaths = Vec::new();

    combat::run(
        &mut world, &mut scheduler, &mut events, &mut deaths, &[], 0.0,
    );

    let hp_first = world.get::<&Health>(first).unwrap().hp;
    let hp_second = world.get::<&Health>(second).unwrap().hp;
    let damaged = [hp_first, hp_second]
        .iter()
        .filter(|&&hp| hp < 135)
        .count();
    assert_eq!(damaged, 1, "exactly one enemy struck per projectile");
}

#[test]
fn test_projectile_above_height_band_misses() {
    let (mut world, enemy) = test_world_with_enemy(EnemyKind::Normal, 1);

    // Normal height band is 1.8m; a bolt at 5m sails over.
    world_setup::spawn_projectile(
        &mut world,
        Position::new(0.0, 5.0, 0.0),
        Velocity::new(1.0, 0.0, 0.0),
        1.0,
        SpellKind::Fireball,
    );

    let mut scheduler = ActionScheduler::new();
    let mut events = Vec::new();
    let mut deaths = Vec::new();

    combat::run(
        &mut world, &mut scheduler, &mut events, &mut deaths, &[], 0.0,
    );

    let health = world.get::<&Health>(enemy).unwrap();
    assert_eq!(health.hp, health.max_hp, "no hit outside the height band");
}

#[test]
fn test_projectile_barrier_collision() {
    let (mut world, enemy) = test_world_with_enemy(EnemyKind::Normal, 1);
    {
        // Move the enemy away so only the barrier can be hit.
        let mut pos = world.get::<&mut Position>(enemy).unwrap();
        pos.x = 20.0;
    }

    let projectile = world_setup::spawn_projectile(
        &mut world,
        Position::new(5.0, 1.0, 0.0),
        Velocity::new(1.0, 0.0, 0.0),
        1.0,
        SpellKind::Fireball,
    );

    let barrier = Barrier {
        position: Position::new(5.0, 0.0, 0.0),
        half_width: 1.0,
        half_depth: 1.0,
        height: 3.0,
    };

    let mut scheduler = ActionScheduler::new();
    let mut events = Vec::new();
    let mut deaths = Vec::new();

    combat::run(
        &mut world,
        &mut scheduler,
        &mut events,
        &mut deaths,
        &[barrier],
        0.0,
    );

    assert!(
        world.get::<&Projectile>(projectile).unwrap().spent,
        "barrier consumes the projectile"
    );
    assert!(
        !events
            .iter()
            .any(|e| matches!(e, EffectEvent::ProjectileHit { .. })),
        "no damage reported against barriers"
    );
}

#[test]
fn test_projectile_ground_impact() {
    let mut world = World::new();

    let projectile = world_setup::spawn_projectile(
        &mut world,
        Position::new(0.0, -0.1, 0.0),
        Velocity::new(0.0, -1.0, 0.0),
        1.0,
        SpellKind::Fireball,
    );

    let mut scheduler = ActionScheduler::new();
    let mut events = Vec::new();
    let mut deaths = Vec::new();

    combat::run(
        &mut world, &mut scheduler, &mut events, &mut deaths, &[], 0.0,
    );

    assert!(world.get::<&Projectile>(projectile).unwrap().spent);
    assert!(events
        .iter()
        .any(|e| matches!(e, EffectEvent::GroundImpact { .. })));
}

// ---- Boss death cascade & wave accounting ----

#[test]
fn test_boss_death_cascades_to_clones() {
    let mut world = World::new();
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let boss = world_setup::spawn_enemy(
        &mut world,
        &mut rng,
        Position::new(0.0, 0.0, 0.0),
        EnemyKind::Boss,
        5,
        0.0,
    );
    let clones: Vec<hecs::Entity> = (0..4)
        .map(|i| {
            world_setup::spawn_enemy(
                &mut world,
                &mut rng,
                Position::new(3.0 + i as f64, 0.0, 0.0),
                EnemyKind::Clone,
                5,
                0.0,
            )
        })
        .collect();

    let mut horde = HordeState::new(DEFAULT_MAX_ACTIVE_ENTITIES);
    horde.level = 5;
    horde.begin_level();
    horde.phase = HordePhase::Wave;
    horde.boss = Some(boss);

    let mut scheduler = ActionScheduler::new();
    let mut events = Vec::new();
    let mut deaths = Vec::new();

    combat::take_damage(
        &mut world, &mut scheduler, &mut events, &mut deaths, boss, 10_000, None, 0.0, 0.0,
    );
    horde_director::handle_deaths(
        &mut world, &mut horde, &mut scheduler, &mut events, deaths, 0.0,
    );

    assert!(horde.boss.is_none(), "boss handle cleared");
    for clone in clones {
        let profile = world.get::<&BehaviorProfile>(clone).unwrap();
        assert_eq!(
            profile.state,
            BehaviorState::Dead,
            "clones die in the same update as the boss"
        );
    }
    assert_eq!(
        horde.killed_count, 1,
        "only the boss counts toward the wave; clone deaths never do"
    );
    assert_eq!(
        horde.phase,
        HordePhase::Victory,
        "killing the lone boss completes the wave"
    );
}

#[test]
fn test_clone_death_never_counts() {
    let mut world = World::new();
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let clone = world_setup::spawn_enemy(
        &mut world,
        &mut rng,
        Position::new(0.0, 0.0, 0.0),
        EnemyKind::Clone,
        5,
        0.0,
    );

    let mut horde = HordeState::new(DEFAULT_MAX_ACTIVE_ENTITIES);
    horde.phase = HordePhase::Wave;
    horde.total_in_wave = 1;

    let mut scheduler = ActionScheduler::new();
    let mut events = Vec::new();
    let mut deaths = Vec::new();

    combat::take_damage(
        &mut world, &mut scheduler, &mut events, &mut deaths, clone, 10_000, None, 0.0, 0.0,
    );
    horde_director::handle_deaths(
        &mut world, &mut horde, &mut scheduler, &mut events, deaths, 0.0,
    );

    assert_eq!(horde.killed_count, 0);
    assert_eq!(horde.phase, HordePhase::Wave);
}

#[test]
fn test_simultaneous_kills_trigger_victory_once() {
    let mut world = World::new();
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let a = world_setup::spawn_enemy(
        &mut world,
        &mut rng,
        Position::new(0.0, 0.0, 0.0),
        EnemyKind::Normal,
        1,
        0.0,
    );
    let b = world_setup::spawn_enemy(
        &mut world,
        &mut rng,
        Position::new(1.0, 0.0, 0.0),
        EnemyKind::Normal,
        1,
        0.0,
    );

    let mut horde = HordeState::new(DEFAULT_MAX_ACTIVE_ENTITIES);
    horde.phase = HordePhase::Wave;
    horde.total_in_wave = 2;
    horde.spawned_count = 2;

    let mut scheduler = ActionScheduler::new();
    let mut events = Vec::new();
    let mut deaths = Vec::new();

    // Both die in the same frame.
    combat::take_damage(
        &mut world, &mut scheduler, &mut events, &mut deaths, a, 10_000, None, 0.0, 0.0,
    );
    combat::take_damage(
        &mut world, &mut scheduler, &mut events, &mut deaths, b, 10_000, None, 0.0, 0.0,
    );
    horde_director::handle_deaths(
        &mut world, &mut horde, &mut scheduler, &mut events, deaths, 0.0,
    );

    assert_eq!(horde.phase, HordePhase::Victory);
    assert_eq!(horde.killed_count, 2);
    let victory_transitions = events
        .iter()
        .filter(|e| {
            matches!(
                e,
                EffectEvent::PhaseChanged {
                    phase: HordePhase::Victory
                }
            )
        })
        .count();
    assert_eq!(victory_transitions, 1, "Victory fires exactly once");
}

// ---- Boss summoning ----

#[test]
fn test_boss_summons_clones_on_interval() {
    let mut engine = ArenaEngine::new(ArenaConfig::default());
    engine.horde_mut().level = 5;
    run_until_phase(&mut engine, HordePhase::Wave, 200);
    run_frames(&mut engine, 20);
    assert!(engine.horde().boss.is_some());

    // The summon interval is 8s; run past it.
    let mut saw_summon = false;
    for _ in 0..((BOSS_SUMMON_INTERVAL_SECS / DT) as u32 + 20) {
        let snapshot = engine.update(DT);
        if snapshot
            .events
            .iter()
            .any(|e| matches!(e, EffectEvent::BossSummon { .. }))
        {
            saw_summon = true;
            break;
        }
    }
    assert!(saw_summon, "boss should summon a batch within its interval");

    let clones = {
        let world = engine.world();
        let mut q = world.query::<&ArchetypeConfig>();
        q.iter()
            .filter(|(_, config)| config.kind == EnemyKind::Clone)
            .count() as u32
    };
    assert!(
        (SUMMON_MIN_CLONES..=SUMMON_MAX_CLONES).contains(&clones),
        "summon batch size in [3, 6], got {clones}"
    );
}

// ---- Player interaction ----

#[test]
fn test_adjacent_enemy_attacks_player() {
    let mut engine = ArenaEngine::new(ArenaConfig::default());
    engine.spawn_entity(Position::new(1.0, 0.0, 0.0), EnemyKind::Normal);

    let mut hit = false;
    for _ in 0..30 {
        let snapshot = engine.update(DT);
        if snapshot
            .events
            .iter()
            .any(|e| matches!(e, EffectEvent::PlayerHit { .. }))
        {
            hit = true;
            assert!(snapshot.player.hp < PLAYER_MAX_HP);
            break;
        }
    }
    assert!(hit, "an enemy in attack range should strike within cooldown");
}

#[test]
fn test_hit_enemy_is_stunned_flashes_and_recovers() {
    let mut engine = ArenaEngine::new(ArenaConfig::default());
    // Park the player far away so the mini-boss stays put.
    engine.queue_command(ArenaCommand::SetPlayerPosition {
        position: Position::new(100.0, 0.0, 100.0),
    });
    let enemy = engine.spawn_entity(Position::new(5.0, 0.0, 0.0), EnemyKind::MiniBoss);
    engine.update(DT);

    engine.queue_command(ArenaCommand::CastSpell {
        origin: Position::new(0.0, 1.0, 0.0),
        direction: Velocity::new(1.0, 0.0, 0.0),
        intensity: 1.0,
        kind: SpellKind::Fireball,
    });

    let mut struck_frame = None;
    for frame in 0..40 {
        let snapshot = engine.update(DT);
        if snapshot
            .events
            .iter()
            .any(|e| matches!(e, EffectEvent::ProjectileHit { .. }))
        {
            struck_frame = Some(frame);
            break;
        }
    }
    assert!(struck_frame.is_some(), "fireball should connect");

    {
        let world = engine.world();
        let profile = world.get::<&BehaviorProfile>(enemy).unwrap();
        assert_eq!(profile.state, BehaviorState::Stunned);
        let flash = world.get::<&DamageFlash>(enemy).unwrap();
        assert!(flash.flashing);
        let health = world.get::<&Health>(enemy).unwrap();
        assert_eq!(health.hp, health.max_hp - 25);
    }

    // Flash clears and the stun decays; with the player this far away the
    // recovery chase immediately lapses back into wandering.
    run_frames(&mut engine, 30);
    {
        let world = engine.world();
        let flash = world.get::<&DamageFlash>(enemy).unwrap();
        assert!(!flash.flashing, "flash cleared by its deferred action");
        let profile = world.get::<&BehaviorProfile>(enemy).unwrap();
        assert!(
            matches!(
                profile.state,
                BehaviorState::Chasing | BehaviorState::Wandering
            ),
            "stun recovers once the push decays, got {:?}",
            profile.state
        );
    }
}

// ---- Spell casting ----

#[test]
fn test_spell_intensity_clamped() {
    let mut engine = ArenaEngine::new(ArenaConfig::default());
    engine.queue_command(ArenaCommand::CastSpell {
        origin: Position::new(0.0, 1.0, 0.0),
        direction: Velocity::new(1.0, 0.0, 0.0),
        intensity: 5.0,
        kind: SpellKind::Fireball,
    });
    let snapshot = engine.update(DT);

    assert_eq!(snapshot.projectiles.len(), 1);
    let view = &snapshot.projectiles[0];
    assert!((view.intensity - SPELL_INTENSITY_MAX).abs() < 1e-12);
    assert!((view.radius - FIREBALL_RADIUS * SPELL_INTENSITY_MAX).abs() < 1e-12);
}

#[test]
fn test_zero_direction_cast_is_ignored() {
    let mut engine = ArenaEngine::new(ArenaConfig::default());
    engine.queue_command(ArenaCommand::CastSpell {
        origin: Position::new(0.0, 1.0, 0.0),
        direction: Velocity::new(0.0, 0.0, 0.0),
        intensity: 1.0,
        kind: SpellKind::IceShard,
    });
    let snapshot = engine.update(DT);
    assert!(snapshot.projectiles.is_empty(), "degenerate cast is a no-op");
}

#[test]
fn test_projectile_expires_by_life() {
    let mut engine = ArenaEngine::new(ArenaConfig::default());
    engine.queue_command(ArenaCommand::CastSpell {
        origin: Position::new(0.0, 50.0, 0.0),
        direction: Velocity::new(0.0, 1.0, 0.0),
        intensity: 1.0,
        kind: SpellKind::Fireball,
    });
    engine.update(DT);

    let frames = (FIREBALL_LIFE_SECS / DT) as u32 + 5;
    let snapshot = run_frames(&mut engine, frames);
    assert!(
        snapshot.projectiles.is_empty(),
        "expired projectile despawned"
    );
}

// ---- Separation ----

#[test]
fn test_overlapping_enemies_separate() {
    let mut world = World::new();
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let a = world_setup::spawn_enemy(
        &mut world,
        &mut rng,
        Position::new(0.0, 0.0, 0.0),
        EnemyKind::Normal,
        1,
        0.0,
    );
    let b = world_setup::spawn_enemy(
        &mut world,
        &mut rng,
        Position::new(0.2, 0.0, 0.1),
        EnemyKind::Normal,
        1,
        0.0,
    );

    let before = {
        let pa = *world.get::<&Position>(a).unwrap();
        let pb = *world.get::<&Position>(b).unwrap();
        pa.horizontal_range_to(&pb)
    };

    separation::run(&mut world, DT);

    let after = {
        let pa = *world.get::<&Position>(a).unwrap();
        let pb = *world.get::<&Position>(b).unwrap();
        pa.horizontal_range_to(&pb)
    };
    assert!(after > before, "overlapping enemies must push apart");
}

#[test]
fn test_coincident_enemies_do_not_produce_nan() {
    let mut world = World::new();
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let a = world_setup::spawn_enemy(
        &mut world,
        &mut rng,
        Position::new(1.0, 0.0, 1.0),
        EnemyKind::Normal,
        1,
        0.0,
    );
    world_setup::spawn_enemy(
        &mut world,
        &mut rng,
        Position::new(1.0, 0.0, 1.0),
        EnemyKind::Normal,
        1,
        0.0,
    );

    separation::run(&mut world, DT);

    let pos = world.get::<&Position>(a).unwrap();
    assert!(pos.x.is_finite() && pos.z.is_finite(), "zero distance guarded");
}

#[test]
fn test_distant_enemies_not_moved() {
    let mut world = World::new();
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let a = world_setup::spawn_enemy(
        &mut world,
        &mut rng,
        Position::new(0.0, 0.0, 0.0),
        EnemyKind::Normal,
        1,
        0.0,
    );
    world_setup::spawn_enemy(
        &mut world,
        &mut rng,
        Position::new(10.0, 0.0, 10.0),
        EnemyKind::Normal,
        1,
        0.0,
    );

    separation::run(&mut world, DT);

    let pos = world.get::<&Position>(a).unwrap();
    assert_eq!(pos.x, 0.0);
    assert_eq!(pos.z, 0.0);
}

// ---- Scheduler ----

#[test]
fn test_scheduler_cancel_owned() {
    let mut world = World::new();
    let owner = world.spawn(());
    let other = world.spawn(());

    let mut scheduler = ActionScheduler::new();
    scheduler.schedule(0.0, 1.0, Some(owner), ActionKind::ClearDamageFlash);
    scheduler.schedule(0.0, 1.0, Some(other), ActionKind::ClearDamageFlash);
    scheduler.schedule(0.0, 1.0, None, ActionKind::EndLunge);

    scheduler.cancel_owned(owner);
    assert_eq!(scheduler.len(), 2, "only the owner's actions are cancelled");

    let due = scheduler.drain_due(2.0);
    assert_eq!(due.len(), 2);
    assert!(scheduler.is_empty());
}

#[test]
fn test_scheduler_fires_in_order_and_only_when_due() {
    let mut scheduler = ActionScheduler::new();
    scheduler.schedule(0.0, 0.5, None, ActionKind::EndLunge);
    scheduler.schedule(0.0, 1.5, None, ActionKind::EndLunge);

    assert_eq!(scheduler.drain_due(0.4).len(), 0);
    assert_eq!(scheduler.drain_due(0.5).len(), 1);
    assert_eq!(scheduler.len(), 1);
    assert_eq!(scheduler.drain_due(2.0).len(), 1);
}

// ---- Reset ----

#[test]
fn test_reset_restores_initial_state() {
    let mut engine = ArenaEngine::new(ArenaConfig::default());
    run_until_phase(&mut engine, HordePhase::Wave, 200);
    run_frames(&mut engine, 30);
    assert!(!engine.active_enemies().is_empty());

    engine.queue_command(ArenaCommand::ResetAll);
    let snapshot = engine.update(DT);

    assert_eq!(snapshot.level, 1);
    assert_eq!(snapshot.phase, HordePhase::Rest);
    assert_eq!(snapshot.wave.total_in_wave, 0);
    assert_eq!(snapshot.wave.killed_count, 0);
    assert_eq!(snapshot.wave.pending_spawns, 0);
    assert!(snapshot.enemies.is_empty());
    assert!(snapshot.projectiles.is_empty());
    assert_eq!(snapshot.player.hp, PLAYER_MAX_HP);
    assert!((snapshot.progress - 1.0).abs() < 1e-12);
}

#[test]
fn test_reset_discards_pending_spawns() {
    let mut engine = ArenaEngine::new(ArenaConfig::default());
    run_until_phase(&mut engine, HordePhase::Wave, 200);

    // A telegraph is in flight; reset before it materializes.
    engine.update(DT);
    assert!(engine.horde().pending_spawns > 0 || !engine.active_enemies().is_empty());
    engine.reset_all();
    assert_eq!(engine.scheduled_action_count(), 0);

    // Run past the telegraph delay: nothing may materialize during Rest.
    let snapshot = run_frames(&mut engine, 20);
    assert!(
        snapshot.enemies.is_empty(),
        "stale telegraphed spawns must be discarded"
    );
    assert_eq!(engine.horde().pending_spawns, 0);
}

#[test]
fn test_interrupted_wave_discards_stale_spawns() {
    let mut engine = ArenaEngine::new(ArenaConfig::default());
    run_until_phase(&mut engine, HordePhase::Wave, 200);
    engine.update(DT);
    assert!(engine.horde().pending_spawns > 0);

    // Force the wave to end while telegraphs are still in flight.
    engine.horde_mut().phase = HordePhase::Victory;
    engine.horde_mut().phase_remaining_secs = 1_000.0;

    let live_before = engine.active_enemies().len();
    run_frames(&mut engine, 20);

    assert_eq!(
        engine.active_enemies().len(),
        live_before,
        "stale spawns from an interrupted wave never materialize"
    );
    assert_eq!(engine.horde().pending_spawns, 0, "pending count released");
}

// ---- Progress metric ----

#[test]
fn test_progress_uses_boss_health_while_boss_alive() {
    let mut engine = ArenaEngine::new(ArenaConfig::default());
    engine.horde_mut().level = 5;
    run_until_phase(&mut engine, HordePhase::Wave, 200);
    run_frames(&mut engine, 20);

    let boss = engine.horde().boss.expect("boss alive");
    assert!((engine.progress_fraction() - 1.0).abs() < 1e-12);

    engine.damage_enemy(boss, 325);
    assert!(
        (engine.progress_fraction() - 0.5).abs() < 1e-9,
        "progress mirrors boss hp fraction"
    );
}

#[test]
fn test_progress_uses_kill_fraction_without_boss() {
    let mut horde = HordeState::new(DEFAULT_MAX_ACTIVE_ENTITIES);
    horde.phase = HordePhase::Wave;
    horde.total_in_wave = 10;
    horde.killed_count = 4;
    assert!((horde.progress(None) - 0.6).abs() < 1e-12);
}

// ---- Horde sizing rules ----

#[test]
fn test_wave_size_rules() {
    assert_eq!(HordeState::wave_size(1), 7);
    assert_eq!(HordeState::wave_size(4), 13);
    assert_eq!(HordeState::wave_size(5), 1, "boss level");
    assert_eq!(HordeState::wave_size(10), 1, "boss level");
    assert_eq!(HordeState::wave_size(7), 19);
}

#[test]
fn test_archetype_selection_rules() {
    // Boss level.
    assert_eq!(
        HordeState::archetype_for_index(5, 0),
        EnemyKind::Boss
    );
    // Even level: first floor(level/2) spawns are mini-bosses.
    assert_eq!(HordeState::archetype_for_index(4, 0), EnemyKind::MiniBoss);
    assert_eq!(HordeState::archetype_for_index(4, 1), EnemyKind::MiniBoss);
    assert_eq!(HordeState::archetype_for_index(4, 2), EnemyKind::Normal);
    // Odd level: all normals.
    assert_eq!(HordeState::archetype_for_index(3, 0), EnemyKind::Normal);
    assert_eq!(HordeState::archetype_for_index(3, 5), EnemyKind::Normal);
}
