//! Arena engine — the core of the combat simulation.
//!
//! `ArenaEngine` owns the hecs ECS world, the horde director state, the
//! deferred-action scheduler, and the RNG. It processes host commands, runs
//! all systems in a fixed order once per frame, and produces
//! `ArenaSnapshot`s. Completely headless, enabling deterministic testing.

use std::collections::VecDeque;

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use hordefall_core::commands::ArenaCommand;
use hordefall_core::components::{BehaviorProfile, DamageFlash, Enemy};
use hordefall_core::constants::{
    DEFAULT_MAX_ACTIVE_ENTITIES, PLAYER_MAX_HP, SPELL_INTENSITY_MAX, SPELL_INTENSITY_MIN,
};
use hordefall_core::enums::{BehaviorState, EnemyKind, HordePhase};
use hordefall_core::events::EffectEvent;
use hordefall_core::state::ArenaSnapshot;
use hordefall_core::types::{Barrier, Position, SimTime};

use crate::horde::HordeState;
use crate::scheduler::{ActionKind, ActionScheduler, DeferredAction};
use crate::systems;
use crate::systems::combat::DeathRecord;
use crate::world_setup;

/// Configuration for starting a new simulation.
pub struct ArenaConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Population cap enforced during spawning.
    pub max_active_entities: u32,
    /// Static obstacle volumes for projectile collision.
    pub barriers: Vec<Barrier>,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            max_active_entities: DEFAULT_MAX_ACTIVE_ENTITIES,
            barriers: Vec::new(),
        }
    }
}

/// The externally-controlled player, mirrored into the core. Enemy attacks
/// apply damage here; the input layer writes the position.
#[derive(Debug, Clone)]
pub struct PlayerState {
    pub position: Position,
    pub hp: i32,
    pub max_hp: i32,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            position: Position::default(),
            hp: PLAYER_MAX_HP,
            max_hp: PLAYER_MAX_HP,
        }
    }
}

impl PlayerState {
    pub fn take_damage(&mut self, amount: i32) {
        self.hp = (self.hp - amount).max(0);
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct ArenaEngine {
    world: World,
    time: SimTime,
    rng: ChaCha8Rng,
    horde: HordeState,
    scheduler: ActionScheduler,
    player: PlayerState,
    barriers: Vec<Barrier>,
    command_queue: VecDeque<ArenaCommand>,
    despawn_buffer: Vec<hecs::Entity>,
    effect_events: Vec<EffectEvent>,
}

impl ArenaEngine {
    /// Create a new engine with the given config.
    pub fn new(config: ArenaConfig) -> Self {
        Self {
            world: World::new(),
            time: SimTime::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            horde: HordeState::new(config.max_active_entities),
            scheduler: ActionScheduler::new(),
            player: PlayerState::default(),
            barriers: config.barriers,
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            effect_events: Vec::new(),
        }
    }

    /// Queue a host command for processing at the next update boundary.
    pub fn queue_command(&mut self, command: ArenaCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = ArenaCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the whole combat simulation one frame and return the
    /// resulting snapshot.
    ///
    /// System order is fixed: commands, deferred actions, horde director,
    /// enemy AI, movement, separation, projectile collision, death
    /// accounting, cleanup. All enemy AI/physics completes before the
    /// projectile pass, and each projectile strikes at most one enemy.
    pub fn update(&mut self, dt: f64) -> ArenaSnapshot {
        self.process_commands();

        self.time.advance(dt);
        let now = self.time.elapsed_secs;

        self.fire_deferred_actions(now);

        systems::horde_director::run(
            &mut self.world,
            &mut self.rng,
            &mut self.horde,
            &mut self.scheduler,
            &mut self.effect_events,
            now,
            dt,
        );
        systems::enemy_ai::run(
            &mut self.world,
            &mut self.rng,
            &mut self.scheduler,
            &mut self.effect_events,
            &mut self.player,
            now,
            dt,
        );
        systems::movement::run_enemies(&mut self.world, self.player.position, now, dt);
        systems::separation::run(&mut self.world, dt);
        systems::movement::run_projectiles(&mut self.world, dt);

        let mut deaths: Vec<DeathRecord> = Vec::new();
        systems::combat::run(
            &mut self.world,
            &mut self.scheduler,
            &mut self.effect_events,
            &mut deaths,
            &self.barriers,
            now,
        );
        systems::horde_director::handle_deaths(
            &mut self.world,
            &mut self.horde,
            &mut self.scheduler,
            &mut self.effect_events,
            deaths,
            now,
        );

        systems::cleanup::run(
            &mut self.world,
            &mut self.scheduler,
            &mut self.despawn_buffer,
        );

        let events = std::mem::take(&mut self.effect_events);
        systems::snapshot::build_snapshot(&self.world, &self.time, &self.horde, &self.player, events)
    }

    /// Spawn an enemy of the given archetype at `position`, at the current
    /// wave level. Registers the boss handle when a boss is spawned.
    pub fn spawn_entity(&mut self, position: Position, kind: EnemyKind) -> hecs::Entity {
        let now = self.time.elapsed_secs;
        let level = self.horde.level;
        let entity =
            world_setup::spawn_enemy(&mut self.world, &mut self.rng, position, kind, level, now);
        if kind == EnemyKind::Boss && self.horde.boss.is_none() {
            self.horde.boss = Some(entity);
        }
        self.effect_events
            .push(EffectEvent::EnemySpawned { position, kind });
        entity
    }

    /// Resolve a single projectile against barriers, ground, and enemies,
    /// applying damage and knockback on a hit. Returns the struck enemy.
    pub fn check_projectile_hit(&mut self, projectile: hecs::Entity) -> Option<hecs::Entity> {
        let now = self.time.elapsed_secs;
        let mut deaths: Vec<DeathRecord> = Vec::new();
        let struck = systems::combat::resolve_projectile(
            &mut self.world,
            &mut self.scheduler,
            &mut self.effect_events,
            &mut deaths,
            &self.barriers,
            projectile,
            now,
        );
        systems::horde_director::handle_deaths(
            &mut self.world,
            &mut self.horde,
            &mut self.scheduler,
            &mut self.effect_events,
            deaths,
            now,
        );
        struck
    }

    /// Read-only snapshot of the live (non-Dead) enemy handles.
    pub fn active_enemies(&self) -> Vec<hecs::Entity> {
        self.world
            .query::<(&Enemy, &BehaviorProfile)>()
            .iter()
            .filter(|(_, (_, profile))| profile.state != BehaviorState::Dead)
            .map(|(entity, _)| entity)
            .collect()
    }

    /// Current wave level.
    pub fn current_level(&self) -> u32 {
        self.horde.level
    }

    /// Current horde phase.
    pub fn current_phase(&self) -> HordePhase {
        self.horde.phase
    }

    /// Wave progress for presentation: boss health fraction while a boss
    /// is alive, otherwise the fraction of the wave still standing.
    pub fn progress_fraction(&self) -> f64 {
        let boss_fraction = self.horde.boss.and_then(|boss| {
            self.world
                .get::<&hordefall_core::components::Health>(boss)
                .ok()
                .map(|health| health.fraction())
        });
        self.horde.progress(boss_fraction)
    }

    /// Clear all simulation state back to the initial HordeState: every
    /// enemy and projectile disposed, every deferred action and pending
    /// spawn cancelled, level back to 1, full Rest timer, player restored.
    pub fn reset_all(&mut self) {
        self.world.clear();
        self.scheduler.clear();
        self.horde.reset();
        self.player = PlayerState::default();
        self.effect_events.push(EffectEvent::PhaseChanged {
            phase: HordePhase::Rest,
        });
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Get the player mirror.
    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    /// Get a read-only reference to the horde state.
    pub fn horde(&self) -> &HordeState {
        &self.horde
    }

    /// Number of deferred actions currently scheduled.
    #[cfg(test)]
    pub fn scheduled_action_count(&self) -> usize {
        self.scheduler.len()
    }

    /// Mutable horde access (for tests that pre-set the level or phase).
    #[cfg(test)]
    pub fn horde_mut(&mut self) -> &mut HordeState {
        &mut self.horde
    }

    /// Apply damage to an enemy through the real combat path, including
    /// death accounting (for tests).
    #[cfg(test)]
    pub fn damage_enemy(&mut self, entity: hecs::Entity, amount: i32) {
        let now = self.time.elapsed_secs;
        let mut deaths: Vec<DeathRecord> = Vec::new();
        systems::combat::take_damage(
            &mut self.world,
            &mut self.scheduler,
            &mut self.effect_events,
            &mut deaths,
            entity,
            amount,
            None,
            0.0,
            now,
        );
        systems::horde_director::handle_deaths(
            &mut self.world,
            &mut self.horde,
            &mut self.scheduler,
            &mut self.effect_events,
            deaths,
            now,
        );
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single host command.
    fn handle_command(&mut self, command: ArenaCommand) {
        match command {
            ArenaCommand::SetPlayerPosition { position } => {
                self.player.position = position;
            }
            ArenaCommand::CastSpell {
                origin,
                direction,
                intensity,
                kind,
            } => {
                // Out-of-range intensity is clamped, never rejected.
                let intensity = intensity.clamp(SPELL_INTENSITY_MIN, SPELL_INTENSITY_MAX);
                let dir = direction.to_vec().normalize_or_zero();
                if dir == glam::DVec3::ZERO {
                    // Degenerate direction — degrade to a no-op.
                    return;
                }
                world_setup::spawn_projectile(
                    &mut self.world,
                    origin,
                    hordefall_core::types::Velocity::from_vec(dir),
                    intensity,
                    kind,
                );
            }
            ArenaCommand::ResetAll => {
                self.reset_all();
            }
        }
    }

    /// Fire every deferred action due at the current clock.
    ///
    /// Spawn telegraphs materialize only while the director is still
    /// spawn-eligible; stale spawns from an interrupted wave are discarded
    /// (their pending count is released either way). Flash/lunge actions
    /// for an entity that has since been disposed were cancelled with it
    /// and never reach here.
    fn fire_deferred_actions(&mut self, now: f64) {
        for action in self.scheduler.drain_due(now) {
            let DeferredAction { owner, kind, .. } = action;
            match kind {
                ActionKind::MaterializeSpawn { position, kind } => {
                    self.horde.pending_spawns = self.horde.pending_spawns.saturating_sub(1);
                    if !self.horde.spawn_eligible() {
                        continue;
                    }
                    let entity = world_setup::spawn_enemy(
                        &mut self.world,
                        &mut self.rng,
                        position,
                        kind,
                        self.horde.level,
                        now,
                    );
                    if kind == EnemyKind::Boss {
                        self.horde.boss = Some(entity);
                    }
                    self.effect_events
                        .push(EffectEvent::EnemySpawned { position, kind });
                }
                ActionKind::ClearDamageFlash => {
                    let Some(entity) = owner else { continue };
                    if let Ok(mut flash) = self.world.get::<&mut DamageFlash>(entity) {
                        flash.flashing = false;
                    }
                }
                ActionKind::EndLunge => {
                    let Some(entity) = owner else { continue };
                    let offset = self
                        .world
                        .get::<&mut BehaviorProfile>(entity)
                        .ok()
                        .and_then(|mut profile| profile.lunge_offset.take());
                    if let Some(offset) = offset {
                        if let Ok(mut pos) = self.world.get::<&mut Position>(entity) {
                            pos.x -= offset.x;
                            pos.z -= offset.z;
                        }
                    }
                }
            }
        }
    }
}
