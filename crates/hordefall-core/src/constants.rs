//! Simulation constants and tuning parameters.

// --- Arena ---

/// Half-extent of the square arena, centered at the origin (meters).
pub const ARENA_HALF_EXTENT: f64 = 24.0;

/// Ground height. Enemy positions are pinned here; projectiles reaching it
/// are consumed with a ground-impact event.
pub const GROUND_Y: f64 = 0.0;

// --- Horde phase durations ---

/// Rest phase duration between waves (seconds).
pub const REST_DURATION_SECS: f64 = 5.0;

/// Announce phase duration (seconds).
pub const ANNOUNCE_DURATION_SECS: f64 = 3.0;

/// Countdown phase duration (seconds).
pub const COUNTDOWN_DURATION_SECS: f64 = 3.5;

/// Victory phase duration (seconds).
pub const VICTORY_DURATION_SECS: f64 = 3.0;

// --- Wave sizing ---

/// Base wave size before per-level scaling.
pub const WAVE_BASE_SIZE: u32 = 5;

/// Additional enemies per level.
pub const WAVE_SIZE_PER_LEVEL: u32 = 2;

/// Every Nth level is a boss level (single boss, no regular spawns).
pub const BOSS_LEVEL_INTERVAL: u32 = 5;

// --- Enemy hit points ---

/// Boss hp = BOSS_BASE_HP + BOSS_HP_PER_LEVEL * level.
pub const BOSS_BASE_HP: i32 = 400;
pub const BOSS_HP_PER_LEVEL: i32 = 50;

/// Mini-boss hp = MINI_BOSS_BASE_HP + MINI_BOSS_HP_PER_LEVEL * level.
pub const MINI_BOSS_BASE_HP: i32 = 120;
pub const MINI_BOSS_HP_PER_LEVEL: i32 = 15;

/// Normal enemy hp = NORMAL_BASE_HP + NORMAL_HP_PER_LEVEL * level.
pub const NORMAL_BASE_HP: i32 = 20;
pub const NORMAL_HP_PER_LEVEL: i32 = 2;

/// Clone minions use a flat hp independent of level.
pub const CLONE_HP: i32 = 10;

// --- Spawning ---

/// Default population cap enforced during spawning.
pub const DEFAULT_MAX_ACTIVE_ENTITIES: u32 = 40;

/// Delay between a spawn request (telegraph effect) and the entity
/// materializing (seconds).
pub const SPAWN_TELEGRAPH_SECS: f64 = 0.9;

/// Wave spawns appear in a ring band near the arena edge, as a fraction of
/// the half-extent.
pub const SPAWN_RING_MIN_FRACTION: f64 = 0.70;
pub const SPAWN_RING_MAX_FRACTION: f64 = 0.95;

// --- Boss summoning ---

/// Interval between boss clone-summon batches (seconds).
pub const BOSS_SUMMON_INTERVAL_SECS: f64 = 8.0;

/// Clones per summon batch (inclusive range).
pub const SUMMON_MIN_CLONES: u32 = 3;
pub const SUMMON_MAX_CLONES: u32 = 6;

/// Radius of the ring clones appear on around the boss (meters).
pub const SUMMON_RING_RADIUS: f64 = 3.0;

// --- Separation ---

/// Neighbors within this radius repel each other (meters).
pub const SEPARATION_RADIUS: f64 = 1.6;

/// Repulsion force multiplier, applied proportional to elapsed time.
pub const SEPARATION_FORCE: f64 = 4.0;

// --- Knockback ---

/// Friction factor: push force scales by max(0, 1 - PUSH_FRICTION * dt)
/// each frame.
pub const PUSH_FRICTION: f64 = 3.0;

/// Above this push magnitude, voluntary movement is suppressed.
pub const PUSH_SUPPRESS_THRESHOLD: f64 = 0.5;

/// Below this push magnitude, a stunned enemy recovers to Chasing.
pub const STUN_EXIT_THRESHOLD: f64 = 0.4;

/// Push magnitudes below this are zeroed outright.
pub const PUSH_EPSILON: f64 = 0.05;

// --- Wandering ---

/// Probability that a wandering enemy idles instead of picking a new
/// patrol point.
pub const IDLE_PAUSE_PROBABILITY: f64 = 0.3;

/// Idle pause duration band (seconds).
pub const IDLE_PAUSE_MIN_SECS: f64 = 2.0;
pub const IDLE_PAUSE_MAX_SECS: f64 = 4.0;

/// An enemy within this distance of its patrol point has arrived.
pub const PATROL_ARRIVE_RADIUS: f64 = 0.75;

/// Player lost when distance exceeds this multiple of the detection radius.
pub const CHASE_GIVE_UP_FACTOR: f64 = 2.0;

/// Attack released when distance exceeds this multiple of the attack range.
pub const ATTACK_RELEASE_FACTOR: f64 = 1.5;

// --- Combat ---

/// Enemy collision radius at scale 1.0 (meters); scales with archetype.
pub const ENEMY_BASE_COLLISION_RADIUS: f64 = 0.6;

/// Enemy height at scale 1.0 (meters); the projectile height band is
/// [0, ENEMY_BASE_HEIGHT * scale] above the entity base.
pub const ENEMY_BASE_HEIGHT: f64 = 1.8;

/// Damage-flash window exposed to the presentation layer (seconds).
pub const DAMAGE_FLASH_SECS: f64 = 0.15;

/// Forward lunge applied on an attack, reset after this delay (seconds).
pub const ATTACK_LUNGE_SECS: f64 = 0.2;

/// Lunge displacement toward the player (meters).
pub const LUNGE_DISTANCE: f64 = 0.35;

// --- Spells ---

/// Caster-controlled intensity is clamped to this range before affecting
/// projectile scale.
pub const SPELL_INTENSITY_MIN: f64 = 0.3;
pub const SPELL_INTENSITY_MAX: f64 = 2.0;

/// Fireball parameters.
pub const FIREBALL_SPEED: f64 = 18.0;
pub const FIREBALL_RADIUS: f64 = 0.5;
pub const FIREBALL_DAMAGE: i32 = 25;
pub const FIREBALL_KNOCKBACK: f64 = 2.0;
pub const FIREBALL_LIFE_SECS: f64 = 3.0;

/// Ice shard parameters.
pub const ICE_SHARD_SPEED: f64 = 26.0;
pub const ICE_SHARD_RADIUS: f64 = 0.3;
pub const ICE_SHARD_DAMAGE: i32 = 14;
pub const ICE_SHARD_KNOCKBACK: f64 = 1.1;
pub const ICE_SHARD_LIFE_SECS: f64 = 2.2;

// --- Player ---

/// Player starting hit points.
pub const PLAYER_MAX_HP: i32 = 100;
