//! Commands sent from the host (input/presentation layers) to the
//! simulation.
//!
//! Commands are queued and processed at the next update boundary.

use serde::{Deserialize, Serialize};

use crate::enums::SpellKind;
use crate::types::{Position, Velocity};

/// All host actions the simulation accepts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ArenaCommand {
    /// Mirror the externally-controlled player position into the core.
    SetPlayerPosition { position: Position },
    /// Cast a spell projectile. `direction` is normalized by the engine;
    /// `intensity` is clamped to the allowed band, never rejected.
    CastSpell {
        origin: Position,
        direction: Velocity,
        intensity: f64,
        kind: SpellKind,
    },
    /// Clear all simulation state back to the initial HordeState.
    ResetAll,
}
