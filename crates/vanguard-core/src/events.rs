//! Game-state change notifications.
//!
//! Producers push these into the precomputation engine's inbound channel;
//! nothing ever calls into engine internals directly.

use serde::{Deserialize, Serialize};

use crate::enums::GamePhase;
use crate::types::UnitId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A unit's state (position, facing, existence) changed.
    UnitChanged { unit: UnitId },
    /// The game advanced to a new phase.
    PhaseChanged { phase: GamePhase },
}
