//! Events emitted while resolving a turn

use serde::{Deserialize, Serialize};

use crate::core::types::{Position, Side};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TurnEvent {
    /// A unit lost hit points in combat
    Damaged { unit: String, at: Position, loss: u32 },
    /// A unit's hit points reached zero
    Killed { unit: String, at: Position },
    /// A city changed hands
    Captured { at: Position, by: String, from: Side },
}
