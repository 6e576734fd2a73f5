//! One full turn
//!
//! Each turn: movement (fixed unit order) -> captures -> win check -> turn counter

use serde::Serialize;

use crate::core::types::Turn;
use crate::resolve::capture::resolve_captures;
use crate::resolve::dice::Dice;
use crate::resolve::events::TurnEvent;
use crate::resolve::movement::advance_unit;
use crate::resolve::victory::{check_victory, Winner};
use crate::world::state::WorldState;

/// Summary of one fired turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TurnReport {
    /// Turn counter after the turn
    pub turn: Turn,
    /// False when the match was already decided and nothing ran
    pub resolved: bool,
    pub events: Vec<TurnEvent>,
    pub winner: Option<Winner>,
}

/// Resolve a whole turn against `state`
///
/// Units act in their stored order, one after another, so a unit that
/// vacates a tile early in the turn frees it for units later in the order.
pub fn resolve_turn(state: &mut WorldState, dice: &mut dyn Dice) -> TurnReport {
    if let Some(winner) = state.winner {
        return TurnReport {
            turn: state.turn,
            resolved: false,
            events: Vec::new(),
            winner: Some(winner),
        };
    }

    state.events.clear();

    for idx in 0..state.units.len() {
        advance_unit(state, idx, dice);
    }

    resolve_captures(state);

    if let Some(winner) = check_victory(&state.cities) {
        tracing::info!("Match decided on turn {}: {:?}", state.turn + 1, winner);
        state.winner = Some(winner);
    }

    state.turn += 1;

    TurnReport {
        turn: state.turn,
        resolved: true,
        events: state.events.clone(),
        winner: state.winner,
    }
}
