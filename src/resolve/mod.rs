//! Turn resolution
//!
//! Each turn: movement -> combat (on collision) -> captures -> win check

pub mod capture;
pub mod combat;
pub mod dice;
pub mod events;
pub mod movement;
pub mod turn;
pub mod victory;

pub use capture::resolve_captures;
pub use combat::{resolve_combat, CombatResult};
pub use dice::{Dice, LoadedDice, SeededDice};
pub use events::TurnEvent;
pub use movement::{advance_unit, Blocker, MovementResult, StepOutcome};
pub use turn::{resolve_turn, TurnReport};
pub use victory::{check_victory, Winner};
