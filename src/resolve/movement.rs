//! Per-unit order execution
//!
//! Each turn a unit executes one step of the order at the head of its
//! queue. The two order kinds treat obstacles differently:
//!
//! - `Move` never aborts. A step into the map edge, a mountain or a
//!   friendly unit is skipped, but the tile count still runs down.
//! - `MoveTo` is dropped as soon as its next step would leave the map or
//!   enter a mountain. Blocking units only delay it.

use crate::core::types::Position;
use crate::orders::Order;
use crate::resolve::combat::{resolve_combat, CombatResult};
use crate::resolve::dice::Dice;
use crate::world::state::WorldState;

/// Why a step did not happen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Blocker {
    Edge,
    Terrain,
    Friendly,
}

/// What one unit did this turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Moved { to: Position },
    /// A `move_to` issued for the tile the unit already stands on
    Arrived,
    Blocked(Blocker),
    Engaged(CombatResult),
}

/// Result of advancing one unit by one order-step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovementResult {
    pub outcome: StepOutcome,
    /// The head order was popped (completed or aborted)
    pub order_finished: bool,
}

/// What occupies a tile from the mover's point of view
enum Probe {
    OffGrid,
    Mountain,
    Friendly,
    Enemy(usize),
    Free,
}

fn probe(state: &WorldState, mover: usize, dest: Position) -> Probe {
    if !state.in_bounds(dest) {
        return Probe::OffGrid;
    }
    if state.terrain.is_blocked(dest) {
        return Probe::Mountain;
    }
    match state.live_unit_at(dest, mover) {
        Some(other) if state.units[other].side == state.units[mover].side => Probe::Friendly,
        Some(other) => Probe::Enemy(other),
        None => Probe::Free,
    }
}

/// Execute one step of the head order of `units[idx]`
///
/// Returns None when the unit is dead or has nothing queued.
pub fn advance_unit(
    state: &mut WorldState,
    idx: usize,
    dice: &mut dyn Dice,
) -> Option<MovementResult> {
    let unit = &state.units[idx];
    if !unit.is_alive() {
        return None;
    }
    let order = unit.orders.front()?.clone();

    let result = match order {
        Order::Move { direction, .. } => {
            let (dx, dy) = direction.delta();
            step_move(state, idx, dx, dy, dice)
        }
        Order::MoveTo { target } => step_move_to(state, idx, target, dice),
    };
    Some(result)
}

fn step_move(
    state: &mut WorldState,
    idx: usize,
    dx: i32,
    dy: i32,
    dice: &mut dyn Dice,
) -> MovementResult {
    let dest = state.units[idx].position.offset(dx, dy);

    let outcome = match probe(state, idx, dest) {
        Probe::OffGrid => StepOutcome::Blocked(Blocker::Edge),
        Probe::Mountain => StepOutcome::Blocked(Blocker::Terrain),
        Probe::Friendly => StepOutcome::Blocked(Blocker::Friendly),
        Probe::Enemy(defender) => StepOutcome::Engaged(resolve_combat(
            &mut state.units,
            idx,
            defender,
            dice,
            &mut state.events,
        )),
        Probe::Free => {
            state.units[idx].position = dest;
            StepOutcome::Moved { to: dest }
        }
    };

    // The tile count runs down whether or not the step happened
    let unit = &mut state.units[idx];
    let exhausted = match unit.orders.front_mut() {
        Some(Order::Move {
            tiles_remaining, ..
        }) => {
            *tiles_remaining = tiles_remaining.saturating_sub(1);
            *tiles_remaining == 0
        }
        _ => false,
    };
    if exhausted {
        unit.orders.pop_front();
    }

    if let StepOutcome::Blocked(blocker) = outcome {
        tracing::debug!("{} move blocked by {:?} at {}", unit.id, blocker, dest);
    }

    MovementResult {
        outcome,
        order_finished: exhausted,
    }
}

fn step_move_to(
    state: &mut WorldState,
    idx: usize,
    target: Position,
    dice: &mut dyn Dice,
) -> MovementResult {
    let pos = state.units[idx].position;
    // Compare rather than subtract: targets are unbounded
    let mut dx = target.x.cmp(&pos.x) as i32;
    let mut dy = target.y.cmp(&pos.y) as i32;

    if dx == 0 && dy == 0 {
        state.units[idx].orders.pop_front();
        return MovementResult {
            outcome: StepOutcome::Arrived,
            order_finished: true,
        };
    }

    // One axis per turn; diagonals pick an axis at random
    if dx != 0 && dy != 0 {
        if dice.coin_flip() {
            dy = 0;
        } else {
            dx = 0;
        }
    }

    let dest = pos.offset(dx, dy);
    let outcome = match probe(state, idx, dest) {
        Probe::OffGrid | Probe::Mountain => {
            let unit = &mut state.units[idx];
            unit.orders.pop_front();
            tracing::debug!("{} move_to {} aborted at {}", unit.id, target, dest);
            let blocker = if state.in_bounds(dest) {
                Blocker::Terrain
            } else {
                Blocker::Edge
            };
            return MovementResult {
                outcome: StepOutcome::Blocked(blocker),
                order_finished: true,
            };
        }
        // Blocked by a unit: keep the order and retry next turn
        Probe::Friendly => StepOutcome::Blocked(Blocker::Friendly),
        Probe::Enemy(defender) => StepOutcome::Engaged(resolve_combat(
            &mut state.units,
            idx,
            defender,
            dice,
            &mut state.events,
        )),
        Probe::Free => {
            state.units[idx].position = dest;
            StepOutcome::Moved { to: dest }
        }
    };

    let unit = &mut state.units[idx];
    let arrived = unit.position == target;
    if arrived {
        unit.orders.pop_front();
    }

    MovementResult {
        outcome,
        order_finished: arrived,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Direction, Side};
    use crate::resolve::dice::LoadedDice;
    use crate::world::layout::Layout;

    fn world(layout: Layout) -> WorldState {
        WorldState::from_layout(&layout)
    }

    fn queue(state: &mut WorldState, idx: usize, order: Order) {
        state.units[idx].orders.push_back(order);
    }

    fn tiles_left(state: &WorldState, idx: usize) -> Option<u32> {
        match state.units[idx].orders.front() {
            Some(Order::Move {
                tiles_remaining, ..
            }) => Some(*tiles_remaining),
            _ => None,
        }
    }

    #[test]
    fn test_move_free_tile() {
        let mut state = world(Layout::empty(20, 10).with_unit(Side::Blue, 0, 0));
        queue(&mut state, 0, Order::step(Direction::South, 2));
        let mut dice = LoadedDice::new();

        let result = advance_unit(&mut state, 0, &mut dice).unwrap();

        assert_eq!(result.outcome, StepOutcome::Moved { to: Position::new(0, 1) });
        assert_eq!(tiles_left(&state, 0), Some(1));
    }

    #[test]
    fn test_move_off_edge_still_decrements() {
        let mut state = world(Layout::empty(20, 10).with_unit(Side::Blue, 0, 0));
        queue(&mut state, 0, Order::step(Direction::North, 2));
        let mut dice = LoadedDice::new();

        let result = advance_unit(&mut state, 0, &mut dice).unwrap();

        assert_eq!(result.outcome, StepOutcome::Blocked(Blocker::Edge));
        assert_eq!(state.units[0].position, Position::new(0, 0));
        assert_eq!(tiles_left(&state, 0), Some(1));
    }

    #[test]
    fn test_move_into_mountain_pops_when_exhausted() {
        let layout = Layout::empty(20, 10)
            .with_unit(Side::Blue, 2, 8)
            .with_mountain(2, 9);
        let mut state = world(layout);
        queue(&mut state, 0, Order::step(Direction::South, 1));
        let mut dice = LoadedDice::new();

        let result = advance_unit(&mut state, 0, &mut dice).unwrap();

        assert_eq!(result.outcome, StepOutcome::Blocked(Blocker::Terrain));
        assert!(result.order_finished);
        assert!(state.units[0].orders.is_empty());
        assert_eq!(state.units[0].position, Position::new(2, 8));
    }

    #[test]
    fn test_move_into_friendly_no_combat() {
        let layout = Layout::empty(20, 10)
            .with_unit(Side::Blue, 0, 0)
            .with_unit(Side::Blue, 1, 0);
        let mut state = world(layout);
        queue(&mut state, 0, Order::step(Direction::East, 3));
        let mut dice = LoadedDice::new();

        let result = advance_unit(&mut state, 0, &mut dice).unwrap();

        assert_eq!(result.outcome, StepOutcome::Blocked(Blocker::Friendly));
        assert_eq!(state.units[0].hp, 10);
        assert_eq!(state.units[1].hp, 10);
        assert_eq!(tiles_left(&state, 0), Some(2));
    }

    #[test]
    fn test_move_into_enemy_fights_and_stays() {
        let layout = Layout::empty(20, 10)
            .with_unit(Side::Blue, 0, 0)
            .with_unit(Side::Red, 0, 1);
        let mut state = world(layout);
        queue(&mut state, 0, Order::step(Direction::South, 2));
        let mut dice = LoadedDice::new().with_rolls([3, 4]);

        let result = advance_unit(&mut state, 0, &mut dice).unwrap();

        assert!(matches!(result.outcome, StepOutcome::Engaged(_)));
        assert_eq!(state.units[0].position, Position::new(0, 0));
        assert_eq!(state.units[0].hp, 7);
        assert_eq!(state.units[1].hp, 6);
        assert_eq!(tiles_left(&state, 0), Some(1));
    }

    #[test]
    fn test_move_into_dead_unit_tile_moves() {
        let layout = Layout::empty(20, 10)
            .with_unit(Side::Blue, 0, 0)
            .with_unit(Side::Red, 0, 1);
        let mut state = world(layout);
        state.units[1].hp = 0;
        queue(&mut state, 0, Order::step(Direction::South, 1));
        let mut dice = LoadedDice::new();

        let result = advance_unit(&mut state, 0, &mut dice).unwrap();

        assert_eq!(result.outcome, StepOutcome::Moved { to: Position::new(0, 1) });
    }

    #[test]
    fn test_move_to_straight_line_arrives() {
        let mut state = world(Layout::empty(20, 10).with_unit(Side::Blue, 3, 3));
        queue(&mut state, 0, Order::move_to(5, 3));
        let mut dice = LoadedDice::new();

        let first = advance_unit(&mut state, 0, &mut dice).unwrap();
        assert!(!first.order_finished);
        let second = advance_unit(&mut state, 0, &mut dice).unwrap();
        assert!(second.order_finished);
        assert_eq!(state.units[0].position, Position::new(5, 3));
        assert!(state.units[0].orders.is_empty());
    }

    #[test]
    fn test_move_to_diagonal_coin_flip() {
        let mut state = world(Layout::empty(20, 10).with_unit(Side::Blue, 3, 3));
        queue(&mut state, 0, Order::move_to(5, 5));
        let mut dice = LoadedDice::new().with_flips([true, false]);

        advance_unit(&mut state, 0, &mut dice);
        assert_eq!(state.units[0].position, Position::new(4, 3));
        advance_unit(&mut state, 0, &mut dice);
        assert_eq!(state.units[0].position, Position::new(4, 4));
    }

    #[test]
    fn test_move_to_aborts_at_mountain() {
        let layout = Layout::empty(20, 10)
            .with_unit(Side::Blue, 2, 8)
            .with_mountain(2, 9);
        let mut state = world(layout);
        queue(&mut state, 0, Order::move_to(2, 15));
        queue(&mut state, 0, Order::step(Direction::East, 1));
        let mut dice = LoadedDice::new();

        let result = advance_unit(&mut state, 0, &mut dice).unwrap();

        assert_eq!(result.outcome, StepOutcome::Blocked(Blocker::Terrain));
        assert!(result.order_finished);
        assert_eq!(state.units[0].position, Position::new(2, 8));
        // Only the aborted order is dropped
        assert_eq!(state.units[0].orders.len(), 1);
    }

    #[test]
    fn test_move_to_aborts_off_grid() {
        let mut state = world(Layout::empty(20, 10).with_unit(Side::Blue, 19, 4));
        queue(&mut state, 0, Order::move_to(25, 4));
        let mut dice = LoadedDice::new();

        let result = advance_unit(&mut state, 0, &mut dice).unwrap();

        assert_eq!(result.outcome, StepOutcome::Blocked(Blocker::Edge));
        assert!(state.units[0].orders.is_empty());
        assert_eq!(state.units[0].position, Position::new(19, 4));
    }

    #[test]
    fn test_move_to_blocked_by_units_is_retained() {
        let layout = Layout::empty(20, 10)
            .with_unit(Side::Blue, 0, 0)
            .with_unit(Side::Blue, 1, 0)
            .with_unit(Side::Red, 0, 1);
        let mut state = world(layout);
        queue(&mut state, 0, Order::move_to(4, 0));
        queue(&mut state, 2, Order::move_to(0, 0));
        let mut dice = LoadedDice::new().with_rolls([1, 1]);

        let friendly = advance_unit(&mut state, 0, &mut dice).unwrap();
        assert_eq!(friendly.outcome, StepOutcome::Blocked(Blocker::Friendly));
        assert_eq!(state.units[0].orders.len(), 1);

        let enemy = advance_unit(&mut state, 2, &mut dice).unwrap();
        assert!(matches!(enemy.outcome, StepOutcome::Engaged(_)));
        assert_eq!(state.units[2].orders.len(), 1);
        assert_eq!(state.units[2].position, Position::new(0, 1));
    }

    #[test]
    fn test_move_to_current_tile_completes() {
        let mut state = world(Layout::empty(20, 10).with_unit(Side::Red, 6, 6));
        queue(&mut state, 0, Order::move_to(6, 6));
        let mut dice = LoadedDice::new();

        let result = advance_unit(&mut state, 0, &mut dice).unwrap();

        assert_eq!(result.outcome, StepOutcome::Arrived);
        assert!(result.order_finished);
        assert!(state.units[0].orders.is_empty());
        assert_eq!(state.units[0].position, Position::new(6, 6));
    }

    #[test]
    fn test_move_to_extreme_targets_abort_at_edge() {
        let mut state = world(
            Layout::empty(20, 10)
                .with_unit(Side::Blue, 2, 0)
                .with_unit(Side::Red, 18, 19),
        );
        queue(&mut state, 0, Order::move_to(i32::MIN, 0));
        queue(&mut state, 1, Order::move_to(i32::MAX, i32::MAX));
        let mut dice = LoadedDice::new();

        for _ in 0..3 {
            advance_unit(&mut state, 0, &mut dice);
            advance_unit(&mut state, 1, &mut dice);
        }

        assert_eq!(state.units[0].position, Position::new(0, 0));
        assert!(state.units[0].orders.is_empty());
        // Coin comes up true, so the red unit tries x first and stops there
        assert_eq!(state.units[1].position, Position::new(19, 19));
        assert!(state.units[1].orders.is_empty());
    }

    #[test]
    fn test_dead_or_idle_unit_does_nothing() {
        let mut state = world(Layout::empty(20, 10).with_unit(Side::Blue, 0, 0));
        let mut dice = LoadedDice::new();
        assert!(advance_unit(&mut state, 0, &mut dice).is_none());

        queue(&mut state, 0, Order::step(Direction::South, 1));
        state.units[0].hp = 0;
        assert!(advance_unit(&mut state, 0, &mut dice).is_none());
        assert_eq!(state.units[0].orders.len(), 1);
    }
}
