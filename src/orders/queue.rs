//! Per-unit order queues
//!
//! Orders are validated here, at submission, never at resolution time.
//! A submission appends; it never replaces what is already queued.

use serde::Serialize;

use crate::core::error::{Result, WarError};
use crate::core::types::Side;
use crate::orders::order::Order;
use crate::world::state::WorldState;
use crate::world::unit::Unit;

/// Returned to the caller of a successful submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderReceipt {
    pub unit: Unit,
    pub queue_length: usize,
}

/// Check that `unit_id` exists and is alive, returning its index
pub fn ensure_commandable(state: &WorldState, unit_id: &str) -> Result<usize> {
    let idx = state
        .index_of(unit_id)
        .ok_or_else(|| WarError::UnknownUnit(unit_id.to_string()))?;
    if !state.units[idx].is_alive() {
        return Err(WarError::DeadUnit(unit_id.to_string()));
    }
    Ok(idx)
}

/// Like [`ensure_commandable`], and additionally require the unit to belong to `side`
pub fn ensure_commandable_by(state: &WorldState, unit_id: &str, side: Side) -> Result<usize> {
    let idx = ensure_commandable(state, unit_id)?;
    if state.units[idx].side != side {
        return Err(WarError::NotCommanded {
            unit: unit_id.to_string(),
            side,
        });
    }
    Ok(idx)
}

/// Validate `order` and append it to the unit's queue
pub fn submit(state: &mut WorldState, unit_id: &str, order: Order) -> Result<OrderReceipt> {
    let idx = ensure_commandable(state, unit_id)?;
    order.validate()?;

    let unit = &mut state.units[idx];
    unit.orders.push_back(order);
    tracing::debug!("Queued order for {} (queue length {})", unit.id, unit.queue_length());

    Ok(OrderReceipt {
        unit: unit.clone(),
        queue_length: unit.queue_length(),
    })
}
