//! The `issue_orders` tool
//!
//! An assistant answers with a single tool call whose arguments carry an
//! array of orders in the ordinary wire schema. Each one is submitted
//! through the store exactly like a direct submission, restricted to the
//! side the assistant commands.
//!
//! That restriction enforces the schema's unit enum: an order for a unit
//! outside the enum is refused with `NotCommanded` even though a direct
//! submission for the same unit would be accepted.

use serde::Serialize;
use serde_json::{json, Value};

use crate::core::error::{Result, WarError};
use crate::core::types::Side;
use crate::orders::OrderRequest;
use crate::simulation::store::WorldStore;
use crate::world::state::WorldState;

pub const ISSUE_ORDERS: &str = "issue_orders";

/// Function-tool schema offered to the assistant
///
/// The unit enum lists the commanded side's live units.
pub fn issue_orders_tool(state: &WorldState, side: Side) -> Value {
    let unit_ids: Vec<&str> = state.live_units(side).map(|u| u.id.as_str()).collect();
    let max = state.grid_size - 1;

    json!({
        "type": "function",
        "function": {
            "name": ISSUE_ORDERS,
            "description": format!("Issue movement orders for {} units", side),
            "parameters": {
                "type": "object",
                "properties": {
                    "orders": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "properties": {
                                "unit": {
                                    "type": "string",
                                    "description": "Unit ID",
                                    "enum": unit_ids
                                },
                                "action": {
                                    "type": "string",
                                    "description": "Type of movement",
                                    "enum": ["move", "move_to"]
                                },
                                "direction": {
                                    "type": "string",
                                    "description": "Direction to move (for 'move')",
                                    "enum": ["n", "s", "e", "w"]
                                },
                                "tiles": {
                                    "type": "integer",
                                    "description": "Number of tiles to move (for 'move')",
                                    "minimum": 1,
                                    "maximum": state.grid_size
                                },
                                "target": {
                                    "type": "object",
                                    "description": "Target coordinates (for 'move_to')",
                                    "properties": {
                                        "x": { "type": "integer", "minimum": 0, "maximum": max },
                                        "y": { "type": "integer", "minimum": 0, "maximum": max }
                                    },
                                    "required": ["x", "y"]
                                }
                            },
                            "required": ["unit", "action"]
                        }
                    }
                },
                "required": ["orders"]
            }
        }
    })
}

/// Result of one order inside a tool call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolOrderOutcome {
    pub unit: Option<String>,
    pub accepted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub queue_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ToolOrderOutcome {
    fn rejected(unit: Option<String>, error: WarError) -> Self {
        Self {
            unit,
            accepted: false,
            queue_length: None,
            error: Some(error.to_string()),
        }
    }
}

/// Submit every order of an `issue_orders` call on behalf of `side`
///
/// Fails only when the arguments are not an object with an `orders`
/// array. Individual bad orders are reported per entry and do not stop
/// the rest of the batch.
pub fn apply_tool_call(
    store: &WorldStore,
    side: Side,
    arguments: &str,
) -> Result<Vec<ToolOrderOutcome>> {
    let args: Value = serde_json::from_str(arguments)?;
    let orders = args
        .get("orders")
        .and_then(Value::as_array)
        .ok_or_else(|| WarError::InvalidOrder("tool call needs an 'orders' array".into()))?;

    let outcomes = orders
        .iter()
        .map(|entry| {
            let unit = entry.get("unit").and_then(Value::as_str).map(str::to_string);
            let result = OrderRequest::from_value(entry.clone())
                .and_then(|request| store.submit_as(side, &request));
            match result {
                Ok(receipt) => ToolOrderOutcome {
                    unit,
                    accepted: true,
                    queue_length: Some(receipt.queue_length),
                    error: None,
                },
                Err(e) => {
                    tracing::debug!("Tool order rejected: {}", e);
                    ToolOrderOutcome::rejected(unit, e)
                }
            }
        })
        .collect();

    Ok(outcomes)
}
