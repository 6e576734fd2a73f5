//! Order representation and the wire schema orders arrive in
//!
//! Every origin (CLI, direct API, assistant tool calls) goes through
//! [`OrderRequest::into_order`], so validation is identical regardless of
//! who issued the order.

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, WarError};
use crate::core::types::{Direction, Position};

/// A queued unit order
///
/// Only `tiles_remaining` of a `Move` is ever mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Order {
    /// Step in a fixed direction for a number of turns
    Move {
        direction: Direction,
        #[serde(rename = "tiles")]
        tiles_remaining: u32,
    },
    /// Walk toward a fixed tile, one axis-aligned step per turn
    MoveTo { target: Position },
}

impl Order {
    pub fn step(direction: Direction, tiles: u32) -> Self {
        Order::Move {
            direction,
            tiles_remaining: tiles,
        }
    }

    pub fn move_to(x: i32, y: i32) -> Self {
        Order::MoveTo {
            target: Position::new(x, y),
        }
    }

    /// Check the shape rules that apply at submission time
    pub fn validate(&self) -> Result<()> {
        match self {
            Order::Move {
                tiles_remaining, ..
            } if *tiles_remaining == 0 => Err(WarError::InvalidOrder(
                "move requires tiles >= 1".into(),
            )),
            _ => Ok(()),
        }
    }
}

/// Target coordinates as they appear on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetRequest {
    pub x: i32,
    pub y: i32,
}

/// An order submission before validation
///
/// ```json
/// { "unit": "B1", "action": "move", "direction": "s", "tiles": 3 }
/// { "unit": "B2", "action": "move_to", "target": { "x": 5, "y": 5 } }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub unit: String,
    pub action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tiles: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<TargetRequest>,
}

impl OrderRequest {
    pub fn movement(unit: &str, direction: &str, tiles: i64) -> Self {
        Self {
            unit: unit.to_string(),
            action: "move".into(),
            direction: Some(direction.to_string()),
            tiles: Some(tiles),
            target: None,
        }
    }

    pub fn move_to(unit: &str, x: i32, y: i32) -> Self {
        Self {
            unit: unit.to_string(),
            action: "move_to".into(),
            direction: None,
            tiles: None,
            target: Some(TargetRequest { x, y }),
        }
    }

    /// Parse a JSON submission, reporting schema failures as invalid orders
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| WarError::InvalidOrder(e.to_string()))
    }

    /// Parse an already-decoded JSON value
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| WarError::InvalidOrder(e.to_string()))
    }

    /// Convert to a validated order
    pub fn into_order(&self) -> Result<Order> {
        let order = match self.action.as_str() {
            "move" => {
                let name = self
                    .direction
                    .as_deref()
                    .ok_or_else(|| WarError::InvalidOrder("move requires a direction".into()))?;
                let direction = Direction::parse(name).ok_or_else(|| {
                    WarError::InvalidOrder(format!("unknown direction '{}'", name))
                })?;
                let tiles = self
                    .tiles
                    .ok_or_else(|| WarError::InvalidOrder("move requires tiles".into()))?;
                if tiles < 1 {
                    return Err(WarError::InvalidOrder(format!(
                        "move requires tiles >= 1, got {}",
                        tiles
                    )));
                }
                let tiles = u32::try_from(tiles).map_err(|_| {
                    WarError::InvalidOrder(format!("tiles {} out of range", tiles))
                })?;
                Order::step(direction, tiles)
            }
            "move_to" => {
                let target = self
                    .target
                    .ok_or_else(|| WarError::InvalidOrder("move_to requires a target".into()))?;
                Order::move_to(target.x, target.y)
            }
            other => {
                return Err(WarError::InvalidOrder(format!("unknown action '{}'", other)));
            }
        };

        order.validate()?;
        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_request_converts() {
        let req = OrderRequest::from_json(r#"{"unit":"B1","action":"move","direction":"s","tiles":3}"#)
            .unwrap();
        assert_eq!(req.into_order().unwrap(), Order::step(Direction::South, 3));
    }

    #[test]
    fn test_move_to_request_converts() {
        let req = OrderRequest::from_json(
            r#"{"unit":"B2","action":"move_to","target":{"x":5,"y":-2}}"#,
        )
        .unwrap();
        // Out-of-grid targets are accepted here and aborted during resolution
        assert_eq!(req.into_order().unwrap(), Order::move_to(5, -2));
    }

    #[test]
    fn test_rejects_zero_tiles() {
        let err = OrderRequest::movement("B0", "n", 0).into_order().unwrap_err();
        assert!(matches!(err, WarError::InvalidOrder(_)));
    }

    #[test]
    fn test_rejects_unknown_direction() {
        let err = OrderRequest::movement("B0", "up", 2).into_order().unwrap_err();
        assert!(err.to_string().contains("unknown direction"));
    }

    #[test]
    fn test_rejects_long_direction_names() {
        for name in ["north", "South", "E"] {
            let err = OrderRequest::movement("B0", name, 1).into_order().unwrap_err();
            assert!(matches!(err, WarError::InvalidOrder(_)), "{} accepted", name);
        }
    }

    #[test]
    fn test_rejects_unknown_action() {
        let req = OrderRequest::from_json(r#"{"unit":"B0","action":"attack"}"#).unwrap();
        assert!(req.into_order().is_err());
    }

    #[test]
    fn test_rejects_missing_target() {
        let req = OrderRequest::from_json(r#"{"unit":"B0","action":"move_to"}"#).unwrap();
        assert!(req.into_order().is_err());
    }

    #[test]
    fn test_fractional_target_is_schema_error() {
        let err = OrderRequest::from_json(
            r#"{"unit":"B0","action":"move_to","target":{"x":1.5,"y":2}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, WarError::InvalidOrder(_)));
    }

    #[test]
    fn test_order_wire_shape() {
        let json = serde_json::to_value(Order::step(Direction::East, 2)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"action": "move", "direction": "e", "tiles": 2})
        );

        let json = serde_json::to_value(Order::move_to(3, 4)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"action": "move_to", "target": {"x": 3, "y": 4}})
        );
    }
}
