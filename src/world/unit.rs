//! Units and cities

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::core::types::{Position, Side};
use crate::orders::Order;

/// A combat unit with its standing order queue
///
/// Dead units (hp = 0) keep their record for reporting but are ignored by
/// occupancy, combat and capture checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    pub id: String,
    pub side: Side,
    #[serde(flatten)]
    pub position: Position,
    pub hp: u32,
    pub orders: VecDeque<Order>,
}

impl Unit {
    /// Create a unit with the side-prefixed id for `index` ("B0", "R2")
    pub fn new(side: Side, index: usize, position: Position, hp: u32) -> Self {
        Self {
            id: format!("{}{}", side.id_prefix(), index),
            side,
            position,
            hp,
            orders: VecDeque::new(),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Subtract hp, saturating at zero; returns the hp actually lost
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let before = self.hp;
        self.hp = self.hp.saturating_sub(amount);
        before - self.hp
    }

    pub fn queue_length(&self) -> usize {
        self.orders.len()
    }

    /// True if this unit is alive and blocks `pos`
    pub fn occupies(&self, pos: Position) -> bool {
        self.is_alive() && self.position == pos
    }
}

/// A city owned by one side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct City {
    pub side: Side,
    #[serde(flatten)]
    pub position: Position,
}

impl City {
    pub fn new(side: Side, x: i32, y: i32) -> Self {
        Self {
            side,
            position: Position::new(x, y),
        }
    }
}
