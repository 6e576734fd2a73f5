//! Starting layouts
//!
//! A layout is the fixed description a world is built from, both at
//! startup and on every reset.

use crate::core::config::GameConfig;
use crate::core::types::{Position, Side};
use crate::world::unit::City;

/// Where a unit deploys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitSpawn {
    pub side: Side,
    pub position: Position,
}

/// Fixed starting description of a match
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub grid_size: i32,
    pub initial_hp: u32,
    /// Deployment order is also the per-turn resolution order
    pub units: Vec<UnitSpawn>,
    pub cities: Vec<City>,
    pub mountains: Vec<Position>,
}

impl Layout {
    /// An empty board, for building custom scenarios
    pub fn empty(grid_size: i32, initial_hp: u32) -> Self {
        Self {
            grid_size,
            initial_hp,
            units: Vec::new(),
            cities: Vec::new(),
            mountains: Vec::new(),
        }
    }

    /// The standard map
    ///
    /// Blue deploys along the top row, red along the bottom row, on every
    /// second column. Each side holds two cities one row in from its edge.
    /// A jagged mountain ridge sits left of centre with gaps to pass
    /// through.
    pub fn standard(config: &GameConfig) -> Self {
        let n = config.grid_size;
        let mut layout = Self::empty(n, config.initial_hp);

        // Interleaved B0, R0, B1, R1, ...
        for i in 0..config.units_per_side as i32 {
            layout = layout
                .with_unit(Side::Blue, i * 2, 0)
                .with_unit(Side::Red, i * 2, n - 1);
        }

        layout = layout
            .with_city(Side::Blue, 7, 1)
            .with_city(Side::Blue, 12, 1)
            .with_city(Side::Red, 7, n - 2)
            .with_city(Side::Red, 12, n - 2);

        // Ridge peaks on row 8, valleys on row 10
        for x in 2..=8 {
            if x % 3 == 0 {
                layout = layout.with_mountain(x, 8);
            }
            if x % 2 == 0 {
                layout = layout.with_mountain(x, 10);
            }
        }

        // Thicker cluster around x = 4
        layout
            .with_mountain(4, 8)
            .with_mountain(4, 11)
            .with_mountain(5, 11)
    }

    pub fn with_unit(mut self, side: Side, x: i32, y: i32) -> Self {
        self.units.push(UnitSpawn {
            side,
            position: Position::new(x, y),
        });
        self
    }

    pub fn with_city(mut self, side: Side, x: i32, y: i32) -> Self {
        self.cities.push(City::new(side, x, y));
        self
    }

    pub fn with_mountain(mut self, x: i32, y: i32) -> Self {
        self.mountains.push(Position::new(x, y));
        self
    }
}
