//! The world aggregate: every unit, city and tile of one match

use ahash::AHashMap;
use serde::Serialize;

use crate::core::types::{Position, Side, Turn};
use crate::resolve::events::TurnEvent;
use crate::resolve::victory::Winner;
use crate::world::layout::Layout;
use crate::world::terrain::Terrain;
use crate::world::unit::{City, Unit};

/// Complete state of one match
///
/// Cloning this is how snapshots are taken, so a clone is always a
/// consistent turn boundary.
#[derive(Debug, Clone, Serialize)]
pub struct WorldState {
    pub grid_size: i32,
    pub units: Vec<Unit>,
    pub cities: Vec<City>,
    #[serde(rename = "mountains")]
    pub terrain: Terrain,
    pub turn: Turn,
    pub winner: Option<Winner>,
    /// Events of the most recently resolved turn
    pub events: Vec<TurnEvent>,
    #[serde(skip)]
    unit_index: AHashMap<String, usize>,
}

impl WorldState {
    /// Build a fresh world from a layout
    pub fn from_layout(layout: &Layout) -> Self {
        let mut blue = 0;
        let mut red = 0;
        let units: Vec<Unit> = layout
            .units
            .iter()
            .map(|spawn| {
                let counter = match spawn.side {
                    Side::Blue => &mut blue,
                    Side::Red => &mut red,
                };
                let unit = Unit::new(spawn.side, *counter, spawn.position, layout.initial_hp);
                *counter += 1;
                unit
            })
            .collect();

        let unit_index = units
            .iter()
            .enumerate()
            .map(|(i, u)| (u.id.clone(), i))
            .collect();

        Self {
            grid_size: layout.grid_size,
            units,
            cities: layout.cities.clone(),
            terrain: Terrain::new(layout.mountains.iter().copied()),
            turn: 0,
            winner: None,
            events: Vec::new(),
            unit_index,
        }
    }

    pub fn index_of(&self, unit_id: &str) -> Option<usize> {
        self.unit_index.get(unit_id).copied()
    }

    pub fn unit(&self, unit_id: &str) -> Option<&Unit> {
        self.index_of(unit_id).map(|i| &self.units[i])
    }

    pub fn unit_mut(&mut self, unit_id: &str) -> Option<&mut Unit> {
        self.index_of(unit_id).map(move |i| &mut self.units[i])
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.in_bounds(self.grid_size)
    }

    /// Index of the live unit standing on `pos`, other than `except`
    pub fn live_unit_at(&self, pos: Position, except: usize) -> Option<usize> {
        self.units
            .iter()
            .enumerate()
            .find(|(i, u)| *i != except && u.occupies(pos))
            .map(|(i, _)| i)
    }

    pub fn city_count(&self, side: Side) -> usize {
        self.cities.iter().filter(|c| c.side == side).count()
    }

    pub fn city_at(&self, pos: Position) -> Option<&City> {
        self.cities.iter().find(|c| c.position == pos)
    }

    pub fn live_units(&self, side: Side) -> impl Iterator<Item = &Unit> + '_ {
        self.units
            .iter()
            .filter(move |u| u.side == side && u.is_alive())
    }

    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }
}
