//! Map, units and cities

pub mod layout;
pub mod state;
pub mod terrain;
pub mod unit;

pub use layout::{Layout, UnitSpawn};
pub use state::WorldState;
pub use terrain::Terrain;
pub use unit::{City, Unit};
