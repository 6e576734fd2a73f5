//! Grid Wargame - tick-driven two-sided grid battles
//!
//! Units queue movement orders; every turn each unit executes one step,
//! colliding with mountains, enemy units and cities, until one side has no
//! cities left.

pub mod assistant;
pub mod core;
pub mod orders;
pub mod resolve;
pub mod simulation;
pub mod world;
