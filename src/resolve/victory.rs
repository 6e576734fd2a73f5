//! Win condition

use serde::{Deserialize, Serialize};

use crate::core::types::Side;
use crate::world::unit::City;

/// Terminal result of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Winner {
    Blue,
    Red,
    /// Neither side holds a city
    Draw,
}

impl Winner {
    pub fn side(self) -> Option<Side> {
        match self {
            Winner::Blue => Some(Side::Blue),
            Winner::Red => Some(Side::Red),
            Winner::Draw => None,
        }
    }
}

impl From<Side> for Winner {
    fn from(side: Side) -> Self {
        match side {
            Side::Blue => Winner::Blue,
            Side::Red => Winner::Red,
        }
    }
}

/// A side with no cities left loses
pub fn check_victory(cities: &[City]) -> Option<Winner> {
    let blue = cities.iter().filter(|c| c.side == Side::Blue).count();
    let red = cities.iter().filter(|c| c.side == Side::Red).count();

    match (blue, red) {
        (0, 0) => Some(Winner::Draw),
        (0, _) => Some(Winner::Red),
        (_, 0) => Some(Winner::Blue),
        _ => None,
    }
}
