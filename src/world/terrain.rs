//! Impassable terrain tiles
//!
//! Established once when a world is built and never mutated. Uses an
//! AHashSet for O(1) lookup plus a sorted list for stable reporting.

use ahash::AHashSet;
use serde::{Serialize, Serializer};

use crate::core::types::Position;

/// Set of mountain tiles that block movement
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Terrain {
    tiles: Vec<Position>,
    blocked: AHashSet<Position>,
}

impl Terrain {
    /// Build terrain from mountain positions; duplicates collapse
    pub fn new(mountains: impl IntoIterator<Item = Position>) -> Self {
        let mut tiles: Vec<Position> = mountains.into_iter().collect();
        tiles.sort_unstable();
        tiles.dedup();
        let blocked = tiles.iter().copied().collect();
        Self { tiles, blocked }
    }

    pub fn is_blocked(&self, pos: Position) -> bool {
        self.blocked.contains(&pos)
    }

    /// Mountain tiles in (x, y) order
    pub fn tiles(&self) -> &[Position] {
        &self.tiles
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}

impl Serialize for Terrain {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.tiles.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blocked_lookup() {
        let terrain = Terrain::new([Position::new(2, 9), Position::new(3, 8)]);
        assert!(terrain.is_blocked(Position::new(2, 9)));
        assert!(!terrain.is_blocked(Position::new(2, 8)));
    }

    #[test]
    fn test_duplicates_collapse() {
        let terrain = Terrain::new([
            Position::new(4, 8),
            Position::new(1, 1),
            Position::new(4, 8),
        ]);
        assert_eq!(terrain.len(), 2);
        assert_eq!(terrain.tiles(), &[Position::new(1, 1), Position::new(4, 8)]);
    }

    #[test]
    fn test_serializes_as_tile_list() {
        let terrain = Terrain::new([Position::new(5, 11)]);
        let json = serde_json::to_value(&terrain).unwrap();
        assert_eq!(json, serde_json::json!([{"x": 5, "y": 11}]));
    }
}
