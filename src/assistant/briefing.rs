//! Render world snapshots as text for an assistant prompt
//!
//! The map uses one character per empty tile:
//! `.` open ground, `^` mountain, `C` blue city, `c` red city. Live units
//! are drawn by id (blue upper case, red lower case) over cities.

use crate::core::types::{Position, Side};
use crate::world::state::WorldState;

/// Draw the grid with row numbers and a column-digit footer
pub fn render_map(state: &WorldState) -> String {
    let n = state.grid_size.max(0) as usize;
    let mut grid: Vec<Vec<String>> = vec![vec![".".to_string(); n]; n];

    let mut put = |pos: Position, symbol: String| {
        if pos.in_bounds(state.grid_size) {
            grid[pos.y as usize][pos.x as usize] = symbol;
        }
    };

    for &pos in state.terrain.tiles() {
        put(pos, "^".into());
    }
    for city in &state.cities {
        let symbol = match city.side {
            Side::Blue => "C",
            Side::Red => "c",
        };
        put(city.position, symbol.into());
    }
    for unit in state.units.iter().filter(|u| u.is_alive()) {
        let symbol = match unit.side {
            Side::Blue => unit.id.clone(),
            Side::Red => unit.id.to_lowercase(),
        };
        put(unit.position, symbol);
    }

    let mut out: Vec<String> = grid
        .iter()
        .enumerate()
        .map(|(i, row)| format!("{:>2} {}", i, row.concat()))
        .collect();
    let footer: String = (0..n).map(|i| char::from(b'0' + (i % 10) as u8)).collect();
    out.push(format!("   {}", footer));
    out.join("\n")
}

/// Situation report from one side's point of view
#[derive(Debug, Clone)]
pub struct Briefing {
    pub side: Side,
    pub turn: u64,
    pub map: String,
    pub friendly_units: Vec<String>,
    pub enemy_units: Vec<String>,
    pub friendly_cities: Vec<Position>,
    pub enemy_cities: Vec<Position>,
    pub mountains: Vec<Position>,
}

impl Briefing {
    pub fn from_snapshot(state: &WorldState, side: Side) -> Self {
        let describe = |s: Side| -> Vec<String> {
            state
                .live_units(s)
                .map(|u| format!("{}:{} HP:{}", u.id, u.position, u.hp))
                .collect()
        };
        let cities = |s: Side| -> Vec<Position> {
            state
                .cities
                .iter()
                .filter(|c| c.side == s)
                .map(|c| c.position)
                .collect()
        };

        Self {
            side,
            turn: state.turn,
            map: render_map(state),
            friendly_units: describe(side),
            enemy_units: describe(side.opponent()),
            friendly_cities: cities(side),
            enemy_cities: cities(side.opponent()),
            mountains: state.terrain.tiles().to_vec(),
        }
    }

    /// Prompt-ready text: map, coordinates and rules
    pub fn summary(&self) -> String {
        let join = |p: &[Position]| {
            p.iter()
                .map(|p| p.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        };
        let enemy = self.side.opponent();

        let mut s = String::new();
        s.push_str(&format!(
            "You command the {} side. Turn {}. Coordinates are (x,y) with (0,0) at the top-left.\n",
            self.side, self.turn
        ));
        s.push_str("\nMAP\n");
        s.push_str(&self.map);
        s.push('\n');

        s.push_str("\nPOSITIONS\n");
        s.push_str(&format!("Your units: {}\n", self.friendly_units.join(", ")));
        s.push_str(&format!("Enemy units: {}\n", self.enemy_units.join(", ")));
        s.push_str(&format!("Your cities: {}\n", join(&self.friendly_cities)));
        s.push_str(&format!("Enemy cities: {}\n", join(&self.enemy_cities)));
        s.push_str(&format!("Mountains: {}\n", join(&self.mountains)));

        s.push_str("\nRULES\n");
        s.push_str("- Each unit steps one tile north, south, east or west per turn. Mountains (^) block movement.\n");
        s.push_str("- Stepping into an enemy unit makes both units lose 1-6 HP; neither moves.\n");
        s.push_str("- Standing on an enemy city captures it.\n");
        s.push_str(&format!(
            "- You win when the {} side holds no cities.\n",
            enemy
        ));
        s.push_str("- Orders queue up per unit and run in sequence.\n");
        s.push_str("\nCall the issue_orders tool once with every order you want to give.\n");
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::layout::Layout;

    fn small() -> WorldState {
        let layout = Layout::empty(13, 10)
            .with_unit(Side::Blue, 0, 0)
            .with_unit(Side::Red, 7, 11)
            .with_city(Side::Blue, 7, 1)
            .with_city(Side::Red, 7, 11)
            .with_mountain(3, 5);
        WorldState::from_layout(&layout)
    }

    #[test]
    fn test_map_symbols() {
        let map = render_map(&small());
        let rows: Vec<&str> = map.lines().collect();
        assert_eq!(rows.len(), 14);
        assert!(rows[0].starts_with(" 0 B0"));
        assert_eq!(&rows[1][3..], ".......C.....");
        assert_eq!(&rows[5][3..], "...^.........");
        // The red unit hides its own city
        assert!(rows[11].contains("r0"));
        assert!(!rows[11].contains('c'));
        assert_eq!(rows[13], "   0123456789012");
    }

    #[test]
    fn test_dead_units_not_drawn() {
        let mut state = small();
        state.units[0].hp = 0;
        let map = render_map(&state);
        assert!(!map.contains("B0"));
    }

    #[test]
    fn test_briefing_lists_both_sides() {
        let briefing = Briefing::from_snapshot(&small(), Side::Red);
        assert_eq!(briefing.friendly_units, vec!["R0:(7,11) HP:10".to_string()]);
        assert_eq!(briefing.enemy_units, vec!["B0:(0,0) HP:10".to_string()]);

        let text = briefing.summary();
        assert!(text.contains("You command the red side"));
        assert!(text.contains("Enemy cities: (7,1)"));
        assert!(text.contains("Mountains: (3,5)"));
    }
}
