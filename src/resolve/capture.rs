//! City capture
//!
//! A live unit standing on a city of the other side takes ownership of
//! it. The capturing unit survives.

use crate::core::types::Side;
use crate::resolve::events::TurnEvent;
use crate::world::state::WorldState;

/// Transfer every city occupied by a non-owning live unit
///
/// Returns the number of captures made.
pub fn resolve_captures(state: &mut WorldState) -> usize {
    let WorldState {
        units,
        cities,
        events,
        ..
    } = state;

    let mut captures = 0;
    for city in cities.iter_mut() {
        let owner = city.side;
        let capturers: Vec<(String, Side)> = units
            .iter()
            .filter(|u| u.occupies(city.position) && u.side != owner)
            .map(|u| (u.id.clone(), u.side))
            .collect();

        for (id, side) in capturers {
            tracing::info!("{} captured the {} city at {}", id, owner, city.position);
            events.push(TurnEvent::Captured {
                at: city.position,
                by: id,
                from: owner,
            });
            city.side = side;
            captures += 1;
        }
    }
    captures
}
