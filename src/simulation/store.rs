//! The guarded world store
//!
//! All access to a running match goes through [`WorldStore`]. One mutex
//! covers the world and the dice, and every operation holds it from start
//! to finish:
//!
//! - `fire_turn` resolves a full turn
//! - `submit` validates and appends an order
//! - `snapshot` clones the whole world
//! - `reset` swaps in a freshly built world
//!
//! Readers therefore only ever see turn boundaries, and an order submitted
//! while a turn is resolving lands after that turn.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::core::config::GameConfig;
use crate::core::error::Result;
use crate::core::types::Side;
use crate::orders::{self, Order, OrderReceipt, OrderRequest};
use crate::resolve::dice::{Dice, SeededDice};
use crate::resolve::turn::{resolve_turn, TurnReport};
use crate::simulation::scheduler::TurnDriver;
use crate::world::layout::Layout;
use crate::world::state::WorldState;

struct Inner {
    state: WorldState,
    dice: Box<dyn Dice>,
}

/// Shared, serialized access to one match
pub struct WorldStore {
    layout: Layout,
    inner: Mutex<Inner>,
}

impl WorldStore {
    /// Standard map with dice seeded from the config
    pub fn new(config: &GameConfig) -> Self {
        let dice = SeededDice::from_seed_or_entropy(config.seed);
        tracing::info!("World dice seed: {}", dice.seed());
        Self::with_layout(Layout::standard(config), Box::new(dice))
    }

    /// Custom starting layout and random source
    pub fn with_layout(layout: Layout, dice: Box<dyn Dice>) -> Self {
        let state = WorldState::from_layout(&layout);
        Self {
            layout,
            inner: Mutex::new(Inner { state, dice }),
        }
    }

    // A panic can only come from a bug mid-operation; the world is still
    // structurally valid, so keep serving it
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Validate and queue an order from the wire schema
    pub fn submit(&self, request: &OrderRequest) -> Result<OrderReceipt> {
        let mut inner = self.lock();
        // Unit errors take precedence over field errors; `orders::submit`
        // repeats this check for callers that skip the wire schema
        orders::ensure_commandable(&inner.state, &request.unit)?;
        let order = request.into_order()?;
        orders::submit(&mut inner.state, &request.unit, order)
    }

    /// Like [`WorldStore::submit`], but only for units of `side`
    pub fn submit_as(&self, side: Side, request: &OrderRequest) -> Result<OrderReceipt> {
        let mut inner = self.lock();
        orders::ensure_commandable_by(&inner.state, &request.unit, side)?;
        let order = request.into_order()?;
        orders::submit(&mut inner.state, &request.unit, order)
    }

    /// Queue an already-built order
    pub fn submit_order(&self, unit_id: &str, order: Order) -> Result<OrderReceipt> {
        let mut inner = self.lock();
        orders::submit(&mut inner.state, unit_id, order)
    }

    /// Consistent copy of the whole world at a turn boundary
    pub fn snapshot(&self) -> WorldState {
        self.lock().state.clone()
    }

    /// Discard the match and rebuild the starting layout
    pub fn reset(&self) {
        let fresh = WorldState::from_layout(&self.layout);
        let mut inner = self.lock();
        tracing::info!("World reset at turn {}", inner.state.turn);
        inner.state = fresh;
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }
}

impl TurnDriver for WorldStore {
    fn fire_turn(&self) -> TurnReport {
        let mut guard = self.lock();
        let Inner { state, dice } = &mut *guard;
        resolve_turn(state, dice.as_mut())
    }
}
