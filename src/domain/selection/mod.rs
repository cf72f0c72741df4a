//! Selection domain — the one selected order shared by the map and the list.

pub mod client;
pub mod viewport;

use crate::domain::order::listing::ListingPage;
use crate::domain::order::{Order, OrderPage, OrderStore};
use crate::shared::OrderId;

pub use viewport::{FlyTo, MapOverlay, MapViewport};

/// Holds at most one selected order id.
///
/// The map and the list both read from here; neither keeps a copy. The
/// selection may point at an id that is not (or no longer) loaded, in which
/// case [`resolve`](Self::resolve) yields `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionCoordinator {
    selected: Option<OrderId>,
    revision: u64,
}

impl SelectionCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select `id`. Returns whether the selection changed; selecting the
    /// current id again is a no-op.
    pub fn select(&mut self, id: OrderId) -> bool {
        if self.selected == Some(id) {
            return false;
        }
        self.selected = Some(id);
        self.revision += 1;
        true
    }

    pub fn clear(&mut self) -> bool {
        if self.selected.take().is_none() {
            return false;
        }
        self.revision += 1;
        true
    }

    pub fn selected(&self) -> Option<OrderId> {
        self.selected
    }

    pub fn is_selected(&self, id: OrderId) -> bool {
        self.selected == Some(id)
    }

    /// Moves only when the selected id changes.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn resolve<'s>(&self, store: &'s OrderStore) -> Option<&'s Order> {
        self.selected.and_then(|id| store.get(id))
    }

    /// Camera move for the selected order, if it is loaded and positioned.
    pub fn fly_to(&self, store: &OrderStore) -> Option<FlyTo> {
        self.resolve(store)
            .and_then(|order| FlyTo::towards(order.coordinates()))
    }

    /// Row to highlight within the visible page. Never changes the page.
    pub fn highlighted_row(&self, page: &OrderPage<'_>) -> Option<usize> {
        self.selected.and_then(|id| page.position_of(id))
    }

    pub fn highlighted_row_in(&self, page: &ListingPage) -> Option<usize> {
        self.selected.and_then(|id| page.position_of(id))
    }
}
