//! Selection sub-client — select/clear plus the map and list reactions.

use crate::api::OrdersApi;
use crate::client::DashboardClient;
use crate::domain::order::listing::ListingPage;
use crate::domain::order::Order;
use crate::domain::selection::{FlyTo, MapOverlay};
use crate::shared::{Coordinates, OrderId};

/// Sub-client for the shared selection.
pub struct Selection<'a, A: OrdersApi> {
    pub(crate) client: &'a DashboardClient<A>,
}

impl<'a, A: OrdersApi> Selection<'a, A> {
    /// Select `id` (from a map marker or a list row). Returns whether it changed.
    pub async fn select(&self, id: OrderId) -> bool {
        let changed = self.client.selection.write().await.select(id);
        if changed {
            tracing::debug!(%id, "Order selected");
        }
        changed
    }

    pub async fn clear(&self) -> bool {
        self.client.selection.write().await.clear()
    }

    pub async fn selected_id(&self) -> Option<OrderId> {
        self.client.selection.read().await.selected()
    }

    pub async fn revision(&self) -> u64 {
        self.client.selection.read().await.revision()
    }

    /// The selected order, if it is loaded.
    pub async fn selected(&self) -> Option<Order> {
        let selection = self.client.selection.read().await;
        let store = self.client.store.read().await;
        selection.resolve(&store).cloned()
    }

    pub async fn fly_to(&self) -> Option<FlyTo> {
        let selection = self.client.selection.read().await;
        let store = self.client.store.read().await;
        selection.fly_to(&store)
    }

    pub async fn highlighted_row(&self, page: &ListingPage) -> Option<usize> {
        self.client.selection.read().await.highlighted_row_in(page)
    }

    pub async fn overlay(&self, pointer: Option<Coordinates>) -> MapOverlay {
        let selected = self.selected().await;
        MapOverlay::new(selected.as_ref(), pointer)
    }
}
