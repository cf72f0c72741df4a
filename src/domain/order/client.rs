//! Orders sub-client — load, refresh, listing, stats, health check.

use crate::api::OrdersApi;
use crate::client::DashboardClient;
use crate::domain::order::listing::{self, ListingPage, ListingQuery};
use crate::domain::order::{DashboardStats, Order, OrderStore, OrdersQuery};
use crate::error::DashboardError;
use crate::shared::OrderId;

/// Backend reachability as shown in the header badge.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiStatus {
    Online { total: u64 },
    Error(String),
}

impl ApiStatus {
    pub fn is_online(&self) -> bool {
        matches!(self, ApiStatus::Online { .. })
    }
}

/// Sub-client for the order cache.
pub struct Orders<'a, A: OrdersApi> {
    pub(crate) client: &'a DashboardClient<A>,
}

impl<'a, A: OrdersApi> Orders<'a, A> {
    /// Load one page into the store.
    ///
    /// Returns `Ok(false)` when a later load started while this one was in
    /// flight; its result is dropped.
    pub async fn load(&self, query: OrdersQuery) -> Result<bool, DashboardError> {
        query.validate()?;
        let ticket = self.client.store.write().await.begin_load(query.clone());
        tracing::debug!(
            ticket = ticket.seq(),
            limit = query.limit,
            offset = query.offset,
            "Loading orders"
        );

        let page = match self.client.api.list_orders(&query).await {
            Ok(page) => page,
            Err(err) => {
                tracing::warn!(ticket = ticket.seq(), "Order load failed: {}", err);
                return Err(err.into());
            }
        };

        let count = page.items.len();
        let total = page.total;
        let applied = self.client.store.write().await.apply_load(ticket, page);
        if applied {
            tracing::info!(count, total, "Orders loaded");
        }
        Ok(applied)
    }

    /// Load server page `page` (1-based) with the last query's limit and filters.
    pub async fn load_page(&self, page: u32) -> Result<bool, DashboardError> {
        let base = self.current_query().await;
        let offset = page.saturating_sub(1).saturating_mul(base.limit);
        self.load(base.with_offset(offset)).await
    }

    /// Re-run the last successfully applied query, or the configured default.
    pub async fn refresh(&self) -> Result<bool, DashboardError> {
        let query = self.current_query().await;
        self.load(query).await
    }

    async fn current_query(&self) -> OrdersQuery {
        self.client
            .store
            .read()
            .await
            .last_query()
            .cloned()
            .unwrap_or_else(|| self.client.default_query.clone())
    }

    /// Copy of the store for rendering outside the lock.
    pub async fn snapshot(&self) -> OrderStore {
        self.client.store.read().await.clone()
    }

    pub async fn get(&self, id: OrderId) -> Option<Order> {
        self.client.store.read().await.get(id).cloned()
    }

    pub async fn total(&self) -> u64 {
        self.client.store.read().await.total()
    }

    /// Server-side page count at the current list limit.
    pub async fn page_count(&self) -> u64 {
        let limit = self.current_query().await.limit;
        self.client.store.read().await.page_count(limit)
    }

    /// Filtered, sorted, paginated view of the loaded orders.
    pub async fn listing(&self, query: &ListingQuery) -> ListingPage {
        let store = self.client.store.read().await;
        listing::derive(store.orders(), query, self.client.page_size).into_owned()
    }

    pub async fn stats(&self) -> DashboardStats {
        let store = self.client.store.read().await;
        DashboardStats::from_orders(store.orders(), store.total())
    }

    /// Probe the backend with a one-item list request. Leaves the store alone.
    pub async fn check_api(&self) -> ApiStatus {
        let probe = OrdersQuery::new().with_limit(1).with_offset(0);
        match self.client.api.list_orders(&probe).await {
            Ok(page) => ApiStatus::Online { total: page.total },
            Err(err) => {
                tracing::warn!("API health check failed: {}", err);
                ApiStatus::Error(err.user_message())
            }
        }
    }
}
