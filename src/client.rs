//! High-level client — `DashboardClient` with nested sub-client accessors.
//!
//! Each domain has its own sub-client in `domain/<name>/client.rs`.
//! This module keeps the builder, the shared state, and the accessor methods.

use crate::api::OrdersApi;
use crate::domain::create::client::Create;
use crate::domain::create::CreateWorkflow;
use crate::domain::import::client::Import;
use crate::domain::import::ImportWorkflow;
use crate::domain::order::client::Orders;
use crate::domain::order::listing::PAGE_SIZE;
use crate::domain::order::{OrderStore, OrdersQuery};
use crate::domain::selection::client::Selection;
use crate::domain::selection::SelectionCoordinator;
#[cfg(feature = "http")]
use crate::error::DashboardError;
#[cfg(feature = "http")]
use crate::http::DashboardHttp;

use async_lock::{Mutex, RwLock};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;

// Re-export sub-client types for convenience.
pub use crate::domain::create::client::Create as CreateClient;
pub use crate::domain::import::client::Import as ImportClient;
pub use crate::domain::order::client::Orders as OrdersClient;
pub use crate::domain::selection::client::Selection as SelectionClient;

/// The primary entry point of the dashboard core.
///
/// Provides nested sub-client accessors for each concern:
/// `client.orders()`, `client.create()`, `client.import()`,
/// `client.selection()`. Clones share all state.
pub struct DashboardClient<A: OrdersApi> {
    pub(crate) api: Arc<A>,
    /// Loaded orders; the single source for map and list.
    pub(crate) store: Arc<RwLock<OrderStore>>,
    pub(crate) selection: Arc<RwLock<SelectionCoordinator>>,
    pub(crate) create: Arc<Mutex<CreateWorkflow>>,
    pub(crate) import: Arc<Mutex<ImportWorkflow>>,
    /// Query used by `refresh()` before any explicit load.
    pub(crate) default_query: OrdersQuery,
    /// Rows per page in the list view.
    pub(crate) page_size: usize,
}

#[cfg(feature = "http")]
impl DashboardClient<DashboardHttp> {
    pub fn builder() -> DashboardClientBuilder {
        DashboardClientBuilder::default()
    }
}

impl<A: OrdersApi> DashboardClient<A> {
    /// Wrap an existing transport with default settings.
    pub fn with_api(api: A) -> Self {
        DashboardClientBuilder::default().build_with(api)
    }

    // ── Sub-client accessors ─────────────────────────────────────────────

    pub fn orders(&self) -> Orders<'_, A> {
        Orders { client: self }
    }

    pub fn create(&self) -> Create<'_, A> {
        Create { client: self }
    }

    pub fn import(&self) -> Import<'_, A> {
        Import { client: self }
    }

    pub fn selection(&self) -> Selection<'_, A> {
        Selection { client: self }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn default_query(&self) -> &OrdersQuery {
        &self.default_query
    }
}

impl<A: OrdersApi> Clone for DashboardClient<A> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            store: self.store.clone(),
            selection: self.selection.clone(),
            create: self.create.clone(),
            import: self.import.clone(),
            default_query: self.default_query.clone(),
            page_size: self.page_size,
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

#[cfg_attr(not(feature = "http"), allow(dead_code))]
pub struct DashboardClientBuilder {
    base_url: String,
    timeout: Duration,
    default_query: OrdersQuery,
    page_size: usize,
}

impl Default for DashboardClientBuilder {
    fn default() -> Self {
        Self {
            base_url: crate::network::DEFAULT_API_URL.to_string(),
            timeout: crate::network::DEFAULT_TIMEOUT,
            default_query: OrdersQuery::default(),
            page_size: PAGE_SIZE,
        }
    }
}

impl DashboardClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = url.to_string();
        self
    }

    /// Base URL from `TAX_DASHBOARD_API_URL`, else the default.
    pub fn base_url_from_env(mut self) -> Self {
        self.base_url = crate::network::api_url_from_env();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// `limit` sent with every list load.
    pub fn list_limit(mut self, limit: u32) -> Self {
        self.default_query.limit = limit;
        self
    }

    pub fn date_range(mut self, from: Option<DateTime<Utc>>, to: Option<DateTime<Utc>>) -> Self {
        self.default_query.date_from = from;
        self.default_query.date_to = to;
        self
    }

    pub fn subtotal_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.default_query.min_subtotal = min;
        self.default_query.max_subtotal = max;
        self
    }

    /// Rows per page in the list view.
    pub fn page_size(mut self, size: usize) -> Self {
        self.page_size = size.max(1);
        self
    }

    /// Build against the HTTP backend at `base_url`.
    #[cfg(feature = "http")]
    pub fn build(self) -> Result<DashboardClient<DashboardHttp>, DashboardError> {
        let http = DashboardHttp::with_timeout(&self.base_url, self.timeout)?;
        Ok(self.build_with(http))
    }

    /// Build around any transport (a fake in tests).
    pub fn build_with<A: OrdersApi>(self, api: A) -> DashboardClient<A> {
        DashboardClient {
            api: Arc::new(api),
            store: Arc::new(RwLock::new(OrderStore::new())),
            selection: Arc::new(RwLock::new(SelectionCoordinator::new())),
            create: Arc::new(Mutex::new(CreateWorkflow::new())),
            import: Arc::new(Mutex::new(ImportWorkflow::new())),
            default_query: self.default_query,
            page_size: self.page_size,
        }
    }
}
