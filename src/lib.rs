//! # Delivery Tax Dashboard Core
//!
//! Client-side order-state coordination for the delivery-order tax dashboard:
//! one order cache feeding both the map and the list, a shared selection, and
//! the manual-create and CSV-import workflows.
//!
//! ## Architecture
//!
//! The crate is organized in layers:
//!
//! 1. **Core** — Shared types, domain models, pure listing derivation, workflow state machines
//! 2. **API seam** — `OrdersApi`, the three backend calls as an async trait
//! 3. **HTTP API** — `DashboardHttp`, the reqwest implementation of `OrdersApi`
//! 4. **High-Level Client** — `DashboardClient` with nested sub-clients over shared state
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use delivery_tax_dashboard::prelude::*;
//!
//! let client = DashboardClient::builder()
//!     .base_url_from_env()
//!     .list_limit(20)
//!     .build()?;
//!
//! client.orders().refresh().await?;
//! let page = client.orders().listing(&ListingQuery::new().with_sort(SortMode::Highest)).await;
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared newtypes and helpers used across all domains.
pub mod shared;

/// Domain modules (vertical slices): types, wire types, conversions, state.
pub mod domain;

/// Unified error types.
pub mod error;

/// Network URL constants.
pub mod network;

/// Header clock tick service.
pub mod clock;

// ── Layer 2: API seam ────────────────────────────────────────────────────────

/// `OrdersApi` — the transport contract the workflows run against.
pub mod api;

// ── Layer 3: HTTP API ────────────────────────────────────────────────────────

/// reqwest-backed `OrdersApi`.
#[cfg(feature = "http")]
pub mod http;

// ── Layer 4: High-Level Client ───────────────────────────────────────────────

/// `DashboardClient` — the primary entry point.
pub mod client;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared newtypes
    pub use crate::shared::{Coordinates, OrderId};

    // Domain types — order
    pub use crate::domain::order::client::ApiStatus;
    pub use crate::domain::order::listing::{ListingPage, PAGE_SIZE};
    pub use crate::domain::order::{
        DashboardStats, Jurisdictions, ListingQuery, LoadTicket, Order, OrderCreate, OrderPage,
        OrderStore, OrdersPage, OrdersQuery, QueryError, SortMode, TaxBreakdown,
    };

    // Domain types — selection
    pub use crate::domain::selection::{FlyTo, MapOverlay, MapViewport, SelectionCoordinator};

    // Domain types — create
    pub use crate::domain::create::client::CreateOutcome;
    pub use crate::domain::create::{
        CreateError, CreateForm, CreateState, CreateWorkflow, FormField, ValidationError,
    };

    // Domain types — import
    pub use crate::domain::import::client::UploadResult;
    pub use crate::domain::import::{
        ImportError, ImportOutcome, ImportState, ImportSummary, ImportWorkflow, StagedFile,
    };

    // Errors
    pub use crate::error::{DashboardError, DashboardResult, HttpError};

    // Network
    pub use crate::network::{api_url_from_env, DEFAULT_API_URL};

    // API seam + client + sub-clients
    pub use crate::api::OrdersApi;
    pub use crate::client::{
        CreateClient, DashboardClient, DashboardClientBuilder, ImportClient, OrdersClient,
        SelectionClient,
    };
    #[cfg(feature = "http")]
    pub use crate::http::DashboardHttp;

    // Clock
    pub use crate::clock::{ClockReading, ClockTicker};
}
