//! Transport seam between the workflows and the orders backend.
//!
//! `DashboardHttp` is the production implementation; tests plug in fakes.
//! Every call either resolves with domain data or fails with an [`HttpError`]
//! carrying a readable message. Nothing here retries.

use crate::domain::import::{ImportOutcome, StagedFile};
use crate::domain::order::{Order, OrderCreate, OrdersPage, OrdersQuery};
use crate::error::HttpError;
use async_trait::async_trait;

#[async_trait]
pub trait OrdersApi: Send + Sync {
    /// `GET /orders` with pagination and optional filters.
    async fn list_orders(&self, query: &OrdersQuery) -> Result<OrdersPage, HttpError>;

    /// `POST /orders`; the server computes tax and assigns the id.
    async fn create_order(&self, request: &OrderCreate) -> Result<Order, HttpError>;

    /// `POST /orders/import` as multipart with the CSV under field `file`.
    ///
    /// A duplicate file is a normal outcome, not an error.
    async fn import_orders(&self, file: &StagedFile) -> Result<ImportOutcome, HttpError>;
}

#[async_trait]
impl<T: OrdersApi + ?Sized> OrdersApi for std::sync::Arc<T> {
    async fn list_orders(&self, query: &OrdersQuery) -> Result<OrdersPage, HttpError> {
        (**self).list_orders(query).await
    }

    async fn create_order(&self, request: &OrderCreate) -> Result<Order, HttpError> {
        (**self).create_order(request).await
    }

    async fn import_orders(&self, file: &StagedFile) -> Result<ImportOutcome, HttpError> {
        (**self).import_orders(file).await
    }
}
