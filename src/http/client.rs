//! Low-level HTTP client — `DashboardHttp`.
//!
//! One method per endpoint returning wire types, plus the `OrdersApi` impl
//! that converts them to domain types. Requests are sent once; failures are
//! reported, never retried.

use crate::api::OrdersApi;
use crate::domain::import::wire::ImportResponse;
use crate::domain::import::{ImportOutcome, StagedFile};
use crate::domain::order::wire::{OrderResponse, OrdersListResponse};
use crate::domain::order::{Order, OrderCreate, OrdersPage, OrdersQuery};
use crate::error::{ErrorBody, HttpError};

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Low-level HTTP client for the orders API.
#[derive(Debug, Clone)]
pub struct DashboardHttp {
    base_url: String,
    client: Client,
}

impl DashboardHttp {
    pub fn new(base_url: &str) -> Result<Self, HttpError> {
        Self::with_timeout(base_url, crate::network::DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, HttpError> {
        let client = Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(10)
            .build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /orders` URL; unset filters are left out, values are URL-encoded.
    pub fn list_url(&self, query: &OrdersQuery) -> String {
        let params: Vec<String> = query
            .to_params()
            .into_iter()
            .map(|(key, value)| format!("{}={}", key, urlencoding::encode(&value)))
            .collect();
        format!("{}/orders?{}", self.base_url, params.join("&"))
    }

    // ── Orders ───────────────────────────────────────────────────────────

    pub async fn get_orders(&self, query: &OrdersQuery) -> Result<OrdersListResponse, HttpError> {
        let url = self.list_url(query);
        tracing::debug!("GET {}", url);
        self.send(self.client.get(&url)).await
    }

    pub async fn post_order(&self, body: &OrderCreate) -> Result<OrderResponse, HttpError> {
        let url = format!("{}/orders", self.base_url);
        tracing::debug!("POST {}", url);
        self.send(self.client.post(&url).json(body)).await
    }

    pub async fn post_import(&self, file: &StagedFile) -> Result<ImportResponse, HttpError> {
        let url = format!("{}/orders/import", self.base_url);
        tracing::debug!(name = %file.name, size = file.size(), "POST {}", url);
        let part = Part::bytes(file.bytes.clone())
            .file_name(file.name.clone())
            .mime_str("text/csv")?;
        let form = Form::new().part("file", part);
        self.send(self.client.post(&url).multipart(form)).await
    }

    // ── Internal ─────────────────────────────────────────────────────────

    async fn send<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, HttpError> {
        let resp = req.send().await?;
        let status = resp.status();

        if status.is_success() {
            return Ok(resp.json::<T>().await?);
        }

        let body = resp.text().await.unwrap_or_default();
        let message = ErrorBody::resolve(&body, status.canonical_reason().unwrap_or("Request failed"));
        tracing::debug!(status = status.as_u16(), "Request failed: {}", message);
        Err(HttpError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl OrdersApi for DashboardHttp {
    async fn list_orders(&self, query: &OrdersQuery) -> Result<OrdersPage, HttpError> {
        Ok(self.get_orders(query).await?.into())
    }

    async fn create_order(&self, request: &OrderCreate) -> Result<Order, HttpError> {
        let resp = self.post_order(request).await?;
        Order::try_from(resp).map_err(|e| HttpError::Decode(e.to_string()))
    }

    async fn import_orders(&self, file: &StagedFile) -> Result<ImportOutcome, HttpError> {
        let resp = self.post_import(file).await?;
        ImportOutcome::try_from(resp).map_err(|e| HttpError::Decode(e.to_string()))
    }
}
