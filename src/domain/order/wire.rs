//! Wire types for the `/orders` endpoints.

use serde::Deserialize;

/// Tax breakdown as sent by the backend (`special_rates` may be null).
#[derive(Deserialize, Debug, Clone)]
pub struct BreakdownResponse {
    pub state_rate: f64,
    pub county_rate: f64,
    pub city_rate: f64,
    #[serde(default)]
    pub special_rates: Option<Vec<f64>>,
}

/// Jurisdiction names as sent by the backend (`special` may be null).
#[derive(Deserialize, Debug, Clone, Default)]
pub struct JurisdictionsResponse {
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub county: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub special: Option<Vec<String>>,
}

/// A single order (`POST /orders` response, `GET /orders` item).
#[derive(Deserialize, Debug, Clone)]
pub struct OrderResponse {
    pub id: i64,
    pub latitude: f64,
    pub longitude: f64,
    pub subtotal: f64,
    pub timestamp: String,
    pub composite_tax_rate: f64,
    pub tax_amount: f64,
    pub total_amount: f64,
    pub breakdown: BreakdownResponse,
    #[serde(default)]
    pub jurisdictions: Option<JurisdictionsResponse>,
}

/// `GET /orders` response.
#[derive(Deserialize, Debug, Clone)]
pub struct OrdersListResponse {
    pub items: Vec<OrderResponse>,
    pub total: u64,
    pub limit: u32,
    pub offset: u32,
}
