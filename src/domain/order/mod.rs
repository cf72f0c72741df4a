//! Order domain — orders, the order cache, listing derivation, dashboard stats.

pub mod client;
mod convert;
pub mod listing;
pub mod state;
pub mod stats;
pub mod wire;

use crate::shared::{fmt, serde_util, Coordinates, OrderId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use convert::OrderValidationError;
pub use listing::{ListingQuery, OrderPage, SortMode};
pub use state::{LoadTicket, OrderStore};
pub use stats::DashboardStats;

/// Default `limit` for `GET /orders`.
pub const DEFAULT_LIST_LIMIT: u32 = 20;

// ─── TaxBreakdown ────────────────────────────────────────────────────────────

/// Per-jurisdiction rate components behind `composite_tax_rate`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TaxBreakdown {
    pub state_rate: f64,
    pub county_rate: f64,
    pub city_rate: f64,
    #[serde(default)]
    pub special_rates: Vec<f64>,
}

impl TaxBreakdown {
    /// Sum of every component; should match the order's composite rate.
    pub fn component_sum(&self) -> f64 {
        self.state_rate + self.county_rate + self.city_rate + self.special_rates.iter().sum::<f64>()
    }

    pub fn has_special(&self) -> bool {
        !self.special_rates.is_empty()
    }
}

// ─── Jurisdictions ───────────────────────────────────────────────────────────

/// Named tax authorities resolved for the delivery point.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Jurisdictions {
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub county: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub special: Vec<String>,
}

impl Jurisdictions {
    /// All non-empty names in state, county, city, special order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        [&self.state, &self.county, &self.city]
            .into_iter()
            .filter_map(|name| name.as_deref())
            .chain(self.special.iter().map(String::as_str))
            .filter(|name| !name.is_empty())
    }

    /// Space-joined names, the text the order search matches against.
    pub fn search_text(&self) -> String {
        self.names().collect::<Vec<_>>().join(" ")
    }

    /// `"New York, Kings, Brooklyn"`: state, county and city only.
    pub fn label(&self) -> String {
        [&self.state, &self.county, &self.city]
            .into_iter()
            .filter_map(|name| name.as_deref())
            .filter(|name| !name.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

// ─── Order ───────────────────────────────────────────────────────────────────

/// A delivery order with its server-computed tax.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub latitude: f64,
    pub longitude: f64,
    pub subtotal: f64,
    #[serde(with = "serde_util::lenient_utc")]
    pub timestamp: DateTime<Utc>,
    pub composite_tax_rate: f64,
    pub tax_amount: f64,
    pub total_amount: f64,
    pub breakdown: TaxBreakdown,
    #[serde(default)]
    pub jurisdictions: Option<Jurisdictions>,
}

impl Order {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }

    pub fn label(&self) -> String {
        fmt::order_label(self.id)
    }

    /// Jurisdiction label, or an em dash when the backend resolved none.
    pub fn jurisdiction_label(&self) -> String {
        match &self.jurisdictions {
            Some(j) => {
                let label = j.label();
                if label.is_empty() {
                    "—".to_string()
                } else {
                    label
                }
            }
            None => "—".to_string(),
        }
    }
}

// ─── OrderCreate ─────────────────────────────────────────────────────────────

/// Body for `POST /orders`. The server computes every tax field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderCreate {
    pub latitude: f64,
    pub longitude: f64,
    pub subtotal: f64,
    #[serde(with = "serde_util::lenient_utc")]
    pub timestamp: DateTime<Utc>,
}

// ─── OrdersQuery ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum QueryError {
    #[error("date_from is after date_to")]
    InvertedDateRange,
    #[error("subtotal bounds must be finite and >= 0")]
    InvalidSubtotalBound,
    #[error("min_subtotal is greater than max_subtotal")]
    InvertedSubtotalRange,
}

/// Parameters for `GET /orders`. Unset filters are not sent.
#[derive(Debug, Clone, PartialEq)]
pub struct OrdersQuery {
    pub limit: u32,
    pub offset: u32,
    pub date_from: Option<DateTime<Utc>>,
    pub date_to: Option<DateTime<Utc>>,
    pub min_subtotal: Option<f64>,
    pub max_subtotal: Option<f64>,
}

impl Default for OrdersQuery {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIST_LIMIT,
            offset: 0,
            date_from: None,
            date_to: None,
            min_subtotal: None,
            max_subtotal: None,
        }
    }
}

impl OrdersQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_offset(mut self, offset: u32) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_date_range(
        mut self,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Self {
        self.date_from = from;
        self.date_to = to;
        self
    }

    pub fn with_subtotal_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min_subtotal = min;
        self.max_subtotal = max;
        self
    }

    /// Checks the filters the backend would reject with a 422.
    pub fn validate(&self) -> Result<(), QueryError> {
        if let (Some(from), Some(to)) = (self.date_from, self.date_to) {
            if from > to {
                return Err(QueryError::InvertedDateRange);
            }
        }
        for bound in [self.min_subtotal, self.max_subtotal].into_iter().flatten() {
            if !bound.is_finite() || bound < 0.0 {
                return Err(QueryError::InvalidSubtotalBound);
            }
        }
        if let (Some(min), Some(max)) = (self.min_subtotal, self.max_subtotal) {
            if min > max {
                return Err(QueryError::InvertedSubtotalRange);
            }
        }
        Ok(())
    }

    /// Query-string pairs, omitting unset filters.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("limit", self.limit.to_string()),
            ("offset", self.offset.to_string()),
        ];
        if let Some(from) = self.date_from {
            params.push(("date_from", from.to_rfc3339()));
        }
        if let Some(to) = self.date_to {
            params.push(("date_to", to.to_rfc3339()));
        }
        if let Some(min) = self.min_subtotal {
            params.push(("min_subtotal", min.to_string()));
        }
        if let Some(max) = self.max_subtotal {
            params.push(("max_subtotal", max.to_string()));
        }
        params
    }
}

// ─── OrdersPage ──────────────────────────────────────────────────────────────

/// One page of `GET /orders`, converted to domain orders.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OrdersPage {
    pub items: Vec<Order>,
    pub total: u64,
    pub limit: u32,
    pub offset: u32,
}
