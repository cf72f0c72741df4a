//! Conversions: orders wire types → Order domain types.

use super::wire;
use super::{Jurisdictions, Order, OrdersPage, TaxBreakdown};
use crate::shared::{serde_util, OrderId};
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum OrderValidationError {
    #[error("order {id}: invalid timestamp {raw:?}")]
    InvalidTimestamp { id: i64, raw: String },

    #[error("order {id}: {field} is not a finite number")]
    NonFinite { id: i64, field: &'static str },
}

impl From<wire::BreakdownResponse> for TaxBreakdown {
    fn from(b: wire::BreakdownResponse) -> Self {
        TaxBreakdown {
            state_rate: b.state_rate,
            county_rate: b.county_rate,
            city_rate: b.city_rate,
            special_rates: b.special_rates.unwrap_or_default(),
        }
    }
}

impl From<wire::JurisdictionsResponse> for Jurisdictions {
    fn from(j: wire::JurisdictionsResponse) -> Self {
        Jurisdictions {
            state: j.state,
            county: j.county,
            city: j.city,
            special: j.special.unwrap_or_default(),
        }
    }
}

impl TryFrom<wire::OrderResponse> for Order {
    type Error = OrderValidationError;

    fn try_from(source: wire::OrderResponse) -> Result<Self, Self::Error> {
        let id = source.id;
        let numbers = [
            ("latitude", source.latitude),
            ("longitude", source.longitude),
            ("subtotal", source.subtotal),
            ("composite_tax_rate", source.composite_tax_rate),
            ("tax_amount", source.tax_amount),
            ("total_amount", source.total_amount),
        ];
        if let Some(&(field, _)) = numbers.iter().find(|(_, v)| !v.is_finite()) {
            return Err(OrderValidationError::NonFinite { id, field });
        }

        let timestamp = serde_util::parse_instant(&source.timestamp).ok_or_else(|| {
            OrderValidationError::InvalidTimestamp {
                id,
                raw: source.timestamp.clone(),
            }
        })?;

        Ok(Order {
            id: OrderId::new(id),
            latitude: source.latitude,
            longitude: source.longitude,
            subtotal: source.subtotal,
            timestamp,
            composite_tax_rate: source.composite_tax_rate,
            tax_amount: source.tax_amount,
            total_amount: source.total_amount,
            breakdown: source.breakdown.into(),
            jurisdictions: source.jurisdictions.map(Jurisdictions::from),
        })
    }
}

/// Invalid items are dropped with a warning rather than failing the whole page;
/// `total` stays as reported by the server.
impl From<wire::OrdersListResponse> for OrdersPage {
    fn from(resp: wire::OrdersListResponse) -> Self {
        let mut seen = HashSet::with_capacity(resp.items.len());
        let mut items = Vec::with_capacity(resp.items.len());
        for item in resp.items {
            match Order::try_from(item) {
                Ok(order) => {
                    if seen.insert(order.id) {
                        items.push(order);
                    } else {
                        tracing::warn!(id = %order.id, "Duplicate order id in list response");
                    }
                }
                Err(err) => tracing::warn!("Skipping order: {}", err),
            }
        }
        OrdersPage {
            items,
            total: resp.total,
            limit: resp.limit,
            offset: resp.offset,
        }
    }
}
