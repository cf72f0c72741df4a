//! Summary figures for the dashboard header.

use super::Order;
use crate::shared::fmt;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct DashboardStats {
    /// Server-reported order count, not just the loaded page.
    pub order_count: u64,
    /// Sum of `tax_amount` over loaded orders.
    pub tax_collected: f64,
    /// Sum of `total_amount` over loaded orders.
    pub revenue: f64,
    /// Mean `composite_tax_rate` over loaded orders, 0 when none are loaded.
    pub average_rate: f64,
}

impl DashboardStats {
    pub fn from_orders(orders: &[Order], total: u64) -> Self {
        let tax_collected = orders.iter().map(|o| o.tax_amount).sum();
        let revenue = orders.iter().map(|o| o.total_amount).sum();
        let average_rate = if orders.is_empty() {
            0.0
        } else {
            orders.iter().map(|o| o.composite_tax_rate).sum::<f64>() / orders.len() as f64
        };
        Self {
            order_count: total,
            tax_collected,
            revenue,
            average_rate,
        }
    }

    pub fn tax_collected_display(&self) -> String {
        fmt::money(self.tax_collected)
    }

    pub fn revenue_display(&self) -> String {
        fmt::money(self.revenue)
    }

    pub fn average_rate_display(&self) -> String {
        fmt::rate_percent(self.average_rate, 3)
    }
}
