//! HTTP client layer — `DashboardHttp`, the reqwest-backed `OrdersApi`.

pub mod client;

pub use client::DashboardHttp;
