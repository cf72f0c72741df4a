//! Network URL constants for the dashboard backend.

use std::time::Duration;

/// Default orders API base URL (local FastAPI backend).
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Per-request timeout for the HTTP transport.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Environment variable that overrides [`DEFAULT_API_URL`].
pub const API_URL_ENV: &str = "TAX_DASHBOARD_API_URL";

/// Base URL from `TAX_DASHBOARD_API_URL`, or the default when unset or blank.
pub fn api_url_from_env() -> String {
    std::env::var(API_URL_ENV)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string())
}
