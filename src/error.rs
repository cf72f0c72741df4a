//! Unified dashboard error types.

use crate::domain::create::CreateError;
use crate::domain::import::ImportError;
use crate::domain::order::QueryError;
use serde::Deserialize;
use thiserror::Error;

/// Top-level dashboard error.
#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    #[error("Create order: {0}")]
    Create(#[from] CreateError),

    #[error("Import: {0}")]
    Import(#[from] ImportError),

    #[error("Invalid order query: {0}")]
    Query(#[from] QueryError),

    #[error("{0}")]
    Other(String),
}

impl DashboardError {
    /// Text shown to the operator in the drawer or panel that started the action.
    pub fn user_message(&self) -> String {
        match self {
            DashboardError::Http(e) => e.user_message(),
            DashboardError::Create(e) => e.user_message(),
            DashboardError::Import(e) => e.user_message(),
            other => other.to_string(),
        }
    }
}

pub type DashboardResult<T> = Result<T, DashboardError>;

/// Transport-layer errors. Every failed list/create/import call ends up here.
#[derive(Error, Debug)]
pub enum HttpError {
    #[cfg(feature = "http")]
    #[error("Request failed: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// Non-2xx response. `message` is the server `detail` or the status text.
    #[error("{message}")]
    Status { status: u16, message: String },

    #[error("Invalid response: {0}")]
    Decode(String),
}

impl HttpError {
    pub fn user_message(&self) -> String {
        match self {
            HttpError::Status { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            HttpError::Status { status, .. } => Some(*status),
            #[cfg(feature = "http")]
            HttpError::Reqwest(e) => e.status().map(|s| s.as_u16()),
            HttpError::Decode(_) => None,
        }
    }
}

/// Error body returned by the orders API: `{"detail": string | object}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ErrorBody {
    /// `detail` as display text; objects and arrays are stringified as JSON.
    /// Empty or null details yield `None`.
    pub fn message(&self) -> Option<String> {
        match self.detail.as_ref()? {
            serde_json::Value::Null => None,
            serde_json::Value::Bool(false) => None,
            serde_json::Value::String(s) if s.is_empty() => None,
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Resolve the operator-facing message for a failed response body.
    pub fn resolve(body: &str, status_text: &str) -> String {
        serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.message())
            .unwrap_or_else(|| status_text.to_string())
    }
}
