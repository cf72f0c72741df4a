//! Create domain — the manual order form, its validation, and the submit workflow.

pub mod client;
pub mod state;

use crate::domain::order::OrderCreate;
use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use state::{CreateState, CreateTicket, CreateWorkflow};

/// Format of the timestamp input, in local time.
pub const LOCAL_INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M";

const LOCAL_INPUT_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    Latitude,
    Longitude,
    Subtotal,
    Timestamp,
}

// ─── Errors ──────────────────────────────────────────────────────────────────

/// Local validation failures. None of these reach the network.
///
/// A numeric field that is empty, unparseable, NaN, or exactly `0` counts as
/// missing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("missing latitude")]
    MissingLatitude,
    #[error("missing longitude")]
    MissingLongitude,
    #[error("missing subtotal")]
    MissingSubtotal,
    #[error("subtotal must not be negative")]
    NegativeSubtotal,
    #[error("invalid timestamp {0:?}")]
    InvalidTimestamp(String),
}

impl ValidationError {
    pub fn field(&self) -> FormField {
        match self {
            ValidationError::MissingLatitude => FormField::Latitude,
            ValidationError::MissingLongitude => FormField::Longitude,
            ValidationError::MissingSubtotal | ValidationError::NegativeSubtotal => {
                FormField::Subtotal
            }
            ValidationError::InvalidTimestamp(_) => FormField::Timestamp,
        }
    }

    /// The drawer shows one field-agnostic message for anything missing.
    pub fn user_message(&self) -> String {
        match self {
            ValidationError::MissingLatitude
            | ValidationError::MissingLongitude
            | ValidationError::MissingSubtotal => "Fill all fields".to_string(),
            ValidationError::NegativeSubtotal => "Subtotal must not be negative".to_string(),
            ValidationError::InvalidTimestamp(_) => "Enter a valid date and time".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CreateError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("a create request is already in flight")]
    Busy,
}

impl CreateError {
    pub fn user_message(&self) -> String {
        match self {
            CreateError::Validation(e) => e.user_message(),
            CreateError::Busy => "Submitting…".to_string(),
        }
    }
}

// ─── Parsing ─────────────────────────────────────────────────────────────────

/// Parse a decimal input, accepting `,` as the decimal separator.
pub fn parse_decimal(raw: &str) -> Option<f64> {
    let normalized = raw.trim().replacen(',', ".", 1);
    if normalized.is_empty() {
        return None;
    }
    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse a timestamp input. RFC 3339 keeps its offset; a naive value is read
/// in `tz`. The result is normalized to UTC.
pub fn parse_timestamp_in<Tz: TimeZone>(raw: &str, tz: &Tz) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    let naive = LOCAL_INPUT_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())?;
    // DST gaps have no local instant; folds take the earlier one.
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

pub fn parse_local_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    parse_timestamp_in(raw, &Local)
}

/// Current local time in the input format.
pub fn now_local_input() -> String {
    Local::now().format(LOCAL_INPUT_FORMAT).to_string()
}

// ─── CreateForm ──────────────────────────────────────────────────────────────

/// Raw text of the create form, exactly as typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateForm {
    pub latitude: String,
    pub longitude: String,
    pub subtotal: String,
    pub timestamp: String,
}

impl Default for CreateForm {
    fn default() -> Self {
        Self::blank(now_local_input())
    }
}

impl CreateForm {
    /// Empty numeric fields with the given timestamp text.
    pub fn blank(timestamp: impl Into<String>) -> Self {
        Self {
            latitude: String::new(),
            longitude: String::new(),
            subtotal: String::new(),
            timestamp: timestamp.into(),
        }
    }

    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Latitude => &self.latitude,
            FormField::Longitude => &self.longitude,
            FormField::Subtotal => &self.subtotal,
            FormField::Timestamp => &self.timestamp,
        }
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::Latitude => self.latitude = value,
            FormField::Longitude => self.longitude = value,
            FormField::Subtotal => self.subtotal = value,
            FormField::Timestamp => self.timestamp = value,
        }
    }

    pub fn validate(&self) -> Result<OrderCreate, ValidationError> {
        self.validate_in(&Local)
    }

    /// Validate with naive timestamps read in `tz`.
    pub fn validate_in<Tz: TimeZone>(&self, tz: &Tz) -> Result<OrderCreate, ValidationError> {
        let latitude = non_zero(&self.latitude).ok_or(ValidationError::MissingLatitude)?;
        let longitude = non_zero(&self.longitude).ok_or(ValidationError::MissingLongitude)?;
        let subtotal = non_zero(&self.subtotal).ok_or(ValidationError::MissingSubtotal)?;
        if subtotal < 0.0 {
            return Err(ValidationError::NegativeSubtotal);
        }
        let timestamp = parse_timestamp_in(&self.timestamp, tz)
            .ok_or_else(|| ValidationError::InvalidTimestamp(self.timestamp.clone()))?;

        Ok(OrderCreate {
            latitude,
            longitude,
            subtotal,
            timestamp,
        })
    }
}

fn non_zero(raw: &str) -> Option<f64> {
    parse_decimal(raw).filter(|v| *v != 0.0)
}
