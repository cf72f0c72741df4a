//! Wire types for `POST /orders/import`.

use serde::Deserialize;

/// Import response body. The backend answers a duplicate with a bare
/// `{"error": ...}` (or `{"message": ...}`) and a success with counts, so
/// every field is optional and classification happens in `convert`.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct ImportResponse {
    /// Explicit discriminant (`"success"` / `"duplicate"`), when sent.
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub import_id: Option<i64>,
    #[serde(default, alias = "total_rows")]
    pub total: Option<u64>,
    #[serde(default, alias = "inserted_rows")]
    pub inserted: Option<u64>,
    #[serde(default, alias = "failed_rows")]
    pub failed: Option<u64>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}
