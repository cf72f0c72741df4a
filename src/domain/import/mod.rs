//! Import domain — staged CSV files, import outcomes, the upload workflow.

pub mod client;
mod convert;
pub mod state;
pub mod wire;

use crate::shared::fmt;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use convert::ImportDecodeError;
pub use state::{ImportState, ImportTicket, ImportWorkflow};

/// Message shown when the server reports a duplicate without a reason.
pub const DEFAULT_DUPLICATE_MESSAGE: &str = "File already imported";

// ─── StagedFile ──────────────────────────────────────────────────────────────

/// A file picked for upload, held in memory until sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl StagedFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    /// Name ends in `.csv`, any case.
    pub fn is_csv(&self) -> bool {
        self.name.to_ascii_lowercase().ends_with(".csv")
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// `"512 B"`, `"1.5 KB"`, `"2.0 MB"`.
    pub fn formatted_size(&self) -> String {
        fmt::file_size(self.size())
    }
}

// ─── ImportOutcome ───────────────────────────────────────────────────────────

/// Row counts for a completed import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    pub import_id: i64,
    pub total: u64,
    pub inserted: u64,
    pub failed: u64,
}

/// What the server did with an uploaded file. A duplicate is data, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ImportOutcome {
    Success(ImportSummary),
    Duplicate { error: String },
}

impl ImportOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ImportOutcome::Success(_))
    }
}

// ─── ImportError ─────────────────────────────────────────────────────────────

/// Client-side rejections; none of these reach the network.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportError {
    #[error("{0:?} is not a .csv file")]
    NotCsv(String),

    #[error("no file selected")]
    NoFile,

    #[error("an upload is already in progress")]
    Busy,

    #[error("file was already imported; reset or choose another file")]
    DuplicateBlocked,

    #[error("import already completed; reset or choose another file")]
    AlreadyImported,
}

impl ImportError {
    pub fn user_message(&self) -> String {
        match self {
            ImportError::NotCsv(_) | ImportError::NoFile => "Select a .csv file".to_string(),
            ImportError::Busy => "Upload in progress".to_string(),
            ImportError::DuplicateBlocked => DEFAULT_DUPLICATE_MESSAGE.to_string(),
            ImportError::AlreadyImported => "Import completed".to_string(),
        }
    }
}
