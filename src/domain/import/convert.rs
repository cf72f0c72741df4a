//! Conversions: import wire response → `ImportOutcome`.

use super::wire::ImportResponse;
use super::{ImportOutcome, ImportSummary, DEFAULT_DUPLICATE_MESSAGE};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportDecodeError {
    #[error("unknown import kind {0:?}")]
    UnknownKind(String),

    #[error("import response is missing {0}")]
    MissingField(&'static str),

    #[error("import counts are inconsistent: inserted {inserted} + failed {failed} > total {total}")]
    InconsistentCounts { total: u64, inserted: u64, failed: u64 },
}

/// An explicit `kind` wins; otherwise an `import_id` means success and
/// anything else is a duplicate.
impl TryFrom<ImportResponse> for ImportOutcome {
    type Error = ImportDecodeError;

    fn try_from(resp: ImportResponse) -> Result<Self, Self::Error> {
        let is_success = match resp.kind.as_deref() {
            Some("success") => true,
            Some("duplicate") => false,
            Some(other) => return Err(ImportDecodeError::UnknownKind(other.to_string())),
            None => resp.import_id.is_some(),
        };

        if !is_success {
            let error = resp
                .error
                .or(resp.message)
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| DEFAULT_DUPLICATE_MESSAGE.to_string());
            return Ok(ImportOutcome::Duplicate { error });
        }

        let import_id = resp
            .import_id
            .ok_or(ImportDecodeError::MissingField("import_id"))?;
        let total = resp.total.ok_or(ImportDecodeError::MissingField("total"))?;
        let inserted = resp
            .inserted
            .ok_or(ImportDecodeError::MissingField("inserted"))?;
        let failed = resp.failed.ok_or(ImportDecodeError::MissingField("failed"))?;

        if inserted.saturating_add(failed) > total {
            return Err(ImportDecodeError::InconsistentCounts {
                total,
                inserted,
                failed,
            });
        }

        Ok(ImportOutcome::Success(ImportSummary {
            import_id,
            total,
            inserted,
            failed,
        }))
    }
}
