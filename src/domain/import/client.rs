//! Import sub-client — drives the CSV upload workflow against the API.

use crate::api::OrdersApi;
use crate::client::DashboardClient;
use crate::domain::import::{ImportError, ImportOutcome, ImportSummary, ImportWorkflow, StagedFile};
use crate::error::DashboardError;

/// Result of an upload that was sent.
#[derive(Debug, Clone, PartialEq)]
pub enum UploadResult {
    /// `refreshed` is false when the follow-up order reload failed.
    Imported { summary: ImportSummary, refreshed: bool },
    Duplicate(String),
    /// The drawer was closed while the request was in flight.
    Discarded,
}

/// Sub-client for CSV imports.
pub struct Import<'a, A: OrdersApi> {
    pub(crate) client: &'a DashboardClient<A>,
}

impl<'a, A: OrdersApi> Import<'a, A> {
    pub async fn select_file(&self, file: StagedFile) -> Result<(), ImportError> {
        self.client.import.lock().await.select_file(file)
    }

    /// Copy of the workflow (state, staged file, progress).
    pub async fn snapshot(&self) -> ImportWorkflow {
        self.client.import.lock().await.clone()
    }

    pub async fn progress(&self) -> u8 {
        self.client.import.lock().await.progress()
    }

    pub async fn can_submit(&self) -> bool {
        self.client.import.lock().await.can_submit()
    }

    /// Upload the staged file. On success the order store is refreshed.
    pub async fn upload(&self) -> Result<UploadResult, DashboardError> {
        let ticket = self.client.import.lock().await.begin_upload()?;
        tracing::debug!(
            ticket = ticket.seq(),
            name = %ticket.file.name,
            size = ticket.file.size(),
            "Uploading import file"
        );

        let request = self.client.api.import_orders(&ticket.file);
        self.client.import.lock().await.mark_sent(&ticket);
        let result = request.await;

        let applied = self.client.import.lock().await.finish_upload(&ticket, &result);
        if !applied {
            tracing::warn!(ticket = ticket.seq(), "Import response arrived after close; discarded");
            return Ok(UploadResult::Discarded);
        }

        match result {
            Ok(ImportOutcome::Success(summary)) => {
                tracing::info!(
                    import_id = summary.import_id,
                    total = summary.total,
                    inserted = summary.inserted,
                    failed = summary.failed,
                    "Import completed"
                );
                let refreshed = match self.client.orders().refresh().await {
                    Ok(_) => true,
                    Err(err) => {
                        tracing::warn!("Order refresh after import failed: {}", err);
                        false
                    }
                };
                Ok(UploadResult::Imported { summary, refreshed })
            }
            Ok(ImportOutcome::Duplicate { error }) => {
                tracing::info!(name = %ticket.file.name, "Import rejected as duplicate: {}", error);
                Ok(UploadResult::Duplicate(error))
            }
            Err(err) => {
                tracing::warn!("Import failed: {}", err);
                Err(err.into())
            }
        }
    }

    /// Clear file, result and progress.
    pub async fn reset(&self) {
        self.client.import.lock().await.reset();
    }

    /// Close the drawer: reset and drop any in-flight response.
    pub async fn close(&self) {
        self.client.import.lock().await.close();
    }
}
