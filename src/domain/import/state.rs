//! Import workflow state machine.
//!
//! `Idle → FileSelected → Uploading → {Success | Duplicate | Error}`.
//! The network call itself lives in the sub-client; this type only decides
//! what is allowed and records results.

use super::{ImportError, ImportOutcome, ImportSummary, StagedFile};
use crate::error::HttpError;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ImportState {
    #[default]
    Idle,
    FileSelected,
    Uploading,
    Success(ImportSummary),
    /// Server reason for rejecting the file as already imported.
    Duplicate(String),
    Error(String),
}

impl ImportState {
    pub fn is_uploading(&self) -> bool {
        matches!(self, ImportState::Uploading)
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            ImportState::Duplicate(m) | ImportState::Error(m) => Some(m),
            _ => None,
        }
    }
}

/// Issued by [`ImportWorkflow::begin_upload`]; carries the file to send.
#[derive(Debug, Clone)]
pub struct ImportTicket {
    seq: u64,
    pub file: StagedFile,
}

impl ImportTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

#[derive(Debug, Clone, Default)]
pub struct ImportWorkflow {
    state: ImportState,
    file: Option<StagedFile>,
    progress: u8,
    /// Bumped on every upload and on close; only the latest ticket may land.
    seq: u64,
}

impl ImportWorkflow {
    pub const PROGRESS_STARTED: u8 = 30;
    pub const PROGRESS_SENT: u8 = 60;
    pub const PROGRESS_DONE: u8 = 100;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ImportState {
        &self.state
    }

    pub fn staged_file(&self) -> Option<&StagedFile> {
        self.file.as_ref()
    }

    /// Indicative only; not tied to bytes transferred.
    pub fn progress(&self) -> u8 {
        self.progress
    }

    pub fn summary(&self) -> Option<&ImportSummary> {
        match &self.state {
            ImportState::Success(s) => Some(s),
            _ => None,
        }
    }

    /// Stage `file`, replacing any previous one and clearing its result.
    ///
    /// A non-CSV name moves to `Error` and leaves the previously staged file
    /// in place. After `Success` or `Duplicate` the state is kept as is, so
    /// a rejected pick never lifts the resubmission block.
    pub fn select_file(&mut self, file: StagedFile) -> Result<(), ImportError> {
        if self.state.is_uploading() {
            return Err(ImportError::Busy);
        }
        if !file.is_csv() {
            let err = ImportError::NotCsv(file.name);
            if !self.is_blocked() {
                self.state = ImportState::Error(err.user_message());
                self.progress = 0;
            }
            return Err(err);
        }
        tracing::debug!(name = %file.name, size = file.size(), "Staged import file");
        self.file = Some(file);
        self.state = ImportState::FileSelected;
        self.progress = 0;
        Ok(())
    }

    fn is_blocked(&self) -> bool {
        matches!(self.state, ImportState::Success(_) | ImportState::Duplicate(_))
    }

    /// Whether [`begin_upload`](Self::begin_upload) would succeed.
    pub fn can_submit(&self) -> bool {
        self.file.is_some()
            && matches!(self.state, ImportState::FileSelected | ImportState::Error(_))
    }

    pub fn begin_upload(&mut self) -> Result<ImportTicket, ImportError> {
        match self.state {
            ImportState::Uploading => return Err(ImportError::Busy),
            ImportState::Duplicate(_) => return Err(ImportError::DuplicateBlocked),
            ImportState::Success(_) => return Err(ImportError::AlreadyImported),
            _ => {}
        }
        let file = self.file.clone().ok_or(ImportError::NoFile)?;
        self.seq += 1;
        self.state = ImportState::Uploading;
        self.progress = Self::PROGRESS_STARTED;
        Ok(ImportTicket {
            seq: self.seq,
            file,
        })
    }

    fn is_current(&self, ticket: &ImportTicket) -> bool {
        ticket.seq == self.seq && self.state.is_uploading()
    }

    /// The request for `ticket` has been handed to the transport.
    pub fn mark_sent(&mut self, ticket: &ImportTicket) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.progress = Self::PROGRESS_SENT;
        true
    }

    /// Record the response for `ticket`. Returns `false` when the workflow was
    /// closed or restarted since, in which case nothing changes.
    pub fn finish_upload(
        &mut self,
        ticket: &ImportTicket,
        result: &Result<ImportOutcome, HttpError>,
    ) -> bool {
        if !self.is_current(ticket) {
            tracing::debug!(ticket = ticket.seq, latest = self.seq, "Discarding stale import response");
            return false;
        }
        match result {
            Ok(ImportOutcome::Success(summary)) => {
                self.state = ImportState::Success(*summary);
                self.progress = Self::PROGRESS_DONE;
            }
            Ok(ImportOutcome::Duplicate { error }) => {
                self.state = ImportState::Duplicate(error.clone());
                self.progress = Self::PROGRESS_DONE;
            }
            Err(err) => {
                self.state = ImportState::Error(err.user_message());
                self.progress = 0;
            }
        }
        true
    }

    /// Clear file, result and progress.
    pub fn reset(&mut self) {
        self.state = ImportState::Idle;
        self.file = None;
        self.progress = 0;
    }

    /// Reset and invalidate any upload still in flight.
    pub fn close(&mut self) {
        self.seq += 1;
        self.reset();
    }
}
