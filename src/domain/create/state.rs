//! Create workflow state machine: `Entry → Submitting → {Success | Error}`.

use super::{now_local_input, CreateError, CreateForm, FormField};
use crate::domain::order::{Order, OrderCreate};
use crate::error::HttpError;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum CreateState {
    #[default]
    Entry,
    Submitting,
    Success(Order),
    Error(String),
}

impl CreateState {
    pub fn is_submitting(&self) -> bool {
        matches!(self, CreateState::Submitting)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            CreateState::Error(m) => Some(m),
            _ => None,
        }
    }
}

/// Issued by [`CreateWorkflow::begin_submit`]; carries the validated body.
#[derive(Debug, Clone)]
pub struct CreateTicket {
    seq: u64,
    pub request: OrderCreate,
}

impl CreateTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

#[derive(Debug, Clone, Default)]
pub struct CreateWorkflow {
    form: CreateForm,
    state: CreateState,
    seq: u64,
}

impl CreateWorkflow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_form(form: CreateForm) -> Self {
        Self {
            form,
            ..Self::default()
        }
    }

    pub fn form(&self) -> &CreateForm {
        &self.form
    }

    pub fn state(&self) -> &CreateState {
        &self.state
    }

    /// Edit one field. A shown error or success clears on the next edit.
    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        self.form.set(field, value);
        if matches!(self.state, CreateState::Error(_) | CreateState::Success(_)) {
            self.state = CreateState::Entry;
        }
    }

    pub fn set_timestamp_now(&mut self) {
        self.set_field(FormField::Timestamp, now_local_input());
    }

    /// Validate and move to `Submitting`.
    ///
    /// Validation failures move to `Error` without producing a request.
    pub fn begin_submit(&mut self) -> Result<CreateTicket, CreateError> {
        if self.state.is_submitting() {
            return Err(CreateError::Busy);
        }
        let request = match self.form.validate() {
            Ok(request) => request,
            Err(err) => {
                tracing::debug!(field = ?err.field(), "Create form rejected: {}", err);
                self.state = CreateState::Error(err.user_message());
                return Err(err.into());
            }
        };
        self.seq += 1;
        self.state = CreateState::Submitting;
        Ok(CreateTicket {
            seq: self.seq,
            request,
        })
    }

    fn is_current(&self, ticket: &CreateTicket) -> bool {
        ticket.seq == self.seq && self.state.is_submitting()
    }

    /// Record the response for `ticket`. Returns `false` (no change) when the
    /// drawer was closed since the request went out.
    ///
    /// Success resets the form; failure keeps what was typed.
    pub fn finish_submit(&mut self, ticket: &CreateTicket, result: &Result<Order, HttpError>) -> bool {
        if !self.is_current(ticket) {
            tracing::debug!(ticket = ticket.seq, latest = self.seq, "Discarding stale create response");
            return false;
        }
        match result {
            Ok(order) => {
                self.form = CreateForm::default();
                self.state = CreateState::Success(order.clone());
            }
            Err(err) => {
                self.state = CreateState::Error(err.user_message());
            }
        }
        true
    }

    /// Reset the form and invalidate any in-flight request.
    pub fn close(&mut self) {
        self.seq += 1;
        self.form = CreateForm::default();
        self.state = CreateState::Entry;
    }
}
