//! Create sub-client — drives the create workflow against the API.

use crate::api::OrdersApi;
use crate::client::DashboardClient;
use crate::domain::create::{CreateForm, CreateState, FormField};
use crate::domain::order::Order;
use crate::error::DashboardError;

/// Result of a submit that passed local validation.
#[derive(Debug, Clone, PartialEq)]
pub enum CreateOutcome {
    /// Created and prepended to the order store.
    Created(Order),
    /// The drawer was closed while the request was in flight.
    Discarded,
}

/// Sub-client for manual order creation.
pub struct Create<'a, A: OrdersApi> {
    pub(crate) client: &'a DashboardClient<A>,
}

impl<'a, A: OrdersApi> Create<'a, A> {
    pub async fn set_field(&self, field: FormField, value: impl Into<String>) {
        self.client.create.lock().await.set_field(field, value);
    }

    pub async fn set_timestamp_now(&self) {
        self.client.create.lock().await.set_timestamp_now();
    }

    pub async fn form(&self) -> CreateForm {
        self.client.create.lock().await.form().clone()
    }

    pub async fn state(&self) -> CreateState {
        self.client.create.lock().await.state().clone()
    }

    /// Validate, post, and on success prepend the new order to the store.
    ///
    /// Validation failures and `Busy` never reach the network.
    pub async fn submit(&self) -> Result<CreateOutcome, DashboardError> {
        let ticket = self.client.create.lock().await.begin_submit()?;
        tracing::debug!(ticket = ticket.seq(), "Submitting order");

        let result = self.client.api.create_order(&ticket.request).await;

        let applied = self.client.create.lock().await.finish_submit(&ticket, &result);
        if !applied {
            tracing::warn!(ticket = ticket.seq(), "Create response arrived after close; discarded");
            return Ok(CreateOutcome::Discarded);
        }

        let order = match result {
            Ok(order) => order,
            Err(err) => {
                tracing::warn!("Create order failed: {}", err);
                return Err(err.into());
            }
        };
        self.client.store.write().await.append(order.clone());
        tracing::info!(id = %order.id, total = order.total_amount, "Order created");
        Ok(CreateOutcome::Created(order))
    }

    /// Close the drawer: reset the form and drop any in-flight response.
    pub async fn close(&self) {
        self.client.create.lock().await.close();
    }
}
