//! Order cache — the single source of truth for the map and list views.

use super::{Order, OrdersPage, OrdersQuery};
use crate::shared::OrderId;
use std::collections::HashSet;

/// Handle for one initiated load. Only the most recently issued ticket may
/// write into the store.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadTicket {
    seq: u64,
    query: OrdersQuery,
}

impl LoadTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn query(&self) -> &OrdersQuery {
        &self.query
    }
}

/// Loaded orders plus the server-reported total.
///
/// The dashboard owns one instance behind a lock; views read snapshots and
/// re-derive what they render. `version` moves on every mutation.
#[derive(Debug, Clone, Default)]
pub struct OrderStore {
    items: Vec<Order>,
    total: u64,
    version: u64,
    issued_loads: u64,
    last_query: Option<OrdersQuery>,
}

impl OrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new load; supersedes every ticket issued before it.
    pub fn begin_load(&mut self, query: OrdersQuery) -> LoadTicket {
        self.issued_loads += 1;
        LoadTicket {
            seq: self.issued_loads,
            query,
        }
    }

    pub fn is_current(&self, ticket: &LoadTicket) -> bool {
        ticket.seq == self.issued_loads
    }

    /// Replace the cache with a loaded page. Returns `false` (and leaves the
    /// cache untouched) when a later load has been started since `ticket`.
    pub fn apply_load(&mut self, ticket: LoadTicket, page: OrdersPage) -> bool {
        if !self.is_current(&ticket) {
            tracing::debug!(
                ticket = ticket.seq,
                latest = self.issued_loads,
                "Discarding superseded order load"
            );
            return false;
        }

        let mut seen = HashSet::with_capacity(page.items.len());
        self.items = page
            .items
            .into_iter()
            .filter(|order| seen.insert(order.id))
            .collect();
        self.total = page.total;
        self.last_query = Some(ticket.query);
        self.version += 1;
        true
    }

    /// Prepend a freshly created order without refetching.
    ///
    /// An already-cached id is moved to the head instead of counted twice.
    pub fn append(&mut self, order: Order) {
        match self.position(order.id) {
            Some(pos) => {
                self.items.remove(pos);
            }
            None => self.total += 1,
        }
        self.items.insert(0, order);
        self.version += 1;
    }

    pub fn orders(&self) -> &[Order] {
        &self.items
    }

    pub fn get(&self, id: OrderId) -> Option<&Order> {
        self.items.iter().find(|o| o.id == id)
    }

    pub fn contains(&self, id: OrderId) -> bool {
        self.position(id).is_some()
    }

    fn position(&self, id: OrderId) -> Option<usize> {
        self.items.iter().position(|o| o.id == id)
    }

    /// Server-reported total; authoritative even when fewer items are held.
    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Query of the most recently applied load.
    pub fn last_query(&self) -> Option<&OrdersQuery> {
        self.last_query.as_ref()
    }

    /// Server-side page count for `page_size`, at least 1.
    pub fn page_count(&self, page_size: u32) -> u64 {
        let page_size = u64::from(page_size.max(1));
        self.total.div_ceil(page_size).max(1)
    }
}
