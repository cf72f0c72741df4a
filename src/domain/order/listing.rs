//! Filter → sort → paginate derivation for the order list.
//!
//! Everything here is a pure function of an `OrderStore` snapshot and a
//! [`ListingQuery`]; the list view and the map both re-derive from the same
//! cache instead of keeping their own copies.

use super::Order;
use crate::shared::OrderId;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Rows per page in the order list.
pub const PAGE_SIZE: usize = 8;

// ─── SortMode ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// Cache order (newest first as served, fresh creations prepended).
    #[default]
    Newest,
    /// Descending `composite_tax_rate`.
    Highest,
    /// Ascending `total_amount`.
    Lowest,
}

impl SortMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::Newest => "newest",
            SortMode::Highest => "highest",
            SortMode::Lowest => "lowest",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "newest" => Some(SortMode::Newest),
            "highest" => Some(SortMode::Highest),
            "lowest" => Some(SortMode::Lowest),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortMode::Newest => "Newest",
            SortMode::Highest => "Highest Tax",
            SortMode::Lowest => "Lowest Total",
        }
    }
}

// ─── ListingQuery ────────────────────────────────────────────────────────────

/// Search text, sort mode and requested page (1-based) of the list view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingQuery {
    search: String,
    sort: SortMode,
    page: usize,
}

impl Default for ListingQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            sort: SortMode::Newest,
            page: 1,
        }
    }
}

impl ListingQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn sort(&self) -> SortMode {
        self.sort
    }

    /// Requested page; may exceed the page count, see [`derive`].
    pub fn page(&self) -> usize {
        self.page
    }

    /// New search text; jumps back to page 1.
    pub fn set_search(&mut self, text: impl Into<String>) {
        self.search = text.into();
        self.page = 1;
    }

    /// New sort mode; jumps back to page 1.
    pub fn set_sort(&mut self, sort: SortMode) {
        self.sort = sort;
        self.page = 1;
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        self.set_search(text);
        self
    }

    pub fn with_sort(mut self, sort: SortMode) -> Self {
        self.set_sort(sort);
        self
    }

    pub fn with_page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }
}

// ─── Filtering ───────────────────────────────────────────────────────────────

/// Case-insensitive substring match of `needle` (already lowercased) against
/// the id, coordinates, subtotal and jurisdiction names.
///
/// Numbers are matched in their shortest `Display` form, which never uses
/// exponent notation: `1e-7` is searched as `0.0000001`.
pub fn matches(order: &Order, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    if order.id.to_string().contains(needle)
        || search_number(order.latitude).contains(needle)
        || search_number(order.longitude).contains(needle)
        || search_number(order.subtotal).contains(needle)
    {
        return true;
    }
    order
        .jurisdictions
        .as_ref()
        .map(|j| j.search_text().to_lowercase().contains(needle))
        .unwrap_or(false)
}

/// `-0.0` renders as `0`.
fn search_number(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        value.to_string()
    }
}

pub fn filter<'a>(orders: &'a [Order], search: &str) -> Vec<&'a Order> {
    let needle = search.to_lowercase();
    orders.iter().filter(|o| matches(o, &needle)).collect()
}

/// Stable sort; ties keep their incoming relative order.
pub fn sort(list: &mut [&Order], mode: SortMode) {
    match mode {
        SortMode::Newest => {}
        SortMode::Highest => list.sort_by(|a, b| cmp_f64(b.composite_tax_rate, a.composite_tax_rate)),
        SortMode::Lowest => list.sort_by(|a, b| cmp_f64(a.total_amount, b.total_amount)),
    }
}

fn cmp_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

// ─── Pagination ──────────────────────────────────────────────────────────────

/// `ceil(filtered / page_size)`, never below 1.
pub fn page_count(filtered: usize, page_size: usize) -> usize {
    filtered.div_ceil(page_size.max(1)).max(1)
}

/// Clamp a requested 1-based page into `[1, page_count]`.
pub fn clamp_page(requested: usize, page_count: usize) -> usize {
    requested.clamp(1, page_count.max(1))
}

/// The slice of orders the list view renders.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderPage<'a> {
    pub items: Vec<&'a Order>,
    /// Effective (clamped) page, 1-based.
    pub page: usize,
    pub page_count: usize,
    pub filtered_count: usize,
    pub page_size: usize,
}

impl<'a> OrderPage<'a> {
    /// The pager is only shown once the filtered set spills over one page.
    pub fn show_pager(&self) -> bool {
        self.filtered_count > self.page_size
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Row index of `id` within this page.
    pub fn position_of(&self, id: OrderId) -> Option<usize> {
        self.items.iter().position(|o| o.id == id)
    }

    pub fn ids(&self) -> Vec<OrderId> {
        self.items.iter().map(|o| o.id).collect()
    }

    pub fn into_owned(self) -> ListingPage {
        ListingPage {
            items: self.items.into_iter().cloned().collect(),
            page: self.page,
            page_count: self.page_count,
            filtered_count: self.filtered_count,
            page_size: self.page_size,
        }
    }
}

/// Owned counterpart of [`OrderPage`], detached from the store lock.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingPage {
    pub items: Vec<Order>,
    pub page: usize,
    pub page_count: usize,
    pub filtered_count: usize,
    pub page_size: usize,
}

impl ListingPage {
    pub fn show_pager(&self) -> bool {
        self.filtered_count > self.page_size
    }

    pub fn position_of(&self, id: OrderId) -> Option<usize> {
        self.items.iter().position(|o| o.id == id)
    }
}

/// Filter, sort and cut one page. A requested page past the end is clamped to
/// the last page rather than producing an error or an empty view.
pub fn derive<'a>(orders: &'a [Order], query: &ListingQuery, page_size: usize) -> OrderPage<'a> {
    let page_size = page_size.max(1);
    let mut list = filter(orders, &query.search);
    sort(&mut list, query.sort);

    let filtered_count = list.len();
    let page_count = page_count(filtered_count, page_size);
    let page = clamp_page(query.page, page_count);
    let start = (page - 1) * page_size;
    let end = (start + page_size).min(filtered_count);
    let items = if start < end {
        list.drain(start..end).collect()
    } else {
        Vec::new()
    };

    OrderPage {
        items,
        page,
        page_count,
        filtered_count,
        page_size,
    }
}
