//! Catalog state and its derivation chain.
//!
//! `CatalogState` is a plain reducer: every mutation is synchronous, takes
//! `&mut self`, and re-runs filter → paginate before returning, so derived
//! state is never stale relative to its inputs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use storefront_core::{CatalogError, CatalogResult};
use storefront_products::{
    DEFAULT_PAGE_SIZE, FilterPatch, FilterSpec, PaginationState, Product, apply_filters, calculate,
    select_page,
};

/// Shown when a failed fetch carries no message of its own.
pub const DEFAULT_LOAD_ERROR: &str = "Failed to fetch products";

/// Lifecycle of the product collection load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "message", rename_all = "lowercase")]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed(String),
}

impl LoadStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoadStatus::Idle => "idle",
            LoadStatus::Loading => "loading",
            LoadStatus::Succeeded => "succeeded",
            LoadStatus::Failed(_) => "failed",
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadStatus::Loading)
    }

    /// Error message for display, if the last load failed.
    pub fn error(&self) -> Option<&str> {
        match self {
            LoadStatus::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Handle for one load request.
///
/// Only the most recently issued ticket may settle the load; see
/// [`CatalogState::finish_load`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
}

impl LoadTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// What a finished load did to the state.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// The collection was replaced; `published` products are now canonical.
    Loaded { published: usize },
    /// The fetch failed; the canonical collection was left untouched.
    Failed(CatalogError),
    /// A newer load was started before this one resolved; its result was dropped.
    Superseded { generation: u64, latest: u64 },
}

impl LoadOutcome {
    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadOutcome::Loaded { .. })
    }
}

/// Owner of the canonical collection, the filters and all derived state.
#[derive(Debug, Clone)]
pub struct CatalogState {
    products: Vec<Product>,
    filtered: Vec<Product>,
    filters: FilterSpec,
    pagination: PaginationState,
    status: LoadStatus,
    loaded_at: Option<DateTime<Utc>>,
    generation: u64,
}

impl Default for CatalogState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl CatalogState {
    /// Empty state with the given page size (0 falls back to the default).
    pub fn new(page_size: usize) -> Self {
        let page_size = if page_size == 0 {
            DEFAULT_PAGE_SIZE
        } else {
            page_size
        };
        Self {
            products: Vec::new(),
            filtered: Vec::new(),
            filters: FilterSpec::default(),
            pagination: calculate(0, page_size, 1),
            status: LoadStatus::Idle,
            loaded_at: None,
            generation: 0,
        }
    }

    // ---- read accessors -------------------------------------------------

    /// Canonical (published, unfiltered) collection.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn filtered_products(&self) -> &[Product] {
        &self.filtered
    }

    pub fn filters(&self) -> &FilterSpec {
        &self.filters
    }

    pub fn pagination(&self) -> PaginationState {
        self.pagination
    }

    /// Items on the current page.
    pub fn current_page_items(&self) -> &[Product] {
        select_page(&self.filtered, &self.pagination)
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn error(&self) -> Option<&str> {
        self.status.error()
    }

    pub fn is_loading(&self) -> bool {
        self.status.is_loading()
    }

    /// When the canonical collection was last replaced.
    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.loaded_at
    }

    // ---- mutations ------------------------------------------------------

    /// Merge a partial filter update and go back to page 1.
    pub fn update_filters(&mut self, patch: FilterPatch) {
        self.filters.merge(patch);
        self.refilter(1);
        tracing::debug!(
            filtered = self.filtered.len(),
            total_pages = self.pagination.total_pages(),
            "filters updated"
        );
    }

    /// Reset every criterion and go back to page 1.
    pub fn clear_filters(&mut self) {
        self.filters = FilterSpec::default();
        self.refilter(1);
        tracing::debug!(filtered = self.filtered.len(), "filters cleared");
    }

    /// Change the page size, keeping the current page (reclamped).
    ///
    /// A page size of 0 is ignored.
    pub fn set_page_size(&mut self, page_size: usize) {
        if page_size == 0 {
            tracing::warn!("ignoring page size of 0");
            return;
        }
        self.pagination = self.pagination.with_page_size(page_size);
        tracing::debug!(
            page_size,
            current_page = self.pagination.current_page(),
            total_pages = self.pagination.total_pages(),
            "page size changed"
        );
    }

    /// Move to `page`, clamped into the valid range.
    pub fn set_current_page(&mut self, page: i64) {
        self.pagination = self.pagination.with_page(page);
        tracing::debug!(
            requested = page,
            current_page = self.pagination.current_page(),
            "page changed"
        );
    }

    // ---- load lifecycle -------------------------------------------------

    /// Enter `loading` and issue a ticket for the new request.
    ///
    /// Any previous error is cleared; existing data stays in place.
    pub(crate) fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        self.status = LoadStatus::Loading;
        LoadTicket {
            generation: self.generation,
        }
    }

    /// Settle the request identified by `ticket`.
    ///
    /// Results for anything but the latest ticket are discarded, so the most
    /// recently triggered load always wins regardless of resolution order.
    pub(crate) fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: CatalogResult<Vec<Product>>,
    ) -> LoadOutcome {
        if ticket.generation != self.generation {
            return LoadOutcome::Superseded {
                generation: ticket.generation,
                latest: self.generation,
            };
        }

        match result {
            Ok(products) => {
                self.load_succeeded(products);
                LoadOutcome::Loaded {
                    published: self.products.len(),
                }
            }
            Err(err) => {
                self.load_failed(&err);
                LoadOutcome::Failed(err)
            }
        }
    }

    fn load_succeeded(&mut self, products: Vec<Product>) {
        self.products = products.into_iter().filter(Product::is_published).collect();
        self.status = LoadStatus::Succeeded;
        self.loaded_at = Some(Utc::now());
        // Active filters survive a reload; the current page is kept and reclamped.
        self.refilter(self.pagination.current_page() as i64);
    }

    fn load_failed(&mut self, err: &CatalogError) {
        let message = match err {
            CatalogError::Network(message) => message.clone(),
            other => other.to_string(),
        };
        let message = if message.trim().is_empty() {
            DEFAULT_LOAD_ERROR.to_string()
        } else {
            message
        };
        self.status = LoadStatus::Failed(message);
    }

    fn refilter(&mut self, requested_page: i64) {
        self.filtered = apply_filters(&self.products, &self.filters);
        self.pagination = calculate(
            self.filtered.len(),
            self.pagination.page_size(),
            requested_page,
        );
    }
}

/// Owned, serializable copy of everything a display layer reads.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogSnapshot {
    pub products: Vec<Product>,
    pub filtered: Vec<Product>,
    pub page: Vec<Product>,
    pub filters: FilterSpec,
    pub pagination: PaginationState,
    pub status: LoadStatus,
    pub loaded_at: Option<DateTime<Utc>>,
}

impl From<&CatalogState> for CatalogSnapshot {
    fn from(state: &CatalogState) -> Self {
        Self {
            products: state.products.clone(),
            filtered: state.filtered.clone(),
            page: state.current_page_items().to_vec(),
            filters: state.filters.clone(),
            pagination: state.pagination,
            status: state.status.clone(),
            loaded_at: state.loaded_at,
        }
    }
}
