//! Shared handle around [`CatalogState`].

use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use tokio::sync::watch;

use storefront_core::CatalogResult;
use storefront_products::{FilterPatch, FilterSpec, PaginationState, Product};

use crate::debounce::Debouncer;
use crate::query::QueryParams;
use crate::state::{CatalogSnapshot, CatalogState, LoadOutcome, LoadStatus, LoadTicket};

/// Cheaply clonable handle to one catalog state.
///
/// Built once by the composition root and handed to the load controller and
/// to display consumers. Each mutation holds the write lock for its whole
/// derivation chain, so readers only ever observe fully derived state.
///
/// Every mutation bumps a revision number published on a `watch` channel;
/// display layers [`subscribe`](Self::subscribe) to it instead of polling.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    inner: Arc<RwLock<CatalogState>>,
    revision: Arc<watch::Sender<u64>>,
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::from_state(CatalogState::default())
    }
}

impl CatalogStore {
    pub fn new(page_size: usize) -> Self {
        Self::from_state(CatalogState::new(page_size))
    }

    pub fn from_state(state: CatalogState) -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            inner: Arc::new(RwLock::new(state)),
            revision: Arc::new(revision),
        }
    }

    /// Receiver that changes whenever a mutation completes.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    pub fn revision(&self) -> u64 {
        *self.revision.borrow()
    }

    /// Run `f` against a consistent view of the state.
    pub fn read<R>(&self, f: impl FnOnce(&CatalogState) -> R) -> R {
        let guard = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    fn write<R>(&self, f: impl FnOnce(&mut CatalogState) -> R) -> R {
        let result = {
            let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
            f(&mut guard)
        };
        self.revision.send_modify(|rev| *rev += 1);
        result
    }

    // ---- read accessors -------------------------------------------------

    pub fn snapshot(&self) -> CatalogSnapshot {
        self.read(|s| CatalogSnapshot::from(s))
    }

    pub fn products(&self) -> Vec<Product> {
        self.read(|s| s.products().to_vec())
    }

    pub fn filtered_products(&self) -> Vec<Product> {
        self.read(|s| s.filtered_products().to_vec())
    }

    pub fn current_page_items(&self) -> Vec<Product> {
        self.read(|s| s.current_page_items().to_vec())
    }

    pub fn filters(&self) -> FilterSpec {
        self.read(|s| s.filters().clone())
    }

    pub fn pagination(&self) -> PaginationState {
        self.read(CatalogState::pagination)
    }

    pub fn status(&self) -> LoadStatus {
        self.read(|s| s.status().clone())
    }

    pub fn error(&self) -> Option<String> {
        self.read(|s| s.error().map(str::to_owned))
    }

    // ---- mutations ------------------------------------------------------

    pub fn update_filters(&self, patch: FilterPatch) {
        self.write(|s| s.update_filters(patch));
    }

    pub fn clear_filters(&self) {
        self.write(CatalogState::clear_filters);
    }

    pub fn set_page_size(&self, page_size: usize) {
        self.write(|s| s.set_page_size(page_size));
    }

    pub fn set_current_page(&self, page: i64) {
        self.write(|s| s.set_current_page(page));
    }

    /// Feed `_page` / `_limit` suggestions through the regular entry points.
    ///
    /// The page size goes first so the page is clamped against the final
    /// page count. Absent values leave the state alone.
    pub fn apply_query(&self, params: &QueryParams) {
        self.write(|s| {
            if let Some(limit) = params.limit {
                s.set_page_size(limit);
            }
            if let Some(page) = params.page {
                s.set_current_page(i64::try_from(page).unwrap_or(i64::MAX));
            }
        });
    }

    /// Debouncer that pushes the settled search term into the filters.
    ///
    /// A settled term equal to the active one does not trigger an update (and
    /// so does not reset the page). Must be called inside a tokio runtime.
    pub fn search_debouncer(&self, window: Duration) -> Debouncer<String> {
        let store = self.clone();
        Debouncer::new(window, move |term: String| {
            if store.read(|s| s.filters().search == term) {
                return;
            }
            tracing::debug!(%term, "search settled");
            store.update_filters(FilterPatch::new().search(term));
        })
    }

    // ---- load lifecycle -------------------------------------------------

    pub(crate) fn begin_load(&self) -> LoadTicket {
        self.write(CatalogState::begin_load)
    }

    pub(crate) fn finish_load(
        &self,
        ticket: LoadTicket,
        result: CatalogResult<Vec<Product>>,
    ) -> LoadOutcome {
        self.write(|s| s.finish_load(ticket, result))
    }
}
