//! Load lifecycle controller.
//!
//! Drives `idle → loading → succeeded | failed` on a [`CatalogStore`]. The
//! store lock is never held across the fetch, so filters and paging stay
//! usable while a load is in flight.

use std::sync::Arc;

use storefront_core::{CatalogResult, ProductId};
use storefront_products::Product;

use crate::source::ProductSource;
use crate::state::LoadOutcome;
use crate::store::CatalogStore;

pub struct LoadController<S: ?Sized> {
    store: CatalogStore,
    source: Arc<S>,
}

impl<S: ?Sized> Clone for LoadController<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            source: Arc::clone(&self.source),
        }
    }
}

impl<S> LoadController<S>
where
    S: ProductSource + ?Sized,
{
    pub fn new(store: CatalogStore, source: Arc<S>) -> Self {
        Self { store, source }
    }

    pub fn store(&self) -> &CatalogStore {
        &self.store
    }

    /// Fetch the collection and settle the store with the result.
    ///
    /// Overlapping calls are allowed; only the most recently started one is
    /// applied, earlier results come back as [`LoadOutcome::Superseded`].
    pub async fn load(&self) -> LoadOutcome {
        let ticket = self.store.begin_load();
        tracing::info!(generation = ticket.generation(), "loading products");

        let result = self.source.fetch_products().await;
        let outcome = self.store.finish_load(ticket, result);

        match &outcome {
            LoadOutcome::Loaded { published } => {
                let pagination = self.store.pagination();
                tracing::info!(
                    generation = ticket.generation(),
                    published,
                    filtered = pagination.total_items(),
                    current_page = pagination.current_page(),
                    "products loaded"
                );
            }
            LoadOutcome::Failed(err) => {
                tracing::warn!(generation = ticket.generation(), "failed to load products: {err}");
            }
            LoadOutcome::Superseded { generation, latest } => {
                tracing::warn!(generation, latest, "discarding superseded product load");
            }
        }

        outcome
    }

    /// Re-run the load. No backoff or attempt budget is applied here.
    pub async fn retry(&self) -> LoadOutcome {
        self.load().await
    }

    /// Single-product lookup for detail views.
    ///
    /// Invalid ids and unpublished products are reported as absent.
    pub async fn product(&self, id: ProductId) -> CatalogResult<Option<Product>> {
        if !id.is_valid() {
            return Ok(None);
        }
        let product = self.source.get_product(id).await?;
        Ok(product.filter(Product::is_published))
    }

    /// Published product count straight from the source.
    pub async fn total_published(&self) -> CatalogResult<usize> {
        self.source.total_published().await
    }
}
