//! Product fetch collaborator.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;

use storefront_core::{CatalogError, CatalogResult, Entity, ProductId};
use storefront_products::Product;

/// Message used by [`SimulatedSource`] for injected failures.
pub const NETWORK_ERROR_MESSAGE: &str = "Network error: Failed to fetch products";

/// Async source of the product collection.
///
/// Calls take non-trivial wall-clock time and carry no cancellation token;
/// timeouts, if any, are imposed by the caller.
#[async_trait]
pub trait ProductSource: Send + Sync {
    /// Fetch the whole collection.
    async fn fetch_products(&self) -> CatalogResult<Vec<Product>>;

    /// Look up a single product. A miss is `Ok(None)`, not an error.
    async fn get_product(&self, id: ProductId) -> CatalogResult<Option<Product>>;

    /// Number of published products.
    async fn total_published(&self) -> CatalogResult<usize> {
        let products = self.fetch_products().await?;
        Ok(products.iter().filter(|p| p.is_published()).count())
    }
}

#[async_trait]
impl<S> ProductSource for Arc<S>
where
    S: ProductSource + ?Sized,
{
    async fn fetch_products(&self) -> CatalogResult<Vec<Product>> {
        (**self).fetch_products().await
    }

    async fn get_product(&self, id: ProductId) -> CatalogResult<Option<Product>> {
        (**self).get_product(id).await
    }

    async fn total_published(&self) -> CatalogResult<usize> {
        (**self).total_published().await
    }
}

/// Simulated per-call latency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatencyProfile {
    pub list: Duration,
    pub lookup: Duration,
    pub count: Duration,
}

impl Default for LatencyProfile {
    fn default() -> Self {
        Self::scaled(Duration::from_millis(750))
    }
}

impl LatencyProfile {
    /// No artificial delay at all.
    pub fn none() -> Self {
        Self::scaled(Duration::ZERO)
    }

    /// Derive lookup and count latency from the list latency
    /// (750ms list → 300ms lookup → 100ms count).
    pub fn scaled(list: Duration) -> Self {
        Self {
            list,
            lookup: list * 2 / 5,
            count: list * 2 / 15,
        }
    }
}

/// In-memory source with simulated network latency and random failures.
///
/// Only published products ever leave this source.
#[derive(Debug, Clone)]
pub struct SimulatedSource {
    products: Arc<[Product]>,
    latency: LatencyProfile,
    failure_rate: f64,
}

impl SimulatedSource {
    /// Default failure rate of collection fetches.
    pub const DEFAULT_FAILURE_RATE: f64 = 0.05;

    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products: products.into(),
            latency: LatencyProfile::default(),
            failure_rate: Self::DEFAULT_FAILURE_RATE,
        }
    }

    /// Decode seed data: a JSON array of products.
    pub fn from_json_str(json: &str) -> CatalogResult<Self> {
        let products: Vec<Product> =
            serde_json::from_str(json).map_err(|e| CatalogError::decode(e.to_string()))?;
        Ok(Self::new(products))
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> CatalogResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| CatalogError::decode(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&json)
    }

    pub fn with_latency(mut self, latency: LatencyProfile) -> Self {
        self.latency = latency;
        self
    }

    /// Probability (clamped to `0.0..=1.0`) that a collection fetch fails.
    pub fn with_failure_rate(mut self, rate: f64) -> Self {
        self.failure_rate = if rate.is_nan() { 0.0 } else { rate.clamp(0.0, 1.0) };
        self
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    fn should_fail(&self) -> bool {
        self.failure_rate > 0.0 && rand::rng().random_bool(self.failure_rate)
    }

    fn published(&self) -> impl Iterator<Item = &Product> {
        self.products.iter().filter(|p| p.is_published())
    }
}

#[async_trait]
impl ProductSource for SimulatedSource {
    async fn fetch_products(&self) -> CatalogResult<Vec<Product>> {
        tokio::time::sleep(self.latency.list).await;

        if self.should_fail() {
            tracing::debug!("simulated fetch failure");
            return Err(CatalogError::network(NETWORK_ERROR_MESSAGE));
        }

        Ok(self.published().cloned().collect())
    }

    async fn get_product(&self, id: ProductId) -> CatalogResult<Option<Product>> {
        tokio::time::sleep(self.latency.lookup).await;
        Ok(self.published().find(|p| p.id() == id).cloned())
    }

    async fn total_published(&self) -> CatalogResult<usize> {
        tokio::time::sleep(self.latency.count).await;
        Ok(self.published().count())
    }
}
