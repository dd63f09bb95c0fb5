//! `storefront-catalog`
//!
//! **Responsibility:** the catalog browser's state engine.
//!
//! This crate provides:
//! - `CatalogState`: collection, filters, pagination and load status, with
//!   every mutation re-deriving filtered results and page metadata
//! - `CatalogStore`: shared handle for the composition root to pass around
//! - `LoadController`: the async load lifecycle on top of a `ProductSource`
//! - `Debouncer`: quiet-window collapsing for search input
//!
//! Presentation, routing and transport stay outside; they read snapshots and
//! call the mutation entry points.

pub mod config;
pub mod debounce;
pub mod loader;
pub mod query;
pub mod source;
pub mod state;
pub mod store;

pub use config::CatalogConfig;
pub use debounce::{DEFAULT_SEARCH_DEBOUNCE, Debouncer};
pub use loader::LoadController;
pub use query::QueryParams;
pub use source::{LatencyProfile, ProductSource, SimulatedSource};
pub use state::{CatalogSnapshot, CatalogState, LoadOutcome, LoadStatus, LoadTicket};
pub use store::CatalogStore;

/// Demo catalog bundled with the binary.
pub const DEMO_CATALOG_JSON: &str = include_str!("../data/catalog.json");
