//! Products domain module.
//!
//! This crate contains the catalog's derivation pipeline, implemented purely as
//! deterministic functions (no IO, no runtime, no shared state):
//!
//! - [`apply_filters`]: collection + [`FilterSpec`] → filtered collection
//! - [`calculate`]: item count + page size + requested page → [`PaginationState`]
//! - [`select_page`]: filtered collection + [`PaginationState`] → current page slice

pub mod filter;
pub mod pagination;
pub mod product;

pub use filter::{ActiveFilter, FilterPatch, FilterSpec, SubscriptionMode, apply_filters};
pub use pagination::{
    DEFAULT_PAGE_SIZE, MAX_VISIBLE_PAGES, PageLink, PaginationState, calculate, page_window,
    select_page,
};
pub use product::Product;
