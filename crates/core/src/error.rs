//! Catalog error model.

use thiserror::Error;

/// Result type used across the catalog crates.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Catalog-level error.
///
/// None of these are fatal: every failure is recoverable by re-invoking the
/// entry point that produced it. Bad filter or paging input never ends up here;
/// it is normalized or ignored where it enters the system.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Transient fetch failure. The message is shown to the user verbatim.
    #[error("{0}")]
    Network(String),

    /// A single-product lookup missed.
    ///
    /// Lookups surface this as `Ok(None)`; the variant exists for callers that
    /// need to turn an absent product into an error (e.g. a detail view).
    #[error("not found")]
    NotFound,

    /// An identifier was invalid (e.g. parse failure, zero).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// Seed or wire data could not be decoded.
    #[error("failed to decode catalog data: {0}")]
    Decode(String),
}

impl CatalogError {
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }

    /// Whether retrying the same call may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_message_is_displayed_verbatim() {
        let err = CatalogError::network("Network error: Failed to fetch products");
        assert_eq!(err.to_string(), "Network error: Failed to fetch products");
        assert!(err.is_transient());
    }

    #[test]
    fn lookup_and_decode_errors_are_not_transient() {
        assert!(!CatalogError::not_found().is_transient());
        assert!(!CatalogError::decode("eof").is_transient());
        assert!(!CatalogError::invalid_id("abc").is_transient());
    }
}
