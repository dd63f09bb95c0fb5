//! Strongly-typed product identifier.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// Identifier of a product.
///
/// Numeric, unique and stable across reloads. Lookups only accept positive
/// values; `0` never names a product.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(u64);

impl ProductId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn get(self) -> u64 {
        self.0
    }

    /// Whether the id can name a product at all.
    pub fn is_valid(self) -> bool {
        self.0 > 0
    }
}

impl core::fmt::Display for ProductId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<u64> for ProductId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<ProductId> for u64 {
    fn from(value: ProductId) -> Self {
        value.0
    }
}

impl FromStr for ProductId {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s
            .trim()
            .parse::<u64>()
            .map_err(|e| CatalogError::invalid_id(format!("ProductId: {e}")))?;
        if raw == 0 {
            return Err(CatalogError::invalid_id("ProductId: must be positive"));
        }
        Ok(Self(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_positive_ids() {
        assert_eq!(" 42 ".parse::<ProductId>().unwrap(), ProductId::new(42));
    }

    #[test]
    fn rejects_zero_and_garbage() {
        assert!(matches!("0".parse::<ProductId>(), Err(CatalogError::InvalidId(_))));
        assert!(matches!("abc".parse::<ProductId>(), Err(CatalogError::InvalidId(_))));
        assert!(matches!("-3".parse::<ProductId>(), Err(CatalogError::InvalidId(_))));
    }

    #[test]
    fn serializes_as_plain_number() {
        let json = serde_json::to_string(&ProductId::new(7)).unwrap();
        assert_eq!(json, "7");
    }
}
