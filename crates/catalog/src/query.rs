//! `_page` / `_limit` query-string parameters.
//!
//! These are suggestions from the surrounding page, not commands: anything
//! that is not a positive integer is dropped here instead of surfacing as an
//! error.

use serde::{Deserialize, Serialize};

use storefront_products::{DEFAULT_PAGE_SIZE, PaginationState};

pub const PAGE_PARAM: &str = "_page";
pub const LIMIT_PARAM: &str = "_limit";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParams {
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

impl QueryParams {
    /// Parse a query string (with or without the leading `?`).
    ///
    /// Unknown keys are skipped; for repeated keys the last valid value wins.
    pub fn parse(query: &str) -> Self {
        let mut params = QueryParams::default();
        let query = query.trim().trim_start_matches('?');

        for pair in query.split('&').filter(|pair| !pair.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let target = match key {
                PAGE_PARAM => &mut params.page,
                LIMIT_PARAM => &mut params.limit,
                _ => continue,
            };
            match parse_positive(value) {
                Some(n) => *target = Some(n),
                None => tracing::debug!(key, value, "ignoring invalid query parameter"),
            }
        }

        params
    }

    /// Parameters that reproduce the given page descriptor.
    pub fn from_pagination(pagination: &PaginationState) -> Self {
        Self {
            page: Some(pagination.current_page()),
            limit: Some(pagination.page_size()),
        }
    }

    /// Render back to a query string.
    ///
    /// `_limit` is omitted when it equals the default page size.
    pub fn to_query_string(&self) -> String {
        let mut parts = Vec::with_capacity(2);
        if let Some(page) = self.page {
            parts.push(format!("{PAGE_PARAM}={page}"));
        }
        if let Some(limit) = self.limit.filter(|&limit| limit != DEFAULT_PAGE_SIZE) {
            parts.push(format!("{LIMIT_PARAM}={limit}"));
        }
        parts.join("&")
    }
}

fn parse_positive(raw: &str) -> Option<usize> {
    raw.trim().parse::<usize>().ok().filter(|&n| n >= 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_products::calculate;

    #[test]
    fn parses_both_parameters() {
        let params = QueryParams::parse("?_page=3&_limit=24");
        assert_eq!(params.page, Some(3));
        assert_eq!(params.limit, Some(24));
    }

    #[test]
    fn ignores_non_numeric_zero_and_negative_values() {
        let params = QueryParams::parse("_page=0&_limit=abc");
        assert_eq!(params, QueryParams::default());

        let params = QueryParams::parse("_page=-2&_limit=&_page=2.5");
        assert_eq!(params, QueryParams::default());
    }

    #[test]
    fn skips_unknown_keys_and_keeps_last_valid_value() {
        let params = QueryParams::parse("sort=asc&_page=2&utm=x&_page=oops&_page=5");
        assert_eq!(params.page, Some(5));
        assert_eq!(params.limit, None);
    }

    #[test]
    fn empty_query_is_default() {
        assert_eq!(QueryParams::parse(""), QueryParams::default());
        assert_eq!(QueryParams::parse("?"), QueryParams::default());
    }

    #[test]
    fn default_limit_is_left_out_of_query_string() {
        let default_size = QueryParams::from_pagination(&calculate(40, DEFAULT_PAGE_SIZE, 2));
        assert_eq!(default_size.to_query_string(), "_page=2");

        let custom = QueryParams::from_pagination(&calculate(40, 24, 2));
        assert_eq!(custom.to_query_string(), "_page=2&_limit=24");
    }
}
