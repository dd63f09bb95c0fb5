//! Runtime configuration from environment variables.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use storefront_products::DEFAULT_PAGE_SIZE;

use crate::debounce::DEFAULT_SEARCH_DEBOUNCE;
use crate::source::{LatencyProfile, SimulatedSource};

pub const CATALOG_PATH_VAR: &str = "STOREFRONT_CATALOG_PATH";
pub const PAGE_SIZE_VAR: &str = "STOREFRONT_PAGE_SIZE";
pub const LATENCY_MS_VAR: &str = "STOREFRONT_LATENCY_MS";
pub const FAILURE_RATE_VAR: &str = "STOREFRONT_FAILURE_RATE";
pub const SEARCH_DEBOUNCE_MS_VAR: &str = "STOREFRONT_SEARCH_DEBOUNCE_MS";

#[derive(Debug, Clone, PartialEq)]
pub struct CatalogConfig {
    /// Seed catalog (JSON array). `None` uses the bundled demo catalog.
    pub catalog_path: Option<PathBuf>,
    pub page_size: usize,
    pub latency: LatencyProfile,
    pub failure_rate: f64,
    pub search_debounce: Duration,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            catalog_path: None,
            page_size: DEFAULT_PAGE_SIZE,
            latency: LatencyProfile::default(),
            failure_rate: SimulatedSource::DEFAULT_FAILURE_RATE,
            search_debounce: DEFAULT_SEARCH_DEBOUNCE,
        }
    }
}

impl CatalogConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset keys use defaults and unparsable or
    /// out-of-range values are logged and replaced by defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let catalog_path = lookup(CATALOG_PATH_VAR)
            .map(|raw| raw.trim().to_string())
            .filter(|raw| !raw.is_empty())
            .map(PathBuf::from);

        let page_size = parse_var(&lookup, PAGE_SIZE_VAR, defaults.page_size, |&n| n > 0);

        let latency_ms = parse_var(
            &lookup,
            LATENCY_MS_VAR,
            defaults.latency.list.as_millis() as u64,
            |_| true,
        );
        let latency = LatencyProfile::scaled(Duration::from_millis(latency_ms));

        let failure_rate = parse_var(&lookup, FAILURE_RATE_VAR, defaults.failure_rate, |r| {
            (0.0..=1.0).contains(r)
        });

        let search_debounce = Duration::from_millis(parse_var(
            &lookup,
            SEARCH_DEBOUNCE_MS_VAR,
            defaults.search_debounce.as_millis() as u64,
            |_| true,
        ));

        Self {
            catalog_path,
            page_size,
            latency,
            failure_rate,
            search_debounce,
        }
    }
}

fn parse_var<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
    valid: impl Fn(&T) -> bool,
) -> T
where
    T: FromStr + Copy + core::fmt::Debug,
{
    let Some(raw) = lookup(key) else {
        return default;
    };
    match raw.trim().parse::<T>() {
        Ok(value) if valid(&value) => value,
        _ => {
            tracing::warn!(key, value = %raw, "invalid configuration value; using default {default:?}");
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> CatalogConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        CatalogConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn unset_variables_use_defaults() {
        assert_eq!(config(&[]), CatalogConfig::default());
    }

    #[test]
    fn reads_every_variable() {
        let cfg = config(&[
            (CATALOG_PATH_VAR, "/tmp/catalog.json"),
            (PAGE_SIZE_VAR, "24"),
            (LATENCY_MS_VAR, "150"),
            (FAILURE_RATE_VAR, "0.5"),
            (SEARCH_DEBOUNCE_MS_VAR, "100"),
        ]);

        assert_eq!(cfg.catalog_path, Some(PathBuf::from("/tmp/catalog.json")));
        assert_eq!(cfg.page_size, 24);
        assert_eq!(cfg.latency, LatencyProfile::scaled(Duration::from_millis(150)));
        assert_eq!(cfg.failure_rate, 0.5);
        assert_eq!(cfg.search_debounce, Duration::from_millis(100));
    }

    #[test]
    fn invalid_values_fall_back_to_defaults() {
        let cfg = config(&[
            (CATALOG_PATH_VAR, "   "),
            (PAGE_SIZE_VAR, "0"),
            (LATENCY_MS_VAR, "soon"),
            (FAILURE_RATE_VAR, "1.5"),
            (SEARCH_DEBOUNCE_MS_VAR, "-1"),
        ]);

        assert_eq!(cfg, CatalogConfig::default());
    }
}
