//! `storefront` demo binary.
//!
//! Loads the catalog, applies an optional query string (`_page`, `_limit`)
//! and search term, then prints the resulting snapshot as JSON on stdout.
//!
//! Usage: `storefront [QUERY] [SEARCH]`

use std::sync::Arc;

use anyhow::{Context, bail};

use storefront_catalog::{
    CatalogConfig, CatalogStore, DEMO_CATALOG_JSON, LoadController, LoadOutcome, QueryParams,
    SimulatedSource,
};

const MAX_LOAD_ATTEMPTS: usize = 3;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    storefront_observability::init();

    let config = CatalogConfig::from_env();
    let mut args = std::env::args().skip(1);
    let query = args.next().map(|raw| QueryParams::parse(&raw));
    let search = args.next();

    let source = match &config.catalog_path {
        Some(path) => SimulatedSource::from_json_file(path)
            .with_context(|| format!("failed to read catalog from {}", path.display()))?,
        None => SimulatedSource::from_json_str(DEMO_CATALOG_JSON)
            .context("bundled demo catalog is malformed")?,
    }
    .with_latency(config.latency)
    .with_failure_rate(config.failure_rate);
    tracing::info!(products = source.len(), "catalog source ready");

    let store = CatalogStore::new(config.page_size);
    let controller = LoadController::new(store.clone(), Arc::new(source));

    let mut outcome = controller.load().await;
    for attempt in 2..=MAX_LOAD_ATTEMPTS {
        if outcome.is_loaded() {
            break;
        }
        tracing::info!(attempt, "retrying product load");
        outcome = controller.retry().await;
    }
    if let LoadOutcome::Failed(err) = &outcome {
        bail!("giving up after {MAX_LOAD_ATTEMPTS} attempts: {err}");
    }

    if let Some(params) = query {
        store.apply_query(&params);
    }
    if let Some(term) = search {
        let debouncer = store.search_debouncer(config.search_debounce);
        debouncer.call(term);
        debouncer.shutdown().await;
    }

    let snapshot = store.snapshot();
    let json = serde_json::to_string_pretty(&snapshot).context("failed to encode snapshot")?;
    println!("{json}");

    Ok(())
}
