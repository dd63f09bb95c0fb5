use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use storefront_products::{
    DEFAULT_PAGE_SIZE, FilterSpec, Product, SubscriptionMode, apply_filters, calculate, select_page,
};

const TAGS: [&str; 6] = ["Dog", "Cat", "Chews", "Food", "Toys", "Treats"];

fn synthetic_catalog(size: usize) -> Vec<Product> {
    (0..size)
        .map(|i| {
            Product::new(i as u64 + 1, format!("Product {i}"), (i % 97) as f64 + 0.99)
                .with_tags([TAGS[i % TAGS.len()], TAGS[(i / 3) % TAGS.len()]])
                .with_subscription(i % 4 == 0)
        })
        .collect()
}

/// Full derivation chain: filter, paginate, slice.
fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_paginate_select");
    let spec = FilterSpec {
        search: "do".to_string(),
        price_min: Some(10.0),
        price_max: Some(80.0),
        subscription: SubscriptionMode::Any,
    };

    for size in [100usize, 1_000, 10_000] {
        let catalog = synthetic_catalog(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &catalog, |b, catalog| {
            b.iter(|| {
                let filtered = apply_filters(black_box(catalog), black_box(&spec));
                let pagination = calculate(filtered.len(), DEFAULT_PAGE_SIZE, 2);
                black_box(select_page(&filtered, &pagination).len())
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);
