use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use catalog_core::{LimitOffsetPage, LimitOffsetParams, Page, PageParams, PaginationLimits};
use catalog_infra::{InMemoryProductStore, ProductStore};
use catalog_products::{NewProduct, ProductFilter};

fn seeded_store(rt: &tokio::runtime::Runtime, n: usize) -> InMemoryProductStore {
    let store = InMemoryProductStore::new();
    rt.block_on(async {
        for i in 0..n {
            let draft = NewProduct::new(format!("name-{}", i % 10), format!("CODE-{i}"), "bench", "1.00")
                .expect("valid draft");
            store.create(draft).await.expect("unique code");
        }
    });
    store
}

/// Full listing path: materialize the filtered set, then cut one page.
fn bench_list_then_paginate(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().expect("tokio runtime");
    let limits = PaginationLimits::default();
    let mut group = c.benchmark_group("list_then_paginate");

    for n in [1_000usize, 10_000, 100_000] {
        let store = seeded_store(&rt, n);
        group.throughput(Throughput::Elements(n as u64));

        group.bench_with_input(BenchmarkId::new("page_based/last_page", n), &n, |b, &n| {
            let last = n.div_ceil(100) as i64;
            let params = PageParams::new(Some(last), Some(100), &limits).expect("valid params");
            b.iter(|| {
                let all = rt.block_on(store.list_all(&ProductFilter::default())).expect("list");
                black_box(Page::paginate(all, params))
            })
        });

        group.bench_with_input(BenchmarkId::new("limit_offset/middle", n), &n, |b, &n| {
            let params = LimitOffsetParams::new(Some(100), Some((n / 2) as i64), &limits).expect("valid params");
            b.iter(|| {
                let all = rt.block_on(store.list_all(&ProductFilter::default())).expect("list");
                black_box(LimitOffsetPage::paginate(all, params))
            })
        });

        group.bench_with_input(BenchmarkId::new("filtered_by_name", n), &n, |b, _| {
            let filter = ProductFilter::by_name("name-3");
            let params = PageParams::new(Some(1), Some(50), &limits).expect("valid params");
            b.iter(|| {
                let all = rt.block_on(store.list_all(&filter)).expect("list");
                black_box(Page::paginate(all, params))
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_list_then_paginate);
criterion_main!(benches);
