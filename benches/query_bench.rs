//! Query builder and debounce benchmarks.
//!
//! `build_query` runs once per dispatched search, and the debouncer sees
//! every keystroke. Neither should ever show up next to network latency;
//! these numbers keep that honest.
//!
//! # Groups
//!
//! | Group | What it measures |
//! |-------|-----------------|
//! | `build_query` | Blank, short, long and regex-escaped terms, paginated or not |
//! | `debounce` | Cost of pushing a keystroke burst through the debouncer |
//!
//! # Viewing results
//!
//! ```sh
//! cargo bench --bench query_bench
//! ```

use std::hint::black_box;
use std::time::Duration;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use origins_core::query::{ParamStyle, QueryOptions};
use origins_core::{build_query, SearchRequest};
use origins_cypher::Debouncer;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

// ---------------------------------------------------------------------------
// build_query
// ---------------------------------------------------------------------------

fn build_query_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_query");
    group.throughput(Throughput::Elements(1));

    let long = "protein kinase ".repeat(20);
    let cases = [
        ("blank", SearchRequest::all()),
        ("short", SearchRequest::term("gene")),
        ("long", SearchRequest::term(long)),
        ("metachars", SearchRequest::term("a.b*c(d)[e]+f?")),
    ];

    let plain = QueryOptions::default();
    let paged = QueryOptions {
        param_style: ParamStyle::Dollar,
        paginate: true,
        escape_term: true,
        ..QueryOptions::default()
    };

    for (name, request) in &cases {
        group.bench_with_input(BenchmarkId::new("plain", name), request, |b, r| {
            b.iter(|| build_query(black_box(r), &plain))
        });
        group.bench_with_input(BenchmarkId::new("escaped_paged", name), request, |b, r| {
            b.iter(|| build_query(black_box(r), &paged))
        });
    }

    group.finish();
}

// ---------------------------------------------------------------------------
// Debounce
// ---------------------------------------------------------------------------

fn debounce_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("debounce");
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(_) => return,
    };

    for &burst in &[10usize, 100] {
        group.throughput(Throughput::Elements(burst as u64));
        group.bench_with_input(BenchmarkId::new("burst", burst), &burst, |b, &burst| {
            b.to_async(&runtime).iter(|| async move {
                let (tx, mut rx) = mpsc::unbounded_channel();
                let cancel = CancellationToken::new();
                let debouncer = Debouncer::spawn(Duration::from_millis(1), tx, cancel.clone());
                for i in 0..burst {
                    debouncer.submit(i);
                }
                let last = rx.recv().await;
                cancel.cancel();
                black_box(last)
            })
        });
    }

    group.finish();
}

criterion_group!(benches, build_query_bench, debounce_bench);
criterion_main!(benches);
