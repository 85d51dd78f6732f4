//! Benchmarks for the aggregation join and the search pipeline
//!
//! Measures merging page replies and refining a merged listing, the two
//! CPU-bound steps between network fetches.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use moviebrowser::movies::search::refine;
use moviebrowser::movies::PageCollector;
use moviebrowser::{Movie, MovieId, PageResult};

const PAGE_SIZE: u32 = 20;

fn page(page: u32, total: u32) -> PageResult {
    let first = (page - 1) * PAGE_SIZE + 1;
    let movies = (first..first + PAGE_SIZE)
        .map(|id| Movie {
            id: Some(MovieId::new(i64::from(id % 700))),
            title: Some(format!("Movie {id}")),
            rating: (id % 7 != 0).then(|| f64::from(id % 100) / 10.0),
            poster_path: Some(format!("/poster-{id}.jpg")),
            ..Movie::default()
        })
        .collect();
    PageResult {
        page,
        movies,
        total_pages: total,
    }
}

fn bench_collector(c: &mut Criterion) {
    let mut group = c.benchmark_group("page_collector");

    for pages in [3u32, 10, 50] {
        group.bench_with_input(BenchmarkId::new("reverse_arrival", pages), &pages, |b, &pages| {
            b.iter(|| {
                let mut collector = PageCollector::new();
                for p in (1..=pages).rev() {
                    collector.record(p, Ok(page(p, 500)));
                }
                black_box(collector.finish())
            })
        });
    }

    group.finish();
}

fn bench_refine(c: &mut Criterion) {
    let mut group = c.benchmark_group("refine");

    let merged: Vec<Movie> = (1..=50).flat_map(|p| page(p, 500).movies).collect();

    group.bench_function("empty_query", |b| {
        b.iter(|| black_box(refine(merged.clone(), black_box(""))))
    });

    group.bench_function("selective_query", |b| {
        b.iter(|| black_box(refine(merged.clone(), black_box("Movie 12"))))
    });

    group.bench_function("no_match", |b| {
        b.iter(|| black_box(refine(merged.clone(), black_box("Zzz"))))
    });

    group.finish();
}

criterion_group!(benches, bench_collector, bench_refine);
criterion_main!(benches);
