//! Benchmarks for trie lookups and snapshot round-trips.
//!
//! Run with: cargo bench --bench store_benchmarks

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use tagstore::infra::MemoryStorage;
use tagstore::store::{ExportOptions, TagStore, Trie};

// =============================================================================
// Test Data Generation
// =============================================================================

/// Word stems combined into tag names
const STEMS: &[&str] = &[
    "travel", "food", "music", "rust", "design", "photo", "garden", "history",
    "science", "sports", "finance", "health", "books", "movies", "cooking", "code",
];

/// Generate a deterministic tag name from an index
fn tag_name(i: usize) -> String {
    format!("{}-{}", STEMS[i % STEMS.len()], i / STEMS.len())
}

fn populated_trie(count: usize) -> Trie {
    let mut trie = Trie::new();
    for i in 0..count {
        trie.insert(&tag_name(i));
    }
    trie
}

fn populated_store(count: usize) -> TagStore<MemoryStorage> {
    let mut store = TagStore::open(MemoryStorage::new());
    for i in 0..count {
        store.add_tag(&tag_name(i), &format!("content-{}", i % 97));
    }
    store
}

// =============================================================================
// Trie Benchmarks
// =============================================================================

fn bench_trie_suggest(c: &mut Criterion) {
    let mut group = c.benchmark_group("trie_suggest");

    for size in [100, 1_000, 10_000] {
        let trie = populated_trie(size);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("narrow_prefix", size), &trie, |b, trie| {
            b.iter(|| trie.suggest(black_box("travel-1")))
        });
        group.bench_with_input(BenchmarkId::new("wide_prefix", size), &trie, |b, trie| {
            b.iter(|| trie.suggest(black_box("t")))
        });
        group.bench_with_input(BenchmarkId::new("miss", size), &trie, |b, trie| {
            b.iter(|| trie.suggest(black_box("zzz")))
        });
    }

    group.finish();
}

fn bench_trie_insert(c: &mut Criterion) {
    c.bench_function("trie_insert_1000", |b| b.iter(|| populated_trie(black_box(1_000))));
}

// =============================================================================
// Snapshot Benchmarks
// =============================================================================

fn bench_export(c: &mut Criterion) {
    let mut group = c.benchmark_group("export_json");

    for size in [100, 1_000] {
        let mut store = populated_store(size);
        group.bench_function(BenchmarkId::from_parameter(size), |b| {
            b.iter(|| store.export_json(ExportOptions::dry_run()).unwrap())
        });
    }

    group.finish();
}

fn bench_import(c: &mut Criterion) {
    let mut group = c.benchmark_group("import_json");

    for size in [100, 1_000] {
        let json = populated_store(size)
            .export_json(ExportOptions::dry_run())
            .unwrap();
        let mut target = TagStore::open(MemoryStorage::new());
        group.bench_function(BenchmarkId::from_parameter(size), |b| {
            b.iter(|| target.import_json(black_box(&json)))
        });
    }

    group.finish();
}

// =============================================================================
// Criterion Groups
// =============================================================================

criterion_group!(trie_benches, bench_trie_suggest, bench_trie_insert);
criterion_group!(snapshot_benches, bench_export, bench_import);

criterion_main!(trie_benches, snapshot_benches);
