//! Index Build and Search Benchmarks
//!
//! Run with: cargo bench --bench index_search
//!
//! Labels:
//! - build/{single,pooled_N}: directory ingestion into a fresh index
//! - search/{exact,partial}: ranked search over a prebuilt index
//! - merge: folding per-file indexes into one

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use lexindex::builder::{build, build_threaded};
use lexindex::{tokenize, ConcurrentIndex, IndexWriter, InvertedIndex, SearchMode, WorkQueue};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

// ============================================================================
// Constants and Utilities
// ============================================================================

/// Fixed seed for reproducible corpora
const BENCH_SEED: u64 = 0x5EED_1DEA_F00D_CAFE;

const WORDS: &[&str] = &[
    "compute", "computer", "computing", "index", "indexed", "search", "searching", "query",
    "thread", "worker", "queue", "merge", "rank", "score", "location", "position", "term",
    "partial", "exact", "result",
];

/// Simple LCG for deterministic word choice
fn lcg_next(state: &mut u64) -> u64 {
    *state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
    *state
}

fn line(state: &mut u64, words: usize) -> String {
    (0..words)
        .map(|_| WORDS[(lcg_next(state) >> 33) as usize % WORDS.len()])
        .collect::<Vec<_>>()
        .join(" ")
}

/// Write `files` text files of `lines` lines each.
fn write_corpus(dir: &Path, files: usize, lines: usize) {
    let mut state = BENCH_SEED;
    for f in 0..files {
        let text: Vec<String> = (0..lines).map(|_| line(&mut state, 12)).collect();
        fs::write(dir.join(format!("doc{:04}.txt", f)), text.join("\n")).unwrap();
    }
}

fn query(words: &[&str]) -> BTreeSet<String> {
    words.iter().map(|w| w.to_string()).collect()
}

// ============================================================================
// Benchmarks
// ============================================================================

fn build_benchmarks(c: &mut Criterion) {
    let dir = TempDir::new().unwrap();
    write_corpus(dir.path(), 64, 200);

    let mut group = c.benchmark_group("build");
    group.measurement_time(Duration::from_secs(5));
    group.sample_size(20);
    group.throughput(Throughput::Elements(64));

    group.bench_function("single", |b| {
        b.iter(|| {
            let mut index = InvertedIndex::new();
            build(dir.path(), &mut index).unwrap();
            index
        })
    });

    for workers in [2, 4, 8] {
        group.bench_with_input(BenchmarkId::new("pooled", workers), &workers, |b, &workers| {
            let queue = WorkQueue::new(workers).unwrap();
            b.iter(|| {
                let index = Arc::new(ConcurrentIndex::new());
                build_threaded(dir.path(), &index, &queue).unwrap();
                index
            });
            queue.join();
        });
    }

    group.finish();
}

fn search_benchmarks(c: &mut Criterion) {
    let mut state = BENCH_SEED;
    let mut index = InvertedIndex::new();
    for f in 0..500 {
        let location = format!("doc{:04}.txt", f);
        let mut position = 1;
        for _ in 0..20 {
            let terms = tokenize(&line(&mut state, 12));
            index.add_all(&terms, &location, position);
            position += terms.len();
        }
    }

    let mut group = c.benchmark_group("search");
    let cases: [(&str, &[&str]); 2] = [
        ("one_term", &["comput"]),
        ("three_terms", &["comput", "index", "rank"]),
    ];
    for (name, words) in cases {
        let terms = query(words);
        group.bench_with_input(BenchmarkId::new("exact", name), &terms, |b, terms| {
            b.iter(|| index.search(terms, SearchMode::Exact))
        });
        let prefixes: BTreeSet<String> = terms.iter().map(|t| t[..3].to_string()).collect();
        group.bench_with_input(BenchmarkId::new("partial", name), &prefixes, |b, terms| {
            b.iter(|| index.search(terms, SearchMode::Partial))
        });
    }
    group.finish();
}

fn merge_benchmarks(c: &mut Criterion) {
    let mut state = BENCH_SEED;
    let parts: Vec<InvertedIndex> = (0..64)
        .map(|f| {
            let mut part = InvertedIndex::new();
            let terms = tokenize(&line(&mut state, 400));
            part.add_all(&terms, &format!("doc{:04}.txt", f), 1);
            part
        })
        .collect();

    c.bench_function("merge", |b| {
        b.iter(|| {
            let mut merged = InvertedIndex::new();
            for part in parts.iter().cloned() {
                merged.merge(part);
            }
            merged
        })
    });
}

criterion_group!(build_benches, build_benchmarks);
criterion_group!(search_benches, search_benchmarks, merge_benchmarks);
criterion_main!(build_benches, search_benches);
