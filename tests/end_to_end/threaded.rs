//! Pooled pipeline against the single-threaded one.

use crate::common::*;
use lexindex::builder::build_threaded;
use lexindex::{
    results_to_string, ConcurrentIndex, Error, IndexReader, QueryProcessor, SearchMode,
    ThreadedQueryManager, WorkQueue,
};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[test]
fn test_pooled_matches_single_for_any_worker_count() {
    let corpus = sample_corpus();
    let text = corpus.root().join("text");
    let queries = corpus.root().join("queries.txt");

    for mode in [SearchMode::Exact, SearchMode::Partial] {
        let (index, results) = run_single(&text, &queries, mode);
        for workers in [1, 2, 4, 7] {
            let (pooled_index, pooled_results) = run_pooled(&text, &queries, mode, workers);
            assert_eq!(pooled_index, index, "{} workers, {:?}", workers, mode);
            assert_eq!(
                results_to_string(&pooled_results).unwrap(),
                results_to_string(&results).unwrap(),
                "{} workers, {:?}",
                workers,
                mode
            );
        }
    }
}

#[test]
fn test_many_files_few_workers() {
    let corpus = Corpus::new();
    for i in 0..40 {
        corpus.write(
            &format!("docs/{:02}/doc.txt", i),
            &format!("common words {}\n{}", i, "filler ".repeat(i % 7 + 1)),
        );
    }

    let queue = WorkQueue::new(3).unwrap();
    let index = Arc::new(ConcurrentIndex::new());
    build_threaded(&corpus.root().join("docs"), &index, &queue).unwrap();

    assert_eq!(index.location_count("common"), 40);
    assert_eq!(index.totals().len(), 40);
    assert_eq!(queue.pending(), 0);
    queue.join();
}

#[test]
fn test_reordered_queries_share_one_entry() {
    let corpus = Corpus::new();
    corpus.write("text/a.txt", "alpha beta gamma");
    corpus.write("text/b.txt", "beta beta beta delta");
    let queries = corpus.write(
        "queries.txt",
        &["alpha beta", "beta alpha", "Beta ALPHA", "beta, alpha!"].repeat(25).join("\n"),
    );

    let (_, results) = run_pooled(&corpus.root().join("text"), &queries, SearchMode::Exact, 4);
    assert_eq!(results.len(), 1);
    let hits = results.get("alpha beta").unwrap();
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].location(), corpus.location("text/b.txt"));
}

#[test]
fn test_finish_waits_for_every_task() {
    for workers in [1, 3, 8] {
        let queue = WorkQueue::new(workers).unwrap();
        let done = Arc::new(AtomicUsize::new(0));
        let seen = Arc::new(Mutex::new(Vec::new()));

        for i in 0..50 {
            let done = Arc::clone(&done);
            let seen = Arc::clone(&seen);
            queue
                .execute(move || {
                    seen.lock().push(i);
                    done.fetch_add(1, Ordering::SeqCst);
                })
                .unwrap();
        }
        queue.finish();

        assert_eq!(done.load(Ordering::SeqCst), 50);
        let mut seen = seen.lock().clone();
        seen.sort_unstable();
        assert_eq!(seen, (0..50).collect::<Vec<_>>());
        queue.join();
    }
}

#[test]
fn test_queries_after_join_fail() {
    let queue = Arc::new(WorkQueue::new(2).unwrap());
    let index = Arc::new(ConcurrentIndex::new());
    let mut manager = ThreadedQueryManager::new(index, Arc::clone(&queue));
    queue.join();

    let err = manager.process_line("cat", SearchMode::Exact).unwrap_err();
    assert!(matches!(err, Error::WorkQueue(_)));
    assert!(manager.results().is_empty());
}
