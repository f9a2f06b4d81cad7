//! Shared test utilities for the integration suites.
//!
//! Import via `#[path = "../common/mod.rs"] mod common;` from a suite's main.rs.

#![allow(dead_code)]

use lexindex::builder::{build, build_threaded};
use lexindex::{
    ConcurrentIndex, InvertedIndex, QueryManager, QueryProcessor, ResultsTable, SearchMode,
    ThreadedQueryManager, WorkQueue,
};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

// ============================================================================
// Corpus
// ============================================================================

/// Temporary directory of text files.
pub struct Corpus {
    pub dir: TempDir,
}

impl Corpus {
    pub fn new() -> Self {
        Corpus {
            dir: TempDir::new().unwrap(),
        }
    }

    /// Root directory of the corpus.
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Write `text` to `name` (relative, may contain directories).
    pub fn write(&self, name: &str, text: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, text).unwrap();
        path
    }

    /// Location string the builder records for `name`.
    pub fn location(&self, name: &str) -> String {
        self.dir.path().join(name).display().to_string()
    }
}

/// A small corpus with overlapping vocabulary across nested directories.
pub fn sample_corpus() -> Corpus {
    let corpus = Corpus::new();
    corpus.write("text/cats.txt", "The cat sat on the mat.\nThe cat slept.\n");
    corpus.write(
        "text/computing/machines.txt",
        "Computers compute.\nComputation is what computing machines do.\n",
    );
    corpus.write("text/computing/people.TEXT", "People recompute what computers computed.\n");
    corpus.write("text/misc/dogs.txt", "Dogs chase cats; cats chase mice!\n");
    corpus.write("text/misc/notes.md", "cat cat cat cat\n");
    corpus.write(
        "queries.txt",
        "cat\ncats\nCOMPUTE\nthe sat\nsat the\ndog chase\n\n1234\nmouse\n",
    );
    corpus
}

/// Set of query terms.
pub fn terms(words: &[&str]) -> BTreeSet<String> {
    words.iter().map(|w| w.to_string()).collect()
}

// ============================================================================
// Pipelines
// ============================================================================

/// Build and query on the calling thread.
pub fn run_single(text: &Path, queries: &Path, mode: SearchMode) -> (InvertedIndex, ResultsTable) {
    let mut index = InvertedIndex::new();
    build(text, &mut index).unwrap();

    let mut manager = QueryManager::new(&index);
    manager.process_file(queries, mode).unwrap();
    let results = manager.into_results();
    (index, results)
}

/// Build and query on a pool of `workers` threads.
pub fn run_pooled(
    text: &Path,
    queries: &Path,
    mode: SearchMode,
    workers: usize,
) -> (InvertedIndex, ResultsTable) {
    let queue = Arc::new(WorkQueue::new(workers).unwrap());
    let index = Arc::new(ConcurrentIndex::new());
    build_threaded(text, &index, &queue).unwrap();

    let mut manager = ThreadedQueryManager::new(Arc::clone(&index), Arc::clone(&queue));
    manager.process_file(queries, mode).unwrap();
    let results = manager.results();
    queue.join();

    let snapshot = index.read().clone();
    (snapshot, results)
}
