//! Query coordination
//!
//! A query line is normalized into its sorted, deduplicated set of stems.
//! The set joined by single spaces is the lookup key, so "beta alpha" and
//! "alpha beta" are the same query. Lines with no stems are skipped, and a
//! key that already has results is not searched again.
//!
//! [`QueryManager`] evaluates on the calling thread. [`ThreadedQueryManager`]
//! submits one task per line to a [`WorkQueue`]; the table then sits behind
//! its own mutex, separate from the index lock, which only covers the
//! duplicate check and the insert, never the search itself.

use crate::export;
use crate::table::{query_key, ResultsTable};
use lexindex_concurrency::WorkQueue;
use lexindex_core::{Error, Result, SearchMode};
use lexindex_engine::{unique_stems, ConcurrentIndex, IndexReader};
use parking_lot::Mutex;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// Turns query lines into [`ResultsTable`] entries.
pub trait QueryProcessor {
    /// Normalize, deduplicate and evaluate one query line.
    ///
    /// # Errors
    ///
    /// Pooled implementations fail if the work queue has shut down.
    fn process_line(&mut self, line: &str, mode: SearchMode) -> Result<()>;

    /// Process every line of a query file.
    ///
    /// All results are in the table when this returns.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be opened or read.
    fn process_file(&mut self, path: &Path, mode: SearchMode) -> Result<()> {
        for_each_line(path, |line| self.process_line(line, mode))
    }

    /// Snapshot of the results gathered so far.
    fn results(&self) -> ResultsTable;

    /// Number of distinct queries with results.
    fn query_count(&self) -> usize;

    /// Write the results table as JSON to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be created or written.
    fn write_results(&self, path: &Path) -> Result<()>;
}

fn for_each_line<F>(path: &Path, mut f: F) -> Result<()>
where
    F: FnMut(&str) -> Result<()>,
{
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    for line in BufReader::new(file).lines() {
        let line = line.map_err(|e| Error::io(path, e))?;
        f(&line)?;
    }
    Ok(())
}

// ============================================================================
// Single-threaded
// ============================================================================

/// Evaluates queries on the calling thread against a borrowed index.
pub struct QueryManager<'a, R: IndexReader + ?Sized> {
    index: &'a R,
    table: ResultsTable,
}

impl<'a, R: IndexReader + ?Sized> QueryManager<'a, R> {
    /// Create a manager with an empty results table.
    pub fn new(index: &'a R) -> Self {
        QueryManager {
            index,
            table: ResultsTable::new(),
        }
    }

    /// Borrow the results table.
    pub fn table(&self) -> &ResultsTable {
        &self.table
    }

    /// Consume the manager and return its results.
    pub fn into_results(self) -> ResultsTable {
        self.table
    }
}

impl<R: IndexReader + ?Sized> QueryProcessor for QueryManager<'_, R> {
    fn process_line(&mut self, line: &str, mode: SearchMode) -> Result<()> {
        let terms = unique_stems(line);
        if terms.is_empty() {
            return Ok(());
        }
        let key = query_key(&terms);
        if self.table.contains(&key) {
            return Ok(());
        }
        let results = self.index.search(&terms, mode);
        self.table.insert_if_absent(key, results);
        Ok(())
    }

    fn results(&self) -> ResultsTable {
        self.table.clone()
    }

    fn query_count(&self) -> usize {
        self.table.len()
    }

    fn write_results(&self, path: &Path) -> Result<()> {
        export::write_results(&self.table, path)
    }
}

// ============================================================================
// Pooled
// ============================================================================

/// Evaluates each query line as a task on a shared [`WorkQueue`].
pub struct ThreadedQueryManager<R: IndexReader + ?Sized + 'static = ConcurrentIndex> {
    index: Arc<R>,
    queue: Arc<WorkQueue>,
    table: Arc<Mutex<ResultsTable>>,
}

impl<R: IndexReader + ?Sized + 'static> ThreadedQueryManager<R> {
    /// Create a manager that searches `index` on `queue`.
    pub fn new(index: Arc<R>, queue: Arc<WorkQueue>) -> Self {
        ThreadedQueryManager {
            index,
            queue,
            table: Arc::new(Mutex::new(ResultsTable::new())),
        }
    }

    /// Block until every submitted query has been evaluated.
    pub fn finish(&self) {
        self.queue.finish();
    }
}

/// Body of one pooled query task.
fn evaluate<R: IndexReader + ?Sized>(
    index: &R,
    table: &Mutex<ResultsTable>,
    line: &str,
    mode: SearchMode,
) {
    let terms = unique_stems(line);
    if terms.is_empty() {
        return;
    }
    let key = query_key(&terms);
    if table.lock().contains(&key) {
        return;
    }

    // Two tasks with the same key may both search; the insert keeps the first.
    let results = index.search(&terms, mode);
    if !table.lock().insert_if_absent(key, results) {
        debug!(target: "lexindex::query", line, "Duplicate query evaluated concurrently");
    }
}

impl<R: IndexReader + ?Sized + 'static> QueryProcessor for ThreadedQueryManager<R> {
    /// Submit the line as a task and return without waiting for it.
    fn process_line(&mut self, line: &str, mode: SearchMode) -> Result<()> {
        let index = Arc::clone(&self.index);
        let table = Arc::clone(&self.table);
        let line = line.to_string();
        self.queue
            .execute(move || evaluate(&*index, &table, &line, mode))?;
        Ok(())
    }

    fn process_file(&mut self, path: &Path, mode: SearchMode) -> Result<()> {
        let submitted = for_each_line(path, |line| self.process_line(line, mode));
        // Wait even on a read error so no task outlives the call.
        self.queue.finish();
        submitted?;
        info!(
            target: "lexindex::query",
            path = %path.display(),
            queries = self.query_count(),
            "Processed query file"
        );
        Ok(())
    }

    fn results(&self) -> ResultsTable {
        self.table.lock().clone()
    }

    fn query_count(&self) -> usize {
        self.table.lock().len()
    }

    fn write_results(&self, path: &Path) -> Result<()> {
        export::write_results(&self.table.lock(), path)
    }
}
