//! Corpus ingestion
//!
//! Turns text files into `(term, location, position)` triples. A single file
//! is indexed whatever its extension; a directory is walked recursively and
//! only `.txt` / `.text` files (any case) are indexed, in sorted path order.
//!
//! The pooled builder gives every file its own task that fills a private
//! [`InvertedIndex`] and merges it into the shared [`ConcurrentIndex`], so
//! each location reaches the shared index through exactly one merge.

use crate::concurrent::ConcurrentIndex;
use crate::index::InvertedIndex;
use crate::tokenizer::tokenize;
use crate::traits::IndexWriter;
use lexindex_concurrency::WorkQueue;
use lexindex_core::{Error, Result};
use parking_lot::Mutex;
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, error, info};

/// Whether `path` names a text file by extension.
pub fn is_text_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("txt") || ext.eq_ignore_ascii_case("text"))
}

/// All text files under `dir`, recursively, sorted by path.
///
/// # Errors
///
/// Returns [`Error::Io`] if a directory cannot be listed.
pub fn text_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    collect_text_files(dir, &mut found)?;
    found.sort();
    Ok(found)
}

fn collect_text_files(dir: &Path, found: &mut Vec<PathBuf>) -> Result<()> {
    let entries = fs::read_dir(dir).map_err(|e| Error::io(dir, e))?;
    for entry in entries {
        let path = entry.map_err(|e| Error::io(dir, e))?.path();
        if path.is_dir() {
            collect_text_files(&path, found)?;
        } else if path.is_file() && is_text_file(&path) {
            found.push(path);
        }
    }
    Ok(())
}

/// Files to index for `path`: the file itself, or every text file below it.
fn inputs(path: &Path) -> Result<Vec<PathBuf>> {
    if path.is_dir() {
        text_files(path)
    } else {
        Ok(vec![path.to_path_buf()])
    }
}

/// Index every word of one file into `index`.
///
/// Positions start at 1 and keep counting across lines. The location is the
/// path as displayed. Returns the number of tokens indexed.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be opened or read.
pub fn index_file<W: IndexWriter + ?Sized>(path: &Path, index: &mut W) -> Result<usize> {
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    let location = path.display().to_string();
    let mut position = 0;

    for line in BufReader::new(file).lines() {
        let line = line.map_err(|e| Error::io(path, e))?;
        let terms = tokenize(&line);
        index.add_all(&terms, &location, position + 1);
        position += terms.len();
    }

    debug!(target: "lexindex::builder", location = %location, tokens = position, "Indexed file");
    Ok(position)
}

/// Index a file or directory into `index` on the calling thread.
///
/// # Errors
///
/// Stops at the first file that cannot be read and returns its error.
pub fn build<W: IndexWriter + ?Sized>(path: &Path, index: &mut W) -> Result<()> {
    let files = inputs(path)?;
    let mut tokens = 0;
    for file in &files {
        tokens += index_file(file, index)?;
    }
    info!(
        target: "lexindex::builder",
        files = files.len(),
        tokens,
        "Built index"
    );
    Ok(())
}

/// Index a file or directory into `index`, one pooled task per file.
///
/// Blocks until every task has finished. A file that fails to read does not
/// stop the others; its error is logged and, once all tasks have settled,
/// the first recorded failure is returned.
///
/// # Errors
///
/// Returns [`Error::Io`] for an unreadable input and [`Error::WorkQueue`] if
/// the pool has been shut down.
pub fn build_threaded(path: &Path, index: &Arc<ConcurrentIndex>, queue: &WorkQueue) -> Result<()> {
    let files = inputs(path)?;
    let failures: Arc<Mutex<Vec<Error>>> = Arc::new(Mutex::new(Vec::new()));
    let count = files.len();

    for file in files {
        let index = Arc::clone(index);
        let failures = Arc::clone(&failures);
        queue.execute(move || {
            let mut local = InvertedIndex::new();
            match index_file(&file, &mut local) {
                Ok(_) => index.merge(local),
                Err(e) => {
                    error!(target: "lexindex::builder", error = %e, "Failed to index file");
                    failures.lock().push(e);
                }
            }
        })?;
    }

    queue.finish();

    let failures = std::mem::take(&mut *failures.lock());
    info!(
        target: "lexindex::builder",
        files = count,
        failed = failures.len(),
        workers = queue.size(),
        "Built index"
    );
    match failures.into_iter().next() {
        Some(first) => Err(first),
        None => Ok(()),
    }
}
