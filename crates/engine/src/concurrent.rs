//! Reader/writer-locked index
//!
//! [`ConcurrentIndex`] holds an [`InvertedIndex`] by composition behind a
//! `parking_lot::RwLock`. Reads (including whole searches) take the shared
//! lock for the full call; `add` and `merge` take the exclusive lock.

use crate::index::InvertedIndex;
use crate::traits::{IndexReader, IndexView, IndexWriter};
use parking_lot::{RwLock, RwLockReadGuard};
use tracing::trace;

/// Thread-safe index shared between ingestion and query workers.
///
/// # Example
///
/// ```
/// use lexindex_engine::{ConcurrentIndex, IndexReader, InvertedIndex};
/// use std::sync::Arc;
/// use std::thread;
///
/// let shared = Arc::new(ConcurrentIndex::new());
/// let handles: Vec<_> = ["a.txt", "b.txt"]
///     .into_iter()
///     .map(|location| {
///         let shared = Arc::clone(&shared);
///         thread::spawn(move || {
///             let mut local = InvertedIndex::new();
///             local.add("cat", location, 1);
///             shared.merge(local);
///         })
///     })
///     .collect();
/// for h in handles {
///     h.join().unwrap();
/// }
/// assert_eq!(shared.location_count("cat"), 2);
/// ```
#[derive(Debug, Default)]
pub struct ConcurrentIndex {
    inner: RwLock<InvertedIndex>,
}

impl ConcurrentIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `term` at `position` of `location` under the write lock.
    pub fn add(&self, term: &str, location: &str, position: usize) {
        self.inner.write().add(term, location, position);
    }

    /// Union `other` into this index under the write lock.
    ///
    /// Readers never observe a partially applied merge.
    pub fn merge(&self, other: InvertedIndex) {
        let terms = other.term_count();
        self.inner.write().merge(other);
        trace!(target: "lexindex::index", terms, "Merged partial index");
    }

    /// Hold the read lock and borrow the underlying index.
    ///
    /// Writers block until the guard is dropped.
    pub fn read(&self) -> RwLockReadGuard<'_, InvertedIndex> {
        self.inner.read()
    }

    /// Consume the wrapper and return the underlying index.
    pub fn into_inner(self) -> InvertedIndex {
        self.inner.into_inner()
    }
}

impl From<InvertedIndex> for ConcurrentIndex {
    fn from(index: InvertedIndex) -> Self {
        ConcurrentIndex {
            inner: RwLock::new(index),
        }
    }
}

impl IndexReader for ConcurrentIndex {
    fn read_view(&self) -> IndexView<'_> {
        IndexView::Locked(self.inner.read())
    }
}

impl IndexWriter for ConcurrentIndex {
    fn add(&mut self, term: &str, location: &str, position: usize) {
        ConcurrentIndex::add(self, term, location, position);
    }

    fn merge(&mut self, other: InvertedIndex) {
        ConcurrentIndex::merge(self, other);
    }

    fn add_all(&mut self, terms: &[String], location: &str, start: usize) {
        self.inner.get_mut().add_all(terms, location, start);
    }
}
