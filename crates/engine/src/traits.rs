//! Capability traits shared by the index variants
//!
//! [`IndexReader`] is the read/query surface and [`IndexWriter`] the
//! mutation surface. [`InvertedIndex`] implements both without locking;
//! [`ConcurrentIndex`](crate::ConcurrentIndex) implements both by holding
//! an `InvertedIndex` behind a reader/writer lock.
//!
//! Every provided reader method takes a single [`IndexView`] for its whole
//! duration, so a locked variant answers each call from one consistent
//! state and never from a merge in progress.

use crate::index::InvertedIndex;
use crate::result::SearchResult;
use lexindex_core::SearchMode;
use parking_lot::RwLockReadGuard;
use std::collections::{BTreeMap, BTreeSet};
use std::ops::Deref;

/// Read access to an [`InvertedIndex`], either borrowed directly or held
/// through a read lock that is released when the view is dropped.
pub enum IndexView<'a> {
    /// Plain borrow of an unsynchronized index.
    Direct(&'a InvertedIndex),
    /// Read guard over a locked index.
    Locked(RwLockReadGuard<'a, InvertedIndex>),
}

impl Deref for IndexView<'_> {
    type Target = InvertedIndex;

    fn deref(&self) -> &InvertedIndex {
        match self {
            IndexView::Direct(index) => index,
            IndexView::Locked(guard) => guard,
        }
    }
}

/// Read and query operations.
pub trait IndexReader: Send + Sync {
    /// Acquire a consistent view of the index.
    fn read_view(&self) -> IndexView<'_>;

    /// Whether `term` occurs anywhere.
    fn has_term(&self, term: &str) -> bool {
        self.read_view().has_term(term)
    }

    /// Whether `term` occurs at `location`.
    fn has_location(&self, term: &str, location: &str) -> bool {
        self.read_view().has_location(term, location)
    }

    /// Whether `term` occurs at `position` of `location`.
    fn has_position(&self, term: &str, location: &str, position: usize) -> bool {
        self.read_view().has_position(term, location, position)
    }

    /// Number of distinct terms.
    fn term_count(&self) -> usize {
        self.read_view().term_count()
    }

    /// Number of locations `term` occurs at.
    fn location_count(&self, term: &str) -> usize {
        self.read_view().location_count(term)
    }

    /// Number of positions of `term` at `location`.
    fn position_count(&self, term: &str, location: &str) -> usize {
        self.read_view().position_count(term, location)
    }

    /// Token total recorded for `location`.
    fn total(&self, location: &str) -> Option<usize> {
        self.read_view().total(location)
    }

    /// Snapshot of all terms in ascending order.
    fn terms(&self) -> Vec<String> {
        self.read_view().term_map().keys().cloned().collect()
    }

    /// Snapshot of the locations `term` occurs at.
    fn locations(&self, term: &str) -> Vec<String> {
        self.read_view()
            .postings(term)
            .map(|p| p.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Snapshot of the positions of `term` at `location`, ascending.
    fn positions(&self, term: &str, location: &str) -> Vec<usize> {
        self.read_view()
            .positions(term, location)
            .map(|p| p.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Snapshot of every location's token total.
    fn totals(&self) -> BTreeMap<String, usize> {
        self.read_view().total_map().clone()
    }

    /// Ranked search for `query` terms using `mode`.
    fn search(&self, query: &BTreeSet<String>, mode: SearchMode) -> Vec<SearchResult> {
        self.read_view().search(query, mode)
    }

    /// Ranked search against identical index terms.
    fn exact_search(&self, query: &BTreeSet<String>) -> Vec<SearchResult> {
        self.read_view().exact_search(query)
    }

    /// Ranked search against every index term a query term prefixes.
    fn partial_search(&self, query: &BTreeSet<String>) -> Vec<SearchResult> {
        self.read_view().partial_search(query)
    }
}

/// Mutation operations.
pub trait IndexWriter {
    /// Record `term` at `position` of `location`.
    fn add(&mut self, term: &str, location: &str, position: usize);

    /// Union a whole index into this one.
    fn merge(&mut self, other: InvertedIndex);

    /// Record consecutive `terms` at `location`, the first at position `start`.
    fn add_all(&mut self, terms: &[String], location: &str, start: usize) {
        for (offset, term) in terms.iter().enumerate() {
            self.add(term, location, start + offset);
        }
    }
}

impl IndexReader for InvertedIndex {
    fn read_view(&self) -> IndexView<'_> {
        IndexView::Direct(self)
    }
}

impl IndexWriter for InvertedIndex {
    fn add(&mut self, term: &str, location: &str, position: usize) {
        InvertedIndex::add(self, term, location, position);
    }

    fn merge(&mut self, other: InvertedIndex) {
        InvertedIndex::merge(self, other);
    }
}
