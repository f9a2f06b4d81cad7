//! Unsynchronized inverted index
//!
//! Maps each term to the locations it occurs at, and each location to the
//! set of 1-based token positions. A second map tracks the token total per
//! location, used as the denominator when scoring.
//!
//! Terms are case-folded on insert and on lookup. Location identifiers are
//! stored as given.
//!
//! # Token totals
//!
//! `add` records the supplied position as the location's running total, so
//! positions must be fed in increasing order per location. `merge` sums the
//! totals of a location present on both sides. Merging partial indexes that
//! share a location therefore inflates its total; each location should come
//! from exactly one partial index.

use crate::result::SearchResult;
use lexindex_core::SearchMode;
use std::borrow::Cow;
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::ops::Bound;

type Postings = BTreeMap<String, BTreeSet<usize>>;

/// Term → location → positions, plus per-location token totals.
///
/// Has no internal locking. Wrap it in a
/// [`ConcurrentIndex`](crate::ConcurrentIndex) to share it between threads
/// that write.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvertedIndex {
    terms: BTreeMap<String, Postings>,
    totals: BTreeMap<String, usize>,
}

fn normalize(term: &str) -> Cow<'_, str> {
    if term.chars().any(char::is_uppercase) {
        Cow::Owned(term.to_lowercase())
    } else {
        Cow::Borrowed(term)
    }
}

impl InvertedIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Record `term` at `position` of `location`.
    ///
    /// Also sets the location's total to `position`.
    pub fn add(&mut self, term: &str, location: &str, position: usize) {
        self.terms
            .entry(normalize(term).into_owned())
            .or_default()
            .entry(location.to_string())
            .or_default()
            .insert(position);
        self.totals.insert(location.to_string(), position);
    }

    /// Union `other` into this index.
    ///
    /// Position sets are unioned. A location total already present here is
    /// summed with the incoming one; otherwise the incoming total is copied.
    pub fn merge(&mut self, other: InvertedIndex) {
        for (term, postings) in other.terms {
            match self.terms.entry(term) {
                Entry::Vacant(slot) => {
                    slot.insert(postings);
                }
                Entry::Occupied(mut slot) => {
                    let mine = slot.get_mut();
                    for (location, mut positions) in postings {
                        match mine.entry(location) {
                            Entry::Vacant(s) => {
                                s.insert(positions);
                            }
                            Entry::Occupied(mut s) => s.get_mut().append(&mut positions),
                        }
                    }
                }
            }
        }

        for (location, total) in other.totals {
            *self.totals.entry(location).or_insert(0) += total;
        }
    }

    // ========================================================================
    // Read accessors
    // ========================================================================

    /// Whether `term` occurs anywhere.
    pub fn has_term(&self, term: &str) -> bool {
        self.terms.contains_key(normalize(term).as_ref())
    }

    /// Whether `term` occurs at `location`.
    pub fn has_location(&self, term: &str, location: &str) -> bool {
        self.postings(term).is_some_and(|p| p.contains_key(location))
    }

    /// Whether `term` occurs at `position` of `location`.
    pub fn has_position(&self, term: &str, location: &str, position: usize) -> bool {
        self.positions(term, location).is_some_and(|p| p.contains(&position))
    }

    /// Number of distinct terms.
    pub fn term_count(&self) -> usize {
        self.terms.len()
    }

    /// Number of locations `term` occurs at, zero if absent.
    pub fn location_count(&self, term: &str) -> usize {
        self.postings(term).map_or(0, BTreeMap::len)
    }

    /// Number of positions of `term` at `location`, zero if absent.
    pub fn position_count(&self, term: &str, location: &str) -> usize {
        self.positions(term, location).map_or(0, BTreeSet::len)
    }

    /// Token total recorded for `location`.
    pub fn total(&self, location: &str) -> Option<usize> {
        self.totals.get(location).copied()
    }

    /// Whether the index holds no terms.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Locations `term` occurs at, with their positions.
    pub fn postings(&self, term: &str) -> Option<&BTreeMap<String, BTreeSet<usize>>> {
        self.terms.get(normalize(term).as_ref())
    }

    /// Positions of `term` at `location`.
    pub fn positions(&self, term: &str, location: &str) -> Option<&BTreeSet<usize>> {
        self.postings(term).and_then(|p| p.get(location))
    }

    /// The whole term → location → positions structure, in ascending order.
    pub fn term_map(&self) -> &BTreeMap<String, BTreeMap<String, BTreeSet<usize>>> {
        &self.terms
    }

    /// Token totals keyed by location.
    pub fn total_map(&self) -> &BTreeMap<String, usize> {
        &self.totals
    }

    // ========================================================================
    // Search
    // ========================================================================

    /// Ranked search for `query` terms using `mode`.
    pub fn search(&self, query: &BTreeSet<String>, mode: SearchMode) -> Vec<SearchResult> {
        match mode {
            SearchMode::Exact => self.exact_search(query),
            SearchMode::Partial => self.partial_search(query),
        }
    }

    /// Match query terms against identical index terms.
    pub fn exact_search(&self, query: &BTreeSet<String>) -> Vec<SearchResult> {
        let mut ranking = Ranking::default();
        for term in query {
            if let Some(postings) = self.postings(term) {
                ranking.collect(postings, &self.totals);
            }
        }
        ranking.finish()
    }

    /// Match query terms against every index term they are a prefix of.
    pub fn partial_search(&self, query: &BTreeSet<String>) -> Vec<SearchResult> {
        let mut ranking = Ranking::default();
        for term in query {
            let prefix = normalize(term);
            if prefix.is_empty() {
                continue;
            }
            let from: (Bound<&str>, Bound<&str>) =
                (Bound::Included(prefix.as_ref()), Bound::Unbounded);
            for (candidate, postings) in self.terms.range::<str, _>(from) {
                if !candidate.starts_with(prefix.as_ref()) {
                    break;
                }
                ranking.collect(postings, &self.totals);
            }
        }
        ranking.finish()
    }
}

/// One result per location, updated in place as further terms match.
#[derive(Default)]
struct Ranking<'a> {
    results: Vec<SearchResult>,
    slots: HashMap<&'a str, usize>,
}

impl<'a> Ranking<'a> {
    fn collect(&mut self, postings: &'a Postings, totals: &BTreeMap<String, usize>) {
        for (location, positions) in postings {
            let total = totals.get(location).copied().unwrap_or(0);
            match self.slots.get(location.as_str()) {
                Some(&i) => self.results[i].add_matches(positions.len(), total),
                None => {
                    self.slots.insert(location.as_str(), self.results.len());
                    self.results
                        .push(SearchResult::new(location.as_str(), positions.len(), total));
                }
            }
        }
    }

    fn finish(mut self) -> Vec<SearchResult> {
        self.results.sort();
        self.results
    }
}
