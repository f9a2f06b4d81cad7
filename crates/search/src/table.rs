//! Results table keyed by normalized query text

use lexindex_engine::SearchResult;
use serde::Serialize;
use std::collections::btree_map::{self, Entry};
use std::collections::{BTreeMap, BTreeSet};

/// Lookup key for a normalized query: its sorted terms joined by spaces.
///
/// ```
/// use lexindex_search::query_key;
/// use std::collections::BTreeSet;
///
/// let terms: BTreeSet<String> = ["beta", "alpha"].iter().map(|t| t.to_string()).collect();
/// assert_eq!(query_key(&terms), "alpha beta");
/// ```
pub fn query_key(terms: &BTreeSet<String>) -> String {
    terms
        .iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Ranked results per normalized query, iterated in ascending key order.
///
/// A key holds at most one entry; the first insert for a key wins.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ResultsTable {
    entries: BTreeMap<String, Vec<SearchResult>>,
}

impl ResultsTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `key` already has results.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Store `results` under `key` unless the key is already present.
    ///
    /// Returns `true` if the results were stored.
    pub fn insert_if_absent(&mut self, key: String, results: Vec<SearchResult>) -> bool {
        match self.entries.entry(key) {
            Entry::Vacant(slot) => {
                slot.insert(results);
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    /// Results stored for `key`.
    pub fn get(&self, key: &str) -> Option<&[SearchResult]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    /// Number of distinct queries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no query has been stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Stored queries in ascending key order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// `(key, results)` pairs in ascending key order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, Vec<SearchResult>> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a ResultsTable {
    type Item = (&'a String, &'a Vec<SearchResult>);
    type IntoIter = btree_map::Iter<'a, String, Vec<SearchResult>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
