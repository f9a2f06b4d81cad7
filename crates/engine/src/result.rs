//! Ranked search results
//!
//! A [`SearchResult`] accumulates matches for one location during a single
//! query evaluation. Results rank by:
//!
//! 1. score, descending
//! 2. matched-token count, descending
//! 3. location, ascending, ignoring case
//!
//! Locations that differ only in case fall back to a case-sensitive
//! comparison so that sorting is total and deterministic.

use serde::Serialize;
use std::cmp::Ordering;

/// Matches for one location within one query.
///
/// Serializes as `{"count": .., "score": .., "where": ..}`.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    count: usize,
    score: f64,
    #[serde(rename = "where")]
    location: String,
}

impl SearchResult {
    /// Create a result for `location` with `count` matched tokens out of
    /// `total` tokens at that location.
    pub fn new(location: impl Into<String>, count: usize, total: usize) -> Self {
        SearchResult {
            count,
            score: score(count, total),
            location: location.into(),
        }
    }

    /// Add `matches` more matched tokens and rescore against `total`.
    pub fn add_matches(&mut self, matches: usize, total: usize) {
        self.count += matches;
        self.score = score(self.count, total);
    }

    /// The location this result refers to.
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Number of matched tokens at the location.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Matched tokens divided by the location's total token count.
    pub fn score(&self) -> f64 {
        self.score
    }
}

fn score(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64
    }
}

fn cmp_ignore_case(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}

impl Ord for SearchResult {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .score
            .total_cmp(&self.score)
            .then_with(|| other.count.cmp(&self.count))
            .then_with(|| cmp_ignore_case(&self.location, &other.location))
            .then_with(|| self.location.cmp(&other.location))
    }
}

impl PartialOrd for SearchResult {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SearchResult {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SearchResult {}
