//! Text normalization
//!
//! Pipeline: whitespace split → drop non-alphabetic characters → lowercase
//! → drop empty words → Porter stem.
//!
//! Every surviving word is kept (no stopword list), so token positions line
//! up with the words a reader sees in the text.

use crate::stemmer;
use std::collections::BTreeSet;

/// Strip a raw word down to lowercase letters, `None` if nothing remains.
fn clean(word: &str) -> Option<String> {
    let cleaned: String = word
        .chars()
        .filter(|c| c.is_alphabetic())
        .flat_map(char::to_lowercase)
        .collect();
    (!cleaned.is_empty()).then_some(cleaned)
}

/// Normalize a line into stemmed terms, in order, duplicates kept.
///
/// # Example
///
/// ```
/// use lexindex_engine::tokenize;
///
/// assert_eq!(tokenize("The cat sat!"), vec!["the", "cat", "sat"]);
/// assert_eq!(tokenize("Running 42 computers"), vec!["run", "comput"]);
/// ```
pub fn tokenize(line: &str) -> Vec<String> {
    line.split_whitespace()
        .filter_map(clean)
        .map(|w| stemmer::stem(&w))
        .collect()
}

/// Normalize a line into its sorted, deduplicated set of stemmed terms.
///
/// Used to turn a query line into search terms and a lookup key.
pub fn unique_stems(line: &str) -> BTreeSet<String> {
    tokenize(line).into_iter().collect()
}
