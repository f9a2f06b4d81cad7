//! Result ordering as seen through searches and exports.

use crate::common::*;
use lexindex::{results_to_string, InvertedIndex, ResultsTable, SearchMode, SearchResult};

fn add_words(index: &mut InvertedIndex, location: &str, words: &[&str]) {
    for (i, word) in words.iter().enumerate() {
        index.add(word, location, i + 1);
    }
}

#[test]
fn test_higher_score_first_regardless_of_insertion() {
    let mut forward = InvertedIndex::new();
    add_words(&mut forward, "half.txt", &["cat", "dog"]);
    add_words(&mut forward, "most.txt", &["cat", "cat", "cat", "cat", "dog"]);

    let mut backward = InvertedIndex::new();
    add_words(&mut backward, "most.txt", &["cat", "cat", "cat", "cat", "dog"]);
    add_words(&mut backward, "half.txt", &["cat", "dog"]);

    for index in [&forward, &backward] {
        let results = index.search(&terms(&["cat"]), SearchMode::Exact);
        assert_eq!(results[0].location(), "most.txt");
        assert!((results[0].score() - 0.8).abs() < 1e-12);
        assert_eq!(results[1].location(), "half.txt");
        assert!((results[1].score() - 0.5).abs() < 1e-12);
    }
}

#[test]
fn test_equal_score_prefers_more_matches() {
    let mut results = vec![
        SearchResult::new("few.txt", 3, 6),
        SearchResult::new("many.txt", 5, 10),
    ];
    results.sort();
    assert_eq!(results[0].location(), "many.txt");
    assert_eq!(results[1].location(), "few.txt");
}

#[test]
fn test_full_tie_orders_locations_case_insensitively() {
    let mut index = InvertedIndex::new();
    add_words(&mut index, "b.txt", &["cat", "x"]);
    add_words(&mut index, "A.txt", &["cat", "y"]);
    add_words(&mut index, "c.txt", &["cat", "z"]);

    let results = index.search(&terms(&["cat"]), SearchMode::Exact);
    let order: Vec<&str> = results.iter().map(|r| r.location()).collect();
    assert_eq!(order, vec!["A.txt", "b.txt", "c.txt"]);
}

#[test]
fn test_export_keeps_result_order() {
    let mut index = InvertedIndex::new();
    add_words(&mut index, "low.txt", &["cat", "a", "b", "c"]);
    add_words(&mut index, "high.txt", &["cat", "cat", "a"]);

    let mut table = ResultsTable::new();
    let results = index.search(&terms(&["cat"]), SearchMode::Exact);
    table.insert_if_absent("cat".to_string(), results);

    let json = results_to_string(&table).unwrap();
    assert!(json.find("high.txt").unwrap() < json.find("low.txt").unwrap());
    assert!(json.contains("\"score\": 0.66666667"), "{}", json);
    assert!(json.contains("\"score\": 0.25000000"), "{}", json);
}

#[test]
fn test_missing_term_adds_nothing() {
    let mut index = InvertedIndex::new();
    add_words(&mut index, "f.txt", &["cat"]);
    add_words(&mut index, "g.txt", &["dog"]);

    let results = index.search(&terms(&["cat", "unicorn"]), SearchMode::Exact);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].location(), "f.txt");
    assert!(index.search(&terms(&["unicorn"]), SearchMode::Partial).is_empty());
}
