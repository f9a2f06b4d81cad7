//! Single-threaded ingestion, querying and export.

use crate::common::*;
use lexindex::builder::build;
use lexindex::{
    counts_to_string, index_to_string, results_to_string, tokenize, write_results, IndexReader,
    IndexWriter, InvertedIndex, QueryManager, QueryProcessor, SearchMode,
};

#[test]
fn test_the_cat_sat() {
    let mut index = InvertedIndex::new();
    index.add_all(&tokenize("the cat sat"), "f.txt", 1);

    let the: Vec<usize> = index.positions("the", "f.txt").unwrap().iter().copied().collect();
    assert_eq!(the, vec![1]);
    assert!(index.has_position("cat", "f.txt", 2));
    assert!(index.has_position("sat", "f.txt", 3));
    assert_eq!(index.total("f.txt"), Some(3));

    let results = index.search(&terms(&["cat"]), SearchMode::Exact);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].location(), "f.txt");
    assert_eq!(results[0].count(), 1);
    assert!((results[0].score() - 1.0 / 3.0).abs() < 1e-12);

    let mut manager = QueryManager::new(&index);
    manager.process_line("cat", SearchMode::Exact).unwrap();
    let json = results_to_string(manager.table()).unwrap();
    assert!(json.contains("\"score\": 0.33333333"), "{}", json);
}

#[test]
fn test_build_from_directory_skips_non_text_files() {
    let corpus = sample_corpus();
    let mut index = InvertedIndex::new();
    build(&corpus.root().join("text"), &mut index).unwrap();

    assert_eq!(index.total_map().len(), 4);
    assert!(!index.has_location("cat", &corpus.location("text/misc/notes.md")));
    assert!(index.has_location("cat", &corpus.location("text/misc/dogs.txt")));
    assert_eq!(index.position_count("cat", &corpus.location("text/cats.txt")), 2);
    // Mixed-case extension is still text
    assert!(index.has_term("recomput"));
}

#[test]
fn test_query_file_results() {
    let corpus = sample_corpus();
    let (_, results) = run_single(
        &corpus.root().join("text"),
        &corpus.root().join("queries.txt"),
        SearchMode::Exact,
    );

    // cat/cats and "the sat"/"sat the" collapse; "1234" and the blank line vanish
    let keys: Vec<&str> = results.keys().collect();
    assert_eq!(keys, vec!["cat", "chase dog", "comput", "mous", "sat the"]);
    assert!(results.get("mous").unwrap().is_empty());

    // "the sat": cats.txt has the ×3 and sat ×1 out of 9 tokens
    let sat = results.get("sat the").unwrap();
    assert_eq!(sat.len(), 1);
    assert_eq!(sat[0].count(), 4);
    assert_eq!(sat[0].location(), corpus.location("text/cats.txt"));

    // dogs.txt matches dog + chase ×2 out of 6
    let chase = results.get("chase dog").unwrap();
    assert_eq!(chase[0].count(), 3);
    assert!((chase[0].score() - 0.5).abs() < 1e-12);
}

#[test]
fn test_exact_and_partial_differ_on_prefixes() {
    let corpus = sample_corpus();
    let text = corpus.root().join("text");
    let queries = corpus.write("prefix.txt", "comp\n");

    let (_, exact) = run_single(&text, &queries, SearchMode::Exact);
    let (_, partial) = run_single(&text, &queries, SearchMode::Partial);

    assert!(exact.get("comp").unwrap().is_empty());
    let found: Vec<&str> = partial
        .get("comp")
        .unwrap()
        .iter()
        .map(|r| r.location())
        .collect();
    assert_eq!(found.len(), 2);
    assert!(found.contains(&corpus.location("text/computing/machines.txt").as_str()));
}

#[test]
fn test_partial_prefix_boundaries() {
    let mut index = InvertedIndex::new();
    for (i, term) in ["compute", "computer", "computing", "computation", "recompute"]
        .iter()
        .enumerate()
    {
        index.add(term, &format!("{}.txt", term), i + 1);
    }

    let hits: Vec<String> = index
        .partial_search(&terms(&["comput"]))
        .iter()
        .map(|r| r.location().to_string())
        .collect();
    assert_eq!(hits.len(), 4);
    assert!(hits.contains(&"computation.txt".to_string()));
    assert!(!hits.contains(&"recompute.txt".to_string()));
}

#[test]
fn test_exports_are_valid_json() {
    let corpus = sample_corpus();
    let (index, results) = run_single(
        &corpus.root().join("text"),
        &corpus.root().join("queries.txt"),
        SearchMode::Partial,
    );

    let index_json: serde_json::Value =
        serde_json::from_str(&index_to_string(&index).unwrap()).unwrap();
    let cats = corpus.location("text/cats.txt");
    assert_eq!(index_json["cat"][cats.as_str()], serde_json::json!([2, 8]));

    let counts_json: serde_json::Value =
        serde_json::from_str(&counts_to_string(&index).unwrap()).unwrap();
    assert_eq!(counts_json[cats.as_str()], serde_json::json!(9));

    let path = corpus.root().join("results.json");
    write_results(&results, &path).unwrap();
    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    let first = &written["cat"][0];
    assert!(first.get("count").is_some());
    assert!(first.get("score").is_some());
    assert!(first.get("where").is_some());
}

#[test]
fn test_reader_trait_over_plain_index() {
    let corpus = sample_corpus();
    let mut index = InvertedIndex::new();
    build(&corpus.root().join("text"), &mut index).unwrap();

    let reader: &dyn IndexReader = &index;
    assert_eq!(reader.terms().len(), index.term_count());
    assert_eq!(reader.totals(), *index.total_map());
    let dogs = corpus.location("text/misc/dogs.txt");
    assert_eq!(reader.locations("chase"), vec![dogs]);
}
