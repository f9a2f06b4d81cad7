//! lexindex - concurrent inverted index with ranked exact and prefix search
//!
//! Text files are tokenized, stemmed and recorded as
//! `(term, location, position)` triples. Queries are normalized the same way
//! and ranked by the fraction of a location's tokens they match.
//!
//! # Quick Start
//!
//! ```
//! use lexindex::{IndexWriter, InvertedIndex, QueryManager, QueryProcessor, SearchMode};
//!
//! let mut index = InvertedIndex::new();
//! index.add_all(&lexindex::tokenize("the cat sat"), "f.txt", 1);
//!
//! let mut queries = QueryManager::new(&index);
//! queries.process_line("cats", SearchMode::Exact).unwrap();
//!
//! let results = queries.table().get("cat").unwrap();
//! assert_eq!(results[0].count(), 1);
//! assert_eq!(format!("{:.8}", results[0].score()), "0.33333333");
//! ```
//!
//! # Architecture
//!
//! - `lexindex-core`: errors, configuration, search mode
//! - `lexindex-concurrency`: the worker pool
//! - `lexindex-engine`: the index, its locked variant, ranking and ingestion
//! - `lexindex-search`: query coordination and JSON export
//!
//! Swapping [`InvertedIndex`] for [`ConcurrentIndex`] and [`QueryManager`]
//! for [`ThreadedQueryManager`] moves the same pipeline onto a [`WorkQueue`].

pub use lexindex_concurrency::{PendingCounter, WorkQueue, WorkQueueError};
pub use lexindex_core::{
    Error, IndexConfig, Result, SearchMode, CONFIG_FILE_NAME, DEFAULT_WORKERS,
};
pub use lexindex_engine::builder;
pub use lexindex_engine::{
    tokenize, unique_stems, ConcurrentIndex, IndexReader, IndexView, IndexWriter, InvertedIndex,
    SearchResult,
};
pub use lexindex_search::{
    counts_to_string, index_to_string, query_key, results_to_string, write_counts, write_index,
    write_results, QueryManager, QueryProcessor, ResultsTable, ThreadedQueryManager,
};
