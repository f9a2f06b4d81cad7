//! Query coordination and export for lexindex
//!
//! This crate provides:
//! - ResultsTable: normalized query → ranked results, first write wins
//! - QueryProcessor trait for turning query lines into table entries
//! - QueryManager (calling thread) and ThreadedQueryManager (worker pool)
//! - JSON export of the index, the per-location totals and the results

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod export;
pub mod query;
pub mod table;

pub use export::{
    counts_to_string, index_to_string, results_to_string, write_counts, write_index,
    write_results,
};
pub use query::{QueryManager, QueryProcessor, ThreadedQueryManager};
pub use table::{query_key, ResultsTable};
