//! Index engine for lexindex
//!
//! This crate owns the term/location/position data structure and everything
//! that reads or writes it:
//! - InvertedIndex: unsynchronized index with ranked search
//! - ConcurrentIndex: reader/writer-locked decorator over `InvertedIndex`
//! - IndexReader / IndexWriter: capability traits shared by both variants
//! - SearchResult: per-location match with ranking order
//! - Text normalization (tokenizer + Porter stemmer)
//! - Corpus ingestion (single-threaded and pooled builders)

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod builder;
pub mod concurrent;
pub mod index;
pub mod result;
pub mod stemmer;
pub mod tokenizer;
pub mod traits;

pub use concurrent::ConcurrentIndex;
pub use index::InvertedIndex;
pub use result::SearchResult;
pub use tokenizer::{tokenize, unique_stems};
pub use traits::{IndexReader, IndexView, IndexWriter};
