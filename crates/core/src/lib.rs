//! Core types for lexindex
//!
//! This crate defines the foundational types shared by every layer:
//! - Error: Error type hierarchy and `Result` alias
//! - IndexConfig: TOML-backed run configuration
//! - SearchMode: Exact vs. prefix query matching

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod search_types;

pub use config::{IndexConfig, CONFIG_FILE_NAME, DEFAULT_WORKERS};
pub use error::{Error, Result};
pub use search_types::SearchMode;
