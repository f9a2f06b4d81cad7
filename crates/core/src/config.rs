//! Run configuration via `lexindex.toml`
//!
//! Every option the command line accepts can also be set in a TOML file.
//! Values given on the command line take precedence over the file.

use crate::error::{Error, Result};
use crate::search_types::SearchMode;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Conventional config file name.
pub const CONFIG_FILE_NAME: &str = "lexindex.toml";

/// Worker count used when threading is requested without a usable count.
pub const DEFAULT_WORKERS: usize = 5;

const LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

/// Run configuration loaded from `lexindex.toml`.
///
/// # Example
///
/// ```toml
/// text = "input/text"
/// query = "input/query/simple.txt"
/// threads = 4
/// exact = false
/// index = "index.json"
/// results = "results.json"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IndexConfig {
    /// File or directory to index.
    #[serde(default)]
    pub text: Option<PathBuf>,
    /// File of query lines, one query per line.
    #[serde(default)]
    pub query: Option<PathBuf>,
    /// Worker threads. Absent means single-threaded; `0` means the default.
    #[serde(default)]
    pub threads: Option<usize>,
    /// Use exact matching instead of prefix matching.
    #[serde(default)]
    pub exact: bool,
    /// Destination of the term/location/position export.
    #[serde(default)]
    pub index: Option<PathBuf>,
    /// Destination of the per-location token count export.
    #[serde(default)]
    pub counts: Option<PathBuf>,
    /// Destination of the search results export.
    #[serde(default)]
    pub results: Option<PathBuf>,
    /// One of `error`, `warn`, `info`, `debug`, `trace`.
    #[serde(default)]
    pub log_level: Option<String>,
}

impl IndexConfig {
    /// Effective worker pool size, or `None` for single-threaded execution.
    pub fn worker_count(&self) -> Option<usize> {
        self.threads
            .map(|n| if n == 0 { DEFAULT_WORKERS } else { n })
    }

    /// Matching mode selected by the `exact` flag.
    pub fn search_mode(&self) -> SearchMode {
        SearchMode::from_exact(self.exact)
    }

    /// Validate values that serde cannot check on its own.
    ///
    /// # Errors
    ///
    /// Returns an error if `log_level` is not a known level name.
    pub fn validate(&self) -> Result<()> {
        if let Some(level) = &self.log_level {
            if !LOG_LEVELS.contains(&level.to_ascii_lowercase().as_str()) {
                return Err(Error::config(format!(
                    "Invalid log_level '{}'. Expected one of {:?}.",
                    level, LOG_LEVELS
                )));
            }
        }
        Ok(())
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# lexindex configuration
#
# File or directory of .txt/.text files to index.
# text = "input/text"

# File with one query per line.
# query = "input/query/simple.txt"

# Worker threads. Leave unset for single-threaded mode; 0 uses the default (5).
# threads = 5

# Exact matching instead of prefix matching (default: false)
exact = false

# Export destinations
# index = "index.json"
# counts = "counts.json"
# results = "results.json"

# log_level = "warn"
"#
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let config: IndexConfig = toml::from_str(&content).map_err(|e| {
            Error::config(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        config.validate()?;
        Ok(config)
    }
}
