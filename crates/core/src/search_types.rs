//! Search types shared by the engine and query layers.

use serde::{Deserialize, Serialize};

// ============================================================================
// SearchMode
// ============================================================================

/// Search mode - determines how query terms are matched against index terms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// Query term must equal an index term
    Exact,
    /// Query term matches every index term it is a prefix of (default)
    #[default]
    Partial,
}

impl SearchMode {
    /// Pick a mode from an `exact` flag.
    pub fn from_exact(exact: bool) -> Self {
        if exact {
            SearchMode::Exact
        } else {
            SearchMode::Partial
        }
    }
}
