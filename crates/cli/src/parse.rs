//! ArgMatches → IndexConfig conversion.
//!
//! The config file (if any) is loaded first, then every flag present on the
//! command line replaces the matching field.

use clap::ArgMatches;
use lexindex_core::{IndexConfig, Result};
use std::path::PathBuf;

/// Worker count requested by a `--threads` value.
///
/// Anything that is not a positive integer asks for the default pool size,
/// which [`IndexConfig::worker_count`] spells as `0`.
pub fn parse_threads(value: &str) -> usize {
    value
        .trim()
        .parse::<i64>()
        .ok()
        .filter(|n| *n > 0)
        .and_then(|n| usize::try_from(n).ok())
        .unwrap_or(0)
}

/// Build the effective run configuration from parsed arguments.
///
/// # Errors
///
/// Fails if `--config` names a file that cannot be read, parsed or validated.
pub fn matches_to_config(matches: &ArgMatches) -> Result<IndexConfig> {
    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => IndexConfig::from_file(path)?,
        None => IndexConfig::default(),
    };

    let path = |id: &str| matches.get_one::<PathBuf>(id).cloned();

    if let Some(text) = path("text") {
        config.text = Some(text);
    }
    if let Some(query) = path("query") {
        config.query = Some(query);
    }
    if let Some(threads) = matches.get_one::<String>("threads") {
        config.threads = Some(parse_threads(threads));
    }
    if matches.get_flag("exact") {
        config.exact = true;
    }
    if let Some(index) = path("index") {
        config.index = Some(index);
    }
    if let Some(counts) = path("counts") {
        config.counts = Some(counts);
    }
    if let Some(results) = path("results") {
        config.results = Some(results);
    }
    if let Some(level) = matches.get_one::<String>("log-level") {
        config.log_level = Some(level.clone());
    }

    Ok(config)
}
