//! Stage runner.
//!
//! Stages run in a fixed order: build, index export, counts export, queries,
//! results export. A failed stage is logged and the next one still runs, so
//! a bad query file does not cost the index export. The pooled variant joins
//! its work queue last.

use lexindex_concurrency::WorkQueue;
use lexindex_core::{Error, IndexConfig, Result};
use lexindex_engine::builder::{build, build_threaded};
use lexindex_engine::{ConcurrentIndex, InvertedIndex};
use lexindex_search::{
    write_counts, write_index, QueryManager, QueryProcessor, ThreadedQueryManager,
};
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info};

/// Names of the stages that failed, in the order they ran.
pub type Failures = Vec<&'static str>;

fn record(failures: &mut Failures, stage: &'static str, result: Result<()>) {
    if let Err(e) = result {
        error!(target: "lexindex::driver", stage, error = %e, "Stage failed");
        failures.push(stage);
    }
}

/// Run every configured stage and return the ones that failed.
pub fn run(config: &IndexConfig) -> Failures {
    let failures = match config.worker_count() {
        Some(workers) => run_pooled(config, workers),
        None => run_single(config),
    };
    info!(target: "lexindex::driver", failed = failures.len(), "Finished");
    failures
}

fn run_single(config: &IndexConfig) -> Failures {
    let mut failures = Failures::new();
    let mut index = InvertedIndex::new();

    if let Some(text) = &config.text {
        record(&mut failures, "build", build(text, &mut index));
    }
    export(&index, config, &mut failures);

    let mut manager = QueryManager::new(&index);
    query(&mut manager, config, &mut failures);
    failures
}

fn run_pooled(config: &IndexConfig, workers: usize) -> Failures {
    let mut failures = Failures::new();
    let queue = match WorkQueue::new(workers) {
        Ok(queue) => Arc::new(queue),
        Err(e) => {
            record(&mut failures, "pool", Err(Error::from(e)));
            return failures;
        }
    };
    let index = Arc::new(ConcurrentIndex::new());

    if let Some(text) = &config.text {
        record(&mut failures, "build", build_threaded(text, &index, &queue));
    }
    export(&index.read(), config, &mut failures);

    let mut manager = ThreadedQueryManager::new(Arc::clone(&index), Arc::clone(&queue));
    query(&mut manager, config, &mut failures);

    queue.join();
    failures
}

fn export(index: &InvertedIndex, config: &IndexConfig, failures: &mut Failures) {
    if let Some(path) = &config.index {
        record(failures, "index", write_index(index, path));
    }
    if let Some(path) = &config.counts {
        record(failures, "counts", write_counts(index, path));
    }
}

fn query<Q: QueryProcessor + ?Sized>(
    processor: &mut Q,
    config: &IndexConfig,
    failures: &mut Failures,
) {
    if let Some(path) = &config.query {
        let mode = config.search_mode();
        record(failures, "query", processor.process_file(path, mode));
    }
    if let Some(path) = &config.results {
        record(failures, "results", processor.write_results(path));
    }
}

/// Write the commented config template to `path`.
///
/// # Errors
///
/// Refuses to replace an existing file unless `force` is set, and returns
/// [`Error::Io`] if the write fails.
pub fn write_template(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(Error::config(format!(
            "'{}' already exists (use --force to overwrite)",
            path.display()
        )));
    }
    std::fs::write(path, IndexConfig::default_toml()).map_err(|e| Error::io(path, e))
}
