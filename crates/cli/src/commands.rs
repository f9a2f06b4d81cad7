//! Clap command tree definition.
//!
//! Output flags take an optional value: `--index` alone writes to
//! `index.json`, `--index out/idx.json` writes there.

use clap::{value_parser, Arg, Command};
use lexindex_core::{CONFIG_FILE_NAME, DEFAULT_WORKERS};
use std::path::PathBuf;

/// Default destination of `--index` without a value.
pub const DEFAULT_INDEX_PATH: &str = "index.json";
/// Default destination of `--counts` without a value.
pub const DEFAULT_COUNTS_PATH: &str = "counts.json";
/// Default destination of `--results` without a value.
pub const DEFAULT_RESULTS_PATH: &str = "results.json";

/// Build the complete CLI command tree.
pub fn build_cli() -> Command {
    Command::new("lexindex")
        .about("Build an inverted index over text files and run ranked queries against it")
        .subcommand_required(false)
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("FILE")
                .help("Read options from a TOML config file; flags override it")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("text")
                .long("text")
                .value_name("PATH")
                .help("Text file or directory of .txt/.text files to index")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("threads")
                .long("threads")
                .value_name("N")
                .help(format!(
                    "Use a pool of N worker threads (default: {})",
                    DEFAULT_WORKERS
                ))
                .num_args(0..=1)
                .default_missing_value("0")
                .allow_negative_numbers(true),
        )
        .arg(
            Arg::new("index")
                .long("index")
                .value_name("PATH")
                .help(format!(
                    "Write the inverted index as JSON (default: {})",
                    DEFAULT_INDEX_PATH
                ))
                .num_args(0..=1)
                .default_missing_value(DEFAULT_INDEX_PATH)
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("counts")
                .long("counts")
                .value_name("PATH")
                .help(format!(
                    "Write per-file token counts as JSON (default: {})",
                    DEFAULT_COUNTS_PATH
                ))
                .num_args(0..=1)
                .default_missing_value(DEFAULT_COUNTS_PATH)
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("query")
                .long("query")
                .value_name("PATH")
                .help("File of queries, one per line")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("exact")
                .long("exact")
                .help("Match query terms exactly instead of by prefix")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("results")
                .long("results")
                .value_name("PATH")
                .help(format!(
                    "Write search results as JSON (default: {})",
                    DEFAULT_RESULTS_PATH
                ))
                .num_args(0..=1)
                .default_missing_value(DEFAULT_RESULTS_PATH)
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .value_name("LEVEL")
                .help("Log verbosity written to stderr (default: warn)")
                .value_parser(["error", "warn", "info", "debug", "trace"]),
        )
        .subcommand(
            Command::new("init")
                .about("Write a commented config template")
                .arg(
                    Arg::new("path")
                        .help(format!("Destination (default: {})", CONFIG_FILE_NAME))
                        .value_parser(value_parser!(PathBuf)),
                )
                .arg(
                    Arg::new("force")
                        .long("force")
                        .help("Overwrite an existing file")
                        .action(clap::ArgAction::SetTrue),
                ),
        )
}
