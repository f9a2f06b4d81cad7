//! lexindex CLI: build an inverted index and run ranked queries.
//!
//! ```text
//! lexindex --text input/text --threads 4 --index --query queries.txt --results
//! lexindex --config lexindex.toml --exact
//! lexindex init [PATH]
//! ```
//!
//! Without `--threads` everything runs on the main thread. Exit status is
//! non-zero when any stage failed.

mod commands;
mod driver;
mod parse;

use std::io;
use std::path::PathBuf;
use std::process;

use lexindex_core::CONFIG_FILE_NAME;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::build_cli;
use parse::matches_to_config;

fn main() {
    let cli = build_cli();
    let matches = cli.get_matches();

    // Handle `init` before reading any config.
    if let Some(init) = matches.subcommand_matches("init") {
        let path = init
            .get_one::<PathBuf>("path")
            .cloned()
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));
        match driver::write_template(&path, init.get_flag("force")) {
            Ok(()) => eprintln!("Wrote {}", path.display()),
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        }
        return;
    }

    let config = match matches_to_config(&matches) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(2);
        }
    };

    init_logging(config.log_level.as_deref());

    let failures = driver::run(&config);
    if !failures.is_empty() {
        eprintln!("Failed stages: {}", failures.join(", "));
        process::exit(1);
    }
}

fn init_logging(level: Option<&str>) {
    let level = level
        .and_then(|name| name.parse::<Level>().ok())
        .unwrap_or(Level::WARN);
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Warning: failed to install logger: {}", e);
    }
}
