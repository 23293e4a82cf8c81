//! src/logging.rs
//!
//! File-backed `env_logger` setup. The terminal belongs to the UI, so log
//! records go to a file instead of stderr.

use std::fs::OpenOptions;
use std::path::Path;

use color_eyre::eyre::{Result, WrapErr};
use env_logger::{Env, Target};

/// Install the global logger. `RUST_LOG` wins over `default_level`.
pub fn init(path: &Path, default_level: &str) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .wrap_err_with(|| format!("failed to open log file {}", path.display()))?;

    env_logger::Builder::from_env(Env::default().default_filter_or(default_level))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()
        .wrap_err("logger already initialized")
}
