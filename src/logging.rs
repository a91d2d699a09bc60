//! Tracing subscriber setup.
//!
//! The terminal UI owns stdout and stderr, so logs only go to a file. Without
//! a log file no subscriber is installed and tracing events are dropped.
//!
//! Filter priority: `POKEDEX_LOG`, then `RUST_LOG`, then `info`.

use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "POKEDEX_LOG";
const DEFAULT_DIRECTIVE: &str = "info";

/// Install the global subscriber. Call at most once.
pub fn init_logging(log_file: Option<&Path>) -> io::Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let fmt_layer = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(build_env_filter())
        .with(fmt_layer)
        .try_init()
        .map_err(io::Error::other)?;

    tracing::info!(path = %path.display(), "logging initialized");
    Ok(())
}

fn build_env_filter() -> EnvFilter {
    if let Ok(directives) = std::env::var(LOG_ENV) {
        if let Ok(filter) = EnvFilter::try_new(&directives) {
            return filter;
        }
    }
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    EnvFilter::new(DEFAULT_DIRECTIVE)
}
