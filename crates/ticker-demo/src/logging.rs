#![forbid(unsafe_code)]

//! File-backed tracing for the demo.
//!
//! The terminal belongs to the marquee, so log lines only go to the file
//! named by `TICKER_LOG`. Without it no subscriber is installed.

use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info";

/// Install a global fmt subscriber appending to `path`.
///
/// The filter comes from `RUST_LOG`, falling back to `info`.
pub fn init(path: &Path) -> io::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_thread_names(true)
        .try_init()
        .map_err(|err| io::Error::other(err.to_string()))
}
