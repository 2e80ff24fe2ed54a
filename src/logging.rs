//! Log file setup.
//!
//! The TUI owns the terminal, so tracing output goes to
//! `<data_local_dir>/zews/zews.log`. `RUST_LOG` takes precedence over the
//! configured level.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const LOG_FILE_NAME: &str = "zews.log";

/// Directory the log file lives in, if the platform has one.
pub fn log_dir() -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join("zews"))
}

/// Filter from `RUST_LOG`, falling back to `level`.
pub fn build_env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the file subscriber under `dir`.
///
/// Best-effort: returns `None` if the directory or file cannot be created or
/// a global subscriber is already set. Safe to call more than once.
pub fn init_tracing_in(dir: &Path, level: &str) -> Option<PathBuf> {
    fs::create_dir_all(dir).ok()?;
    let path = dir.join(LOG_FILE_NAME);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .ok()?;

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(build_env_filter(level))
        .with(file_layer)
        .try_init()
        .ok()?;

    Some(path)
}

/// Install the file subscriber in the default log directory.
pub fn init_tracing(level: &str) -> Option<PathBuf> {
    let dir = log_dir()?;
    init_tracing_in(&dir, level)
}
