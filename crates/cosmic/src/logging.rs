//! File logging. The terminal belongs to the UI, so logs go to
//! `cosmic.log` in the platform data directory.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use directories::ProjectDirs;
use tracing::Level;

/// Environment variable overriding the log level (`error` .. `trace`).
const LOG_LEVEL_ENV: &str = "COSMIC_LOG";

/// Install the global subscriber. Returns the log file path, or `None`
/// when there is nowhere to write and logging stays off.
pub fn init() -> Option<PathBuf> {
    let dirs = ProjectDirs::from("", "", "cosmic")?;
    let dir = dirs.data_dir();
    fs::create_dir_all(dir).ok()?;

    let path = dir.join("cosmic.log");
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .ok()?;

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(level_from_env())
        .try_init()
        .ok()?;
    Some(path)
}

fn level_from_env() -> Level {
    std::env::var(LOG_LEVEL_ENV)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(Level::INFO)
}
