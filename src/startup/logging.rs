//! Tracing initialization.
//!
//! The terminal belongs to the TUI, so log output goes to a file under the
//! platform cache directory.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// `$CACHE_DIR/chatdeck/chatdeck.log`, falling back to the temp dir.
pub fn default_log_path() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("chatdeck")
        .join("chatdeck.log")
}

/// Build the filter for `directive`, falling back to `info` when it does not parse.
pub fn build_filter(directive: &str) -> EnvFilter {
    EnvFilter::try_new(directive).unwrap_or_else(|e| {
        eprintln!("Ignoring invalid log filter '{}': {}", directive, e);
        EnvFilter::new("info")
    })
}

/// Install the global subscriber writing to `path`.
///
/// Returns an error if the file cannot be opened. Installing twice is not an
/// error; the first subscriber stays in place.
pub fn init_logging(directive: &str, path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let installed = tracing_subscriber::fmt()
        .with_env_filter(build_filter(directive))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init();

    if installed.is_ok() {
        tracing::info!(
            "chatdeck {} logging to {}",
            env!("CARGO_PKG_VERSION"),
            path.display()
        );
    }
    Ok(())
}
