//! Tracing subscriber setup.
//!
//! The filter comes from `MODELBOARD_LOG` (same syntax as `RUST_LOG`),
//! falling back to the level the caller passes in.

use std::fs;
use std::path::Path;
use std::sync::Once;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

pub const LOG_ENV: &str = "MODELBOARD_LOG";
pub const LOG_FILE_NAME: &str = "modelboard.log";

static INIT: Once = Once::new();

fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Logs to stderr. Safe to call more than once; only the first call installs.
pub fn init_stderr(default_level: &str) {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(env_filter(default_level))
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_level(true)
            .try_init();
    });
}

/// Logs to a daily-rolling file under `dir`, for full-screen mode where
/// stderr would corrupt the display.
///
/// The returned guard must be held until exit so buffered lines are flushed.
pub fn init_file(dir: &Path, default_level: &str) -> Result<WorkerGuard> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    let appender = tracing_appender::rolling::daily(dir, LOG_FILE_NAME);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    INIT.call_once(|| {
        let file_layer = tracing_subscriber::fmt::layer()
            .with_writer(writer)
            .with_ansi(false)
            .with_target(true);
        let _ = tracing_subscriber::registry()
            .with(env_filter(default_level))
            .with(file_layer)
            .try_init();
    });

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_init_file_creates_directory() {
        let dir = tempdir().unwrap();
        let logs = dir.path().join("logs");

        let _guard = init_file(&logs, "warn").unwrap();
        assert!(logs.is_dir());

        // A second init is a no-op rather than a panic.
        init_stderr("warn");
    }
}
