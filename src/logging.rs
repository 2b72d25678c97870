//! File-backed tracing setup.
//!
//! The TUI owns stdout/stderr while running, so log lines go to a file.
//! `RUST_LOG` controls the filter (default `ghg_predict=info`).
//!
//! Logging never blocks a prediction: when the log file cannot be opened the
//! subscriber falls back to stderr (one-shot commands) or discards output
//! (dashboard), and the failure is reported as a warning.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const DEFAULT_FILTER: &str = "ghg_predict=info";
/// Stderr is shared with command output, so only warnings show by default.
const FALLBACK_FILTER: &str = "ghg_predict=warn";

/// Where log lines go when the log file is unavailable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    Stderr,
    Discard,
}

/// Where log lines ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    File(PathBuf),
    Fallback { target: Fallback, reason: String },
}

fn filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

fn open_log_file(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

/// Install the global subscriber, appending to `path` when possible.
///
/// A subscriber that is already installed is left in place.
pub fn init(path: &Path, fallback: Fallback) -> LogTarget {
    let reason = match open_log_file(path) {
        Ok(file) => {
            let _ = tracing_subscriber::registry()
                .with(filter(DEFAULT_FILTER))
                .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
                .try_init();
            return LogTarget::File(path.to_path_buf());
        }
        Err(e) => e.to_string(),
    };

    let _ = match fallback {
        Fallback::Stderr => tracing_subscriber::registry()
            .with(filter(FALLBACK_FILTER))
            .with(fmt::layer().with_writer(io::stderr))
            .try_init(),
        Fallback::Discard => tracing_subscriber::registry()
            .with(filter(DEFAULT_FILTER))
            .with(fmt::layer().with_writer(io::sink))
            .try_init(),
    };

    tracing::warn!(path = %path.display(), %reason, "log file unavailable, continuing without it");
    LogTarget::Fallback {
        target: fallback,
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unopenable_log_file_falls_back() {
        let path = std::env::temp_dir()
            .join(format!("ghg-no-such-dir-{}", std::process::id()))
            .join("ghg.log");
        match init(&path, Fallback::Discard) {
            LogTarget::Fallback { target, reason } => {
                assert_eq!(target, Fallback::Discard);
                assert!(!reason.is_empty());
            }
            other => panic!("expected fallback, got {other:?}"),
        }
        assert!(!path.exists());
    }

    #[test]
    fn writable_log_file_is_used() {
        let path = std::env::temp_dir().join(format!("ghg-log-{}.log", std::process::id()));
        assert_eq!(init(&path, Fallback::Stderr), LogTarget::File(path.clone()));
        assert!(path.exists());
        std::fs::remove_file(&path).unwrap();
    }
}
