//! Tracing subscriber setup
//!
//! The TUI owns the terminal, so interactive sessions log to a file under the
//! cache directory. One-shot runs log to stderr. `RUST_LOG` wins over the
//! configured level.

use crate::config::APP_DIR;
use anyhow::Context;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

const LOG_FILE: &str = "explainer.log";
const DEFAULT_TUI_LEVEL: &str = "info";
const DEFAULT_STDERR_LEVEL: &str = "warn";

/// Where log output goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    File(PathBuf),
    Stderr,
}

impl LogTarget {
    /// `<cache_dir>/code-explainer/explainer.log`, or stderr if there is no cache dir
    pub fn default_file() -> Self {
        dirs::cache_dir()
            .map(|dir| LogTarget::File(dir.join(APP_DIR).join(LOG_FILE)))
            .unwrap_or(LogTarget::Stderr)
    }
}

/// Build the filter: `RUST_LOG`, then the configured level, then the default
pub fn env_filter(configured: Option<&str>, default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .ok()
        .or_else(|| configured.and_then(|level| EnvFilter::try_new(level).ok()))
        .unwrap_or_else(|| EnvFilter::new(default_level))
}

/// Install the global subscriber, or carry on without one.
///
/// An unusable log file never stops startup. Falling back to stderr would
/// draw over the TUI, so the session just runs unlogged.
pub fn init(target: LogTarget, configured_level: Option<&str>) -> Option<PathBuf> {
    match try_init(target, configured_level) {
        Ok(path) => path,
        Err(e) => {
            eprintln!("warning: logging disabled: {:#}", e);
            None
        }
    }
}

/// Install the global subscriber. Returns the log file path, if any.
pub fn try_init(
    target: LogTarget,
    configured_level: Option<&str>,
) -> anyhow::Result<Option<PathBuf>> {
    match target {
        LogTarget::File(path) => {
            let file = open_log_file(&path)
                .with_context(|| format!("cannot open log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(env_filter(configured_level, DEFAULT_TUI_LEVEL))
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .try_init()
                .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;
            Ok(Some(path))
        }
        LogTarget::Stderr => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter(configured_level, DEFAULT_STDERR_LEVEL))
                .with_writer(std::io::stderr)
                .try_init()
                .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;
            Ok(None)
        }
    }
}

fn open_log_file(path: &Path) -> std::io::Result<File> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_unwritable_log_dir_does_not_fail_startup() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        fs::write(&blocker, "").unwrap();
        let path = blocker.join(APP_DIR).join(LOG_FILE);

        assert!(try_init(LogTarget::File(path.clone()), None).is_err());
        assert_eq!(init(LogTarget::File(path), None), None);
    }

    #[test]
    fn test_log_file_is_created_with_parents() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join(LOG_FILE);
        open_log_file(&path).unwrap();
        assert!(path.is_file());
    }

    #[test]
    fn test_configured_level_applies_without_rust_log() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        assert_eq!(env_filter(Some("debug"), "warn").to_string(), "debug");
        assert_eq!(env_filter(None, "warn").to_string(), "warn");
    }
}
