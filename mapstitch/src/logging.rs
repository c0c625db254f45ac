//! Logging infrastructure for mapstitch.
//!
//! Provides structured logging with file output and console output:
//! - Writes to `~/.mapstitch/mapstitch.log` by default (cleared on each run)
//! - Also prints to stderr so the image path can go to stdout
//! - Configurable via RUST_LOG environment variable

use std::fs;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Guard that must be kept alive for the duration of logging.
///
/// Dropping this guard will flush and close the log file writer.
pub struct LoggingGuard {
    _file_guard: WorkerGuard,
}

/// Initialize logging system.
///
/// Creates the log directory if needed, clears the previous log file, and
/// installs a global subscriber writing to both the file and stderr.
///
/// # Arguments
///
/// * `log_path` - Log file path (e.g., "~/.mapstitch/mapstitch.log")
/// * `debug` - Lower the default filter from `info` to `debug`
///
/// # Errors
///
/// Returns error if the log file cannot be prepared or a global subscriber
/// is already installed.
pub fn init_logging(log_path: &Path, debug: bool) -> Result<LoggingGuard, io::Error> {
    let (log_dir, log_file) = prepare_log_file(log_path)?;

    let file_appender = tracing_appender::rolling::never(&log_dir, &log_file);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false)
        .with_target(true);

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .compact();

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(debug)));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .map_err(io::Error::other)?;

    Ok(LoggingGuard {
        _file_guard: file_guard,
    })
}

/// Creates the log directory and truncates the log file.
///
/// Returns the directory and file name the appender should use.
pub fn prepare_log_file(log_path: &Path) -> Result<(PathBuf, PathBuf), io::Error> {
    let (log_dir, log_file) = split_log_path(log_path)?;

    fs::create_dir_all(&log_dir)?;
    fs::write(log_dir.join(&log_file), "")?;

    Ok((log_dir, log_file))
}

/// Splits a log path into directory and file name.
///
/// A bare file name lives in the current directory.
fn split_log_path(log_path: &Path) -> Result<(PathBuf, PathBuf), io::Error> {
    let log_file = log_path.file_name().map(PathBuf::from).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("log path has no file name: {}", log_path.display()),
        )
    })?;
    let log_dir = log_path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    Ok((log_dir, log_file))
}

/// Filter directive used when RUST_LOG is not set.
pub fn default_filter(debug: bool) -> &'static str {
    if debug {
        "debug"
    } else {
        "info"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_log_file_is_in_config_directory() {
        let file = crate::config::ConfigFile::default().logging.file;
        assert_eq!(file.parent(), Some(crate::config::config_directory().as_path()));

        let (dir, name) = split_log_path(&file).unwrap();
        assert_eq!(dir, crate::config::config_directory());
        assert_eq!(name, PathBuf::from("mapstitch.log"));
    }

    #[test]
    fn test_default_filter() {
        assert_eq!(default_filter(false), "info");
        assert_eq!(default_filter(true), "debug");
    }

    // init_logging installs a global subscriber, so only the file handling is tested

    #[test]
    fn test_creates_directory_and_file() {
        let temp = TempDir::new().unwrap();
        let log_path = temp.path().join("nested/logs/run.log");

        let (dir, file) = prepare_log_file(&log_path).unwrap();

        assert_eq!(dir, temp.path().join("nested/logs"));
        assert_eq!(file, PathBuf::from("run.log"));
        assert_eq!(fs::read_to_string(&log_path).unwrap(), "");
    }

    #[test]
    fn test_clears_existing_file() {
        let temp = TempDir::new().unwrap();
        let log_path = temp.path().join("run.log");
        fs::write(&log_path, "old log data").unwrap();

        prepare_log_file(&log_path).unwrap();

        assert_eq!(fs::read_to_string(&log_path).unwrap(), "");
    }

    #[test]
    fn test_bare_file_name_uses_current_dir() {
        let (dir, file) = split_log_path(Path::new("only.log")).unwrap();
        assert_eq!(dir, PathBuf::from("."));
        assert_eq!(file, PathBuf::from("only.log"));
    }

    #[test]
    fn test_path_without_file_name() {
        let result = split_log_path(Path::new("/"));
        assert_eq!(result.unwrap_err().kind(), io::ErrorKind::InvalidInput);
    }
}
