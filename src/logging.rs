//! File logging. The terminal belongs to the editor, so tracing output goes
//! to a file through a non-blocking writer.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use tracing_appender::non_blocking;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// Log file used by `--debug` when no `--log-file` is given
pub const DEFAULT_LOG_FILE: &str = "typeahead.log";

/// Where logs go, if anywhere
pub fn log_path(log_file: Option<&Path>, debug: bool) -> Option<PathBuf> {
    match log_file {
        Some(path) => Some(path.to_path_buf()),
        None if debug => Some(PathBuf::from(DEFAULT_LOG_FILE)),
        None => None,
    }
}

/// Install the global subscriber. Keep the guard alive until exit so
/// buffered lines are flushed.
pub fn init(log_file: Option<&Path>, debug: bool) -> std::io::Result<Option<WorkerGuard>> {
    let Some(path) = log_path(log_file, debug) else {
        return Ok(None);
    };

    let mut options = OpenOptions::new();
    options.create(true).append(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let file = options.open(&path)?;
    let (writer, guard) = non_blocking(file);

    let default_filter = if debug { "typeahead=debug" } else { "typeahead=warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(false)
        .with_filter(env_filter);

    let _ = tracing_subscriber::registry().with(file_layer).try_init();
    Ok(Some(guard))
}
