use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use thiserror::Error;
use tracing_subscriber::{prelude::*, EnvFilter};

use super::formatter::{ConsoleFormatter, FileFormatter};

#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("I/O error during logging setup: {0}")]
    Io(#[from] io::Error),

    #[error("logging already initialized for this process")]
    AlreadyInitialized,
}

/// Handle to the process-wide logging configuration.
///
/// Returned exactly once per process by [`init_logging`]; the file handle it
/// refers to is released at process exit.
#[derive(Debug)]
pub struct LogHandle {
    log_path: PathBuf,
}

impl LogHandle {
    /// Path of the log file receiving this run's records.
    pub fn log_path(&self) -> &Path {
        &self.log_path
    }
}

/// Create the `logs/` directory under `base_dir` (a no-op if it already
/// exists) and return the timestamped log file path for this run.
///
/// Example: `logs/2025_11_05_17_35_22.log`
pub fn prepare_log_file(base_dir: &Path) -> Result<PathBuf, LoggingError> {
    let log_dir = base_dir.join("logs");
    fs::create_dir_all(&log_dir)?;

    let timestamp = chrono::Local::now().format("%Y_%m_%d_%H_%M_%S");
    Ok(log_dir.join(format!("{}.log", timestamp)))
}

/// Initialize dual-sink logging rooted at the current working directory.
pub fn init_logging() -> Result<LogHandle, LoggingError> {
    let cwd = std::env::current_dir()?;
    init_logging_at(&cwd)
}

/// Initialize dual-sink logging rooted at `base_dir`.
///
/// Every record at INFO or above goes to a timestamped file under
/// `<base_dir>/logs` and to stdout, each with its own format. Only the first
/// call in a process succeeds; later calls return
/// [`LoggingError::AlreadyInitialized`] instead of stacking extra sinks.
pub fn init_logging_at(base_dir: &Path) -> Result<LogHandle, LoggingError> {
    let log_path = prepare_log_file(base_dir)?;

    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    let file_layer = tracing_subscriber::fmt::layer()
        .event_format(FileFormatter)
        .with_writer(Mutex::new(file))
        .with_ansi(false); // No ANSI colors in the file

    let console_layer = tracing_subscriber::fmt::layer()
        .event_format(ConsoleFormatter)
        .with_writer(io::stdout);

    tracing_subscriber::registry()
        // DEBUG and below are dropped at both sinks
        .with(EnvFilter::new("info"))
        .with(file_layer)
        .with(console_layer)
        .try_init()
        .map_err(|_| LoggingError::AlreadyInitialized)?;

    Ok(LogHandle { log_path })
}
