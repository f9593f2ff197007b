//! Logging module for the mlproject scaffold
//!
//! This module provides:
//! - Dual logging (timestamped file + console)
//! - Independent message formats per sink
//! - One-shot initialization with an explicit handle

mod formatter;
mod setup;

// Re-export the public API
pub use formatter::{ConsoleFormatter, FileFormatter};
pub use setup::{init_logging, init_logging_at, prepare_log_file, LogHandle, LoggingError};
