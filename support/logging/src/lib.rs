#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Logging setup for the bindings.
//!
//! Library crates log through `tracing` macros; [`init`] installs a global
//! `tracing-subscriber` formatter for hosts that do not bring their own.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Errors while installing the log subscriber.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// The level is not a valid filter directive.
    #[error("Invalid log filter '{filter}': {message}")]
    InvalidFilter {
        /// Filter as given.
        filter: String,
        /// Parser error text.
        message: String,
    },
    /// The log file could not be opened for appending.
    #[error("Failed to open log file: {0}")]
    FileOpen(#[from] std::io::Error),
    /// A global subscriber is already installed.
    #[error("Logging already initialized: {0}")]
    AlreadyInitialized(String),
}

/// Parse `level` as an `EnvFilter` directive.
pub fn filter(level: &str) -> Result<EnvFilter, LoggingError> {
    EnvFilter::try_new(level).map_err(|err| LoggingError::InvalidFilter {
        filter: level.to_string(),
        message: err.to_string(),
    })
}

/// Install the global subscriber, writing to `file` or to stderr.
pub fn init(level: &str, file: Option<&Path>) -> Result<(), LoggingError> {
    let builder = tracing_subscriber::fmt().with_env_filter(filter(level)?).with_target(true);

    let installed = match file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).try_init()
        }
        None => builder.with_writer(std::io::stderr).try_init(),
    };
    installed.map_err(|err| LoggingError::AlreadyInitialized(err.to_string()))
}

/// Emits a trace event tagged with a module prefix.
pub fn trace(module: &str, msg: &str) {
    tracing::trace!(module, "{}", msg);
}
