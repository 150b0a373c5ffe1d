// SPDX-License-Identifier: CC0-1.0

//! Glalby umbrella crate.
//!
//! Re-exports the typed Greenlight Alby client and wires configuration to
//! the shared-library backend.  The functional code lives in the workspace
//! member crates under `primitives`, `client`, `backends` and `support`.
//!
//! ```no_run
//! let config = glalby::Config::load_default().expect("config");
//! glalby::init_logging(&config).expect("logging");
//!
//! let bindings = glalby::open(&config).expect("library");
//! let credentials = bindings.recover("abandon ... about").expect("recover");
//! let client = bindings
//!     .new_blocking_greenlight_alby_client("abandon ... about", &credentials)
//!     .expect("client");
//! println!("{}", client.get_info().expect("get_info").alias);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]
#![warn(deprecated_in_future)]
#![doc(test(attr(warn(unused))))]

use std::sync::Arc;

use thiserror::Error;

pub use client::{Bindings, BlockingGreenlightAlbyClient, ClientMethod, GreenlightNative};
pub use config::{Config, ConfigError};
pub use dylib::{DylibNative, LoadError};
pub use logging::LoggingError;
pub use transport::{catch_fault, Fault};
pub use types::*;

/// Miscellaneous metadata about the Glalby workspace.
pub mod glalby_meta {
    /// Version string for the umbrella crate, as reported by Cargo.
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
}

/// Errors while opening the native library from configuration.
#[derive(Debug, Error)]
pub enum OpenError {
    /// The library could not be located or loaded.
    #[error(transparent)]
    Load(#[from] LoadError),
}

/// Load the library named by `config` and verify its contract.
///
/// A contract mismatch raises a [`Fault`]; wrap the call in
/// [`catch_fault`] to handle it.
pub fn open(config: &Config) -> Result<Bindings, OpenError> {
    let native = DylibNative::open(&config.library.name, &config.library.search_paths)?;
    tracing::debug!(path = %native.path().display(), "opening greenlight bindings");
    Ok(Bindings::new(Arc::new(native)))
}

/// Install the global log subscriber described by `config`.
pub fn init_logging(config: &Config) -> Result<(), LoggingError> {
    logging::init(&config.logging.level, config.logging.file.as_deref())
}
