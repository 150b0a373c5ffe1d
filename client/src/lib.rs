#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! # `glalby-client` — Typed Greenlight Alby Client
//!
//! The typed surface over the native Greenlight Alby library.  Every
//! operation here follows the same sequence: hold the object alive, lower
//! the request into a buffer, make the native call, check its status, lift
//! the response or error.  The sequence itself lives in `glalby-transport`;
//! this crate names the operations and their types.
//!
//! ## Entry points
//! - [`Bindings::new`] verifies the library contract and is the only way to
//!   reach any other call.
//! - [`Bindings::recover`] registers or recovers a node from a mnemonic.
//! - [`Bindings::new_blocking_greenlight_alby_client`] constructs a
//!   [`BlockingGreenlightAlbyClient`].
//!
//! ## Backends
//! A native library is anything implementing [`GreenlightNative`].  The
//! `glalby-dylib` backend loads the shared library; tests use an
//! in-process implementation.

pub mod bindings;
pub mod client;
pub mod manifest;
pub mod native;

pub use bindings::Bindings;
pub use client::BlockingGreenlightAlbyClient;
pub use manifest::{
    ClientMethod, CONTRACT, CONTRACT_VERSION, FUNC_NEW_CLIENT, FUNC_RECOVER, NAMESPACE, OBJECT_NAME,
};
pub use native::{DynGreenlightNative, GreenlightNative};
pub use types::SdkError;
