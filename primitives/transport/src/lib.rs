#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! # `glalby-transport` — Native Boundary Transport
//!
//! This crate owns everything that happens *at* the boundary between safe
//! Rust and the native Greenlight library: the memory that crosses it, the
//! status every call reports, and the rules for turning that status into
//! values, errors or faults.
//!
//! ## Core Concepts
//!
//! ### [`TransferBuffer`] and [`ForeignBytes`]
//! The `#[repr(C)]` shapes used to hand byte strings across.  A
//! [`TransferBuffer`] is allocated by the native side and must be released
//! exactly once through [`NativeApi::buffer_free`]; [`ForeignBytes`] borrows
//! caller memory for the duration of a single call.
//!
//! ### [`CallStatus`]
//! Every native call writes a one-byte code into a status record:
//! `0` success, `1` caller error (an error value is in the status buffer),
//! `2` internal panic (a message may be in the status buffer).
//!
//! ### [`NativeApi`]
//! The trait a native library implements.  The dispatcher functions in
//! [`dispatch`] are generic over it, so the same call sequence runs against
//! a real shared library and against the in-process
//! [`testing::LoopbackNative`].
//!
//! ### [`Fault`]
//! Contract violations (undecodable payloads, native panics, calls on a
//! destroyed object, version drift) are not recoverable errors.  They are
//! raised as a panic carrying a typed [`Fault`] payload.  Hosts that want
//! containment wrap work in [`catch_fault`].
//!
//! ### [`ObjectHandle`]
//! Reference-counted ownership of a native object pointer: any number of
//! concurrent calls, at most one release, and never a release while a call
//! is in flight.
//!
//! ### [`ContractManifest`]
//! The expected contract version and per-symbol checksums, checked once by
//! [`verify_contract`] before any other call is made.
//!
//! ## Feature Flags
//! - `test-utils` (default): exports [`testing::LoopbackNative`], an
//!   in-process native stand-in that counts buffer allocations.
//!
//! ## Example
//! ```
//! use transport::dispatch::{lift_from_buffer, lower_into_buffer};
//! use transport::testing::LoopbackNative;
//!
//! let native = LoopbackNative::default();
//! let buf = lower_into_buffer(&native, &vec![1u32, 2, 3]).unwrap();
//! let values: Vec<u32> = lift_from_buffer(&native, buf);
//!
//! assert_eq!(values, vec![1, 2, 3]);
//! assert_eq!(native.outstanding(), 0);
//! ```

pub mod buffer;
pub mod contract;
pub mod dispatch;
pub mod fault;
pub mod handle;
pub mod native;
pub mod status;

#[cfg(feature = "test-utils")]
pub mod testing;

pub use buffer::{ForeignBytes, OwnedBuffer, TransferBuffer};
pub use codec::{CodecError, FfiConverter};
pub use contract::{verify_contract, ApiChecksum, ContractManifest};
pub use dispatch::{
    call, call_in_cleanup, call_with_error, free_buffer, lift_from_buffer, lower_into_buffer,
    BufferConverter,
};
pub use fault::{catch_fault, Fault};
pub use handle::{HandleGuard, ObjectHandle};
pub use native::{DynNative, NativeApi, NativePointer};
pub use status::{CallStatus, CallStatusCode};
