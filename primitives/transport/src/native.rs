//! The native library seam.

use std::ffi::c_void;
use std::sync::Arc;

use crate::buffer::{ForeignBytes, TransferBuffer};
use crate::status::CallStatus;

/// Opaque pointer to an object owned by the native side.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NativePointer(*const c_void);

// SAFETY: the pointer is only ever dereferenced by the native library, which
// guarantees its objects may be used from any thread.
unsafe impl Send for NativePointer {}
unsafe impl Sync for NativePointer {}

impl NativePointer {
    /// Wrap a raw pointer received from the native side.
    pub fn from_raw(ptr: *const c_void) -> Self { Self(ptr) }

    /// The null pointer.
    pub fn null() -> Self { Self(std::ptr::null()) }

    /// The raw pointer, for passing back to the native side.
    pub fn as_ptr(self) -> *const c_void { self.0 }

    /// Whether the pointer is null.
    pub fn is_null(self) -> bool { self.0.is_null() }
}

/// Buffer management and contract queries every native library exposes.
///
/// Implementations forward to the library's exported symbols.  Each method
/// takes the status record by mutable reference; the dispatcher inspects it
/// after the call returns.
pub trait NativeApi: Send + Sync {
    /// Human-readable library name, for diagnostics.
    fn library_name(&self) -> &str;

    /// Copy `bytes` into a freshly allocated native buffer.
    fn buffer_from_bytes(&self, bytes: ForeignBytes<'_>, status: &mut CallStatus) -> TransferBuffer;

    /// Release a native buffer.
    fn buffer_free(&self, buf: TransferBuffer, status: &mut CallStatus);

    /// Contract version the library was built against.
    fn contract_version(&self, status: &mut CallStatus) -> u32;

    /// Checksum of one exported API symbol, e.g. `func_recover`.
    fn checksum(&self, symbol: &str, status: &mut CallStatus) -> u16;
}

/// Shared, type-erased native library.
pub type DynNative = Arc<dyn NativeApi>;
