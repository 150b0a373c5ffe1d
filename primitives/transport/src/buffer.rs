//! Byte buffers that cross the native boundary.

use std::fmt;
use std::marker::PhantomData;
use std::mem::ManuallyDrop;
use std::ptr;

use codec::{checked_len, CodecError};

use crate::dispatch::free_buffer;
use crate::native::NativeApi;

/// A byte buffer allocated by the native side.
///
/// Layout matches the native `RustBuffer`: capacity, length, data pointer.
/// The buffer is not `Clone`: it must be released exactly once, either by
/// handing it back to the native side as an argument or through
/// [`NativeApi::buffer_free`].  Dropping it without doing either leaks it.
#[repr(C)]
pub struct TransferBuffer {
    capacity: i32,
    len: i32,
    data: *mut u8,
}

impl TransferBuffer {
    /// A buffer with no allocation behind it.
    pub const fn empty() -> Self { Self { capacity: 0, len: 0, data: ptr::null_mut() } }

    /// Assemble a buffer from its raw parts.
    ///
    /// # Safety
    /// `data` must be null, or valid for reads of `len` bytes for as long as
    /// the buffer is alive.  When the buffer is later turned back into a
    /// `Vec` with [`TransferBuffer::into_vec`], `data`, `len` and `capacity`
    /// must come from a `Vec<u8>` allocation.
    pub unsafe fn from_raw_parts(data: *mut u8, len: i32, capacity: i32) -> Self {
        Self { capacity, len, data }
    }

    /// Hand a Rust allocation over as a buffer.
    ///
    /// Used by native implementations written in Rust.  Fails when the
    /// allocation is too large for the `i32` length fields.
    pub fn from_vec(bytes: Vec<u8>) -> Result<Self, CodecError> {
        let capacity = checked_len("buffer capacity", bytes.capacity())?;
        let len = checked_len("buffer", bytes.len())?;
        let mut bytes = ManuallyDrop::new(bytes);
        Ok(Self { capacity, len, data: bytes.as_mut_ptr() })
    }

    /// Reclaim a buffer built by [`TransferBuffer::from_vec`].
    ///
    /// # Safety
    /// The buffer must have been produced by [`TransferBuffer::from_vec`]
    /// (or from the parts of a `Vec<u8>`) and not released since.
    pub unsafe fn into_vec(self) -> Vec<u8> {
        if self.data.is_null() {
            return Vec::new();
        }
        Vec::from_raw_parts(self.data, self.len(), self.capacity())
    }

    /// Number of payload bytes.
    pub fn len(&self) -> usize { usize::try_from(self.len).unwrap_or(0) }

    /// Allocated capacity in bytes.
    pub fn capacity(&self) -> usize { usize::try_from(self.capacity).unwrap_or(0) }

    /// Whether the buffer carries no payload.
    pub fn is_empty(&self) -> bool { self.data.is_null() || self.len <= 0 }

    /// Raw data pointer, possibly null.
    pub fn data_pointer(&self) -> *const u8 { self.data }

    /// View the payload bytes.
    pub fn as_slice(&self) -> &[u8] {
        if self.is_empty() {
            return &[];
        }
        // SAFETY: a non-null buffer is valid for `len` bytes while alive,
        // which every constructor requires of its caller.
        unsafe { std::slice::from_raw_parts(self.data, self.len()) }
    }
}

impl Default for TransferBuffer {
    fn default() -> Self { Self::empty() }
}

impl fmt::Debug for TransferBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransferBuffer")
            .field("capacity", &self.capacity)
            .field("len", &self.len)
            .field("data", &self.data)
            .finish()
    }
}

/// Caller-owned bytes lent to the native side for one call.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct ForeignBytes<'a> {
    len: i32,
    data: *const u8,
    _marker: PhantomData<&'a [u8]>,
}

impl<'a> ForeignBytes<'a> {
    /// Borrow `bytes` for a native call.
    pub fn from_slice(bytes: &'a [u8]) -> Result<Self, CodecError> {
        let len = checked_len("foreign bytes", bytes.len())?;
        Ok(Self { len, data: bytes.as_ptr(), _marker: PhantomData })
    }

    /// Number of bytes lent.
    pub fn len(&self) -> usize { usize::try_from(self.len).unwrap_or(0) }

    /// Whether no bytes are lent.
    pub fn is_empty(&self) -> bool { self.len <= 0 }

    /// The lent bytes.
    pub fn as_slice(&self) -> &'a [u8] {
        if self.data.is_null() || self.len <= 0 {
            return &[];
        }
        // SAFETY: built from a slice that outlives `'a`.
        unsafe { std::slice::from_raw_parts(self.data, self.len()) }
    }
}

/// A received [`TransferBuffer`] that is released when dropped.
///
/// Every buffer the native side returns is wrapped in one of these on
/// arrival, so it is released on every exit path, including decode faults.
pub struct OwnedBuffer<'a, N: NativeApi + ?Sized> {
    native: &'a N,
    buf: Option<TransferBuffer>,
}

impl<'a, N: NativeApi + ?Sized> OwnedBuffer<'a, N> {
    /// Take ownership of `buf`, to be released through `native`.
    pub fn new(native: &'a N, buf: TransferBuffer) -> Self { Self { native, buf: Some(buf) } }

    /// The payload bytes.
    pub fn as_slice(&self) -> &[u8] {
        match &self.buf {
            Some(buf) => buf.as_slice(),
            None => &[],
        }
    }

    /// Release the buffer now.
    pub fn release(mut self) {
        if let Some(buf) = self.buf.take() {
            free_buffer(self.native, buf);
        }
    }
}

impl<N: NativeApi + ?Sized> Drop for OwnedBuffer<'_, N> {
    fn drop(&mut self) {
        if let Some(buf) = self.buf.take() {
            free_buffer(self.native, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_buffer() {
        let buf = TransferBuffer::empty();
        assert!(buf.is_empty());
        assert_eq!(buf.len(), 0);
        assert_eq!(buf.as_slice(), &[] as &[u8]);
        assert!(buf.data_pointer().is_null());
    }

    #[test]
    fn test_vec_round_trip() {
        let buf = TransferBuffer::from_vec(vec![1, 2, 3]).expect("small buffer");
        assert_eq!(buf.len(), 3);
        assert_eq!(buf.as_slice(), &[1, 2, 3]);

        let bytes = unsafe { buf.into_vec() };
        assert_eq!(bytes, vec![1, 2, 3]);
    }

    #[test]
    fn test_null_buffer_into_vec() {
        let bytes = unsafe { TransferBuffer::empty().into_vec() };
        assert!(bytes.is_empty());
    }

    #[test]
    fn test_foreign_bytes_borrow() {
        let data = b"lightning".to_vec();
        let foreign = ForeignBytes::from_slice(&data).expect("small slice");
        assert_eq!(foreign.len(), 9);
        assert_eq!(foreign.as_slice(), b"lightning");

        let empty = ForeignBytes::from_slice(&[]).expect("empty slice");
        assert!(empty.is_empty());
        assert_eq!(empty.as_slice(), &[] as &[u8]);
    }
}
