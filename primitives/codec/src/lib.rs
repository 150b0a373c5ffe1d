#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! # `glalby-codec` — Wire Codec for the Native Boundary
//!
//! Every composite value that crosses the native boundary travels as a flat
//! byte string.  This crate defines that byte format and the
//! [`FfiConverter`] trait implemented by every type allowed to cross.
//!
//! ## Format
//!
//! - Integers and floats: fixed width, big-endian.
//! - `bool`: one byte, `0` or `1` (any non-zero byte decodes as `true`).
//! - `String`: `i32` byte length followed by raw UTF-8, no terminator.
//! - `Vec<T>`: `i32` element count followed by the elements.
//! - `Option<T>`: one byte tag, `0` = absent, `1` = present + inner value.
//! - Records: fields back to back in declaration order, no tagging.
//! - Enums: `i32` discriminant, 1-based in declaration order.
//!
//! There is no field tagging or type information on the wire: both sides
//! must agree on the exact layout, which is what the contract checksum gate
//! in `glalby-transport` protects.
//!
//! ## Example
//! ```
//! use codec::FfiConverter;
//!
//! let bytes = Some(7u16).lower_bytes().unwrap();
//! assert_eq!(bytes, vec![1, 0, 7]);
//! assert_eq!(Option::<u16>::lift_bytes(&bytes).unwrap(), Some(7));
//! ```

use bytes::{Buf, BufMut};

mod macros;

/// Type alias for codec results.
pub type Result<T> = std::result::Result<T, CodecError>;

/// Failures while encoding or decoding wire values.
///
/// Decoding failures mean the two sides of the boundary disagree about the
/// layout; callers above the codec treat them as faults, never as ordinary
/// errors.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Fewer bytes remained than the next value needs.
    #[error("unexpected end of buffer: needed {needed} bytes, {remaining} remaining")]
    UnexpectedEof {
        /// Bytes required by the value being read.
        needed: usize,
        /// Bytes left in the buffer.
        remaining: usize,
    },

    /// A length or count prefix was negative.
    #[error("negative length prefix: {0}")]
    NegativeLength(i32),

    /// A string or sequence is too long for its `i32` length prefix.
    #[error("{what} of length {len} does not fit into an i32 prefix")]
    LengthOverflow {
        /// The kind of value being written ("string", "sequence").
        what: &'static str,
        /// The offending length.
        len: usize,
    },

    /// An optional value carried a tag other than `0` or `1`.
    #[error("invalid optional tag: {0}")]
    InvalidOptionTag(i8),

    /// String bytes were not valid UTF-8.
    #[error("invalid UTF-8 in string: {0}")]
    InvalidUtf8(String),

    /// An enum, union or error discriminant is not part of the contract.
    #[error("unknown discriminant {value} for {type_name}")]
    UnknownDiscriminant {
        /// Name of the type being decoded.
        type_name: &'static str,
        /// The discriminant found on the wire.
        value: i32,
    },

    /// Bytes remained after a complete top-level value was decoded.
    #[error("{remaining} bytes left in buffer after lifting {type_name}")]
    TrailingBytes {
        /// Name of the type that was lifted.
        type_name: &'static str,
        /// Number of unconsumed bytes.
        remaining: usize,
    },
}

impl From<std::string::FromUtf8Error> for CodecError {
    fn from(err: std::string::FromUtf8Error) -> Self { CodecError::InvalidUtf8(err.to_string()) }
}

/// Bidirectional mapping between a Rust value and its wire encoding.
///
/// `write`/`read` are the field-level operations used when the value is
/// nested inside another one. `lower_bytes`/`lift_bytes` produce and consume
/// the complete contents of a transfer buffer holding just this value.
pub trait FfiConverter: Sized {
    /// Appends the encoding of `self` to `buf`.
    fn write(&self, buf: &mut Vec<u8>) -> Result<()>;

    /// Consumes exactly one encoded value from the front of `buf`.
    fn read(buf: &mut &[u8]) -> Result<Self>;

    /// Encodes `self` as the sole content of a transfer buffer.
    fn lower_bytes(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.write(&mut buf)?;
        Ok(buf)
    }

    /// Decodes a value that must span `bytes` exactly.
    ///
    /// Unconsumed bytes after the value are reported as
    /// [`CodecError::TrailingBytes`], never silently dropped.
    fn lift_bytes(bytes: &[u8]) -> Result<Self> {
        let mut cursor = bytes;
        let value = Self::read(&mut cursor)?;
        if !cursor.is_empty() {
            return Err(CodecError::TrailingBytes {
                type_name: std::any::type_name::<Self>(),
                remaining: cursor.len(),
            });
        }
        Ok(value)
    }
}

/// Fails unless at least `needed` bytes remain in `buf`.
pub fn check_remaining(buf: &[u8], needed: usize) -> Result<()> {
    if buf.len() < needed {
        return Err(CodecError::UnexpectedEof { needed, remaining: buf.len() });
    }
    Ok(())
}

/// Converts a Rust length into the `i32` used by length prefixes.
pub fn checked_len(what: &'static str, len: usize) -> Result<i32> {
    i32::try_from(len).map_err(|_| CodecError::LengthOverflow { what, len })
}

/// Reads an `i32` length prefix and rejects negative values.
pub fn read_len(buf: &mut &[u8]) -> Result<usize> {
    let len = i32::read(buf)?;
    usize::try_from(len).map_err(|_| CodecError::NegativeLength(len))
}

macro_rules! impl_scalar {
    ($($ty:ty => $put:ident, $get:ident;)*) => {
        $(
            impl FfiConverter for $ty {
                fn write(&self, buf: &mut Vec<u8>) -> Result<()> {
                    buf.$put(*self);
                    Ok(())
                }

                fn read(buf: &mut &[u8]) -> Result<Self> {
                    check_remaining(buf, std::mem::size_of::<$ty>())?;
                    Ok(buf.$get())
                }
            }
        )*
    };
}

impl_scalar! {
    i8 => put_i8, get_i8;
    u8 => put_u8, get_u8;
    i16 => put_i16, get_i16;
    u16 => put_u16, get_u16;
    i32 => put_i32, get_i32;
    u32 => put_u32, get_u32;
    i64 => put_i64, get_i64;
    u64 => put_u64, get_u64;
    f32 => put_f32, get_f32;
    f64 => put_f64, get_f64;
}

impl FfiConverter for bool {
    fn write(&self, buf: &mut Vec<u8>) -> Result<()> {
        buf.put_i8(i8::from(*self));
        Ok(())
    }

    fn read(buf: &mut &[u8]) -> Result<Self> {
        check_remaining(buf, 1)?;
        Ok(buf.get_i8() != 0)
    }
}

impl FfiConverter for String {
    fn write(&self, buf: &mut Vec<u8>) -> Result<()> {
        let len = checked_len("string", self.len())?;
        buf.put_i32(len);
        buf.put_slice(self.as_bytes());
        Ok(())
    }

    fn read(buf: &mut &[u8]) -> Result<Self> {
        let len = read_len(buf)?;
        check_remaining(buf, len)?;
        let bytes = buf[..len].to_vec();
        buf.advance(len);
        Ok(String::from_utf8(bytes)?)
    }

    // A string alone in a buffer is carried as its raw bytes.
    fn lower_bytes(&self) -> Result<Vec<u8>> {
        checked_len("string", self.len())?;
        Ok(self.as_bytes().to_vec())
    }

    fn lift_bytes(bytes: &[u8]) -> Result<Self> { Ok(String::from_utf8(bytes.to_vec())?) }
}

impl<T: FfiConverter> FfiConverter for Option<T> {
    fn write(&self, buf: &mut Vec<u8>) -> Result<()> {
        match self {
            None => {
                buf.put_i8(0);
                Ok(())
            }
            Some(value) => {
                buf.put_i8(1);
                value.write(buf)
            }
        }
    }

    fn read(buf: &mut &[u8]) -> Result<Self> {
        check_remaining(buf, 1)?;
        match buf.get_i8() {
            0 => Ok(None),
            1 => Ok(Some(T::read(buf)?)),
            tag => Err(CodecError::InvalidOptionTag(tag)),
        }
    }
}

impl<T: FfiConverter> FfiConverter for Vec<T> {
    fn write(&self, buf: &mut Vec<u8>) -> Result<()> {
        let len = checked_len("sequence", self.len())?;
        buf.put_i32(len);
        for item in self {
            item.write(buf)?;
        }
        Ok(())
    }

    fn read(buf: &mut &[u8]) -> Result<Self> {
        let count = read_len(buf)?;
        // Every element takes at least one byte, so the remaining length
        // bounds the allocation even when the count is corrupt.
        let mut items = Vec::with_capacity(count.min(buf.len()));
        for _ in 0..count {
            items.push(T::read(buf)?);
        }
        Ok(items)
    }
}
