//! Declarative macros for record and enum converters.
//!
//! - [`ffi_record!`]: a struct plus an [`FfiConverter`](crate::FfiConverter)
//!   that writes and reads its fields in declaration order
//! - [`ffi_enum!`]: a fieldless enum plus an `i32` discriminant converter

/// Declare a record type together with its wire converter.
///
/// Fields are encoded back to back in the order they are declared, so the
/// declaration order *is* the wire contract. Reordering fields is a breaking
/// change.
///
/// # Example
///
/// ```rust
/// use codec::{ffi_record, FfiConverter};
///
/// ffi_record! {
///     #[derive(Debug, Clone, PartialEq)]
///     pub struct Peer {
///         pub id: String,
///         pub port: Option<u16>,
///     }
/// }
///
/// let peer = Peer { id: "ab".to_string(), port: None };
/// let bytes = peer.lower_bytes().unwrap();
/// assert_eq!(bytes, vec![0, 0, 0, 2, b'a', b'b', 0]);
/// assert_eq!(Peer::lift_bytes(&bytes).unwrap(), peer);
/// ```
#[macro_export]
macro_rules! ffi_record {
    (
        $(#[$meta:meta])*
        pub struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                pub $field:ident : $ty:ty
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        pub struct $name {
            $(
                $(#[$field_meta])*
                pub $field: $ty,
            )*
        }

        impl $crate::FfiConverter for $name {
            fn write(&self, buf: &mut ::std::vec::Vec<u8>) -> $crate::Result<()> {
                $( $crate::FfiConverter::write(&self.$field, buf)?; )*
                Ok(())
            }

            fn read(buf: &mut &[u8]) -> $crate::Result<Self> {
                Ok(Self {
                    $( $field: <$ty as $crate::FfiConverter>::read(buf)?, )*
                })
            }
        }
    };
}

/// Declare a fieldless enum encoded as an `i32` discriminant.
///
/// Each variant names its discriminant explicitly; the contract numbers
/// variants from `1` in declaration order. Unknown discriminants fail to
/// decode with [`CodecError::UnknownDiscriminant`](crate::CodecError).
///
/// # Example
///
/// ```rust
/// use codec::{ffi_enum, FfiConverter};
///
/// ffi_enum! {
///     #[derive(Debug, Clone, Copy, PartialEq, Eq)]
///     pub enum Side {
///         Left = 1,
///         Right = 2,
///     }
/// }
///
/// assert_eq!(Side::Right.lower_bytes().unwrap(), vec![0, 0, 0, 2]);
/// assert!(Side::lift_bytes(&[0, 0, 0, 3]).is_err());
/// ```
#[macro_export]
macro_rules! ffi_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident = $value:literal
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        pub enum $name {
            $(
                $(#[$variant_meta])*
                $variant = $value,
            )*
        }

        impl $crate::FfiConverter for $name {
            fn write(&self, buf: &mut ::std::vec::Vec<u8>) -> $crate::Result<()> {
                let discriminant: i32 = match self {
                    $( Self::$variant => $value, )*
                };
                $crate::FfiConverter::write(&discriminant, buf)
            }

            fn read(buf: &mut &[u8]) -> $crate::Result<Self> {
                match <i32 as $crate::FfiConverter>::read(buf)? {
                    $( $value => Ok(Self::$variant), )*
                    other => Err($crate::CodecError::UnknownDiscriminant {
                        type_name: stringify!($name),
                        value: other,
                    }),
                }
            }
        }
    };
}
