//! Unrecoverable boundary faults.

use std::panic::{self, AssertUnwindSafe};

use codec::CodecError;

/// A violation of the boundary contract.
///
/// Faults are never returned as ordinary errors.  [`Fault::raise`] panics
/// with the fault as payload, and [`catch_fault`] recovers it for hosts
/// that contain faults instead of letting them terminate the thread.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Fault {
    /// The native side panicked and reported a message.
    #[error("native panic: {0}")]
    Panic(String),

    /// The native side panicked while handling a panic; no message exists.
    #[error("native library panicked while handling a panic")]
    DoubleFault,

    /// The status byte was outside the contract.
    #[error("unknown call status code: {0}")]
    UnknownStatus(i8),

    /// A call with no declared error type reported a caller error.
    #[error("unexpected caller error from a call with no error type")]
    UnexpectedError,

    /// A payload from the native side did not decode.
    #[error("failed to decode native payload: {0}")]
    Decode(#[from] CodecError),

    /// A method was called on an object after it was destroyed.
    #[error("{0} object has already been destroyed")]
    AlreadyDestroyed(&'static str),

    /// An object's in-flight call counter reached its maximum.
    #[error("{0} call counter would overflow")]
    CounterOverflow(&'static str),

    /// The library was built against a different contract version.
    #[error("{namespace}: contract version mismatch (expected {expected}, library has {actual})")]
    ContractVersionMismatch {
        /// Binding namespace.
        namespace: &'static str,
        /// Version these bindings speak.
        expected: u32,
        /// Version reported by the library.
        actual: u32,
    },

    /// An exported symbol's checksum does not match.
    #[error("{namespace}: checksum mismatch for {symbol} (expected {expected}, library has {actual})")]
    ChecksumMismatch {
        /// Binding namespace.
        namespace: &'static str,
        /// API symbol, e.g. `func_recover`.
        symbol: &'static str,
        /// Checksum these bindings were generated with.
        expected: u16,
        /// Checksum reported by the library.
        actual: u16,
    },
}

impl Fault {
    /// Abort the current operation with this fault.
    pub fn raise(self) -> ! {
        tracing::error!(fault = %self, "boundary fault");
        panic::panic_any(self)
    }
}

/// Run `f`, turning a raised [`Fault`] into an `Err`.
///
/// Panics that do not carry a [`Fault`] keep unwinding.  Any state `f`
/// touched before the fault must be treated as unusable.
pub fn catch_fault<R>(f: impl FnOnce() -> R) -> Result<R, Fault> {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(value) => Ok(value),
        Err(payload) => match payload.downcast::<Fault>() {
            Ok(fault) => Err(*fault),
            Err(other) => panic::resume_unwind(other),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catch_fault_recovers_payload() {
        let result: Result<(), Fault> = catch_fault(|| Fault::UnknownStatus(9).raise());
        assert_eq!(result, Err(Fault::UnknownStatus(9)));
    }

    #[test]
    fn test_catch_fault_passes_values_through() {
        assert_eq!(catch_fault(|| 42), Ok(42));
    }

    #[test]
    fn test_foreign_panics_keep_unwinding() {
        let outer = panic::catch_unwind(|| catch_fault(|| panic!("not a fault")));
        assert!(outer.is_err());
    }

    #[test]
    fn test_fault_messages() {
        let fault = Fault::ChecksumMismatch {
            namespace: "glalby_bindings",
            symbol: "func_recover",
            expected: 3522,
            actual: 1,
        };
        assert_eq!(
            fault.to_string(),
            "glalby_bindings: checksum mismatch for func_recover (expected 3522, library has 1)"
        );
    }
}
