//! Per-call status record.

use crate::buffer::TransferBuffer;

/// Outcome code written by the native side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i8)]
pub enum CallStatusCode {
    /// The call succeeded; the return value is valid.
    Success = 0,
    /// The call failed with a caller-visible error serialized in the buffer.
    Error = 1,
    /// The native side panicked; the buffer may hold a message.
    Panic = 2,
}

impl CallStatusCode {
    /// Decode a raw status byte.
    pub fn from_raw(code: i8) -> Option<Self> {
        match code {
            0 => Some(Self::Success),
            1 => Some(Self::Error),
            2 => Some(Self::Panic),
            _ => None,
        }
    }
}

/// Status record passed by pointer into every native call.
///
/// Starts out as success with an empty buffer; the native side overwrites
/// both fields on failure.
#[repr(C)]
#[derive(Debug, Default)]
pub struct CallStatus {
    /// Raw status byte, see [`CallStatusCode`].
    pub code: i8,
    /// Error value or panic message, valid for non-zero codes.
    pub error_buf: TransferBuffer,
}

impl CallStatus {
    /// The decoded code, `None` for bytes outside the contract.
    pub fn code(&self) -> Option<CallStatusCode> { CallStatusCode::from_raw(self.code) }

    /// Report a caller-visible error carried in `error_buf`.
    pub fn set_error(&mut self, error_buf: TransferBuffer) {
        self.code = CallStatusCode::Error as i8;
        self.error_buf = error_buf;
    }

    /// Report an internal panic, with or without a message buffer.
    pub fn set_panic(&mut self, message: TransferBuffer) {
        self.code = CallStatusCode::Panic as i8;
        self.error_buf = message;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_success() {
        let status = CallStatus::default();
        assert_eq!(status.code(), Some(CallStatusCode::Success));
        assert!(status.error_buf.is_empty());
    }

    #[test]
    fn test_raw_codes() {
        assert_eq!(CallStatusCode::from_raw(1), Some(CallStatusCode::Error));
        assert_eq!(CallStatusCode::from_raw(2), Some(CallStatusCode::Panic));
        assert_eq!(CallStatusCode::from_raw(3), None);
        assert_eq!(CallStatusCode::from_raw(-1), None);
    }
}
