//! The error returned by fallible client calls.

use codec::{CodecError, FfiConverter};
use serde::{Deserialize, Serialize};

/// A caller-visible failure reported by the native library.
///
/// Wire form: `i32` code (`1` Greenlight API, `2` invalid argument)
/// followed by a length-prefixed message.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SdkError {
    /// The Greenlight service or the node rejected the request.
    #[error("GreenlightApi: {0}")]
    GreenlightApi(String),

    /// An argument was malformed, or could not be encoded for the call.
    #[error("InvalidArgument: {0}")]
    InvalidArgument(String),
}

impl SdkError {
    /// Wire code of the variant.
    pub fn code(&self) -> i32 {
        match self {
            SdkError::GreenlightApi(_) => 1,
            SdkError::InvalidArgument(_) => 2,
        }
    }

    /// The message carried by either variant.
    pub fn message(&self) -> &str {
        match self {
            SdkError::GreenlightApi(message) | SdkError::InvalidArgument(message) => message,
        }
    }
}

/// Encoding an argument failed before the call was made.
impl From<CodecError> for SdkError {
    fn from(err: CodecError) -> Self { SdkError::InvalidArgument(err.to_string()) }
}

impl FfiConverter for SdkError {
    fn write(&self, buf: &mut Vec<u8>) -> codec::Result<()> {
        self.code().write(buf)?;
        self.message().to_string().write(buf)
    }

    fn read(buf: &mut &[u8]) -> codec::Result<Self> {
        match i32::read(buf)? {
            1 => Ok(SdkError::GreenlightApi(String::read(buf)?)),
            2 => Ok(SdkError::InvalidArgument(String::read(buf)?)),
            value => Err(CodecError::UnknownDiscriminant { type_name: "SdkError", value }),
        }
    }
}
