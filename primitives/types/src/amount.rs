//! Amount-or-everything union.

use codec::{CodecError, FfiConverter};
use serde::{Deserialize, Serialize};

/// An explicit amount, or the whole available balance.
///
/// The tagged-union converter form: an `i32` variant index (1-based)
/// followed by that variant's fields.  No client request carries one yet;
/// it is the shape any union-valued field takes on the wire.
///
/// Wire form: `i32` discriminant `1` followed by `msat`, or `2` alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AmountOrAll {
    /// A fixed amount.
    Amount {
        /// Amount in millisatoshi.
        msat: u64,
    },
    /// Everything available.
    All,
}

impl FfiConverter for AmountOrAll {
    fn write(&self, buf: &mut Vec<u8>) -> codec::Result<()> {
        match self {
            AmountOrAll::Amount { msat } => {
                1i32.write(buf)?;
                msat.write(buf)
            }
            AmountOrAll::All => 2i32.write(buf),
        }
    }

    fn read(buf: &mut &[u8]) -> codec::Result<Self> {
        match i32::read(buf)? {
            1 => Ok(AmountOrAll::Amount { msat: u64::read(buf)? }),
            2 => Ok(AmountOrAll::All),
            value => Err(CodecError::UnknownDiscriminant { type_name: "AmountOrAll", value }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_layout() {
        let bytes = AmountOrAll::Amount { msat: 1000 }.lower_bytes().expect("lower");
        assert_eq!(bytes, vec![0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0x03, 0xe8]);
        assert_eq!(AmountOrAll::All.lower_bytes().expect("lower"), vec![0, 0, 0, 2]);
    }

    #[test]
    fn test_unknown_variant() {
        let err = AmountOrAll::lift_bytes(&[0, 0, 0, 3]).expect_err("no third variant");
        assert_eq!(err, CodecError::UnknownDiscriminant { type_name: "AmountOrAll", value: 3 });
    }

    #[test]
    fn test_amount_missing_payload() {
        assert!(matches!(
            AmountOrAll::lift_bytes(&[0, 0, 0, 1, 0, 0]),
            Err(CodecError::UnexpectedEof { .. })
        ));
    }
}
