//! Transaction memos.

use super::{check_length, ValidationError};
use crate::config::MAX_MEMO_TEXT_LENGTH;
use crate::xdr::{ReadXdr, WriteXdr, XdrError, XdrReader, XdrWriter};

const MEMO_NONE: i32 = 0;
const MEMO_TEXT: i32 = 1;
const MEMO_ID: i32 = 2;
const MEMO_HASH: i32 = 3;
const MEMO_RETURN: i32 = 4;

/// Free-form data attached to a transaction. Exchanges use `Id` or `Text`
/// to route deposits to the right customer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Memo {
    #[default]
    None,
    Text(String),
    Id(u64),
    Hash([u8; 32]),
    Return([u8; 32]),
}

impl Memo {
    /// A text memo of at most 28 bytes (bytes, not characters).
    pub fn text(text: impl Into<String>) -> Result<Self, ValidationError> {
        let text = text.into();
        check_length("memo text", text.len(), MAX_MEMO_TEXT_LENGTH)?;
        Ok(Self::Text(text))
    }

    pub fn id(id: u64) -> Self {
        Self::Id(id)
    }

    pub fn hash(hash: [u8; 32]) -> Self {
        Self::Hash(hash)
    }

    pub fn return_hash(hash: [u8; 32]) -> Self {
        Self::Return(hash)
    }
}

impl WriteXdr for Memo {
    fn write_xdr(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        match self {
            Self::None => w.write_discriminant(MEMO_NONE),
            Self::Text(text) => {
                w.write_discriminant(MEMO_TEXT);
                w.write_string(text, MAX_MEMO_TEXT_LENGTH)?;
            }
            Self::Id(id) => {
                w.write_discriminant(MEMO_ID);
                w.write_u64(*id);
            }
            Self::Hash(hash) => {
                w.write_discriminant(MEMO_HASH);
                w.write_fixed(hash);
            }
            Self::Return(hash) => {
                w.write_discriminant(MEMO_RETURN);
                w.write_fixed(hash);
            }
        }
        Ok(())
    }
}

impl ReadXdr for Memo {
    fn read_xdr(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        match r.read_discriminant()? {
            MEMO_NONE => Ok(Self::None),
            MEMO_TEXT => Ok(Self::Text(r.read_string(MAX_MEMO_TEXT_LENGTH)?)),
            MEMO_ID => Ok(Self::Id(r.read_u64()?)),
            MEMO_HASH => Ok(Self::Hash(r.read_fixed()?)),
            MEMO_RETURN => Ok(Self::Return(r.read_fixed()?)),
            other => Err(r.unknown("MemoType", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_memo_limited_to_28_bytes() {
        assert!(Memo::text("Enjoy this transaction").is_ok());
        assert!(Memo::text("a".repeat(28)).is_ok());
        assert_eq!(
            Memo::text("a".repeat(29)),
            Err(ValidationError::TooLong {
                field: "memo text",
                len: 29,
                max: 28
            })
        );
        // Multi-byte characters count by their UTF-8 length.
        assert!(Memo::text("é".repeat(15)).is_err());
    }

    #[test]
    fn memo_wire_forms() {
        assert_eq!(Memo::None.to_xdr().unwrap(), vec![0, 0, 0, 0]);
        assert_eq!(
            Memo::id(1).to_xdr().unwrap(),
            vec![0, 0, 0, 2, 0, 0, 0, 0, 0, 0, 0, 1]
        );
        let text = Memo::text("hi").unwrap();
        assert_eq!(
            text.to_xdr().unwrap(),
            vec![0, 0, 0, 1, 0, 0, 0, 2, b'h', b'i', 0, 0]
        );
    }

    #[test]
    fn every_memo_arm_survives_xdr() {
        for memo in [
            Memo::None,
            Memo::text("Enjoy this transaction").unwrap(),
            Memo::id(u64::MAX),
            Memo::hash([0xAB; 32]),
            Memo::return_hash([0xCD; 32]),
        ] {
            assert_eq!(Memo::from_xdr(&memo.to_xdr().unwrap()).unwrap(), memo);
        }
    }

    #[test]
    fn oversized_text_on_wire_rejected() {
        let mut bytes = vec![0, 0, 0, 1, 0, 0, 0, 29];
        bytes.extend_from_slice(&[b'a'; 32]);
        assert!(matches!(
            Memo::from_xdr(&bytes),
            Err(XdrError::LengthExceedsMax { len: 29, max: 28, offset: 4 })
        ));
    }
}
