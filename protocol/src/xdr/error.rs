use thiserror::Error;

/// Errors that can occur while encoding or decoding XDR.
///
/// Decoding errors carry the byte offset where the problem was detected so
/// that a bad envelope pasted from a block explorer can be diagnosed without
/// a hex editor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum XdrError {
    /// Attempted to read past the end of the input buffer.
    #[error("unexpected end of data at offset {offset}: needed {needed} bytes, {available} available")]
    UnexpectedEndOfData {
        offset: usize,
        needed: usize,
        available: usize,
    },

    /// Padding bytes after an opaque or string were not all zero.
    #[error("non-zero padding at offset {offset}")]
    InvalidPadding { offset: usize },

    /// A boolean was encoded as something other than 0 or 1.
    #[error("invalid boolean value {value} at offset {offset}")]
    InvalidBoolValue { offset: usize, value: i32 },

    /// A union discriminant outside the type's closed arm table.
    #[error("unknown discriminant {value} for {type_name} at offset {offset}")]
    UnknownDiscriminant {
        type_name: &'static str,
        value: i32,
        offset: usize,
    },

    /// A variable-length value is longer than its declared maximum.
    #[error("length {len} exceeds maximum {max} at offset {offset}")]
    LengthExceedsMax {
        len: usize,
        max: usize,
        offset: usize,
    },

    /// A `string<>` contained bytes that are not valid UTF-8.
    #[error("invalid utf-8 string at offset {offset}")]
    InvalidUtf8 { offset: usize },

    /// Input left over after a complete value was decoded.
    #[error("{remaining} trailing bytes after offset {offset}")]
    TrailingBytes { offset: usize, remaining: usize },

    /// Recursive values nested deeper than the configured ceiling.
    #[error("nesting depth exceeds {max}")]
    DepthLimitExceeded { max: u32 },

    /// The base64 wrapper around the XDR bytes could not be decoded.
    #[error("invalid base64: {0}")]
    InvalidBase64(String),
}
