use thiserror::Error;

/// Errors that can occur while reading TxRep text.
///
/// Every variant names the dotted path (or the line) at fault, so a
/// hand-edited transaction can be fixed without guessing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TxRepError {
    /// A field the value needs is absent.
    #[error("missing field {0}")]
    MissingField(String),

    /// A value that does not parse as the field's type.
    #[error("malformed value {value:?} for {path}")]
    MalformedLiteral { path: String, value: String },

    /// A union `type` naming an arm the union does not have.
    #[error("unknown arm {arm:?} for {path}")]
    UnknownUnionArm { path: String, arm: String },

    /// An array `len` beyond the array's bound.
    #[error("{path} has length {len}, maximum is {max}")]
    ArrayLength { path: String, len: usize, max: usize },

    /// A non-empty line that is not `path: value`.
    #[error("line {0} is not of the form `path: value`")]
    MalformedLine(usize),

    /// The same path given twice.
    #[error("duplicate field {0}")]
    DuplicateField(String),

    /// Recursive values nested deeper than the configured ceiling.
    #[error("nesting too deep at {path}")]
    DepthLimitExceeded { path: String },
}

impl TxRepError {
    pub(crate) fn malformed(path: &str, value: &str) -> Self {
        Self::MalformedLiteral {
            path: path.to_string(),
            value: value.to_string(),
        }
    }

    pub(crate) fn unknown_arm(path: &str, arm: &str) -> Self {
        Self::UnknownUnionArm {
            path: path.to_string(),
            arm: arm.to_string(),
        }
    }
}
