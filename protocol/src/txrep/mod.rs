//! # TxRep
//!
//! The human-readable dual of an XDR envelope: one `path: value` line per
//! leaf, with dotted paths that follow the XDR definitions.
//!
//! ```text
//! type: ENVELOPE_TYPE_TX
//! tx.sourceAccount: GAVRMS4QIOCC4QMOSKILOOOHCSO4FEKOXZPNLKFFN6W7SD2KUB7NBPLN
//! tx.fee: 100
//! tx.seqNum: 46489056724385793
//! tx.cond.type: PRECOND_NONE
//! tx.memo.type: MEMO_NONE
//! tx.operations.len: 1
//! tx.operations[0].sourceAccount._present: false
//! tx.operations[0].body.type: BUMP_SEQUENCE
//! tx.operations[0].body.bumpSequenceOp.bumpTo: 46489056724385800
//! tx.ext.v: 0
//! signatures.len: 0
//! ```
//!
//! Conventions:
//!
//! - arrays: `path.len: N`, then `path[i]...`;
//! - optionals: `path._present: true|false`, then the value at `path`;
//! - unions: `path.type: ARM`, then the arm's fields under `path.<arm>`;
//! - accounts and signer keys are strkeys, hashes and opaque data are
//!   lowercase hex, strings are JSON-quoted, assets are `XLM` or
//!   `CODE:ISSUER`;
//! - amounts and absolute timestamps carry a parenthesised comment.
//!
//! Writing visits every value in canonical order. Reading looks values up
//! by path, so the input order is free and comments are ignored.

pub mod error;
pub mod source;
pub mod writer;

mod common;
mod envelope;
mod operation;
mod soroban;

use tracing::debug;

use crate::types::TransactionEnvelope;

pub use error::TxRepError;
pub use source::TxRepSource;
pub use writer::TxRepWriter;

use writer::index;

/// Values that can be rendered as TxRep lines rooted at a path.
pub trait ToTxRep {
    fn write_txrep(&self, w: &mut TxRepWriter, path: &str);
}

/// Values that can be read back from TxRep lines rooted at a path.
pub trait FromTxRep: Sized {
    fn read_txrep(src: &TxRepSource, path: &str) -> Result<Self, TxRepError>;
}

/// Renders an envelope as canonical TxRep text.
pub fn to_txrep(envelope: &TransactionEnvelope) -> String {
    let mut w = TxRepWriter::new();
    envelope.write_txrep(&mut w, "");
    debug!(bytes = w.len(), "rendered txrep");
    w.into_string()
}

/// Parses TxRep text back into an envelope.
pub fn from_txrep(text: &str) -> Result<TransactionEnvelope, TxRepError> {
    let src = TxRepSource::parse(text)?;
    let envelope = TransactionEnvelope::read_txrep(&src, "")?;
    debug!(
        envelope_type = envelope.envelope_type(),
        operations = envelope.operation_count(),
        "parsed txrep"
    );
    Ok(envelope)
}

// ---------------------------------------------------------------------------
// Scalars and containers
// ---------------------------------------------------------------------------

macro_rules! impl_txrep_scalar {
    ($($ty:ty),*) => {
        $(
            impl ToTxRep for $ty {
                fn write_txrep(&self, w: &mut TxRepWriter, path: &str) {
                    w.field(path, self);
                }
            }

            impl FromTxRep for $ty {
                fn read_txrep(src: &TxRepSource, path: &str) -> Result<Self, TxRepError> {
                    src.value(path)
                }
            }
        )*
    };
}

impl_txrep_scalar!(u32, i32, u64, i64, bool);

/// Fixed opaque data as hex.
impl<const N: usize> ToTxRep for [u8; N] {
    fn write_txrep(&self, w: &mut TxRepWriter, path: &str) {
        w.hex(path, self);
    }
}

impl<const N: usize> FromTxRep for [u8; N] {
    fn read_txrep(src: &TxRepSource, path: &str) -> Result<Self, TxRepError> {
        src.hex_fixed(path)
    }
}

impl<T: ToTxRep> ToTxRep for Option<T> {
    fn write_txrep(&self, w: &mut TxRepWriter, path: &str) {
        w.field(&writer::join(path, "_present"), self.is_some());
        if let Some(value) = self {
            value.write_txrep(w, path);
        }
    }
}

impl<T: FromTxRep> FromTxRep for Option<T> {
    fn read_txrep(src: &TxRepSource, path: &str) -> Result<Self, TxRepError> {
        if src.present(path)? {
            Ok(Some(T::read_txrep(src, path)?))
        } else {
            Ok(None)
        }
    }
}

impl<T: ToTxRep> ToTxRep for Box<T> {
    fn write_txrep(&self, w: &mut TxRepWriter, path: &str) {
        self.as_ref().write_txrep(w, path);
    }
}

impl<T: FromTxRep> FromTxRep for Box<T> {
    fn read_txrep(src: &TxRepSource, path: &str) -> Result<Self, TxRepError> {
        src.nested(path, |src| T::read_txrep(src, path)).map(Box::new)
    }
}

/// `path.len` followed by each item at `path[i]`.
pub(crate) fn write_array<T: ToTxRep>(w: &mut TxRepWriter, path: &str, items: &[T]) {
    w.field(&writer::join(path, "len"), items.len());
    for (i, item) in items.iter().enumerate() {
        item.write_txrep(w, &index(path, i));
    }
}

/// Reads an array of at most `max` items.
pub(crate) fn read_array<T: FromTxRep>(
    src: &TxRepSource,
    path: &str,
    max: usize,
) -> Result<Vec<T>, TxRepError> {
    let len = src.len(path, max)?;
    let mut items = Vec::new();
    for i in 0..len {
        items.push(T::read_txrep(src, &index(path, i))?);
    }
    Ok(items)
}
