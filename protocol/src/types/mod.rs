//! # Protocol Types
//!
//! The network's transaction vocabulary as plain Rust values: accounts,
//! assets, memos, preconditions, claim predicates, ledger keys, Soroban
//! payloads, the exhaustive operation table and the three envelope shapes.
//!
//! Every type carries a hand-written [`WriteXdr`](crate::xdr::WriteXdr) /
//! [`ReadXdr`](crate::xdr::ReadXdr) pair that mirrors its XDR definition
//! field for field. Unions are Rust enums whose variants follow the wire
//! discriminants; a discriminant outside the table fails the decode with
//! [`XdrError::UnknownDiscriminant`](crate::xdr::XdrError) rather than
//! being guessed at.
//!
//! Constructors such as [`Asset::credit`] or [`Memo::text`] check what can
//! be checked up front (code length, memo length, price denominator) and
//! return [`ValidationError`]. Values decoded from the wire are taken as-is.

pub mod account;
pub mod asset;
pub mod claim;
pub mod conditions;
pub mod ledger_key;
pub mod memo;
pub mod operation;
pub mod soroban;
pub mod transaction;

use thiserror::Error;

use crate::crypto::strkey::StrKeyError;

pub use account::{AccountId, MuxedAccount, Signer, SignerKey};
pub use asset::{
    AlphaNum12, AlphaNum4, Asset, AssetCode, ChangeTrustAsset, LiquidityPoolParameters, Price,
    TrustLineAsset,
};
pub use claim::{ClaimPredicate, ClaimableBalanceId, Claimant};
pub use conditions::{LedgerBounds, Preconditions, PreconditionsV2, TimeBounds};
pub use ledger_key::LedgerKey;
pub use memo::Memo;
pub use operation::{Operation, OperationBody};
pub use transaction::{
    DecoratedSignature, FeeBumpTransaction, FeeBumpTransactionEnvelope, TaggedTransaction,
    Transaction, TransactionEnvelope, TransactionSignaturePayload, TransactionV0,
    TransactionV0Envelope, TransactionV1Envelope,
};

/// Errors raised by value constructors before anything reaches the wire.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Asset codes are 1-12 ASCII letters or digits.
    #[error("invalid asset code {0:?}")]
    InvalidAssetCode(String),

    /// An asset string that is neither `XLM` nor `CODE:ISSUER`.
    #[error("invalid asset {0:?}")]
    InvalidAsset(String),

    #[error("price denominator must not be zero")]
    ZeroPriceDenominator,

    #[error("price must be positive, got {n}/{d}")]
    NegativePrice { n: i32, d: i32 },

    /// A string or opaque value longer than its XDR bound.
    #[error("{field} is {len} bytes, maximum is {max}")]
    TooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },

    /// `AND`/`OR` predicates take exactly two children.
    #[error("{kind} predicate needs exactly 2 children, got {count}")]
    PredicateArity { kind: &'static str, count: usize },

    /// `NOT` predicates must wrap a child.
    #[error("NOT predicate without a child")]
    EmptyNotPredicate,

    #[error(transparent)]
    StrKey(#[from] StrKeyError),
}

/// Fails with [`ValidationError::TooLong`] when `len > max`.
pub(crate) fn check_length(field: &'static str, len: usize, max: usize) -> Result<(), ValidationError> {
    if len > max {
        return Err(ValidationError::TooLong { field, len, max });
    }
    Ok(())
}
