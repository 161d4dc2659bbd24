//! Transaction construction via the builder pattern.
//!
//! [`TransactionBuilder`] assembles a v1 [`Transaction`]: set the source
//! and sequence number, add operations, optionally narrow the validity
//! window, then call `.build()`. The fee is derived from the base fee and
//! the operation count, and the precondition arm is the smallest one that
//! says what was asked for.
//!
//! [`FeeBumpBuilder`] wraps an already-signed v1 envelope in a fee-bump
//! transaction paid for by another account.
//!
//! Neither builder signs. That happens in [`super::signing`], so
//! construction stays testable without key material.

use std::time::Duration;

use chrono::Utc;
use thiserror::Error;
use tracing::{debug, trace};

use crate::config::{BASE_FEE, MAX_EXTRA_SIGNERS, MAX_OPERATIONS};
use crate::types::{
    FeeBumpTransaction, FeeBumpTransactionEnvelope, LedgerBounds, Memo, MuxedAccount, Operation,
    Preconditions, PreconditionsV2, SignerKey, TimeBounds, Transaction, TransactionEnvelope,
    TransactionV1Envelope, ValidationError,
};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors raised while assembling a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// A transaction must carry at least one operation.
    #[error("transaction has no operations")]
    NoOperations,

    #[error("transaction has {count} operations, maximum is {max}")]
    TooManyOperations { count: usize, max: usize },

    /// `base_fee * operations` does not fit the fee field.
    #[error("fee overflow: base fee {base_fee} x {operations} operations")]
    FeeOverflow { base_fee: u32, operations: usize },

    /// An operation failed its constructor-time checks.
    #[error("operation {index} is invalid: {source}")]
    InvalidOperation {
        index: usize,
        #[source]
        source: ValidationError,
    },

    #[error("{count} extra signers, maximum is {max}")]
    TooManyExtraSigners { count: usize, max: usize },

    /// `min_time` after a bounded `max_time`.
    #[error("invalid time bounds: min {min_time} is after max {max_time}")]
    InvalidTimeBounds { min_time: u64, max_time: u64 },

    /// `min_ledger` after a bounded `max_ledger`.
    #[error("invalid ledger bounds: min {min_ledger} is after max {max_ledger}")]
    InvalidLedgerBounds { min_ledger: u32, max_ledger: u32 },

    /// A fee bump must pay at least the inner transaction's per-operation rate.
    #[error("fee-bump base fee {base_fee} is below the inner transaction's {inner_base_fee}")]
    FeeBumpBelowInner { base_fee: i64, inner_base_fee: i64 },

    /// Fee bumps cannot be nested.
    #[error("cannot fee-bump a fee-bump transaction")]
    NestedFeeBump,
}

// ---------------------------------------------------------------------------
// TransactionBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for v1 transactions.
///
/// # Usage
///
/// ```
/// use lumen_protocol::transaction::TransactionBuilder;
/// use lumen_protocol::types::{AccountId, Asset, MuxedAccount, Operation};
///
/// let source = MuxedAccount::Ed25519([1; 32]);
/// let destination = AccountId([2; 32]);
///
/// let tx = TransactionBuilder::new(source, 46489056724385793)
///     .add_operation(Operation::payment(destination.into(), Asset::native(), 400004000))
///     .build()
///     .unwrap();
///
/// assert_eq!(tx.fee, 100);
/// ```
#[derive(Debug, Clone)]
pub struct TransactionBuilder {
    source_account: MuxedAccount,
    seq_num: i64,
    base_fee: u32,
    memo: Memo,
    cond: PreconditionsV2,
    operations: Vec<Operation>,
}

impl TransactionBuilder {
    /// Creates a builder for a transaction from `source_account` using
    /// sequence number `seq_num` (the account's current sequence plus one).
    pub fn new(source_account: MuxedAccount, seq_num: i64) -> Self {
        Self {
            source_account,
            seq_num,
            base_fee: BASE_FEE,
            memo: Memo::None,
            cond: PreconditionsV2::default(),
            operations: Vec::new(),
        }
    }

    /// Fee per operation in stroops. Defaults to [`BASE_FEE`].
    pub fn base_fee(mut self, base_fee: u32) -> Self {
        self.base_fee = base_fee;
        self
    }

    pub fn add_operation(mut self, operation: Operation) -> Self {
        trace!(op = operation.body.name(), "adding operation");
        self.operations.push(operation);
        self
    }

    pub fn memo(mut self, memo: Memo) -> Self {
        self.memo = memo;
        self
    }

    pub fn time_bounds(mut self, min_time: u64, max_time: u64) -> Self {
        self.cond.time_bounds = Some(TimeBounds { min_time, max_time });
        self
    }

    /// Sets the upper time bound to now plus `timeout`, keeping any lower
    /// bound already set.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        let now = u64::try_from(Utc::now().timestamp()).unwrap_or(0);
        let min_time = self.cond.time_bounds.map_or(0, |b| b.min_time);
        self.cond.time_bounds = Some(TimeBounds {
            min_time,
            max_time: now.saturating_add(timeout.as_secs()),
        });
        self
    }

    pub fn ledger_bounds(mut self, min_ledger: u32, max_ledger: u32) -> Self {
        self.cond.ledger_bounds = Some(LedgerBounds {
            min_ledger,
            max_ledger,
        });
        self
    }

    pub fn min_sequence_number(mut self, min_seq_num: i64) -> Self {
        self.cond.min_seq_num = Some(min_seq_num);
        self
    }

    /// Minimum seconds since the source account's sequence number changed.
    pub fn min_sequence_age(mut self, seconds: u64) -> Self {
        self.cond.min_seq_age = seconds;
        self
    }

    /// Minimum ledgers since the source account's sequence number changed.
    pub fn min_sequence_ledger_gap(mut self, gap: u32) -> Self {
        self.cond.min_seq_ledger_gap = gap;
        self
    }

    /// Requires an additional signature from `signer`.
    pub fn extra_signer(mut self, signer: SignerKey) -> Self {
        self.cond.extra_signers.push(signer);
        self
    }

    /// Validates everything and produces the unsigned transaction.
    pub fn build(self) -> Result<Transaction, BuildError> {
        let count = self.operations.len();
        if count == 0 {
            return Err(BuildError::NoOperations);
        }
        if count > MAX_OPERATIONS {
            return Err(BuildError::TooManyOperations {
                count,
                max: MAX_OPERATIONS,
            });
        }
        for (index, op) in self.operations.iter().enumerate() {
            op.body
                .validate()
                .map_err(|source| BuildError::InvalidOperation { index, source })?;
        }
        self.check_preconditions()?;

        let fee = u32::try_from(count)
            .ok()
            .and_then(|n| self.base_fee.checked_mul(n))
            .ok_or(BuildError::FeeOverflow {
                base_fee: self.base_fee,
                operations: count,
            })?;

        let cond = Preconditions::minimal(self.cond);
        debug!(
            source = %self.source_account,
            seq_num = self.seq_num,
            fee,
            operations = count,
            "built transaction"
        );

        Ok(Transaction {
            source_account: self.source_account,
            fee,
            seq_num: self.seq_num,
            cond,
            memo: self.memo,
            operations: self.operations,
        })
    }

    /// Builds and wraps the transaction in an unsigned envelope.
    pub fn build_envelope(self) -> Result<TransactionEnvelope, BuildError> {
        self.build()
            .map(|tx| TransactionEnvelope::Tx(TransactionV1Envelope::unsigned(tx)))
    }

    fn check_preconditions(&self) -> Result<(), BuildError> {
        if let Some(TimeBounds { min_time, max_time }) = self.cond.time_bounds {
            if max_time != 0 && min_time > max_time {
                return Err(BuildError::InvalidTimeBounds { min_time, max_time });
            }
        }
        if let Some(LedgerBounds {
            min_ledger,
            max_ledger,
        }) = self.cond.ledger_bounds
        {
            if max_ledger != 0 && min_ledger > max_ledger {
                return Err(BuildError::InvalidLedgerBounds {
                    min_ledger,
                    max_ledger,
                });
            }
        }
        let signers = self.cond.extra_signers.len();
        if signers > MAX_EXTRA_SIGNERS {
            return Err(BuildError::TooManyExtraSigners {
                count: signers,
                max: MAX_EXTRA_SIGNERS,
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// FeeBumpBuilder
// ---------------------------------------------------------------------------

/// Wraps a v1 envelope (or a legacy v0 one, up-converted) in a fee bump.
///
/// The inner envelope is carried over untouched, signatures included.
/// The total fee is `base_fee * (inner operations + 1)`: the bump itself
/// counts as one more operation.
#[derive(Debug, Clone)]
pub struct FeeBumpBuilder {
    fee_source: MuxedAccount,
    base_fee: i64,
    inner: TransactionEnvelope,
}

impl FeeBumpBuilder {
    pub fn new(fee_source: MuxedAccount, inner: TransactionEnvelope) -> Self {
        Self {
            fee_source,
            base_fee: i64::from(BASE_FEE),
            inner,
        }
    }

    /// Fee per operation in stroops. Must be at least the inner
    /// transaction's own per-operation fee.
    pub fn base_fee(mut self, base_fee: i64) -> Self {
        self.base_fee = base_fee;
        self
    }

    pub fn build(self) -> Result<FeeBumpTransactionEnvelope, BuildError> {
        let inner_tx = match self.inner {
            TransactionEnvelope::Tx(env) => env,
            TransactionEnvelope::TxV0(env) => TransactionV1Envelope {
                tx: env.tx.to_v1(),
                signatures: env.signatures,
            },
            TransactionEnvelope::TxFeeBump(_) => return Err(BuildError::NestedFeeBump),
        };

        let operations = inner_tx.tx.operations.len();
        if operations == 0 {
            return Err(BuildError::NoOperations);
        }
        let inner_base_fee = i64::from(inner_tx.tx.fee) / operations as i64;
        if self.base_fee < inner_base_fee {
            return Err(BuildError::FeeBumpBelowInner {
                base_fee: self.base_fee,
                inner_base_fee,
            });
        }

        let fee = self
            .base_fee
            .checked_mul(operations as i64 + 1)
            .ok_or(BuildError::FeeOverflow {
                base_fee: u32::try_from(self.base_fee).unwrap_or(u32::MAX),
                operations: operations + 1,
            })?;

        debug!(
            fee_source = %self.fee_source,
            fee,
            inner_operations = operations,
            "built fee bump"
        );

        Ok(FeeBumpTransactionEnvelope {
            tx: FeeBumpTransaction {
                fee_source: self.fee_source,
                fee,
                inner_tx,
            },
            signatures: Vec::new(),
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
