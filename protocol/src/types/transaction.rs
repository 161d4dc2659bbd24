//! Transactions and the envelopes that carry them.

use super::{Memo, MuxedAccount, Operation, Preconditions, TimeBounds};
use crate::config::{MAX_OPERATIONS, MAX_SIGNATURES, MAX_SIGNATURE_LENGTH};
use crate::xdr::{read_array, write_array, ReadXdr, WriteXdr, XdrError, XdrReader, XdrWriter};

pub const ENVELOPE_TYPE_TX_V0: i32 = 0;
pub const ENVELOPE_TYPE_TX: i32 = 2;
pub const ENVELOPE_TYPE_TX_FEE_BUMP: i32 = 5;

/// Every `ext` union in a transaction currently has only the `v = 0` arm
/// with no payload.
fn write_ext_v0(w: &mut XdrWriter) {
    w.write_discriminant(0);
}

fn read_ext_v0(r: &mut XdrReader<'_>, type_name: &'static str) -> Result<(), XdrError> {
    match r.read_discriminant()? {
        0 => Ok(()),
        other => Err(r.unknown(type_name, other)),
    }
}

// ---------------------------------------------------------------------------
// Signatures
// ---------------------------------------------------------------------------

/// A signature plus the hint that tells validators which signer made it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DecoratedSignature {
    pub hint: [u8; 4],
    pub signature: Vec<u8>,
}

impl WriteXdr for DecoratedSignature {
    fn write_xdr(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        w.write_fixed(&self.hint);
        w.write_var_opaque(&self.signature, MAX_SIGNATURE_LENGTH)
    }
}

impl ReadXdr for DecoratedSignature {
    fn read_xdr(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        Ok(Self {
            hint: r.read_fixed()?,
            signature: r.read_var_opaque(MAX_SIGNATURE_LENGTH)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Transaction bodies
// ---------------------------------------------------------------------------

/// A v1 transaction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Transaction {
    pub source_account: MuxedAccount,
    /// Maximum total fee in stroops.
    pub fee: u32,
    pub seq_num: i64,
    pub cond: Preconditions,
    pub memo: Memo,
    pub operations: Vec<Operation>,
}

impl WriteXdr for Transaction {
    fn write_xdr(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        self.source_account.write_xdr(w)?;
        w.write_u32(self.fee);
        w.write_i64(self.seq_num);
        self.cond.write_xdr(w)?;
        self.memo.write_xdr(w)?;
        write_array(w, &self.operations, MAX_OPERATIONS)?;
        write_ext_v0(w);
        Ok(())
    }
}

impl ReadXdr for Transaction {
    fn read_xdr(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        let tx = Self {
            source_account: MuxedAccount::read_xdr(r)?,
            fee: r.read_u32()?,
            seq_num: r.read_i64()?,
            cond: Preconditions::read_xdr(r)?,
            memo: Memo::read_xdr(r)?,
            operations: read_array(r, MAX_OPERATIONS)?,
        };
        read_ext_v0(r, "TransactionExt")?;
        Ok(tx)
    }
}

/// A pre-protocol-13 transaction: plain ed25519 source, time bounds only.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TransactionV0 {
    pub source_account_ed25519: [u8; 32],
    pub fee: u32,
    pub seq_num: i64,
    pub time_bounds: Option<TimeBounds>,
    pub memo: Memo,
    pub operations: Vec<Operation>,
}

impl TransactionV0 {
    /// The equivalent v1 transaction. The network signs and hashes v0
    /// transactions in this form, so the conversion never changes a
    /// transaction's identity.
    pub fn to_v1(&self) -> Transaction {
        Transaction {
            source_account: MuxedAccount::Ed25519(self.source_account_ed25519),
            fee: self.fee,
            seq_num: self.seq_num,
            cond: match self.time_bounds {
                Some(bounds) => Preconditions::Time(bounds),
                None => Preconditions::None,
            },
            memo: self.memo.clone(),
            operations: self.operations.clone(),
        }
    }
}

impl WriteXdr for TransactionV0 {
    fn write_xdr(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        w.write_fixed(&self.source_account_ed25519);
        w.write_u32(self.fee);
        w.write_i64(self.seq_num);
        self.time_bounds.write_xdr(w)?;
        self.memo.write_xdr(w)?;
        write_array(w, &self.operations, MAX_OPERATIONS)?;
        write_ext_v0(w);
        Ok(())
    }
}

impl ReadXdr for TransactionV0 {
    fn read_xdr(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        let tx = Self {
            source_account_ed25519: r.read_fixed()?,
            fee: r.read_u32()?,
            seq_num: r.read_i64()?,
            time_bounds: ReadXdr::read_xdr(r)?,
            memo: Memo::read_xdr(r)?,
            operations: read_array(r, MAX_OPERATIONS)?,
        };
        read_ext_v0(r, "TransactionV0Ext")?;
        Ok(tx)
    }
}

/// Pays a (higher) fee for an already-signed inner transaction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FeeBumpTransaction {
    pub fee_source: MuxedAccount,
    /// Total fee in stroops, covering the inner operations plus the bump.
    pub fee: i64,
    /// The wire type is a union whose only arm is `ENVELOPE_TYPE_TX`.
    pub inner_tx: TransactionV1Envelope,
}

impl WriteXdr for FeeBumpTransaction {
    fn write_xdr(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        self.fee_source.write_xdr(w)?;
        w.write_i64(self.fee);
        w.write_discriminant(ENVELOPE_TYPE_TX);
        self.inner_tx.write_xdr(w)?;
        write_ext_v0(w);
        Ok(())
    }
}

impl ReadXdr for FeeBumpTransaction {
    fn read_xdr(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        let fee_source = MuxedAccount::read_xdr(r)?;
        let fee = r.read_i64()?;
        let inner_tx = match r.read_discriminant()? {
            ENVELOPE_TYPE_TX => TransactionV1Envelope::read_xdr(r)?,
            other => return Err(r.unknown("FeeBumpInnerTx", other)),
        };
        read_ext_v0(r, "FeeBumpTransactionExt")?;
        Ok(Self {
            fee_source,
            fee,
            inner_tx,
        })
    }
}

// ---------------------------------------------------------------------------
// Envelopes
// ---------------------------------------------------------------------------

macro_rules! envelope {
    ($(#[$meta:meta])* $name:ident, $tx:ty) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name {
            pub tx: $tx,
            pub signatures: Vec<DecoratedSignature>,
        }

        impl WriteXdr for $name {
            fn write_xdr(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
                self.tx.write_xdr(w)?;
                write_array(w, &self.signatures, MAX_SIGNATURES)
            }
        }

        impl ReadXdr for $name {
            fn read_xdr(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
                Ok(Self {
                    tx: ReadXdr::read_xdr(r)?,
                    signatures: read_array(r, MAX_SIGNATURES)?,
                })
            }
        }
    };
}

envelope!(
    /// A legacy v0 transaction and its signatures.
    TransactionV0Envelope,
    TransactionV0
);
envelope!(
    /// A v1 transaction and its signatures.
    TransactionV1Envelope,
    Transaction
);
envelope!(
    /// A fee-bump transaction and the fee source's signatures.
    FeeBumpTransactionEnvelope,
    FeeBumpTransaction
);

impl TransactionV1Envelope {
    pub fn unsigned(tx: Transaction) -> Self {
        Self {
            tx,
            signatures: Vec::new(),
        }
    }
}

/// What gets submitted to the network.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TransactionEnvelope {
    TxV0(TransactionV0Envelope),
    Tx(TransactionV1Envelope),
    TxFeeBump(FeeBumpTransactionEnvelope),
}

impl TransactionEnvelope {
    pub fn envelope_type(&self) -> i32 {
        match self {
            Self::TxV0(_) => ENVELOPE_TYPE_TX_V0,
            Self::Tx(_) => ENVELOPE_TYPE_TX,
            Self::TxFeeBump(_) => ENVELOPE_TYPE_TX_FEE_BUMP,
        }
    }

    /// The outer signature list.
    pub fn signatures(&self) -> &[DecoratedSignature] {
        match self {
            Self::TxV0(env) => &env.signatures,
            Self::Tx(env) => &env.signatures,
            Self::TxFeeBump(env) => &env.signatures,
        }
    }

    /// Up-converts a v0 envelope to v1, keeping its signatures (they were
    /// made over the v1 form already). Other envelopes pass through.
    pub fn into_v1(self) -> Self {
        match self {
            Self::TxV0(env) => Self::Tx(TransactionV1Envelope {
                tx: env.tx.to_v1(),
                signatures: env.signatures,
            }),
            other => other,
        }
    }

    pub(crate) fn signatures_mut(&mut self) -> &mut Vec<DecoratedSignature> {
        match self {
            Self::TxV0(env) => &mut env.signatures,
            Self::Tx(env) => &mut env.signatures,
            Self::TxFeeBump(env) => &mut env.signatures,
        }
    }

    /// Total operations, counting the inner transaction of a fee bump.
    pub fn operation_count(&self) -> usize {
        match self {
            Self::TxV0(env) => env.tx.operations.len(),
            Self::Tx(env) => env.tx.operations.len(),
            Self::TxFeeBump(env) => env.tx.inner_tx.tx.operations.len(),
        }
    }
}

impl From<TransactionV1Envelope> for TransactionEnvelope {
    fn from(env: TransactionV1Envelope) -> Self {
        Self::Tx(env)
    }
}

impl From<FeeBumpTransactionEnvelope> for TransactionEnvelope {
    fn from(env: FeeBumpTransactionEnvelope) -> Self {
        Self::TxFeeBump(env)
    }
}

impl WriteXdr for TransactionEnvelope {
    fn write_xdr(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        w.write_discriminant(self.envelope_type());
        match self {
            Self::TxV0(env) => env.write_xdr(w),
            Self::Tx(env) => env.write_xdr(w),
            Self::TxFeeBump(env) => env.write_xdr(w),
        }
    }
}

impl ReadXdr for TransactionEnvelope {
    fn read_xdr(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        match r.read_discriminant()? {
            ENVELOPE_TYPE_TX_V0 => Ok(Self::TxV0(ReadXdr::read_xdr(r)?)),
            ENVELOPE_TYPE_TX => Ok(Self::Tx(ReadXdr::read_xdr(r)?)),
            ENVELOPE_TYPE_TX_FEE_BUMP => Ok(Self::TxFeeBump(ReadXdr::read_xdr(r)?)),
            other => Err(r.unknown("EnvelopeType", other)),
        }
    }
}

// ---------------------------------------------------------------------------
// Signature payload
// ---------------------------------------------------------------------------

/// The transaction a signature commits to, tagged with its envelope type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TaggedTransaction {
    Tx(Transaction),
    TxFeeBump(FeeBumpTransaction),
}

/// `networkId || tagged transaction`: the signature base. Its SHA-256 is
/// the transaction hash, and that hash is what gets signed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TransactionSignaturePayload {
    pub network_id: [u8; 32],
    pub tagged_transaction: TaggedTransaction,
}

impl WriteXdr for TransactionSignaturePayload {
    fn write_xdr(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        w.write_fixed(&self.network_id);
        match &self.tagged_transaction {
            TaggedTransaction::Tx(tx) => {
                w.write_discriminant(ENVELOPE_TYPE_TX);
                tx.write_xdr(w)
            }
            TaggedTransaction::TxFeeBump(tx) => {
                w.write_discriminant(ENVELOPE_TYPE_TX_FEE_BUMP);
                tx.write_xdr(w)
            }
        }
    }
}

impl ReadXdr for TransactionSignaturePayload {
    fn read_xdr(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        let network_id = r.read_fixed()?;
        let tagged_transaction = match r.read_discriminant()? {
            ENVELOPE_TYPE_TX => TaggedTransaction::Tx(Transaction::read_xdr(r)?),
            ENVELOPE_TYPE_TX_FEE_BUMP => {
                TaggedTransaction::TxFeeBump(FeeBumpTransaction::read_xdr(r)?)
            }
            other => return Err(r.unknown("TaggedTransaction", other)),
        };
        Ok(Self {
            network_id,
            tagged_transaction,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AccountId, Asset};

    fn sample_tx() -> Transaction {
        Transaction {
            source_account: MuxedAccount::Ed25519([1; 32]),
            fee: 100,
            seq_num: 46489056724385793,
            cond: Preconditions::Time(TimeBounds {
                min_time: 1535756672,
                max_time: 1567292672,
            }),
            memo: Memo::text("Enjoy this transaction").unwrap(),
            operations: vec![Operation::payment(
                AccountId([2; 32]).into(),
                Asset::Native,
                400004000,
            )],
        }
    }

    #[test]
    fn v1_envelope_survives_xdr() {
        let env = TransactionEnvelope::Tx(TransactionV1Envelope {
            tx: sample_tx(),
            signatures: vec![DecoratedSignature {
                hint: [1, 2, 3, 4],
                signature: vec![0xAB; 64],
            }],
        });
        let b64 = env.to_xdr_base64().unwrap();
        assert!(b64.starts_with("AAAAAgAAAAA"));
        assert_eq!(TransactionEnvelope::from_xdr_base64(&b64).unwrap(), env);
    }

    #[test]
    fn fee_bump_envelope_survives_xdr() {
        let env = TransactionEnvelope::TxFeeBump(FeeBumpTransactionEnvelope {
            tx: FeeBumpTransaction {
                fee_source: MuxedAccount::Muxed {
                    id: 1,
                    ed25519: [3; 32],
                },
                fee: 400,
                inner_tx: TransactionV1Envelope::unsigned(sample_tx()),
            },
            signatures: vec![],
        });
        let bytes = env.to_xdr().unwrap();
        assert_eq!(&bytes[..4], &[0, 0, 0, 5]);
        assert_eq!(TransactionEnvelope::from_xdr(&bytes).unwrap(), env);
        assert_eq!(env.operation_count(), 1);
    }

    #[test]
    fn v0_survives_xdr_and_upconverts() {
        let v0 = TransactionV0 {
            source_account_ed25519: [1; 32],
            fee: 100,
            seq_num: 1,
            time_bounds: None,
            memo: Memo::None,
            operations: vec![Operation::bump_sequence(5)],
        };
        let env = TransactionEnvelope::TxV0(TransactionV0Envelope {
            tx: v0.clone(),
            signatures: vec![],
        });
        let bytes = env.to_xdr().unwrap();
        // v0 has no source-account discriminant: type, then the raw key.
        assert_eq!(&bytes[..8], &[0, 0, 0, 0, 1, 1, 1, 1]);
        assert_eq!(TransactionEnvelope::from_xdr(&bytes).unwrap(), env);

        match env.into_v1() {
            TransactionEnvelope::Tx(v1) => {
                assert_eq!(v1.tx.source_account, MuxedAccount::Ed25519([1; 32]));
                assert_eq!(v1.tx.cond, Preconditions::None);
                assert_eq!(v1.tx.operations, v0.operations);
            }
            other => panic!("expected v1, got {:?}", other),
        }
    }

    #[test]
    fn ext_v1_is_rejected() {
        let mut bytes = sample_tx().to_xdr().unwrap();
        let len = bytes.len();
        bytes[len - 1] = 1;
        assert!(matches!(
            Transaction::from_xdr(&bytes),
            Err(XdrError::UnknownDiscriminant {
                type_name: "TransactionExt",
                value: 1,
                ..
            })
        ));
    }

    #[test]
    fn more_than_100_operations_rejected() {
        let mut tx = sample_tx();
        tx.operations = vec![Operation::bump_sequence(1); 101];
        assert!(matches!(
            tx.to_xdr(),
            Err(XdrError::LengthExceedsMax { len: 101, max: 100, .. })
        ));
    }

    #[test]
    fn signature_payload_layout() {
        let payload = TransactionSignaturePayload {
            network_id: [9; 32],
            tagged_transaction: TaggedTransaction::Tx(sample_tx()),
        };
        let bytes = payload.to_xdr().unwrap();
        assert_eq!(&bytes[..32], &[9; 32]);
        assert_eq!(&bytes[32..36], &[0, 0, 0, 2]);
        assert_eq!(&bytes[36..], &sample_tx().to_xdr().unwrap()[..]);
        assert_eq!(TransactionSignaturePayload::from_xdr(&bytes).unwrap(), payload);
    }
}
