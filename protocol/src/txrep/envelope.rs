//! Transactions and the three envelope shapes.

use super::writer::join;
use super::{read_array, write_array, FromTxRep, ToTxRep, TxRepError, TxRepSource, TxRepWriter};
use crate::config::{MAX_OPERATIONS, MAX_SIGNATURES};
use crate::types::{
    AccountId, FeeBumpTransaction, FeeBumpTransactionEnvelope, Memo, Preconditions, Transaction,
    TransactionEnvelope, TransactionV0, TransactionV0Envelope, TransactionV1Envelope,
};

const ENVELOPE_TYPE_TX_V0: &str = "ENVELOPE_TYPE_TX_V0";
const ENVELOPE_TYPE_TX: &str = "ENVELOPE_TYPE_TX";
const ENVELOPE_TYPE_TX_FEE_BUMP: &str = "ENVELOPE_TYPE_TX_FEE_BUMP";

/// `ext` unions only have the void arm `v: 0`.
fn read_ext_v0(src: &TxRepSource, path: &str) -> Result<(), TxRepError> {
    let v_path = join(path, "ext.v");
    match src.get(&v_path)? {
        "0" => Ok(()),
        other => Err(TxRepError::unknown_arm(&v_path, other)),
    }
}

impl ToTxRep for Transaction {
    fn write_txrep(&self, w: &mut TxRepWriter, path: &str) {
        self.source_account
            .write_txrep(w, &join(path, "sourceAccount"));
        w.field(&join(path, "fee"), self.fee);
        w.field(&join(path, "seqNum"), self.seq_num);
        self.cond.write_txrep(w, &join(path, "cond"));
        self.memo.write_txrep(w, &join(path, "memo"));
        write_array(w, &join(path, "operations"), &self.operations);
        w.ext_v0(path);
    }
}

impl FromTxRep for Transaction {
    fn read_txrep(src: &TxRepSource, path: &str) -> Result<Self, TxRepError> {
        let tx = Self {
            source_account: src.value(&join(path, "sourceAccount"))?,
            fee: src.value(&join(path, "fee"))?,
            seq_num: src.value(&join(path, "seqNum"))?,
            cond: Preconditions::read_txrep(src, &join(path, "cond"))?,
            memo: Memo::read_txrep(src, &join(path, "memo"))?,
            operations: read_array(src, &join(path, "operations"), MAX_OPERATIONS)?,
        };
        read_ext_v0(src, path)?;
        Ok(tx)
    }
}

impl ToTxRep for TransactionV0 {
    fn write_txrep(&self, w: &mut TxRepWriter, path: &str) {
        AccountId(self.source_account_ed25519)
            .write_txrep(w, &join(path, "sourceAccountEd25519"));
        w.field(&join(path, "fee"), self.fee);
        w.field(&join(path, "seqNum"), self.seq_num);
        self.time_bounds.write_txrep(w, &join(path, "timeBounds"));
        self.memo.write_txrep(w, &join(path, "memo"));
        write_array(w, &join(path, "operations"), &self.operations);
        w.ext_v0(path);
    }
}

impl FromTxRep for TransactionV0 {
    fn read_txrep(src: &TxRepSource, path: &str) -> Result<Self, TxRepError> {
        let source: AccountId = src.value(&join(path, "sourceAccountEd25519"))?;
        let tx = Self {
            source_account_ed25519: source.0,
            fee: src.value(&join(path, "fee"))?,
            seq_num: src.value(&join(path, "seqNum"))?,
            time_bounds: FromTxRep::read_txrep(src, &join(path, "timeBounds"))?,
            memo: Memo::read_txrep(src, &join(path, "memo"))?,
            operations: read_array(src, &join(path, "operations"), MAX_OPERATIONS)?,
        };
        read_ext_v0(src, path)?;
        Ok(tx)
    }
}

impl ToTxRep for FeeBumpTransaction {
    fn write_txrep(&self, w: &mut TxRepWriter, path: &str) {
        self.fee_source.write_txrep(w, &join(path, "feeSource"));
        w.field(&join(path, "fee"), self.fee);
        let inner = join(path, "innerTx");
        w.union_arm(&inner, ENVELOPE_TYPE_TX);
        self.inner_tx.tx.write_txrep(w, &join(&inner, "tx"));
        write_array(w, &join(&inner, "signatures"), &self.inner_tx.signatures);
        w.ext_v0(path);
    }
}

impl FromTxRep for FeeBumpTransaction {
    fn read_txrep(src: &TxRepSource, path: &str) -> Result<Self, TxRepError> {
        let inner = join(path, "innerTx");
        let fee_source = src.value(&join(path, "feeSource"))?;
        let fee = src.value(&join(path, "fee"))?;
        let inner_tx = match src.arm(&inner)? {
            ENVELOPE_TYPE_TX => TransactionV1Envelope {
                tx: Transaction::read_txrep(src, &join(&inner, "tx"))?,
                signatures: read_array(src, &join(&inner, "signatures"), MAX_SIGNATURES)?,
            },
            other => return Err(TxRepError::unknown_arm(&join(&inner, "type"), other)),
        };
        read_ext_v0(src, path)?;
        Ok(Self {
            fee_source,
            fee,
            inner_tx,
        })
    }
}

impl ToTxRep for TransactionEnvelope {
    fn write_txrep(&self, w: &mut TxRepWriter, path: &str) {
        match self {
            Self::TxV0(env) => {
                w.field(&join(path, "type"), ENVELOPE_TYPE_TX_V0);
                env.tx.write_txrep(w, &join(path, "tx"));
                write_array(w, &join(path, "signatures"), &env.signatures);
            }
            Self::Tx(env) => {
                w.field(&join(path, "type"), ENVELOPE_TYPE_TX);
                env.tx.write_txrep(w, &join(path, "tx"));
                write_array(w, &join(path, "signatures"), &env.signatures);
            }
            Self::TxFeeBump(env) => {
                w.field(&join(path, "type"), ENVELOPE_TYPE_TX_FEE_BUMP);
                let fee_bump = join(path, "feeBump");
                env.tx.write_txrep(w, &join(&fee_bump, "tx"));
                write_array(w, &join(&fee_bump, "signatures"), &env.signatures);
            }
        }
    }
}

impl FromTxRep for TransactionEnvelope {
    fn read_txrep(src: &TxRepSource, path: &str) -> Result<Self, TxRepError> {
        let type_path = join(path, "type");
        match src.get(&type_path)? {
            ENVELOPE_TYPE_TX_V0 => Ok(Self::TxV0(TransactionV0Envelope {
                tx: TransactionV0::read_txrep(src, &join(path, "tx"))?,
                signatures: read_array(src, &join(path, "signatures"), MAX_SIGNATURES)?,
            })),
            ENVELOPE_TYPE_TX => Ok(Self::Tx(TransactionV1Envelope {
                tx: Transaction::read_txrep(src, &join(path, "tx"))?,
                signatures: read_array(src, &join(path, "signatures"), MAX_SIGNATURES)?,
            })),
            ENVELOPE_TYPE_TX_FEE_BUMP => {
                let fee_bump = join(path, "feeBump");
                Ok(Self::TxFeeBump(FeeBumpTransactionEnvelope {
                    tx: FeeBumpTransaction::read_txrep(src, &join(&fee_bump, "tx"))?,
                    signatures: read_array(src, &join(&fee_bump, "signatures"), MAX_SIGNATURES)?,
                }))
            }
            other => Err(TxRepError::unknown_arm(&type_path, other)),
        }
    }
}
