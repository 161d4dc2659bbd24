//! Accounts, assets, memos, preconditions, claim predicates and ledger keys.

use super::writer::join;
use super::{read_array, write_array, FromTxRep, ToTxRep, TxRepError, TxRepSource, TxRepWriter};
use crate::config::{MAX_DATA_LENGTH, MAX_EXTRA_SIGNERS, MAX_MEMO_TEXT_LENGTH, MAX_SIGNATURE_LENGTH};
use crate::types::{
    AccountId, Asset, AssetCode, ChangeTrustAsset, ClaimPredicate, ClaimableBalanceId, Claimant,
    DecoratedSignature, LedgerBounds, LedgerKey, LiquidityPoolParameters, Memo, MuxedAccount,
    Preconditions, PreconditionsV2, Price, Signer, SignerKey, TimeBounds, TrustLineAsset,
};

/// Leaves whose TxRep form is their `Display`/`FromStr` text.
macro_rules! impl_txrep_text {
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

impl_txrep_text!(AccountId, MuxedAccount, SignerKey, Asset, AssetCode);

// ---------------------------------------------------------------------------
// Assets
// ---------------------------------------------------------------------------

const ASSET_TYPE_POOL_SHARE: &str = "ASSET_TYPE_POOL_SHARE";
const LIQUIDITY_POOL_CONSTANT_PRODUCT: &str = "LIQUIDITY_POOL_CONSTANT_PRODUCT";

impl ToTxRep for Price {
    fn write_txrep(&self, w: &mut TxRepWriter, path: &str) {
        w.field(&join(path, "n"), self.n);
        w.field(&join(path, "d"), self.d);
    }
}

impl FromTxRep for Price {
    fn read_txrep(src: &TxRepSource, path: &str) -> Result<Self, TxRepError> {
        Ok(Self {
            n: src.value(&join(path, "n"))?,
            d: src.value(&join(path, "d"))?,
        })
    }
}

impl ToTxRep for LiquidityPoolParameters {
    fn write_txrep(&self, w: &mut TxRepWriter, path: &str) {
        match self {
            Self::ConstantProduct {
                asset_a,
                asset_b,
                fee,
            } => {
                w.union_arm(path, LIQUIDITY_POOL_CONSTANT_PRODUCT);
                let arm = join(path, "constantProduct");
                asset_a.write_txrep(w, &join(&arm, "assetA"));
                asset_b.write_txrep(w, &join(&arm, "assetB"));
                w.field(&join(&arm, "fee"), fee);
            }
        }
    }
}

impl FromTxRep for LiquidityPoolParameters {
    fn read_txrep(src: &TxRepSource, path: &str) -> Result<Self, TxRepError> {
        match src.arm(path)? {
            LIQUIDITY_POOL_CONSTANT_PRODUCT => {
                let arm = join(path, "constantProduct");
                Ok(Self::ConstantProduct {
                    asset_a: src.value(&join(&arm, "assetA"))?,
                    asset_b: src.value(&join(&arm, "assetB"))?,
                    fee: src.value(&join(&arm, "fee"))?,
                })
            }
            other => Err(TxRepError::unknown_arm(&join(path, "type"), other)),
        }
    }
}

/// Plain assets use the compact `CODE:ISSUER` form; pool shares are a union.
impl ToTxRep for ChangeTrustAsset {
    fn write_txrep(&self, w: &mut TxRepWriter, path: &str) {
        match self {
            Self::Native => Asset::Native.write_txrep(w, path),
            Self::CreditAlphanum4(a) => Asset::CreditAlphanum4(*a).write_txrep(w, path),
            Self::CreditAlphanum12(a) => Asset::CreditAlphanum12(*a).write_txrep(w, path),
            Self::PoolShare(params) => {
                w.union_arm(path, ASSET_TYPE_POOL_SHARE);
                params.write_txrep(w, &join(path, "liquidityPool"));
            }
        }
    }
}

impl FromTxRep for ChangeTrustAsset {
    fn read_txrep(src: &TxRepSource, path: &str) -> Result<Self, TxRepError> {
        if !src.contains(&join(path, "type")) {
            return Asset::read_txrep(src, path).map(Into::into);
        }
        match src.arm(path)? {
            ASSET_TYPE_POOL_SHARE => Ok(Self::PoolShare(LiquidityPoolParameters::read_txrep(
                src,
                &join(path, "liquidityPool"),
            )?)),
            other => Err(TxRepError::unknown_arm(&join(path, "type"), other)),
        }
    }
}

impl ToTxRep for TrustLineAsset {
    fn write_txrep(&self, w: &mut TxRepWriter, path: &str) {
        match self {
            Self::Native => Asset::Native.write_txrep(w, path),
            Self::CreditAlphanum4(a) => Asset::CreditAlphanum4(*a).write_txrep(w, path),
            Self::CreditAlphanum12(a) => Asset::CreditAlphanum12(*a).write_txrep(w, path),
            Self::PoolShare(pool_id) => {
                w.union_arm(path, ASSET_TYPE_POOL_SHARE);
                w.hex(&join(path, "liquidityPoolID"), pool_id);
            }
        }
    }
}

impl FromTxRep for TrustLineAsset {
    fn read_txrep(src: &TxRepSource, path: &str) -> Result<Self, TxRepError> {
        if !src.contains(&join(path, "type")) {
            return Asset::read_txrep(src, path).map(Into::into);
        }
        match src.arm(path)? {
            ASSET_TYPE_POOL_SHARE => Ok(Self::PoolShare(
                src.hex_fixed(&join(path, "liquidityPoolID"))?,
            )),
            other => Err(TxRepError::unknown_arm(&join(path, "type"), other)),
        }
    }
}

// ---------------------------------------------------------------------------
// Signers and signatures
// ---------------------------------------------------------------------------

impl ToTxRep for Signer {
    fn write_txrep(&self, w: &mut TxRepWriter, path: &str) {
        self.key.write_txrep(w, &join(path, "key"));
        w.field(&join(path, "weight"), self.weight);
    }
}

impl FromTxRep for Signer {
    fn read_txrep(src: &TxRepSource, path: &str) -> Result<Self, TxRepError> {
        Ok(Self {
            key: src.value(&join(path, "key"))?,
            weight: src.value(&join(path, "weight"))?,
        })
    }
}

impl ToTxRep for DecoratedSignature {
    fn write_txrep(&self, w: &mut TxRepWriter, path: &str) {
        w.hex(&join(path, "hint"), &self.hint);
        w.hex(&join(path, "signature"), &self.signature);
    }
}

impl FromTxRep for DecoratedSignature {
    fn read_txrep(src: &TxRepSource, path: &str) -> Result<Self, TxRepError> {
        Ok(Self {
            hint: src.hex_fixed(&join(path, "hint"))?,
            signature: src.hex(&join(path, "signature"), MAX_SIGNATURE_LENGTH)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Memo
// ---------------------------------------------------------------------------

impl ToTxRep for Memo {
    fn write_txrep(&self, w: &mut TxRepWriter, path: &str) {
        match self {
            Self::None => w.union_arm(path, "MEMO_NONE"),
            Self::Text(text) => {
                w.union_arm(path, "MEMO_TEXT");
                w.string(&join(path, "text"), text);
            }
            Self::Id(id) => {
                w.union_arm(path, "MEMO_ID");
                w.field(&join(path, "id"), id);
            }
            Self::Hash(hash) => {
                w.union_arm(path, "MEMO_HASH");
                w.hex(&join(path, "hash"), hash);
            }
            Self::Return(hash) => {
                w.union_arm(path, "MEMO_RETURN");
                w.hex(&join(path, "retHash"), hash);
            }
        }
    }
}

impl FromTxRep for Memo {
    fn read_txrep(src: &TxRepSource, path: &str) -> Result<Self, TxRepError> {
        match src.arm(path)? {
            "MEMO_NONE" => Ok(Self::None),
            "MEMO_TEXT" => Ok(Self::Text(
                src.string(&join(path, "text"), MAX_MEMO_TEXT_LENGTH)?,
            )),
            "MEMO_ID" => Ok(Self::Id(src.value(&join(path, "id"))?)),
            "MEMO_HASH" => Ok(Self::Hash(src.hex_fixed(&join(path, "hash"))?)),
            "MEMO_RETURN" => Ok(Self::Return(src.hex_fixed(&join(path, "retHash"))?)),
            other => Err(TxRepError::unknown_arm(&join(path, "type"), other)),
        }
    }
}

// ---------------------------------------------------------------------------
// Preconditions
// ---------------------------------------------------------------------------

impl ToTxRep for TimeBounds {
    fn write_txrep(&self, w: &mut TxRepWriter, path: &str) {
        w.timestamp(&join(path, "minTime"), self.min_time);
        w.timestamp(&join(path, "maxTime"), self.max_time);
    }
}

impl FromTxRep for TimeBounds {
    fn read_txrep(src: &TxRepSource, path: &str) -> Result<Self, TxRepError> {
        Ok(Self {
            min_time: src.value(&join(path, "minTime"))?,
            max_time: src.value(&join(path, "maxTime"))?,
        })
    }
}

impl ToTxRep for LedgerBounds {
    fn write_txrep(&self, w: &mut TxRepWriter, path: &str) {
        w.field(&join(path, "minLedger"), self.min_ledger);
        w.field(&join(path, "maxLedger"), self.max_ledger);
    }
}

impl FromTxRep for LedgerBounds {
    fn read_txrep(src: &TxRepSource, path: &str) -> Result<Self, TxRepError> {
        Ok(Self {
            min_ledger: src.value(&join(path, "minLedger"))?,
            max_ledger: src.value(&join(path, "maxLedger"))?,
        })
    }
}

impl ToTxRep for PreconditionsV2 {
    fn write_txrep(&self, w: &mut TxRepWriter, path: &str) {
        self.time_bounds.write_txrep(w, &join(path, "timeBounds"));
        self.ledger_bounds.write_txrep(w, &join(path, "ledgerBounds"));
        self.min_seq_num.write_txrep(w, &join(path, "minSeqNum"));
        w.field(&join(path, "minSeqAge"), self.min_seq_age);
        w.field(&join(path, "minSeqLedgerGap"), self.min_seq_ledger_gap);
        write_array(w, &join(path, "extraSigners"), &self.extra_signers);
    }
}

impl FromTxRep for PreconditionsV2 {
    fn read_txrep(src: &TxRepSource, path: &str) -> Result<Self, TxRepError> {
        Ok(Self {
            time_bounds: FromTxRep::read_txrep(src, &join(path, "timeBounds"))?,
            ledger_bounds: FromTxRep::read_txrep(src, &join(path, "ledgerBounds"))?,
            min_seq_num: FromTxRep::read_txrep(src, &join(path, "minSeqNum"))?,
            min_seq_age: src.value(&join(path, "minSeqAge"))?,
            min_seq_ledger_gap: src.value(&join(path, "minSeqLedgerGap"))?,
            extra_signers: read_array(src, &join(path, "extraSigners"), MAX_EXTRA_SIGNERS)?,
        })
    }
}

impl ToTxRep for Preconditions {
    fn write_txrep(&self, w: &mut TxRepWriter, path: &str) {
        match self {
            Self::None => w.union_arm(path, "PRECOND_NONE"),
            Self::Time(bounds) => {
                w.union_arm(path, "PRECOND_TIME");
                bounds.write_txrep(w, &join(path, "timeBounds"));
            }
            Self::V2(v2) => {
                w.union_arm(path, "PRECOND_V2");
                v2.write_txrep(w, &join(path, "v2"));
            }
        }
    }
}

impl FromTxRep for Preconditions {
    fn read_txrep(src: &TxRepSource, path: &str) -> Result<Self, TxRepError> {
        match src.arm(path)? {
            "PRECOND_NONE" => Ok(Self::None),
            "PRECOND_TIME" => Ok(Self::Time(TimeBounds::read_txrep(
                src,
                &join(path, "timeBounds"),
            )?)),
            "PRECOND_V2" => Ok(Self::V2(PreconditionsV2::read_txrep(src, &join(path, "v2"))?)),
            other => Err(TxRepError::unknown_arm(&join(path, "type"), other)),
        }
    }
}

// ---------------------------------------------------------------------------
// Claimable balances
// ---------------------------------------------------------------------------

const MAX_PREDICATE_CHILDREN: usize = 2;

impl ToTxRep for ClaimPredicate {
    fn write_txrep(&self, w: &mut TxRepWriter, path: &str) {
        match self {
            Self::Unconditional => w.union_arm(path, "CLAIM_PREDICATE_UNCONDITIONAL"),
            Self::And(children) => {
                w.union_arm(path, "CLAIM_PREDICATE_AND");
                write_array(w, &join(path, "andPredicates"), children);
            }
            Self::Or(children) => {
                w.union_arm(path, "CLAIM_PREDICATE_OR");
                write_array(w, &join(path, "orPredicates"), children);
            }
            Self::Not(inner) => {
                w.union_arm(path, "CLAIM_PREDICATE_NOT");
                inner.write_txrep(w, &join(path, "notPredicate"));
            }
            Self::BeforeAbsoluteTime(t) => {
                w.union_arm(path, "CLAIM_PREDICATE_BEFORE_ABSOLUTE_TIME");
                let path = join(path, "absBefore");
                match u64::try_from(*t) {
                    Ok(secs) => w.timestamp(&path, secs),
                    Err(_) => w.field(&path, t),
                }
            }
            Self::BeforeRelativeTime(t) => {
                w.union_arm(path, "CLAIM_PREDICATE_BEFORE_RELATIVE_TIME");
                w.field(&join(path, "relBefore"), t);
            }
        }
    }
}

impl FromTxRep for ClaimPredicate {
    fn read_txrep(src: &TxRepSource, path: &str) -> Result<Self, TxRepError> {
        match src.arm(path)? {
            "CLAIM_PREDICATE_UNCONDITIONAL" => Ok(Self::Unconditional),
            "CLAIM_PREDICATE_AND" => src
                .nested(path, |src| {
                    read_array(src, &join(path, "andPredicates"), MAX_PREDICATE_CHILDREN)
                })
                .map(Self::And),
            "CLAIM_PREDICATE_OR" => src
                .nested(path, |src| {
                    read_array(src, &join(path, "orPredicates"), MAX_PREDICATE_CHILDREN)
                })
                .map(Self::Or),
            "CLAIM_PREDICATE_NOT" => Ok(Self::Not(FromTxRep::read_txrep(
                src,
                &join(path, "notPredicate"),
            )?)),
            "CLAIM_PREDICATE_BEFORE_ABSOLUTE_TIME" => {
                Ok(Self::BeforeAbsoluteTime(src.value(&join(path, "absBefore"))?))
            }
            "CLAIM_PREDICATE_BEFORE_RELATIVE_TIME" => {
                Ok(Self::BeforeRelativeTime(src.value(&join(path, "relBefore"))?))
            }
            other => Err(TxRepError::unknown_arm(&join(path, "type"), other)),
        }
    }
}

impl ToTxRep for Claimant {
    fn write_txrep(&self, w: &mut TxRepWriter, path: &str) {
        w.union_arm(path, "CLAIMANT_TYPE_V0");
        let arm = join(path, "v0");
        self.destination.write_txrep(w, &join(&arm, "destination"));
        self.predicate.write_txrep(w, &join(&arm, "predicate"));
    }
}

impl FromTxRep for Claimant {
    fn read_txrep(src: &TxRepSource, path: &str) -> Result<Self, TxRepError> {
        match src.arm(path)? {
            "CLAIMANT_TYPE_V0" => {
                let arm = join(path, "v0");
                Ok(Self {
                    destination: src.value(&join(&arm, "destination"))?,
                    predicate: ClaimPredicate::read_txrep(src, &join(&arm, "predicate"))?,
                })
            }
            other => Err(TxRepError::unknown_arm(&join(path, "type"), other)),
        }
    }
}

impl ToTxRep for ClaimableBalanceId {
    fn write_txrep(&self, w: &mut TxRepWriter, path: &str) {
        w.union_arm(path, "CLAIMABLE_BALANCE_ID_TYPE_V0");
        w.hex(&join(path, "v0"), &self.0);
    }
}

impl FromTxRep for ClaimableBalanceId {
    fn read_txrep(src: &TxRepSource, path: &str) -> Result<Self, TxRepError> {
        match src.arm(path)? {
            "CLAIMABLE_BALANCE_ID_TYPE_V0" => Ok(Self(src.hex_fixed(&join(path, "v0"))?)),
            other => Err(TxRepError::unknown_arm(&join(path, "type"), other)),
        }
    }
}

// ---------------------------------------------------------------------------
// Ledger keys
// ---------------------------------------------------------------------------

impl ToTxRep for LedgerKey {
    fn write_txrep(&self, w: &mut TxRepWriter, path: &str) {
        match self {
            Self::Account { account_id } => {
                w.union_arm(path, "ACCOUNT");
                account_id.write_txrep(w, &join(path, "account.accountID"));
            }
            Self::Trustline { account_id, asset } => {
                w.union_arm(path, "TRUSTLINE");
                account_id.write_txrep(w, &join(path, "trustLine.accountID"));
                asset.write_txrep(w, &join(path, "trustLine.asset"));
            }
            Self::Offer {
                seller_id,
                offer_id,
            } => {
                w.union_arm(path, "OFFER");
                seller_id.write_txrep(w, &join(path, "offer.sellerID"));
                w.field(&join(path, "offer.offerID"), offer_id);
            }
            Self::Data {
                account_id,
                data_name,
            } => {
                w.union_arm(path, "DATA");
                account_id.write_txrep(w, &join(path, "data.accountID"));
                w.string(&join(path, "data.dataName"), data_name);
            }
            Self::ClaimableBalance { balance_id } => {
                w.union_arm(path, "CLAIMABLE_BALANCE");
                balance_id.write_txrep(w, &join(path, "claimableBalance.balanceID"));
            }
            Self::LiquidityPool { liquidity_pool_id } => {
                w.union_arm(path, "LIQUIDITY_POOL");
                w.hex(&join(path, "liquidityPool.liquidityPoolID"), liquidity_pool_id);
            }
        }
    }
}

impl FromTxRep for LedgerKey {
    fn read_txrep(src: &TxRepSource, path: &str) -> Result<Self, TxRepError> {
        match src.arm(path)? {
            "ACCOUNT" => Ok(Self::Account {
                account_id: src.value(&join(path, "account.accountID"))?,
            }),
            "TRUSTLINE" => Ok(Self::Trustline {
                account_id: src.value(&join(path, "trustLine.accountID"))?,
                asset: TrustLineAsset::read_txrep(src, &join(path, "trustLine.asset"))?,
            }),
            "OFFER" => Ok(Self::Offer {
                seller_id: src.value(&join(path, "offer.sellerID"))?,
                offer_id: src.value(&join(path, "offer.offerID"))?,
            }),
            "DATA" => Ok(Self::Data {
                account_id: src.value(&join(path, "data.accountID"))?,
                data_name: src.string(&join(path, "data.dataName"), MAX_DATA_LENGTH)?,
            }),
            "CLAIMABLE_BALANCE" => Ok(Self::ClaimableBalance {
                balance_id: ClaimableBalanceId::read_txrep(
                    src,
                    &join(path, "claimableBalance.balanceID"),
                )?,
            }),
            "LIQUIDITY_POOL" => Ok(Self::LiquidityPool {
                liquidity_pool_id: src.hex_fixed(&join(path, "liquidityPool.liquidityPoolID"))?,
            }),
            other => Err(TxRepError::unknown_arm(&join(path, "type"), other)),
        }
    }
}
