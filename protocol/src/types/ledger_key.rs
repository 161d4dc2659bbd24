//! Ledger keys, as referenced by `REVOKE_SPONSORSHIP`.

use super::{AccountId, ClaimableBalanceId, TrustLineAsset};
use crate::config::MAX_DATA_LENGTH;
use crate::xdr::{ReadXdr, WriteXdr, XdrError, XdrReader, XdrWriter};

const ACCOUNT: i32 = 0;
const TRUSTLINE: i32 = 1;
const OFFER: i32 = 2;
const DATA: i32 = 3;
const CLAIMABLE_BALANCE: i32 = 4;
const LIQUIDITY_POOL: i32 = 5;

/// Identifies one ledger entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LedgerKey {
    Account {
        account_id: AccountId,
    },
    Trustline {
        account_id: AccountId,
        asset: TrustLineAsset,
    },
    Offer {
        seller_id: AccountId,
        offer_id: i64,
    },
    Data {
        account_id: AccountId,
        data_name: String,
    },
    ClaimableBalance {
        balance_id: ClaimableBalanceId,
    },
    LiquidityPool {
        liquidity_pool_id: [u8; 32],
    },
}

impl WriteXdr for LedgerKey {
    fn write_xdr(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        match self {
            Self::Account { account_id } => {
                w.write_discriminant(ACCOUNT);
                account_id.write_xdr(w)
            }
            Self::Trustline { account_id, asset } => {
                w.write_discriminant(TRUSTLINE);
                account_id.write_xdr(w)?;
                asset.write_xdr(w)
            }
            Self::Offer {
                seller_id,
                offer_id,
            } => {
                w.write_discriminant(OFFER);
                seller_id.write_xdr(w)?;
                w.write_i64(*offer_id);
                Ok(())
            }
            Self::Data {
                account_id,
                data_name,
            } => {
                w.write_discriminant(DATA);
                account_id.write_xdr(w)?;
                w.write_string(data_name, MAX_DATA_LENGTH)
            }
            Self::ClaimableBalance { balance_id } => {
                w.write_discriminant(CLAIMABLE_BALANCE);
                balance_id.write_xdr(w)
            }
            Self::LiquidityPool { liquidity_pool_id } => {
                w.write_discriminant(LIQUIDITY_POOL);
                w.write_fixed(liquidity_pool_id);
                Ok(())
            }
        }
    }
}

impl ReadXdr for LedgerKey {
    fn read_xdr(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        match r.read_discriminant()? {
            ACCOUNT => Ok(Self::Account {
                account_id: AccountId::read_xdr(r)?,
            }),
            TRUSTLINE => Ok(Self::Trustline {
                account_id: AccountId::read_xdr(r)?,
                asset: TrustLineAsset::read_xdr(r)?,
            }),
            OFFER => Ok(Self::Offer {
                seller_id: AccountId::read_xdr(r)?,
                offer_id: r.read_i64()?,
            }),
            DATA => Ok(Self::Data {
                account_id: AccountId::read_xdr(r)?,
                data_name: r.read_string(MAX_DATA_LENGTH)?,
            }),
            CLAIMABLE_BALANCE => Ok(Self::ClaimableBalance {
                balance_id: ClaimableBalanceId::read_xdr(r)?,
            }),
            LIQUIDITY_POOL => Ok(Self::LiquidityPool {
                liquidity_pool_id: r.read_fixed()?,
            }),
            other => Err(r.unknown("LedgerEntryType", other)),
        }
    }
}
