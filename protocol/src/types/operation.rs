//! # Operations
//!
//! A transaction is a list of operations, each an arm of one closed union.
//! [`OperationBody`] is that union as a single exhaustive enum whose variant
//! order follows the network's operation codes (0 through 24). Adding a new
//! operation means adding a variant, after which the compiler points at
//! every `match` that needs to learn about it. Codes the table does not
//! know fail the decode with `UnknownDiscriminant`.

use super::soroban::{HostFunction, SorobanAuthorizationEntry};
use super::{
    check_length, AccountId, Asset, AssetCode, ChangeTrustAsset, ClaimableBalanceId, Claimant,
    LedgerKey, MuxedAccount, Price, Signer, SignerKey, ValidationError,
};
use crate::config::{
    MAX_CLAIMANTS, MAX_DATA_LENGTH, MAX_HOME_DOMAIN_LENGTH, MAX_PATH_LENGTH, UNBOUNDED,
};
use crate::xdr::{
    impl_xdr_struct, read_array, write_array, ReadXdr, WriteXdr, XdrError, XdrReader, XdrWriter,
};

// ---------------------------------------------------------------------------
// Operation payloads
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CreateAccountOp {
    pub destination: AccountId,
    pub starting_balance: i64,
}

impl_xdr_struct!(CreateAccountOp {
    destination,
    starting_balance
});

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PaymentOp {
    pub destination: MuxedAccount,
    pub asset: Asset,
    pub amount: i64,
}

impl_xdr_struct!(PaymentOp {
    destination,
    asset,
    amount
});

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathPaymentStrictReceiveOp {
    pub send_asset: Asset,
    pub send_max: i64,
    pub destination: MuxedAccount,
    pub dest_asset: Asset,
    pub dest_amount: i64,
    pub path: Vec<Asset>,
}

impl WriteXdr for PathPaymentStrictReceiveOp {
    fn write_xdr(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        self.send_asset.write_xdr(w)?;
        w.write_i64(self.send_max);
        self.destination.write_xdr(w)?;
        self.dest_asset.write_xdr(w)?;
        w.write_i64(self.dest_amount);
        write_array(w, &self.path, MAX_PATH_LENGTH)
    }
}

impl ReadXdr for PathPaymentStrictReceiveOp {
    fn read_xdr(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        Ok(Self {
            send_asset: Asset::read_xdr(r)?,
            send_max: r.read_i64()?,
            destination: MuxedAccount::read_xdr(r)?,
            dest_asset: Asset::read_xdr(r)?,
            dest_amount: r.read_i64()?,
            path: read_array(r, MAX_PATH_LENGTH)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ManageSellOfferOp {
    pub selling: Asset,
    pub buying: Asset,
    pub amount: i64,
    pub price: Price,
    /// 0 creates a new offer.
    pub offer_id: i64,
}

impl_xdr_struct!(ManageSellOfferOp {
    selling,
    buying,
    amount,
    price,
    offer_id
});

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CreatePassiveSellOfferOp {
    pub selling: Asset,
    pub buying: Asset,
    pub amount: i64,
    pub price: Price,
}

impl_xdr_struct!(CreatePassiveSellOfferOp {
    selling,
    buying,
    amount,
    price
});

/// Every field is optional; only the ones that are set change anything.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SetOptionsOp {
    pub inflation_dest: Option<AccountId>,
    pub clear_flags: Option<u32>,
    pub set_flags: Option<u32>,
    pub master_weight: Option<u32>,
    pub low_threshold: Option<u32>,
    pub med_threshold: Option<u32>,
    pub high_threshold: Option<u32>,
    pub home_domain: Option<String>,
    pub signer: Option<Signer>,
}

impl SetOptionsOp {
    pub fn with_home_domain(mut self, domain: impl Into<String>) -> Result<Self, ValidationError> {
        let domain = domain.into();
        check_length("home domain", domain.len(), MAX_HOME_DOMAIN_LENGTH)?;
        self.home_domain = Some(domain);
        Ok(self)
    }

    pub fn with_signer(mut self, key: SignerKey, weight: u32) -> Self {
        self.signer = Some(Signer { key, weight });
        self
    }
}

impl WriteXdr for SetOptionsOp {
    fn write_xdr(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        self.inflation_dest.write_xdr(w)?;
        self.clear_flags.write_xdr(w)?;
        self.set_flags.write_xdr(w)?;
        self.master_weight.write_xdr(w)?;
        self.low_threshold.write_xdr(w)?;
        self.med_threshold.write_xdr(w)?;
        self.high_threshold.write_xdr(w)?;
        w.write_bool(self.home_domain.is_some());
        if let Some(domain) = &self.home_domain {
            w.write_string(domain, MAX_HOME_DOMAIN_LENGTH)?;
        }
        self.signer.write_xdr(w)
    }
}

impl ReadXdr for SetOptionsOp {
    fn read_xdr(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        Ok(Self {
            inflation_dest: ReadXdr::read_xdr(r)?,
            clear_flags: ReadXdr::read_xdr(r)?,
            set_flags: ReadXdr::read_xdr(r)?,
            master_weight: ReadXdr::read_xdr(r)?,
            low_threshold: ReadXdr::read_xdr(r)?,
            med_threshold: ReadXdr::read_xdr(r)?,
            high_threshold: ReadXdr::read_xdr(r)?,
            home_domain: if r.read_bool()? {
                Some(r.read_string(MAX_HOME_DOMAIN_LENGTH)?)
            } else {
                None
            },
            signer: ReadXdr::read_xdr(r)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChangeTrustOp {
    pub line: ChangeTrustAsset,
    /// 0 removes the trust line.
    pub limit: i64,
}

impl_xdr_struct!(ChangeTrustOp { line, limit });

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AllowTrustOp {
    pub trustor: AccountId,
    pub asset: AssetCode,
    pub authorize: u32,
}

impl_xdr_struct!(AllowTrustOp {
    trustor,
    asset,
    authorize
});

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ManageDataOp {
    pub data_name: String,
    /// `None` deletes the entry.
    pub data_value: Option<Vec<u8>>,
}

impl ManageDataOp {
    pub fn new(name: impl Into<String>, value: Option<Vec<u8>>) -> Result<Self, ValidationError> {
        let data_name = name.into();
        check_length("data name", data_name.len(), MAX_DATA_LENGTH)?;
        if let Some(value) = &value {
            check_length("data value", value.len(), MAX_DATA_LENGTH)?;
        }
        Ok(Self {
            data_name,
            data_value: value,
        })
    }
}

impl WriteXdr for ManageDataOp {
    fn write_xdr(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        w.write_string(&self.data_name, MAX_DATA_LENGTH)?;
        w.write_bool(self.data_value.is_some());
        if let Some(value) = &self.data_value {
            w.write_var_opaque(value, MAX_DATA_LENGTH)?;
        }
        Ok(())
    }
}

impl ReadXdr for ManageDataOp {
    fn read_xdr(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        Ok(Self {
            data_name: r.read_string(MAX_DATA_LENGTH)?,
            data_value: if r.read_bool()? {
                Some(r.read_var_opaque(MAX_DATA_LENGTH)?)
            } else {
                None
            },
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BumpSequenceOp {
    pub bump_to: i64,
}

impl_xdr_struct!(BumpSequenceOp { bump_to });

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ManageBuyOfferOp {
    pub selling: Asset,
    pub buying: Asset,
    pub buy_amount: i64,
    pub price: Price,
    pub offer_id: i64,
}

impl_xdr_struct!(ManageBuyOfferOp {
    selling,
    buying,
    buy_amount,
    price,
    offer_id
});

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathPaymentStrictSendOp {
    pub send_asset: Asset,
    pub send_amount: i64,
    pub destination: MuxedAccount,
    pub dest_asset: Asset,
    pub dest_min: i64,
    pub path: Vec<Asset>,
}

impl WriteXdr for PathPaymentStrictSendOp {
    fn write_xdr(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        self.send_asset.write_xdr(w)?;
        w.write_i64(self.send_amount);
        self.destination.write_xdr(w)?;
        self.dest_asset.write_xdr(w)?;
        w.write_i64(self.dest_min);
        write_array(w, &self.path, MAX_PATH_LENGTH)
    }
}

impl ReadXdr for PathPaymentStrictSendOp {
    fn read_xdr(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        Ok(Self {
            send_asset: Asset::read_xdr(r)?,
            send_amount: r.read_i64()?,
            destination: MuxedAccount::read_xdr(r)?,
            dest_asset: Asset::read_xdr(r)?,
            dest_min: r.read_i64()?,
            path: read_array(r, MAX_PATH_LENGTH)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CreateClaimableBalanceOp {
    pub asset: Asset,
    pub amount: i64,
    pub claimants: Vec<Claimant>,
}

impl WriteXdr for CreateClaimableBalanceOp {
    fn write_xdr(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        self.asset.write_xdr(w)?;
        w.write_i64(self.amount);
        write_array(w, &self.claimants, MAX_CLAIMANTS)
    }
}

impl ReadXdr for CreateClaimableBalanceOp {
    fn read_xdr(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        Ok(Self {
            asset: Asset::read_xdr(r)?,
            amount: r.read_i64()?,
            claimants: read_array(r, MAX_CLAIMANTS)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClaimClaimableBalanceOp {
    pub balance_id: ClaimableBalanceId,
}

impl_xdr_struct!(ClaimClaimableBalanceOp { balance_id });

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BeginSponsoringFutureReservesOp {
    pub sponsored_id: AccountId,
}

impl_xdr_struct!(BeginSponsoringFutureReservesOp { sponsored_id });

const REVOKE_SPONSORSHIP_LEDGER_ENTRY: i32 = 0;
const REVOKE_SPONSORSHIP_SIGNER: i32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RevokeSponsorshipOp {
    LedgerEntry(LedgerKey),
    Signer {
        account_id: AccountId,
        signer_key: SignerKey,
    },
}

impl WriteXdr for RevokeSponsorshipOp {
    fn write_xdr(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        match self {
            Self::LedgerEntry(key) => {
                w.write_discriminant(REVOKE_SPONSORSHIP_LEDGER_ENTRY);
                key.write_xdr(w)
            }
            Self::Signer {
                account_id,
                signer_key,
            } => {
                w.write_discriminant(REVOKE_SPONSORSHIP_SIGNER);
                account_id.write_xdr(w)?;
                signer_key.write_xdr(w)
            }
        }
    }
}

impl ReadXdr for RevokeSponsorshipOp {
    fn read_xdr(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        match r.read_discriminant()? {
            REVOKE_SPONSORSHIP_LEDGER_ENTRY => Ok(Self::LedgerEntry(LedgerKey::read_xdr(r)?)),
            REVOKE_SPONSORSHIP_SIGNER => Ok(Self::Signer {
                account_id: AccountId::read_xdr(r)?,
                signer_key: SignerKey::read_xdr(r)?,
            }),
            other => Err(r.unknown("RevokeSponsorshipType", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClawbackOp {
    pub asset: Asset,
    pub from: MuxedAccount,
    pub amount: i64,
}

impl_xdr_struct!(ClawbackOp {
    asset,
    from,
    amount
});

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClawbackClaimableBalanceOp {
    pub balance_id: ClaimableBalanceId,
}

impl_xdr_struct!(ClawbackClaimableBalanceOp { balance_id });

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SetTrustLineFlagsOp {
    pub trustor: AccountId,
    pub asset: Asset,
    pub clear_flags: u32,
    pub set_flags: u32,
}

impl_xdr_struct!(SetTrustLineFlagsOp {
    trustor,
    asset,
    clear_flags,
    set_flags
});

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LiquidityPoolDepositOp {
    pub liquidity_pool_id: [u8; 32],
    pub max_amount_a: i64,
    pub max_amount_b: i64,
    pub min_price: Price,
    pub max_price: Price,
}

impl_xdr_struct!(LiquidityPoolDepositOp {
    liquidity_pool_id,
    max_amount_a,
    max_amount_b,
    min_price,
    max_price
});

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LiquidityPoolWithdrawOp {
    pub liquidity_pool_id: [u8; 32],
    pub amount: i64,
    pub min_amount_a: i64,
    pub min_amount_b: i64,
}

impl_xdr_struct!(LiquidityPoolWithdrawOp {
    liquidity_pool_id,
    amount,
    min_amount_a,
    min_amount_b
});

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InvokeHostFunctionOp {
    pub host_function: HostFunction,
    pub auth: Vec<SorobanAuthorizationEntry>,
}

impl WriteXdr for InvokeHostFunctionOp {
    fn write_xdr(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        self.host_function.write_xdr(w)?;
        write_array(w, &self.auth, UNBOUNDED)
    }
}

impl ReadXdr for InvokeHostFunctionOp {
    fn read_xdr(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        Ok(Self {
            host_function: HostFunction::read_xdr(r)?,
            auth: read_array(r, UNBOUNDED)?,
        })
    }
}

// ---------------------------------------------------------------------------
// OperationBody
// ---------------------------------------------------------------------------

/// The operation union. Variant order is operation-code order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OperationBody {
    CreateAccount(CreateAccountOp),
    Payment(PaymentOp),
    PathPaymentStrictReceive(PathPaymentStrictReceiveOp),
    ManageSellOffer(ManageSellOfferOp),
    CreatePassiveSellOffer(CreatePassiveSellOfferOp),
    SetOptions(SetOptionsOp),
    ChangeTrust(ChangeTrustOp),
    AllowTrust(AllowTrustOp),
    AccountMerge(MuxedAccount),
    Inflation,
    ManageData(ManageDataOp),
    BumpSequence(BumpSequenceOp),
    ManageBuyOffer(ManageBuyOfferOp),
    PathPaymentStrictSend(PathPaymentStrictSendOp),
    CreateClaimableBalance(CreateClaimableBalanceOp),
    ClaimClaimableBalance(ClaimClaimableBalanceOp),
    BeginSponsoringFutureReserves(BeginSponsoringFutureReservesOp),
    EndSponsoringFutureReserves,
    RevokeSponsorship(RevokeSponsorshipOp),
    Clawback(ClawbackOp),
    ClawbackClaimableBalance(ClawbackClaimableBalanceOp),
    SetTrustLineFlags(SetTrustLineFlagsOp),
    LiquidityPoolDeposit(LiquidityPoolDepositOp),
    LiquidityPoolWithdraw(LiquidityPoolWithdrawOp),
    InvokeHostFunction(InvokeHostFunctionOp),
}

impl OperationBody {
    /// The network's operation code.
    pub fn discriminant(&self) -> i32 {
        match self {
            Self::CreateAccount(_) => 0,
            Self::Payment(_) => 1,
            Self::PathPaymentStrictReceive(_) => 2,
            Self::ManageSellOffer(_) => 3,
            Self::CreatePassiveSellOffer(_) => 4,
            Self::SetOptions(_) => 5,
            Self::ChangeTrust(_) => 6,
            Self::AllowTrust(_) => 7,
            Self::AccountMerge(_) => 8,
            Self::Inflation => 9,
            Self::ManageData(_) => 10,
            Self::BumpSequence(_) => 11,
            Self::ManageBuyOffer(_) => 12,
            Self::PathPaymentStrictSend(_) => 13,
            Self::CreateClaimableBalance(_) => 14,
            Self::ClaimClaimableBalance(_) => 15,
            Self::BeginSponsoringFutureReserves(_) => 16,
            Self::EndSponsoringFutureReserves => 17,
            Self::RevokeSponsorship(_) => 18,
            Self::Clawback(_) => 19,
            Self::ClawbackClaimableBalance(_) => 20,
            Self::SetTrustLineFlags(_) => 21,
            Self::LiquidityPoolDeposit(_) => 22,
            Self::LiquidityPoolWithdraw(_) => 23,
            Self::InvokeHostFunction(_) => 24,
        }
    }

    /// The operation type as the XDR definitions spell it.
    pub fn name(&self) -> &'static str {
        match self {
            Self::CreateAccount(_) => "CREATE_ACCOUNT",
            Self::Payment(_) => "PAYMENT",
            Self::PathPaymentStrictReceive(_) => "PATH_PAYMENT_STRICT_RECEIVE",
            Self::ManageSellOffer(_) => "MANAGE_SELL_OFFER",
            Self::CreatePassiveSellOffer(_) => "CREATE_PASSIVE_SELL_OFFER",
            Self::SetOptions(_) => "SET_OPTIONS",
            Self::ChangeTrust(_) => "CHANGE_TRUST",
            Self::AllowTrust(_) => "ALLOW_TRUST",
            Self::AccountMerge(_) => "ACCOUNT_MERGE",
            Self::Inflation => "INFLATION",
            Self::ManageData(_) => "MANAGE_DATA",
            Self::BumpSequence(_) => "BUMP_SEQUENCE",
            Self::ManageBuyOffer(_) => "MANAGE_BUY_OFFER",
            Self::PathPaymentStrictSend(_) => "PATH_PAYMENT_STRICT_SEND",
            Self::CreateClaimableBalance(_) => "CREATE_CLAIMABLE_BALANCE",
            Self::ClaimClaimableBalance(_) => "CLAIM_CLAIMABLE_BALANCE",
            Self::BeginSponsoringFutureReserves(_) => "BEGIN_SPONSORING_FUTURE_RESERVES",
            Self::EndSponsoringFutureReserves => "END_SPONSORING_FUTURE_RESERVES",
            Self::RevokeSponsorship(_) => "REVOKE_SPONSORSHIP",
            Self::Clawback(_) => "CLAWBACK",
            Self::ClawbackClaimableBalance(_) => "CLAWBACK_CLAIMABLE_BALANCE",
            Self::SetTrustLineFlags(_) => "SET_TRUST_LINE_FLAGS",
            Self::LiquidityPoolDeposit(_) => "LIQUIDITY_POOL_DEPOSIT",
            Self::LiquidityPoolWithdraw(_) => "LIQUIDITY_POOL_WITHDRAW",
            Self::InvokeHostFunction(_) => "INVOKE_HOST_FUNCTION",
        }
    }

    /// Re-checks the constructor-time invariants on a body that may have
    /// been assembled by hand.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            Self::SetOptions(op) => {
                if let Some(domain) = &op.home_domain {
                    check_length("home domain", domain.len(), MAX_HOME_DOMAIN_LENGTH)?;
                }
                Ok(())
            }
            Self::ManageData(op) => {
                check_length("data name", op.data_name.len(), MAX_DATA_LENGTH)?;
                if let Some(value) = &op.data_value {
                    check_length("data value", value.len(), MAX_DATA_LENGTH)?;
                }
                Ok(())
            }
            Self::ManageSellOffer(ManageSellOfferOp { price, .. })
            | Self::CreatePassiveSellOffer(CreatePassiveSellOfferOp { price, .. })
            | Self::ManageBuyOffer(ManageBuyOfferOp { price, .. }) => {
                Price::new(price.n, price.d).map(|_| ())
            }
            Self::LiquidityPoolDeposit(op) => {
                Price::new(op.min_price.n, op.min_price.d)?;
                Price::new(op.max_price.n, op.max_price.d).map(|_| ())
            }
            Self::PathPaymentStrictReceive(PathPaymentStrictReceiveOp { path, .. })
            | Self::PathPaymentStrictSend(PathPaymentStrictSendOp { path, .. }) => {
                check_length("payment path", path.len(), MAX_PATH_LENGTH)
            }
            Self::CreateClaimableBalance(op) => {
                check_length("claimants", op.claimants.len(), MAX_CLAIMANTS)?;
                op.claimants
                    .iter()
                    .try_for_each(|claimant| claimant.predicate.validate())
            }
            _ => Ok(()),
        }
    }
}

impl WriteXdr for OperationBody {
    fn write_xdr(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        w.write_discriminant(self.discriminant());
        match self {
            Self::CreateAccount(op) => op.write_xdr(w),
            Self::Payment(op) => op.write_xdr(w),
            Self::PathPaymentStrictReceive(op) => op.write_xdr(w),
            Self::ManageSellOffer(op) => op.write_xdr(w),
            Self::CreatePassiveSellOffer(op) => op.write_xdr(w),
            Self::SetOptions(op) => op.write_xdr(w),
            Self::ChangeTrust(op) => op.write_xdr(w),
            Self::AllowTrust(op) => op.write_xdr(w),
            Self::AccountMerge(destination) => destination.write_xdr(w),
            Self::Inflation | Self::EndSponsoringFutureReserves => Ok(()),
            Self::ManageData(op) => op.write_xdr(w),
            Self::BumpSequence(op) => op.write_xdr(w),
            Self::ManageBuyOffer(op) => op.write_xdr(w),
            Self::PathPaymentStrictSend(op) => op.write_xdr(w),
            Self::CreateClaimableBalance(op) => op.write_xdr(w),
            Self::ClaimClaimableBalance(op) => op.write_xdr(w),
            Self::BeginSponsoringFutureReserves(op) => op.write_xdr(w),
            Self::RevokeSponsorship(op) => op.write_xdr(w),
            Self::Clawback(op) => op.write_xdr(w),
            Self::ClawbackClaimableBalance(op) => op.write_xdr(w),
            Self::SetTrustLineFlags(op) => op.write_xdr(w),
            Self::LiquidityPoolDeposit(op) => op.write_xdr(w),
            Self::LiquidityPoolWithdraw(op) => op.write_xdr(w),
            Self::InvokeHostFunction(op) => op.write_xdr(w),
        }
    }
}

impl ReadXdr for OperationBody {
    fn read_xdr(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        Ok(match r.read_discriminant()? {
            0 => Self::CreateAccount(ReadXdr::read_xdr(r)?),
            1 => Self::Payment(ReadXdr::read_xdr(r)?),
            2 => Self::PathPaymentStrictReceive(ReadXdr::read_xdr(r)?),
            3 => Self::ManageSellOffer(ReadXdr::read_xdr(r)?),
            4 => Self::CreatePassiveSellOffer(ReadXdr::read_xdr(r)?),
            5 => Self::SetOptions(ReadXdr::read_xdr(r)?),
            6 => Self::ChangeTrust(ReadXdr::read_xdr(r)?),
            7 => Self::AllowTrust(ReadXdr::read_xdr(r)?),
            8 => Self::AccountMerge(ReadXdr::read_xdr(r)?),
            9 => Self::Inflation,
            10 => Self::ManageData(ReadXdr::read_xdr(r)?),
            11 => Self::BumpSequence(ReadXdr::read_xdr(r)?),
            12 => Self::ManageBuyOffer(ReadXdr::read_xdr(r)?),
            13 => Self::PathPaymentStrictSend(ReadXdr::read_xdr(r)?),
            14 => Self::CreateClaimableBalance(ReadXdr::read_xdr(r)?),
            15 => Self::ClaimClaimableBalance(ReadXdr::read_xdr(r)?),
            16 => Self::BeginSponsoringFutureReserves(ReadXdr::read_xdr(r)?),
            17 => Self::EndSponsoringFutureReserves,
            18 => Self::RevokeSponsorship(ReadXdr::read_xdr(r)?),
            19 => Self::Clawback(ReadXdr::read_xdr(r)?),
            20 => Self::ClawbackClaimableBalance(ReadXdr::read_xdr(r)?),
            21 => Self::SetTrustLineFlags(ReadXdr::read_xdr(r)?),
            22 => Self::LiquidityPoolDeposit(ReadXdr::read_xdr(r)?),
            23 => Self::LiquidityPoolWithdraw(ReadXdr::read_xdr(r)?),
            24 => Self::InvokeHostFunction(ReadXdr::read_xdr(r)?),
            other => return Err(r.unknown("OperationType", other)),
        })
    }
}

// ---------------------------------------------------------------------------
// Operation
// ---------------------------------------------------------------------------

/// One operation, optionally acting on behalf of an account other than the
/// transaction source.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Operation {
    pub source_account: Option<MuxedAccount>,
    pub body: OperationBody,
}

impl_xdr_struct!(Operation {
    source_account,
    body
});

impl Operation {
    pub fn new(body: OperationBody) -> Self {
        Self {
            source_account: None,
            body,
        }
    }

    pub fn with_source(mut self, source: MuxedAccount) -> Self {
        self.source_account = Some(source);
        self
    }

    pub fn create_account(destination: AccountId, starting_balance: i64) -> Self {
        Self::new(OperationBody::CreateAccount(CreateAccountOp {
            destination,
            starting_balance,
        }))
    }

    pub fn payment(destination: MuxedAccount, asset: Asset, amount: i64) -> Self {
        Self::new(OperationBody::Payment(PaymentOp {
            destination,
            asset,
            amount,
        }))
    }

    pub fn change_trust(line: ChangeTrustAsset, limit: i64) -> Self {
        Self::new(OperationBody::ChangeTrust(ChangeTrustOp { line, limit }))
    }

    pub fn manage_data(name: impl Into<String>, value: Option<Vec<u8>>) -> Result<Self, ValidationError> {
        Ok(Self::new(OperationBody::ManageData(ManageDataOp::new(name, value)?)))
    }

    pub fn account_merge(destination: MuxedAccount) -> Self {
        Self::new(OperationBody::AccountMerge(destination))
    }

    pub fn bump_sequence(bump_to: i64) -> Self {
        Self::new(OperationBody::BumpSequence(BumpSequenceOp { bump_to }))
    }

    pub fn create_claimable_balance(
        asset: Asset,
        amount: i64,
        claimants: Vec<Claimant>,
    ) -> Result<Self, ValidationError> {
        let body = OperationBody::CreateClaimableBalance(CreateClaimableBalanceOp {
            asset,
            amount,
            claimants,
        });
        body.validate()?;
        Ok(Self::new(body))
    }
}
