//! The operation table.

use super::writer::join;
use super::{read_array, write_array, FromTxRep, ToTxRep, TxRepError, TxRepSource, TxRepWriter};
use crate::config::{
    MAX_CLAIMANTS, MAX_DATA_LENGTH, MAX_HOME_DOMAIN_LENGTH, MAX_PATH_LENGTH, UNBOUNDED,
};
use crate::types::operation::{
    AllowTrustOp, BeginSponsoringFutureReservesOp, BumpSequenceOp, ChangeTrustOp,
    ClaimClaimableBalanceOp, ClawbackClaimableBalanceOp, ClawbackOp, CreateAccountOp,
    CreateClaimableBalanceOp, CreatePassiveSellOfferOp, InvokeHostFunctionOp,
    LiquidityPoolDepositOp, LiquidityPoolWithdrawOp, ManageBuyOfferOp, ManageDataOp,
    ManageSellOfferOp, PathPaymentStrictReceiveOp, PathPaymentStrictSendOp, PaymentOp,
    RevokeSponsorshipOp, SetOptionsOp, SetTrustLineFlagsOp,
};
use crate::types::{
    ChangeTrustAsset, ClaimableBalanceId, LedgerKey, Operation, OperationBody, Price,
};

/// Reads `path.name` through its `FromStr` text.
macro_rules! field {
    ($src:expr, $path:expr, $name:literal) => {
        $src.value(&join($path, $name))?
    };
}

impl ToTxRep for CreateAccountOp {
    fn write_txrep(&self, w: &mut TxRepWriter, path: &str) {
        self.destination.write_txrep(w, &join(path, "destination"));
        w.amount(&join(path, "startingBalance"), self.starting_balance);
    }
}

impl FromTxRep for CreateAccountOp {
    fn read_txrep(src: &TxRepSource, path: &str) -> Result<Self, TxRepError> {
        Ok(Self {
            destination: field!(src, path, "destination"),
            starting_balance: field!(src, path, "startingBalance"),
        })
    }
}

impl ToTxRep for PaymentOp {
    fn write_txrep(&self, w: &mut TxRepWriter, path: &str) {
        self.destination.write_txrep(w, &join(path, "destination"));
        self.asset.write_txrep(w, &join(path, "asset"));
        w.amount(&join(path, "amount"), self.amount);
    }
}

impl FromTxRep for PaymentOp {
    fn read_txrep(src: &TxRepSource, path: &str) -> Result<Self, TxRepError> {
        Ok(Self {
            destination: field!(src, path, "destination"),
            asset: field!(src, path, "asset"),
            amount: field!(src, path, "amount"),
        })
    }
}

impl ToTxRep for PathPaymentStrictReceiveOp {
    fn write_txrep(&self, w: &mut TxRepWriter, path: &str) {
        self.send_asset.write_txrep(w, &join(path, "sendAsset"));
        w.amount(&join(path, "sendMax"), self.send_max);
        self.destination.write_txrep(w, &join(path, "destination"));
        self.dest_asset.write_txrep(w, &join(path, "destAsset"));
        w.amount(&join(path, "destAmount"), self.dest_amount);
        write_array(w, &join(path, "path"), &self.path);
    }
}

impl FromTxRep for PathPaymentStrictReceiveOp {
    fn read_txrep(src: &TxRepSource, path: &str) -> Result<Self, TxRepError> {
        Ok(Self {
            send_asset: field!(src, path, "sendAsset"),
            send_max: field!(src, path, "sendMax"),
            destination: field!(src, path, "destination"),
            dest_asset: field!(src, path, "destAsset"),
            dest_amount: field!(src, path, "destAmount"),
            path: read_array(src, &join(path, "path"), MAX_PATH_LENGTH)?,
        })
    }
}

impl ToTxRep for ManageSellOfferOp {
    fn write_txrep(&self, w: &mut TxRepWriter, path: &str) {
        self.selling.write_txrep(w, &join(path, "selling"));
        self.buying.write_txrep(w, &join(path, "buying"));
        w.amount(&join(path, "amount"), self.amount);
        self.price.write_txrep(w, &join(path, "price"));
        w.field(&join(path, "offerID"), self.offer_id);
    }
}

impl FromTxRep for ManageSellOfferOp {
    fn read_txrep(src: &TxRepSource, path: &str) -> Result<Self, TxRepError> {
        Ok(Self {
            selling: field!(src, path, "selling"),
            buying: field!(src, path, "buying"),
            amount: field!(src, path, "amount"),
            price: Price::read_txrep(src, &join(path, "price"))?,
            offer_id: field!(src, path, "offerID"),
        })
    }
}

impl ToTxRep for CreatePassiveSellOfferOp {
    fn write_txrep(&self, w: &mut TxRepWriter, path: &str) {
        self.selling.write_txrep(w, &join(path, "selling"));
        self.buying.write_txrep(w, &join(path, "buying"));
        w.amount(&join(path, "amount"), self.amount);
        self.price.write_txrep(w, &join(path, "price"));
    }
}

impl FromTxRep for CreatePassiveSellOfferOp {
    fn read_txrep(src: &TxRepSource, path: &str) -> Result<Self, TxRepError> {
        Ok(Self {
            selling: field!(src, path, "selling"),
            buying: field!(src, path, "buying"),
            amount: field!(src, path, "amount"),
            price: Price::read_txrep(src, &join(path, "price"))?,
        })
    }
}

impl ToTxRep for SetOptionsOp {
    fn write_txrep(&self, w: &mut TxRepWriter, path: &str) {
        self.inflation_dest.write_txrep(w, &join(path, "inflationDest"));
        self.clear_flags.write_txrep(w, &join(path, "clearFlags"));
        self.set_flags.write_txrep(w, &join(path, "setFlags"));
        self.master_weight.write_txrep(w, &join(path, "masterWeight"));
        self.low_threshold.write_txrep(w, &join(path, "lowThreshold"));
        self.med_threshold.write_txrep(w, &join(path, "medThreshold"));
        self.high_threshold.write_txrep(w, &join(path, "highThreshold"));
        let home_domain = join(path, "homeDomain");
        w.field(&join(&home_domain, "_present"), self.home_domain.is_some());
        if let Some(domain) = &self.home_domain {
            w.string(&home_domain, domain);
        }
        self.signer.write_txrep(w, &join(path, "signer"));
    }
}

impl FromTxRep for SetOptionsOp {
    fn read_txrep(src: &TxRepSource, path: &str) -> Result<Self, TxRepError> {
        let home_domain = join(path, "homeDomain");
        Ok(Self {
            inflation_dest: FromTxRep::read_txrep(src, &join(path, "inflationDest"))?,
            clear_flags: FromTxRep::read_txrep(src, &join(path, "clearFlags"))?,
            set_flags: FromTxRep::read_txrep(src, &join(path, "setFlags"))?,
            master_weight: FromTxRep::read_txrep(src, &join(path, "masterWeight"))?,
            low_threshold: FromTxRep::read_txrep(src, &join(path, "lowThreshold"))?,
            med_threshold: FromTxRep::read_txrep(src, &join(path, "medThreshold"))?,
            high_threshold: FromTxRep::read_txrep(src, &join(path, "highThreshold"))?,
            home_domain: if src.present(&home_domain)? {
                Some(src.string(&home_domain, MAX_HOME_DOMAIN_LENGTH)?)
            } else {
                None
            },
            signer: FromTxRep::read_txrep(src, &join(path, "signer"))?,
        })
    }
}

impl ToTxRep for ChangeTrustOp {
    fn write_txrep(&self, w: &mut TxRepWriter, path: &str) {
        self.line.write_txrep(w, &join(path, "line"));
        w.amount(&join(path, "limit"), self.limit);
    }
}

impl FromTxRep for ChangeTrustOp {
    fn read_txrep(src: &TxRepSource, path: &str) -> Result<Self, TxRepError> {
        Ok(Self {
            line: ChangeTrustAsset::read_txrep(src, &join(path, "line"))?,
            limit: field!(src, path, "limit"),
        })
    }
}

impl ToTxRep for AllowTrustOp {
    fn write_txrep(&self, w: &mut TxRepWriter, path: &str) {
        self.trustor.write_txrep(w, &join(path, "trustor"));
        self.asset.write_txrep(w, &join(path, "asset"));
        w.field(&join(path, "authorize"), self.authorize);
    }
}

impl FromTxRep for AllowTrustOp {
    fn read_txrep(src: &TxRepSource, path: &str) -> Result<Self, TxRepError> {
        Ok(Self {
            trustor: field!(src, path, "trustor"),
            asset: field!(src, path, "asset"),
            authorize: field!(src, path, "authorize"),
        })
    }
}

impl ToTxRep for ManageDataOp {
    fn write_txrep(&self, w: &mut TxRepWriter, path: &str) {
        w.string(&join(path, "dataName"), &self.data_name);
        let value = join(path, "dataValue");
        w.field(&join(&value, "_present"), self.data_value.is_some());
        if let Some(data) = &self.data_value {
            w.hex(&value, data);
        }
    }
}

impl FromTxRep for ManageDataOp {
    fn read_txrep(src: &TxRepSource, path: &str) -> Result<Self, TxRepError> {
        let value = join(path, "dataValue");
        Ok(Self {
            data_name: src.string(&join(path, "dataName"), MAX_DATA_LENGTH)?,
            data_value: if src.present(&value)? {
                Some(src.hex(&value, MAX_DATA_LENGTH)?)
            } else {
                None
            },
        })
    }
}

impl ToTxRep for BumpSequenceOp {
    fn write_txrep(&self, w: &mut TxRepWriter, path: &str) {
        w.field(&join(path, "bumpTo"), self.bump_to);
    }
}

impl FromTxRep for BumpSequenceOp {
    fn read_txrep(src: &TxRepSource, path: &str) -> Result<Self, TxRepError> {
        Ok(Self {
            bump_to: field!(src, path, "bumpTo"),
        })
    }
}

impl ToTxRep for ManageBuyOfferOp {
    fn write_txrep(&self, w: &mut TxRepWriter, path: &str) {
        self.selling.write_txrep(w, &join(path, "selling"));
        self.buying.write_txrep(w, &join(path, "buying"));
        w.amount(&join(path, "buyAmount"), self.buy_amount);
        self.price.write_txrep(w, &join(path, "price"));
        w.field(&join(path, "offerID"), self.offer_id);
    }
}

impl FromTxRep for ManageBuyOfferOp {
    fn read_txrep(src: &TxRepSource, path: &str) -> Result<Self, TxRepError> {
        Ok(Self {
            selling: field!(src, path, "selling"),
            buying: field!(src, path, "buying"),
            buy_amount: field!(src, path, "buyAmount"),
            price: Price::read_txrep(src, &join(path, "price"))?,
            offer_id: field!(src, path, "offerID"),
        })
    }
}

impl ToTxRep for PathPaymentStrictSendOp {
    fn write_txrep(&self, w: &mut TxRepWriter, path: &str) {
        self.send_asset.write_txrep(w, &join(path, "sendAsset"));
        w.amount(&join(path, "sendAmount"), self.send_amount);
        self.destination.write_txrep(w, &join(path, "destination"));
        self.dest_asset.write_txrep(w, &join(path, "destAsset"));
        w.amount(&join(path, "destMin"), self.dest_min);
        write_array(w, &join(path, "path"), &self.path);
    }
}

impl FromTxRep for PathPaymentStrictSendOp {
    fn read_txrep(src: &TxRepSource, path: &str) -> Result<Self, TxRepError> {
        Ok(Self {
            send_asset: field!(src, path, "sendAsset"),
            send_amount: field!(src, path, "sendAmount"),
            destination: field!(src, path, "destination"),
            dest_asset: field!(src, path, "destAsset"),
            dest_min: field!(src, path, "destMin"),
            path: read_array(src, &join(path, "path"), MAX_PATH_LENGTH)?,
        })
    }
}

impl ToTxRep for CreateClaimableBalanceOp {
    fn write_txrep(&self, w: &mut TxRepWriter, path: &str) {
        self.asset.write_txrep(w, &join(path, "asset"));
        w.amount(&join(path, "amount"), self.amount);
        write_array(w, &join(path, "claimants"), &self.claimants);
    }
}

impl FromTxRep for CreateClaimableBalanceOp {
    fn read_txrep(src: &TxRepSource, path: &str) -> Result<Self, TxRepError> {
        Ok(Self {
            asset: field!(src, path, "asset"),
            amount: field!(src, path, "amount"),
            claimants: read_array(src, &join(path, "claimants"), MAX_CLAIMANTS)?,
        })
    }
}

/// `ClaimClaimableBalanceOp` and `ClawbackClaimableBalanceOp` are both
/// just a balance id.
macro_rules! impl_balance_id_op {
    ($($ty:ident),*) => {
        $(
            impl ToTxRep for $ty {
                fn write_txrep(&self, w: &mut TxRepWriter, path: &str) {
                    self.balance_id.write_txrep(w, &join(path, "balanceID"));
                }
            }

            impl FromTxRep for $ty {
                fn read_txrep(src: &TxRepSource, path: &str) -> Result<Self, TxRepError> {
                    Ok(Self {
                        balance_id: ClaimableBalanceId::read_txrep(src, &join(path, "balanceID"))?,
                    })
                }
            }
        )*
    };
}

impl_balance_id_op!(ClaimClaimableBalanceOp, ClawbackClaimableBalanceOp);

impl ToTxRep for BeginSponsoringFutureReservesOp {
    fn write_txrep(&self, w: &mut TxRepWriter, path: &str) {
        self.sponsored_id.write_txrep(w, &join(path, "sponsoredID"));
    }
}

impl FromTxRep for BeginSponsoringFutureReservesOp {
    fn read_txrep(src: &TxRepSource, path: &str) -> Result<Self, TxRepError> {
        Ok(Self {
            sponsored_id: field!(src, path, "sponsoredID"),
        })
    }
}

impl ToTxRep for RevokeSponsorshipOp {
    fn write_txrep(&self, w: &mut TxRepWriter, path: &str) {
        match self {
            Self::LedgerEntry(key) => {
                w.union_arm(path, "REVOKE_SPONSORSHIP_LEDGER_ENTRY");
                key.write_txrep(w, &join(path, "ledgerKey"));
            }
            Self::Signer {
                account_id,
                signer_key,
            } => {
                w.union_arm(path, "REVOKE_SPONSORSHIP_SIGNER");
                account_id.write_txrep(w, &join(path, "signer.accountID"));
                signer_key.write_txrep(w, &join(path, "signer.signerKey"));
            }
        }
    }
}

impl FromTxRep for RevokeSponsorshipOp {
    fn read_txrep(src: &TxRepSource, path: &str) -> Result<Self, TxRepError> {
        match src.arm(path)? {
            "REVOKE_SPONSORSHIP_LEDGER_ENTRY" => Ok(Self::LedgerEntry(LedgerKey::read_txrep(
                src,
                &join(path, "ledgerKey"),
            )?)),
            "REVOKE_SPONSORSHIP_SIGNER" => Ok(Self::Signer {
                account_id: field!(src, path, "signer.accountID"),
                signer_key: field!(src, path, "signer.signerKey"),
            }),
            other => Err(TxRepError::unknown_arm(&join(path, "type"), other)),
        }
    }
}

impl ToTxRep for ClawbackOp {
    fn write_txrep(&self, w: &mut TxRepWriter, path: &str) {
        self.asset.write_txrep(w, &join(path, "asset"));
        self.from.write_txrep(w, &join(path, "from"));
        w.amount(&join(path, "amount"), self.amount);
    }
}

impl FromTxRep for ClawbackOp {
    fn read_txrep(src: &TxRepSource, path: &str) -> Result<Self, TxRepError> {
        Ok(Self {
            asset: field!(src, path, "asset"),
            from: field!(src, path, "from"),
            amount: field!(src, path, "amount"),
        })
    }
}

impl ToTxRep for SetTrustLineFlagsOp {
    fn write_txrep(&self, w: &mut TxRepWriter, path: &str) {
        self.trustor.write_txrep(w, &join(path, "trustor"));
        self.asset.write_txrep(w, &join(path, "asset"));
        w.field(&join(path, "clearFlags"), self.clear_flags);
        w.field(&join(path, "setFlags"), self.set_flags);
    }
}

impl FromTxRep for SetTrustLineFlagsOp {
    fn read_txrep(src: &TxRepSource, path: &str) -> Result<Self, TxRepError> {
        Ok(Self {
            trustor: field!(src, path, "trustor"),
            asset: field!(src, path, "asset"),
            clear_flags: field!(src, path, "clearFlags"),
            set_flags: field!(src, path, "setFlags"),
        })
    }
}

impl ToTxRep for LiquidityPoolDepositOp {
    fn write_txrep(&self, w: &mut TxRepWriter, path: &str) {
        w.hex(&join(path, "liquidityPoolID"), &self.liquidity_pool_id);
        w.amount(&join(path, "maxAmountA"), self.max_amount_a);
        w.amount(&join(path, "maxAmountB"), self.max_amount_b);
        self.min_price.write_txrep(w, &join(path, "minPrice"));
        self.max_price.write_txrep(w, &join(path, "maxPrice"));
    }
}

impl FromTxRep for LiquidityPoolDepositOp {
    fn read_txrep(src: &TxRepSource, path: &str) -> Result<Self, TxRepError> {
        Ok(Self {
            liquidity_pool_id: src.hex_fixed(&join(path, "liquidityPoolID"))?,
            max_amount_a: field!(src, path, "maxAmountA"),
            max_amount_b: field!(src, path, "maxAmountB"),
            min_price: Price::read_txrep(src, &join(path, "minPrice"))?,
            max_price: Price::read_txrep(src, &join(path, "maxPrice"))?,
        })
    }
}

impl ToTxRep for LiquidityPoolWithdrawOp {
    fn write_txrep(&self, w: &mut TxRepWriter, path: &str) {
        w.hex(&join(path, "liquidityPoolID"), &self.liquidity_pool_id);
        w.amount(&join(path, "amount"), self.amount);
        w.amount(&join(path, "minAmountA"), self.min_amount_a);
        w.amount(&join(path, "minAmountB"), self.min_amount_b);
    }
}

impl FromTxRep for LiquidityPoolWithdrawOp {
    fn read_txrep(src: &TxRepSource, path: &str) -> Result<Self, TxRepError> {
        Ok(Self {
            liquidity_pool_id: src.hex_fixed(&join(path, "liquidityPoolID"))?,
            amount: field!(src, path, "amount"),
            min_amount_a: field!(src, path, "minAmountA"),
            min_amount_b: field!(src, path, "minAmountB"),
        })
    }
}

impl ToTxRep for InvokeHostFunctionOp {
    fn write_txrep(&self, w: &mut TxRepWriter, path: &str) {
        self.host_function.write_txrep(w, &join(path, "hostFunction"));
        write_array(w, &join(path, "auth"), &self.auth);
    }
}

impl FromTxRep for InvokeHostFunctionOp {
    fn read_txrep(src: &TxRepSource, path: &str) -> Result<Self, TxRepError> {
        Ok(Self {
            host_function: FromTxRep::read_txrep(src, &join(path, "hostFunction"))?,
            auth: read_array(src, &join(path, "auth"), UNBOUNDED)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Operation body union
// ---------------------------------------------------------------------------

/// The TxRep name of the field holding each arm's payload.
fn arm_field(body: &OperationBody) -> &'static str {
    match body {
        OperationBody::CreateAccount(_) => "createAccountOp",
        OperationBody::Payment(_) => "paymentOp",
        OperationBody::PathPaymentStrictReceive(_) => "pathPaymentStrictReceiveOp",
        OperationBody::ManageSellOffer(_) => "manageSellOfferOp",
        OperationBody::CreatePassiveSellOffer(_) => "createPassiveSellOfferOp",
        OperationBody::SetOptions(_) => "setOptionsOp",
        OperationBody::ChangeTrust(_) => "changeTrustOp",
        OperationBody::AllowTrust(_) => "allowTrustOp",
        OperationBody::AccountMerge(_) => "destination",
        OperationBody::ManageData(_) => "manageDataOp",
        OperationBody::BumpSequence(_) => "bumpSequenceOp",
        OperationBody::ManageBuyOffer(_) => "manageBuyOfferOp",
        OperationBody::PathPaymentStrictSend(_) => "pathPaymentStrictSendOp",
        OperationBody::CreateClaimableBalance(_) => "createClaimableBalanceOp",
        OperationBody::ClaimClaimableBalance(_) => "claimClaimableBalanceOp",
        OperationBody::BeginSponsoringFutureReserves(_) => "beginSponsoringFutureReservesOp",
        OperationBody::RevokeSponsorship(_) => "revokeSponsorshipOp",
        OperationBody::Clawback(_) => "clawbackOp",
        OperationBody::ClawbackClaimableBalance(_) => "clawbackClaimableBalanceOp",
        OperationBody::SetTrustLineFlags(_) => "setTrustLineFlagsOp",
        OperationBody::LiquidityPoolDeposit(_) => "liquidityPoolDepositOp",
        OperationBody::LiquidityPoolWithdraw(_) => "liquidityPoolWithdrawOp",
        OperationBody::InvokeHostFunction(_) => "invokeHostFunctionOp",
        OperationBody::Inflation | OperationBody::EndSponsoringFutureReserves => "",
    }
}

impl ToTxRep for OperationBody {
    fn write_txrep(&self, w: &mut TxRepWriter, path: &str) {
        w.union_arm(path, self.name());
        let arm = join(path, arm_field(self));
        match self {
            Self::CreateAccount(op) => op.write_txrep(w, &arm),
            Self::Payment(op) => op.write_txrep(w, &arm),
            Self::PathPaymentStrictReceive(op) => op.write_txrep(w, &arm),
            Self::ManageSellOffer(op) => op.write_txrep(w, &arm),
            Self::CreatePassiveSellOffer(op) => op.write_txrep(w, &arm),
            Self::SetOptions(op) => op.write_txrep(w, &arm),
            Self::ChangeTrust(op) => op.write_txrep(w, &arm),
            Self::AllowTrust(op) => op.write_txrep(w, &arm),
            Self::AccountMerge(destination) => destination.write_txrep(w, &arm),
            Self::Inflation | Self::EndSponsoringFutureReserves => {}
            Self::ManageData(op) => op.write_txrep(w, &arm),
            Self::BumpSequence(op) => op.write_txrep(w, &arm),
            Self::ManageBuyOffer(op) => op.write_txrep(w, &arm),
            Self::PathPaymentStrictSend(op) => op.write_txrep(w, &arm),
            Self::CreateClaimableBalance(op) => op.write_txrep(w, &arm),
            Self::ClaimClaimableBalance(op) => op.write_txrep(w, &arm),
            Self::BeginSponsoringFutureReserves(op) => op.write_txrep(w, &arm),
            Self::RevokeSponsorship(op) => op.write_txrep(w, &arm),
            Self::Clawback(op) => op.write_txrep(w, &arm),
            Self::ClawbackClaimableBalance(op) => op.write_txrep(w, &arm),
            Self::SetTrustLineFlags(op) => op.write_txrep(w, &arm),
            Self::LiquidityPoolDeposit(op) => op.write_txrep(w, &arm),
            Self::LiquidityPoolWithdraw(op) => op.write_txrep(w, &arm),
            Self::InvokeHostFunction(op) => op.write_txrep(w, &arm),
        }
    }
}

impl FromTxRep for OperationBody {
    fn read_txrep(src: &TxRepSource, path: &str) -> Result<Self, TxRepError> {
        let arm = |name: &str| join(path, name);
        Ok(match src.arm(path)? {
            "CREATE_ACCOUNT" => Self::CreateAccount(FromTxRep::read_txrep(src, &arm("createAccountOp"))?),
            "PAYMENT" => Self::Payment(FromTxRep::read_txrep(src, &arm("paymentOp"))?),
            "PATH_PAYMENT_STRICT_RECEIVE" => Self::PathPaymentStrictReceive(FromTxRep::read_txrep(
                src,
                &arm("pathPaymentStrictReceiveOp"),
            )?),
            "MANAGE_SELL_OFFER" => {
                Self::ManageSellOffer(FromTxRep::read_txrep(src, &arm("manageSellOfferOp"))?)
            }
            "CREATE_PASSIVE_SELL_OFFER" => Self::CreatePassiveSellOffer(FromTxRep::read_txrep(
                src,
                &arm("createPassiveSellOfferOp"),
            )?),
            "SET_OPTIONS" => Self::SetOptions(FromTxRep::read_txrep(src, &arm("setOptionsOp"))?),
            "CHANGE_TRUST" => Self::ChangeTrust(FromTxRep::read_txrep(src, &arm("changeTrustOp"))?),
            "ALLOW_TRUST" => Self::AllowTrust(FromTxRep::read_txrep(src, &arm("allowTrustOp"))?),
            "ACCOUNT_MERGE" => Self::AccountMerge(src.value(&arm("destination"))?),
            "INFLATION" => Self::Inflation,
            "MANAGE_DATA" => Self::ManageData(FromTxRep::read_txrep(src, &arm("manageDataOp"))?),
            "BUMP_SEQUENCE" => {
                Self::BumpSequence(FromTxRep::read_txrep(src, &arm("bumpSequenceOp"))?)
            }
            "MANAGE_BUY_OFFER" => {
                Self::ManageBuyOffer(FromTxRep::read_txrep(src, &arm("manageBuyOfferOp"))?)
            }
            "PATH_PAYMENT_STRICT_SEND" => Self::PathPaymentStrictSend(FromTxRep::read_txrep(
                src,
                &arm("pathPaymentStrictSendOp"),
            )?),
            "CREATE_CLAIMABLE_BALANCE" => Self::CreateClaimableBalance(FromTxRep::read_txrep(
                src,
                &arm("createClaimableBalanceOp"),
            )?),
            "CLAIM_CLAIMABLE_BALANCE" => Self::ClaimClaimableBalance(FromTxRep::read_txrep(
                src,
                &arm("claimClaimableBalanceOp"),
            )?),
            "BEGIN_SPONSORING_FUTURE_RESERVES" => Self::BeginSponsoringFutureReserves(
                FromTxRep::read_txrep(src, &arm("beginSponsoringFutureReservesOp"))?,
            ),
            "END_SPONSORING_FUTURE_RESERVES" => Self::EndSponsoringFutureReserves,
            "REVOKE_SPONSORSHIP" => {
                Self::RevokeSponsorship(FromTxRep::read_txrep(src, &arm("revokeSponsorshipOp"))?)
            }
            "CLAWBACK" => Self::Clawback(FromTxRep::read_txrep(src, &arm("clawbackOp"))?),
            "CLAWBACK_CLAIMABLE_BALANCE" => Self::ClawbackClaimableBalance(FromTxRep::read_txrep(
                src,
                &arm("clawbackClaimableBalanceOp"),
            )?),
            "SET_TRUST_LINE_FLAGS" => {
                Self::SetTrustLineFlags(FromTxRep::read_txrep(src, &arm("setTrustLineFlagsOp"))?)
            }
            "LIQUIDITY_POOL_DEPOSIT" => Self::LiquidityPoolDeposit(FromTxRep::read_txrep(
                src,
                &arm("liquidityPoolDepositOp"),
            )?),
            "LIQUIDITY_POOL_WITHDRAW" => Self::LiquidityPoolWithdraw(FromTxRep::read_txrep(
                src,
                &arm("liquidityPoolWithdrawOp"),
            )?),
            "INVOKE_HOST_FUNCTION" => Self::InvokeHostFunction(FromTxRep::read_txrep(
                src,
                &arm("invokeHostFunctionOp"),
            )?),
            other => return Err(TxRepError::unknown_arm(&arm("type"), other)),
        })
    }
}

impl ToTxRep for Operation {
    fn write_txrep(&self, w: &mut TxRepWriter, path: &str) {
        self.source_account.write_txrep(w, &join(path, "sourceAccount"));
        self.body.write_txrep(w, &join(path, "body"));
    }
}

impl FromTxRep for Operation {
    fn read_txrep(src: &TxRepSource, path: &str) -> Result<Self, TxRepError> {
        Ok(Self {
            source_account: FromTxRep::read_txrep(src, &join(path, "sourceAccount"))?,
            body: OperationBody::read_txrep(src, &join(path, "body"))?,
        })
    }
}
