//! Account identifiers and signer keys.

use std::fmt;
use std::str::FromStr;

use crate::config::MAX_SIGNED_PAYLOAD_LENGTH;
use crate::crypto::strkey::{self, StrKey, StrKeyError};
use crate::xdr::{impl_xdr_struct, ReadXdr, WriteXdr, XdrError, XdrReader, XdrWriter};

const PUBLIC_KEY_TYPE_ED25519: i32 = 0;

const KEY_TYPE_ED25519: i32 = 0;
const KEY_TYPE_MUXED_ED25519: i32 = 0x100;

const SIGNER_KEY_TYPE_ED25519: i32 = 0;
const SIGNER_KEY_TYPE_PRE_AUTH_TX: i32 = 1;
const SIGNER_KEY_TYPE_HASH_X: i32 = 2;
const SIGNER_KEY_TYPE_ED25519_SIGNED_PAYLOAD: i32 = 3;

// ---------------------------------------------------------------------------
// AccountId
// ---------------------------------------------------------------------------

/// An account on the ledger: a bare ed25519 public key, written `G...`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccountId(pub [u8; 32]);

impl AccountId {
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&strkey::encode_account_id(&self.0))
    }
}

impl fmt::Debug for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccountId({})", self)
    }
}

impl FromStr for AccountId {
    type Err = StrKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        strkey::decode_account_id(s).map(Self)
    }
}

impl WriteXdr for AccountId {
    fn write_xdr(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        w.write_discriminant(PUBLIC_KEY_TYPE_ED25519);
        w.write_fixed(&self.0);
        Ok(())
    }
}

impl ReadXdr for AccountId {
    fn read_xdr(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        match r.read_discriminant()? {
            PUBLIC_KEY_TYPE_ED25519 => Ok(Self(r.read_fixed()?)),
            other => Err(r.unknown("PublicKeyType", other)),
        }
    }
}

// ---------------------------------------------------------------------------
// MuxedAccount
// ---------------------------------------------------------------------------

/// A transaction or operation source/destination: either a plain account
/// (`G...`) or an account multiplexed with a 64-bit id (`M...`).
///
/// The id exists only for off-chain bookkeeping. Signatures and balances
/// always belong to the underlying ed25519 key.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum MuxedAccount {
    Ed25519([u8; 32]),
    Muxed { id: u64, ed25519: [u8; 32] },
}

impl MuxedAccount {
    /// The base public key, ignoring any multiplexing id.
    pub fn ed25519(&self) -> [u8; 32] {
        match self {
            Self::Ed25519(key) | Self::Muxed { ed25519: key, .. } => *key,
        }
    }

    /// The ledger account behind this address.
    pub fn account_id(&self) -> AccountId {
        AccountId(self.ed25519())
    }

    pub fn id(&self) -> Option<u64> {
        match self {
            Self::Ed25519(_) => None,
            Self::Muxed { id, .. } => Some(*id),
        }
    }
}

impl From<AccountId> for MuxedAccount {
    fn from(account: AccountId) -> Self {
        Self::Ed25519(account.0)
    }
}

impl fmt::Display for MuxedAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ed25519(key) => f.write_str(&strkey::encode_account_id(key)),
            Self::Muxed { id, ed25519 } => {
                f.write_str(&strkey::encode_muxed_account(ed25519, *id))
            }
        }
    }
}

impl fmt::Debug for MuxedAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MuxedAccount({})", self)
    }
}

/// Accepts both `G...` and `M...` addresses.
impl FromStr for MuxedAccount {
    type Err = StrKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match StrKey::decode(s)? {
            StrKey::AccountId(key) => Ok(Self::Ed25519(key)),
            StrKey::MuxedAccount { ed25519, id } => Ok(Self::Muxed { id, ed25519 }),
            other => Err(StrKeyError::InvalidVersionByte(other.version() as u8)),
        }
    }
}

impl WriteXdr for MuxedAccount {
    fn write_xdr(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        match self {
            Self::Ed25519(key) => {
                w.write_discriminant(KEY_TYPE_ED25519);
                w.write_fixed(key);
            }
            Self::Muxed { id, ed25519 } => {
                w.write_discriminant(KEY_TYPE_MUXED_ED25519);
                w.write_u64(*id);
                w.write_fixed(ed25519);
            }
        }
        Ok(())
    }
}

impl ReadXdr for MuxedAccount {
    fn read_xdr(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        match r.read_discriminant()? {
            KEY_TYPE_ED25519 => Ok(Self::Ed25519(r.read_fixed()?)),
            KEY_TYPE_MUXED_ED25519 => {
                let id = r.read_u64()?;
                let ed25519 = r.read_fixed()?;
                Ok(Self::Muxed { id, ed25519 })
            }
            other => Err(r.unknown("MuxedAccount", other)),
        }
    }
}

// ---------------------------------------------------------------------------
// SignerKey
// ---------------------------------------------------------------------------

/// Something that can authorize a transaction for an account.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum SignerKey {
    /// An ed25519 public key (`G...`).
    Ed25519([u8; 32]),
    /// The hash of one specific transaction (`T...`).
    PreAuthTx([u8; 32]),
    /// SHA-256 of a secret preimage (`X...`).
    HashX([u8; 32]),
    /// An ed25519 key that must sign an agreed payload (`P...`).
    Ed25519SignedPayload { ed25519: [u8; 32], payload: Vec<u8> },
}

impl SignerKey {
    fn to_strkey(&self) -> StrKey {
        match self {
            Self::Ed25519(key) => StrKey::AccountId(*key),
            Self::PreAuthTx(hash) => StrKey::PreAuthTx(*hash),
            Self::HashX(hash) => StrKey::HashX(*hash),
            Self::Ed25519SignedPayload { ed25519, payload } => StrKey::SignedPayload {
                ed25519: *ed25519,
                payload: payload.clone(),
            },
        }
    }
}

impl fmt::Display for SignerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_strkey().encode())
    }
}

impl fmt::Debug for SignerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SignerKey({})", self)
    }
}

impl FromStr for SignerKey {
    type Err = StrKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match StrKey::decode(s)? {
            StrKey::AccountId(key) => Ok(Self::Ed25519(key)),
            StrKey::PreAuthTx(hash) => Ok(Self::PreAuthTx(hash)),
            StrKey::HashX(hash) => Ok(Self::HashX(hash)),
            StrKey::SignedPayload { ed25519, payload } => {
                Ok(Self::Ed25519SignedPayload { ed25519, payload })
            }
            other => Err(StrKeyError::InvalidVersionByte(other.version() as u8)),
        }
    }
}

impl WriteXdr for SignerKey {
    fn write_xdr(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        match self {
            Self::Ed25519(key) => {
                w.write_discriminant(SIGNER_KEY_TYPE_ED25519);
                w.write_fixed(key);
            }
            Self::PreAuthTx(hash) => {
                w.write_discriminant(SIGNER_KEY_TYPE_PRE_AUTH_TX);
                w.write_fixed(hash);
            }
            Self::HashX(hash) => {
                w.write_discriminant(SIGNER_KEY_TYPE_HASH_X);
                w.write_fixed(hash);
            }
            Self::Ed25519SignedPayload { ed25519, payload } => {
                w.write_discriminant(SIGNER_KEY_TYPE_ED25519_SIGNED_PAYLOAD);
                w.write_fixed(ed25519);
                w.write_var_opaque(payload, MAX_SIGNED_PAYLOAD_LENGTH)?;
            }
        }
        Ok(())
    }
}

impl ReadXdr for SignerKey {
    fn read_xdr(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        match r.read_discriminant()? {
            SIGNER_KEY_TYPE_ED25519 => Ok(Self::Ed25519(r.read_fixed()?)),
            SIGNER_KEY_TYPE_PRE_AUTH_TX => Ok(Self::PreAuthTx(r.read_fixed()?)),
            SIGNER_KEY_TYPE_HASH_X => Ok(Self::HashX(r.read_fixed()?)),
            SIGNER_KEY_TYPE_ED25519_SIGNED_PAYLOAD => {
                let ed25519 = r.read_fixed()?;
                let payload = r.read_var_opaque(MAX_SIGNED_PAYLOAD_LENGTH)?;
                Ok(Self::Ed25519SignedPayload { ed25519, payload })
            }
            other => Err(r.unknown("SignerKey", other)),
        }
    }
}

/// A signer entry as set by `SET_OPTIONS`. Weight 0 removes the signer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Signer {
    pub key: SignerKey,
    pub weight: u32,
}

impl_xdr_struct!(Signer { key, weight });

#[cfg(test)]
mod tests {
    use super::*;

    const ACCOUNT: &str = "GBAF6NXN3DHSF357QBZLTBNWUTABKUODJXJYYE32ZDKA2QBM2H33IK6O";
    const MUXED: &str =
        "MA7QYNF7SOWQ3GLR2BGMZEHXAVIRZA4KVWLTJJFC7MGXUA74P7UJVAAAAAAAAAAAAAJLK";

    #[test]
    fn account_id_text_round_trips() {
        let account: AccountId = ACCOUNT.parse().unwrap();
        assert_eq!(
            hex::encode(account.0),
            "405f36edd8cf22efbf8072b985b6a4c01551c34dd38c137ac8d40d402cd1f7b4"
        );
        assert_eq!(account.to_string(), ACCOUNT);
        assert!("SAAACAQDAQCQMBYIBEFAWDANBYHRAEISCMKBKFQXDAMRUGY4DUPB6NKI"
            .parse::<AccountId>()
            .is_err());
    }

    #[test]
    fn account_id_wire_layout() {
        let account: AccountId = ACCOUNT.parse().unwrap();
        let bytes = account.to_xdr().unwrap();
        assert_eq!(bytes.len(), 36);
        assert_eq!(&bytes[..4], &[0, 0, 0, 0]);
        assert_eq!(AccountId::from_xdr(&bytes).unwrap(), account);

        let mut bad = bytes.clone();
        bad[3] = 1;
        assert!(matches!(
            AccountId::from_xdr(&bad),
            Err(XdrError::UnknownDiscriminant {
                type_name: "PublicKeyType",
                value: 1,
                offset: 0
            })
        ));
    }

    #[test]
    fn muxed_account_parses_g_and_m_forms() {
        let plain: MuxedAccount = ACCOUNT.parse().unwrap();
        assert_eq!(plain.id(), None);
        assert_eq!(plain.to_string(), ACCOUNT);

        let muxed: MuxedAccount = MUXED.parse().unwrap();
        assert_eq!(muxed.id(), Some(9223372036854775808));
        assert_eq!(muxed.to_string(), MUXED);
    }

    #[test]
    fn muxed_account_wire_layout() {
        let muxed = MuxedAccount::Muxed {
            id: 42,
            ed25519: [7u8; 32],
        };
        let bytes = muxed.to_xdr().unwrap();
        assert_eq!(&bytes[..4], &[0, 0, 1, 0]);
        assert_eq!(&bytes[4..12], &42u64.to_be_bytes());
        assert_eq!(bytes.len(), 44);
        assert_eq!(MuxedAccount::from_xdr(&bytes).unwrap(), muxed);
        assert_eq!(muxed.account_id(), AccountId([7u8; 32]));
    }

    #[test]
    fn every_signer_key_round_trips() {
        let keys = vec![
            SignerKey::Ed25519([1u8; 32]),
            SignerKey::PreAuthTx([2u8; 32]),
            SignerKey::HashX([3u8; 32]),
            SignerKey::Ed25519SignedPayload {
                ed25519: [4u8; 32],
                payload: vec![9, 8, 7, 6, 5],
            },
        ];
        for key in keys {
            let bytes = key.to_xdr().unwrap();
            assert_eq!(SignerKey::from_xdr(&bytes).unwrap(), key);
            let text = key.to_string();
            assert_eq!(text.parse::<SignerKey>().unwrap(), key);
        }
    }

    #[test]
    fn signed_payload_over_64_bytes_rejected() {
        let key = SignerKey::Ed25519SignedPayload {
            ed25519: [0u8; 32],
            payload: vec![0u8; 65],
        };
        assert!(matches!(key.to_xdr(), Err(XdrError::LengthExceedsMax { .. })));
    }

    #[test]
    fn muxed_account_rejects_secret_seed() {
        assert!(matches!(
            "SAAACAQDAQCQMBYIBEFAWDANBYHRAEISCMKBKFQXDAMRUGY4DUPB6NKI".parse::<MuxedAccount>(),
            Err(StrKeyError::InvalidVersionByte(_))
        ));
    }
}
