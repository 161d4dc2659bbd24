//! # Key Management
//!
//! Ed25519 key pairs for accounts on the network.
//!
//! An account is nothing more than an ed25519 public key; its `G...` strkey
//! is what users share and what appears in every `AccountId` on the wire.
//! The secret half travels as an `S...` seed.
//!
//! ## Security considerations
//!
//! - Private keys are zeroized on drop (thanks, ed25519-dalek).
//! - Generation uses the OS RNG (`OsRng`).
//! - Key bytes are never logged, and `Debug` only ever prints the public key.

use ed25519_dalek::{
    Signature as DalekSignature, Signer, SigningKey, Verifier, VerifyingKey, SECRET_KEY_LENGTH,
};
use rand::rngs::OsRng;
use std::fmt;
use thiserror::Error;

use super::strkey::{self, StrKeyError};
use crate::types::account::{AccountId, MuxedAccount, SignerKey};

/// Errors that can occur during key operations.
///
/// Deliberately vague about *why* a secret failed to parse: echoing parts
/// of a malformed seed into an error message is how seeds end up in logs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    #[error("invalid secret key: not a well-formed S... seed")]
    InvalidSecretKey,

    #[error("invalid public key: {0}")]
    InvalidPublicKey(#[from] StrKeyError),
}

/// An account key pair wrapping an ed25519 signing key.
///
/// `KeyPair` intentionally does NOT implement `Serialize`/`Deserialize`.
/// Exporting a seed should be a deliberate call to
/// [`secret_seed`](Self::secret_seed), not a side effect of a JSON dump.
///
/// # Examples
///
/// ```
/// use lumen_protocol::crypto::keys::KeyPair;
///
/// let kp = KeyPair::random();
/// let msg = b"payment of 10 XLM";
/// let sig = kp.sign(msg);
/// assert!(kp.verify(msg, &sig));
/// assert!(kp.account_id().to_string().starts_with('G'));
/// ```
pub struct KeyPair {
    signing_key: SigningKey,
}

impl KeyPair {
    /// Generate a fresh key pair from the OS cryptographic RNG.
    pub fn random() -> Self {
        Self {
            signing_key: SigningKey::generate(&mut OsRng),
        }
    }

    /// Construct a key pair deterministically from a raw 32-byte seed.
    pub fn from_seed_bytes(seed: &[u8; SECRET_KEY_LENGTH]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(seed),
        }
    }

    /// Parse an `S...` secret seed.
    ///
    /// Any strkey failure (checksum, version byte, length) collapses into
    /// [`KeyError::InvalidSecretKey`].
    pub fn from_secret_seed(seed: &str) -> Result<Self, KeyError> {
        let bytes = strkey::decode_secret_seed(seed.trim()).map_err(|_| KeyError::InvalidSecretKey)?;
        Ok(Self::from_seed_bytes(&bytes))
    }

    /// The `S...` strkey of the secret seed. Handle with extreme care.
    pub fn secret_seed(&self) -> String {
        strkey::encode_secret_seed(&self.signing_key.to_bytes())
    }

    /// Raw 32-byte public key.
    pub fn public_key_bytes(&self) -> [u8; 32] {
        self.signing_key.verifying_key().to_bytes()
    }

    /// The account this key pair controls.
    pub fn account_id(&self) -> AccountId {
        AccountId(self.public_key_bytes())
    }

    /// The account as an un-multiplexed `MuxedAccount`, handy as a
    /// transaction or operation source.
    pub fn muxed_account(&self) -> MuxedAccount {
        MuxedAccount::Ed25519(self.public_key_bytes())
    }

    /// The account as an ed25519 signer key.
    pub fn signer_key(&self) -> SignerKey {
        SignerKey::Ed25519(self.public_key_bytes())
    }

    /// The last four bytes of the public key, attached to every signature
    /// this key produces so validators can find the signer without trying
    /// every key on the account.
    pub fn signature_hint(&self) -> [u8; 4] {
        let public = self.public_key_bytes();
        let mut hint = [0u8; 4];
        hint.copy_from_slice(&public[28..]);
        hint
    }

    /// Sign a message. Ed25519 is deterministic: same key, same message,
    /// same 64 bytes.
    pub fn sign(&self, message: &[u8]) -> [u8; 64] {
        self.signing_key.sign(message).to_bytes()
    }

    /// Verify a signature against this key pair's public key.
    pub fn verify(&self, message: &[u8], signature: &[u8]) -> bool {
        verify_signature(&self.public_key_bytes(), message, signature)
    }

    /// Get the underlying `VerifyingKey`.
    pub fn verifying_key(&self) -> VerifyingKey {
        self.signing_key.verifying_key()
    }
}

/// Verify an ed25519 signature against a raw public key.
///
/// Returns `false` for anything that is not a valid 64-byte signature by a
/// valid curve point; callers only ever want a yes/no answer here.
pub fn verify_signature(public_key: &[u8; 32], message: &[u8], signature: &[u8]) -> bool {
    let Ok(verifying_key) = VerifyingKey::from_bytes(public_key) else {
        return false;
    };
    let sig_bytes: [u8; 64] = match signature.try_into() {
        Ok(b) => b,
        Err(_) => return false,
    };
    let dalek_sig = DalekSignature::from_bytes(&sig_bytes);
    verifying_key.verify(message, &dalek_sig).is_ok()
}

impl Clone for KeyPair {
    /// Cloning a key pair is allowed but should make you uncomfortable.
    fn clone(&self) -> Self {
        Self::from_seed_bytes(&self.signing_key.to_bytes())
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KeyPair(pub={})", self.account_id())
    }
}

impl PartialEq for KeyPair {
    /// Two key pairs are equal if their public keys match. Secret material
    /// is never compared.
    fn eq(&self, other: &Self) -> bool {
        self.public_key_bytes() == other.public_key_bytes()
    }
}

impl Eq for KeyPair {}

#[cfg(test)]
mod tests {
    use super::*;

    // Seed bytes 0x00..=0x1f.
    const SEED: &str = "SAAACAQDAQCQMBYIBEFAWDANBYHRAEISCMKBKFQXDAMRUGY4DUPB6NKI";
    const ACCOUNT: &str = "GAB2CB576PHBBPQ5ODORRZ2LYCMWPZGWGCN2KDK7DXOIMZASKUY3QZ6Q";

    #[test]
    fn known_seed_gives_known_account() {
        let kp = KeyPair::from_secret_seed(SEED).unwrap();
        assert_eq!(kp.account_id().to_string(), ACCOUNT);
        assert_eq!(
            hex::encode(kp.public_key_bytes()),
            "03a107bff3ce10be1d70dd18e74bc09967e4d6309ba50d5f1ddc8664125531b8"
        );
    }

    #[test]
    fn keypair_sign_verify_roundtrip() {
        let kp = KeyPair::random();
        let msg = b"transfer 100 XLM";
        let sig = kp.sign(msg);
        assert!(kp.verify(msg, &sig));
        assert!(!kp.verify(b"transfer 1000 XLM", &sig));
    }

    #[test]
    fn wrong_key_fails_verification() {
        let kp1 = KeyPair::random();
        let kp2 = KeyPair::random();
        let sig = kp1.sign(b"message");
        assert!(!kp2.verify(b"message", &sig));
    }

    #[test]
    fn secret_seed_text_round_trips() {
        let kp = KeyPair::from_secret_seed(SEED).unwrap();
        assert_eq!(kp.secret_seed(), SEED);
        let restored = KeyPair::from_secret_seed(&kp.secret_seed()).unwrap();
        assert_eq!(kp, restored);
    }

    #[test]
    fn invalid_seed_rejected() {
        assert_eq!(
            KeyPair::from_secret_seed("GBAF6NXN3DHSF357QBZLTBNWUTABKUODJXJYYE32ZDKA2QBM2H33IK6O"),
            Err(KeyError::InvalidSecretKey)
        );
        assert_eq!(KeyPair::from_secret_seed("S123"), Err(KeyError::InvalidSecretKey));
        assert_eq!(KeyPair::from_secret_seed(""), Err(KeyError::InvalidSecretKey));
    }

    #[test]
    fn hint_is_last_four_bytes() {
        let kp = KeyPair::random();
        let public = kp.public_key_bytes();
        assert_eq!(kp.signature_hint(), [public[28], public[29], public[30], public[31]]);
    }

    #[test]
    fn account_views_agree() {
        let kp = KeyPair::random();
        assert_eq!(kp.account_id().0, kp.public_key_bytes());
        assert_eq!(kp.muxed_account().ed25519(), kp.public_key_bytes());
        assert_eq!(kp.signer_key(), SignerKey::Ed25519(kp.public_key_bytes()));
    }

    #[test]
    fn signatures_are_deterministic() {
        let kp = KeyPair::from_seed_bytes(&[42u8; 32]);
        assert_eq!(kp.sign(b"same"), kp.sign(b"same"));
    }

    #[test]
    fn verify_rejects_malformed_signature() {
        let kp = KeyPair::random();
        assert!(!verify_signature(&kp.public_key_bytes(), b"x", &[0u8; 63]));
        assert!(!verify_signature(&kp.public_key_bytes(), b"x", &[]));
    }

    #[test]
    fn debug_does_not_leak_secret() {
        let kp = KeyPair::random();
        let debug_str = format!("{:?}", kp);
        assert!(debug_str.starts_with("KeyPair(pub=G"));
        assert!(!debug_str.contains(&kp.secret_seed()));
    }

    #[test]
    fn clone_preserves_identity() {
        let kp = KeyPair::random();
        let cloned = kp.clone();
        assert_eq!(kp.secret_seed(), cloned.secret_seed());
    }
}
