//! Signature verification against candidate signers.
//!
//! An envelope's signatures do not say who made them, only a four-byte
//! hint. [`verify_envelope`] matches each signature to one of the
//! caller's candidate signers by hint and then checks it cryptographically.
//! Hint comparison is a few byte compares, so it runs first and only the
//! matching candidates pay for an ed25519 verification.

use thiserror::Error;
use tracing::debug;

use super::signing::{last_four, signed_payload_hint, transaction_hash, SigningError};
use crate::config::Network;
use crate::crypto::hash::sha256_array;
use crate::crypto::keys::verify_signature as verify_ed25519;
use crate::types::{DecoratedSignature, SignerKey, TransactionEnvelope};

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur while verifying an envelope's signatures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerificationError {
    /// The envelope has no signatures at all.
    #[error("envelope is unsigned")]
    MissingSignature,

    /// No candidate signer carries this signature's hint.
    #[error("signature {index} has hint {hint} matching no candidate signer")]
    UnknownSigner { index: usize, hint: String },

    /// A candidate matched the hint but the signature does not verify.
    #[error("signature {index} does not verify against {signer}")]
    InvalidSignature { index: usize, signer: String },

    #[error(transparent)]
    Signing(#[from] SigningError),
}

// ---------------------------------------------------------------------------
// Single signatures
// ---------------------------------------------------------------------------

/// The hint a signature from `signer` would carry.
///
/// Pre-authorized transaction signers never sign, so they have none.
pub fn signer_hint(signer: &SignerKey) -> Option<[u8; 4]> {
    match signer {
        SignerKey::Ed25519(key) | SignerKey::HashX(key) => Some(last_four(key)),
        SignerKey::PreAuthTx(_) => None,
        SignerKey::Ed25519SignedPayload { ed25519, payload } => {
            Some(signed_payload_hint(ed25519, payload))
        }
    }
}

/// Checks one decorated signature made by `signer` over `tx_hash`.
///
/// - ed25519 signers sign the transaction hash;
/// - hash(x) signers reveal a preimage whose SHA-256 is the key;
/// - signed-payload signers sign their payload, not the transaction.
///
/// The hint must match as well.
pub fn verify_signature(
    tx_hash: &[u8; 32],
    signature: &DecoratedSignature,
    signer: &SignerKey,
) -> bool {
    if signer_hint(signer) != Some(signature.hint) {
        return false;
    }
    match signer {
        SignerKey::Ed25519(key) => verify_ed25519(key, tx_hash, &signature.signature),
        SignerKey::HashX(hash) => sha256_array(&signature.signature) == *hash,
        SignerKey::Ed25519SignedPayload { ed25519, payload } => {
            verify_ed25519(ed25519, payload, &signature.signature)
        }
        SignerKey::PreAuthTx(_) => false,
    }
}

// ---------------------------------------------------------------------------
// Envelopes
// ---------------------------------------------------------------------------

/// Verifies every outer signature of `envelope` against `candidates`.
///
/// Returns the signer of each signature, in signature order. Fails on the
/// first signature that no candidate can account for. For a fee bump only
/// the fee-bump signatures are checked; verify the inner envelope
/// separately if it matters.
pub fn verify_envelope(
    envelope: &TransactionEnvelope,
    network: &Network,
    candidates: &[SignerKey],
) -> Result<Vec<SignerKey>, VerificationError> {
    let signatures = envelope.signatures();
    if signatures.is_empty() {
        return Err(VerificationError::MissingSignature);
    }
    let hash = transaction_hash(envelope, network)?;

    let mut signers = Vec::with_capacity(signatures.len());
    for (index, signature) in signatures.iter().enumerate() {
        let mut hinted = candidates
            .iter()
            .filter(|c| signer_hint(c) == Some(signature.hint))
            .peekable();
        let Some(first) = hinted.peek().copied() else {
            return Err(VerificationError::UnknownSigner {
                index,
                hint: hex::encode(signature.hint),
            });
        };
        match hinted.find(|c| verify_signature(&hash, signature, c)) {
            Some(signer) => signers.push(signer.clone()),
            None => {
                return Err(VerificationError::InvalidSignature {
                    index,
                    signer: first.to_string(),
                })
            }
        }
    }

    debug!(
        hash = %hex::encode(hash),
        signatures = signers.len(),
        "verified envelope"
    );
    Ok(signers)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::keys::KeyPair;
    use crate::transaction::{sign, sign_hash_x, sign_payload_signer, TransactionBuilder};
    use crate::types::Operation;

    fn keypair(byte: u8) -> KeyPair {
        KeyPair::from_seed_bytes(&[byte; 32])
    }

    fn unsigned(source: &KeyPair) -> TransactionEnvelope {
        TransactionBuilder::new(source.muxed_account(), 1)
            .add_operation(Operation::bump_sequence(3))
            .build_envelope()
            .unwrap()
    }

    #[test]
    fn verifies_signers_in_order() {
        let (a, b) = (keypair(1), keypair(2));
        let network = Network::testnet();
        let mut env = unsigned(&a);
        sign(&mut env, &b, &network).unwrap();
        sign(&mut env, &a, &network).unwrap();

        let signers =
            verify_envelope(&env, &network, &[a.signer_key(), b.signer_key()]).unwrap();
        assert_eq!(signers, vec![b.signer_key(), a.signer_key()]);
    }

    #[test]
    fn wrong_network_fails() {
        let a = keypair(1);
        let mut env = unsigned(&a);
        sign(&mut env, &a, &Network::testnet()).unwrap();
        let err = verify_envelope(&env, &Network::public(), &[a.signer_key()]).unwrap_err();
        assert!(matches!(err, VerificationError::InvalidSignature { index: 0, .. }));
    }

    #[test]
    fn unknown_hint_reported() {
        let a = keypair(1);
        let mut env = unsigned(&a);
        sign(&mut env, &a, &Network::testnet()).unwrap();
        let err =
            verify_envelope(&env, &Network::testnet(), &[keypair(2).signer_key()]).unwrap_err();
        assert_eq!(
            err,
            VerificationError::UnknownSigner {
                index: 0,
                hint: hex::encode(a.signature_hint()),
            }
        );
    }

    #[test]
    fn unsigned_envelope_rejected() {
        let a = keypair(1);
        assert_eq!(
            verify_envelope(&unsigned(&a), &Network::testnet(), &[a.signer_key()]),
            Err(VerificationError::MissingSignature)
        );
    }

    #[test]
    fn hash_x_and_signed_payload_signers() {
        let a = keypair(3);
        let preimage = b"the secret words";
        let mut env = unsigned(&a);
        sign_hash_x(&mut env, preimage).unwrap();

        let hash_x = SignerKey::HashX(sha256_array(preimage));
        let signers = verify_envelope(&env, &Network::testnet(), &[hash_x.clone()]).unwrap();
        assert_eq!(signers, vec![hash_x]);

        let payload = vec![9u8; 12];
        let sig = sign_payload_signer(&a, &payload).unwrap();
        let signer = SignerKey::Ed25519SignedPayload {
            ed25519: a.public_key_bytes(),
            payload: payload.clone(),
        };
        assert!(verify_signature(&[0; 32], &sig, &signer));
        assert!(!verify_signature(&[0; 32], &sig, &a.signer_key()));
    }

    #[test]
    fn pre_auth_signers_never_match() {
        assert_eq!(signer_hint(&SignerKey::PreAuthTx([1; 32])), None);
        let sig = DecoratedSignature {
            hint: [1; 4],
            signature: vec![],
        };
        assert!(!verify_signature(&[0; 32], &sig, &SignerKey::PreAuthTx([1; 32])));
    }
}
