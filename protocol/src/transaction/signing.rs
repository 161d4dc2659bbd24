//! Transaction signing with ed25519 key pairs and hash(x) preimages.
//!
//! What gets signed is never the envelope itself. It is the SHA-256 of the
//! signature base:
//!
//! ```text
//! network_id (32 bytes) || envelope type (i32) || transaction body (XDR)
//! ```
//!
//! with `network_id = SHA256(passphrase)`. The envelope type is
//! `ENVELOPE_TYPE_TX` for v1 transactions and `ENVELOPE_TYPE_TX_FEE_BUMP`
//! for fee bumps. A fee-bump signature therefore covers the bump fields
//! and the inner envelope as-is; it never touches the inner signatures.
//! Legacy v0 transactions are hashed in their v1 form.
//!
//! Signing appends a [`DecoratedSignature`] to the envelope's outer list.
//! Nothing else about the envelope changes.

use thiserror::Error;
use tracing::debug;

use crate::config::{Network, MAX_SIGNATURES, MAX_SIGNATURE_LENGTH, MAX_SIGNED_PAYLOAD_LENGTH};
use crate::crypto::hash::sha256_array;
use crate::crypto::keys::KeyPair;
use crate::types::{
    DecoratedSignature, TaggedTransaction, TransactionEnvelope, TransactionSignaturePayload,
};
use crate::xdr::{WriteXdr, XdrError};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors that can occur while signing an envelope.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SigningError {
    /// The secret was not a well-formed `S...` seed.
    #[error("invalid secret key")]
    InvalidSecretKey,

    /// The envelope already carries the maximum number of signatures.
    #[error("envelope already has {max} signatures")]
    TooManySignatures { max: usize },

    /// Hash(x) preimages travel in the signature field, which holds 64 bytes.
    #[error("preimage is {len} bytes, maximum is {max}")]
    PreimageTooLong { len: usize, max: usize },

    #[error("signed payload is {len} bytes, maximum is {max}")]
    PayloadTooLong { len: usize, max: usize },

    #[error("failed to encode transaction: {0}")]
    Xdr(#[from] XdrError),
}

// ---------------------------------------------------------------------------
// Signature base and hash
// ---------------------------------------------------------------------------

fn tagged_transaction(envelope: &TransactionEnvelope) -> TaggedTransaction {
    match envelope {
        TransactionEnvelope::TxV0(env) => TaggedTransaction::Tx(env.tx.to_v1()),
        TransactionEnvelope::Tx(env) => TaggedTransaction::Tx(env.tx.clone()),
        TransactionEnvelope::TxFeeBump(env) => TaggedTransaction::TxFeeBump(env.tx.clone()),
    }
}

/// The exact bytes whose hash is signed: `network_id || type || body`.
pub fn signature_base(
    envelope: &TransactionEnvelope,
    network: &Network,
) -> Result<Vec<u8>, SigningError> {
    let payload = TransactionSignaturePayload {
        network_id: network.network_id(),
        tagged_transaction: tagged_transaction(envelope),
    };
    Ok(payload.to_xdr()?)
}

/// SHA-256 of the signature base: the transaction hash validators and
/// explorers identify the transaction by.
pub fn transaction_hash(
    envelope: &TransactionEnvelope,
    network: &Network,
) -> Result<[u8; 32], SigningError> {
    Ok(sha256_array(&signature_base(envelope, network)?))
}

/// [`transaction_hash`] as lowercase hex.
pub fn transaction_hash_hex(
    envelope: &TransactionEnvelope,
    network: &Network,
) -> Result<String, SigningError> {
    transaction_hash(envelope, network).map(hex::encode)
}

// ---------------------------------------------------------------------------
// Signing
// ---------------------------------------------------------------------------

/// Appends an already-computed signature, enforcing the 20-signature cap.
pub fn add_signature(
    envelope: &mut TransactionEnvelope,
    signature: DecoratedSignature,
) -> Result<(), SigningError> {
    let signatures = envelope.signatures_mut();
    if signatures.len() >= MAX_SIGNATURES {
        return Err(SigningError::TooManySignatures {
            max: MAX_SIGNATURES,
        });
    }
    signatures.push(signature);
    Ok(())
}

/// Signs an envelope for `network` with `keypair`.
///
/// The procedure:
/// 1. Compute the signature base for the envelope's type.
/// 2. Hash it with SHA-256.
/// 3. Produce an ed25519 signature over the hash.
/// 4. Append `{hint: last 4 bytes of the public key, signature}`.
///
/// # Arguments
///
/// * `envelope` - The envelope to sign. Only its outer signature list changes.
/// * `keypair` - The signer. Signatures from several keys may be stacked
///   by calling this repeatedly; they are kept in call order.
/// * `network` - Selects the network id. A signature made for one network
///   is worthless on another.
///
/// # Example
///
/// ```
/// use lumen_protocol::config::Network;
/// use lumen_protocol::crypto::KeyPair;
/// use lumen_protocol::transaction::{sign, TransactionBuilder};
/// use lumen_protocol::types::Operation;
///
/// let keypair = KeyPair::random();
/// let mut envelope = TransactionBuilder::new(keypair.muxed_account(), 1)
///     .add_operation(Operation::bump_sequence(10))
///     .build_envelope()
///     .unwrap();
///
/// sign(&mut envelope, &keypair, &Network::testnet()).unwrap();
/// assert_eq!(envelope.signatures()[0].hint, keypair.signature_hint());
/// ```
pub fn sign(
    envelope: &mut TransactionEnvelope,
    keypair: &KeyPair,
    network: &Network,
) -> Result<(), SigningError> {
    if envelope.signatures().len() >= MAX_SIGNATURES {
        return Err(SigningError::TooManySignatures {
            max: MAX_SIGNATURES,
        });
    }
    let hash = transaction_hash(envelope, network)?;
    let signature = keypair.sign(&hash);
    debug!(
        signer = %keypair.account_id(),
        hash = %hex::encode(hash),
        "signed transaction"
    );
    add_signature(
        envelope,
        DecoratedSignature {
            hint: keypair.signature_hint(),
            signature: signature.to_vec(),
        },
    )
}

/// [`sign`] with a secret given as an `S...` strkey.
pub fn sign_with_secret(
    envelope: &mut TransactionEnvelope,
    secret_seed: &str,
    network: &Network,
) -> Result<(), SigningError> {
    let keypair = KeyPair::from_secret_seed(secret_seed).map_err(|_| SigningError::InvalidSecretKey)?;
    sign(envelope, &keypair, network)
}

/// Adds a hash(x) signature: the preimage itself, hinted by the last four
/// bytes of its SHA-256.
pub fn sign_hash_x(
    envelope: &mut TransactionEnvelope,
    preimage: &[u8],
) -> Result<(), SigningError> {
    if preimage.len() > MAX_SIGNATURE_LENGTH {
        return Err(SigningError::PreimageTooLong {
            len: preimage.len(),
            max: MAX_SIGNATURE_LENGTH,
        });
    }
    let hash = sha256_array(preimage);
    debug!(hash_x = %hex::encode(hash), "added hash(x) signature");
    add_signature(
        envelope,
        DecoratedSignature {
            hint: last_four(&hash),
            signature: preimage.to_vec(),
        },
    )
}

/// Signs `payload` for an ed25519 signed-payload signer.
///
/// The signature is over the raw payload. The hint is the key's hint XOR
/// the payload's last four bytes; shorter payloads are zero-padded on the
/// right before the XOR.
pub fn sign_payload_signer(
    keypair: &KeyPair,
    payload: &[u8],
) -> Result<DecoratedSignature, SigningError> {
    if payload.len() > MAX_SIGNED_PAYLOAD_LENGTH {
        return Err(SigningError::PayloadTooLong {
            len: payload.len(),
            max: MAX_SIGNED_PAYLOAD_LENGTH,
        });
    }
    Ok(DecoratedSignature {
        hint: signed_payload_hint(&keypair.public_key_bytes(), payload),
        signature: keypair.sign(payload).to_vec(),
    })
}

/// Hint of an ed25519 signed-payload signer.
pub fn signed_payload_hint(public_key: &[u8; 32], payload: &[u8]) -> [u8; 4] {
    let mut payload_hint = [0u8; 4];
    if payload.len() >= 4 {
        payload_hint.copy_from_slice(&payload[payload.len() - 4..]);
    } else {
        payload_hint[..payload.len()].copy_from_slice(payload);
    }
    let key_hint = last_four(public_key);
    let mut hint = [0u8; 4];
    for (i, byte) in hint.iter_mut().enumerate() {
        *byte = key_hint[i] ^ payload_hint[i];
    }
    hint
}

pub(crate) fn last_four(bytes: &[u8; 32]) -> [u8; 4] {
    let mut out = [0u8; 4];
    out.copy_from_slice(&bytes[28..]);
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
