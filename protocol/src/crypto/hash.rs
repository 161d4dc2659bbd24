//! # Hashing Utilities
//!
//! The network uses exactly one hash function: SHA-256. It derives the
//! network id from the passphrase, the transaction hash from the signature
//! base, and the hint of a hash(x) signer from its preimage.
//!
//! Nothing else in this crate should reach for `sha2` directly.

use sha2::{Digest, Sha256};

/// Compute the SHA-256 hash of the input data as a `Vec<u8>`.
///
/// # Example
///
/// ```
/// use lumen_protocol::crypto::sha256;
///
/// let hash = sha256(b"Public Global Stellar Network ; September 2015");
/// assert_eq!(hash.len(), 32);
/// ```
pub fn sha256(data: &[u8]) -> Vec<u8> {
    sha256_array(data).to_vec()
}

/// Compute the SHA-256 hash and return a fixed-size array.
///
/// This is the variant the protocol types want: network ids, transaction
/// hashes and pre-auth signer keys are all `[u8; 32]` on the wire.
pub fn sha256_array(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}

/// Hash multiple byte slices as if they were concatenated.
///
/// The signature base is `network_id || envelope_type || body`; hashing
/// the parts in sequence gives the same digest without building the
/// concatenated buffer.
pub fn sha256_multi(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part);
    }
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha256_known_vector() {
        // SHA-256 of the empty string.
        let hash = sha256(b"");
        let expected =
            hex::decode("e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855")
                .unwrap();
        assert_eq!(hash, expected);
    }

    #[test]
    fn sha256_array_matches_vec() {
        let data = b"lumen";
        assert_eq!(sha256(data), sha256_array(data).to_vec());
    }

    #[test]
    fn sha256_multi_matches_concatenation() {
        let a = b"network id";
        let b = [0u8, 0, 0, 2];
        let c = b"tagged transaction";
        let mut joined = Vec::new();
        joined.extend_from_slice(a);
        joined.extend_from_slice(&b);
        joined.extend_from_slice(c);
        assert_eq!(sha256_multi(&[a, &b, c]), sha256_array(&joined));
    }

    #[test]
    fn sha256_multi_with_empty_parts() {
        assert_eq!(sha256_multi(&[]), sha256_array(b""));
        assert_eq!(sha256_multi(&[b"", b"x", b""]), sha256_array(b"x"));
    }
}
