//! # Cryptographic Primitives
//!
//! Everything signature- and identifier-related flows through here:
//!
//! - **Ed25519** for account keys and signatures.
//! - **SHA-256** for network ids, transaction hashes and hash(x) signers.
//! - **Strkey** for the checksummed base-32 text form of keys and signers.
//!
//! Everything is a thin, type-safe wrapper around audited implementations.

pub mod hash;
pub mod keys;
pub mod strkey;

pub use hash::{sha256, sha256_array, sha256_multi};
pub use keys::{verify_signature, KeyError, KeyPair};
pub use strkey::{StrKey, StrKeyError};
