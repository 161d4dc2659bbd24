//! # Transaction Engine
//!
//! Building, hashing, signing and verifying transaction envelopes.
//!
//! ## Architecture
//!
//! ```text
//! TransactionBuilder ──build()──► Transaction ──► TransactionEnvelope
//!                                                       │
//! FeeBumpBuilder ◄──────── signed v1 envelope ──────────┤
//!                                                       │
//!                   signing::sign / sign_hash_x ◄───────┘
//!                                │
//!              verification::verify_envelope
//! ```
//!
//! - **builder**: fluent construction with fee and precondition rules.
//! - **signing**: network id, signature base, transaction hash, signatures.
//! - **verification**: hint matching plus cryptographic checks.
//! - **amount**: stroops to and from decimal text.

pub mod amount;
pub mod builder;
pub mod signing;
pub mod verification;

pub use amount::{format_amount, parse_amount, AmountError};
pub use builder::{BuildError, FeeBumpBuilder, TransactionBuilder};
pub use signing::{
    add_signature, sign, sign_hash_x, sign_payload_signer, sign_with_secret, signature_base,
    transaction_hash, transaction_hash_hex, SigningError,
};
pub use verification::{verify_envelope, verify_signature, VerificationError};
