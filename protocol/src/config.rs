//! # Protocol Configuration & Constants
//!
//! Every magic number the codec, the signing engine and the TxRep converter
//! rely on lives here. Most of them are not ours to choose: they are fixed by
//! the network's XDR definitions, and picking a different value gets a
//! transaction rejected by every validator on the network.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::crypto::hash::sha256_array;

// ---------------------------------------------------------------------------
// Network Passphrases
// ---------------------------------------------------------------------------

/// The production network. Mistakes here cost real lumens.
pub const PUBLIC_NETWORK_PASSPHRASE: &str = "Public Global Stellar Network ; September 2015";

/// The SDF test network. Reset roughly quarterly.
pub const TESTNET_PASSPHRASE: &str = "Test SDF Network ; September 2015";

/// The future network, where upcoming protocol versions land first.
pub const FUTURENET_PASSPHRASE: &str = "Test SDF Future Network ; October 2022";

// ---------------------------------------------------------------------------
// Transaction Limits
// ---------------------------------------------------------------------------

/// Maximum number of operations in a single transaction (`operations<100>`).
pub const MAX_OPERATIONS: usize = 100;

/// Maximum number of decorated signatures on an envelope (`signatures<20>`).
pub const MAX_SIGNATURES: usize = 20;

/// Maximum number of extra signers in a V2 precondition (`extraSigners<2>`).
pub const MAX_EXTRA_SIGNERS: usize = 2;

/// Maximum memo text length in bytes (`string text<28>`).
pub const MAX_MEMO_TEXT_LENGTH: usize = 28;

/// Maximum intermediate hops in a path payment (`Asset path<5>`).
pub const MAX_PATH_LENGTH: usize = 5;

/// Maximum claimants on a claimable balance (`Claimant claimants<10>`).
pub const MAX_CLAIMANTS: usize = 10;

/// Maximum length of a data entry name and value (`string64`, `opaque<64>`).
pub const MAX_DATA_LENGTH: usize = 64;

/// Maximum home domain length (`string32`).
pub const MAX_HOME_DOMAIN_LENGTH: usize = 32;

/// Maximum signature length (`opaque Signature<64>`).
pub const MAX_SIGNATURE_LENGTH: usize = 64;

/// Maximum signed-payload signer payload (`opaque payload<64>`).
pub const MAX_SIGNED_PAYLOAD_LENGTH: usize = 64;

/// Maximum Soroban symbol length (`SCSymbol<32>`).
pub const MAX_SYMBOL_LENGTH: usize = 32;

/// Hard cap for variable-length values the XDR definitions leave unbounded
/// (`opaque<>`, `T<>`). Matches the XDR maximum length of 2^32 - 1.
pub const UNBOUNDED: usize = u32::MAX as usize;

/// Recursion ceiling for nested values (claim predicates, Soroban values,
/// authorization trees). Deeper inputs are rejected instead of blowing the
/// stack on hostile data.
pub const MAX_XDR_DEPTH: u32 = 256;

/// Recursion ceiling for TxRep input. Each TxRep level builds paths and
/// looks up fields, so a level costs far more stack than an XDR level.
pub const MAX_TXREP_DEPTH: u32 = 64;

// ---------------------------------------------------------------------------
// Fees & Amounts
// ---------------------------------------------------------------------------

/// Minimum base fee per operation, in stroops.
pub const BASE_FEE: u32 = 100;

/// One lumen is 10^7 stroops. Every amount on the wire is an i64 of stroops.
pub const STROOPS_PER_LUMEN: i64 = 10_000_000;

/// Number of decimal places in a human-readable amount.
pub const AMOUNT_DECIMALS: usize = 7;

// ---------------------------------------------------------------------------
// Network
// ---------------------------------------------------------------------------

/// Network identity: the passphrase whose SHA-256 hash seeds every
/// signature base.
///
/// Signing with the wrong passphrase yields a perfectly valid ed25519
/// signature that no validator on the intended network will accept.
///
/// # Examples
///
/// ```
/// use lumen_protocol::config::Network;
///
/// let testnet = Network::testnet();
/// assert_eq!(testnet.passphrase(), "Test SDF Network ; September 2015");
/// assert_eq!(testnet.network_id().len(), 32);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Network {
    passphrase: String,
}

impl Network {
    /// A network identified by an arbitrary passphrase (private networks,
    /// standalone quickstart containers, ...).
    pub fn new(passphrase: impl Into<String>) -> Self {
        Self {
            passphrase: passphrase.into(),
        }
    }

    /// The public production network.
    pub fn public() -> Self {
        Self::new(PUBLIC_NETWORK_PASSPHRASE)
    }

    /// The SDF test network.
    pub fn testnet() -> Self {
        Self::new(TESTNET_PASSPHRASE)
    }

    /// The SDF future network.
    pub fn futurenet() -> Self {
        Self::new(FUTURENET_PASSPHRASE)
    }

    /// Resolves a well-known network name (`public`, `testnet`, `futurenet`)
    /// and falls back to treating the input as a literal passphrase.
    pub fn from_name_or_passphrase(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "public" | "mainnet" | "pubnet" => Self::public(),
            "testnet" | "test" => Self::testnet(),
            "futurenet" | "future" => Self::futurenet(),
            _ => Self::new(value),
        }
    }

    /// The raw passphrase.
    pub fn passphrase(&self) -> &str {
        &self.passphrase
    }

    /// `SHA256(passphrase)`, the first 32 bytes of every signature base.
    pub fn network_id(&self) -> [u8; 32] {
        sha256_array(self.passphrase.as_bytes())
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.passphrase.as_str() {
            PUBLIC_NETWORK_PASSPHRASE => write!(f, "public"),
            TESTNET_PASSPHRASE => write!(f, "testnet"),
            FUTURENET_PASSPHRASE => write!(f, "futurenet"),
            other => write!(f, "custom({})", other),
        }
    }
}
