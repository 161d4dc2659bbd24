// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # Lumen Protocol — Core Library
//!
//! Everything needed to take a Stellar transaction from bytes to text and
//! back, and to sign it on the way: the XDR wire codec, strkey addresses,
//! the full transaction type model, a signing engine and the TxRep
//! human-readable format.
//!
//! ## Architecture
//!
//! - **xdr** — Big-endian, 4-byte aligned primitives and the
//!   `WriteXdr`/`ReadXdr` traits every protocol type implements.
//! - **crypto** — Strkey encoding, Ed25519 key pairs and SHA-256.
//! - **types** — Accounts, assets, preconditions, claim predicates, the
//!   operation table, Soroban payloads and the envelope shapes.
//! - **transaction** — Builders, signature bases, signing, verification
//!   and amount formatting.
//! - **txrep** — `path: value` rendering and order-independent parsing.
//! - **config** — Protocol limits and network passphrases.
//!
//! ## Quick tour
//!
//! ```no_run
//! use lumen_protocol::config::Network;
//! use lumen_protocol::crypto::KeyPair;
//! use lumen_protocol::transaction::{sign, TransactionBuilder};
//! use lumen_protocol::txrep::to_txrep;
//! use lumen_protocol::types::Operation;
//! use lumen_protocol::xdr::WriteXdr;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let keys = KeyPair::random();
//! let mut envelope = TransactionBuilder::new(keys.muxed_account(), 1)
//!     .add_operation(Operation::bump_sequence(2))
//!     .build_envelope()?;
//! sign(&mut envelope, &keys, &Network::testnet())?;
//! println!("{}", envelope.to_xdr_base64()?);
//! println!("{}", to_txrep(&envelope));
//! # Ok(())
//! # }
//! ```
//!
//! Everything is synchronous and free of shared state. Key pairs are owned
//! by the caller and never printed.

pub mod config;
pub mod crypto;
pub mod transaction;
pub mod txrep;
pub mod types;
pub mod xdr;
