// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # Lumen CLI
//!
//! Entry point for the `lumen` binary. Parses CLI arguments, initializes
//! logging and runs one command over one envelope.
//!
//! - `decode`  — base64 XDR to TxRep
//! - `encode`  — TxRep to base64 XDR
//! - `sign`    — append an ed25519 signature
//! - `hash`    — print the transaction hash
//! - `keygen`  — generate a key pair

mod cli;
mod logging;

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;

use lumen_protocol::config::Network;
use lumen_protocol::crypto::KeyPair;
use lumen_protocol::transaction::{sign_with_secret, transaction_hash_hex};
use lumen_protocol::txrep::{from_txrep, to_txrep};
use lumen_protocol::types::TransactionEnvelope;
use lumen_protocol::xdr::{ReadXdr, WriteXdr};

use cli::{Commands, EnvelopeFormat, InputArgs, LumenCli};
use logging::LogFormat;

fn main() -> Result<()> {
    let cli = LumenCli::parse();
    logging::init_logging(
        "lumen_cli=warn,lumen_protocol=warn",
        LogFormat::from_str_lossy(&cli.log_format),
    );

    match cli.command {
        Commands::Decode(args) => {
            let envelope = read_envelope(&args, EnvelopeFormat::Xdr)?;
            print!("{}", to_txrep(&envelope));
        }
        Commands::Encode(args) => {
            let envelope = read_envelope(&args, EnvelopeFormat::Txrep)?;
            println!("{}", encode(&envelope)?);
        }
        Commands::Sign(args) => {
            let network = Network::from_name_or_passphrase(&args.network);
            let mut envelope = read_envelope(&args.input, args.format)?;
            sign_with_secret(&mut envelope, &args.secret, &network)
                .context("failed to sign envelope")?;
            tracing::info!(
                signatures = envelope.signatures().len(),
                network = network.passphrase(),
                "envelope signed"
            );
            match args.format {
                EnvelopeFormat::Xdr => println!("{}", encode(&envelope)?),
                EnvelopeFormat::Txrep => print!("{}", to_txrep(&envelope)),
            }
        }
        Commands::Hash(args) => {
            let network = Network::from_name_or_passphrase(&args.network);
            let envelope = read_envelope(&args.input, args.format)?;
            let hash = transaction_hash_hex(&envelope, &network)
                .context("failed to hash envelope")?;
            println!("{hash}");
        }
        Commands::Keygen => {
            let keypair = KeyPair::random();
            println!("public: {}", keypair.account_id());
            println!("secret: {}", keypair.secret_seed());
        }
    }
    Ok(())
}

/// Reads and parses the envelope named by `args` in the given format.
fn read_envelope(args: &InputArgs, format: EnvelopeFormat) -> Result<TransactionEnvelope> {
    let text = read_input(args.input.as_deref())?;
    match format {
        EnvelopeFormat::Xdr => {
            TransactionEnvelope::from_xdr_base64(&text).context("failed to decode XDR envelope")
        }
        EnvelopeFormat::Txrep => from_txrep(&text).context("failed to parse TxRep"),
    }
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        _ => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("failed to read stdin")?;
            Ok(text)
        }
    }
}

fn encode(envelope: &TransactionEnvelope) -> Result<String> {
    envelope
        .to_xdr_base64()
        .context("failed to encode XDR envelope")
}
