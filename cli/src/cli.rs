//! # CLI Interface
//!
//! Defines the command-line argument structure for `lumen` using `clap`
//! derive. Every command reads one envelope from a file or stdin and
//! writes its result to stdout.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Stellar transaction toolbox.
///
/// Converts envelopes between base64 XDR and TxRep, signs them and prints
/// their hashes.
#[derive(Parser, Debug)]
#[command(
    name = "lumen",
    about = "Decode, encode and sign Stellar transactions",
    version,
    propagate_version = true
)]
pub struct LumenCli {
    /// Log output format: "pretty" or "json". Logs go to stderr.
    #[arg(long, global = true, env = "LUMEN_LOG_FORMAT", default_value = "pretty")]
    pub log_format: String,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands for the `lumen` binary.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Base64 XDR envelope to TxRep.
    Decode(InputArgs),
    /// TxRep to base64 XDR envelope.
    Encode(InputArgs),
    /// Append an ed25519 signature to an envelope.
    Sign(SignArgs),
    /// Print the hex transaction hash of an envelope.
    Hash(HashArgs),
    /// Generate a fresh key pair.
    Keygen,
}

/// How an envelope is written on input and output.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeFormat {
    /// Standard base64 of the XDR bytes.
    Xdr,
    /// Human-readable `path: value` lines.
    Txrep,
}

/// Where to read the envelope from.
#[derive(Parser, Debug)]
pub struct InputArgs {
    /// Input file. Reads stdin when omitted or `-`.
    pub input: Option<PathBuf>,
}

/// Arguments for the `sign` subcommand.
#[derive(Parser, Debug)]
pub struct SignArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Secret seed (`S...`) of the signer.
    #[arg(long, env = "LUMEN_SECRET_SEED", hide_env_values = true)]
    pub secret: String,

    /// Network name (public, testnet, futurenet) or a full passphrase.
    #[arg(long, env = "LUMEN_NETWORK", default_value = "testnet")]
    pub network: String,

    /// Format of the input envelope; the output uses the same format.
    #[arg(long, value_enum, default_value_t = EnvelopeFormat::Xdr)]
    pub format: EnvelopeFormat,
}

/// Arguments for the `hash` subcommand.
#[derive(Parser, Debug)]
pub struct HashArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Network name (public, testnet, futurenet) or a full passphrase.
    #[arg(long, env = "LUMEN_NETWORK", default_value = "testnet")]
    pub network: String,

    /// Format of the input envelope.
    #[arg(long, value_enum, default_value_t = EnvelopeFormat::Xdr)]
    pub format: EnvelopeFormat,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_structure() {
        // Ensures the derive macros produce a valid CLI definition.
        LumenCli::command().debug_assert();
    }

    #[test]
    fn parses_sign_arguments() {
        let cli = LumenCli::try_parse_from([
            "lumen",
            "sign",
            "tx.xdr",
            "--secret",
            "SAAACAQDAQCQMBYIBEFAWDANBYHRAEISCMKBKFQXDAMRUGY4DUPB6NKI",
            "--network",
            "public",
            "--format",
            "txrep",
        ])
        .unwrap();
        let Commands::Sign(args) = cli.command else {
            panic!("expected sign");
        };
        assert_eq!(args.input.input, Some(PathBuf::from("tx.xdr")));
        assert_eq!(args.network, "public");
        assert_eq!(args.format, EnvelopeFormat::Txrep);
    }
}
