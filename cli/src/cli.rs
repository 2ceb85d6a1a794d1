//! # CLI Interface
//!
//! Defines the command-line argument structure for `nova-sign` using
//! `clap` derive. Subcommands: `sign-bytes`, `verify`, `hash`, `modes`
//! and `version`.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// NOVA transaction signing toolkit.
///
/// Computes the exact bytes a signer must sign for a transaction under a
/// given sign mode, and verifies signed transactions against a set of
/// accounts. Nothing here touches private keys.
#[derive(Parser, Debug)]
#[command(
    name = "nova-sign",
    about = "NOVA transaction sign-bytes and signature verification",
    version,
    propagate_version = true
)]
pub struct NovaSignCli {
    /// Default log level when `RUST_LOG` is not set.
    #[arg(long, global = true, env = "NOVA_LOG_LEVEL", default_value = "warn")]
    pub log_level: String,

    /// Log output format: `pretty` or `json`.
    #[arg(long, global = true, env = "NOVA_LOG_FORMAT", default_value = "pretty")]
    pub log_format: String,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands for the `nova-sign` binary.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the bytes a signer must sign.
    SignBytes(SignBytesArgs),
    /// Verify every signature on a signed transaction.
    Verify(VerifyArgs),
    /// Print the SHA-256 hash of a transaction's raw encoding.
    Hash(HashArgs),
    /// List the supported sign modes.
    Modes(ModesArgs),
    /// Print version information and exit.
    Version,
}

/// How sign-bytes are written to stdout.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Lowercase hex.
    Hex,
    /// The bytes themselves.
    Raw,
    /// UTF-8 text. Readable for legacy Amino-JSON documents.
    Text,
}

/// Arguments for the `sign-bytes` subcommand.
#[derive(Parser, Debug)]
pub struct SignBytesArgs {
    /// Path to the transaction JSON file.
    #[arg(long, short = 't')]
    pub tx: PathBuf,

    /// Chain the signature is bound to.
    #[arg(long, env = "NOVA_CHAIN_ID")]
    pub chain_id: String,

    /// On-chain account number of the signer.
    #[arg(long)]
    pub account_number: u64,

    /// Current sequence of the signer's account.
    #[arg(long)]
    pub sequence: u64,

    /// Sign mode, e.g. `direct` or `amino-json`.
    ///
    /// When omitted, the default mode of the registry is used.
    #[arg(long, short = 'm')]
    pub mode: Option<String>,

    /// Output encoding.
    #[arg(long, short = 'o', value_enum, default_value_t = OutputFormat::Hex)]
    pub output: OutputFormat,
}

/// Arguments for the `verify` subcommand.
#[derive(Parser, Debug)]
pub struct VerifyArgs {
    /// Path to the signed transaction JSON file.
    #[arg(long, short = 't')]
    pub tx: PathBuf,

    /// Path to the accounts JSON file (chain id, account numbers,
    /// sequences and optional registered keys).
    #[arg(long, short = 'a')]
    pub accounts: PathBuf,

    /// Optional JSON file with validation parameters. Missing fields
    /// take their defaults.
    #[arg(long)]
    pub params: Option<PathBuf>,
}

/// Arguments for the `hash` subcommand.
#[derive(Parser, Debug)]
pub struct HashArgs {
    /// Path to the transaction JSON file.
    #[arg(long, short = 't')]
    pub tx: PathBuf,
}

/// Arguments for the `modes` subcommand.
#[derive(Parser, Debug)]
pub struct ModesArgs {
    /// Only list the modes this key type may use (`ed25519`, `secp256k1`).
    #[arg(long)]
    pub key_type: Option<String>,
}
