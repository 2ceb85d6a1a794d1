// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # NOVA Sign
//!
//! Entry point for the `nova-sign` binary. Parses CLI arguments,
//! initializes logging and runs one command against a JSON transaction
//! file.
//!
//! The binary supports five subcommands:
//!
//! - `sign-bytes`   print the bytes a signer must sign
//! - `verify`       check every signature on a signed transaction
//! - `hash`         print the transaction hash
//! - `modes`        list supported sign modes
//! - `version`      print build version information

mod cli;
mod logging;
mod tx_file;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use std::io::Write;

use nova_auth::config::AuthParams;
use nova_auth::crypto::{Ed25519Verifier, KeyType};
use nova_auth::signing::{SignMode, SignModeRegistry, SignerData};
use nova_auth::verify_tx_signatures;

use cli::{Commands, NovaSignCli, OutputFormat};
use logging::LogFormat;
use tx_file::{AccountsFile, TxFile};

fn main() -> Result<()> {
    let cli = NovaSignCli::parse();
    logging::init_logging(&cli.log_level, LogFormat::from_str_lossy(&cli.log_format))?;

    let registry = SignModeRegistry::with_defaults()?;

    match cli.command {
        Commands::SignBytes(args) => {
            let bytes = sign_bytes(&registry, &args)?;
            write_output(&bytes, args.output)
        }
        Commands::Verify(args) => {
            verify(&registry, &args)?;
            println!("OK");
            Ok(())
        }
        Commands::Hash(args) => {
            let tx = TxFile::load(&args.tx)?.to_tx()?;
            println!("{}", tx.hash_hex()?);
            Ok(())
        }
        Commands::Modes(args) => {
            for line in list_modes(&registry, args.key_type.as_deref())? {
                println!("{}", line);
            }
            Ok(())
        }
        Commands::Version => {
            print_version();
            Ok(())
        }
    }
}

/// Computes sign-bytes for the transaction file in `args`.
fn sign_bytes(registry: &SignModeRegistry, args: &cli::SignBytesArgs) -> Result<Vec<u8>> {
    let tx = TxFile::load(&args.tx)?.to_tx()?;
    let mode = match &args.mode {
        Some(mode) => mode.parse::<SignMode>()?,
        None => registry
            .default_mode()
            .ok_or_else(|| anyhow!("no sign modes are registered"))?,
    };
    let data = SignerData::new(args.chain_id.clone(), args.account_number, args.sequence);

    tracing::info!(
        %mode,
        chain_id = %data.chain_id,
        account_number = data.account_number,
        sequence = data.account_sequence,
        "computing sign bytes"
    );

    registry
        .get_sign_bytes(mode, &data, &tx)
        .with_context(|| format!("cannot compute {} sign bytes", mode))
}

fn write_output(bytes: &[u8], format: OutputFormat) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    match format {
        OutputFormat::Hex => writeln!(stdout, "{}", hex::encode(bytes))?,
        OutputFormat::Raw => stdout.write_all(bytes)?,
        OutputFormat::Text => writeln!(stdout, "{}", String::from_utf8_lossy(bytes))?,
    }
    stdout.flush().context("failed to write to stdout")
}

/// Verifies every signature on the transaction file in `args`.
fn verify(registry: &SignModeRegistry, args: &cli::VerifyArgs) -> Result<()> {
    let tx = TxFile::load(&args.tx)?.to_tx()?;
    let accounts = AccountsFile::load(&args.accounts)?.to_table()?;
    let params = match &args.params {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read params file {}", path.display()))?;
            serde_json::from_str::<AuthParams>(&text)
                .with_context(|| format!("failed to parse params file {}", path.display()))?
        }
        None => AuthParams::default(),
    };

    verify_tx_signatures(registry, &accounts, &Ed25519Verifier, &params, &tx)
        .context("signature verification failed")?;

    tracing::info!(
        signers = tx.signers().len(),
        chain_id = %accounts.chain_id(),
        "transaction signatures verified"
    );
    Ok(())
}

/// One line per mode; the registry default is marked.
fn list_modes(registry: &SignModeRegistry, key_type: Option<&str>) -> Result<Vec<String>> {
    let modes = match key_type {
        Some(key_type) => registry.modes_for_key(key_type.parse::<KeyType>()?),
        None => registry.supported_modes(),
    };
    let default = registry.default_mode();
    Ok(modes
        .into_iter()
        .map(|mode| {
            if Some(mode) == default {
                format!("{} (default)", mode)
            } else {
                mode.to_string()
            }
        })
        .collect())
}

/// Prints version information to stdout.
fn print_version() {
    println!("nova-sign {}", env!("CARGO_PKG_VERSION"));
    println!("rustc     {}", rustc_version());
}

/// Returns the Rust compiler version used to build this binary.
fn rustc_version() -> &'static str {
    option_env!("RUSTC_VERSION").unwrap_or("unknown")
}
