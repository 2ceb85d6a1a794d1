// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # NOVA Auth: Sign-Mode Handler Framework
//!
//! The transaction-authentication layer of a NOVA node. Given a transaction
//! and a signer, it defines the exact bytes that signer signs, and it
//! refuses to produce those bytes when the chosen mode cannot cover
//! everything the transaction says. Any ambiguity about "what was signed"
//! is a forgery waiting to happen, so there is none.
//!
//! ## Architecture
//!
//! - **types**: Addresses, coins and type-tagged `Any` payloads.
//! - **crypto**: Public keys and the signature verifier seam.
//! - **tx**: The immutable transaction and its builder.
//! - **msgs**: Bank and slashing messages.
//! - **signing**: Sign modes, handlers, the registry and the compatibility guard.
//! - **verification**: Per-signer signature verification.
//! - **wire**: Protobuf messages behind Direct mode and the raw encoding.
//! - **config**: Protocol constants and validation parameters.
//!
//! ## Design Philosophy
//!
//! 1. Sign-bytes are a pure function of mode, signer data and transaction.
//! 2. Anything a node enforces is covered by the signature, or the
//!    transaction is rejected.
//! 3. No floats anywhere near amounts.

pub mod config;
pub mod crypto;
pub mod msgs;
pub mod signing;
pub mod tx;
pub mod types;
pub mod verification;
pub mod wire;

pub use config::AuthParams;
pub use signing::{SignMode, SignModeError, SignModeHandler, SignModeRegistry, SignerData};
pub use tx::{Tx, TxBuilder};
pub use verification::{verify_tx_signatures, VerificationError};
