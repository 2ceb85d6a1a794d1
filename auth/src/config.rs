//! # Auth Configuration & Constants
//!
//! Every constant that ends up inside sign-bytes or gates transaction
//! validation lives here. Most of these are part of a wire format that
//! already-signed transactions depend on: changing one after launch
//! invalidates every signature made under the old value.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Address Prefixes
// ---------------------------------------------------------------------------

/// Bech32 human-readable prefix for account addresses.
pub const ACCOUNT_HRP: &str = "nova";

/// Bech32 human-readable prefix for validator operator addresses.
pub const VALIDATOR_HRP: &str = "novavaloper";

/// Longest raw address accepted, in bytes.
pub const MAX_ADDRESS_LENGTH: usize = 255;

// ---------------------------------------------------------------------------
// Type URLs
// ---------------------------------------------------------------------------

/// Protobuf type URL of an Ed25519 public key.
pub const ED25519_PUBKEY_TYPE_URL: &str = "/cosmos.crypto.ed25519.PubKey";

/// Protobuf type URL of a compressed secp256k1 public key.
pub const SECP256K1_PUBKEY_TYPE_URL: &str = "/cosmos.crypto.secp256k1.PubKey";

/// Protobuf type URL of the bank send message.
pub const MSG_SEND_TYPE_URL: &str = "/cosmos.bank.v1beta1.MsgSend";

/// Protobuf type URL of the slashing unjail message.
pub const MSG_UNJAIL_TYPE_URL: &str = "/cosmos.slashing.v1beta1.MsgUnjail";

// ---------------------------------------------------------------------------
// Legacy (amino) names
// ---------------------------------------------------------------------------

/// Legacy JSON `type` tag of the bank send message.
pub const MSG_SEND_LEGACY_NAME: &str = "cosmos-sdk/MsgSend";

/// Legacy JSON `type` tag of the slashing unjail message.
pub const MSG_UNJAIL_LEGACY_NAME: &str = "cosmos-sdk/MsgUnjail";

// ---------------------------------------------------------------------------
// Key Material
// ---------------------------------------------------------------------------

/// Ed25519 public key length in bytes.
pub const ED25519_PUBKEY_LENGTH: usize = 32;

/// Compressed secp256k1 public key length in bytes.
pub const SECP256K1_PUBKEY_LENGTH: usize = 33;

/// Ed25519 signature length in bytes.
pub const ED25519_SIGNATURE_LENGTH: usize = 64;

/// Length of an account address derived from a public key.
pub const DERIVED_ADDRESS_LENGTH: usize = 20;

// ---------------------------------------------------------------------------
// Validation Limits
// ---------------------------------------------------------------------------

/// Default maximum memo length, counted in characters.
pub const DEFAULT_MAX_MEMO_CHARACTERS: usize = 256;

/// Default maximum number of signatures a single transaction may carry.
pub const DEFAULT_TX_SIG_LIMIT: usize = 7;

/// Upper bound on a denomination's length.
pub const MAX_DENOM_LENGTH: usize = 128;

/// Tunable validation parameters for transaction structure.
///
/// These are the knobs an operator is allowed to turn. They never affect
/// sign-bytes, only whether a transaction is accepted at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthParams {
    /// Maximum memo length in characters.
    pub max_memo_characters: usize,
    /// Maximum number of signatures per transaction.
    pub tx_sig_limit: usize,
}

impl Default for AuthParams {
    fn default() -> Self {
        Self {
            max_memo_characters: DEFAULT_MAX_MEMO_CHARACTERS,
            tx_sig_limit: DEFAULT_TX_SIG_LIMIT,
        }
    }
}
