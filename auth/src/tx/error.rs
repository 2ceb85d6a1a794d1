//! Structural transaction errors.

use thiserror::Error;

use crate::types::{AddressError, CoinError};

/// Why a transaction is not well formed.
///
/// These are stateless checks: nothing here needs account state or a
/// chain id beyond its presence.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TxError {
    #[error("transaction has no messages")]
    NoMessages,

    #[error("invalid {type_url} message: {reason}")]
    InvalidMessage { type_url: String, reason: String },

    #[error("memo is {len} characters, maximum is {max}")]
    MemoTooLong { len: usize, max: usize },

    #[error("invalid fee: {0}")]
    InvalidFee(#[from] CoinError),

    #[error("transaction carries {count} signatures, limit is {limit}")]
    TooManySignatures { count: usize, limit: usize },

    #[error("transaction has {signatures} signatures but {signers} signers")]
    SignatureCountMismatch { signatures: usize, signers: usize },

    #[error("address error: {0}")]
    Address(#[from] AddressError),

    #[error("chain id must not be empty")]
    EmptyChainId,
}
