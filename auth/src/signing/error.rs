//! Sign-mode errors.

use thiserror::Error;

use super::compat::TxField;
use super::mode::SignMode;
use crate::tx::TxError;

/// Failures from the sign-mode handlers and their registry.
///
/// None of these are retried: a rejected transaction stays rejected until
/// the caller changes it or picks another mode.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignModeError {
    /// No handler is registered for the mode.
    #[error("sign mode {0} is not supported")]
    UnsupportedMode(SignMode),

    /// A handler was invoked with, or registered for, a mode it does not
    /// implement.
    #[error("expected sign mode {expected}, got {got}")]
    ModeMismatch { expected: SignMode, got: SignMode },

    /// The mode cannot represent a field the transaction populates.
    #[error("cannot use {mode} signing: transaction has {field}")]
    IncompatibleField { mode: SignMode, field: TxField },

    /// The transaction or signer data is structurally unusable.
    #[error("malformed input: {0}")]
    MalformedInput(#[from] TxError),

    /// The sign document could not be serialized.
    #[error("sign document encoding failed: {0}")]
    Encoding(String),

    /// A handler is already registered for the mode.
    #[error("a handler for sign mode {0} is already registered")]
    DuplicateMode(SignMode),
}
