//! The sign-mode handler seam.

use super::error::SignModeError;
use super::mode::SignMode;
use super::signer_data::SignerData;
use crate::tx::{Tx, TxError};

/// A canonicalization algorithm: turns a transaction plus signer metadata
/// into the exact bytes a signer signs.
///
/// Implementations must be pure. The same `(mode, data, tx)` always yields
/// the same bytes, on every platform, and any change to a covered field
/// changes the bytes.
pub trait SignModeHandler: Send + Sync {
    /// The mode this handler prefers.
    fn default_mode(&self) -> SignMode;

    /// Every mode this handler implements.
    fn modes(&self) -> Vec<SignMode>;

    fn get_sign_bytes(
        &self,
        mode: SignMode,
        data: &SignerData,
        tx: &Tx,
    ) -> Result<Vec<u8>, SignModeError>;
}

/// Checks shared by every handler before canonicalization.
pub(crate) fn check_structure(data: &SignerData, tx: &Tx) -> Result<(), TxError> {
    if tx.messages().is_empty() {
        return Err(TxError::NoMessages);
    }
    if data.chain_id.is_empty() {
        return Err(TxError::EmptyChainId);
    }
    Ok(())
}

/// `ModeMismatch` unless `mode` is `expected`.
pub(crate) fn expect_mode(expected: SignMode, mode: SignMode) -> Result<(), SignModeError> {
    if mode != expected {
        return Err(SignModeError::ModeMismatch {
            expected,
            got: mode,
        });
    }
    Ok(())
}
