//! # Transaction Signature Verification
//!
//! Recomputes each signer's sign-bytes through the registry and checks the
//! matching signature. The checks run cheapest first: structure, counts,
//! account lookup and key consistency before any curve arithmetic.
//!
//! The first failure is returned. Nothing is retried and no signer is
//! skipped.

use thiserror::Error;
use tracing::debug;

use crate::config::AuthParams;
use crate::crypto::{KeyType, PublicKey, SignatureError, SignatureVerifier};
use crate::signing::{AccountError, SignMode, SignModeError, SignModeRegistry, SignerDataProvider};
use crate::tx::{Tx, TxError};
use crate::types::AccAddress;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Why a transaction's signatures were not accepted. Per-signer variants
/// carry the signer's position.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerificationError {
    #[error("invalid transaction: {0}")]
    InvalidTx(#[from] TxError),

    #[error("transaction is unsigned")]
    MissingSignatures,

    #[error("transaction has {infos} signer infos but {signers} signers")]
    SignerInfoCountMismatch { infos: usize, signers: usize },

    #[error("signer {index}: {source}")]
    Account {
        index: usize,
        #[source]
        source: AccountError,
    },

    #[error("signer {index} ({address}) has no public key in the transaction or on chain")]
    MissingPublicKey { index: usize, address: String },

    #[error("signer {index} ({address}) declares a public key that differs from the registered one")]
    PubKeyMismatch { index: usize, address: String },

    #[error("signer {index} ({address}) is not the account controlled by its public key")]
    PubKeyAddressMismatch { index: usize, address: String },

    #[error("signer {index}: {key_type} keys may not sign with {mode}")]
    ModeNotPermitted {
        index: usize,
        mode: SignMode,
        key_type: KeyType,
    },

    #[error("signer {index}: {source}")]
    SignBytes {
        index: usize,
        #[source]
        source: SignModeError,
    },

    #[error("signer {index}: {source}")]
    Signature {
        index: usize,
        #[source]
        source: SignatureError,
    },
}

// ---------------------------------------------------------------------------
// Verification
// ---------------------------------------------------------------------------

/// Verify every signature on `tx`.
///
/// Signer `i` is `tx.signers()[i]`, described by `tx.signer_infos()[i]` and
/// signed `tx.signatures()[i]`. A public key in the signer info must agree
/// with the key the provider has on record; when the signer info omits the
/// key, the recorded one is used. Either way the key must derive to the
/// signer's address.
pub fn verify_tx_signatures(
    registry: &SignModeRegistry,
    provider: &dyn SignerDataProvider,
    verifier: &dyn SignatureVerifier,
    params: &AuthParams,
    tx: &Tx,
) -> Result<(), VerificationError> {
    tx.validate_basic(params)?;
    if tx.signatures().is_empty() {
        return Err(VerificationError::MissingSignatures);
    }

    let signers = tx.signers();
    let infos = tx.signer_infos();
    if infos.len() != signers.len() {
        return Err(VerificationError::SignerInfoCountMismatch {
            infos: infos.len(),
            signers: signers.len(),
        });
    }

    for (index, ((address, info), signature)) in signers
        .iter()
        .zip(infos)
        .zip(tx.signatures())
        .enumerate()
    {
        let data = provider
            .signer_data(address)
            .map_err(|source| VerificationError::Account { index, source })?;

        let public_key = resolve_public_key(
            index,
            address,
            info.public_key.as_ref(),
            provider.registered_pub_key(address),
        )?;

        let key_type = public_key.key_type();
        if !registry.is_permitted(key_type, info.mode) {
            return Err(VerificationError::ModeNotPermitted {
                index,
                mode: info.mode,
                key_type,
            });
        }

        let sign_bytes = registry
            .get_sign_bytes(info.mode, &data, tx)
            .map_err(|source| VerificationError::SignBytes { index, source })?;

        verifier
            .verify(&public_key, &sign_bytes, signature)
            .map_err(|source| VerificationError::Signature { index, source })?;

        debug!(
            index,
            signer = %address,
            mode = %info.mode,
            sequence = data.account_sequence,
            "signature verified"
        );
    }

    Ok(())
}

fn resolve_public_key(
    index: usize,
    address: &AccAddress,
    declared: Option<&PublicKey>,
    registered: Option<PublicKey>,
) -> Result<PublicKey, VerificationError> {
    let key = match (declared, registered) {
        (Some(declared), Some(registered)) if *declared != registered => {
            return Err(VerificationError::PubKeyMismatch {
                index,
                address: address.to_string(),
            })
        }
        (Some(declared), _) => declared.clone(),
        (None, Some(registered)) => registered,
        (None, None) => {
            return Err(VerificationError::MissingPublicKey {
                index,
                address: address.to_string(),
            })
        }
    };

    if key.address() != *address {
        return Err(VerificationError::PubKeyAddressMismatch {
            index,
            address: address.to_string(),
        });
    }
    Ok(key)
}
