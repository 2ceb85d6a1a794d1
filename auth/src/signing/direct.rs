//! # Direct Sign Mode
//!
//! Sign-bytes are the protobuf encoding of
//!
//! ```text
//! SignDoc {
//!     body_bytes       = 1,  // encoded TxBody
//!     auth_info_bytes  = 2,  // encoded AuthInfo
//!     chain_id         = 3,
//!     account_number   = 4,
//!     account_sequence = 5,
//! }
//! ```
//!
//! Body and auth info are encoded from the in-memory transaction each
//! time. The body carries every field, including extension options, so
//! nothing is rejected for representability.

use prost::Message;
use tracing::debug;

use super::compat::check_compatibility;
use super::error::SignModeError;
use super::handler::{check_structure, expect_mode, SignModeHandler};
use super::mode::SignMode;
use super::signer_data::SignerData;
use crate::tx::{Tx, TxError};
use crate::wire::SignDocProto;

/// The Direct (protobuf) handler.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectHandler;

impl DirectHandler {
    pub fn new() -> Self {
        Self
    }
}

/// The Direct-mode `SignDoc` for `tx`.
pub fn sign_doc(data: &SignerData, tx: &Tx) -> Result<SignDocProto, TxError> {
    Ok(SignDocProto {
        body_bytes: tx.body_bytes()?,
        auth_info_bytes: tx.auth_info_bytes(),
        chain_id: data.chain_id.clone(),
        account_number: data.account_number,
        account_sequence: data.account_sequence,
    })
}

impl SignModeHandler for DirectHandler {
    fn default_mode(&self) -> SignMode {
        SignMode::Direct
    }

    fn modes(&self) -> Vec<SignMode> {
        vec![SignMode::Direct]
    }

    fn get_sign_bytes(
        &self,
        mode: SignMode,
        data: &SignerData,
        tx: &Tx,
    ) -> Result<Vec<u8>, SignModeError> {
        expect_mode(SignMode::Direct, mode)?;
        check_structure(data, tx)?;
        check_compatibility(mode, tx)?;

        let bytes = sign_doc(data, tx)?.encode_to_vec();
        debug!(
            chain_id = %data.chain_id,
            account_number = data.account_number,
            sequence = data.account_sequence,
            len = bytes.len(),
            "direct sign bytes"
        );
        Ok(bytes)
    }
}
