//! # Legacy Amino-JSON Sign Mode
//!
//! Sign-bytes are the canonical JSON of a `StdSignDoc`:
//!
//! ```text
//! {"account_number":"7","chain_id":"test-chain",
//!  "fee":{"amount":[{"amount":"10","denom":"foocoin"}],"gas":"10000"},
//!  "memo":"foo","msgs":[...],"sequence":"7"}
//! ```
//!
//! (shown wrapped, the real bytes contain no whitespace). Integers the
//! legacy format types as strings are decimal strings. The document has no
//! slot for timeout height or extension options, so a transaction that sets
//! any of them is refused here instead of being signed partially.

use serde_json::{json, Value};
use tracing::debug;

use super::canonical_json::to_canonical_bytes;
use super::compat::check_compatibility;
use super::error::SignModeError;
use super::handler::{check_structure, expect_mode, SignModeHandler};
use super::mode::SignMode;
use super::signer_data::SignerData;
use crate::tx::{Tx, TxError};

/// The legacy Amino-JSON handler.
#[derive(Debug, Clone, Copy, Default)]
pub struct LegacyAminoJsonHandler;

impl LegacyAminoJsonHandler {
    pub fn new() -> Self {
        Self
    }
}

/// The `StdSignDoc` for `tx` as a JSON value, before canonicalization.
pub fn std_sign_doc(data: &SignerData, tx: &Tx) -> Result<Value, TxError> {
    let msgs = tx
        .messages()
        .iter()
        .map(|m| m.legacy_sign_json())
        .collect::<Result<Vec<_>, _>>()?;
    let fee = tx.fee();
    Ok(json!({
        "account_number": data.account_number.to_string(),
        "chain_id": data.chain_id,
        "fee": {
            "amount": fee.amount.to_legacy_json(),
            "gas": fee.gas_limit.to_string(),
        },
        "memo": tx.memo(),
        "msgs": msgs,
        "sequence": data.account_sequence.to_string(),
    }))
}

impl SignModeHandler for LegacyAminoJsonHandler {
    fn default_mode(&self) -> SignMode {
        SignMode::LegacyAminoJson
    }

    fn modes(&self) -> Vec<SignMode> {
        vec![SignMode::LegacyAminoJson]
    }

    fn get_sign_bytes(
        &self,
        mode: SignMode,
        data: &SignerData,
        tx: &Tx,
    ) -> Result<Vec<u8>, SignModeError> {
        expect_mode(SignMode::LegacyAminoJson, mode)?;
        check_structure(data, tx)?;
        check_compatibility(mode, tx)?;

        let doc = std_sign_doc(data, tx)?;
        let bytes =
            to_canonical_bytes(&doc).map_err(|e| SignModeError::Encoding(e.to_string()))?;
        debug!(
            chain_id = %data.chain_id,
            account_number = data.account_number,
            sequence = data.account_sequence,
            len = bytes.len(),
            "legacy amino-json sign bytes"
        );
        Ok(bytes)
    }
}
