//! Slashing unjail message.

use prost::Message;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::config::{MSG_UNJAIL_LEGACY_NAME, MSG_UNJAIL_TYPE_URL};
use crate::tx::{legacy_msg_json, Msg, TxError};
use crate::types::{AccAddress, ValAddress};
use crate::wire::MsgUnjailProto;

/// Asks to release a jailed validator. Signed by the operator's account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgUnjail {
    #[serde(rename = "address")]
    pub validator_addr: ValAddress,
}

impl MsgUnjail {
    pub fn new(validator_addr: ValAddress) -> Self {
        Self { validator_addr }
    }
}

impl Msg for MsgUnjail {
    fn type_url(&self) -> &str {
        MSG_UNJAIL_TYPE_URL
    }

    fn legacy_sign_json(&self) -> Result<Value, TxError> {
        Ok(legacy_msg_json(
            MSG_UNJAIL_LEGACY_NAME,
            json!({ "address": self.validator_addr.to_bech32()? }),
        ))
    }

    fn encode_value(&self) -> Result<Vec<u8>, TxError> {
        let proto = MsgUnjailProto {
            validator_addr: self.validator_addr.as_bytes().to_vec(),
        };
        Ok(proto.encode_to_vec())
    }

    fn signers(&self) -> Vec<AccAddress> {
        vec![self.validator_addr.to_account()]
    }

    // Address length is enforced when the ValAddress is constructed.
    fn validate_basic(&self) -> Result<(), TxError> {
        Ok(())
    }
}
