//! Bank transfer message.

use prost::Message;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::config::{MSG_SEND_LEGACY_NAME, MSG_SEND_TYPE_URL};
use crate::tx::{legacy_msg_json, Msg, TxError};
use crate::types::{AccAddress, Coins};
use crate::wire::MsgSendProto;

/// Moves `amount` from one account to another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgSend {
    pub from_address: AccAddress,
    pub to_address: AccAddress,
    pub amount: Coins,
}

impl MsgSend {
    pub fn new(from_address: AccAddress, to_address: AccAddress, amount: Coins) -> Self {
        Self {
            from_address,
            to_address,
            amount,
        }
    }

    fn invalid(&self, reason: impl Into<String>) -> TxError {
        TxError::InvalidMessage {
            type_url: MSG_SEND_TYPE_URL.to_string(),
            reason: reason.into(),
        }
    }
}

impl Msg for MsgSend {
    fn type_url(&self) -> &str {
        MSG_SEND_TYPE_URL
    }

    fn legacy_sign_json(&self) -> Result<Value, TxError> {
        Ok(legacy_msg_json(
            MSG_SEND_LEGACY_NAME,
            json!({
                "amount": self.amount.to_legacy_json(),
                "from_address": self.from_address.to_bech32()?,
                "to_address": self.to_address.to_bech32()?,
            }),
        ))
    }

    fn encode_value(&self) -> Result<Vec<u8>, TxError> {
        let proto = MsgSendProto {
            from_address: self.from_address.to_bech32()?,
            to_address: self.to_address.to_bech32()?,
            amount: self.amount.to_proto(),
        };
        Ok(proto.encode_to_vec())
    }

    fn signers(&self) -> Vec<AccAddress> {
        vec![self.from_address.clone()]
    }

    fn validate_basic(&self) -> Result<(), TxError> {
        if self.amount.is_empty() {
            return Err(self.invalid("amount is empty"));
        }
        self.amount
            .validate()
            .map_err(|e| self.invalid(e.to_string()))
    }
}
