//! # Message Capability
//!
//! A transaction carries an ordered list of type-tagged messages. The sign
//! modes never look inside a message: they ask it for its legacy JSON sign
//! document or its protobuf value bytes, and that is all.

use serde_json::{json, Value};
use std::fmt;

use super::error::TxError;
use crate::types::{AccAddress, Any};

/// Everything the auth layer needs from a message type.
pub trait Msg: fmt::Debug + Send + Sync {
    /// Protobuf type URL, e.g. `/cosmos.bank.v1beta1.MsgSend`.
    fn type_url(&self) -> &str;

    /// The message's contribution to a legacy sign document, usually
    /// `{"type": <legacy name>, "value": {...}}`. Key order does not
    /// matter: the document is canonicalized afterwards.
    fn legacy_sign_json(&self) -> Result<Value, TxError>;

    /// Protobuf encoding of the message, the `value` of its `Any`.
    fn encode_value(&self) -> Result<Vec<u8>, TxError>;

    /// Addresses that must sign, in order.
    fn signers(&self) -> Vec<AccAddress>;

    /// Stateless validation.
    fn validate_basic(&self) -> Result<(), TxError>;

    fn to_any(&self) -> Result<Any, TxError> {
        Ok(Any::new(self.type_url(), self.encode_value()?))
    }
}

/// Wrap a message value in the legacy `{"type", "value"}` envelope.
pub fn legacy_msg_json(name: &str, value: Value) -> Value {
    json!({ "type": name, "value": value })
}
