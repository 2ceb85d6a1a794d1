//! Protobuf wire messages.
//!
//! Field numbers here are frozen: they are part of every Direct-mode
//! signature ever produced. `prost` encodes fields in tag order and has no
//! map fields in these messages, so the encoding of a given value is unique.

use prost::Message;

/// `google.protobuf.Any`
#[derive(Clone, PartialEq, Message)]
pub struct AnyProto {
    #[prost(string, tag = "1")]
    pub type_url: String,
    #[prost(bytes = "vec", tag = "2")]
    pub value: Vec<u8>,
}

/// `cosmos.base.v1beta1.Coin`
#[derive(Clone, PartialEq, Message)]
pub struct CoinProto {
    #[prost(string, tag = "1")]
    pub denom: String,
    #[prost(string, tag = "2")]
    pub amount: String,
}

/// `cosmos.tx.v1beta1.TxBody`
#[derive(Clone, PartialEq, Message)]
pub struct TxBodyProto {
    #[prost(message, repeated, tag = "1")]
    pub messages: Vec<AnyProto>,
    #[prost(string, tag = "2")]
    pub memo: String,
    #[prost(uint64, tag = "3")]
    pub timeout_height: u64,
    #[prost(message, repeated, tag = "1023")]
    pub extension_options: Vec<AnyProto>,
    #[prost(message, repeated, tag = "2047")]
    pub non_critical_extension_options: Vec<AnyProto>,
}

/// `cosmos.tx.v1beta1.ModeInfo.Single`
#[derive(Clone, PartialEq, Message)]
pub struct ModeInfoSingleProto {
    #[prost(int32, tag = "1")]
    pub mode: i32,
}

/// `cosmos.tx.v1beta1.ModeInfo`, single-signer arm of the `sum` oneof.
#[derive(Clone, PartialEq, Message)]
pub struct ModeInfoProto {
    #[prost(message, optional, tag = "1")]
    pub single: Option<ModeInfoSingleProto>,
}

/// `cosmos.tx.v1beta1.SignerInfo`
#[derive(Clone, PartialEq, Message)]
pub struct SignerInfoProto {
    #[prost(message, optional, tag = "1")]
    pub public_key: Option<AnyProto>,
    #[prost(message, optional, tag = "2")]
    pub mode_info: Option<ModeInfoProto>,
}

/// `cosmos.tx.v1beta1.Fee`
#[derive(Clone, PartialEq, Message)]
pub struct FeeProto {
    #[prost(message, repeated, tag = "1")]
    pub amount: Vec<CoinProto>,
    #[prost(uint64, tag = "2")]
    pub gas_limit: u64,
}

/// `cosmos.tx.v1beta1.AuthInfo`
#[derive(Clone, PartialEq, Message)]
pub struct AuthInfoProto {
    #[prost(message, repeated, tag = "1")]
    pub signer_infos: Vec<SignerInfoProto>,
    #[prost(message, optional, tag = "2")]
    pub fee: Option<FeeProto>,
}

/// `cosmos.tx.v1beta1.SignDoc`, the Direct-mode signed document.
#[derive(Clone, PartialEq, Message)]
pub struct SignDocProto {
    #[prost(bytes = "vec", tag = "1")]
    pub body_bytes: Vec<u8>,
    #[prost(bytes = "vec", tag = "2")]
    pub auth_info_bytes: Vec<u8>,
    #[prost(string, tag = "3")]
    pub chain_id: String,
    #[prost(uint64, tag = "4")]
    pub account_number: u64,
    #[prost(uint64, tag = "5")]
    pub account_sequence: u64,
}

/// `cosmos.tx.v1beta1.TxRaw`
#[derive(Clone, PartialEq, Message)]
pub struct TxRawProto {
    #[prost(bytes = "vec", tag = "1")]
    pub body_bytes: Vec<u8>,
    #[prost(bytes = "vec", tag = "2")]
    pub auth_info_bytes: Vec<u8>,
    #[prost(bytes = "vec", repeated, tag = "3")]
    pub signatures: Vec<Vec<u8>>,
}

/// `cosmos.crypto.{ed25519,secp256k1}.PubKey`
#[derive(Clone, PartialEq, Message)]
pub struct PubKeyProto {
    #[prost(bytes = "vec", tag = "1")]
    pub key: Vec<u8>,
}

/// `cosmos.bank.v1beta1.MsgSend`
#[derive(Clone, PartialEq, Message)]
pub struct MsgSendProto {
    #[prost(string, tag = "1")]
    pub from_address: String,
    #[prost(string, tag = "2")]
    pub to_address: String,
    #[prost(message, repeated, tag = "3")]
    pub amount: Vec<CoinProto>,
}

/// `cosmos.slashing.v1beta1.MsgUnjail`
#[derive(Clone, PartialEq, Message)]
pub struct MsgUnjailProto {
    #[prost(bytes = "vec", tag = "1")]
    pub validator_addr: Vec<u8>,
}
