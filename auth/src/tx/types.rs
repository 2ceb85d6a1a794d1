//! Body and auth-info parts of a transaction, with their protobuf forms.

use std::sync::Arc;

use super::error::TxError;
use super::msg::Msg;
use crate::crypto::PublicKey;
use crate::signing::SignMode;
use crate::types::{Any, Coins};
use crate::wire::{
    AnyProto, AuthInfoProto, FeeProto, ModeInfoProto, ModeInfoSingleProto, SignerInfoProto,
    TxBodyProto,
};

// ---------------------------------------------------------------------------
// Body
// ---------------------------------------------------------------------------

/// What the transaction does.
#[derive(Debug, Clone, Default)]
pub struct TxBody {
    /// Ordered messages. Order is part of the signed content.
    pub messages: Vec<Arc<dyn Msg>>,
    pub memo: String,
    /// Block height after which the transaction is invalid. `0` means unset.
    pub timeout_height: u64,
    /// Extensions a node must understand to accept the transaction.
    pub extension_options: Vec<Any>,
    /// Extensions a node may ignore.
    pub non_critical_extension_options: Vec<Any>,
}

impl TxBody {
    pub fn to_proto(&self) -> Result<TxBodyProto, TxError> {
        let messages = self
            .messages
            .iter()
            .map(|m| m.to_any().map(AnyProto::from))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(TxBodyProto {
            messages,
            memo: self.memo.clone(),
            timeout_height: self.timeout_height,
            extension_options: self
                .extension_options
                .iter()
                .cloned()
                .map(AnyProto::from)
                .collect(),
            non_critical_extension_options: self
                .non_critical_extension_options
                .iter()
                .cloned()
                .map(AnyProto::from)
                .collect(),
        })
    }
}

// ---------------------------------------------------------------------------
// Auth info
// ---------------------------------------------------------------------------

/// Gas budget and the coins paid for it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fee {
    pub amount: Coins,
    pub gas_limit: u64,
}

impl Fee {
    pub fn new(amount: Coins, gas_limit: u64) -> Self {
        Self { amount, gas_limit }
    }

    pub fn to_proto(&self) -> FeeProto {
        FeeProto {
            amount: self.amount.to_proto(),
            gas_limit: self.gas_limit,
        }
    }
}

/// The key and sign mode of one signer, aligned by position with
/// [`super::Tx::signers`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignerInfo {
    /// May be omitted once the account's key is known on chain.
    pub public_key: Option<PublicKey>,
    pub mode: SignMode,
}

impl SignerInfo {
    pub fn new(public_key: Option<PublicKey>, mode: SignMode) -> Self {
        Self { public_key, mode }
    }

    pub fn to_proto(&self) -> SignerInfoProto {
        SignerInfoProto {
            public_key: self.public_key.as_ref().map(|pk| pk.to_any().into()),
            mode_info: Some(ModeInfoProto {
                single: Some(ModeInfoSingleProto {
                    mode: self.mode.as_i32(),
                }),
            }),
        }
    }
}

/// Who pays and how each signer signs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthInfo {
    pub signer_infos: Vec<SignerInfo>,
    pub fee: Fee,
}

impl AuthInfo {
    pub fn to_proto(&self) -> AuthInfoProto {
        AuthInfoProto {
            signer_infos: self.signer_infos.iter().map(SignerInfo::to_proto).collect(),
            fee: Some(self.fee.to_proto()),
        }
    }
}
