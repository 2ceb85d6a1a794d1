//! Transaction construction via the builder pattern.
//!
//! A [`Tx`] has no setters. The [`TxBuilder`] is the only way to assemble
//! one, and [`Tx::with_signatures`] the only way to attach signatures, which
//! yields a new value instead of touching the old one. Sign-bytes computed
//! from a `Tx` therefore stay valid for as long as that `Tx` exists.

use prost::Message;
use sha2::{Digest, Sha256};
use std::sync::Arc;

use super::error::TxError;
use super::msg::Msg;
use super::types::{AuthInfo, Fee, SignerInfo, TxBody};
use crate::config::AuthParams;
use crate::crypto::PublicKey;
use crate::signing::SignMode;
use crate::types::{AccAddress, Any, Coins};
use crate::wire::TxRawProto;

// ---------------------------------------------------------------------------
// Tx
// ---------------------------------------------------------------------------

/// An immutable transaction.
///
/// # Raw Encoding
///
/// [`Tx::to_raw_bytes`] produces the protobuf `TxRaw` form: the encoded
/// body, the encoded auth info and the signatures. The transaction hash is
/// the SHA-256 of those bytes.
#[derive(Debug, Clone)]
pub struct Tx {
    body: TxBody,
    auth_info: AuthInfo,
    signatures: Vec<Vec<u8>>,
}

impl Tx {
    pub fn body(&self) -> &TxBody {
        &self.body
    }

    pub fn auth_info(&self) -> &AuthInfo {
        &self.auth_info
    }

    pub fn signatures(&self) -> &[Vec<u8>] {
        &self.signatures
    }

    pub fn messages(&self) -> &[Arc<dyn Msg>] {
        &self.body.messages
    }

    pub fn memo(&self) -> &str {
        &self.body.memo
    }

    pub fn timeout_height(&self) -> u64 {
        self.body.timeout_height
    }

    pub fn extension_options(&self) -> &[Any] {
        &self.body.extension_options
    }

    pub fn non_critical_extension_options(&self) -> &[Any] {
        &self.body.non_critical_extension_options
    }

    pub fn fee(&self) -> &Fee {
        &self.auth_info.fee
    }

    pub fn signer_infos(&self) -> &[SignerInfo] {
        &self.auth_info.signer_infos
    }

    /// Signer addresses of all messages, deduplicated, in first-seen order.
    ///
    /// This is the order that signer infos and signatures follow.
    pub fn signers(&self) -> Vec<AccAddress> {
        let mut signers: Vec<AccAddress> = Vec::new();
        for msg in &self.body.messages {
            for signer in msg.signers() {
                if !signers.contains(&signer) {
                    signers.push(signer);
                }
            }
        }
        signers
    }

    /// Stateless structural validation.
    ///
    /// Signatures are optional here so an unsigned transaction can be
    /// validated before it is signed; when present their count must match
    /// the signer count.
    pub fn validate_basic(&self, params: &AuthParams) -> Result<(), TxError> {
        if self.body.messages.is_empty() {
            return Err(TxError::NoMessages);
        }
        for msg in &self.body.messages {
            msg.validate_basic()?;
        }

        let memo_len = self.body.memo.chars().count();
        if memo_len > params.max_memo_characters {
            return Err(TxError::MemoTooLong {
                len: memo_len,
                max: params.max_memo_characters,
            });
        }

        self.auth_info.fee.amount.validate()?;

        if self.signatures.len() > params.tx_sig_limit {
            return Err(TxError::TooManySignatures {
                count: self.signatures.len(),
                limit: params.tx_sig_limit,
            });
        }

        if !self.signatures.is_empty() {
            let signers = self.signers().len();
            if self.signatures.len() != signers {
                return Err(TxError::SignatureCountMismatch {
                    signatures: self.signatures.len(),
                    signers,
                });
            }
        }

        Ok(())
    }

    /// A copy of this transaction carrying the given signatures.
    pub fn with_signatures(&self, signatures: Vec<Vec<u8>>) -> Tx {
        Tx {
            body: self.body.clone(),
            auth_info: self.auth_info.clone(),
            signatures,
        }
    }

    /// Protobuf encoding of the body.
    pub fn body_bytes(&self) -> Result<Vec<u8>, TxError> {
        Ok(self.body.to_proto()?.encode_to_vec())
    }

    /// Protobuf encoding of the auth info.
    pub fn auth_info_bytes(&self) -> Vec<u8> {
        self.auth_info.to_proto().encode_to_vec()
    }

    /// Protobuf `TxRaw` encoding.
    pub fn to_raw_bytes(&self) -> Result<Vec<u8>, TxError> {
        let raw = TxRawProto {
            body_bytes: self.body_bytes()?,
            auth_info_bytes: self.auth_info_bytes(),
            signatures: self.signatures.clone(),
        };
        Ok(raw.encode_to_vec())
    }

    /// SHA-256 of [`Tx::to_raw_bytes`].
    pub fn hash(&self) -> Result<[u8; 32], TxError> {
        Ok(Sha256::digest(self.to_raw_bytes()?).into())
    }

    pub fn hash_hex(&self) -> Result<String, TxError> {
        self.hash().map(hex::encode_upper)
    }
}

// ---------------------------------------------------------------------------
// TxBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`Tx`].
///
/// ```rust,no_run
/// use nova_auth::msgs::MsgSend;
/// use nova_auth::signing::SignMode;
/// use nova_auth::tx::TxBuilder;
/// use nova_auth::types::{AccAddress, Coins};
///
/// let from = AccAddress::from([1u8; 20]);
/// let to = AccAddress::from([2u8; 20]);
/// let amount: Coins = "10foocoin".parse().unwrap();
/// let tx = TxBuilder::new()
///     .message(MsgSend::new(from, to, amount))
///     .memo("rent")
///     .fee("1foocoin".parse().unwrap(), 200_000)
///     .signer_info(None, SignMode::Direct)
///     .build();
/// ```
#[derive(Debug, Clone, Default)]
pub struct TxBuilder {
    body: TxBody,
    auth_info: AuthInfo,
}

impl TxBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing transaction's body and auth info. Signatures
    /// are not carried over.
    pub fn from_tx(tx: &Tx) -> Self {
        Self {
            body: tx.body.clone(),
            auth_info: tx.auth_info.clone(),
        }
    }

    /// Appends a message.
    pub fn message(self, msg: impl Msg + 'static) -> Self {
        self.message_arc(Arc::new(msg))
    }

    /// Appends an already shared message.
    pub fn message_arc(mut self, msg: Arc<dyn Msg>) -> Self {
        self.body.messages.push(msg);
        self
    }

    pub fn memo(mut self, memo: impl Into<String>) -> Self {
        self.body.memo = memo.into();
        self
    }

    pub fn timeout_height(mut self, height: u64) -> Self {
        self.body.timeout_height = height;
        self
    }

    pub fn extension_option(mut self, option: Any) -> Self {
        self.body.extension_options.push(option);
        self
    }

    pub fn non_critical_extension_option(mut self, option: Any) -> Self {
        self.body.non_critical_extension_options.push(option);
        self
    }

    pub fn fee(mut self, amount: Coins, gas_limit: u64) -> Self {
        self.auth_info.fee = Fee::new(amount, gas_limit);
        self
    }

    /// Appends a signer info. Call once per signer, in signer order.
    pub fn signer_info(mut self, public_key: Option<PublicKey>, mode: SignMode) -> Self {
        self.auth_info
            .signer_infos
            .push(SignerInfo::new(public_key, mode));
        self
    }

    /// Produces an unsigned [`Tx`]. Validation is left to
    /// [`Tx::validate_basic`] and the sign modes.
    pub fn build(self) -> Tx {
        Tx {
            body: self.body,
            auth_info: self.auth_info,
            signatures: Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
