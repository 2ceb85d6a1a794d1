//! # Signer Metadata
//!
//! Per-signer context mixed into sign-bytes: which chain, which account,
//! which sequence. A signature produced for one `(chain_id, account_number,
//! account_sequence)` is worthless for any other, which is what makes
//! replay across chains or after a sequence bump impossible.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;
use tracing::debug;

use crate::crypto::PublicKey;
use crate::types::AccAddress;

/// Signer context for one signing attempt. Build a fresh value each time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SignerData {
    pub chain_id: String,
    pub account_number: u64,
    pub account_sequence: u64,
}

impl SignerData {
    pub fn new(chain_id: impl Into<String>, account_number: u64, account_sequence: u64) -> Self {
        Self {
            chain_id: chain_id.into(),
            account_number,
            account_sequence,
        }
    }
}

/// Errors resolving signer metadata.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccountError {
    #[error("unknown account: {0}")]
    UnknownAccount(String),

    #[error("account table serves chain {expected}, not {got}")]
    ChainMismatch { expected: String, got: String },
}

/// Resolves an account address to its signer metadata.
///
/// Account state lives outside the auth layer; this is the seam through
/// which it is read.
pub trait SignerDataProvider: Send + Sync {
    fn signer_data(&self, address: &AccAddress) -> Result<SignerData, AccountError>;

    /// The public key already registered for the account, if any.
    fn registered_pub_key(&self, _address: &AccAddress) -> Option<PublicKey> {
        None
    }
}

/// State of one account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountRecord {
    pub account_number: u64,
    pub sequence: u64,
    pub pub_key: Option<PublicKey>,
}

/// In-memory accounts of a single chain.
#[derive(Debug)]
pub struct AccountTable {
    chain_id: String,
    accounts: RwLock<HashMap<AccAddress, AccountRecord>>,
}

impl AccountTable {
    pub fn new(chain_id: impl Into<String>) -> Self {
        Self {
            chain_id: chain_id.into(),
            accounts: RwLock::new(HashMap::new()),
        }
    }

    pub fn chain_id(&self) -> &str {
        &self.chain_id
    }

    /// Insert or replace an account.
    pub fn insert(&self, address: AccAddress, record: AccountRecord) {
        debug!(
            address = %address,
            account_number = record.account_number,
            sequence = record.sequence,
            "account stored"
        );
        self.accounts.write().insert(address, record);
    }

    pub fn get(&self, address: &AccAddress) -> Option<AccountRecord> {
        self.accounts.read().get(address).cloned()
    }

    /// Bump an account's sequence after one of its transactions was
    /// accepted. Returns the new sequence.
    pub fn increment_sequence(&self, address: &AccAddress) -> Result<u64, AccountError> {
        let mut accounts = self.accounts.write();
        let record = accounts
            .get_mut(address)
            .ok_or_else(|| AccountError::UnknownAccount(address.to_string()))?;
        record.sequence += 1;
        Ok(record.sequence)
    }

    /// Metadata for `address`, checked against the chain the caller expects.
    pub fn signer_data_for_chain(
        &self,
        address: &AccAddress,
        chain_id: &str,
    ) -> Result<SignerData, AccountError> {
        if chain_id != self.chain_id {
            return Err(AccountError::ChainMismatch {
                expected: self.chain_id.clone(),
                got: chain_id.to_string(),
            });
        }
        self.signer_data(address)
    }
}

impl SignerDataProvider for AccountTable {
    fn signer_data(&self, address: &AccAddress) -> Result<SignerData, AccountError> {
        let record = self
            .get(address)
            .ok_or_else(|| AccountError::UnknownAccount(address.to_string()))?;
        Ok(SignerData::new(
            self.chain_id.clone(),
            record.account_number,
            record.sequence,
        ))
    }

    fn registered_pub_key(&self, address: &AccAddress) -> Option<PublicKey> {
        self.get(address).and_then(|r| r.pub_key)
    }
}
