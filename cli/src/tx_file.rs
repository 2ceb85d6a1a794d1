//! # Transaction and Account Files
//!
//! JSON formats read by the CLI. Messages use their legacy tagged form, so
//! a transaction file looks much like the document it is signed as:
//!
//! ```text
//! {
//!   "body": {
//!     "messages": [{"type": "cosmos-sdk/MsgSend",
//!                   "value": {"from_address": "nova1...", "to_address": "nova1...",
//!                             "amount": [{"denom": "foocoin", "amount": "10"}]}}],
//!     "memo": "foo",
//!     "timeout_height": 0
//!   },
//!   "auth_info": {
//!     "fee": {"amount": "10foocoin", "gas_limit": 10000},
//!     "signer_infos": [{"public_key": {"type": "ed25519", "key": "<hex>"},
//!                       "mode": "direct"}]
//!   },
//!   "signatures": ["<hex>"]
//! }
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use nova_auth::crypto::{KeyType, PublicKey};
use nova_auth::msgs::{MsgSend, MsgUnjail};
use nova_auth::signing::{AccountRecord, AccountTable, SignMode};
use nova_auth::tx::{Tx, TxBuilder};
use nova_auth::types::{AccAddress, Any, Coins};

/// A message in its legacy `{"type", "value"}` form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum MsgJson {
    #[serde(rename = "cosmos-sdk/MsgSend")]
    Send(MsgSend),
    #[serde(rename = "cosmos-sdk/MsgUnjail")]
    Unjail(MsgUnjail),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BodyJson {
    pub messages: Vec<MsgJson>,
    pub memo: String,
    pub timeout_height: u64,
    pub extension_options: Vec<Any>,
    pub non_critical_extension_options: Vec<Any>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicKeyJson {
    #[serde(rename = "type")]
    pub key_type: KeyType,
    #[serde(with = "hex::serde")]
    pub key: Vec<u8>,
}

impl PublicKeyJson {
    pub fn to_public_key(&self) -> Result<PublicKey> {
        PublicKey::from_bytes(self.key_type, &self.key).context("invalid public key")
    }
}

impl From<&PublicKey> for PublicKeyJson {
    fn from(key: &PublicKey) -> Self {
        Self {
            key_type: key.key_type(),
            key: key.as_bytes().to_vec(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignerInfoJson {
    #[serde(default)]
    pub public_key: Option<PublicKeyJson>,
    /// Canonical `SIGN_MODE_*` name or a short name such as `direct`.
    pub mode: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FeeJson {
    /// Comma-separated coins, e.g. `10foocoin,5stake`.
    pub amount: String,
    pub gas_limit: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthInfoJson {
    pub fee: FeeJson,
    pub signer_infos: Vec<SignerInfoJson>,
}

/// A transaction file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TxFile {
    pub body: BodyJson,
    pub auth_info: AuthInfoJson,
    /// Hex-encoded signatures in signer order.
    pub signatures: Vec<String>,
}

impl TxFile {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read transaction file {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("failed to parse transaction file {}", path.display()))
    }

    /// Build the transaction described by this file.
    pub fn to_tx(&self) -> Result<Tx> {
        let mut builder = TxBuilder::new()
            .memo(self.body.memo.clone())
            .timeout_height(self.body.timeout_height);

        for msg in &self.body.messages {
            builder = match msg {
                MsgJson::Send(m) => builder.message(m.clone()),
                MsgJson::Unjail(m) => builder.message(m.clone()),
            };
        }
        for option in &self.body.extension_options {
            builder = builder.extension_option(option.clone());
        }
        for option in &self.body.non_critical_extension_options {
            builder = builder.non_critical_extension_option(option.clone());
        }

        let fee: Coins = self
            .auth_info
            .fee
            .amount
            .parse()
            .with_context(|| format!("invalid fee amount {:?}", self.auth_info.fee.amount))?;
        builder = builder.fee(fee, self.auth_info.fee.gas_limit);

        for (i, info) in self.auth_info.signer_infos.iter().enumerate() {
            let public_key = info
                .public_key
                .as_ref()
                .map(PublicKeyJson::to_public_key)
                .transpose()
                .with_context(|| format!("signer info {}", i))?;
            let mode: SignMode = info
                .mode
                .parse()
                .with_context(|| format!("signer info {}", i))?;
            builder = builder.signer_info(public_key, mode);
        }

        let signatures = self
            .signatures
            .iter()
            .enumerate()
            .map(|(i, sig)| hex::decode(sig).with_context(|| format!("signature {} is not hex", i)))
            .collect::<Result<Vec<_>>>()?;

        Ok(builder.build().with_signatures(signatures))
    }
}

/// One account entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountJson {
    pub address: AccAddress,
    pub account_number: u64,
    #[serde(default)]
    pub sequence: u64,
    #[serde(default)]
    pub public_key: Option<PublicKeyJson>,
}

/// An accounts file: the chain and its known accounts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountsFile {
    pub chain_id: String,
    #[serde(default)]
    pub accounts: Vec<AccountJson>,
}

impl AccountsFile {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read accounts file {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("failed to parse accounts file {}", path.display()))
    }

    pub fn to_table(&self) -> Result<AccountTable> {
        let table = AccountTable::new(self.chain_id.clone());
        for account in &self.accounts {
            let pub_key = account
                .public_key
                .as_ref()
                .map(PublicKeyJson::to_public_key)
                .transpose()
                .with_context(|| format!("account {}", account.address))?;
            table.insert(
                account.address.clone(),
                AccountRecord {
                    account_number: account.account_number,
                    sequence: account.sequence,
                    pub_key,
                },
            );
        }
        Ok(table)
    }
}
