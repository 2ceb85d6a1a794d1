//! # Public Keys
//!
//! Signer public keys as they appear in a transaction's auth info. This
//! module only carries key *bytes*: parsing them into curve points is the
//! verifier's job (see [`super::verifier`]), and private keys never enter
//! this crate at all.
//!
//! A key also determines the account it controls: [`PublicKey::address`]
//! hashes the key bytes down to a 20-byte account address, so a declared
//! key can be checked against the signer it claims to speak for.

use prost::Message;
use ripemd::Ripemd160;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use thiserror::Error;

use crate::config::{
    DERIVED_ADDRESS_LENGTH, ED25519_PUBKEY_LENGTH, ED25519_PUBKEY_TYPE_URL, SECP256K1_PUBKEY_LENGTH,
    SECP256K1_PUBKEY_TYPE_URL,
};
use crate::types::{AccAddress, Any};
use crate::wire::PubKeyProto;

/// Errors that can occur while decoding a public key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    #[error("unknown public key type: {0}")]
    UnknownType(String),

    #[error("invalid {key_type} public key length: expected {expected} bytes, got {got}")]
    InvalidLength {
        key_type: KeyType,
        expected: usize,
        got: usize,
    },

    #[error("public key payload is not valid protobuf: {0}")]
    Decode(String),
}

/// The algorithm family of a public key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyType {
    Ed25519,
    Secp256k1,
}

impl KeyType {
    pub const ALL: [KeyType; 2] = [KeyType::Ed25519, KeyType::Secp256k1];

    pub fn type_url(self) -> &'static str {
        match self {
            KeyType::Ed25519 => ED25519_PUBKEY_TYPE_URL,
            KeyType::Secp256k1 => SECP256K1_PUBKEY_TYPE_URL,
        }
    }

    pub fn key_length(self) -> usize {
        match self {
            KeyType::Ed25519 => ED25519_PUBKEY_LENGTH,
            KeyType::Secp256k1 => SECP256K1_PUBKEY_LENGTH,
        }
    }
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyType::Ed25519 => f.write_str("ed25519"),
            KeyType::Secp256k1 => f.write_str("secp256k1"),
        }
    }
}

impl std::str::FromStr for KeyType {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ed25519" => Ok(KeyType::Ed25519),
            "secp256k1" => Ok(KeyType::Secp256k1),
            other => Err(KeyError::UnknownType(other.to_string())),
        }
    }
}

/// A signer's public key.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum PublicKey {
    Ed25519([u8; 32]),
    Secp256k1([u8; 33]),
}

impl PublicKey {
    /// Build a key of the given type from raw bytes, checking the length.
    pub fn from_bytes(key_type: KeyType, bytes: &[u8]) -> Result<Self, KeyError> {
        let wrong_length = || KeyError::InvalidLength {
            key_type,
            expected: key_type.key_length(),
            got: bytes.len(),
        };
        match key_type {
            KeyType::Ed25519 => bytes
                .try_into()
                .map(PublicKey::Ed25519)
                .map_err(|_| wrong_length()),
            KeyType::Secp256k1 => bytes
                .try_into()
                .map(PublicKey::Secp256k1)
                .map_err(|_| wrong_length()),
        }
    }

    pub fn key_type(&self) -> KeyType {
        match self {
            PublicKey::Ed25519(_) => KeyType::Ed25519,
            PublicKey::Secp256k1(_) => KeyType::Secp256k1,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            PublicKey::Ed25519(bytes) => bytes,
            PublicKey::Secp256k1(bytes) => bytes,
        }
    }

    /// The account address this key controls.
    ///
    /// Ed25519: first 20 bytes of `SHA-256(key)`.
    /// Secp256k1: `RIPEMD-160(SHA-256(key))`.
    pub fn address(&self) -> AccAddress {
        let mut out = [0u8; DERIVED_ADDRESS_LENGTH];
        match self {
            PublicKey::Ed25519(bytes) => {
                let digest = Sha256::digest(bytes);
                out.copy_from_slice(&digest[..DERIVED_ADDRESS_LENGTH]);
            }
            PublicKey::Secp256k1(bytes) => {
                let digest = Ripemd160::digest(Sha256::digest(bytes));
                out.copy_from_slice(&digest[..DERIVED_ADDRESS_LENGTH]);
            }
        }
        AccAddress::from(out)
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.as_bytes())
    }

    /// Protobuf `Any` form, as embedded in a signer info.
    pub fn to_any(&self) -> Any {
        let value = PubKeyProto {
            key: self.as_bytes().to_vec(),
        }
        .encode_to_vec();
        Any::new(self.key_type().type_url(), value)
    }

    /// Inverse of [`PublicKey::to_any`].
    pub fn from_any(any: &Any) -> Result<Self, KeyError> {
        let key_type = KeyType::ALL
            .into_iter()
            .find(|kt| kt.type_url() == any.type_url)
            .ok_or_else(|| KeyError::UnknownType(any.type_url.clone()))?;
        let proto = PubKeyProto::decode(any.value.as_slice())
            .map_err(|e| KeyError::Decode(e.to_string()))?;
        Self::from_bytes(key_type, &proto.key)
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({}:{})", self.key_type(), self.to_hex())
    }
}
