//! # Bech32 Addresses
//!
//! Accounts and validator operators are identified by raw address bytes,
//! rendered as Bech32 with a role-specific human-readable prefix:
//!
//! ```text
//! AccAddress  -> nova1...
//! ValAddress  -> novavaloper1...
//! ```
//!
//! Both wrap the same bytes. A validator operator signs with the account
//! that shares its address bytes, see [`ValAddress::to_account`].

use bech32::{Bech32, Hrp};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::config::{ACCOUNT_HRP, MAX_ADDRESS_LENGTH, VALIDATOR_HRP};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors that can occur while building or parsing an address.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    /// The Bech32 string could not be decoded.
    #[error("bech32 decode error: {0}")]
    Bech32Decode(String),

    /// The decoded address has an unexpected human-readable prefix.
    #[error("invalid HRP: expected '{expected}', got '{got}'")]
    InvalidHrp {
        /// The expected HRP.
        expected: String,
        /// The HRP that was actually found.
        got: String,
    },

    /// The raw address is empty or longer than [`MAX_ADDRESS_LENGTH`].
    #[error("invalid address length: {0} bytes")]
    InvalidLength(usize),
}

fn check_length(bytes: &[u8]) -> Result<(), AddressError> {
    if bytes.is_empty() || bytes.len() > MAX_ADDRESS_LENGTH {
        return Err(AddressError::InvalidLength(bytes.len()));
    }
    Ok(())
}

fn encode(hrp: &str, bytes: &[u8]) -> Result<String, AddressError> {
    let hrp = Hrp::parse(hrp).map_err(|e| AddressError::Bech32Decode(e.to_string()))?;
    bech32::encode::<Bech32>(hrp, bytes).map_err(|e| AddressError::Bech32Decode(e.to_string()))
}

fn decode(expected_hrp: &str, s: &str) -> Result<Vec<u8>, AddressError> {
    let (hrp, data) = bech32::decode(s).map_err(|e| AddressError::Bech32Decode(e.to_string()))?;
    if hrp.as_str() != expected_hrp {
        return Err(AddressError::InvalidHrp {
            expected: expected_hrp.to_string(),
            got: hrp.to_string(),
        });
    }
    check_length(&data)?;
    Ok(data)
}

// ---------------------------------------------------------------------------
// AccAddress
// ---------------------------------------------------------------------------

/// An account address.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccAddress(Vec<u8>);

impl AccAddress {
    /// Wrap raw address bytes.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self, AddressError> {
        let bytes = bytes.into();
        check_length(&bytes)?;
        Ok(Self(bytes))
    }

    /// Parse a `nova1...` Bech32 string.
    pub fn from_bech32(s: &str) -> Result<Self, AddressError> {
        decode(ACCOUNT_HRP, s).map(Self)
    }

    /// Encode as a Bech32 string.
    pub fn to_bech32(&self) -> Result<String, AddressError> {
        encode(ACCOUNT_HRP, &self.0)
    }

    /// Raw address bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 20]> for AccAddress {
    fn from(bytes: [u8; 20]) -> Self {
        Self(bytes.to_vec())
    }
}

impl FromStr for AccAddress {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_bech32(s)
    }
}

impl fmt::Display for AccAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let encoded = self.to_bech32().map_err(|_| fmt::Error)?;
        f.write_str(&encoded)
    }
}

impl fmt::Debug for AccAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccAddress({})", hex::encode(&self.0))
    }
}

impl Serialize for AccAddress {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let encoded = self.to_bech32().map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&encoded)
    }
}

impl<'de> Deserialize<'de> for AccAddress {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_bech32(&s).map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// ValAddress
// ---------------------------------------------------------------------------

/// A validator operator address.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ValAddress(Vec<u8>);

impl ValAddress {
    /// Wrap raw address bytes.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self, AddressError> {
        let bytes = bytes.into();
        check_length(&bytes)?;
        Ok(Self(bytes))
    }

    /// Parse a `novavaloper1...` Bech32 string.
    pub fn from_bech32(s: &str) -> Result<Self, AddressError> {
        decode(VALIDATOR_HRP, s).map(Self)
    }

    /// Encode as a Bech32 string.
    pub fn to_bech32(&self) -> Result<String, AddressError> {
        encode(VALIDATOR_HRP, &self.0)
    }

    /// Raw address bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// The account that operates this validator (same bytes, account prefix).
    pub fn to_account(&self) -> AccAddress {
        AccAddress(self.0.clone())
    }
}

impl From<[u8; 20]> for ValAddress {
    fn from(bytes: [u8; 20]) -> Self {
        Self(bytes.to_vec())
    }
}

impl FromStr for ValAddress {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_bech32(s)
    }
}

impl fmt::Display for ValAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let encoded = self.to_bech32().map_err(|_| fmt::Error)?;
        f.write_str(&encoded)
    }
}

impl fmt::Debug for ValAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ValAddress({})", hex::encode(&self.0))
    }
}

impl Serialize for ValAddress {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let encoded = self.to_bech32().map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&encoded)
    }
}

impl<'de> Deserialize<'de> for ValAddress {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_bech32(&s).map_err(serde::de::Error::custom)
    }
}
