//! Coins: denominated amounts used for fees and transfers.
//!
//! Amounts are `u128` in the smallest unit of the denomination. On every
//! text encoding (JSON, the legacy sign document, protobuf) the amount is a
//! decimal string so that no consumer ever has to squeeze it into a float.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::config::MAX_DENOM_LENGTH;
use crate::wire::CoinProto;

/// Errors for coin parsing and validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoinError {
    #[error("invalid denom: {0:?}")]
    InvalidDenom(String),

    #[error("invalid coin expression: {0:?}")]
    InvalidExpression(String),

    #[error("coin {0} has a zero amount")]
    ZeroAmount(String),

    #[error("coins are not sorted by denom or contain duplicates: {0}")]
    Unsorted(String),
}

/// A single denominated amount.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coin {
    pub denom: String,
    #[serde(with = "amount_string")]
    pub amount: u128,
}

impl Coin {
    pub fn new(amount: u128, denom: impl Into<String>) -> Self {
        Self {
            denom: denom.into(),
            amount,
        }
    }

    /// Checks the denom grammar: a letter followed by 2..=127 characters
    /// from `[a-zA-Z0-9/:._-]`.
    pub fn validate_denom(denom: &str) -> Result<(), CoinError> {
        let mut chars = denom.chars();
        let first_ok = chars.next().is_some_and(|c| c.is_ascii_alphabetic());
        let rest_ok = chars.all(|c| c.is_ascii_alphanumeric() || "/:._-".contains(c));
        if !first_ok || !rest_ok || denom.len() < 3 || denom.len() > MAX_DENOM_LENGTH {
            return Err(CoinError::InvalidDenom(denom.to_string()));
        }
        Ok(())
    }

    /// A coin is valid when its denom is well formed and its amount is non-zero.
    pub fn validate(&self) -> Result<(), CoinError> {
        Self::validate_denom(&self.denom)?;
        if self.amount == 0 {
            return Err(CoinError::ZeroAmount(self.to_string()));
        }
        Ok(())
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

impl FromStr for Coin {
    type Err = CoinError;

    /// Parses `<amount><denom>`, e.g. `10foocoin`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let split = s
            .find(|c: char| !c.is_ascii_digit())
            .ok_or_else(|| CoinError::InvalidExpression(s.to_string()))?;
        let (amount, denom) = s.split_at(split);
        let amount = amount
            .parse::<u128>()
            .map_err(|_| CoinError::InvalidExpression(s.to_string()))?;
        Coin::validate_denom(denom)?;
        Ok(Coin::new(amount, denom))
    }
}

/// An ordered list of coins.
///
/// The order is significant: it is what ends up in sign-bytes. Valid coin
/// sets are strictly sorted by denom, which makes the order canonical.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Coins(Vec<Coin>);

impl Coins {
    pub fn new(coins: Vec<Coin>) -> Self {
        Self(coins)
    }

    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Coin> {
        self.0.iter()
    }

    /// Every coin valid, denoms strictly increasing.
    pub fn validate(&self) -> Result<(), CoinError> {
        for coin in &self.0 {
            coin.validate()?;
        }
        if self.0.windows(2).any(|w| w[0].denom >= w[1].denom) {
            return Err(CoinError::Unsorted(self.to_string()));
        }
        Ok(())
    }

    /// Legacy sign-document form: `[{"amount":"10","denom":"foocoin"}]`.
    /// Always an array, never `null`, even when empty.
    pub fn to_legacy_json(&self) -> Value {
        Value::Array(
            self.0
                .iter()
                .map(|c| json!({ "amount": c.amount.to_string(), "denom": c.denom }))
                .collect(),
        )
    }

    pub fn to_proto(&self) -> Vec<CoinProto> {
        self.0
            .iter()
            .map(|c| CoinProto {
                denom: c.denom.clone(),
                amount: c.amount.to_string(),
            })
            .collect()
    }
}

impl From<Vec<Coin>> for Coins {
    fn from(coins: Vec<Coin>) -> Self {
        Self(coins)
    }
}

impl<'a> IntoIterator for &'a Coins {
    type Item = &'a Coin;
    type IntoIter = std::slice::Iter<'a, Coin>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Coins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(Coin::to_string).collect();
        f.write_str(&parts.join(","))
    }
}

impl FromStr for Coins {
    type Err = CoinError;

    /// Parses a comma-separated list such as `10foocoin,5stake`. The result
    /// is sorted by denom and validated.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Ok(Coins::empty());
        }
        let mut coins = s
            .split(',')
            .map(Coin::from_str)
            .collect::<Result<Vec<_>, _>>()?;
        coins.sort_by(|a, b| a.denom.cmp(&b.denom));
        let coins = Coins(coins);
        coins.validate()?;
        Ok(coins)
    }
}

mod amount_string {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(amount: &u128, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&amount.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u128, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
