//! Sign-mode identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A signing mode. The discriminants are wire values carried in every
/// signer info and must never change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SignMode {
    #[serde(rename = "SIGN_MODE_UNSPECIFIED")]
    Unspecified = 0,
    #[serde(rename = "SIGN_MODE_DIRECT")]
    Direct = 1,
    /// Reserved. No handler ships for it.
    #[serde(rename = "SIGN_MODE_TEXTUAL")]
    Textual = 2,
    #[serde(rename = "SIGN_MODE_LEGACY_AMINO_JSON")]
    LegacyAminoJson = 127,
}

impl SignMode {
    pub const ALL: [SignMode; 4] = [
        SignMode::Unspecified,
        SignMode::Direct,
        SignMode::Textual,
        SignMode::LegacyAminoJson,
    ];

    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Canonical `SIGN_MODE_*` name.
    pub fn as_str(self) -> &'static str {
        match self {
            SignMode::Unspecified => "SIGN_MODE_UNSPECIFIED",
            SignMode::Direct => "SIGN_MODE_DIRECT",
            SignMode::Textual => "SIGN_MODE_TEXTUAL",
            SignMode::LegacyAminoJson => "SIGN_MODE_LEGACY_AMINO_JSON",
        }
    }
}

impl fmt::Display for SignMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A string or number that names no sign mode.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown sign mode: {0}")]
pub struct ParseSignModeError(pub String);

impl TryFrom<i32> for SignMode {
    type Error = ParseSignModeError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        SignMode::ALL
            .into_iter()
            .find(|m| m.as_i32() == value)
            .ok_or_else(|| ParseSignModeError(value.to_string()))
    }
}

impl FromStr for SignMode {
    type Err = ParseSignModeError;

    /// Accepts canonical names and the short CLI spellings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "sign-mode-unspecified" | "unspecified" => Ok(SignMode::Unspecified),
            "sign-mode-direct" | "direct" => Ok(SignMode::Direct),
            "sign-mode-textual" | "textual" => Ok(SignMode::Textual),
            "sign-mode-legacy-amino-json" | "legacy-amino-json" | "amino-json" => {
                Ok(SignMode::LegacyAminoJson)
            }
            _ => Err(ParseSignModeError(s.to_string())),
        }
    }
}
