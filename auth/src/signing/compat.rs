//! # Compatibility Guard
//!
//! One table answers "can this mode represent this transaction field?".
//! A mode that cannot represent a populated field must refuse to produce
//! sign-bytes: the field would be enforced by the node without having been
//! covered by the signature.
//!
//! `can_represent` is an exhaustive match with no wildcard arm. Adding a
//! field or a mode does not compile until the new row or column is filled.

use std::fmt;

use super::error::SignModeError;
use super::mode::SignMode;
use crate::tx::Tx;

/// Transaction fields whose representability varies by mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TxField {
    TimeoutHeight,
    ExtensionOptions,
    NonCriticalExtensionOptions,
}

impl TxField {
    /// Check order. The first offending field is the one reported.
    pub const ALL: [TxField; 3] = [
        TxField::TimeoutHeight,
        TxField::ExtensionOptions,
        TxField::NonCriticalExtensionOptions,
    ];

    /// Whether `tx` populates this field.
    pub fn is_set(self, tx: &Tx) -> bool {
        match self {
            TxField::TimeoutHeight => tx.timeout_height() != 0,
            TxField::ExtensionOptions => !tx.extension_options().is_empty(),
            TxField::NonCriticalExtensionOptions => {
                !tx.non_critical_extension_options().is_empty()
            }
        }
    }
}

impl fmt::Display for TxField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TxField::TimeoutHeight => f.write_str("timeout height"),
            TxField::ExtensionOptions => f.write_str("extension options"),
            TxField::NonCriticalExtensionOptions => f.write_str("non-critical extension options"),
        }
    }
}

/// The representability table.
pub fn can_represent(mode: SignMode, field: TxField) -> bool {
    use SignMode::*;
    use TxField::*;
    match (mode, field) {
        (LegacyAminoJson, TimeoutHeight) => false,
        (LegacyAminoJson, ExtensionOptions) => false,
        (LegacyAminoJson, NonCriticalExtensionOptions) => false,

        (Direct, TimeoutHeight) => true,
        (Direct, ExtensionOptions) => true,
        (Direct, NonCriticalExtensionOptions) => true,

        (Textual, TimeoutHeight) => true,
        (Textual, ExtensionOptions) => true,
        (Textual, NonCriticalExtensionOptions) => true,

        (Unspecified, TimeoutHeight) => false,
        (Unspecified, ExtensionOptions) => false,
        (Unspecified, NonCriticalExtensionOptions) => false,
    }
}

/// Reject `tx` if it populates a field `mode` cannot represent.
pub fn check_compatibility(mode: SignMode, tx: &Tx) -> Result<(), SignModeError> {
    match TxField::ALL
        .into_iter()
        .find(|field| field.is_set(tx) && !can_represent(mode, *field))
    {
        Some(field) => Err(SignModeError::IncompatibleField { mode, field }),
        None => Ok(()),
    }
}
