//! # Sign-Mode Handler Framework
//!
//! Defines, for a transaction and a signer, the exact byte string that
//! signer signs. Each algorithm ("sign mode") is a [`SignModeHandler`];
//! the [`SignModeRegistry`] dispatches between them.
//!
//! ## Architecture
//!
//! ```text
//! mode.rs            - SignMode identifiers and their wire values
//! handler.rs         - SignModeHandler trait and shared prechecks
//! signer_data.rs     - SignerData, SignerDataProvider, AccountTable
//! compat.rs          - field x mode representability table
//! canonical_json.rs  - sorted, Go-escaped JSON writer
//! legacy_amino.rs    - SIGN_MODE_LEGACY_AMINO_JSON
//! direct.rs          - SIGN_MODE_DIRECT
//! registry.rs        - mode dispatch and per-key-type policy
//! error.rs           - SignModeError
//! ```
//!
//! ## Check Order
//!
//! Every handler checks, in order: the requested mode is its own
//! (`ModeMismatch`), the transaction has messages and the chain id is set
//! (`MalformedInput`), and the mode can represent every populated field
//! (`IncompatibleField`). Only then are bytes produced.

pub mod canonical_json;
pub mod compat;
pub mod direct;
pub mod error;
pub mod handler;
pub mod legacy_amino;
pub mod mode;
pub mod registry;
pub mod signer_data;

pub use compat::{can_represent, check_compatibility, TxField};
pub use direct::DirectHandler;
pub use error::SignModeError;
pub use handler::SignModeHandler;
pub use legacy_amino::LegacyAminoJsonHandler;
pub use mode::{ParseSignModeError, SignMode};
pub use registry::SignModeRegistry;
pub use signer_data::{AccountError, AccountRecord, AccountTable, SignerData, SignerDataProvider};
