//! # Transaction Model
//!
//! The immutable transaction the sign modes operate on.
//!
//! ## Architecture
//!
//! ```text
//! msg.rs      - Msg trait: what the auth layer needs from a message type
//! types.rs    - TxBody, AuthInfo, SignerInfo, Fee and their protobuf forms
//! builder.rs  - Tx (read-only accessors, validation, hashing) and TxBuilder
//! error.rs    - TxError for stateless structural failures
//! ```
//!
//! ## Lifecycle
//!
//! 1. **Build** with [`TxBuilder`].
//! 2. **Sign**: compute sign-bytes per signer through the
//!    [`crate::signing::SignModeRegistry`] and sign them externally.
//! 3. **Attach** signatures with [`Tx::with_signatures`].
//! 4. **Verify** with [`crate::verification::verify_tx_signatures`].

pub mod builder;
pub mod error;
pub mod msg;
pub mod types;

pub use builder::{Tx, TxBuilder};
pub use error::TxError;
pub use msg::{legacy_msg_json, Msg};
pub use types::{AuthInfo, Fee, SignerInfo, TxBody};
