//! Concrete message types shipped with the auth layer.
//!
//! Module business logic lives elsewhere; these types exist so that sign
//! modes and verification have real messages to canonicalize.

pub mod bank;
pub mod slashing;

pub use bank::MsgSend;
pub use slashing::MsgUnjail;
