//! # Key and Signature Seams
//!
//! Public-key representation for signer infos, and the verifier trait that
//! the verification flow calls into. Signing itself happens outside this
//! crate: callers take the sign-bytes we compute to whatever holds their
//! private key.

pub mod keys;
pub mod verifier;

pub use keys::{KeyError, KeyType, PublicKey};
pub use verifier::{Ed25519Verifier, SignatureError, SignatureVerifier};
