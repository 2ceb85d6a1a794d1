//! # Signature Verification
//!
//! The sign-mode framework decides *what* bytes were signed; whether a
//! signature over those bytes is valid is a question for a
//! [`SignatureVerifier`]. Keeping this behind a trait lets a node plug in
//! hardware-backed or batched verification without touching the
//! canonicalization code.
//!
//! ## Strictness
//!
//! [`Ed25519Verifier`] uses `ed25519-dalek`'s strict verification. It
//! rejects small-order keys and non-canonical signatures that lenient
//! implementations accept, which would otherwise be a malleability vector
//! of its own.

use ed25519_dalek::{Signature as DalekSignature, VerifyingKey};
use thiserror::Error;

use super::keys::{KeyType, PublicKey};
use crate::config::ED25519_SIGNATURE_LENGTH;

/// Errors during signature checks.
///
/// Intentionally vague about why a valid-looking signature failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureError {
    #[error("signature verification failed")]
    VerificationFailed,

    #[error("invalid signature bytes: expected {expected} bytes, got {got}")]
    InvalidSignatureBytes { expected: usize, got: usize },

    #[error("invalid public key")]
    InvalidPublicKey,

    #[error("{0} keys are not supported by this verifier")]
    UnsupportedKeyType(KeyType),
}

/// Checks a raw signature over sign-bytes.
pub trait SignatureVerifier: Send + Sync {
    fn verify(
        &self,
        public_key: &PublicKey,
        sign_bytes: &[u8],
        signature: &[u8],
    ) -> Result<(), SignatureError>;
}

/// Ed25519 verification backed by `ed25519-dalek`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ed25519Verifier;

impl SignatureVerifier for Ed25519Verifier {
    fn verify(
        &self,
        public_key: &PublicKey,
        sign_bytes: &[u8],
        signature: &[u8],
    ) -> Result<(), SignatureError> {
        let key_bytes = match public_key {
            PublicKey::Ed25519(bytes) => bytes,
            other => return Err(SignatureError::UnsupportedKeyType(other.key_type())),
        };

        if signature.len() != ED25519_SIGNATURE_LENGTH {
            return Err(SignatureError::InvalidSignatureBytes {
                expected: ED25519_SIGNATURE_LENGTH,
                got: signature.len(),
            });
        }

        let verifying_key =
            VerifyingKey::from_bytes(key_bytes).map_err(|_| SignatureError::InvalidPublicKey)?;
        let signature = DalekSignature::from_slice(signature)
            .map_err(|_| SignatureError::VerificationFailed)?;

        verifying_key
            .verify_strict(sign_bytes, &signature)
            .map_err(|_| SignatureError::VerificationFailed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ed25519_dalek::{Signer, SigningKey};
    use rand::rngs::OsRng;

    fn keypair() -> (SigningKey, PublicKey) {
        let sk = SigningKey::generate(&mut OsRng);
        let pk = PublicKey::Ed25519(sk.verifying_key().to_bytes());
        (sk, pk)
    }

    #[test]
    fn valid_signature_verifies() {
        let (sk, pk) = keypair();
        let sig = sk.sign(b"sign bytes").to_bytes();
        assert!(Ed25519Verifier.verify(&pk, b"sign bytes", &sig).is_ok());
    }

    #[test]
    fn wrong_message_fails() {
        let (sk, pk) = keypair();
        let sig = sk.sign(b"sign bytes").to_bytes();
        assert_eq!(
            Ed25519Verifier.verify(&pk, b"other bytes", &sig),
            Err(SignatureError::VerificationFailed)
        );
    }

    #[test]
    fn wrong_key_fails() {
        let (sk, _) = keypair();
        let (_, other_pk) = keypair();
        let sig = sk.sign(b"sign bytes").to_bytes();
        assert_eq!(
            Ed25519Verifier.verify(&other_pk, b"sign bytes", &sig),
            Err(SignatureError::VerificationFailed)
        );
    }

    #[test]
    fn short_signature_is_malformed() {
        let (_, pk) = keypair();
        assert_eq!(
            Ed25519Verifier.verify(&pk, b"x", &[0u8; 63]),
            Err(SignatureError::InvalidSignatureBytes {
                expected: 64,
                got: 63
            })
        );
    }

    #[test]
    fn secp256k1_is_unsupported() {
        let pk = PublicKey::Secp256k1([2u8; 33]);
        assert_eq!(
            Ed25519Verifier.verify(&pk, b"x", &[0u8; 64]),
            Err(SignatureError::UnsupportedKeyType(KeyType::Secp256k1))
        );
    }
}
