//! # Sign-Mode Registry
//!
//! Maps each [`SignMode`] to the handler that implements it and
//! dispatches sign-bytes requests. Registration happens once at startup
//! through `&mut self`; afterwards the registry is only read and can be
//! shared behind an `Arc`.
//!
//! The registry also answers which modes a given key type may use. With
//! no policy entry for a key type, every registered mode is permitted.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

use super::direct::DirectHandler;
use super::error::SignModeError;
use super::handler::SignModeHandler;
use super::legacy_amino::LegacyAminoJsonHandler;
use super::mode::SignMode;
use super::signer_data::SignerData;
use crate::crypto::KeyType;
use crate::tx::Tx;

/// Mode → handler dispatch table.
#[derive(Default)]
pub struct SignModeRegistry {
    handlers: HashMap<SignMode, Arc<dyn SignModeHandler>>,
    /// Registration order, for enumeration and default discovery.
    order: Vec<SignMode>,
    key_policy: BTreeMap<KeyType, Vec<SignMode>>,
}

impl SignModeRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with the shipped handlers: Direct first, then legacy
    /// Amino-JSON.
    pub fn with_defaults() -> Result<Self, SignModeError> {
        let mut registry = Self::new();
        registry.register_handler(DirectHandler)?;
        registry.register_handler(LegacyAminoJsonHandler)?;
        Ok(registry)
    }

    /// Register `handler` for `mode`.
    ///
    /// Fails if a handler already serves `mode`, if `handler` does not
    /// declare `mode`, or if `mode` is `Unspecified`.
    pub fn register(
        &mut self,
        mode: SignMode,
        handler: Arc<dyn SignModeHandler>,
    ) -> Result<(), SignModeError> {
        self.check_registrable(mode, handler.as_ref())?;
        self.order.push(mode);
        self.handlers.insert(mode, handler);
        debug!(%mode, "sign mode handler registered");
        Ok(())
    }

    /// Register `handler` for every mode it declares. Nothing is
    /// registered if any of those modes is rejected.
    pub fn register_handler(
        &mut self,
        handler: impl SignModeHandler + 'static,
    ) -> Result<(), SignModeError> {
        let handler: Arc<dyn SignModeHandler> = Arc::new(handler);
        let modes = handler.modes();
        for (i, mode) in modes.iter().enumerate() {
            self.check_registrable(*mode, handler.as_ref())?;
            if modes[..i].contains(mode) {
                return Err(SignModeError::DuplicateMode(*mode));
            }
        }
        for mode in modes {
            self.register(mode, Arc::clone(&handler))?;
        }
        Ok(())
    }

    fn check_registrable(
        &self,
        mode: SignMode,
        handler: &dyn SignModeHandler,
    ) -> Result<(), SignModeError> {
        if mode == SignMode::Unspecified {
            return Err(SignModeError::UnsupportedMode(mode));
        }
        if self.handlers.contains_key(&mode) {
            debug!(%mode, "duplicate sign mode registration rejected");
            return Err(SignModeError::DuplicateMode(mode));
        }
        if !handler.modes().contains(&mode) {
            return Err(SignModeError::ModeMismatch {
                expected: handler.default_mode(),
                got: mode,
            });
        }
        Ok(())
    }

    /// Sign-bytes for `tx` under `mode`.
    ///
    /// An unregistered mode fails with `UnsupportedMode` and no handler
    /// runs. Handler errors are passed through unchanged.
    pub fn get_sign_bytes(
        &self,
        mode: SignMode,
        data: &SignerData,
        tx: &Tx,
    ) -> Result<Vec<u8>, SignModeError> {
        let handler = self.handlers.get(&mode).ok_or_else(|| {
            debug!(%mode, "no handler for sign mode");
            SignModeError::UnsupportedMode(mode)
        })?;
        debug!(%mode, chain_id = %data.chain_id, "dispatching sign bytes");
        handler.get_sign_bytes(mode, data, tx)
    }

    /// Default mode of the first registered handler.
    pub fn default_mode(&self) -> Option<SignMode> {
        self.order
            .first()
            .and_then(|mode| self.handlers.get(mode))
            .map(|handler| handler.default_mode())
    }

    /// Default mode declared by the handler serving `mode`.
    pub fn handler_default_mode(&self, mode: SignMode) -> Option<SignMode> {
        self.handlers.get(&mode).map(|handler| handler.default_mode())
    }

    /// Registered modes in registration order.
    pub fn supported_modes(&self) -> Vec<SignMode> {
        self.order.clone()
    }

    pub fn supports(&self, mode: SignMode) -> bool {
        self.handlers.contains_key(&mode)
    }

    /// Restrict `key_type` to `modes`. Replaces any earlier policy for the
    /// key type. Modes that are not registered are kept in the policy but
    /// never reported by [`Self::modes_for_key`].
    pub fn permit_for_key(&mut self, key_type: KeyType, modes: Vec<SignMode>) {
        debug!(%key_type, ?modes, "key type sign mode policy set");
        self.key_policy.insert(key_type, modes);
    }

    /// Registered modes `key_type` may use, in registration order.
    pub fn modes_for_key(&self, key_type: KeyType) -> Vec<SignMode> {
        match self.key_policy.get(&key_type) {
            Some(allowed) => self
                .order
                .iter()
                .copied()
                .filter(|mode| allowed.contains(mode))
                .collect(),
            None => self.supported_modes(),
        }
    }

    pub fn is_permitted(&self, key_type: KeyType, mode: SignMode) -> bool {
        self.modes_for_key(key_type).contains(&mode)
    }
}

impl fmt::Debug for SignModeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignModeRegistry")
            .field("modes", &self.order)
            .field("key_policy", &self.key_policy)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::msgs::MsgSend;
    use crate::tx::TxBuilder;
    use crate::types::{AccAddress, Coin, Coins};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts invocations and returns a fixed payload.
    #[derive(Default)]
    struct CountingHandler {
        calls: AtomicUsize,
    }

    impl SignModeHandler for CountingHandler {
        fn default_mode(&self) -> SignMode {
            SignMode::Textual
        }

        fn modes(&self) -> Vec<SignMode> {
            vec![SignMode::Textual]
        }

        fn get_sign_bytes(
            &self,
            _mode: SignMode,
            _data: &SignerData,
            _tx: &Tx,
        ) -> Result<Vec<u8>, SignModeError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(b"textual".to_vec())
        }
    }

    fn tx() -> Tx {
        TxBuilder::new()
            .message(MsgSend::new(
                AccAddress::from([1u8; 20]),
                AccAddress::from([2u8; 20]),
                Coins::new(vec![Coin::new(1, "stake")]),
            ))
            .build()
    }

    fn data() -> SignerData {
        SignerData::new("test-chain", 1, 0)
    }

    #[test]
    fn defaults_register_direct_then_legacy() {
        let registry = SignModeRegistry::with_defaults().unwrap();
        assert_eq!(
            registry.supported_modes(),
            vec![SignMode::Direct, SignMode::LegacyAminoJson]
        );
        assert_eq!(registry.default_mode(), Some(SignMode::Direct));
        assert_eq!(
            registry.handler_default_mode(SignMode::LegacyAminoJson),
            Some(SignMode::LegacyAminoJson)
        );
    }

    #[test]
    fn defaults_cannot_be_registered_twice() {
        let mut registry = SignModeRegistry::with_defaults().unwrap();
        assert_eq!(
            registry.register_handler(LegacyAminoJsonHandler),
            Err(SignModeError::DuplicateMode(SignMode::LegacyAminoJson))
        );
        assert_eq!(
            registry.register_handler(DirectHandler),
            Err(SignModeError::DuplicateMode(SignMode::Direct))
        );
        assert_eq!(registry.supported_modes().len(), 2);
    }

    #[test]
    fn empty_registry_has_no_default() {
        let registry = SignModeRegistry::new();
        assert_eq!(registry.default_mode(), None);
        assert!(registry.supported_modes().is_empty());
    }

    #[test]
    fn duplicate_registration_is_rejected() {
        let mut registry = SignModeRegistry::with_defaults().unwrap();
        let err = registry
            .register(SignMode::Direct, Arc::new(DirectHandler))
            .unwrap_err();
        assert_eq!(err, SignModeError::DuplicateMode(SignMode::Direct));
        assert_eq!(registry.supported_modes().len(), 2);
    }

    #[test]
    fn handler_must_declare_mode() {
        let mut registry = SignModeRegistry::new();
        let err = registry
            .register(SignMode::LegacyAminoJson, Arc::new(DirectHandler))
            .unwrap_err();
        assert!(matches!(err, SignModeError::ModeMismatch { .. }));
        assert!(!registry.supports(SignMode::LegacyAminoJson));
    }

    #[test]
    fn unspecified_cannot_be_registered() {
        let mut registry = SignModeRegistry::new();
        assert_eq!(
            registry.register(SignMode::Unspecified, Arc::new(DirectHandler)),
            Err(SignModeError::UnsupportedMode(SignMode::Unspecified))
        );
    }

    #[test]
    fn unsupported_mode_invokes_no_handler() {
        let handler = Arc::new(CountingHandler::default());
        let mut registry = SignModeRegistry::new();
        registry
            .register(SignMode::Textual, handler.clone())
            .unwrap();

        let err = registry
            .get_sign_bytes(SignMode::Direct, &data(), &tx())
            .unwrap_err();
        assert_eq!(err, SignModeError::UnsupportedMode(SignMode::Direct));
        assert_eq!(handler.calls.load(Ordering::SeqCst), 0);

        let bytes = registry
            .get_sign_bytes(SignMode::Textual, &data(), &tx())
            .unwrap();
        assert_eq!(bytes, b"textual");
        assert_eq!(handler.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn dispatch_matches_handler_output() {
        let registry = SignModeRegistry::with_defaults().unwrap();
        let tx = tx();
        for mode in registry.supported_modes() {
            let via_registry = registry.get_sign_bytes(mode, &data(), &tx).unwrap();
            let direct_call = match mode {
                SignMode::Direct => DirectHandler.get_sign_bytes(mode, &data(), &tx),
                _ => LegacyAminoJsonHandler.get_sign_bytes(mode, &data(), &tx),
            }
            .unwrap();
            assert_eq!(via_registry, direct_call);
        }
    }

    #[test]
    fn register_handler_registers_declared_modes() {
        let mut registry = SignModeRegistry::with_defaults().unwrap();
        registry
            .register_handler(CountingHandler::default())
            .unwrap();
        assert_eq!(
            registry.supported_modes(),
            vec![SignMode::Direct, SignMode::LegacyAminoJson, SignMode::Textual]
        );
        assert_eq!(registry.default_mode(), Some(SignMode::Direct));
        assert!(matches!(
            registry.register_handler(CountingHandler::default()),
            Err(SignModeError::DuplicateMode(SignMode::Textual))
        ));
    }

    #[test]
    fn key_policy_filters_in_registration_order() {
        let mut registry = SignModeRegistry::with_defaults().unwrap();
        assert_eq!(
            registry.modes_for_key(KeyType::Secp256k1),
            registry.supported_modes()
        );

        registry.permit_for_key(
            KeyType::Ed25519,
            vec![SignMode::LegacyAminoJson, SignMode::Textual],
        );
        assert_eq!(
            registry.modes_for_key(KeyType::Ed25519),
            vec![SignMode::LegacyAminoJson]
        );
        assert!(!registry.is_permitted(KeyType::Ed25519, SignMode::Direct));
        assert!(registry.is_permitted(KeyType::Secp256k1, SignMode::Direct));
    }

    #[test]
    fn registry_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SignModeRegistry>();
    }
}
