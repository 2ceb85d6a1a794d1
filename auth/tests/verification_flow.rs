//! End-to-end signing and verification.
//!
//! Each test builds its own accounts and keys: a transaction is built,
//! every signer computes sign-bytes under its declared mode and signs them,
//! and the signed transaction goes through `verify_tx_signatures`.

use std::sync::Arc;

use ed25519_dalek::{Signer, SigningKey};
use rand::rngs::OsRng;

use nova_auth::config::AuthParams;
use nova_auth::crypto::{Ed25519Verifier, KeyType, PublicKey, SignatureError};
use nova_auth::msgs::{MsgSend, MsgUnjail};
use nova_auth::signing::{
    AccountRecord, AccountTable, SignMode, SignModeError, SignModeRegistry, SignerDataProvider,
    TxField,
};
use nova_auth::tx::{Tx, TxBuilder};
use nova_auth::types::{AccAddress, Coin, Coins, ValAddress};
use nova_auth::{verify_tx_signatures, VerificationError};

// ---------------------------------------------------------------------------
// Test Helpers
// ---------------------------------------------------------------------------

struct KeyHolder {
    key: SigningKey,
    address: AccAddress,
}

impl KeyHolder {
    /// A fresh key and the account it controls.
    fn generate() -> Self {
        let key = SigningKey::generate(&mut OsRng);
        let address = PublicKey::Ed25519(key.verifying_key().to_bytes()).address();
        Self { key, address }
    }

    fn public_key(&self) -> PublicKey {
        PublicKey::Ed25519(self.key.verifying_key().to_bytes())
    }
}

struct Chain {
    registry: Arc<SignModeRegistry>,
    accounts: AccountTable,
    sender: KeyHolder,
    validator: KeyHolder,
    validator_addr: ValAddress,
}

fn setup() -> Chain {
    let sender = KeyHolder::generate();
    let validator = KeyHolder::generate();
    let validator_addr = ValAddress::new(validator.address.as_bytes().to_vec()).unwrap();

    let accounts = AccountTable::new("nova-testnet-1");
    accounts.insert(
        sender.address.clone(),
        AccountRecord {
            account_number: 12,
            sequence: 4,
            pub_key: None,
        },
    );
    accounts.insert(
        validator.address.clone(),
        AccountRecord {
            account_number: 40,
            sequence: 0,
            pub_key: Some(validator.public_key()),
        },
    );

    Chain {
        registry: Arc::new(SignModeRegistry::with_defaults().unwrap()),
        accounts,
        sender,
        validator,
        validator_addr,
    }
}

/// Send from `sender`, then unjail signed by the validator operator.
/// The sender signs in `sender_mode`, the validator in legacy mode.
fn unsigned_tx(chain: &Chain, sender_mode: SignMode) -> TxBuilder {
    TxBuilder::new()
        .message(MsgSend::new(
            chain.sender.address.clone(),
            AccAddress::from([0x22; 20]),
            Coins::new(vec![Coin::new(250, "unova")]),
        ))
        .message(MsgUnjail::new(chain.validator_addr.clone()))
        .memo("settle invoice 7")
        .fee(Coins::new(vec![Coin::new(2_000, "unova")]), 180_000)
        .signer_info(Some(chain.sender.public_key()), sender_mode)
        .signer_info(None, SignMode::LegacyAminoJson)
}

/// Every signer signs its own sign-bytes.
fn sign_all(chain: &Chain, tx: &Tx) -> Tx {
    let signers = [&chain.sender, &chain.validator];
    let signatures = tx
        .signers()
        .iter()
        .zip(tx.signer_infos())
        .map(|(address, info)| {
            let signer = signers
                .iter()
                .find(|s| &s.address == address)
                .expect("known signer");
            let data = chain.accounts.signer_data(address).unwrap();
            let bytes = chain
                .registry
                .get_sign_bytes(info.mode, &data, tx)
                .unwrap();
            signer.key.sign(&bytes).to_bytes().to_vec()
        })
        .collect();
    tx.with_signatures(signatures)
}

fn verify(chain: &Chain, tx: &Tx) -> Result<(), VerificationError> {
    verify_tx_signatures(
        &chain.registry,
        &chain.accounts,
        &Ed25519Verifier,
        &AuthParams::default(),
        tx,
    )
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

#[test]
fn mixed_mode_transaction_verifies() {
    let chain = setup();
    let tx = sign_all(&chain, &unsigned_tx(&chain, SignMode::Direct).build());
    assert_eq!(
        tx.signers(),
        vec![chain.sender.address.clone(), chain.validator.address.clone()]
    );
    assert_eq!(verify(&chain, &tx), Ok(()));
}

#[test]
fn all_legacy_transaction_verifies() {
    let chain = setup();
    let tx = sign_all(&chain, &unsigned_tx(&chain, SignMode::LegacyAminoJson).build());
    assert_eq!(verify(&chain, &tx), Ok(()));
}

#[test]
fn tampered_memo_breaks_every_signature() {
    let chain = setup();
    let signed = sign_all(&chain, &unsigned_tx(&chain, SignMode::Direct).build());
    let tampered = TxBuilder::from_tx(&signed)
        .memo("settle invoice 8")
        .build()
        .with_signatures(signed.signatures().to_vec());
    assert!(matches!(
        verify(&chain, &tampered),
        Err(VerificationError::Signature {
            index: 0,
            source: SignatureError::VerificationFailed
        })
    ));
}

#[test]
fn replay_after_sequence_bump_is_rejected() {
    let chain = setup();
    let tx = sign_all(&chain, &unsigned_tx(&chain, SignMode::Direct).build());
    assert_eq!(verify(&chain, &tx), Ok(()));

    chain
        .accounts
        .increment_sequence(&chain.sender.address)
        .unwrap();
    chain
        .accounts
        .increment_sequence(&chain.validator.address)
        .unwrap();
    assert!(matches!(
        verify(&chain, &tx),
        Err(VerificationError::Signature { index: 0, .. })
    ));
}

#[test]
fn signature_from_another_chain_is_rejected() {
    let chain = setup();
    let tx = sign_all(&chain, &unsigned_tx(&chain, SignMode::Direct).build());

    let other = AccountTable::new("nova-mainnet-1");
    for address in tx.signers() {
        let record = chain.accounts.get(&address).unwrap();
        other.insert(address, record);
    }
    let result = verify_tx_signatures(
        &chain.registry,
        &other,
        &Ed25519Verifier,
        &AuthParams::default(),
        &tx,
    );
    assert!(matches!(
        result,
        Err(VerificationError::Signature { index: 0, .. })
    ));
}

#[test]
fn swapped_signatures_are_rejected() {
    let chain = setup();
    let tx = sign_all(&chain, &unsigned_tx(&chain, SignMode::Direct).build());
    let mut sigs = tx.signatures().to_vec();
    sigs.swap(0, 1);
    assert!(matches!(
        verify(&chain, &tx.with_signatures(sigs)),
        Err(VerificationError::Signature { index: 0, .. })
    ));
}

#[test]
fn spend_from_keyless_account_needs_its_own_key() {
    let chain = setup();
    let victim = AccAddress::from([0x42; 20]);
    chain.accounts.insert(
        victim.clone(),
        AccountRecord {
            account_number: 77,
            sequence: 0,
            pub_key: None,
        },
    );

    let unsigned = TxBuilder::new()
        .message(MsgSend::new(
            victim.clone(),
            chain.sender.address.clone(),
            Coins::new(vec![Coin::new(1_000_000, "unova")]),
        ))
        .fee(Coins::new(vec![Coin::new(2_000, "unova")]), 180_000)
        .signer_info(Some(chain.sender.public_key()), SignMode::Direct)
        .build();
    let data = chain.accounts.signer_data(&victim).unwrap();
    let bytes = chain
        .registry
        .get_sign_bytes(SignMode::Direct, &data, &unsigned)
        .unwrap();
    let tx = unsigned.with_signatures(vec![chain.sender.key.sign(&bytes).to_bytes().to_vec()]);

    assert_eq!(
        verify(&chain, &tx),
        Err(VerificationError::PubKeyAddressMismatch {
            index: 0,
            address: victim.to_string(),
        })
    );
}

// ---------------------------------------------------------------------------
// Mode and field interplay
// ---------------------------------------------------------------------------

#[test]
fn legacy_signer_blocks_timeout_height() {
    let chain = setup();
    let unsigned = unsigned_tx(&chain, SignMode::Direct)
        .timeout_height(1_000)
        .build();

    let data = chain
        .accounts
        .signer_data(&chain.validator.address)
        .unwrap();
    assert_eq!(
        chain
            .registry
            .get_sign_bytes(SignMode::LegacyAminoJson, &data, &unsigned),
        Err(SignModeError::IncompatibleField {
            mode: SignMode::LegacyAminoJson,
            field: TxField::TimeoutHeight,
        })
    );

    let sender_data = chain.accounts.signer_data(&chain.sender.address).unwrap();
    let sender_bytes = chain
        .registry
        .get_sign_bytes(SignMode::Direct, &sender_data, &unsigned)
        .unwrap();
    let sender_sig = chain.sender.key.sign(&sender_bytes).to_bytes().to_vec();
    let tx = unsigned.with_signatures(vec![sender_sig, vec![0u8; 64]]);
    assert_eq!(
        verify(&chain, &tx),
        Err(VerificationError::SignBytes {
            index: 1,
            source: SignModeError::IncompatibleField {
                mode: SignMode::LegacyAminoJson,
                field: TxField::TimeoutHeight,
            },
        })
    );
}

#[test]
fn direct_only_key_policy() {
    let chain = setup();
    let mut registry = SignModeRegistry::with_defaults().unwrap();
    registry.permit_for_key(KeyType::Ed25519, vec![SignMode::Direct]);
    assert_eq!(registry.modes_for_key(KeyType::Ed25519), vec![SignMode::Direct]);

    let tx = sign_all(&chain, &unsigned_tx(&chain, SignMode::Direct).build());
    let result = verify_tx_signatures(
        &registry,
        &chain.accounts,
        &Ed25519Verifier,
        &AuthParams::default(),
        &tx,
    );
    assert_eq!(
        result,
        Err(VerificationError::ModeNotPermitted {
            index: 1,
            mode: SignMode::LegacyAminoJson,
            key_type: KeyType::Ed25519,
        })
    );
}

#[test]
fn registry_is_shared_across_threads() {
    let chain = setup();
    let tx = Arc::new(unsigned_tx(&chain, SignMode::Direct).build());
    let data = chain.accounts.signer_data(&chain.sender.address).unwrap();
    let expected = chain
        .registry
        .get_sign_bytes(SignMode::Direct, &data, &tx)
        .unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let registry = Arc::clone(&chain.registry);
            let tx = Arc::clone(&tx);
            let data = data.clone();
            std::thread::spawn(move || registry.get_sign_bytes(SignMode::Direct, &data, &tx))
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap().unwrap(), expected);
    }
}
