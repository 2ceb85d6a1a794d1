//! Property-based tests for sign-bytes determinism and canonical JSON.

use prost::Message;
use proptest::prelude::*;
use serde_json::{Map, Value};

use nova_auth::msgs::MsgSend;
use nova_auth::signing::canonical_json::to_canonical_bytes;
use nova_auth::signing::{SignMode, SignModeRegistry, SignerData};
use nova_auth::tx::{Tx, TxBuilder};
use nova_auth::types::{AccAddress, Coin, Coins};
use nova_auth::wire::{SignDocProto, TxBodyProto};

// ============================================================================
// Strategies
// ============================================================================

fn arb_text(max_len: usize) -> impl Strategy<Value = String> {
    prop::collection::vec(any::<char>(), 0..max_len).prop_map(|c| c.into_iter().collect())
}

fn arb_address() -> impl Strategy<Value = AccAddress> {
    prop::array::uniform20(any::<u8>()).prop_map(AccAddress::from)
}

fn arb_signer_data() -> impl Strategy<Value = SignerData> {
    ("[a-z][a-z0-9-]{0,31}", any::<u64>(), any::<u64>())
        .prop_map(|(chain_id, number, sequence)| SignerData::new(chain_id, number, sequence))
}

fn arb_tx() -> impl Strategy<Value = Tx> {
    (
        arb_address(),
        arb_address(),
        1u128..u128::MAX,
        arb_text(64),
        any::<u64>(),
    )
        .prop_map(|(from, to, amount, memo, gas)| {
            TxBuilder::new()
                .message(MsgSend::new(
                    from,
                    to,
                    Coins::new(vec![Coin::new(amount, "unova")]),
                ))
                .memo(memo)
                .fee(Coins::new(vec![Coin::new(1, "unova")]), gas)
                .build()
        })
}

fn arb_json(depth: u32) -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        arb_text(16).prop_map(Value::String),
    ];
    leaf.prop_recursive(depth, 64, 8, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::vec((arb_text(8), inner), 0..6)
                .prop_map(|entries| Value::Object(entries.into_iter().collect())),
        ]
    })
}

// ============================================================================
// Canonical JSON
// ============================================================================

proptest! {
    #[test]
    fn canonical_json_parses_back(value in arb_json(3)) {
        let bytes = to_canonical_bytes(&value).unwrap();
        let parsed: Value = serde_json::from_slice(&bytes).unwrap();
        prop_assert_eq!(parsed, value);
    }

    #[test]
    fn canonical_json_ignores_insertion_order(
        entries in prop::collection::btree_map(arb_text(8), any::<u32>(), 0..12)
    ) {
        let forward: Map<String, Value> =
            entries.iter().map(|(k, v)| (k.clone(), Value::from(*v))).collect();
        let backward: Map<String, Value> =
            entries.iter().rev().map(|(k, v)| (k.clone(), Value::from(*v))).collect();
        prop_assert_eq!(
            to_canonical_bytes(&Value::Object(forward)).unwrap(),
            to_canonical_bytes(&Value::Object(backward)).unwrap()
        );
    }

    #[test]
    fn canonical_json_has_no_html_characters(text in arb_text(64)) {
        let bytes = to_canonical_bytes(&Value::String(text)).unwrap();
        prop_assert!(!bytes.iter().any(|b| matches!(b, b'<' | b'>' | b'&')));
        prop_assert!(!bytes.iter().any(|b| *b < 0x20));
    }
}

// ============================================================================
// Sign bytes
// ============================================================================

proptest! {
    #[test]
    fn sign_bytes_are_deterministic(tx in arb_tx(), data in arb_signer_data()) {
        let registry = SignModeRegistry::with_defaults().unwrap();
        for mode in registry.supported_modes() {
            let a = registry.get_sign_bytes(mode, &data, &tx).unwrap();
            let b = registry.get_sign_bytes(mode, &data.clone(), &tx.clone()).unwrap();
            prop_assert_eq!(a, b);
        }
    }

    #[test]
    fn sequence_is_covered(tx in arb_tx(), data in arb_signer_data()) {
        let registry = SignModeRegistry::with_defaults().unwrap();
        let mut bumped = data.clone();
        bumped.account_sequence = data.account_sequence.wrapping_add(1);
        for mode in registry.supported_modes() {
            prop_assert_ne!(
                registry.get_sign_bytes(mode, &data, &tx).unwrap(),
                registry.get_sign_bytes(mode, &bumped, &tx).unwrap()
            );
        }
    }

    #[test]
    fn legacy_sign_bytes_are_valid_json(tx in arb_tx(), data in arb_signer_data()) {
        let registry = SignModeRegistry::with_defaults().unwrap();
        let bytes = registry
            .get_sign_bytes(SignMode::LegacyAminoJson, &data, &tx)
            .unwrap();
        let doc: Value = serde_json::from_slice(&bytes).unwrap();
        prop_assert_eq!(doc["memo"].as_str(), Some(tx.memo()));
        let expected_sequence = data.account_sequence.to_string();
        prop_assert_eq!(doc["sequence"].as_str(), Some(expected_sequence.as_str()));
    }

    #[test]
    fn direct_sign_doc_carries_signer_data(tx in arb_tx(), data in arb_signer_data()) {
        let registry = SignModeRegistry::with_defaults().unwrap();
        let bytes = registry.get_sign_bytes(SignMode::Direct, &data, &tx).unwrap();
        let doc = SignDocProto::decode(bytes.as_slice()).unwrap();
        prop_assert_eq!(&doc.chain_id, &data.chain_id);
        prop_assert_eq!(doc.account_number, data.account_number);
        prop_assert_eq!(doc.account_sequence, data.account_sequence);
        let body = TxBodyProto::decode(doc.body_bytes.as_slice()).unwrap();
        prop_assert_eq!(body.memo.as_str(), tx.memo());
    }
}
