// Sign-bytes and verification benchmarks for NOVA auth.
//
// Covers legacy Amino-JSON and Direct sign-bytes at growing message counts,
// canonical JSON encoding, and full transaction signature verification.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ed25519_dalek::{Signer, SigningKey};
use rand::rngs::OsRng;

use nova_auth::config::AuthParams;
use nova_auth::crypto::{Ed25519Verifier, PublicKey};
use nova_auth::msgs::MsgSend;
use nova_auth::signing::canonical_json::to_canonical_bytes;
use nova_auth::signing::legacy_amino::std_sign_doc;
use nova_auth::signing::{AccountRecord, AccountTable, SignMode, SignModeRegistry, SignerData};
use nova_auth::tx::{Tx, TxBuilder};
use nova_auth::types::{AccAddress, Coin, Coins};
use nova_auth::verify_tx_signatures;

fn sample_tx(messages: usize, mode: SignMode, public_key: Option<PublicKey>) -> Tx {
    let from = public_key
        .as_ref()
        .map(PublicKey::address)
        .unwrap_or_else(|| AccAddress::from([0x11; 20]));
    let mut builder = TxBuilder::new()
        .memo("monthly settlement")
        .fee(Coins::new(vec![Coin::new(2_000, "unova")]), 200_000)
        .signer_info(public_key, mode);
    for i in 0..messages {
        builder = builder.message(MsgSend::new(
            from.clone(),
            AccAddress::from([i as u8; 20]),
            Coins::new(vec![Coin::new(1_000 + i as u128, "unova")]),
        ));
    }
    builder.build()
}

fn bench_sign_bytes(c: &mut Criterion) {
    let registry = SignModeRegistry::with_defaults().unwrap();
    let data = SignerData::new("nova-testnet-1", 12, 4);

    for mode in [SignMode::Direct, SignMode::LegacyAminoJson] {
        let mut group = c.benchmark_group(format!("sign_bytes/{}", mode));
        for &messages in &[1usize, 10, 100] {
            let tx = sample_tx(messages, mode, None);
            group.throughput(Throughput::Elements(messages as u64));
            group.bench_with_input(BenchmarkId::from_parameter(messages), &tx, |b, tx| {
                b.iter(|| registry.get_sign_bytes(mode, &data, tx).unwrap());
            });
        }
        group.finish();
    }
}

fn bench_canonical_json(c: &mut Criterion) {
    let data = SignerData::new("nova-testnet-1", 12, 4);
    let tx = sample_tx(10, SignMode::LegacyAminoJson, None);
    let doc = std_sign_doc(&data, &tx).unwrap();

    c.bench_function("canonical_json/std_sign_doc_10_msgs", |b| {
        b.iter(|| to_canonical_bytes(&doc).unwrap());
    });
}

fn bench_verify_tx(c: &mut Criterion) {
    let registry = SignModeRegistry::with_defaults().unwrap();
    let key = SigningKey::generate(&mut OsRng);
    let public_key = PublicKey::Ed25519(key.verifying_key().to_bytes());

    let accounts = AccountTable::new("nova-testnet-1");
    accounts.insert(
        public_key.address(),
        AccountRecord {
            account_number: 12,
            sequence: 4,
            pub_key: None,
        },
    );
    let data = SignerData::new("nova-testnet-1", 12, 4);
    let params = AuthParams::default();

    for mode in [SignMode::Direct, SignMode::LegacyAminoJson] {
        let unsigned = sample_tx(1, mode, Some(public_key.clone()));
        let bytes = registry.get_sign_bytes(mode, &data, &unsigned).unwrap();
        let tx = unsigned.with_signatures(vec![key.sign(&bytes).to_bytes().to_vec()]);

        c.bench_function(&format!("verify_tx/{}", mode), |b| {
            b.iter(|| {
                verify_tx_signatures(&registry, &accounts, &Ed25519Verifier, &params, &tx).unwrap()
            });
        });
    }
}

criterion_group!(benches, bench_sign_bytes, bench_canonical_json, bench_verify_tx);
criterion_main!(benches);
