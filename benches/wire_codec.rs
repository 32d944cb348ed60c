//! Benchmark suite for the wire codec
//!
//! Measures decoding and encoding of a representative transaction payload
//! using the divan benchmarking framework.
//!
//! # Running Benchmarks
//!
//! ```bash
//! cargo bench
//! ```

use rust_banking_sdk::resources::transactions::Transaction;
use rust_banking_sdk::{FromWire, ToWire};
use serde_json::Value;

const TRANSACTION_JSON: &str = include_str!("../tests/fixtures/transaction.json");

fn main() {
    divan::main();
}

/// Benchmark decoding a transaction payload into its model
#[divan::bench]
fn decode_transaction(bencher: divan::Bencher) {
    let document: Value = serde_json::from_str(TRANSACTION_JSON).expect("Invalid fixture");

    bencher.bench(|| {
        Transaction::from_wire(divan::black_box(document.clone())).expect("Decoding failed")
    });
}

/// Benchmark encoding a transaction model back into a JSON value
#[divan::bench]
fn encode_transaction(bencher: divan::Bencher) {
    let document: Value = serde_json::from_str(TRANSACTION_JSON).expect("Invalid fixture");
    let transaction = Transaction::from_wire(document).expect("Decoding failed");

    bencher.bench(|| divan::black_box(&transaction).to_wire().expect("Encoding failed"));
}
