//! Wire-contract integration tests
//!
//! These tests validate the model layer's contract end to end using JSON
//! fixtures that mirror real API payloads. Each fixture test:
//! 1. Reads the payload from tests/fixtures/{resource}.json
//! 2. Decodes it into the resource's model
//! 3. Re-encodes the model and compares it with the original document
//! 4. Decodes the re-encoded document and compares the two models
//!
//! Beyond the per-resource round trips, the contract tests cover the laws
//! every model obeys: unset optionals are omitted while explicit nulls are
//! emitted, unknown enum values and unknown object fields survive a round
//! trip, decode failures name the offending field, and `with_*` updaters
//! never mutate their receiver.

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use rust_banking_sdk::resources::card_payments::CardPayment;
    use rust_banking_sdk::resources::declined_transactions::DeclinedTransaction;
    use rust_banking_sdk::resources::disputes::{
        CardDispute, CardDisputeCreateParams, CardDisputeListParams, CardDisputeStatus,
    };
    use rust_banking_sdk::resources::entities::Entity;
    use rust_banking_sdk::resources::pending_transactions::PendingTransaction;
    use rust_banking_sdk::resources::real_time_decisions::RealTimeDecision;
    use rust_banking_sdk::resources::transactions::{Transaction, TransactionListParams};
    use rust_banking_sdk::{Field, FromWire, ToWire, WireError};
    use serde_json::{json, Value};
    use std::fs;

    /// Load a JSON fixture from tests/fixtures/
    ///
    /// # Panics
    ///
    /// Panics if the fixture file is missing or not valid JSON.
    fn load_fixture(name: &str) -> Value {
        let path = format!("tests/fixtures/{}.json", name);
        let raw = fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path, e));
        serde_json::from_str(&raw)
            .unwrap_or_else(|e| panic!("Fixture {} is not valid JSON: {}", path, e))
    }

    /// Decode a document, re-encode it, and check both directions agree
    ///
    /// # Panics
    ///
    /// Panics if decoding fails, if the re-encoded document differs from
    /// the original, or if decoding the re-encoded document yields a
    /// different model.
    fn assert_round_trip<T>(name: &str, document: Value)
    where
        T: FromWire + ToWire + PartialEq + std::fmt::Debug,
    {
        let model = T::from_wire(document.clone())
            .unwrap_or_else(|e| panic!("Failed to decode fixture {}: {}", name, e));

        let encoded = model
            .to_wire()
            .unwrap_or_else(|e| panic!("Failed to encode fixture {}: {}", name, e));
        assert_eq!(
            encoded, document,
            "\n\nRe-encoded document differs for fixture: {}\n",
            name
        );

        let reparsed = T::from_wire(encoded)
            .unwrap_or_else(|e| panic!("Failed to re-decode fixture {}: {}", name, e));
        assert_eq!(
            reparsed, model,
            "\n\nRe-decoded model differs for fixture: {}\n",
            name
        );
    }

    /// Round-trip test for every resource fixture
    #[rstest]
    #[case("entity")]
    #[case("card_payment")]
    #[case("card_dispute")]
    #[case("declined_transaction")]
    #[case("pending_transaction")]
    #[case("real_time_decision")]
    #[case("transaction")]
    fn test_fixture_round_trips(#[case] fixture_name: &str) {
        let document = load_fixture(fixture_name);
        match fixture_name {
            "entity" => assert_round_trip::<Entity>(fixture_name, document),
            "card_payment" => assert_round_trip::<CardPayment>(fixture_name, document),
            "card_dispute" => assert_round_trip::<CardDispute>(fixture_name, document),
            "declined_transaction" => {
                assert_round_trip::<DeclinedTransaction>(fixture_name, document)
            }
            "pending_transaction" => {
                assert_round_trip::<PendingTransaction>(fixture_name, document)
            }
            "real_time_decision" => {
                assert_round_trip::<RealTimeDecision>(fixture_name, document)
            }
            "transaction" => assert_round_trip::<Transaction>(fixture_name, document),
            other => panic!("No model mapped for fixture: {}", other),
        }
    }

    /// Server-added fields must survive decode and re-encode on every resource
    #[rstest]
    #[case("transaction")]
    #[case("entity")]
    #[case("card_dispute")]
    fn test_server_added_fields_round_trip(#[case] fixture_name: &str) {
        let mut document = load_fixture(fixture_name);
        document["added_in_a_future_version"] = json!({"flag": true, "values": [1, 2, 3]});

        let encoded = match fixture_name {
            "transaction" => Transaction::from_wire(document.clone())
                .unwrap()
                .to_wire()
                .unwrap(),
            "entity" => Entity::from_wire(document.clone())
                .unwrap()
                .to_wire()
                .unwrap(),
            "card_dispute" => CardDispute::from_wire(document.clone())
                .unwrap()
                .to_wire()
                .unwrap(),
            other => panic!("No model mapped for fixture: {}", other),
        };
        assert_eq!(encoded, document);
    }

    #[test]
    fn test_unset_optional_is_omitted_and_null_is_emitted() {
        // Required fields only: no optional key appears in the output.
        let params = CardDisputeCreateParams::new("transaction_uyrp7fld2ium70oa7oi", "Fraud");
        assert_eq!(
            params.to_wire().unwrap(),
            json!({
                "disputed_transaction_id": "transaction_uyrp7fld2ium70oa7oi",
                "explanation": "Fraud"
            })
        );

        // An explicit null is a distinct, serialized state.
        assert_eq!(
            params.with_amount(Field::Null).to_wire().unwrap(),
            json!({
                "disputed_transaction_id": "transaction_uyrp7fld2ium70oa7oi",
                "explanation": "Fraud",
                "amount": null
            })
        );

        // And a set value serializes as itself.
        assert_eq!(
            params.with_amount(500).to_wire().unwrap(),
            json!({
                "disputed_transaction_id": "transaction_uyrp7fld2ium70oa7oi",
                "explanation": "Fraud",
                "amount": 500
            })
        );
    }

    #[test]
    fn test_three_states_survive_a_params_round_trip() {
        let unset = CardDisputeCreateParams::new("transaction_abc", "Fraud");
        let null = unset.with_amount(Field::Null);
        let set = unset.with_amount(500);

        for params in [&unset, &null, &set] {
            let reparsed =
                CardDisputeCreateParams::from_wire(params.to_wire().unwrap()).unwrap();
            assert_eq!(&reparsed, params);
        }
        assert_ne!(unset, null, "unset and explicit null must stay distinct");
    }

    #[test]
    fn test_unrecognized_enum_value_round_trips_unchanged() {
        let status = CardDisputeStatus::from("under_arbitration");
        assert_eq!(
            status,
            CardDisputeStatus::Unknown("under_arbitration".to_string())
        );
        assert_eq!(status.to_wire().unwrap(), json!("under_arbitration"));
    }

    #[test]
    fn test_missing_required_field_names_the_field() {
        let mut document = load_fixture("transaction");
        document.as_object_mut().unwrap().remove("account_id");

        let err = Transaction::from_wire(document).unwrap_err();
        assert_eq!(err, WireError::missing_field("account_id"));
        assert_eq!(err.to_string(), "missing required field `account_id`");
    }

    #[test]
    fn test_type_mismatch_reports_the_nested_path() {
        let mut document = load_fixture("transaction");
        document["source"]["interest_payment"]["amount"] = json!("twelve dollars");

        let err = Transaction::from_wire(document).unwrap_err();
        assert_eq!(err.field(), Some("source.interest_payment.amount"));
        assert_eq!(
            err.to_string(),
            "type mismatch for field `source.interest_payment.amount`: \
             expected integer, found string"
        );
    }

    #[test]
    fn test_with_updaters_never_mutate_the_receiver() {
        let original = TransactionListParams::new().with_account_id("account_abc");
        let updated = original.with_limit(25).with_cursor("page_2");

        assert!(original.limit.is_unset());
        assert!(original.cursor.is_unset());
        assert_eq!(original.account_id.value().map(String::as_str), Some("account_abc"));

        assert_eq!(updated.limit, Field::Set(25));
        assert_eq!(updated.cursor.value().map(String::as_str), Some("page_2"));
    }

    #[test]
    fn test_list_params_from_wire_enforces_types() {
        let err = CardDisputeListParams::from_wire(json!({"limit": "ten"})).unwrap_err();
        assert_eq!(
            err,
            WireError::TypeMismatch {
                field: "limit".to_string(),
                expected: "integer",
                found: "string".to_string(),
            }
        );
    }
}
