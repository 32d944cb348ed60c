//! Declined transactions
//!
//! A declined transaction records funds that were prevented from moving:
//! a card authorization the platform refused, an ACH debit against a
//! disabled route, a check the account couldn't cover. Nothing about the
//! account's balance changes, but the attempt and the reason it was refused
//! are kept for audit. The `source` object is a `category`-discriminated
//! union modeled as [`DeclinedTransactionSource`].

use chrono::{DateTime, Utc};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::resources::shared::{CardNetwork, Currency, RouteType};
use crate::types::WireError;
use crate::wire::{wire_enum, ExtraFields, Field, FromWire, WireObject};

wire_enum! {
    /// Identifies declined transaction objects on the wire
    pub enum DeclinedTransactionKind {
        DeclinedTransaction => "declined_transaction",
    }
}

wire_enum! {
    /// The kind of decline a declined transaction's source records
    pub enum DeclinedTransactionSourceCategory {
        AchDecline => "ach_decline",
        CardDecline => "card_decline",
        CheckDecline => "check_decline",
        InboundRealTimePaymentsTransferDecline => "inbound_real_time_payments_transfer_decline",
        WireDecline => "wire_decline",
    }
}

wire_enum! {
    /// Why an ACH transfer was declined
    pub enum AchDeclineReason {
        AchRouteCanceled => "ach_route_canceled",
        AchRouteDisabled => "ach_route_disabled",
        BreachesLimit => "breaches_limit",
        EntityNotActive => "entity_not_active",
        GroupLocked => "group_locked",
        InsufficientFunds => "insufficient_funds",
        NoAchRoute => "no_ach_route",
        OriginatorRequest => "originator_request",
        TransactionNotAllowed => "transaction_not_allowed",
    }
}

wire_enum! {
    /// Why a card authorization was declined
    pub enum CardDeclineReason {
        CardNotActive => "card_not_active",
        EntityNotActive => "entity_not_active",
        GroupLocked => "group_locked",
        InsufficientFunds => "insufficient_funds",
        Cvv2Mismatch => "cvv2_mismatch",
        TransactionNotAllowed => "transaction_not_allowed",
        BreachesLimit => "breaches_limit",
        WebhookDeclined => "webhook_declined",
        WebhookTimedOut => "webhook_timed_out",
    }
}

wire_enum! {
    /// Why a check was declined
    pub enum CheckDeclineReason {
        AchRouteCanceled => "ach_route_canceled",
        AchRouteDisabled => "ach_route_disabled",
        AlteredOrFictitious => "altered_or_fictitious",
        BreachesLimit => "breaches_limit",
        EntityNotActive => "entity_not_active",
        GroupLocked => "group_locked",
        InsufficientFunds => "insufficient_funds",
        UnableToLocateAccount => "unable_to_locate_account",
        NotOurItem => "not_our_item",
        UnableToProcess => "unable_to_process",
        StopPaymentRequested => "stop_payment_requested",
    }
}

wire_enum! {
    /// Why an inbound real-time payments transfer was declined
    pub enum InboundRealTimePaymentsTransferDeclineReason {
        AccountNumberCanceled => "account_number_canceled",
        AccountNumberDisabled => "account_number_disabled",
        AccountRestricted => "account_restricted",
        GroupLocked => "group_locked",
        EntityNotActive => "entity_not_active",
        RealTimePaymentsNotEnabled => "real_time_payments_not_enabled",
    }
}

wire_enum! {
    /// Why a wire transfer was declined
    pub enum WireDeclineReason {
        AccountNumberCanceled => "account_number_canceled",
        AccountNumberDisabled => "account_number_disabled",
        EntityNotActive => "entity_not_active",
        GroupLocked => "group_locked",
        NoAccountNumber => "no_account_number",
        TransactionNotAllowed => "transaction_not_allowed",
    }
}

/// A declined ACH transfer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AchDecline {
    /// The ACH decline identifier
    pub id: String,
    /// The declined amount in USD cents
    pub amount: i64,
    /// The descriptive name of the originating company
    pub originator_company_name: String,
    /// The descriptive date set by the originator, if any
    pub originator_company_descriptive_date: Option<String>,
    /// The identifier of the originating company
    pub originator_company_id: String,
    pub reason: AchDeclineReason,
    pub receiver_id_number: Option<String>,
    pub receiver_name: Option<String>,
    /// The trace number of the transfer
    pub trace_number: String,
}

impl FromWire for AchDecline {
    fn from_wire(value: Value) -> Result<Self, WireError> {
        let mut obj = WireObject::new(value)?;
        Ok(AchDecline {
            id: obj.required("id")?,
            amount: obj.required("amount")?,
            originator_company_name: obj.required("originator_company_name")?,
            originator_company_descriptive_date: obj
                .required("originator_company_descriptive_date")?,
            originator_company_id: obj.required("originator_company_id")?,
            reason: obj.required("reason")?,
            receiver_id_number: obj.required("receiver_id_number")?,
            receiver_name: obj.required("receiver_name")?,
            trace_number: obj.required("trace_number")?,
        })
    }
}

/// A declined card authorization
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardDecline {
    /// The card decline identifier
    pub id: String,
    /// The declined amount in the minor unit of `currency`
    pub amount: i64,
    pub currency: Currency,
    /// The digital wallet token used, if the attempt was tokenized
    pub digital_wallet_token_id: Option<String>,
    pub merchant_acceptor_id: String,
    /// The 4-digit merchant category code (MCC)
    pub merchant_category_code: String,
    pub merchant_city: Option<String>,
    pub merchant_country: String,
    pub merchant_descriptor: String,
    pub network: CardNetwork,
    pub reason: CardDeclineReason,
    /// The real-time decision that declined this attempt, if one ran
    pub real_time_decision_id: Option<String>,
}

impl FromWire for CardDecline {
    fn from_wire(value: Value) -> Result<Self, WireError> {
        let mut obj = WireObject::new(value)?;
        Ok(CardDecline {
            id: obj.required("id")?,
            amount: obj.required("amount")?,
            currency: obj.required("currency")?,
            digital_wallet_token_id: obj.required("digital_wallet_token_id")?,
            merchant_acceptor_id: obj.required("merchant_acceptor_id")?,
            merchant_category_code: obj.required("merchant_category_code")?,
            merchant_city: obj.required("merchant_city")?,
            merchant_country: obj.required("merchant_country")?,
            merchant_descriptor: obj.required("merchant_descriptor")?,
            network: obj.required("network")?,
            reason: obj.required("reason")?,
            real_time_decision_id: obj.required("real_time_decision_id")?,
        })
    }
}

/// A declined check
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckDecline {
    /// The declined amount in USD cents
    pub amount: i64,
    /// The check's auxiliary on-us field, if present
    pub auxiliary_on_us: Option<String>,
    pub reason: CheckDeclineReason,
}

impl FromWire for CheckDecline {
    fn from_wire(value: Value) -> Result<Self, WireError> {
        let mut obj = WireObject::new(value)?;
        Ok(CheckDecline {
            amount: obj.required("amount")?,
            auxiliary_on_us: obj.required("auxiliary_on_us")?,
            reason: obj.required("reason")?,
        })
    }
}

/// A declined inbound real-time payments transfer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InboundRealTimePaymentsTransferDecline {
    /// The declined amount in the minor unit of `currency`
    pub amount: i64,
    /// The name the sender gave for the recipient
    pub creditor_name: String,
    pub currency: Currency,
    pub debtor_account_number: String,
    pub debtor_name: String,
    pub debtor_routing_number: String,
    pub reason: InboundRealTimePaymentsTransferDeclineReason,
    /// Additional information the sender included, if any
    pub remittance_information: Option<String>,
    /// The network identification of the declined transfer
    pub transaction_identification: String,
}

impl FromWire for InboundRealTimePaymentsTransferDecline {
    fn from_wire(value: Value) -> Result<Self, WireError> {
        let mut obj = WireObject::new(value)?;
        Ok(InboundRealTimePaymentsTransferDecline {
            amount: obj.required("amount")?,
            creditor_name: obj.required("creditor_name")?,
            currency: obj.required("currency")?,
            debtor_account_number: obj.required("debtor_account_number")?,
            debtor_name: obj.required("debtor_name")?,
            debtor_routing_number: obj.required("debtor_routing_number")?,
            reason: obj.required("reason")?,
            remittance_information: obj.required("remittance_information")?,
            transaction_identification: obj.required("transaction_identification")?,
        })
    }
}

/// A declined wire transfer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WireDecline {
    /// The declined amount in USD cents
    pub amount: i64,
    /// The beneficiary reference from the transfer, if any
    pub beneficiary_reference: Option<String>,
    pub description: String,
    /// The originator's routing number, if provided
    pub originator_routing_number: Option<String>,
    pub reason: WireDeclineReason,
}

impl FromWire for WireDecline {
    fn from_wire(value: Value) -> Result<Self, WireError> {
        let mut obj = WireObject::new(value)?;
        Ok(WireDecline {
            amount: obj.required("amount")?,
            beneficiary_reference: obj.required("beneficiary_reference")?,
            description: obj.required("description")?,
            originator_routing_number: obj.required("originator_routing_number")?,
            reason: obj.required("reason")?,
        })
    }
}

/// The category-specific payload of a declined transaction's source
///
/// Exactly one detail is populated per declined transaction, selected by
/// the wire `category` field. Categories added to the API after this SDK
/// version decode to [`DeclinedTransactionSource::Unrecognized`], which
/// keeps the source object's remaining payload verbatim.
#[derive(Debug, Clone, PartialEq)]
pub enum DeclinedTransactionSource {
    AchDecline(AchDecline),
    CardDecline(CardDecline),
    CheckDecline(CheckDecline),
    InboundRealTimePaymentsTransferDecline(InboundRealTimePaymentsTransferDecline),
    WireDecline(WireDecline),
    /// A category not yet known to this SDK version
    Unrecognized {
        /// The raw `category` value from the wire
        category: String,
        /// The source object's remaining fields, preserved verbatim
        fields: ExtraFields,
    },
}

impl DeclinedTransactionSource {
    /// The discriminator value for this source
    pub fn category(&self) -> DeclinedTransactionSourceCategory {
        match self {
            DeclinedTransactionSource::AchDecline(_) => {
                DeclinedTransactionSourceCategory::AchDecline
            }
            DeclinedTransactionSource::CardDecline(_) => {
                DeclinedTransactionSourceCategory::CardDecline
            }
            DeclinedTransactionSource::CheckDecline(_) => {
                DeclinedTransactionSourceCategory::CheckDecline
            }
            DeclinedTransactionSource::InboundRealTimePaymentsTransferDecline(_) => {
                DeclinedTransactionSourceCategory::InboundRealTimePaymentsTransferDecline
            }
            DeclinedTransactionSource::WireDecline(_) => {
                DeclinedTransactionSourceCategory::WireDecline
            }
            DeclinedTransactionSource::Unrecognized { category, .. } => {
                DeclinedTransactionSourceCategory::Unknown(category.clone())
            }
        }
    }

    /// The card decline detail, if this was a declined card authorization
    pub fn as_card_decline(&self) -> Option<&CardDecline> {
        match self {
            DeclinedTransactionSource::CardDecline(detail) => Some(detail),
            _ => None,
        }
    }

    /// The ACH decline detail, if this was a declined ACH transfer
    pub fn as_ach_decline(&self) -> Option<&AchDecline> {
        match self {
            DeclinedTransactionSource::AchDecline(detail) => Some(detail),
            _ => None,
        }
    }
}

impl FromWire for DeclinedTransactionSource {
    fn from_wire(value: Value) -> Result<Self, WireError> {
        let mut obj = WireObject::new(value)?;
        let category: DeclinedTransactionSourceCategory = obj.required("category")?;
        match category {
            DeclinedTransactionSourceCategory::AchDecline => Ok(
                DeclinedTransactionSource::AchDecline(obj.required("ach_decline")?),
            ),
            DeclinedTransactionSourceCategory::CardDecline => Ok(
                DeclinedTransactionSource::CardDecline(obj.required("card_decline")?),
            ),
            DeclinedTransactionSourceCategory::CheckDecline => Ok(
                DeclinedTransactionSource::CheckDecline(obj.required("check_decline")?),
            ),
            DeclinedTransactionSourceCategory::InboundRealTimePaymentsTransferDecline => {
                Ok(DeclinedTransactionSource::InboundRealTimePaymentsTransferDecline(
                    obj.required("inbound_real_time_payments_transfer_decline")?,
                ))
            }
            DeclinedTransactionSourceCategory::WireDecline => Ok(
                DeclinedTransactionSource::WireDecline(obj.required("wire_decline")?),
            ),
            DeclinedTransactionSourceCategory::Unknown(category) => {
                Ok(DeclinedTransactionSource::Unrecognized {
                    category,
                    fields: obj.into_extra(),
                })
            }
        }
    }
}

impl Serialize for DeclinedTransactionSource {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("category", self.category().as_str())?;
        match self {
            DeclinedTransactionSource::AchDecline(d) => map.serialize_entry("ach_decline", d)?,
            DeclinedTransactionSource::CardDecline(d) => {
                map.serialize_entry("card_decline", d)?
            }
            DeclinedTransactionSource::CheckDecline(d) => {
                map.serialize_entry("check_decline", d)?
            }
            DeclinedTransactionSource::InboundRealTimePaymentsTransferDecline(d) => {
                map.serialize_entry("inbound_real_time_payments_transfer_decline", d)?
            }
            DeclinedTransactionSource::WireDecline(d) => {
                map.serialize_entry("wire_decline", d)?
            }
            DeclinedTransactionSource::Unrecognized { fields, .. } => {
                for (key, value) in fields.iter() {
                    map.serialize_entry(key, value)?;
                }
            }
        }
        map.end()
    }
}

/// Funds that were prevented from moving, and why
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeclinedTransaction {
    /// The declined transaction identifier
    pub id: String,
    /// The account the decline occurred against
    pub account_id: String,
    /// The declined amount in the minor unit of `currency`
    pub amount: i64,
    pub currency: Currency,
    /// When the decline occurred
    pub created_at: DateTime<Utc>,
    pub description: String,
    /// The route the attempt came in over, if any
    pub route_id: Option<String>,
    pub route_type: Option<RouteType>,
    /// Why the funds were declined, with category-specific detail
    pub source: DeclinedTransactionSource,
    /// A constant representing the object's type on the wire
    #[serde(rename = "type")]
    pub transaction_type: DeclinedTransactionKind,
    /// Fields returned by the API but unknown to this SDK version
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl FromWire for DeclinedTransaction {
    fn from_wire(value: Value) -> Result<Self, WireError> {
        let mut obj = WireObject::new(value)?;
        Ok(DeclinedTransaction {
            id: obj.required("id")?,
            account_id: obj.required("account_id")?,
            amount: obj.required("amount")?,
            currency: obj.required("currency")?,
            created_at: obj.required("created_at")?,
            description: obj.required("description")?,
            route_id: obj.required("route_id")?,
            route_type: obj.required("route_type")?,
            source: obj.required("source")?,
            transaction_type: obj.required("type")?,
            extra: obj.into_extra(),
        })
    }
}

/// Parameters for listing declined transactions
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct DeclinedTransactionListParams {
    #[serde(skip_serializing_if = "Field::is_unset")]
    pub account_id: Field<String>,
    #[serde(skip_serializing_if = "Field::is_unset")]
    pub route_id: Field<String>,
    #[serde(skip_serializing_if = "Field::is_unset")]
    pub cursor: Field<String>,
    #[serde(skip_serializing_if = "Field::is_unset")]
    pub limit: Field<i64>,
}

impl DeclinedTransactionListParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_account_id(&self, account_id: impl Into<String>) -> Self {
        let mut params = self.clone();
        params.account_id = Field::Set(account_id.into());
        params
    }

    pub fn with_route_id(&self, route_id: impl Into<String>) -> Self {
        let mut params = self.clone();
        params.route_id = Field::Set(route_id.into());
        params
    }

    pub fn with_cursor(&self, cursor: impl Into<String>) -> Self {
        let mut params = self.clone();
        params.cursor = Field::Set(cursor.into());
        params
    }

    pub fn with_limit(&self, limit: i64) -> Self {
        let mut params = self.clone();
        params.limit = Field::Set(limit);
        params
    }
}

impl FromWire for DeclinedTransactionListParams {
    fn from_wire(value: Value) -> Result<Self, WireError> {
        let mut obj = WireObject::new(value)?;
        Ok(DeclinedTransactionListParams {
            account_id: obj.optional("account_id")?,
            route_id: obj.optional("route_id")?,
            cursor: obj.optional("cursor")?,
            limit: obj.optional("limit")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::ToWire;
    use serde_json::json;

    fn card_decline_json() -> Value {
        json!({
            "id": "card_decline_8mlkv9nfao0syvvkel3h",
            "amount": 1750,
            "currency": "USD",
            "digital_wallet_token_id": null,
            "merchant_acceptor_id": "5665270011000168",
            "merchant_category_code": "5734",
            "merchant_city": "New York",
            "merchant_country": "US",
            "merchant_descriptor": "COFFEE SHOP",
            "network": "visa",
            "reason": "insufficient_funds",
            "real_time_decision_id": null
        })
    }

    #[test]
    fn test_card_decline_round_trips() {
        let wire = json!({
            "id": "declined_transaction_17jbn0yyhvkt4v4ooym8",
            "account_id": "account_in71c4amph0vgo2qllky",
            "amount": -1750,
            "currency": "USD",
            "created_at": "2024-02-27T11:10:00Z",
            "description": "COFFEE SHOP",
            "route_id": "card_oubs0hwk5rn6knuecxg2",
            "route_type": "card",
            "source": {
                "category": "card_decline",
                "card_decline": card_decline_json()
            },
            "type": "declined_transaction"
        });

        let declined = DeclinedTransaction::from_wire(wire.clone()).unwrap();
        let decline = declined
            .source
            .as_card_decline()
            .expect("source should be a card decline");
        assert_eq!(decline.reason, CardDeclineReason::InsufficientFunds);
        assert_eq!(declined.route_type, Some(RouteType::Card));
        assert_eq!(declined.to_wire().unwrap(), wire);
    }

    #[test]
    fn test_unknown_source_category_preserves_payload() {
        let source = json!({
            "category": "inbound_fednow_transfer_decline",
            "inbound_fednow_transfer_decline": {"amount": 100, "reason": "account_restricted"}
        });

        let decoded = DeclinedTransactionSource::from_wire(source.clone()).unwrap();
        match &decoded {
            DeclinedTransactionSource::Unrecognized { category, fields } => {
                assert_eq!(category, "inbound_fednow_transfer_decline");
                assert_eq!(fields.len(), 1);
            }
            other => panic!("expected Unrecognized, got {:?}", other),
        }
        assert_eq!(decoded.to_wire().unwrap(), source);
    }

    #[test]
    fn test_unknown_decline_reason_is_not_an_error() {
        let mut wire = card_decline_json();
        wire["reason"] = json!("suspected_fraud");
        let decline = CardDecline::from_wire(wire).unwrap();
        assert_eq!(
            decline.reason,
            CardDeclineReason::Unknown("suspected_fraud".to_string())
        );
        assert_eq!(decline.reason.as_str(), "suspected_fraud");
    }

    #[test]
    fn test_source_error_path_includes_category_key() {
        let source = json!({
            "category": "check_decline",
            "check_decline": {"amount": 100, "auxiliary_on_us": null}
        });
        let err = DeclinedTransactionSource::from_wire(source).unwrap_err();
        assert_eq!(err.field(), Some("check_decline.reason"));
    }
}
