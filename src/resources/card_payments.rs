//! Card payments
//!
//! A card payment groups the whole lifecycle of one payment on a card:
//! authorization, incremental adjustments, reversals, and eventual
//! settlement or refund. The `elements` list records each lifecycle event in
//! order; each element is a `category`-discriminated union modeled as
//! [`CardPaymentElementDetail`].
//!
//! The card detail models defined here (authorization, settlement, refund)
//! are shared with the transaction-family resources, which reference the
//! same objects from their own sources.

use chrono::{DateTime, Utc};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::resources::declined_transactions::CardDecline;
use crate::resources::shared::{CardNetwork, Currency};
use crate::types::WireError;
use crate::wire::{wire_enum, ExtraFields, Field, FromWire, WireObject};

wire_enum! {
    /// Identifies card payment objects on the wire
    pub enum CardPaymentKind {
        CardPayment => "card_payment",
    }
}

wire_enum! {
    /// The direction of money movement for a card authorization
    pub enum CardAuthorizationDirection {
        /// The merchant is debiting the cardholder
        Settlement => "settlement",
        /// The merchant is crediting the cardholder
        Refund => "refund",
    }
}

wire_enum! {
    /// The kind of lifecycle event a card payment element records
    pub enum CardPaymentElementCategory {
        CardAuthorization => "card_authorization",
        CardAuthorizationExpiration => "card_authorization_expiration",
        CardDecline => "card_decline",
        CardIncrement => "card_increment",
        CardRefund => "card_refund",
        CardReversal => "card_reversal",
        CardSettlement => "card_settlement",
    }
}

/// A hold placed on a cardholder's funds by a merchant
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardAuthorization {
    /// The card authorization identifier
    pub id: String,
    /// The authorized amount in the minor unit of `currency`
    pub amount: i64,
    pub currency: Currency,
    /// The digital wallet token used, if the payment was tokenized
    pub digital_wallet_token_id: Option<String>,
    pub direction: CardAuthorizationDirection,
    /// When the authorization will expire if not settled
    pub expires_at: DateTime<Utc>,
    pub merchant_acceptor_id: String,
    /// The 4-digit merchant category code (MCC)
    pub merchant_category_code: String,
    pub merchant_city: Option<String>,
    pub merchant_country: String,
    pub merchant_descriptor: String,
    pub network: CardNetwork,
    /// The pending transaction created by this hold, if any
    pub pending_transaction_id: Option<String>,
    /// The real-time decision that approved this authorization, if one ran
    pub real_time_decision_id: Option<String>,
}

impl FromWire for CardAuthorization {
    fn from_wire(value: Value) -> Result<Self, WireError> {
        let mut obj = WireObject::new(value)?;
        Ok(CardAuthorization {
            id: obj.required("id")?,
            amount: obj.required("amount")?,
            currency: obj.required("currency")?,
            digital_wallet_token_id: obj.required("digital_wallet_token_id")?,
            direction: obj.required("direction")?,
            expires_at: obj.required("expires_at")?,
            merchant_acceptor_id: obj.required("merchant_acceptor_id")?,
            merchant_category_code: obj.required("merchant_category_code")?,
            merchant_city: obj.required("merchant_city")?,
            merchant_country: obj.required("merchant_country")?,
            merchant_descriptor: obj.required("merchant_descriptor")?,
            network: obj.required("network")?,
            pending_transaction_id: obj.required("pending_transaction_id")?,
            real_time_decision_id: obj.required("real_time_decision_id")?,
        })
    }
}

/// The release of a hold that was never settled
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardAuthorizationExpiration {
    pub id: String,
    /// The amount released in the minor unit of `currency`
    pub expired_amount: i64,
    pub currency: Currency,
    /// The authorization that expired
    pub card_authorization_id: String,
}

impl FromWire for CardAuthorizationExpiration {
    fn from_wire(value: Value) -> Result<Self, WireError> {
        let mut obj = WireObject::new(value)?;
        Ok(CardAuthorizationExpiration {
            id: obj.required("id")?,
            expired_amount: obj.required("expired_amount")?,
            currency: obj.required("currency")?,
            card_authorization_id: obj.required("card_authorization_id")?,
        })
    }
}

/// An increase to the amount of an existing authorization
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardIncrement {
    pub id: String,
    /// The additional amount in the minor unit of `currency`
    pub amount: i64,
    pub currency: Currency,
    /// The authorization that was incremented
    pub card_authorization_id: String,
    /// The total authorized amount after the increment
    pub updated_authorization_amount: i64,
}

impl FromWire for CardIncrement {
    fn from_wire(value: Value) -> Result<Self, WireError> {
        let mut obj = WireObject::new(value)?;
        Ok(CardIncrement {
            id: obj.required("id")?,
            amount: obj.required("amount")?,
            currency: obj.required("currency")?,
            card_authorization_id: obj.required("card_authorization_id")?,
            updated_authorization_amount: obj.required("updated_authorization_amount")?,
        })
    }
}

/// A partial or full release of a hold by the merchant
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardReversal {
    pub id: String,
    /// The amount reversed in the minor unit of `currency`
    pub reversal_amount: i64,
    pub currency: Currency,
    /// The authorization that was reversed
    pub card_authorization_id: String,
    /// The remaining authorized amount after the reversal
    pub updated_authorization_amount: i64,
}

impl FromWire for CardReversal {
    fn from_wire(value: Value) -> Result<Self, WireError> {
        let mut obj = WireObject::new(value)?;
        Ok(CardReversal {
            id: obj.required("id")?,
            reversal_amount: obj.required("reversal_amount")?,
            currency: obj.required("currency")?,
            card_authorization_id: obj.required("card_authorization_id")?,
            updated_authorization_amount: obj.required("updated_authorization_amount")?,
        })
    }
}

/// The capture of funds held by an authorization
///
/// Settlements create a transaction on the cardholder's account and are the
/// object a card dispute is filed against.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardSettlement {
    /// The card settlement identifier
    pub id: String,
    /// The settled amount in the minor unit of `currency`
    pub amount: i64,
    pub currency: Currency,
    /// The authorization this settlement captured, if any
    pub card_authorization: Option<String>,
    pub merchant_acceptor_id: String,
    pub merchant_category_code: String,
    pub merchant_city: Option<String>,
    pub merchant_country: String,
    pub merchant_descriptor: String,
    /// The pending transaction this settlement completed, if any
    pub pending_transaction_id: Option<String>,
    /// The transaction created on the cardholder's account
    pub transaction_id: String,
}

impl FromWire for CardSettlement {
    fn from_wire(value: Value) -> Result<Self, WireError> {
        let mut obj = WireObject::new(value)?;
        Ok(CardSettlement {
            id: obj.required("id")?,
            amount: obj.required("amount")?,
            currency: obj.required("currency")?,
            card_authorization: obj.required("card_authorization")?,
            merchant_acceptor_id: obj.required("merchant_acceptor_id")?,
            merchant_category_code: obj.required("merchant_category_code")?,
            merchant_city: obj.required("merchant_city")?,
            merchant_country: obj.required("merchant_country")?,
            merchant_descriptor: obj.required("merchant_descriptor")?,
            pending_transaction_id: obj.required("pending_transaction_id")?,
            transaction_id: obj.required("transaction_id")?,
        })
    }
}

/// Funds returned to the cardholder by a merchant
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardRefund {
    /// The card refund identifier
    pub id: String,
    /// The refunded amount in the minor unit of `currency`
    pub amount: i64,
    pub currency: Currency,
    pub merchant_acceptor_id: String,
    pub merchant_category_code: String,
    pub merchant_city: Option<String>,
    pub merchant_country: String,
    pub merchant_descriptor: String,
    /// The transaction created on the cardholder's account
    pub transaction_id: String,
}

impl FromWire for CardRefund {
    fn from_wire(value: Value) -> Result<Self, WireError> {
        let mut obj = WireObject::new(value)?;
        Ok(CardRefund {
            id: obj.required("id")?,
            amount: obj.required("amount")?,
            currency: obj.required("currency")?,
            merchant_acceptor_id: obj.required("merchant_acceptor_id")?,
            merchant_category_code: obj.required("merchant_category_code")?,
            merchant_city: obj.required("merchant_city")?,
            merchant_country: obj.required("merchant_country")?,
            merchant_descriptor: obj.required("merchant_descriptor")?,
            transaction_id: obj.required("transaction_id")?,
        })
    }
}

/// The category-specific payload of one card payment element
///
/// Exactly one detail is populated per element, selected by the wire
/// `category` field; the sum type makes that structural. Categories added
/// to the API after this SDK version decode to
/// [`CardPaymentElementDetail::Unrecognized`], with the detail payload
/// preserved through the element's `extra` fields.
#[derive(Debug, Clone, PartialEq)]
pub enum CardPaymentElementDetail {
    CardAuthorization(CardAuthorization),
    CardAuthorizationExpiration(CardAuthorizationExpiration),
    CardDecline(CardDecline),
    CardIncrement(CardIncrement),
    CardRefund(CardRefund),
    CardReversal(CardReversal),
    CardSettlement(CardSettlement),
    /// A category not yet known to this SDK version
    Unrecognized {
        /// The raw `category` value from the wire
        category: String,
    },
}

impl CardPaymentElementDetail {
    /// The discriminator value for this detail
    pub fn category(&self) -> CardPaymentElementCategory {
        match self {
            CardPaymentElementDetail::CardAuthorization(_) => {
                CardPaymentElementCategory::CardAuthorization
            }
            CardPaymentElementDetail::CardAuthorizationExpiration(_) => {
                CardPaymentElementCategory::CardAuthorizationExpiration
            }
            CardPaymentElementDetail::CardDecline(_) => CardPaymentElementCategory::CardDecline,
            CardPaymentElementDetail::CardIncrement(_) => {
                CardPaymentElementCategory::CardIncrement
            }
            CardPaymentElementDetail::CardRefund(_) => CardPaymentElementCategory::CardRefund,
            CardPaymentElementDetail::CardReversal(_) => {
                CardPaymentElementCategory::CardReversal
            }
            CardPaymentElementDetail::CardSettlement(_) => {
                CardPaymentElementCategory::CardSettlement
            }
            CardPaymentElementDetail::Unrecognized { category } => {
                CardPaymentElementCategory::Unknown(category.clone())
            }
        }
    }

    /// The authorization detail, if this element is an authorization
    pub fn as_card_authorization(&self) -> Option<&CardAuthorization> {
        match self {
            CardPaymentElementDetail::CardAuthorization(detail) => Some(detail),
            _ => None,
        }
    }

    /// The settlement detail, if this element is a settlement
    pub fn as_card_settlement(&self) -> Option<&CardSettlement> {
        match self {
            CardPaymentElementDetail::CardSettlement(detail) => Some(detail),
            _ => None,
        }
    }

    /// The refund detail, if this element is a refund
    pub fn as_card_refund(&self) -> Option<&CardRefund> {
        match self {
            CardPaymentElementDetail::CardRefund(detail) => Some(detail),
            _ => None,
        }
    }

    /// The decline detail, if this element is a decline
    pub fn as_card_decline(&self) -> Option<&CardDecline> {
        match self {
            CardPaymentElementDetail::CardDecline(detail) => Some(detail),
            _ => None,
        }
    }

    /// Decode the discriminator and its matching detail from a parent object
    pub(crate) fn from_object(obj: &mut WireObject) -> Result<Self, WireError> {
        let category: CardPaymentElementCategory = obj.required("category")?;
        match category {
            CardPaymentElementCategory::CardAuthorization => Ok(
                CardPaymentElementDetail::CardAuthorization(obj.required("card_authorization")?),
            ),
            CardPaymentElementCategory::CardAuthorizationExpiration => {
                Ok(CardPaymentElementDetail::CardAuthorizationExpiration(
                    obj.required("card_authorization_expiration")?,
                ))
            }
            CardPaymentElementCategory::CardDecline => Ok(
                CardPaymentElementDetail::CardDecline(obj.required("card_decline")?),
            ),
            CardPaymentElementCategory::CardIncrement => Ok(
                CardPaymentElementDetail::CardIncrement(obj.required("card_increment")?),
            ),
            CardPaymentElementCategory::CardRefund => Ok(CardPaymentElementDetail::CardRefund(
                obj.required("card_refund")?,
            )),
            CardPaymentElementCategory::CardReversal => Ok(
                CardPaymentElementDetail::CardReversal(obj.required("card_reversal")?),
            ),
            CardPaymentElementCategory::CardSettlement => Ok(
                CardPaymentElementDetail::CardSettlement(obj.required("card_settlement")?),
            ),
            CardPaymentElementCategory::Unknown(category) => {
                Ok(CardPaymentElementDetail::Unrecognized { category })
            }
        }
    }
}

impl Serialize for CardPaymentElementDetail {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("category", self.category().as_str())?;
        match self {
            CardPaymentElementDetail::CardAuthorization(d) => {
                map.serialize_entry("card_authorization", d)?
            }
            CardPaymentElementDetail::CardAuthorizationExpiration(d) => {
                map.serialize_entry("card_authorization_expiration", d)?
            }
            CardPaymentElementDetail::CardDecline(d) => map.serialize_entry("card_decline", d)?,
            CardPaymentElementDetail::CardIncrement(d) => {
                map.serialize_entry("card_increment", d)?
            }
            CardPaymentElementDetail::CardRefund(d) => map.serialize_entry("card_refund", d)?,
            CardPaymentElementDetail::CardReversal(d) => {
                map.serialize_entry("card_reversal", d)?
            }
            CardPaymentElementDetail::CardSettlement(d) => {
                map.serialize_entry("card_settlement", d)?
            }
            CardPaymentElementDetail::Unrecognized { .. } => {}
        }
        map.end()
    }
}

/// One lifecycle event within a card payment
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardPaymentElement {
    /// The category-specific detail of the event
    #[serde(flatten)]
    pub detail: CardPaymentElementDetail,
    /// When the event occurred
    pub created_at: DateTime<Utc>,
    /// Fields returned by the API but unknown to this SDK version
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl FromWire for CardPaymentElement {
    fn from_wire(value: Value) -> Result<Self, WireError> {
        let mut obj = WireObject::new(value)?;
        Ok(CardPaymentElement {
            detail: CardPaymentElementDetail::from_object(&mut obj)?,
            created_at: obj.required("created_at")?,
            extra: obj.into_extra(),
        })
    }
}

/// The running totals of a card payment across its lifecycle
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardPaymentState {
    /// The amount currently authorized, in minor units
    pub authorized_amount: i64,
    /// The amount added by increments, in minor units
    pub incremented_amount: i64,
    /// The amount released by reversals, in minor units
    pub reversed_amount: i64,
    /// The amount settled so far, in minor units
    pub settled_amount: i64,
}

impl FromWire for CardPaymentState {
    fn from_wire(value: Value) -> Result<Self, WireError> {
        let mut obj = WireObject::new(value)?;
        Ok(CardPaymentState {
            authorized_amount: obj.required("authorized_amount")?,
            incremented_amount: obj.required("incremented_amount")?,
            reversed_amount: obj.required("reversed_amount")?,
            settled_amount: obj.required("settled_amount")?,
        })
    }
}

/// The lifecycle of one payment on a card
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardPayment {
    /// The card payment identifier
    pub id: String,
    /// When the payment was first observed
    pub created_at: DateTime<Utc>,
    /// The account the card belongs to
    pub account_id: String,
    /// The card the payment was made on
    pub card_id: String,
    pub state: CardPaymentState,
    /// The lifecycle events of the payment, in occurrence order
    pub elements: Vec<CardPaymentElement>,
    /// A constant representing the object's type on the wire
    #[serde(rename = "type")]
    pub payment_type: CardPaymentKind,
    /// Fields returned by the API but unknown to this SDK version
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl FromWire for CardPayment {
    fn from_wire(value: Value) -> Result<Self, WireError> {
        let mut obj = WireObject::new(value)?;
        Ok(CardPayment {
            id: obj.required("id")?,
            created_at: obj.required("created_at")?,
            account_id: obj.required("account_id")?,
            card_id: obj.required("card_id")?,
            state: obj.required("state")?,
            elements: obj.required("elements")?,
            payment_type: obj.required("type")?,
            extra: obj.into_extra(),
        })
    }
}

/// Parameters for listing card payments
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CardPaymentListParams {
    #[serde(skip_serializing_if = "Field::is_unset")]
    pub account_id: Field<String>,
    #[serde(skip_serializing_if = "Field::is_unset")]
    pub card_id: Field<String>,
    #[serde(skip_serializing_if = "Field::is_unset")]
    pub cursor: Field<String>,
    #[serde(skip_serializing_if = "Field::is_unset")]
    pub limit: Field<i64>,
}

impl CardPaymentListParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_account_id(&self, account_id: impl Into<String>) -> Self {
        let mut params = self.clone();
        params.account_id = Field::Set(account_id.into());
        params
    }

    pub fn with_card_id(&self, card_id: impl Into<String>) -> Self {
        let mut params = self.clone();
        params.card_id = Field::Set(card_id.into());
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

impl FromWire for CardPaymentListParams {
    fn from_wire(value: Value) -> Result<Self, WireError> {
        let mut obj = WireObject::new(value)?;
        Ok(CardPaymentListParams {
            account_id: obj.optional("account_id")?,
            card_id: obj.optional("card_id")?,
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

    fn authorization_json() -> Value {
        json!({
            "id": "card_authorization_27ntqkkx2b9pfvz1e7pk",
            "amount": 2500,
            "currency": "USD",
            "digital_wallet_token_id": null,
            "direction": "settlement",
            "expires_at": "2024-06-08T12:30:00Z",
            "merchant_acceptor_id": "5665270011000168",
            "merchant_category_code": "5734",
            "merchant_city": "New York",
            "merchant_country": "US",
            "merchant_descriptor": "COFFEE SHOP",
            "network": "visa",
            "pending_transaction_id": "pending_transaction_k1sfetcau2qbvjbzgju4",
            "real_time_decision_id": null
        })
    }

    #[test]
    fn test_card_payment_with_authorization_element_round_trips() {
        let wire = json!({
            "id": "card_payment_nd3k2kacrqff1f71gjepv",
            "created_at": "2024-06-01T12:30:00Z",
            "account_id": "account_in71c4amph0vgo2qllky",
            "card_id": "card_oubs0hwk5rn6knuecxg2",
            "state": {
                "authorized_amount": 2500,
                "incremented_amount": 0,
                "reversed_amount": 0,
                "settled_amount": 0
            },
            "elements": [
                {
                    "category": "card_authorization",
                    "card_authorization": authorization_json(),
                    "created_at": "2024-06-01T12:30:00Z"
                }
            ],
            "type": "card_payment"
        });

        let payment = CardPayment::from_wire(wire.clone()).unwrap();
        assert_eq!(payment.elements.len(), 1);
        let auth = payment.elements[0]
            .detail
            .as_card_authorization()
            .expect("element should be an authorization");
        assert_eq!(auth.amount, 2500);
        assert_eq!(auth.currency, Currency::Usd);
        assert_eq!(payment.to_wire().unwrap(), wire);
    }

    #[test]
    fn test_unknown_element_category_is_preserved() {
        let wire = json!({
            "category": "card_fuel_confirmation",
            "card_fuel_confirmation": {"id": "card_fuel_confirmation_abc", "amount": 4000},
            "created_at": "2024-06-01T13:00:00Z"
        });

        let element = CardPaymentElement::from_wire(wire.clone()).unwrap();
        assert_eq!(
            element.detail.category(),
            CardPaymentElementCategory::Unknown("card_fuel_confirmation".to_string())
        );
        assert_eq!(element.to_wire().unwrap(), wire);
    }

    #[test]
    fn test_element_error_path_names_nested_field() {
        let wire = json!({
            "category": "card_increment",
            "card_increment": {
                "id": "card_increment_abc",
                "amount": "not-a-number",
                "currency": "USD",
                "card_authorization_id": "card_authorization_27n",
                "updated_authorization_amount": 3000
            },
            "created_at": "2024-06-01T13:00:00Z"
        });

        let err = CardPaymentElement::from_wire(wire).unwrap_err();
        assert_eq!(err.field(), Some("card_increment.amount"));
    }

    #[test]
    fn test_state_requires_all_amounts() {
        let err = CardPaymentState::from_wire(json!({
            "authorized_amount": 2500,
            "incremented_amount": 0,
            "reversed_amount": 0
        }))
        .unwrap_err();
        assert_eq!(err, WireError::missing_field("settled_amount"));
    }
}
