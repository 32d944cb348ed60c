//! Real-time decisions
//!
//! When a card is authorized or provisioned into a digital wallet, the
//! platform can ask the application to approve or decline the event while
//! the network waits. A real-time decision describes the pending event; the
//! application answers it with a [`RealTimeDecisionActionParams`] request
//! before `timeout_at`, or the platform falls back to its default ruling.
//!
//! The event-specific payload is keyed by `category` on the wire and
//! modeled here as [`RealTimeDecisionDetails`]. Note the detail keys differ
//! from the category strings (e.g. category `card_authorization_requested`
//! populates the `card_authorization` field).

use chrono::{DateTime, Utc};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::resources::shared::{CardNetwork, Currency};
use crate::types::WireError;
use crate::wire::{wire_enum, ExtraFields, Field, FromWire, WireObject};

wire_enum! {
    /// Identifies real-time decision objects on the wire
    pub enum RealTimeDecisionKind {
        RealTimeDecision => "real_time_decision",
    }
}

wire_enum! {
    /// Where a real-time decision is in its lifecycle
    pub enum RealTimeDecisionStatus {
        /// The decision is waiting for an application response
        Pending => "pending",
        /// The application responded before the timeout
        Responded => "responded",
        /// The application did not respond in time
        TimedOut => "timed_out",
    }
}

wire_enum! {
    /// The kind of event a real-time decision is asking about
    pub enum RealTimeDecisionCategory {
        CardAuthorizationRequested => "card_authorization_requested",
        DigitalWalletTokenRequested => "digital_wallet_token_requested",
        DigitalWalletAuthenticationRequested => "digital_wallet_authentication_requested",
    }
}

wire_enum! {
    /// The application's ruling on a card authorization
    pub enum CardAuthorizationDecision {
        Approve => "approve",
        Decline => "decline",
    }
}

wire_enum! {
    /// The digital wallet a token event relates to
    pub enum DigitalWallet {
        ApplePay => "apple_pay",
        GooglePay => "google_pay",
    }
}

wire_enum! {
    /// The application's ruling on a digital wallet provisioning
    pub enum DigitalWalletTokenDecision {
        Approve => "approve",
        Decline => "decline",
    }
}

wire_enum! {
    /// How a one-time passcode is delivered to the cardholder
    pub enum DigitalWalletAuthenticationChannel {
        Sms => "sms",
        Email => "email",
    }
}

wire_enum! {
    /// The outcome of a digital wallet authentication
    pub enum DigitalWalletAuthenticationResult {
        Success => "success",
        Failure => "failure",
    }
}

/// A card authorization waiting on the application's ruling
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RealTimeDecisionCardAuthorization {
    /// The account the authorization is against
    pub account_id: String,
    /// The card being authorized
    pub card_id: String,
    /// The application's ruling, once it has responded
    pub decision: Option<CardAuthorizationDecision>,
    pub merchant_acceptor_id: String,
    /// The 4-digit merchant category code (MCC)
    pub merchant_category_code: String,
    pub merchant_city: Option<String>,
    pub merchant_country: String,
    pub merchant_descriptor: String,
    pub network: CardNetwork,
    /// The amount in the minor unit of the presentment currency
    pub presentment_amount: i64,
    pub presentment_currency: Currency,
    /// The amount in the minor unit of the settlement currency
    pub settlement_amount: i64,
    pub settlement_currency: Currency,
}

impl FromWire for RealTimeDecisionCardAuthorization {
    fn from_wire(value: Value) -> Result<Self, WireError> {
        let mut obj = WireObject::new(value)?;
        Ok(RealTimeDecisionCardAuthorization {
            account_id: obj.required("account_id")?,
            card_id: obj.required("card_id")?,
            decision: obj.required("decision")?,
            merchant_acceptor_id: obj.required("merchant_acceptor_id")?,
            merchant_category_code: obj.required("merchant_category_code")?,
            merchant_city: obj.required("merchant_city")?,
            merchant_country: obj.required("merchant_country")?,
            merchant_descriptor: obj.required("merchant_descriptor")?,
            network: obj.required("network")?,
            presentment_amount: obj.required("presentment_amount")?,
            presentment_currency: obj.required("presentment_currency")?,
            settlement_amount: obj.required("settlement_amount")?,
            settlement_currency: obj.required("settlement_currency")?,
        })
    }
}

/// A digital wallet provisioning waiting on the application's ruling
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RealTimeDecisionDigitalWalletToken {
    /// The card being provisioned
    pub card_id: String,
    /// The application's ruling, once it has responded
    pub decision: Option<DigitalWalletTokenDecision>,
    pub digital_wallet: DigitalWallet,
}

impl FromWire for RealTimeDecisionDigitalWalletToken {
    fn from_wire(value: Value) -> Result<Self, WireError> {
        let mut obj = WireObject::new(value)?;
        Ok(RealTimeDecisionDigitalWalletToken {
            card_id: obj.required("card_id")?,
            decision: obj.required("decision")?,
            digital_wallet: obj.required("digital_wallet")?,
        })
    }
}

/// A digital wallet authentication the application must deliver
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RealTimeDecisionDigitalWalletAuthentication {
    /// The card being authenticated
    pub card_id: String,
    pub channel: DigitalWalletAuthenticationChannel,
    pub digital_wallet: DigitalWallet,
    /// The email address to deliver the passcode to, if channel is email
    pub email: Option<String>,
    /// The phone number to deliver the passcode to, if channel is sms
    pub phone: Option<String>,
    /// The one-time passcode to deliver
    pub one_time_passcode: String,
    /// The outcome of the delivery, once it has been reported
    pub result: Option<DigitalWalletAuthenticationResult>,
}

impl FromWire for RealTimeDecisionDigitalWalletAuthentication {
    fn from_wire(value: Value) -> Result<Self, WireError> {
        let mut obj = WireObject::new(value)?;
        Ok(RealTimeDecisionDigitalWalletAuthentication {
            card_id: obj.required("card_id")?,
            channel: obj.required("channel")?,
            digital_wallet: obj.required("digital_wallet")?,
            email: obj.required("email")?,
            phone: obj.required("phone")?,
            one_time_passcode: obj.required("one_time_passcode")?,
            result: obj.required("result")?,
        })
    }
}

/// The category-specific payload of a real-time decision
///
/// Exactly one detail is populated per decision, selected by the wire
/// `category` field. Categories added to the API after this SDK version
/// decode to [`RealTimeDecisionDetails::Unrecognized`]; their detail
/// payload is preserved through the parent decision's `extra` fields.
#[derive(Debug, Clone, PartialEq)]
pub enum RealTimeDecisionDetails {
    CardAuthorizationRequested(RealTimeDecisionCardAuthorization),
    DigitalWalletTokenRequested(RealTimeDecisionDigitalWalletToken),
    DigitalWalletAuthenticationRequested(RealTimeDecisionDigitalWalletAuthentication),
    /// A category not yet known to this SDK version
    Unrecognized {
        /// The raw `category` value from the wire
        category: String,
    },
}

impl RealTimeDecisionDetails {
    /// The discriminator value for this detail
    pub fn category(&self) -> RealTimeDecisionCategory {
        match self {
            RealTimeDecisionDetails::CardAuthorizationRequested(_) => {
                RealTimeDecisionCategory::CardAuthorizationRequested
            }
            RealTimeDecisionDetails::DigitalWalletTokenRequested(_) => {
                RealTimeDecisionCategory::DigitalWalletTokenRequested
            }
            RealTimeDecisionDetails::DigitalWalletAuthenticationRequested(_) => {
                RealTimeDecisionCategory::DigitalWalletAuthenticationRequested
            }
            RealTimeDecisionDetails::Unrecognized { category } => {
                RealTimeDecisionCategory::Unknown(category.clone())
            }
        }
    }

    /// The card authorization detail, if that is what's being decided
    pub fn as_card_authorization(&self) -> Option<&RealTimeDecisionCardAuthorization> {
        match self {
            RealTimeDecisionDetails::CardAuthorizationRequested(detail) => Some(detail),
            _ => None,
        }
    }

    /// The digital wallet token detail, if that is what's being decided
    pub fn as_digital_wallet_token(&self) -> Option<&RealTimeDecisionDigitalWalletToken> {
        match self {
            RealTimeDecisionDetails::DigitalWalletTokenRequested(detail) => Some(detail),
            _ => None,
        }
    }

    /// Decode the discriminator and its matching detail from a parent object
    pub(crate) fn from_object(obj: &mut WireObject) -> Result<Self, WireError> {
        let category: RealTimeDecisionCategory = obj.required("category")?;
        match category {
            RealTimeDecisionCategory::CardAuthorizationRequested => {
                Ok(RealTimeDecisionDetails::CardAuthorizationRequested(
                    obj.required("card_authorization")?,
                ))
            }
            RealTimeDecisionCategory::DigitalWalletTokenRequested => {
                Ok(RealTimeDecisionDetails::DigitalWalletTokenRequested(
                    obj.required("digital_wallet_token")?,
                ))
            }
            RealTimeDecisionCategory::DigitalWalletAuthenticationRequested => {
                Ok(RealTimeDecisionDetails::DigitalWalletAuthenticationRequested(
                    obj.required("digital_wallet_authentication")?,
                ))
            }
            RealTimeDecisionCategory::Unknown(category) => {
                Ok(RealTimeDecisionDetails::Unrecognized { category })
            }
        }
    }
}

impl Serialize for RealTimeDecisionDetails {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("category", self.category().as_str())?;
        match self {
            RealTimeDecisionDetails::CardAuthorizationRequested(d) => {
                map.serialize_entry("card_authorization", d)?
            }
            RealTimeDecisionDetails::DigitalWalletTokenRequested(d) => {
                map.serialize_entry("digital_wallet_token", d)?
            }
            RealTimeDecisionDetails::DigitalWalletAuthenticationRequested(d) => {
                map.serialize_entry("digital_wallet_authentication", d)?
            }
            RealTimeDecisionDetails::Unrecognized { .. } => {}
        }
        map.end()
    }
}

/// An event waiting on the application's real-time ruling
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RealTimeDecision {
    /// The real-time decision identifier
    pub id: String,
    /// When the decision was created
    pub created_at: DateTime<Utc>,
    /// When the platform will rule by default if the application hasn't
    pub timeout_at: DateTime<Utc>,
    pub status: RealTimeDecisionStatus,
    /// The event being decided, with category-specific detail
    #[serde(flatten)]
    pub details: RealTimeDecisionDetails,
    /// A constant representing the object's type on the wire
    #[serde(rename = "type")]
    pub decision_type: RealTimeDecisionKind,
    /// Fields returned by the API but unknown to this SDK version
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl FromWire for RealTimeDecision {
    fn from_wire(value: Value) -> Result<Self, WireError> {
        let mut obj = WireObject::new(value)?;
        Ok(RealTimeDecision {
            id: obj.required("id")?,
            created_at: obj.required("created_at")?,
            timeout_at: obj.required("timeout_at")?,
            status: obj.required("status")?,
            details: RealTimeDecisionDetails::from_object(&mut obj)?,
            decision_type: obj.required("type")?,
            extra: obj.into_extra(),
        })
    }
}

/// The ruling on a pending card authorization
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardAuthorizationActionParams {
    pub decision: CardAuthorizationDecision,
}

impl FromWire for CardAuthorizationActionParams {
    fn from_wire(value: Value) -> Result<Self, WireError> {
        let mut obj = WireObject::new(value)?;
        Ok(CardAuthorizationActionParams {
            decision: obj.required("decision")?,
        })
    }
}

/// The ruling on a pending digital wallet provisioning
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DigitalWalletTokenActionParams {
    pub decision: DigitalWalletTokenDecision,
    /// The card profile to provision with, when approving
    #[serde(skip_serializing_if = "Field::is_unset")]
    pub card_profile_id: Field<String>,
}

impl FromWire for DigitalWalletTokenActionParams {
    fn from_wire(value: Value) -> Result<Self, WireError> {
        let mut obj = WireObject::new(value)?;
        Ok(DigitalWalletTokenActionParams {
            decision: obj.required("decision")?,
            card_profile_id: obj.optional("card_profile_id")?,
        })
    }
}

/// The reported outcome of a digital wallet authentication
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DigitalWalletAuthenticationActionParams {
    pub result: DigitalWalletAuthenticationResult,
}

impl FromWire for DigitalWalletAuthenticationActionParams {
    fn from_wire(value: Value) -> Result<Self, WireError> {
        let mut obj = WireObject::new(value)?;
        Ok(DigitalWalletAuthenticationActionParams {
            result: obj.required("result")?,
        })
    }
}

/// The application's answer to one real-time decision
///
/// Exactly one of the event-specific payloads is sent, matching the
/// decision's category; the sum type makes that structural.
#[derive(Debug, Clone, PartialEq)]
pub enum RealTimeDecisionAction {
    CardAuthorization(CardAuthorizationActionParams),
    DigitalWalletToken(DigitalWalletTokenActionParams),
    DigitalWalletAuthentication(DigitalWalletAuthenticationActionParams),
}

impl Serialize for RealTimeDecisionAction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        match self {
            RealTimeDecisionAction::CardAuthorization(d) => {
                map.serialize_entry("card_authorization", d)?
            }
            RealTimeDecisionAction::DigitalWalletToken(d) => {
                map.serialize_entry("digital_wallet_token", d)?
            }
            RealTimeDecisionAction::DigitalWalletAuthentication(d) => {
                map.serialize_entry("digital_wallet_authentication", d)?
            }
        }
        map.end()
    }
}

/// Parameters for responding to a real-time decision
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RealTimeDecisionActionParams {
    /// The event-specific answer
    #[serde(flatten)]
    pub action: RealTimeDecisionAction,
}

impl RealTimeDecisionActionParams {
    /// Create parameters with all required fields set
    pub fn new(action: RealTimeDecisionAction) -> Self {
        RealTimeDecisionActionParams { action }
    }

    /// Answer a card authorization decision
    ///
    /// Accepts the enum or a raw wire string.
    pub fn card_authorization(decision: impl Into<CardAuthorizationDecision>) -> Self {
        Self::new(RealTimeDecisionAction::CardAuthorization(
            CardAuthorizationActionParams {
                decision: decision.into(),
            },
        ))
    }

    /// Answer a digital wallet provisioning decision
    ///
    /// Accepts the enum or a raw wire string.
    pub fn digital_wallet_token(decision: impl Into<DigitalWalletTokenDecision>) -> Self {
        Self::new(RealTimeDecisionAction::DigitalWalletToken(
            DigitalWalletTokenActionParams {
                decision: decision.into(),
                card_profile_id: Field::Unset,
            },
        ))
    }
}

impl FromWire for RealTimeDecisionActionParams {
    fn from_wire(value: Value) -> Result<Self, WireError> {
        let mut obj = WireObject::new(value)?;
        let action = if obj.contains("card_authorization") {
            RealTimeDecisionAction::CardAuthorization(obj.required("card_authorization")?)
        } else if obj.contains("digital_wallet_token") {
            RealTimeDecisionAction::DigitalWalletToken(obj.required("digital_wallet_token")?)
        } else if obj.contains("digital_wallet_authentication") {
            RealTimeDecisionAction::DigitalWalletAuthentication(
                obj.required("digital_wallet_authentication")?,
            )
        } else {
            return Err(WireError::missing_field("card_authorization"));
        };
        Ok(RealTimeDecisionActionParams { action })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::ToWire;
    use serde_json::json;

    #[test]
    fn test_pending_card_authorization_round_trips() {
        let wire = json!({
            "id": "real_time_decision_j76n2e810ezcg3zh5qtn",
            "created_at": "2024-06-01T12:30:00Z",
            "timeout_at": "2024-06-01T12:30:10Z",
            "status": "pending",
            "category": "card_authorization_requested",
            "card_authorization": {
                "account_id": "account_in71c4amph0vgo2qllky",
                "card_id": "card_oubs0hwk5rn6knuecxg2",
                "decision": null,
                "merchant_acceptor_id": "5665270011000168",
                "merchant_category_code": "5734",
                "merchant_city": "New York",
                "merchant_country": "US",
                "merchant_descriptor": "COFFEE SHOP",
                "network": "visa",
                "presentment_amount": 2500,
                "presentment_currency": "USD",
                "settlement_amount": 2500,
                "settlement_currency": "USD"
            },
            "type": "real_time_decision"
        });

        let decision = RealTimeDecision::from_wire(wire.clone()).unwrap();
        assert_eq!(decision.status, RealTimeDecisionStatus::Pending);
        let auth = decision
            .details
            .as_card_authorization()
            .expect("details should be a card authorization");
        assert_eq!(auth.decision, None);
        assert_eq!(decision.to_wire().unwrap(), wire);
    }

    #[test]
    fn test_unknown_category_keeps_detail_in_extra() {
        let wire = json!({
            "id": "real_time_decision_j76n2e810ezcg3zh5qtn",
            "created_at": "2024-06-01T12:30:00Z",
            "timeout_at": "2024-06-01T12:30:10Z",
            "status": "pending",
            "category": "card_balance_inquiry_requested",
            "card_balance_inquiry": {"card_id": "card_oubs0hwk5rn6knuecxg2"},
            "type": "real_time_decision"
        });

        let decision = RealTimeDecision::from_wire(wire.clone()).unwrap();
        assert_eq!(
            decision.details,
            RealTimeDecisionDetails::Unrecognized {
                category: "card_balance_inquiry_requested".to_string()
            }
        );
        assert_eq!(decision.to_wire().unwrap(), wire);
    }

    #[test]
    fn test_action_params_emit_exactly_one_key() {
        let params = RealTimeDecisionActionParams::card_authorization("approve");
        assert_eq!(
            params.to_wire().unwrap(),
            json!({"card_authorization": {"decision": "approve"}})
        );
    }

    #[test]
    fn test_action_params_round_trip() {
        let wire = json!({
            "digital_wallet_token": {
                "decision": "approve",
                "card_profile_id": "card_profile_5xgz17yildqnwc1bkr9h"
            }
        });
        let params = RealTimeDecisionActionParams::from_wire(wire.clone()).unwrap();
        assert_eq!(params.to_wire().unwrap(), wire);
    }
}
