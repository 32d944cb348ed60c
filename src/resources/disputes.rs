//! Card disputes
//!
//! If unauthorized activity occurs on a card, a dispute can be filed against
//! the offending transaction. Disputes move through a review lifecycle; the
//! `acceptance` and `rejection` objects are populated once the platform has
//! ruled on the dispute.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::types::WireError;
use crate::wire::{wire_enum, ExtraFields, Field, FromWire, WireObject};

wire_enum! {
    /// The lifecycle status of a card dispute
    pub enum CardDisputeStatus {
        /// The dispute is waiting for review
        PendingReviewing => "pending_reviewing",
        /// The dispute was accepted and a refunding transaction created
        Accepted => "accepted",
        /// The dispute was rejected
        Rejected => "rejected",
        /// The dispute was pursued with the network and lost
        Lost => "lost",
        /// The dispute was pursued with the network and won
        Won => "won",
    }
}

wire_enum! {
    /// Identifies card dispute objects on the wire
    pub enum CardDisputeKind {
        CardDispute => "card_dispute",
    }
}

/// The outcome of an accepted card dispute
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardDisputeAcceptance {
    /// When the dispute was accepted
    pub accepted_at: DateTime<Utc>,
    /// The identifier of the accepted dispute
    pub card_dispute_id: String,
    /// The transaction that returned the disputed funds
    pub transaction_id: String,
}

impl FromWire for CardDisputeAcceptance {
    fn from_wire(value: Value) -> Result<Self, WireError> {
        let mut obj = WireObject::new(value)?;
        Ok(CardDisputeAcceptance {
            accepted_at: obj.required("accepted_at")?,
            card_dispute_id: obj.required("card_dispute_id")?,
            transaction_id: obj.required("transaction_id")?,
        })
    }
}

/// The outcome of a rejected card dispute
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardDisputeRejection {
    /// Why the dispute was rejected
    pub explanation: String,
    /// When the dispute was rejected
    pub rejected_at: DateTime<Utc>,
    /// The identifier of the rejected dispute
    pub card_dispute_id: String,
}

impl FromWire for CardDisputeRejection {
    fn from_wire(value: Value) -> Result<Self, WireError> {
        let mut obj = WireObject::new(value)?;
        Ok(CardDisputeRejection {
            explanation: obj.required("explanation")?,
            rejected_at: obj.required("rejected_at")?,
            card_dispute_id: obj.required("card_dispute_id")?,
        })
    }
}

/// A dispute filed against a card transaction
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardDispute {
    /// The dispute identifier
    pub id: String,
    /// When the dispute was filed
    pub created_at: DateTime<Utc>,
    /// The transaction being disputed
    pub disputed_transaction_id: String,
    /// Why the cardholder is disputing the transaction
    pub explanation: String,
    pub status: CardDisputeStatus,
    /// Populated once the dispute has been accepted
    pub acceptance: Option<CardDisputeAcceptance>,
    /// Populated once the dispute has been rejected
    pub rejection: Option<CardDisputeRejection>,
    /// A constant representing the object's type on the wire
    #[serde(rename = "type")]
    pub dispute_type: CardDisputeKind,
    /// Fields returned by the API but unknown to this SDK version
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl FromWire for CardDispute {
    fn from_wire(value: Value) -> Result<Self, WireError> {
        let mut obj = WireObject::new(value)?;
        Ok(CardDispute {
            id: obj.required("id")?,
            created_at: obj.required("created_at")?,
            disputed_transaction_id: obj.required("disputed_transaction_id")?,
            explanation: obj.required("explanation")?,
            status: obj.required("status")?,
            acceptance: obj.required("acceptance")?,
            rejection: obj.required("rejection")?,
            dispute_type: obj.required("type")?,
            extra: obj.into_extra(),
        })
    }
}

/// Parameters for filing a card dispute
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardDisputeCreateParams {
    /// The transaction to dispute
    pub disputed_transaction_id: String,
    /// Why the transaction is being disputed
    pub explanation: String,
    /// The disputed amount in minor units, when less than the full
    /// transaction amount is in dispute
    #[serde(skip_serializing_if = "Field::is_unset")]
    pub amount: Field<i64>,
}

impl CardDisputeCreateParams {
    /// Create parameters with all required fields set
    pub fn new(
        disputed_transaction_id: impl Into<String>,
        explanation: impl Into<String>,
    ) -> Self {
        CardDisputeCreateParams {
            disputed_transaction_id: disputed_transaction_id.into(),
            explanation: explanation.into(),
            amount: Field::Unset,
        }
    }

    /// Return a copy of these parameters with `amount` set
    ///
    /// Pass [`Field::Null`] to send an explicit null.
    pub fn with_amount(&self, amount: impl Into<Field<i64>>) -> Self {
        let mut params = self.clone();
        params.amount = amount.into();
        params
    }
}

impl FromWire for CardDisputeCreateParams {
    fn from_wire(value: Value) -> Result<Self, WireError> {
        let mut obj = WireObject::new(value)?;
        Ok(CardDisputeCreateParams {
            disputed_transaction_id: obj.required("disputed_transaction_id")?,
            explanation: obj.required("explanation")?,
            amount: obj.optional("amount")?,
        })
    }
}

/// Parameters for listing card disputes
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CardDisputeListParams {
    #[serde(skip_serializing_if = "Field::is_unset")]
    pub status: Field<CardDisputeStatus>,
    #[serde(skip_serializing_if = "Field::is_unset")]
    pub created_after: Field<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Field::is_unset")]
    pub created_before: Field<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Field::is_unset")]
    pub cursor: Field<String>,
    #[serde(skip_serializing_if = "Field::is_unset")]
    pub limit: Field<i64>,
}

impl CardDisputeListParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a copy with the status filter set
    ///
    /// Accepts the enum or a raw wire string.
    pub fn with_status(&self, status: impl Into<CardDisputeStatus>) -> Self {
        let mut params = self.clone();
        params.status = Field::Set(status.into());
        params
    }

    pub fn with_created_after(&self, created_after: DateTime<Utc>) -> Self {
        let mut params = self.clone();
        params.created_after = Field::Set(created_after);
        params
    }

    pub fn with_created_before(&self, created_before: DateTime<Utc>) -> Self {
        let mut params = self.clone();
        params.created_before = Field::Set(created_before);
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

impl FromWire for CardDisputeListParams {
    fn from_wire(value: Value) -> Result<Self, WireError> {
        let mut obj = WireObject::new(value)?;
        Ok(CardDisputeListParams {
            status: obj.optional("status")?,
            created_after: obj.optional("created_after")?,
            created_before: obj.optional("created_before")?,
            cursor: obj.optional("cursor")?,
            limit: obj.optional("limit")?,
        })
    }
}
