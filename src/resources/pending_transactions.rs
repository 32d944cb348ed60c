//! Pending transactions
//!
//! A pending transaction is a hold on funds whose final state isn't known
//! yet: a card authorization awaiting settlement, a check deposit awaiting
//! collection, an outbound wire awaiting release. Pending transactions
//! reduce the account's available balance until they complete or expire.
//! The `source` object is a `category`-discriminated union modeled as
//! [`PendingTransactionSource`].

use chrono::{DateTime, Utc};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::resources::card_payments::CardAuthorization;
use crate::resources::shared::{Currency, RouteType};
use crate::types::WireError;
use crate::wire::{wire_enum, ExtraFields, Field, FromWire, WireObject};

wire_enum! {
    /// Identifies pending transaction objects on the wire
    pub enum PendingTransactionKind {
        PendingTransaction => "pending_transaction",
    }
}

wire_enum! {
    /// Whether a pending transaction is still holding funds
    pub enum PendingTransactionStatus {
        /// The hold is still in place
        Pending => "pending",
        /// The hold has been released or settled into a transaction
        Complete => "complete",
    }
}

wire_enum! {
    /// The kind of hold a pending transaction's source records
    pub enum PendingTransactionSourceCategory {
        AccountTransferInstruction => "account_transfer_instruction",
        AchTransferInstruction => "ach_transfer_instruction",
        CardAuthorization => "card_authorization",
        CheckDepositInstruction => "check_deposit_instruction",
        CheckTransferInstruction => "check_transfer_instruction",
        InboundFundsHold => "inbound_funds_hold",
        WireTransferInstruction => "wire_transfer_instruction",
    }
}

wire_enum! {
    /// The status of an inbound funds hold
    pub enum InboundFundsHoldStatus {
        /// Funds are still held
        Held => "held",
        /// The hold has been released
        Complete => "complete",
    }
}

/// A hold for an account transfer awaiting approval
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountTransferInstruction {
    /// The held amount in the minor unit of `currency`
    pub amount: i64,
    pub currency: Currency,
    /// The account transfer being held for
    pub transfer_id: String,
}

impl FromWire for AccountTransferInstruction {
    fn from_wire(value: Value) -> Result<Self, WireError> {
        let mut obj = WireObject::new(value)?;
        Ok(AccountTransferInstruction {
            amount: obj.required("amount")?,
            currency: obj.required("currency")?,
            transfer_id: obj.required("transfer_id")?,
        })
    }
}

/// A hold for an ACH transfer awaiting submission
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AchTransferInstruction {
    /// The held amount in USD cents
    pub amount: i64,
    /// The ACH transfer being held for
    pub transfer_id: String,
}

impl FromWire for AchTransferInstruction {
    fn from_wire(value: Value) -> Result<Self, WireError> {
        let mut obj = WireObject::new(value)?;
        Ok(AchTransferInstruction {
            amount: obj.required("amount")?,
            transfer_id: obj.required("transfer_id")?,
        })
    }
}

/// A hold for a deposited check awaiting collection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckDepositInstruction {
    /// The held amount in the minor unit of `currency`
    pub amount: i64,
    pub currency: Currency,
    /// The file containing the image of the front of the check
    pub front_image_file_id: String,
    /// The file containing the image of the back of the check, if provided
    pub back_image_file_id: Option<String>,
}

impl FromWire for CheckDepositInstruction {
    fn from_wire(value: Value) -> Result<Self, WireError> {
        let mut obj = WireObject::new(value)?;
        Ok(CheckDepositInstruction {
            amount: obj.required("amount")?,
            currency: obj.required("currency")?,
            front_image_file_id: obj.required("front_image_file_id")?,
            back_image_file_id: obj.required("back_image_file_id")?,
        })
    }
}

/// A hold for a check transfer awaiting mailing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckTransferInstruction {
    /// The held amount in the minor unit of `currency`
    pub amount: i64,
    pub currency: Currency,
    /// The check transfer being held for
    pub transfer_id: String,
}

impl FromWire for CheckTransferInstruction {
    fn from_wire(value: Value) -> Result<Self, WireError> {
        let mut obj = WireObject::new(value)?;
        Ok(CheckTransferInstruction {
            amount: obj.required("amount")?,
            currency: obj.required("currency")?,
            transfer_id: obj.required("transfer_id")?,
        })
    }
}

/// A hold on inbound funds pending review
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InboundFundsHold {
    /// The inbound funds hold identifier
    pub id: String,
    /// The held amount in the minor unit of `currency`
    pub amount: i64,
    pub currency: Currency,
    /// When the hold will be released automatically
    pub automatically_releases_at: DateTime<Utc>,
    /// When the hold was released, if it has been
    pub released_at: Option<DateTime<Utc>>,
    pub status: InboundFundsHoldStatus,
    /// The transaction whose funds are held, if any
    pub held_transaction_id: Option<String>,
}

impl FromWire for InboundFundsHold {
    fn from_wire(value: Value) -> Result<Self, WireError> {
        let mut obj = WireObject::new(value)?;
        Ok(InboundFundsHold {
            id: obj.required("id")?,
            amount: obj.required("amount")?,
            currency: obj.required("currency")?,
            automatically_releases_at: obj.required("automatically_releases_at")?,
            released_at: obj.required("released_at")?,
            status: obj.required("status")?,
            held_transaction_id: obj.required("held_transaction_id")?,
        })
    }
}

/// A hold for a wire transfer awaiting release
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WireTransferInstruction {
    /// The held amount in USD cents
    pub amount: i64,
    pub account_number: String,
    pub routing_number: String,
    pub message_to_recipient: String,
    /// The wire transfer being held for
    pub transfer_id: String,
}

impl FromWire for WireTransferInstruction {
    fn from_wire(value: Value) -> Result<Self, WireError> {
        let mut obj = WireObject::new(value)?;
        Ok(WireTransferInstruction {
            amount: obj.required("amount")?,
            account_number: obj.required("account_number")?,
            routing_number: obj.required("routing_number")?,
            message_to_recipient: obj.required("message_to_recipient")?,
            transfer_id: obj.required("transfer_id")?,
        })
    }
}

/// The category-specific payload of a pending transaction's source
///
/// Exactly one detail is populated per pending transaction, selected by the
/// wire `category` field. Categories added to the API after this SDK
/// version decode to [`PendingTransactionSource::Unrecognized`], which
/// keeps the source object's remaining payload verbatim.
#[derive(Debug, Clone, PartialEq)]
pub enum PendingTransactionSource {
    AccountTransferInstruction(AccountTransferInstruction),
    AchTransferInstruction(AchTransferInstruction),
    CardAuthorization(CardAuthorization),
    CheckDepositInstruction(CheckDepositInstruction),
    CheckTransferInstruction(CheckTransferInstruction),
    InboundFundsHold(InboundFundsHold),
    WireTransferInstruction(WireTransferInstruction),
    /// A category not yet known to this SDK version
    Unrecognized {
        /// The raw `category` value from the wire
        category: String,
        /// The source object's remaining fields, preserved verbatim
        fields: ExtraFields,
    },
}

impl PendingTransactionSource {
    /// The discriminator value for this source
    pub fn category(&self) -> PendingTransactionSourceCategory {
        match self {
            PendingTransactionSource::AccountTransferInstruction(_) => {
                PendingTransactionSourceCategory::AccountTransferInstruction
            }
            PendingTransactionSource::AchTransferInstruction(_) => {
                PendingTransactionSourceCategory::AchTransferInstruction
            }
            PendingTransactionSource::CardAuthorization(_) => {
                PendingTransactionSourceCategory::CardAuthorization
            }
            PendingTransactionSource::CheckDepositInstruction(_) => {
                PendingTransactionSourceCategory::CheckDepositInstruction
            }
            PendingTransactionSource::CheckTransferInstruction(_) => {
                PendingTransactionSourceCategory::CheckTransferInstruction
            }
            PendingTransactionSource::InboundFundsHold(_) => {
                PendingTransactionSourceCategory::InboundFundsHold
            }
            PendingTransactionSource::WireTransferInstruction(_) => {
                PendingTransactionSourceCategory::WireTransferInstruction
            }
            PendingTransactionSource::Unrecognized { category, .. } => {
                PendingTransactionSourceCategory::Unknown(category.clone())
            }
        }
    }

    /// The card authorization detail, if this hold is a card authorization
    pub fn as_card_authorization(&self) -> Option<&CardAuthorization> {
        match self {
            PendingTransactionSource::CardAuthorization(detail) => Some(detail),
            _ => None,
        }
    }

    /// The inbound funds hold detail, if this hold is on inbound funds
    pub fn as_inbound_funds_hold(&self) -> Option<&InboundFundsHold> {
        match self {
            PendingTransactionSource::InboundFundsHold(detail) => Some(detail),
            _ => None,
        }
    }
}

impl FromWire for PendingTransactionSource {
    fn from_wire(value: Value) -> Result<Self, WireError> {
        let mut obj = WireObject::new(value)?;
        let category: PendingTransactionSourceCategory = obj.required("category")?;
        match category {
            PendingTransactionSourceCategory::AccountTransferInstruction => {
                Ok(PendingTransactionSource::AccountTransferInstruction(
                    obj.required("account_transfer_instruction")?,
                ))
            }
            PendingTransactionSourceCategory::AchTransferInstruction => {
                Ok(PendingTransactionSource::AchTransferInstruction(
                    obj.required("ach_transfer_instruction")?,
                ))
            }
            PendingTransactionSourceCategory::CardAuthorization => {
                Ok(PendingTransactionSource::CardAuthorization(
                    obj.required("card_authorization")?,
                ))
            }
            PendingTransactionSourceCategory::CheckDepositInstruction => {
                Ok(PendingTransactionSource::CheckDepositInstruction(
                    obj.required("check_deposit_instruction")?,
                ))
            }
            PendingTransactionSourceCategory::CheckTransferInstruction => {
                Ok(PendingTransactionSource::CheckTransferInstruction(
                    obj.required("check_transfer_instruction")?,
                ))
            }
            PendingTransactionSourceCategory::InboundFundsHold => Ok(
                PendingTransactionSource::InboundFundsHold(obj.required("inbound_funds_hold")?),
            ),
            PendingTransactionSourceCategory::WireTransferInstruction => {
                Ok(PendingTransactionSource::WireTransferInstruction(
                    obj.required("wire_transfer_instruction")?,
                ))
            }
            PendingTransactionSourceCategory::Unknown(category) => {
                Ok(PendingTransactionSource::Unrecognized {
                    category,
                    fields: obj.into_extra(),
                })
            }
        }
    }
}

impl Serialize for PendingTransactionSource {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("category", self.category().as_str())?;
        match self {
            PendingTransactionSource::AccountTransferInstruction(d) => {
                map.serialize_entry("account_transfer_instruction", d)?
            }
            PendingTransactionSource::AchTransferInstruction(d) => {
                map.serialize_entry("ach_transfer_instruction", d)?
            }
            PendingTransactionSource::CardAuthorization(d) => {
                map.serialize_entry("card_authorization", d)?
            }
            PendingTransactionSource::CheckDepositInstruction(d) => {
                map.serialize_entry("check_deposit_instruction", d)?
            }
            PendingTransactionSource::CheckTransferInstruction(d) => {
                map.serialize_entry("check_transfer_instruction", d)?
            }
            PendingTransactionSource::InboundFundsHold(d) => {
                map.serialize_entry("inbound_funds_hold", d)?
            }
            PendingTransactionSource::WireTransferInstruction(d) => {
                map.serialize_entry("wire_transfer_instruction", d)?
            }
            PendingTransactionSource::Unrecognized { fields, .. } => {
                for (key, value) in fields.iter() {
                    map.serialize_entry(key, value)?;
                }
            }
        }
        map.end()
    }
}

/// A hold on an account's funds whose final state isn't known yet
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PendingTransaction {
    /// The pending transaction identifier
    pub id: String,
    /// The account the hold is against
    pub account_id: String,
    /// The held amount in the minor unit of `currency`; negative amounts
    /// reduce the available balance
    pub amount: i64,
    pub currency: Currency,
    /// When the hold was created
    pub created_at: DateTime<Utc>,
    /// When the hold completed, if it has
    pub completed_at: Option<DateTime<Utc>>,
    pub description: String,
    /// The route the hold came in over, if any
    pub route_id: Option<String>,
    pub route_type: Option<RouteType>,
    /// What created the hold, with category-specific detail
    pub source: PendingTransactionSource,
    pub status: PendingTransactionStatus,
    /// A constant representing the object's type on the wire
    #[serde(rename = "type")]
    pub transaction_type: PendingTransactionKind,
    /// Fields returned by the API but unknown to this SDK version
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl FromWire for PendingTransaction {
    fn from_wire(value: Value) -> Result<Self, WireError> {
        let mut obj = WireObject::new(value)?;
        Ok(PendingTransaction {
            id: obj.required("id")?,
            account_id: obj.required("account_id")?,
            amount: obj.required("amount")?,
            currency: obj.required("currency")?,
            created_at: obj.required("created_at")?,
            completed_at: obj.required("completed_at")?,
            description: obj.required("description")?,
            route_id: obj.required("route_id")?,
            route_type: obj.required("route_type")?,
            source: obj.required("source")?,
            status: obj.required("status")?,
            transaction_type: obj.required("type")?,
            extra: obj.into_extra(),
        })
    }
}

/// Parameters for listing pending transactions
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct PendingTransactionListParams {
    #[serde(skip_serializing_if = "Field::is_unset")]
    pub account_id: Field<String>,
    #[serde(skip_serializing_if = "Field::is_unset")]
    pub route_id: Field<String>,
    #[serde(skip_serializing_if = "Field::is_unset")]
    pub status: Field<PendingTransactionStatus>,
    #[serde(skip_serializing_if = "Field::is_unset")]
    pub cursor: Field<String>,
    #[serde(skip_serializing_if = "Field::is_unset")]
    pub limit: Field<i64>,
}

impl PendingTransactionListParams {
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

    /// Return a copy with the status filter set
    ///
    /// Accepts the enum or a raw wire string.
    pub fn with_status(&self, status: impl Into<PendingTransactionStatus>) -> Self {
        let mut params = self.clone();
        params.status = Field::Set(status.into());
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

impl FromWire for PendingTransactionListParams {
    fn from_wire(value: Value) -> Result<Self, WireError> {
        let mut obj = WireObject::new(value)?;
        Ok(PendingTransactionListParams {
            account_id: obj.optional("account_id")?,
            route_id: obj.optional("route_id")?,
            status: obj.optional("status")?,
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

    #[test]
    fn test_inbound_funds_hold_round_trips() {
        let wire = json!({
            "id": "pending_transaction_k1sfetcau2qbvjbzgju4",
            "account_id": "account_in71c4amph0vgo2qllky",
            "amount": 1000,
            "currency": "USD",
            "created_at": "2024-04-10T08:00:00Z",
            "completed_at": null,
            "description": "Inbound funds hold",
            "route_id": null,
            "route_type": null,
            "source": {
                "category": "inbound_funds_hold",
                "inbound_funds_hold": {
                    "id": "inbound_funds_hold_9vuasmywdo7xb3zt4071",
                    "amount": 1000,
                    "currency": "USD",
                    "automatically_releases_at": "2024-04-14T08:00:00Z",
                    "released_at": null,
                    "status": "held",
                    "held_transaction_id": "transaction_uyrp7fld2ium70oa7oi"
                }
            },
            "status": "pending",
            "type": "pending_transaction"
        });

        let pending = PendingTransaction::from_wire(wire.clone()).unwrap();
        assert_eq!(pending.status, PendingTransactionStatus::Pending);
        assert_eq!(pending.completed_at, None);
        let hold = pending
            .source
            .as_inbound_funds_hold()
            .expect("source should be an inbound funds hold");
        assert_eq!(hold.status, InboundFundsHoldStatus::Held);
        assert_eq!(pending.to_wire().unwrap(), wire);
    }

    #[test]
    fn test_completed_at_null_and_set_are_distinct() {
        let mut obj = WireObject::new(json!({"completed_at": null})).unwrap();
        let completed: Option<DateTime<Utc>> = obj.required("completed_at").unwrap();
        assert_eq!(completed, None);

        let mut obj =
            WireObject::new(json!({"completed_at": "2024-04-11T09:30:00Z"})).unwrap();
        let completed: Option<DateTime<Utc>> = obj.required("completed_at").unwrap();
        assert!(completed.is_some());
    }

    #[test]
    fn test_list_params_status_accepts_raw_string() {
        let params = PendingTransactionListParams::new()
            .with_account_id("account_in71c4amph0vgo2qllky")
            .with_status("complete");
        assert_eq!(
            params.to_wire().unwrap(),
            json!({
                "account_id": "account_in71c4amph0vgo2qllky",
                "status": "complete"
            })
        );
    }
}
