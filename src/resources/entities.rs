//! Entities
//!
//! An entity is the legal owner of accounts on the platform: a corporation,
//! a natural person, joint individuals, or a trust. The `structure` field
//! selects which detail object is populated; that union is modeled here as
//! [`EntityDetails`], so an entity can never hold two structures at once.

use chrono::{DateTime, NaiveDate, Utc};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::types::WireError;
use crate::wire::{wire_enum, ExtraFields, Field, FromWire, WireObject};

wire_enum! {
    /// The legal structure of an entity
    pub enum EntityStructure {
        /// A corporation
        Corporation => "corporation",
        /// An individual person
        NaturalPerson => "natural_person",
        /// Multiple individuals with joint ownership
        Joint => "joint",
        /// A trust
        Trust => "trust",
    }
}

wire_enum! {
    /// The status of an entity
    pub enum EntityStatus {
        /// The entity is active
        Active => "active",
        /// The entity is archived and can no longer open accounts
        Archived => "archived",
        /// The entity is temporarily disabled
        Disabled => "disabled",
    }
}

wire_enum! {
    /// Identifies entity objects on the wire
    pub enum EntityKind {
        Entity => "entity",
    }
}

wire_enum! {
    /// How an individual's identity was verified
    pub enum IdentificationMethod {
        SocialSecurityNumber => "social_security_number",
        IndividualTaxpayerIdentificationNumber => "individual_taxpayer_identification_number",
        Passport => "passport",
        DriversLicense => "drivers_license",
        Other => "other",
    }
}

wire_enum! {
    /// Why a person is a beneficial owner of a corporation
    pub enum BeneficialOwnerProng {
        /// Owns 25% or more of the corporation
        Ownership => "ownership",
        /// Exercises significant control over the corporation
        Control => "control",
    }
}

wire_enum! {
    /// Whether the trust can be amended by its grantor
    pub enum TrustCategory {
        Revocable => "revocable",
        Irrevocable => "irrevocable",
    }
}

wire_enum! {
    /// The structure of a trustee
    pub enum TrusteeStructure {
        Individual => "individual",
    }
}

/// A US address
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Address {
    /// First line of the address
    pub line1: String,
    /// Second line of the address, if any
    pub line2: Option<String>,
    pub city: String,
    /// Two-letter US state abbreviation
    pub state: String,
    /// ZIP code
    pub zip: String,
}

impl FromWire for Address {
    fn from_wire(value: Value) -> Result<Self, WireError> {
        let mut obj = WireObject::new(value)?;
        Ok(Address {
            line1: obj.required("line1")?,
            line2: obj.required("line2")?,
            city: obj.required("city")?,
            state: obj.required("state")?,
            zip: obj.required("zip")?,
        })
    }
}

/// A means of verifying a person's identity
///
/// Only the last four digits of the identification number are returned.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Identification {
    /// The identification method used
    pub method: IdentificationMethod,
    /// Last 4 digits of the identification number
    pub number_last4: String,
}

impl FromWire for Identification {
    fn from_wire(value: Value) -> Result<Self, WireError> {
        let mut obj = WireObject::new(value)?;
        Ok(Identification {
            method: obj.required("method")?,
            number_last4: obj.required("number_last4")?,
        })
    }
}

/// Details of an individual person
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NaturalPerson {
    /// The person's legal name
    pub name: String,
    pub date_of_birth: NaiveDate,
    pub address: Address,
    pub identification: Identification,
}

impl FromWire for NaturalPerson {
    fn from_wire(value: Value) -> Result<Self, WireError> {
        let mut obj = WireObject::new(value)?;
        Ok(NaturalPerson {
            name: obj.required("name")?,
            date_of_birth: obj.required("date_of_birth")?,
            address: obj.required("address")?,
            identification: obj.required("identification")?,
        })
    }
}

/// A person who owns or controls a corporation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BeneficialOwner {
    pub individual: NaturalPerson,
    /// The owner's title at the corporation, if any
    pub company_title: Option<String>,
    /// Why this person qualifies as a beneficial owner
    pub prongs: Vec<BeneficialOwnerProng>,
}

impl FromWire for BeneficialOwner {
    fn from_wire(value: Value) -> Result<Self, WireError> {
        let mut obj = WireObject::new(value)?;
        Ok(BeneficialOwner {
            individual: obj.required("individual")?,
            company_title: obj.required("company_title")?,
            prongs: obj.required("prongs")?,
        })
    }
}

/// Details of a corporation entity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Corporation {
    /// The corporation's legal name
    pub name: String,
    /// The corporation's website, if provided
    pub website: Option<String>,
    /// Employer Identification Number, if provided
    pub tax_identifier: Option<String>,
    /// Two-letter abbreviation of the incorporation state, if provided
    pub incorporation_state: Option<String>,
    pub address: Address,
    pub beneficial_owners: Vec<BeneficialOwner>,
}

impl FromWire for Corporation {
    fn from_wire(value: Value) -> Result<Self, WireError> {
        let mut obj = WireObject::new(value)?;
        Ok(Corporation {
            name: obj.required("name")?,
            website: obj.required("website")?,
            tax_identifier: obj.required("tax_identifier")?,
            incorporation_state: obj.required("incorporation_state")?,
            address: obj.required("address")?,
            beneficial_owners: obj.required("beneficial_owners")?,
        })
    }
}

/// Details of a joint entity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Joint {
    /// The name by which the joint entity is known
    pub name: String,
    /// The two or more individuals that jointly own the entity
    pub individuals: Vec<NaturalPerson>,
}

impl FromWire for Joint {
    fn from_wire(value: Value) -> Result<Self, WireError> {
        let mut obj = WireObject::new(value)?;
        Ok(Joint {
            name: obj.required("name")?,
            individuals: obj.required("individuals")?,
        })
    }
}

/// A trustee of a trust
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trustee {
    pub structure: TrusteeStructure,
    /// Populated when `structure` is `individual`
    pub individual: Option<NaturalPerson>,
}

impl FromWire for Trustee {
    fn from_wire(value: Value) -> Result<Self, WireError> {
        let mut obj = WireObject::new(value)?;
        Ok(Trustee {
            structure: obj.required("structure")?,
            individual: obj.required("individual")?,
        })
    }
}

/// Details of a trust entity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trust {
    /// The trust's name
    pub name: String,
    pub category: TrustCategory,
    pub address: Address,
    pub trustees: Vec<Trustee>,
}

impl FromWire for Trust {
    fn from_wire(value: Value) -> Result<Self, WireError> {
        let mut obj = WireObject::new(value)?;
        Ok(Trust {
            name: obj.required("name")?,
            category: obj.required("category")?,
            address: obj.required("address")?,
            trustees: obj.required("trustees")?,
        })
    }
}

/// The structure-specific details of an entity
///
/// On the wire this is a `structure` discriminator plus one sibling detail
/// object; exactly one detail is populated per entity, which this enum makes
/// structural. Structures added to the API after this SDK version decode to
/// [`EntityDetails::Unrecognized`]; their detail payload (an object keyed by
/// the new structure name) is preserved through the parent entity's `extra`
/// fields.
#[derive(Debug, Clone, PartialEq)]
pub enum EntityDetails {
    Corporation(Corporation),
    NaturalPerson(NaturalPerson),
    Joint(Joint),
    Trust(Trust),
    /// A structure not yet known to this SDK version
    Unrecognized {
        /// The raw `structure` value from the wire
        structure: String,
    },
}

impl EntityDetails {
    /// The discriminator value for this detail
    pub fn structure(&self) -> EntityStructure {
        match self {
            EntityDetails::Corporation(_) => EntityStructure::Corporation,
            EntityDetails::NaturalPerson(_) => EntityStructure::NaturalPerson,
            EntityDetails::Joint(_) => EntityStructure::Joint,
            EntityDetails::Trust(_) => EntityStructure::Trust,
            EntityDetails::Unrecognized { structure } => {
                EntityStructure::Unknown(structure.clone())
            }
        }
    }

    /// The corporation details, if this entity is a corporation
    pub fn as_corporation(&self) -> Option<&Corporation> {
        match self {
            EntityDetails::Corporation(detail) => Some(detail),
            _ => None,
        }
    }

    /// The natural person details, if this entity is a natural person
    pub fn as_natural_person(&self) -> Option<&NaturalPerson> {
        match self {
            EntityDetails::NaturalPerson(detail) => Some(detail),
            _ => None,
        }
    }

    /// The joint details, if this entity is jointly owned
    pub fn as_joint(&self) -> Option<&Joint> {
        match self {
            EntityDetails::Joint(detail) => Some(detail),
            _ => None,
        }
    }

    /// The trust details, if this entity is a trust
    pub fn as_trust(&self) -> Option<&Trust> {
        match self {
            EntityDetails::Trust(detail) => Some(detail),
            _ => None,
        }
    }

    /// Decode the discriminator and its matching detail from a parent object
    pub(crate) fn from_object(obj: &mut WireObject) -> Result<Self, WireError> {
        let structure: EntityStructure = obj.required("structure")?;
        match structure {
            EntityStructure::Corporation => {
                Ok(EntityDetails::Corporation(obj.required("corporation")?))
            }
            EntityStructure::NaturalPerson => {
                Ok(EntityDetails::NaturalPerson(obj.required("natural_person")?))
            }
            EntityStructure::Joint => Ok(EntityDetails::Joint(obj.required("joint")?)),
            EntityStructure::Trust => Ok(EntityDetails::Trust(obj.required("trust")?)),
            EntityStructure::Unknown(structure) => {
                Ok(EntityDetails::Unrecognized { structure })
            }
        }
    }
}

impl Serialize for EntityDetails {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("structure", self.structure().as_str())?;
        match self {
            EntityDetails::Corporation(detail) => map.serialize_entry("corporation", detail)?,
            EntityDetails::NaturalPerson(detail) => {
                map.serialize_entry("natural_person", detail)?
            }
            EntityDetails::Joint(detail) => map.serialize_entry("joint", detail)?,
            EntityDetails::Trust(detail) => map.serialize_entry("trust", detail)?,
            EntityDetails::Unrecognized { .. } => {}
        }
        map.end()
    }
}

/// An entity: the legal owner of accounts on the platform
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entity {
    /// The entity identifier
    pub id: String,
    /// The entity's legal structure and matching details
    #[serde(flatten)]
    pub details: EntityDetails,
    /// An internal description of the entity, if one was set
    pub description: Option<String>,
    pub status: EntityStatus,
    /// When the entity was created
    pub created_at: DateTime<Utc>,
    /// A constant representing the object's type on the wire
    #[serde(rename = "type")]
    pub entity_type: EntityKind,
    /// Fields returned by the API but unknown to this SDK version
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl FromWire for Entity {
    fn from_wire(value: Value) -> Result<Self, WireError> {
        let mut obj = WireObject::new(value)?;
        Ok(Entity {
            id: obj.required("id")?,
            details: EntityDetails::from_object(&mut obj)?,
            description: obj.required("description")?,
            status: obj.required("status")?,
            created_at: obj.required("created_at")?,
            entity_type: obj.required("type")?,
            extra: obj.into_extra(),
        })
    }
}

/// Parameters for creating an entity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityCreateParams {
    /// The structure and structure-specific details of the new entity
    #[serde(flatten)]
    pub details: EntityDetails,
    /// An internal description of the entity
    #[serde(skip_serializing_if = "Field::is_unset")]
    pub description: Field<String>,
}

impl EntityCreateParams {
    /// Create parameters with all required fields set
    pub fn new(details: EntityDetails) -> Self {
        EntityCreateParams {
            details,
            description: Field::Unset,
        }
    }

    /// Return a copy of these parameters with `description` set
    ///
    /// Pass [`Field::Null`] to send an explicit null.
    pub fn with_description(&self, description: impl Into<Field<String>>) -> Self {
        let mut params = self.clone();
        params.description = description.into();
        params
    }
}

impl FromWire for EntityCreateParams {
    fn from_wire(value: Value) -> Result<Self, WireError> {
        let mut obj = WireObject::new(value)?;
        Ok(EntityCreateParams {
            details: EntityDetails::from_object(&mut obj)?,
            description: obj.optional("description")?,
        })
    }
}

/// Parameters for listing entities
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct EntityListParams {
    #[serde(skip_serializing_if = "Field::is_unset")]
    pub status: Field<EntityStatus>,
    #[serde(skip_serializing_if = "Field::is_unset")]
    pub cursor: Field<String>,
    #[serde(skip_serializing_if = "Field::is_unset")]
    pub limit: Field<i64>,
}

impl EntityListParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a copy with the status filter set
    ///
    /// Accepts the enum or a raw wire string.
    pub fn with_status(&self, status: impl Into<EntityStatus>) -> Self {
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

impl FromWire for EntityListParams {
    fn from_wire(value: Value) -> Result<Self, WireError> {
        let mut obj = WireObject::new(value)?;
        Ok(EntityListParams {
            status: obj.optional("status")?,
            cursor: obj.optional("cursor")?,
            limit: obj.optional("limit")?,
        })
    }
}
