//! Seller profile DTO exchanged with the profile endpoint.
//!
//! # Design
//! Defined independently from the mock server's schema; integration tests
//! catch drift. `id` and `isVerified` are owned by the server: they are read
//! from responses but never sent back.
//!
//! Decoding is lenient per field: null or mistyped values fall back to the
//! default so one odd field never discards the rest of a stored profile.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::error::ValidationError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SellerProfile {
    #[serde(skip_serializing, deserialize_with = "lenient_uuid")]
    pub id: Option<Uuid>,
    #[serde(deserialize_with = "lenient_string")]
    pub store_name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub email: String,
    #[serde(deserialize_with = "lenient_string")]
    pub phone: String,
    #[serde(deserialize_with = "lenient_string")]
    pub description: String,
    #[serde(deserialize_with = "lenient_string")]
    pub address: String,
    #[serde(deserialize_with = "lenient_string")]
    pub eco_certification_id: String,
    #[serde(deserialize_with = "lenient_string")]
    pub expiry_date: String,
    #[serde(deserialize_with = "lenient_string")]
    pub eco_commitment: String,
    #[serde(skip_serializing, deserialize_with = "lenient_text")]
    pub is_verified: Option<String>,
}

impl SellerProfile {
    /// A stored profile always has a store name. Whitespace counts as a name.
    pub fn exists(&self) -> bool {
        !self.store_name.is_empty()
    }

    pub fn get(&self, field: ProfileField) -> &str {
        match field {
            ProfileField::StoreName => &self.store_name,
            ProfileField::Email => &self.email,
            ProfileField::Phone => &self.phone,
            ProfileField::Description => &self.description,
            ProfileField::Address => &self.address,
            ProfileField::EcoCertificationId => &self.eco_certification_id,
            ProfileField::ExpiryDate => &self.expiry_date,
            ProfileField::EcoCommitment => &self.eco_commitment,
        }
    }

    pub fn set(&mut self, field: ProfileField, value: String) {
        let slot = match field {
            ProfileField::StoreName => &mut self.store_name,
            ProfileField::Email => &mut self.email,
            ProfileField::Phone => &mut self.phone,
            ProfileField::Description => &mut self.description,
            ProfileField::Address => &mut self.address,
            ProfileField::EcoCertificationId => &mut self.eco_certification_id,
            ProfileField::ExpiryDate => &mut self.expiry_date,
            ProfileField::EcoCommitment => &mut self.eco_commitment,
        };
        *slot = value;
    }

    /// Check that every required field holds non-blank text.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let missing: Vec<&'static str> = ProfileField::ALL
            .iter()
            .filter(|f| f.is_required() && self.get(**f).trim().is_empty())
            .map(|f| f.label())
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { missing })
        }
    }
}

/// Scalars become text; null, arrays and objects become `None`.
fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    })
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    lenient_text(deserializer).map(Option::unwrap_or_default)
}

fn lenient_uuid<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Uuid>, D::Error> {
    Ok(lenient_text(deserializer)?.and_then(|s| Uuid::parse_str(&s).ok()))
}

/// Editable profile fields, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileField {
    StoreName,
    Email,
    Phone,
    Description,
    Address,
    EcoCertificationId,
    ExpiryDate,
    EcoCommitment,
}

impl ProfileField {
    pub const ALL: [ProfileField; 8] = [
        ProfileField::StoreName,
        ProfileField::Email,
        ProfileField::Phone,
        ProfileField::Description,
        ProfileField::Address,
        ProfileField::EcoCertificationId,
        ProfileField::ExpiryDate,
        ProfileField::EcoCommitment,
    ];

    /// Form/wire name of the field.
    pub fn name(self) -> &'static str {
        match self {
            ProfileField::StoreName => "storeName",
            ProfileField::Email => "email",
            ProfileField::Phone => "phone",
            ProfileField::Description => "description",
            ProfileField::Address => "address",
            ProfileField::EcoCertificationId => "ecoCertificationId",
            ProfileField::ExpiryDate => "expiryDate",
            ProfileField::EcoCommitment => "ecoCommitment",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ProfileField::StoreName => "Store Name",
            ProfileField::Email => "Contact Email",
            ProfileField::Phone => "Phone Number",
            ProfileField::Description => "Description",
            ProfileField::Address => "Address",
            ProfileField::EcoCertificationId => "Eco Certification ID",
            ProfileField::ExpiryDate => "Expiry Date",
            ProfileField::EcoCommitment => "Eco Commitment",
        }
    }

    /// Certification ID and expiry date are optional.
    pub fn is_required(self) -> bool {
        !matches!(
            self,
            ProfileField::EcoCertificationId | ProfileField::ExpiryDate
        )
    }
}

impl fmt::Display for ProfileField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a form field name is not a profile field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown profile field: {0}")]
pub struct UnknownField(pub String);

impl FromStr for ProfileField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProfileField::ALL
            .into_iter()
            .find(|f| f.name() == s)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}
