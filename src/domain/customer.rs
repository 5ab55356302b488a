use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A customer record as returned by the directory endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub first_name: String,
    pub last_name: String,
    /// Unique across the directory; used as the display key.
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_name: Option<String>,
}

impl Customer {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Customers in the order the server returned them.
pub type CustomerCollection = Vec<Customer>;

/// Body of a create request. Fields are sent exactly as typed, empty strings included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewCustomer {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub business_name: String,
}

/// Failure payload of the directory endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message, self.code)
    }
}

/// The editable fields of a [`Draft`], named as they appear on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DraftField {
    FirstName,
    LastName,
    Email,
    BusinessName,
}

impl DraftField {
    pub const ALL: [DraftField; 4] = [
        DraftField::FirstName,
        DraftField::LastName,
        DraftField::BusinessName,
        DraftField::Email,
    ];

    pub fn name(self) -> &'static str {
        match self {
            DraftField::FirstName => "firstName",
            DraftField::LastName => "lastName",
            DraftField::Email => "email",
            DraftField::BusinessName => "businessName",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DraftField::FirstName => "First Name",
            DraftField::LastName => "Last Name",
            DraftField::Email => "Email Address",
            DraftField::BusinessName => "Business Name",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown customer field '{0}'")]
pub struct UnknownField(pub String);

impl FromStr for DraftField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DraftField::ALL
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

/// In-progress input for a customer that has not been submitted yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub business_name: String,
}

impl Draft {
    /// Returns a copy of the draft with exactly one field replaced.
    pub fn with_field(mut self, field: DraftField, value: impl Into<String>) -> Self {
        *self.slot_mut(field) = value.into();
        self
    }

    pub fn get(&self, field: DraftField) -> &str {
        match field {
            DraftField::FirstName => &self.first_name,
            DraftField::LastName => &self.last_name,
            DraftField::Email => &self.email,
            DraftField::BusinessName => &self.business_name,
        }
    }

    pub fn is_empty(&self) -> bool {
        DraftField::ALL.iter().all(|field| self.get(*field).is_empty())
    }

    pub fn to_payload(&self) -> NewCustomer {
        NewCustomer {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            business_name: self.business_name.clone(),
        }
    }

    fn slot_mut(&mut self, field: DraftField) -> &mut String {
        match field {
            DraftField::FirstName => &mut self.first_name,
            DraftField::LastName => &mut self.last_name,
            DraftField::Email => &mut self.email,
            DraftField::BusinessName => &mut self.business_name,
        }
    }
}
