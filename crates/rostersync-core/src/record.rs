//! Import and directory record types.
//!
//! Both sides of the reconciliation share the same five tracked scalar
//! attributes plus a group membership set. The directory side is wrapped
//! in [`DirectoryEntry`] so "user does not exist" is distinguishable from
//! "user exists with every optional attribute empty".

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::ids::{GroupId, Login};

/// A tracked user attribute.
///
/// The order of [`UserAttribute::ALL`] is the order assignments appear in
/// generated directory commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserAttribute {
    FirstName,
    LastName,
    EmailAddress,
    TelephoneNumber,
    MobileTelephoneNumber,
}

impl UserAttribute {
    /// All tracked attributes in their canonical order.
    pub const ALL: [UserAttribute; 5] = [
        UserAttribute::FirstName,
        UserAttribute::LastName,
        UserAttribute::EmailAddress,
        UserAttribute::TelephoneNumber,
        UserAttribute::MobileTelephoneNumber,
    ];

    /// The directory command-line flag name for this attribute.
    #[must_use]
    pub fn flag(&self) -> &'static str {
        match self {
            UserAttribute::FirstName => "first",
            UserAttribute::LastName => "last",
            UserAttribute::EmailAddress => "email",
            UserAttribute::TelephoneNumber => "phone",
            UserAttribute::MobileTelephoneNumber => "mobile",
        }
    }

    /// The snake_case field name, as used for roster column headers.
    #[must_use]
    pub fn key(&self) -> &'static str {
        match self {
            UserAttribute::FirstName => "first_name",
            UserAttribute::LastName => "last_name",
            UserAttribute::EmailAddress => "email_address",
            UserAttribute::TelephoneNumber => "telephone_number",
            UserAttribute::MobileTelephoneNumber => "mobile_telephone_number",
        }
    }

    /// The inverse of [`UserAttribute::key`].
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        UserAttribute::ALL.into_iter().find(|a| a.key() == key)
    }
}

impl std::fmt::Display for UserAttribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// A single attribute assignment within a change plan entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeAssignment {
    /// The attribute being assigned.
    pub attribute: UserAttribute,
    /// The new value (may be empty to clear the attribute).
    pub value: String,
}

impl AttributeAssignment {
    /// Create a new assignment.
    pub fn new(attribute: UserAttribute, value: impl Into<String>) -> Self {
        Self {
            attribute,
            value: value.into(),
        }
    }
}

impl std::fmt::Display for AttributeAssignment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "--{}={}", self.attribute.flag(), self.value)
    }
}

/// One roster row after normalization, keyed by login.
///
/// Constructed once per import batch (see [`crate::batch`]) and immutable
/// thereafter. `groups` holds canonical identifiers only, never raw
/// labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportRecord {
    pub login: Login,
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
    pub telephone_number: String,
    pub mobile_telephone_number: String,
    pub groups: BTreeSet<GroupId>,
}

impl ImportRecord {
    /// Get the raw value of a tracked attribute.
    #[must_use]
    pub fn attribute(&self, attribute: UserAttribute) -> &str {
        match attribute {
            UserAttribute::FirstName => &self.first_name,
            UserAttribute::LastName => &self.last_name,
            UserAttribute::EmailAddress => &self.email_address,
            UserAttribute::TelephoneNumber => &self.telephone_number,
            UserAttribute::MobileTelephoneNumber => &self.mobile_telephone_number,
        }
    }
}

/// The directory service's current view of one user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryUser {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email_address: String,
    #[serde(default)]
    pub telephone_number: String,
    #[serde(default)]
    pub mobile_telephone_number: String,
    #[serde(default)]
    pub groups: BTreeSet<GroupId>,
}

impl DirectoryUser {
    /// Get the raw value of a tracked attribute.
    #[must_use]
    pub fn attribute(&self, attribute: UserAttribute) -> &str {
        match attribute {
            UserAttribute::FirstName => &self.first_name,
            UserAttribute::LastName => &self.last_name,
            UserAttribute::EmailAddress => &self.email_address,
            UserAttribute::TelephoneNumber => &self.telephone_number,
            UserAttribute::MobileTelephoneNumber => &self.mobile_telephone_number,
        }
    }
}

/// Lookup result for one login: either the user record or an explicit
/// absence marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DirectoryEntry {
    /// The login does not exist in the directory.
    Absent,
    /// The login exists with the given record.
    Present(DirectoryUser),
}

impl DirectoryEntry {
    /// Check whether the user exists.
    #[must_use]
    pub fn is_present(&self) -> bool {
        matches!(self, DirectoryEntry::Present(_))
    }

    /// The user record, if present.
    #[must_use]
    pub fn user(&self) -> Option<&DirectoryUser> {
        match self {
            DirectoryEntry::Absent => None,
            DirectoryEntry::Present(user) => Some(user),
        }
    }
}
