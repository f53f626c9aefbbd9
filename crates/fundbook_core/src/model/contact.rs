//! Contact domain model.
//!
//! # Responsibility
//! - Define the canonical contact record and its editable input shape.
//! - Validate user-editable fields before any persistence.
//!
//! # Invariants
//! - `name` is non-blank and at most `NAME_MAX_CHARS` characters.
//! - `email`/`phone` are validated only when present and non-empty.
//! - `fund_id` is never set through `ContactInput`; fund membership changes
//!   only through fund assignment operations.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

use crate::model::fund::FundId;

/// Store-generated contact identifier.
pub type ContactId = i64;

pub const NAME_MAX_CHARS: usize = 100;

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9\s\-\(\)]+$").expect("valid phone regex"));

/// Person record, optionally linked to one fund.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: ContactId,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// `None` means unassigned. When set, references an existing fund.
    pub fund_id: Option<FundId>,
}

impl Contact {
    /// Builds a stored contact from an id and validated input fields.
    ///
    /// The result starts unassigned.
    pub fn from_input(id: ContactId, input: ContactInput) -> Self {
        Self {
            id,
            name: input.name,
            email: input.email,
            phone: input.phone,
            fund_id: None,
        }
    }

    /// Returns the editable fields of this contact.
    pub fn input(&self) -> ContactInput {
        ContactInput {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
        }
    }

    /// Returns whether this contact currently belongs to a fund.
    pub fn is_assigned(&self) -> bool {
        self.fund_id.is_some()
    }

    /// Validates editable fields of this record.
    pub fn validate(&self) -> Result<(), ContactValidationError> {
        validate_fields(&self.name, self.email.as_deref(), self.phone.as_deref())
    }
}

/// Create/update payload for a contact.
///
/// Accepts both `name` and `Name` style keys on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInput {
    #[serde(default, alias = "Name")]
    pub name: String,
    #[serde(default, alias = "Email")]
    pub email: Option<String>,
    #[serde(default, alias = "Phone")]
    pub phone: Option<String>,
}

impl ContactInput {
    /// Creates an input with only a name set.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: None,
            phone: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Checks every field rule and reports all failures at once.
    pub fn validate(&self) -> Result<(), ContactValidationError> {
        validate_fields(&self.name, self.email.as_deref(), self.phone.as_deref())
    }
}

/// One failed contact field rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactFieldError {
    NameRequired,
    NameTooLong,
    InvalidEmail,
    InvalidPhone,
}

impl Display for ContactFieldError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NameRequired => write!(f, "Name is required"),
            Self::NameTooLong => write!(f, "Name cannot exceed {NAME_MAX_CHARS} characters"),
            Self::InvalidEmail => write!(f, "A valid email address is required"),
            Self::InvalidPhone => write!(f, "A valid phone number is required"),
        }
    }
}

/// Validation outcome carrying every failed rule, in field order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactValidationError {
    pub failures: Vec<ContactFieldError>,
}

impl ContactValidationError {
    /// Human-readable rule messages, one per failure.
    pub fn messages(&self) -> Vec<String> {
        self.failures.iter().map(ToString::to_string).collect()
    }
}

impl Display for ContactValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid contact: {}", self.messages().join("; "))
    }
}

impl Error for ContactValidationError {}

fn validate_fields(
    name: &str,
    email: Option<&str>,
    phone: Option<&str>,
) -> Result<(), ContactValidationError> {
    let mut failures = Vec::new();

    if name.trim().is_empty() {
        failures.push(ContactFieldError::NameRequired);
    } else if name.chars().count() > NAME_MAX_CHARS {
        failures.push(ContactFieldError::NameTooLong);
    }

    if let Some(email) = email.filter(|value| !value.is_empty()) {
        if !is_plausible_email(email) {
            failures.push(ContactFieldError::InvalidEmail);
        }
    }

    if let Some(phone) = phone.filter(|value| !value.is_empty()) {
        if !PHONE_RE.is_match(phone) {
            failures.push(ContactFieldError::InvalidPhone);
        }
    }

    if failures.is_empty() {
        Ok(())
    } else {
        Err(ContactValidationError { failures })
    }
}

// Exactly one `@`, with at least one character on each side.
fn is_plausible_email(value: &str) -> bool {
    match (value.find('@'), value.rfind('@')) {
        (Some(first), Some(last)) => first == last && first > 0 && last < value.len() - 1,
        _ => false,
    }
}
