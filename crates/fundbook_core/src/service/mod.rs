//! Use-case services enforcing contact/fund business rules.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Enforce single-fund membership and the deletion guard.
//! - Translate repository outcomes into `ServiceError` values tagged
//!   client-class or server-class.
//!
//! # Invariants
//! - Store failures never escape as-is: they are logged and re-wrapped as
//!   `ServiceError::Unexpected` with a generic operation message.
//! - Services stay storage-agnostic; they only see repository traits.

use crate::logging::sanitize_message;
use crate::repo::{EntityKind, RepoError};
use log::error;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod contact_service;
pub mod fund_service;

const MAX_CAUSE_CHARS: usize = 200;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Who can fix a failure: the caller (client) or the operator (server).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    Client,
    Server,
}

/// Relationship rule violated by a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusinessRule {
    /// Contacts that belong to a fund cannot be deleted.
    ContactAssignedToFund,
    /// Re-adding a contact to its current fund is rejected.
    AlreadyInThisFund,
    /// A contact must leave its fund before joining another.
    AssignedToAnotherFund,
    /// Removal target is not a member of the given fund.
    NotInFund,
}

impl Display for BusinessRule {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ContactAssignedToFund => write!(f, "Cannot delete contact assigned to a fund."),
            Self::AlreadyInThisFund => write!(f, "Contact is already assigned to this fund."),
            Self::AssignedToAnotherFund => {
                write!(f, "Contact is already assigned to another fund.")
            }
            Self::NotInFund => write!(
                f,
                "Failed to remove contact from fund. The contact may not be assigned to this fund."
            ),
        }
    }
}

/// Tagged failure returned by every service operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    NotFound { entity: EntityKind, id: i64 },
    /// Input rejected; carries every rule message.
    Validation(Vec<String>),
    BusinessRule(BusinessRule),
    /// Lower-layer failure. `cause` is a sanitized single line.
    Unexpected {
        operation: &'static str,
        cause: String,
    },
}

impl ServiceError {
    pub fn class(&self) -> FailureClass {
        match self {
            Self::Unexpected { .. } => FailureClass::Server,
            _ => FailureClass::Client,
        }
    }

    /// Caller-facing summary line.
    pub fn message(&self) -> String {
        match self {
            Self::NotFound {
                entity: EntityKind::Contact,
                ..
            } => "Contact not found.".to_string(),
            Self::NotFound {
                entity: EntityKind::Fund,
                ..
            } => "Fund not found.".to_string(),
            Self::Validation(_) => "Validation failed".to_string(),
            Self::BusinessRule(rule) => rule.to_string(),
            Self::Unexpected { operation, .. } => format!("An error occurred while {operation}."),
        }
    }

    /// Supporting detail lines (rule messages or the sanitized cause).
    pub fn details(&self) -> Vec<String> {
        match self {
            Self::Validation(messages) => messages.clone(),
            Self::Unexpected { cause, .. } => vec![cause.clone()],
            _ => Vec::new(),
        }
    }

    /// Wraps a lower-layer failure and records it in the log.
    pub(crate) fn unexpected(operation: &'static str, err: &dyn Display) -> Self {
        let cause = sanitize_message(&err.to_string(), MAX_CAUSE_CHARS);
        error!(
            "event=service_failure module=service status=error operation=\"{operation}\" error={cause}"
        );
        Self::Unexpected { operation, cause }
    }

    /// Maps a repository error for `operation` onto the service taxonomy.
    pub(crate) fn from_repo(operation: &'static str, err: RepoError) -> Self {
        match err {
            RepoError::Validation(validation) => Self::Validation(validation.messages()),
            RepoError::BlankFundName => Self::Validation(vec![err.to_string()]),
            RepoError::NotFound { entity, id } => Self::NotFound { entity, id },
            RepoError::AssignedToFund { .. } => {
                Self::BusinessRule(BusinessRule::ContactAssignedToFund)
            }
            RepoError::AlreadyInFund { .. } => Self::BusinessRule(BusinessRule::AlreadyInThisFund),
            RepoError::NotInFund { .. } => Self::BusinessRule(BusinessRule::NotInFund),
            RepoError::Db(_) | RepoError::InvalidData(_) => Self::unexpected(operation, &err),
        }
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unexpected { cause, .. } => write!(f, "{} ({cause})", self.message()),
            _ => write!(f, "{}", self.message()),
        }
    }
}

impl Error for ServiceError {}
