//! Repository layer: data access contracts and SQLite implementations.
//!
//! # Responsibility
//! - Define CRUD contracts for contacts and funds.
//! - Keep SQL details out of the service layer.
//!
//! # Invariants
//! - Contact writes call `validate()` before any SQL mutation.
//! - Repositories enforce existence checks and the two write guards
//!   (no delete while assigned, no redundant re-assignment); every other
//!   relationship rule belongs to services.
//! - Semantic failures (`NotFound`, guards) are distinct from store errors.

use crate::db::DbError;
use crate::model::contact::{ContactId, ContactValidationError};
use crate::model::fund::FundId;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod contact_repo;
pub mod fund_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Entity family referenced by a repository error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Contact,
    Fund,
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Contact => write!(f, "contact"),
            Self::Fund => write!(f, "fund"),
        }
    }
}

/// Repository error shared by contact and fund persistence.
#[derive(Debug)]
pub enum RepoError {
    /// Contact fields failed validation; nothing was written.
    Validation(ContactValidationError),
    /// Fund name is blank after trim.
    BlankFundName,
    Db(DbError),
    NotFound {
        entity: EntityKind,
        id: i64,
    },
    /// Delete refused because the contact still belongs to a fund.
    AssignedToFund {
        contact_id: ContactId,
        fund_id: FundId,
    },
    /// Assignment refused because it would not change anything.
    AlreadyInFund {
        contact_id: ContactId,
        fund_id: FundId,
    },
    /// Removal refused because the contact is not a member of that fund.
    NotInFund {
        contact_id: ContactId,
        fund_id: FundId,
    },
    InvalidData(String),
}

impl RepoError {
    pub fn contact_not_found(id: ContactId) -> Self {
        Self::NotFound {
            entity: EntityKind::Contact,
            id,
        }
    }

    pub fn fund_not_found(id: FundId) -> Self {
        Self::NotFound {
            entity: EntityKind::Fund,
            id,
        }
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::BlankFundName => write!(f, "fund name must not be blank"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::AssignedToFund {
                contact_id,
                fund_id,
            } => write!(
                f,
                "contact {contact_id} is assigned to fund {fund_id} and cannot be deleted"
            ),
            Self::AlreadyInFund {
                contact_id,
                fund_id,
            } => write!(f, "contact {contact_id} is already in fund {fund_id}"),
            Self::NotInFund {
                contact_id,
                fund_id,
            } => write!(f, "contact {contact_id} is not in fund {fund_id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ContactValidationError> for RepoError {
    fn from(value: ContactValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}
