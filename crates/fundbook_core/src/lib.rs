//! Core domain logic for Fundbook.
//! This crate is the single source of truth for contact/fund invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status, sanitize_message, LogTarget};
pub use model::contact::{Contact, ContactFieldError, ContactId, ContactInput, ContactValidationError};
pub use model::fund::{Fund, FundDetail, FundId};
pub use repo::contact_repo::{ContactRepository, SqliteContactRepository};
pub use repo::fund_repo::{FundRepository, SqliteFundRepository};
pub use repo::{EntityKind, RepoError, RepoResult};
pub use service::contact_service::ContactService;
pub use service::fund_service::FundService;
pub use service::{BusinessRule, FailureClass, ServiceError, ServiceResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
