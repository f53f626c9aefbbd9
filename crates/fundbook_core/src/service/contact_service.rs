//! Contact use-case service.
//!
//! # Invariants
//! - Updates never touch fund membership.
//! - Deletion of a fund-assigned contact is refused before the repository
//!   is asked to delete.

use crate::model::contact::{Contact, ContactId, ContactInput};
use crate::repo::contact_repo::ContactRepository;
use crate::repo::RepoError;
use crate::service::{BusinessRule, ServiceError, ServiceResult};

/// Contact service over a repository implementation.
pub struct ContactService<R: ContactRepository> {
    repo: R,
}

impl<R: ContactRepository> ContactService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn list_contacts(&self) -> ServiceResult<Vec<Contact>> {
        self.repo
            .list_contacts()
            .map_err(|err| ServiceError::from_repo("retrieving contacts", err))
    }

    pub fn get_contact(&self, id: ContactId) -> ServiceResult<Contact> {
        const OPERATION: &str = "retrieving the contact";
        self.repo
            .get_contact(id)
            .map_err(|err| ServiceError::from_repo(OPERATION, err))?
            .ok_or_else(|| ServiceError::from_repo(OPERATION, RepoError::contact_not_found(id)))
    }

    /// Creates an unassigned contact; validation failures are client-class.
    pub fn create_contact(&self, input: ContactInput) -> ServiceResult<Contact> {
        self.repo
            .create_contact(&input)
            .map_err(|err| ServiceError::from_repo("creating the contact", err))
    }

    /// Replaces name/email/phone of an existing contact.
    ///
    /// The current fund assignment is kept as-is.
    pub fn update_contact(&self, id: ContactId, input: ContactInput) -> ServiceResult<Contact> {
        let changes = Contact::from_input(id, input);
        self.repo
            .update_contact(&changes)
            .map_err(|err| ServiceError::from_repo("updating the contact", err))
    }

    pub fn delete_contact(&self, id: ContactId) -> ServiceResult<()> {
        const OPERATION: &str = "deleting the contact";
        let contact = self
            .repo
            .get_contact(id)
            .map_err(|err| ServiceError::from_repo(OPERATION, err))?
            .ok_or_else(|| ServiceError::from_repo(OPERATION, RepoError::contact_not_found(id)))?;

        if contact.is_assigned() {
            return Err(ServiceError::BusinessRule(
                BusinessRule::ContactAssignedToFund,
            ));
        }

        self.repo
            .delete_contact(id)
            .map_err(|err| ServiceError::from_repo(OPERATION, err))
    }
}
