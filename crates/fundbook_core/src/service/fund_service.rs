//! Fund use-case service.
//!
//! # Responsibility
//! - Read funds with their derived member lists.
//! - Drive the membership state machine of a contact:
//!   `Unassigned -> AssignedTo(F)` via add, `AssignedTo(F) -> Unassigned`
//!   via remove. There is no direct `AssignedTo(F) -> AssignedTo(G)`.
//!
//! # Invariants
//! - A contact belongs to at most one fund.
//! - Re-adding a contact to its current fund is an error, not a no-op.
//! - Checks run in order: fund exists, contact exists, not already in this
//!   fund, not in another fund. Nothing is written unless all pass.

use crate::model::contact::ContactId;
use crate::model::fund::{Fund, FundDetail, FundId};
use crate::repo::contact_repo::ContactRepository;
use crate::repo::fund_repo::FundRepository;
use crate::repo::RepoError;
use crate::service::{BusinessRule, ServiceError, ServiceResult};

const ADD_OPERATION: &str = "adding the contact to the fund";
const REMOVE_OPERATION: &str = "removing the contact from the fund";

/// Fund service over fund and contact repositories.
pub struct FundService<F: FundRepository, C: ContactRepository> {
    funds: F,
    contacts: C,
}

impl<F: FundRepository, C: ContactRepository> FundService<F, C> {
    pub fn new(funds: F, contacts: C) -> Self {
        Self { funds, contacts }
    }

    pub fn list_funds(&self) -> ServiceResult<Vec<Fund>> {
        self.funds
            .list_funds()
            .map_err(|err| ServiceError::from_repo("retrieving funds", err))
    }

    /// Gets one fund together with its current members.
    pub fn get_fund(&self, id: FundId) -> ServiceResult<FundDetail> {
        const OPERATION: &str = "retrieving the fund";
        self.funds
            .get_fund_with_contacts(id)
            .map_err(|err| ServiceError::from_repo(OPERATION, err))?
            .ok_or_else(|| ServiceError::from_repo(OPERATION, RepoError::fund_not_found(id)))
    }

    pub fn add_contact_to_fund(&self, fund_id: FundId, contact_id: ContactId) -> ServiceResult<()> {
        self.require_fund(fund_id, ADD_OPERATION)?;

        let contact = self
            .contacts
            .get_contact(contact_id)
            .map_err(|err| ServiceError::from_repo(ADD_OPERATION, err))?
            .ok_or_else(|| {
                ServiceError::from_repo(ADD_OPERATION, RepoError::contact_not_found(contact_id))
            })?;

        match contact.fund_id {
            Some(current) if current == fund_id => {
                return Err(ServiceError::BusinessRule(BusinessRule::AlreadyInThisFund));
            }
            Some(_) => {
                return Err(ServiceError::BusinessRule(
                    BusinessRule::AssignedToAnotherFund,
                ));
            }
            None => {}
        }

        self.funds
            .add_contact_to_fund(fund_id, contact_id)
            .map_err(|err| ServiceError::from_repo(ADD_OPERATION, err))
    }

    pub fn remove_contact_from_fund(
        &self,
        fund_id: FundId,
        contact_id: ContactId,
    ) -> ServiceResult<()> {
        self.require_fund(fund_id, REMOVE_OPERATION)?;

        self.funds
            .remove_contact_from_fund(fund_id, contact_id)
            .map_err(|err| ServiceError::from_repo(REMOVE_OPERATION, err))
    }

    fn require_fund(&self, fund_id: FundId, operation: &'static str) -> ServiceResult<Fund> {
        self.funds
            .get_fund(fund_id)
            .map_err(|err| ServiceError::from_repo(operation, err))?
            .ok_or_else(|| ServiceError::from_repo(operation, RepoError::fund_not_found(fund_id)))
    }
}
