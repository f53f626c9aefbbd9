//! Fund domain model.

use crate::model::contact::Contact;
use serde::{Deserialize, Serialize};

/// Store-generated fund identifier.
pub type FundId = i64;

/// Named grouping entity that aggregates contacts by reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fund {
    pub id: FundId,
    pub name: String,
}

/// Fund projection including its current members.
///
/// `contacts` is computed from `contacts.fund_id` at read time and is never
/// written back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundDetail {
    pub id: FundId,
    pub name: String,
    /// Members ordered by contact id.
    pub contacts: Vec<Contact>,
}

impl FundDetail {
    /// Builds a detail view from a fund row and its member rows.
    pub fn new(fund: Fund, contacts: Vec<Contact>) -> Self {
        Self {
            id: fund.id,
            name: fund.name,
            contacts,
        }
    }
}
