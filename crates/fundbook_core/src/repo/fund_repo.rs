//! Fund repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Read funds and their derived member lists.
//! - Mutate the contact → fund reference (the only stored side of the
//!   relationship).
//!
//! # Invariants
//! - Member lists are computed from `contacts.fund_id`; there is no second
//!   copy to keep in sync.
//! - Removal clears `fund_id` only when it matches the given fund.

use crate::model::contact::{Contact, ContactId};
use crate::model::fund::{Fund, FundDetail, FundId};
use crate::repo::contact_repo::{parse_contact_row, CONTACT_SELECT_SQL};
use crate::repo::{RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

/// Repository interface for funds and fund membership.
pub trait FundRepository {
    fn list_funds(&self) -> RepoResult<Vec<Fund>>;
    fn get_fund(&self, id: FundId) -> RepoResult<Option<Fund>>;
    fn get_fund_with_contacts(&self, id: FundId) -> RepoResult<Option<FundDetail>>;
    /// Members of a fund ordered by contact id; empty for unknown funds.
    fn contacts_in_fund(&self, id: FundId) -> RepoResult<Vec<Contact>>;
    fn find_fund_by_name(&self, name: &str) -> RepoResult<Option<Fund>>;
    fn create_fund(&self, name: &str) -> RepoResult<Fund>;
    /// Points `contact_id` at `fund_id`.
    ///
    /// Fails with `NotFound` when either side is missing and with
    /// `AlreadyInFund` when the contact already references this fund.
    fn add_contact_to_fund(&self, fund_id: FundId, contact_id: ContactId) -> RepoResult<()>;
    /// Clears the contact's fund reference if, and only if, it is `fund_id`.
    fn remove_contact_from_fund(&self, fund_id: FundId, contact_id: ContactId)
        -> RepoResult<()>;
}

/// SQLite-backed fund repository.
pub struct SqliteFundRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteFundRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    // Outer `None`: no such contact. Inner `None`: contact is unassigned.
    fn current_fund_of(&self, contact_id: ContactId) -> RepoResult<Option<Option<FundId>>> {
        let mut stmt = self
            .conn
            .prepare("SELECT fund_id FROM contacts WHERE id = ?1;")?;
        let mut rows = stmt.query([contact_id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(row.get(0)?));
        }
        Ok(None)
    }
}

impl FundRepository for SqliteFundRepository<'_> {
    fn list_funds(&self) -> RepoResult<Vec<Fund>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name FROM funds ORDER BY id ASC;")?;
        let mut rows = stmt.query([])?;
        let mut funds = Vec::new();
        while let Some(row) = rows.next()? {
            funds.push(parse_fund_row(row)?);
        }
        Ok(funds)
    }

    fn get_fund(&self, id: FundId) -> RepoResult<Option<Fund>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name FROM funds WHERE id = ?1;")?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_fund_row(row)?));
        }
        Ok(None)
    }

    fn get_fund_with_contacts(&self, id: FundId) -> RepoResult<Option<FundDetail>> {
        let Some(fund) = self.get_fund(id)? else {
            return Ok(None);
        };
        let contacts = self.contacts_in_fund(id)?;
        Ok(Some(FundDetail::new(fund, contacts)))
    }

    fn contacts_in_fund(&self, id: FundId) -> RepoResult<Vec<Contact>> {
        let mut stmt = self.conn.prepare(&format!(
            "{CONTACT_SELECT_SQL} WHERE fund_id = ?1 ORDER BY id ASC;"
        ))?;
        let mut rows = stmt.query([id])?;
        let mut contacts = Vec::new();
        while let Some(row) = rows.next()? {
            contacts.push(parse_contact_row(row)?);
        }
        Ok(contacts)
    }

    fn find_fund_by_name(&self, name: &str) -> RepoResult<Option<Fund>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name FROM funds WHERE name = ?1 ORDER BY id ASC LIMIT 1;")?;
        let mut rows = stmt.query([name.trim()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_fund_row(row)?));
        }
        Ok(None)
    }

    fn create_fund(&self, name: &str) -> RepoResult<Fund> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RepoError::BlankFundName);
        }

        self.conn
            .execute("INSERT INTO funds (name) VALUES (?1);", [name])?;
        Ok(Fund {
            id: self.conn.last_insert_rowid(),
            name: name.to_string(),
        })
    }

    fn add_contact_to_fund(&self, fund_id: FundId, contact_id: ContactId) -> RepoResult<()> {
        if self.get_fund(fund_id)?.is_none() {
            return Err(RepoError::fund_not_found(fund_id));
        }

        match self.current_fund_of(contact_id)? {
            None => return Err(RepoError::contact_not_found(contact_id)),
            Some(Some(current)) if current == fund_id => {
                return Err(RepoError::AlreadyInFund {
                    contact_id,
                    fund_id,
                });
            }
            Some(_) => {}
        }

        self.conn.execute(
            "UPDATE contacts SET fund_id = ?1 WHERE id = ?2;",
            params![fund_id, contact_id],
        )?;
        Ok(())
    }

    fn remove_contact_from_fund(
        &self,
        fund_id: FundId,
        contact_id: ContactId,
    ) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE contacts SET fund_id = NULL WHERE id = ?1 AND fund_id = ?2;",
            params![contact_id, fund_id],
        )?;

        if changed == 0 {
            return Err(RepoError::NotInFund {
                contact_id,
                fund_id,
            });
        }
        Ok(())
    }
}

fn parse_fund_row(row: &Row<'_>) -> RepoResult<Fund> {
    Ok(Fund {
        id: row.get("id")?,
        name: row.get("name")?,
    })
}
