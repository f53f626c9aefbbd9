//! Contact repository contract and SQLite implementation.
//!
//! # Invariants
//! - Updates never clear `fund_id` implicitly: a `None` in the incoming
//!   record keeps the stored assignment.
//! - Deleting a contact with a `fund_id` is refused unconditionally.

use crate::model::contact::{Contact, ContactId, ContactInput};
use crate::repo::{RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

pub(crate) const CONTACT_SELECT_SQL: &str = "SELECT
    id,
    name,
    email,
    phone,
    fund_id
FROM contacts";

/// Repository interface for contact CRUD operations.
pub trait ContactRepository {
    fn list_contacts(&self) -> RepoResult<Vec<Contact>>;
    fn get_contact(&self, id: ContactId) -> RepoResult<Option<Contact>>;
    /// Inserts a new, unassigned contact and returns it with its generated id.
    fn create_contact(&self, input: &ContactInput) -> RepoResult<Contact>;
    /// Replaces name/email/phone of `contact.id`; returns the stored record.
    fn update_contact(&self, contact: &Contact) -> RepoResult<Contact>;
    fn delete_contact(&self, id: ContactId) -> RepoResult<()>;
}

/// SQLite-backed contact repository.
pub struct SqliteContactRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteContactRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ContactRepository for SqliteContactRepository<'_> {
    fn list_contacts(&self) -> RepoResult<Vec<Contact>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CONTACT_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut contacts = Vec::new();
        while let Some(row) = rows.next()? {
            contacts.push(parse_contact_row(row)?);
        }
        Ok(contacts)
    }

    fn get_contact(&self, id: ContactId) -> RepoResult<Option<Contact>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CONTACT_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_contact_row(row)?));
        }
        Ok(None)
    }

    fn create_contact(&self, input: &ContactInput) -> RepoResult<Contact> {
        input.validate()?;

        self.conn.execute(
            "INSERT INTO contacts (name, email, phone, fund_id)
             VALUES (?1, ?2, ?3, NULL);",
            params![
                input.name.as_str(),
                input.email.as_deref(),
                input.phone.as_deref()
            ],
        )?;

        Ok(Contact::from_input(
            self.conn.last_insert_rowid(),
            input.clone(),
        ))
    }

    fn update_contact(&self, contact: &Contact) -> RepoResult<Contact> {
        contact.validate()?;

        let changed = self.conn.execute(
            "UPDATE contacts
             SET
                name = ?2,
                email = ?3,
                phone = ?4,
                fund_id = COALESCE(?5, fund_id)
             WHERE id = ?1;",
            params![
                contact.id,
                contact.name.as_str(),
                contact.email.as_deref(),
                contact.phone.as_deref(),
                contact.fund_id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::contact_not_found(contact.id));
        }

        self.get_contact(contact.id)?.ok_or_else(|| {
            RepoError::InvalidData(format!("contact {} missing after update", contact.id))
        })
    }

    fn delete_contact(&self, id: ContactId) -> RepoResult<()> {
        let existing = self
            .get_contact(id)?
            .ok_or(RepoError::contact_not_found(id))?;

        if let Some(fund_id) = existing.fund_id {
            return Err(RepoError::AssignedToFund {
                contact_id: id,
                fund_id,
            });
        }

        let changed = self.conn.execute(
            "DELETE FROM contacts WHERE id = ?1 AND fund_id IS NULL;",
            [id],
        )?;
        if changed == 0 {
            return Err(RepoError::contact_not_found(id));
        }

        Ok(())
    }
}

pub(crate) fn parse_contact_row(row: &Row<'_>) -> RepoResult<Contact> {
    let id: ContactId = row.get("id")?;
    let name: String = row.get("name")?;
    if name.trim().is_empty() {
        return Err(RepoError::InvalidData(format!(
            "blank name in contacts.name for id {id}"
        )));
    }

    Ok(Contact {
        id,
        name,
        email: row.get("email")?,
        phone: row.get("phone")?,
        fund_id: row.get("fund_id")?,
    })
}
