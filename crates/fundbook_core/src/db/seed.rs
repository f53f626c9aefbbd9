//! Startup fund seeding.

use crate::model::fund::Fund;
use crate::repo::fund_repo::{FundRepository, SqliteFundRepository};
use crate::repo::RepoResult;
use log::info;
use rusqlite::Connection;

/// Ensures a fund exists for every name, creating only the missing ones.
///
/// Blank names are skipped. Returns the funds in input order, existing or
/// newly created, so repeated calls are idempotent.
pub fn seed_funds(conn: &Connection, names: &[String]) -> RepoResult<Vec<Fund>> {
    let repo = SqliteFundRepository::new(conn);
    let mut funds = Vec::with_capacity(names.len());

    for name in names.iter().map(|name| name.trim()).filter(|n| !n.is_empty()) {
        let fund = match repo.find_fund_by_name(name)? {
            Some(existing) => existing,
            None => {
                let created = repo.create_fund(name)?;
                info!(
                    "event=fund_seed module=db status=ok fund_id={} created=true",
                    created.id
                );
                created
            }
        };
        funds.push(fund);
    }

    Ok(funds)
}
