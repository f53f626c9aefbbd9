//! Domain model for contacts and funds.
//!
//! # Responsibility
//! - Define the records shared by repositories, services and the HTTP surface.
//! - Own input validation rules for user-editable contact fields.
//!
//! # Invariants
//! - Identity is a store-generated integer and is never reused.
//! - Fund membership lives only on `Contact::fund_id`; a fund's member list is
//!   always derived by query.

pub mod contact;
pub mod fund;
