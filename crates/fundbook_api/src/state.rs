//! Shared handler state.

use crate::envelope::ApiReply;
use rusqlite::Connection;
use std::sync::{Arc, Mutex};

/// Store handle and routing facts shared by all handlers.
///
/// The connection is locked for the span of one service call; repositories
/// and services are rebuilt per request over the guard.
#[derive(Clone)]
pub struct AppState {
    store: Arc<Mutex<Connection>>,
    base_path: Arc<str>,
}

impl AppState {
    /// `base_path` is already normalized (`""` or `/segment[/segment]`).
    pub fn new(conn: Connection, base_path: impl Into<String>) -> Self {
        Self {
            store: Arc::new(Mutex::new(conn)),
            base_path: Arc::from(base_path.into()),
        }
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Public path of a resource below the base path, e.g. `/api/contacts/1`.
    pub fn resource_path(&self, tail: &str) -> String {
        format!("{}{tail}", self.base_path)
    }

    /// Runs `work` with exclusive access to the store.
    pub fn with_store(&self, work: impl FnOnce(&Connection) -> ApiReply) -> ApiReply {
        match self.store.lock() {
            Ok(conn) => work(&conn),
            Err(_) => ApiReply::internal(
                "An error occurred while processing your request",
                &"store lock poisoned",
            ),
        }
    }
}
