//! Contact endpoints.

use crate::envelope::ApiReply;
use crate::handlers::{json_body, path_param, reply_with};
use crate::state::AppState;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::Json;
use fundbook_core::{ContactId, ContactInput, ContactService, SqliteContactRepository};
use rusqlite::Connection;

fn service(conn: &Connection) -> ContactService<SqliteContactRepository<'_>> {
    ContactService::new(SqliteContactRepository::new(conn))
}

/// `GET /contacts`
pub async fn list_contacts(State(state): State<AppState>) -> ApiReply {
    state
        .with_store(|conn| {
            reply_with(
                service(conn).list_contacts(),
                "Contacts retrieved successfully.",
            )
        })
        .logged("contact_list")
}

/// `GET /contacts/{id}`
pub async fn get_contact(
    State(state): State<AppState>,
    id: Result<Path<ContactId>, PathRejection>,
) -> ApiReply {
    let id = match path_param(id) {
        Ok(id) => id,
        Err(reply) => return reply.logged("contact_get"),
    };
    state
        .with_store(|conn| {
            reply_with(
                service(conn).get_contact(id),
                "Contact retrieved successfully.",
            )
        })
        .logged("contact_get")
}

/// `POST /contacts`
///
/// Answers `201` with a `Location` header on success.
pub async fn create_contact(
    State(state): State<AppState>,
    body: Result<Json<ContactInput>, JsonRejection>,
) -> ApiReply {
    let input = match json_body(body) {
        Ok(input) => input,
        Err(reply) => return reply.logged("contact_create"),
    };
    state
        .with_store(|conn| match service(conn).create_contact(input) {
            Ok(contact) => ApiReply::created(
                state.resource_path(&format!("/contacts/{}", contact.id)),
                &contact,
                "Contact created successfully.",
            ),
            Err(err) => ApiReply::from_service_error(&err),
        })
        .logged("contact_create")
}

/// `PUT /contacts/{id}`
///
/// Replaces name, email and phone. Fund membership is kept.
pub async fn update_contact(
    State(state): State<AppState>,
    id: Result<Path<ContactId>, PathRejection>,
    body: Result<Json<ContactInput>, JsonRejection>,
) -> ApiReply {
    let (id, input) = match (path_param(id), json_body(body)) {
        (Ok(id), Ok(input)) => (id, input),
        (Err(reply), _) | (_, Err(reply)) => return reply.logged("contact_update"),
    };
    state
        .with_store(|conn| {
            reply_with(
                service(conn).update_contact(id, input),
                "Contact updated successfully.",
            )
        })
        .logged("contact_update")
}

/// `DELETE /contacts/{id}`
///
/// Answers `204` on success.
pub async fn delete_contact(
    State(state): State<AppState>,
    id: Result<Path<ContactId>, PathRejection>,
) -> ApiReply {
    let id = match path_param(id) {
        Ok(id) => id,
        Err(reply) => return reply.logged("contact_delete"),
    };
    state
        .with_store(|conn| match service(conn).delete_contact(id) {
            Ok(()) => ApiReply::no_content(),
            Err(err) => ApiReply::from_service_error(&err),
        })
        .logged("contact_delete")
}
