use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use fundbook_api::handlers::funds::{self, AddContactToFundRequest};
use fundbook_api::handlers::{contacts, not_found};
use fundbook_api::{ApiReply, AppState, Envelope, EnvelopeStatus};
use fundbook_core::db::{open_db_in_memory, seed_funds};
use fundbook_core::ContactInput;
use serde_json::json;

fn state_with_funds(names: &[&str]) -> AppState {
    let conn = open_db_in_memory().unwrap();
    let names = names.iter().map(|name| name.to_string()).collect::<Vec<_>>();
    seed_funds(&conn, &names).unwrap();
    AppState::new(conn, "/api")
}

fn body(reply: &ApiReply) -> &Envelope {
    reply.body.as_ref().expect("reply should carry an envelope")
}

async fn create(state: &AppState, name: &str) -> i64 {
    let reply = contacts::create_contact(
        State(state.clone()),
        Ok(Json(ContactInput::named(name))),
    )
    .await;
    assert_eq!(reply.status, StatusCode::CREATED);
    body(&reply).data.as_ref().unwrap()["id"].as_i64().unwrap()
}

async fn add(state: &AppState, fund_id: i64, contact_id: i64) -> ApiReply {
    funds::add_contact_to_fund(
        State(state.clone()),
        Ok(Path(fund_id)),
        Ok(Json(AddContactToFundRequest { contact_id })),
    )
    .await
}

#[tokio::test]
async fn create_contact_then_add_to_missing_fund_fails() {
    let state = state_with_funds(&[]);
    let input = serde_json::from_value::<ContactInput>(json!({"Name": "Ann"})).unwrap();

    let reply = contacts::create_contact(State(state.clone()), Ok(Json(input))).await;

    assert_eq!(reply.status, StatusCode::CREATED);
    assert_eq!(reply.location.as_deref(), Some("/api/contacts/1"));
    let envelope = body(&reply);
    assert_eq!(envelope.status, EnvelopeStatus::Success);
    assert_eq!(envelope.message.as_deref(), Some("Contact created successfully."));
    assert_eq!(envelope.data.as_ref().unwrap()["id"], json!(1));
    assert_eq!(envelope.data.as_ref().unwrap()["fundId"], json!(null));

    let reply = add(&state, 1, 1).await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(body(&reply).status, EnvelopeStatus::Fail);
    assert_eq!(body(&reply).message.as_deref(), Some("Fund not found."));
}

#[tokio::test]
async fn update_keeps_fund_membership() {
    let state = state_with_funds(&["Growth"]);
    let id = create(&state, "Ann").await;
    assert_eq!(add(&state, 1, id).await.status, StatusCode::OK);

    let reply = contacts::update_contact(
        State(state.clone()),
        Ok(Path(id)),
        Ok(Json(ContactInput::named("Ann Lee").with_email("ann@example.com"))),
    )
    .await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(body(&reply).message.as_deref(), Some("Contact updated successfully."));

    let reply = contacts::get_contact(State(state.clone()), Ok(Path(id))).await;
    let data = body(&reply).data.clone().unwrap();
    assert_eq!(data["name"], json!("Ann Lee"));
    assert_eq!(data["email"], json!("ann@example.com"));
    assert_eq!(data["fundId"], json!(1));
}

#[tokio::test]
async fn invalid_contact_reports_every_rule() {
    let state = state_with_funds(&[]);

    let reply = contacts::create_contact(
        State(state.clone()),
        Ok(Json(ContactInput::named(" ").with_phone("call me"))),
    )
    .await;

    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.location, None);
    let envelope = body(&reply);
    assert_eq!(envelope.message.as_deref(), Some("Validation failed"));
    assert_eq!(
        envelope.errors,
        vec![
            "Name is required".to_string(),
            "A valid phone number is required".to_string(),
        ]
    );
}

#[tokio::test]
async fn missing_contact_is_a_client_failure() {
    let state = state_with_funds(&[]);

    for reply in [
        contacts::get_contact(State(state.clone()), Ok(Path(42))).await,
        contacts::delete_contact(State(state.clone()), Ok(Path(42))).await,
    ] {
        assert_eq!(reply.status, StatusCode::BAD_REQUEST);
        assert_eq!(body(&reply).message.as_deref(), Some("Contact not found."));
    }
}

#[tokio::test]
async fn assigned_contact_cannot_be_deleted_until_removed() {
    let state = state_with_funds(&["Growth"]);
    let id = create(&state, "Ann").await;
    add(&state, 1, id).await;

    let reply = contacts::delete_contact(State(state.clone()), Ok(Path(id))).await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body(&reply).message.as_deref(),
        Some("Cannot delete contact assigned to a fund.")
    );

    let reply = funds::remove_contact_from_fund(State(state.clone()), Ok(Path((1, id)))).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(
        body(&reply).message.as_deref(),
        Some("Contact removed from fund successfully.")
    );
    assert_eq!(body(&reply).data, None);

    let reply = contacts::delete_contact(State(state.clone()), Ok(Path(id))).await;
    assert_eq!(reply.status, StatusCode::NO_CONTENT);
    assert!(reply.body.is_none());

    let reply = contacts::list_contacts(State(state.clone())).await;
    assert_eq!(body(&reply).data, Some(json!([])));
}

#[tokio::test]
async fn membership_rules_reject_repeat_and_cross_fund_moves() {
    let state = state_with_funds(&["Growth", "Income"]);
    let id = create(&state, "Ann").await;
    assert_eq!(add(&state, 1, id).await.status, StatusCode::OK);

    let reply = add(&state, 1, id).await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body(&reply).message.as_deref(),
        Some("Contact is already assigned to this fund.")
    );

    let reply = add(&state, 2, id).await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body(&reply).message.as_deref(),
        Some("Contact is already assigned to another fund.")
    );

    let reply = funds::remove_contact_from_fund(State(state.clone()), Ok(Path((2, id)))).await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body(&reply).message.as_deref(),
        Some("Failed to remove contact from fund. The contact may not be assigned to this fund.")
    );

    let reply = funds::get_fund(State(state.clone()), Ok(Path(1))).await;
    let data = body(&reply).data.clone().unwrap();
    assert_eq!(data["name"], json!("Growth"));
    assert_eq!(data["contacts"][0]["id"], json!(id));

    let reply = funds::get_fund(State(state.clone()), Ok(Path(2))).await;
    assert_eq!(body(&reply).data.as_ref().unwrap()["contacts"], json!([]));
}

#[tokio::test]
async fn add_request_validation_runs_before_the_store() {
    let state = state_with_funds(&[]);

    let reply = add(&state, 99, 0).await;

    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    let envelope = body(&reply);
    assert_eq!(envelope.message.as_deref(), Some("Validation failed"));
    assert_eq!(
        envelope.errors,
        vec![
            "ContactId is required".to_string(),
            "ContactId must be greater than 0".to_string(),
        ]
    );
}

#[tokio::test]
async fn list_funds_returns_ids_and_names() {
    let state = state_with_funds(&["Growth", "Income"]);

    let reply = funds::list_funds(State(state)).await;

    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(
        body(&reply).data,
        Some(json!([
            {"id": 1, "name": "Growth"},
            {"id": 2, "name": "Income"}
        ]))
    );
}

#[tokio::test]
async fn store_failure_is_a_server_error() {
    let state = state_with_funds(&[]);
    state.with_store(|conn| {
        conn.execute_batch("DROP TABLE contacts;").unwrap();
        ApiReply::no_content()
    });

    let reply = contacts::list_contacts(State(state)).await;

    assert_eq!(reply.status, StatusCode::INTERNAL_SERVER_ERROR);
    let envelope = body(&reply);
    assert_eq!(envelope.status, EnvelopeStatus::Error);
    assert_eq!(
        envelope.message.as_deref(),
        Some("An error occurred while retrieving contacts.")
    );
    assert_eq!(envelope.errors.len(), 1);
    assert!(envelope.errors[0].contains("no such table"));
}

#[tokio::test]
async fn unknown_route_is_404_fail() {
    let reply = not_found().await;

    assert_eq!(reply.status, StatusCode::NOT_FOUND);
    assert_eq!(body(&reply).status, EnvelopeStatus::Fail);
    assert_eq!(body(&reply).message.as_deref(), Some("Resource not found"));
}
