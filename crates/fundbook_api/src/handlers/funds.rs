//! Fund and fund-membership endpoints.

use crate::envelope::ApiReply;
use crate::handlers::{json_body, path_param, reply_with};
use crate::state::AppState;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::Json;
use fundbook_core::{
    ContactId, FundId, FundService, SqliteContactRepository, SqliteFundRepository,
};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

/// Body of `POST /funds/{fundId}/contacts`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddContactToFundRequest {
    /// Missing on the wire reads as `0` and fails validation.
    #[serde(default, alias = "ContactId")]
    pub contact_id: ContactId,
}

impl AddContactToFundRequest {
    /// Returns every failed rule message; empty when valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.contact_id == 0 {
            errors.push("ContactId is required".to_string());
        }
        if self.contact_id <= 0 {
            errors.push("ContactId must be greater than 0".to_string());
        }
        errors
    }
}

fn service(
    conn: &Connection,
) -> FundService<SqliteFundRepository<'_>, SqliteContactRepository<'_>> {
    FundService::new(
        SqliteFundRepository::new(conn),
        SqliteContactRepository::new(conn),
    )
}

/// `GET /funds`: ids and names only.
pub async fn list_funds(State(state): State<AppState>) -> ApiReply {
    state
        .with_store(|conn| reply_with(service(conn).list_funds(), "Funds retrieved successfully."))
        .logged("fund_list")
}

/// `GET /funds/{id}`, with current members.
pub async fn get_fund(
    State(state): State<AppState>,
    id: Result<Path<FundId>, PathRejection>,
) -> ApiReply {
    let id = match path_param(id) {
        Ok(id) => id,
        Err(reply) => return reply.logged("fund_get"),
    };
    state
        .with_store(|conn| reply_with(service(conn).get_fund(id), "Fund retrieved successfully."))
        .logged("fund_get")
}

/// `POST /funds/{fundId}/contacts`
pub async fn add_contact_to_fund(
    State(state): State<AppState>,
    fund_id: Result<Path<FundId>, PathRejection>,
    body: Result<Json<AddContactToFundRequest>, JsonRejection>,
) -> ApiReply {
    let (fund_id, request) = match (path_param(fund_id), json_body(body)) {
        (Ok(fund_id), Ok(request)) => (fund_id, request),
        (Err(reply), _) | (_, Err(reply)) => return reply.logged("fund_add_contact"),
    };

    let errors = request.validate();
    if !errors.is_empty() {
        return ApiReply::bad_request("Validation failed", errors).logged("fund_add_contact");
    }

    state
        .with_store(
            |conn| match service(conn).add_contact_to_fund(fund_id, request.contact_id) {
                Ok(()) => ApiReply::ok_without_data("Contact added to fund successfully."),
                Err(err) => ApiReply::from_service_error(&err),
            },
        )
        .logged("fund_add_contact")
}

/// `DELETE /funds/{fundId}/contacts/{contactId}`
pub async fn remove_contact_from_fund(
    State(state): State<AppState>,
    ids: Result<Path<(FundId, ContactId)>, PathRejection>,
) -> ApiReply {
    let (fund_id, contact_id) = match path_param(ids) {
        Ok(ids) => ids,
        Err(reply) => return reply.logged("fund_remove_contact"),
    };
    state
        .with_store(
            |conn| match service(conn).remove_contact_from_fund(fund_id, contact_id) {
                Ok(()) => ApiReply::ok_without_data("Contact removed from fund successfully."),
                Err(err) => ApiReply::from_service_error(&err),
            },
        )
        .logged("fund_remove_contact")
}

#[cfg(test)]
mod tests {
    use super::AddContactToFundRequest;

    #[test]
    fn zero_contact_id_reports_both_rules() {
        let request: AddContactToFundRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(
            request.validate(),
            vec![
                "ContactId is required".to_string(),
                "ContactId must be greater than 0".to_string(),
            ]
        );
    }

    #[test]
    fn negative_contact_id_reports_range_rule_only() {
        let request: AddContactToFundRequest =
            serde_json::from_str(r#"{"ContactId": -4}"#).unwrap();
        assert_eq!(
            request.validate(),
            vec!["ContactId must be greater than 0".to_string()]
        );
    }

    #[test]
    fn camel_case_key_is_accepted() {
        let request: AddContactToFundRequest =
            serde_json::from_str(r#"{"contactId": 7}"#).unwrap();
        assert!(request.validate().is_empty());
    }
}
