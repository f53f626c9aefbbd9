//! Uniform response envelope and HTTP reply mapping.
//!
//! # Responsibility
//! - Define the `{status, data, message, errors}` wire shape every endpoint
//!   returns.
//! - Map service outcomes to HTTP status codes.
//!
//! # Invariants
//! - Client-class failures are `400` with status `fail`.
//! - Server-class failures are `500` with status `error` and at most one
//!   sanitized cause line in `errors`.
//! - `204` replies carry no body.

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use fundbook_core::{sanitize_message, FailureClass, ServiceError};
use log::{error, info, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;

const MAX_CAUSE_CHARS: usize = 200;

/// Envelope status tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvelopeStatus {
    Success,
    /// Caller-fixable problem.
    Fail,
    /// Unexpected server-side problem.
    Error,
}

/// Response body shared by every endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub status: EnvelopeStatus,
    pub data: Option<Value>,
    pub message: Option<String>,
    #[serde(default)]
    pub errors: Vec<String>,
}

impl Envelope {
    pub fn success(data: Option<Value>, message: impl Into<String>) -> Self {
        Self {
            status: EnvelopeStatus::Success,
            data,
            message: Some(message.into()),
            errors: Vec::new(),
        }
    }

    pub fn fail(message: impl Into<String>, errors: Vec<String>) -> Self {
        Self {
            status: EnvelopeStatus::Fail,
            data: None,
            message: Some(message.into()),
            errors,
        }
    }

    pub fn error(message: impl Into<String>, errors: Vec<String>) -> Self {
        Self {
            status: EnvelopeStatus::Error,
            data: None,
            message: Some(message.into()),
            errors,
        }
    }
}

/// Handler outcome: HTTP status, optional `Location`, optional envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiReply {
    pub status: StatusCode,
    pub location: Option<String>,
    pub body: Option<Envelope>,
}

impl ApiReply {
    /// `200` with a serialized payload.
    pub fn ok<T: Serialize>(data: &T, message: &str) -> Self {
        match serde_json::to_value(data) {
            Ok(value) => Self::with_body(StatusCode::OK, Envelope::success(Some(value), message)),
            Err(err) => Self::internal("An error occurred while processing your request", &err),
        }
    }

    /// `200` with `data: null`.
    pub fn ok_without_data(message: &str) -> Self {
        Self::with_body(StatusCode::OK, Envelope::success(None, message))
    }

    /// `201` with a `Location` header pointing at the new resource.
    pub fn created<T: Serialize>(location: String, data: &T, message: &str) -> Self {
        let mut reply = Self::ok(data, message);
        if reply.status == StatusCode::OK {
            reply.status = StatusCode::CREATED;
            reply.location = Some(location);
        }
        reply
    }

    pub fn no_content() -> Self {
        Self {
            status: StatusCode::NO_CONTENT,
            location: None,
            body: None,
        }
    }

    /// `400` fail envelope.
    pub fn bad_request(message: &str, errors: Vec<String>) -> Self {
        Self::with_body(StatusCode::BAD_REQUEST, Envelope::fail(message, errors))
    }

    pub fn not_found(message: &str) -> Self {
        Self::with_body(StatusCode::NOT_FOUND, Envelope::fail(message, Vec::new()))
    }

    /// `500` error envelope with a single sanitized cause line.
    pub fn internal(message: &str, cause: &dyn std::fmt::Display) -> Self {
        let cause = sanitize_message(&cause.to_string(), MAX_CAUSE_CHARS);
        Self::with_body(
            StatusCode::INTERNAL_SERVER_ERROR,
            Envelope::error(message, vec![cause]),
        )
    }

    pub fn from_service_error(err: &ServiceError) -> Self {
        match err.class() {
            FailureClass::Client => Self::bad_request(&err.message(), err.details()),
            FailureClass::Server => Self::with_body(
                StatusCode::INTERNAL_SERVER_ERROR,
                Envelope::error(err.message(), err.details()),
            ),
        }
    }

    /// Records the outcome of `event` and passes the reply through.
    pub fn logged(self, event: &str) -> Self {
        let code = self.status.as_u16();
        let message = self
            .body
            .as_ref()
            .and_then(|body| body.message.as_deref())
            .unwrap_or("");
        if self.status.is_server_error() {
            error!("event={event} module=api status=error http_status={code} message=\"{message}\"");
        } else if self.status.is_client_error() {
            warn!("event={event} module=api status=rejected http_status={code} message=\"{message}\"");
        } else {
            info!("event={event} module=api status=ok http_status={code}");
        }
        self
    }

    fn with_body(status: StatusCode, body: Envelope) -> Self {
        Self {
            status,
            location: None,
            body: Some(body),
        }
    }
}

impl IntoResponse for ApiReply {
    fn into_response(self) -> Response {
        let mut response = match self.body {
            Some(body) => (self.status, Json(body)).into_response(),
            None => self.status.into_response(),
        };
        if let Some(location) = self.location {
            if let Ok(value) = HeaderValue::from_str(&location) {
                response.headers_mut().insert(header::LOCATION, value);
            }
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::{ApiReply, Envelope, EnvelopeStatus};
    use axum::http::StatusCode;
    use fundbook_core::{BusinessRule, EntityKind, ServiceError};
    use serde_json::json;

    #[test]
    fn envelope_serializes_lowercase_status_and_null_data() {
        let value = serde_json::to_value(Envelope::fail("Validation failed", vec![])).unwrap();
        assert_eq!(
            value,
            json!({
                "status": "fail",
                "data": null,
                "message": "Validation failed",
                "errors": []
            })
        );
    }

    #[test]
    fn client_class_errors_map_to_400_fail() {
        for err in [
            ServiceError::NotFound {
                entity: EntityKind::Contact,
                id: 3,
            },
            ServiceError::BusinessRule(BusinessRule::ContactAssignedToFund),
            ServiceError::Validation(vec!["Name is required".to_string()]),
        ] {
            let reply = ApiReply::from_service_error(&err);
            assert_eq!(reply.status, StatusCode::BAD_REQUEST);
            let body = reply.body.unwrap();
            assert_eq!(body.status, EnvelopeStatus::Fail);
            assert_eq!(body.message.as_deref(), Some(err.message().as_str()));
        }
    }

    #[test]
    fn server_class_errors_map_to_500_error() {
        let err = ServiceError::Unexpected {
            operation: "retrieving funds",
            cause: "no such table: funds".to_string(),
        };
        let reply = ApiReply::from_service_error(&err);

        assert_eq!(reply.status, StatusCode::INTERNAL_SERVER_ERROR);
        let body = reply.body.unwrap();
        assert_eq!(body.status, EnvelopeStatus::Error);
        assert_eq!(
            body.message.as_deref(),
            Some("An error occurred while retrieving funds.")
        );
        assert_eq!(body.errors, vec!["no such table: funds".to_string()]);
    }

    #[test]
    fn created_sets_location_and_no_content_has_no_body() {
        let reply = ApiReply::created("/api/contacts/1".to_string(), &json!({"id": 1}), "ok");
        assert_eq!(reply.status, StatusCode::CREATED);
        assert_eq!(reply.location.as_deref(), Some("/api/contacts/1"));

        let reply = ApiReply::no_content();
        assert_eq!(reply.status, StatusCode::NO_CONTENT);
        assert!(reply.body.is_none());
    }
}
