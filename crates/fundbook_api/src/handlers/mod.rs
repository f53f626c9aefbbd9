//! HTTP handlers: extract, call one service operation, map to `ApiReply`.
//!
//! Malformed bodies and route parameters are answered here with `400` fail
//! envelopes before any service is called.

use crate::envelope::ApiReply;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::Path;
use axum::Json;
use fundbook_core::ServiceResult;
use serde::Serialize;

pub mod contacts;
pub mod funds;

pub(crate) fn path_param<T>(param: Result<Path<T>, PathRejection>) -> Result<T, ApiReply> {
    param.map(|Path(value)| value).map_err(|rejection| {
        ApiReply::bad_request("Invalid route parameter", vec![rejection.body_text()])
    })
}

pub(crate) fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, ApiReply> {
    body.map(|Json(value)| value).map_err(|rejection| {
        ApiReply::bad_request(
            "Invalid JSON format",
            vec![format!(
                "The request contains malformed JSON: {}",
                rejection.body_text()
            )],
        )
    })
}

pub(crate) fn reply_with<T: Serialize>(result: ServiceResult<T>, message: &str) -> ApiReply {
    match result {
        Ok(data) => ApiReply::ok(&data, message),
        Err(err) => ApiReply::from_service_error(&err),
    }
}

/// Fallback for unknown routes.
pub async fn not_found() -> ApiReply {
    ApiReply::not_found("Resource not found").logged("route_not_found")
}
