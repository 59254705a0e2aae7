// SPDX-License-Identifier: Apache-2.0

//! Conversion from issuerank-core errors to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use issuerank_core::IssueRankError;
use serde_json::json;
use tracing::{error, warn};

/// An error rendered as `{"detail": "..."}` with a matching status code.
#[derive(Debug)]
pub struct ApiError(pub IssueRankError);

impl From<IssueRankError> for ApiError {
    fn from(err: IssueRankError) -> Self {
        Self(err)
    }
}

/// Maps an error variant to its HTTP status.
///
/// - `NotFound` -> 404
/// - `Forbidden` -> 403
/// - `Upstream` -> the upstream status when it is a 4xx/5xx, else 502
/// - `Validation` -> 422
/// - `Config` -> 500
#[must_use]
pub fn status_for(err: &IssueRankError) -> StatusCode {
    match err {
        IssueRankError::NotFound { .. } => StatusCode::NOT_FOUND,
        IssueRankError::Forbidden { .. } => StatusCode::FORBIDDEN,
        IssueRankError::Upstream { status, .. } => StatusCode::from_u16(*status)
            .ok()
            .filter(|s| s.is_client_error() || s.is_server_error())
            .unwrap_or(StatusCode::BAD_GATEWAY),
        IssueRankError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        IssueRankError::Config { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(&self.0);
        if status.is_server_error() {
            error!(status = status.as_u16(), error = %self.0, "Request failed");
        } else {
            warn!(status = status.as_u16(), error = %self.0, "Request rejected");
        }
        (status, Json(json!({ "detail": self.0.to_string() }))).into_response()
    }
}
