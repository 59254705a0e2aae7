// SPDX-License-Identifier: Apache-2.0

//! Request handlers.

use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use http::header::CACHE_CONTROL;
use issuerank_core::{IssueRankError, ListOptions};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::AppState;
use crate::error::ApiError;

/// Raw query parameters of the listing endpoint.
///
/// Kept as strings so that every value is checked by
/// [`ListOptions::from_params`] and reported as one validation error.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    sort_by: Option<String>,
    direction: Option<String>,
    limit: Option<String>,
    offset: Option<String>,
}

/// `GET /health`
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// `GET /repos/{owner}/{repo}/issues`
pub async fn list_issues(
    State(state): State<AppState>,
    Path((owner, repo)): Path<(String, String)>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(params) = params.map_err(|e| IssueRankError::validation(e.body_text()))?;
    let options = ListOptions::from_params(
        params.sort_by.as_deref(),
        params.direction.as_deref(),
        params.limit.as_deref(),
        params.offset.as_deref(),
    )?;

    let page = state.service.list_issues(&owner, &repo, &options).await?;

    Ok(([(CACHE_CONTROL, state.cache_control.clone())], Json(page)).into_response())
}

/// Fallback for unknown routes.
pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(json!({ "detail": "Not Found" })))
}
