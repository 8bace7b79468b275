// SPDX-License-Identifier: Apache-2.0

//! Shared pieces of the response contract: request ids, the success and
//! error envelopes, ETag handling and bearer identity resolution.

use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use glentrail_api::{api_error_for_store, http_status, ApiError, API_VERSION};
use glentrail_core::canonical::stable_json_hash_hex;
use glentrail_model::User;
use glentrail_store::StoreError;
use serde::Serialize;
use serde_json::json;

use crate::state::AppState;

pub(crate) fn propagated_request_id(headers: &HeaderMap, state: &AppState) -> String {
    if let Some(raw) = headers.get("x-request-id").and_then(|v| v.to_str().ok()) {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }
    state.next_request_id()
}

pub(crate) fn with_request_id(mut response: Response, request_id: &str) -> Response {
    if let Ok(v) = HeaderValue::from_str(request_id) {
        response.headers_mut().insert("x-request-id", v);
    }
    response
}

pub(crate) fn json_response<T: Serialize>(
    status: StatusCode,
    request_id: &str,
    data: &T,
) -> Response {
    let body = Json(json!({"api_version": API_VERSION, "data": data}));
    with_request_id((status, body).into_response(), request_id)
}

pub(crate) fn api_error_response(err: ApiError, request_id: &str) -> Response {
    let status = StatusCode::from_u16(http_status(err.code))
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let body = Json(json!({"error": err.with_request_id(request_id)}));
    with_request_id((status, body).into_response(), request_id)
}

pub(crate) fn store_error_response(err: &StoreError, request_id: &str) -> Response {
    api_error_response(api_error_for_store(err), request_id)
}

pub(crate) fn if_none_match(headers: &HeaderMap) -> Option<String> {
    headers
        .get("if-none-match")
        .and_then(|v| v.to_str().ok())
        .map(std::string::ToString::to_string)
}

/// Strong ETag over the canonical JSON bytes of the payload.
pub(crate) fn etag_for<T: Serialize>(data: &T) -> Result<String, ApiError> {
    let hash = stable_json_hash_hex(data)
        .map_err(|e| ApiError::internal(format!("canonical hash failed: {e}")))?;
    Ok(format!("\"{hash}\""))
}

pub(crate) fn put_etag(response: &mut Response, etag: &str) {
    if let Ok(v) = HeaderValue::from_str(etag) {
        response.headers_mut().insert("etag", v);
    }
}

fn bearer_external_id(headers: &HeaderMap) -> Option<String> {
    let raw = headers.get("authorization")?.to_str().ok()?;
    let token = raw.strip_prefix("Bearer ").or_else(|| raw.strip_prefix("bearer "))?;
    let trimmed = token.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Maps the bearer token to a user record. The token is the already-verified
/// external identity subject; an unknown subject is indistinguishable from a
/// missing one on the wire.
pub(crate) async fn resolve_user(state: &AppState, headers: &HeaderMap) -> Result<User, ApiError> {
    let Some(external_id) = bearer_external_id(headers) else {
        return Err(ApiError::not_authenticated());
    };
    let found = state
        .with_store(move |store| store.user_by_external_id(&external_id))
        .await
        .map_err(|e| api_error_for_store(&e))?;
    found.ok_or_else(ApiError::not_authenticated)
}
