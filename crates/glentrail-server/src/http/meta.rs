// SPDX-License-Identifier: Apache-2.0

use axum::extract::State;
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use glentrail_api::{openapi_v1_spec, API_VERSION};
use serde_json::json;

use crate::http::support::{propagated_request_id, with_request_id};
use crate::state::AppState;

pub(crate) async fn index_handler(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let request_id = propagated_request_id(&headers, &state);
    let body = Json(json!({
        "service": "glentrail",
        "api_version": API_VERSION,
        "openapi": "/v1/openapi.json",
        "health": "/healthz",
    }));
    with_request_id(body.into_response(), &request_id)
}

pub(crate) async fn healthz_handler() -> &'static str {
    "ok"
}

/// Ready once the schema is reachable. A store that cannot answer the
/// version probe reports 503 so the pod is pulled from rotation.
pub(crate) async fn readyz_handler(State(state): State<AppState>) -> Response {
    match state.with_store(|store| store.schema_version()).await {
        Ok(_) => (StatusCode::OK, "ready").into_response(),
        Err(_) => (StatusCode::SERVICE_UNAVAILABLE, "not-ready").into_response(),
    }
}

pub(crate) async fn version_handler(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let request_id = propagated_request_id(&headers, &state);
    let schema_version = state
        .with_store(|store| store.schema_version())
        .await
        .unwrap_or_else(|_| "unavailable".to_string());
    let body = Json(json!({
        "name": "glentrail",
        "version": env!("CARGO_PKG_VERSION"),
        "api_version": API_VERSION,
        "schema_version": schema_version,
    }));
    let mut resp = body.into_response();
    resp.headers_mut()
        .insert("cache-control", HeaderValue::from_static("no-cache"));
    with_request_id(resp, &request_id)
}

pub(crate) async fn openapi_handler(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let request_id = propagated_request_id(&headers, &state);
    let mut resp = Json(openapi_v1_spec()).into_response();
    resp.headers_mut()
        .insert("cache-control", HeaderValue::from_static("public, max-age=300"));
    with_request_id(resp, &request_id)
}
