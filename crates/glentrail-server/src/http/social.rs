// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::Response;
use axum::Json;
use glentrail_api::convert::{completion_outcome_dto, likes_dto};
use glentrail_api::dto::{LikeToggleBody, LikeToggleDto};
use glentrail_api::{parse_like_target, parse_list_limit, ApiError};
use glentrail_model::CompletionInput;
use tracing::info;

use crate::http::support::{
    api_error_response, json_response, propagated_request_id, resolve_user, store_error_response,
};
use crate::state::AppState;

pub(crate) async fn list_likes_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<BTreeMap<String, String>>,
) -> Response {
    let request_id = propagated_request_id(&headers, &state);
    let (target_type, target_id) = match parse_like_target(&params) {
        Ok(target) => target,
        Err(err) => return api_error_response(err, &request_id),
    };
    let limit = match parse_list_limit(&params) {
        Ok(limit) => limit,
        Err(err) => return api_error_response(err, &request_id),
    };
    let fetched = state
        .with_store(move |store| {
            let entries = store.likes_for_target(target_type, target_id, limit)?;
            let count = store.like_count(target_type, target_id)?;
            Ok((count, entries))
        })
        .await;
    match fetched {
        Ok((count, entries)) => {
            json_response(StatusCode::OK, &request_id, &likes_dto(count, &entries))
        }
        Err(e) => store_error_response(&e, &request_id),
    }
}

pub(crate) async fn toggle_like_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<LikeToggleBody>, JsonRejection>,
) -> Response {
    let request_id = propagated_request_id(&headers, &state);
    let user = match resolve_user(&state, &headers).await {
        Ok(user) => user,
        Err(err) => return api_error_response(err, &request_id),
    };
    let Json(body) = match body {
        Ok(json) => json,
        Err(rejection) => {
            return api_error_response(ApiError::validation(rejection.body_text()), &request_id)
        }
    };
    let acting = user.id;
    let toggled = state
        .with_store(move |store| store.toggle_like(acting, body.target_type, body.target_id))
        .await;
    match toggled {
        Ok(outcome) => {
            info!(
                request_id = %request_id,
                user_id = acting.get(),
                liked = outcome.liked,
                "like toggled"
            );
            let dto = LikeToggleDto {
                liked: outcome.liked,
                like_count: outcome.like_count,
            };
            json_response(StatusCode::OK, &request_id, &dto)
        }
        Err(e) => store_error_response(&e, &request_id),
    }
}

pub(crate) async fn log_completion_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<CompletionInput>, JsonRejection>,
) -> Response {
    let request_id = propagated_request_id(&headers, &state);
    let user = match resolve_user(&state, &headers).await {
        Ok(user) => user,
        Err(err) => return api_error_response(err, &request_id),
    };
    let Json(input) = match body {
        Ok(json) => json,
        Err(rejection) => {
            return api_error_response(ApiError::validation(rejection.body_text()), &request_id)
        }
    };
    let acting = user.id;
    let logged = state
        .with_store(move |store| store.log_completion(acting, &input))
        .await;
    match logged {
        Ok(outcome) => {
            info!(
                request_id = %request_id,
                user_id = acting.get(),
                walk_id = outcome.completion.walk_id.get(),
                newly_earned = outcome.newly_earned.len(),
                "completion logged"
            );
            json_response(
                StatusCode::CREATED,
                &request_id,
                &completion_outcome_dto(&outcome),
            )
        }
        Err(e) => store_error_response(&e, &request_id),
    }
}
