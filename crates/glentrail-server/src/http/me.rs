// SPDX-License-Identifier: Apache-2.0

//! Endpoints under `/v1/me`. Every handler resolves the bearer identity
//! first; the caller is the implicit subject of every query here.

use std::collections::BTreeMap;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::Response;
use glentrail_api::convert::{achievements_dto, activity_dto, history_entry_dto, user_dto};
use glentrail_api::dto::LikedDto;
use glentrail_api::{parse_activity_range, parse_list_limit, parse_offset, ApiError};
use glentrail_core::time::now_ms;
use glentrail_model::{LikeTargetType, UserStats};

use crate::http::support::{
    api_error_response, json_response, propagated_request_id, resolve_user, store_error_response,
};
use crate::state::AppState;

pub(crate) async fn me_handler(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let request_id = propagated_request_id(&headers, &state);
    match resolve_user(&state, &headers).await {
        Ok(user) => json_response(StatusCode::OK, &request_id, &user_dto(&user)),
        Err(err) => api_error_response(err, &request_id),
    }
}

pub(crate) async fn me_stats_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Response {
    let request_id = propagated_request_id(&headers, &state);
    let user = match resolve_user(&state, &headers).await {
        Ok(user) => user,
        Err(err) => return api_error_response(err, &request_id),
    };
    let subject = user.id;
    match state
        .with_store(move |store| store.stats_for_user(subject))
        .await
    {
        Ok(stats) => {
            let stats = stats.unwrap_or_else(|| UserStats::empty(subject));
            json_response(StatusCode::OK, &request_id, &stats)
        }
        Err(e) => store_error_response(&e, &request_id),
    }
}

pub(crate) async fn me_achievements_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Response {
    let request_id = propagated_request_id(&headers, &state);
    let user = match resolve_user(&state, &headers).await {
        Ok(user) => user,
        Err(err) => return api_error_response(err, &request_id),
    };
    let subject = user.id;
    match state
        .with_store(move |store| store.stats_for_user(subject))
        .await
    {
        Ok(stats) => {
            let stats = stats.unwrap_or_else(|| UserStats::empty(subject));
            json_response(StatusCode::OK, &request_id, &achievements_dto(&stats))
        }
        Err(e) => store_error_response(&e, &request_id),
    }
}

pub(crate) async fn me_activity_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<BTreeMap<String, String>>,
) -> Response {
    let request_id = propagated_request_id(&headers, &state);
    let user = match resolve_user(&state, &headers).await {
        Ok(user) => user,
        Err(err) => return api_error_response(err, &request_id),
    };
    let range = match parse_activity_range(&params) {
        Ok(range) => range,
        Err(err) => return api_error_response(err, &request_id),
    };
    let now = now_ms();
    let since = now - range.window_ms();
    let subject = user.id;
    match state
        .with_store(move |store| store.activity_samples(subject, since))
        .await
    {
        Ok(samples) => {
            json_response(StatusCode::OK, &request_id, &activity_dto(range, &samples, now))
        }
        Err(e) => store_error_response(&e, &request_id),
    }
}

pub(crate) async fn me_history_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<BTreeMap<String, String>>,
) -> Response {
    let request_id = propagated_request_id(&headers, &state);
    let user = match resolve_user(&state, &headers).await {
        Ok(user) => user,
        Err(err) => return api_error_response(err, &request_id),
    };
    let limit = match parse_list_limit(&params) {
        Ok(limit) => limit,
        Err(err) => return api_error_response(err, &request_id),
    };
    let offset = match parse_offset(&params) {
        Ok(offset) => offset,
        Err(err) => return api_error_response(err, &request_id),
    };
    let subject = user.id;
    match state
        .with_store(move |store| store.history_for_user(subject, limit, offset))
        .await
    {
        Ok(items) => {
            let dtos: Vec<_> = items
                .iter()
                .map(|item| history_entry_dto(item, &user))
                .collect();
            json_response(StatusCode::OK, &request_id, &dtos)
        }
        Err(e) => store_error_response(&e, &request_id),
    }
}

pub(crate) async fn me_likes_target_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((target_type, raw_target_id)): Path<(String, String)>,
) -> Response {
    let request_id = propagated_request_id(&headers, &state);
    let user = match resolve_user(&state, &headers).await {
        Ok(user) => user,
        Err(err) => return api_error_response(err, &request_id),
    };
    let target = match LikeTargetType::parse(&target_type) {
        Ok(target) => target,
        Err(_) => {
            return api_error_response(
                ApiError::invalid_param("target_type", &target_type),
                &request_id,
            )
        }
    };
    let target_id = match raw_target_id.parse::<i64>() {
        Ok(id) if id > 0 => id,
        _ => {
            return api_error_response(
                ApiError::invalid_param("target_id", &raw_target_id),
                &request_id,
            )
        }
    };
    let subject = user.id;
    match state
        .with_store(move |store| store.user_likes_target(subject, target, target_id))
        .await
    {
        Ok(like) => json_response(
            StatusCode::OK,
            &request_id,
            &LikedDto {
                liked: like.is_some(),
            },
        ),
        Err(e) => store_error_response(&e, &request_id),
    }
}
