// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use glentrail_api::convert::{report_dto, stage_dto, walk_detail_dto, walk_page_dto};
use glentrail_api::dto::{CreateWalkBody, ViewDto, WalkCountDto};
use glentrail_api::{parse_list_limit, parse_walk_query_params, ApiError};
use glentrail_model::WalkId;
use glentrail_query::{count_matching, run_query};
use glentrail_store::StoreError;
use tracing::info;

use crate::http::support::{
    api_error_response, etag_for, if_none_match, json_response, propagated_request_id, put_etag,
    resolve_user, store_error_response, with_request_id,
};
use crate::state::AppState;

pub(crate) async fn list_walks_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<BTreeMap<String, String>>,
) -> Response {
    let request_id = propagated_request_id(&headers, &state);
    let req = match parse_walk_query_params(&params, &state.config.limits) {
        Ok(req) => req,
        Err(err) => return api_error_response(err, &request_id),
    };
    let fetched = state
        .with_store(|store| Ok((store.published_walks()?, store.all_regions()?)))
        .await;
    let (walks, regions) = match fetched {
        Ok(pair) => pair,
        Err(e) => return store_error_response(&e, &request_id),
    };
    let resp = match run_query(&walks, &regions, &req, &state.config.limits) {
        Ok(resp) => resp,
        Err(e) => return api_error_response(ApiError::validation(e.to_string()), &request_id),
    };
    let page = match walk_page_dto(&resp, &regions) {
        Ok(page) => page,
        Err(err) => return api_error_response(err, &request_id),
    };
    let etag = match etag_for(&page) {
        Ok(etag) => etag,
        Err(err) => return api_error_response(err, &request_id),
    };
    if if_none_match(&headers).as_deref() == Some(etag.as_str()) {
        let mut resp = StatusCode::NOT_MODIFIED.into_response();
        put_etag(&mut resp, &etag);
        return with_request_id(resp, &request_id);
    }
    let mut resp = json_response(StatusCode::OK, &request_id, &page);
    put_etag(&mut resp, &etag);
    resp
}

pub(crate) async fn count_walks_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<BTreeMap<String, String>>,
) -> Response {
    let request_id = propagated_request_id(&headers, &state);
    let req = match parse_walk_query_params(&params, &state.config.limits) {
        Ok(req) => req,
        Err(err) => return api_error_response(err, &request_id),
    };
    let fetched = state
        .with_store(|store| Ok((store.published_walks()?, store.all_regions()?)))
        .await;
    let (walks, regions) = match fetched {
        Ok(pair) => pair,
        Err(e) => return store_error_response(&e, &request_id),
    };
    let total = count_matching(&walks, &regions, &req.filter);
    json_response(StatusCode::OK, &request_id, &WalkCountDto { total })
}

pub(crate) async fn walk_detail_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(slug): Path<String>,
) -> Response {
    let request_id = propagated_request_id(&headers, &state);
    let lookup = slug.clone();
    let fetched = state
        .with_store(move |store| {
            let Some(walk) = store.walk_by_slug_published(&lookup)? else {
                return Ok(None);
            };
            let region = store.region_by_id(walk.region_id)?.ok_or_else(|| {
                StoreError::Internal(format!("walk {} references missing region", walk.id.get()))
            })?;
            let author = store.user_by_id(walk.author_id)?.ok_or_else(|| {
                StoreError::Internal(format!("walk {} references missing author", walk.id.get()))
            })?;
            let stages = store.stages_for_walk(walk.id)?;
            Ok(Some((walk, region, author, stages)))
        })
        .await;
    match fetched {
        Ok(Some((walk, region, author, stages))) => {
            let dto = walk_detail_dto(&walk, &region, &author, &stages);
            json_response(StatusCode::OK, &request_id, &dto)
        }
        Ok(None) => api_error_response(ApiError::not_found("walk", &slug), &request_id),
        Err(e) => store_error_response(&e, &request_id),
    }
}

pub(crate) async fn walk_stages_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(slug): Path<String>,
) -> Response {
    let request_id = propagated_request_id(&headers, &state);
    let lookup = slug.clone();
    let fetched = state
        .with_store(move |store| {
            let Some(walk) = store.walk_by_slug_published(&lookup)? else {
                return Ok(None);
            };
            Ok(Some(store.stages_for_walk(walk.id)?))
        })
        .await;
    match fetched {
        Ok(Some(stages)) => {
            let dtos: Vec<_> = stages.iter().map(stage_dto).collect();
            json_response(StatusCode::OK, &request_id, &dtos)
        }
        Ok(None) => api_error_response(ApiError::not_found("walk", &slug), &request_id),
        Err(e) => store_error_response(&e, &request_id),
    }
}

pub(crate) async fn walk_reports_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(slug): Path<String>,
    Query(params): Query<BTreeMap<String, String>>,
) -> Response {
    let request_id = propagated_request_id(&headers, &state);
    let limit = match parse_list_limit(&params) {
        Ok(limit) => limit,
        Err(err) => return api_error_response(err, &request_id),
    };
    let lookup = slug.clone();
    let fetched = state
        .with_store(move |store| {
            let Some(walk) = store.walk_by_slug_published(&lookup)? else {
                return Ok(None);
            };
            Ok(Some(store.reports_for_walk(walk.id, limit)?))
        })
        .await;
    match fetched {
        Ok(Some(reports)) => {
            let dtos: Vec<_> = reports
                .iter()
                .map(|r| report_dto(&r.report, &r.author))
                .collect();
            json_response(StatusCode::OK, &request_id, &dtos)
        }
        Ok(None) => api_error_response(ApiError::not_found("walk", &slug), &request_id),
        Err(e) => store_error_response(&e, &request_id),
    }
}

pub(crate) async fn create_walk_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<CreateWalkBody>, JsonRejection>,
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
    let author = user.id;
    let region_slug = body.region_slug.clone();
    let created = state
        .with_store(move |store| {
            let region = store
                .region_by_slug(body.region_slug.as_str())?
                .ok_or_else(|| StoreError::NotFound {
                    entity: "region",
                    key: body.region_slug.as_str().to_string(),
                })?;
            let walk = store.create_walk(author, region.id, &body.walk)?;
            let author_user = store.user_by_id(walk.author_id)?.ok_or_else(|| {
                StoreError::Internal(format!("walk {} references missing author", walk.id.get()))
            })?;
            Ok((walk, region, author_user))
        })
        .await;
    match created {
        Ok((walk, region, author_user)) => {
            info!(
                request_id = %request_id,
                walk_id = walk.id.get(),
                slug = %walk.slug,
                region = %region_slug,
                "walk created"
            );
            let dto = walk_detail_dto(&walk, &region, &author_user, &[]);
            json_response(StatusCode::CREATED, &request_id, &dto)
        }
        Err(e) => store_error_response(&e, &request_id),
    }
}

pub(crate) async fn publish_walk_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(raw_id): Path<String>,
) -> Response {
    let request_id = propagated_request_id(&headers, &state);
    if let Err(err) = resolve_user(&state, &headers).await {
        return api_error_response(err, &request_id);
    }
    let id = match parse_walk_id(&raw_id) {
        Ok(id) => id,
        Err(err) => return api_error_response(err, &request_id),
    };
    let published = state
        .with_store(move |store| {
            let walk = store.publish_walk(id)?;
            let region = store.region_by_id(walk.region_id)?.ok_or_else(|| {
                StoreError::Internal(format!("walk {} references missing region", walk.id.get()))
            })?;
            let author = store.user_by_id(walk.author_id)?.ok_or_else(|| {
                StoreError::Internal(format!("walk {} references missing author", walk.id.get()))
            })?;
            let stages = store.stages_for_walk(walk.id)?;
            Ok((walk, region, author, stages))
        })
        .await;
    match published {
        Ok((walk, region, author, stages)) => {
            info!(request_id = %request_id, walk_id = walk.id.get(), "walk published");
            let dto = walk_detail_dto(&walk, &region, &author, &stages);
            json_response(StatusCode::OK, &request_id, &dto)
        }
        Err(e) => store_error_response(&e, &request_id),
    }
}

/// Unauthenticated; a missing walk is a silent no-op, so dead links cannot
/// probe the catalog.
pub(crate) async fn view_walk_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(raw_id): Path<String>,
) -> Response {
    let request_id = propagated_request_id(&headers, &state);
    let id = match parse_walk_id(&raw_id) {
        Ok(id) => id,
        Err(err) => return api_error_response(err, &request_id),
    };
    let counted = state
        .with_store(move |store| store.increment_view_count(id))
        .await;
    match counted {
        Ok(view_count) => json_response(StatusCode::OK, &request_id, &ViewDto { view_count }),
        Err(e) => store_error_response(&e, &request_id),
    }
}

fn parse_walk_id(raw: &str) -> Result<WalkId, ApiError> {
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(WalkId::new(id)),
        _ => Err(ApiError::invalid_param("id", raw)),
    }
}
