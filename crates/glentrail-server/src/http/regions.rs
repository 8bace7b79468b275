// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::Response;
use axum::Json;
use glentrail_api::convert::{region_dto, walk_summary_dto};
use glentrail_api::{parse_list_limit, ApiError};
use glentrail_model::NewRegion;
use glentrail_query::{run_query, Page, SortKey, WalkFilter, WalkQueryRequest};
use tracing::info;

use crate::http::support::{
    api_error_response, json_response, propagated_request_id, resolve_user, store_error_response,
};
use crate::state::AppState;

pub(crate) async fn list_regions_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Response {
    let request_id = propagated_request_id(&headers, &state);
    match state.with_store(|store| store.list_regions()).await {
        Ok(regions) => {
            let dtos: Vec<_> = regions.iter().map(region_dto).collect();
            json_response(StatusCode::OK, &request_id, &dtos)
        }
        Err(e) => store_error_response(&e, &request_id),
    }
}

pub(crate) async fn region_detail_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(slug): Path<String>,
) -> Response {
    let request_id = propagated_request_id(&headers, &state);
    let lookup = slug.clone();
    match state
        .with_store(move |store| store.region_by_slug(&lookup))
        .await
    {
        Ok(Some(region)) => json_response(StatusCode::OK, &request_id, &region_dto(&region)),
        Ok(None) => api_error_response(ApiError::not_found("region", &slug), &request_id),
        Err(e) => store_error_response(&e, &request_id),
    }
}

/// The region page is one more consumer of the shared walk pipeline; the
/// region slug becomes a filter term.
pub(crate) async fn region_walks_handler(
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
            let Some(region) = store.region_by_slug(&lookup)? else {
                return Ok(None);
            };
            let walks = store.published_walks()?;
            Ok(Some((region, walks)))
        })
        .await;
    let (region, walks) = match fetched {
        Ok(Some(pair)) => pair,
        Ok(None) => return api_error_response(ApiError::not_found("region", &slug), &request_id),
        Err(e) => return store_error_response(&e, &request_id),
    };
    let req = WalkQueryRequest {
        filter: WalkFilter {
            regions: vec![region.slug.to_string()],
            ..WalkFilter::default()
        },
        sort: SortKey::Recent,
        page: Page { limit, offset: 0 },
    };
    let page = match run_query(&walks, std::slice::from_ref(&region), &req, &state.config.limits) {
        Ok(page) => page,
        Err(e) => return api_error_response(ApiError::validation(e.0), &request_id),
    };
    let dtos: Vec<_> = page
        .items
        .iter()
        .map(|w| walk_summary_dto(w, &region))
        .collect();
    json_response(StatusCode::OK, &request_id, &dtos)
}

pub(crate) async fn create_region_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<NewRegion>, JsonRejection>,
) -> Response {
    let request_id = propagated_request_id(&headers, &state);
    if let Err(err) = resolve_user(&state, &headers).await {
        return api_error_response(err, &request_id);
    }
    let Json(new) = match body {
        Ok(json) => json,
        Err(rejection) => {
            return api_error_response(ApiError::validation(rejection.body_text()), &request_id)
        }
    };
    match state.with_store(move |store| store.create_region(&new)).await {
        Ok(region) => {
            info!(request_id = %request_id, slug = %region.slug, "region created");
            json_response(StatusCode::CREATED, &request_id, &region_dto(&region))
        }
        Err(e) => store_error_response(&e, &request_id),
    }
}
