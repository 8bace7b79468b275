// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::Response;
use axum::Json;
use glentrail_api::convert::{feed_entry_dto, report_dto};
use glentrail_api::{parse_list_limit, ApiError};
use glentrail_model::{NewReport, ReportId};
use glentrail_store::StoreError;
use tracing::info;

use crate::http::support::{
    api_error_response, json_response, propagated_request_id, resolve_user, store_error_response,
};
use crate::state::AppState;

pub(crate) async fn recent_reports_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<BTreeMap<String, String>>,
) -> Response {
    let request_id = propagated_request_id(&headers, &state);
    let limit = match parse_list_limit(&params) {
        Ok(limit) => limit,
        Err(err) => return api_error_response(err, &request_id),
    };
    let region_slug = params.get("region").cloned();
    let filter_slug = region_slug.clone();
    let fetched = state
        .with_store(move |store| {
            let region = match &filter_slug {
                Some(slug) => match store.region_by_slug(slug)? {
                    Some(region) => Some(region.id),
                    None => return Ok(None),
                },
                None => None,
            };
            Ok(Some(store.recent_reports(region, limit)?))
        })
        .await;
    match fetched {
        Ok(Some(items)) => {
            let dtos: Vec<_> = items.iter().map(feed_entry_dto).collect();
            json_response(StatusCode::OK, &request_id, &dtos)
        }
        Ok(None) => {
            let slug = region_slug.unwrap_or_default();
            api_error_response(ApiError::not_found("region", &slug), &request_id)
        }
        Err(e) => store_error_response(&e, &request_id),
    }
}

pub(crate) async fn create_report_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<NewReport>, JsonRejection>,
) -> Response {
    let request_id = propagated_request_id(&headers, &state);
    let user = match resolve_user(&state, &headers).await {
        Ok(user) => user,
        Err(err) => return api_error_response(err, &request_id),
    };
    let Json(new) = match body {
        Ok(json) => json,
        Err(rejection) => {
            return api_error_response(ApiError::validation(rejection.body_text()), &request_id)
        }
    };
    let author = user.id;
    let created = state
        .with_store(move |store| store.create_report(author, &new))
        .await;
    match created {
        Ok(report) => {
            info!(
                request_id = %request_id,
                report_id = report.id.get(),
                walk_id = report.walk_id.get(),
                "report created"
            );
            json_response(StatusCode::CREATED, &request_id, &report_dto(&report, &user))
        }
        Err(e) => store_error_response(&e, &request_id),
    }
}

pub(crate) async fn publish_report_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(raw_id): Path<String>,
) -> Response {
    let request_id = propagated_request_id(&headers, &state);
    let user = match resolve_user(&state, &headers).await {
        Ok(user) => user,
        Err(err) => return api_error_response(err, &request_id),
    };
    let id = match raw_id.parse::<i64>() {
        Ok(id) if id > 0 => ReportId::new(id),
        _ => return api_error_response(ApiError::invalid_param("id", &raw_id), &request_id),
    };
    let acting = user.id;
    let published = state
        .with_store(move |store| {
            let report = store.publish_report(acting, id)?;
            let author = store.user_by_id(report.author_id)?.ok_or_else(|| {
                StoreError::Internal(format!(
                    "report {} references missing author",
                    report.id.get()
                ))
            })?;
            Ok((report, author))
        })
        .await;
    match published {
        Ok((report, author)) => {
            info!(request_id = %request_id, report_id = report.id.get(), "report published");
            json_response(StatusCode::OK, &request_id, &report_dto(&report, &author))
        }
        Err(e) => store_error_response(&e, &request_id),
    }
}
