// SPDX-License-Identifier: Apache-2.0

use crate::errors::ApiError;
use glentrail_model::{Difficulty, LikeTargetType};
use glentrail_query::activity::ActivityRange;
use glentrail_query::{Page, PipelineLimits, SortKey, WalkFilter, WalkQueryRequest, DEFAULT_PAGE_LIMIT};
use std::collections::BTreeMap;

/// Default and ceiling for the simple list endpoints (reports, region walks,
/// likes). The catalog pipeline has its own limits.
pub const DEFAULT_LIST_LIMIT: usize = 20;
pub const MAX_LIST_LIMIT: usize = 100;

/// Builds a pipeline request from `/v1/walks` query parameters. List-valued
/// parameters (`difficulty`, `region`, `tag`) are comma-separated; every
/// malformed value is reported against its parameter name.
pub fn parse_walk_query_params(
    query: &BTreeMap<String, String>,
    limits: &PipelineLimits,
) -> Result<WalkQueryRequest, ApiError> {
    let difficulties = match query.get("difficulty") {
        Some(raw) => parse_difficulties(raw)?,
        None => Vec::new(),
    };
    let sort = match query.get("sort") {
        Some(raw) => SortKey::parse(raw).map_err(|_| ApiError::invalid_param("sort", raw))?,
        None => SortKey::default(),
    };
    let limit = parse_limit(query, DEFAULT_PAGE_LIMIT, limits.max_limit)?;
    let offset = parse_offset(query)?;

    Ok(WalkQueryRequest {
        filter: WalkFilter {
            search: query.get("search").cloned(),
            difficulties,
            regions: csv_terms(query.get("region")),
            min_distance_km: parse_f64(query, "min_distance")?,
            max_distance_km: parse_f64(query, "max_distance")?,
            min_duration_hours: parse_f64(query, "min_duration")?,
            max_duration_hours: parse_f64(query, "max_duration")?,
            tags: csv_terms(query.get("tag")),
        },
        sort,
        page: Page { limit, offset },
    })
}

pub fn parse_limit(
    query: &BTreeMap<String, String>,
    default_limit: usize,
    max_limit: usize,
) -> Result<usize, ApiError> {
    match query.get("limit") {
        Some(raw) => {
            let value = raw
                .parse::<usize>()
                .map_err(|_| ApiError::invalid_param("limit", raw))?;
            if value == 0 || value > max_limit {
                return Err(ApiError::invalid_param("limit", raw));
            }
            Ok(value)
        }
        None => Ok(default_limit),
    }
}

pub fn parse_offset(query: &BTreeMap<String, String>) -> Result<usize, ApiError> {
    match query.get("offset") {
        Some(raw) => raw
            .parse::<usize>()
            .map_err(|_| ApiError::invalid_param("offset", raw)),
        None => Ok(0),
    }
}

/// Limit for the simple list endpoints, clamped at [`MAX_LIST_LIMIT`].
pub fn parse_list_limit(query: &BTreeMap<String, String>) -> Result<usize, ApiError> {
    parse_limit(query, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT)
}

pub fn parse_activity_range(query: &BTreeMap<String, String>) -> Result<ActivityRange, ApiError> {
    match query.get("range") {
        Some(raw) => {
            ActivityRange::parse(raw).map_err(|_| ApiError::invalid_param("range", raw))
        }
        None => Ok(ActivityRange::default()),
    }
}

/// `target_type` and `target_id` for the likes read endpoint.
pub fn parse_like_target(
    query: &BTreeMap<String, String>,
) -> Result<(LikeTargetType, i64), ApiError> {
    let raw_type = query
        .get("target_type")
        .ok_or_else(|| ApiError::missing_param("target_type"))?;
    let target_type = LikeTargetType::parse(raw_type)
        .map_err(|_| ApiError::invalid_param("target_type", raw_type))?;
    let raw_id = query
        .get("target_id")
        .ok_or_else(|| ApiError::missing_param("target_id"))?;
    let target_id = raw_id
        .parse::<i64>()
        .map_err(|_| ApiError::invalid_param("target_id", raw_id))?;
    if target_id <= 0 {
        return Err(ApiError::invalid_param("target_id", raw_id));
    }
    Ok((target_type, target_id))
}

fn parse_difficulties(raw: &str) -> Result<Vec<Difficulty>, ApiError> {
    let mut out = Vec::new();
    for term in raw.split(',') {
        let term = term.trim();
        if term.is_empty() {
            return Err(ApiError::invalid_param("difficulty", raw));
        }
        let parsed =
            Difficulty::parse(term).map_err(|_| ApiError::invalid_param("difficulty", raw))?;
        if !out.contains(&parsed) {
            out.push(parsed);
        }
    }
    Ok(out)
}

/// Splits a comma-separated parameter into trimmed, deduplicated terms.
/// Blank segments are dropped rather than rejected.
fn csv_terms(raw: Option<&String>) -> Vec<String> {
    let Some(raw) = raw else {
        return Vec::new();
    };
    let mut out: Vec<String> = Vec::new();
    for term in raw.split(',') {
        let term = term.trim();
        if term.is_empty() {
            continue;
        }
        if !out.iter().any(|seen| seen == term) {
            out.push(term.to_owned());
        }
    }
    out
}

fn parse_f64(query: &BTreeMap<String, String>, name: &str) -> Result<Option<f64>, ApiError> {
    match query.get(name) {
        Some(raw) => {
            let value = raw
                .parse::<f64>()
                .map_err(|_| ApiError::invalid_param(name, raw))?;
            if !value.is_finite() {
                return Err(ApiError::invalid_param(name, raw));
            }
            Ok(Some(value))
        }
        None => Ok(None),
    }
}
