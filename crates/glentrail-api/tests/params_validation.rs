use glentrail_api::{
    api_error_for_store, http_status, openapi_v1_spec, parse_activity_range, parse_like_target,
    parse_list_limit, parse_walk_query_params, ApiError, ApiErrorCode, API_ERROR_CODES,
};
use glentrail_model::{Difficulty, LikeTargetType};
use glentrail_query::activity::ActivityRange;
use glentrail_query::{PipelineLimits, SortKey};
use glentrail_store::StoreError;
use serde_json::json;
use std::collections::BTreeMap;

fn query(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

fn limits() -> PipelineLimits {
    PipelineLimits::default()
}

#[test]
fn walk_query_defaults_match_the_pipeline() {
    let parsed = parse_walk_query_params(&query(&[]), &limits()).expect("empty query");
    assert_eq!(parsed.page.limit, 50);
    assert_eq!(parsed.page.offset, 0);
    assert_eq!(parsed.sort, SortKey::Popularity);
    assert!(parsed.filter.search.is_none());
    assert!(parsed.filter.difficulties.is_empty());
    assert!(parsed.filter.regions.is_empty());
    assert!(parsed.filter.tags.is_empty());
    assert!(parsed.filter.min_distance_km.is_none());
}

#[test]
fn walk_query_parses_the_full_parameter_set() {
    let q = query(&[
        ("search", "ben"),
        ("difficulty", "hard,strenuous"),
        ("region", "lochaber,skye"),
        ("min_distance", "5"),
        ("max_distance", "25.5"),
        ("min_duration", "2"),
        ("max_duration", "9.5"),
        ("tag", "munro,waterfall"),
        ("sort", "rating"),
        ("limit", "100"),
        ("offset", "40"),
    ]);
    let parsed = parse_walk_query_params(&q, &limits()).expect("full query");
    assert_eq!(parsed.filter.search.as_deref(), Some("ben"));
    assert_eq!(
        parsed.filter.difficulties,
        vec![Difficulty::Hard, Difficulty::Strenuous]
    );
    assert_eq!(parsed.filter.regions, vec!["lochaber", "skye"]);
    assert_eq!(parsed.filter.min_distance_km, Some(5.0));
    assert_eq!(parsed.filter.max_distance_km, Some(25.5));
    assert_eq!(parsed.filter.min_duration_hours, Some(2.0));
    assert_eq!(parsed.filter.max_duration_hours, Some(9.5));
    assert_eq!(parsed.filter.tags, vec!["munro", "waterfall"]);
    assert_eq!(parsed.sort, SortKey::Rating);
    assert_eq!(parsed.page.limit, 100);
    assert_eq!(parsed.page.offset, 40);
}

#[test]
fn difficulty_list_is_deduplicated_and_strict() {
    let q = query(&[("difficulty", "hard,easy,HARD")]);
    let parsed = parse_walk_query_params(&q, &limits()).expect("dedupe");
    assert_eq!(
        parsed.filter.difficulties,
        vec![Difficulty::Hard, Difficulty::Easy]
    );

    for raw in ["vertical", "hard,,easy", "hard, ,easy"] {
        let err = parse_walk_query_params(&query(&[("difficulty", raw)]), &limits())
            .expect_err("invalid difficulty");
        assert_eq!(err.code, ApiErrorCode::InvalidParam);
        assert_eq!(err.details["parameter"], "difficulty");
    }
}

#[test]
fn region_and_tag_lists_drop_blanks_and_duplicates() {
    let q = query(&[("region", "lochaber, ,lochaber,skye"), ("tag", "munro,,munro")]);
    let parsed = parse_walk_query_params(&q, &limits()).expect("csv cleanup");
    assert_eq!(parsed.filter.regions, vec!["lochaber", "skye"]);
    assert_eq!(parsed.filter.tags, vec!["munro"]);
}

#[test]
fn limit_bounds_are_enforced() {
    for raw in ["0", "201", "-1", "many"] {
        let err = parse_walk_query_params(&query(&[("limit", raw)]), &limits())
            .expect_err("bad limit");
        assert_eq!(err.code, ApiErrorCode::InvalidParam);
        assert_eq!(err.details["parameter"], "limit");
    }
    let max = parse_walk_query_params(&query(&[("limit", "200")]), &limits()).expect("limit=max");
    assert_eq!(max.page.limit, 200);
}

#[test]
fn sort_and_offset_reject_garbage() {
    let err = parse_walk_query_params(&query(&[("sort", "steepness")]), &limits())
        .expect_err("bad sort");
    assert_eq!(err.details["parameter"], "sort");

    let err = parse_walk_query_params(&query(&[("offset", "-3")]), &limits())
        .expect_err("bad offset");
    assert_eq!(err.details["parameter"], "offset");
}

#[test]
fn numeric_filters_must_be_finite_numbers() {
    for (name, raw) in [
        ("min_distance", "abc"),
        ("max_distance", "NaN"),
        ("min_duration", "inf"),
    ] {
        let err = parse_walk_query_params(&query(&[(name, raw)]), &limits())
            .expect_err("bad numeric filter");
        assert_eq!(err.code, ApiErrorCode::InvalidParam);
        assert_eq!(err.details["parameter"], name);
    }
}

#[test]
fn list_limit_has_its_own_default_and_ceiling() {
    assert_eq!(parse_list_limit(&query(&[])).expect("default"), 20);
    assert_eq!(
        parse_list_limit(&query(&[("limit", "100")])).expect("max"),
        100
    );
    let err = parse_list_limit(&query(&[("limit", "101")])).expect_err("over max");
    assert_eq!(err.code, ApiErrorCode::InvalidParam);
}

#[test]
fn activity_range_defaults_to_six_months() {
    assert_eq!(
        parse_activity_range(&query(&[])).expect("default"),
        ActivityRange::Months6
    );
    assert_eq!(
        parse_activity_range(&query(&[("range", "week")])).expect("week"),
        ActivityRange::Week
    );
    let err = parse_activity_range(&query(&[("range", "decade")])).expect_err("bad range");
    assert_eq!(err.details["parameter"], "range");
}

#[test]
fn like_target_requires_both_parameters() {
    let (target_type, target_id) =
        parse_like_target(&query(&[("target_type", "report"), ("target_id", "12")]))
            .expect("valid target");
    assert_eq!(target_type, LikeTargetType::Report);
    assert_eq!(target_id, 12);

    let err = parse_like_target(&query(&[("target_id", "12")])).expect_err("missing type");
    assert_eq!(err.code, ApiErrorCode::InvalidParam);
    assert_eq!(err.details["parameter"], "target_type");

    let err = parse_like_target(&query(&[("target_type", "walk")])).expect_err("missing id");
    assert_eq!(err.details["parameter"], "target_id");

    for raw in ["0", "-4", "twelve"] {
        let err = parse_like_target(&query(&[("target_type", "walk"), ("target_id", raw)]))
            .expect_err("bad id");
        assert_eq!(err.details["parameter"], "target_id");
    }

    let err = parse_like_target(&query(&[("target_type", "photo"), ("target_id", "1")]))
        .expect_err("bad type");
    assert_eq!(err.details["parameter"], "target_type");
}

#[test]
fn http_status_covers_every_code() {
    assert_eq!(http_status(ApiErrorCode::NotAuthenticated), 401);
    assert_eq!(http_status(ApiErrorCode::NotAuthorized), 403);
    assert_eq!(http_status(ApiErrorCode::NotFound), 404);
    assert_eq!(http_status(ApiErrorCode::ValidationError), 400);
    assert_eq!(http_status(ApiErrorCode::InvalidParam), 400);
    assert_eq!(http_status(ApiErrorCode::Conflict), 409);
    assert_eq!(http_status(ApiErrorCode::Internal), 500);
}

#[test]
fn store_failures_map_to_wire_codes() {
    let err = api_error_for_store(&StoreError::NotFound {
        entity: "walk",
        key: "ben-lomond".to_string(),
    });
    assert_eq!(err.code, ApiErrorCode::NotFound);
    assert_eq!(err.details, json!({"entity": "walk", "key": "ben-lomond"}));

    let err = api_error_for_store(&StoreError::Validation("rating out of range".to_string()));
    assert_eq!(err.code, ApiErrorCode::ValidationError);
    assert_eq!(err.message, "rating out of range");

    let err = api_error_for_store(&StoreError::Conflict("slug taken".to_string()));
    assert_eq!(err.code, ApiErrorCode::Conflict);

    assert_eq!(
        api_error_for_store(&StoreError::NotAuthenticated).code,
        ApiErrorCode::NotAuthenticated
    );
    let err = api_error_for_store(&StoreError::NotAuthorized(
        "only the report author may publish it",
    ));
    assert_eq!(err.code, ApiErrorCode::NotAuthorized);
    assert_eq!(err.message, "only the report author may publish it");
}

#[test]
fn storage_faults_never_leak_detail() {
    let io = StoreError::Io(std::io::Error::other("disk failure at /var/lib/glentrail"));
    let err = api_error_for_store(&io);
    assert_eq!(err.code, ApiErrorCode::Internal);
    assert_eq!(err.message, "internal error");

    let internal = StoreError::Internal("walk 9 references missing region 4".to_string());
    let err = api_error_for_store(&internal);
    assert_eq!(err.message, "internal error");
    assert_eq!(err.details, json!({}));
}

#[test]
fn error_envelope_shape_is_stable() {
    let err = ApiError::invalid_param("limit", "0").with_request_id("req-0000000000000001");
    let value = serde_json::to_value(&err).expect("serialize envelope");
    assert_eq!(
        value,
        json!({
            "code": "invalid_param",
            "message": "invalid query parameter: limit",
            "details": {"parameter": "limit", "value": "0"},
            "request_id": "req-0000000000000001"
        })
    );

    let back: ApiError = serde_json::from_value(value).expect("deserialize envelope");
    assert_eq!(back, err);
}

#[test]
fn openapi_document_basics_hold() {
    let spec = openapi_v1_spec();
    assert_eq!(spec["openapi"], "3.0.3");
    assert_eq!(spec["info"]["version"], "v1");

    let api_error = &spec["components"]["schemas"]["ApiError"];
    assert_eq!(api_error["type"], "object");
    assert_eq!(api_error["additionalProperties"], json!(false));
    let required: Vec<&str> = api_error["required"]
        .as_array()
        .expect("ApiError.required array")
        .iter()
        .map(|v| v.as_str().expect("required string"))
        .collect();
    assert_eq!(required, vec!["code", "message", "details", "request_id"]);

    let codes = spec["components"]["schemas"]["ApiErrorCode"]["enum"]
        .as_array()
        .expect("code enum");
    assert_eq!(codes.len(), API_ERROR_CODES.len());

    for path in [
        "/healthz",
        "/readyz",
        "/v1/walks",
        "/v1/walks/count",
        "/v1/walks/{slug}",
        "/v1/walks/{slug}/stages",
        "/v1/walks/{slug}/reports",
        "/v1/walks/{id}/publish",
        "/v1/walks/{id}/view",
        "/v1/regions",
        "/v1/regions/{slug}",
        "/v1/regions/{slug}/walks",
        "/v1/reports",
        "/v1/reports/{id}/publish",
        "/v1/reports/recent",
        "/v1/completions",
        "/v1/likes",
        "/v1/likes/toggle",
        "/v1/me",
        "/v1/me/stats",
        "/v1/me/achievements",
        "/v1/me/activity",
        "/v1/me/history",
        "/v1/me/likes/{target_type}/{target_id}",
    ] {
        assert!(
            spec["paths"].get(path).is_some(),
            "missing openapi path {path}"
        );
    }
}
