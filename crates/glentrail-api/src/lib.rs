//! Versioned wire contract: error envelope, query parsing, DTO shapes and
//! the OpenAPI document. Transport-free; the server crate mounts this on
//! axum, the CLI reuses the same shapes for its JSON output.

#![forbid(unsafe_code)]
#![recursion_limit = "256"]

pub const CRATE_NAME: &str = "glentrail-api";

/// Path prefix and `api_version` stamp of every versioned response.
pub const API_VERSION: &str = "v1";

pub mod convert;
pub mod dto;
pub mod error_mapping;
pub mod errors;
pub mod openapi;
pub mod params;

pub use error_mapping::{api_error_for_store, http_status};
pub use errors::{ApiError, ApiErrorCode, API_ERROR_CODES};
pub use openapi::openapi_v1_spec;
pub use params::{
    parse_activity_range, parse_like_target, parse_limit, parse_list_limit, parse_offset,
    parse_walk_query_params, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT,
};
