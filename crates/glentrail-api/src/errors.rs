// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Every wire value of [`ApiErrorCode`], in declaration order. The OpenAPI
/// schema enumerates these.
pub const API_ERROR_CODES: [&str; 7] = [
    "not_authenticated",
    "not_authorized",
    "not_found",
    "validation_error",
    "invalid_param",
    "conflict",
    "internal",
];

/// Wire error codes, one per failure class the service reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum ApiErrorCode {
    NotAuthenticated,
    NotAuthorized,
    NotFound,
    ValidationError,
    InvalidParam,
    Conflict,
    Internal,
}

/// The error envelope every non-2xx response carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiError {
    pub code: ApiErrorCode,
    pub message: String,
    pub details: Value,
    pub request_id: String,
}

impl ApiError {
    #[must_use]
    pub fn new(code: ApiErrorCode, message: impl Into<String>, details: Value) -> Self {
        Self {
            code,
            message: message.into(),
            details,
            request_id: "req-unknown".to_owned(),
        }
    }

    /// Stamps the envelope with the id assigned to this request.
    #[must_use]
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = request_id.into();
        self
    }

    #[must_use]
    pub fn invalid_param(name: &str, value: &str) -> Self {
        Self::new(
            ApiErrorCode::InvalidParam,
            format!("invalid query parameter: {name}"),
            json!({"parameter": name, "value": value}),
        )
    }

    #[must_use]
    pub fn missing_param(name: &str) -> Self {
        Self::new(
            ApiErrorCode::InvalidParam,
            format!("missing query parameter: {name}"),
            json!({"parameter": name}),
        )
    }

    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ApiErrorCode::ValidationError, message, json!({}))
    }

    #[must_use]
    pub fn not_found(entity: &str, key: &str) -> Self {
        Self::new(
            ApiErrorCode::NotFound,
            format!("{entity} not found"),
            json!({"entity": entity, "key": key}),
        )
    }

    #[must_use]
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ApiErrorCode::Conflict, message, json!({}))
    }

    #[must_use]
    pub fn not_authenticated() -> Self {
        Self::new(
            ApiErrorCode::NotAuthenticated,
            "authentication required",
            json!({}),
        )
    }

    #[must_use]
    pub fn not_authorized(message: impl Into<String>) -> Self {
        Self::new(ApiErrorCode::NotAuthorized, message, json!({}))
    }

    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ApiErrorCode::Internal, message, json!({}))
    }
}
