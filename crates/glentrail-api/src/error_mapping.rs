// SPDX-License-Identifier: Apache-2.0

use crate::errors::{ApiError, ApiErrorCode};
use glentrail_store::StoreError;

#[must_use]
pub fn http_status(code: ApiErrorCode) -> u16 {
    match code {
        ApiErrorCode::NotAuthenticated => 401,
        ApiErrorCode::NotAuthorized => 403,
        ApiErrorCode::NotFound => 404,
        ApiErrorCode::ValidationError | ApiErrorCode::InvalidParam => 400,
        ApiErrorCode::Conflict => 409,
        ApiErrorCode::Internal => 500,
    }
}

/// Translates a store failure into the wire envelope. Sqlite and io details
/// never cross the boundary; the server logs them and callers see a generic
/// internal error.
#[must_use]
pub fn api_error_for_store(err: &StoreError) -> ApiError {
    match err {
        StoreError::NotAuthenticated => ApiError::not_authenticated(),
        StoreError::NotAuthorized(message) => ApiError::not_authorized(*message),
        StoreError::NotFound { entity, key } => ApiError::not_found(entity, key),
        StoreError::Validation(message) => ApiError::validation(message.clone()),
        StoreError::Conflict(message) => ApiError::conflict(message.clone()),
        StoreError::Sql(_) | StoreError::Io(_) | StoreError::Internal(_) => {
            ApiError::internal("internal error")
        }
    }
}
