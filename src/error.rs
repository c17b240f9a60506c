//! Unified error type for the API
//!
//! Every handler returns `Result<_, ApiError>`. The `IntoResponse` impl maps
//! each variant to a status code and the `{ "error": ..., "code": ... }`
//! body shape used across the API. Internal failures (storage, serialization)
//! are logged with their details and reported to the client with a generic
//! message only.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Unknown document id on update/delete. Carries the resource name as it
    /// should appear in the message, e.g. "Accommodation not found".
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Business-identifier collision within a collection.
    #[error("duplicate {field}: a record with {field} '{value}' already exists")]
    Conflict { field: &'static str, value: String },

    /// Client input error on the chat endpoints.
    #[error("{0}")]
    BadRequest(&'static str),

    /// Embedded database failure.
    #[error("storage error: {0}")]
    Storage(#[from] redb::Error),

    /// Record (de)serialization failure.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Upstream chat provider failure (DeepSeek/Gemini fail loudly;
    /// OpenRouter degrades to a scripted fallback instead of raising this).
    #[error("{0}")]
    Upstream(String),
}

// redb surfaces distinct error types per operation; funnel them all into the
// storage variant through the umbrella `redb::Error`.
impl From<redb::TransactionError> for ApiError {
    fn from(err: redb::TransactionError) -> Self {
        Self::Storage(err.into())
    }
}

impl From<redb::TableError> for ApiError {
    fn from(err: redb::TableError) -> Self {
        Self::Storage(err.into())
    }
}

impl From<redb::StorageError> for ApiError {
    fn from(err: redb::StorageError) -> Self {
        Self::Storage(err.into())
    }
}

impl From<redb::CommitError> for ApiError {
    fn from(err: redb::CommitError) -> Self {
        Self::Storage(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            Self::Conflict { .. } => (StatusCode::CONFLICT, "conflict"),
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            Self::Storage(_) | Self::Serialization(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal")
            }
            Self::Upstream(_) => (StatusCode::BAD_GATEWAY, "upstream"),
        };

        let message = match &self {
            // Keep storage/serialization details out of the response body.
            Self::Storage(_) | Self::Serialization(_) => {
                error!(error = %self, "internal error while handling request");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        (status, Json(json!({ "error": message, "code": code }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_the_resource() {
        let err = ApiError::NotFound("Accommodation");
        assert_eq!(err.to_string(), "Accommodation not found");
    }

    #[test]
    fn conflict_message_names_field_and_value() {
        let err = ApiError::Conflict {
            field: "residence_id",
            value: "RES-001".to_string(),
        };
        assert!(err.to_string().contains("residence_id"));
        assert!(err.to_string().contains("RES-001"));
    }
}
