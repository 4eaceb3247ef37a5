//! API error types and their HTTP mapping.
//!
//! Every handler returns `Result<_, ApiError>`; the `IntoResponse` impl is
//! the single place where errors become status codes and JSON bodies.
//!
//! ## Status Mapping
//! ```text
//! ApiError::Validation  ─► 400  {"error": "<field message>"}
//! ApiError::NotFound    ─► 404  {"error": "<Entity> not found"}
//! ApiError::Internal    ─► 500  {"error": "Internal server error"}
//! ```

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;

use menu_db::DbError;

/// Errors surfaced to HTTP clients.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Requested entity does not exist. The string is the entity kind
    /// ("Category", "Subcategory", "Item").
    #[error("{0} not found")]
    NotFound(String),

    /// Request payload failed validation.
    #[error("{0}")]
    Validation(String),

    /// Anything the client cannot act on.
    #[error("Internal server error")]
    Internal(String),
}

impl ApiError {
    /// Not-found error for an entity kind.
    pub fn not_found(entity: &str) -> Self {
        ApiError::NotFound(entity.to_string())
    }
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, .. } => ApiError::NotFound(entity),
            DbError::Validation(v) => ApiError::Validation(v.to_string()),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::NotFound(entity) => {
                (StatusCode::NOT_FOUND, format!("{entity} not found"))
            }
            ApiError::Validation(message) => (StatusCode::BAD_REQUEST, message.clone()),
            ApiError::Internal(detail) => {
                error!(detail = %detail, "Internal error while handling request");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_not_found_maps_to_entity_message() {
        let err: ApiError = DbError::not_found("Category", "c1").into();
        assert_eq!(err.to_string(), "Category not found");
    }

    #[test]
    fn test_validation_maps_to_field_message() {
        let err: ApiError =
            DbError::Validation(menu_core::ValidationError::Required {
                field: "name".to_string(),
            })
            .into();
        assert!(matches!(err, ApiError::Validation(_)));
        assert_eq!(err.to_string(), "name is required");
    }
}
