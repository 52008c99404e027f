use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kinotek_core::error::CatalogError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CatalogError`] for domain errors and adds HTTP-specific
/// variants. Implements [`IntoResponse`] to produce consistent JSON error
/// responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from the catalog core.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Map DTO validation failures to the domain `Validation` kind.
    pub fn validation(errors: validator::ValidationErrors) -> Self {
        AppError::Catalog(CatalogError::Validation(errors.to_string()))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Catalog(err) => match err {
                CatalogError::ActorAlreadyExists | CatalogError::MovieAlreadyExists => {
                    (StatusCode::CONFLICT, "CONFLICT", err.to_string())
                }
                CatalogError::ActorDoesNotExist { .. }
                | CatalogError::MovieDoesNotExist { .. } => {
                    (StatusCode::NOT_FOUND, "NOT_FOUND", err.to_string())
                }
                CatalogError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CatalogError::Cancelled => (
                    StatusCode::REQUEST_TIMEOUT,
                    "CANCELLED",
                    "The operation was cancelled".to_string(),
                ),
                // Already logged with full detail at the translation site;
                // the caller only ever sees the sanitized form.
                CatalogError::Internal => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                ),
            },
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
