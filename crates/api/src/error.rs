use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use marquee_core::error::CoreError;
use marquee_gateway::GatewayError;
use marquee_session::SessionError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`GatewayError`] for catalog
/// failures, and adds HTTP-specific variants. Implements [`IntoResponse`] to
/// produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `marquee_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A catalog request made on behalf of the handler failed.
    #[error(transparent)]
    Catalog(#[from] GatewayError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The browse session task is not answering.
    #[error("Browse session unavailable")]
    SessionUnavailable,
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<SessionError> for AppError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::Invalid(core) => AppError::Core(core),
            SessionError::Closed | SessionError::Timeout => AppError::SessionUnavailable,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
            },

            // --- Catalog errors ---
            AppError::Catalog(err) => {
                tracing::warn!(error = %err, "Catalog request failed");
                (StatusCode::BAD_GATEWAY, "CATALOG_ERROR", err.user_message())
            }

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::SessionUnavailable => {
                tracing::error!("Browse session is not running");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "SESSION_UNAVAILABLE",
                    "The browse session is not available".to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
