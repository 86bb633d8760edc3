//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use feedhub_core::error::{AppError, ErrorKind};
use feedhub_core::types::ApiErrorResponse;

/// Message sent to clients in place of server-side failure details.
pub const INTERNAL_MESSAGE: &str = "An internal error occurred.";

/// HTTP-facing wrapper around [`AppError`].
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

/// The HTTP status an error kind is reported with.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Authentication => StatusCode::UNAUTHORIZED,
        ErrorKind::Authorization => StatusCode::FORBIDDEN,
        ErrorKind::Validation => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorKind::Conflict => StatusCode::CONFLICT,
        ErrorKind::Internal
        | ErrorKind::Database
        | ErrorKind::Storage
        | ErrorKind::Configuration
        | ErrorKind::Serialization => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_code(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::NotFound => "NOT_FOUND",
        ErrorKind::Authentication => "UNAUTHORIZED",
        ErrorKind::Authorization => "FORBIDDEN",
        ErrorKind::Validation => "VALIDATION_ERROR",
        ErrorKind::Conflict => "CONFLICT",
        _ => "INTERNAL_ERROR",
    }
}

/// The message a client may see for `err`.
pub fn public_message(err: &AppError) -> String {
    if err.kind.is_server_error() {
        tracing::error!(
            kind = %err.kind,
            error = %err.message,
            source = ?err.source,
            "Internal server error"
        );
        INTERNAL_MESSAGE.to_string()
    } else {
        err.message.clone()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let status = status_for(err.kind);
        let message = public_message(&err);

        let body = ApiErrorResponse {
            error: error_code(err.kind).to_string(),
            message,
            details: (!err.field_errors.is_empty()).then_some(err.field_errors),
        };

        (status, Json(body)).into_response()
    }
}
