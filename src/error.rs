//! Application error type and its HTTP representation.
//!
//! Every fallible operation in the service layer returns [`AppError`]. The
//! variant decides the HTTP status; 5xx variants are logged with full details
//! server-side and reach the client with a generic message only.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use tracing::{debug, error, warn};

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Machine-readable error payload returned to API clients.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

/// Errors produced by the shortening and redirect paths.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Missing or malformed input (400).
    #[error("{message}")]
    Validation { message: String, details: Value },

    /// Unknown short code (404).
    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// A uniqueness constraint rejected a write.
    ///
    /// Raised by repositories when a generated code is already taken; the
    /// mapping store retries on it, so it only reaches clients if a backend
    /// reports some other constraint.
    #[error("{message}")]
    Conflict { message: String, details: Value },

    /// The code generator ran out of attempts to find a free code (500).
    #[error("{message}")]
    GenerationExhausted { message: String, details: Value },

    /// The backing store is unreachable or rejected an operation (500).
    #[error("{message}")]
    Persistence { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }

    pub fn generation_exhausted(message: impl Into<String>, details: Value) -> Self {
        Self::GenerationExhausted {
            message: message.into(),
            details,
        }
    }

    pub fn persistence(message: impl Into<String>, details: Value) -> Self {
        Self::Persistence {
            message: message.into(),
            details,
        }
    }

    /// HTTP status this error maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::GenerationExhausted { .. } | Self::Persistence { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Stable error code used in JSON bodies and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "validation_error",
            Self::NotFound { .. } => "not_found",
            Self::Conflict { .. } => "conflict",
            Self::GenerationExhausted { .. } => "generation_exhausted",
            Self::Persistence { .. } => "persistence_error",
        }
    }

    /// Returns true for errors that surface as 5xx responses.
    pub fn is_server_error(&self) -> bool {
        self.status_code().is_server_error()
    }

    /// Converts the error into the payload sent to clients.
    ///
    /// Server-side failures keep their code but hide message and details.
    pub fn to_error_info(&self) -> ErrorInfo {
        let (message, details) = match self {
            Self::Validation { message, details }
            | Self::NotFound { message, details }
            | Self::Conflict { message, details } => (message.clone(), details.clone()),
            Self::GenerationExhausted { .. } | Self::Persistence { .. } => {
                ("Internal server error".to_string(), json!({}))
            }
        };

        ErrorInfo {
            code: self.kind(),
            message,
            details,
        }
    }

    /// Emits a log line at a level matching the severity of the error.
    pub fn log(&self) {
        match self {
            Self::GenerationExhausted { message, details }
            | Self::Persistence { message, details } => {
                error!(kind = self.kind(), %details, "{}", message);
            }
            Self::Validation { message, details } | Self::Conflict { message, details } => {
                warn!(kind = self.kind(), %details, "{}", message);
            }
            Self::NotFound { message, details } => {
                debug!(kind = self.kind(), %details, "{}", message);
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.log();

        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (self.status_code(), Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        map_sqlx_error(e)
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        let details = serde_json::to_value(&e).unwrap_or_else(|_| json!({}));
        AppError::bad_request("Request validation failed", details)
    }
}

impl From<JsonRejection> for AppError {
    fn from(e: JsonRejection) -> Self {
        AppError::bad_request(
            "Request body must be a JSON object with a \"url\" field",
            json!({ "field": "url", "reason": e.body_text() }),
        )
    }
}

/// Maps a database error onto the application error model.
///
/// Unique violations become [`AppError::Conflict`] so callers can react to
/// code collisions; everything else is a persistence failure carrying the
/// driver message for the server log.
pub fn map_sqlx_error(e: sqlx::Error) -> AppError {
    if let Some(db) = e.as_database_error()
        && db.is_unique_violation()
    {
        return AppError::conflict(
            "Unique constraint violation",
            json!({ "constraint": db.constraint() }),
        );
    }

    AppError::persistence("Database error", json!({ "reason": e.to_string() }))
}
