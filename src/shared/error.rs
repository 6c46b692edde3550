//! Application Error Types
//!
//! Centralized error handling with Axum integration.
//!
//! Every engine failure carries one of the canonical failure kinds
//! (`INVALID_ARGUMENT`, `NOT_FOUND`, ...). Infrastructure failures collapse
//! to `INTERNAL` at the wire boundary.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Failed precondition: {0}")]
    FailedPrecondition(String),

    #[error("Resource exhausted: {0}")]
    ResourceExhausted(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Identity service error: {0}")]
    Identity(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),
}

/// Canonical failure kind reported to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    NotFound,
    AlreadyExists,
    PermissionDenied,
    FailedPrecondition,
    ResourceExhausted,
    Internal,
}

impl ErrorKind {
    /// Wire code for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidArgument => "INVALID_ARGUMENT",
            Self::NotFound => "NOT_FOUND",
            Self::AlreadyExists => "ALREADY_EXISTS",
            Self::PermissionDenied => "PERMISSION_DENIED",
            Self::FailedPrecondition => "FAILED_PRECONDITION",
            Self::ResourceExhausted => "RESOURCE_EXHAUSTED",
            Self::Internal => "INTERNAL",
        }
    }

    /// HTTP status paired with this kind.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidArgument => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::AlreadyExists => StatusCode::CONFLICT,
            Self::PermissionDenied => StatusCode::FORBIDDEN,
            Self::FailedPrecondition => StatusCode::PRECONDITION_FAILED,
            Self::ResourceExhausted => StatusCode::TOO_MANY_REQUESTS,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AppError {
    /// The failure kind this error surfaces as.
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::InvalidArgument(_) | AppError::Validation(_) => ErrorKind::InvalidArgument,
            AppError::NotFound(_) => ErrorKind::NotFound,
            AppError::AlreadyExists(_) => ErrorKind::AlreadyExists,
            AppError::PermissionDenied(_) => ErrorKind::PermissionDenied,
            AppError::FailedPrecondition(_) => ErrorKind::FailedPrecondition,
            AppError::ResourceExhausted(_) => ErrorKind::ResourceExhausted,
            AppError::Identity(_)
            | AppError::Internal(_)
            | AppError::Database(_)
            | AppError::Redis(_) => ErrorKind::Internal,
        }
    }

    /// Message safe to hand back to the caller.
    fn public_message(&self) -> String {
        match self {
            AppError::InvalidArgument(msg)
            | AppError::Validation(msg)
            | AppError::NotFound(msg)
            | AppError::AlreadyExists(msg)
            | AppError::PermissionDenied(msg)
            | AppError::FailedPrecondition(msg)
            | AppError::ResourceExhausted(msg) => msg.clone(),
            AppError::Identity(_)
            | AppError::Internal(_)
            | AppError::Database(_)
            | AppError::Redis(_) => "Internal server error".into(),
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: &'static str,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Internal(msg) => tracing::error!("Internal error: {}", msg),
            AppError::Identity(msg) => tracing::error!("Identity service error: {}", msg),
            AppError::Database(e) => tracing::error!("Database error: {}", e),
            AppError::Redis(e) => tracing::error!("Redis error: {}", e),
            _ => {}
        }

        let kind = self.kind();
        let body = ErrorResponse {
            code: kind.as_str(),
            message: self.public_message(),
        };

        let mut response = (kind.status_code(), Json(body)).into_response();
        // Lets middleware label metrics without parsing the body
        response.extensions_mut().insert(kind);
        response
    }
}

/// Whether a sqlx error is a unique-constraint violation.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.is_unique_violation())
}
