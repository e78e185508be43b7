//! HTTP error handling and response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::api::CapacityError;
use crate::db::repository::RepositoryError;
use crate::services::export::ExportError;
use crate::services::session::SessionError;
use crate::services::vacation::VacationError;

/// API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Invalid request (bad query parameters, malformed body)
    BadRequest(String),
    /// Internal server error
    Internal(String),
    /// Session workflow error
    Session(SessionError),
    /// Vacation request error
    Vacation(VacationError),
    /// Export rendering error
    Export(ExportError),
    /// Store error outside any workflow
    Repository(RepositoryError),
}

fn capacity_response(err: CapacityError) -> (StatusCode, ApiError) {
    match err {
        // Admin misconfiguration is rejected outright, not a conflict
        CapacityError::InvalidTotal { .. } => (
            StatusCode::BAD_REQUEST,
            ApiError::new("INVALID_CAPACITY", err.to_string()),
        ),
        // Someone else took the slot (or a release overshot): re-fetch and retry
        CapacityError::Underflow
        | CapacityError::Overflow { .. }
        | CapacityError::SlotUnavailable { .. } => (
            StatusCode::CONFLICT,
            ApiError::new("SLOT_TAKEN", err.to_string()),
        ),
    }
}

fn repository_response(err: RepositoryError) -> (StatusCode, ApiError) {
    if let Some(capacity) = err.capacity_error() {
        return capacity_response(capacity);
    }
    match err {
        RepositoryError::NotFound { .. } => (
            StatusCode::NOT_FOUND,
            ApiError::new("NOT_FOUND", err.to_string()),
        ),
        RepositoryError::ValidationError { .. } => (
            StatusCode::BAD_REQUEST,
            ApiError::new("VALIDATION_ERROR", err.to_string()),
        ),
        RepositoryError::ConfigurationError { .. } => (
            StatusCode::BAD_REQUEST,
            ApiError::new("CONFIGURATION_ERROR", err.to_string()),
        ),
        _ => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::new("REPOSITORY_ERROR", err.to_string()),
        ),
    }
}

fn session_response(err: SessionError) -> (StatusCode, ApiError) {
    match err {
        SessionError::Validation(e) => (
            StatusCode::BAD_REQUEST,
            ApiError::new("VALIDATION_ERROR", e.to_string()),
        ),
        SessionError::Capacity(e) => capacity_response(e),
        SessionError::DayOutOfRange { .. } => (
            StatusCode::BAD_REQUEST,
            ApiError::new("VALIDATION_ERROR", err.to_string()),
        ),
        SessionError::AlreadyCommitted => (
            StatusCode::CONFLICT,
            ApiError::new("ALREADY_COMMITTED", err.to_string()),
        ),
        SessionError::VacationCommitted => (
            StatusCode::CONFLICT,
            ApiError::new("VACATION_ACTIVE", err.to_string()),
        ),
        SessionError::InvalidState { .. } => (
            StatusCode::CONFLICT,
            ApiError::new("INVALID_STATE", err.to_string()),
        ),
        // Capacity is already adjusted; the commit can be retried idempotently
        SessionError::Persistence(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::new("PERSISTENCE_ERROR", e.to_string()),
        ),
        SessionError::Repository(e) => repository_response(e),
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ApiError::new("BAD_REQUEST", msg))
            }
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("INTERNAL_ERROR", msg),
            ),
            AppError::Session(err) => session_response(err),
            AppError::Vacation(err) => match err {
                VacationError::InsufficientVacationDays { .. }
                | VacationError::DayOutOfRange { .. } => (
                    StatusCode::BAD_REQUEST,
                    ApiError::new("VALIDATION_ERROR", err.to_string()),
                ),
                VacationError::Repository(e) => repository_response(e),
            },
            AppError::Export(err) => match err {
                ExportError::Repository(e) => repository_response(e),
                ExportError::Csv(e) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiError::new("EXPORT_ERROR", e.to_string()),
                ),
            },
            AppError::Repository(err) => repository_response(err),
        };

        (status, Json(error)).into_response()
    }
}

impl From<SessionError> for AppError {
    fn from(err: SessionError) -> Self {
        AppError::Session(err)
    }
}

impl From<VacationError> for AppError {
    fn from(err: VacationError) -> Self {
        AppError::Vacation(err)
    }
}

impl From<ExportError> for AppError {
    fn from(err: ExportError) -> Self {
        AppError::Export(err)
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        AppError::Repository(err)
    }
}
