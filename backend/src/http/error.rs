//! HTTP error handling and response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::TimetableError;

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

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Resource not found
    NotFound(String),
    /// Invalid request (validation error)
    BadRequest(String),
    /// Error from the timetable core
    Timetable(TimetableError),
}

impl AppError {
    fn status_and_body(&self) -> (StatusCode, ApiError) {
        match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ApiError::new("NOT_FOUND", msg)),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ApiError::new("BAD_REQUEST", msg))
            }
            AppError::Timetable(e) => {
                let msg = e.to_string();
                match e {
                    TimetableError::UnknownTable { .. } => {
                        (StatusCode::NOT_FOUND, ApiError::new("UNKNOWN_TABLE", msg))
                    }
                    TimetableError::MalformedGrid { reason, .. } => (
                        StatusCode::UNPROCESSABLE_ENTITY,
                        ApiError::new("MALFORMED_GRID", msg).with_details(reason.clone()),
                    ),
                    TimetableError::InvalidDataset { .. } => (
                        StatusCode::UNPROCESSABLE_ENTITY,
                        ApiError::new("INVALID_DATASET", msg),
                    ),
                    TimetableError::NoSession => {
                        (StatusCode::CONFLICT, ApiError::new("NO_SESSION", msg))
                    }
                    TimetableError::Backend { .. } => {
                        (StatusCode::BAD_GATEWAY, ApiError::new("BACKEND_ERROR", msg))
                    }
                    TimetableError::Sink { .. } => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        ApiError::new("SINK_ERROR", msg),
                    ),
                    TimetableError::Csv { .. } => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        ApiError::new("CSV_ERROR", msg),
                    ),
                    TimetableError::Configuration { .. } => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        ApiError::new("CONFIGURATION_ERROR", msg),
                    ),
                }
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = self.status_and_body();
        (status, Json(error)).into_response()
    }
}

impl From<TimetableError> for AppError {
    fn from(err: TimetableError) -> Self {
        AppError::Timetable(err)
    }
}
