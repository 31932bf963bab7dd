//! Generation response handling.
//!
//! The transport layer hands the core a success flag and the response body.
//! A successful body is the timetable dataset; a failed one carries a single
//! `error` string that is surfaced verbatim.

use crate::error::{TimetableError, TimetableResult};
use crate::models::grid::RawTimetableSet;
use serde_json::Value;

/// Message used when a failed response carries no `error` string.
pub const UNKNOWN_SERVER_ERROR: &str = "An unknown server error occurred.";

/// Outcome of one generation request.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationResponse {
    Success(RawTimetableSet),
    Failure { message: String },
}

impl GenerationResponse {
    /// Interpret a response body given the transport-level success flag.
    pub fn from_value(success: bool, body: &Value) -> TimetableResult<Self> {
        if success {
            return RawTimetableSet::from_value(body).map(GenerationResponse::Success);
        }

        let message = body
            .get("error")
            .and_then(Value::as_str)
            .filter(|message| !message.is_empty())
            .unwrap_or(UNKNOWN_SERVER_ERROR)
            .to_string();
        Ok(GenerationResponse::Failure { message })
    }

    /// Interpret a raw response body.
    ///
    /// A failed response whose body is not JSON still yields a `Failure`.
    pub fn from_body(success: bool, body: &str) -> TimetableResult<Self> {
        match serde_json::from_str::<Value>(body) {
            Ok(value) => Self::from_value(success, &value),
            Err(e) if success => Err(TimetableError::invalid_dataset(format!(
                "invalid JSON: {}",
                e
            ))),
            Err(_) => Ok(GenerationResponse::Failure {
                message: UNKNOWN_SERVER_ERROR.to_string(),
            }),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, GenerationResponse::Success(_))
    }

    /// The dataset, or the backend failure as an error.
    pub fn into_result(self) -> TimetableResult<RawTimetableSet> {
        match self {
            GenerationResponse::Success(set) => Ok(set),
            GenerationResponse::Failure { message } => Err(TimetableError::Backend { message }),
        }
    }
}
