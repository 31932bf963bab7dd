//! Data Transfer Objects for the HTTP API.
//!
//! Render models are served as-is from [`crate::api`]; the listing, session
//! and job bodies below are specific to the HTTP surface.

use serde::{Deserialize, Serialize};

pub use crate::api::{Category, ClassifiedCell, RenderedGrid, RenderedRow, TableId};
pub use crate::services::job_tracker::{JobStatus, LogEntry};

use crate::services::session::TimetableSnapshot;

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// `loaded` when a dataset is in the session, `empty` otherwise
    pub session: String,
}

/// Body of `POST /v1/generation-result`: what the solver backend answered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationResultRequest {
    /// Whether the backend reported success
    pub success: bool,
    /// The backend body. A JSON string is taken as raw response text.
    pub body: serde_json::Value,
}

/// Tables of one category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: Category,
    /// Tab key (`SEM`, `INSTRUCTOR`, `LAB`)
    pub key: String,
    /// Tab label
    pub label: String,
    pub count: usize,
}

/// Summary of the dataset currently in the session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSummary {
    /// Number of tables, recognized or not
    pub tables: usize,
    pub checksum: String,
    pub loaded_at: chrono::DateTime<chrono::Utc>,
    pub counts: Vec<CategoryCount>,
}

impl From<&TimetableSnapshot> for SessionSummary {
    fn from(snapshot: &TimetableSnapshot) -> Self {
        Self {
            tables: snapshot.dataset().len(),
            checksum: snapshot.checksum().to_string(),
            loaded_at: snapshot.loaded_at(),
            counts: snapshot
                .counts()
                .into_iter()
                .map(|(category, count)| CategoryCount {
                    category,
                    key: category.key().to_string(),
                    label: category.label().to_string(),
                    count,
                })
                .collect(),
        }
    }
}

/// One listed table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimetableEntry {
    pub table_id: TableId,
    /// Display name
    pub name: String,
}

impl From<&TableId> for TimetableEntry {
    fn from(table_id: &TableId) -> Self {
        Self {
            table_id: table_id.clone(),
            name: table_id.friendly_name(),
        }
    }
}

/// One tab of the listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryListing {
    pub category: Category,
    pub key: String,
    pub label: String,
    pub tables: Vec<TimetableEntry>,
}

/// Categorized listing of the current dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimetableListResponse {
    pub checksum: String,
    pub categories: Vec<CategoryListing>,
    /// Tables matching no category prefix
    pub unrecognized: Vec<TimetableEntry>,
    pub total: usize,
}

impl From<&TimetableSnapshot> for TimetableListResponse {
    fn from(snapshot: &TimetableSnapshot) -> Self {
        let categories = Category::ALL
            .into_iter()
            .map(|category| CategoryListing {
                category,
                key: category.key().to_string(),
                label: category.label().to_string(),
                tables: snapshot.tables(category).iter().map(Into::into).collect(),
            })
            .collect();

        Self {
            checksum: snapshot.checksum().to_string(),
            categories,
            unrecognized: snapshot
                .categories()
                .unrecognized()
                .iter()
                .map(Into::into)
                .collect(),
            total: snapshot.dataset().len(),
        }
    }
}

/// Response of `DELETE /v1/timetables`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClearResponse {
    /// Whether a dataset was loaded before the call
    pub cleared: bool,
}

/// Response for export creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportStartedResponse {
    /// Job ID for tracking the batch
    pub job_id: String,
    pub category: Category,
    /// Number of deliveries scheduled
    pub scheduled: usize,
    /// Message about the operation
    pub message: String,
}

/// Job status response for a batch export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobStatusResponse {
    pub job_id: String,
    pub category: Category,
    pub status: JobStatus,
    pub scheduled: usize,
    pub delivered: Vec<String>,
    pub failed: usize,
    pub pending: usize,
    /// Log entries
    pub logs: Vec<LogEntry>,
}
