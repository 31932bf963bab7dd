//! Job tracking for background batch exports.
//!
//! Each export started by a caller gets a job id. Deliveries report into the
//! job as they finish, so the caller can poll progress while the spaced-out
//! batch is still running.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::api::Category;
use crate::export::batch::{DeliveryOutcome, ExportHandle};

/// A single log entry with timestamp and message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub level: LogLevel,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// Job status enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Running,
    /// Every delivery reached the sink
    Completed,
    /// At least one delivery failed; the others were still attempted
    Failed,
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            JobStatus::Running => "running",
            JobStatus::Completed => "completed",
            JobStatus::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// Progress of one batch export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportJob {
    pub job_id: String,
    pub category: Category,
    pub status: JobStatus,
    pub scheduled: usize,
    /// Delivered file names, in completion order
    pub delivered: Vec<String>,
    pub failed: usize,
    pub logs: Vec<LogEntry>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub completed_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl ExportJob {
    /// Deliveries that have not reported yet.
    pub fn pending(&self) -> usize {
        self.scheduled
            .saturating_sub(self.delivered.len() + self.failed)
    }
}

/// In-memory export job tracker.
#[derive(Clone, Default)]
pub struct JobTracker {
    jobs: Arc<RwLock<HashMap<String, ExportJob>>>,
}

impl JobTracker {
    /// Create a new job tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a batch of `scheduled` deliveries and return its job id.
    pub fn create_job(&self, category: Category, scheduled: usize) -> String {
        let job_id = Uuid::new_v4().to_string();
        let now = chrono::Utc::now();
        let job = ExportJob {
            job_id: job_id.clone(),
            category,
            status: JobStatus::Running,
            scheduled,
            delivered: Vec::new(),
            failed: 0,
            logs: vec![LogEntry {
                timestamp: now,
                level: LogLevel::Info,
                message: format!("Scheduled {} deliveries for {}", scheduled, category.label()),
            }],
            created_at: now,
            completed_at: None,
        };
        self.jobs.write().insert(job_id.clone(), job);
        job_id
    }

    /// Add a log entry to a job.
    pub fn log(&self, job_id: &str, level: LogLevel, message: impl Into<String>) {
        let mut jobs = self.jobs.write();
        if let Some(job) = jobs.get_mut(job_id) {
            job.logs.push(LogEntry {
                timestamp: chrono::Utc::now(),
                level,
                message: message.into(),
            });
        }
    }

    /// Record the outcome of one delivery.
    pub fn record_delivery(&self, job_id: &str, outcome: &DeliveryOutcome) {
        let mut jobs = self.jobs.write();
        let Some(job) = jobs.get_mut(job_id) else {
            return;
        };
        let (level, message) = match &outcome.result {
            Ok(file_name) => {
                job.delivered.push(file_name.clone());
                (LogLevel::Success, format!("Delivered {}", file_name))
            }
            Err(e) => {
                job.failed += 1;
                (LogLevel::Error, e.to_string())
            }
        };
        job.logs.push(LogEntry {
            timestamp: chrono::Utc::now(),
            level,
            message,
        });
    }

    /// Close a job once every delivery has reported.
    pub fn finish_job(&self, job_id: &str) {
        let mut jobs = self.jobs.write();
        if let Some(job) = jobs.get_mut(job_id) {
            let now = chrono::Utc::now();
            let (status, level, message) = if job.failed == 0 && job.pending() == 0 {
                (
                    JobStatus::Completed,
                    LogLevel::Success,
                    format!("Exported {} tables", job.delivered.len()),
                )
            } else {
                (
                    JobStatus::Failed,
                    LogLevel::Warning,
                    format!(
                        "Exported {} of {} tables",
                        job.delivered.len(),
                        job.scheduled
                    ),
                )
            };
            job.status = status;
            job.completed_at = Some(now);
            job.logs.push(LogEntry {
                timestamp: now,
                level,
                message,
            });
        }
    }

    /// Get a job by ID.
    pub fn get_job(&self, job_id: &str) -> Option<ExportJob> {
        self.jobs.read().get(job_id).cloned()
    }

    /// Get all logs for a job.
    pub fn get_logs(&self, job_id: &str) -> Vec<LogEntry> {
        self.jobs
            .read()
            .get(job_id)
            .map(|job| job.logs.clone())
            .unwrap_or_default()
    }
}

/// Drain a running batch into the tracker, then close the job.
pub async fn track_export(tracker: JobTracker, job_id: String, mut handle: ExportHandle) {
    while let Some(outcome) = handle.next_outcome().await {
        tracker.record_delivery(&job_id, &outcome);
    }
    tracker.finish_job(&job_id);
}
