//! Application state for the HTTP server.

use std::sync::Arc;

use crate::config::ExportConfig;
use crate::error::TimetableResult;
use crate::export::batch::BatchExporter;
use crate::export::scheduler::TokioScheduler;
use crate::export::sink::{ArtifactSink, DirectorySink};
use crate::services::job_tracker::JobTracker;
use crate::services::session::TimetableSession;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Dataset of the last successful generation
    pub session: Arc<TimetableSession>,
    /// Progress of background exports
    pub job_tracker: JobTracker,
    pub exporter: BatchExporter,
    /// Where batch exports are written
    pub sink: Arc<dyn ArtifactSink>,
}

impl AppState {
    /// State for a server running on the current tokio runtime, writing
    /// batch exports under the configured output directory.
    pub fn new(config: ExportConfig) -> TimetableResult<Self> {
        let scheduler = Arc::new(TokioScheduler::current()?);
        let exporter = BatchExporter::from_config(scheduler, &config);
        let sink = Arc::new(DirectorySink::new(config.output_dir()));
        Ok(Self::with_parts(exporter, sink))
    }

    /// State with an explicit exporter and sink.
    pub fn with_parts(exporter: BatchExporter, sink: Arc<dyn ArtifactSink>) -> Self {
        Self {
            session: Arc::new(TimetableSession::new()),
            job_tracker: JobTracker::new(),
            exporter,
            sink,
        }
    }
}
