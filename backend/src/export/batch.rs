//! Batch export of every table in a category.
//!
//! Deliveries are spaced out: the k-th table (0-based) is delivered
//! `(k + 1) * spacing` after the batch starts. Each delivery is an independent
//! task; a failing one is recorded and the rest carry on. There is no
//! cancellation. A single export through [`export_one`] is delivered
//! immediately.

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

use crate::api::{Category, TableId};
use crate::config::ExportConfig;
use crate::error::{TimetableError, TimetableResult};
use crate::export::csv;
use crate::export::scheduler::DeliveryScheduler;
use crate::export::sink::{ArtifactSink, CsvArtifact};
use crate::models::grid::RawTimetableSet;
use crate::services::session::TimetableSnapshot;

/// Default spacing between two deliveries of a batch.
pub const DEFAULT_DELIVERY_SPACING: Duration = Duration::from_millis(100);

/// How artifacts are named.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileNaming {
    /// Raw table id, e.g. `TT-Sem-sem3_cse.csv`
    #[default]
    TableId,
    /// Display name, e.g. `Sem 3 - CSE.csv`
    FriendlyName,
}

impl FileNaming {
    /// Artifact base name for a table.
    pub fn artifact_name(&self, table_id: &TableId) -> String {
        match self {
            FileNaming::TableId => table_id.as_str().to_string(),
            FileNaming::FriendlyName => table_id.friendly_name(),
        }
    }
}

impl FromStr for FileNaming {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "table_id" | "raw" | "id" => Ok(FileNaming::TableId),
            "friendly_name" | "friendly" => Ok(FileNaming::FriendlyName),
            _ => Err(format!("Unknown file naming: {}", s)),
        }
    }
}

/// Resolve and serialize one table.
pub fn build_artifact(
    dataset: &RawTimetableSet,
    table_id: &TableId,
    naming: FileNaming,
) -> TimetableResult<CsvArtifact> {
    let grid = dataset
        .get(table_id.as_str())
        .ok_or_else(|| TimetableError::unknown_table(table_id))?;
    let content = csv::serialize(table_id, grid)?;
    Ok(CsvArtifact::new(naming.artifact_name(table_id), content))
}

/// Export a single table straight to the sink.
pub fn export_one(
    dataset: &RawTimetableSet,
    table_id: &TableId,
    naming: FileNaming,
    sink: &dyn ArtifactSink,
) -> TimetableResult<CsvArtifact> {
    let artifact = build_artifact(dataset, table_id, naming)?;
    sink.deliver(&artifact)?;
    Ok(artifact)
}

/// Result of one scheduled delivery.
#[derive(Debug, Clone)]
pub struct DeliveryOutcome {
    /// Position of the table in the batch
    pub index: usize,
    pub table_id: TableId,
    /// Delivered file name, or why the delivery failed
    pub result: Result<String, TimetableError>,
}

/// A delivery that did not make it to the sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFailure {
    pub index: usize,
    pub table_id: TableId,
    pub error: TimetableError,
}

/// Everything that happened to one batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportReport {
    /// Number of deliveries scheduled
    pub scheduled: usize,
    /// Delivered file names, in batch order
    pub delivered: Vec<String>,
    /// Failed deliveries, in batch order
    pub failures: Vec<ExportFailure>,
}

impl ExportReport {
    /// Every scheduled delivery reached the sink.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty() && self.delivered.len() == self.scheduled
    }

    /// Deliveries that never reported back (their task was dropped unrun).
    pub fn unreported(&self) -> usize {
        self.scheduled
            .saturating_sub(self.delivered.len() + self.failures.len())
    }
}

/// Receiving end of a running batch.
///
/// Dropping the handle does not stop the batch.
#[derive(Debug)]
pub struct ExportHandle {
    scheduled: usize,
    outcomes: mpsc::UnboundedReceiver<DeliveryOutcome>,
}

impl ExportHandle {
    pub fn scheduled(&self) -> usize {
        self.scheduled
    }

    /// Next outcome as deliveries finish; `None` once every task is done.
    pub async fn next_outcome(&mut self) -> Option<DeliveryOutcome> {
        self.outcomes.recv().await
    }

    /// Wait for every delivery task and summarize.
    pub async fn wait(mut self) -> ExportReport {
        let mut outcomes = Vec::with_capacity(self.scheduled);
        while let Some(outcome) = self.outcomes.recv().await {
            outcomes.push(outcome);
        }
        outcomes.sort_by_key(|outcome| outcome.index);

        let mut report = ExportReport {
            scheduled: self.scheduled,
            ..Default::default()
        };
        for outcome in outcomes {
            match outcome.result {
                Ok(file_name) => report.delivered.push(file_name),
                Err(error) => report.failures.push(ExportFailure {
                    index: outcome.index,
                    table_id: outcome.table_id,
                    error,
                }),
            }
        }
        report
    }
}

/// Sequences CSV deliveries for many tables.
#[derive(Clone)]
pub struct BatchExporter {
    scheduler: Arc<dyn DeliveryScheduler>,
    spacing: Duration,
    naming: FileNaming,
}

impl BatchExporter {
    pub fn new(scheduler: Arc<dyn DeliveryScheduler>) -> Self {
        Self {
            scheduler,
            spacing: DEFAULT_DELIVERY_SPACING,
            naming: FileNaming::default(),
        }
    }

    /// Exporter using the spacing and naming from configuration.
    pub fn from_config(scheduler: Arc<dyn DeliveryScheduler>, config: &ExportConfig) -> Self {
        Self::new(scheduler)
            .with_spacing(config.delivery_spacing())
            .with_naming(config.export.file_naming)
    }

    pub fn with_spacing(mut self, spacing: Duration) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn with_naming(mut self, naming: FileNaming) -> Self {
        self.naming = naming;
        self
    }

    pub fn spacing(&self) -> Duration {
        self.spacing
    }

    pub fn naming(&self) -> FileNaming {
        self.naming
    }

    /// Delay of the `index`-th delivery, measured from the start of the batch.
    pub fn delay_for(&self, index: usize) -> Duration {
        let slot = u32::try_from(index + 1).unwrap_or(u32::MAX);
        self.spacing.saturating_mul(slot)
    }

    /// Schedule one delivery per table id.
    pub fn export_all(
        &self,
        table_ids: &[TableId],
        dataset: Arc<RawTimetableSet>,
        sink: Arc<dyn ArtifactSink>,
    ) -> ExportHandle {
        let (sender, outcomes) = mpsc::unbounded_channel();

        for (index, table_id) in table_ids.iter().enumerate() {
            let sender = sender.clone();
            let dataset = Arc::clone(&dataset);
            let sink = Arc::clone(&sink);
            let table_id = table_id.clone();
            let naming = self.naming;

            self.scheduler.schedule(
                self.delay_for(index),
                Box::new(move || {
                    let result = export_one(&dataset, &table_id, naming, sink.as_ref())
                        .map(|artifact| artifact.file_name());
                    match &result {
                        Ok(file_name) => debug!("delivered {} ({})", file_name, table_id),
                        Err(e) => warn!("export of {} failed: {}", table_id, e),
                    }
                    // the handle may already be gone
                    let _ = sender.send(DeliveryOutcome {
                        index,
                        table_id,
                        result,
                    });
                }),
            );
        }

        debug!(
            "scheduled {} deliveries every {:?}",
            table_ids.len(),
            self.spacing
        );
        ExportHandle {
            scheduled: table_ids.len(),
            outcomes,
        }
    }

    /// Export every table of one category of a snapshot.
    pub fn export_category(
        &self,
        snapshot: &TimetableSnapshot,
        category: Category,
        sink: Arc<dyn ArtifactSink>,
    ) -> ExportHandle {
        self.export_all(
            snapshot.tables(category),
            Arc::clone(snapshot.dataset()),
            sink,
        )
    }
}

impl std::fmt::Debug for BatchExporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchExporter")
            .field("spacing", &self.spacing)
            .field("naming", &self.naming)
            .finish()
    }
}
