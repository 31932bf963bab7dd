//! CSV export pipeline.
//!
//! [`csv`] turns one grid into CSV text, [`sink`] is where finished artifacts
//! go, and [`batch`] spaces out the deliveries of a whole category through a
//! [`scheduler::DeliveryScheduler`].

pub mod batch;
pub mod csv;
pub mod scheduler;
pub mod sink;

pub use batch::{
    build_artifact, export_one, BatchExporter, DeliveryOutcome, ExportFailure, ExportHandle,
    ExportReport, FileNaming, DEFAULT_DELIVERY_SPACING,
};
pub use scheduler::{DeliveryScheduler, DeliveryTask, QueuedScheduler, TokioScheduler};
pub use sink::{ArtifactSink, CsvArtifact, DirectorySink, MemorySink, CSV_MIME_TYPE};
