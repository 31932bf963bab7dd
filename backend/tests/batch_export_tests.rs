//! Batch export timing and delivery against tokio timers.

mod support;

use std::sync::Arc;
use std::time::Duration;

use support::sample_dataset;
use timetable_export::api::{Category, TableId};
use timetable_export::export::{
    ArtifactSink, BatchExporter, DirectorySink, FileNaming, MemorySink, TokioScheduler,
};
use timetable_export::services::TimetableSnapshot;
use timetable_export::TimetableError;

fn exporter(spacing_ms: u64) -> BatchExporter {
    BatchExporter::new(Arc::new(TokioScheduler::current().unwrap()))
        .with_spacing(Duration::from_millis(spacing_ms))
}

#[tokio::test(start_paused = true)]
async fn test_deliveries_are_spaced_from_batch_start() {
    let snapshot = TimetableSnapshot::new(sample_dataset());
    let sink = Arc::new(MemorySink::new());
    let start = tokio::time::Instant::now();

    let mut handle = exporter(100).export_category(&snapshot, Category::Student, sink.clone());
    assert_eq!(handle.scheduled(), 2);
    // nothing goes out synchronously
    assert!(sink.is_empty());

    let mut arrivals = Vec::new();
    while let Some(outcome) = handle.next_outcome().await {
        arrivals.push((outcome.index, tokio::time::Instant::now() - start));
        assert!(outcome.result.is_ok());
    }

    assert_eq!(arrivals.len(), 2);
    for (index, elapsed) in arrivals {
        let due = Duration::from_millis(100 * (index as u64 + 1));
        assert!(elapsed >= due, "delivery {} at {:?}", index, elapsed);
        assert!(elapsed < due + Duration::from_millis(100));
    }
    assert_eq!(sink.file_names(), vec!["TT-Sem-sem3_cse.csv", "TT-Sem-sem1_it.csv"]);
}

#[tokio::test(start_paused = true)]
async fn test_rejected_delivery_does_not_stop_others() {
    let snapshot = TimetableSnapshot::new(sample_dataset());
    let sink = Arc::new(MemorySink::rejecting(["Sem 3 - CSE"]));

    let report = exporter(50)
        .with_naming(FileNaming::FriendlyName)
        .export_category(&snapshot, Category::Student, sink.clone())
        .wait()
        .await;

    assert_eq!(report.scheduled, 2);
    assert_eq!(report.delivered, vec!["Sem 1 - IT.csv"]);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].table_id, TableId::new("TT-Sem-sem3_cse"));
    assert!(matches!(report.failures[0].error, TimetableError::Sink { .. }));
    assert!(!report.is_success());
    assert_eq!(sink.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_empty_category_finishes_immediately() {
    let dataset = timetable_export::models::RawTimetableSet::new();
    let snapshot = TimetableSnapshot::new(dataset);
    let report = exporter(100)
        .export_category(&snapshot, Category::Lab, Arc::new(MemorySink::new()))
        .wait()
        .await;
    assert_eq!(report.scheduled, 0);
    assert!(report.is_success());
}

#[tokio::test(start_paused = true)]
async fn test_export_survives_session_replacement() {
    let session = timetable_export::services::TimetableSession::new();
    let snapshot = session.replace(sample_dataset());
    let sink = Arc::new(MemorySink::new());

    let handle = exporter(100).export_category(&snapshot, Category::Lab, sink.clone());
    session.clear();
    drop(snapshot);

    let report = handle.wait().await;
    assert!(report.is_success());
    assert_eq!(sink.file_names(), vec!["TT-Lab-L1.csv"]);
}

#[tokio::test]
async fn test_directory_sink_receives_files() {
    let dir = tempfile::tempdir().unwrap();
    let snapshot = TimetableSnapshot::new(sample_dataset());
    let sink: Arc<dyn ArtifactSink> = Arc::new(DirectorySink::new(dir.path().join("exports")));

    let report = exporter(1)
        .export_category(&snapshot, Category::Instructor, sink)
        .wait()
        .await;
    assert!(report.is_success());

    let written = std::fs::read_to_string(dir.path().join("exports").join("TT-Inst-JSmith.csv"))
        .unwrap();
    assert!(written.starts_with("Day,9-10,10-11,11-12\nMonday,"));
}
