//! End-to-end tests: generation result in, names, tabs, render models and
//! CSV text out.

mod support;

use support::sample_dataset;
use timetable_export::api::{BusyKind, Category, CellKind, TableId};
use timetable_export::export::csv;
use timetable_export::models::GenerationResponse;
use timetable_export::services::{categorize, render_table, TimetableSession};
use timetable_export::TimetableError;

#[test]
fn test_categories_keep_arrival_order() {
    let dataset = sample_dataset();
    let tabs = categorize(dataset.table_ids());

    assert_eq!(
        tabs.get(Category::Student),
        [TableId::new("TT-Sem-sem3_cse"), TableId::new("TT-Sem-sem1_it")]
    );
    assert_eq!(tabs.get(Category::Instructor), [TableId::new("TT-Inst-JSmith")]);
    assert_eq!(tabs.get(Category::Lab), [TableId::new("TT-Lab-L1")]);
    assert_eq!(tabs.unrecognized(), [TableId::new("Summary")]);
    assert_eq!(tabs.recognized_len(), 4);
}

#[test]
fn test_friendly_names() {
    let names: Vec<String> = sample_dataset()
        .table_ids()
        .map(TableId::friendly_name)
        .collect();
    assert_eq!(names, vec!["Sem 3 - CSE", "JSmith", "Summary", "L1", "Sem 1 - IT"]);
}

#[test]
fn test_render_model_orders_days_and_classifies_cells() {
    let dataset = sample_dataset();
    let rendered = render_table(&dataset, &TableId::new("TT-Sem-sem3_cse")).unwrap();

    assert_eq!(rendered.title, "Sem 3 - CSE");
    assert_eq!(rendered.category, Some(Category::Student));
    assert_eq!(rendered.headers, vec!["9-10", "10-11", "11-12"]);

    let days: Vec<&str> = rendered.rows.iter().map(|row| row.day.as_str()).collect();
    assert_eq!(days, vec!["Monday", "Tuesday", "Wednesday", "Saturday"]);

    let monday = &rendered.rows[0].cells;
    assert_eq!(monday[0].kind, CellKind::Busy(BusyKind::Lecture));
    assert_eq!(monday[1].kind, CellKind::Busy(BusyKind::Lab));
    assert_eq!(monday[2].kind, CellKind::Break);

    let tuesday = &rendered.rows[1].cells;
    assert_eq!(tuesday[0].display_text, "Math-LEC");
    assert_eq!(tuesday[1].display_text, "-");
    assert!(tuesday[1].kind.is_free());

    let saturday = &rendered.rows[3].cells;
    assert_eq!(saturday[0].kind, CellKind::Busy(BusyKind::Other));
}

#[test]
fn test_csv_export_of_student_table() {
    let dataset = sample_dataset();
    let id = TableId::new("TT-Sem-sem3_cse");
    let text = csv::serialize(&id, dataset.get(id.as_str()).unwrap()).unwrap();
    assert_eq!(
        text,
        "Day,9-10,10-11,11-12\n\
         Monday,OS-LEC,CN-LAB,lunch\n\
         Tuesday,Math-LEC,-,Lunch\n\
         Wednesday,DS-LEC,-,Lunch\n\
         Saturday,Seminar,-,-\n"
    );
}

#[test]
fn test_csv_export_quotes_commas() {
    let dataset = sample_dataset();
    let id = TableId::new("TT-Inst-JSmith");
    let text = csv::serialize(&id, dataset.get(id.as_str()).unwrap()).unwrap();
    assert_eq!(
        text,
        "Day,9-10,10-11,11-12\n\
         Monday,-,CN-LAB,\"Office hours, room 4\"\n\
         Friday,OS-LEC,-,-\n"
    );
}

#[test]
fn test_numeric_cells_are_exported_as_text() {
    let dataset = sample_dataset();
    let id = TableId::new("Summary");
    let text = csv::serialize(&id, dataset.get(id.as_str()).unwrap()).unwrap();
    assert_eq!(text, "Day,total\nMonday,42\n");
}

#[test]
fn test_unknown_table_is_reported() {
    let err = render_table(&sample_dataset(), &TableId::new("TT-Lab-L9")).unwrap_err();
    assert_eq!(
        err,
        TimetableError::UnknownTable {
            table_id: TableId::new("TT-Lab-L9")
        }
    );
}

#[test]
fn test_generation_round_trip_through_session() {
    let session = TimetableSession::new();
    let response = GenerationResponse::from_body(true, support::SAMPLE_DATASET).unwrap();
    let snapshot = session.apply_generation(response).unwrap();
    assert_eq!(snapshot.dataset().len(), 5);
    assert_eq!(snapshot.tables(Category::Student).len(), 2);

    let failure = GenerationResponse::from_body(false, r#"{"error": "Solver timed out"}"#).unwrap();
    let err = session.apply_generation(failure).unwrap_err();
    assert_eq!(err.to_string(), "Solver timed out");
    assert!(session.current().is_none());

    // old readers keep their snapshot
    assert_eq!(snapshot.dataset().len(), 5);
}

#[test]
fn test_failure_without_error_field_uses_fallback_message() {
    let session = TimetableSession::new();
    let failure = GenerationResponse::from_body(false, "<html>502 Bad Gateway</html>").unwrap();
    let err = session.apply_generation(failure).unwrap_err();
    assert_eq!(err.to_string(), "An unknown server error occurred.");
}
