//! In-memory session holding the current timetable dataset.
//!
//! A session holds at most one snapshot. Each generation replaces it whole;
//! readers keep the `Arc` they obtained, so a replacement never changes data
//! under an in-flight render or export.

use chrono::{DateTime, Utc};
use log::{debug, info};
use parking_lot::RwLock;
use std::sync::Arc;

use crate::api::{BackendStatus, Category, TableId};
use crate::error::{TimetableError, TimetableResult};
use crate::models::checksum::dataset_checksum;
use crate::models::grid::RawTimetableSet;
use crate::models::response::GenerationResponse;
use crate::services::categorize::{categorize, CategorizedTables};

/// Immutable view of one generation result.
#[derive(Debug)]
pub struct TimetableSnapshot {
    dataset: Arc<RawTimetableSet>,
    categories: CategorizedTables,
    checksum: String,
    loaded_at: DateTime<Utc>,
}

impl TimetableSnapshot {
    /// Build a snapshot, categorizing the dataset once.
    pub fn new(dataset: RawTimetableSet) -> Self {
        let categories = categorize(dataset.table_ids());
        let checksum = dataset_checksum(&dataset);
        Self {
            dataset: Arc::new(dataset),
            categories,
            checksum,
            loaded_at: Utc::now(),
        }
    }

    pub fn dataset(&self) -> &Arc<RawTimetableSet> {
        &self.dataset
    }

    pub fn categories(&self) -> &CategorizedTables {
        &self.categories
    }

    /// Table ids of one category, in arrival order.
    pub fn tables(&self, category: Category) -> &[TableId] {
        self.categories.get(category)
    }

    /// Number of tables per category, in tab order.
    pub fn counts(&self) -> [(Category, usize); 3] {
        self.categories.counts()
    }

    pub fn checksum(&self) -> &str {
        &self.checksum
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }
}

/// Holder of the current snapshot.
#[derive(Debug, Default)]
pub struct TimetableSession {
    current: RwLock<Option<Arc<TimetableSnapshot>>>,
}

impl TimetableSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a new dataset, discarding the previous one.
    pub fn replace(&self, dataset: RawTimetableSet) -> Arc<TimetableSnapshot> {
        let snapshot = Arc::new(TimetableSnapshot::new(dataset));
        let counts = snapshot.categories().counts();
        info!(
            "loaded {} timetables (students={}, instructors={}, labs={}, unrecognized={})",
            snapshot.dataset().len(),
            counts[0].1,
            counts[1].1,
            counts[2].1,
            snapshot.categories().unrecognized().len()
        );
        *self.current.write() = Some(Arc::clone(&snapshot));
        snapshot
    }

    /// Drop the current dataset. Returns whether one was loaded.
    pub fn clear(&self) -> bool {
        let had_data = self.current.write().take().is_some();
        if had_data {
            debug!("session cleared");
        }
        had_data
    }

    /// Current snapshot, if any.
    pub fn current(&self) -> Option<Arc<TimetableSnapshot>> {
        self.current.read().clone()
    }

    /// Current snapshot or `NoSession`.
    pub fn require(&self) -> TimetableResult<Arc<TimetableSnapshot>> {
        self.current().ok_or(TimetableError::NoSession)
    }

    pub fn is_loaded(&self) -> bool {
        self.current.read().is_some()
    }

    /// Apply the outcome of a generation request.
    ///
    /// The previous dataset is discarded first; a failed generation leaves the
    /// session empty and returns the backend message as `Backend`.
    pub fn apply_generation(
        &self,
        response: GenerationResponse,
    ) -> TimetableResult<Arc<TimetableSnapshot>> {
        self.clear();
        let dataset = response.into_result()?;
        Ok(self.replace(dataset))
    }
}

/// Whether the caller may start a generation request.
pub fn generation_allowed(status: BackendStatus, file_selected: bool, in_flight: bool) -> bool {
    status == BackendStatus::Online && file_selected && !in_flight
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::grid::TimetableGrid;

    fn dataset(cell: &str) -> RawTimetableSet {
        RawTimetableSet::new()
            .with_table(
                "TT-Sem-sem1_it",
                TimetableGrid::new(["9-10"]).with_day("Monday", [cell]),
            )
            .with_table("TT-Lab-L1", TimetableGrid::new(["9-10"]).with_day("Monday", [cell]))
            .with_table("Notes", TimetableGrid::new(["9-10"]))
    }

    #[test]
    fn test_snapshot_categories_are_memoized() {
        let session = TimetableSession::new();
        assert!(!session.is_loaded());
        let snapshot = session.replace(dataset("x"));
        assert_eq!(snapshot.tables(Category::Student), [TableId::new("TT-Sem-sem1_it")]);
        assert_eq!(snapshot.tables(Category::Lab), [TableId::new("TT-Lab-L1")]);
        assert!(snapshot.tables(Category::Instructor).is_empty());
        assert_eq!(snapshot.categories().unrecognized(), [TableId::new("Notes")]);
        assert_eq!(snapshot.checksum().len(), 64);
        assert_eq!(
            snapshot.counts(),
            [
                (Category::Student, 1),
                (Category::Instructor, 0),
                (Category::Lab, 1)
            ]
        );
    }

    #[test]
    fn test_replace_is_total() {
        let session = TimetableSession::new();
        let first = session.replace(dataset("x"));
        let second = session.replace(RawTimetableSet::new().with_table(
            "TT-Inst-Ann",
            TimetableGrid::new(["9-10"]).with_day("Monday", ["y"]),
        ));

        let current = session.current().unwrap();
        assert!(Arc::ptr_eq(&current, &second));
        assert_eq!(current.dataset().len(), 1);
        assert!(!current.dataset().contains("TT-Lab-L1"));
        // readers holding the old snapshot still see it intact
        assert_eq!(first.dataset().len(), 3);
        assert_ne!(first.checksum(), second.checksum());
    }

    #[test]
    fn test_clear_and_require() {
        let session = TimetableSession::new();
        assert_eq!(session.require().unwrap_err(), TimetableError::NoSession);
        session.replace(dataset("x"));
        assert!(session.clear());
        assert!(!session.clear());
        assert!(session.current().is_none());
    }

    #[test]
    fn test_failed_generation_empties_session() {
        let session = TimetableSession::new();
        session.replace(dataset("x"));
        let err = session
            .apply_generation(GenerationResponse::Failure {
                message: "No selected file".to_string(),
            })
            .unwrap_err();
        assert_eq!(err.to_string(), "No selected file");
        assert!(!session.is_loaded());

        let snapshot = session
            .apply_generation(GenerationResponse::Success(dataset("y")))
            .unwrap();
        assert_eq!(snapshot.dataset().len(), 3);
    }

    #[test]
    fn test_generation_allowed() {
        assert!(generation_allowed(BackendStatus::Online, true, false));
        assert!(!generation_allowed(BackendStatus::Online, false, false));
        assert!(!generation_allowed(BackendStatus::Online, true, true));
        assert!(!generation_allowed(BackendStatus::Checking, true, false));
        assert!(!generation_allowed(BackendStatus::Offline, true, false));
    }
}
