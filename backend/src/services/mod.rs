//! Service layer for the timetable core.
//!
//! Pure transformations over a generated dataset (naming, categorization,
//! day ordering, cell classification, rendering) plus the session that
//! holds the current dataset.

pub mod categorize;
pub mod cells;
pub mod naming;
pub mod ordering;
pub mod render;
pub mod session;

#[cfg(feature = "http-server")]
pub mod job_tracker;

pub use categorize::{categorize, CategorizedTables};
pub use cells::{cell_kind, classify, display_text, FREE_CELL_TEXT};
pub use naming::normalize;
pub use ordering::{day_rank, order_days, CANONICAL_DAY_ORDER};
pub use render::{render_grid, render_table};
pub use session::{generation_allowed, TimetableSession, TimetableSnapshot};
