//! Canonical day ordering for a single grid.

use crate::models::grid::TimetableGrid;

/// Weekday order used for every rendered and exported table.
pub const CANONICAL_DAY_ORDER: [&str; 5] = ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"];

/// Sort key of a day name. Days outside the canonical week share a key past
/// the last weekday.
pub fn day_rank(day: &str) -> usize {
    CANONICAL_DAY_ORDER
        .iter()
        .position(|canonical| *canonical == day)
        .unwrap_or(CANONICAL_DAY_ORDER.len())
}

/// Day rows in canonical order.
///
/// Canonical days come first, Monday to Friday; any other day follows in the
/// order it appeared in the grid. Headers are not touched.
pub fn order_days(grid: &TimetableGrid) -> Vec<(&str, &[String])> {
    let mut days: Vec<(&str, &[String])> = grid.rows().collect();
    // stable: unknown days keep their arrival order
    days.sort_by_key(|(day, _)| day_rank(day));
    days
}
