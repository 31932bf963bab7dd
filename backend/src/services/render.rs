//! Render model for one timetable.
//!
//! Combines day ordering, cell classification and the display name into the
//! value a UI draws as a grid.

use log::warn;

use crate::api::{RenderedGrid, RenderedRow, TableId};
use crate::error::{TimetableError, TimetableResult};
use crate::models::grid::{RawTimetableSet, TimetableGrid};
use crate::services::{cells, ordering};

/// Build the render model of a grid.
///
/// Fails with `MalformedGrid` when a row does not match the header length.
pub fn render_grid(table_id: &TableId, grid: &TimetableGrid) -> TimetableResult<RenderedGrid> {
    if let Err(e) = grid.validate(table_id) {
        warn!("refusing to render {}: {}", table_id, e);
        return Err(e);
    }

    let rows = ordering::order_days(grid)
        .into_iter()
        .map(|(day, raw_cells)| RenderedRow {
            day: day.to_string(),
            cells: raw_cells.iter().map(|raw| cells::classify(raw)).collect(),
        })
        .collect();

    Ok(RenderedGrid {
        table_id: table_id.clone(),
        title: table_id.friendly_name(),
        category: table_id.category(),
        headers: grid.headers().to_vec(),
        rows,
    })
}

/// Look a table up in the dataset and render it.
pub fn render_table(dataset: &RawTimetableSet, table_id: &TableId) -> TimetableResult<RenderedGrid> {
    let grid = dataset
        .get(table_id.as_str())
        .ok_or_else(|| TimetableError::unknown_table(table_id))?;
    render_grid(table_id, grid)
}
