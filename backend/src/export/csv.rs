//! CSV rendering of one timetable.
//!
//! Layout: a `Day` header line followed by the time slots, then one line per
//! day in canonical order. Free cells are written as `-`, everything else as
//! its trimmed text. Fields containing a comma, a double quote or a line break
//! are quoted, and embedded quotes are doubled.

use std::iter;

use crate::api::TableId;
use crate::error::{TimetableError, TimetableResult};
use crate::models::grid::{TimetableGrid, DAY_HEADER_KEY};
use crate::services::{cells, ordering};

/// Serialize a grid to CSV text.
///
/// Fails with `MalformedGrid` when a row does not match the header length.
pub fn serialize(table_id: &TableId, grid: &TimetableGrid) -> TimetableResult<String> {
    grid.validate(table_id)?;

    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Necessary)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    let header = iter::once(DAY_HEADER_KEY).chain(grid.headers().iter().map(String::as_str));
    writer.write_record(header)?;

    for (day, raw_cells) in ordering::order_days(grid) {
        let record = iter::once(day).chain(raw_cells.iter().map(|raw| cells::display_text(raw)));
        writer.write_record(record)?;
    }

    let bytes = writer.into_inner().map_err(|e| TimetableError::Csv {
        message: e.error().to_string(),
    })?;
    String::from_utf8(bytes).map_err(|e| TimetableError::Csv {
        message: e.to_string(),
    })
}
