//! Cell classification shared by the render model and CSV export.

use crate::api::{BusyKind, CellKind, ClassifiedCell};

/// Text shown for a free cell.
pub const FREE_CELL_TEXT: &str = "-";

/// Semantic kind of a raw cell value.
pub fn cell_kind(raw: &str) -> CellKind {
    let value = raw.trim();
    if value.is_empty() || value == "0" {
        CellKind::Free
    } else if value.eq_ignore_ascii_case("lunch") {
        CellKind::Break
    } else if value.contains("-LAB") {
        CellKind::Busy(BusyKind::Lab)
    } else if value.contains("-LEC") {
        CellKind::Busy(BusyKind::Lecture)
    } else {
        CellKind::Busy(BusyKind::Other)
    }
}

/// Text of a cell as displayed and exported: `-` when free, trimmed otherwise.
pub fn display_text(raw: &str) -> &str {
    if cell_kind(raw).is_free() {
        FREE_CELL_TEXT
    } else {
        raw.trim()
    }
}

/// Classify one raw cell value.
pub fn classify(raw: &str) -> ClassifiedCell {
    ClassifiedCell {
        display_text: display_text(raw).to_string(),
        kind: cell_kind(raw),
    }
}
