//! Public API surface for the timetable core.
//!
//! This file consolidates the identifier, category and render-model types
//! shared by the services, the export pipeline and the HTTP layer.
//! All types derive Serialize/Deserialize for JSON serialization.

pub use crate::models::grid::{RawTimetableSet, TimetableGrid};
pub use crate::models::response::GenerationResponse;
pub use crate::services::categorize::CategorizedTables;

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Identifier prefix for student (semester/branch) timetables.
pub const STUDENT_PREFIX: &str = "TT-Sem-";
/// Identifier prefix for instructor timetables.
pub const INSTRUCTOR_PREFIX: &str = "TT-Inst-";
/// Identifier prefix for lab room timetables.
pub const LAB_PREFIX: &str = "TT-Lab-";

/// Raw key identifying one generated timetable.
///
/// The audience category is encoded in the prefix; see [`Category::of`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TableId(pub String);

impl TableId {
    pub fn new(value: impl Into<String>) -> Self {
        TableId(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Category derived from the identifier prefix, `None` for unrecognized ids.
    pub fn category(&self) -> Option<Category> {
        Category::of(&self.0)
    }

    /// Display label for this identifier.
    pub fn friendly_name(&self) -> String {
        crate::services::naming::normalize(&self.0)
    }
}

impl std::fmt::Display for TableId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TableId {
    fn from(value: &str) -> Self {
        TableId(value.to_string())
    }
}

impl From<String> for TableId {
    fn from(value: String) -> Self {
        TableId(value)
    }
}

impl std::borrow::Borrow<str> for TableId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TableId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Audience a generated timetable is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Student,
    Instructor,
    Lab,
}

impl Category {
    /// All categories in tab order. Also the prefix check order.
    pub const ALL: [Category; 3] = [Category::Student, Category::Instructor, Category::Lab];

    /// Identifier prefix carrying this category.
    pub fn prefix(&self) -> &'static str {
        match self {
            Category::Student => STUDENT_PREFIX,
            Category::Instructor => INSTRUCTOR_PREFIX,
            Category::Lab => LAB_PREFIX,
        }
    }

    /// Short tab key.
    pub fn key(&self) -> &'static str {
        match self {
            Category::Student => "SEM",
            Category::Instructor => "INSTRUCTOR",
            Category::Lab => "LAB",
        }
    }

    /// Tab label.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Student => "Students",
            Category::Instructor => "Instructors",
            Category::Lab => "Lab Rooms",
        }
    }

    /// Category of a raw identifier, checked in Student, Instructor, Lab order.
    pub fn of(table_id: &str) -> Option<Category> {
        Category::ALL
            .into_iter()
            .find(|category| table_id.starts_with(category.prefix()))
    }
}

impl FromStr for Category {
    type Err = String;

    /// Parse a category from its tab key, its serialized name or its label.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sem" | "student" | "students" => Ok(Category::Student),
            "instructor" | "instructors" | "inst" => Ok(Category::Instructor),
            "lab" | "labs" | "lab rooms" => Ok(Category::Lab),
            _ => Err(format!("Unknown category: {}", s)),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Reachability of the solver backend, as observed by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendStatus {
    Checking,
    Online,
    Offline,
}

/// Kind of a busy cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BusyKind {
    Lab,
    Lecture,
    Other,
}

/// Semantic category of one grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "subtype", rename_all = "lowercase")]
pub enum CellKind {
    Free,
    Break,
    Busy(BusyKind),
}

impl CellKind {
    pub fn is_free(&self) -> bool {
        matches!(self, CellKind::Free)
    }
}

/// A cell after classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedCell {
    /// Text to show: `-` for free cells, the trimmed value otherwise
    pub display_text: String,
    #[serde(flatten)]
    pub kind: CellKind,
}

/// One day of a rendered timetable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderedRow {
    pub day: String,
    pub cells: Vec<ClassifiedCell>,
}

/// Render model of one timetable: ordered days, classified cells.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderedGrid {
    pub table_id: TableId,
    pub title: String,
    pub category: Option<Category>,
    pub headers: Vec<String>,
    pub rows: Vec<RenderedRow>,
}
