//! Error types for the timetable core.
//!
//! Categorization and name normalization never fail; everything that can
//! fail (rendering a malformed table, delivering an artifact, loading
//! configuration) reports through [`TimetableError`].

use crate::api::TableId;

/// Result type for timetable operations
pub type TimetableResult<T> = Result<T, TimetableError>;

/// Error type for timetable operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimetableError {
    /// A grid whose rows do not line up with its `Day` header.
    #[error("Malformed grid for table {table_id}: {reason}")]
    MalformedGrid { table_id: TableId, reason: String },

    /// The table is not part of the current dataset.
    #[error("Unknown table: {table_id}")]
    UnknownTable { table_id: TableId },

    /// The generation payload is not a mapping of table ids to grids.
    #[error("Invalid timetable dataset: {message}")]
    InvalidDataset { message: String },

    /// Failure reported by the solver backend, kept verbatim.
    #[error("{message}")]
    Backend { message: String },

    /// The artifact sink rejected a delivery.
    #[error("Failed to deliver {artifact}: {message}")]
    Sink { artifact: String, message: String },

    /// The CSV writer failed.
    #[error("CSV error: {message}")]
    Csv { message: String },

    /// No dataset is loaded in the session.
    #[error("No timetables loaded")]
    NoSession,

    /// Configuration file or environment error.
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl TimetableError {
    /// Create a malformed grid error.
    pub fn malformed(table_id: &TableId, reason: impl Into<String>) -> Self {
        Self::MalformedGrid {
            table_id: table_id.clone(),
            reason: reason.into(),
        }
    }

    /// Create an unknown table error.
    pub fn unknown_table(table_id: &TableId) -> Self {
        Self::UnknownTable {
            table_id: table_id.clone(),
        }
    }

    /// Create an invalid dataset error.
    pub fn invalid_dataset(message: impl Into<String>) -> Self {
        Self::InvalidDataset {
            message: message.into(),
        }
    }

    /// Create a sink error.
    pub fn sink(artifact: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Sink {
            artifact: artifact.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Table this error is about, if any.
    pub fn table_id(&self) -> Option<&TableId> {
        match self {
            Self::MalformedGrid { table_id, .. } | Self::UnknownTable { table_id } => {
                Some(table_id)
            }
            _ => None,
        }
    }
}

impl From<csv::Error> for TimetableError {
    fn from(err: csv::Error) -> Self {
        Self::Csv {
            message: err.to_string(),
        }
    }
}
