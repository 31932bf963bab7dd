//! Artifact sinks.
//!
//! A sink is where finished CSV exports end up: a directory on disk, an
//! in-memory buffer, or whatever the caller wires in (an HTTP response, a
//! browser download).

use parking_lot::Mutex;
use serde::Serialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{TimetableError, TimetableResult};

/// MIME type of exported artifacts.
pub const CSV_MIME_TYPE: &str = "text/csv;charset=utf-8";

/// One finished CSV export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CsvArtifact {
    /// Base name without extension (table id or friendly name)
    pub name: String,
    pub content: String,
}

impl CsvArtifact {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// `<name>.csv`
    pub fn file_name(&self) -> String {
        format!("{}.csv", self.name)
    }
}

/// Destination for finished artifacts.
pub trait ArtifactSink: Send + Sync {
    fn deliver(&self, artifact: &CsvArtifact) -> TimetableResult<()>;
}

/// Writes each artifact as `<root>/<name>.csv`.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    root: PathBuf,
}

impl DirectorySink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Target path of an artifact. Path separators in the name become `_`.
    pub fn path_for(&self, artifact: &CsvArtifact) -> PathBuf {
        let file_name = artifact.file_name().replace(['/', '\\'], "_");
        self.root.join(file_name)
    }
}

impl ArtifactSink for DirectorySink {
    fn deliver(&self, artifact: &CsvArtifact) -> TimetableResult<()> {
        fs::create_dir_all(&self.root).map_err(|e| {
            TimetableError::sink(
                artifact.file_name(),
                format!("creating {}: {}", self.root.display(), e),
            )
        })?;
        let path = self.path_for(artifact);
        fs::write(&path, artifact.content.as_bytes()).map_err(|e| {
            TimetableError::sink(artifact.file_name(), format!("writing {}: {}", path.display(), e))
        })
    }
}

/// Keeps delivered artifacts in memory.
///
/// Artifacts whose name is in the reject list fail delivery, which lets
/// callers exercise partial export failures.
#[derive(Debug, Default)]
pub struct MemorySink {
    delivered: Mutex<Vec<CsvArtifact>>,
    rejected_names: HashSet<String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink that refuses artifacts with any of the given base names.
    pub fn rejecting<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            delivered: Mutex::new(Vec::new()),
            rejected_names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Delivered artifacts, in delivery order.
    pub fn artifacts(&self) -> Vec<CsvArtifact> {
        self.delivered.lock().clone()
    }

    /// File names of delivered artifacts, in delivery order.
    pub fn file_names(&self) -> Vec<String> {
        self.delivered.lock().iter().map(CsvArtifact::file_name).collect()
    }

    pub fn len(&self) -> usize {
        self.delivered.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.delivered.lock().is_empty()
    }
}

impl ArtifactSink for MemorySink {
    fn deliver(&self, artifact: &CsvArtifact) -> TimetableResult<()> {
        if self.rejected_names.contains(&artifact.name) {
            return Err(TimetableError::sink(artifact.file_name(), "rejected by sink"));
        }
        self.delivered.lock().push(artifact.clone());
        Ok(())
    }
}
