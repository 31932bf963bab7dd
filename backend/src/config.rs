//! Export configuration file and environment support.
//!
//! Settings come from a `timetable.toml` file (all keys optional) and can be
//! overridden from the environment:
//!
//! - `TIMETABLE_CONFIG`: explicit path of the configuration file
//! - `TIMETABLE_DELIVERY_SPACING_MS`: spacing between batch deliveries
//! - `TIMETABLE_FILE_NAMING`: `table_id` or `friendly_name`
//! - `TIMETABLE_OUTPUT_DIR`: directory the server writes batch exports to

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{TimetableError, TimetableResult};
use crate::export::batch::{FileNaming, DEFAULT_DELIVERY_SPACING};

/// Configuration file looked up when no explicit path is given.
pub const CONFIG_FILE_NAME: &str = "timetable.toml";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportConfig {
    #[serde(default)]
    pub export: ExportSettings,
}

/// `[export]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportSettings {
    #[serde(default = "default_delivery_spacing_ms")]
    pub delivery_spacing_ms: u64,
    #[serde(default)]
    pub file_naming: FileNaming,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            delivery_spacing_ms: default_delivery_spacing_ms(),
            file_naming: FileNaming::default(),
            output_dir: default_output_dir(),
        }
    }
}

fn default_delivery_spacing_ms() -> u64 {
    DEFAULT_DELIVERY_SPACING.as_millis() as u64
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("exports")
}

impl ExportConfig {
    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> TimetableResult<Self> {
        toml::from_str(content).map_err(|e| {
            TimetableError::configuration(format!("Failed to parse config file: {}", e))
        })
    }

    /// Load configuration from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(ExportConfig)` if successful
    /// * `Err(TimetableError::Configuration)` if the file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> TimetableResult<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            TimetableError::configuration(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    /// Load configuration from the default location.
    ///
    /// Searches for `timetable.toml` in:
    /// 1. Current directory
    /// 2. `backend/` directory
    /// 3. Parent directory
    ///
    /// Falls back to defaults when no file exists.
    pub fn from_default_location() -> TimetableResult<Self> {
        let search_paths = [
            PathBuf::from(CONFIG_FILE_NAME),
            PathBuf::from("backend").join(CONFIG_FILE_NAME),
            PathBuf::from("..").join(CONFIG_FILE_NAME),
        ];

        for path in search_paths {
            if path.exists() {
                return Self::from_file(&path);
            }
        }
        Ok(Self::default())
    }

    /// Load the file named by `TIMETABLE_CONFIG` (or the default location),
    /// then apply environment overrides.
    pub fn load() -> TimetableResult<Self> {
        let mut config = match env::var("TIMETABLE_CONFIG") {
            Ok(path) if !path.trim().is_empty() => Self::from_file(path.trim())?,
            _ => Self::from_default_location()?,
        };
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Override settings from `TIMETABLE_*` environment variables.
    pub fn apply_env_overrides(&mut self) -> TimetableResult<()> {
        if let Ok(value) = env::var("TIMETABLE_DELIVERY_SPACING_MS") {
            self.export.delivery_spacing_ms = value.trim().parse().map_err(|_| {
                TimetableError::configuration(
                    "TIMETABLE_DELIVERY_SPACING_MS must be a whole number of milliseconds",
                )
            })?;
        }
        if let Ok(value) = env::var("TIMETABLE_FILE_NAMING") {
            self.export.file_naming = value.parse().map_err(TimetableError::configuration)?;
        }
        if let Ok(value) = env::var("TIMETABLE_OUTPUT_DIR") {
            if value.trim().is_empty() {
                return Err(TimetableError::configuration(
                    "TIMETABLE_OUTPUT_DIR must not be empty",
                ));
            }
            self.export.output_dir = PathBuf::from(value);
        }
        Ok(())
    }

    pub fn delivery_spacing(&self) -> Duration {
        Duration::from_millis(self.export.delivery_spacing_ms)
    }

    pub fn output_dir(&self) -> &Path {
        &self.export.output_dir
    }
}
