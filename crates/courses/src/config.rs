/// Runtime settings for the course model
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

use crate::error::CourseError;
use crate::related;

/// Top-level configuration, read from a JSON file.
///
/// Every field is optional in the file; missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoursesConfig {
    /// Warn when an aggregate reads a collection that was not preloaded.
    /// Defaults to on in debug builds.
    pub warn_unloaded_collections: bool,
    /// Upper bound on schedules produced by the schedule generator
    pub max_schedules: usize,
    /// Whether full sections may appear in generated schedules
    pub include_full_sections: bool,
}

impl Default for CoursesConfig {
    fn default() -> Self {
        Self {
            warn_unloaded_collections: cfg!(debug_assertions),
            max_schedules: 1000,
            include_full_sections: false,
        }
    }
}

impl CoursesConfig {
    /// Loads the configuration from a JSON file.
    ///
    /// # Arguments
    /// * `path` - Path to the config file
    ///
    /// # Returns
    /// * `Ok(CoursesConfig)` - Parsed configuration
    /// * `Err` - If the file can't be read or parsed
    pub fn load_from_file(path: &Path) -> Result<Self, CourseError> {
        let content = fs::read_to_string(path)?;
        let config: CoursesConfig = serde_json::from_str(&content)?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Installs the process-wide settings from this configuration.
    pub fn apply(&self) {
        related::set_warn_unloaded(self.warn_unloaded_collections);
    }
}
