use crate::grouping::{CategoryPair, ColumnMap, GroupingConfig};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Run configuration, loadable from JSON and overridable from the CLI
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub grouping: GroupingConfig,
    pub columns: ColumnMap,
    pub categories: CategoryPair,
}

impl AppConfig {
    /// Read a JSON config file; missing sections fall back to defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .context(format!("Failed to read config: {}", path.display()))?;
        let config: AppConfig = serde_json::from_str(&contents)
            .context(format!("Failed to parse config: {}", path.display()))?;
        Ok(config)
    }

    /// Defaults, or the given file if any
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }
}
