use super::SheetSummary;
use crate::grouping::GroupingConfig;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Top-level metadata stored next to the sheets
#[derive(Debug, Clone, Serialize)]
pub struct Manifest {
    pub version: String,
    pub run_id: Uuid,
    pub created_at: String,
    pub generator: String,
    pub parameters: GroupingConfig,
    pub inputs: Vec<InputDigest>,
    pub stats: ManifestStats,
    pub sheets: Vec<SheetSummary>,
}

/// One roster file that fed the run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputDigest {
    pub path: String,
    pub sha256: String,
    pub records: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ManifestStats {
    pub sheet_count: usize,
    pub record_count: usize,
    pub undersized_count: usize,
}

impl Manifest {
    pub fn new(parameters: GroupingConfig, inputs: Vec<InputDigest>) -> Self {
        Self {
            version: "1.0.0".to_string(),
            run_id: Uuid::new_v4(),
            created_at: Utc::now().to_rfc3339(),
            generator: format!("mentor-groups v{}", env!("CARGO_PKG_VERSION")),
            parameters,
            inputs,
            stats: ManifestStats::default(),
            sheets: Vec::new(),
        }
    }

    /// Record the written sheets and refresh the stats
    pub fn set_sheets(&mut self, sheets: Vec<SheetSummary>) {
        self.stats = ManifestStats {
            sheet_count: sheets.len(),
            record_count: sheets.iter().map(|s| s.members).sum(),
            undersized_count: sheets.iter().filter(|s| !s.meets_minimum).count(),
        };
        self.sheets = sheets;
    }
}
