use crate::config::AppConfig;
use crate::grouping::{Assignment, GroupEngine};
use crate::loader::{hash_file, load_table};
use crate::record::Record;
use crate::writer::InputDigest;
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::info;

/// Groups from every input file plus a digest of each file
#[derive(Debug)]
pub struct RunOutput {
    pub assignment: Assignment<Record>,
    pub inputs: Vec<InputDigest>,
}

/// Assign each roster file independently and concatenate the groups per
/// category, in file order. Sizing is validated before any file is read.
pub fn assign_files(config: &AppConfig, files: &[PathBuf]) -> Result<RunOutput> {
    let engine = GroupEngine::new(
        config.grouping,
        config.columns.clone(),
        config.categories.clone(),
    )
    .context("Invalid grouping configuration")?;

    let mut assignment = Assignment::empty(&config.categories);
    let mut inputs = Vec::with_capacity(files.len());

    for path in files {
        let table = load_table(path)?;
        table
            .require_columns(&config.columns.required())
            .context(format!("Invalid roster: {}", path.display()))?;

        let digest = InputDigest {
            path: path.display().to_string(),
            sha256: hash_file(path)?,
            records: table.len(),
        };

        let groups = engine
            .assign(table.into_records())
            .context(format!("Failed to assign groups for {}", path.display()))?;

        info!(
            path = %path.display(),
            records = digest.records,
            groups = groups.group_count(),
            "roster assigned"
        );

        assignment.extend(groups);
        inputs.push(digest);
    }

    Ok(RunOutput { assignment, inputs })
}
