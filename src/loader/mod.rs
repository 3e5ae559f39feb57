
use crate::record::{Record, Table};
use anyhow::{bail, Context, Result};
use csv::{ReaderBuilder, Trim};
use sha2::{Digest, Sha256};
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};
use walkdir::WalkDir;

/// Extensions picked up when walking an input directory
const ROSTER_EXTENSIONS: &[&str] = &["csv"];

/// Whether a path looks like a roster file
pub fn is_roster_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
        .is_some_and(|ext| ROSTER_EXTENSIONS.contains(&ext.as_str()))
}

/// Expand the given inputs into a list of roster files.
///
/// Files are kept in the order given. Directories are walked recursively and
/// contribute their roster files sorted by path.
pub fn collect_inputs(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for input in inputs {
        if input.is_dir() {
            debug!(dir = %input.display(), "scanning input directory");
            for entry in WalkDir::new(input).follow_links(false).sort_by_file_name() {
                let entry = entry.context("Failed to read directory entry")?;
                let path = entry.path();
                if path.is_file() && is_roster_file(path) {
                    files.push(path.to_path_buf());
                }
            }
        } else if input.is_file() {
            files.push(input.clone());
        } else {
            bail!("Input not found: {}", input.display());
        }
    }

    if files.is_empty() {
        bail!("No roster files found in the given inputs");
    }

    Ok(files)
}

/// Read a roster CSV with a header row into a [`Table`].
///
/// Headers and values are trimmed; every column is kept in file order.
pub fn load_table(path: &Path) -> Result<Table> {
    let file = File::open(path).context(format!("Failed to open roster: {}", path.display()))?;

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .trim(Trim::All)
        .from_reader(BufReader::new(file));

    let headers: Arc<[String]> = reader
        .headers()
        .context(format!("Failed to read header row: {}", path.display()))?
        .iter()
        .map(str::to_string)
        .collect::<Vec<_>>()
        .into();

    if headers.is_empty() {
        bail!("Roster has no header row: {}", path.display());
    }

    let mut records = Vec::new();
    for (idx, row) in reader.records().enumerate() {
        let row = row.context(format!(
            "Failed to read row {} of {}",
            idx + 1,
            path.display()
        ))?;
        records.push(Record::new(
            headers.clone(),
            row.iter().map(str::to_string).collect(),
        ));
    }

    info!(
        path = %path.display(),
        rows = records.len(),
        columns = headers.len(),
        "loaded roster"
    );

    Ok(Table::new(path, headers, records))
}

/// Compute the SHA-256 of a file's contents as lowercase hex
pub fn hash_file(path: &Path) -> Result<String> {
    let contents = fs::read(path).context(format!("Failed to read file: {}", path.display()))?;
    let mut hasher = Sha256::new();
    hasher.update(&contents);
    Ok(hex::encode(hasher.finalize()))
}
