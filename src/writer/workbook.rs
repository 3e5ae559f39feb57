use super::{GroupWriter, Manifest, Sheet};
use crate::record::Record;
use anyhow::{Context, Result};
use chrono::{Datelike, Timelike};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Writes every sheet as `<name>.csv` into one zip archive, together with a
/// `manifest.json`.
pub struct WorkbookWriter {
    output_path: PathBuf,
    manifest: Manifest,
}

impl WorkbookWriter {
    pub fn new(output_path: impl Into<PathBuf>, manifest: Manifest) -> Self {
        Self {
            output_path: output_path.into(),
            manifest,
        }
    }

    /// `<out>.zip`, unless `out` already names a zip file
    pub fn archive_path(out: &str) -> PathBuf {
        let path = Path::new(out);
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("zip") => path.to_path_buf(),
            _ => PathBuf::from(format!("{out}.zip")),
        }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }
}

impl GroupWriter for WorkbookWriter {
    fn write(&mut self, sheets: &[Sheet<Record>]) -> Result<()> {
        info!(path = %self.output_path.display(), sheets = sheets.len(), "writing workbook");

        self.manifest
            .set_sheets(sheets.iter().map(Sheet::summary).collect());

        let file = File::create(&self.output_path).context(format!(
            "Failed to create output file: {}",
            self.output_path.display()
        ))?;
        let mut zip = ZipWriter::new(file);

        let now = chrono::Local::now();
        let options: FileOptions<'_, ()> = FileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .unix_permissions(0o644)
            .last_modified_time(
                zip::DateTime::from_date_and_time(
                    now.year() as u16,
                    now.month() as u8,
                    now.day() as u8,
                    now.hour() as u8,
                    now.minute() as u8,
                    now.second() as u8,
                )
                .unwrap_or_default(),
            );

        for sheet in sheets {
            let entry = format!("{}.csv", sheet.name);
            debug!(sheet = %sheet.name, members = sheet.group.len(), "adding sheet");

            zip.start_file(entry.as_str(), options)
                .context(format!("Failed to start {} in archive", entry))?;

            let mut rows = csv::Writer::from_writer(&mut zip);
            if let Some(first) = sheet.group.members().first() {
                rows.write_record(first.headers())
                    .context(format!("Failed to write header of {}", entry))?;
            }
            for record in sheet.group.members() {
                rows.write_record(record.values())
                    .context(format!("Failed to write row to {}", entry))?;
            }
            rows.flush()
                .context(format!("Failed to flush {}", entry))?;
        }

        zip.start_file("manifest.json", options)
            .context("Failed to start manifest file in archive")?;
        let manifest_json = serde_json::to_string_pretty(&self.manifest)
            .context("Failed to serialize manifest")?;
        zip.write_all(manifest_json.as_bytes())
            .context("Failed to write manifest to archive")?;

        zip.finish().context("Failed to finalize archive")?;

        info!(
            path = %self.output_path.display(),
            sheets = self.manifest.stats.sheet_count,
            records = self.manifest.stats.record_count,
            undersized = self.manifest.stats.undersized_count,
            "workbook written"
        );

        Ok(())
    }
}
