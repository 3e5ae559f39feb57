mod manifest;
mod sheet;
mod workbook;

#[cfg(test)]
mod tests;

pub use manifest::{InputDigest, Manifest, ManifestStats};
pub use sheet::{Sheet, SheetSummary, assemble};
pub use workbook::WorkbookWriter;

use crate::record::Record;

/// Destination for assembled sheets
pub trait GroupWriter {
    /// Persist every sheet, in order
    fn write(&mut self, sheets: &[Sheet<Record>]) -> anyhow::Result<()>;
}
