use crate::grouping::{GroupingError, Keyed};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A single roster row; every column is carried through untouched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    headers: Arc<[String]>,
    values: Vec<String>,
}

impl Record {
    pub fn new(headers: Arc<[String]>, values: Vec<String>) -> Self {
        Self { headers, values }
    }

    /// Value of `column`, if the row has that column
    pub fn get(&self, column: &str) -> Option<&str> {
        self.headers
            .iter()
            .position(|h| h == column)
            .and_then(|idx| self.values.get(idx))
            .map(String::as_str)
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }
}

impl Keyed for Record {
    fn attribute(&self, name: &str) -> Option<&str> {
        self.get(name)
    }
}

/// All rows loaded from one input file
#[derive(Debug, Clone)]
pub struct Table {
    source: PathBuf,
    headers: Arc<[String]>,
    records: Vec<Record>,
}

impl Table {
    pub fn new(source: impl Into<PathBuf>, headers: Arc<[String]>, records: Vec<Record>) -> Self {
        Self {
            source: source.into(),
            headers,
            records,
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    /// Ensure every column in `required` is present in the header row
    pub fn require_columns(&self, required: &[&str]) -> Result<(), GroupingError> {
        let missing: Vec<String> = required
            .iter()
            .filter(|column| !self.headers.iter().any(|h| h == *column))
            .map(|column| column.to_string())
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(GroupingError::MissingColumns {
                missing,
                found: self.headers.to_vec(),
            })
        }
    }
}
