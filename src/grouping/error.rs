use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GroupingError {
    #[error("Group size must be greater than zero")]
    InvalidGroupSize,

    #[error("Group size must be greater or equal to the minimum size (group size: {target}, minimum: {min})")]
    MinExceedsTarget { target: usize, min: usize },

    #[error("Invalid minimum group size: {0} (expected -1 or a non-negative size)")]
    InvalidMinSize(i64),

    #[error("Row {row} is missing required attribute {attribute}")]
    MissingAttribute { attribute: String, row: usize },

    #[error("Row {row} has unrecognized {attribute} value {value:?} (expected one of: {expected})")]
    UnknownCategory {
        attribute: String,
        value: String,
        expected: String,
        row: usize,
    },

    #[error("Input is missing required columns: {}. Found columns: {found:?}", missing.join(", "))]
    MissingColumns {
        missing: Vec<String>,
        found: Vec<String>,
    },
}
