// Public API exports
pub mod config;
pub mod grouping;
pub mod loader;
pub mod pipeline;
pub mod record;
pub mod writer;

// Re-export main types for convenience
pub use config::AppConfig;

pub use grouping::{
    Assignment, CategoryPair, ColumnMap, Fragment, Group, GroupDistributor, GroupEngine,
    GroupOrigin, GroupingConfig, GroupingError, Keyed, MinSize, SizeQueueTable, Stratifier,
    StratumGroups, distribute_units,
};

pub use record::{Record, Table};

pub use pipeline::{RunOutput, assign_files};

pub use writer::{
    GroupWriter, InputDigest, Manifest, Sheet, SheetSummary, WorkbookWriter, assemble,
};
