mod config;
mod distributor;
mod engine;
mod error;
mod fragment;
mod stratifier;


pub use config::{DEFAULT_GROUP_SIZE, DEFAULT_MIN_SIZE, GroupingConfig, MinSize};
pub use distributor::{GroupDistributor, SizeQueueTable};
pub use engine::{Assignment, GroupEngine, StratumGroups, distribute_units};
pub use error::GroupingError;
pub use fragment::{Fragment, Group, GroupOrigin};
pub use stratifier::{CategoryPair, ColumnMap, Keyed, Stratifier, Stratum};
