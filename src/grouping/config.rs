use super::GroupingError;
use serde::{Deserialize, Serialize};

/// Default number of members per group
pub const DEFAULT_GROUP_SIZE: usize = 10;

/// Default minimum number of members per group
pub const DEFAULT_MIN_SIZE: usize = 7;

/// Minimum group size policy.
///
/// Serialized as a plain integer: `-1` selects [`MinSize::MergeAll`], any
/// non-negative value selects [`MinSize::AtLeast`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum MinSize {
    /// No minimum: every unresolved remainder is merged into a single group
    MergeAll,
    /// Groups should hold at least this many members (`0` accepts any size)
    AtLeast(usize),
}

impl MinSize {
    /// Whether a fragment of `len` members can stand as its own group
    pub fn admits(self, len: usize) -> bool {
        match self {
            MinSize::MergeAll => true,
            MinSize::AtLeast(min) => len >= min,
        }
    }

    pub fn as_i64(self) -> i64 {
        match self {
            MinSize::MergeAll => -1,
            MinSize::AtLeast(min) => min as i64,
        }
    }
}

impl TryFrom<i64> for MinSize {
    type Error = GroupingError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(MinSize::MergeAll),
            v if v >= 0 => Ok(MinSize::AtLeast(v as usize)),
            v => Err(GroupingError::InvalidMinSize(v)),
        }
    }
}

impl From<MinSize> for i64 {
    fn from(value: MinSize) -> Self {
        value.as_i64()
    }
}

impl std::fmt::Display for MinSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_i64())
    }
}

/// Sizing parameters for one assignment run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupingConfig {
    /// Exact capacity of a full group
    pub target_size: usize,
    /// Minimum viable group size
    pub min_size: MinSize,
}

impl GroupingConfig {
    /// Create a validated config from raw CLI-style values
    pub fn new(target_size: usize, min_size: i64) -> Result<Self, GroupingError> {
        let config = Self {
            target_size,
            min_size: MinSize::try_from(min_size)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check the sizing preconditions (deserialized configs are unchecked
    /// until this runs)
    pub fn validate(&self) -> Result<(), GroupingError> {
        if self.target_size == 0 {
            return Err(GroupingError::InvalidGroupSize);
        }
        if let MinSize::AtLeast(min) = self.min_size {
            if min > self.target_size {
                return Err(GroupingError::MinExceedsTarget {
                    target: self.target_size,
                    min,
                });
            }
        }
        Ok(())
    }
}

impl Default for GroupingConfig {
    fn default() -> Self {
        Self {
            target_size: DEFAULT_GROUP_SIZE,
            min_size: MinSize::AtLeast(DEFAULT_MIN_SIZE),
        }
    }
}
