use super::MinSize;
use serde::Serialize;

/// An incomplete run of members waiting to be merged.
///
/// Fragments carry no source information; two fragments from different units
/// merge freely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment<T> {
    members: Vec<T>,
}

impl<T> Fragment<T> {
    pub fn new(members: Vec<T>) -> Self {
        Self { members }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn members(&self) -> &[T] {
        &self.members
    }

    /// Concatenate `other` after this fragment's members
    pub fn append(&mut self, other: Fragment<T>) {
        self.members.extend(other.members);
    }

    pub fn into_members(self) -> Vec<T> {
        self.members
    }
}

impl<T> Default for Fragment<T> {
    fn default() -> Self {
        Self {
            members: Vec::new(),
        }
    }
}

/// How a group came to be
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupOrigin {
    /// Full-capacity slice cut from a large unit
    ExactChunk,
    /// A unit (or unit tail) already large enough to stand alone
    WholeUnit,
    /// Two fragments whose lengths sum to the target size
    ComplementPair,
    /// Built by the largest-first merge heuristic
    Merged,
    /// A leftover fragment kept on its own (minimum of zero)
    PerFragment,
    /// Every leftover fragment of a stratum (merge-all policy)
    MergeAll,
    /// Final drain that could not reach the minimum
    Forced,
}

/// A finalized group handed to the writer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group<T> {
    members: Vec<T>,
    origin: GroupOrigin,
}

impl<T> Group<T> {
    pub fn new(members: Vec<T>, origin: GroupOrigin) -> Self {
        Self { members, origin }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn members(&self) -> &[T] {
        &self.members
    }

    pub fn origin(&self) -> GroupOrigin {
        self.origin
    }

    pub fn is_forced(&self) -> bool {
        self.origin == GroupOrigin::Forced
    }

    /// Whether this group satisfies `min`; an empty group never does
    pub fn meets_minimum(&self, min: MinSize) -> bool {
        !self.members.is_empty() && min.admits(self.members.len())
    }

    pub fn into_members(self) -> Vec<T> {
        self.members
    }
}
