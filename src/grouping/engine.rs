use super::{
    CategoryPair, ColumnMap, Fragment, Group, GroupDistributor, GroupOrigin, GroupingConfig,
    GroupingError, Keyed, Stratifier, Stratum,
};
use tracing::{debug, info};

/// Groups produced for one category value, in emission order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StratumGroups<T> {
    pub label: String,
    pub groups: Vec<Group<T>>,
}

impl<T> StratumGroups<T> {
    pub fn member_count(&self) -> usize {
        self.groups.iter().map(Group::len).sum()
    }
}

/// Result of one assignment run: one entry per category, in category order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment<T> {
    pub strata: Vec<StratumGroups<T>>,
}

impl<T> Assignment<T> {
    /// An assignment with no groups for each of the given categories
    pub fn empty(categories: &CategoryPair) -> Self {
        Self {
            strata: categories
                .labels()
                .iter()
                .map(|label| StratumGroups {
                    label: label.to_string(),
                    groups: Vec::new(),
                })
                .collect(),
        }
    }

    /// Groups for one category value
    pub fn stratum(&self, label: &str) -> Option<&StratumGroups<T>> {
        self.strata.iter().find(|s| s.label == label)
    }

    /// Append another run's groups after this one's, category by category
    pub fn extend(&mut self, other: Assignment<T>) {
        for incoming in other.strata {
            match self.strata.iter_mut().find(|s| s.label == incoming.label) {
                Some(existing) => existing.groups.extend(incoming.groups),
                None => self.strata.push(incoming),
            }
        }
    }

    pub fn group_count(&self) -> usize {
        self.strata.iter().map(|s| s.groups.len()).sum()
    }

    pub fn member_count(&self) -> usize {
        self.strata.iter().map(StratumGroups::member_count).sum()
    }
}

/// Stratify, chunk and distribute a roster into groups
#[derive(Debug, Clone)]
pub struct GroupEngine {
    config: GroupingConfig,
    stratifier: Stratifier,
}

impl GroupEngine {
    /// Build an engine, rejecting invalid sizing before any record is seen
    pub fn new(
        config: GroupingConfig,
        columns: ColumnMap,
        categories: CategoryPair,
    ) -> Result<Self, GroupingError> {
        config.validate()?;
        Ok(Self {
            config,
            stratifier: Stratifier::new(columns, categories),
        })
    }

    pub fn config(&self) -> &GroupingConfig {
        &self.config
    }

    pub fn stratifier(&self) -> &Stratifier {
        &self.stratifier
    }

    /// Assign every record to exactly one group.
    ///
    /// The two strata are processed independently; fragments never cross
    /// the category split.
    pub fn assign<T: Keyed>(&self, records: Vec<T>) -> Result<Assignment<T>, GroupingError> {
        let total = records.len();
        let strata = self.stratifier.split(records)?;

        let strata: Vec<StratumGroups<T>> = strata
            .into_iter()
            .map(|stratum| self.distribute_stratum(stratum))
            .collect();

        let assignment = Assignment { strata };
        info!(
            records = total,
            groups = assignment.group_count(),
            "assignment complete"
        );
        Ok(assignment)
    }

    /// Chunk and distribute one stratum
    pub fn distribute_stratum<T>(&self, stratum: Stratum<T>) -> StratumGroups<T> {
        let label = stratum.label().to_string();
        let members = stratum.len();
        let units = stratum.into_units();

        debug!(category = %label, members, units = units.len(), "distributing stratum");

        let groups = distribute_units(units.into_iter().map(|(_, records)| records), &self.config);

        debug!(category = %label, groups = groups.len(), "stratum distributed");
        StratumGroups { label, groups }
    }
}

/// Turn ordered unit sequences into groups.
///
/// Exact-size chunks and self-sufficient units come first in unit order,
/// followed by whatever the distributor builds from the remainders.
pub fn distribute_units<T, I>(units: I, config: &GroupingConfig) -> Vec<Group<T>>
where
    I: IntoIterator<Item = Vec<T>>,
{
    let mut groups = Vec::new();
    let mut distributor = GroupDistributor::new(*config);

    for records in units {
        chunk_unit(records, config, &mut groups, &mut distributor);
    }

    groups.extend(distributor.combine_remainders());
    groups
}

/// Cut full groups from the front of a unit and route its remainder
fn chunk_unit<T>(
    mut records: Vec<T>,
    config: &GroupingConfig,
    groups: &mut Vec<Group<T>>,
    distributor: &mut GroupDistributor<T>,
) {
    let target = config.target_size;

    if records.len() > target {
        let tail = records.split_off(records.len() - records.len() % target);
        let mut full = records.into_iter();
        loop {
            let chunk: Vec<T> = full.by_ref().take(target).collect();
            if chunk.is_empty() {
                break;
            }
            groups.push(Group::new(chunk, GroupOrigin::ExactChunk));
        }
        records = tail;
    }

    if records.is_empty() {
        return;
    }

    if config.min_size.admits(records.len()) {
        groups.push(Group::new(records, GroupOrigin::WholeUnit));
    } else {
        distributor.enqueue(Fragment::new(records));
    }
}
