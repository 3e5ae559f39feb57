use crate::grouping::{Assignment, Group, GroupOrigin, MinSize};
use serde::Serialize;
use tracing::warn;

/// One named output section holding a single group
#[derive(Debug, Clone)]
pub struct Sheet<T> {
    /// `<category><number>`, e.g. `L3`
    pub name: String,
    pub category: String,
    /// 1-based position within the category
    pub number: usize,
    pub meets_minimum: bool,
    pub group: Group<T>,
}

impl<T> Sheet<T> {
    pub fn summary(&self) -> SheetSummary {
        SheetSummary {
            name: self.name.clone(),
            category: self.category.clone(),
            members: self.group.len(),
            origin: self.group.origin(),
            meets_minimum: self.meets_minimum,
        }
    }
}

/// Serializable description of a sheet, without its members
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SheetSummary {
    pub name: String,
    pub category: String,
    pub members: usize,
    pub origin: GroupOrigin,
    pub meets_minimum: bool,
}

/// Name and number every group, category by category, in emission order.
///
/// Groups below `min_size` are flagged and logged; they are never rejected.
pub fn assemble<T>(assignment: Assignment<T>, min_size: MinSize) -> Vec<Sheet<T>> {
    let mut sheets = Vec::with_capacity(assignment.group_count());

    for stratum in assignment.strata {
        for (idx, group) in stratum.groups.into_iter().enumerate() {
            let number = idx + 1;
            let name = format!("{}{}", stratum.label, number);
            let meets_minimum = group.meets_minimum(min_size);

            if !meets_minimum {
                warn!(
                    sheet = %name,
                    members = group.len(),
                    min_size = %min_size,
                    "group {} does not meet minimum group size",
                    name
                );
            }

            sheets.push(Sheet {
                name,
                category: stratum.label.clone(),
                number,
                meets_minimum,
                group,
            });
        }
    }

    sheets
}
