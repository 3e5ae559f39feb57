use super::GroupingError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Attribute lookup the stratifier needs from a record
pub trait Keyed {
    /// Value of the named attribute, or `None` if the record does not have it
    fn attribute(&self, name: &str) -> Option<&str>;
}

/// Names of the attributes that drive stratification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnMap {
    /// Binary category (hard split)
    pub category: String,
    /// Organizational unit (faculty)
    pub unit: String,
    /// Optional cluster used to order members inside a unit
    pub cluster: String,
    /// Study program, the ordering fallback when no cluster is present
    pub program: String,
}

impl ColumnMap {
    /// Columns every input table must carry
    pub fn required(&self) -> [&str; 3] {
        [&self.category, &self.unit, &self.program]
    }
}

impl Default for ColumnMap {
    fn default() -> Self {
        Self {
            category: "KELOMPOK".to_string(),
            unit: "FAKULTAS".to_string(),
            cluster: "RUMPUN".to_string(),
            program: "PRODI".to_string(),
        }
    }
}

/// The two recognized category values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryPair {
    pub first: String,
    pub second: String,
}

impl CategoryPair {
    pub fn new(first: impl Into<String>, second: impl Into<String>) -> Self {
        Self {
            first: first.into(),
            second: second.into(),
        }
    }

    pub fn labels(&self) -> [&str; 2] {
        [&self.first, &self.second]
    }
}

impl Default for CategoryPair {
    fn default() -> Self {
        Self::new("L", "P")
    }
}

#[derive(Debug)]
struct Member<T> {
    unit: String,
    order: String,
    record: T,
}

/// All records sharing one category value
#[derive(Debug)]
pub struct Stratum<T> {
    label: String,
    members: Vec<Member<T>>,
}

impl<T> Stratum<T> {
    fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            members: Vec::new(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Split into units, ascending by unit name, members stably ordered by
    /// their cluster (or program) key.
    pub fn into_units(self) -> Vec<(String, Vec<T>)> {
        let mut units: BTreeMap<String, Vec<(String, T)>> = BTreeMap::new();
        for member in self.members {
            units
                .entry(member.unit)
                .or_default()
                .push((member.order, member.record));
        }

        units
            .into_iter()
            .map(|(unit, mut members)| {
                members.sort_by(|a, b| a.0.cmp(&b.0));
                (unit, members.into_iter().map(|(_, record)| record).collect())
            })
            .collect()
    }
}

/// Splits records into the two category strata
#[derive(Debug, Clone, Default)]
pub struct Stratifier {
    columns: ColumnMap,
    categories: CategoryPair,
}

impl Stratifier {
    pub fn new(columns: ColumnMap, categories: CategoryPair) -> Self {
        Self {
            columns,
            categories,
        }
    }

    pub fn columns(&self) -> &ColumnMap {
        &self.columns
    }

    pub fn categories(&self) -> &CategoryPair {
        &self.categories
    }

    /// Partition `records` by category, preserving input order inside each
    /// stratum. Rows are reported 1-based in input order.
    pub fn split<T: Keyed>(&self, records: Vec<T>) -> Result<[Stratum<T>; 2], GroupingError> {
        let [first_label, second_label] = self.categories.labels();
        let mut first = Stratum::new(first_label);
        let mut second = Stratum::new(second_label);

        for (index, record) in records.into_iter().enumerate() {
            let row = index + 1;

            let category = record.attribute(&self.columns.category).ok_or_else(|| {
                GroupingError::MissingAttribute {
                    attribute: self.columns.category.clone(),
                    row,
                }
            })?;
            let target = if category == first_label {
                &mut first
            } else if category == second_label {
                &mut second
            } else {
                return Err(GroupingError::UnknownCategory {
                    attribute: self.columns.category.clone(),
                    value: category.to_string(),
                    expected: format!("{first_label}, {second_label}"),
                    row,
                });
            };

            let unit = record
                .attribute(&self.columns.unit)
                .filter(|unit| !unit.trim().is_empty())
                .ok_or_else(|| GroupingError::MissingAttribute {
                    attribute: self.columns.unit.clone(),
                    row,
                })?
                .to_string();

            let order = record
                .attribute(&self.columns.cluster)
                .or_else(|| record.attribute(&self.columns.program))
                .unwrap_or(unit.as_str())
                .to_string();

            target.members.push(Member {
                unit,
                order,
                record,
            });
        }

        Ok([first, second])
    }
}
