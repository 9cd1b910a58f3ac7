//! Reading schedule: the ordered, read-only list of reading units.
//!
//! The core never mutates a schedule. It arrives once per session from a
//! [`ScheduleProvider`] and is only used to render and to derive statistics.

mod builtin;
mod provider;

pub use builtin::BuiltinSchedule;
pub use provider::{ScheduleFile, ScheduleProvider};

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// One schedulable item in the reading plan (a book or a block of chapters).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadingUnit {
    /// Stable across sessions; this is the key used in persisted progress.
    pub id: String,
    pub category: String,
    pub label: String,
    /// Number of chapters (or other sub-units) covered by this unit.
    #[serde(default)]
    pub unit_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl ReadingUnit {
    pub fn new(
        id: impl Into<String>,
        category: impl Into<String>,
        label: impl Into<String>,
        unit_count: u32,
    ) -> Self {
        Self {
            id: id.into(),
            category: category.into(),
            label: label.into(),
            unit_count,
            note: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// A validated, ordered sequence of reading units with unique ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Schedule {
    units: Vec<ReadingUnit>,
}

/// A run of consecutive units sharing a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryGroup<'a> {
    pub category: &'a str,
    pub units: &'a [ReadingUnit],
}

impl Schedule {
    /// Build a schedule, rejecting empty and duplicate ids.
    pub fn new(units: Vec<ReadingUnit>) -> Result<Self, ValidationError> {
        let mut seen = HashSet::with_capacity(units.len());
        for (index, unit) in units.iter().enumerate() {
            if unit.id.trim().is_empty() {
                return Err(ValidationError::EmptyId { index });
            }
            if !seen.insert(unit.id.as_str()) {
                return Err(ValidationError::DuplicateId {
                    id: unit.id.clone(),
                    index,
                });
            }
        }
        Ok(Self { units })
    }

    pub fn units(&self) -> &[ReadingUnit] {
        &self.units
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&ReadingUnit> {
        self.units.iter().find(|u| u.id == id)
    }

    /// Unit whose id matches `id` ignoring ASCII case.
    pub fn find_ignore_case(&self, id: &str) -> Option<&ReadingUnit> {
        self.units.iter().find(|u| u.id.eq_ignore_ascii_case(id))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.units.iter().map(|u| u.id.as_str())
    }

    /// Total sub-units (chapters) across the schedule.
    pub fn total_unit_count(&self) -> u64 {
        self.units.iter().map(|u| u64::from(u.unit_count)).sum()
    }

    /// Group consecutive units by category, preserving schedule order.
    ///
    /// A new group starts whenever a unit's category differs from the
    /// previous unit's, so a category that reappears later gets its own group.
    pub fn categories(&self) -> Vec<CategoryGroup<'_>> {
        self.units
            .chunk_by(|a, b| a.category == b.category)
            .map(|chunk| CategoryGroup {
                category: chunk[0].category.as_str(),
                units: chunk,
            })
            .collect()
    }
}

impl<'a> IntoIterator for &'a Schedule {
    type Item = &'a ReadingUnit;
    type IntoIter = std::slice::Iter<'a, ReadingUnit>;

    fn into_iter(self) -> Self::IntoIter {
        self.units.iter()
    }
}
