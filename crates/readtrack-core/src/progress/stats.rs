use serde::{Deserialize, Serialize};

use super::ProgressState;
use crate::schedule::{ReadingUnit, Schedule};

/// Summary derived from a progress state and a schedule. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DerivedStats {
    pub total: usize,
    pub completed: usize,
    /// 0..=100
    pub percentage: u8,
}

/// Stats for one category group, in schedule order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryStats {
    pub category: String,
    #[serde(flatten)]
    pub stats: DerivedStats,
}

impl DerivedStats {
    pub fn remaining(&self) -> usize {
        self.total - self.completed
    }

    pub fn is_finished(&self) -> bool {
        self.total > 0 && self.completed == self.total
    }
}

/// Compute total/completed/percentage for `schedule`.
///
/// Only schedule ids count; completed flags for ids outside the schedule are
/// ignored.
pub fn derive_stats(state: &ProgressState, schedule: &Schedule) -> DerivedStats {
    stats_for(state, schedule.units())
}

/// Per-category stats, one entry per consecutive category group.
pub fn derive_category_stats(state: &ProgressState, schedule: &Schedule) -> Vec<CategoryStats> {
    schedule
        .categories()
        .into_iter()
        .map(|group| CategoryStats {
            category: group.category.to_string(),
            stats: stats_for(state, group.units),
        })
        .collect()
}

fn stats_for(state: &ProgressState, units: &[ReadingUnit]) -> DerivedStats {
    let total = units.len();
    let completed = units.iter().filter(|u| state.is_completed(&u.id)).count();
    DerivedStats {
        total,
        completed,
        percentage: percentage(completed, total),
    }
}

/// Round-half-up percentage, computed once in integer arithmetic.
///
/// Clamped to 1..=99 whenever some but not all units are complete, so 0 and
/// 100 are reserved for "nothing" and "everything". Rounding alone would
/// reach them for schedules larger than 200 units.
pub fn percentage(completed: usize, total: usize) -> u8 {
    if total == 0 || completed == 0 {
        return 0;
    }
    let completed = completed.min(total);
    if completed == total {
        return 100;
    }
    let rounded = (200 * completed as u128 + total as u128) / (2 * total as u128);
    rounded.clamp(1, 99) as u8
}
