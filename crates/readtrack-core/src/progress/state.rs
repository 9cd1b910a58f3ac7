use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::schedule::Schedule;

/// Completion flags keyed by reading-unit id.
///
/// Sparse: an absent id is not completed. Explicit `false` entries are kept
/// so a stored value round-trips exactly, but equality only looks at which
/// ids are completed, so `{}` and `{"A": false}` compare equal.
///
/// Serialized as a bare JSON object, e.g. `{"GEN": true, "EXO": false}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProgressState {
    flags: BTreeMap<String, bool>,
}

impl ProgressState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_completed(&self, id: &str) -> bool {
        self.flags.get(id).copied().unwrap_or(false)
    }

    /// Return a new state with the flag for `id` flipped.
    ///
    /// Absent or `false` becomes `true`; `true` becomes `false`. Ids the
    /// schedule does not know are stored like any other.
    #[must_use]
    pub fn toggled(&self, id: &str) -> Self {
        let mut flags = self.flags.clone();
        let completed = !self.is_completed(id);
        flags.insert(id.to_string(), completed);
        Self { flags }
    }

    /// Keep only entries whose id is in `schedule`.
    #[must_use]
    pub fn retain_known(&self, schedule: &Schedule) -> Self {
        let flags = self
            .flags
            .iter()
            .filter(|(id, _)| schedule.contains(id))
            .map(|(id, done)| (id.clone(), *done))
            .collect();
        Self { flags }
    }

    /// Ids stored in this state that `schedule` does not contain.
    pub fn unknown_ids<'a>(&'a self, schedule: &Schedule) -> Vec<&'a str> {
        self.flags
            .keys()
            .filter(|id| !schedule.contains(id))
            .map(String::as_str)
            .collect()
    }

    pub fn completed_ids(&self) -> impl Iterator<Item = &str> {
        self.flags
            .iter()
            .filter(|(_, done)| **done)
            .map(|(id, _)| id.as_str())
    }

    /// Stored entries, including explicit `false` flags.
    pub fn entries(&self) -> &BTreeMap<String, bool> {
        &self.flags
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// Parse the persisted JSON form. Anything other than a JSON object of
    /// string -> bool is rejected; unknown ids are accepted.
    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// Serialize to the persisted JSON form.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.flags)
    }
}

impl PartialEq for ProgressState {
    fn eq(&self, other: &Self) -> bool {
        self.completed_ids().collect::<BTreeSet<_>>() == other.completed_ids().collect::<BTreeSet<_>>()
    }
}

impl Eq for ProgressState {}

impl From<BTreeMap<String, bool>> for ProgressState {
    fn from(flags: BTreeMap<String, bool>) -> Self {
        Self { flags }
    }
}

impl<K: Into<String>> FromIterator<(K, bool)> for ProgressState {
    fn from_iter<I: IntoIterator<Item = (K, bool)>>(iter: I) -> Self {
        Self {
            flags: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
