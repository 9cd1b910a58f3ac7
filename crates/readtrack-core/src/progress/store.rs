//! Progress store: owns the progress state and keeps it in durable storage.
//!
//! ## Lifecycle
//!
//! ```text
//! (no store) --open()--> loaded --toggle()/reset()/prune()/import()--> loaded
//! ```
//!
//! Every change replaces the whole [`ProgressState`] through one commit path:
//! the new value becomes current, subscribers receive the [`Event`], then the
//! state is saved. A failed save is returned as a recoverable
//! [`ProgressError`]; the in-memory state stays authoritative.

use chrono::Utc;

use super::{derive_category_stats, derive_stats, CategoryStats, DerivedStats, ProgressState};
use crate::error::ProgressError;
use crate::events::Event;
use crate::schedule::Schedule;
use crate::storage::KvStorage;

/// Result of reading persisted progress.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadOutcome {
    pub state: ProgressState,
    /// Set when stored data was unreadable and empty progress was used instead.
    pub recovered: Option<ProgressError>,
}

/// Result of a toggle on the store.
#[derive(Debug, Clone, PartialEq)]
pub struct Toggled {
    pub id: String,
    /// Flag value after the toggle.
    pub completed: bool,
    pub saved: Result<(), ProgressError>,
}

/// Read progress stored under `key`.
///
/// Never fails: a missing record is empty progress, and an unreadable or
/// malformed record is reported in [`LoadOutcome::recovered`] alongside empty
/// progress.
pub fn load<S: KvStorage>(storage: &S, key: &str) -> LoadOutcome {
    let raw = match storage.read(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            tracing::debug!(key, "no persisted progress; starting empty");
            return LoadOutcome {
                state: ProgressState::new(),
                recovered: None,
            };
        }
        Err(e) => {
            let err = ProgressError::StorageUnavailable {
                reason: e.to_string(),
            };
            tracing::warn!(key, error = %err, "could not read persisted progress");
            return LoadOutcome {
                state: ProgressState::new(),
                recovered: Some(err),
            };
        }
    };

    match ProgressState::from_json(&raw) {
        Ok(state) => {
            tracing::debug!(key, entries = state.len(), "loaded persisted progress");
            LoadOutcome {
                state,
                recovered: None,
            }
        }
        Err(e) => {
            let err = ProgressError::CorruptPersistedState {
                key: key.to_string(),
                reason: e.to_string(),
            };
            tracing::warn!(key, error = %err, "discarding corrupt persisted progress");
            LoadOutcome {
                state: ProgressState::new(),
                recovered: Some(err),
            }
        }
    }
}

/// Serialize `state` and write it under `key` in one storage write.
pub fn save<S: KvStorage>(storage: &S, key: &str, state: &ProgressState) -> Result<(), ProgressError> {
    let failed = |reason: String| {
        let err = ProgressError::PersistenceWriteFailed {
            key: key.to_string(),
            reason,
        };
        tracing::warn!(key, error = %err, "progress kept in memory only");
        err
    };
    let json = state.to_json().map_err(|e| failed(e.to_string()))?;
    storage.write(key, &json).map_err(|e| failed(e.to_string()))
}

type Subscriber = Box<dyn FnMut(&Event)>;

/// Exclusive owner of the progress state for one session.
pub struct ProgressStore<S: KvStorage> {
    storage: S,
    key: String,
    state: ProgressState,
    subscribers: Vec<Subscriber>,
}

impl<S: KvStorage> ProgressStore<S> {
    /// Load progress from `storage` and return a ready store.
    ///
    /// The second value reports data that had to be discarded while loading.
    pub fn open(storage: S, key: impl Into<String>) -> (Self, Option<ProgressError>) {
        let key = key.into();
        let LoadOutcome { state, recovered } = load(&storage, &key);
        let store = Self {
            storage,
            key,
            state,
            subscribers: Vec::new(),
        };
        (store, recovered)
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> &ProgressState {
        &self.state
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn is_completed(&self, id: &str) -> bool {
        self.state.is_completed(id)
    }

    pub fn stats(&self, schedule: &Schedule) -> DerivedStats {
        derive_stats(&self.state, schedule)
    }

    pub fn category_stats(&self, schedule: &Schedule) -> Vec<CategoryStats> {
        derive_category_stats(&self.state, schedule)
    }

    /// The persisted JSON form of the current state.
    pub fn export(&self) -> Result<String, serde_json::Error> {
        self.state.to_json()
    }

    /// Register a listener called for every event, in registration order.
    pub fn subscribe(&mut self, listener: impl FnMut(&Event) + 'static) {
        self.subscribers.push(Box::new(listener));
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Flip the completion flag for `id` and persist.
    ///
    /// Ids outside the schedule are accepted and stored.
    pub fn toggle(&mut self, id: &str) -> Toggled {
        let next = self.state.toggled(id);
        let completed = next.is_completed(id);
        let saved = self.commit(
            next,
            Event::UnitToggled {
                id: id.to_string(),
                completed,
                at: Utc::now(),
            },
        );
        Toggled {
            id: id.to_string(),
            completed,
            saved,
        }
    }

    /// Clear all progress and persist.
    pub fn reset(&mut self) -> Result<(), ProgressError> {
        let cleared = self.state.len();
        self.commit(
            ProgressState::new(),
            Event::ProgressReset {
                cleared,
                at: Utc::now(),
            },
        )
    }

    /// Drop entries for ids that `schedule` does not contain and persist.
    ///
    /// Returns the removed ids. Nothing is written when there is nothing to
    /// remove.
    pub fn prune(&mut self, schedule: &Schedule) -> (Vec<String>, Result<(), ProgressError>) {
        let removed: Vec<String> = self
            .state
            .unknown_ids(schedule)
            .into_iter()
            .map(str::to_string)
            .collect();
        if removed.is_empty() {
            return (removed, Ok(()));
        }
        let next = self.state.retain_known(schedule);
        let saved = self.commit(
            next,
            Event::ProgressPruned {
                removed: removed.clone(),
                at: Utc::now(),
            },
        );
        (removed, saved)
    }

    /// Replace progress with `state` (e.g. a migrated export) and persist.
    pub fn import(&mut self, state: ProgressState) -> Result<(), ProgressError> {
        let entries = state.len();
        self.commit(
            state,
            Event::ProgressImported {
                entries,
                at: Utc::now(),
            },
        )
    }

    /// Write the current state again.
    pub fn save(&mut self) -> Result<(), ProgressError> {
        let result = save(&self.storage, &self.key, &self.state);
        let event = match &result {
            Ok(()) => Event::ProgressSaved {
                key: self.key.clone(),
                entries: self.state.len(),
                at: Utc::now(),
            },
            Err(e) => Event::PersistenceWriteFailed {
                key: self.key.clone(),
                reason: e.to_string(),
                at: Utc::now(),
            },
        };
        self.emit(&event);
        result
    }

    fn commit(&mut self, next: ProgressState, event: Event) -> Result<(), ProgressError> {
        self.state = next;
        self.emit(&event);
        self.save()
    }

    fn emit(&mut self, event: &Event) {
        for listener in &mut self.subscribers {
            listener(event);
        }
    }
}
