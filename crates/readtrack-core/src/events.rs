use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Every change to progress produces an Event.
/// Renderers subscribe to them through [`crate::ProgressStore::subscribe`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    UnitToggled {
        id: String,
        completed: bool,
        at: DateTime<Utc>,
    },
    /// All progress cleared by the user.
    ProgressReset {
        cleared: usize,
        at: DateTime<Utc>,
    },
    /// Entries for ids outside the current schedule removed.
    ProgressPruned {
        removed: Vec<String>,
        at: DateTime<Utc>,
    },
    /// Progress replaced from an exported record.
    ProgressImported {
        entries: usize,
        at: DateTime<Utc>,
    },
    ProgressSaved {
        key: String,
        entries: usize,
        at: DateTime<Utc>,
    },
    /// The write was rejected; in-memory progress is unaffected.
    PersistenceWriteFailed {
        key: String,
        reason: String,
        at: DateTime<Utc>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_type_tag() {
        let event = Event::UnitToggled {
            id: "GEN".into(),
            completed: true,
            at: Utc::now(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "UnitToggled");
        assert_eq!(json["id"], "GEN");
        assert_eq!(json["completed"], true);
    }
}
