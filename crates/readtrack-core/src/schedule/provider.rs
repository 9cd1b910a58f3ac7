//! Schedule providers.
//!
//! A provider is read once at startup; the resulting [`Schedule`] is static
//! for the rest of the session.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{ReadingUnit, Schedule};
use crate::error::ScheduleError;

/// Source of the ordered reading plan.
pub trait ScheduleProvider {
    fn load_schedule(&self) -> Result<Schedule, ScheduleError>;
}

/// Wrapper for serializing a schedule to TOML
#[derive(Serialize, Deserialize)]
struct ScheduleToml {
    #[serde(default)]
    units: Vec<ReadingUnit>,
}

/// A user-supplied schedule stored as `[[units]]` tables in a TOML file.
#[derive(Debug, Clone)]
pub struct ScheduleFile {
    path: PathBuf,
}

impl ScheduleFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse schedule TOML text. `path` is only used for error messages.
    pub fn parse(content: &str, path: &Path) -> Result<Schedule, ScheduleError> {
        let file: ScheduleToml =
            toml::from_str(content).map_err(|e| ScheduleError::ParseFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        Ok(Schedule::new(file.units)?)
    }

    /// Render a schedule in the format `parse` accepts.
    pub fn render(schedule: &Schedule) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(&ScheduleToml {
            units: schedule.units().to_vec(),
        })
    }
}

impl ScheduleProvider for ScheduleFile {
    fn load_schedule(&self) -> Result<Schedule, ScheduleError> {
        let content =
            std::fs::read_to_string(&self.path).map_err(|source| ScheduleError::ReadFailed {
                path: self.path.clone(),
                source,
            })?;
        let schedule = Self::parse(&content, &self.path)?;
        tracing::debug!(path = %self.path.display(), units = schedule.len(), "loaded schedule file");
        Ok(schedule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;

    const SAMPLE: &str = r#"
[[units]]
id = "A"
category = "Part 1"
label = "First"
unit_count = 3

[[units]]
id = "B"
category = "Part 1"
label = "Second"
unit_count = 2
note = "Short"
"#;

    #[test]
    fn parses_units_in_order() {
        let s = ScheduleFile::parse(SAMPLE, Path::new("plan.toml")).unwrap();
        assert_eq!(s.ids().collect::<Vec<_>>(), vec!["A", "B"]);
        assert_eq!(s.get("B").and_then(|u| u.note.as_deref()), Some("Short"));
        assert_eq!(s.total_unit_count(), 5);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let content = format!("{SAMPLE}\n[[units]]\nid = \"A\"\ncategory = \"x\"\nlabel = \"again\"\n");
        let err = ScheduleFile::parse(&content, Path::new("plan.toml")).unwrap_err();
        assert!(matches!(
            err,
            ScheduleError::Invalid(ValidationError::DuplicateId { .. })
        ));
    }

    #[test]
    fn malformed_toml_reports_path() {
        let err = ScheduleFile::parse("[[units]\n", Path::new("broken.toml")).unwrap_err();
        assert!(err.to_string().contains("broken.toml"));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let provider = ScheduleFile::new(dir.path().join("missing.toml"));
        assert!(matches!(
            provider.load_schedule(),
            Err(ScheduleError::ReadFailed { .. })
        ));
    }

    #[test]
    fn render_then_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plan.toml");
        let original = ScheduleFile::parse(SAMPLE, &path).unwrap();
        std::fs::write(&path, ScheduleFile::render(&original).unwrap()).unwrap();

        let loaded = ScheduleFile::new(&path).load_schedule().unwrap();
        assert_eq!(loaded, original);
    }
}
