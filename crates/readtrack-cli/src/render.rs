//! Plain-text rendering of the checklist.

use readtrack_core::progress::CategoryStats;
use readtrack_core::storage::DisplayConfig;
use readtrack_core::{DerivedStats, ProgressState, ReadingUnit, Schedule};

const BAR_WIDTH: usize = 30;

/// `[#########---------]  12 / 66 (18%)`
pub fn summary_line(stats: &DerivedStats) -> String {
    let filled = BAR_WIDTH * usize::from(stats.percentage) / 100;
    format!(
        "[{}{}] {} / {} ({}%)",
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH - filled),
        stats.completed,
        stats.total,
        stats.percentage
    )
}

pub fn unit_line(unit: &ReadingUnit, completed: bool, display: &DisplayConfig) -> String {
    let mark = if completed { "x" } else { " " };
    let mut line = format!("[{mark}] {:<4} {} ({} ch.)", unit.id, unit.label, unit.unit_count);
    if display.show_notes {
        if let Some(note) = &unit.note {
            line.push_str(&format!("  <{note}>"));
        }
    }
    line
}

/// Full checklist, one header per category run.
///
/// `only_category` restricts output to groups with that category name.
pub fn checklist(
    schedule: &Schedule,
    state: &ProgressState,
    display: &DisplayConfig,
    only_category: Option<&str>,
) -> String {
    let mut out = String::new();
    for group in schedule.categories() {
        if only_category.is_some_and(|c| !c.eq_ignore_ascii_case(group.category)) {
            continue;
        }
        let lines: Vec<String> = group
            .units
            .iter()
            .filter(|u| display.show_completed || !state.is_completed(&u.id))
            .map(|u| unit_line(u, state.is_completed(&u.id), display))
            .collect();
        if lines.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(&format!("── {} ──\n", group.category));
        for line in lines {
            out.push_str(&line);
            out.push('\n');
        }
    }
    out
}

pub fn category_table(rows: &[CategoryStats]) -> String {
    let width = rows.iter().map(|r| r.category.len()).max().unwrap_or(0);
    rows.iter()
        .map(|r| {
            format!(
                "{:<width$}  {:>3} / {:<3} {:>3}%\n",
                r.category, r.stats.completed, r.stats.total, r.stats.percentage
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schedule() -> Schedule {
        Schedule::new(vec![
            ReadingUnit::new("GEN", "Law", "Genesis", 50),
            ReadingUnit::new("EXO", "Law", "Exodus", 40),
            ReadingUnit::new("ACT", "Acts", "Acts", 28).with_note("Growth of the Christian congregation"),
        ])
        .unwrap()
    }

    #[test]
    fn summary_line_fills_bar_by_percentage() {
        let line = summary_line(&DerivedStats {
            total: 3,
            completed: 1,
            percentage: 33,
        });
        assert!(line.starts_with("[#########-"));
        assert!(line.ends_with("1 / 3 (33%)"));
    }

    #[test]
    fn summary_line_handles_bounds() {
        let empty = summary_line(&DerivedStats::default());
        assert!(empty.contains(&"-".repeat(BAR_WIDTH)));
        let full = summary_line(&DerivedStats {
            total: 2,
            completed: 2,
            percentage: 100,
        });
        assert!(full.contains(&"#".repeat(BAR_WIDTH)));
    }

    #[test]
    fn checklist_marks_completed_units() {
        let state: ProgressState = [("GEN", true)].into_iter().collect();
        let text = checklist(&schedule(), &state, &DisplayConfig::default(), None);
        assert!(text.contains("── Law ──"));
        assert!(text.contains("[x] GEN  Genesis (50 ch.)"));
        assert!(text.contains("[ ] EXO  Exodus"));
        assert!(text.contains("<Growth of the Christian congregation>"));
    }

    #[test]
    fn checklist_respects_display_settings() {
        let state: ProgressState = [("GEN", true)].into_iter().collect();
        let display = DisplayConfig {
            show_notes: false,
            show_completed: false,
        };
        let text = checklist(&schedule(), &state, &display, None);
        assert!(!text.contains("GEN"));
        assert!(!text.contains("congregation"));
    }

    #[test]
    fn checklist_filters_by_category() {
        let text = checklist(&schedule(), &ProgressState::new(), &DisplayConfig::default(), Some("acts"));
        assert!(text.contains("ACT"));
        assert!(!text.contains("Law"));
    }

    #[test]
    fn category_table_aligns_rows() {
        let state: ProgressState = [("GEN", true)].into_iter().collect();
        let rows = readtrack_core::progress::derive_category_stats(&state, &schedule());
        let table = category_table(&rows);
        assert_eq!(table.lines().count(), 2);
        assert!(table.lines().next().unwrap().contains(" 50%"));
    }
}
