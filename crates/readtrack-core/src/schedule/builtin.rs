//! Built-in reading plan: the 66 books of the Bible in canonical order.

use super::{ReadingUnit, Schedule, ScheduleProvider};
use crate::error::ScheduleError;

const ISRAEL_HISTORY: &str = "History of Israel";
const CONGREGATION: &str = "Growth of the Christian congregation";

/// (id, category, label, chapters, note)
const BOOKS: &[(&str, &str, &str, u32, Option<&str>)] = &[
    ("GEN", "Law", "Genesis", 50, None),
    ("EXO", "Law", "Exodus", 40, None),
    ("LEV", "Law", "Leviticus", 27, None),
    ("NUM", "Law", "Numbers", 36, None),
    ("DEU", "Law", "Deuteronomy", 34, None),
    ("JOS", "History", "Joshua", 24, Some(ISRAEL_HISTORY)),
    ("JDG", "History", "Judges", 21, Some(ISRAEL_HISTORY)),
    ("RUT", "History", "Ruth", 4, None),
    ("1SA", "History", "1 Samuel", 31, Some(ISRAEL_HISTORY)),
    ("2SA", "History", "2 Samuel", 24, Some(ISRAEL_HISTORY)),
    ("1KI", "History", "1 Kings", 22, Some(ISRAEL_HISTORY)),
    ("2KI", "History", "2 Kings", 25, Some(ISRAEL_HISTORY)),
    ("1CH", "History", "1 Chronicles", 29, None),
    ("2CH", "History", "2 Chronicles", 36, None),
    ("EZR", "History", "Ezra", 10, Some(ISRAEL_HISTORY)),
    ("NEH", "History", "Nehemiah", 13, Some(ISRAEL_HISTORY)),
    ("EST", "History", "Esther", 10, None),
    ("JOB", "Poetry", "Job", 42, None),
    ("PSA", "Poetry", "Psalms", 150, None),
    ("PRO", "Poetry", "Proverbs", 31, None),
    ("ECC", "Poetry", "Ecclesiastes", 12, None),
    ("SNG", "Poetry", "Song of Solomon", 8, None),
    ("ISA", "Major Prophets", "Isaiah", 66, None),
    ("JER", "Major Prophets", "Jeremiah", 52, None),
    ("LAM", "Major Prophets", "Lamentations", 5, None),
    ("EZK", "Major Prophets", "Ezekiel", 48, None),
    ("DAN", "Major Prophets", "Daniel", 12, None),
    ("HOS", "Minor Prophets", "Hosea", 14, None),
    ("JOL", "Minor Prophets", "Joel", 3, None),
    ("AMO", "Minor Prophets", "Amos", 9, None),
    ("OBA", "Minor Prophets", "Obadiah", 1, None),
    ("JON", "Minor Prophets", "Jonah", 4, None),
    ("MIC", "Minor Prophets", "Micah", 7, None),
    ("NAM", "Minor Prophets", "Nahum", 3, None),
    ("HAB", "Minor Prophets", "Habakkuk", 3, None),
    ("ZEP", "Minor Prophets", "Zephaniah", 3, None),
    ("HAG", "Minor Prophets", "Haggai", 2, None),
    ("ZEC", "Minor Prophets", "Zechariah", 14, None),
    ("MAL", "Minor Prophets", "Malachi", 4, None),
    ("MAT", "Gospels", "Matthew", 28, None),
    ("MRK", "Gospels", "Mark", 16, None),
    ("LUK", "Gospels", "Luke", 24, None),
    ("JHN", "Gospels", "John", 21, None),
    ("ACT", "Acts", "Acts", 28, Some(CONGREGATION)),
    ("ROM", "Letters", "Romans", 16, None),
    ("1CO", "Letters", "1 Corinthians", 16, None),
    ("2CO", "Letters", "2 Corinthians", 13, None),
    ("GAL", "Letters", "Galatians", 6, None),
    ("EPH", "Letters", "Ephesians", 6, None),
    ("PHP", "Letters", "Philippians", 4, None),
    ("COL", "Letters", "Colossians", 4, None),
    ("1TH", "Letters", "1 Thessalonians", 5, None),
    ("2TH", "Letters", "2 Thessalonians", 3, None),
    ("1TI", "Letters", "1 Timothy", 6, None),
    ("2TI", "Letters", "2 Timothy", 4, None),
    ("TIT", "Letters", "Titus", 3, None),
    ("PHM", "Letters", "Philemon", 1, None),
    ("HEB", "Letters", "Hebrews", 13, None),
    ("JAS", "Letters", "James", 5, None),
    ("1PE", "Letters", "1 Peter", 5, None),
    ("2PE", "Letters", "2 Peter", 3, None),
    ("1JN", "Letters", "1 John", 5, None),
    ("2JN", "Letters", "2 John", 1, None),
    ("3JN", "Letters", "3 John", 1, None),
    ("JUD", "Letters", "Jude", 1, None),
    ("REV", "Prophecy", "Revelation", 22, None),
];

/// Provider for the plan compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinSchedule;

impl BuiltinSchedule {
    pub fn units() -> Vec<ReadingUnit> {
        BOOKS
            .iter()
            .map(|&(id, category, label, chapters, note)| {
                let unit = ReadingUnit::new(id, category, label, chapters);
                match note {
                    Some(n) => unit.with_note(n),
                    None => unit,
                }
            })
            .collect()
    }
}

impl ScheduleProvider for BuiltinSchedule {
    fn load_schedule(&self) -> Result<Schedule, ScheduleError> {
        Ok(Schedule::new(Self::units())?)
    }
}
