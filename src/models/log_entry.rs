//! Progress log entries and study programs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A named track of study against which progress is logged independently.
///
/// # Example
///
/// ```
/// use hifz_engine::models::Program;
///
/// let program: Program = serde_json::from_str("\"MEMORIZATION\"").unwrap();
/// assert_eq!(program, Program::Memorization);
/// assert_eq!(program.to_string(), "MEMORIZATION");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Program {
    /// New memorization (hifz).
    Memorization,
    /// Consolidation of recently memorized material.
    Consolidation,
    /// Revision of older material (muraja'a).
    Revision,
    /// Reading without memorization.
    Reading,
    /// Exegesis study (tafsir).
    Exegesis,
}

impl Program {
    /// Every program, in declaration order.
    pub const ALL: [Program; 5] = [
        Program::Memorization,
        Program::Consolidation,
        Program::Revision,
        Program::Reading,
        Program::Exegesis,
    ];
}

impl std::fmt::Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Program::Memorization => write!(f, "MEMORIZATION"),
            Program::Consolidation => write!(f, "CONSOLIDATION"),
            Program::Revision => write!(f, "REVISION"),
            Program::Reading => write!(f, "READING"),
            Program::Exegesis => write!(f, "EXEGESIS"),
        }
    }
}

/// Where a log entry came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryOrigin {
    /// Logged by the student (or on their behalf).
    #[default]
    Logged,
    /// Synthesized from a mastery record so coverage matches mastery.
    MasteryMirror,
}

/// One act of study: a verse range of one surah under one program on one date.
///
/// The range is inclusive and 1-indexed. Entries are validated against the
/// surah table before they reach the aggregator.
///
/// # Example
///
/// ```
/// use hifz_engine::models::{LogEntry, Program};
/// use chrono::NaiveDate;
///
/// let entry = LogEntry::new(
///     "entry_001",
///     "student_1",
///     Program::Memorization,
///     2,
///     1,
///     5,
///     NaiveDate::from_ymd_opt(2026, 1, 14).unwrap(),
/// );
/// assert_eq!(entry.verse_count(), 5);
/// assert!(!entry.is_mirror());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Unique identifier for the entry.
    pub id: String,
    /// The student who studied.
    pub owner_id: String,
    /// The program the study counts towards.
    pub program: Program,
    /// The surah studied.
    pub surah_number: u8,
    /// First verse (inclusive).
    pub verse_start: u16,
    /// Last verse (inclusive).
    pub verse_end: u16,
    /// The civil date of the study.
    pub date: NaiveDate,
    /// Optional number of repetitions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repetitions: Option<u32>,
    /// Optional free-text comment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Origin of the entry.
    #[serde(default)]
    pub origin: EntryOrigin,
}

impl LogEntry {
    /// Creates a student-logged entry with no repetitions or comment.
    pub fn new(
        id: impl Into<String>,
        owner_id: impl Into<String>,
        program: Program,
        surah_number: u8,
        verse_start: u16,
        verse_end: u16,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            owner_id: owner_id.into(),
            program,
            surah_number,
            verse_start,
            verse_end,
            date,
            repetitions: None,
            comment: None,
            origin: EntryOrigin::Logged,
        }
    }

    /// Number of verses in the range.
    pub fn verse_count(&self) -> u32 {
        u32::from(self.verse_end.saturating_sub(self.verse_start)) + 1
    }

    /// Returns true for entries synthesized from a mastery record.
    pub fn is_mirror(&self) -> bool {
        self.origin == EntryOrigin::MasteryMirror
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_entry_defaults_origin_to_logged() {
        let json = r#"{
            "id": "e1",
            "owner_id": "u1",
            "program": "REVISION",
            "surah_number": 18,
            "verse_start": 1,
            "verse_end": 10,
            "date": "2026-03-01"
        }"#;
        let entry: LogEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.program, Program::Revision);
        assert_eq!(entry.origin, EntryOrigin::Logged);
        assert_eq!(entry.repetitions, None);
        assert_eq!(entry.verse_count(), 10);
    }

    #[test]
    fn test_serialize_entry_skips_absent_optionals() {
        let entry = LogEntry::new(
            "e1",
            "u1",
            Program::Reading,
            1,
            1,
            7,
            NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
        );
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"program\":\"READING\""));
        assert!(json.contains("\"origin\":\"logged\""));
        assert!(!json.contains("repetitions"));
        assert!(!json.contains("comment"));
    }

    #[test]
    fn test_single_verse_entry_counts_one() {
        let entry = LogEntry::new(
            "e1",
            "u1",
            Program::Memorization,
            108,
            2,
            2,
            NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
        );
        assert_eq!(entry.verse_count(), 1);
    }

    #[test]
    fn test_unknown_program_is_rejected() {
        let result: Result<Program, _> = serde_json::from_str("\"TAJWID\"");
        assert!(result.is_err());
    }
}
