//! Sparse completion rows and weekly attendance sheets.
//!
//! Daily and objective completions follow a "no row means not completed"
//! convention: rows are only created for positive state, and unchecking a
//! box deletes the row. A row with `completed = false` is tolerated and
//! counts as not completed.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use super::Program;

/// Completion of a daily program on one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyCompletion {
    /// The student.
    pub owner_id: String,
    /// The daily program.
    pub program: Program,
    /// The civil date.
    pub date: NaiveDate,
    /// Whether the program was completed that day.
    #[serde(default = "completed_default")]
    pub completed: bool,
}

/// Completion of a weekly objective.
///
/// `week_start` must be the local-week Sunday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectiveCompletion {
    /// The student.
    pub owner_id: String,
    /// Objective code, e.g. `peer_recitation`.
    pub objective: String,
    /// The Sunday the week starts on.
    pub week_start: NaiveDate,
    /// Whether the objective was met that week.
    #[serde(default = "completed_default")]
    pub completed: bool,
}

fn completed_default() -> bool {
    true
}

/// One week of session attendance, Sunday first.
///
/// Each day is `None` when no session was held, `Some(0)` when the student
/// was absent and `Some(score)` with `score > 0` when present.
///
/// # Example
///
/// ```
/// use hifz_engine::models::AttendanceRecord;
/// use chrono::NaiveDate;
///
/// let record = AttendanceRecord {
///     owner_id: "student_1".to_string(),
///     week_start: NaiveDate::from_ymd_opt(2026, 1, 11).unwrap(),
///     days: [None, Some(3), None, Some(0), None, Some(2), None],
/// };
///
/// let marks: Vec<_> = record.marked_days().collect();
/// assert_eq!(marks.len(), 3);
/// assert_eq!(marks[0], (NaiveDate::from_ymd_opt(2026, 1, 12).unwrap(), true));
/// assert_eq!(marks[1], (NaiveDate::from_ymd_opt(2026, 1, 14).unwrap(), false));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// The student.
    pub owner_id: String,
    /// The Sunday the week starts on.
    pub week_start: NaiveDate,
    /// Per-day marks, Sunday through Saturday.
    pub days: [Option<u8>; 7],
}

impl AttendanceRecord {
    /// Iterates `(date, present)` for every day on which a session was held.
    pub fn marked_days(&self) -> impl Iterator<Item = (NaiveDate, bool)> + '_ {
        self.days
            .iter()
            .zip(0u64..)
            .filter_map(move |(mark, offset)| {
                let score = (*mark)?;
                let date = self.week_start.checked_add_days(Days::new(offset))?;
                Some((date, score > 0))
            })
    }
}
