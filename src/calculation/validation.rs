//! Boundary validation of incoming records.
//!
//! Records are checked here before they reach the aggregation functions.
//! Nothing is clamped or repaired: a verse range outside its surah, an
//! unknown surah, or a week anchored on a day other than Sunday is rejected
//! with the matching [`EngineError`].

use chrono::{Datelike, NaiveDate, Weekday};

use crate::error::{EngineError, EngineResult};
use crate::models::{AttendanceRecord, LogEntry, ObjectiveCompletion, Surah};

/// Looks up a surah in the reference table.
///
/// # Example
///
/// ```
/// use hifz_engine::calculation::find_surah;
/// use hifz_engine::models::Surah;
///
/// let table = vec![Surah::new(1, "Al-Fatiha", 7), Surah::new(2, "Al-Baqara", 286)];
/// assert_eq!(find_surah(&table, 2).unwrap().total_verses, 286);
/// assert!(find_surah(&table, 3).is_err());
/// ```
pub fn find_surah(surahs: &[Surah], number: u8) -> EngineResult<&Surah> {
    surahs
        .iter()
        .find(|s| s.number == number)
        .ok_or(EngineError::SurahNotFound { number })
}

/// Checks that `[start, end]` lies within `[1, surah.total_verses]`.
pub fn validate_verse_range(surah: &Surah, start: u16, end: u16) -> EngineResult<()> {
    if surah.contains_range(start, end) {
        Ok(())
    } else {
        Err(EngineError::InvalidVerseRange {
            surah: surah.number,
            start,
            end,
            total_verses: surah.total_verses,
        })
    }
}

/// Checks an optional explicit range: both bounds or neither.
pub fn validate_optional_range(
    surah: &Surah,
    start: Option<u16>,
    end: Option<u16>,
) -> EngineResult<Option<(u16, u16)>> {
    match (start, end) {
        (None, None) => Ok(None),
        (Some(start), Some(end)) => {
            validate_verse_range(surah, start, end)?;
            Ok(Some((start, end)))
        }
        (start, end) => Err(EngineError::InvalidVerseRange {
            surah: surah.number,
            start: start.unwrap_or(0),
            end: end.unwrap_or(0),
            total_verses: surah.total_verses,
        }),
    }
}

/// Validates a log entry against the surah table.
///
/// # Example
///
/// ```
/// use hifz_engine::calculation::validate_log_entry;
/// use hifz_engine::error::EngineError;
/// use hifz_engine::models::{LogEntry, Program, Surah};
/// use chrono::NaiveDate;
///
/// let table = vec![Surah::new(1, "Al-Fatiha", 7)];
/// let day = NaiveDate::from_ymd_opt(2026, 1, 12).unwrap();
///
/// let ok = LogEntry::new("e1", "u1", Program::Memorization, 1, 1, 7, day);
/// assert!(validate_log_entry(&ok, &table).is_ok());
///
/// let too_long = LogEntry::new("e2", "u1", Program::Memorization, 1, 1, 8, day);
/// assert!(matches!(
///     validate_log_entry(&too_long, &table),
///     Err(EngineError::InvalidVerseRange { .. })
/// ));
/// ```
pub fn validate_log_entry(entry: &LogEntry, surahs: &[Surah]) -> EngineResult<()> {
    let surah = find_surah(surahs, entry.surah_number)?;
    validate_verse_range(surah, entry.verse_start, entry.verse_end)
}

/// Validates every entry, stopping at the first invalid one.
pub fn validate_log_entries(entries: &[LogEntry], surahs: &[Surah]) -> EngineResult<()> {
    entries
        .iter()
        .try_for_each(|entry| validate_log_entry(entry, surahs))
}

/// First calendar year accepted at the boundary.
pub const MIN_SUPPORTED_YEAR: i32 = 1;
/// Last calendar year accepted at the boundary.
pub const MAX_SUPPORTED_YEAR: i32 = 9999;

/// Checks that `date` lies in a year the calendar functions are meant for.
///
/// Dates near chrono's representable limits leave no room for the week,
/// month and year arithmetic around them, so they are rejected here.
pub fn validate_date(date: NaiveDate) -> EngineResult<()> {
    if (MIN_SUPPORTED_YEAR..=MAX_SUPPORTED_YEAR).contains(&date.year()) {
        Ok(())
    } else {
        Err(EngineError::DateOutOfRange {
            date,
            min_year: MIN_SUPPORTED_YEAR,
            max_year: MAX_SUPPORTED_YEAR,
        })
    }
}

/// Checks that a weekly record is anchored on the local-week Sunday.
///
/// Monday-anchored historical rows must be migrated with
/// [`normalize_week_anchor`](super::normalize_week_anchor) first.
pub fn validate_week_start(date: NaiveDate) -> EngineResult<()> {
    let weekday = date.weekday();
    if weekday == Weekday::Sun {
        Ok(())
    } else {
        Err(EngineError::InvalidWeekStart { date, weekday })
    }
}

/// Validates the week anchors of objective completions and attendance sheets.
pub fn validate_weekly_records(
    objectives: &[ObjectiveCompletion],
    attendance: &[AttendanceRecord],
) -> EngineResult<()> {
    objectives
        .iter()
        .map(|row| row.week_start)
        .chain(attendance.iter().map(|record| record.week_start))
        .try_for_each(validate_week_start)
}
