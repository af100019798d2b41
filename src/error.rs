//! Error types for the Hifz Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while loading reference data or
//! validating records before they reach the computation functions.

use chrono::{NaiveDate, Weekday};
use thiserror::Error;

use crate::models::DataKind;

/// The main error type for the Hifz Engine.
///
/// Invalid input is always reported through one of these variants at the
/// boundary; the computation functions themselves never clamp or repair data.
///
/// # Example
///
/// ```
/// use hifz_engine::error::EngineError;
///
/// let error = EngineError::SurahNotFound { number: 115 };
/// assert_eq!(error.to_string(), "Surah not found: 115");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but its content is inconsistent.
    #[error("Invalid configuration in '{path}': {message}")]
    ConfigInvalid {
        /// The path to the offending file.
        path: String,
        /// A description of the inconsistency.
        message: String,
    },

    /// A surah number is not present in the reference table.
    #[error("Surah not found: {number}")]
    SurahNotFound {
        /// The surah number that was requested.
        number: u8,
    },

    /// A verse range falls outside `[1, total_verses]` or is reversed.
    #[error("Invalid verse range {start}-{end} for surah {surah} ({total_verses} verses)")]
    InvalidVerseRange {
        /// The surah the range refers to.
        surah: u8,
        /// First verse of the range.
        start: u16,
        /// Last verse of the range.
        end: u16,
        /// Number of verses in the surah.
        total_verses: u16,
    },

    /// A mastery status code outside the closed set.
    #[error("Unknown mastery status code: {code}")]
    InvalidStatusCode {
        /// The code that was supplied.
        code: String,
    },

    /// A period kind other than week, month or year.
    #[error("Unknown period kind: {kind}")]
    InvalidPeriodKind {
        /// The kind that was supplied.
        kind: String,
    },

    /// A weekly record anchored on a day other than the local-week Sunday.
    #[error("Week start {date} falls on {weekday}, expected the local-week Sunday")]
    InvalidWeekStart {
        /// The anchor date found on the record.
        date: NaiveDate,
        /// The weekday of that date.
        weekday: Weekday,
    },

    /// A stored mastery record passed for a different owner or surah.
    #[error(
        "Existing record of user '{record_owner_id}' for surah {record_surah} does not match \
         the change for user '{owner_id}' on surah {surah}"
    )]
    RecordMismatch {
        /// Owner named by the change.
        owner_id: String,
        /// Surah named by the change.
        surah: u8,
        /// Owner of the stored record.
        record_owner_id: String,
        /// Surah of the stored record.
        record_surah: u8,
    },

    /// A date outside the supported calendar range.
    #[error("Date {date} is outside the supported range (years {min_year} to {max_year})")]
    DateOutOfRange {
        /// The date that was supplied.
        date: NaiveDate,
        /// First supported year.
        min_year: i32,
        /// Last supported year.
        max_year: i32,
    },

    /// The viewer may not read or edit the owner's data.
    #[error("User '{viewer_id}' may not access {data_kind} data of user '{owner_id}'")]
    AccessDenied {
        /// The user requesting access.
        viewer_id: String,
        /// The owner of the data.
        owner_id: String,
        /// The category of data requested.
        data_kind: DataKind,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
