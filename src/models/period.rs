//! Reporting periods and week identifiers.
//!
//! This module contains the [`Period`] type used as the window for rate
//! calculations, and [`WeekId`], a week number that always carries the
//! numbering convention it was computed under.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::EngineError;

/// The two week-numbering conventions found in the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeekConvention {
    /// Sunday-to-Saturday weeks used by attendance and sessions.
    Local,
    /// ISO-8601 Monday-start weeks, found on some legacy records.
    Iso,
}

/// A week number tagged with its convention and series year.
///
/// For [`WeekConvention::Local`] the year is the calendar year of the week's
/// Sunday; for [`WeekConvention::Iso`] it is the ISO week-based year.
///
/// # Example
///
/// ```
/// use hifz_engine::models::{WeekConvention, WeekId};
///
/// let week = WeekId::local(2025, 53);
/// assert_eq!(week.convention, WeekConvention::Local);
/// assert_eq!(week.to_string(), "2025-L53");
/// assert_eq!(WeekId::iso(2026, 1).to_string(), "2026-W01");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WeekId {
    /// The numbering convention.
    pub convention: WeekConvention,
    /// The year the week series belongs to.
    pub year: i32,
    /// The week number within that series.
    pub week: u32,
}

impl WeekId {
    /// Creates a local (Sunday-start) week identifier.
    pub fn local(year: i32, week: u32) -> Self {
        Self {
            convention: WeekConvention::Local,
            year,
            week,
        }
    }

    /// Creates an ISO week identifier.
    pub fn iso(year: i32, week: u32) -> Self {
        Self {
            convention: WeekConvention::Iso,
            year,
            week,
        }
    }
}

impl std::fmt::Display for WeekId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.convention {
            WeekConvention::Local => write!(f, "{}-L{:02}", self.year, self.week),
            WeekConvention::Iso => write!(f, "{}-W{:02}", self.year, self.week),
        }
    }
}

/// The granularity of a reporting period.
///
/// Parsed from `week`, `month` or `year`; anything else is rejected with
/// [`EngineError::InvalidPeriodKind`].
///
/// # Example
///
/// ```
/// use hifz_engine::models::PeriodKind;
///
/// let kind: PeriodKind = "month".parse().unwrap();
/// assert_eq!(kind, PeriodKind::Month);
/// assert!("fortnight".parse::<PeriodKind>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodKind {
    /// A local (Sunday-start) week.
    Week,
    /// A calendar month.
    Month,
    /// A calendar year.
    Year,
}

impl FromStr for PeriodKind {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "week" => Ok(PeriodKind::Week),
            "month" => Ok(PeriodKind::Month),
            "year" => Ok(PeriodKind::Year),
            _ => Err(EngineError::InvalidPeriodKind {
                kind: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for PeriodKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PeriodKind::Week => write!(f, "week"),
            PeriodKind::Month => write!(f, "month"),
            PeriodKind::Year => write!(f, "year"),
        }
    }
}

/// A resolved reporting period `[start, end)`.
///
/// # Example
///
/// ```
/// use hifz_engine::models::{Period, PeriodKind};
/// use chrono::NaiveDate;
///
/// let period = Period {
///     kind: PeriodKind::Week,
///     start: NaiveDate::from_ymd_opt(2026, 1, 11).unwrap(),
///     end: NaiveDate::from_ymd_opt(2026, 1, 18).unwrap(),
/// };
///
/// assert!(period.contains_date(NaiveDate::from_ymd_opt(2026, 1, 11).unwrap()));
/// assert!(period.contains_date(NaiveDate::from_ymd_opt(2026, 1, 17).unwrap()));
/// assert!(!period.contains_date(NaiveDate::from_ymd_opt(2026, 1, 18).unwrap()));
/// assert_eq!(period.day_count(), 7);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    /// The granularity this period was resolved from.
    pub kind: PeriodKind,
    /// First day of the period (inclusive).
    pub start: NaiveDate,
    /// Day after the last day of the period (exclusive).
    pub end: NaiveDate,
}

impl Period {
    /// Checks if a date falls within `[start, end)`.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start && date < self.end
    }

    /// Number of days in the period; zero for an empty or inverted period.
    pub fn day_count(&self) -> u32 {
        u32::try_from((self.end - self.start).num_days()).unwrap_or(0)
    }
}
