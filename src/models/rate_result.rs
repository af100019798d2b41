//! Rate result models for period-based completion aggregation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{Period, Program};

/// Completion of a daily program over a period.
///
/// # Example
///
/// ```
/// use hifz_engine::models::DayRate;
///
/// let rate = DayRate { completed_days: 3, total_days: 7, percentage: 43 };
/// let json = serde_json::to_string(&rate).unwrap();
/// assert_eq!(json, r#"{"completed_days":3,"total_days":7,"percentage":43}"#);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayRate {
    /// Distinct days with a completed row.
    pub completed_days: u32,
    /// Eligible days in the (clamped) period.
    pub total_days: u32,
    /// Rounded percentage; 0 when `total_days` is 0.
    pub percentage: u8,
}

/// Completion of a weekly objective over a period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekRate {
    /// Distinct weeks with a completed row.
    pub completed_weeks: u32,
    /// Weeks whose Sunday falls in the (clamped) period.
    pub total_weeks: u32,
    /// Rounded percentage; 0 when `total_weeks` is 0.
    pub percentage: u8,
}

/// Session attendance over a period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRate {
    /// Session days on which the student was present.
    pub present_days: u32,
    /// Days on which a session was held.
    pub session_days: u32,
    /// Rounded percentage; 0 when no session was held.
    pub percentage: u8,
}

/// Rates for one owner over one period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateReport {
    /// The owner the report describes.
    pub owner_id: String,
    /// The declared period.
    pub period: Period,
    /// Exclusive end actually used after clamping to "now".
    pub effective_end: NaiveDate,
    /// One rate per requested daily program.
    pub per_program: BTreeMap<Program, DayRate>,
    /// One rate per requested weekly objective.
    pub per_objective: BTreeMap<String, WeekRate>,
    /// Session attendance.
    pub attendance: AttendanceRate,
}
