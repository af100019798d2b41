//! Request types for the Hifz Engine API.
//!
//! Every compute request names the viewer and the owner explicitly; the
//! service keeps no session state and never infers who is asking.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{
    AttendanceRecord, DailyCompletion, DataKind, LogEntry, MasteryRecord, ObjectiveCompletion,
    OwnerContext, Program, TransitionSource, ViewerContext, WeekId,
};

fn all_programs() -> Vec<Program> {
    Program::ALL.to_vec()
}

/// Request body for the `/coverage` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoverageRequest {
    /// Who is asking.
    pub viewer: ViewerContext,
    /// Whose coverage is computed.
    pub owner: OwnerContext,
    /// Programs to aggregate; every program when omitted.
    #[serde(default = "all_programs")]
    pub programs: Vec<Program>,
    /// The owner's log entries.
    #[serde(default)]
    pub entries: Vec<LogEntry>,
    /// The owner's mastery records; their mirror entries are rebuilt before
    /// aggregation.
    #[serde(default)]
    pub mastery_records: Vec<MasteryRecord>,
}

/// Request body for the `/rates` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateRequest {
    /// Who is asking.
    pub viewer: ViewerContext,
    /// Whose rates are computed.
    pub owner: OwnerContext,
    /// `week`, `month` or `year`.
    pub period_kind: String,
    /// Any date inside the requested period.
    pub anchor: NaiveDate,
    /// The current date; the server's UTC date when omitted.
    #[serde(default)]
    pub today: Option<NaiveDate>,
    /// Programs to report daily rates for; every program when omitted.
    #[serde(default = "all_programs")]
    pub programs: Vec<Program>,
    /// Objective codes to report; the codes found in the rows when omitted.
    #[serde(default)]
    pub objectives: Vec<String>,
    /// Daily checklist rows.
    #[serde(default)]
    pub daily: Vec<DailyCompletion>,
    /// Weekly objective rows.
    #[serde(default)]
    pub objective_completions: Vec<ObjectiveCompletion>,
    /// Weekly attendance sheets.
    #[serde(default)]
    pub attendance: Vec<AttendanceRecord>,
}

/// Request body for the `/mastery/transition` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitionRequest {
    /// Who is asking.
    pub viewer: ViewerContext,
    /// Whose record changes.
    pub owner: OwnerContext,
    /// The surah.
    pub surah_number: u8,
    /// The new status code (`AM`, `50%`, `51%`, `90%`, `S`, `V`, `X`).
    pub status: String,
    /// Explicit first verse.
    #[serde(default)]
    pub verse_start: Option<u16>,
    /// Explicit last verse.
    #[serde(default)]
    pub verse_end: Option<u16>,
    /// Week of the validation.
    #[serde(default)]
    pub validated_week: Option<WeekId>,
    /// Write path; `session` when omitted.
    #[serde(default)]
    pub source: TransitionSource,
    /// The stored record for this (owner, surah), if any.
    #[serde(default)]
    pub existing: Option<MasteryRecord>,
}

/// Request body for the `/visibility` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisibilityRequest {
    /// Who is asking.
    pub viewer: ViewerContext,
    /// Whose data is concerned.
    pub owner: OwnerContext,
    /// The kind of data.
    pub data_kind: DataKind,
}

/// Query string of the `/calendar/week` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekQuery {
    /// The date to describe.
    pub date: NaiveDate,
}
