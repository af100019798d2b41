//! Core data models for the Hifz Engine.
//!
//! This module contains the records the engine consumes (log entries,
//! mastery records, completion rows), the static reference types, and the
//! result types it produces.

mod access;
mod completion;
mod coverage_result;
mod log_entry;
mod mastery;
mod period;
mod rate_result;
mod surah;

pub use access::{
    DataKind, GlobalRole, GroupMembership, GroupRole, OwnerContext, PrivacyFlags, ViewerContext,
    Visibility, VisibilityReason,
};
pub use completion::{AttendanceRecord, DailyCompletion, ObjectiveCompletion};
pub use coverage_result::{
    CollectionCoverage, CorpusCoverage, CoverageReport, ProgramCoverage, SurahCoverage,
};
pub use log_entry::{EntryOrigin, LogEntry, Program};
pub use mastery::{DowngradePolicy, MasteryRecord, MasteryStatus, TransitionSource};
pub use period::{Period, PeriodKind, WeekConvention, WeekId};
pub use rate_result::{AttendanceRate, DayRate, RateReport, WeekRate};
pub use surah::{Collection, Surah};
