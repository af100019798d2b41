//! Calculation logic for the Hifz Engine.
//!
//! This module contains the pure computations: week numbering and period
//! arithmetic, verse-set algebra, coverage aggregation, the mastery state
//! machine, completion rates, the visibility guard, and the boundary
//! validation applied before any of them run.

mod calendar;
mod coverage;
mod mastery;
mod rates;
mod validation;
mod verse_set;
mod visibility;

pub use calendar::{
    iso_week_id, iso_week_number, local_week_id, local_week_number, local_week_start,
    normalize_week_anchor, period_day_count, resolve_period, sunday_of_week, week_start_date,
    week_starts_between,
};
pub use coverage::{
    compute_collection_coverage, compute_corpus_coverage, compute_coverage_report,
    compute_surah_coverage,
};
pub use mastery::{
    MasterySummary, MasteryTransition, MirrorAction, StatusChange, TransitionOutcome,
    apply_mirror_action, apply_transition, derive_verse_range, mastery_summary, mirror_entry,
    mirror_entry_id, reconcile_mirrors,
};
pub use rates::{CompletionRows, compute_rate, effective_end};
pub use validation::{
    MAX_SUPPORTED_YEAR, MIN_SUPPORTED_YEAR, find_surah, validate_date, validate_log_entries,
    validate_log_entry, validate_optional_range, validate_verse_range, validate_week_start,
    validate_weekly_records,
};
pub use verse_set::{VerseSet, coverage_percentage, is_complete, percentage, union_coverage};
pub use visibility::{check_visibility, require_edit, require_view};
