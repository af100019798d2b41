//! Mastery state machine.
//!
//! This module applies status transitions to per-surah mastery records,
//! enforces the non-downgrade rule for guarded write paths, and keeps the
//! synthetic memorization entries that mirror mastery into coverage.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

use super::calendar::week_start_date;
use super::validation::{find_surah, validate_optional_range};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    DowngradePolicy, EntryOrigin, LogEntry, MasteryRecord, MasteryStatus, Program, Surah,
    TransitionSource, WeekId,
};

/// A requested status change for one (owner, surah) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusChange {
    /// The student.
    pub owner_id: String,
    /// The surah.
    pub surah_number: u8,
    /// The new status.
    pub status: MasteryStatus,
    /// Explicit first verse; must be given together with `verse_end`.
    #[serde(default)]
    pub verse_start: Option<u16>,
    /// Explicit last verse; must be given together with `verse_start`.
    #[serde(default)]
    pub verse_end: Option<u16>,
    /// Week of the validation, if known.
    #[serde(default)]
    pub validated_week: Option<WeekId>,
    /// The write path the change arrives through.
    #[serde(default)]
    pub source: TransitionSource,
}

/// What happened to the stored record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionOutcome {
    /// No record existed; one was created.
    Created,
    /// The existing record was overwritten.
    Updated,
    /// The change was refused and the existing record kept.
    KeptExisting,
}

/// The change to the synthetic mirror entry that goes with a transition.
///
/// The collaborator persists the record and this action in one transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum MirrorAction {
    /// Insert or replace the mirror entry of this (owner, surah).
    Upsert {
        /// The entry to store.
        entry: LogEntry,
    },
    /// Delete the mirror entry of this (owner, surah), if any.
    Remove {
        /// The student.
        owner_id: String,
        /// The surah.
        surah_number: u8,
    },
    /// Leave the mirror entry as it is.
    Unchanged,
}

/// The result of applying a [`StatusChange`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MasteryTransition {
    /// The record as it stands after the transition.
    pub record: MasteryRecord,
    /// What happened to the stored record.
    pub outcome: TransitionOutcome,
    /// The mirror change to persist alongside the record.
    pub mirror: MirrorAction,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// Number of records per status, for dashboards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MasterySummary {
    /// The student.
    pub owner_id: String,
    /// Number of surahs with a record.
    pub total_records: u32,
    /// Number of surahs in `V` or `X`.
    pub settled_surahs: u32,
    /// Count per status code, zeros included.
    pub counts: BTreeMap<String, u32>,
}

/// Derives the covered range `[1, end]` for a status without an explicit range.
///
/// Partial statuses cover the leading fraction of the surah, rounded up;
/// every other status covers the whole surah.
///
/// # Example
///
/// ```
/// use hifz_engine::calculation::derive_verse_range;
/// use hifz_engine::models::MasteryStatus;
///
/// assert_eq!(derive_verse_range(MasteryStatus::Half, 7), (1, 4));
/// assert_eq!(derive_verse_range(MasteryStatus::NinetyPercent, 286), (1, 258));
/// assert_eq!(derive_verse_range(MasteryStatus::Validated, 286), (1, 286));
/// ```
pub fn derive_verse_range(status: MasteryStatus, total_verses: u16) -> (u16, u16) {
    let total = u32::from(total_verses);
    let end = match status {
        MasteryStatus::Half | MasteryStatus::OverHalf => (total * 5).div_ceil(10),
        MasteryStatus::NinetyPercent => (total * 9).div_ceil(10),
        _ => total,
    };
    // end <= total_verses, so the conversion cannot fail
    (1, u16::try_from(end).unwrap_or(total_verses))
}

/// Applies a status change to the existing record of a surah.
///
/// Writes are last-write-wins, except that a path guarded by `policy` may
/// not replace a `V` or `X` with `AM` or a partial status; such a change is
/// refused and the existing record is returned untouched.
///
/// # Arguments
///
/// * `existing` - The stored record for this (owner, surah), if any
/// * `change` - The requested change
/// * `surah` - The surah the change refers to
/// * `policy` - Which write paths the non-downgrade rule applies to
/// * `now` - Time of the write, stored as `updated_at`
///
/// # Errors
///
/// Returns [`EngineError::SurahNotFound`] if `surah` is not the surah named
/// by the change, [`EngineError::RecordMismatch`] if `existing` belongs to
/// another owner or surah, and [`EngineError::InvalidVerseRange`] if the
/// explicit range is incomplete or outside the surah.
///
/// # Example
///
/// ```
/// use hifz_engine::calculation::{apply_transition, MirrorAction, StatusChange, TransitionOutcome};
/// use hifz_engine::models::{DowngradePolicy, MasteryStatus, Surah, TransitionSource};
/// use chrono::{TimeZone, Utc};
///
/// let surah = Surah::new(112, "Al-Ikhlas", 4);
/// let now = Utc.with_ymd_and_hms(2026, 2, 1, 10, 0, 0).unwrap();
/// let change = StatusChange {
///     owner_id: "u1".to_string(),
///     surah_number: 112,
///     status: MasteryStatus::Validated,
///     verse_start: None,
///     verse_end: None,
///     validated_week: None,
///     source: TransitionSource::Session,
/// };
///
/// let result = apply_transition(None, &change, &surah, DowngradePolicy::default(), now).unwrap();
/// assert_eq!(result.outcome, TransitionOutcome::Created);
/// assert!(matches!(result.mirror, MirrorAction::Upsert { ref entry } if entry.verse_end == 4));
/// ```
pub fn apply_transition(
    existing: Option<&MasteryRecord>,
    change: &StatusChange,
    surah: &Surah,
    policy: DowngradePolicy,
    now: DateTime<Utc>,
) -> EngineResult<MasteryTransition> {
    if surah.number != change.surah_number {
        return Err(EngineError::SurahNotFound {
            number: change.surah_number,
        });
    }
    if let Some(current) = existing {
        if current.owner_id != change.owner_id || current.surah_number != change.surah_number {
            return Err(EngineError::RecordMismatch {
                owner_id: change.owner_id.clone(),
                surah: change.surah_number,
                record_owner_id: current.owner_id.clone(),
                record_surah: current.surah_number,
            });
        }
    }
    let range = validate_optional_range(surah, change.verse_start, change.verse_end)?;

    if let Some(current) = existing {
        let downgrade = current.status.is_settled()
            && (change.status == MasteryStatus::ToMemorize || change.status.is_partial());
        if downgrade && policy.guards(change.source) {
            debug!(
                owner_id = %change.owner_id,
                surah = change.surah_number,
                current = %current.status,
                requested = %change.status,
                source = ?change.source,
                "Refused mastery downgrade"
            );
            return Ok(MasteryTransition {
                record: current.clone(),
                outcome: TransitionOutcome::KeptExisting,
                mirror: MirrorAction::Unchanged,
                reasoning: format!(
                    "Kept {} for surah {}: {:?} writes may not downgrade to {}",
                    current.status, surah.number, change.source, change.status
                ),
            });
        }
    }

    let record = MasteryRecord {
        owner_id: change.owner_id.clone(),
        surah_number: change.surah_number,
        status: change.status,
        validated_week: change.validated_week,
        verse_start: range.map(|(start, _)| start),
        verse_end: range.map(|(_, end)| end),
        updated_at: now,
    };

    let mirror = match mirror_entry(&record, surah) {
        Some(entry) => MirrorAction::Upsert { entry },
        None => MirrorAction::Remove {
            owner_id: record.owner_id.clone(),
            surah_number: record.surah_number,
        },
    };

    let (outcome, reasoning) = match existing {
        None => (
            TransitionOutcome::Created,
            format!("Created {} for surah {}", record.status, surah.number),
        ),
        Some(current) => (
            TransitionOutcome::Updated,
            format!(
                "Changed surah {} from {} to {}",
                surah.number, current.status, record.status
            ),
        ),
    };

    Ok(MasteryTransition {
        record,
        outcome,
        mirror,
        reasoning,
    })
}

/// Builds the synthetic memorization entry mirroring `record`.
///
/// Returns `None` for statuses that are not mirrored (`AM`, `S`). The entry
/// is dated at the start of the validation week when one is known, and at
/// the record's write date otherwise.
pub fn mirror_entry(record: &MasteryRecord, surah: &Surah) -> Option<LogEntry> {
    if !record.status.mirrors_coverage() {
        return None;
    }

    let (verse_start, verse_end) = match (record.verse_start, record.verse_end) {
        (Some(start), Some(end)) => (start, end),
        _ => derive_verse_range(record.status, surah.total_verses),
    };

    Some(LogEntry {
        id: mirror_entry_id(&record.owner_id, record.surah_number),
        owner_id: record.owner_id.clone(),
        program: Program::Memorization,
        surah_number: record.surah_number,
        verse_start,
        verse_end,
        date: mirror_date(record),
        repetitions: None,
        comment: Some(format!("Mastery status {}", record.status)),
        origin: EntryOrigin::MasteryMirror,
    })
}

fn mirror_date(record: &MasteryRecord) -> NaiveDate {
    record
        .validated_week
        .as_ref()
        .and_then(week_start_date)
        .unwrap_or_else(|| record.updated_at.date_naive())
}

/// The stable identifier of the mirror entry of an (owner, surah) pair.
pub fn mirror_entry_id(owner_id: &str, surah_number: u8) -> String {
    format!("mastery-mirror-{}-{}", owner_id, surah_number)
}

fn is_mirror_of(entry: &LogEntry, owner_id: &str, surah_number: u8) -> bool {
    entry.is_mirror()
        && entry.program == Program::Memorization
        && entry.owner_id == owner_id
        && entry.surah_number == surah_number
}

/// Applies a mirror action to an in-memory entry list.
///
/// Any previous mirror of the same (owner, surah) is replaced, so there is
/// at most one per pair afterwards.
pub fn apply_mirror_action(entries: &mut Vec<LogEntry>, action: &MirrorAction) {
    match action {
        MirrorAction::Upsert { entry } => {
            entries.retain(|e| !is_mirror_of(e, &entry.owner_id, entry.surah_number));
            entries.push(entry.clone());
        }
        MirrorAction::Remove {
            owner_id,
            surah_number,
        } => entries.retain(|e| !is_mirror_of(e, owner_id, *surah_number)),
        MirrorAction::Unchanged => {}
    }
}

/// Rebuilds every mirror entry from the mastery records.
///
/// Logged entries are returned unchanged; existing mirror entries are
/// discarded and regenerated, so reconciling twice gives the same result.
/// When several records exist for one (owner, surah), the most recently
/// updated one wins.
///
/// # Errors
///
/// Returns [`EngineError::SurahNotFound`] for a record whose surah is not in
/// the table and [`EngineError::InvalidVerseRange`] for a record whose
/// explicit range does not fit its surah.
pub fn reconcile_mirrors(
    records: &[MasteryRecord],
    surahs: &[Surah],
    entries: &[LogEntry],
) -> EngineResult<Vec<LogEntry>> {
    let mut latest: BTreeMap<(&str, u8), &MasteryRecord> = BTreeMap::new();
    for record in records {
        let key = (record.owner_id.as_str(), record.surah_number);
        match latest.get(&key) {
            Some(kept) if kept.updated_at > record.updated_at => {}
            _ => {
                latest.insert(key, record);
            }
        }
    }

    let mut reconciled: Vec<LogEntry> = entries
        .iter()
        .filter(|e| !e.is_mirror())
        .cloned()
        .collect();
    for record in latest.into_values() {
        let surah = find_surah(surahs, record.surah_number)?;
        validate_optional_range(surah, record.verse_start, record.verse_end)?;
        reconciled.extend(mirror_entry(record, surah));
    }
    Ok(reconciled)
}

/// Counts `owner_id`'s records per status.
///
/// # Example
///
/// ```
/// use hifz_engine::calculation::mastery_summary;
///
/// let summary = mastery_summary("u1", &[]);
/// assert_eq!(summary.total_records, 0);
/// assert_eq!(summary.counts.len(), 7);
/// assert_eq!(summary.counts["V"], 0);
/// ```
pub fn mastery_summary(owner_id: &str, records: &[MasteryRecord]) -> MasterySummary {
    let mut counts: BTreeMap<String, u32> = MasteryStatus::ALL
        .iter()
        .map(|status| (status.code().to_string(), 0))
        .collect();

    let owned = records.iter().filter(|r| r.owner_id == owner_id);
    let mut total_records = 0;
    let mut settled_surahs = 0;
    for record in owned {
        total_records += 1;
        if record.status.is_settled() {
            settled_surahs += 1;
        }
        *counts.entry(record.status.code().to_string()).or_default() += 1;
    }

    MasterySummary {
        owner_id: owner_id.to_string(),
        total_records,
        settled_surahs,
        counts,
    }
}
