//! Mastery status codes and per-surah mastery records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::WeekId;
use crate::error::EngineError;

/// How settled a student's command of a surah is.
///
/// Serialized with the historical short codes (`AM`, `50%`, `51%`, `90%`,
/// `S`, `V`, `X`). Precedence, lowest to highest:
///
/// | code | variant | precedence |
/// |------|---------|------------|
/// | `AM` | [`ToMemorize`](MasteryStatus::ToMemorize) | 0 |
/// | `50%` `51%` `90%` | partials | 1 |
/// | `S` | [`Recited`](MasteryStatus::Recited) | 2 |
/// | `V` | [`Validated`](MasteryStatus::Validated) | 3 |
/// | `X` | [`Known`](MasteryStatus::Known) | 4 |
///
/// Partials share one precedence level; their fraction only orders display.
///
/// # Example
///
/// ```
/// use hifz_engine::models::MasteryStatus;
///
/// let status: MasteryStatus = "V".parse().unwrap();
/// assert_eq!(status, MasteryStatus::Validated);
/// assert!(status.precedence() > MasteryStatus::Recited.precedence());
/// assert_eq!(MasteryStatus::Half.precedence(), MasteryStatus::NinetyPercent.precedence());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MasteryStatus {
    /// `AM`: still to memorize.
    #[serde(rename = "AM")]
    ToMemorize,
    /// `50%`: half memorized.
    #[serde(rename = "50%")]
    Half,
    /// `51%`: just over half memorized.
    #[serde(rename = "51%")]
    OverHalf,
    /// `90%`: nearly complete.
    #[serde(rename = "90%")]
    NinetyPercent,
    /// `S`: recited to a peer, pending validation by a referent.
    #[serde(rename = "S")]
    Recited,
    /// `V`: validated by a group referent.
    #[serde(rename = "V")]
    Validated,
    /// `X`: presumed known before tracking began.
    #[serde(rename = "X")]
    Known,
}

impl MasteryStatus {
    /// Every status, in ascending precedence.
    pub const ALL: [MasteryStatus; 7] = [
        MasteryStatus::ToMemorize,
        MasteryStatus::Half,
        MasteryStatus::OverHalf,
        MasteryStatus::NinetyPercent,
        MasteryStatus::Recited,
        MasteryStatus::Validated,
        MasteryStatus::Known,
    ];

    /// The historical short code.
    pub fn code(self) -> &'static str {
        match self {
            MasteryStatus::ToMemorize => "AM",
            MasteryStatus::Half => "50%",
            MasteryStatus::OverHalf => "51%",
            MasteryStatus::NinetyPercent => "90%",
            MasteryStatus::Recited => "S",
            MasteryStatus::Validated => "V",
            MasteryStatus::Known => "X",
        }
    }

    /// Position in the precedence table.
    pub fn precedence(self) -> u8 {
        match self {
            MasteryStatus::ToMemorize => 0,
            MasteryStatus::Half | MasteryStatus::OverHalf | MasteryStatus::NinetyPercent => 1,
            MasteryStatus::Recited => 2,
            MasteryStatus::Validated => 3,
            MasteryStatus::Known => 4,
        }
    }

    /// Completion fraction (in percent) carried by partial statuses.
    pub fn partial_fraction(self) -> Option<u8> {
        match self {
            MasteryStatus::Half => Some(50),
            MasteryStatus::OverHalf => Some(51),
            MasteryStatus::NinetyPercent => Some(90),
            _ => None,
        }
    }

    /// Returns true for `50%`, `51%` and `90%`.
    pub fn is_partial(self) -> bool {
        self.partial_fraction().is_some()
    }

    /// Returns true for the settled statuses `V` and `X`.
    pub fn is_settled(self) -> bool {
        matches!(self, MasteryStatus::Validated | MasteryStatus::Known)
    }

    /// Returns true when a record in this status is mirrored into coverage.
    pub fn mirrors_coverage(self) -> bool {
        self.is_settled() || self.is_partial()
    }
}

impl FromStr for MasteryStatus {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        MasteryStatus::ALL
            .into_iter()
            .find(|status| status.code().eq_ignore_ascii_case(code))
            .ok_or_else(|| EngineError::InvalidStatusCode {
                code: s.to_string(),
            })
    }
}

impl std::fmt::Display for MasteryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// The write path a status transition arrives through.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionSource {
    /// A recitation recorded during a session.
    #[default]
    Session,
    /// Bulk import of historical data.
    LegacyImport,
}

/// Which transitions are refused when they would downgrade a settled record.
///
/// Whether the legacy importer's caution is product behaviour is an open
/// policy question, so it is configurable rather than hard-coded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DowngradePolicy {
    /// Only legacy imports may not downgrade `V`/`X` to `AM` or a partial.
    #[default]
    LegacyImportOnly,
    /// No write path may downgrade `V`/`X` to `AM` or a partial.
    Always,
    /// Pure last-write-wins on every path.
    Never,
}

impl DowngradePolicy {
    /// Returns true if writes from `source` are subject to the non-downgrade rule.
    pub fn guards(self, source: TransitionSource) -> bool {
        match self {
            DowngradePolicy::LegacyImportOnly => source == TransitionSource::LegacyImport,
            DowngradePolicy::Always => true,
            DowngradePolicy::Never => false,
        }
    }
}

/// The stored mastery status of one (owner, surah) pair.
///
/// # Example
///
/// ```
/// use hifz_engine::models::{MasteryRecord, MasteryStatus};
/// use chrono::{TimeZone, Utc};
///
/// let record = MasteryRecord {
///     owner_id: "student_1".to_string(),
///     surah_number: 67,
///     status: MasteryStatus::Validated,
///     validated_week: None,
///     verse_start: None,
///     verse_end: None,
///     updated_at: Utc.with_ymd_and_hms(2026, 2, 1, 10, 0, 0).unwrap(),
/// };
/// assert!(record.status.mirrors_coverage());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MasteryRecord {
    /// The student.
    pub owner_id: String,
    /// The surah.
    pub surah_number: u8,
    /// Current status.
    pub status: MasteryStatus,
    /// Week in which a referent validated the surah, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validated_week: Option<WeekId>,
    /// Explicit first verse, if the status came with a range.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verse_start: Option<u16>,
    /// Explicit last verse, if the status came with a range.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verse_end: Option<u16>,
    /// Time of the last write.
    pub updated_at: DateTime<Utc>,
}
