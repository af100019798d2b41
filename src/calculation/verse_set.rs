//! Verse-range set algebra.
//!
//! A surah's coverage is the set of distinct verse numbers touched by at
//! least one log entry. Overlapping ranges collapse naturally, so unioning
//! the same entry twice is a no-op.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::models::LogEntry;

/// The distinct verses of one surah that have been covered.
///
/// # Example
///
/// ```
/// use hifz_engine::calculation::VerseSet;
///
/// let mut set = VerseSet::new();
/// set.insert_range(1, 5);
/// set.insert_range(3, 8);
/// assert_eq!(set.len(), 8);
/// assert!(set.contains(8));
/// assert!(!set.contains(9));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerseSet {
    verses: BTreeSet<u16>,
}

impl VerseSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds every verse of the inclusive range `[start, end]`.
    pub fn insert_range(&mut self, start: u16, end: u16) {
        self.verses.extend(start..=end);
    }

    /// Adds every verse of `other`.
    pub fn union_with(&mut self, other: &VerseSet) {
        self.verses.extend(other.verses.iter().copied());
    }

    /// Number of distinct verses.
    pub fn len(&self) -> u32 {
        self.verses.len() as u32
    }

    /// Returns true if no verse is covered.
    pub fn is_empty(&self) -> bool {
        self.verses.is_empty()
    }

    /// Returns true if `verse` is covered.
    pub fn contains(&self, verse: u16) -> bool {
        self.verses.contains(&verse)
    }

    /// Collapses the set back into sorted, maximal inclusive ranges.
    ///
    /// ```
    /// use hifz_engine::calculation::VerseSet;
    ///
    /// let mut set = VerseSet::new();
    /// set.insert_range(1, 3);
    /// set.insert_range(4, 4);
    /// set.insert_range(10, 12);
    /// assert_eq!(set.ranges(), vec![(1, 4), (10, 12)]);
    /// ```
    pub fn ranges(&self) -> Vec<(u16, u16)> {
        let mut ranges: Vec<(u16, u16)> = Vec::new();
        for &verse in &self.verses {
            match ranges.last_mut() {
                Some((_, end)) if *end + 1 == verse => *end = verse,
                _ => ranges.push((verse, verse)),
            }
        }
        ranges
    }
}

/// Unions the verse ranges of `entries` into one verse set per surah.
///
/// Entries are assumed to be validated; filtering by owner or program is the
/// caller's concern.
///
/// # Example
///
/// ```
/// use hifz_engine::calculation::union_coverage;
/// use hifz_engine::models::{LogEntry, Program};
/// use chrono::NaiveDate;
///
/// let day = NaiveDate::from_ymd_opt(2026, 1, 12).unwrap();
/// let entries = vec![
///     LogEntry::new("e1", "u1", Program::Memorization, 1, 1, 4, day),
///     LogEntry::new("e2", "u1", Program::Memorization, 1, 3, 7, day),
///     LogEntry::new("e3", "u1", Program::Memorization, 114, 1, 2, day),
/// ];
///
/// let coverage = union_coverage(&entries);
/// assert_eq!(coverage[&1].len(), 7);
/// assert_eq!(coverage[&114].len(), 2);
/// ```
pub fn union_coverage<'a, I>(entries: I) -> BTreeMap<u8, VerseSet>
where
    I: IntoIterator<Item = &'a LogEntry>,
{
    let mut coverage: BTreeMap<u8, VerseSet> = BTreeMap::new();
    for entry in entries {
        coverage
            .entry(entry.surah_number)
            .or_default()
            .insert_range(entry.verse_start, entry.verse_end);
    }
    coverage
}

/// Rounds `100 * numerator / denominator` half away from zero.
///
/// Every percentage in the engine goes through this function. A zero
/// denominator yields 0.
///
/// # Example
///
/// ```
/// use hifz_engine::calculation::percentage;
///
/// assert_eq!(percentage(3, 7), 43);   // 42.857...
/// assert_eq!(percentage(1, 8), 13);   // 12.5 rounds away from zero
/// assert_eq!(percentage(0, 0), 0);
/// ```
pub fn percentage(numerator: u32, denominator: u32) -> u8 {
    if denominator == 0 {
        return 0;
    }
    let ratio = Decimal::from(numerator) * Decimal::ONE_HUNDRED / Decimal::from(denominator);
    ratio
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u8()
        .unwrap_or(u8::MAX)
}

/// Percentage of a surah covered by `set`.
///
/// # Example
///
/// ```
/// use hifz_engine::calculation::{coverage_percentage, is_complete, VerseSet};
///
/// let mut set = VerseSet::new();
/// set.insert_range(1, 285);
/// // 285 of 286 verses displays as 100 but is not complete
/// assert_eq!(coverage_percentage(&set, 286), 100);
/// assert!(!is_complete(&set, 286));
/// ```
pub fn coverage_percentage(set: &VerseSet, total_verses: u16) -> u8 {
    percentage(set.len(), u32::from(total_verses))
}

/// Returns true if `set` covers at least `total_verses` verses.
pub fn is_complete(set: &VerseSet, total_verses: u16) -> bool {
    set.len() >= u32::from(total_verses)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Program;
    use chrono::NaiveDate;

    fn entry(surah: u8, start: u16, end: u16) -> LogEntry {
        LogEntry::new(
            format!("e_{}_{}_{}", surah, start, end),
            "u1",
            Program::Memorization,
            surah,
            start,
            end,
            NaiveDate::from_ymd_opt(2026, 1, 12).unwrap(),
        )
    }

    // ==========================================================================
    // VS-001: Overlapping ranges collapse
    // ==========================================================================
    #[test]
    fn test_vs_001_overlapping_ranges_collapse() {
        let entries = vec![entry(2, 1, 10), entry(2, 5, 15), entry(2, 15, 20)];
        let coverage = union_coverage(&entries);
        assert_eq!(coverage[&2].len(), 20);
        assert_eq!(coverage[&2].ranges(), vec![(1, 20)]);
    }

    // ==========================================================================
    // VS-002: Disjoint ranges keep their gap
    // ==========================================================================
    #[test]
    fn test_vs_002_disjoint_ranges() {
        let entries = vec![entry(18, 1, 10), entry(18, 101, 110)];
        let coverage = union_coverage(&entries);
        assert_eq!(coverage[&18].len(), 20);
        assert_eq!(coverage[&18].ranges(), vec![(1, 10), (101, 110)]);
    }

    // ==========================================================================
    // VS-003: No entries means no surahs
    // ==========================================================================
    #[test]
    fn test_vs_003_empty_input() {
        let coverage = union_coverage(&Vec::<LogEntry>::new());
        assert!(coverage.is_empty());
    }

    // ==========================================================================
    // VS-004: Rounding is half away from zero
    // ==========================================================================
    #[test]
    fn test_vs_004_rounding_half_away_from_zero() {
        // 1/8 = 12.5%, 3/8 = 37.5%
        assert_eq!(percentage(1, 8), 13);
        assert_eq!(percentage(3, 8), 38);
        // 1/3 = 33.33%, 2/3 = 66.67%
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(2, 3), 67);
    }

    #[test]
    fn test_full_coverage_is_one_hundred() {
        assert_eq!(percentage(6236, 6236), 100);
    }

    #[test]
    fn test_completeness_is_not_derived_from_rounding() {
        let mut set = VerseSet::new();
        set.insert_range(1, 6);
        assert_eq!(coverage_percentage(&set, 7), 86);
        assert!(!is_complete(&set, 7));
        set.insert_range(7, 7);
        assert!(is_complete(&set, 7));
    }

    #[test]
    fn test_union_with_merges_sets() {
        let mut a = VerseSet::new();
        a.insert_range(1, 3);
        let mut b = VerseSet::new();
        b.insert_range(3, 5);
        a.union_with(&b);
        assert_eq!(a.len(), 5);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn ranges() -> impl Strategy<Value = Vec<(u16, u16)>> {
            prop::collection::vec((1u16..=286, 0u16..40), 0..20).prop_map(|pairs| {
                pairs
                    .into_iter()
                    .map(|(start, len)| (start, (start + len).min(286)))
                    .collect()
            })
        }

        proptest! {
            #[test]
            fn union_is_idempotent(pairs in ranges()) {
                let entries: Vec<LogEntry> =
                    pairs.iter().map(|&(s, e)| entry(2, s, e)).collect();
                let doubled: Vec<LogEntry> =
                    entries.iter().chain(entries.iter()).cloned().collect();
                prop_assert_eq!(union_coverage(&entries), union_coverage(&doubled));
            }

            #[test]
            fn percentage_is_monotonic(pairs in ranges()) {
                let mut set = VerseSet::new();
                let mut previous = 0u8;
                for (start, end) in pairs {
                    set.insert_range(start, end);
                    let current = coverage_percentage(&set, 286);
                    prop_assert!(current >= previous);
                    prop_assert!(current <= 100);
                    previous = current;
                }
            }

            #[test]
            fn complete_iff_every_verse_covered(pairs in ranges()) {
                let mut set = VerseSet::new();
                for (start, end) in pairs {
                    set.insert_range(start, end);
                }
                prop_assert_eq!(is_complete(&set, 286), set.len() == 286);
            }
        }
    }
}
