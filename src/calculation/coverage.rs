//! Coverage aggregation.
//!
//! Turns an owner's log entries into per-surah, per-program coverage and
//! corpus/collection totals. Each program keeps its own verse set; the
//! top-level surah figures are the union across the requested programs.
//! Entries are assumed to be validated (see [`validate_log_entries`]).
//!
//! [`validate_log_entries`]: super::validate_log_entries

use std::collections::{BTreeMap, BTreeSet};

use super::verse_set::{VerseSet, coverage_percentage, is_complete, percentage, union_coverage};
use crate::models::{
    Collection, CollectionCoverage, CorpusCoverage, CoverageReport, LogEntry, Program,
    ProgramCoverage, Surah, SurahCoverage,
};

/// Computes coverage of every surah in `surahs` for `owner_id`.
///
/// Entries of other owners or other programs are ignored. One result is
/// returned per surah of the table, in table order; an empty table or an
/// empty program list yields no results.
///
/// # Example
///
/// ```
/// use hifz_engine::calculation::compute_surah_coverage;
/// use hifz_engine::models::{LogEntry, Program, Surah};
/// use chrono::NaiveDate;
///
/// let surahs = vec![Surah::new(1, "Al-Fatiha", 7), Surah::new(112, "Al-Ikhlas", 4)];
/// let day = NaiveDate::from_ymd_opt(2026, 1, 12).unwrap();
/// let entries = vec![
///     LogEntry::new("e1", "u1", Program::Memorization, 1, 1, 7, day),
///     LogEntry::new("e2", "u1", Program::Revision, 112, 1, 2, day),
/// ];
///
/// let coverage = compute_surah_coverage(
///     "u1",
///     &[Program::Memorization, Program::Revision],
///     &surahs,
///     &entries,
/// );
///
/// assert!(coverage[0].is_complete);
/// assert_eq!(coverage[1].covered_verse_count, 2);
/// assert_eq!(coverage[1].percentage, 50);
/// assert_eq!(coverage[1].per_program[&Program::Memorization].covered_verse_count, 0);
/// ```
pub fn compute_surah_coverage(
    owner_id: &str,
    programs: &[Program],
    surahs: &[Surah],
    entries: &[LogEntry],
) -> Vec<SurahCoverage> {
    let programs: BTreeSet<Program> = programs.iter().copied().collect();
    if programs.is_empty() {
        return Vec::new();
    }

    let owned: Vec<&LogEntry> = entries
        .iter()
        .filter(|e| e.owner_id == owner_id && programs.contains(&e.program))
        .collect();

    let per_program: BTreeMap<Program, BTreeMap<u8, VerseSet>> = programs
        .iter()
        .map(|&program| {
            let sets = union_coverage(owned.iter().copied().filter(|e| e.program == program));
            (program, sets)
        })
        .collect();

    let empty = VerseSet::new();
    surahs
        .iter()
        .map(|surah| {
            let mut union = VerseSet::new();
            let breakdown = per_program
                .iter()
                .map(|(&program, sets)| {
                    let set = sets.get(&surah.number).unwrap_or(&empty);
                    union.union_with(set);
                    (program, program_coverage(set, surah.total_verses))
                })
                .collect();

            SurahCoverage {
                surah_number: surah.number,
                total_verses: surah.total_verses,
                covered_verse_count: union.len(),
                percentage: coverage_percentage(&union, surah.total_verses),
                is_complete: is_complete(&union, surah.total_verses),
                per_program: breakdown,
            }
        })
        .collect()
}

fn program_coverage(set: &VerseSet, total_verses: u16) -> ProgramCoverage {
    ProgramCoverage {
        covered_verse_count: set.len(),
        percentage: coverage_percentage(set, total_verses),
        is_complete: is_complete(set, total_verses),
    }
}

/// Sums surah coverage into one corpus-wide figure per program.
///
/// The corpus total is the sum of `total_verses` over the rows, which is
/// 6236 for the full surah table.
pub fn compute_corpus_coverage(
    programs: &[Program],
    coverage: &[SurahCoverage],
) -> Vec<CorpusCoverage> {
    let total_units: u32 = coverage.iter().map(|row| u32::from(row.total_verses)).sum();
    let programs: BTreeSet<Program> = programs.iter().copied().collect();

    programs
        .into_iter()
        .map(|program| {
            let rows = coverage.iter().filter_map(|row| row.per_program.get(&program));
            let (covered_units, completed_surahs) =
                rows.fold((0u32, 0u32), |(covered, completed), c| {
                    (
                        covered + c.covered_verse_count,
                        completed + u32::from(c.is_complete),
                    )
                });

            CorpusCoverage {
                program,
                covered_units,
                total_units,
                percentage: percentage(covered_units, total_units),
                completed_surahs,
            }
        })
        .collect()
}

/// Sums surah coverage over the surahs of a collection.
pub fn compute_collection_coverage(
    collection: &Collection,
    programs: &[Program],
    coverage: &[SurahCoverage],
) -> CollectionCoverage {
    let rows: Vec<&SurahCoverage> = coverage
        .iter()
        .filter(|row| collection.contains(row.surah_number))
        .collect();
    let total_units: u32 = rows.iter().map(|row| u32::from(row.total_verses)).sum();

    let per_program = programs
        .iter()
        .map(|&program| {
            let covered: u32 = rows
                .iter()
                .filter_map(|row| row.per_program.get(&program))
                .map(|c| c.covered_verse_count)
                .sum();
            let figures = ProgramCoverage {
                covered_verse_count: covered,
                percentage: percentage(covered, total_units),
                is_complete: total_units > 0 && covered >= total_units,
            };
            (program, figures)
        })
        .collect();

    CollectionCoverage {
        code: collection.code.clone(),
        name: collection.name.clone(),
        total_units,
        per_program,
    }
}

/// Computes the full coverage report: surahs, corpus and collections.
pub fn compute_coverage_report(
    owner_id: &str,
    programs: &[Program],
    surahs: &[Surah],
    collections: &[Collection],
    entries: &[LogEntry],
) -> CoverageReport {
    let programs: Vec<Program> = programs
        .iter()
        .copied()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let surah_rows = compute_surah_coverage(owner_id, &programs, surahs, entries);
    let corpus = compute_corpus_coverage(&programs, &surah_rows);
    let collections = collections
        .iter()
        .map(|collection| compute_collection_coverage(collection, &programs, &surah_rows))
        .collect();

    CoverageReport {
        owner_id: owner_id.to_string(),
        programs,
        surahs: surah_rows,
        corpus,
        collections,
    }
}
