//! Coverage result models.
//!
//! This module contains the [`CoverageReport`] type and the per-surah,
//! per-corpus and per-collection figures it is assembled from.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::Program;

/// Coverage of one verse set against a verse total.
///
/// `is_complete` is computed from the raw count, never from the rounded
/// percentage, so 99.6% displays as 100 while remaining incomplete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramCoverage {
    /// Distinct verses covered.
    pub covered_verse_count: u32,
    /// Rounded percentage (0-100).
    pub percentage: u8,
    /// True when every verse is covered.
    pub is_complete: bool,
}

/// Coverage of one surah.
///
/// The top-level figures are the union across the requested programs; each
/// program's own verse set is reported in `per_program`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurahCoverage {
    /// The surah number.
    pub surah_number: u8,
    /// Number of verses in the surah.
    pub total_verses: u16,
    /// Distinct verses covered by any requested program.
    pub covered_verse_count: u32,
    /// Rounded percentage for the union.
    pub percentage: u8,
    /// True when the union covers every verse.
    pub is_complete: bool,
    /// Coverage per requested program.
    pub per_program: BTreeMap<Program, ProgramCoverage>,
}

/// Corpus-wide coverage for one program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusCoverage {
    /// The program.
    pub program: Program,
    /// Sum of covered verses over every surah.
    pub covered_units: u32,
    /// Total verses of the corpus (6236 for the full table).
    pub total_units: u32,
    /// Rounded percentage.
    pub percentage: u8,
    /// Number of surahs fully covered by this program.
    pub completed_surahs: u32,
}

/// Coverage of a named collection of surahs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionCoverage {
    /// Collection code.
    pub code: String,
    /// Collection display name.
    pub name: String,
    /// Total verses in the collection.
    pub total_units: u32,
    /// Coverage per requested program.
    pub per_program: BTreeMap<Program, ProgramCoverage>,
}

/// The complete coverage output for one owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageReport {
    /// The owner the report describes.
    pub owner_id: String,
    /// The programs that were aggregated.
    pub programs: Vec<Program>,
    /// One entry per surah of the reference table, ordered by number.
    pub surahs: Vec<SurahCoverage>,
    /// Corpus-wide totals, one per program.
    pub corpus: Vec<CorpusCoverage>,
    /// Totals for each configured collection.
    pub collections: Vec<CollectionCoverage>,
}
