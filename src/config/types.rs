//! Configuration types for the reference data.
//!
//! This module contains the strongly-typed structures deserialized from the
//! YAML files of a corpus configuration directory.

use serde::Deserialize;
use std::collections::BTreeMap;

use crate::models::{Collection, DowngradePolicy, Surah};

/// Metadata about the corpus.
#[derive(Debug, Clone, Deserialize)]
pub struct CorpusMetadata {
    /// Short code of the corpus (e.g., "quran").
    pub code: String,
    /// Human-readable name.
    pub name: String,
    /// Recitation or numbering variant the verse counts follow.
    pub version: String,
    /// Total number of verses; 6236 for the Hafs numbering.
    pub total_units: u32,
    /// Mastery settings.
    #[serde(default)]
    pub mastery: MasterySettings,
}

/// Mastery settings from corpus.yaml.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct MasterySettings {
    /// Which write paths may not downgrade a settled record.
    #[serde(default)]
    pub non_downgrade: DowngradePolicy,
}

/// Surah table file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct SurahsConfig {
    /// Every surah, in any order.
    pub surahs: Vec<Surah>,
}

/// One collection as written in collections.yaml.
#[derive(Debug, Clone, Deserialize)]
pub struct CollectionEntry {
    /// Display name.
    pub name: String,
    /// First surah (inclusive).
    pub first_surah: u8,
    /// Last surah (inclusive).
    pub last_surah: u8,
}

/// Collections file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct CollectionsConfig {
    /// Map of collection code to collection bounds.
    pub collections: BTreeMap<String, CollectionEntry>,
}

/// The complete reference data loaded from YAML files.
#[derive(Debug, Clone)]
pub struct ReferenceData {
    metadata: CorpusMetadata,
    /// Sorted by surah number.
    surahs: Vec<Surah>,
    /// Sorted by first surah, then code.
    collections: Vec<Collection>,
}

impl ReferenceData {
    /// Creates reference data from its component parts.
    pub fn new(
        metadata: CorpusMetadata,
        surahs: Vec<Surah>,
        collections: BTreeMap<String, CollectionEntry>,
    ) -> Self {
        let mut surahs = surahs;
        surahs.sort_by_key(|s| s.number);

        let mut collections: Vec<Collection> = collections
            .into_iter()
            .map(|(code, entry)| Collection {
                code,
                name: entry.name,
                first_surah: entry.first_surah,
                last_surah: entry.last_surah,
            })
            .collect();
        collections.sort_by(|a, b| {
            a.first_surah
                .cmp(&b.first_surah)
                .then_with(|| a.code.cmp(&b.code))
        });

        Self {
            metadata,
            surahs,
            collections,
        }
    }

    /// Returns the corpus metadata.
    pub fn corpus(&self) -> &CorpusMetadata {
        &self.metadata
    }

    /// Returns the surah table, ordered by number.
    pub fn surahs(&self) -> &[Surah] {
        &self.surahs
    }

    /// Returns the collections.
    pub fn collections(&self) -> &[Collection] {
        &self.collections
    }
}
