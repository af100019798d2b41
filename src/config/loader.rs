//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the surah
//! table, corpus metadata and collections from YAML files.

use std::fs;
use std::path::Path;

use crate::calculation::find_surah;
use crate::error::{EngineError, EngineResult};
use crate::models::{Collection, DowngradePolicy, Surah};

use super::types::{CollectionsConfig, CorpusMetadata, ReferenceData, SurahsConfig};

/// Loads and provides access to the reference data.
///
/// # Directory Structure
///
/// ```text
/// config/quran/
/// ├── corpus.yaml       # Corpus metadata and mastery policy
/// ├── surahs.yaml       # The 114 surahs and their verse counts
/// └── collections.yaml  # Named surah ranges
/// ```
///
/// # Example
///
/// ```no_run
/// use hifz_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/quran").unwrap();
///
/// let baqara = loader.get_surah(2).unwrap();
/// println!("{} has {} verses", baqara.name, baqara.total_verses);
/// println!("Corpus total: {}", loader.corpus().total_units);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    data: ReferenceData,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/quran")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - The surah table is not numbered 1..n without gaps or duplicates
    /// - A surah has no verses, or the verse counts do not add up to `total_units`
    /// - A collection is empty or names a surah outside the table
    ///
    /// # Example
    ///
    /// ```no_run
    /// use hifz_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/quran")?;
    /// # Ok::<(), hifz_engine::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let corpus_path = path.join("corpus.yaml");
        let metadata = Self::load_yaml::<CorpusMetadata>(&corpus_path)?;

        let surahs_path = path.join("surahs.yaml");
        let surahs = Self::load_yaml::<SurahsConfig>(&surahs_path)?;

        let collections_path = path.join("collections.yaml");
        let collections = Self::load_yaml::<CollectionsConfig>(&collections_path)?;

        let data = ReferenceData::new(metadata, surahs.surahs, collections.collections);
        Self::validate_surahs(&data, &surahs_path)?;
        Self::validate_collections(&data, &collections_path)?;

        Ok(Self { data })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    fn validate_surahs(data: &ReferenceData, path: &Path) -> EngineResult<()> {
        let invalid = |message: String| EngineError::ConfigInvalid {
            path: path.display().to_string(),
            message,
        };

        if data.surahs().is_empty() {
            return Err(invalid("surah table is empty".to_string()));
        }

        for (expected, surah) in (1u32..).zip(data.surahs()) {
            if u32::from(surah.number) != expected {
                return Err(invalid(format!(
                    "expected surah {} but found surah {}",
                    expected, surah.number
                )));
            }
            if surah.total_verses == 0 {
                return Err(invalid(format!("surah {} has no verses", surah.number)));
            }
        }

        let total: u32 = data
            .surahs()
            .iter()
            .map(|s| u32::from(s.total_verses))
            .sum();
        if total != data.corpus().total_units {
            return Err(invalid(format!(
                "verse counts add up to {} but total_units is {}",
                total,
                data.corpus().total_units
            )));
        }

        Ok(())
    }

    fn validate_collections(data: &ReferenceData, path: &Path) -> EngineResult<()> {
        let last = data.surahs().last().map_or(0, |s| s.number);

        for collection in data.collections() {
            if collection.first_surah == 0
                || collection.first_surah > collection.last_surah
                || collection.last_surah > last
            {
                return Err(EngineError::ConfigInvalid {
                    path: path.display().to_string(),
                    message: format!(
                        "collection '{}' spans surahs {}-{} outside 1-{}",
                        collection.code, collection.first_surah, collection.last_surah, last
                    ),
                });
            }
        }

        Ok(())
    }

    /// Returns the underlying reference data.
    pub fn data(&self) -> &ReferenceData {
        &self.data
    }

    /// Returns the corpus metadata.
    pub fn corpus(&self) -> &CorpusMetadata {
        self.data.corpus()
    }

    /// Returns the surah table, ordered by number.
    pub fn surahs(&self) -> &[Surah] {
        self.data.surahs()
    }

    /// Returns the configured collections.
    pub fn collections(&self) -> &[Collection] {
        self.data.collections()
    }

    /// Gets a surah by its number.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use hifz_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/quran")?;
    /// assert_eq!(loader.get_surah(112)?.total_verses, 4);
    /// # Ok::<(), hifz_engine::error::EngineError>(())
    /// ```
    pub fn get_surah(&self, number: u8) -> EngineResult<&Surah> {
        find_surah(self.data.surahs(), number)
    }

    /// Gets a collection by its code.
    pub fn get_collection(&self, code: &str) -> Option<&Collection> {
        self.data.collections().iter().find(|c| c.code == code)
    }

    /// Returns the configured non-downgrade policy.
    pub fn downgrade_policy(&self) -> DowngradePolicy {
        self.data.corpus().mastery.non_downgrade
    }
}
