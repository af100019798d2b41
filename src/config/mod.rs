//! Configuration loading for the Hifz Engine.
//!
//! This module loads the reference data the engine computes against: the
//! surah table, corpus metadata (including the mastery downgrade policy)
//! and named surah collections.
//!
//! # Example
//!
//! ```no_run
//! use hifz_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/quran").unwrap();
//! println!("Loaded corpus: {}", config.corpus().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    CollectionEntry, CollectionsConfig, CorpusMetadata, MasterySettings, ReferenceData,
    SurahsConfig,
};
