//! Surah reference data and named surah collections.
//!
//! Both types are static reference data loaded from configuration and are
//! never mutated by the engine.

use serde::{Deserialize, Serialize};

/// One chapter of the corpus with its fixed verse count.
///
/// # Example
///
/// ```
/// use hifz_engine::models::Surah;
///
/// let fatiha = Surah::new(1, "Al-Fatiha", 7);
/// assert!(fatiha.contains_range(1, 7));
/// assert!(!fatiha.contains_range(0, 3));
/// assert!(!fatiha.contains_range(5, 8));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Surah {
    /// The surah number (1-114).
    pub number: u8,
    /// Transliterated name.
    pub name: String,
    /// Number of verses in the surah.
    pub total_verses: u16,
}

impl Surah {
    /// Creates a new surah entry.
    pub fn new(number: u8, name: impl Into<String>, total_verses: u16) -> Self {
        Self {
            number,
            name: name.into(),
            total_verses,
        }
    }

    /// Returns true if `[start, end]` is a non-empty range inside `[1, total_verses]`.
    pub fn contains_range(&self, start: u16, end: u16) -> bool {
        start >= 1 && start <= end && end <= self.total_verses
    }
}

/// A named, contiguous run of surahs (e.g. "Juz Amma" = surahs 78-114).
///
/// # Example
///
/// ```
/// use hifz_engine::models::Collection;
///
/// let juz_amma = Collection {
///     code: "juz_amma".to_string(),
///     name: "Juz Amma".to_string(),
///     first_surah: 78,
///     last_surah: 114,
/// };
/// assert!(juz_amma.contains(78));
/// assert!(juz_amma.contains(114));
/// assert!(!juz_amma.contains(77));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    /// Stable identifier, e.g. `juz_amma`.
    pub code: String,
    /// Display name.
    pub name: String,
    /// First surah of the collection (inclusive).
    pub first_surah: u8,
    /// Last surah of the collection (inclusive).
    pub last_surah: u8,
}

impl Collection {
    /// Checks whether a surah number belongs to this collection.
    pub fn contains(&self, surah_number: u8) -> bool {
        surah_number >= self.first_surah && surah_number <= self.last_surah
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_range_accepts_full_surah() {
        let surah = Surah::new(112, "Al-Ikhlas", 4);
        assert!(surah.contains_range(1, 4));
    }

    #[test]
    fn test_contains_range_rejects_reversed_range() {
        let surah = Surah::new(112, "Al-Ikhlas", 4);
        assert!(!surah.contains_range(3, 2));
    }

    #[test]
    fn test_contains_range_rejects_verse_zero() {
        let surah = Surah::new(112, "Al-Ikhlas", 4);
        assert!(!surah.contains_range(0, 0));
    }

    #[test]
    fn test_deserialize_surah() {
        let json = r#"{"number": 2, "name": "Al-Baqara", "total_verses": 286}"#;
        let surah: Surah = serde_json::from_str(json).unwrap();
        assert_eq!(surah, Surah::new(2, "Al-Baqara", 286));
    }

    #[test]
    fn test_collection_bounds_are_inclusive() {
        let tabarak = Collection {
            code: "tabarak".to_string(),
            name: "Juz Tabarak".to_string(),
            first_surah: 67,
            last_surah: 77,
        };
        assert!(tabarak.contains(67));
        assert!(tabarak.contains(77));
        assert!(!tabarak.contains(66));
        assert!(!tabarak.contains(78));
    }
}
