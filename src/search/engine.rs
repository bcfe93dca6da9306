use crate::core::error::{Error, Result};
use crate::data::granularity::Granularity;
use crate::data::quran::Quran;
use crate::search::normalize::{is_word_char, normalize};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Options for one search call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    pub ignore_diacritics: bool,
    pub ignore_hamza_variants: bool,
    pub whole_word: bool,
    /// Partition the range is expressed in
    pub granularity: Granularity,
    /// First unit to search, inclusive
    pub range_from: u32,
    /// Last unit to search, inclusive
    pub range_to: u32,
}

impl SearchConfig {
    /// Search every unit of `granularity` with default matching flags
    pub fn whole_text(granularity: Granularity) -> Self {
        Self {
            granularity,
            range_from: 1,
            range_to: granularity.expected_units(),
            ..Self::default()
        }
    }

    pub fn with_range(mut self, granularity: Granularity, range_from: u32, range_to: u32) -> Self {
        self.granularity = granularity;
        self.range_from = range_from;
        self.range_to = range_to;
        self
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            ignore_diacritics: true,
            ignore_hamza_variants: false,
            whole_word: false,
            granularity: Granularity::Page,
            range_from: 1,
            range_to: Granularity::Page.expected_units(),
        }
    }
}

/// One matching ayah
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchMatch {
    pub absolute_verse_number: u32,
    pub surah_name: String,
    pub number_in_surah: u32,
    /// Unnormalized text, diacritics included
    pub text: String,
}

/// Linear-scan search over the shared verse data.
///
/// `search` only reads the dataset, so one engine can serve several
/// threads at once.
#[derive(Debug, Clone)]
pub struct SearchEngine {
    quran: Arc<Quran>,
}

impl SearchEngine {
    pub fn new(quran: Arc<Quran>) -> Self {
        Self { quran }
    }

    /// Every ayah inside the configured range whose normalized text
    /// contains the normalized query, in ayah order
    pub fn search(&self, query: &str, config: &SearchConfig) -> Result<Vec<SearchMatch>> {
        let (lo, hi) = self.resolve_range(config)?;

        let query = normalize(
            query.trim(),
            config.ignore_diacritics,
            config.ignore_hamza_variants,
        );
        if query.trim().is_empty() {
            return Err(Error::EmptyQuery);
        }

        let verses = self.quran.verses.range(lo, hi)?;
        let matches: Vec<SearchMatch> = verses
            .par_iter()
            .filter(|verse| {
                let text = normalize(
                    &verse.text,
                    config.ignore_diacritics,
                    config.ignore_hamza_variants,
                );
                if config.whole_word {
                    contains_whole_word(&text, &query)
                } else {
                    text.contains(query.as_str())
                }
            })
            .map(|verse| SearchMatch {
                absolute_verse_number: verse.absolute_number,
                surah_name: verse.surah_name.clone(),
                number_in_surah: verse.number_in_surah,
                text: verse.text.clone(),
            })
            .collect();

        debug!(
            granularity = %config.granularity,
            lo,
            hi,
            matches = matches.len(),
            "Search finished"
        );
        Ok(matches)
    }

    /// Absolute ayah interval covered by the configured units
    fn resolve_range(&self, config: &SearchConfig) -> Result<(u32, u32)> {
        let index = &self.quran.index;
        let max = index.unit_count(config.granularity);
        let invalid = || Error::InvalidRange {
            from: config.range_from,
            to: config.range_to,
            max,
        };

        if config.range_from > config.range_to {
            return Err(invalid());
        }
        let (lo, _) = index
            .range_of_unit(config.granularity, config.range_from)
            .map_err(|_| invalid())?;
        let (_, hi) = index
            .range_of_unit(config.granularity, config.range_to)
            .map_err(|_| invalid())?;
        Ok((lo, hi))
    }
}

/// True if `needle` occurs in `haystack` with a non-word char (or the
/// text edge) on both sides
///
/// Occurrences may overlap: a rejected occurrence does not hide one that
/// starts inside it.
pub fn contains_whole_word(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return false;
    }

    let mut from = 0;
    while let Some(pos) = haystack[from..].find(needle) {
        let idx = from + pos;
        let before = haystack[..idx].chars().next_back();
        let after = haystack[idx + needle.len()..].chars().next();
        if !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char) {
            return true;
        }
        // Resume one char later
        from = idx + haystack[idx..].chars().next().map_or(1, char::len_utf8);
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixture;

    fn engine() -> SearchEngine {
        SearchEngine::new(Arc::new(
            Quran::from_json_str(&fixture::dataset_json()).unwrap(),
        ))
    }

    fn fatiha_config() -> SearchConfig {
        SearchConfig {
            ignore_diacritics: true,
            ignore_hamza_variants: false,
            whole_word: false,
            granularity: Granularity::Surah,
            range_from: 1,
            range_to: 1,
        }
    }

    #[test]
    fn test_allah_in_fatiha() {
        let results = engine().search("الله", &fatiha_config()).unwrap();
        assert!(!results.is_empty());
        for result in &results {
            assert!((1..=7).contains(&result.absolute_verse_number));
            assert_eq!(result.surah_name, "الفاتحة");
        }
        assert_eq!(results[0].absolute_verse_number, 1);
        assert_eq!(results[0].text, fixture::FATIHA[0]);
    }

    #[test]
    fn test_diacritics_must_match_when_not_ignored() {
        let mut config = fatiha_config();
        config.ignore_diacritics = false;
        assert!(engine().search("الرحمن", &config).unwrap().is_empty());
        assert_eq!(engine().search("ٱلرَّحْمَٰنِ", &config).unwrap().len(), 2);
    }

    #[test]
    fn test_whole_word_rejects_substring() {
        let mut config = fatiha_config();
        assert_eq!(engine().search("رحم", &config).unwrap().len(), 2);

        config.whole_word = true;
        assert!(engine().search("رحم", &config).unwrap().is_empty());
        assert_eq!(engine().search("الرحمن", &config).unwrap().len(), 2);
    }

    #[test]
    fn test_hamza_flag() {
        let mut config = fatiha_config();
        assert!(engine().search("اياك", &config).unwrap().is_empty());

        config.ignore_hamza_variants = true;
        let results = engine().search("اياك", &config).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].absolute_verse_number, 5);
    }

    #[test]
    fn test_empty_query() {
        let engine = engine();
        assert!(matches!(engine.search("", &fatiha_config()), Err(Error::EmptyQuery)));
        assert!(matches!(engine.search("   ", &fatiha_config()), Err(Error::EmptyQuery)));
        // Only marks: nothing left once they are stripped.
        assert!(matches!(
            engine.search("\u{064E}\u{0651}", &fatiha_config()),
            Err(Error::EmptyQuery)
        ));
    }

    #[test]
    fn test_invalid_ranges() {
        let engine = engine();
        let reversed = fatiha_config().with_range(Granularity::Surah, 5, 2);
        assert!(matches!(
            engine.search("الله", &reversed),
            Err(Error::InvalidRange { from: 5, to: 2, .. })
        ));
        let past_end = fatiha_config().with_range(Granularity::Juz, 1, 31);
        assert!(matches!(engine.search("الله", &past_end), Err(Error::InvalidRange { .. })));
        let zero = fatiha_config().with_range(Granularity::Page, 0, 3);
        assert!(matches!(engine.search("الله", &zero), Err(Error::InvalidRange { .. })));
    }

    #[test]
    fn test_results_in_verse_order() {
        let config = SearchConfig::whole_text(Granularity::Juz);
        let results = engine().search("تكذبان", &config).unwrap();
        assert!(!results.is_empty());
        assert!(results
            .windows(2)
            .all(|w| w[0].absolute_verse_number < w[1].absolute_verse_number));
    }

    #[test]
    fn test_contains_whole_word() {
        assert!(contains_whole_word("بسم الله", "الله"));
        assert!(contains_whole_word("الله", "الله"));
        assert!(!contains_whole_word("والله", "الله"));
        assert!(contains_whole_word("والله الله", "الله"));
        assert!(contains_whole_word("(الله)", "الله"));
        // A trailing vowel mark belongs to the word.
        assert!(!contains_whole_word("اللهِ", "الله"));
        assert!(!contains_whole_word("الله", ""));
    }

    #[test]
    fn test_whole_word_phrase_overlapping_rejected_match() {
        // The first occurrence starts inside "والله"; the second is bounded.
        assert!(contains_whole_word("والله الله الله", "الله الله"));
        assert!(!contains_whole_word("والله الله اللهم", "الله الله"));
    }

    #[test]
    fn test_whole_word_phrase_with_diacritics_kept() {
        let mut config = fatiha_config();
        config.ignore_diacritics = false;
        config.whole_word = true;
        let results = engine().search("ٱلرَّحْمَٰنِ ٱلرَّحِيمِ", &config).unwrap();
        let ayat: Vec<u32> = results.iter().map(|m| m.absolute_verse_number).collect();
        assert_eq!(ayat, vec![1, 3]);
        // Without its final kasra the last word is cut short.
        assert!(engine().search("ٱلرَّحْمَٰنِ ٱلرَّحِيم", &config).unwrap().is_empty());
    }
}
