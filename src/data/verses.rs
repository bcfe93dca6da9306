use crate::core::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Number of verses in the Quran
pub const TOTAL_VERSES: u32 = 6236;

/// A single verse with its position in every partition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verse {
    /// Absolute number (1..=6236), the primary ordering key
    pub absolute_number: u32,
    pub surah_id: u32,
    pub surah_name: String,
    pub number_in_surah: u32,
    pub page: u32,
    pub quarter: u32,
    pub hizb: u32,
    pub juz: u32,
    /// Text as authored, with diacritics
    pub text: String,
}

#[derive(Deserialize)]
struct Dataset {
    verses: Vec<Verse>,
}

/// Immutable arena of verses indexed by absolute number
#[derive(Debug, Clone)]
pub struct VerseStore {
    verses: Vec<Verse>,
}

impl VerseStore {
    /// Load and validate the dataset at `path`
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let store = Self::from_json_str(&content)?;
        info!(path = %path.display(), verses = store.len(), "Loaded verse dataset");
        Ok(store)
    }

    /// Parse a dataset from its JSON text
    pub fn from_json_str(json: &str) -> Result<Self> {
        let dataset: Dataset = serde_json::from_str(json)
            .map_err(|e| Error::DataCorruption(format!("Failed to parse dataset: {}", e)))?;
        Self::from_verses(dataset.verses)
    }

    /// Build a store from already-parsed verses
    pub fn from_verses(verses: Vec<Verse>) -> Result<Self> {
        if verses.len() != TOTAL_VERSES as usize {
            return Err(Error::DataCorruption(format!(
                "Expected {} verses, found {}",
                TOTAL_VERSES,
                verses.len()
            )));
        }

        for (i, verse) in verses.iter().enumerate() {
            let expected = i as u32 + 1;
            if verse.absolute_number != expected {
                return Err(Error::DataCorruption(format!(
                    "Verse at position {} has absolute number {}",
                    expected, verse.absolute_number
                )));
            }
        }

        Ok(Self { verses })
    }

    /// Get a verse by absolute number
    pub fn get(&self, absolute_number: u32) -> Result<&Verse> {
        if absolute_number == 0 || absolute_number > TOTAL_VERSES {
            return Err(Error::out_of_range("ayah", absolute_number, TOTAL_VERSES));
        }
        Ok(&self.verses[absolute_number as usize - 1])
    }

    /// Verses `first..=last` in absolute order
    pub fn range(&self, first: u32, last: u32) -> Result<&[Verse]> {
        if first == 0 || first > TOTAL_VERSES {
            return Err(Error::out_of_range("ayah", first, TOTAL_VERSES));
        }
        if last < first || last > TOTAL_VERSES {
            return Err(Error::out_of_range("ayah", last, TOTAL_VERSES));
        }
        Ok(&self.verses[first as usize - 1..last as usize])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Verse> {
        self.verses.iter()
    }

    pub fn len(&self) -> usize {
        self.verses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.verses.is_empty()
    }
}
