use crate::core::error::Result;
use crate::data::granularity::GranularityIndex;
use crate::data::verses::VerseStore;
use std::path::Path;
use tracing::info;

/// Verse store plus the partitions derived from it.
///
/// Built once at startup and shared read-only (usually behind an `Arc`) by
/// every navigator and search engine.
#[derive(Debug, Clone)]
pub struct Quran {
    pub verses: VerseStore,
    pub index: GranularityIndex,
}

impl Quran {
    /// Load the dataset at `path` and build the granularity index
    pub fn load(path: &Path) -> Result<Self> {
        Self::from_store(VerseStore::load(path)?)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Self::from_store(VerseStore::from_json_str(json)?)
    }

    pub fn from_store(verses: VerseStore) -> Result<Self> {
        let index = GranularityIndex::build(&verses)?;
        info!("Granularity index ready");
        Ok(Self { verses, index })
    }
}
