#![allow(dead_code)]

#[path = "../../src/data/fixture.rs"]
pub mod fixture;

use albayan::Quran;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// The full fixture dataset, loaded and indexed
pub fn quran() -> Arc<Quran> {
    Arc::new(Quran::from_json_str(&fixture::dataset_json()).expect("fixture dataset is valid"))
}

/// Write the fixture dataset to `dir/quran.json`
pub fn write_dataset(dir: &Path) -> std::io::Result<PathBuf> {
    let path = dir.join("quran.json");
    std::fs::write(&path, fixture::dataset_json())?;
    Ok(path)
}
