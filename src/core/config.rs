use super::error::{Error, Result};
use std::path::PathBuf;

/// File name of the verse dataset inside the base directory
pub const DATASET_FILE: &str = "quran.json";

/// Configuration for albayan
#[derive(Debug, Clone)]
pub struct Config {
    /// Base directory for albayan data
    pub base_dir: PathBuf,
    /// Path to the verse dataset
    pub dataset_path: PathBuf,
}

impl Config {
    /// Get the default configuration directory
    pub fn default_base_dir() -> Result<PathBuf> {
        dirs::home_dir()
            .ok_or_else(|| Error::Config("Could not determine home directory".to_string()))
            .map(|home| home.join(".albayan"))
    }

    /// Create a new configuration
    pub fn new(base_dir: Option<PathBuf>) -> Result<Self> {
        let base_dir = match base_dir {
            Some(dir) => dir,
            None => Self::default_base_dir().unwrap_or_else(|_| PathBuf::from(".albayan")),
        };

        Ok(Self {
            dataset_path: base_dir.join(DATASET_FILE),
            base_dir,
        })
    }

    /// Point the configuration at a dataset outside the base directory
    pub fn with_dataset(mut self, dataset_path: PathBuf) -> Self {
        self.dataset_path = dataset_path;
        self
    }

    /// Create the base directory
    pub fn init(&self) -> Result<()> {
        std::fs::create_dir_all(&self.base_dir)?;
        Ok(())
    }

    /// Check if a dataset is available
    pub fn is_initialized(&self) -> bool {
        self.dataset_path.is_file()
    }
}
