// Core functionality
pub mod core {
    pub mod config;
    pub mod error;
}

// Verse data and its partitions
pub mod data {
    pub mod granularity;
    pub mod quran;
    pub mod verses;

    #[cfg(test)]
    pub(crate) mod fixture;
}

// Cursor and rendering
pub mod reader {
    pub mod navigator;
    pub mod render;
}

// Normalization & matching
pub mod search {
    pub mod engine;
    pub mod normalize;
}

// User interfaces
pub mod ui {
    pub mod cli;
    pub mod tui;
}

// Re-export commonly used types
pub use core::config::Config;
pub use core::error::{Edge, Error, Result};
pub use data::granularity::{Granularity, GranularityIndex, GranularityUnit};
pub use data::quran::Quran;
pub use data::verses::{Verse, VerseStore, TOTAL_VERSES};
pub use reader::navigator::{AyahInfo, Cursor, LastPosition, Navigator};
pub use reader::render::{AyahSpan, RenderedUnit};
pub use search::engine::{SearchConfig, SearchEngine, SearchMatch};
pub use search::normalize::normalize;
pub use ui::cli::Cli;
pub use ui::tui::ReaderTui;
