use std::fmt;
use thiserror::Error;

/// Which end of a granularity the cursor ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    First,
    Last,
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Edge::First => f.write_str("first"),
            Edge::Last => f.write_str("last"),
        }
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    /// The bundled dataset is inconsistent; startup cannot continue.
    #[error("Corrupt verse dataset: {0}")]
    DataCorruption(String),

    #[error("{what} {value} is out of range (valid: 1..={max})")]
    OutOfRange {
        what: &'static str,
        value: u64,
        max: u64,
    },

    #[error("Already at the {0} unit")]
    Boundary(Edge),

    #[error("Ayah {0} is not part of the current unit")]
    NotInCurrentUnit(u32),

    #[error("No ayah at text offset {0}")]
    NoAyahAtOffset(usize),

    #[error("Invalid search range {from}..={to} (valid: 1..={max})")]
    InvalidRange { from: u32, to: u32, max: u32 },

    #[error("Search query is empty")]
    EmptyQuery,
}

impl Error {
    /// Only a corrupt dataset should abort the application; everything
    /// else is handled by the caller (disable a control, show a message).
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::DataCorruption(_))
    }

    pub(crate) fn out_of_range(what: &'static str, value: impl Into<u64>, max: impl Into<u64>) -> Self {
        Error::OutOfRange {
            what,
            value: value.into(),
            max: max.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_data_corruption_is_fatal() {
        assert!(Error::DataCorruption("bad".to_string()).is_fatal());
        assert!(!Error::Boundary(Edge::Last).is_fatal());
        assert!(!Error::EmptyQuery.is_fatal());
        assert!(!Error::NoAyahAtOffset(3).is_fatal());
    }

    #[test]
    fn test_messages() {
        let err = Error::out_of_range("page", 605u32, 604u32);
        assert_eq!(err.to_string(), "page 605 is out of range (valid: 1..=604)");
        assert_eq!(Error::Boundary(Edge::First).to_string(), "Already at the first unit");
    }
}
