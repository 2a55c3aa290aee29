//! Error types for the postindex record index.

use std::path::PathBuf;

use thiserror::Error;

/// The main error type for all postindex operations.
///
/// A lookup that finds nothing is not an error: point lookups and
/// most-viewed extraction return `None`, and range queries return an empty
/// vector.
#[derive(Error, Debug)]
pub enum IndexError {
    /// A timestamp string could not be parsed.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// The index configuration is invalid or could not be loaded.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// A bulk load of posts failed.
    #[error("load error: {0}")]
    Load(#[from] LoadError),
}

/// A timestamp did not match the expected format or named an impossible
/// calendar value (e.g. `31/2/2024 10:00`).
#[derive(Error, Debug, Clone, PartialEq)]
#[error("invalid timestamp '{input}' (expected format '{format}'): {kind}")]
pub struct ParseError {
    /// The text that failed to parse.
    pub input: String,
    /// The format string the text was parsed against.
    pub format: String,
    /// What was wrong with the text.
    #[source]
    pub kind: ParseErrorKind,
}

/// The reason a timestamp was rejected.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseErrorKind {
    /// A field was missing, out of range, or did not match the format.
    #[error("{0}")]
    Field(#[from] chrono::ParseError),

    /// The year was not exactly four ASCII digits.
    #[error("year '{year}' must be exactly four digits")]
    YearWidth {
        /// The rejected year text.
        year: String,
    },

    /// No whitespace between the date and the time.
    #[error("date and time must be separated by whitespace")]
    MissingSeparator,
}

/// Errors that can occur when loading or validating an [`IndexConfig`](crate::IndexConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config '{}': {source}", path.display())]
    Read {
        /// The config file path.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid JSON for an `IndexConfig`.
    #[error("failed to parse config '{}': {source}", path.display())]
    Parse {
        /// The config file path.
        path: PathBuf,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// The timestamp format cannot identify a point in time.
    #[error("invalid timestamp format '{format}': {reason}")]
    InvalidFormat {
        /// The rejected format string.
        format: String,
        /// Why it was rejected.
        reason: String,
    },
}

/// Errors that can occur during a bulk load of posts.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The posts file could not be read.
    #[error("failed to read posts from '{}': {source}", path.display())]
    Read {
        /// The posts file path.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The input is not a JSON array of posts.
    #[error("malformed posts JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A single entry had an unparseable timestamp.
    #[error("entry {position}: {source}")]
    Entry {
        /// Zero-based position of the entry in the input array.
        position: usize,
        /// The timestamp parse failure.
        #[source]
        source: ParseError,
    },
}

/// Type alias for `Result<T, IndexError>`.
pub type Result<T> = std::result::Result<T, IndexError>;
