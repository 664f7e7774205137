//! Error types for corpus loading and configuration.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced to the caller.
///
/// Classification itself never fails: an empty corpus or an empty query is a
/// regular input and yields an `Undetermined` result or zero similarity.
#[derive(Debug, Error)]
pub enum Error {
    /// The corpus base directory does not exist.
    #[error("corpus directory does not exist: {path}")]
    CorpusNotFound {
        /// Path that was not found.
        path: PathBuf,
    },

    /// The corpus base path exists but is not a directory.
    #[error("corpus path is not a directory: {path}")]
    CorpusNotDirectory {
        /// Path that is not a directory.
        path: PathBuf,
    },

    /// Walking the corpus directory failed.
    #[error("failed to read corpus directory {path}: {source}")]
    WalkCorpus {
        /// Directory being walked.
        path: PathBuf,
        /// Underlying walk error.
        source: walkdir::Error,
    },

    /// Failed to read a configuration file.
    #[error("failed to read config file {path}: {source}")]
    ReadConfig {
        /// Config file path.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Failed to parse a TOML configuration file.
    #[error("failed to parse config file {path}: {source}")]
    ParseConfig {
        /// Config file path.
        path: PathBuf,
        /// Underlying TOML error.
        source: toml::de::Error,
    },

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Failed to read queries from a file or stdin.
    #[error("failed to read queries from {origin}: {source}")]
    ReadQueries {
        /// Where the queries were read from.
        origin: String,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Failed to serialize the JSON report.
    #[error("failed to serialize report: {0}")]
    SerializeReport(#[source] serde_json::Error),

    /// Failed to write the report.
    #[error("failed to write report: {0}")]
    WriteReport(#[source] io::Error),
}

/// Result alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
