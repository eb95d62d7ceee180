//! Error types for the ingestion crate.
//!
//! Two tiers: [`IngestionError`] aborts the run, [`RowError`] only skips the
//! offending row.

use std::path::PathBuf;

use thiserror::Error;

/// Fatal errors. Any of these terminates the pipeline without output.
#[derive(Error, Debug)]
pub enum IngestionError {
    #[error("Source file not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    #[error("Failed to read source file {}: {source}", path.display())]
    SourceRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Source file is empty: {}", .0.display())]
    EmptySource(PathBuf),

    #[error(
        "Source appears incomplete: found {found} lines, expected at least {expected} \
         (header lines plus one data row)"
    )]
    TooFewLines { found: usize, expected: usize },

    #[error("Expected {expected} header lines, found {found}")]
    TooFewHeaderLines { found: usize, expected: usize },

    #[error("Failed to parse CSV header: no columns found")]
    EmptyHeader,

    #[error("Failed to create output directory {}: {source}", path.display())]
    OutputDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write output file {}: {source}", path.display())]
    OutputWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to serialize dataset: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Recoverable per-row errors. The row is skipped and ingestion continues.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RowError {
    #[error("unterminated quoted field")]
    UnterminatedQuote,

    #[error("unparsable serial number {0:?}")]
    InvalidSerial(String),
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestionError>;
