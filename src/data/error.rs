use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Input that is readable but does not describe a valid pokédex table.
#[derive(Error, Debug)]
pub enum MalformedInput {
    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("row {row}: id '{value}' is not an integer")]
    InvalidId { row: usize, value: String },

    #[error("row {row}: {stat} value '{value}' is out of range")]
    InvalidStat {
        row: usize,
        stat: &'static str,
        value: String,
    },

    #[error("row {row}: {reason}")]
    InvalidRow { row: usize, reason: String },

    #[error("{0}")]
    InvalidLayout(String),
}

/// Errors that abort loading a pokédex file.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Malformed input: {0}")]
    MalformedInput(#[from] MalformedInput),

    #[error("Unsupported file extension: .{0}")]
    UnsupportedExtension(String),

    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
}

impl LoadError {
    /// Whether the file was read but its contents are not a valid table.
    pub fn is_malformed_input(&self) -> bool {
        matches!(self, LoadError::MalformedInput(_))
    }
}

pub type Result<T> = std::result::Result<T, LoadError>;
