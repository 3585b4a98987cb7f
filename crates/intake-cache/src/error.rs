//! Error types for the cache crate.

use std::path::PathBuf;

use intake_ingest::StoreError;
use thiserror::Error;

/// A source could not be projected at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProjectionError {
    #[error("source {source_name} is missing required columns: {}", columns.join(", "))]
    MissingColumn {
        source_name: String,
        columns: Vec<String>,
    },
}

impl ProjectionError {
    #[must_use]
    pub fn source_name(&self) -> &str {
        match self {
            Self::MissingColumn { source_name, .. } => source_name,
        }
    }
}

/// Caller-visible failures. Reference-data reads never produce these.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The sales log has never been readable.
    #[error("sales source {source_name} is unavailable")]
    SalesUnavailable { source_name: String },

    #[error("no sales match the export filters")]
    NothingToExport,

    #[error("failed to export sales to {path}: {message}")]
    Export { path: PathBuf, message: String },
}

pub type Result<T> = std::result::Result<T, CacheError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid configuration: {message}")]
    Invalid { message: String },
}
