//! Error types for tabular sources.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The source does not exist in the store.
    #[error("source not found: {name}")]
    NotFound { name: String },

    #[error("failed to access source {name}: {source}")]
    Io {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse CSV source {name}: {message}")]
    Csv { name: String, message: String },

    /// The source exists but cannot be read right now.
    #[error("source {name} is unreadable: {message}")]
    Unreadable { name: String, message: String },
}

impl StoreError {
    pub(crate) fn io(name: impl Into<String>, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            return Self::NotFound { name: name.into() };
        }
        Self::Io {
            name: name.into(),
            source,
        }
    }

    pub(crate) fn csv(name: impl Into<String>, error: &csv::Error) -> Self {
        Self::Csv {
            name: name.into(),
            message: error.to_string(),
        }
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
