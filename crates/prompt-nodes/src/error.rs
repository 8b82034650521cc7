//! Error types for loading the category table

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading the category table
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The table file could not be read
    #[error("Failed to read category table {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The table is not a JSON object of category entries
    #[error("Failed to parse category table {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
