//! Error types for taxonomy operations

use std::path::PathBuf;
use thiserror::Error;

/// Taxonomy errors
#[derive(Debug, Error)]
pub enum TaxonomyError {
    /// The backing store could not answer a parent lookup
    #[error("Taxonomy unavailable: {0}")]
    Unavailable(String),

    /// Taxonomy file could not be read
    #[error("Failed to read taxonomy file {path:?}: {source}")]
    Read {
        /// File path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Taxonomy file is not valid YAML
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A reasoner could not produce a taxonomy
    #[error("Reasoner '{reasoner}' failed: {reason}")]
    Reasoning {
        /// Reasoner name
        reasoner: String,
        /// Failure reason
        reason: String,
    },
}

/// Convenient Result type alias
pub type Result<T> = std::result::Result<T, TaxonomyError>;
