//! Error types for matching runs

use talentmatch_taxonomy::TaxonomyError;
use thiserror::Error;

/// Run-level matching errors. Any of these aborts the whole run.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Taxonomy lookups failed
    #[error("Taxonomy error: {0}")]
    Taxonomy(#[from] TaxonomyError),

    /// Dedicated worker pool could not be created
    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Convenient Result type alias
pub type Result<T> = std::result::Result<T, EngineError>;
