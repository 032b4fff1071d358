//! Error types for the region statistics cache
//!
//! Provides unified error handling using thiserror.

use std::sync::Arc;

use thiserror::Error;

// == Stats Error Enum ==
/// Unified error type for the region statistics cache.
///
/// The type is `Clone` because a single fill failure is fanned out to
/// every caller waiting on the affected region; source errors are held
/// behind an `Arc` to make that cheap.
#[derive(Error, Debug, Clone)]
pub enum StatsError {
    /// Caller supplied a malformed region query
    #[error("Invalid region query: {0}")]
    InvalidQuery(String),

    /// Cache was constructed with a degenerate configuration
    #[error("Invalid cache configuration: {0}")]
    InvalidConfig(String),

    /// The underlying feature stream failed
    #[error("Feature source error: {0}")]
    Source(Arc<anyhow::Error>),

    /// A fill task terminated without reporting a result
    #[error("Internal error: {0}")]
    Internal(String),
}

impl StatsError {
    /// Wraps a feature-source failure as reported by the backend.
    ///
    /// The original error is forwarded verbatim; no taxonomy is imposed
    /// on what a source may report.
    pub fn source(err: anyhow::Error) -> Self {
        StatsError::Source(Arc::new(err))
    }
}

// == Result Type Alias ==
/// Convenience Result type for the region statistics cache.
pub type Result<T> = std::result::Result<T, StatsError>;
