//! Region Query Model
//!
//! Identifies a region-statistics request over a reference sequence.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A half-open interval of interbase coordinates on a named reference
/// sequence.
///
/// Two queries are the same cache key iff reference name, start and end
/// are all equal; equality is structural, so independently built queries
/// for the same region share a cache entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegionQuery {
    /// Name of the reference sequence (e.g. "chr1")
    pub ref_name: String,
    /// Start of the region in interbase coordinates
    pub start: u64,
    /// End of the region in interbase coordinates, `start <= end`
    pub end: u64,
}

impl RegionQuery {
    // == Constructor ==
    /// Creates a new region query.
    pub fn new(ref_name: impl Into<String>, start: u64, end: u64) -> Self {
        Self {
            ref_name: ref_name.into(),
            start,
            end,
        }
    }

    // == Width ==
    /// Number of bases the region covers: `end - start`.
    pub fn width(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }

    // == Validate ==
    /// Validates the query.
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.ref_name.is_empty() {
            return Some("Reference sequence name cannot be empty".to_string());
        }
        if self.end < self.start {
            return Some(format!(
                "Region end {} is before region start {}",
                self.end, self.start
            ));
        }
        None
    }
}

impl fmt::Display for RegionQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}-{}", self.ref_name, self.start, self.end)
    }
}
