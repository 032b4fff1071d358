//! Feature Model
//!
//! A scored, interval-located annotation record produced by a feature
//! source.

use serde::{Deserialize, Serialize};

/// One feature streamed out of a [`FeatureSource`](crate::source::FeatureSource).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    /// Start of the feature in interbase coordinates
    pub start: u64,
    /// End of the feature in interbase coordinates
    pub end: u64,
    /// Numeric score, if the source provides one
    pub score: Option<f64>,
}

impl Feature {
    // == Constructor ==
    pub fn new(start: u64, end: u64, score: Option<f64>) -> Self {
        Self { start, end, score }
    }

    // == Score Or Zero ==
    /// Score used for aggregation; features without a score count as 0.
    pub fn score_or_zero(&self) -> f64 {
        self.score.unwrap_or(0.0)
    }

    // == Overlaps ==
    /// Half-open interval overlap with `[start, end)`.
    pub fn overlaps(&self, start: u64, end: u64) -> bool {
        self.start < end && self.end > start
    }
}
