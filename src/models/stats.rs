//! Region Statistics Model
//!
//! The finalized summary statistics for one region query.

use serde::Serialize;

/// Summary statistics over the features of one region.
///
/// Produced by [`StatsAccumulator::finalize`](crate::cache::StatsAccumulator::finalize)
/// once a streaming pass completes; immutable afterwards. The cache
/// shares one finalized value between all callers of the same key.
///
/// For a region in which no features were seen, `score_max` and
/// `score_min` keep their `-inf`/`+inf` sentinel initializers; callers
/// must be prepared to see them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionStats {
    /// Largest score observed, `-inf` if no features were seen
    pub score_max: f64,
    /// Smallest score observed, `+inf` if no features were seen
    pub score_min: f64,
    /// Sum of all observed scores
    pub score_sum: f64,
    /// Sum of all squared scores
    pub score_sum_squares: f64,
    /// Width of the queried region (`end - start`), fixed from the
    /// query at creation; independent of the features found
    pub bases_covered: u64,
    /// Number of features observed
    pub feature_count: u64,
    /// Arithmetic mean score, 0 for a featureless region
    pub score_mean: f64,
    /// Bessel-corrected sample standard deviation, 0 for fewer than two
    /// observations
    pub score_std_dev: f64,
    /// `feature_count / bases_covered` in IEEE division: a zero-width
    /// region yields NaN (no features) or +inf
    pub feature_density: f64,
}
