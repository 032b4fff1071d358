//! Region statistics cache for streaming genomic feature sources.
//!
//! Computes per-region summary statistics (score extrema, mean, sample
//! standard deviation, feature density) in a single streaming pass over
//! a feature source, and caches the results with in-flight request
//! coalescing and LRU eviction.

pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod source;

pub use cache::{CacheStats, RegionStatsCache, StatsAccumulator};
pub use config::CacheConfig;
pub use error::{Result, StatsError};
pub use models::{Feature, RegionQuery, RegionStats};
pub use source::{FeatureSender, FeatureSource, MemoryFeatureSource};
