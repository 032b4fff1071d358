//! In-Memory Feature Source
//!
//! Vec-backed reference backend; the simplest closed implementation of
//! [`FeatureSource`], used heavily by the test suite.

use std::collections::HashMap;

use crate::models::{Feature, RegionQuery};
use crate::source::{FeatureSender, FeatureSource};

/// Feature source backed by per-reference feature lists held in memory.
#[derive(Debug, Default)]
pub struct MemoryFeatureSource {
    features: HashMap<String, Vec<Feature>>,
}

impl MemoryFeatureSource {
    // == Constructor ==
    /// Creates an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a source holding features for a single reference.
    pub fn with_features(ref_name: impl Into<String>, features: Vec<Feature>) -> Self {
        let mut source = Self::new();
        source.insert(ref_name, features);
        source
    }

    // == Insert ==
    /// Adds features to a reference sequence.
    pub fn insert(&mut self, ref_name: impl Into<String>, features: Vec<Feature>) {
        self.features
            .entry(ref_name.into())
            .or_default()
            .extend(features);
    }
}

impl FeatureSource for MemoryFeatureSource {
    fn name(&self) -> &str {
        "memory"
    }

    async fn stream_features(&self, query: RegionQuery, tx: FeatureSender) {
        let Some(features) = self.features.get(&query.ref_name) else {
            return;
        };
        for feature in features {
            if feature.overlaps(query.start, query.end)
                && tx.send(Ok(feature.clone())).await.is_err()
            {
                return;
            }
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    async fn collect(source: &MemoryFeatureSource, query: RegionQuery) -> Vec<Feature> {
        let (tx, mut rx) = mpsc::channel(16);
        let stream = source.stream_features(query, tx);
        let mut collected = Vec::new();
        let consumer = async {
            while let Some(item) = rx.recv().await {
                collected.push(item.unwrap());
            }
        };
        tokio::join!(stream, consumer);
        collected
    }

    #[tokio::test]
    async fn test_streams_overlapping_features_only() {
        let source = MemoryFeatureSource::with_features(
            "chr1",
            vec![
                Feature::new(0, 50, Some(1.0)),
                Feature::new(90, 110, Some(2.0)),
                Feature::new(150, 160, Some(3.0)),
                Feature::new(200, 250, Some(4.0)),
            ],
        );

        let features = collect(&source, RegionQuery::new("chr1", 100, 200)).await;
        let scores: Vec<f64> = features.iter().map(Feature::score_or_zero).collect();
        assert_eq!(scores, vec![2.0, 3.0]);
    }

    #[tokio::test]
    async fn test_unknown_reference_is_empty() {
        let source = MemoryFeatureSource::with_features("chr1", vec![Feature::new(0, 10, None)]);

        let features = collect(&source, RegionQuery::new("chr7", 0, 1000)).await;
        assert!(features.is_empty());
    }

    #[tokio::test]
    async fn test_insert_extends_reference() {
        let mut source = MemoryFeatureSource::new();
        source.insert("chr1", vec![Feature::new(0, 10, Some(1.0))]);
        source.insert("chr1", vec![Feature::new(5, 15, Some(2.0))]);

        let features = collect(&source, RegionQuery::new("chr1", 0, 100)).await;
        assert_eq!(features.len(), 2);
    }

    #[test]
    fn test_source_name() {
        assert_eq!(MemoryFeatureSource::new().name(), "memory");
    }
}
