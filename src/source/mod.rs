//! Feature Sources
//!
//! The streaming collaborator interface the cache consumes, plus the
//! in-memory reference backend.

mod memory;

pub use memory::MemoryFeatureSource;

use std::future::Future;

use tokio::sync::mpsc;

use crate::models::{Feature, RegionQuery};

/// Sending half of one feature stream.
///
/// A source pushes zero or more `Ok(Feature)` items, then terminates
/// the stream exactly once: dropping the sender signals clean
/// completion, sending an `Err` signals failure.
pub type FeatureSender = mpsc::Sender<Result<Feature, anyhow::Error>>;

/// A backend capable of streaming the features overlapping a region.
///
/// The cache drives one streaming pass per cache miss; implementations
/// only need to produce features lazily and report the terminal
/// condition through the channel contract on [`FeatureSender`].
/// When a send fails the consumer is gone and the implementation should
/// stop streaming.
pub trait FeatureSource: Send + Sync + 'static {
    /// Short backend name used in log output.
    fn name(&self) -> &str {
        "featuresource"
    }

    /// Streams every feature overlapping `query` into `tx`.
    ///
    /// Features may arrive in any order.
    fn stream_features(
        &self,
        query: RegionQuery,
        tx: FeatureSender,
    ) -> impl Future<Output = ()> + Send;
}
