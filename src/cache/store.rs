//! Region Stats Cache Module
//!
//! Main cache engine combining keyed entry storage with in-flight
//! request coalescing, single-pass streaming aggregation and LRU
//! eviction.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};
use tracing::{debug, warn};

use crate::cache::{CacheEntry, CacheStats, LruTracker, StatsAccumulator};
use crate::config::CacheConfig;
use crate::error::{Result, StatsError};
use crate::models::{RegionQuery, RegionStats};
use crate::source::FeatureSource;

// == Cache Interior ==
/// Entry map, recency order and counters behind a single lock, so that
/// detecting a miss and inserting the pending entry for it is one
/// atomic step.
#[derive(Debug)]
struct Inner {
    entries: HashMap<RegionQuery, CacheEntry>,
    lru: LruTracker,
    stats: CacheStats,
}

// == Region Stats Cache ==
/// Caches per-region summary statistics computed from a streaming
/// feature source.
///
/// Concurrent `get` calls for the same key share one fill: the first
/// caller inserts a pending entry and spawns the fill task, later
/// callers attach to it, and every caller receives the same shared
/// result in registration order. Once the number of ready entries
/// exceeds the configured capacity, the least recently used ready entry
/// is evicted; entries whose fill is in flight are never evicted.
///
/// A cache is scoped to the one source it was built with; do not reuse
/// it across unrelated sources. Clones share the same underlying state.
#[derive(Debug)]
pub struct RegionStatsCache<S> {
    source: Arc<S>,
    capacity: usize,
    channel_buffer: usize,
    inner: Arc<Mutex<Inner>>,
}

impl<S> Clone for RegionStatsCache<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            capacity: self.capacity,
            channel_buffer: self.channel_buffer,
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: FeatureSource> RegionStatsCache<S> {
    // == Constructor ==
    /// Creates a cache over `source` with the given configuration.
    ///
    /// Degenerate configurations (zero capacity, zero channel depth)
    /// are rejected here so that queries never encounter them.
    pub fn new(source: S, config: CacheConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(source, config))
    }

    /// Creates a cache with the default configuration.
    pub fn with_defaults(source: S) -> Self {
        Self::build(source, CacheConfig::default())
    }

    fn build(source: S, config: CacheConfig) -> Self {
        Self {
            source: Arc::new(source),
            capacity: config.capacity,
            channel_buffer: config.channel_buffer,
            inner: Arc::new(Mutex::new(Inner {
                entries: HashMap::new(),
                lru: LruTracker::new(),
                stats: CacheStats::new(),
            })),
        }
    }

    // == Get ==
    /// Returns the statistics for `query`, computing them at most once.
    ///
    /// A ready entry is returned immediately and refreshes its recency.
    /// If a fill for the same key is already in flight the call
    /// attaches to it; otherwise this call starts the fill. Either way
    /// the caller suspends until the shared result, or the fill's
    /// error, is delivered.
    ///
    /// Fails fast with [`StatsError::InvalidQuery`] before any fill is
    /// attempted if the query is malformed. Source failures reach every
    /// waiter of the affected key and are never cached.
    pub async fn get(&self, query: &RegionQuery) -> Result<Arc<RegionStats>> {
        if let Some(message) = query.validate() {
            return Err(StatsError::InvalidQuery(message));
        }

        let rx = {
            let mut guard = self.inner.lock().await;
            let inner = &mut *guard;

            match inner.entries.get_mut(query) {
                Some(entry) => {
                    if let Some(stats) = entry.ready_stats() {
                        inner.stats.record_hit();
                        inner.lru.touch(query);
                        return Ok(stats);
                    }
                    inner.stats.record_coalesced();
                    entry.subscribe()
                }
                None => {
                    inner.stats.record_miss();
                    let mut entry = CacheEntry::pending();
                    let rx = entry.subscribe();
                    inner.entries.insert(query.clone(), entry);
                    inner.stats.set_total_entries(inner.entries.len());
                    self.spawn_fill(query.clone());
                    rx
                }
            }
        };

        match rx.await {
            Ok(result) => result,
            Err(_) => Err(StatsError::Internal(format!(
                "fill for {query} ended without reporting a result"
            ))),
        }
    }

    // == Fill ==
    /// Spawns the single fill task for `query`.
    ///
    /// The task streams the source to completion or failure even if
    /// every caller goes away; cancellation is not supported. On
    /// success the entry transitions to ready and capacity is enforced;
    /// on failure the entry is removed so the next identical query
    /// starts fresh.
    fn spawn_fill(&self, query: RegionQuery) {
        let source = Arc::clone(&self.source);
        let inner = Arc::clone(&self.inner);
        let capacity = self.capacity;
        let channel_buffer = self.channel_buffer;

        tokio::spawn(async move {
            debug!(source = source.name(), region = %query, "starting region fill");
            let outcome = run_fill(&source, &query, channel_buffer).await;

            let mut guard = inner.lock().await;
            let inner = &mut *guard;

            match outcome {
                Ok(stats) => {
                    let Some(entry) = inner.entries.get_mut(&query) else {
                        return;
                    };
                    let stats = Arc::new(stats);
                    let waiters = entry.complete(Arc::clone(&stats));
                    inner.lru.touch(&query);

                    while inner.lru.len() > capacity {
                        match inner.lru.evict_oldest() {
                            Some(victim) => {
                                debug!(region = %victim, "evicting least recently used region");
                                inner.entries.remove(&victim);
                                inner.stats.record_eviction();
                            }
                            None => break,
                        }
                    }
                    inner.stats.set_total_entries(inner.entries.len());

                    debug!(
                        region = %query,
                        features = stats.feature_count,
                        waiters = waiters.len(),
                        "region stats ready"
                    );
                    for waiter in waiters {
                        let _ = waiter.send(Ok(Arc::clone(&stats)));
                    }
                }
                Err(error) => {
                    warn!(region = %query, %error, "region fill failed");
                    let waiters = inner
                        .entries
                        .remove(&query)
                        .map(CacheEntry::into_waiters)
                        .unwrap_or_default();
                    inner.stats.set_total_entries(inner.entries.len());
                    for waiter in waiters {
                        let _ = waiter.send(Err(error.clone()));
                    }
                }
            }
        });
    }

    // == Stats ==
    /// Returns a snapshot of the cache effectiveness counters.
    pub async fn stats(&self) -> CacheStats {
        let guard = self.inner.lock().await;
        let mut stats = guard.stats.clone();
        stats.set_total_entries(guard.entries.len());
        stats
    }

    // == Invalidate ==
    /// Drops the ready entry for `query`, if any; returns whether one
    /// was dropped.
    ///
    /// The next identical query then starts a fresh fill. An in-flight
    /// entry is left alone: its fill runs to completion and its waiters
    /// are served.
    pub async fn invalidate(&self, query: &RegionQuery) -> bool {
        let mut guard = self.inner.lock().await;
        let inner = &mut *guard;

        let ready = inner
            .entries
            .get(query)
            .map(|entry| !entry.is_pending())
            .unwrap_or(false);
        if ready {
            inner.entries.remove(query);
            inner.lru.remove(query);
            inner.stats.set_total_entries(inner.entries.len());
        }
        ready
    }

    // == Length ==
    /// Returns the current number of resident entries (ready and
    /// pending).
    pub async fn len(&self) -> usize {
        self.inner.lock().await.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the cache holds no entries.
    pub async fn is_empty(&self) -> bool {
        self.inner.lock().await.entries.is_empty()
    }
}

/// Runs one streaming pass over the source, folding every feature
/// through an accumulator.
///
/// The source task pushes features through a bounded channel; the pass
/// suspends on each receive. The first source error terminates the
/// pass; dropping the receiver tells a well-behaved source to stop.
async fn run_fill<S: FeatureSource>(
    source: &Arc<S>,
    query: &RegionQuery,
    channel_buffer: usize,
) -> Result<RegionStats> {
    let (tx, mut rx) = mpsc::channel(channel_buffer);
    let producer = Arc::clone(source);
    let producer_query = query.clone();
    tokio::spawn(async move {
        producer.stream_features(producer_query, tx).await;
    });

    let mut accumulator = StatsAccumulator::new();
    while let Some(item) = rx.recv().await {
        match item {
            Ok(feature) => accumulator.observe(feature.score_or_zero()),
            Err(error) => return Err(StatsError::source(error)),
        }
    }
    Ok(accumulator.finalize(query.width()))
}
