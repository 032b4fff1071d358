//! Cache Entry Module
//!
//! Per-region entry state machine: pending with registered waiters,
//! then ready with the finalized statistics.

use std::sync::Arc;

use tokio::sync::oneshot;

use crate::error::StatsError;
use crate::models::RegionStats;

/// Result delivered to every caller waiting on one region.
pub(crate) type StatsResult = Result<Arc<RegionStats>, StatsError>;

/// Sending half of one waiter's delivery channel.
pub(crate) type Waiter = oneshot::Sender<StatsResult>;

#[derive(Debug)]
enum EntryState {
    /// Fill in progress; waiters are flushed in registration order
    Pending { waiters: Vec<Waiter> },
    /// Fill finished; the shared statistics are served on every hit
    Ready(Arc<RegionStats>),
}

// == Cache Entry ==
/// Represents a single cached region in one of two states.
///
/// A pending entry collects the callers waiting on the in-flight fill,
/// in registration order. A ready entry holds the shared finalized
/// statistics. The failure path never becomes a state of its own:
/// failed entries are removed from the cache outright, so a subsequent
/// identical query starts fresh.
#[derive(Debug)]
pub(crate) struct CacheEntry {
    state: EntryState,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a pending entry with no registered waiters.
    pub fn pending() -> Self {
        Self {
            state: EntryState::Pending {
                waiters: Vec::new(),
            },
        }
    }

    // == Subscribe ==
    /// Registers a waiter and returns its receiving half.
    ///
    /// A waiter registered on a ready entry is completed immediately
    /// with the stored statistics.
    pub fn subscribe(&mut self) -> oneshot::Receiver<StatsResult> {
        let (tx, rx) = oneshot::channel();
        match &mut self.state {
            EntryState::Pending { waiters } => waiters.push(tx),
            EntryState::Ready(stats) => {
                let _ = tx.send(Ok(Arc::clone(stats)));
            }
        }
        rx
    }

    // == Ready Stats ==
    /// Returns the finalized statistics if the entry is ready.
    pub fn ready_stats(&self) -> Option<Arc<RegionStats>> {
        match &self.state {
            EntryState::Ready(stats) => Some(Arc::clone(stats)),
            EntryState::Pending { .. } => None,
        }
    }

    // == Is Pending ==
    /// Whether a fill for this entry is still in flight.
    pub fn is_pending(&self) -> bool {
        matches!(self.state, EntryState::Pending { .. })
    }

    // == Complete ==
    /// Transitions the entry to ready, handing back the waiters to be
    /// notified in registration order.
    pub fn complete(&mut self, stats: Arc<RegionStats>) -> Vec<Waiter> {
        match std::mem::replace(&mut self.state, EntryState::Ready(stats)) {
            EntryState::Pending { waiters } => waiters,
            EntryState::Ready(_) => Vec::new(),
        }
    }

    // == Into Waiters ==
    /// Consumes the entry, handing back any registered waiters.
    ///
    /// Used on the failure path, where the entry is removed instead of
    /// transitioning to ready.
    pub fn into_waiters(self) -> Vec<Waiter> {
        match self.state {
            EntryState::Pending { waiters } => waiters,
            EntryState::Ready(_) => Vec::new(),
        }
    }

    /// Number of callers currently waiting on this entry.
    #[allow(dead_code)]
    pub fn waiter_count(&self) -> usize {
        match &self.state {
            EntryState::Pending { waiters } => waiters.len(),
            EntryState::Ready(_) => 0,
        }
    }
}
