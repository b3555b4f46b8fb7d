//! Structural statistics for a B-tree.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counters for the structural events a tree goes through.
///
/// Every split, borrow and merge is recorded, which makes rebalancing
/// observable from tests and from the CLI's `stats` command.
///
/// All fields are atomic so readers holding `&BTree` can take snapshots
/// while the counters themselves stay plain to update.
///
/// # Memory Ordering
/// `Ordering::Relaxed` everywhere: counters are independent of each other and
/// of the tree's contents.
///
/// # Example
/// ```
/// use saplingdb::TreeStats;
/// use std::sync::atomic::Ordering;
///
/// let stats = TreeStats::new();
/// stats.merges.fetch_add(1, Ordering::Relaxed);
/// assert_eq!(stats.snapshot().rebalances(), 1);
/// ```
#[derive(Debug)]
pub struct TreeStats {
    /// Node splits, root splits included.
    pub splits: AtomicU64,

    /// Splits of the root (each grows the tree by one level).
    pub root_splits: AtomicU64,

    /// Emptied roots replaced by their only child (each shrinks the tree by one level).
    pub root_collapses: AtomicU64,

    /// Underflows repaired by rotating through the left sibling.
    pub borrows_left: AtomicU64,

    /// Underflows repaired by rotating through the right sibling.
    pub borrows_right: AtomicU64,

    /// Underflows repaired by merging two siblings.
    pub merges: AtomicU64,
}

impl TreeStats {
    /// Create a new stats tracker with all counters at zero.
    pub fn new() -> Self {
        Self {
            splits: AtomicU64::new(0),
            root_splits: AtomicU64::new(0),
            root_collapses: AtomicU64::new(0),
            borrows_left: AtomicU64::new(0),
            borrows_right: AtomicU64::new(0),
            merges: AtomicU64::new(0),
        }
    }

    #[inline]
    pub(crate) fn record(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Get a plain copy of the current counters.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            splits: self.splits.load(Ordering::Relaxed),
            root_splits: self.root_splits.load(Ordering::Relaxed),
            root_collapses: self.root_collapses.load(Ordering::Relaxed),
            borrows_left: self.borrows_left.load(Ordering::Relaxed),
            borrows_right: self.borrows_right.load(Ordering::Relaxed),
            merges: self.merges.load(Ordering::Relaxed),
        }
    }

    /// Reset all counters to zero.
    pub fn reset(&self) {
        self.splits.store(0, Ordering::Relaxed);
        self.root_splits.store(0, Ordering::Relaxed);
        self.root_collapses.store(0, Ordering::Relaxed);
        self.borrows_left.store(0, Ordering::Relaxed);
        self.borrows_right.store(0, Ordering::Relaxed);
        self.merges.store(0, Ordering::Relaxed);
    }
}

impl Default for TreeStats {
    fn default() -> Self {
        Self::new()
    }
}

/// A point-in-time copy of [`TreeStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub splits: u64,
    pub root_splits: u64,
    pub root_collapses: u64,
    pub borrows_left: u64,
    pub borrows_right: u64,
    pub merges: u64,
}

impl StatsSnapshot {
    /// Total underflow repairs (borrows from either side plus merges).
    pub fn rebalances(&self) -> u64 {
        self.borrows_left + self.borrows_right + self.merges
    }
}

impl fmt::Display for StatsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Stats {{ splits: {} (root: {}), borrows: {} left / {} right, merges: {}, root collapses: {} }}",
            self.splits,
            self.root_splits,
            self.borrows_left,
            self.borrows_right,
            self.merges,
            self.root_collapses
        )
    }
}
