use std::sync::atomic::{AtomicU64, Ordering};

/// Composition statistics for a [`KeyComposer`](crate::KeyComposer).
///
/// Counts how many units received a key and how many were skipped because
/// they had no base key. Counters use relaxed atomics, so recording never
/// blocks the composition path.
///
/// # Examples
///
/// ```
/// use varykey_core::ComposeStats;
///
/// let stats = ComposeStats::new();
///
/// stats.record_composed();
/// stats.record_composed();
/// stats.record_skipped();
///
/// assert_eq!(stats.composed(), 2);
/// assert_eq!(stats.skipped(), 1);
/// assert_eq!(stats.total(), 3);
/// assert!((stats.cacheable_rate() - 0.6666).abs() < 0.001);
/// ```
#[derive(Debug)]
pub struct ComposeStats {
    composed: AtomicU64,
    skipped: AtomicU64,
}

impl ComposeStats {
    pub fn new() -> Self {
        Self {
            composed: AtomicU64::new(0),
            skipped: AtomicU64::new(0),
        }
    }

    /// Records a unit that received a key.
    #[inline]
    pub fn record_composed(&self) {
        self.composed.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a unit that had no base key and therefore no cache key.
    #[inline]
    pub fn record_skipped(&self) {
        self.skipped.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn composed(&self) -> u64 {
        self.composed.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn skipped(&self) -> u64 {
        self.skipped.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn total(&self) -> u64 {
        self.composed() + self.skipped()
    }

    /// Fraction of compositions that produced a key, `0.0` when nothing was composed yet.
    #[inline]
    pub fn cacheable_rate(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            self.composed() as f64 / total as f64
        }
    }

    pub fn reset(&self) {
        self.composed.store(0, Ordering::Relaxed);
        self.skipped.store(0, Ordering::Relaxed);
    }
}

impl Default for ComposeStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Cloning takes a snapshot; the clone does not follow later updates.
impl Clone for ComposeStats {
    fn clone(&self) -> Self {
        Self {
            composed: AtomicU64::new(self.composed()),
            skipped: AtomicU64::new(self.skipped()),
        }
    }
}
