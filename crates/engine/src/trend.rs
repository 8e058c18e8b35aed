//! Fixed-resolution sliding window of arrival counts.

use std::collections::VecDeque;

/// Number of buckets in a full trend window. The shift timer advances
/// every window by one bucket each `trend duration / TREND_BUCKETS`.
pub const TREND_BUCKETS: usize = 20;

/// Ring of per-interval hit counters, newest bucket at the front.
///
/// A window starts with a single zero bucket and grows by one bucket per
/// advance until it holds `capacity` buckets; from then on the oldest
/// bucket is evicted on every advance, so the ring covers the trailing
/// trend duration with the newest bucket still filling.
#[derive(Debug, Clone)]
pub struct TrendWindow {
    buckets: VecDeque<u64>,
    capacity: usize,
}

impl TrendWindow {
    pub(crate) fn new(capacity: usize) -> Self {
        let mut buckets = VecDeque::with_capacity(capacity + 1);
        buckets.push_front(0);
        Self { buckets, capacity }
    }

    /// Count one arrival in the current bucket.
    pub(crate) fn record_hit(&mut self) {
        if let Some(head) = self.buckets.front_mut() {
            *head += 1;
        }
    }

    /// Open a new zero bucket, evicting the oldest once the ring is full.
    pub(crate) fn advance(&mut self) {
        self.buckets.push_front(0);
        if self.buckets.len() > self.capacity {
            self.buckets.pop_back();
        }
    }

    /// Bucket counts, most recent first.
    #[must_use]
    pub fn counts(&self) -> Vec<u64> {
        self.buckets.iter().copied().collect()
    }
}
