#![forbid(unsafe_code)]
#![deny(warnings)]
#![warn(clippy::pedantic)]

use parking_lot::Mutex;

#[derive(Default)]
struct CounterInner {
    count: u64,
    watermark: u64,
}

/// Concurrency-safe request counter with an export watermark.
///
/// `count` only ever grows; `watermark` records the value as of the last
/// snapshot, so `count - watermark` is the not-yet-exported backlog. Both
/// fields live under one mutex so increments and snapshots never observe a
/// torn state, and the sum of all snapshot deltas always equals the total.
#[derive(Default)]
pub struct RequestCounter {
    inner: Mutex<CounterInner>,
}

impl RequestCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one served request. Safe from any number of concurrent callers.
    pub fn increment(&self) {
        let mut inner = self.inner.lock();
        inner.count += 1;
    }

    /// Drain the backlog: return `count - watermark` and advance the
    /// watermark to `count` in one atomic step. A second call with no
    /// intervening increment returns 0.
    pub fn snapshot(&self) -> u64 {
        let mut inner = self.inner.lock();
        let delta = inner.count - inner.watermark;
        inner.watermark = inner.count;
        delta
    }

    /// Total requests served since process start.
    pub fn total(&self) -> u64 {
        self.inner.lock().count
    }
}
