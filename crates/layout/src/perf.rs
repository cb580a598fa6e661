use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Trait for observing layout work.
///
/// The tree reports every cache lookup and every call into a leaf's measure function. Without a
/// profiler installed the `NoOpProfiler` is used and the calls compile away.
pub trait Profiler: Send + Sync {
    fn record(&self, key: &str, duration: Duration);
    fn count_hit(&self);
    fn count_miss(&self);
    /// Called once per invocation of a leaf measure function.
    fn count_measure(&self);
    fn reset(&self);
}

/// A no-op profiler for production use.
pub struct NoOpProfiler;

impl Profiler for NoOpProfiler {
    #[inline(always)]
    fn record(&self, _key: &str, _duration: Duration) {}
    #[inline(always)]
    fn count_hit(&self) {}
    #[inline(always)]
    fn count_miss(&self) {}
    #[inline(always)]
    fn count_measure(&self) {}
    #[inline(always)]
    fn reset(&self) {}
}

/// Counting profiler for debugging and tests.
pub struct DebugProfiler {
    stats: Mutex<HashMap<String, Duration>>,
    hits: AtomicUsize,
    misses: AtomicUsize,
    measures: AtomicUsize,
}

impl DebugProfiler {
    pub fn new() -> Self {
        Self {
            stats: Mutex::new(HashMap::new()),
            hits: AtomicUsize::new(0),
            misses: AtomicUsize::new(0),
            measures: AtomicUsize::new(0),
        }
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::Acquire)
    }

    pub fn misses(&self) -> usize {
        self.misses.load(Ordering::Acquire)
    }

    pub fn measure_calls(&self) -> usize {
        self.measures.load(Ordering::Acquire)
    }

    /// Total time recorded under `key`, if any.
    pub fn recorded(&self, key: &str) -> Option<Duration> {
        self.stats.lock().ok().and_then(|stats| stats.get(key).copied())
    }

    pub fn log_summary(&self) {
        let hits = self.hits();
        let misses = self.misses();
        let total = hits + misses;
        if total == 0 {
            return;
        }

        log::info!("=== Layout Profile Summary ===");
        log::info!("Cache Hits: {} ({:.1}%)", hits, (hits as f64 / total as f64) * 100.0);
        log::info!("Cache Misses: {}", misses);
        log::info!("Measure Calls: {}", self.measure_calls());

        if let Ok(stats) = self.stats.lock() {
            for (k, v) in stats.iter() {
                log::info!("{}: {:?}", k, v);
            }
        }
    }
}

impl Default for DebugProfiler {
    fn default() -> Self {
        Self::new()
    }
}

impl Profiler for DebugProfiler {
    fn record(&self, key: &str, duration: Duration) {
        if let Ok(mut g) = self.stats.lock() {
            *g.entry(key.to_string()).or_default() += duration;
        }
    }

    fn count_hit(&self) {
        self.hits.fetch_add(1, Ordering::Release);
    }

    fn count_miss(&self) {
        self.misses.fetch_add(1, Ordering::Release);
    }

    fn count_measure(&self) {
        self.measures.fetch_add(1, Ordering::Release);
    }

    fn reset(&self) {
        if let Ok(mut g) = self.stats.lock() {
            g.clear();
        }
        self.hits.store(0, Ordering::Release);
        self.misses.store(0, Ordering::Release);
        self.measures.store(0, Ordering::Release);
    }
}
