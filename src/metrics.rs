// Runtime counters
//
// Lightweight, lock-free tracking of ingestion activity

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

/// Controller-wide counters
///
/// Uses atomic operations so concurrent loads can record without locks.
/// Logged on shutdown for a quick picture of what the session did.
#[derive(Debug)]
pub struct Metrics {
    /// Loads spawned
    pub loads_started: AtomicUsize,

    /// Loads that ended in a slot assignment
    pub loads_completed: AtomicUsize,

    /// Loads that ended in a notice
    pub loads_failed: AtomicUsize,

    /// Drops and picks that resolved to no assignment
    pub drops_ignored: AtomicUsize,

    /// Bytes of image data assigned to slots
    pub bytes_loaded: AtomicU64,

    /// Total time spent in successful loads, in milliseconds
    pub total_load_time_ms: AtomicU64,

    /// Drag, drop, pick and selection events handled
    pub events_handled: AtomicU64,

    start_time: Instant,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            loads_started: AtomicUsize::new(0),
            loads_completed: AtomicUsize::new(0),
            loads_failed: AtomicUsize::new(0),
            drops_ignored: AtomicUsize::new(0),
            bytes_loaded: AtomicU64::new(0),
            total_load_time_ms: AtomicU64::new(0),
            events_handled: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    pub fn record_load_started(&self) {
        self.loads_started.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a successful load of `bytes` taking `duration`
    pub fn record_load_completed(&self, bytes: usize, duration: Duration) {
        self.loads_completed.fetch_add(1, Ordering::Relaxed);
        self.bytes_loaded.fetch_add(bytes as u64, Ordering::Relaxed);
        self.total_load_time_ms
            .fetch_add(duration.as_millis() as u64, Ordering::Relaxed);
    }

    pub fn record_load_failed(&self) {
        self.loads_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_drop_ignored(&self) {
        self.drops_ignored.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_event(&self) {
        self.events_handled.fetch_add(1, Ordering::Relaxed);
    }

    /// Loads spawned but not yet finished
    pub fn loads_in_flight(&self) -> usize {
        let started = self.loads_started.load(Ordering::Relaxed);
        let finished = self.loads_completed.load(Ordering::Relaxed)
            + self.loads_failed.load(Ordering::Relaxed);
        started.saturating_sub(finished)
    }

    pub fn uptime(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Average successful load time in milliseconds
    pub fn avg_load_time_ms(&self) -> f64 {
        let total = self.total_load_time_ms.load(Ordering::Relaxed);
        let count = self.loads_completed.load(Ordering::Relaxed);
        if count > 0 {
            total as f64 / count as f64
        } else {
            0.0
        }
    }

    /// Log metrics summary
    pub fn log_summary(&self) {
        tracing::info!("=== Session Metrics Summary ===");
        tracing::info!("Uptime: {:.2}s", self.uptime().as_secs_f64());
        tracing::info!(
            "Loads: {} started, {} completed, {} failed (avg: {:.2}ms)",
            self.loads_started.load(Ordering::Relaxed),
            self.loads_completed.load(Ordering::Relaxed),
            self.loads_failed.load(Ordering::Relaxed),
            self.avg_load_time_ms()
        );
        tracing::info!(
            "Bytes loaded: {}, ignored drops: {}, events: {}",
            self.bytes_loaded.load(Ordering::Relaxed),
            self.drops_ignored.load(Ordering::Relaxed),
            self.events_handled.load(Ordering::Relaxed)
        );
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_creation() {
        let metrics = Metrics::new();
        assert_eq!(metrics.loads_started.load(Ordering::Relaxed), 0);
        assert_eq!(metrics.loads_in_flight(), 0);
    }

    #[test]
    fn test_load_lifecycle() {
        let metrics = Metrics::new();

        metrics.record_load_started();
        metrics.record_load_started();
        assert_eq!(metrics.loads_in_flight(), 2);

        metrics.record_load_completed(2048, Duration::from_millis(30));
        metrics.record_load_failed();

        assert_eq!(metrics.loads_in_flight(), 0);
        assert_eq!(metrics.bytes_loaded.load(Ordering::Relaxed), 2048);
        assert_eq!(metrics.avg_load_time_ms(), 30.0);
    }

    #[test]
    fn test_avg_load_time_no_loads() {
        let metrics = Metrics::new();
        assert_eq!(metrics.avg_load_time_ms(), 0.0);
    }

    #[test]
    fn test_event_counters() {
        let metrics = Metrics::new();
        metrics.record_event();
        metrics.record_event();
        metrics.record_drop_ignored();

        assert_eq!(metrics.events_handled.load(Ordering::Relaxed), 2);
        assert_eq!(metrics.drops_ignored.load(Ordering::Relaxed), 1);
    }
}
