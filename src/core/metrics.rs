//! Encoder metrics for observability
//!
//! Counters for events written, bytes emitted, sink flushes and failed writes.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for encoder observability
///
/// # Example
///
/// ```
/// use logstash_encoder::core::EncoderMetrics;
///
/// let metrics = EncoderMetrics::new();
/// metrics.record_encoded(128);
/// metrics.record_flush();
///
/// assert_eq!(metrics.events_encoded(), 1);
/// assert_eq!(metrics.bytes_written(), 128);
/// assert_eq!(metrics.flushes(), 1);
/// ```
#[derive(Debug, Default)]
pub struct EncoderMetrics {
    /// Events whose document and terminator reached the sink, and were
    /// flushed when immediate flush is on
    events_encoded: AtomicU64,

    /// Bytes written, terminators included
    bytes_written: AtomicU64,

    /// Sink flushes performed
    flushes: AtomicU64,

    /// Writes or flushes the sink rejected
    write_failures: AtomicU64,
}

impl EncoderMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            events_encoded: AtomicU64::new(0),
            bytes_written: AtomicU64::new(0),
            flushes: AtomicU64::new(0),
            write_failures: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn events_encoded(&self) -> u64 {
        self.events_encoded.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn flushes(&self) -> u64 {
        self.flushes.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn write_failures(&self) -> u64 {
        self.write_failures.load(Ordering::Relaxed)
    }

    /// Record one event of `bytes` total length
    #[inline]
    pub fn record_encoded(&self, bytes: usize) -> u64 {
        self.bytes_written.fetch_add(bytes as u64, Ordering::Relaxed);
        self.events_encoded.fetch_add(1, Ordering::Relaxed)
    }

    /// Count one delivered event without touching the byte counter
    #[inline]
    pub fn record_event(&self) -> u64 {
        self.events_encoded.fetch_add(1, Ordering::Relaxed)
    }

    /// Record bytes written outside of an event, such as the closing terminator
    #[inline]
    pub fn record_bytes(&self, bytes: usize) -> u64 {
        self.bytes_written.fetch_add(bytes as u64, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_flush(&self) -> u64 {
        self.flushes.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_write_failure(&self) -> u64 {
        self.write_failures.fetch_add(1, Ordering::Relaxed)
    }

    /// Get failure rate as a percentage (0.0 - 100.0)
    ///
    /// Returns 0.0 if nothing has been attempted.
    pub fn failure_rate(&self) -> f64 {
        let failed = self.write_failures() as f64;
        let total = self.events_encoded() as f64 + failed;
        if total == 0.0 {
            0.0
        } else {
            failed / total * 100.0
        }
    }

    /// Reset all counters to zero
    pub fn reset(&self) {
        self.events_encoded.store(0, Ordering::Relaxed);
        self.bytes_written.store(0, Ordering::Relaxed);
        self.flushes.store(0, Ordering::Relaxed);
        self.write_failures.store(0, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let metrics = EncoderMetrics::new();
        assert_eq!(metrics.events_encoded(), 0);
        assert_eq!(metrics.bytes_written(), 0);
        assert_eq!(metrics.flushes(), 0);
        assert_eq!(metrics.write_failures(), 0);
        assert_eq!(metrics.failure_rate(), 0.0);
    }

    #[test]
    fn test_failure_rate() {
        let metrics = EncoderMetrics::new();
        for _ in 0..3 {
            metrics.record_encoded(10);
        }
        metrics.record_write_failure();

        assert_eq!(metrics.bytes_written(), 30);
        assert!((metrics.failure_rate() - 25.0).abs() < 0.001);
    }

    #[test]
    fn test_event_and_bytes_counted_separately() {
        let metrics = EncoderMetrics::new();
        metrics.record_bytes(42);
        metrics.record_write_failure();

        assert_eq!(metrics.events_encoded(), 0);
        assert_eq!(metrics.bytes_written(), 42);
        assert!((metrics.failure_rate() - 100.0).abs() < 0.001);

        metrics.record_event();
        assert_eq!(metrics.events_encoded(), 1);
        assert_eq!(metrics.bytes_written(), 42);
    }

    #[test]
    fn test_reset() {
        let metrics = EncoderMetrics::new();
        metrics.record_encoded(5);
        metrics.record_flush();
        metrics.record_bytes(1);
        metrics.reset();

        assert_eq!(metrics.events_encoded(), 0);
        assert_eq!(metrics.bytes_written(), 0);
        assert_eq!(metrics.flushes(), 0);
    }
}
