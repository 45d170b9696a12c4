//! Observability and Metrics
//!
//! Counters for info-string traffic: how many buffers peers sent, how many
//! were rejected, and how often set/lookup operations succeed.
//!
//! Uses atomic counters for thread-safe metrics collection.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;
use tracing::{debug, info};

/// Global metrics collector for codec operations
#[derive(Debug)]
pub struct Metrics {
    /// Info strings accepted at the protocol edge
    pub info_parsed: AtomicU64,
    /// Info strings rejected at the protocol edge
    pub info_rejected: AtomicU64,
    /// Successful set operations
    pub keys_set: AtomicU64,
    /// Set operations rejected for invalid input
    pub set_rejected: AtomicU64,
    /// Set operations rejected because the pair would not fit
    pub capacity_rejected: AtomicU64,
    /// Pairs removed
    pub keys_removed: AtomicU64,
    /// Value lookups
    pub lookups: AtomicU64,
    /// Value lookups for absent keys
    pub lookup_misses: AtomicU64,
    /// Entity strings scanned for worldspawn keys
    pub entities_parsed: AtomicU64,
    /// Entity strings that were malformed
    pub entities_malformed: AtomicU64,
    /// Start time for uptime calculation
    start_time: Instant,
}

impl Metrics {
    /// Create a new metrics collector
    pub fn new() -> Self {
        Self {
            info_parsed: AtomicU64::new(0),
            info_rejected: AtomicU64::new(0),
            keys_set: AtomicU64::new(0),
            set_rejected: AtomicU64::new(0),
            capacity_rejected: AtomicU64::new(0),
            keys_removed: AtomicU64::new(0),
            lookups: AtomicU64::new(0),
            lookup_misses: AtomicU64::new(0),
            entities_parsed: AtomicU64::new(0),
            entities_malformed: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    pub fn info_parsed(&self) {
        self.info_parsed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn info_rejected(&self) {
        self.info_rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn key_set(&self) {
        self.keys_set.fetch_add(1, Ordering::Relaxed);
    }

    pub fn set_rejected(&self) {
        self.set_rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn capacity_rejected(&self) {
        self.capacity_rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn key_removed(&self) {
        self.keys_removed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn lookup(&self) {
        self.lookups.fetch_add(1, Ordering::Relaxed);
    }

    pub fn lookup_miss(&self) {
        self.lookup_misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn entities_parsed(&self) {
        self.entities_parsed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn entities_malformed(&self) {
        self.entities_malformed.fetch_add(1, Ordering::Relaxed);
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            info_parsed: self.info_parsed.load(Ordering::Relaxed),
            info_rejected: self.info_rejected.load(Ordering::Relaxed),
            keys_set: self.keys_set.load(Ordering::Relaxed),
            set_rejected: self.set_rejected.load(Ordering::Relaxed),
            capacity_rejected: self.capacity_rejected.load(Ordering::Relaxed),
            keys_removed: self.keys_removed.load(Ordering::Relaxed),
            lookups: self.lookups.load(Ordering::Relaxed),
            lookup_misses: self.lookup_misses.load(Ordering::Relaxed),
            entities_parsed: self.entities_parsed.load(Ordering::Relaxed),
            entities_malformed: self.entities_malformed.load(Ordering::Relaxed),
            uptime_seconds: self.start_time.elapsed().as_secs(),
        }
    }

    /// Log current metrics
    pub fn log_metrics(&self) {
        let snapshot = self.snapshot();
        info!(
            info_parsed = snapshot.info_parsed,
            info_rejected = snapshot.info_rejected,
            keys_set = snapshot.keys_set,
            set_rejected = snapshot.set_rejected,
            capacity_rejected = snapshot.capacity_rejected,
            keys_removed = snapshot.keys_removed,
            lookups = snapshot.lookups,
            lookup_misses = snapshot.lookup_misses,
            entities_parsed = snapshot.entities_parsed,
            entities_malformed = snapshot.entities_malformed,
            uptime_seconds = snapshot.uptime_seconds,
            "Info protocol metrics snapshot"
        );
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of metrics at a point in time
#[derive(Debug, Clone)]
pub struct MetricsSnapshot {
    pub info_parsed: u64,
    pub info_rejected: u64,
    pub keys_set: u64,
    pub set_rejected: u64,
    pub capacity_rejected: u64,
    pub keys_removed: u64,
    pub lookups: u64,
    pub lookup_misses: u64,
    pub entities_parsed: u64,
    pub entities_malformed: u64,
    pub uptime_seconds: u64,
}

/// Global metrics instance (lazy static for simplicity)
static METRICS: once_cell::sync::Lazy<Metrics> = once_cell::sync::Lazy::new(Metrics::new);

/// Get the global metrics instance
pub fn global_metrics() -> &'static Metrics {
    &METRICS
}

/// Initialize metrics collection (call once at startup)
pub fn init_metrics() {
    let _ = global_metrics();
    info!("Metrics collection initialized");
}

/// Timer for measuring operation duration
pub struct Timer {
    start: Instant,
    operation: &'static str,
}

impl Timer {
    /// Start timing an operation
    pub fn start(operation: &'static str) -> Self {
        Self {
            start: Instant::now(),
            operation,
        }
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        let duration = self.start.elapsed();
        debug!(
            operation = self.operation,
            duration_us = duration.as_micros() as u64,
            "Operation completed"
        );
    }
}
