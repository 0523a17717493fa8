//! Metrics hooks for cuckoo filter operations
//!
//! Provides instrumentation points for monitoring filter load, relocation
//! pressure and operation latencies.
//!
//! ## Usage
//!
//! ```
//! use std::sync::Arc;
//! use cuckoo_filter::{CuckooFilter, Metrics};
//!
//! let metrics = Arc::new(Metrics::new());
//! let filter = CuckooFilter::new(1024).with_metrics(metrics.clone());
//!
//! filter.insert("BTC").unwrap();
//! assert!(filter.contains("BTC"));
//!
//! let snapshot = metrics.snapshot();
//! assert_eq!(snapshot.inserts, 1);
//! assert_eq!(snapshot.lookups_positive, 1);
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Metrics collector for cuckoo filter operations
///
/// Thread-safe counters shared by any number of filters.
#[derive(Default)]
pub struct Metrics {
    /// Total filters created (including decoded ones)
    pub filters_created: AtomicU64,
    /// Successful inserts
    pub inserts: AtomicU64,
    /// Inserts rejected after exhausting the relocation bound
    pub insert_failures: AtomicU64,
    /// Total relocations performed by inserts
    pub kicks: AtomicU64,
    /// Total lookups performed
    pub lookups_performed: AtomicU64,
    /// Total positive lookups (matches)
    pub lookups_positive: AtomicU64,
    /// Successful deletes
    pub deletes: AtomicU64,
    /// Total bytes allocated for bucket storage
    pub bytes_allocated: AtomicU64,
    /// Cumulative lookup time in nanoseconds
    pub lookup_time_ns: AtomicU64,
    /// Cumulative insert time in nanoseconds
    pub insert_time_ns: AtomicU64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record filter creation
    ///
    /// # Arguments
    /// * `bucket_count` - Number of buckets allocated
    /// * `bucket_bytes` - Size of one bucket in bytes
    pub fn record_filter_created(&self, bucket_count: usize, bucket_bytes: usize) {
        self.filters_created.fetch_add(1, Ordering::Relaxed);
        self.bytes_allocated
            .fetch_add((bucket_count * bucket_bytes) as u64, Ordering::Relaxed);
    }

    /// Record an insert attempt
    ///
    /// # Arguments
    /// * `duration` - Time taken, lock wait included
    /// * `kicks` - Relocations performed
    /// * `inserted` - Whether the key was admitted
    pub fn record_insert(&self, duration: Duration, kicks: usize, inserted: bool) {
        if inserted {
            self.inserts.fetch_add(1, Ordering::Relaxed);
        } else {
            self.insert_failures.fetch_add(1, Ordering::Relaxed);
        }
        self.kicks.fetch_add(kicks as u64, Ordering::Relaxed);
        self.insert_time_ns
            .fetch_add(duration.as_nanos() as u64, Ordering::Relaxed);
    }

    /// Record lookup operation
    ///
    /// # Arguments
    /// * `duration` - Time taken for lookup
    /// * `found` - Whether the key was found (possibly false positive)
    pub fn record_lookup(&self, duration: Duration, found: bool) {
        self.lookups_performed.fetch_add(1, Ordering::Relaxed);
        self.lookup_time_ns
            .fetch_add(duration.as_nanos() as u64, Ordering::Relaxed);
        if found {
            self.lookups_positive.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Record a delete; only successful ones are counted
    pub fn record_delete(&self, removed: bool) {
        if removed {
            self.deletes.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            filters_created: self.filters_created.load(Ordering::Relaxed),
            inserts: self.inserts.load(Ordering::Relaxed),
            insert_failures: self.insert_failures.load(Ordering::Relaxed),
            kicks: self.kicks.load(Ordering::Relaxed),
            lookups_performed: self.lookups_performed.load(Ordering::Relaxed),
            lookups_positive: self.lookups_positive.load(Ordering::Relaxed),
            deletes: self.deletes.load(Ordering::Relaxed),
            bytes_allocated: self.bytes_allocated.load(Ordering::Relaxed),
            avg_lookup_ns: self.avg_lookup_time_ns(),
            avg_insert_ns: self.avg_insert_time_ns(),
        }
    }

    /// Calculate average lookup time in nanoseconds
    pub fn avg_lookup_time_ns(&self) -> u64 {
        let total = self.lookup_time_ns.load(Ordering::Relaxed);
        let count = self.lookups_performed.load(Ordering::Relaxed);
        if count > 0 {
            total / count
        } else {
            0
        }
    }

    /// Calculate average insert time in nanoseconds, failures included
    pub fn avg_insert_time_ns(&self) -> u64 {
        let total = self.insert_time_ns.load(Ordering::Relaxed);
        let count = self.inserts.load(Ordering::Relaxed)
            + self.insert_failures.load(Ordering::Relaxed);
        if count > 0 {
            total / count
        } else {
            0
        }
    }

    /// Ratio of positive lookups to total lookups.
    ///
    /// Includes both true positives and false positives.
    pub fn observed_positive_rate(&self) -> f64 {
        let total = self.lookups_performed.load(Ordering::Relaxed);
        let positive = self.lookups_positive.load(Ordering::Relaxed);
        if total > 0 {
            positive as f64 / total as f64
        } else {
            0.0
        }
    }

    /// Reset all counters
    pub fn reset(&self) {
        self.filters_created.store(0, Ordering::Relaxed);
        self.inserts.store(0, Ordering::Relaxed);
        self.insert_failures.store(0, Ordering::Relaxed);
        self.kicks.store(0, Ordering::Relaxed);
        self.lookups_performed.store(0, Ordering::Relaxed);
        self.lookups_positive.store(0, Ordering::Relaxed);
        self.deletes.store(0, Ordering::Relaxed);
        self.bytes_allocated.store(0, Ordering::Relaxed);
        self.lookup_time_ns.store(0, Ordering::Relaxed);
        self.insert_time_ns.store(0, Ordering::Relaxed);
    }
}

/// Point-in-time metrics snapshot
#[derive(Clone, Debug, Default)]
pub struct MetricsSnapshot {
    pub filters_created: u64,
    pub inserts: u64,
    pub insert_failures: u64,
    pub kicks: u64,
    pub lookups_performed: u64,
    pub lookups_positive: u64,
    pub deletes: u64,
    pub bytes_allocated: u64,
    pub avg_lookup_ns: u64,
    pub avg_insert_ns: u64,
}

/// Trait for custom metrics recording implementations
///
/// Implement this trait to integrate with external metrics systems
/// like Prometheus, StatsD, or OpenTelemetry.
pub trait MetricsRecorder: Send + Sync {
    fn record_filter_created(&self, bucket_count: usize, bucket_bytes: usize);

    fn record_insert(&self, duration: Duration, kicks: usize, inserted: bool);

    fn record_lookup(&self, duration: Duration, found: bool);

    fn record_delete(&self, removed: bool);
}

/// No-op metrics recorder for when metrics are disabled
#[derive(Default)]
pub struct NoOpMetrics;

impl MetricsRecorder for NoOpMetrics {
    fn record_filter_created(&self, _: usize, _: usize) {}
    fn record_insert(&self, _: Duration, _: usize, _: bool) {}
    fn record_lookup(&self, _: Duration, _: bool) {}
    fn record_delete(&self, _: bool) {}
}

impl MetricsRecorder for Metrics {
    fn record_filter_created(&self, bucket_count: usize, bucket_bytes: usize) {
        Metrics::record_filter_created(self, bucket_count, bucket_bytes);
    }

    fn record_insert(&self, duration: Duration, kicks: usize, inserted: bool) {
        Metrics::record_insert(self, duration, kicks, inserted);
    }

    fn record_lookup(&self, duration: Duration, found: bool) {
        Metrics::record_lookup(self, duration, found);
    }

    fn record_delete(&self, removed: bool) {
        Metrics::record_delete(self, removed);
    }
}
