//! # Cuckoo Filter
//!
//! Space-efficient probabilistic data structure supporting deletion.
//! Standard (2, 4) cuckoo filter from "Cuckoo Filter: Practically Better
//! Than Bloom": two candidate buckets per key, four one-byte fingerprints per
//! bucket, partial-key cuckoo hashing for the alternate bucket.
//!
//! ## Advantages over Bloom Filters
//!
//! | Feature | Bloom | Cuckoo |
//! |---------|-------|--------|
//! | Deletion | ❌ No | ✅ Yes |
//! | Space efficiency | Lower | Higher at low FPR |
//! | Lookup cost | k probes | 2 buckets |
//!
//! ## Concurrency
//!
//! The whole table sits behind one reader/writer lock. `insert`, `delete`
//! and `reset` hold the write lock for the entire operation, relocation chain
//! included, so readers never observe a half-moved fingerprint.
//!
//! INVARIANTS:
//! - INVARIANT-1: bucket count is a power of two
//! - INVARIANT-2: `len()` equals the number of occupied slots
//! - INVARIANT-3: every stored fingerprint sits in `i1` or `i1 ^ hash(fp)`
//! - INVARIANT-4: no false negatives for keys whose insert succeeded

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use parking_lot::RwLock;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace, warn};

use super::bucket::{Bucket, Fingerprint, ENTRIES_PER_BUCKET};
use super::config::CuckooConfig;
use super::hash_functions::{fingerprint, partner_index, pick_either, primary_index};
use crate::error::FilterError;
use crate::metrics::{MetricsRecorder, NoOpMetrics};

/// Outcome of placing a fingerprint into the table.
enum Placement {
    Placed { kicks: usize },
    Exhausted,
}

/// Mutable state guarded by the table lock.
#[derive(Clone)]
struct Table {
    buckets: Vec<Bucket>,
    bucket_pow: u32,
    count: usize,
    rng: StdRng,
}

impl Table {
    fn new(buckets: Vec<Bucket>, seed: Option<u64>) -> Self {
        debug_assert!(buckets.len().is_power_of_two());
        let count = buckets.iter().map(Bucket::len).sum();
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            bucket_pow: buckets.len().trailing_zeros(),
            buckets,
            count,
            rng,
        }
    }

    fn slots(&self) -> usize {
        self.buckets.len() * ENTRIES_PER_BUCKET
    }

    fn load_factor(&self) -> f64 {
        self.count as f64 / self.slots() as f64
    }

    fn try_insert(&mut self, i: usize, fp: Fingerprint) -> bool {
        if self.buckets[i].insert(fp) {
            self.count += 1;
            return true;
        }
        false
    }

    fn try_delete(&mut self, i: usize, fp: Fingerprint) -> bool {
        if self.buckets[i].delete(fp) {
            self.count -= 1;
            return true;
        }
        false
    }

    fn contains(&self, i1: usize, fp: Fingerprint) -> bool {
        self.buckets[i1].contains(fp)
            || self.buckets[partner_index(i1, fp, self.bucket_pow)].contains(fp)
    }

    fn place(&mut self, i1: usize, fp: Fingerprint, max_kicks: usize) -> Placement {
        if self.try_insert(i1, fp) {
            return Placement::Placed { kicks: 0 };
        }
        let i2 = partner_index(i1, fp, self.bucket_pow);
        if self.try_insert(i2, fp) {
            return Placement::Placed { kicks: 0 };
        }
        let start = pick_either(i1, i2, &mut self.rng);
        self.relocate(start, fp, max_kicks)
    }

    /// Kick fingerprints between their alternate buckets until one lands in
    /// a free slot.
    ///
    /// Swaps are never rolled back. Every displaced fingerprint moves to its
    /// own partner bucket, so it stays reachable; on exhaustion the
    /// fingerprint still in hand is the one left out.
    fn relocate(&mut self, mut i: usize, mut fp: Fingerprint, max_kicks: usize) -> Placement {
        for kick in 1..=max_kicks {
            let slot = self.rng.gen_range(0..ENTRIES_PER_BUCKET);
            fp = self.buckets[i].swap(slot, fp);

            i = partner_index(i, fp, self.bucket_pow);
            if self.try_insert(i, fp) {
                return Placement::Placed { kicks: kick };
            }
        }
        Placement::Exhausted
    }

    fn reset(&mut self) {
        for bucket in &mut self.buckets {
            bucket.reset();
        }
        self.count = 0;
    }
}

/// Cuckoo filter for probabilistic membership testing with deletion.
///
/// All operations take `&self`; share across threads with `Arc<CuckooFilter>`.
///
/// # Example
///
/// ```
/// use cuckoo_filter::CuckooFilter;
///
/// let filter = CuckooFilter::new(1024);
/// filter.insert("BTC").unwrap();
/// assert!(filter.contains("BTC"));
/// assert!(filter.delete("BTC"));
/// assert!(!filter.contains("BTC"));
/// ```
pub struct CuckooFilter {
    table: RwLock<Table>,
    config: CuckooConfig,
    metrics: Arc<dyn MetricsRecorder>,
}

impl CuckooFilter {
    /// Create a new cuckoo filter with specified capacity.
    ///
    /// Capacity is in items and is rounded up to a power of two; 0 selects
    /// the default of 2^28 items.
    ///
    /// The table is allocated up front, one byte per slot. Capacities above
    /// the 2^34-slot clamp still ask for 16 GiB, and an allocation the system
    /// cannot satisfy aborts the process.
    pub fn new(capacity: usize) -> Self {
        Self::with_config(CuckooConfig::default().with_capacity(capacity))
    }

    /// Create a filter from a configuration.
    ///
    /// The configuration is not validated here; a zero `max_kicks` simply
    /// disables relocation. Allocation behaves as in [`CuckooFilter::new`].
    pub fn with_config(config: CuckooConfig) -> Self {
        let buckets = vec![Bucket::default(); config.bucket_count()];
        Self::from_buckets(buckets, config)
    }

    /// Attach a metrics recorder.
    pub fn with_metrics(mut self, metrics: Arc<dyn MetricsRecorder>) -> Self {
        metrics.record_filter_created(self.bucket_count(), ENTRIES_PER_BUCKET);
        self.metrics = metrics;
        self
    }

    /// Build a filter around existing buckets; `buckets.len()` must be a power of two.
    pub(crate) fn from_buckets(buckets: Vec<Bucket>, config: CuckooConfig) -> Self {
        let table = Table::new(buckets, config.seed);
        debug!(
            bucket_count = table.buckets.len(),
            bucket_pow = table.bucket_pow,
            count = table.count,
            max_kicks = config.max_kicks,
            "cuckoo filter created"
        );
        Self {
            table: RwLock::new(table),
            config,
            metrics: Arc::new(NoOpMetrics),
        }
    }

    /// Run `f` over the bucket array under the shared lock.
    pub(crate) fn with_buckets<R>(&self, f: impl FnOnce(&[Bucket]) -> R) -> R {
        f(&self.table.read().buckets)
    }

    /// Insert a key.
    ///
    /// Returns [`FilterError::InsertFailure`] when no slot was found within
    /// `max_kicks` relocations. The relocations already performed stay in
    /// place and the count is unchanged. The fingerprint left out may belong
    /// to an earlier key, which then looks up as absent.
    pub fn insert<K: AsRef<[u8]> + ?Sized>(&self, key: &K) -> Result<(), FilterError> {
        let start = Instant::now();
        let key = key.as_ref();
        let fp = fingerprint(key);

        let (placement, load_factor) = {
            let mut table = self.table.write();
            let i1 = primary_index(key, table.bucket_pow);
            let placement = table.place(i1, fp, self.config.max_kicks);
            (placement, table.load_factor())
        };

        match placement {
            Placement::Placed { kicks } => {
                if kicks > 0 {
                    trace!(kicks, "fingerprint placed after relocation");
                }
                self.metrics.record_insert(start.elapsed(), kicks, true);
                Ok(())
            }
            Placement::Exhausted => {
                warn!(
                    max_kicks = self.config.max_kicks,
                    load_factor,
                    "cuckoo filter insert failed: relocation bound exhausted"
                );
                self.metrics
                    .record_insert(start.elapsed(), self.config.max_kicks, false);
                Err(FilterError::InsertFailure {
                    max_kicks: self.config.max_kicks,
                })
            }
        }
    }

    /// Check if a key might be in the filter.
    ///
    /// `false` is definite; `true` may be a false positive.
    pub fn contains<K: AsRef<[u8]> + ?Sized>(&self, key: &K) -> bool {
        let start = Instant::now();
        let key = key.as_ref();
        let fp = fingerprint(key);

        let found = {
            let table = self.table.read();
            table.contains(primary_index(key, table.bucket_pow), fp)
        };
        self.metrics.record_lookup(start.elapsed(), found);
        found
    }

    /// Delete a key from the filter.
    ///
    /// Returns `true` if one copy of its fingerprint was removed.
    ///
    /// Only delete keys that were inserted and not yet deleted: a key that was
    /// never inserted can share a fingerprint and bucket with a live key, and
    /// deleting it would silently evict that other key.
    pub fn delete<K: AsRef<[u8]> + ?Sized>(&self, key: &K) -> bool {
        let key = key.as_ref();
        let fp = fingerprint(key);

        let removed = {
            let mut table = self.table.write();
            let i1 = primary_index(key, table.bucket_pow);
            let i2 = partner_index(i1, fp, table.bucket_pow);
            table.try_delete(i1, fp) || table.try_delete(i2, fp)
        };
        self.metrics.record_delete(removed);
        removed
    }

    /// Remove every item.
    pub fn reset(&self) {
        self.table.write().reset();
    }

    /// Get number of items in filter.
    pub fn len(&self) -> usize {
        self.table.read().count
    }

    /// Check if filter is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of buckets (always a power of two).
    pub fn bucket_count(&self) -> usize {
        self.table.read().buckets.len()
    }

    /// Total number of slots.
    pub fn capacity(&self) -> usize {
        self.table.read().slots()
    }

    /// Get load factor.
    pub fn load_factor(&self) -> f64 {
        self.table.read().load_factor()
    }

    /// Configuration the filter was built with.
    pub fn config(&self) -> &CuckooConfig {
        &self.config
    }
}

impl Default for CuckooFilter {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Clone for CuckooFilter {
    fn clone(&self) -> Self {
        Self {
            table: RwLock::new(self.table.read().clone()),
            config: self.config.clone(),
            metrics: Arc::clone(&self.metrics),
        }
    }
}

impl fmt::Debug for CuckooFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let table = self.table.read();
        f.debug_struct("CuckooFilter")
            .field("bucket_count", &table.buckets.len())
            .field("bucket_pow", &table.bucket_pow)
            .field("count", &table.count)
            .field("max_kicks", &self.config.max_kicks)
            .finish()
    }
}
