//! Cuckoo filter configuration and validation
//!
//! # Example
//!
//! ```
//! use cuckoo_filter::domain::CuckooConfigBuilder;
//!
//! let config = CuckooConfigBuilder::new()
//!     .capacity(10_000)
//!     .max_kicks(250)
//!     .seed(42)
//!     .build()
//!     .expect("Valid config");
//! assert_eq!(config.bucket_count(), 4096);
//! ```

use serde::{Deserialize, Serialize};

use super::bucket::ENTRIES_PER_BUCKET;
use super::hash_functions::MAX_BUCKET_POW;
use crate::error::FilterError;

/// Capacity used when zero is requested (256M slots).
pub const DEFAULT_CAPACITY: usize = 1 << 28;

/// Maximum number of kicks before giving up.
pub const DEFAULT_MAX_KICKS: usize = 500;

/// Largest capacity honoured; bigger requests are clamped.
pub const MAX_CAPACITY: usize = ENTRIES_PER_BUCKET << MAX_BUCKET_POW;

/// Cuckoo filter configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CuckooConfig {
    /// Requested capacity in items (0 = `DEFAULT_CAPACITY`), rounded up
    pub capacity: usize,
    /// Relocation bound for a single insert
    pub max_kicks: usize,
    /// Seed for the relocation RNG; `None` seeds from OS entropy
    pub seed: Option<u64>,
}

impl Default for CuckooConfig {
    fn default() -> Self {
        Self {
            capacity: 0,
            max_kicks: DEFAULT_MAX_KICKS,
            seed: None,
        }
    }
}

impl CuckooConfig {
    /// Create a new configuration with validation
    pub fn new(capacity: usize, max_kicks: usize, seed: Option<u64>) -> Result<Self, FilterError> {
        let config = Self {
            capacity,
            max_kicks,
            seed,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    ///
    /// Capacity is never rejected; it is coerced by `bucket_count`.
    pub fn validate(&self) -> Result<(), FilterError> {
        if self.max_kicks == 0 {
            return Err(FilterError::InvalidParameters(
                "max_kicks cannot be 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Number of buckets this configuration allocates.
    ///
    /// Capacity 0 becomes `DEFAULT_CAPACITY`, then it is rounded up to a power
    /// of two and divided by the bucket size. Always at least one bucket.
    pub fn bucket_count(&self) -> usize {
        bucket_count_for(self.capacity)
    }

    /// Builder-style method to set capacity
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Builder-style method to set the relocation bound
    pub fn with_max_kicks(mut self, max_kicks: usize) -> Self {
        self.max_kicks = max_kicks;
        self
    }

    /// Builder-style method to set the RNG seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Bucket count for a requested capacity; see [`CuckooConfig::bucket_count`].
///
/// Never fails, but the clamped maximum of 2^32 buckets is a 16 GiB table;
/// whether that can be allocated depends on the host.
pub fn bucket_count_for(capacity: usize) -> usize {
    let capacity = if capacity == 0 {
        DEFAULT_CAPACITY
    } else {
        capacity.min(MAX_CAPACITY)
    };
    (capacity.next_power_of_two() / ENTRIES_PER_BUCKET).max(1)
}

/// Builder for CuckooConfig with validation
#[derive(Default)]
pub struct CuckooConfigBuilder {
    capacity: Option<usize>,
    max_kicks: Option<usize>,
    seed: Option<u64>,
}

impl CuckooConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set requested capacity in items
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = Some(capacity);
        self
    }

    /// Set the relocation bound (must be > 0)
    pub fn max_kicks(mut self, max_kicks: usize) -> Self {
        self.max_kicks = Some(max_kicks);
        self
    }

    /// Seed the relocation RNG for reproducible layouts
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Build the CuckooConfig, validating all parameters
    pub fn build(self) -> Result<CuckooConfig, FilterError> {
        let config = self.build_unchecked();
        config.validate()?;
        Ok(config)
    }

    /// Build without validation (for internal use only)
    pub fn build_unchecked(self) -> CuckooConfig {
        let defaults = CuckooConfig::default();

        CuckooConfig {
            capacity: self.capacity.unwrap_or(defaults.capacity),
            max_kicks: self.max_kicks.unwrap_or(defaults.max_kicks),
            seed: self.seed.or(defaults.seed),
        }
    }
}
