//! # Cuckoo Filter
//!
//! Approximate set membership with deletion, a bounded false-positive rate
//! and O(1) expected-time operations.
//!
//! ## Architecture
//!
//! This crate follows Hexagonal Architecture (Ports & Adapters):
//!
//! - **Domain Layer** (`domain/`): Pure logic, no I/O
//!   - `hash_functions`: fingerprint, primary and partner index derivation
//!   - `Bucket`: four fingerprint slots with local insert/delete/lookup
//!   - `CuckooFilter`: bucket table, bounded relocation, locking
//!   - `codec`: flat byte serialization
//!   - `CuckooConfig` / `CuckooConfigBuilder`: configuration with validation
//!
//! - **Ports Layer** (`ports/`): Trait definitions
//!   - `MembershipFilter`: Driving port (inbound API)
//!
//! - **Metrics** (`metrics`): counters and the `MetricsRecorder` hook
//!
//! ## Invariants
//!
//! - **INVARIANT-1**: bucket count is always a power of two
//! - **INVARIANT-2**: `len()` equals the number of occupied slots
//! - **INVARIANT-3**: a fingerprint in bucket `i` has `i` as its primary or partner index
//! - **INVARIANT-4**: No false negatives - if inserted, contains() MUST return true
//!
//! ## Usage Example
//!
//! ```
//! use cuckoo_filter::{CuckooConfigBuilder, CuckooFilter};
//!
//! let config = CuckooConfigBuilder::new()
//!     .capacity(10_000)
//!     .build()
//!     .unwrap();
//! let filter = CuckooFilter::with_config(config);
//!
//! filter.insert("BTC").unwrap();
//! filter.insert("ETH").unwrap();
//! assert!(filter.contains("BTC"));
//! assert!(filter.delete("ETH"));
//! assert_eq!(filter.len(), 1);
//!
//! // Flat byte layout: one byte per slot
//! let bytes = filter.to_bytes();
//! let restored = CuckooFilter::from_bytes(&bytes).unwrap();
//! assert!(restored.contains("BTC"));
//! ```

pub mod domain;
pub mod error;
pub mod metrics;
pub mod ports;

// Re-exports for convenience
pub use domain::{
    deserialize, serialize, Bucket, CuckooConfig, CuckooConfigBuilder, CuckooFilter, Fingerprint,
    ENTRIES_PER_BUCKET,
};
pub use error::FilterError;
pub use metrics::{Metrics, MetricsRecorder, MetricsSnapshot, NoOpMetrics};
pub use ports::MembershipFilter;
