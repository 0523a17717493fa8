//! Domain Layer - Pure logic
//!
//! This layer contains:
//! - Fingerprint and index derivation
//! - Fixed-size buckets
//! - The cuckoo filter table
//! - Flat byte codec
//! - Configuration
//!
//! RULES:
//! - No I/O operations
//! - No async code

pub mod bucket;
pub mod codec;
pub mod config;
pub mod cuckoo;
pub mod hash_functions;

pub use bucket::{Bucket, Fingerprint, EMPTY_SLOT, ENTRIES_PER_BUCKET};
pub use codec::{deserialize, deserialize_with_config, serialize};
pub use config::{CuckooConfig, CuckooConfigBuilder, DEFAULT_CAPACITY, DEFAULT_MAX_KICKS};
pub use cuckoo::CuckooFilter;
pub use hash_functions::{fingerprint, partner_index, primary_index};
