//! Flat byte codec for cuckoo filters
//!
//! Layout: `bucket_count * 4` bytes, bucket-major then slot-minor, each byte a
//! raw fingerprint with 0 for an empty slot. No header, version tag or
//! checksum; the bucket count is recovered as `len / 4`.
//!
//! The item count is not stored. Decoding recomputes it from the non-zero
//! bytes, so a corrupted stream yields a wrong but self-consistent filter.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::debug;

use super::bucket::{Bucket, Fingerprint, ENTRIES_PER_BUCKET};
use super::config::CuckooConfig;
use super::cuckoo::CuckooFilter;
use super::hash_functions::MAX_BUCKET_POW;
use crate::error::FilterError;

/// Encode the filter's buckets into a flat byte vector.
pub fn serialize(filter: &CuckooFilter) -> Vec<u8> {
    filter.with_buckets(encode_buckets)
}

/// Decode a filter using the default configuration.
pub fn deserialize(bytes: &[u8]) -> Result<CuckooFilter, FilterError> {
    deserialize_with_config(bytes, CuckooConfig::default())
}

/// Decode a filter, taking `max_kicks` and `seed` from `config`.
///
/// The configured capacity is ignored; the bytes define the table size.
pub fn deserialize_with_config(
    bytes: &[u8],
    config: CuckooConfig,
) -> Result<CuckooFilter, FilterError> {
    let buckets = decode_buckets(bytes)?;
    debug!(bytes = bytes.len(), bucket_count = buckets.len(), "decoding cuckoo filter");
    Ok(CuckooFilter::from_buckets(buckets, config))
}

/// Raw slot bytes of a bucket array.
pub fn encode_buckets(buckets: &[Bucket]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(buckets.len() * ENTRIES_PER_BUCKET);
    for bucket in buckets {
        bytes.extend_from_slice(bucket.as_bytes());
    }
    bytes
}

/// Rebuild a bucket array from raw slot bytes.
///
/// The length must be `4 * 2^k` for some `k <= MAX_BUCKET_POW`.
pub fn decode_buckets(bytes: &[u8]) -> Result<Vec<Bucket>, FilterError> {
    let malformed = || FilterError::MalformedLength {
        len: bytes.len(),
        bucket_size: ENTRIES_PER_BUCKET,
    };

    if bytes.len() % ENTRIES_PER_BUCKET != 0 {
        return Err(malformed());
    }
    let bucket_count = bytes.len() / ENTRIES_PER_BUCKET;
    if !bucket_count.is_power_of_two() || bucket_count.trailing_zeros() > MAX_BUCKET_POW {
        return Err(malformed());
    }

    Ok(bytes
        .chunks_exact(ENTRIES_PER_BUCKET)
        .map(|chunk| {
            let mut entries = [0 as Fingerprint; ENTRIES_PER_BUCKET];
            entries.copy_from_slice(chunk);
            Bucket::from_bytes(entries)
        })
        .collect())
}

impl CuckooFilter {
    /// See [`serialize`].
    pub fn to_bytes(&self) -> Vec<u8> {
        serialize(self)
    }

    /// See [`deserialize`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, FilterError> {
        deserialize(bytes)
    }
}

/// Serde support: the filter travels as its flat byte layout
impl Serialize for CuckooFilter {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_bytes(&self.to_bytes())
    }
}

impl<'de> Deserialize<'de> for CuckooFilter {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let bytes: Vec<u8> = Deserialize::deserialize(deserializer)?;
        deserialize(&bytes).map_err(D::Error::custom)
    }
}
