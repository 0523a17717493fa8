//! Error types for the cuckoo filter

use thiserror::Error;

/// Errors that can occur while operating on a cuckoo filter
///
/// Lookups and deletes never fail; they report their outcome as `bool`.
/// Construction never fails either: an out-of-range capacity is coerced.
/// Allocating the coerced table can still exhaust memory.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FilterError {
    /// The relocation loop ran `max_kicks` times without finding a free slot.
    ///
    /// The filter is near its practical load limit (~95% for 4-slot buckets).
    /// Retrying the same key will most likely fail again.
    #[error("Filter is full: no free slot after {max_kicks} relocations")]
    InsertFailure { max_kicks: usize },

    /// Serialized input does not describe a power-of-two number of buckets.
    #[error(
        "Malformed filter bytes: expected a power-of-two multiple of {bucket_size}, got {len} bytes"
    )]
    MalformedLength { len: usize, bucket_size: usize },

    #[error("Invalid filter parameters: {0}")]
    InvalidParameters(String),
}

impl FilterError {
    /// True when the error means the filter has no more room.
    pub fn is_full(&self) -> bool {
        matches!(self, FilterError::InsertFailure { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = FilterError::InsertFailure { max_kicks: 500 };
        assert_eq!(
            err.to_string(),
            "Filter is full: no free slot after 500 relocations"
        );
        assert!(err.is_full());

        let err = FilterError::MalformedLength {
            len: 7,
            bucket_size: 4,
        };
        assert!(err.to_string().contains("got 7 bytes"));
        assert!(!err.is_full());
    }
}
