//! Inbound Ports (Driving Ports)
//!
//! The API that callers use to work with an approximate-membership filter,
//! independent of the concrete table behind it.

use crate::domain::CuckooFilter;
use crate::error::FilterError;

/// Approximate set membership with deletion (Driving Port)
///
/// Implementations must never report a false negative for a key whose
/// `insert` succeeded and that has not been deleted since.
pub trait MembershipFilter: Send + Sync {
    /// Admit a key; fails when the filter is practically full
    fn insert(&self, key: &[u8]) -> Result<(), FilterError>;

    /// `true` if the key may be present, `false` if it definitely is not
    fn contains(&self, key: &[u8]) -> bool;

    /// Remove one copy of a previously inserted key
    fn delete(&self, key: &[u8]) -> bool;

    /// Remove every key
    fn reset(&self);

    /// Number of stored fingerprints
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl MembershipFilter for CuckooFilter {
    fn insert(&self, key: &[u8]) -> Result<(), FilterError> {
        CuckooFilter::insert(self, key)
    }

    fn contains(&self, key: &[u8]) -> bool {
        CuckooFilter::contains(self, key)
    }

    fn delete(&self, key: &[u8]) -> bool {
        CuckooFilter::delete(self, key)
    }

    fn reset(&self) {
        CuckooFilter::reset(self)
    }

    fn len(&self) -> usize {
        CuckooFilter::len(self)
    }
}
