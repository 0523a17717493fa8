//! Fixed-size fingerprint bucket
//!
//! Local primitives only. Synchronisation belongs to the filter table.

/// Entries per bucket.
pub const ENTRIES_PER_BUCKET: usize = 4;

/// Value of an empty slot. Never a valid fingerprint.
pub const EMPTY_SLOT: Fingerprint = 0;

/// Fingerprint stored in each slot, in `[1, 255]`.
pub type Fingerprint = u8;

/// A bucket containing multiple fingerprints.
///
/// Slots are unordered and duplicates are allowed: two keys may share a
/// fingerprint and both live in the same bucket.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Bucket {
    entries: [Fingerprint; ENTRIES_PER_BUCKET],
}

impl Bucket {
    /// Bucket built from raw slot bytes.
    pub const fn from_bytes(entries: [Fingerprint; ENTRIES_PER_BUCKET]) -> Self {
        Self { entries }
    }

    /// Raw slot bytes, empty slots included.
    pub fn as_bytes(&self) -> &[Fingerprint; ENTRIES_PER_BUCKET] {
        &self.entries
    }

    /// Insert fingerprint if there's an empty slot.
    pub fn insert(&mut self, fp: Fingerprint) -> bool {
        for entry in &mut self.entries {
            if *entry == EMPTY_SLOT {
                *entry = fp;
                return true;
            }
        }
        false
    }

    /// Clear one copy of the fingerprint, if present.
    pub fn delete(&mut self, fp: Fingerprint) -> bool {
        for entry in &mut self.entries {
            if *entry == fp {
                *entry = EMPTY_SLOT;
                return true;
            }
        }
        false
    }

    /// Check if fingerprint exists.
    pub fn contains(&self, fp: Fingerprint) -> bool {
        self.entries.contains(&fp)
    }

    /// Slot holding the first copy of `fp`.
    pub fn position(&self, fp: Fingerprint) -> Option<usize> {
        self.entries.iter().position(|&e| e == fp)
    }

    /// Replace the fingerprint in `slot`, returning the evicted one.
    ///
    /// # Panics
    /// If `slot >= ENTRIES_PER_BUCKET`.
    pub fn swap(&mut self, slot: usize, fp: Fingerprint) -> Fingerprint {
        std::mem::replace(&mut self.entries[slot], fp)
    }

    pub fn reset(&mut self) {
        self.entries = [EMPTY_SLOT; ENTRIES_PER_BUCKET];
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.entries.iter().filter(|&&e| e != EMPTY_SLOT).count()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.iter().all(|&e| e == EMPTY_SLOT)
    }

    pub fn is_full(&self) -> bool {
        self.entries.iter().all(|&e| e != EMPTY_SLOT)
    }
}
