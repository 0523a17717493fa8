//! Fingerprint and bucket index derivation
//!
//! Uses MurmurHash3 for fast, high-quality hashing. The fingerprint and the
//! primary index come from two different hashes (32-bit and 128-bit
//! variants) so the two candidate buckets stay uncorrelated.
//!
//! INVARIANTS:
//! - A fingerprint is never zero (zero marks an empty slot)
//! - `partner_index(partner_index(i, fp), fp) == i` for every masked `i`

use std::io::Cursor;

use lazy_static::lazy_static;
use rand::Rng;

use super::bucket::Fingerprint;

/// Widest table supported: the primary index carries 32 hash bits.
pub const MAX_BUCKET_POW: u32 = 32;

const FINGERPRINT_SEED: u32 = 0;
const INDEX_SEED: u32 = 0;

lazy_static! {
    /// Hash of every possible fingerprint value, computed once per process.
    static ref FINGERPRINT_HASHES: [u32; 256] = {
        let mut table = [0u32; 256];
        for (fp, slot) in table.iter_mut().enumerate() {
            *slot = murmur_hash32(&[fp as u8], FINGERPRINT_SEED);
        }
        table
    };
}

/// 32-bit MurmurHash3 of `element`
pub fn murmur_hash32(element: &[u8], seed: u32) -> u32 {
    let mut cursor = Cursor::new(element);
    // Reading from an in-memory slice cannot fail
    murmur3::murmur3_32(&mut cursor, seed).unwrap_or(0)
}

/// 128-bit MurmurHash3 (x64 variant) of `element`
pub fn murmur_hash128(element: &[u8], seed: u32) -> u128 {
    let mut cursor = Cursor::new(element);
    murmur3::murmur3_x64_128(&mut cursor, seed).unwrap_or(0)
}

/// Low `bucket_pow` bits set
#[inline]
pub fn mask(bucket_pow: u32) -> usize {
    debug_assert!(bucket_pow <= MAX_BUCKET_POW);
    (1usize << bucket_pow) - 1
}

/// Derive the fingerprint of a key, in `[1, 255]`.
#[inline]
pub fn fingerprint(key: &[u8]) -> Fingerprint {
    (murmur_hash32(key, FINGERPRINT_SEED) % 255 + 1) as Fingerprint
}

/// Derive the primary bucket index of a key, in `[0, 2^bucket_pow)`.
///
/// Takes the top 32 bits of the 128-bit hash; the fingerprint never sees them.
#[inline]
pub fn primary_index(key: &[u8], bucket_pow: u32) -> usize {
    let high = (murmur_hash128(key, INDEX_SEED) >> 96) as u32;
    high as usize & mask(bucket_pow)
}

/// Alternate bucket for a fingerprint stored at `index`.
///
/// Partial-key cuckoo hashing: `i2 = i1 ^ hash(fp)`. Applying it twice with the
/// same fingerprint returns the original index.
#[inline]
pub fn partner_index(index: usize, fp: Fingerprint, bucket_pow: u32) -> usize {
    let mask = mask(bucket_pow);
    let fp_hash = FINGERPRINT_HASHES[fp as usize] as usize & mask;
    (index & mask) ^ fp_hash
}

/// Uniformly pick one of two candidate buckets.
#[inline]
pub fn pick_either<R: Rng + ?Sized>(i1: usize, i2: usize, rng: &mut R) -> usize {
    if rng.gen::<bool>() {
        i1
    } else {
        i2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_murmur3_hash_deterministic() {
        let key = b"test_key_0xABCD";
        assert_eq!(murmur_hash32(key, 7), murmur_hash32(key, 7));
        assert_eq!(murmur_hash128(key, 7), murmur_hash128(key, 7));
    }

    #[test]
    fn test_murmur3_different_seed_different_output() {
        let key = b"test_key_0xABCD";
        assert_ne!(murmur_hash32(key, 0), murmur_hash32(key, 1));
        assert_ne!(murmur_hash128(key, 0), murmur_hash128(key, 1));
    }

    #[test]
    fn test_fingerprint_never_zero() {
        for i in 0..10_000 {
            let key = format!("key_{}", i);
            assert_ne!(fingerprint(key.as_bytes()), 0, "key {} got empty fingerprint", key);
        }
        assert_ne!(fingerprint(b""), 0);
    }

    #[test]
    fn test_fingerprint_uses_full_range() {
        let mut seen = [false; 256];
        for i in 0..20_000 {
            let key = format!("fp_{}", i);
            seen[fingerprint(key.as_bytes()) as usize] = true;
        }
        assert!(!seen[0]);
        let distinct = seen.iter().filter(|&&s| s).count();
        assert_eq!(distinct, 255, "every non-zero fingerprint should occur");
    }

    #[test]
    fn test_mask() {
        assert_eq!(mask(0), 0);
        assert_eq!(mask(1), 1);
        assert_eq!(mask(10), 1023);
        assert_eq!(mask(32), u32::MAX as usize);
    }

    #[test]
    fn test_primary_index_within_bounds() {
        for pow in [0u32, 1, 4, 10, 20] {
            for i in 0..500 {
                let key = format!("bound_{}", i);
                assert!(primary_index(key.as_bytes(), pow) < (1usize << pow));
            }
        }
    }

    #[test]
    fn test_primary_index_does_not_collapse() {
        // A shift as wide as the hash would send every key to bucket 0
        let pow = 10;
        let distinct: std::collections::HashSet<_> = (0..2000)
            .map(|i| primary_index(format!("spread_{}", i).as_bytes(), pow))
            .collect();
        assert!(
            distinct.len() > 800,
            "only {} distinct primary buckets for 2000 keys",
            distinct.len()
        );
    }

    #[test]
    fn test_primary_index_uniformity() {
        let pow = 10;
        let groups = 16;
        let per_group = (1usize << pow) / groups;
        let mut counts = vec![0usize; groups];

        for i in 0..16_000 {
            let key = format!("element_{}", i);
            counts[primary_index(key.as_bytes(), pow) / per_group] += 1;
        }

        // ~1000 per group; allow 30% variance
        for (group, count) in counts.iter().enumerate() {
            assert!(
                (700..=1300).contains(count),
                "group {} has {} keys, expected ~1000",
                group,
                count
            );
        }
    }

    #[test]
    fn test_partner_index_is_self_inverse() {
        for pow in [0u32, 1, 3, 12, 32] {
            for fp in 1..=255u8 {
                for i in [0usize, 1, 5, 77, 4095, 123_456] {
                    let i = i & mask(pow);
                    let j = partner_index(i, fp, pow);
                    assert!(j <= mask(pow));
                    assert_eq!(partner_index(j, fp, pow), i);
                }
            }
        }
    }

    #[test]
    fn test_partner_index_masks_input() {
        let pow = 4;
        let fp = 42;
        assert_eq!(partner_index(0xFF03, fp, pow), partner_index(0x03, fp, pow));
    }

    #[test]
    fn test_pick_either_returns_both() {
        let mut rng = StdRng::seed_from_u64(7);
        let picks: Vec<_> = (0..64).map(|_| pick_either(3, 9, &mut rng)).collect();
        assert!(picks.iter().all(|&p| p == 3 || p == 9));
        assert!(picks.contains(&3));
        assert!(picks.contains(&9));
    }
}
