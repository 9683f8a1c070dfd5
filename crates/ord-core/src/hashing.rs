//! Fixed-seed scalar hashing helpers.
//!
//! Structure hashes are compared across separate runs, so the scalar hash
//! must be stable across processes and platforms. SipHash-1-3 with fixed
//! zero keys satisfies this; the resulting hash *values* are an internal
//! detail and not a cross-version stable format.

use siphasher::sip::SipHasher13;
use std::hash::Hasher;

/// Hashes a sequence of words in order.
pub fn hash_sequence(values: &[u64]) -> u64 {
    let mut hasher = SipHasher13::new_with_keys(0, 0);
    hasher.write_u64(values.len() as u64);
    for &value in values {
        hasher.write_u64(value);
    }
    hasher.finish()
}

/// Hashes a sequence of words as a multiset (order independent).
pub fn hash_sorted(values: &[u64]) -> u64 {
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    hash_sequence(&sorted)
}

/// Combines two hashes into one.
pub fn hash_pair(a: u64, b: u64) -> u64 {
    hash_sequence(&[a, b])
}
