//! Isomorphism engine: permutation-invariant hashing, exact isomorphism
//! search, canonical forms and fingerprints.

use ord_core::hashing::{hash_pair, hash_sorted};
use ord_core::matrix::Matrix;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::poset::default_labels;
use crate::Poset;

/// Policy controlling when hash equality is trusted as isomorphism.
///
/// Up to `hash_trust_max` elements, equality of the whole-poset hash after
/// two refinement rounds is treated as isomorphism. This is a deliberate,
/// documented approximation with a small residual collision risk; set
/// `strict` to always run the exact bijection search instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquivalencePolicy {
    /// Largest size at which hash equality alone decides isomorphism.
    pub hash_trust_max: usize,
    /// When set, every comparison runs the exact search.
    pub strict: bool,
}

impl Default for EquivalencePolicy {
    fn default() -> Self {
        Self {
            hash_trust_max: 10,
            strict: false,
        }
    }
}

/// Multiset-invariant hash of each element's row and column of `mat`.
fn row_column_hashes(mat: &Matrix<u64>) -> Vec<u64> {
    (0..mat.rows())
        .map(|i| {
            let column: Vec<u64> = mat.column(i).copied().collect();
            let row = mat.row(i).to_vec();
            hash_pair(hash_sorted(&column), hash_sorted(&row))
        })
        .collect()
}

/// Per-element hashes: two rounds of `mat[i,j] += H[i]*H[j]` refinement
/// (wrapping arithmetic) starting from the 0/1 incidence matrix. The round
/// count is fixed; it separates elements the raw incidence alone cannot.
pub(crate) fn element_hashes(leq: &Matrix<bool>) -> Vec<u64> {
    let n = leq.rows();
    let mut working: Matrix<u64> = leq.map(|&v| v as u64);
    let mut hashes = row_column_hashes(&working);
    for _ in 0..2 {
        for i in 0..n {
            for j in 0..n {
                let bump = hashes[i].wrapping_mul(hashes[j]);
                working[(i, j)] = working[(i, j)].wrapping_add(bump);
            }
        }
        hashes = row_column_hashes(&working);
    }
    hashes
}

/// Searches for a relation-preserving bijection from `a` onto `b`.
///
/// The whole-poset hash is a pre-filter; candidates for each element are
/// restricted to targets sharing its per-element hash, then a backtracking
/// search over the candidate sets short-circuits on the first success.
pub(crate) fn find_isomorphism(a: &Poset, b: &Poset) -> Option<Vec<usize>> {
    if a.len() != b.len() || a.structural_hash() != b.structural_hash() {
        return None;
    }
    let n = a.len();
    let source_hashes = a.element_hashes();
    let target_hashes = b.element_hashes();
    let candidates: Vec<Vec<usize>> = source_hashes
        .iter()
        .map(|&h| (0..n).filter(|&j| target_hashes[j] == h).collect())
        .collect();
    if candidates.iter().any(|options: &Vec<usize>| options.is_empty()) {
        return None;
    }
    let mut image = vec![0usize; n];
    let mut used = vec![false; n];
    if place(
        0,
        a.leq_matrix(),
        b.leq_matrix(),
        &candidates,
        &mut image,
        &mut used,
    ) {
        Some(image)
    } else {
        None
    }
}

fn place(
    i: usize,
    a: &Matrix<bool>,
    b: &Matrix<bool>,
    candidates: &[Vec<usize>],
    image: &mut [usize],
    used: &mut [bool],
) -> bool {
    let n = a.rows();
    if i == n {
        return true;
    }
    for &j in &candidates[i] {
        if used[j] {
            continue;
        }
        let consistent = (0..i)
            .all(|k| a[(i, k)] == b[(j, image[k])] && a[(k, i)] == b[(image[k], j)]);
        if !consistent {
            continue;
        }
        image[i] = j;
        used[j] = true;
        if place(i + 1, a, b, candidates, image, used) {
            return true;
        }
        used[j] = false;
    }
    false
}

/// Canonical form: layer elements by height, order each layer by a vector
/// of isomorphism invariants, and reindex by the resulting rank.
pub(crate) fn canonical_form(poset: &Poset) -> Poset {
    let n = poset.len();
    if n == 0 {
        return Poset::empty();
    }
    let heights = poset.heights();
    let parents = poset.parents();
    let children = poset.children();
    let hashes = poset.element_hashes();
    let leq = poset.leq_matrix();
    let labels = poset.labels();

    // Heights are at most n even for degenerate unchecked relations.
    let mut layers: Vec<Vec<usize>> = vec![Vec::new(); n + 1];
    for i in 0..n {
        layers[heights[i]].push(i);
    }
    let mut rank = vec![usize::MAX; n];
    let mut assigned = 0usize;
    for layer in &layers {
        let mut ordered = layer.clone();
        ordered.sort_by_key(|&i| {
            // Covers sit strictly lower, so their ranks are already fixed.
            let mut cover_ranks: Vec<usize> = children[i].iter().map(|&c| rank[c]).collect();
            cover_ranks.sort_unstable();
            (
                cover_ranks,
                parents[i].len(),
                leq.count_column(i),
                leq.count_row(i),
                hashes[i],
                labels[i].clone(),
                i,
            )
        });
        for i in ordered {
            rank[i] = assigned;
            assigned += 1;
        }
    }
    let mut out = Matrix::filled(n, n, false);
    for i in 0..n {
        for j in 0..n {
            if leq[(i, j)] {
                out[(rank[i], rank[j])] = true;
            }
        }
    }
    Poset::assemble(out, default_labels(n))
}

/// Hex SHA-256 digest of the canonical relation: a collision-resistant
/// isomorphism invariant suitable for external identification.
pub fn canonical_fingerprint(poset: &Poset) -> String {
    let canon = poset.canonical();
    let n = canon.len();
    let mut hasher = Sha256::new();
    hasher.update((n as u64).to_le_bytes());
    let leq = canon.leq_matrix();
    for i in 0..n {
        for j in 0..n {
            hasher.update([leq[(i, j)] as u8]);
        }
    }
    format!("{:x}", hasher.finalize())
}

impl Poset {
    /// Isomorphism test under the default [`EquivalencePolicy`].
    pub fn isomorphic(&self, other: &Poset) -> bool {
        self.isomorphic_with(other, &EquivalencePolicy::default())
    }

    /// Isomorphism test under an explicit policy.
    pub fn isomorphic_with(&self, other: &Poset, policy: &EquivalencePolicy) -> bool {
        if self.len() != other.len() {
            return false;
        }
        if !policy.strict && self.len() <= policy.hash_trust_max {
            return self.structural_hash() == other.structural_hash();
        }
        find_isomorphism(self, other).is_some()
    }

    /// Explicit relation-preserving bijection onto `other`, if one exists.
    pub fn find_isomorphism(&self, other: &Poset) -> Option<Vec<usize>> {
        find_isomorphism(self, other)
    }
}
