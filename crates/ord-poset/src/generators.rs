//! Deterministic random generators for posets.

use ord_core::errors::PosetError;
use ord_core::rng::RngHandle;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::Poset;

/// Generates a random poset: every upward pair `(i, j)` with `i < j`
/// relates with probability `density`, then the relation is transitively
/// closed. Index order keeps the edge set acyclic, so the closure always
/// validates.
pub fn gen_random_poset(
    n: usize,
    density: f64,
    rng: &mut RngHandle,
) -> Result<Poset, PosetError> {
    let density = density.clamp(0.0, 1.0);
    let mut edges = Vec::new();
    for i in 0..n {
        for j in (i + 1)..n {
            if rng.gen_bool(density) {
                edges.push((i, j));
            }
        }
    }
    Poset::from_up_edges(n, &edges, None)
}

/// Uniformly random permutation of `0..n`.
pub fn gen_random_permutation(n: usize, rng: &mut RngHandle) -> Vec<usize> {
    let mut perm: Vec<usize> = (0..n).collect();
    perm.shuffle(rng);
    perm
}
