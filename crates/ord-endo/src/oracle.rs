//! Exhaustive cross-check enumerators for the test-suite.
//!
//! These walk all `n^n` candidate maps and filter by the pairwise
//! definitions, independently of the backtracking enumerators. They exist
//! purely so the tests can compare outputs; production callers should use
//! the `monotone` and `joins` modules.

use itertools::Itertools;
use ord_core::errors::PosetError;
use ord_poset::Poset;

use crate::joins::pairs_preserved;
use crate::monotone::is_monotone;

/// Every self-map of `0..n`, in lexicographic order.
pub fn all_maps(n: usize) -> impl Iterator<Item = Vec<usize>> {
    (0..n).map(move |_| 0..n).multi_cartesian_product()
}

/// Every monotone self-map, by exhaustive filtering.
pub fn monotone_maps(poset: &Poset) -> impl Iterator<Item = Vec<usize>> + '_ {
    all_maps(poset.len()).filter(move |f| is_monotone(poset, f))
}

/// Every monotone self-map fixing the bottom, by exhaustive filtering.
pub fn monotone_maps_fixing_bottom(
    poset: &Poset,
) -> Result<impl Iterator<Item = Vec<usize>> + '_, PosetError> {
    let bottom = poset.bottom()?;
    Ok(monotone_maps(poset).filter(move |f| f[bottom] == bottom))
}

/// Every map preserving pairwise lubs and fixing the bottom.
pub fn join_maps(
    poset: &Poset,
) -> Result<impl Iterator<Item = Vec<usize>> + '_, PosetError> {
    let lub = poset.lub_table()?;
    let bottom = poset.bottom()?;
    Ok(monotone_maps(poset).filter(move |f| f[bottom] == bottom && pairs_preserved(lub, f)))
}

/// Every monotone map preserving pairwise lubs, bottom unconstrained.
pub fn join_pair_maps(
    poset: &Poset,
) -> Result<impl Iterator<Item = Vec<usize>> + '_, PosetError> {
    let lub = poset.lub_table()?;
    Ok(monotone_maps(poset).filter(move |f| pairs_preserved(lub, f)))
}
