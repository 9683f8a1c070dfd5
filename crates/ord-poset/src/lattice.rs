//! Lattice algebra: extremal elements, bound tables, distributivity, and
//! the down-set lattice.

use std::collections::HashMap;

use ord_core::errors::{ErrorInfo, PosetError};
use ord_core::matrix::Matrix;

use crate::Poset;

/// Elements whose down-set is only themselves (column sum 1).
pub(crate) fn bottoms_of(leq: &Matrix<bool>) -> Vec<usize> {
    let n = leq.rows();
    (0..n).filter(|&i| leq.count_column(i) == 1).collect()
}

/// Elements above everything (column sum n).
pub(crate) fn tops_of(leq: &Matrix<bool>) -> Vec<usize> {
    let n = leq.rows();
    (0..n).filter(|&i| leq.count_column(i) == n).collect()
}

/// Elements with exactly one cover below them.
pub(crate) fn irreducibles_of(poset: &Poset) -> Vec<usize> {
    poset
        .children()
        .iter()
        .enumerate()
        .filter(|(_, covered)| covered.len() == 1)
        .map(|(i, _)| i)
        .collect()
}

/// Least-upper-bound table: for each pair, the set of common upper bounds
/// must equal some element's own up-set; that element is the join.
pub(crate) fn lub_table(poset: &Poset) -> Result<Matrix<usize>, PosetError> {
    let n = poset.len();
    let leq = poset.leq_matrix();
    let mut upset_ids: HashMap<Vec<bool>, usize> = HashMap::with_capacity(n);
    for i in 0..n {
        upset_ids.insert(leq.row(i).to_vec(), i);
    }
    let mut table = Matrix::filled(n, n, 0usize);
    for i in 0..n {
        for j in 0..n {
            let common: Vec<bool> = (0..n).map(|k| leq[(i, k)] && leq[(j, k)]).collect();
            match upset_ids.get(&common) {
                Some(&join) => table[(i, j)] = join,
                None => return Err(lattice_failure(poset, i, j)),
            }
        }
    }
    Ok(table)
}

/// Greatest-lower-bound table: the dual computation over the transposed
/// relation.
pub(crate) fn glb_table(poset: &Poset) -> Result<Matrix<usize>, PosetError> {
    let n = poset.len();
    let leq = poset.leq_matrix();
    let mut downset_ids: HashMap<Vec<bool>, usize> = HashMap::with_capacity(n);
    for i in 0..n {
        let downset: Vec<bool> = (0..n).map(|k| leq[(k, i)]).collect();
        downset_ids.insert(downset, i);
    }
    let mut table = Matrix::filled(n, n, 0usize);
    for i in 0..n {
        for j in 0..n {
            let common: Vec<bool> = (0..n).map(|k| leq[(k, i)] && leq[(k, j)]).collect();
            match downset_ids.get(&common) {
                Some(&meet) => table[(i, j)] = meet,
                None => return Err(lattice_failure(poset, i, j)),
            }
        }
    }
    Ok(table)
}

/// Builds the `NotALattice` error for the pair `(i, j)`, distinguishing the
/// missing-bound cases from the ambiguous-bound cases and reporting the
/// nearest approximate bound together with a first violating element.
fn lattice_failure(poset: &Poset, i: usize, j: usize) -> PosetError {
    let n = poset.len();
    let leq = poset.leq_matrix();
    let above: Vec<usize> = (0..n).filter(|&k| leq[(i, k)] && leq[(j, k)]).collect();
    let below: Vec<usize> = (0..n).filter(|&k| leq[(k, i)] && leq[(k, j)]).collect();
    if above.is_empty() {
        return PosetError::NotALattice {
            pair: (i, j),
            info: ErrorInfo::new(
                "no-common-upper-bound",
                format!("{i} and {j} have no common upper bound"),
            )
            .with_context("left", i)
            .with_context("right", j)
            .with_relation(leq),
        };
    }
    if below.is_empty() {
        return PosetError::NotALattice {
            pair: (i, j),
            info: ErrorInfo::new(
                "no-common-lower-bound",
                format!("{i} and {j} have no common lower bound"),
            )
            .with_context("left", i)
            .with_context("right", j)
            .with_relation(leq),
        };
    }
    // Nearest join candidate: the common upper bound with the smallest
    // down-set; dually for the meet.
    let nearest_up = above
        .iter()
        .copied()
        .min_by_key(|&k| leq.count_column(k))
        .unwrap_or(i);
    if let Some(&stray) = above.iter().find(|&&x| !leq[(nearest_up, x)]) {
        return PosetError::NotALattice {
            pair: (i, j),
            info: ErrorInfo::new(
                "ambiguous-upper-bound",
                format!("{i} lub {j} is not unique: {nearest_up} and {stray} are incomparable candidates"),
            )
            .with_context("left", i)
            .with_context("right", j)
            .with_context("nearest", nearest_up)
            .with_context("witness", stray)
            .with_relation(leq),
        };
    }
    let nearest_down = below
        .iter()
        .copied()
        .max_by_key(|&k| leq.count_column(k))
        .unwrap_or(i);
    if let Some(&stray) = below.iter().find(|&&x| !leq[(x, nearest_down)]) {
        return PosetError::NotALattice {
            pair: (i, j),
            info: ErrorInfo::new(
                "ambiguous-lower-bound",
                format!("{i} glb {j} is not unique: {nearest_down} and {stray} are incomparable candidates"),
            )
            .with_context("left", i)
            .with_context("right", j)
            .with_context("nearest", nearest_down)
            .with_context("witness", stray)
            .with_relation(leq),
        };
    }
    PosetError::NotALattice {
        pair: (i, j),
        info: ErrorInfo::new(
            "unmatched-bound",
            format!("{i} and {j} have bounds matching no element's up-set"),
        )
        .with_context("left", i)
        .with_context("right", j)
        .with_context("nearest", nearest_up)
        .with_relation(leq),
    }
}

/// First triple violating the distributive law, scanning `i` outermost and
/// `(j, k)` row-major so the witness is reproducible.
pub(crate) fn distributive_witness(
    poset: &Poset,
) -> Result<Option<(usize, usize, usize)>, PosetError> {
    let lub = poset.lub_table()?;
    let glb = poset.glb_table()?;
    let n = poset.len();
    for i in 0..n {
        for j in 0..n {
            for k in 0..n {
                if glb[(i, lub[(j, k)])] != lub[(glb[(i, j)], glb[(i, k)])] {
                    return Ok(Some((i, j, k)));
                }
            }
        }
    }
    Ok(None)
}

fn is_strict_subset(a: &[usize], b: &[usize]) -> bool {
    a.len() < b.len() && a.iter().all(|x| b.binary_search(x).is_ok())
}

impl Poset {
    /// Lattice of down-sets: the closure of the principal down-sets under
    /// pairwise union and intersection, ordered by inclusion. Elements are
    /// labelled by their member sets.
    pub fn downset_lattice(&self) -> Result<Poset, PosetError> {
        use std::collections::BTreeSet;
        let n = self.len();
        let leq = self.leq_matrix();
        let mut sets: BTreeSet<Vec<usize>> = BTreeSet::new();
        sets.insert(Vec::new());
        let mut last: BTreeSet<Vec<usize>> = (0..n)
            .map(|j| (0..n).filter(|&i| leq[(i, j)]).collect())
            .collect();
        while !last.is_empty() {
            let mut next = BTreeSet::new();
            for a in &last {
                for b in &last {
                    let mut union = a.clone();
                    union.extend(b.iter().copied());
                    union.sort_unstable();
                    union.dedup();
                    let intersection: Vec<usize> = a
                        .iter()
                        .copied()
                        .filter(|x| b.binary_search(x).is_ok())
                        .collect();
                    for candidate in [union, intersection] {
                        if !sets.contains(&candidate) && !last.contains(&candidate) {
                            next.insert(candidate);
                        }
                    }
                }
            }
            sets.append(&mut last);
            last = next;
        }
        let mut elements: Vec<Vec<usize>> = sets.into_iter().collect();
        elements.sort_by_key(|set| (set.len(), set.clone()));
        let mut edges = Vec::new();
        for (small_idx, small) in elements.iter().enumerate() {
            for (big_idx, big) in elements.iter().enumerate() {
                if is_strict_subset(small, big) {
                    edges.push((small_idx, big_idx));
                }
            }
        }
        let labels: Vec<String> = elements
            .iter()
            .map(|set| {
                let names: Vec<&str> = set.iter().map(|&i| self.labels()[i].as_str()).collect();
                format!("{{{}}}", names.join(","))
            })
            .collect();
        Poset::from_up_edges(elements.len(), &edges, Some(labels))
    }

    /// Number of antichains, via the down-set lattice.
    pub fn count_antichains(&self) -> Result<usize, PosetError> {
        Ok(self.downset_lattice()?.len())
    }

    /// Induced sub-poset of the join-irreducibles of a distributive
    /// lattice.
    pub fn irreducible_subposet(&self) -> Result<Poset, PosetError> {
        self.require_distributive()?;
        let domain = self.irreducibles().to_vec();
        self.induced(&domain)
    }
}
