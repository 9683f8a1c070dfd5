//! Grow-by-one operations on lattices and their legality predicate.

use ord_core::errors::{ErrorInfo, PosetError};
use ord_core::matrix::Matrix;
use ord_poset::Poset;

fn ensure_indices(poset: &Poset, lower: usize, upper: usize) -> Result<(), PosetError> {
    let n = poset.len();
    if lower >= n || upper >= n {
        return Err(PosetError::IncompatibleDomain(
            ErrorInfo::new("index-out-of-range", "pair names a missing element")
                .with_context("lower", lower)
                .with_context("upper", upper)
                .with_context("size", n),
        ));
    }
    Ok(())
}

/// Legality is only defined over lattices; this makes the precondition an
/// explicit checked boundary rather than a caller obligation.
fn ensure_lattice(poset: &Poset) -> Result<(), PosetError> {
    if poset.is_empty() {
        return Ok(());
    }
    poset.lub_table()?;
    poset.bottom()?;
    Ok(())
}

/// Pairs `(a, b)` such that relating `a <= b` would break either the
/// partial order or lub uniqueness. Diagonal and downward pairs are
/// forbidden; already-related pairs are legal no-ops; for incomparable
/// pairs the lub table is probed for a pair of bounds the addition would
/// leave incomparable.
pub fn forbidden_pairs(poset: &Poset) -> Result<Matrix<bool>, PosetError> {
    ensure_lattice(poset)?;
    let n = poset.len();
    let leq = poset.leq_matrix();
    let lub = poset.lub_table()?;
    let nocmp = Matrix::from_fn(n, n, |i, j| !leq[(i, j)] && !leq[(j, i)]);
    let mut forbidden = Matrix::filled(n, n, false);
    for a in 0..n {
        let lower: Vec<usize> = (0..n).filter(|&x| leq[(x, a)]).collect();
        for b in 0..n {
            forbidden[(a, b)] = if leq[(b, a)] {
                true
            } else if leq[(a, b)] {
                false
            } else {
                let risky: Vec<usize> = (0..n)
                    .filter(|&y| !leq[(b, y)] && nocmp[(y, a)])
                    .collect();
                risky
                    .iter()
                    .any(|&y| lower.iter().any(|&x| nocmp[(lub[(x, y)], lub[(b, y)])]))
            };
        }
    }
    Ok(forbidden)
}

/// Adds the relation `lower <= upper`, closing transitively, and
/// revalidates the result through the checked constructor.
pub fn add_relation(poset: &Poset, lower: usize, upper: usize) -> Result<Poset, PosetError> {
    ensure_indices(poset, lower, upper)?;
    let n = poset.len();
    let leq = poset.leq_matrix();
    let grown = Matrix::from_fn(n, n, |a, b| {
        leq[(a, b)] || (leq[(a, lower)] && leq[(upper, b)])
    });
    Poset::new(grown, Some(poset.labels().to_vec()))
}

/// Inserts one new element strictly between `lower` and `upper`. The new
/// element sits above everything at or below `lower` and below everything
/// at or above `upper`; the relation `lower <= upper` is closed in.
pub fn insert_between(poset: &Poset, lower: usize, upper: usize) -> Result<Poset, PosetError> {
    ensure_indices(poset, lower, upper)?;
    let n = poset.len();
    let leq = poset.leq_matrix();
    let grown = Matrix::from_fn(n + 1, n + 1, |a, b| match (a == n, b == n) {
        (true, true) => true,
        (true, false) => leq[(upper, b)],
        (false, true) => leq[(a, lower)],
        (false, false) => leq[(a, b)] || (leq[(a, lower)] && leq[(upper, b)]),
    });
    Poset::new(grown, None)
}

/// Every legal single-relation addition between currently incomparable
/// pairs.
pub fn edge_successors(poset: &Poset) -> Result<Vec<Poset>, PosetError> {
    let forbidden = forbidden_pairs(poset)?;
    let n = poset.len();
    let leq = poset.leq_matrix();
    let mut grown = Vec::new();
    for lower in 0..n {
        for upper in 0..n {
            if !forbidden[(lower, upper)] && !leq[(lower, upper)] {
                grown.push(add_relation(poset, lower, upper)?);
            }
        }
    }
    Ok(grown)
}

/// Every legal single-node insertion strictly between two elements.
pub fn node_successors(poset: &Poset) -> Result<Vec<Poset>, PosetError> {
    let forbidden = forbidden_pairs(poset)?;
    let n = poset.len();
    let mut grown = Vec::new();
    for lower in 0..n {
        for upper in 0..n {
            if !forbidden[(lower, upper)] {
                grown.push(insert_between(poset, lower, upper)?);
            }
        }
    }
    Ok(grown)
}
