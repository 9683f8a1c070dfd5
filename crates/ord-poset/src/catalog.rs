//! Named lattices used throughout the tests and benches.

use ord_core::errors::PosetError;

use crate::Poset;

/// Four-element diamond: bottom, two incomparable middles, top.
pub fn diamond() -> Result<Poset, PosetError> {
    Poset::from_children(&[vec![], vec![0], vec![0], vec![1, 2]], None)
}

/// Pentagon N5, the smallest non-modular lattice.
pub fn pentagon() -> Result<Poset, PosetError> {
    Poset::from_children(&[vec![], vec![0], vec![0], vec![2], vec![1, 3]], None)
}

/// Diamond M3, three incomparable atoms under one top.
pub fn m3() -> Result<Poset, PosetError> {
    Poset::from_children(&[vec![], vec![0], vec![0], vec![0], vec![1, 2, 3]], None)
}

/// Boolean lattice on `atoms` atoms: the `atoms`-fold product of the
/// two-element chain.
pub fn boolean(atoms: usize) -> Result<Poset, PosetError> {
    Poset::chain(2).product_n(atoms)
}

/// Grid lattice: the product of two chains.
pub fn grid(rows: usize, cols: usize) -> Result<Poset, PosetError> {
    Poset::chain(rows).product(&Poset::chain(cols))
}
