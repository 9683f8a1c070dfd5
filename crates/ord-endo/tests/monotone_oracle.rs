use std::collections::BTreeSet;

use ord_core::errors::PosetError;
use ord_endo::{is_monotone, monotone_maps, monotone_maps_fixing_bottom, oracle};
use ord_poset::{catalog, Poset};

fn lattice_fixtures() -> Vec<Poset> {
    vec![
        Poset::chain(1),
        Poset::chain(2),
        Poset::chain(3),
        Poset::chain(4),
        catalog::diamond().unwrap(),
        catalog::pentagon().unwrap(),
        catalog::m3().unwrap(),
    ]
}

#[test]
fn monotone_maps_match_the_oracle() {
    for poset in lattice_fixtures() {
        let fast: Vec<Vec<usize>> = monotone_maps(&poset).unwrap().collect();
        let fast_set: BTreeSet<Vec<usize>> = fast.iter().cloned().collect();
        assert_eq!(fast.len(), fast_set.len(), "no duplicates for {poset}");
        let brute: BTreeSet<Vec<usize>> = oracle::monotone_maps(&poset).collect();
        assert_eq!(fast_set, brute, "mismatch for {poset}");
    }
}

#[test]
fn bottom_fixing_maps_match_the_oracle() {
    for poset in lattice_fixtures() {
        let fast: BTreeSet<Vec<usize>> = monotone_maps_fixing_bottom(&poset).unwrap().collect();
        let brute: BTreeSet<Vec<usize>> =
            oracle::monotone_maps_fixing_bottom(&poset).unwrap().collect();
        assert_eq!(fast, brute, "mismatch for {poset}");
        let bottom = poset.bottom().unwrap();
        assert!(fast.iter().all(|f| f[bottom] == bottom));
    }
}

#[test]
fn chain_counts_follow_the_binomial_formula() {
    // Monotone self-maps of an n-chain are weakly increasing n-tuples.
    assert_eq!(monotone_maps(&Poset::chain(3)).unwrap().count(), 10);
    assert_eq!(monotone_maps(&Poset::chain(4)).unwrap().count(), 35);
}

#[test]
fn every_enumerated_map_is_monotone() {
    let n5 = catalog::pentagon().unwrap();
    for f in monotone_maps(&n5).unwrap() {
        assert!(is_monotone(&n5, &f));
    }
}

#[test]
fn empty_domains_yield_zero_maps() {
    assert_eq!(monotone_maps(&Poset::empty()).unwrap().count(), 0);
    assert_eq!(monotone_maps_fixing_bottom(&Poset::empty()).unwrap().count(), 0);
}

#[test]
fn singleton_has_exactly_the_identity() {
    let single = Poset::chain(1);
    let maps: Vec<Vec<usize>> = monotone_maps(&single).unwrap().collect();
    assert_eq!(maps, vec![vec![0]]);
    let pinned: Vec<Vec<usize>> = monotone_maps_fixing_bottom(&single).unwrap().collect();
    assert_eq!(pinned, vec![vec![0]]);
}

#[test]
fn non_lattices_are_rejected_with_a_typed_error() {
    let vee = Poset::from_children(&[vec![], vec![0], vec![0]], None).unwrap();
    assert!(matches!(
        monotone_maps(&vee),
        Err(PosetError::NotALattice { .. })
    ));
}

#[test]
fn is_monotone_rejects_malformed_maps() {
    let chain = Poset::chain(3);
    assert!(!is_monotone(&chain, &[0, 1]));
    assert!(!is_monotone(&chain, &[0, 1, 9]));
    assert!(is_monotone(&chain, &[0, 0, 2]));
    assert!(!is_monotone(&chain, &[1, 0, 2]));
}
