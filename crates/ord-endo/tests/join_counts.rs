use std::collections::BTreeSet;

use ord_endo::{
    count_join_maps, count_join_maps_distributive, irreducible_components,
    join_endomorphism_lattice, join_maps, join_maps_fixing_bottom, oracle, preserves_join_pairs,
};
use ord_poset::{catalog, Poset};

#[test]
fn four_chain_counts_agree_across_all_three_routes() {
    let chain = Poset::chain(4);
    assert_eq!(chain.irreducibles().len(), 3);
    let closed_form = count_join_maps_distributive(&chain).unwrap();
    let interpolated = join_maps_fixing_bottom(&chain).unwrap().count() as u128;
    let brute = oracle::join_maps(&chain).unwrap().count() as u128;
    assert_eq!(closed_form, 20);
    assert_eq!(closed_form, interpolated);
    assert_eq!(closed_form, brute);
}

#[test]
fn diamond_join_maps_are_free_on_the_two_middles() {
    let diamond = catalog::diamond().unwrap();
    assert_eq!(count_join_maps(&diamond).unwrap(), 16);
    let fast: BTreeSet<Vec<usize>> = join_maps_fixing_bottom(&diamond).unwrap().collect();
    let brute: BTreeSet<Vec<usize>> = oracle::join_maps(&diamond).unwrap().collect();
    assert_eq!(fast, brute);
    assert_eq!(fast.len(), 16);
}

#[test]
fn non_distributive_lattices_filter_against_the_oracle() {
    for poset in [catalog::m3().unwrap(), catalog::pentagon().unwrap()] {
        let fast: BTreeSet<Vec<usize>> = join_maps_fixing_bottom(&poset).unwrap().collect();
        let brute: BTreeSet<Vec<usize>> = oracle::join_maps(&poset).unwrap().collect();
        assert_eq!(fast, brute, "bottom-fixing mismatch for {poset}");
        let fast_free: BTreeSet<Vec<usize>> = join_maps(&poset).unwrap().collect();
        let brute_free: BTreeSet<Vec<usize>> = oracle::join_pair_maps(&poset).unwrap().collect();
        assert_eq!(fast_free, brute_free, "free-bottom mismatch for {poset}");
    }
}

#[test]
fn non_distributive_count_falls_back_to_filtering() {
    let n5 = catalog::pentagon().unwrap();
    let brute = oracle::join_maps(&n5).unwrap().count() as u128;
    assert_eq!(count_join_maps(&n5).unwrap(), brute);
}

#[test]
fn boolean_cube_closed_form_matches_interpolation() {
    let cube = catalog::boolean(3).unwrap();
    let closed_form = count_join_maps_distributive(&cube).unwrap();
    let interpolated = join_maps_fixing_bottom(&cube).unwrap().count() as u128;
    assert_eq!(closed_form, interpolated);
    // Three independent atoms, each free over the eight elements.
    assert_eq!(closed_form, 512);
}

#[test]
fn every_enumerated_map_preserves_pairwise_joins() {
    for poset in [
        catalog::diamond().unwrap(),
        catalog::pentagon().unwrap(),
        catalog::grid(2, 3).unwrap(),
    ] {
        for f in join_maps(&poset).unwrap() {
            assert_eq!(preserves_join_pairs(&poset, &f), Ok(true));
        }
    }
}

#[test]
fn irreducible_components_split_as_expected() {
    let cube = catalog::boolean(3).unwrap();
    let components = irreducible_components(&cube).unwrap();
    assert_eq!(components.len(), 3);
    assert!(components.iter().all(|c| c.len() == 1));

    let chain = Poset::chain(4);
    let components = irreducible_components(&chain).unwrap();
    assert_eq!(components, vec![vec![1, 2, 3]]);

    assert!(irreducible_components(&Poset::chain(1)).unwrap().is_empty());
}

#[test]
fn degenerate_domains_yield_zero_or_the_constant_map() {
    assert_eq!(join_maps(&Poset::empty()).unwrap().count(), 0);
    assert_eq!(join_maps_fixing_bottom(&Poset::empty()).unwrap().count(), 0);
    assert_eq!(count_join_maps(&Poset::empty()).unwrap(), 0);

    let single = Poset::chain(1);
    let maps: Vec<Vec<usize>> = join_maps_fixing_bottom(&single).unwrap().collect();
    assert_eq!(maps, vec![vec![0]]);
    assert_eq!(count_join_maps(&single).unwrap(), 1);
}

#[test]
fn join_endomorphisms_of_the_diamond_form_a_lattice() {
    let diamond = catalog::diamond().unwrap();
    let endos = join_endomorphism_lattice(&diamond).unwrap();
    assert_eq!(endos.len(), 16);
    assert!(endos.is_lattice());
    // The constant-bottom map is the bottom of the endomorphism lattice.
    let bottom = endos.bottom().unwrap();
    assert_eq!(endos.labels()[bottom], "0,0,0,0");
}
