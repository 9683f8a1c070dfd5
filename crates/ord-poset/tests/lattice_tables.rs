use ord_core::errors::PosetError;
use ord_poset::{catalog, Poset};

fn diamond() -> Poset {
    Poset::from_children(&[vec![], vec![0], vec![0], vec![1, 2]], None).expect("diamond")
}

#[test]
fn diamond_scenario() {
    let poset = diamond();
    assert!(poset.is_lattice());
    assert_eq!(poset.is_distributive(), Ok(true));
    assert_eq!(poset.lub(1, 2), Ok(3));
    assert_eq!(poset.glb(1, 2), Ok(0));
    assert_eq!(poset.bottoms(), [0]);
    assert_eq!(poset.tops(), [3]);
    assert_eq!(poset.bottom(), Ok(0));
    assert_eq!(poset.top(), Ok(3));
    assert_eq!(poset.irreducibles(), [1, 2]);
}

#[test]
fn lattice_laws_hold_on_the_boolean_cube() {
    let cube = catalog::boolean(3).expect("cube");
    assert_eq!(cube.len(), 8);
    let lub = cube.lub_table().expect("lattice").clone();
    let glb = cube.glb_table().expect("lattice").clone();
    for i in 0..8 {
        assert_eq!(lub[(i, i)], i);
        assert_eq!(glb[(i, i)], i);
        for j in 0..8 {
            assert_eq!(lub[(i, j)], lub[(j, i)]);
            assert_eq!(glb[(i, j)], glb[(j, i)]);
            for k in 0..8 {
                assert_eq!(lub[(lub[(i, j)], k)], lub[(i, lub[(j, k)])]);
                assert_eq!(glb[(glb[(i, j)], k)], glb[(i, glb[(j, k)])]);
            }
        }
    }
}

#[test]
fn boolean_cube_is_distributive() {
    let cube = catalog::boolean(3).expect("cube");
    assert_eq!(cube.distributivity_counterexample(), Ok(None));
    assert!(cube.require_distributive().is_ok());
}

#[test]
fn pentagon_reports_a_reproducible_counterexample() {
    let n5 = catalog::pentagon().expect("pentagon");
    assert!(n5.is_lattice());
    let witness = n5
        .distributivity_counterexample()
        .expect("lattice")
        .expect("pentagon is not distributive");
    let (i, j, k) = witness;
    let lub = n5.lub_table().unwrap();
    let glb = n5.glb_table().unwrap();
    assert_ne!(
        glb[(i, lub[(j, k)])],
        lub[(glb[(i, j)], glb[(i, k)])],
        "witness must replay the violation"
    );
    // Memoized: the witness is stable across queries.
    assert_eq!(n5.distributivity_counterexample().unwrap(), Some(witness));
    match n5.require_distributive() {
        Err(PosetError::NotDistributive { witness: reported, .. }) => {
            assert_eq!(reported, witness)
        }
        other => panic!("expected NotDistributive, got {other:?}"),
    }
}

#[test]
fn m3_is_not_distributive() {
    let m3 = catalog::m3().expect("m3");
    assert!(m3.is_lattice());
    assert_eq!(m3.is_distributive(), Ok(false));
}

#[test]
fn antichain_pairs_lack_upper_bounds() {
    let pair = Poset::antichain(2);
    assert!(!pair.is_lattice());
    match pair.lub_table() {
        Err(PosetError::NotALattice { pair: (i, j), info }) => {
            assert_eq!((i, j), (0, 1));
            assert_eq!(info.code, "no-common-upper-bound");
            assert!(info.relation.is_some());
        }
        other => panic!("expected NotALattice, got {other:?}"),
    }
}

#[test]
fn twin_tops_break_join_uniqueness() {
    // One bottom under two incomparable maximal elements.
    let vee = Poset::from_children(&[vec![], vec![0], vec![0]], None).unwrap();
    assert!(!vee.is_lattice());
    match vee.lub_table() {
        Err(PosetError::NotALattice { pair: (1, 2), .. }) => {}
        other => panic!("expected failure on the maximal pair, got {other:?}"),
    }
}

#[test]
fn extremal_element_errors() {
    assert!(matches!(
        Poset::antichain(2).bottom(),
        Err(PosetError::MultipleBottoms(_))
    ));
    assert!(matches!(
        Poset::antichain(2).top(),
        Err(PosetError::NoTop(_))
    ));
    assert!(matches!(Poset::empty().bottom(), Err(PosetError::NoBottom(_))));
    assert!(matches!(
        Poset::from_children(&[vec![], vec![], vec![0, 1]], None)
            .unwrap()
            .bottom(),
        Err(PosetError::MultipleBottoms(_))
    ));
}

#[test]
fn empty_poset_counts_as_a_lattice() {
    assert!(Poset::empty().is_lattice());
}

#[test]
fn chain_irreducibles_are_everything_but_bottom() {
    let chain = Poset::chain(4);
    assert_eq!(chain.irreducibles(), [1, 2, 3]);
}

#[test]
fn downset_lattice_counts_antichains() {
    // Antichain on 2 elements: downsets {}, {0}, {1}, {0,1}.
    let pair = Poset::antichain(2);
    assert_eq!(pair.count_antichains(), Ok(4));
    let square = pair.downset_lattice().unwrap();
    assert!(square.is_lattice());
    assert_eq!(square.is_distributive(), Ok(true));
    // A chain's downsets are its prefixes plus the empty set.
    assert_eq!(Poset::chain(3).count_antichains(), Ok(4));
}

#[test]
fn irreducible_subposet_recovers_the_base_of_a_boolean_cube() {
    let cube = catalog::boolean(3).expect("cube");
    let base = cube.irreducible_subposet().expect("distributive");
    // The join-irreducibles of the cube are its three atoms.
    assert_eq!(base.len(), 3);
    assert!(base.leq_matrix().values().iter().filter(|&&v| v).count() == 3);
    // Non-distributive lattices refuse.
    let m3 = catalog::m3().unwrap();
    assert!(matches!(
        m3.irreducible_subposet(),
        Err(PosetError::NotDistributive { .. })
    ));
}
