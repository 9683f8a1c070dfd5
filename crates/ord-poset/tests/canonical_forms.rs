use ord_core::rng::RngHandle;
use ord_poset::generators::{gen_random_permutation, gen_random_poset};
use ord_poset::{catalog, Poset};

#[test]
fn canonical_form_is_isomorphic_to_the_original() {
    let n5 = catalog::pentagon().unwrap();
    let canon = n5.canonical();
    assert_eq!(canon.len(), n5.len());
    assert_eq!(canon.structural_hash(), n5.structural_hash());
    assert!(n5.find_isomorphism(canon).is_some());
}

#[test]
fn canonical_form_is_idempotent() {
    for poset in [
        catalog::diamond().unwrap(),
        catalog::pentagon().unwrap(),
        catalog::m3().unwrap(),
        catalog::boolean(3).unwrap(),
        Poset::chain(5),
        Poset::antichain(4),
    ] {
        let once = poset.canonical().clone();
        let twice = once.canonical().clone();
        assert_eq!(once.leq_matrix(), twice.leq_matrix());
    }
}

#[test]
fn canonical_form_erases_the_indexing() {
    for (poset, perm) in [
        (catalog::diamond().unwrap(), vec![2, 0, 3, 1]),
        (catalog::pentagon().unwrap(), vec![4, 2, 0, 1, 3]),
        (catalog::boolean(3).unwrap(), vec![7, 0, 3, 1, 6, 2, 5, 4]),
    ] {
        let shuffled = poset.reindex(&perm).unwrap();
        assert_eq!(
            poset.canonical().leq_matrix(),
            shuffled.canonical().leq_matrix()
        );
    }
}

#[test]
fn canonical_form_erases_random_indexing() {
    for seed in 0..16 {
        let mut rng = RngHandle::from_seed(500 + seed);
        let poset = gen_random_poset(6, 0.4, &mut rng).unwrap();
        let perm = gen_random_permutation(6, &mut rng);
        let shuffled = poset.reindex(&perm).unwrap();
        assert_eq!(
            poset.canonical().leq_matrix(),
            shuffled.canonical().leq_matrix(),
            "seed {seed}"
        );
    }
}

#[test]
fn canonical_routes_meet_for_equal_structures() {
    let diamond = catalog::diamond().unwrap();
    let square = Poset::chain(2).product(&Poset::chain(2)).unwrap();
    assert_eq!(
        diamond.canonical().leq_matrix(),
        square.canonical().leq_matrix()
    );
}

#[test]
fn canonical_form_carries_default_labels() {
    let relabeled = catalog::diamond()
        .unwrap()
        .relabel(Some(vec!["w".into(), "x".into(), "y".into(), "z".into()]))
        .unwrap();
    assert_eq!(relabeled.canonical().labels(), ["0", "1", "2", "3"]);
}
