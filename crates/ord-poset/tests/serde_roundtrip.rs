use std::fs;

use ord_core::errors::PosetError;
use ord_poset::{
    catalog, poset_from_bytes, poset_from_json, poset_from_record, poset_to_bytes, poset_to_json,
    poset_to_record, Poset,
};

#[test]
fn record_round_trip_preserves_relation_and_labels() {
    let poset = catalog::pentagon()
        .unwrap()
        .relabel(Some(vec![
            "bot".into(),
            "a".into(),
            "b".into(),
            "c".into(),
            "top".into(),
        ]))
        .unwrap();
    let record = poset_to_record(&poset);
    let back = poset_from_record(record).expect("valid record");
    assert_eq!(&back, &poset);
}

#[test]
fn cached_tables_travel_with_the_record() {
    let poset = catalog::diamond().unwrap();
    let lub_before = poset.lub_table().unwrap().clone();
    let _ = poset.glb_table().unwrap();
    let hash_before = poset.structural_hash();
    let record = poset_to_record(&poset);
    assert!(record.lub.is_some());
    assert!(record.glb.is_some());
    assert!(record.covers.is_some());
    assert_eq!(record.hash, Some(hash_before));
    let back = poset_from_record(record).unwrap();
    assert_eq!(back.lub_table().unwrap(), &lub_before);
    assert_eq!(back.structural_hash(), hash_before);
}

#[test]
fn fresh_posets_export_no_caches() {
    let record = poset_to_record(&Poset::chain(3));
    assert!(record.lub.is_none());
    assert!(record.dist.is_none());
    assert!(record.hash.is_none());
}

#[test]
fn json_round_trip_through_a_file() {
    let poset = catalog::boolean(3).unwrap();
    let json = poset_to_json(&poset).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cube.json");
    fs::write(&path, &json).unwrap();
    let loaded = poset_from_json(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(&loaded, &poset);
    assert!(loaded.isomorphic(&poset));
}

#[test]
fn bytes_round_trip() {
    let poset = catalog::m3().unwrap();
    let _ = poset.lub_table().unwrap();
    let bytes = poset_to_bytes(&poset).unwrap();
    let back = poset_from_bytes(&bytes).unwrap();
    assert_eq!(&back, &poset);
    assert!(back.is_lattice());
}

#[test]
fn empty_poset_round_trips() {
    let empty = Poset::empty();
    let back = poset_from_json(&poset_to_json(&empty).unwrap()).unwrap();
    assert!(back.is_empty());
}

#[test]
fn import_revalidates_the_relation() {
    // 2x2 relation with both off-diagonal entries set: antisymmetry fails.
    let json = r#"{
        "labels": ["0", "1"],
        "leq": { "dtype": "bool", "values": [1, 1, 1, 1] }
    }"#;
    assert!(matches!(
        poset_from_json(json),
        Err(PosetError::NotAPartialOrder { .. })
    ));
}

#[test]
fn import_rejects_misshapen_arrays() {
    let json = r#"{
        "labels": ["0", "1"],
        "leq": { "dtype": "bool", "values": [1, 0, 1] }
    }"#;
    assert!(matches!(
        poset_from_json(json),
        Err(PosetError::InvalidRelationShape(_))
    ));
}

#[test]
fn import_rejects_non_boolean_words() {
    let json = r#"{
        "labels": ["0", "1"],
        "leq": { "dtype": "bool", "values": [1, 7, 0, 1] }
    }"#;
    assert!(matches!(poset_from_json(json), Err(PosetError::Serde(_))));
}

#[test]
fn import_rejects_out_of_range_cached_tables() {
    let json = r#"{
        "labels": ["0", "1"],
        "leq": { "dtype": "bool", "values": [1, 1, 0, 1] },
        "lub": { "dtype": "u64", "values": [0, 9, 9, 1] }
    }"#;
    assert!(matches!(poset_from_json(json), Err(PosetError::Serde(_))));
}
