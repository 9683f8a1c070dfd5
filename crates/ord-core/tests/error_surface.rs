use ord_core::errors::{ErrorInfo, OrderAxiom, PosetError};
use ord_core::matrix::Matrix;

fn sample_info(code: &str, message: &str) -> ErrorInfo {
    ErrorInfo::new(code, message)
        .with_context("left", 0)
        .with_context("right", 1)
}

#[test]
fn shape_error_surface() {
    let err = PosetError::InvalidRelationShape(sample_info("non-square", "matrix is 2x3"));
    assert_eq!(err.info().code, "non-square");
    assert!(err.info().context.contains_key("left"));
}

#[test]
fn axiom_error_surface() {
    let relation = Matrix::from_fn(2, 2, |i, j| i == j || (i == 0 && j == 1));
    let err = PosetError::NotAPartialOrder {
        axiom: OrderAxiom::Transitivity,
        info: sample_info("missing-pair", "composition adds a pair").with_relation(&relation),
    };
    let snapshot = err.info().relation.as_ref().expect("relation snapshot");
    assert_eq!(snapshot.n, 2);
    assert_eq!(snapshot.entries.len(), 4);
    assert!(err.to_string().contains("transitivity"));
}

#[test]
fn lattice_error_surface() {
    let err = PosetError::NotALattice {
        pair: (1, 2),
        info: sample_info("no-common-upper-bound", "1 and 2 share no upper bound"),
    };
    match err {
        PosetError::NotALattice { pair, .. } => assert_eq!(pair, (1, 2)),
        _ => unreachable!(),
    }
}

#[test]
fn distributive_error_surface() {
    let err = PosetError::NotDistributive {
        witness: (1, 2, 3),
        info: sample_info("law-violated", "meet fails to distribute"),
    };
    assert_eq!(err.info().code, "law-violated");
}

#[test]
fn error_round_trips_through_json() {
    let err = PosetError::MultipleBottoms(sample_info("two-minima", "bottoms: [0, 1]"));
    let json = serde_json::to_string(&err).expect("serialize");
    let decoded: PosetError = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(decoded, err);
}

#[test]
fn hint_is_rendered() {
    let err = PosetError::InvalidPermutation(
        ErrorInfo::new("bad-perm", "map is not a bijection").with_hint("indices must cover 0..n"),
    );
    assert!(err.to_string().contains("indices must cover 0..n"));
}
