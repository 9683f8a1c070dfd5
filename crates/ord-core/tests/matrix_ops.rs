use ord_core::matrix::Matrix;

#[test]
fn compose_is_boolean_product() {
    // 0 -> 1 -> 2 as an adjacency matrix.
    let step = Matrix::from_fn(3, 3, |i, j| j == i + 1);
    let two_steps = step.compose(&step);
    assert!(two_steps[(0, 2)]);
    assert!(!two_steps[(0, 1)]);
    assert!(!two_steps[(1, 2)]);
}

#[test]
fn transitive_closure_reaches_fixpoint() {
    let step = Matrix::from_fn(5, 5, |i, j| j == i + 1);
    let closure = Matrix::identity(5).or(&step).transitive_closure();
    for i in 0..5 {
        for j in 0..5 {
            assert_eq!(closure[(i, j)], i <= j, "closure[{i},{j}]");
        }
    }
}

#[test]
fn transpose_swaps_indices() {
    let mat = Matrix::from_fn(2, 3, |i, j| i * 3 + j);
    let t = mat.transposed();
    assert_eq!((t.rows(), t.cols()), (3, 2));
    for i in 0..2 {
        for j in 0..3 {
            assert_eq!(mat[(i, j)], t[(j, i)]);
        }
    }
}

#[test]
fn ragged_rows_are_rejected() {
    let result = Matrix::from_rows(vec![vec![true, false], vec![true]]);
    assert!(result.is_err());
}

#[test]
fn row_and_column_counts() {
    let mat = Matrix::from_fn(3, 3, |i, j| i <= j);
    assert_eq!(mat.count_row(0), 3);
    assert_eq!(mat.count_column(0), 1);
    assert_eq!(mat.count_column(2), 3);
}
