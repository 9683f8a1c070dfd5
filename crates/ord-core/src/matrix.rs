//! Dense row-major matrix container used for relation algebra.

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, PosetError};

/// Dense row-major matrix.
///
/// All relation algebra in the engine runs over small n×n matrices, so the
/// representation favours simplicity over sparsity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Matrix<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T: Clone> Matrix<T> {
    /// Creates a matrix with every entry set to `value`.
    pub fn filled(rows: usize, cols: usize, value: T) -> Self {
        Self {
            rows,
            cols,
            data: vec![value; rows * cols],
        }
    }

    /// Creates a matrix from a per-entry function.
    pub fn from_fn(rows: usize, cols: usize, mut entry: impl FnMut(usize, usize) -> T) -> Self {
        let mut data = Vec::with_capacity(rows * cols);
        for i in 0..rows {
            for j in 0..cols {
                data.push(entry(i, j));
            }
        }
        Self { rows, cols, data }
    }

    /// Creates a matrix from nested row vectors, rejecting ragged input.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self, PosetError> {
        let n_rows = rows.len();
        let n_cols = rows.first().map(Vec::len).unwrap_or(0);
        let mut data = Vec::with_capacity(n_rows * n_cols);
        for (idx, row) in rows.into_iter().enumerate() {
            if row.len() != n_cols {
                return Err(PosetError::InvalidRelationShape(
                    ErrorInfo::new("ragged-rows", "matrix rows have differing lengths")
                        .with_context("row", idx)
                        .with_context("expected", n_cols)
                        .with_context("found", row.len()),
                ));
            }
            data.extend(row);
        }
        Ok(Self {
            rows: n_rows,
            cols: n_cols,
            data,
        })
    }

    /// Returns the transposed matrix.
    pub fn transposed(&self) -> Self {
        Self::from_fn(self.cols, self.rows, |i, j| self[(j, i)].clone())
    }

    /// Applies `f` to every entry, producing a new matrix.
    pub fn map<U: Clone>(&self, mut f: impl FnMut(&T) -> U) -> Matrix<U> {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(&mut f).collect(),
        }
    }
}

impl<T> Matrix<T> {
    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Whether the matrix is square.
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Borrows row `i` as a slice.
    pub fn row(&self, i: usize) -> &[T] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    /// Iterates over column `j`.
    pub fn column(&self, j: usize) -> impl Iterator<Item = &T> + '_ {
        (0..self.rows).map(move |i| &self[(i, j)])
    }

    /// Borrows the flattened row-major entries.
    pub fn values(&self) -> &[T] {
        &self.data
    }
}

impl<T> std::ops::Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    fn index(&self, (i, j): (usize, usize)) -> &T {
        &self.data[i * self.cols + j]
    }
}

impl<T> std::ops::IndexMut<(usize, usize)> for Matrix<T> {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut T {
        &mut self.data[i * self.cols + j]
    }
}

impl Matrix<bool> {
    /// Identity relation on `n` elements.
    pub fn identity(n: usize) -> Self {
        Self::from_fn(n, n, |i, j| i == j)
    }

    /// Boolean matrix product: `out[i,j]` iff some `k` has
    /// `self[i,k] && other[k,j]`.
    pub fn compose(&self, other: &Self) -> Self {
        debug_assert_eq!(self.cols, other.rows);
        Self::from_fn(self.rows, other.cols, |i, j| {
            (0..self.cols).any(|k| self[(i, k)] && other[(k, j)])
        })
    }

    /// Entry-wise disjunction.
    pub fn or(&self, other: &Self) -> Self {
        debug_assert_eq!((self.rows, self.cols), (other.rows, other.cols));
        Self::from_fn(self.rows, self.cols, |i, j| self[(i, j)] || other[(i, j)])
    }

    /// Entry-wise conjunction.
    pub fn and(&self, other: &Self) -> Self {
        debug_assert_eq!((self.rows, self.cols), (other.rows, other.cols));
        Self::from_fn(self.rows, self.cols, |i, j| self[(i, j)] && other[(i, j)])
    }

    /// Entry-wise negation.
    pub fn not(&self) -> Self {
        self.map(|&v| !v)
    }

    /// Reflexive-transitive closure by repeated boolean squaring.
    pub fn transitive_closure(&self) -> Self {
        debug_assert!(self.is_square());
        let mut closure = self.clone();
        loop {
            let next = closure.or(&closure.compose(&closure));
            if next == closure {
                return closure;
            }
            closure = next;
        }
    }

    /// Number of `true` entries in row `i`.
    pub fn count_row(&self, i: usize) -> usize {
        self.row(i).iter().filter(|&&v| v).count()
    }

    /// Number of `true` entries in column `j`.
    pub fn count_column(&self, j: usize) -> usize {
        self.column(j).filter(|&&v| v).count()
    }
}
