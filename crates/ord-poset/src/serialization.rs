//! Flat named-attribute persistence for posets.
//!
//! Numeric matrices are encoded as `{dtype, flattened values}` pairs and
//! reconstructed by reapplying the dtype and an n-by-n reshape. Expensive
//! cached attributes travel with the record so a reimported poset does not
//! recompute them.

use ord_core::errors::{ErrorInfo, PosetError};
use ord_core::matrix::Matrix;
use serde::{Deserialize, Serialize};

use crate::Poset;

/// Element type of a flattened array attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DType {
    /// Boolean entries stored as 0/1 words.
    Bool,
    /// Unsigned 64-bit entries.
    U64,
}

/// A numeric attribute: dtype plus row-major flattened values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrayLiteral {
    /// Element type to reapply on import.
    pub dtype: DType,
    /// Flattened row-major entries.
    pub values: Vec<u64>,
}

fn serde_error(code: &str, message: impl Into<String>) -> PosetError {
    PosetError::Serde(ErrorInfo::new(code, message))
}

impl ArrayLiteral {
    fn from_bool(matrix: &Matrix<bool>) -> Self {
        Self {
            dtype: DType::Bool,
            values: matrix.values().iter().map(|&v| v as u64).collect(),
        }
    }

    fn from_usize(matrix: &Matrix<usize>) -> Self {
        Self {
            dtype: DType::U64,
            values: matrix.values().iter().map(|&v| v as u64).collect(),
        }
    }

    fn expect_shape(&self, dtype: DType, n: usize) -> Result<(), PosetError> {
        if self.dtype != dtype {
            return Err(serde_error("dtype-mismatch", "array has an unexpected dtype"));
        }
        if self.values.len() != n * n {
            return Err(PosetError::InvalidRelationShape(
                ErrorInfo::new("reshape-mismatch", "flattened array does not reshape to n x n")
                    .with_context("size", n)
                    .with_context("values", self.values.len()),
            ));
        }
        Ok(())
    }

    fn into_bool(self, n: usize) -> Result<Matrix<bool>, PosetError> {
        self.expect_shape(DType::Bool, n)?;
        if self.values.iter().any(|&v| v > 1) {
            return Err(serde_error("non-boolean-entry", "boolean array holds a value above 1"));
        }
        Ok(Matrix::from_fn(n, n, |i, j| self.values[i * n + j] == 1))
    }

    fn into_usize(self, n: usize, max_value: u64) -> Result<Matrix<usize>, PosetError> {
        self.expect_shape(DType::U64, n)?;
        if self.values.iter().any(|&v| v > max_value) {
            return Err(serde_error(
                "entry-out-of-range",
                format!("array holds a value above {max_value}"),
            ));
        }
        Ok(Matrix::from_fn(n, n, |i, j| self.values[i * n + j] as usize))
    }
}

/// Flat mapping of named attributes describing one poset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PosetRecord {
    /// Element labels; their count fixes `n`.
    pub labels: Vec<String>,
    /// The order relation.
    pub leq: ArrayLiteral,
    /// Cached covering matrix, when it was computed.
    #[serde(default)]
    pub covers: Option<ArrayLiteral>,
    /// Cached distance matrix, when it was computed.
    #[serde(default)]
    pub dist: Option<ArrayLiteral>,
    /// Cached lub table, when it was computed.
    #[serde(default)]
    pub lub: Option<ArrayLiteral>,
    /// Cached glb table, when it was computed.
    #[serde(default)]
    pub glb: Option<ArrayLiteral>,
    /// Cached per-element hash vector.
    #[serde(default)]
    pub element_hashes: Option<Vec<u64>>,
    /// Cached whole-poset hash.
    #[serde(default)]
    pub hash: Option<u64>,
}

/// Captures a poset and its populated caches into a record.
pub fn poset_to_record(poset: &Poset) -> PosetRecord {
    PosetRecord {
        labels: poset.labels().to_vec(),
        leq: ArrayLiteral::from_bool(poset.leq_matrix()),
        covers: poset.caches.covers.get().map(ArrayLiteral::from_bool),
        dist: poset.caches.dist.get().map(ArrayLiteral::from_usize),
        lub: poset
            .caches
            .lub
            .get()
            .and_then(|r| r.as_ref().ok())
            .map(ArrayLiteral::from_usize),
        glb: poset
            .caches
            .glb
            .get()
            .and_then(|r| r.as_ref().ok())
            .map(ArrayLiteral::from_usize),
        element_hashes: poset.caches.element_hashes.get().cloned(),
        hash: poset.caches.hash.get().copied(),
    }
}

/// Rebuilds a poset from a record, revalidating the relation and
/// reinstalling any cached attributes after shape checks.
pub fn poset_from_record(record: PosetRecord) -> Result<Poset, PosetError> {
    let n = record.labels.len();
    let leq = record.leq.into_bool(n)?;
    let poset = Poset::new(leq, Some(record.labels))?;
    if let Some(lit) = record.covers {
        let _ = poset.caches.covers.set(lit.into_bool(n)?);
    }
    if let Some(lit) = record.dist {
        let _ = poset.caches.dist.set(lit.into_usize(n, n as u64)?);
    }
    let index_cap = (n as u64).saturating_sub(1);
    if let Some(lit) = record.lub {
        let _ = poset.caches.lub.set(Ok(lit.into_usize(n, index_cap)?));
    }
    if let Some(lit) = record.glb {
        let _ = poset.caches.glb.set(Ok(lit.into_usize(n, index_cap)?));
    }
    if let Some(hashes) = record.element_hashes {
        if hashes.len() != n {
            return Err(serde_error(
                "hash-vector-length",
                "element hash vector disagrees with size",
            ));
        }
        let _ = poset.caches.element_hashes.set(hashes);
    }
    if let Some(hash) = record.hash {
        let _ = poset.caches.hash.set(hash);
    }
    Ok(poset)
}

/// Serializes the poset to a JSON string.
pub fn poset_to_json(poset: &Poset) -> Result<String, PosetError> {
    serde_json::to_string_pretty(&poset_to_record(poset))
        .map_err(|err| serde_error("serialize-json", err.to_string()))
}

/// Restores a poset from a JSON string.
pub fn poset_from_json(json: &str) -> Result<Poset, PosetError> {
    let record: PosetRecord =
        serde_json::from_str(json).map_err(|err| serde_error("deserialize-json", err.to_string()))?;
    poset_from_record(record)
}

/// Serializes the poset to a compact binary representation using `bincode`.
pub fn poset_to_bytes(poset: &Poset) -> Result<Vec<u8>, PosetError> {
    bincode::serialize(&poset_to_record(poset))
        .map_err(|err| serde_error("serialize-bytes", err.to_string()))
}

/// Restores a poset from its binary representation.
pub fn poset_from_bytes(bytes: &[u8]) -> Result<Poset, PosetError> {
    let record: PosetRecord = bincode::deserialize(bytes)
        .map_err(|err| serde_error("deserialize-bytes", err.to_string()))?;
    poset_from_record(record)
}
