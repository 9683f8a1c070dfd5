//! Structured error types shared across the ORD crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::matrix::Matrix;

/// Row-major snapshot of a boolean relation, attached to structural errors
/// so that a failure can be diagnosed even when the owning object's caches
/// are only partially populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationSnapshot {
    /// Number of elements the relation ranges over.
    pub n: usize,
    /// Flattened n×n relation, row-major.
    pub entries: Vec<bool>,
}

impl RelationSnapshot {
    /// Captures the given relation matrix.
    pub fn capture(relation: &Matrix<bool>) -> Self {
        Self {
            n: relation.rows(),
            entries: relation.values().to_vec(),
        }
    }
}

/// Structured payload attached to every [`PosetError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (indices, sizes, etc.).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Full relation matrix at the failure point, when meaningful.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub relation: Option<RelationSnapshot>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            relation: None,
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.context.insert(key.into(), value.to_string());
        self
    }

    /// Attaches a snapshot of the relation under inspection.
    pub fn with_relation(mut self, relation: &Matrix<bool>) -> Self {
        self.relation = Some(RelationSnapshot::capture(relation));
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(snapshot) = &self.relation {
            write!(f, " | relation: {}x{}", snapshot.n, snapshot.n)?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

/// Order axiom named by [`PosetError::NotAPartialOrder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderAxiom {
    /// Every element must relate to itself.
    Reflexivity,
    /// No two distinct elements may relate in both directions.
    Antisymmetry,
    /// Composition of the relation with itself must add no pair.
    Transitivity,
}

impl Display for OrderAxiom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OrderAxiom::Reflexivity => "reflexivity",
            OrderAxiom::Antisymmetry => "antisymmetry",
            OrderAxiom::Transitivity => "transitivity",
        };
        f.write_str(name)
    }
}

/// Canonical error type for the ORD engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum PosetError {
    /// A relation matrix is not square or disagrees with its label count.
    #[error("invalid relation shape: {0}")]
    InvalidRelationShape(ErrorInfo),
    /// A relation violates one of the partial-order axioms.
    #[error("not a partial order ({axiom}): {info}")]
    NotAPartialOrder {
        /// The violated axiom.
        axiom: OrderAxiom,
        /// Structured diagnostic payload.
        info: ErrorInfo,
    },
    /// A covering structure contains a directed cycle (defensive check).
    #[error("cycle detected: {0}")]
    CycleDetected(ErrorInfo),
    /// A pair of elements has no unique least upper / greatest lower bound.
    #[error("not a lattice: {info}")]
    NotALattice {
        /// The offending pair.
        pair: (usize, usize),
        /// Structured diagnostic payload.
        info: ErrorInfo,
    },
    /// The poset has no bottom element.
    #[error("no bottom element: {0}")]
    NoBottom(ErrorInfo),
    /// The poset has more than one bottom element.
    #[error("multiple bottom elements: {0}")]
    MultipleBottoms(ErrorInfo),
    /// The poset has no top element.
    #[error("no top element: {0}")]
    NoTop(ErrorInfo),
    /// The poset has more than one top element.
    #[error("multiple top elements: {0}")]
    MultipleTops(ErrorInfo),
    /// A lattice fails the distributive law.
    #[error("not distributive: {info}")]
    NotDistributive {
        /// A concrete triple violating `glb(i, lub(j, k)) == lub(glb(i, j), glb(i, k))`.
        witness: (usize, usize, usize),
        /// Structured diagnostic payload.
        info: ErrorInfo,
    },
    /// A reindexing map is not a permutation of `0..n`.
    #[error("invalid permutation: {0}")]
    InvalidPermutation(ErrorInfo),
    /// Sizes or indices disagree in a combinator or sub-poset extraction.
    #[error("incompatible domain: {0}")]
    IncompatibleDomain(ErrorInfo),
    /// Serialization or schema errors.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
}

impl PosetError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            PosetError::InvalidRelationShape(info)
            | PosetError::CycleDetected(info)
            | PosetError::NoBottom(info)
            | PosetError::MultipleBottoms(info)
            | PosetError::NoTop(info)
            | PosetError::MultipleTops(info)
            | PosetError::InvalidPermutation(info)
            | PosetError::IncompatibleDomain(info)
            | PosetError::Serde(info) => info,
            PosetError::NotAPartialOrder { info, .. }
            | PosetError::NotALattice { info, .. }
            | PosetError::NotDistributive { info, .. } => info,
        }
    }
}
