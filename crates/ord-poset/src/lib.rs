#![deny(missing_docs)]
#![doc = "Finite partial orders and lattices over a dense boolean relation \
matrix: construction with axiom validation, derived relations, lattice \
algebra, permutation-invariant hashing and canonical forms, algebraic \
combinators, and a flat persistence format."]

mod derived;
mod iso;
mod lattice;
mod ops;
mod poset;
mod serialization;

pub mod catalog;
pub mod generators;

pub use iso::{canonical_fingerprint, EquivalencePolicy};
pub use poset::{validate_partial_order, Poset};
pub use serialization::{
    poset_from_bytes, poset_from_json, poset_from_record, poset_to_bytes, poset_to_json,
    poset_to_record, ArrayLiteral, DType, PosetRecord,
};
