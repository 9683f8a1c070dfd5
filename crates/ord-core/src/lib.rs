#![deny(missing_docs)]
#![doc = "Core error, matrix and hashing types shared by the ORD poset engine crates."]

pub mod errors;
pub mod hashing;
pub mod matrix;
pub mod rng;

pub use errors::{ErrorInfo, OrderAxiom, PosetError, RelationSnapshot};
pub use matrix::Matrix;
pub use rng::{derive_substream_seed, RngHandle};
