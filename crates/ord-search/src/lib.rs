#![deny(missing_docs)]
#![doc = "Growth of lattices by single relations and nodes, and \
breadth-first enumeration of the space of small lattices deduplicated up \
to isomorphism."]

pub mod enumerate;
pub mod grow;

pub use enumerate::{all_lattices, LatticeEnumeration};
pub use grow::{add_relation, edge_successors, forbidden_pairs, insert_between, node_successors};
