#![deny(missing_docs)]
#![doc = "Backtracking enumeration and counting of monotone and \
join-preserving self-maps of finite lattices, with exhaustive oracles for \
cross-checking in tests."]

pub mod joins;
pub mod monotone;
pub mod oracle;

pub use joins::{
    count_join_maps, count_join_maps_distributive, irreducible_components,
    join_endomorphism_lattice, join_maps, join_maps_fixing_bottom, preserves_join_pairs, JoinMaps,
};
pub use monotone::{is_monotone, monotone_maps, monotone_maps_fixing_bottom, MonotoneMaps};
