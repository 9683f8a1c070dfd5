//! Breadth-first enumeration of all small lattices up to isomorphism.

use std::collections::{HashSet, VecDeque};

use ord_core::errors::PosetError;
use ord_poset::Poset;

use crate::grow::{edge_successors, node_successors};

/// Breadth-first stream of all lattices with at most `max_size` elements,
/// one canonical representative per isomorphism class.
///
/// The queue is seeded with the empty, singleton and two-chain lattices.
/// Each dequeued lattice is grown by every legal relation addition and,
/// while below the size cap, every legal node insertion; newcomers are
/// deduplicated against a visited set keyed by the whole-poset hash before
/// being enqueued. The stream yields the canonical form of every dequeued
/// lattice.
pub struct LatticeEnumeration {
    queue: VecDeque<Poset>,
    visited: HashSet<u64>,
    max_size: usize,
}

impl LatticeEnumeration {
    /// Creates the enumeration, discarding seeds above the size cap.
    pub fn new(max_size: usize) -> Result<Self, PosetError> {
        let seeds = [
            Poset::from_children(&[], None)?,
            Poset::from_children(&[vec![]], None)?,
            Poset::from_children(&[vec![], vec![0]], None)?,
        ];
        let mut visited = HashSet::new();
        let mut queue = VecDeque::new();
        for seed in seeds {
            if seed.len() <= max_size && visited.insert(seed.structural_hash()) {
                queue.push_back(seed);
            }
        }
        Ok(Self {
            queue,
            visited,
            max_size,
        })
    }
}

impl Iterator for LatticeEnumeration {
    type Item = Result<Poset, PosetError>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.queue.pop_front()?;
        let mut successors = match edge_successors(&current) {
            Ok(successors) => successors,
            Err(err) => {
                self.queue.clear();
                return Some(Err(err));
            }
        };
        if current.len() < self.max_size {
            match node_successors(&current) {
                Ok(more) => successors.extend(more),
                Err(err) => {
                    self.queue.clear();
                    return Some(Err(err));
                }
            }
        }
        for candidate in successors {
            if self.visited.insert(candidate.structural_hash()) {
                self.queue.push_back(candidate);
            }
        }
        Some(Ok(current.canonical().clone()))
    }
}

/// Collects the canonical form of every lattice with at most `max_size`
/// elements.
pub fn all_lattices(max_size: usize) -> Result<Vec<Poset>, PosetError> {
    LatticeEnumeration::new(max_size)?.collect()
}
