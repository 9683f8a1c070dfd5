//! Backtracking enumeration of monotone self-maps of a lattice.

use ord_core::errors::PosetError;
use ord_core::matrix::Matrix;
use ord_poset::Poset;

/// One backtracking frame: the element whose up-set the current position
/// draws images from, plus the cursor into that up-set.
struct Frame {
    base: usize,
    cursor: usize,
}

/// Lazy enumerator over monotone self-maps.
///
/// Elements of the free domain are decided in topological order. When a
/// position is entered, its legal images are exactly the elements at or
/// above the lub of the images already assigned to its covers: one lub
/// lookup plus one up-set lookup, never a pairwise re-check. Exhausted
/// positions backtrack. The enumerator is finite and restartable only by
/// rebuilding it.
pub struct MonotoneMaps {
    lub: Matrix<usize>,
    upsets: Vec<Vec<usize>>,
    topo: Vec<usize>,
    covers: Vec<Vec<usize>>,
    bottom: usize,
    f: Vec<usize>,
    frames: Vec<Frame>,
    started: bool,
    done: bool,
}

impl MonotoneMaps {
    fn exhausted() -> Self {
        Self {
            lub: Matrix::filled(0, 0, 0usize),
            upsets: Vec::new(),
            topo: Vec::new(),
            covers: Vec::new(),
            bottom: 0,
            f: Vec::new(),
            frames: Vec::new(),
            started: false,
            done: true,
        }
    }

    /// The free domain, in the order positions are decided.
    pub fn domain(&self) -> &[usize] {
        &self.topo
    }
}

impl Iterator for MonotoneMaps {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        if self.done {
            return None;
        }
        let positions = self.topo.len();
        if self.started {
            // Step the deepest frame to its next candidate image.
            loop {
                let Some(frame) = self.frames.last_mut() else {
                    self.done = true;
                    return None;
                };
                frame.cursor += 1;
                let base = frame.base;
                let cursor = frame.cursor;
                if cursor < self.upsets[base].len() {
                    let depth = self.frames.len() - 1;
                    self.f[self.topo[depth]] = self.upsets[base][cursor];
                    break;
                }
                self.frames.pop();
            }
        } else {
            self.started = true;
        }
        // Descend, fixing each remaining position to its first candidate.
        while self.frames.len() < positions {
            let depth = self.frames.len();
            let mut base = self.bottom;
            for &covered in &self.covers[depth] {
                base = self.lub[(base, self.f[covered])];
            }
            // Up-sets contain their base element, so never empty.
            self.f[self.topo[depth]] = self.upsets[base][0];
            self.frames.push(Frame { base, cursor: 0 });
        }
        Some(self.f.clone())
    }
}

/// Topological order of `domain` plus the cover lists restricted to it:
/// `covers[p]` holds the already-decided covers of the element at position
/// `p`.
fn domain_plan(
    poset: &Poset,
    domain: &[usize],
) -> Result<(Vec<usize>, Vec<Vec<usize>>), PosetError> {
    let mut in_domain = vec![false; poset.len()];
    for &i in domain {
        in_domain[i] = true;
    }
    let topo: Vec<usize> = poset
        .toposort()?
        .iter()
        .copied()
        .filter(|&i| in_domain[i])
        .collect();
    let sub = poset.induced(&topo)?;
    let covers = sub
        .children()
        .iter()
        .map(|list| list.iter().map(|&j| topo[j]).collect())
        .collect();
    Ok((topo, covers))
}

/// Backtracking enumerator restricted to `domain`; positions outside it
/// keep their `prefill` images.
pub(crate) fn restricted_maps(
    poset: &Poset,
    domain: &[usize],
    prefill: Vec<usize>,
) -> Result<MonotoneMaps, PosetError> {
    let lub = poset.lub_table()?.clone();
    let bottom = poset.bottom()?;
    let leq = poset.leq_matrix();
    let n = poset.len();
    let upsets: Vec<Vec<usize>> = (0..n)
        .map(|i| (0..n).filter(|&j| leq[(i, j)]).collect())
        .collect();
    let (topo, covers) = domain_plan(poset, domain)?;
    Ok(MonotoneMaps {
        lub,
        upsets,
        topo,
        covers,
        bottom,
        f: prefill,
        frames: Vec::new(),
        started: false,
        done: false,
    })
}

/// All monotone self-maps of a lattice. An empty poset yields no maps.
pub fn monotone_maps(poset: &Poset) -> Result<MonotoneMaps, PosetError> {
    if poset.is_empty() {
        return Ok(MonotoneMaps::exhausted());
    }
    let domain: Vec<usize> = (0..poset.len()).collect();
    restricted_maps(poset, &domain, vec![0; poset.len()])
}

/// All monotone self-maps pinning the bottom to itself.
pub fn monotone_maps_fixing_bottom(poset: &Poset) -> Result<MonotoneMaps, PosetError> {
    if poset.is_empty() {
        return Ok(MonotoneMaps::exhausted());
    }
    let bottom = poset.bottom()?;
    let mut prefill = vec![0; poset.len()];
    prefill[bottom] = bottom;
    let domain: Vec<usize> = (0..poset.len()).filter(|&i| i != bottom).collect();
    restricted_maps(poset, &domain, prefill)
}

/// Pairwise monotonicity check, valid for any poset.
pub fn is_monotone(poset: &Poset, f: &[usize]) -> bool {
    let n = poset.len();
    if f.len() != n || f.iter().any(|&image| image >= n) {
        return false;
    }
    (0..n).all(|i| (0..n).all(|j| !poset.le(i, j) || poset.le(f[i], f[j])))
}
