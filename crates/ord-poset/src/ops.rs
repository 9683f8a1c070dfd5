//! Reindexing, sub-poset extraction, duality and algebraic combinators.

use std::collections::BTreeMap;

use ord_core::errors::{ErrorInfo, PosetError};
use ord_core::matrix::Matrix;

use crate::Poset;

/// Combines `base` with itself `times` times using `op`, by binary
/// exponentiation rather than an n-step loop. `op` must be associative.
fn power(
    base: &Poset,
    times: usize,
    op: &dyn Fn(&Poset, &Poset) -> Result<Poset, PosetError>,
) -> Result<Poset, PosetError> {
    if times == 1 {
        return Ok(base.clone());
    }
    let mut out = power(base, times / 2, op)?;
    out = op(&out, &out)?;
    if times % 2 == 1 {
        out = op(&out, base)?;
    }
    Ok(out)
}

impl Poset {
    /// Reindexed copy such that element `i` of `self` becomes element
    /// `map[i]` of the result. `map` must be a permutation of `0..n`.
    pub fn reindex(&self, map: &[usize]) -> Result<Poset, PosetError> {
        let n = self.len();
        if map.len() != n {
            return Err(PosetError::InvalidPermutation(
                ErrorInfo::new("length-mismatch", "permutation length disagrees with size")
                    .with_context("size", n)
                    .with_context("found", map.len()),
            ));
        }
        let mut seen = vec![false; n];
        for &target in map {
            if target >= n || seen[target] {
                return Err(PosetError::InvalidPermutation(
                    ErrorInfo::new("not-a-bijection", "map does not cover 0..n exactly once")
                        .with_context("map", format!("{map:?}"))
                        .with_hint("indices must cover 0..n"),
                ));
            }
            seen[target] = true;
        }
        let leq = self.leq_matrix();
        let mut out = Matrix::filled(n, n, false);
        let mut labels = vec![String::new(); n];
        for i in 0..n {
            labels[map[i]] = self.labels()[i].clone();
            for j in 0..n {
                if leq[(i, j)] {
                    out[(map[i], map[j])] = true;
                }
            }
        }
        Ok(Poset::assemble(out, labels))
    }

    /// Induced sub-poset on a duplicate-free index subset, keeping labels.
    pub fn induced(&self, domain: &[usize]) -> Result<Poset, PosetError> {
        let n = self.len();
        let mut seen = vec![false; n];
        for &i in domain {
            if i >= n {
                return Err(PosetError::IncompatibleDomain(
                    ErrorInfo::new("index-out-of-range", "domain names a missing element")
                        .with_context("index", i)
                        .with_context("size", n),
                ));
            }
            if seen[i] {
                return Err(PosetError::IncompatibleDomain(
                    ErrorInfo::new("duplicate-index", "domain repeats an element")
                        .with_context("index", i),
                ));
            }
            seen[i] = true;
        }
        let m = domain.len();
        let leq = self.leq_matrix();
        let sub = Matrix::from_fn(m, m, |a, b| leq[(domain[a], domain[b])]);
        let labels = domain.iter().map(|&i| self.labels()[i].clone()).collect();
        Ok(Poset::assemble(sub, labels))
    }

    /// The poset flipped upside down.
    pub fn dual(&self) -> Poset {
        Poset::assemble(self.leq_matrix().transposed(), self.labels().to_vec())
    }

    /// Stacks `other` above `self`, connecting every top of `self` with
    /// every bottom of `other`.
    pub fn ordinal_sum(&self, other: &Poset) -> Result<Poset, PosetError> {
        let n = self.len();
        let mut covers: Vec<Vec<usize>> = self.children().to_vec();
        covers.extend(
            other
                .children()
                .iter()
                .map(|list| list.iter().map(|&j| j + n).collect::<Vec<usize>>()),
        );
        for &top in self.tops() {
            for &bottom in other.bottoms() {
                covers[bottom + n].push(top);
            }
        }
        Poset::from_children(&covers, None)
    }

    /// Standard poset product, with paired labels.
    pub fn product(&self, other: &Poset) -> Result<Poset, PosetError> {
        let n = self.len();
        let m = other.len();
        let mut covers: Vec<Vec<usize>> = vec![Vec::new(); n * m];
        let mut labels = vec![String::new(); n * m];
        for i in 0..n {
            for j in 0..m {
                let at = i + j * n;
                for &k in &self.children()[i] {
                    covers[at].push(k + j * n);
                }
                for &k in &other.children()[j] {
                    covers[at].push(i + k * n);
                }
                labels[at] = format!("({},{})", self.labels()[i], other.labels()[j]);
            }
        }
        Poset::from_children(&covers, Some(labels))
    }

    /// Places `other` beside `self` with no connections.
    pub fn disjoint_union(&self, other: &Poset) -> Result<Poset, PosetError> {
        let n = self.len();
        let mut covers: Vec<Vec<usize>> = self.children().to_vec();
        covers.extend(
            other
                .children()
                .iter()
                .map(|list| list.iter().map(|&j| j + n).collect::<Vec<usize>>()),
        );
        Poset::from_children(&covers, None)
    }

    /// Stacks `other` above `self` with the boundary product
    /// `tops(self) x bottoms(other)` in between, gluing the two lattices.
    pub fn lattice_glue(&self, other: &Poset) -> Result<Poset, PosetError> {
        let n = self.len();
        let tops: Vec<usize> = self.tops().to_vec();
        let other_bottoms: Vec<usize> = other.bottoms().to_vec();
        let mut is_top = vec![false; n];
        for &t in &tops {
            is_top[t] = true;
        }
        let mut is_bottom = vec![false; other.len()];
        for &b in &other_bottoms {
            is_bottom[b] = true;
        }
        let non_tops: Vec<usize> = (0..n).filter(|&i| !is_top[i]).collect();
        let other_non_bottoms: Vec<usize> = (0..other.len()).filter(|&i| !is_bottom[i]).collect();

        // Node keys sort lower layer < boundary layer < upper layer.
        let low = |i: usize| (0usize, i);
        let mid = |i: usize, j: usize| (i + 1, j);
        let high = |j: usize| (n + 1, j);

        let mut covers: BTreeMap<(usize, usize), Vec<(usize, usize)>> = BTreeMap::new();
        for &i in &non_tops {
            covers.insert(low(i), Vec::new());
        }
        for &i in &tops {
            for &j in &other_bottoms {
                covers.insert(mid(i, j), Vec::new());
            }
        }
        for &j in &other_non_bottoms {
            covers.insert(high(j), Vec::new());
        }

        for &i in &non_tops {
            for &j in &self.children()[i] {
                covers.entry(low(i)).or_default().push(low(j));
            }
        }
        for &i in &other_non_bottoms {
            for &j in &other.parents()[i] {
                covers.entry(high(j)).or_default().push(high(i));
            }
        }
        for &i in &tops {
            for &j in &self.children()[i] {
                for &k in &other_bottoms {
                    covers.entry(mid(i, k)).or_default().push(low(j));
                }
            }
        }
        for &i in &other_bottoms {
            for &j in &other.parents()[i] {
                for &k in &tops {
                    covers.entry(high(j)).or_default().push(mid(k, i));
                }
            }
        }

        let index: BTreeMap<(usize, usize), usize> = covers
            .keys()
            .enumerate()
            .map(|(pos, &key)| (key, pos))
            .collect();
        let mut lists: Vec<Vec<usize>> = vec![Vec::new(); index.len()];
        for (node, below) in &covers {
            for b in below {
                lists[index[node]].push(index[b]);
            }
        }
        Poset::from_children(&lists, None)
    }

    /// Ordinal sum of `self` with itself `times` times.
    pub fn ordinal_sum_n(&self, times: usize) -> Result<Poset, PosetError> {
        if times == 0 {
            return Ok(Poset::empty());
        }
        power(self, times, &|a, b| a.ordinal_sum(b))
    }

    /// Product of `self` with itself `times` times.
    pub fn product_n(&self, times: usize) -> Result<Poset, PosetError> {
        if times == 0 {
            return Ok(Poset::chain(1));
        }
        power(self, times, &|a, b| a.product(b))
    }

    /// Disjoint union of `self` with itself `times` times.
    pub fn disjoint_union_n(&self, times: usize) -> Result<Poset, PosetError> {
        if times == 0 {
            return Ok(Poset::empty());
        }
        power(self, times, &|a, b| a.disjoint_union(b))
    }

    /// Lattice glue of `self` with itself `times` times.
    pub fn lattice_glue_n(&self, times: usize) -> Result<Poset, PosetError> {
        if times == 0 {
            return Ok(Poset::chain(1));
        }
        power(self, times, &|a, b| a.lattice_glue(b))
    }
}
