//! Derived relations: pure functions of the order matrix.

use std::collections::VecDeque;

use ord_core::errors::{ErrorInfo, PosetError};
use ord_core::matrix::Matrix;

use crate::Poset;

/// Covering relation from the order relation: `lt` minus everything with an
/// intermediate element, computed as `lt & !(lt . lt)`.
pub(crate) fn covering_matrix(leq: &Matrix<bool>) -> Matrix<bool> {
    let n = leq.rows();
    let lt = Matrix::from_fn(n, n, |i, j| leq[(i, j)] && i != j);
    let between = lt.compose(&lt);
    lt.and(&between.not())
}

/// All-pairs shortest upward distances over covering edges, Floyd-Warshall.
/// Unreachable pairs hold the sentinel `n`, strictly larger than any real
/// path length.
pub(crate) fn covers_to_dist(cover: &Matrix<bool>) -> Matrix<usize> {
    let n = cover.rows();
    let mut dist = Matrix::from_fn(n, n, |i, j| {
        if i == j {
            0
        } else if cover[(i, j)] {
            1
        } else {
            n
        }
    });
    for k in 0..n {
        for i in 0..n {
            for j in 0..n {
                let via = dist[(i, k)] + dist[(k, j)];
                if via < dist[(i, j)] {
                    dist[(i, j)] = via;
                }
            }
        }
    }
    dist
}

/// Kahn's algorithm over in-degrees from the covering matrix. A result
/// shorter than `n` means the covers cycle, which a validated order cannot.
pub(crate) fn kahn_toposort(poset: &Poset) -> Result<Vec<usize>, PosetError> {
    let n = poset.len();
    let cover = poset.covers_matrix();
    let parents = poset.parents();
    let mut indegree: Vec<usize> = (0..n).map(|i| cover.count_column(i)).collect();
    let mut queue: VecDeque<usize> = (0..n).filter(|&i| indegree[i] == 0).collect();
    let mut topo = Vec::with_capacity(n);
    while let Some(u) = queue.pop_front() {
        topo.push(u);
        for &v in &parents[u] {
            indegree[v] -= 1;
            if indegree[v] == 0 {
                queue.push_back(v);
            }
        }
    }
    if topo.len() != n {
        return Err(PosetError::CycleDetected(
            ErrorInfo::new("cover-cycle", "covering relation contains a cycle")
                .with_context("visited", topo.len())
                .with_context("size", n)
                .with_relation(poset.leq_matrix()),
        ));
    }
    Ok(topo)
}

/// Inverse of a permutation given as an index array.
pub(crate) fn inverse_permutation(perm: &[usize]) -> Vec<usize> {
    let mut rank = vec![0; perm.len()];
    for (i, &p) in perm.iter().enumerate() {
        rank[p] = i;
    }
    rank
}

/// Bottom-up adjacency lists: `out[i]` holds the covers of `i`.
pub(crate) fn parent_lists(cover: &Matrix<bool>) -> Vec<Vec<usize>> {
    let n = cover.rows();
    (0..n)
        .map(|i| (0..n).filter(|&j| cover[(i, j)]).collect())
        .collect()
}

/// Top-down adjacency lists: `out[i]` holds the elements covered by `i`.
pub(crate) fn child_lists(cover: &Matrix<bool>) -> Vec<Vec<usize>> {
    let n = cover.rows();
    (0..n)
        .map(|i| (0..n).filter(|&j| cover[(j, i)]).collect())
        .collect()
}

/// Connected components of `leq | leq^T`, each in BFS order, listed by
/// smallest member.
pub(crate) fn components(leq: &Matrix<bool>) -> Vec<Vec<usize>> {
    let n = leq.rows();
    let symmetric = leq.or(&leq.transposed());
    let mut seen = vec![false; n];
    let mut result = Vec::new();
    for start in 0..n {
        if seen[start] {
            continue;
        }
        seen[start] = true;
        let mut queue = VecDeque::from([start]);
        let mut component = Vec::new();
        while let Some(u) = queue.pop_front() {
            component.push(u);
            for v in 0..n {
                if symmetric[(u, v)] && !seen[v] {
                    seen[v] = true;
                    queue.push_back(v);
                }
            }
        }
        result.push(component);
    }
    result
}

/// Covering distance from the nearest bottom, per element.
pub(crate) fn heights(poset: &Poset) -> Vec<usize> {
    let n = poset.len();
    if n == 0 {
        return Vec::new();
    }
    let dist = poset.dist_matrix();
    let bottoms = poset.bottoms();
    (0..n)
        .map(|j| {
            bottoms
                .iter()
                .map(|&b| dist[(b, j)])
                .min()
                .unwrap_or(0)
        })
        .collect()
}
