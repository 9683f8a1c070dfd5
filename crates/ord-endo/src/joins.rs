//! Join-preserving self-maps via irreducible components, Cartesian
//! crossing and lub interpolation.

use itertools::Itertools;
use ord_core::errors::{ErrorInfo, PosetError};
use ord_core::matrix::Matrix;
use ord_poset::Poset;

use crate::monotone::restricted_maps;

/// Splits the join-irreducibles into independent components. Posets with
/// at most one element have no irreducibles at all.
pub fn irreducible_components(poset: &Poset) -> Result<Vec<Vec<usize>>, PosetError> {
    if poset.len() <= 1 {
        return Ok(Vec::new());
    }
    let irreducibles = poset.irreducibles().to_vec();
    let sub = poset.induced(&irreducibles)?;
    Ok(sub
        .components()
        .iter()
        .map(|component| component.iter().map(|&k| irreducibles[k]).collect())
        .collect())
}

pub(crate) fn pairs_preserved(lub: &Matrix<usize>, f: &[usize]) -> bool {
    let n = lub.rows();
    (0..n).all(|i| (0..n).all(|j| f[lub[(i, j)]] == lub[(f[i], f[j])]))
}

/// Whether `f` preserves pairwise least upper bounds.
pub fn preserves_join_pairs(poset: &Poset, f: &[usize]) -> Result<bool, PosetError> {
    let n = poset.len();
    if f.len() != n || f.iter().any(|&image| image >= n) {
        return Err(PosetError::IncompatibleDomain(
            ErrorInfo::new("map-out-of-range", "map length or images disagree with the poset")
                .with_context("size", n)
                .with_context("map", format!("{f:?}")),
        ));
    }
    Ok(pairs_preserved(poset.lub_table()?, f))
}

enum BottomMode {
    Fixed,
    Free,
}

/// Lazy stream of join-preserving self-maps.
pub struct JoinMaps<'a> {
    inner: Box<dyn Iterator<Item = Vec<usize>> + 'a>,
}

impl Iterator for JoinMaps<'_> {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        self.inner.next()
    }
}

/// All maps preserving lubs of arbitrary sets: monotone over the
/// irreducibles, interpolated everywhere else, bottom pinned to bottom.
pub fn join_maps_fixing_bottom(poset: &Poset) -> Result<JoinMaps<'_>, PosetError> {
    build(poset, BottomMode::Fixed)
}

/// All maps preserving pairwise lubs: as above, with the bottom image
/// ranging over every element at or below the glb of the irreducible
/// images.
pub fn join_maps(poset: &Poset) -> Result<JoinMaps<'_>, PosetError> {
    build(poset, BottomMode::Free)
}

fn build(poset: &Poset, mode: BottomMode) -> Result<JoinMaps<'_>, PosetError> {
    if poset.is_empty() {
        return Ok(JoinMaps {
            inner: Box::new(std::iter::empty()),
        });
    }
    let n = poset.len();
    let lub = poset.lub_table()?;
    let glb = poset.glb_table()?;
    let bottom = poset.bottom()?;
    let top = poset.top()?;
    let leq = poset.leq_matrix();
    let irreducibles = poset.irreducibles().to_vec();
    let mut is_irreducible = vec![false; n];
    for &i in &irreducibles {
        is_irreducible[i] = true;
    }
    let irr_below: Vec<Vec<usize>> = (0..n)
        .map(|j| {
            irreducibles
                .iter()
                .copied()
                .filter(|&i| leq[(i, j)])
                .collect()
        })
        .collect();
    let below: Vec<Vec<usize>> = (0..n)
        .map(|j| (0..n).filter(|&i| leq[(i, j)]).collect())
        .collect();
    let distributive = poset.is_distributive()?;

    // Per-component monotone assignments are materialized once; the stream
    // then walks their Cartesian product lazily. Counts multiply, sequences
    // concatenate-then-cross.
    let mut elems_per_component: Vec<Vec<usize>> = Vec::new();
    let mut choices_per_component: Vec<Vec<Vec<usize>>> = Vec::new();
    for component in irreducible_components(poset)? {
        let maps = restricted_maps(poset, &component, vec![0; n])?;
        let ordered = maps.domain().to_vec();
        let choices: Vec<Vec<usize>> = maps
            .map(|f| ordered.iter().map(|&e| f[e]).collect())
            .collect();
        elems_per_component.push(ordered);
        choices_per_component.push(choices);
    }

    let cross: Box<dyn Iterator<Item = Vec<Vec<usize>>>> = if choices_per_component.is_empty() {
        Box::new(std::iter::once(Vec::new()))
    } else {
        Box::new(
            choices_per_component
                .into_iter()
                .map(|choices| choices.into_iter())
                .multi_cartesian_product(),
        )
    };

    let interpolated = cross.map(move |choice| {
        let mut f = vec![bottom; n];
        for (elems, images) in elems_per_component.iter().zip(&choice) {
            for (&element, &image) in elems.iter().zip(images) {
                f[element] = image;
            }
        }
        for j in 0..n {
            if !is_irreducible[j] {
                let mut acc = bottom;
                for &i in &irr_below[j] {
                    acc = lub[(acc, f[i])];
                }
                f[j] = acc;
            }
        }
        f
    });

    let with_bottom: Box<dyn Iterator<Item = Vec<usize>> + '_> = match mode {
        BottomMode::Fixed => Box::new(interpolated),
        BottomMode::Free => Box::new(interpolated.flat_map(move |f| {
            let mut meet = top;
            for &i in &irreducibles {
                meet = glb[(meet, f[i])];
            }
            below[meet]
                .iter()
                .map(|&b| {
                    let mut g = f.clone();
                    g[bottom] = b;
                    g
                })
                .collect::<Vec<_>>()
        })),
    };

    // Exact by construction on distributive lattices; everything else gets
    // the pairwise check.
    let inner: Box<dyn Iterator<Item = Vec<usize>> + '_> = if distributive {
        with_bottom
    } else {
        Box::new(with_bottom.filter(move |f| pairs_preserved(lub, f)))
    };
    Ok(JoinMaps { inner })
}

/// Closed-form count for distributive lattices: the product over
/// independent irreducible components of each component's monotone
/// assignment count.
pub fn count_join_maps_distributive(poset: &Poset) -> Result<u128, PosetError> {
    poset.require_distributive()?;
    if poset.is_empty() {
        return Ok(0);
    }
    let n = poset.len();
    let mut total: u128 = 1;
    for component in irreducible_components(poset)? {
        let count = restricted_maps(poset, &component, vec![0; n])?.count() as u128;
        total = total.saturating_mul(count);
    }
    Ok(total)
}

/// Count of maps preserving lubs of sets: the closed form on distributive
/// lattices, enumeration elsewhere.
pub fn count_join_maps(poset: &Poset) -> Result<u128, PosetError> {
    if poset.is_empty() {
        return Ok(0);
    }
    if poset.is_distributive()? {
        count_join_maps_distributive(poset)
    } else {
        Ok(join_maps_fixing_bottom(poset)?.count() as u128)
    }
}

/// The lattice of join-endomorphisms under the pointwise order.
pub fn join_endomorphism_lattice(poset: &Poset) -> Result<Poset, PosetError> {
    let maps: Vec<Vec<usize>> = join_maps_fixing_bottom(poset)?.collect();
    let leq = poset.leq_matrix();
    let labels: Vec<String> = maps
        .iter()
        .map(|f| {
            let names: Vec<&str> = f.iter().map(|&i| poset.labels()[i].as_str()).collect();
            names.join(",")
        })
        .collect();
    Poset::from_predicate(
        &maps,
        |f, g| f.iter().zip(g.iter()).all(|(&a, &b)| leq[(a, b)]),
        Some(labels),
    )
}
