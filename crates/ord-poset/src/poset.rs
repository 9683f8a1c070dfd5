use std::fmt;
use std::sync::OnceLock;

use ord_core::errors::{ErrorInfo, OrderAxiom, PosetError};
use ord_core::hashing::hash_sorted;
use ord_core::matrix::Matrix;

use crate::{derived, iso, lattice};

/// Immutable finite partial order over the indices `0..n`.
///
/// The relation is held as a dense boolean matrix with `leq[i,j]` meaning
/// `i <= j`. The matrix never changes after construction; every derived
/// quantity is a pure function of it, computed on first access and cached
/// on the instance behind a compute-once guard. Recomputation is
/// idempotent, so a lost race merely duplicates work.
#[derive(Debug, Clone)]
pub struct Poset {
    n: usize,
    leq: Matrix<bool>,
    labels: Vec<String>,
    pub(crate) caches: Caches,
}

/// Per-instance memoization slots for derived attributes.
#[derive(Debug, Clone, Default)]
pub(crate) struct Caches {
    pub(crate) covers: OnceLock<Matrix<bool>>,
    pub(crate) dist: OnceLock<Matrix<usize>>,
    pub(crate) topo: OnceLock<Result<Vec<usize>, PosetError>>,
    pub(crate) parents: OnceLock<Vec<Vec<usize>>>,
    pub(crate) children: OnceLock<Vec<Vec<usize>>>,
    pub(crate) components: OnceLock<Vec<Vec<usize>>>,
    pub(crate) heights: OnceLock<Vec<usize>>,
    pub(crate) bottoms: OnceLock<Vec<usize>>,
    pub(crate) tops: OnceLock<Vec<usize>>,
    pub(crate) irreducibles: OnceLock<Vec<usize>>,
    pub(crate) lub: OnceLock<Result<Matrix<usize>, PosetError>>,
    pub(crate) glb: OnceLock<Result<Matrix<usize>, PosetError>>,
    pub(crate) distributive: OnceLock<Result<Option<(usize, usize, usize)>, PosetError>>,
    pub(crate) element_hashes: OnceLock<Vec<u64>>,
    pub(crate) hash: OnceLock<u64>,
    pub(crate) canonical: OnceLock<Box<Poset>>,
}

/// Checks that `relation` is reflexive, antisymmetric and transitive.
///
/// Transitivity is tested by composing the relation with itself via the
/// boolean matrix product and requiring that no new pair appears.
pub fn validate_partial_order(relation: &Matrix<bool>) -> Result<(), PosetError> {
    if !relation.is_square() {
        return Err(PosetError::InvalidRelationShape(
            ErrorInfo::new("non-square", "relation matrix must be square")
                .with_context("rows", relation.rows())
                .with_context("cols", relation.cols()),
        ));
    }
    let n = relation.rows();
    for i in 0..n {
        if !relation[(i, i)] {
            return Err(PosetError::NotAPartialOrder {
                axiom: OrderAxiom::Reflexivity,
                info: ErrorInfo::new("missing-reflexive-pair", "element does not relate to itself")
                    .with_context("element", i)
                    .with_relation(relation),
            });
        }
    }
    for i in 0..n {
        for j in (i + 1)..n {
            if relation[(i, j)] && relation[(j, i)] {
                return Err(PosetError::NotAPartialOrder {
                    axiom: OrderAxiom::Antisymmetry,
                    info: ErrorInfo::new("symmetric-pair", "distinct elements relate both ways")
                        .with_context("left", i)
                        .with_context("right", j)
                        .with_relation(relation),
                });
            }
        }
    }
    let composed = relation.compose(relation);
    for i in 0..n {
        for j in 0..n {
            if composed[(i, j)] && !relation[(i, j)] {
                let mut info =
                    ErrorInfo::new("missing-composite-pair", "composition adds a missing pair")
                        .with_context("lower", i)
                        .with_context("upper", j)
                        .with_relation(relation);
                if let Some(k) = (0..n).find(|&k| relation[(i, k)] && relation[(k, j)]) {
                    info = info.with_context("via", k);
                }
                return Err(PosetError::NotAPartialOrder {
                    axiom: OrderAxiom::Transitivity,
                    info,
                });
            }
        }
    }
    Ok(())
}

fn resolve_labels(n: usize, labels: Option<Vec<String>>) -> Result<Vec<String>, PosetError> {
    match labels {
        None => Ok(default_labels(n)),
        Some(labels) if labels.len() == n => Ok(labels),
        Some(labels) => Err(PosetError::InvalidRelationShape(
            ErrorInfo::new("label-count-mismatch", "label count disagrees with relation size")
                .with_context("labels", labels.len())
                .with_context("size", n),
        )),
    }
}

pub(crate) fn default_labels(n: usize) -> Vec<String> {
    (0..n).map(|i| i.to_string()).collect()
}

impl Poset {
    /// Creates a poset from a validated relation matrix.
    pub fn new(leq: Matrix<bool>, labels: Option<Vec<String>>) -> Result<Self, PosetError> {
        let poset = Self::new_unchecked(leq, labels)?;
        validate_partial_order(poset.leq_matrix())?;
        Ok(poset)
    }

    /// Creates a poset from a trusted relation matrix, skipping the axiom
    /// checks. The matrix must still be square and match the label count.
    pub fn new_unchecked(leq: Matrix<bool>, labels: Option<Vec<String>>) -> Result<Self, PosetError> {
        if !leq.is_square() {
            return Err(PosetError::InvalidRelationShape(
                ErrorInfo::new("non-square", "relation matrix must be square")
                    .with_context("rows", leq.rows())
                    .with_context("cols", leq.cols()),
            ));
        }
        let labels = resolve_labels(leq.rows(), labels)?;
        Ok(Self::assemble(leq, labels))
    }

    /// Internal constructor for matrices known to be valid partial orders.
    pub(crate) fn assemble(leq: Matrix<bool>, labels: Vec<String>) -> Self {
        debug_assert!(leq.is_square());
        debug_assert_eq!(labels.len(), leq.rows());
        Self {
            n: leq.rows(),
            leq,
            labels,
            caches: Caches::default(),
        }
    }

    /// Creates a poset from cover lists: `children[i]` holds the elements
    /// covered by `i`. The relation is the reflexive-transitive closure of
    /// the covers, validated after closure.
    pub fn from_children(
        children: &[Vec<usize>],
        labels: Option<Vec<String>>,
    ) -> Result<Self, PosetError> {
        let n = children.len();
        let mut cover = Matrix::filled(n, n, false);
        for (parent, below) in children.iter().enumerate() {
            for &child in below {
                if child >= n {
                    return Err(PosetError::InvalidRelationShape(
                        ErrorInfo::new("cover-index-out-of-range", "cover list names a missing element")
                            .with_context("parent", parent)
                            .with_context("child", child)
                            .with_context("size", n),
                    ));
                }
                cover[(child, parent)] = true;
            }
        }
        let dist = derived::covers_to_dist(&cover);
        let leq = dist.map(|&d| d < n);
        validate_partial_order(&leq)?;
        let labels = resolve_labels(n, labels)?;
        let poset = Self::assemble(leq, labels);
        let _ = poset.caches.covers.set(cover);
        let _ = poset.caches.dist.set(dist);
        Ok(poset)
    }

    /// Creates a poset from parent lists: `parents[i]` holds the elements
    /// covering `i`.
    pub fn from_parents(
        parents: &[Vec<usize>],
        labels: Option<Vec<String>>,
    ) -> Result<Self, PosetError> {
        let n = parents.len();
        let mut children = vec![Vec::new(); n];
        for (child, above) in parents.iter().enumerate() {
            for &parent in above {
                if parent >= n {
                    return Err(PosetError::InvalidRelationShape(
                        ErrorInfo::new("cover-index-out-of-range", "parent list names a missing element")
                            .with_context("child", child)
                            .with_context("parent", parent)
                            .with_context("size", n),
                    ));
                }
                children[parent].push(child);
            }
        }
        Self::from_children(&children, labels)
    }

    /// Creates the poset of size `n` respecting every `(lower, upper)`
    /// relation, closing transitively before validation.
    pub fn from_up_edges(
        n: usize,
        edges: &[(usize, usize)],
        labels: Option<Vec<String>>,
    ) -> Result<Self, PosetError> {
        let mut relation = Matrix::identity(n);
        for &(lower, upper) in edges {
            if lower >= n || upper >= n {
                return Err(PosetError::InvalidRelationShape(
                    ErrorInfo::new("edge-index-out-of-range", "edge names a missing element")
                        .with_context("lower", lower)
                        .with_context("upper", upper)
                        .with_context("size", n),
                ));
            }
            relation[(lower, upper)] = true;
        }
        let closure = relation.transitive_closure();
        validate_partial_order(&closure)?;
        Ok(Self::assemble(closure, resolve_labels(n, labels)?))
    }

    /// Creates the poset of size `n` respecting every `(upper, lower)`
    /// relation.
    pub fn from_down_edges(
        n: usize,
        edges: &[(usize, usize)],
        labels: Option<Vec<String>>,
    ) -> Result<Self, PosetError> {
        let flipped: Vec<(usize, usize)> = edges.iter().map(|&(a, b)| (b, a)).collect();
        Self::from_up_edges(n, &flipped, labels)
    }

    /// Creates a poset from a pairwise comparator over arbitrary elements.
    pub fn from_predicate<T>(
        elems: &[T],
        leq: impl Fn(&T, &T) -> bool,
        labels: Option<Vec<String>>,
    ) -> Result<Self, PosetError> {
        let m = elems.len();
        let relation = Matrix::from_fn(m, m, |i, j| leq(&elems[i], &elems[j]));
        Self::new(relation, labels)
    }

    /// Total order on `n` elements.
    pub fn chain(n: usize) -> Self {
        Self::assemble(Matrix::from_fn(n, n, |i, j| i <= j), default_labels(n))
    }

    /// Discrete order on `n` elements.
    pub fn antichain(n: usize) -> Self {
        Self::assemble(Matrix::identity(n), default_labels(n))
    }

    /// The empty poset.
    pub fn empty() -> Self {
        Self::chain(0)
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.n
    }

    /// Whether the poset has no elements.
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Borrows the relation matrix.
    pub fn leq_matrix(&self) -> &Matrix<bool> {
        &self.leq
    }

    /// Order test: whether `i <= j`.
    pub fn le(&self, i: usize, j: usize) -> bool {
        self.leq[(i, j)]
    }

    /// Borrows the element labels.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Copy of this poset carrying different labels.
    pub fn relabel(&self, labels: Option<Vec<String>>) -> Result<Self, PosetError> {
        let labels = resolve_labels(self.n, labels)?;
        Ok(Self::assemble(self.leq.clone(), labels))
    }

    /// Covering matrix: `covers[i,j]` iff `j` covers `i` with nothing
    /// strictly between them.
    pub fn covers_matrix(&self) -> &Matrix<bool> {
        self.caches
            .covers
            .get_or_init(|| derived::covering_matrix(&self.leq))
    }

    /// Covering test: whether `upper` covers `lower`.
    pub fn covers(&self, lower: usize, upper: usize) -> bool {
        self.covers_matrix()[(lower, upper)]
    }

    /// Matrix of shortest upward distances over covering edges; unreachable
    /// pairs hold the sentinel `n`.
    pub fn dist_matrix(&self) -> &Matrix<usize> {
        self.caches
            .dist
            .get_or_init(|| derived::covers_to_dist(self.covers_matrix()))
    }

    /// Shortest upward covering distance from `i` to `j`, or `n`.
    pub fn dist(&self, i: usize, j: usize) -> usize {
        self.dist_matrix()[(i, j)]
    }

    /// Topological order of the elements, bottom-up.
    ///
    /// A validated partial order cannot cycle; the `CycleDetected` arm is a
    /// defensive check for relations built through the unchecked path.
    pub fn toposort(&self) -> Result<&[usize], PosetError> {
        self.caches
            .topo
            .get_or_init(|| derived::kahn_toposort(self))
            .as_ref()
            .map(|topo| topo.as_slice())
            .map_err(|err| err.clone())
    }

    /// Inverse permutation of [`Poset::toposort`].
    pub fn toporank(&self) -> Result<Vec<usize>, PosetError> {
        Ok(derived::inverse_permutation(self.toposort()?))
    }

    /// Bottom-up adjacency lists: `parents()[i]` holds the covers of `i`.
    pub fn parents(&self) -> &[Vec<usize>] {
        self.caches
            .parents
            .get_or_init(|| derived::parent_lists(self.covers_matrix()))
    }

    /// Top-down adjacency lists: `children()[i]` holds the elements covered
    /// by `i`.
    pub fn children(&self) -> &[Vec<usize>] {
        self.caches
            .children
            .get_or_init(|| derived::child_lists(self.covers_matrix()))
    }

    /// Connected components of the relation viewed as an undirected graph.
    pub fn components(&self) -> &[Vec<usize>] {
        self.caches
            .components
            .get_or_init(|| derived::components(&self.leq))
    }

    /// Per-element covering distance from the nearest bottom.
    pub fn heights(&self) -> &[usize] {
        self.caches.heights.get_or_init(|| derived::heights(self))
    }

    /// Minimal elements.
    pub fn bottoms(&self) -> &[usize] {
        self.caches
            .bottoms
            .get_or_init(|| lattice::bottoms_of(&self.leq))
    }

    /// Maximal-below-everything elements (global tops).
    pub fn tops(&self) -> &[usize] {
        self.caches.tops.get_or_init(|| lattice::tops_of(&self.leq))
    }

    /// The unique bottom element.
    pub fn bottom(&self) -> Result<usize, PosetError> {
        match self.bottoms() {
            [] => Err(PosetError::NoBottom(
                ErrorInfo::new("no-minimum", "poset has no bottom element")
                    .with_context("size", self.n)
                    .with_relation(&self.leq),
            )),
            [bottom] => Ok(*bottom),
            many => Err(PosetError::MultipleBottoms(
                ErrorInfo::new("several-minima", "poset has several bottom elements")
                    .with_context("bottoms", format!("{many:?}"))
                    .with_relation(&self.leq),
            )),
        }
    }

    /// The unique top element.
    pub fn top(&self) -> Result<usize, PosetError> {
        match self.tops() {
            [] => Err(PosetError::NoTop(
                ErrorInfo::new("no-maximum", "poset has no top element")
                    .with_context("size", self.n)
                    .with_relation(&self.leq),
            )),
            [top] => Ok(*top),
            many => Err(PosetError::MultipleTops(
                ErrorInfo::new("several-maxima", "poset has several top elements")
                    .with_context("tops", format!("{many:?}"))
                    .with_relation(&self.leq),
            )),
        }
    }

    /// Join-irreducible elements: those with exactly one cover below.
    pub fn irreducibles(&self) -> &[usize] {
        self.caches
            .irreducibles
            .get_or_init(|| lattice::irreducibles_of(self))
    }

    /// Least-upper-bound table. Fails with `NotALattice` naming the first
    /// offending pair.
    pub fn lub_table(&self) -> Result<&Matrix<usize>, PosetError> {
        self.caches
            .lub
            .get_or_init(|| lattice::lub_table(self))
            .as_ref()
            .map_err(|err| err.clone())
    }

    /// Greatest-lower-bound table, computed over the transposed relation.
    pub fn glb_table(&self) -> Result<&Matrix<usize>, PosetError> {
        self.caches
            .glb
            .get_or_init(|| lattice::glb_table(self))
            .as_ref()
            .map_err(|err| err.clone())
    }

    /// Least upper bound of `i` and `j`.
    pub fn lub(&self, i: usize, j: usize) -> Result<usize, PosetError> {
        Ok(self.lub_table()?[(i, j)])
    }

    /// Greatest lower bound of `i` and `j`.
    pub fn glb(&self, i: usize, j: usize) -> Result<usize, PosetError> {
        Ok(self.glb_table()?[(i, j)])
    }

    /// Whether every pair has a unique lub and the poset has a bottom.
    pub fn is_lattice(&self) -> bool {
        self.n == 0 || (self.lub_table().is_ok() && self.bottom().is_ok())
    }

    /// First triple violating `glb(i, lub(j,k)) == lub(glb(i,j), glb(i,k))`,
    /// if any. Requires a lattice.
    pub fn distributivity_counterexample(
        &self,
    ) -> Result<Option<(usize, usize, usize)>, PosetError> {
        self.caches
            .distributive
            .get_or_init(|| lattice::distributive_witness(self))
            .clone()
    }

    /// Whether the lattice satisfies the distributive law.
    pub fn is_distributive(&self) -> Result<bool, PosetError> {
        Ok(self.distributivity_counterexample()?.is_none())
    }

    /// Fails with `NotDistributive` carrying the counter-example triple.
    pub fn require_distributive(&self) -> Result<(), PosetError> {
        match self.distributivity_counterexample()? {
            None => Ok(()),
            Some((i, j, k)) => Err(PosetError::NotDistributive {
                witness: (i, j, k),
                info: ErrorInfo::new(
                    "law-violated",
                    format!("glb({i}, lub({j}, {k})) differs from lub(glb({i}, {j}), glb({i}, {k}))"),
                )
                .with_context("i", i)
                .with_context("j", j)
                .with_context("k", k)
                .with_relation(&self.leq),
            }),
        }
    }

    /// Permutation-invariant per-element hash vector after two refinement
    /// rounds.
    pub fn element_hashes(&self) -> &[u64] {
        self.caches
            .element_hashes
            .get_or_init(|| iso::element_hashes(&self.leq))
    }

    /// Whole-poset hash: multiset hash of the element hashes.
    pub fn structural_hash(&self) -> u64 {
        *self
            .caches
            .hash
            .get_or_init(|| hash_sorted(self.element_hashes()))
    }

    /// Canonical form: a deterministic isomorphism-invariant relabeling
    /// with default labels.
    pub fn canonical(&self) -> &Poset {
        self.caches
            .canonical
            .get_or_init(|| Box::new(iso::canonical_form(self)))
    }
}

impl PartialEq for Poset {
    /// Literal equality of relation and labels. Structural equality up to
    /// reindexing is [`Poset::isomorphic`].
    fn eq(&self, other: &Self) -> bool {
        self.n == other.n && self.leq == other.leq && self.labels == other.labels
    }
}

impl Eq for Poset {}

impl fmt::Display for Poset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P({}", self.n)?;
        if let Ok(topo) = self.toposort() {
            let parents = self.parents();
            for &i in topo {
                if !parents[i].is_empty() {
                    let ups: Vec<String> = parents[i].iter().map(|p| p.to_string()).collect();
                    write!(f, " : {}<{}", i, ups.join(","))?;
                }
            }
        }
        write!(f, ")")?;
        if self.labels != default_labels(self.n) {
            write!(f, " with labels {}", self.labels.join(", "))?;
        }
        Ok(())
    }
}
