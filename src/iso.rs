use crate::error::SearchError;
use crate::graph::Adjacency;
use crate::mapping::Mapping;
use crate::matrix::AdjMatrix;

use log::{trace, warn};

/// Largest vertex count accepted by default
pub const DEFAULT_MAX_SEARCH_VERTICES: usize = 10;

/// Limits for the isomorphism search
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct SearchOptions {
    /// Refuse to search for isomorphisms between larger graphs
    pub max_vertices: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            max_vertices: DEFAULT_MAX_SEARCH_VERTICES,
        }
    }
}

/// Work done during a search
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Default)]
pub struct SearchStats {
    /// Number of partial assignments that were tested
    pub tried: u64,
    /// Number of partial assignments that were inconsistent
    pub pruned: u64,
    /// Number of complete permutations that were verified
    pub complete: u64,
}

/// Find an isomorphism to another graph
pub trait FindIsomorphism {
    fn find_isomorphism(&self, other: &Self) -> Option<Mapping>;
}

/// Try to find an isomorphism to another graph
pub trait TryFindIsomorphism {
    type Error;

    fn try_find_isomorphism(
        &self,
        other: &Self,
    ) -> Result<Option<Mapping>, Self::Error>;
}

impl FindIsomorphism for Adjacency {
    fn find_isomorphism(&self, other: &Self) -> Option<Mapping> {
        find_isomorphism(self, other, self.vertex_count())
    }
}

impl TryFindIsomorphism for Adjacency {
    type Error = SearchError;

    fn try_find_isomorphism(
        &self,
        other: &Self,
    ) -> Result<Option<Mapping>, Self::Error> {
        try_find_isomorphism(self, other, self.vertex_count())
    }
}

/// Find a bijection `p` with `a.is_adjacent(u, v) == b.is_adjacent(p(u), p(v))`
///
/// Returns `None` if the graphs are not isomorphic or either of them
/// does not have exactly `n` vertices. The search takes exponential
/// time, so there is a warning for graphs larger than
/// [DEFAULT_MAX_SEARCH_VERTICES]; use [try_find_isomorphism] to
/// reject them instead.
///
/// # Example
///
/// ```rust
/// use chord_class::graph::{Adjacency, Edge};
/// use chord_class::iso::find_isomorphism;
///
/// let a = Adjacency::with_added_edges(5, [Edge::new(1, 3)?])?;
/// let b = Adjacency::with_added_edges(5, [Edge::new(2, 5)?])?;
/// let p = find_isomorphism(&a, &b, 5).unwrap();
/// assert!(p.is_isomorphism(&a, &b));
/// # Ok::<(), chord_class::error::GraphError>(())
/// ```
pub fn find_isomorphism(
    a: &Adjacency,
    b: &Adjacency,
    n: usize,
) -> Option<Mapping> {
    if n > DEFAULT_MAX_SEARCH_VERTICES {
        warn!("Searching for isomorphisms between graphs with {n} vertices, this may take a long time");
    }
    let opt = SearchOptions { max_vertices: usize::MAX };
    let (res, _) = find_isomorphism_with(a, b, n, &opt)
        .expect("unbounded search cannot refuse a graph");
    res
}

/// Like [find_isomorphism], but reject graphs that exceed the default limits
pub fn try_find_isomorphism(
    a: &Adjacency,
    b: &Adjacency,
    n: usize,
) -> Result<Option<Mapping>, SearchError> {
    find_isomorphism_with(a, b, n, &SearchOptions::default()).map(|(res, _)| res)
}

/// Search with explicit limits, also reporting how much work was done
pub fn find_isomorphism_with(
    a: &Adjacency,
    b: &Adjacency,
    n: usize,
    opt: &SearchOptions,
) -> Result<(Option<Mapping>, SearchStats), SearchError> {
    if a.vertex_count() != n || b.vertex_count() != n {
        trace!(
            "Vertex counts {} and {} differ from {n}",
            a.vertex_count(),
            b.vertex_count()
        );
        return Ok((None, SearchStats::default()));
    }
    find_matrix_isomorphism(&a.to_matrix(), &b.to_matrix(), opt)
}

/// Isomorphism search on adjacency matrices
///
/// The permutation is built position by position, trying the
/// remaining images in the order produced by swapping them into
/// place. Each partial assignment is checked for consistency with
/// the adjacency of all previously assigned vertices before going
/// deeper. The first complete consistent permutation is returned,
/// so the result only depends on the two matrices.
pub fn find_matrix_isomorphism(
    a: &AdjMatrix,
    b: &AdjMatrix,
    opt: &SearchOptions,
) -> Result<(Option<Mapping>, SearchStats), SearchError> {
    let n = a.vertex_count();
    if n > opt.max_vertices {
        return Err(SearchError::TooManyVertices {
            n,
            max: opt.max_vertices,
        });
    }
    if n != b.vertex_count() || a.arc_count() != b.arc_count() {
        trace!("Size mismatch, skipping search");
        return Ok((None, SearchStats::default()));
    }
    let mut search = Search {
        a,
        b,
        perm: Vec::from_iter(1..=n),
        stats: SearchStats::default(),
    };
    let found = search.run(0);
    trace!("Search finished: {:?}", search.stats);
    let Search { perm, stats, .. } = search;
    let res = found.then(|| Mapping::from_permutation(perm));
    Ok((res, stats))
}

struct Search<'a> {
    a: &'a AdjMatrix,
    b: &'a AdjMatrix,
    perm: Vec<usize>,
    stats: SearchStats,
}

impl<'a> Search<'a> {
    // On success `perm` holds the isomorphism
    fn run(&mut self, pos: usize) -> bool {
        let n = self.perm.len();
        if pos == n {
            self.stats.complete += 1;
            return self.is_consistent(n);
        }
        for i in pos..n {
            self.perm.swap(pos, i);
            self.stats.tried += 1;
            if self.extends_consistently(pos) {
                if self.run(pos + 1) {
                    return true;
                }
            } else {
                self.stats.pruned += 1;
            }
            self.perm.swap(pos, i);
        }
        false
    }

    // The prefix `..pos` is already known to be consistent
    fn extends_consistently(&self, pos: usize) -> bool {
        let u = pos + 1;
        let pu = self.perm[pos];
        (1..=u).zip(&self.perm).all(|(v, &pv)| {
            self.a.is_adjacent(u, v) == self.b.is_adjacent(pu, pv)
                && self.a.is_adjacent(v, u) == self.b.is_adjacent(pv, pu)
        })
    }

    fn is_consistent(&self, k: usize) -> bool {
        (1..=k).zip(&self.perm).all(|(u, &pu)| {
            (1..=k)
                .zip(&self.perm)
                .all(|(v, &pv)| self.a.is_adjacent(u, v) == self.b.is_adjacent(pu, pv))
        })
    }
}
