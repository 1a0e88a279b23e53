use std::collections::BTreeSet;
use std::convert::TryFrom;
use std::fmt::{self, Display};

use crate::error::GraphError;
use crate::matrix::AdjMatrix;

use itertools::Itertools;
use petgraph::{
    graph::{Graph, IndexType, NodeIndex, UnGraph},
    visit::EdgeRef,
    Undirected,
};

/// Is `{a, b}` an edge of the cycle `1 - 2 - ... - n - 1`?
pub fn is_cycle_edge(a: usize, b: usize, n: usize) -> bool {
    let d = a.abs_diff(b);
    d == 1 || d + 1 == n
}

/// Undirected edge, stored with the smaller endpoint first
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Edge(usize, usize);

impl Edge {
    pub fn new(a: usize, b: usize) -> Result<Self, GraphError> {
        if a == b {
            return Err(GraphError::SelfLoop(a));
        }
        Ok(Self(a.min(b), a.max(b)))
    }

    pub fn endpoints(&self) -> (usize, usize) {
        (self.0, self.1)
    }

    pub fn contains(&self, v: usize) -> bool {
        self.0 == v || self.1 == v
    }

    pub fn is_cycle_edge(&self, n: usize) -> bool {
        is_cycle_edge(self.0, self.1, n)
    }

    fn check_range(&self, n: usize) -> Result<(), GraphError> {
        for vertex in [self.0, self.1] {
            if vertex == 0 || vertex > n {
                return Err(GraphError::VertexOutOfRange { vertex, n });
            }
        }
        Ok(())
    }
}

impl Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.0, self.1)
    }
}

impl TryFrom<(usize, usize)> for Edge {
    type Error = GraphError;

    fn try_from((a, b): (usize, usize)) -> Result<Self, Self::Error> {
        Self::new(a, b)
    }
}

/// Simple undirected graph on the vertices `1..=n`
///
/// Each vertex has a sorted list of distinct neighbours. All
/// constructors guarantee that the adjacency relation is symmetric
/// and free of self-loops.
///
/// # Example
///
/// ```rust
/// use chord_class::graph::{Adjacency, Edge};
///
/// // the 5-cycle with the chord 1-3
/// let g = Adjacency::with_added_edges(5, [Edge::new(1, 3)?])?;
/// assert_eq!(g.neighbors(1), &[2, 3, 5]);
/// assert_eq!(g.edge_count(), 6);
/// # Ok::<(), chord_class::error::GraphError>(())
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Adjacency {
    nbrs: Vec<Vec<usize>>,
}

impl Adjacency {
    /// `n` isolated vertices
    pub fn empty(n: usize) -> Self {
        Self {
            nbrs: vec![Vec::new(); n],
        }
    }

    /// The cycle `1 - 2 - ... - n - 1`
    pub fn cycle(n: usize) -> Result<Self, GraphError> {
        Self::with_added_edges(n, [])
    }

    /// The `n`-cycle together with the given extra edges
    ///
    /// Extra edges that are already part of the cycle or listed
    /// more than once are merged.
    pub fn with_added_edges<I>(n: usize, added: I) -> Result<Self, GraphError>
    where
        I: IntoIterator<Item = Edge>,
    {
        if n < 3 {
            return Err(GraphError::TooFewVertices(n));
        }
        let cycle = (1..=n).map(|i| Edge(i, i % n + 1));
        let mut g = Self::empty(n);
        for edge in cycle.chain(added) {
            edge.check_range(n)?;
            g.insert(edge);
        }
        g.normalise();
        Ok(g)
    }

    /// Graph on `1..=n` with arbitrary edges
    pub fn from_edges<I>(n: usize, edges: I) -> Result<Self, GraphError>
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let mut g = Self::empty(n);
        for (a, b) in edges {
            let edge = Edge::new(a, b)?;
            edge.check_range(n)?;
            g.insert(edge);
        }
        g.normalise();
        Ok(g)
    }

    /// Graph from explicit neighbour lists
    ///
    /// The vertex labels have to be exactly `1..=k`, where `k` is the
    /// number of lists. Every neighbour relation has to be listed in
    /// both directions.
    pub fn from_neighbor_lists<I, J>(lists: I) -> Result<Self, GraphError>
    where
        I: IntoIterator<Item = (usize, J)>,
        J: IntoIterator<Item = usize>,
    {
        let lists = Vec::from_iter(
            lists
                .into_iter()
                .map(|(v, nbrs)| (v, Vec::from_iter(nbrs)))
                .sorted_by_key(|(v, _)| *v),
        );
        let n = lists.len();
        let mut g = Self::empty(n);
        for (expected, (v, nbrs)) in (1..=n).zip(lists) {
            if v != expected {
                return Err(GraphError::MissingVertex { missing: expected, n });
            }
            for w in nbrs {
                if w == v {
                    return Err(GraphError::SelfLoop(v));
                }
                if w == 0 || w > n {
                    return Err(GraphError::VertexOutOfRange { vertex: w, n });
                }
                g.nbrs[v - 1].push(w);
            }
        }
        g.normalise();
        for (u, v) in g.arcs() {
            if !g.is_adjacent(v, u) {
                return Err(GraphError::Asymmetric(u, v));
            }
        }
        Ok(g)
    }

    fn insert(&mut self, Edge(a, b): Edge) {
        self.nbrs[a - 1].push(b);
        self.nbrs[b - 1].push(a);
    }

    fn normalise(&mut self) {
        for nbrs in &mut self.nbrs {
            nbrs.sort_unstable();
            nbrs.dedup();
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.nbrs.len()
    }

    pub fn vertices(&self) -> impl Iterator<Item = usize> {
        1..=self.vertex_count()
    }

    /// Sorted neighbours of `v`, empty if `v` is not a vertex
    pub fn neighbors(&self, v: usize) -> &[usize] {
        v.checked_sub(1)
            .and_then(|i| self.nbrs.get(i))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn degree(&self, v: usize) -> usize {
        self.neighbors(v).len()
    }

    pub fn is_adjacent(&self, u: usize, v: usize) -> bool {
        self.neighbors(u).binary_search(&v).is_ok()
    }

    pub fn degree_sum(&self) -> usize {
        self.nbrs.iter().map(Vec::len).sum()
    }

    pub fn edge_count(&self) -> usize {
        let sum = self.degree_sum();
        debug_assert_eq!(sum % 2, 0);
        sum / 2
    }

    /// All `(u, v)` with `v` a neighbour of `u`, in both directions
    pub fn arcs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.nbrs
            .iter()
            .enumerate()
            .flat_map(|(i, nbrs)| nbrs.iter().map(move |&v| (i + 1, v)))
    }

    /// All edges in increasing order
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.arcs().filter(|(u, v)| u < v).map(|(u, v)| Edge(u, v))
    }

    /// The edges that are not part of the `n`-cycle
    pub fn added_edges(&self, n: usize) -> BTreeSet<Edge> {
        self.edges().filter(|e| !e.is_cycle_edge(n)).collect()
    }

    pub fn to_matrix(&self) -> AdjMatrix {
        AdjMatrix::from_adjacency(self, self.vertex_count())
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &[usize])> {
        self.nbrs
            .iter()
            .enumerate()
            .map(|(i, nbrs)| (i + 1, nbrs.as_slice()))
    }
}

/// The `n`-cycle plus `added`, see [Adjacency::with_added_edges]
pub fn build_adjacency<I>(n: usize, added: I) -> Result<Adjacency, GraphError>
where
    I: IntoIterator<Item = Edge>,
{
    Adjacency::with_added_edges(n, added)
}

pub fn edge_count(adjacency: &Adjacency) -> usize {
    adjacency.edge_count()
}

/// Adjacency matrix for the vertices `1..=n`
///
/// Arcs involving vertices beyond `n` are left out.
pub fn to_matrix(adjacency: &Adjacency, n: usize) -> AdjMatrix {
    AdjMatrix::from_adjacency(adjacency, n)
}

pub fn added_edges(adjacency: &Adjacency, n: usize) -> BTreeSet<Edge> {
    adjacency.added_edges(n)
}

impl From<&Adjacency> for UnGraph<(), ()> {
    fn from(g: &Adjacency) -> Self {
        let mut res = UnGraph::with_capacity(g.vertex_count(), g.edge_count());
        for _ in g.vertices() {
            res.add_node(());
        }
        for Edge(a, b) in g.edges() {
            res.add_edge(NodeIndex::new(a - 1), NodeIndex::new(b - 1), ());
        }
        res
    }
}

/// Node index `i` becomes vertex `i + 1`. Parallel edges are merged.
impl<N, E, Ix: IndexType> TryFrom<&Graph<N, E, Undirected, Ix>> for Adjacency {
    type Error = GraphError;

    fn try_from(g: &Graph<N, E, Undirected, Ix>) -> Result<Self, Self::Error> {
        Self::from_edges(
            g.node_count(),
            g.edge_references()
                .map(|e| (e.source().index() + 1, e.target().index() + 1)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use log::debug;
    use petgraph::algo::is_isomorphic;
    use testing::ChordGraphIter;

    fn log_init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn cycle_edges() {
        assert!(is_cycle_edge(1, 2, 5));
        assert!(is_cycle_edge(5, 1, 5));
        assert!(is_cycle_edge(1, 5, 5));
        assert!(!is_cycle_edge(1, 3, 5));
        assert!(!is_cycle_edge(2, 5, 5));
        // every pair is on the triangle
        assert!(is_cycle_edge(1, 3, 3));
        assert!(!is_cycle_edge(1, 4, 8));
        assert!(Edge::new(8, 1).unwrap().is_cycle_edge(8));
    }

    #[test]
    fn edge_canonical() {
        let e = Edge::new(4, 2).unwrap();
        assert_eq!(e.endpoints(), (2, 4));
        assert_eq!(e, Edge::new(2, 4).unwrap());
        assert_eq!(e.to_string(), "2-4");
        assert!(e.contains(4));
        assert!(!e.contains(3));
        assert_eq!(Edge::new(3, 3), Err(GraphError::SelfLoop(3)));
    }

    #[test]
    fn cycle() {
        log_init();

        for n in 3..=8 {
            let g = Adjacency::cycle(n).unwrap();
            debug!("{n}-cycle: {g:?}");
            assert_eq!(g.vertex_count(), n);
            assert_eq!(g.edge_count(), n);
            assert!(g.vertices().all(|v| g.degree(v) == 2));
            assert!(g.added_edges(n).is_empty());
        }
        assert_eq!(Adjacency::cycle(2), Err(GraphError::TooFewVertices(2)));
    }

    #[test]
    fn build() {
        let chords = [Edge::new(1, 3).unwrap(), Edge::new(4, 1).unwrap()];
        let g = build_adjacency(5, chords).unwrap();
        assert_eq!(g.neighbors(1), &[2, 3, 4, 5]);
        assert_eq!(g.neighbors(2), &[1, 3]);
        assert_eq!(g.neighbors(3), &[1, 2, 4]);
        assert_eq!(g.neighbors(4), &[1, 3, 5]);
        assert_eq!(g.neighbors(5), &[1, 4]);
        assert_eq!(edge_count(&g), 7);
        assert_eq!(
            Vec::from_iter(added_edges(&g, 5)),
            Vec::from_iter(chords.into_iter().sorted())
        );
    }

    #[test]
    fn build_merges_duplicates() {
        let added = [
            Edge::new(1, 2).unwrap(),
            Edge::new(2, 4).unwrap(),
            Edge::new(4, 2).unwrap(),
        ];
        let g = build_adjacency(4, added).unwrap();
        assert_eq!(g.edge_count(), 5);
        assert_eq!(g.neighbors(2), &[1, 3, 4]);
    }

    #[test]
    fn build_out_of_range() {
        let added = [Edge::new(2, 6).unwrap()];
        assert_eq!(
            build_adjacency(5, added),
            Err(GraphError::VertexOutOfRange { vertex: 6, n: 5 })
        );
        let added = [Edge::new(0, 2).unwrap()];
        assert_eq!(
            build_adjacency(5, added),
            Err(GraphError::VertexOutOfRange { vertex: 0, n: 5 })
        );
    }

    #[test]
    fn neighbor_lists() {
        let g = Adjacency::from_neighbor_lists([
            (2, vec![1, 3]),
            (1, vec![2, 3, 3]),
            (3, vec![2, 1]),
        ])
        .unwrap();
        assert_eq!(g, Adjacency::cycle(3).unwrap());

        let asym = Adjacency::from_neighbor_lists([
            (1, vec![2]),
            (2, vec![]),
        ]);
        assert_eq!(asym, Err(GraphError::Asymmetric(1, 2)));

        let gap = Adjacency::from_neighbor_lists([
            (1, vec![3]),
            (3, vec![1]),
        ]);
        assert_eq!(gap, Err(GraphError::MissingVertex { missing: 2, n: 2 }));

        let looped = Adjacency::from_neighbor_lists([(1, vec![1])]);
        assert_eq!(looped, Err(GraphError::SelfLoop(1)));
    }

    #[test]
    fn outside_vertices() {
        let g = Adjacency::cycle(4).unwrap();
        assert_eq!(g.neighbors(0), &[] as &[usize]);
        assert_eq!(g.neighbors(5), &[] as &[usize]);
        assert!(!g.is_adjacent(0, 1));
    }

    #[test]
    fn matrix() {
        let g = build_adjacency(4, [Edge::new(1, 3).unwrap()]).unwrap();
        let m = to_matrix(&g, 4);
        assert_eq!(m.vertex_count(), 4);
        for u in 1..=4 {
            for v in 1..=4 {
                assert_eq!(m.is_adjacent(u, v), g.is_adjacent(u, v));
            }
        }
        assert!(m.is_symmetric());
        assert_eq!(m.arc_count(), 2 * g.edge_count());
    }

    #[test]
    fn random_petgraph_conversion() {
        log_init();

        for g in ChordGraphIter::default().take(200) {
            debug!("Initial graph: {g:?}");
            let adj = Adjacency::try_from(&g).unwrap();
            debug!("Adjacency: {adj:?}");
            assert_eq!(adj.vertex_count(), g.node_count());
            assert_eq!(adj.edge_count(), g.edge_count());
            let gg = UnGraph::<(), ()>::from(&adj);
            assert!(is_isomorphic(&g, &gg));
            assert_eq!(Adjacency::try_from(&gg).unwrap(), adj);
        }
    }

    #[test]
    fn petgraph_self_loop() {
        let g = UnGraph::<(), ()>::from_edges([(0, 1), (1, 1)]);
        assert_eq!(Adjacency::try_from(&g), Err(GraphError::SelfLoop(2)));
    }
}
