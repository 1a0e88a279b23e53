use crate::graph::Adjacency;

/// Dense adjacency matrix for the vertices `1..=n`
///
/// Row and column 0 exist but are never set, so that vertex labels
/// can be used as indices directly.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct AdjMatrix {
    n: usize,
    arcs: usize,
    cells: Vec<bool>,
}

impl AdjMatrix {
    /// Matrix without any arcs
    pub fn new(n: usize) -> Self {
        Self {
            n,
            arcs: 0,
            cells: vec![false; (n + 1) * (n + 1)],
        }
    }

    pub(crate) fn from_adjacency(g: &Adjacency, n: usize) -> Self {
        let mut m = Self::new(n);
        for (u, v) in g.arcs().filter(|&(u, v)| u <= n && v <= n) {
            m.set(u, v);
        }
        m
    }

    fn idx(&self, u: usize, v: usize) -> usize {
        u * (self.n + 1) + v
    }

    /// Add the arc `u -> v`
    ///
    /// # Panics
    ///
    /// Panics if `u` or `v` is larger than the vertex count
    pub fn set(&mut self, u: usize, v: usize) {
        assert!(u <= self.n && v <= self.n);
        let idx = self.idx(u, v);
        if !self.cells[idx] {
            self.cells[idx] = true;
            self.arcs += 1;
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.n
    }

    /// Number of arcs, i.e. twice the number of edges for a symmetric matrix
    pub fn arc_count(&self) -> usize {
        self.arcs
    }

    pub fn is_adjacent(&self, u: usize, v: usize) -> bool {
        u <= self.n && v <= self.n && self.cells[self.idx(u, v)]
    }

    pub fn is_symmetric(&self) -> bool {
        (1..=self.n).all(|u| {
            (u..=self.n).all(|v| self.is_adjacent(u, v) == self.is_adjacent(v, u))
        })
    }
}

impl From<&Adjacency> for AdjMatrix {
    fn from(g: &Adjacency) -> Self {
        g.to_matrix()
    }
}
